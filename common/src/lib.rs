pub mod log_setup;
pub mod plane;
pub mod test_utils;

pub use plane::Plane;

/// Smallest denominator the numeric kernels divide by.
pub const EPSILON: f64 = 1e-6;
