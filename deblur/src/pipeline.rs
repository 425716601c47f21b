//! One-call degrade, restore and compare flow.

use crate::analysis::compute_difference;
use crate::config::PipelineConfig;
use crate::degrade::{synthesize_degraded, Degraded};
use crate::error::Result;
use crate::grid::PixelGrid;
use crate::kernel::Kernel;
use crate::restore::restore;

/// Every intermediate image of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Blurred and noisy observation.
    pub observed: PixelGrid,
    /// PSF used for both degradation and restoration.
    pub kernel: Kernel,
    pub restored: PixelGrid,
    /// `|observed - restored|` per channel.
    pub difference: PixelGrid,
}

/// Runs a [`PipelineConfig`] against clean images.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn run(clean: &PixelGrid, config: &PipelineConfig) -> Result<PipelineOutput> {
        config.validate()?;

        let Degraded { observed, kernel } = synthesize_degraded(clean, &config.degrade)?;
        let restored = restore(&observed, &kernel, &config.restore)?;
        let difference = compute_difference(&observed, &restored)?;

        Ok(PipelineOutput {
            observed,
            kernel,
            restored,
            difference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degrade::DegradeConfig;
    use crate::kernel::BlurType;
    use crate::restore::RestoreConfig;
    use crate::testing::test_pattern;

    #[test]
    fn test_identity_pipeline_has_empty_difference() {
        let clean = test_pattern(16, 16);
        let config = PipelineConfig {
            degrade: DegradeConfig {
                blur: BlurType::Identity,
                kernel_size: 1,
                ..Default::default()
            },
            restore: RestoreConfig::default(),
        };
        let output = Pipeline::run(&clean, &config).unwrap();
        assert_eq!(output.observed, clean);
        assert_eq!(output.restored, clean);
        assert_eq!(output.difference, PixelGrid::new(16, 16).unwrap());
    }

    #[test]
    fn test_outputs_are_consistent() {
        let clean = test_pattern(24, 24);
        let config = PipelineConfig::default();
        let output = Pipeline::run(&clean, &config).unwrap();
        assert_eq!(output.kernel, Kernel::gaussian(3, 3.0).unwrap());
        assert_eq!(
            output.restored,
            restore(&output.observed, &output.kernel, &config.restore).unwrap()
        );
        assert_eq!(
            output.difference,
            compute_difference(&output.observed, &output.restored).unwrap()
        );
    }

    #[test]
    fn test_invalid_config_fails_before_work() {
        let clean = test_pattern(8, 8);
        let mut config = PipelineConfig::default();
        config.degrade.kernel_size = 0;
        assert!(Pipeline::run(&clean, &config).is_err());
    }
}
