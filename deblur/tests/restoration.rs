mod support;

use deblur::{
    compute_difference, mean_squared_error, restore, synthesize_degraded, BlurType,
    DeconvolutionMethod, DegradeConfig, NoiseType, Pipeline, PipelineConfig, RestoreConfig,
};

use support::synthetic_image::white_square;

fn degraded_square() -> (deblur::PixelGrid, deblur::Degraded) {
    let clean = white_square(64, 16, 48);
    let config = DegradeConfig {
        blur: BlurType::Gaussian { sigma: 2.0 },
        kernel_size: 9,
        noise: NoiseType::None,
        seed: Some(1),
    };
    let degraded = synthesize_degraded(&clean, &config).unwrap();
    (clean, degraded)
}

fn restored_mse(
    clean: &deblur::PixelGrid,
    degraded: &deblur::Degraded,
    method: DeconvolutionMethod,
    iterations: usize,
) -> f64 {
    let restored = restore(
        &degraded.observed,
        &degraded.kernel,
        &RestoreConfig { method, iterations },
    )
    .unwrap();
    mean_squared_error(clean, &restored).unwrap()
}

#[test]
fn richardson_lucy_reduces_error_on_gaussian_blur() {
    common::test_utils::init_tracing();
    let (clean, degraded) = degraded_square();
    let degraded_mse = mean_squared_error(&clean, &degraded.observed).unwrap();
    let after_one = restored_mse(&clean, &degraded, DeconvolutionMethod::RichardsonLucy, 1);
    let after_ten = restored_mse(&clean, &degraded, DeconvolutionMethod::RichardsonLucy, 10);

    assert!(
        after_ten < after_one,
        "10 iterations ({:.1}) should beat 1 iteration ({:.1})",
        after_ten,
        after_one
    );
    assert!(
        after_ten < degraded_mse,
        "restoration ({:.1}) should beat the degraded image ({:.1})",
        after_ten,
        degraded_mse
    );
}

#[test]
fn tikhonov_reduces_error_on_gaussian_blur() {
    let (clean, degraded) = degraded_square();
    let degraded_mse = mean_squared_error(&clean, &degraded.observed).unwrap();
    let mse = restored_mse(&clean, &degraded, DeconvolutionMethod::tikhonov(0.01), 10);
    assert!(mse < degraded_mse, "{:.1} vs {:.1}", mse, degraded_mse);
}

#[test]
fn zero_iterations_return_the_observation() {
    let (_, degraded) = degraded_square();
    let restored = restore(
        &degraded.observed,
        &degraded.kernel,
        &RestoreConfig {
            method: DeconvolutionMethod::RichardsonLucy,
            iterations: 0,
        },
    )
    .unwrap();
    assert_eq!(restored, degraded.observed);
}

#[test]
fn pipeline_matches_manual_composition() {
    let clean = white_square(48, 12, 36);
    let config = PipelineConfig {
        degrade: DegradeConfig {
            blur: BlurType::Motion { angle: 45.0 },
            kernel_size: 5,
            noise: NoiseType::default_gaussian(),
            seed: Some(2024),
        },
        restore: RestoreConfig {
            method: DeconvolutionMethod::RichardsonLucy,
            iterations: 4,
        },
    };

    let output = Pipeline::run(&clean, &config).unwrap();
    let degraded = synthesize_degraded(&clean, &config.degrade).unwrap();
    let restored = restore(&degraded.observed, &degraded.kernel, &config.restore).unwrap();

    assert_eq!(output.observed, degraded.observed);
    assert_eq!(output.kernel, degraded.kernel);
    assert_eq!(output.restored, restored);
    assert_eq!(
        output.difference,
        compute_difference(&degraded.observed, &restored).unwrap()
    );
}
