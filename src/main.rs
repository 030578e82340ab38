use constancy_rs::constancy::{
    ClassicalSuiteConfig, EvaluationConfig, EvaluationPipeline, FailurePolicy, Illuminant,
    LabeledSample, NdArray,
};
use constancy_rs::logger;

use tracing::{info, warn};

const SCENE_SIZE: usize = 32;

/// Illuminants spanning warm tungsten to cool shade.
const LIGHTS: [[f64; 3]; 6] = [
    [1.00, 0.72, 0.42],
    [0.95, 0.82, 0.62],
    [0.85, 0.85, 0.85],
    [0.74, 0.82, 0.95],
    [0.62, 0.78, 1.00],
    [0.90, 0.95, 0.70],
];

/// Deterministic synthetic scene: mostly neutral surfaces, a few colored
/// patches and a clipped highlight, lit by `light`.
fn synthetic_scene(index: usize, light: [f64; 3]) -> Vec<[f64; 3]> {
    let phase = index as f64 * 0.37;
    (0..SCENE_SIZE * SCENE_SIZE)
        .map(|i| {
            let (row, col) = ((i / SCENE_SIZE) as f64, (i % SCENE_SIZE) as f64);
            let shade = 0.35 + 0.25 * ((row * 0.31 + phase).sin() * (col * 0.23 - phase).cos());
            let tint = if (row as usize / 8 + col as usize / 8 + index) % 5 == 0 {
                [1.2, 0.7, 0.9]
            } else {
                [1.0, 1.0, 1.0]
            };
            let highlight = row < 3.0 && col < 3.0;
            let mut pixel = [0.0; 3];
            for c in 0..3 {
                let value = if highlight {
                    light[c]
                } else {
                    light[c] * shade * tint[c]
                };
                pixel[c] = value.clamp(0.0, 1.0);
            }
            pixel
        })
        .collect()
}

fn synthetic_batch(count: usize) -> Vec<LabeledSample> {
    (0..count)
        .map(|index| {
            let light = LIGHTS[index % LIGHTS.len()];
            let pixels = synthetic_scene(index, light);
            let image = if index % 2 == 0 {
                let bytes: Vec<[u8; 3]> = pixels
                    .iter()
                    .map(|p| p.map(|v| (v * 255.0).round() as u8))
                    .collect();
                NdArray::from_rgb_u8(SCENE_SIZE, SCENE_SIZE, &bytes)
            } else {
                NdArray::from_rgb_f64(SCENE_SIZE, SCENE_SIZE, &pixels)
            };
            LabeledSample::new(format!("scene_{index:03}"), image, Illuminant(light))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    logger::try_init("info")?;

    info!("Starting classical illuminant benchmark...");

    let samples = synthetic_batch(24);
    let config = EvaluationConfig::builder()
        .failure_policy(FailurePolicy::Skip)
        .build();
    let suite = ClassicalSuiteConfig::default();

    info!("Samples: {}", samples.len());
    info!("Methods: {}", suite.methods().len());

    for method in suite.methods() {
        let pipeline = EvaluationPipeline::with_config(method, config.clone());
        match pipeline.evaluate_with_timings(&samples) {
            Ok((outcome, timings)) => {
                info!("{}\n{}", outcome.estimator, outcome.report);
                timings.log_summary();
            }
            Err(e) => warn!("{} failed: {}", method.name(), e),
        }
    }

    Ok(())
}
