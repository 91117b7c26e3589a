//! Run every augmentation on a synthetic two-feature signal.
//!
//! Run with: `RUST_LOG=debug cargo run -p tsaug --example augment_signal`

use anyhow::Result;
use ndarray::{Array2, ArrayD, Axis};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tsaug::prelude::*;

fn synthetic_signal(len: usize, phase: f64) -> Array2<f64> {
    Array2::from_shape_fn((len, 2), |(t, f)| {
        let x = t as f64 / len as f64;
        let slow = (std::f64::consts::TAU * 3.0 * x + phase).sin();
        let fast = 0.3 * (std::f64::consts::TAU * (20.0 + 10.0 * f as f64) * x).cos();
        slow + fast + 0.2 * x
    })
}

fn log_summary(name: &str, input: &ArrayD<f64>, output: &ArrayD<f64>) {
    let rmse = (input - output).mapv(|d| d * d).mean().unwrap_or(0.0).sqrt();
    let means: Vec<f64> = output
        .mean_axis(Axis(0))
        .map(|m| m.iter().copied().collect())
        .unwrap_or_default();
    info!(
        augment = name,
        shape = ?output.shape(),
        rmse,
        feature_means = ?means,
        "augmented"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed = Seed::new(42);
    let signal = synthetic_signal(256, 0.0).into_dyn();
    let other = synthetic_signal(256, 1.3).into_dyn();
    info!(shape = ?signal.shape(), seed = seed.value(), "generated synthetic signal");

    let single: Vec<Box<dyn Augment>> = vec![
        Box::new(DominantShuffle::new(4)),
        Box::new(EmdAugment::default().with_imf_rate(0.8)),
        Box::new(WaveMask::new(vec![0.0, 0.2, 0.4]).with_wavelet("db4").with_level(3)),
    ];
    for augment in &single {
        let out = augment.augment_seeded(signal.view(), seed.derive(augment.name()))?;
        log_summary(augment.name(), &signal, &out);
    }

    let multi: Vec<Box<dyn MultiAugment>> = vec![
        Box::new(MixUp::new(0.4).with_mix_rate(0.5)),
        Box::new(WaveMix::new(vec![0.7, 0.5]).with_wavelet("sym4")),
    ];
    for augment in &multi {
        let out = augment.augment_multi_seeded(signal.view(), other.view(), seed.derive(augment.name()))?;
        log_summary(augment.name(), &signal, &out);
    }

    let pipeline = AugmentConfig::from_json(
        r#"{
            "type": "compose",
            "augments": [
                { "type": "dominant_shuffle", "rate": 6 },
                { "type": "wave_mask", "rates": [0.0, 0.1], "clip_min": -1.5, "clip_max": 1.5 }
            ]
        }"#,
    )?
    .build()?;
    let out = pipeline.augment_seeded(signal.view(), seed.derive("pipeline"))?;
    log_summary(pipeline.name(), &signal, &out);

    Ok(())
}
