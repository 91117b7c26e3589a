//! EMD-based reconstruction.
//!
//! Each feature is decomposed into intrinsic mode functions, the finest
//! ones are kept, and the signal is rebuilt as a (possibly randomly)
//! weighted sum of them. Random weights amplify or attenuate individual
//! oscillatory scales.

use ndarray::{ArrayD, ArrayViewD};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use tsaug_core::{to_canonical, Augment, CoreError, PostProcess, Result, Seed};
use tsaug_dsp::Emd;

use crate::column::map_columns;

/// Configuration for EMD-based augmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmdAugmentConfig {
    /// Maximum number of IMFs computed per feature.
    pub n_imf: usize,
    /// Probability of drawing random weights in `[0, 2)` instead of unit
    /// weights. Drawn once per feature.
    pub random_weight_prob: f64,
    /// Fraction of the decomposition kept, finest modes first.
    pub imf_rate: f64,
    /// Offset and clipping applied to the result.
    #[serde(flatten)]
    pub post: PostProcess,
}

impl Default for EmdAugmentConfig {
    fn default() -> Self {
        Self {
            n_imf: 10,
            random_weight_prob: 0.5,
            imf_rate: 1.0,
            post: PostProcess::default(),
        }
    }
}

impl EmdAugmentConfig {
    /// Check the parameters that have no graceful fallback.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] if `random_weight_prob` is
    /// not a probability.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.random_weight_prob) {
            return Err(CoreError::InvalidParameter(format!(
                "random_weight_prob must lie in [0, 1], got {}",
                self.random_weight_prob
            )));
        }
        Ok(())
    }
}

/// Number of modes kept out of `available`: at least one, at most all.
fn kept_modes(available: usize, imf_rate: f64) -> usize {
    let scaled = (available as f64 * imf_rate).floor();
    if scaled.is_nan() || scaled < 1.0 {
        1
    } else {
        (scaled as usize).min(available)
    }
}

/// Rebuild every feature of `signal` from weighted intrinsic mode functions.
///
/// A feature that cannot be decomposed (a constant column, for instance)
/// passes through unchanged before post-processing.
///
/// # Errors
///
/// Returns [`CoreError::InvalidShape`] for an unsupported rank or an empty
/// axis, and [`CoreError::InvalidParameter`] for a `random_weight_prob`
/// outside `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use ndarray::Array1;
/// use tsaug_core::Seed;
/// use tsaug_transforms::{emd_augment, EmdAugmentConfig};
///
/// let flat = Array1::from_elem(32, 3.0).into_dyn();
/// let out = emd_augment(flat.view(), &EmdAugmentConfig::default(), &mut Seed::new(1).to_rng()).unwrap();
/// assert_eq!(out, flat);
/// ```
pub fn emd_augment<R: Rng + ?Sized>(
    signal: ArrayViewD<'_, f64>,
    config: &EmdAugmentConfig,
    rng: &mut R,
) -> Result<ArrayD<f64>> {
    config.validate()?;
    let (canonical, shape) = to_canonical(signal)?;
    tracing::debug!(
        n_imf = config.n_imf,
        imf_rate = config.imf_rate,
        random_weight_prob = config.random_weight_prob,
        features = shape.features(),
        "emd augmentation"
    );

    let solver = Emd::with_max_imf(config.n_imf);
    let output = map_columns(&canonical, |feature, column| {
        let modes = solver.decompose(column);
        if modes.is_empty() {
            tracing::warn!(feature, "empty decomposition, passing the column through");
            return Ok(column.to_vec());
        }

        let keep = kept_modes(modes.len(), config.imf_rate);
        let weights: Vec<f64> = if rng.gen_bool(config.random_weight_prob) {
            (0..keep).map(|_| 2.0 * rng.gen::<f64>()).collect()
        } else {
            vec![1.0; keep]
        };
        tracing::trace!(feature, modes = modes.len(), keep, ?weights, "weighted modes");

        let mut rebuilt = vec![0.0; column.len()];
        for (mode, weight) in modes.iter().zip(&weights) {
            for (out, value) in rebuilt.iter_mut().zip(mode) {
                *out += weight * value;
            }
        }
        Ok(rebuilt)
    })?;

    Ok(shape.restore(config.post.apply(output)))
}

/// EMD-based reconstruction as an [`Augment`].
#[derive(Debug, Clone)]
pub struct EmdAugment {
    config: EmdAugmentConfig,
    seed: Seed,
}

impl EmdAugment {
    /// Decompose into at most `n_imf` modes.
    #[must_use]
    pub fn new(n_imf: usize) -> Self {
        Self::from_config(EmdAugmentConfig {
            n_imf,
            ..Default::default()
        })
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: EmdAugmentConfig) -> Self {
        Self {
            config,
            seed: Seed::from_entropy(),
        }
    }

    /// Set the probability of random mode weights.
    #[must_use]
    pub fn with_random_weight_prob(mut self, p: f64) -> Self {
        self.config.random_weight_prob = p;
        self
    }

    /// Set the fraction of modes kept.
    #[must_use]
    pub fn with_imf_rate(mut self, imf_rate: f64) -> Self {
        self.config.imf_rate = imf_rate;
        self
    }

    /// Set the offset added to the output.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.config.post.offset = offset;
        self
    }

    /// Set the clipping bounds.
    #[must_use]
    pub fn with_clip(mut self, clip_min: Option<f64>, clip_max: Option<f64>) -> Self {
        self.config.post = self.config.post.with_clip(clip_min, clip_max);
        self
    }

    /// Set the random seed used by [`EmdAugment::apply`].
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Operator configuration.
    #[must_use]
    pub fn config(&self) -> &EmdAugmentConfig {
        &self.config
    }

    /// Augment `signal` with a generator built from the configured seed.
    ///
    /// # Errors
    ///
    /// Same as [`emd_augment`].
    pub fn apply(&self, signal: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
        self.augment_seeded(signal, self.seed)
    }
}

impl Default for EmdAugment {
    fn default() -> Self {
        Self::from_config(EmdAugmentConfig::default())
    }
}

impl Augment for EmdAugment {
    fn augment(&self, signal: ArrayViewD<'_, f64>, rng: &mut dyn RngCore) -> Result<ArrayD<f64>> {
        emd_augment(signal, &self.config, rng)
    }

    fn name(&self) -> &str {
        "EmdAugment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, Axis};
    use std::f64::consts::TAU;

    fn chirpy(len: usize) -> Array1<f64> {
        Array1::from_shape_fn(len, |i| {
            let t = i as f64 / len as f64;
            (TAU * 2.0 * t).sin() + 0.4 * (TAU * 25.0 * t).sin() + 0.5 * t
        })
    }

    #[test]
    fn test_emd_augment_config() {
        let config = EmdAugmentConfig::default();
        assert_eq!(config.n_imf, 10);
        assert_eq!(config.random_weight_prob, 0.5);
        assert_eq!(config.imf_rate, 1.0);

        let emd = EmdAugment::new(4).with_imf_rate(0.5).with_random_weight_prob(0.0);
        assert_eq!(emd.config.n_imf, 4);
        assert_eq!(emd.config.imf_rate, 0.5);
        assert_eq!(emd.name(), "EmdAugment");
    }

    #[test]
    fn test_kept_modes() {
        assert_eq!(kept_modes(5, 1.0), 5);
        assert_eq!(kept_modes(5, 0.5), 2);
        assert_eq!(kept_modes(5, 0.0), 1);
        assert_eq!(kept_modes(5, 3.0), 5);
        assert_eq!(kept_modes(1, 0.1), 1);
        assert_eq!(kept_modes(4, f64::NAN), 1);
    }

    #[test]
    fn test_unit_weights_reproduce_signal() {
        let signal = chirpy(256).into_dyn();
        let emd = EmdAugment::default().with_random_weight_prob(0.0);
        let out = emd.augment_seeded(signal.view(), Seed::new(3)).unwrap();
        for (a, b) in out.iter().zip(signal.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_weights_change_signal() {
        let signal = chirpy(256).into_dyn();
        let emd = EmdAugment::default().with_random_weight_prob(1.0);
        let out = emd.augment_seeded(signal.view(), Seed::new(3)).unwrap();
        let diff: f64 = out.iter().zip(signal.iter()).map(|(a, b)| (a - b).abs()).sum();
        assert!(diff > 1e-6);
    }

    #[test]
    fn test_weight_choice_is_per_feature() {
        let signal = Array2::from_shape_fn((256, 3), |(i, j)| {
            let t = i as f64 / 256.0;
            (TAU * (2 + j) as f64 * t).sin() + 0.4 * (TAU * (20 + 3 * j) as f64 * t).sin() + (0.5 + j as f64) * t
        })
        .into_dyn();
        let emd = EmdAugment::default().with_random_weight_prob(0.5);

        let (mut unit, mut random) = (0, 0);
        for seed in 0..20 {
            let out = emd.augment_seeded(signal.view(), Seed::new(seed)).unwrap();
            for (col_out, col_in) in out.axis_iter(Axis(1)).zip(signal.axis_iter(Axis(1))) {
                let max_diff = col_out
                    .iter()
                    .zip(col_in.iter())
                    .map(|(a, b)| (a - b).abs())
                    .fold(0.0, f64::max);
                // Unit weights on every kept mode rebuild the column exactly.
                if max_diff < 1e-9 {
                    unit += 1;
                } else {
                    assert!(max_diff > 1e-6, "column neither rebuilt nor reweighted: {max_diff}");
                    random += 1;
                }
            }
        }
        assert!(unit > 0 && random > 0, "unit={unit} random={random}");
    }

    #[test]
    fn test_constant_signal_falls_back() {
        let signal = Array2::from_elem((40, 2), -1.5).into_dyn();
        let out = EmdAugment::default()
            .with_random_weight_prob(1.0)
            .augment_seeded(signal.view(), Seed::new(0))
            .unwrap();
        assert_eq!(out, signal);
    }

    #[test]
    fn test_fallback_still_post_processes() {
        let signal = Array1::from_elem(16, 2.0).into_dyn();
        let out = EmdAugment::default()
            .with_offset(1.0)
            .with_clip(None, Some(2.5))
            .augment_seeded(signal.view(), Seed::new(0))
            .unwrap();
        assert!(out.iter().all(|&v| v == 2.5));
    }

    #[test]
    fn test_partial_imf_rate_drops_trend() {
        let signal = chirpy(256).into_dyn();
        let emd = EmdAugment::default()
            .with_random_weight_prob(0.0)
            .with_imf_rate(0.01);
        let out = emd.augment_seeded(signal.view(), Seed::new(0)).unwrap();
        // Only the finest mode survives, which oscillates around zero.
        assert!(out.mean().unwrap().abs() < signal.mean().unwrap().abs());
    }

    #[test]
    fn test_shape_preserved() {
        let multi = Array2::from_shape_fn((64, 3), |(i, j)| ((i + 1) as f64 * 0.2 * (j + 1) as f64).sin()).into_dyn();
        let out = EmdAugment::default().augment_seeded(multi.view(), Seed::new(8)).unwrap();
        assert_eq!(out.shape(), &[64, 3]);
    }

    #[test]
    fn test_invalid_probability() {
        let signal = chirpy(32).into_dyn();
        let emd = EmdAugment::default().with_random_weight_prob(1.5);
        assert!(matches!(
            emd.augment_seeded(signal.view(), Seed::new(0)),
            Err(CoreError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_seeded_apply_is_deterministic() {
        let signal = chirpy(128).into_dyn();
        let emd = EmdAugment::default().with_seed(Seed::new(21));
        assert_eq!(emd.apply(signal.view()).unwrap(), emd.apply(signal.view()).unwrap());
    }
}
