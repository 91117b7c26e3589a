//! Prefix-window mixup of two signals.

use ndarray::{ArrayD, ArrayViewD, Axis, Slice, Zip};
use rand::{Rng, RngCore};
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

use tsaug_core::{ensure_same_shape, CoreError, MultiAugment, PostProcess, Result, Seed};

/// Configuration for MixUp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixUpConfig {
    /// Alpha parameter of the symmetric Beta distribution lambda is drawn from.
    pub alpha: f64,
    /// Fraction of the time axis, from the start, that gets mixed.
    pub mix_rate: f64,
    /// Offset and clipping applied to the result.
    #[serde(flatten)]
    pub post: PostProcess,
}

impl Default for MixUpConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            mix_rate: 1.0,
            post: PostProcess::default(),
        }
    }
}

impl MixUpConfig {
    /// Number of leading time steps mixed for a signal of `len` steps.
    #[must_use]
    pub fn mix_length(&self, len: usize) -> usize {
        let scaled = (len as f64 * self.mix_rate).floor();
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(len)
        }
    }

    fn beta(&self) -> Result<Beta<f64>> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(CoreError::InvalidParameter(format!(
                "alpha must be positive and finite, got {}",
                self.alpha
            )));
        }
        Beta::new(self.alpha, self.alpha).map_err(|e| CoreError::InvalidParameter(format!("alpha {}: {e}", self.alpha)))
    }
}

/// Mix the leading window of `signal1` with `signal2`.
///
/// Rows `[0, mix_length)` along the first axis become
/// `lam * signal1 + (1 - lam) * signal2` with `lam ~ Beta(alpha, alpha)`;
/// the remaining rows are copied from `signal1`. The signals keep whatever
/// shape the caller passed.
///
/// # Errors
///
/// Returns [`CoreError::ShapeMismatch`] if the shapes differ,
/// [`CoreError::InvalidShape`] for a scalar, and
/// [`CoreError::InvalidParameter`] for a non-positive `alpha`.
///
/// # Example
///
/// ```rust
/// use ndarray::{Array2, ArrayD};
/// use tsaug_core::{CoreError, Seed};
/// use tsaug_transforms::{mix_up, MixUpConfig};
///
/// let a = Array2::<f64>::zeros((5, 2)).into_dyn();
/// let b = Array2::<f64>::zeros((3, 2)).into_dyn();
/// let err = mix_up(a.view(), b.view(), &MixUpConfig::default(), &mut Seed::new(0).to_rng());
/// assert!(matches!(err, Err(CoreError::ShapeMismatch { .. })));
/// ```
pub fn mix_up<R: Rng + ?Sized>(
    signal1: ArrayViewD<'_, f64>,
    signal2: ArrayViewD<'_, f64>,
    config: &MixUpConfig,
    rng: &mut R,
) -> Result<ArrayD<f64>> {
    ensure_same_shape(&signal1, &signal2)?;
    if signal1.ndim() == 0 {
        return Err(CoreError::InvalidShape {
            expected: "at least one axis".to_string(),
            got: "scalar".to_string(),
        });
    }

    let lam = config.beta()?.sample(rng);
    let len = signal1.len_of(Axis(0));
    let mix_length = config.mix_length(len);
    tracing::debug!(lam, mix_length, len, "mixup");

    let mut output = signal1.to_owned();
    if mix_length > 0 {
        let window = Slice::from(0..mix_length);
        let other = signal2.slice_axis(Axis(0), window);
        Zip::from(output.slice_axis_mut(Axis(0), window))
            .and(&other)
            .for_each(|out, &b| *out = lam * *out + (1.0 - lam) * b);
    }

    Ok(config.post.apply(output))
}

/// MixUp as a [`MultiAugment`].
#[derive(Debug, Clone)]
pub struct MixUp {
    config: MixUpConfig,
    seed: Seed,
}

impl MixUp {
    /// Create a MixUp drawing lambda from `Beta(alpha, alpha)`.
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self::from_config(MixUpConfig {
            alpha,
            ..Default::default()
        })
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: MixUpConfig) -> Self {
        Self {
            config,
            seed: Seed::from_entropy(),
        }
    }

    /// Set the mixed fraction of the time axis.
    #[must_use]
    pub fn with_mix_rate(mut self, mix_rate: f64) -> Self {
        self.config.mix_rate = mix_rate;
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

    /// Set the random seed used by [`MixUp::apply`].
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Operator configuration.
    #[must_use]
    pub fn config(&self) -> &MixUpConfig {
        &self.config
    }

    /// Mix with a generator built from the configured seed.
    ///
    /// # Errors
    ///
    /// Same as [`mix_up`].
    pub fn apply(&self, signal1: ArrayViewD<'_, f64>, signal2: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
        self.augment_multi_seeded(signal1, signal2, self.seed)
    }
}

impl Default for MixUp {
    fn default() -> Self {
        Self::from_config(MixUpConfig::default())
    }
}

impl MultiAugment for MixUp {
    fn augment_multi(
        &self,
        signal1: ArrayViewD<'_, f64>,
        signal2: ArrayViewD<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> Result<ArrayD<f64>> {
        mix_up(signal1, signal2, &self.config, rng)
    }

    fn name(&self) -> &str {
        "MixUp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array1, Array2};

    #[test]
    fn test_mixup_config() {
        let config = MixUpConfig::default();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.mix_rate, 1.0);

        let mixup = MixUp::new(0.2).with_mix_rate(0.5).with_offset(-1.0);
        assert_eq!(mixup.config.alpha, 0.2);
        assert_eq!(mixup.config.mix_rate, 0.5);
        assert_eq!(mixup.config.post.offset, -1.0);
        assert_eq!(mixup.name(), "MixUp");
    }

    #[test]
    fn test_mix_length() {
        let config = MixUpConfig::default();
        assert_eq!(config.mix_length(10), 10);
        let half = MixUpConfig {
            mix_rate: 0.55,
            ..Default::default()
        };
        assert_eq!(half.mix_length(10), 5);
        let over = MixUpConfig {
            mix_rate: 4.0,
            ..Default::default()
        };
        assert_eq!(over.mix_length(10), 10);
        let negative = MixUpConfig {
            mix_rate: -1.0,
            ..Default::default()
        };
        assert_eq!(negative.mix_length(10), 0);
    }

    #[test]
    fn test_mixing_identical_signals_is_noop() {
        let s = Array2::from_shape_fn((20, 3), |(i, j)| (i as f64 * 0.3 + j as f64).cos()).into_dyn();
        for seed in 0..10 {
            let out = MixUp::new(0.4).augment_multi_seeded(s.view(), s.view(), Seed::new(seed)).unwrap();
            for (a, b) in out.iter().zip(s.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_mix_rate_returns_first_signal() {
        let a = Array1::linspace(0.0, 1.0, 9).into_dyn();
        let b = Array1::linspace(5.0, 9.0, 9).into_dyn();
        let out = MixUp::default()
            .with_mix_rate(0.0)
            .augment_multi_seeded(a.view(), b.view(), Seed::new(4))
            .unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn test_only_prefix_is_mixed() {
        let a = Array1::<f64>::zeros(10).into_dyn();
        let b = Array1::<f64>::ones(10).into_dyn();
        let out = MixUp::new(1.0)
            .with_mix_rate(0.3)
            .augment_multi_seeded(a.view(), b.view(), Seed::new(2))
            .unwrap();

        // Every mixed value is 1 - lam; the tail stays at signal1.
        let mixed = out[[0]];
        assert!((0.0..=1.0).contains(&mixed));
        assert_eq!(out[[1]], mixed);
        assert_eq!(out[[2]], mixed);
        for i in 3..10 {
            assert_eq!(out[[i]], 0.0);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Array2::<f64>::zeros((5, 2)).into_dyn();
        let b = Array2::<f64>::zeros((3, 2)).into_dyn();
        let err = MixUp::default().augment_multi_seeded(a.view(), b.view(), Seed::new(0));
        match err {
            Err(CoreError::ShapeMismatch { left, right }) => {
                assert_eq!(left, vec![5, 2]);
                assert_eq!(right, vec![3, 2]);
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_alpha() {
        let a = arr1(&[1.0, 2.0]).into_dyn();
        for alpha in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                MixUp::new(alpha).augment_multi_seeded(a.view(), a.view(), Seed::new(0)),
                Err(CoreError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_clip_applies() {
        let a = Array1::from_elem(6, 3.0).into_dyn();
        let b = Array1::from_elem(6, -3.0).into_dyn();
        let out = MixUp::default()
            .with_clip(Some(-1.0), Some(1.0))
            .augment_multi_seeded(a.view(), b.view(), Seed::new(9))
            .unwrap();
        assert!(out.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_seeded_apply_is_deterministic() {
        let a = Array1::linspace(0.0, 1.0, 16).into_dyn();
        let b = Array1::linspace(1.0, 0.0, 16).into_dyn();
        let mixup = MixUp::default().with_seed(Seed::new(17));
        assert_eq!(mixup.apply(a.view(), b.view()).unwrap(), mixup.apply(a.view(), b.view()).unwrap());
    }
}
