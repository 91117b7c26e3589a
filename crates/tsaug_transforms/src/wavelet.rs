//! Wavelet-domain masking and mixing.
//!
//! Both operators decompose every feature with a multilevel DWT, edit the
//! coefficient bands at random, and reconstruct. Band `i` of the
//! decomposition `[cA_n, cD_n, ..., cD_1]` uses `rates[min(i, rates.len() - 1)]`,
//! so a short rate list is extended with its last value.

use ndarray::{ArrayD, ArrayViewD};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use tsaug_core::{ensure_same_shape, to_canonical, Augment, MultiAugment, PostProcess, Result, Seed};
use tsaug_dsp::{wavedec, waverec, Wavelet};

use crate::column::{map_column_pairs, map_columns};

fn default_wavelet() -> String {
    "db1".to_string()
}

/// Rate for band `index`. An empty list means zero.
fn band_rate(rates: &[f64], index: usize) -> f64 {
    rates
        .get(index.min(rates.len().saturating_sub(1)))
        .copied()
        .unwrap_or(0.0)
}

/// Configuration for wavelet masking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveMaskConfig {
    /// Per-band probability of zeroing a detail coefficient. Index 0 (the
    /// approximation band) is never masked.
    pub rates: Vec<f64>,
    /// Wavelet name, e.g. `"db1"` or `"sym4"`.
    #[serde(default = "default_wavelet")]
    pub wavelet: String,
    /// Decomposition level.
    #[serde(default = "WaveMaskConfig::default_level")]
    pub level: usize,
    /// Offset and clipping applied to the result.
    #[serde(flatten)]
    pub post: PostProcess,
}

impl WaveMaskConfig {
    fn default_level() -> usize {
        2
    }

    /// Mask with `rates` using the default `db1` wavelet at level 2.
    #[must_use]
    pub fn new(rates: Vec<f64>) -> Self {
        Self {
            rates,
            wavelet: default_wavelet(),
            level: Self::default_level(),
            post: PostProcess::default(),
        }
    }
}

impl Default for WaveMaskConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Configuration for wavelet mixing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveMixConfig {
    /// Per-band probability of keeping the first signal's coefficient.
    /// Index 0 (the approximation band) takes part.
    pub rates: Vec<f64>,
    /// Wavelet name, e.g. `"db1"` or `"sym4"`.
    #[serde(default = "default_wavelet")]
    pub wavelet: String,
    /// Decomposition level.
    #[serde(default = "WaveMaskConfig::default_level")]
    pub level: usize,
    /// Offset and clipping applied to the result.
    #[serde(flatten)]
    pub post: PostProcess,
}

impl WaveMixConfig {
    /// Mix with `rates` using the default `db1` wavelet at level 2.
    #[must_use]
    pub fn new(rates: Vec<f64>) -> Self {
        Self {
            rates,
            wavelet: default_wavelet(),
            level: WaveMaskConfig::default_level(),
            post: PostProcess::default(),
        }
    }
}

impl Default for WaveMixConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Zero random detail coefficients of every feature of `signal`.
///
/// # Errors
///
/// Returns [`tsaug_core::CoreError::InvalidShape`] for an unsupported rank
/// or an empty axis, and [`tsaug_core::CoreError::InvalidParameter`] for an
/// unknown wavelet.
///
/// # Example
///
/// ```rust
/// use ndarray::Array1;
/// use tsaug_core::Seed;
/// use tsaug_transforms::{wave_mask, WaveMaskConfig};
///
/// let signal = Array1::linspace(-1.0, 1.0, 32).into_dyn();
/// let config = WaveMaskConfig::new(vec![0.0, 0.5]);
/// let out = wave_mask(signal.view(), &config, &mut Seed::new(3).to_rng()).unwrap();
/// assert_eq!(out.shape(), &[32]);
/// ```
pub fn wave_mask<R: Rng + ?Sized>(
    signal: ArrayViewD<'_, f64>,
    config: &WaveMaskConfig,
    rng: &mut R,
) -> Result<ArrayD<f64>> {
    let wavelet = Wavelet::from_name(&config.wavelet)?;
    let (canonical, shape) = to_canonical(signal)?;
    tracing::debug!(
        wavelet = wavelet.name(),
        level = config.level,
        rates = ?config.rates,
        "wave mask"
    );

    let output = map_columns(&canonical, |feature, column| {
        let mut coeffs = wavedec(column, &wavelet, config.level)?;
        let mut masked = 0usize;
        for (i, band) in coeffs.iter_mut().enumerate().skip(1) {
            let rate = band_rate(&config.rates, i);
            for c in band.iter_mut() {
                if rng.gen::<f64>() < rate {
                    *c = 0.0;
                    masked += 1;
                }
            }
        }
        tracing::trace!(feature, masked, "masked detail coefficients");
        waverec(&coeffs, &wavelet)
    })?;

    Ok(shape.restore(config.post.apply(output)))
}

/// Pick every wavelet coefficient from `signal1` or `signal2` at random.
///
/// # Errors
///
/// Returns [`tsaug_core::CoreError::ShapeMismatch`] if the shapes differ,
/// plus the errors of [`wave_mask`].
pub fn wave_mix<R: Rng + ?Sized>(
    signal1: ArrayViewD<'_, f64>,
    signal2: ArrayViewD<'_, f64>,
    config: &WaveMixConfig,
    rng: &mut R,
) -> Result<ArrayD<f64>> {
    ensure_same_shape(&signal1, &signal2)?;
    let wavelet = Wavelet::from_name(&config.wavelet)?;
    let (left, shape) = to_canonical(signal1)?;
    let (right, _) = to_canonical(signal2)?;
    tracing::debug!(
        wavelet = wavelet.name(),
        level = config.level,
        rates = ?config.rates,
        "wave mix"
    );

    let output = map_column_pairs(&left, &right, |feature, a, b| {
        let first = wavedec(a, &wavelet, config.level)?;
        let second = wavedec(b, &wavelet, config.level)?;
        let mut from_second = 0usize;
        let mixed: Vec<Vec<f64>> = first
            .into_iter()
            .zip(second)
            .enumerate()
            .map(|(i, (band1, band2))| {
                let rate = band_rate(&config.rates, i);
                band1
                    .into_iter()
                    .zip(band2)
                    .map(|(c1, c2)| {
                        if rng.gen::<f64>() < rate {
                            c1
                        } else {
                            from_second += 1;
                            c2
                        }
                    })
                    .collect()
            })
            .collect();
        tracing::trace!(feature, from_second, "coefficients taken from the second signal");
        waverec(&mixed, &wavelet)
    })?;

    Ok(shape.restore(config.post.apply(output)))
}

/// Wavelet masking as an [`Augment`].
///
/// # Example
///
/// ```rust
/// use tsaug_transforms::WaveMask;
///
/// let mask = WaveMask::new(vec![0.0, 0.2, 0.4]).with_wavelet("sym4").with_level(3);
/// assert_eq!(mask.config().level, 3);
/// ```
#[derive(Debug, Clone)]
pub struct WaveMask {
    config: WaveMaskConfig,
    seed: Seed,
}

impl WaveMask {
    /// Mask with per-band `rates`.
    #[must_use]
    pub fn new(rates: Vec<f64>) -> Self {
        Self::from_config(WaveMaskConfig::new(rates))
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: WaveMaskConfig) -> Self {
        Self {
            config,
            seed: Seed::from_entropy(),
        }
    }

    /// Set the wavelet.
    #[must_use]
    pub fn with_wavelet(mut self, wavelet: impl Into<String>) -> Self {
        self.config.wavelet = wavelet.into();
        self
    }

    /// Set the decomposition level.
    #[must_use]
    pub fn with_level(mut self, level: usize) -> Self {
        self.config.level = level;
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

    /// Set the random seed used by [`WaveMask::apply`].
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Operator configuration.
    #[must_use]
    pub fn config(&self) -> &WaveMaskConfig {
        &self.config
    }

    /// Augment `signal` with a generator built from the configured seed.
    ///
    /// # Errors
    ///
    /// Same as [`wave_mask`].
    pub fn apply(&self, signal: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
        self.augment_seeded(signal, self.seed)
    }
}

impl Augment for WaveMask {
    fn augment(&self, signal: ArrayViewD<'_, f64>, rng: &mut dyn RngCore) -> Result<ArrayD<f64>> {
        wave_mask(signal, &self.config, rng)
    }

    fn name(&self) -> &str {
        "WaveMask"
    }
}

/// Wavelet mixing as a [`MultiAugment`].
#[derive(Debug, Clone)]
pub struct WaveMix {
    config: WaveMixConfig,
    seed: Seed,
}

impl WaveMix {
    /// Mix with per-band `rates`.
    #[must_use]
    pub fn new(rates: Vec<f64>) -> Self {
        Self::from_config(WaveMixConfig::new(rates))
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: WaveMixConfig) -> Self {
        Self {
            config,
            seed: Seed::from_entropy(),
        }
    }

    /// Set the wavelet.
    #[must_use]
    pub fn with_wavelet(mut self, wavelet: impl Into<String>) -> Self {
        self.config.wavelet = wavelet.into();
        self
    }

    /// Set the decomposition level.
    #[must_use]
    pub fn with_level(mut self, level: usize) -> Self {
        self.config.level = level;
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

    /// Set the random seed used by [`WaveMix::apply`].
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Operator configuration.
    #[must_use]
    pub fn config(&self) -> &WaveMixConfig {
        &self.config
    }

    /// Mix with a generator built from the configured seed.
    ///
    /// # Errors
    ///
    /// Same as [`wave_mix`].
    pub fn apply(&self, signal1: ArrayViewD<'_, f64>, signal2: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
        self.augment_multi_seeded(signal1, signal2, self.seed)
    }
}

impl MultiAugment for WaveMix {
    fn augment_multi(
        &self,
        signal1: ArrayViewD<'_, f64>,
        signal2: ArrayViewD<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> Result<ArrayD<f64>> {
        wave_mix(signal1, signal2, &self.config, rng)
    }

    fn name(&self) -> &str {
        "WaveMix"
    }
}
