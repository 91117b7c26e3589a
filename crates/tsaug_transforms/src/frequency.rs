//! Dominant frequency shuffling.
//!
//! The strongest bins of each feature's one-sided spectrum trade values
//! among themselves, which rearranges the periodic structure of the signal
//! while keeping its overall energy profile.

use ndarray::{ArrayD, ArrayViewD};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use tsaug_core::{to_canonical, Augment, PostProcess, Result, Seed};
use tsaug_dsp::{Complex64, SpectralPlan};

use crate::column::map_columns;

/// Configuration for dominant frequency shuffling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominantShuffleConfig {
    /// Number of dominant (largest magnitude, non-DC) bins to shuffle.
    pub rate: usize,
    /// Offset and clipping applied to the result.
    #[serde(flatten)]
    pub post: PostProcess,
}

impl Default for DominantShuffleConfig {
    fn default() -> Self {
        Self {
            rate: 4,
            post: PostProcess::default(),
        }
    }
}

/// Indices of the `rate` largest-magnitude non-DC bins of `spectrum`.
///
/// Magnitudes are sorted ascending with a stable sort and the last `rate`
/// positions are taken, so among equal magnitudes the higher index wins.
/// A `rate` above the number of non-DC bins selects all of them.
#[must_use]
pub fn dominant_bins(spectrum: &[Complex64], rate: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (1..spectrum.len()).collect();
    order.sort_by(|&a, &b| spectrum[a].norm().total_cmp(&spectrum[b].norm()));
    let keep = rate.min(order.len());
    order.split_off(order.len() - keep)
}

/// Overwrite each selected bin with the original value of a bin drawn
/// uniformly, with replacement, from the selection. Reads come from
/// `spectrum`, writes go to the returned copy.
fn shuffle_bins<R: Rng + ?Sized>(spectrum: &[Complex64], selected: &[usize], rng: &mut R) -> Vec<Complex64> {
    let mut shuffled = spectrum.to_vec();
    for &bin in selected {
        let source = selected[rng.gen_range(0..selected.len())];
        shuffled[bin] = spectrum[source];
    }
    shuffled
}

/// Shuffle the dominant frequencies of every feature of `signal`.
///
/// Accepts `(T,)` or `(T, F)` signals and returns the same shape.
///
/// # Errors
///
/// Returns [`tsaug_core::CoreError::InvalidShape`] for a rank other than 1
/// or 2, or an empty axis.
///
/// # Example
///
/// ```rust
/// use ndarray::Array1;
/// use tsaug_core::Seed;
/// use tsaug_transforms::{dominant_shuffle, DominantShuffleConfig};
///
/// let signal = Array1::linspace(0.0, 12.0, 64).mapv(f64::sin).into_dyn();
/// let mut rng = Seed::new(7).to_rng();
/// let out = dominant_shuffle(signal.view(), &DominantShuffleConfig::default(), &mut rng).unwrap();
/// assert_eq!(out.shape(), signal.shape());
/// ```
pub fn dominant_shuffle<R: Rng + ?Sized>(
    signal: ArrayViewD<'_, f64>,
    config: &DominantShuffleConfig,
    rng: &mut R,
) -> Result<ArrayD<f64>> {
    let (canonical, shape) = to_canonical(signal)?;
    let available = shape.len() / 2;
    if config.rate > available {
        tracing::warn!(
            rate = config.rate,
            available,
            "shuffle rate exceeds the non-DC bins; shuffling all of them"
        );
    }
    let rate = config.rate.min(available);
    tracing::debug!(rate, len = shape.len(), features = shape.features(), "dominant shuffle");

    let plan = SpectralPlan::new(shape.len())?;
    let output = map_columns(&canonical, |feature, column| {
        let spectrum = plan.forward(column)?;
        let selected = dominant_bins(&spectrum, rate);
        tracing::trace!(feature, ?selected, "dominant bins");
        plan.inverse(&shuffle_bins(&spectrum, &selected, &mut *rng))
    })?;

    Ok(shape.restore(config.post.apply(output)))
}

/// Dominant frequency shuffling as an [`Augment`].
///
/// # Example
///
/// ```rust
/// use tsaug_transforms::DominantShuffle;
///
/// let shuffle = DominantShuffle::new(8).with_clip(Some(-1.0), Some(1.0));
/// assert_eq!(shuffle.config().rate, 8);
/// ```
#[derive(Debug, Clone)]
pub struct DominantShuffle {
    config: DominantShuffleConfig,
    seed: Seed,
}

impl DominantShuffle {
    /// Shuffle the `rate` dominant bins.
    #[must_use]
    pub fn new(rate: usize) -> Self {
        Self::from_config(DominantShuffleConfig {
            rate,
            ..Default::default()
        })
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: DominantShuffleConfig) -> Self {
        Self {
            config,
            seed: Seed::from_entropy(),
        }
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

    /// Set the random seed used by [`DominantShuffle::apply`].
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Operator configuration.
    #[must_use]
    pub fn config(&self) -> &DominantShuffleConfig {
        &self.config
    }

    /// Augment `signal` with a generator built from the configured seed.
    ///
    /// # Errors
    ///
    /// Same as [`dominant_shuffle`].
    pub fn apply(&self, signal: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
        self.augment_seeded(signal, self.seed)
    }
}

impl Default for DominantShuffle {
    fn default() -> Self {
        Self::from_config(DominantShuffleConfig::default())
    }
}

impl Augment for DominantShuffle {
    fn augment(&self, signal: ArrayViewD<'_, f64>, rng: &mut dyn RngCore) -> Result<ArrayD<f64>> {
        dominant_shuffle(signal, &self.config, rng)
    }

    fn name(&self) -> &str {
        "DominantShuffle"
    }
}
