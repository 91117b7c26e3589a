//! Declarative augmentation pipelines.
//!
//! An [`AugmentConfig`] names an operator and its parameters, so a whole
//! pipeline can live in a JSON file:
//!
//! ```json
//! {
//!   "type": "compose",
//!   "augments": [
//!     { "type": "dominant_shuffle", "rate": 6 },
//!     { "type": "wave_mask", "rates": [0.0, 0.2], "wavelet": "sym4", "clip_min": -1.0 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use tsaug_core::{Augment, Compose, Identity, Result};
use tsaug_dsp::Wavelet;

use crate::emd::{EmdAugment, EmdAugmentConfig};
use crate::frequency::{DominantShuffle, DominantShuffleConfig};
use crate::wavelet::{WaveMask, WaveMaskConfig};

/// Serializable description of a single-signal augmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AugmentConfig {
    /// Pass the signal through.
    Identity,
    /// Dominant frequency shuffling.
    DominantShuffle(DominantShuffleConfig),
    /// EMD-based reconstruction.
    EmdAugment(EmdAugmentConfig),
    /// Wavelet masking.
    WaveMask(WaveMaskConfig),
    /// Several augmentations applied in order.
    Compose {
        /// Augmentations, first applied first.
        augments: Vec<AugmentConfig>,
    },
}

impl AugmentConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`tsaug_core::CoreError::SerializationError`] for malformed JSON
    /// or an unknown `type`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the config to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`tsaug_core::CoreError::SerializationError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the described augmentation.
    ///
    /// Parameters that can be checked without a signal (wavelet names,
    /// probabilities) are validated here rather than on first use.
    ///
    /// # Errors
    ///
    /// Returns [`tsaug_core::CoreError::InvalidParameter`] for an unknown
    /// wavelet or an out-of-range probability.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ndarray::Array1;
    /// use tsaug_core::{Augment, Seed};
    /// use tsaug_transforms::AugmentConfig;
    ///
    /// let config = AugmentConfig::from_json(
    ///     r#"{"type": "compose", "augments": [{"type": "dominant_shuffle", "rate": 2}, {"type": "identity"}]}"#,
    /// ).unwrap();
    /// let augment = config.build().unwrap();
    /// assert_eq!(augment.name(), "Compose");
    ///
    /// let signal = Array1::linspace(0.0, 1.0, 16).into_dyn();
    /// let out = augment.augment_seeded(signal.view(), Seed::new(0)).unwrap();
    /// assert_eq!(out.shape(), &[16]);
    /// ```
    pub fn build(&self) -> Result<Box<dyn Augment>> {
        let augment: Box<dyn Augment> = match self {
            Self::Identity => Box::new(Identity),
            Self::DominantShuffle(config) => Box::new(DominantShuffle::from_config(config.clone())),
            Self::EmdAugment(config) => {
                config.validate()?;
                Box::new(EmdAugment::from_config(config.clone()))
            }
            Self::WaveMask(config) => {
                Wavelet::from_name(&config.wavelet)?;
                Box::new(WaveMask::from_config(config.clone()))
            }
            Self::Compose { augments } => {
                let built = augments.iter().map(Self::build).collect::<Result<Vec<_>>>()?;
                Box::new(Compose::from_vec(built))
            }
        };
        tracing::debug!(augment = augment.name(), "built augmentation");
        Ok(augment)
    }
}

impl From<DominantShuffleConfig> for AugmentConfig {
    fn from(config: DominantShuffleConfig) -> Self {
        Self::DominantShuffle(config)
    }
}

impl From<EmdAugmentConfig> for AugmentConfig {
    fn from(config: EmdAugmentConfig) -> Self {
        Self::EmdAugment(config)
    }
}

impl From<WaveMaskConfig> for AugmentConfig {
    fn from(config: WaveMaskConfig) -> Self {
        Self::WaveMask(config)
    }
}
