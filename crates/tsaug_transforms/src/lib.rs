//! # tsaug_transforms
//!
//! Decomposition-based time series augmentations.
//!
//! This crate provides:
//! - Dominant frequency shuffling in the Fourier domain ([`DominantShuffle`])
//! - EMD-weighted reconstruction ([`EmdAugment`])
//! - Prefix-window mixup of two signals ([`MixUp`])
//! - Wavelet-domain masking and mixing ([`WaveMask`], [`WaveMix`])
//! - Serializable pipelines ([`AugmentConfig`])
//!
//! Every operator exists as a free function taking a config and a random
//! generator, and as a configured struct implementing
//! [`tsaug_core::Augment`] or [`tsaug_core::MultiAugment`].
//!
//! ## Example
//!
//! ```rust
//! use ndarray::Array2;
//! use tsaug_core::{Augment, Compose, Seed};
//! use tsaug_transforms::{DominantShuffle, WaveMask};
//!
//! let pipeline = Compose::new()
//!     .add(DominantShuffle::new(4))
//!     .add(WaveMask::new(vec![0.0, 0.1, 0.2]).with_wavelet("db2"));
//!
//! let signal = Array2::from_shape_fn((128, 2), |(t, f)| (t as f64 * 0.1 * (f + 1) as f64).sin());
//! let out = pipeline.augment_seeded(signal.view().into_dyn(), Seed::new(42)).unwrap();
//! assert_eq!(out.shape(), &[128, 2]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod column;
pub mod config;
pub mod emd;
pub mod frequency;
pub mod mixup;
pub mod wavelet;

pub use config::AugmentConfig;
pub use emd::{emd_augment, EmdAugment, EmdAugmentConfig};
pub use frequency::{dominant_bins, dominant_shuffle, DominantShuffle, DominantShuffleConfig};
pub use mixup::{mix_up, MixUp, MixUpConfig};
pub use wavelet::{wave_mask, wave_mix, WaveMask, WaveMaskConfig, WaveMix, WaveMixConfig};
