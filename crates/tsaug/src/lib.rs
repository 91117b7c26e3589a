//! # tsaug
//!
//! Decomposition-based time series augmentation in Rust.
//!
//! tsaug-rs synthesizes plausible variants of a signal by editing it in an
//! alternate domain and transforming back:
//!
//! - **Fourier**: dominant frequency shuffling
//! - **Empirical mode decomposition**: randomly weighted IMF reconstruction
//! - **Wavelets**: masking of detail coefficients, coefficient-wise mixing
//!   of two signals
//! - **Mixup**: Beta-weighted blending of a leading time window
//!
//! Signals are `ndarray` arrays shaped `(T,)` or `(T, F)`; every operator
//! returns the shape it was given. Randomness always comes from a generator
//! the caller provides, usually built from a [`Seed`](prelude::Seed).
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::Array1;
//! use tsaug::prelude::*;
//!
//! let signal = Array1::from_shape_fn(256, |t| (t as f64 * 0.05).sin()).into_dyn();
//!
//! let pipeline = Compose::new()
//!     .add(DominantShuffle::new(4))
//!     .add(EmdAugment::default().with_imf_rate(0.8))
//!     .add(WaveMask::new(vec![0.0, 0.1, 0.2]).with_clip(Some(-1.0), Some(1.0)));
//!
//! let out = pipeline.augment_seeded(signal.view(), Seed::new(42)).unwrap();
//! assert_eq!(out.shape(), signal.shape());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use tsaug_core as core;
pub use tsaug_dsp as dsp;
pub use tsaug_transforms as transforms;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tsaug::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tsaug_core::{
        to_canonical, Augment, Compose, CoreError, Identity, MultiAugment, PostProcess, Result,
        Seed, SignalShape,
    };

    // Operators
    pub use tsaug_transforms::{
        dominant_shuffle, emd_augment, mix_up, wave_mask, wave_mix, AugmentConfig,
        DominantShuffle, DominantShuffleConfig, EmdAugment, EmdAugmentConfig, MixUp, MixUpConfig,
        WaveMask, WaveMaskConfig, WaveMix, WaveMixConfig,
    };
}

/// All module for importing everything, primitives included.
pub mod all {
    pub use super::prelude::*;

    pub use tsaug_core::ensure_same_shape;
    pub use tsaug_dsp::{
        irfft, rfft, wavedec, waverec, Complex64, Emd, EmdConfig, SpectralPlan, Wavelet,
        WAVELET_NAMES,
    };
    pub use tsaug_transforms::dominant_bins;
}
