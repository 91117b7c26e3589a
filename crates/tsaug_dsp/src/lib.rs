//! # tsaug_dsp
//!
//! Transform primitives used by the tsaug-rs augmentation operators.
//!
//! - [`fft`]: one-sided real FFT pair ([`rfft`], [`irfft`], [`SpectralPlan`])
//! - [`emd`]: empirical mode decomposition ([`Emd`])
//! - [`dwt`]: multilevel discrete wavelet transform with symmetric
//!   boundary extension ([`wavedec`], [`waverec`])
//!
//! Everything works on plain `f64` slices, one feature column at a time.
//!
//! ## Example
//!
//! ```rust
//! use tsaug_dsp::{irfft, rfft};
//!
//! let signal = [1.0, 0.5, -0.25, 2.0, 0.0];
//! let spectrum = rfft(&signal).unwrap();
//! assert_eq!(spectrum.len(), 3);
//!
//! let back = irfft(&spectrum, signal.len()).unwrap();
//! assert!((back[3] - 2.0).abs() < 1e-12);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dwt;
pub mod emd;
pub mod fft;

pub use dwt::{dwt, dwt_max_level, idwt, wavedec, waverec, Wavelet, WAVELET_NAMES};
pub use emd::{Emd, EmdConfig};
pub use fft::{irfft, rfft, spectrum_len, SpectralPlan};
pub use realfft::num_complex::Complex64;
