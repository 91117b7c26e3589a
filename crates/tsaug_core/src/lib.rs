//! # tsaug_core
//!
//! Core types and traits for tsaug-rs time series augmentation.
//!
//! This crate provides:
//! - [`Seed`] for deterministic random number generation
//! - [`SignalShape`] and [`to_canonical`] for rank normalization
//! - [`PostProcess`] for the offset/clipping step shared by every operator
//! - [`Augment`] and [`MultiAugment`] traits, plus [`Compose`] and [`Identity`]
//! - Error types and common utilities
//!
//! ## Shape Convention
//!
//! Signals follow the convention `(T, F)`:
//! - `T`: Time steps
//! - `F`: Features
//!
//! A single-feature signal may be passed flat as `(T,)`; operators hand back
//! the same dimensionality they were given.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::Array2;
//! use tsaug_core::{to_canonical, Seed};
//!
//! let _rng = Seed::new(42).to_rng();
//! let signal = Array2::<f64>::zeros((100, 3)).into_dyn();
//! let (canonical, shape) = to_canonical(signal.view()).unwrap();
//! assert_eq!(canonical.dim(), (100, 3));
//! assert_eq!(shape.features(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod augment;
mod error;
mod postprocess;
mod seed;
mod shape;

pub use augment::{Augment, Compose, Identity, MultiAugment};
pub use error::{CoreError, Result};
pub use postprocess::PostProcess;
pub use seed::Seed;
pub use shape::{ensure_same_shape, to_canonical, SignalShape};
