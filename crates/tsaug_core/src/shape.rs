//! Signal shape metadata and rank normalization.

use ndarray::{Array1, Array2, ArrayD, ArrayViewD, Axis, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Shape metadata for a signal.
///
/// Signals follow the convention `(T, F)`:
/// - `T`: Time steps
/// - `F`: Features
///
/// A single-feature signal may also arrive as a flat array of length `T`.
/// Operators work on the canonical two-dimensional form and use the
/// recorded rank to hand back an array of the caller's dimensionality.
///
/// # Example
///
/// ```rust
/// use tsaug_core::SignalShape;
///
/// let shape = SignalShape::from_dims(&[100]).unwrap();
/// assert_eq!(shape.len(), 100);
/// assert_eq!(shape.features(), 1);
/// assert!(shape.is_flat());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalShape {
    len: usize,
    features: usize,
    flat: bool,
}

impl SignalShape {
    /// Create a two-dimensional `(len, features)` shape.
    #[must_use]
    pub const fn new(len: usize, features: usize) -> Self {
        Self {
            len,
            features,
            flat: false,
        }
    }

    /// Create a flat single-feature shape of length `len`.
    #[must_use]
    pub const fn flat(len: usize) -> Self {
        Self {
            len,
            features: 1,
            flat: true,
        }
    }

    /// Create a SignalShape from the dimensions of an array.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShape`] if the rank is not 1 or 2, or if
    /// any axis is empty.
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        let shape = match *dims {
            [len] => Self::flat(len),
            [len, features] => Self::new(len, features),
            _ => {
                return Err(CoreError::InvalidShape {
                    expected: "rank 1 (T,) or rank 2 (T, F)".to_string(),
                    got: format!("rank {} {:?}", dims.len(), dims),
                })
            }
        };

        if shape.len == 0 || shape.features == 0 {
            return Err(CoreError::InvalidShape {
                expected: "at least one time step and one feature".to_string(),
                got: format!("{dims:?}"),
            });
        }
        Ok(shape)
    }

    /// Number of time steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of features.
    #[must_use]
    pub const fn features(&self) -> usize {
        self.features
    }

    /// Whether the signal was given as a flat rank-1 array.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.flat
    }

    /// Check if this is an empty shape.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0 || self.features == 0
    }

    /// Rank of the original array.
    #[must_use]
    pub const fn rank(&self) -> usize {
        if self.flat {
            1
        } else {
            2
        }
    }

    /// Dimensions of the original array.
    #[must_use]
    pub fn dims(&self) -> Vec<usize> {
        if self.flat {
            vec![self.len]
        } else {
            vec![self.len, self.features]
        }
    }

    /// Restore a canonical `(T, F)` array to the original dimensionality.
    ///
    /// Values are untouched; only the rank changes.
    #[must_use]
    pub fn restore(&self, canonical: Array2<f64>) -> ArrayD<f64> {
        debug_assert_eq!(canonical.dim(), (self.len, self.features));
        if self.flat {
            canonical.column(0).to_owned().into_dyn()
        } else {
            canonical.into_dyn()
        }
    }
}

impl std::fmt::Display for SignalShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.flat {
            write!(f, "(T={})", self.len)
        } else {
            write!(f, "(T={}, F={})", self.len, self.features)
        }
    }
}

/// Promote a rank-1 or rank-2 signal to its canonical `(T, F)` form.
///
/// Returns the owned canonical array together with the shape needed to
/// restore the caller's dimensionality.
///
/// # Errors
///
/// Returns [`CoreError::InvalidShape`] for any other rank or an empty axis.
///
/// # Example
///
/// ```rust
/// use ndarray::arr1;
/// use tsaug_core::to_canonical;
///
/// let signal = arr1(&[1.0, 2.0, 3.0]).into_dyn();
/// let (canonical, shape) = to_canonical(signal.view()).unwrap();
/// assert_eq!(canonical.dim(), (3, 1));
/// assert_eq!(shape.restore(canonical), signal);
/// ```
pub fn to_canonical(signal: ArrayViewD<'_, f64>) -> Result<(Array2<f64>, SignalShape)> {
    let shape = SignalShape::from_dims(signal.shape())?;

    let canonical = if shape.is_flat() {
        let column: Array1<f64> = signal
            .into_dimensionality::<Ix1>()
            .map_err(|e| shape_error(&shape, &e))?
            .to_owned();
        column.insert_axis(Axis(1))
    } else {
        signal
            .into_dimensionality::<Ix2>()
            .map_err(|e| shape_error(&shape, &e))?
            .to_owned()
    };

    Ok((canonical, shape))
}

/// Fail with [`CoreError::ShapeMismatch`] unless both signals share a shape.
///
/// # Errors
///
/// Returns [`CoreError::ShapeMismatch`] carrying both shapes.
pub fn ensure_same_shape(left: &ArrayViewD<'_, f64>, right: &ArrayViewD<'_, f64>) -> Result<()> {
    if left.shape() == right.shape() {
        Ok(())
    } else {
        Err(CoreError::shape_mismatch(left.shape(), right.shape()))
    }
}

fn shape_error(shape: &SignalShape, err: &ndarray::ShapeError) -> CoreError {
    CoreError::InvalidShape {
        expected: shape.to_string(),
        got: err.to_string(),
    }
}
