//! Offset and clipping applied after every augmentation.

use ndarray::{ArrayBase, DataMut, Dimension};
use serde::{Deserialize, Serialize};

/// Post-processing shared by every operator.
///
/// The offset is added first, then values are clamped into
/// `[clip_min, clip_max]`. An absent bound leaves that side unbounded.
/// Clipping after the offset means an offset can push values into
/// saturation; the order never changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PostProcess {
    /// Value added to every element.
    #[serde(default)]
    pub offset: f64,
    /// Lower clipping bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_min: Option<f64>,
    /// Upper clipping bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_max: Option<f64>,
}

impl PostProcess {
    /// Create a post-processing step.
    #[must_use]
    pub const fn new(offset: f64, clip_min: Option<f64>, clip_max: Option<f64>) -> Self {
        Self {
            offset,
            clip_min,
            clip_max,
        }
    }

    /// Set the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set both clipping bounds.
    #[must_use]
    pub const fn with_clip(mut self, clip_min: Option<f64>, clip_max: Option<f64>) -> Self {
        self.clip_min = clip_min;
        self.clip_max = clip_max;
        self
    }

    /// Whether this step leaves every value untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.offset == 0.0 && self.clip_min.is_none() && self.clip_max.is_none()
    }

    /// Apply offset then clipping to a single value.
    ///
    /// With `clip_min > clip_max` the result is `clip_max`: the lower bound
    /// is applied first and the upper bound last. NaN passes through
    /// unclipped.
    #[inline]
    #[must_use]
    pub fn apply_value(&self, value: f64) -> f64 {
        let mut v = value + self.offset;
        if v.is_nan() {
            return v;
        }
        if let Some(lo) = self.clip_min {
            v = v.max(lo);
        }
        if let Some(hi) = self.clip_max {
            v = v.min(hi);
        }
        v
    }

    /// Apply offset then clipping to every element of an array in place.
    pub fn apply_inplace<S, D>(&self, signal: &mut ArrayBase<S, D>)
    where
        S: DataMut<Elem = f64>,
        D: Dimension,
    {
        if self.is_identity() {
            return;
        }
        signal.mapv_inplace(|v| self.apply_value(v));
    }

    /// Apply offset then clipping, returning the processed array.
    #[must_use]
    pub fn apply<S, D>(&self, mut signal: ArrayBase<S, D>) -> ArrayBase<S, D>
    where
        S: DataMut<Elem = f64>,
        D: Dimension,
    {
        self.apply_inplace(&mut signal);
        signal
    }
}
