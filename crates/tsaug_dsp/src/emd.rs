//! Empirical Mode Decomposition.
//!
//! Splits a signal into intrinsic mode functions (IMFs) by sifting: the mean
//! of the cubic-spline envelopes through the local maxima and minima is
//! subtracted repeatedly until the candidate stops changing. IMFs come out
//! finest first; the monotone remainder (the residue) is appended last
//! unless it is zero within a small absolute tolerance, so the components
//! sum back to the input.
//!
//! A signal that cannot be sifted at all (constant, too short, or without
//! enough extrema to build both envelopes) decomposes into nothing. Callers
//! decide what an empty decomposition means for them.

use serde::{Deserialize, Serialize};

/// Configuration for the EMD sifting process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmdConfig {
    /// Maximum number of IMFs to extract (the residue is not counted).
    pub max_imf: usize,
    /// Maximum number of sifting iterations per IMF.
    pub max_sift_iterations: usize,
    /// Sifting stops when the normalized squared difference between
    /// consecutive candidates drops below this value.
    pub sift_threshold: f64,
    /// Decomposition stops when the residue's range falls below this
    /// fraction of the input's range.
    pub range_threshold: f64,
}

impl Default for EmdConfig {
    fn default() -> Self {
        Self {
            max_imf: 10,
            max_sift_iterations: 100,
            sift_threshold: 0.2,
            range_threshold: 1e-3,
        }
    }
}

/// Empirical mode decomposition solver.
///
/// # Example
///
/// ```rust
/// use tsaug_dsp::{Emd, EmdConfig};
///
/// let signal: Vec<f64> = (0..256)
///     .map(|i| {
///         let t = i as f64 / 256.0;
///         (std::f64::consts::TAU * 4.0 * t).sin() + 0.5 * (std::f64::consts::TAU * 32.0 * t).sin()
///     })
///     .collect();
///
/// let components = Emd::new(EmdConfig::default()).decompose(&signal);
/// assert!(components.len() >= 2);
///
/// // Components sum back to the input.
/// let sum: f64 = components.iter().map(|c| c[100]).sum();
/// assert!((sum - signal[100]).abs() < 2e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Emd {
    config: EmdConfig,
}

impl Emd {
    /// Create a solver from config.
    #[must_use]
    pub fn new(config: EmdConfig) -> Self {
        Self { config }
    }

    /// Create a solver extracting at most `max_imf` IMFs.
    #[must_use]
    pub fn with_max_imf(max_imf: usize) -> Self {
        Self::new(EmdConfig {
            max_imf,
            ..Default::default()
        })
    }

    /// Solver configuration.
    #[must_use]
    pub fn config(&self) -> &EmdConfig {
        &self.config
    }

    /// Decompose `signal` into IMFs followed by the residue, if non-zero.
    ///
    /// Returns an empty list when the signal cannot be sifted.
    #[must_use]
    pub fn decompose(&self, signal: &[f64]) -> Vec<Vec<f64>> {
        let n = signal.len();
        if n < 3 || self.config.max_imf == 0 {
            return Vec::new();
        }

        let input_range = range(signal);
        if input_range <= f64::EPSILON * max_abs(signal).max(1.0) {
            return Vec::new();
        }

        let mut components = Vec::new();
        let mut residue = signal.to_vec();

        while components.len() < self.config.max_imf {
            if !Extrema::find(&residue).is_siftable() {
                break;
            }
            if range(&residue) < self.config.range_threshold * input_range {
                break;
            }

            let imf = self.sift(&residue);
            for (r, m) in residue.iter_mut().zip(&imf) {
                *r -= m;
            }
            components.push(imf);
        }

        if components.is_empty() {
            return components;
        }

        tracing::trace!(imfs = components.len(), len = n, "emd decomposition finished");
        push_residue(&mut components, residue);
        components
    }

    /// Extract one IMF from `signal`.
    fn sift(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        let mut h = signal.to_vec();

        for _ in 0..self.config.max_sift_iterations {
            let extrema = Extrema::find(&h);
            if !extrema.is_siftable() {
                break;
            }

            let (max_x, max_y) = extrema.mirrored_maxima(&h);
            let (min_x, min_y) = extrema.mirrored_minima(&h);
            let upper = cubic_spline(&max_x, &max_y, n);
            let lower = cubic_spline(&min_x, &min_y, n);

            let prev = h.clone();
            for ((v, u), l) in h.iter_mut().zip(&upper).zip(&lower) {
                *v -= (u + l) / 2.0;
            }

            if normalized_sd(&prev, &h) < self.config.sift_threshold {
                break;
            }
        }
        h
    }
}

/// Interior local extrema of a signal.
struct Extrema {
    maxima: Vec<usize>,
    minima: Vec<usize>,
}

impl Extrema {
    fn find(signal: &[f64]) -> Self {
        let mut maxima = Vec::new();
        let mut minima = Vec::new();
        for i in 1..signal.len().saturating_sub(1) {
            let (prev, cur, next) = (signal[i - 1], signal[i], signal[i + 1]);
            if cur > prev && cur >= next {
                maxima.push(i);
            } else if cur < prev && cur <= next {
                minima.push(i);
            }
        }
        Self { maxima, minima }
    }

    /// Both envelopes need at least one extremum, and three in total.
    fn is_siftable(&self) -> bool {
        !self.maxima.is_empty() && !self.minima.is_empty() && self.maxima.len() + self.minima.len() >= 3
    }

    fn mirrored_maxima(&self, signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
        mirror_knots(&self.maxima, signal)
    }

    fn mirrored_minima(&self, signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
        mirror_knots(&self.minima, signal)
    }
}

/// Spline knots at `indices`, reflected once about each boundary so the
/// envelope spans the whole signal.
fn mirror_knots(indices: &[usize], signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let last = (signal.len() - 1) as f64;
    let mut xs = Vec::with_capacity(indices.len() + 2);
    let mut ys = Vec::with_capacity(indices.len() + 2);

    if let Some(&first) = indices.first() {
        xs.push(-(first as f64));
        ys.push(signal[first]);
    }
    for &i in indices {
        xs.push(i as f64);
        ys.push(signal[i]);
    }
    if let Some(&end) = indices.last() {
        xs.push(2.0 * last - end as f64);
        ys.push(signal[end]);
    }
    (xs, ys)
}

/// Absolute tolerance below which a residue counts as zero.
const RESIDUE_TOLERANCE: f64 = 1e-8;

/// Append `residue` unless every sample of it is zero within tolerance.
fn push_residue(components: &mut Vec<Vec<f64>>, residue: Vec<f64>) {
    if max_abs(&residue) > RESIDUE_TOLERANCE {
        components.push(residue);
    }
}

fn range(signal: &[f64]) -> f64 {
    let (lo, hi) = signal
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    hi - lo
}

fn max_abs(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Normalized squared difference between consecutive sifting candidates.
fn normalized_sd(prev: &[f64], curr: &[f64]) -> f64 {
    let num: f64 = prev.iter().zip(curr).map(|(p, c)| (p - c).powi(2)).sum();
    let den: f64 = prev.iter().map(|p| p.powi(2)).sum();
    if den < 1e-30 {
        0.0
    } else {
        num / den
    }
}

/// Natural cubic spline through strictly increasing knots, evaluated at
/// `0..n`. Points outside the knot range are extrapolated with the end
/// segments' polynomials.
fn cubic_spline(knots_x: &[f64], knots_y: &[f64], n: usize) -> Vec<f64> {
    let m = knots_x.len();
    match m {
        0 => return vec![0.0; n],
        1 => return vec![knots_y[0]; n],
        2 => {
            let slope = (knots_y[1] - knots_y[0]) / (knots_x[1] - knots_x[0]).max(1e-12);
            return (0..n)
                .map(|i| knots_y[0] + slope * (i as f64 - knots_x[0]))
                .collect();
        }
        _ => {}
    }

    let k = m - 1;
    let h: Vec<f64> = knots_x.windows(2).map(|w| (w[1] - w[0]).max(1e-12)).collect();

    let mut alpha = vec![0.0; k];
    for i in 1..k {
        alpha[i] = 3.0 / h[i] * (knots_y[i + 1] - knots_y[i])
            - 3.0 / h[i - 1] * (knots_y[i] - knots_y[i - 1]);
    }

    // Tridiagonal solve for the second-derivative terms.
    let mut l = vec![1.0; m];
    let mut mu = vec![0.0; m];
    let mut z = vec![0.0; m];
    for i in 1..k {
        l[i] = 2.0 * (knots_x[i + 1] - knots_x[i - 1]) - h[i - 1] * mu[i - 1];
        if l[i].abs() < 1e-30 {
            l[i] = 1e-30;
        }
        mu[i] = h[i] / l[i];
        z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
    }

    let mut c = vec![0.0; m];
    let mut b = vec![0.0; k];
    let mut d = vec![0.0; k];
    for j in (0..k).rev() {
        c[j] = z[j] - mu[j] * c[j + 1];
        b[j] = (knots_y[j + 1] - knots_y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
        d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
    }

    let mut result = Vec::with_capacity(n);
    let mut seg = 0;
    for i in 0..n {
        let x = i as f64;
        while seg < k - 1 && x > knots_x[seg + 1] {
            seg += 1;
        }
        let dx = x - knots_x[seg];
        result.push(knots_y[seg] + b[seg] * dx + c[seg] * dx * dx + d[seg] * dx * dx * dx);
    }
    result
}
