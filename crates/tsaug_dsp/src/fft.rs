//! One-sided Fourier transform pair for real signals.
//!
//! Thin wrapper over `realfft` that fixes the conventions operators rely on:
//! the forward transform yields `n / 2 + 1` bins, the inverse always
//! produces exactly the requested length and is normalized by `1 / n`.

use std::sync::Arc;

use realfft::num_complex::Complex64;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};

use tsaug_core::{CoreError, Result};

/// Number of bins in the one-sided spectrum of a length-`n` real signal.
#[inline]
#[must_use]
pub const fn spectrum_len(n: usize) -> usize {
    n / 2 + 1
}

/// Forward and inverse real FFT plans for one signal length.
///
/// Plan once and reuse across all feature columns of a signal.
pub struct SpectralPlan {
    len: usize,
    forward: Arc<dyn RealToComplex<f64>>,
    inverse: Arc<dyn ComplexToReal<f64>>,
}

impl std::fmt::Debug for SpectralPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralPlan")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl SpectralPlan {
    /// Plan transforms for signals of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(CoreError::InvalidParameter(
                "FFT length must be at least 1".to_string(),
            ));
        }
        let mut planner = RealFftPlanner::<f64>::new();
        Ok(Self {
            len,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        })
    }

    /// Signal length this plan was built for.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the plan is for an empty signal (never true for a built plan).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One-sided spectrum of `signal`, `len / 2 + 1` bins with DC first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShape`] if `signal` has the wrong length,
    /// or [`CoreError::TransformError`] if the backend fails.
    pub fn forward(&self, signal: &[f64]) -> Result<Vec<Complex64>> {
        if signal.len() != self.len {
            return Err(CoreError::InvalidShape {
                expected: format!("length {}", self.len),
                got: format!("length {}", signal.len()),
            });
        }
        if self.len == 1 {
            return Ok(vec![Complex64::new(signal[0], 0.0)]);
        }

        let mut input = signal.to_vec();
        let mut spectrum = self.forward.make_output_vec();
        self.forward
            .process(&mut input, &mut spectrum)
            .map_err(|e| CoreError::TransformError(e.to_string()))?;
        Ok(spectrum)
    }

    /// Real signal of exactly `len` samples from a one-sided spectrum.
    ///
    /// Extra bins are ignored and missing bins are zero. The imaginary parts
    /// of the DC bin and, for even lengths, the Nyquist bin cannot be
    /// represented by a real signal and are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransformError`] if the backend fails.
    pub fn inverse(&self, spectrum: &[Complex64]) -> Result<Vec<f64>> {
        let bins = spectrum_len(self.len);
        let mut buffer = vec![Complex64::new(0.0, 0.0); bins];
        let copied = bins.min(spectrum.len());
        buffer[..copied].copy_from_slice(&spectrum[..copied]);

        buffer[0].im = 0.0;
        if self.len % 2 == 0 {
            buffer[bins - 1].im = 0.0;
        }

        if self.len == 1 {
            return Ok(vec![buffer[0].re]);
        }

        let mut output = self.inverse.make_output_vec();
        self.inverse
            .process(&mut buffer, &mut output)
            .map_err(|e| CoreError::TransformError(e.to_string()))?;

        let scale = 1.0 / self.len as f64;
        for v in &mut output {
            *v *= scale;
        }
        Ok(output)
    }
}

/// One-sided spectrum of a real signal.
///
/// # Errors
///
/// Returns an error for an empty signal or a backend failure.
pub fn rfft(signal: &[f64]) -> Result<Vec<Complex64>> {
    SpectralPlan::new(signal.len())?.forward(signal)
}

/// Real signal of length `n` from a one-sided spectrum.
///
/// # Errors
///
/// Returns an error if `n` is zero or the backend fails.
pub fn irfft(spectrum: &[Complex64], n: usize) -> Result<Vec<f64>> {
    SpectralPlan::new(n)?.inverse(spectrum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_spectrum_len() {
        assert_eq!(spectrum_len(1), 1);
        assert_eq!(spectrum_len(8), 5);
        assert_eq!(spectrum_len(9), 5);
    }

    #[test]
    fn test_rfft_known_values() {
        let spectrum = rfft(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(spectrum.len(), 3);
        assert!((spectrum[0].re - 10.0).abs() < 1e-12);
        assert!((spectrum[1].re + 2.0).abs() < 1e-12);
        assert!((spectrum[1].im - 2.0).abs() < 1e-12);
        assert!((spectrum[2].re + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_even_and_odd() {
        for n in [1usize, 2, 7, 16, 33] {
            let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin() + 0.1 * i as f64).collect();
            let plan = SpectralPlan::new(n).unwrap();
            let back = plan.inverse(&plan.forward(&signal).unwrap()).unwrap();
            assert_close(&back, &signal, 1e-10);
        }
    }

    #[test]
    fn test_pure_tone_peaks_at_its_bin() {
        let n = 64;
        let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * 5.0 * i as f64 / n as f64).cos()).collect();
        let spectrum = rfft(&signal).unwrap();
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(5));
    }

    #[test]
    fn test_inverse_discards_unrepresentable_imaginary_parts() {
        let mut spectrum = rfft(&[0.5, -1.0, 2.0, 0.25]).unwrap();
        let clean = irfft(&spectrum, 4).unwrap();
        spectrum[0].im = 3.0;
        spectrum[2].im = -7.0;
        let dirty = irfft(&spectrum, 4).unwrap();
        assert_close(&clean, &dirty, 1e-12);
    }

    #[test]
    fn test_inverse_pads_and_truncates() {
        let spectrum = vec![Complex64::new(4.0, 0.0)];
        assert_close(&irfft(&spectrum, 4).unwrap(), &[1.0, 1.0, 1.0, 1.0], 1e-12);

        let long = rfft(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(irfft(&long, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let plan = SpectralPlan::new(4).unwrap();
        assert!(matches!(plan.forward(&[1.0, 2.0]), Err(CoreError::InvalidShape { .. })));
        assert!(SpectralPlan::new(0).is_err());
    }
}
