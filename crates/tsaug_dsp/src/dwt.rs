//! Discrete wavelet transform with symmetric boundary extension.
//!
//! Multilevel decomposition and reconstruction following the PyWavelets
//! conventions for `mode="symmetric"`:
//!
//! - one level of a length-`n` signal yields `floor((n + f - 1) / 2)`
//!   approximation and detail coefficients for a filter of length `f`;
//! - [`wavedec`] returns `[cA_n, cD_n, ..., cD_1]`, approximation first and
//!   details from coarsest to finest;
//! - one inverse level produces `2n - f + 2` samples, so callers trim the
//!   final reconstruction to the original length.

use serde::{Deserialize, Serialize};

use tsaug_core::{CoreError, Result};

const DB1: [f64; 2] = [0.707_106_781_186_547_6, 0.707_106_781_186_547_6];

const DB2: [f64; 4] = [
    0.482_962_913_144_690_25,
    0.836_516_303_737_469,
    0.224_143_868_041_857_35,
    -0.129_409_522_550_921_45,
];

const DB3: [f64; 6] = [
    0.332_670_552_950_956_9,
    0.806_891_509_313_338_8,
    0.459_877_502_119_331_3,
    -0.135_011_020_010_390_84,
    -0.085_441_273_882_241_49,
    0.035_226_291_882_100_656,
];

const DB4: [f64; 8] = [
    0.230_377_813_308_855_23,
    0.714_846_570_552_541_5,
    0.630_880_767_929_590_4,
    -0.027_983_769_416_983_85,
    -0.187_034_811_718_881_14,
    0.030_841_381_835_986_965,
    0.032_883_011_666_982_945,
    -0.010_597_401_784_997_278,
];

const DB5: [f64; 10] = [
    0.160_102_397_974_125,
    0.603_829_269_797_472_9,
    0.724_308_528_438_574_4,
    0.138_428_145_901_103_42,
    -0.242_294_887_066_190_15,
    -0.032_244_869_585_029_52,
    0.077_571_493_840_065_15,
    -0.006_241_490_213_011_705,
    -0.012_580_751_999_015_526,
    0.003_335_725_285_001_549,
];

const DB6: [f64; 12] = [
    0.111_540_743_350_080_17,
    0.494_623_890_398_385_4,
    0.751_133_908_021_577_5,
    0.315_250_351_709_243_2,
    -0.226_264_693_965_169_13,
    -0.129_766_867_567_095_63,
    0.097_501_605_587_079_36,
    0.027_522_865_530_016_29,
    -0.031_582_039_318_031_156,
    0.000_553_842_200_993_801_6,
    0.004_777_257_511_010_651,
    -0.001_077_301_084_995_58,
];

const DB8: [f64; 16] = [
    0.054_415_842_243_081_61,
    0.312_871_590_914_465_9,
    0.675_630_736_298_012_8,
    0.585_354_683_654_869_1,
    -0.015_829_105_256_023_893,
    -0.284_015_542_962_428_1,
    0.000_472_484_573_997_972_54,
    0.128_747_426_620_186,
    -0.017_369_301_002_022_11,
    -0.044_088_253_931_064_72,
    0.013_981_027_917_015_516,
    0.008_746_094_047_015_655,
    -0.004_870_352_993_010_66,
    -0.000_391_740_372_995_977_1,
    0.000_675_449_405_998_556_8,
    -0.000_117_476_784_002_281_92,
];

const SYM4: [f64; 8] = [
    0.032_223_100_604_042_7,
    -0.012_603_967_262_037_833,
    -0.099_219_543_576_847_22,
    0.297_857_795_605_277_36,
    0.803_738_751_805_916_1,
    0.497_618_667_632_015_45,
    -0.029_635_527_645_998_51,
    -0.075_765_714_789_273_33,
];

const SYM8: [f64; 16] = [
    0.001_889_950_332_759_460_9,
    -0.000_302_920_514_724_133_08,
    -0.014_952_258_337_048_231,
    0.003_808_752_013_890_615,
    0.049_137_179_673_607_506,
    -0.027_219_029_917_056_003,
    -0.051_945_838_107_709_037,
    0.364_441_894_835_331_4,
    0.777_185_751_700_523_5,
    0.481_359_651_258_372_2,
    -0.061_273_359_067_658_524,
    -0.143_294_238_350_809_71,
    0.007_607_487_324_917_605,
    0.031_695_087_811_492_98,
    -0.000_542_132_331_791_148_1,
    -0.003_382_415_951_006_125_6,
];

/// Wavelet names understood by [`Wavelet::from_name`].
pub const WAVELET_NAMES: &[&str] = &[
    "haar", "db1", "db2", "db3", "db4", "db5", "db6", "db8", "sym2", "sym3", "sym4", "sym8",
];

/// An orthogonal wavelet filter bank.
///
/// Filters follow the PyWavelets orientation: `rec_lo` is the scaling
/// filter, `dec_lo` its time reverse, and the high-pass pair is the
/// quadrature mirror of the low-pass pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavelet {
    name: String,
    dec_lo: Vec<f64>,
    dec_hi: Vec<f64>,
    rec_lo: Vec<f64>,
    rec_hi: Vec<f64>,
}

impl Wavelet {
    /// Look up a wavelet by name (`"haar"`, `"db1"`..`"db6"`, `"db8"`,
    /// `"sym2"`..`"sym4"`, `"sym8"`). Names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] for an unknown name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tsaug_dsp::Wavelet;
    ///
    /// let wavelet = Wavelet::from_name("db2").unwrap();
    /// assert_eq!(wavelet.filter_len(), 4);
    /// assert!(Wavelet::from_name("morlet").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let scaling: &[f64] = match lowered.as_str() {
            "haar" | "db1" => &DB1,
            "db2" | "sym2" => &DB2,
            "db3" | "sym3" => &DB3,
            "db4" => &DB4,
            "db5" => &DB5,
            "db6" => &DB6,
            "db8" => &DB8,
            "sym4" => &SYM4,
            "sym8" => &SYM8,
            _ => {
                return Err(CoreError::InvalidParameter(format!(
                    "unknown wavelet '{name}', expected one of {WAVELET_NAMES:?}"
                )))
            }
        };
        Ok(Self::from_scaling_filter(lowered, scaling))
    }

    /// Build the four filters of an orthogonal bank from its scaling filter.
    fn from_scaling_filter(name: String, scaling: &[f64]) -> Self {
        let n = scaling.len();
        let rec_lo = scaling.to_vec();
        let rec_hi: Vec<f64> = (0..n)
            .map(|k| {
                let v = scaling[n - 1 - k];
                if k % 2 == 0 {
                    v
                } else {
                    -v
                }
            })
            .collect();
        let dec_lo: Vec<f64> = rec_lo.iter().rev().copied().collect();
        let dec_hi: Vec<f64> = rec_hi.iter().rev().copied().collect();

        Self {
            name,
            dec_lo,
            dec_hi,
            rec_lo,
            rec_hi,
        }
    }

    /// Canonical (lowercase) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filter length.
    #[must_use]
    pub fn filter_len(&self) -> usize {
        self.rec_lo.len()
    }

    /// Low-pass decomposition filter.
    #[must_use]
    pub fn dec_lo(&self) -> &[f64] {
        &self.dec_lo
    }

    /// High-pass decomposition filter.
    #[must_use]
    pub fn dec_hi(&self) -> &[f64] {
        &self.dec_hi
    }

    /// Low-pass reconstruction filter.
    #[must_use]
    pub fn rec_lo(&self) -> &[f64] {
        &self.rec_lo
    }

    /// High-pass reconstruction filter.
    #[must_use]
    pub fn rec_hi(&self) -> &[f64] {
        &self.rec_hi
    }
}

/// Deepest useful decomposition level for a signal of length `len`.
///
/// Beyond this level every coefficient is dominated by boundary effects.
#[must_use]
pub fn dwt_max_level(len: usize, filter_len: usize) -> usize {
    if filter_len < 2 || len < filter_len - 1 {
        return 0;
    }
    let ratio = len / (filter_len - 1);
    (usize::BITS - 1 - ratio.leading_zeros()) as usize
}

/// Index into a half-sample symmetric extension of a length-`len` signal.
///
/// `x[-1] = x[0]`, `x[-2] = x[1]`, `x[len] = x[len - 1]`, repeating with
/// period `2 * len` for extensions longer than the signal itself.
#[inline]
fn symmetric_index(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let wrapped = index.rem_euclid(period) as usize;
    if wrapped < len {
        wrapped
    } else {
        2 * len - 1 - wrapped
    }
}

/// Single-level decomposition into `(approximation, detail)`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidShape`] for an empty signal.
pub fn dwt(signal: &[f64], wavelet: &Wavelet) -> Result<(Vec<f64>, Vec<f64>)> {
    let n = signal.len();
    if n == 0 {
        return Err(CoreError::InvalidShape {
            expected: "non-empty signal".to_string(),
            got: "length 0".to_string(),
        });
    }

    let f = wavelet.filter_len();
    let out_len = (n + f - 1) / 2;
    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let center = (2 * i + 1) as isize;
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..f {
            let x = signal[symmetric_index(center - j as isize, n)];
            a += wavelet.dec_lo[j] * x;
            d += wavelet.dec_hi[j] * x;
        }
        approx.push(a);
        detail.push(d);
    }

    Ok((approx, detail))
}

/// Single-level reconstruction from approximation and detail coefficients.
///
/// Produces `2n - f + 2` samples for `n` coefficients per band.
///
/// # Errors
///
/// Returns [`CoreError::ShapeMismatch`] if the two bands differ in length,
/// or [`CoreError::InvalidShape`] if they are too short for the filter.
pub fn idwt(approx: &[f64], detail: &[f64], wavelet: &Wavelet) -> Result<Vec<f64>> {
    if approx.len() != detail.len() {
        return Err(CoreError::shape_mismatch(&[approx.len()], &[detail.len()]));
    }

    let n = approx.len();
    let f = wavelet.filter_len();
    if 2 * n + 2 <= f {
        return Err(CoreError::InvalidShape {
            expected: format!("at least {} coefficients for {}", f / 2, wavelet.name()),
            got: format!("{n} coefficients"),
        });
    }

    let out_len = 2 * n + 2 - f;
    let mut output = Vec::with_capacity(out_len);
    for o in 0..out_len {
        // Position in the full convolution of the zero-upsampled bands.
        let k = o + f - 2;
        let first = (k + 1).saturating_sub(f).div_ceil(2);
        let last = (k / 2).min(n - 1);
        let mut sum = 0.0;
        for i in first..=last {
            let j = k - 2 * i;
            sum += wavelet.rec_lo[j] * approx[i] + wavelet.rec_hi[j] * detail[i];
        }
        output.push(sum);
    }

    Ok(output)
}

/// Multilevel decomposition `[cA_level, cD_level, ..., cD_1]`.
///
/// A level deeper than [`dwt_max_level`] is honored but logged, since the
/// coarsest bands are then mostly boundary extension.
///
/// # Errors
///
/// Returns [`CoreError::InvalidShape`] for an empty signal.
///
/// # Example
///
/// ```rust
/// use tsaug_dsp::{wavedec, waverec, Wavelet};
///
/// let haar = Wavelet::from_name("haar").unwrap();
/// let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let coeffs = wavedec(&signal, &haar, 2).unwrap();
/// assert_eq!(coeffs.len(), 3);
/// assert!((coeffs[0][0] - 5.0).abs() < 1e-12);
///
/// let back = waverec(&coeffs, &haar).unwrap();
/// assert!((back[7] - 8.0).abs() < 1e-12);
/// ```
pub fn wavedec(signal: &[f64], wavelet: &Wavelet, level: usize) -> Result<Vec<Vec<f64>>> {
    let max_level = dwt_max_level(signal.len(), wavelet.filter_len());
    if level > max_level {
        tracing::warn!(
            level,
            max_level,
            len = signal.len(),
            wavelet = wavelet.name(),
            "decomposition level exceeds the useful maximum; boundary effects dominate"
        );
    }

    let mut details = Vec::with_capacity(level);
    let mut approx = signal.to_vec();
    for _ in 0..level {
        let (a, d) = dwt(&approx, wavelet)?;
        details.push(d);
        approx = a;
    }

    let mut coeffs = Vec::with_capacity(level + 1);
    coeffs.push(approx);
    coeffs.extend(details.into_iter().rev());
    Ok(coeffs)
}

/// Multilevel reconstruction from `[cA_n, cD_n, ..., cD_1]`.
///
/// The result may be a sample longer than the decomposed signal; callers
/// trim to the length they need.
///
/// # Errors
///
/// Returns [`CoreError::InvalidShape`] for an empty coefficient list or
/// [`CoreError::ShapeMismatch`] for inconsistent band lengths.
pub fn waverec(coeffs: &[Vec<f64>], wavelet: &Wavelet) -> Result<Vec<f64>> {
    let (first, details) = coeffs.split_first().ok_or_else(|| CoreError::InvalidShape {
        expected: "at least one coefficient band".to_string(),
        got: "no bands".to_string(),
    })?;

    let mut approx = first.clone();
    for detail in details {
        // Odd lengths leave the running approximation one sample longer.
        if approx.len() == detail.len() + 1 {
            approx.pop();
        }
        approx = idwt(&approx, detail, wavelet)?;
    }
    Ok(approx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| ((i * 7 + 3) % 11) as f64 - 4.5 + 0.1 * i as f64).collect()
    }

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_filters_are_orthonormal() {
        for name in WAVELET_NAMES {
            let w = Wavelet::from_name(name).unwrap();
            let sum: f64 = w.rec_lo().iter().sum();
            let energy: f64 = w.rec_lo().iter().map(|v| v * v).sum();
            let hi_sum: f64 = w.rec_hi().iter().sum();
            assert!((sum - std::f64::consts::SQRT_2).abs() < 1e-9, "{name}");
            assert!((energy - 1.0).abs() < 1e-9, "{name}");
            assert!(hi_sum.abs() < 1e-9, "{name}");
        }
    }

    #[test]
    fn test_haar_filters_match_convention() {
        let w = Wavelet::from_name("HAAR").unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(w.name(), "haar");
        assert_close(w.dec_hi(), &[-s, s], 1e-15);
        assert_close(w.rec_hi(), &[s, -s], 1e-15);
    }

    #[test]
    fn test_unknown_wavelet() {
        assert!(matches!(
            Wavelet::from_name("coif17"),
            Err(CoreError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_symmetric_index() {
        assert_eq!(symmetric_index(-1, 4), 0);
        assert_eq!(symmetric_index(-2, 4), 1);
        assert_eq!(symmetric_index(4, 4), 3);
        assert_eq!(symmetric_index(5, 4), 2);
        assert_eq!(symmetric_index(0, 1), 0);
        assert_eq!(symmetric_index(-7, 1), 0);
    }

    #[test]
    fn test_dwt_max_level() {
        assert_eq!(dwt_max_level(8, 2), 3);
        assert_eq!(dwt_max_level(100, 4), 5);
        assert_eq!(dwt_max_level(2, 8), 0);
    }

    #[test]
    fn test_haar_wavedec_known_values() {
        let haar = Wavelet::from_name("db1").unwrap();
        let coeffs = wavedec(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], &haar, 2).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_close(&coeffs[0], &[5.0, 13.0], 1e-12);
        assert_close(&coeffs[1], &[-2.0, -2.0], 1e-12);
        assert_close(&coeffs[2], &[-s, -s, -s, -s], 1e-12);
    }

    #[test]
    fn test_db2_single_level_known_values() {
        let db2 = Wavelet::from_name("db2").unwrap();
        let (a, d) = dwt(&[1.0, 2.0, 3.0, 4.0, 5.0], &db2).unwrap();
        assert_eq!(a.len(), 4);
        assert_close(&a, &[1.767_766_952_966_864, 2.310_789_034_541_514, 5.268_625_681_838_627, 7.105_742_988_925_462], 1e-9);
        assert_close(&d, &[-0.612_372_435_695_611_7, 0.0, 0.482_962_913_143_699_3, 0.129_409_522_551_911_2], 1e-9);
    }

    #[test]
    fn test_band_lengths() {
        let db4 = Wavelet::from_name("db4").unwrap();
        let coeffs = wavedec(&ramp(100), &db4, 3).unwrap();
        let lens: Vec<usize> = coeffs.iter().map(Vec::len).collect();
        // 100 -> 53 -> 30 -> 18
        assert_eq!(lens, vec![18, 18, 30, 53]);
    }

    #[test]
    fn test_perfect_reconstruction() {
        for name in WAVELET_NAMES {
            let w = Wavelet::from_name(name).unwrap();
            for n in [1usize, 2, 5, 8, 17, 64, 101] {
                for level in 1..=4 {
                    let signal = ramp(n);
                    let back = waverec(&wavedec(&signal, &w, level).unwrap(), &w).unwrap();
                    assert!(back.len() >= n, "{name} n={n} level={level}");
                    assert_close(&back[..n], &signal, 1e-8);
                }
            }
        }
    }

    #[test]
    fn test_level_zero_is_passthrough() {
        let w = Wavelet::from_name("db1").unwrap();
        let coeffs = wavedec(&[3.0, 1.0], &w, 0).unwrap();
        assert_eq!(coeffs, vec![vec![3.0, 1.0]]);
        assert_eq!(waverec(&coeffs, &w).unwrap(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_idwt_rejects_mismatched_bands() {
        let w = Wavelet::from_name("db1").unwrap();
        assert!(matches!(
            idwt(&[1.0, 2.0], &[1.0], &w),
            Err(CoreError::ShapeMismatch { .. })
        ));
        assert!(waverec(&[], &w).is_err());
    }
}
