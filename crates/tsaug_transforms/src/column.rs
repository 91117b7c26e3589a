//! Per-feature column helpers shared by the operators.

use ndarray::Array2;

use tsaug_core::Result;

/// Apply `f` to every feature column of a `(T, F)` signal.
///
/// `f` receives the column index and its samples and must return exactly
/// `T` values; extra values are dropped and missing ones are zero.
pub(crate) fn map_columns<F>(signal: &Array2<f64>, mut f: F) -> Result<Array2<f64>>
where
    F: FnMut(usize, &[f64]) -> Result<Vec<f64>>,
{
    let (len, features) = signal.dim();
    let mut output = Array2::zeros((len, features));
    for j in 0..features {
        let column = signal.column(j).to_vec();
        let mapped = f(j, &column)?;
        write_column(&mut output, j, mapped);
    }
    Ok(output)
}

/// Apply `f` to matching feature columns of two equally shaped signals.
pub(crate) fn map_column_pairs<F>(
    left: &Array2<f64>,
    right: &Array2<f64>,
    mut f: F,
) -> Result<Array2<f64>>
where
    F: FnMut(usize, &[f64], &[f64]) -> Result<Vec<f64>>,
{
    let (len, features) = left.dim();
    let mut output = Array2::zeros((len, features));
    for j in 0..features {
        let a = left.column(j).to_vec();
        let b = right.column(j).to_vec();
        let mapped = f(j, &a, &b)?;
        write_column(&mut output, j, mapped);
    }
    Ok(output)
}

fn write_column(output: &mut Array2<f64>, j: usize, mut values: Vec<f64>) {
    values.resize(output.nrows(), 0.0);
    for (dst, src) in output.column_mut(j).iter_mut().zip(values) {
        *dst = src;
    }
}
