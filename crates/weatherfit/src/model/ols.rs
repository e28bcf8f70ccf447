//! Ordinary least squares via a truncated SVD of the standardized Gram matrix.

use nalgebra::{DMatrix, DVector};

use super::params::ModelParameters;
use crate::error::{Result, WeatherfitError};

/// Iteration cap for the SVD; reaching it is reported as an error.
const MAX_SVD_ITERATIONS: usize = 1_000;

/// Solve `min ||X w + b - y||²` for weights `w` and intercept `b`.
///
/// Columns are centered and scaled to unit norm before forming `XᵀX`, and
/// singular values below `max_sv * max(n, p) * ε` are treated as zero. The
/// result is the minimum-norm solution: a constant column gets weight zero and
/// perfectly collinear columns share their weight.
pub(crate) fn least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<ModelParameters> {
    let (n, p) = x.shape();
    if n == 0 {
        return Err(WeatherfitError::InsufficientData {
            required: 1,
            actual: 0,
            context: "model fit".to_string(),
        });
    }
    if y.len() != n {
        return Err(WeatherfitError::DimensionMismatch {
            expected: n,
            actual: y.len(),
            context: "model fit targets".to_string(),
        });
    }

    let means = DVector::from_iterator(p, x.column_iter().map(|c| c.mean()));
    let y_mean = y.mean();

    let mut scaled = x.clone();
    let mut norms = DVector::zeros(p);
    for (j, mut column) in scaled.column_iter_mut().enumerate() {
        // Centering a constant column leaves only rounding residue of this size.
        let noise = column.amax() * n as f64 * (n as f64).sqrt() * f64::EPSILON;
        column.add_scalar_mut(-means[j]);
        let norm = column.norm();
        if norm > noise {
            column /= norm;
            norms[j] = norm;
        } else {
            column.fill(0.0);
        }
    }
    let centered_y = y.add_scalar(-y_mean);

    let gram = scaled.tr_mul(&scaled);
    let rhs = scaled.tr_mul(&centered_y);

    let svd = gram
        .try_svd(true, true, f64::EPSILON, MAX_SVD_ITERATIONS)
        .ok_or_else(|| WeatherfitError::Numerical("SVD did not converge".to_string()))?;
    let tolerance = svd.singular_values.max() * n.max(p) as f64 * f64::EPSILON;
    let scaled_weights = svd
        .solve(&rhs, tolerance)
        .map_err(|e| WeatherfitError::Numerical(e.to_string()))?;

    let weights: Vec<f64> = scaled_weights
        .iter()
        .zip(norms.iter())
        .map(|(&w, &norm)| if norm > 0.0 { w / norm } else { 0.0 })
        .collect();
    let intercept = y_mean - weights.iter().zip(means.iter()).map(|(w, m)| w * m).sum::<f64>();

    if !intercept.is_finite() || weights.iter().any(|w| !w.is_finite()) {
        return Err(WeatherfitError::Numerical(
            "least-squares solution is not finite".to_string(),
        ));
    }

    Ok(ModelParameters { weights, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-8, "{} != {}", a, b);
    }

    #[test]
    fn test_exact_linear_relation() {
        // y = 2 x1 - 3 x2 + 5
        let rows = [[1.0, 2.0], [2.0, 1.0], [3.0, 5.0], [4.0, 3.0], [5.0, 8.0]];
        let x = DMatrix::from_fn(rows.len(), 2, |i, j| rows[i][j]);
        let y = DVector::from_iterator(rows.len(), rows.iter().map(|r| 2.0 * r[0] - 3.0 * r[1] + 5.0));

        let params = least_squares(&x, &y).unwrap();
        assert_close(params.weights[0], 2.0);
        assert_close(params.weights[1], -3.0);
        assert_close(params.intercept, 5.0);
    }

    #[test]
    fn test_matches_simple_regression_formula() {
        let xs = [1.0, 2.0, 4.0, 7.0, 9.0];
        let ys = [2.1, 3.9, 8.2, 13.8, 18.5];
        let x = DMatrix::from_column_slice(5, 1, &xs);
        let y = DVector::from_column_slice(&ys);

        let x_mean = xs.iter().sum::<f64>() / 5.0;
        let y_mean = ys.iter().sum::<f64>() / 5.0;
        let sxy: f64 = xs.iter().zip(&ys).map(|(a, b)| (a - x_mean) * (b - y_mean)).sum();
        let sxx: f64 = xs.iter().map(|a| (a - x_mean).powi(2)).sum();
        let slope = sxy / sxx;

        let params = least_squares(&x, &y).unwrap();
        assert_close(params.weights[0], slope);
        assert_close(params.intercept, y_mean - slope * x_mean);
    }

    #[test]
    fn test_constant_column_gets_zero_weight() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 1013.0, 2.0, 1013.0, 3.0, 1013.0, 4.0, 1013.0]);
        let y = DVector::from_column_slice(&[3.0, 5.0, 7.0, 9.0]);

        let params = least_squares(&x, &y).unwrap();
        assert_close(params.weights[0], 2.0);
        assert_eq!(params.weights[1], 0.0);
        assert_close(params.intercept, 1.0);
    }

    #[test]
    fn test_inexact_constant_column_gets_zero_weight() {
        let n = 30;
        let x = DMatrix::from_fn(n, 2, |i, j| if j == 0 { i as f64 } else { 1013.1 });
        let y = DVector::from_iterator(n, (0..n).map(|i| 0.5 * i as f64 - 4.0));

        let params = least_squares(&x, &y).unwrap();
        assert_close(params.weights[0], 0.5);
        assert_eq!(params.weights[1], 0.0);
        assert_close(params.intercept, -4.0);
    }

    #[test]
    fn test_collinear_columns_share_weight() {
        // second column is exactly twice the first
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0]);
        let y = DVector::from_column_slice(&[2.0, 4.0, 6.0, 8.0]);

        let params = least_squares(&x, &y).unwrap();
        assert!(params.weights.iter().all(|w| w.is_finite()));
        let fitted = params.predict_one(&[5.0, 10.0]);
        assert_close(fitted, 10.0);
    }

    #[test]
    fn test_single_row() {
        let x = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let y = DVector::from_column_slice(&[7.0]);

        let params = least_squares(&x, &y).unwrap();
        assert_eq!(params.weights, vec![0.0, 0.0]);
        assert_close(params.intercept, 7.0);
    }

    #[test]
    fn test_empty_input() {
        let x = DMatrix::<f64>::zeros(0, 3);
        let y = DVector::<f64>::zeros(0);
        assert!(matches!(
            least_squares(&x, &y),
            Err(WeatherfitError::InsufficientData { .. })
        ));
    }
}
