//! Ordinary least-squares line fitting
//!
//! Every trend-based forecasting model fits `y = slope * t + intercept` the same
//! way, so the closed-form solution lives here once:
//!
//! ```text
//! slope     = (n Σty - Σt Σy) / (n Σt² - (Σt)²)
//! intercept = (Σy - slope Σt) / n
//! ```

use crate::{MathError, Result, EPSILON};
use serde::{Deserialize, Serialize};

/// Slope and intercept of a fitted line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change in value per unit of `t`
    pub slope: f64,
    /// Value at `t = 0`
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at position `t`
    pub fn value_at(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

/// Fit a line through `(t, y)` points by ordinary least squares.
///
/// Fails with [`MathError::InsufficientData`] for fewer than two points and
/// with [`MathError::CalculationError`] when every point shares the same `t`.
pub fn fit_line(points: &[(f64, f64)]) -> Result<LinearFit> {
    if points.len() < 2 {
        return Err(MathError::InsufficientData {
            needed: 2,
            got: points.len(),
        });
    }

    let n = points.len() as f64;
    let (sum_t, sum_y, sum_ty, sum_tt) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(st, sy, sty, stt), &(t, y)| (st + t, sy + y, sty + t * y, stt + t * t),
    );

    let denominator = n * sum_tt - sum_t * sum_t;
    if denominator.abs() < EPSILON {
        return Err(MathError::CalculationError(
            "Cannot calculate slope: all points share the same position".to_string(),
        ));
    }

    let slope = (n * sum_ty - sum_t * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_t) / n;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(MathError::CalculationError(format!(
            "Line fit produced non-finite coefficients (slope={}, intercept={})",
            slope, intercept
        )));
    }

    Ok(LinearFit { slope, intercept })
}

/// Fit a line over index positions `t = offset..offset + values.len()`
pub fn fit_indexed(values: &[f64], offset: usize) -> Result<LinearFit> {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &y)| ((offset + i) as f64, y))
        .collect();
    fit_line(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_line_exact_trend() {
        let fit = fit_indexed(&[0.0, 10.0, 20.0, 30.0], 0).unwrap();

        assert!((fit.slope - 10.0).abs() < 1e-10);
        assert!(fit.intercept.abs() < 1e-10);
        assert!((fit.value_at(4.0) - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_line_noisy_data() {
        // y = 2t + 1 with symmetric noise cancels out
        let values = [1.5, 2.5, 5.5, 6.5];
        let fit = fit_indexed(&values, 0).unwrap();

        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.intercept - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_indexed_with_offset() {
        // Same line, just observed later on the axis
        let fit = fit_indexed(&[50.0, 60.0], 5).unwrap();

        assert!((fit.slope - 10.0).abs() < 1e-10);
        assert!(fit.intercept.abs() < 1e-10);
    }

    #[test]
    fn test_fit_line_rejects_single_point() {
        let err = fit_line(&[(0.0, 3.0)]).unwrap_err();
        assert_eq!(err, MathError::InsufficientData { needed: 2, got: 1 });
    }

    #[test]
    fn test_fit_line_rejects_vertical_points() {
        let err = fit_line(&[(2.0, 1.0), (2.0, 5.0)]).unwrap_err();
        assert!(matches!(err, MathError::CalculationError(_)));
    }
}
