//! Moving average and smoothing calculations
//!
//! Contains the averaging primitives used by the forecasting models:
//! - Trailing Simple Moving Average
//! - Centered Moving Average (for seasonal decomposition)
//! - Simple Exponential Smoothing

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Mean of the last `window` values.
///
/// The window shrinks to the series length when fewer values are available, so
/// this only fails for an empty series or a zero window.
pub fn trailing_mean(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window size must be greater than zero".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(MathError::InsufficientData { needed: 1, got: 0 });
    }

    let window = window.min(values.len());
    Ok(values[values.len() - window..].iter().mean())
}

/// Centered moving average of width `window`.
///
/// Position `i` averages `values[i - window/2 .. i - window/2 + window]`. Positions
/// where that span runs off either end of the series are `None`, never zero.
pub fn centered_moving_average(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window size must be greater than zero".to_string(),
        ));
    }

    let half = window / 2;
    let averages = (0..values.len())
        .map(|i| {
            let start = i.checked_sub(half)?;
            let end = start + window;
            if end > values.len() {
                return None;
            }
            Some(values[start..end].iter().mean())
        })
        .collect();

    Ok(averages)
}

/// Final level of simple exponential smoothing.
///
/// `S1 = y1`, `Si = alpha * yi + (1 - alpha) * S(i-1)`, with `0 < alpha <= 1`.
pub fn exponential_smooth(values: &[f64], alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Alpha must be in (0, 1], got {}",
            alpha
        )));
    }

    let (&first, rest) = values
        .split_first()
        .ok_or(MathError::InsufficientData { needed: 1, got: 0 })?;

    Ok(rest
        .iter()
        .fold(first, |level, &value| alpha * value + (1.0 - alpha) * level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_mean_full_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((trailing_mean(&values, 2).unwrap() - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_trailing_mean_shrinks_window() {
        let values = [2.0, 4.0, 6.0];
        assert!((trailing_mean(&values, 7).unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_trailing_mean_errors() {
        assert!(matches!(
            trailing_mean(&[1.0], 0),
            Err(MathError::InvalidInput(_))
        ));
        assert_eq!(
            trailing_mean(&[], 3),
            Err(MathError::InsufficientData { needed: 1, got: 0 })
        );
    }

    #[test]
    fn test_centered_moving_average_odd_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let cma = centered_moving_average(&values, 3).unwrap();

        assert_eq!(cma.len(), 5);
        assert_eq!(cma[0], None);
        assert!((cma[1].unwrap() - 2.0).abs() < 1e-10);
        assert!((cma[3].unwrap() - 4.0).abs() < 1e-10);
        assert_eq!(cma[4], None);
    }

    #[test]
    fn test_centered_moving_average_window_equals_length() {
        let values = [3.0; 7];
        let cma = centered_moving_average(&values, 7).unwrap();

        let defined: Vec<usize> = cma
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|_| i))
            .collect();
        assert_eq!(defined, vec![3]);
    }

    #[test]
    fn test_exponential_smooth() {
        // 10 -> 0.5*20 + 0.5*10 = 15 -> 0.5*30 + 0.5*15 = 22.5
        let level = exponential_smooth(&[10.0, 20.0, 30.0], 0.5).unwrap();
        assert!((level - 22.5).abs() < 1e-10);
    }

    #[test]
    fn test_exponential_smooth_alpha_one_tracks_last_value() {
        let level = exponential_smooth(&[10.0, 20.0, 7.0], 1.0).unwrap();
        assert!((level - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_exponential_smooth_rejects_bad_alpha() {
        assert!(exponential_smooth(&[1.0], 0.0).is_err());
        assert!(exponential_smooth(&[1.0], 1.5).is_err());
        assert!(exponential_smooth(&[1.0], f64::NAN).is_err());
    }
}
