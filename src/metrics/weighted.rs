//! Weighted statistics and observation-set validation.

use crate::core::error::{MetricsError, Result};
use crate::core::types::*;
use ndarray::ArrayView1;

/// Check the shared preconditions of every evaluation.
///
/// The three sequences must have identical, non-zero length, hold only
/// finite values, and every weight must be strictly positive.
pub fn validate_observations(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<()> {
    if predictions.len() != actuals.len() {
        return Err(MetricsError::length_mismatch(
            "predictions",
            predictions.len(),
            "actuals",
            actuals.len(),
        ));
    }
    if weights.len() != predictions.len() {
        return Err(MetricsError::length_mismatch(
            "weights",
            weights.len(),
            "predictions",
            predictions.len(),
        ));
    }
    if predictions.is_empty() {
        return Err(MetricsError::invalid_input("empty input arrays"));
    }

    ensure_finite("predictions", predictions)?;
    ensure_finite("actuals", actuals)?;
    ensure_finite("weights", weights)?;

    if let Some((index, &w)) = weights.iter().enumerate().find(|(_, &w)| w <= 0.0) {
        return Err(MetricsError::invalid_input(format!(
            "weights must be strictly positive, weights[{}] = {}",
            index, w
        )));
    }

    Ok(())
}

fn ensure_finite(name: &str, values: &ArrayView1<'_, f64>) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MetricsError::invalid_input(format!(
            "{}[{}] = {} is not finite",
            name, index, values[index]
        ))),
        None => Ok(()),
    }
}

/// Weighted average `sum(v_i * w_i) / sum(w_i)`.
pub fn weighted_average(values: &ArrayView1<'_, f64>, weights: &ArrayView1<'_, Weight>) -> Result<f64> {
    if values.len() != weights.len() {
        return Err(MetricsError::length_mismatch(
            "values",
            values.len(),
            "weights",
            weights.len(),
        ));
    }
    if values.is_empty() {
        return Err(MetricsError::invalid_input("empty input arrays"));
    }

    let weight_sum = weights.sum();
    if weight_sum <= 0.0 || !weight_sum.is_finite() {
        return Err(MetricsError::invalid_input(format!(
            "sum of weights must be positive and finite, got {}",
            weight_sum
        )));
    }

    let average = values.dot(weights) / weight_sum;
    if !average.is_finite() {
        return Err(MetricsError::invalid_input(format!(
            "weighted average overflowed to {}",
            average
        )));
    }
    Ok(average)
}

/// Weighted bias: weighted mean prediction minus weighted mean actual.
pub fn weighted_bias(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<f64> {
    Ok(weighted_average(predictions, weights)? - weighted_average(actuals, weights)?)
}

/// Weighted mean squared error.
pub fn weighted_mean_squared_error(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<f64> {
    let squared = (predictions - actuals).mapv(|d| d * d);
    weighted_average(&squared.view(), weights)
}

/// Weighted mean absolute error.
pub fn weighted_mean_absolute_error(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<f64> {
    let absolute = (predictions - actuals).mapv(f64::abs);
    weighted_average(&absolute.view(), weights)
}
