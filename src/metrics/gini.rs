//! Lorenz curve and Gini coefficient of a risk ranking.
//!
//! Rows are ordered by ascending prediction and the cumulative share of
//! weighted actuals is traced against N evenly spaced points on `[0, 1]`.
//! `Gini = 1 - 2 * AUC`, with the area taken by the trapezoidal rule.
//!
//! Ties in the predictions keep their original relative order (stable sort).
//! With rounded or categorical predictions the result depends on this.

use crate::core::error::{MetricsError, Result};
use crate::core::types::*;
use crate::metrics::weighted::validate_observations;
use ndarray::{Array1, ArrayView1};

/// Lorenz curve ordinates of a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct LorenzCurve {
    /// Evenly spaced points from 0 to 1 inclusive
    pub x: Array1<f64>,
    /// Cumulative share of weighted actuals, ending at exactly 1
    pub y: Array1<f64>,
}

impl LorenzCurve {
    /// Area under the curve by the trapezoidal rule.
    pub fn area(&self) -> f64 {
        trapezoid(&self.x.view(), &self.y.view())
    }

    /// Gini coefficient `1 - 2 * AUC`.
    pub fn gini(&self) -> f64 {
        1.0 - 2.0 * self.area()
    }

    /// Number of points on the curve.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Row indices ordered by ascending prediction, ties in original order.
pub fn ranking_order(predictions: &ArrayView1<'_, Score>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..predictions.len()).collect();
    order.sort_by(|&a, &b| predictions[a].total_cmp(&predictions[b]));
    order
}

/// `n` evenly spaced points from 0 to 1 inclusive.
fn equality_line(n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::zeros(1),
        _ => Array1::linspace(0.0, 1.0, n),
    }
}

/// Trapezoidal integral of `y` over `x`.
fn trapezoid(x: &ArrayView1<'_, f64>, y: &ArrayView1<'_, f64>) -> f64 {
    x.iter()
        .zip(x.iter().skip(1))
        .zip(y.iter().zip(y.iter().skip(1)))
        .map(|((&x0, &x1), (&y0, &y1))| (x1 - x0) * (y0 + y1) / 2.0)
        .sum()
}

/// Build the Lorenz curve of weighted actuals ranked by prediction.
pub fn lorenz_curve(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<LorenzCurve> {
    validate_observations(predictions, actuals, weights)?;
    if predictions.len() < 2 {
        return Err(MetricsError::invalid_input(
            "at least two observations are needed to compute a Lorenz curve",
        ));
    }

    let order = ranking_order(predictions);

    let mut running = 0.0;
    let mut cumulated: Array1<f64> = order
        .iter()
        .map(|&i| {
            running += actuals[i] * weights[i];
            running
        })
        .collect();

    let total = running;
    if total == 0.0 {
        return Err(MetricsError::invalid_input(
            "total weighted actuals is zero, Gini coefficient is undefined",
        ));
    }
    if !total.is_finite() {
        return Err(MetricsError::invalid_input(format!(
            "total weighted actuals overflowed to {}, Gini coefficient is undefined",
            total
        )));
    }
    cumulated.mapv_inplace(|c| c / total);

    Ok(LorenzCurve {
        x: equality_line(cumulated.len()),
        y: cumulated,
    })
}

/// Gini coefficient of the ranking induced by `predictions`.
///
/// Only the order of `predictions` matters, so any strictly increasing
/// transformation of them leaves the result unchanged.
pub fn gini_coefficient(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<f64> {
    Ok(lorenz_curve(predictions, actuals, weights)?.gini())
}
