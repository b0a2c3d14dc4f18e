//! Tweedie (exponential dispersion family) deviance.
//!
//! The unit deviance `d(y, mu)` of a Tweedie distribution with power `p` is
//!
//! - `p == 0`: `(y - mu)^2` (Normal)
//! - `p == 1`: `2 (y ln(y / mu) - y + mu)` (Poisson), with `y ln(y / mu) = 0` at `y == 0`
//! - `p == 2`: `2 (ln(mu / y) + y / mu - 1)` (Gamma)
//! - otherwise: `2 (max(y, 0)^(2-p) / ((1-p)(2-p)) - y mu^(1-p) / (1-p) + mu^(2-p) / (2-p))`
//!
//! The three named cases are exact branches; the general formula has
//! removable singularities there and is never evaluated at those powers.

use crate::core::error::{MetricsError, Result};
use crate::core::types::*;
use crate::metrics::weighted::validate_observations;
use ndarray::ArrayView1;

/// Check that a Tweedie distribution exists for `power`.
///
/// Powers in the open interval (0, 1) and non-finite powers are rejected.
pub fn validate_power(power: f64) -> Result<()> {
    if !power.is_finite() {
        return Err(MetricsError::unsupported_parameter(
            "tweedie_power",
            power.to_string(),
            "must be finite",
        ));
    }
    if power > 0.0 && power < 1.0 {
        return Err(MetricsError::unsupported_parameter(
            "tweedie_power",
            power.to_string(),
            "no Tweedie distribution exists for 0 < power < 1",
        ));
    }
    Ok(())
}

/// Tweedie distribution parametrized by its variance power.
///
/// Only [`TweedieDistribution::new`] and the named constructors create one,
/// so the power is always supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweedieDistribution {
    power: f64,
}

impl TweedieDistribution {
    /// Create a distribution, rejecting powers with no defined deviance.
    pub fn new(power: f64) -> Result<Self> {
        validate_power(power)?;
        Ok(Self { power })
    }

    /// Normal distribution (`power == 0`).
    pub fn normal() -> Self {
        Self { power: 0.0 }
    }

    /// Poisson distribution (`power == 1`).
    pub fn poisson() -> Self {
        Self { power: 1.0 }
    }

    /// Gamma distribution (`power == 2`).
    pub fn gamma() -> Self {
        Self { power: 2.0 }
    }

    /// Variance power.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Check that `(actual, prediction)` lies in the support of this distribution.
    pub fn check_domain(&self, actual: Label, prediction: Score) -> Result<()> {
        let p = self.power;
        if p == 0.0 {
            return Ok(());
        }
        if prediction <= 0.0 {
            return Err(MetricsError::invalid_input(format!(
                "prediction {} must be strictly positive for Tweedie power {}",
                prediction, p
            )));
        }
        if p >= 2.0 && actual <= 0.0 {
            return Err(MetricsError::invalid_input(format!(
                "actual {} must be strictly positive for Tweedie power {}",
                actual, p
            )));
        }
        if p >= 1.0 && actual < 0.0 {
            return Err(MetricsError::invalid_input(format!(
                "actual {} must be non-negative for Tweedie power {}",
                actual, p
            )));
        }
        Ok(())
    }

    /// Unit deviance of a single observation.
    pub fn unit_deviance(&self, actual: Label, prediction: Score) -> Result<f64> {
        self.check_domain(actual, prediction)?;
        let (y, mu, p) = (actual, prediction, self.power);

        let dev = if p == 0.0 {
            (y - mu).powi(2)
        } else if p == 1.0 {
            let ylogy = if y == 0.0 { 0.0 } else { y * (y / mu).ln() };
            2.0 * (ylogy - y + mu)
        } else if p == 2.0 {
            2.0 * ((mu / y).ln() + y / mu - 1.0)
        } else {
            let one_minus_p = 1.0 - p;
            let two_minus_p = 2.0 - p;
            2.0 * (y.max(0.0).powf(two_minus_p) / (one_minus_p * two_minus_p)
                - y * mu.powf(one_minus_p) / one_minus_p
                + mu.powf(two_minus_p) / two_minus_p)
        };

        if !dev.is_finite() {
            return Err(MetricsError::invalid_input(format!(
                "unit deviance is not finite for actual {} and prediction {} at power {}",
                y, mu, p
            )));
        }

        // Rounding can leave tiny negative values at y == mu.
        Ok(dev.max(0.0))
    }

    /// Sum of weighted unit deviances, `sum(d(y_i, mu_i) * w_i)`.
    pub fn deviance(
        &self,
        actuals: &ArrayView1<'_, Label>,
        predictions: &ArrayView1<'_, Score>,
        weights: &ArrayView1<'_, Weight>,
    ) -> Result<f64> {
        validate_observations(predictions, actuals, weights)?;

        let mut total = 0.0;
        for ((&y, &mu), &w) in actuals.iter().zip(predictions.iter()).zip(weights.iter()) {
            total += self.unit_deviance(y, mu)? * w;
        }
        Ok(total)
    }

    /// Weighted mean deviance, the deviance divided by the sum of weights.
    pub fn mean_deviance(
        &self,
        actuals: &ArrayView1<'_, Label>,
        predictions: &ArrayView1<'_, Score>,
        weights: &ArrayView1<'_, Weight>,
    ) -> Result<f64> {
        let total = self.deviance(actuals, predictions, weights)?;
        Ok(total / weights.sum())
    }
}

/// Weighted mean Tweedie deviance for `power`.
pub fn mean_tweedie_deviance(
    actuals: &ArrayView1<'_, Label>,
    predictions: &ArrayView1<'_, Score>,
    weights: &ArrayView1<'_, Weight>,
    power: f64,
) -> Result<f64> {
    TweedieDistribution::new(power)?.mean_deviance(actuals, predictions, weights)
}
