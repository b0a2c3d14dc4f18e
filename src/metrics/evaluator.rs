//! Scorecard computation for a set of predictions.

use crate::config::Config;
use crate::core::error::{MetricsError, Result};
use crate::core::types::*;
use crate::metrics::deviance::TweedieDistribution;
use crate::metrics::gini::gini_coefficient;
use crate::metrics::scorecard::Scorecard;
use crate::metrics::weighted::{
    validate_observations, weighted_bias, weighted_mean_absolute_error,
    weighted_mean_squared_error,
};
use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

/// Stateless scorecard service.
///
/// Holds only the configured defaults; every call is independent, so one
/// evaluator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MetricsEvaluator {
    config: Config,
}

impl MetricsEvaluator {
    /// Create an evaluator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute the scorecard of `predictions` against `actuals`.
    ///
    /// Fails with [`MetricsError::InvalidInput`] on mismatched or empty
    /// inputs, non-positive weights, values outside the Tweedie domain of
    /// `power`, or all-zero weighted actuals, and with
    /// [`MetricsError::UnsupportedParameter`] when `power` has no deviance.
    pub fn evaluate(
        &self,
        predictions: &ArrayView1<'_, Score>,
        actuals: &ArrayView1<'_, Label>,
        weights: &ArrayView1<'_, Weight>,
        power: f64,
        label: &str,
    ) -> Result<Scorecard> {
        validate_observations(predictions, actuals, weights)?;
        let distribution = TweedieDistribution::new(power)?;

        let bias = weighted_bias(predictions, actuals, weights)?;
        let weighted_mse = weighted_mean_squared_error(predictions, actuals, weights)?;
        let weighted_mae = weighted_mean_absolute_error(predictions, actuals, weights)?;
        log::debug!(
            "{}: bias={} weighted_mse={} weighted_mae={}",
            label,
            bias,
            weighted_mse,
            weighted_mae
        );

        let deviance = distribution.mean_deviance(actuals, predictions, weights)?;
        log::debug!("{}: deviance (p={})={}", label, power, deviance);

        let gini = gini_coefficient(predictions, actuals, weights)?;
        log::debug!("{}: gini={}", label, gini);

        let scorecard = Scorecard {
            model_label: label.to_string(),
            tweedie_power: power,
            sample_size: predictions.len(),
            bias,
            weighted_mse,
            weighted_mae,
            deviance,
            gini,
        };
        if let Some((name, value)) = scorecard.rows().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(MetricsError::invalid_input(format!(
                "{}: {} is not finite ({})",
                label, name, value
            )));
        }
        log::info!(
            "Evaluated {} on {} observations (gini {:.3})",
            label,
            scorecard.sample_size,
            gini
        );
        Ok(scorecard)
    }

    /// [`MetricsEvaluator::evaluate`] with the configured Tweedie power.
    pub fn evaluate_with_default_power(
        &self,
        predictions: &ArrayView1<'_, Score>,
        actuals: &ArrayView1<'_, Label>,
        weights: &ArrayView1<'_, Weight>,
        label: &str,
    ) -> Result<Scorecard> {
        self.evaluate(predictions, actuals, weights, self.config.tweedie_power, label)
    }

    /// Score each sample of a train/test split separately.
    ///
    /// Returns one scorecard per non-empty sample in train, test order,
    /// labelled `"{label} ({sample})"`. Samples are scored in parallel.
    pub fn evaluate_by_sample(
        &self,
        predictions: &ArrayView1<'_, Score>,
        actuals: &ArrayView1<'_, Label>,
        weights: &ArrayView1<'_, Weight>,
        samples: &[SampleLabel],
        power: f64,
        label: &str,
    ) -> Result<Vec<Scorecard>> {
        if samples.len() != predictions.len() {
            return Err(MetricsError::length_mismatch(
                "samples",
                samples.len(),
                "predictions",
                predictions.len(),
            ));
        }
        validate_observations(predictions, actuals, weights)?;

        let partitions: Vec<(SampleLabel, Vec<usize>)> = SampleLabel::ALL
            .iter()
            .filter_map(|&sample| {
                let rows: Vec<usize> = samples
                    .iter()
                    .enumerate()
                    .filter(|(_, &s)| s == sample)
                    .map(|(i, _)| i)
                    .collect();
                if rows.is_empty() {
                    log::warn!("{}: {} sample is empty, skipping", label, sample);
                    None
                } else {
                    Some((sample, rows))
                }
            })
            .collect();

        if partitions.is_empty() {
            return Err(MetricsError::invalid_input("no rows in any sample"));
        }

        partitions
            .par_iter()
            .map(|(sample, rows)| {
                let p = select(predictions, rows);
                let a = select(actuals, rows);
                let w = select(weights, rows);
                self.evaluate(
                    &p.view(),
                    &a.view(),
                    &w.view(),
                    power,
                    &format!("{} ({})", label, sample),
                )
            })
            .collect()
    }
}

fn select(values: &ArrayView1<'_, f64>, rows: &[usize]) -> Array1<f64> {
    rows.iter().map(|&i| values[i]).collect()
}

/// Compute a scorecard with a default-configured [`MetricsEvaluator`].
pub fn evaluate_predictions(
    predictions: &ArrayView1<'_, Score>,
    actuals: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
    power: f64,
    label: &str,
) -> Result<Scorecard> {
    MetricsEvaluator::default().evaluate(predictions, actuals, weights, power, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_baseline_scorecard() {
        let values = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let weights = Array1::from_elem(5, 1.0);
        let card = evaluate_predictions(&values.view(), &values.view(), &weights.view(), 1.0, "baseline")
            .unwrap();

        assert_eq!(card.model_label, "baseline");
        assert_eq!(card.sample_size, 5);
        assert_abs_diff_eq!(card.bias, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(card.weighted_mse, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(card.weighted_mae, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(card.deviance, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(card.gini, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch_fails_first() {
        let predictions = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let actuals = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let weights = Array1::from_elem(5, 1.0);
        // An unsupported power would fail too; the length check comes first.
        let err = evaluate_predictions(&predictions.view(), &actuals.view(), &weights.view(), 0.5, "m")
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput { .. }));
    }

    #[test]
    fn test_overflowing_inputs_rejected() {
        let values = Array1::from_vec(vec![1e200, 2e200]);
        let weights = Array1::from_elem(2, 1e200);
        let err = evaluate_predictions(&values.view(), &values.view(), &weights.view(), 0.0, "m")
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput { .. }));

        let predictions = Array1::from_vec(vec![1e200, 1.0]);
        let actuals = Array1::from_vec(vec![1.0, 2.0]);
        let unit = Array1::from_elem(2, 1.0);
        let err = evaluate_predictions(&predictions.view(), &actuals.view(), &unit.view(), 1.5, "m")
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let actuals = Array1::from_vec(vec![1.0, 2.0, 3.0]);
        let weights = Array1::from_elem(3, 0.0);
        let err = evaluate_predictions(&actuals.view(), &actuals.view(), &weights.view(), 1.0, "m")
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput { .. }));
    }

    #[test]
    fn test_default_power_from_config() {
        let config = crate::config::ConfigBuilder::new().tweedie_power(2.0).build().unwrap();
        let evaluator = MetricsEvaluator::new(config);
        let predictions = Array1::from_vec(vec![1.0, 2.0]);
        let actuals = Array1::from_vec(vec![2.0, 1.0]);
        let weights = Array1::from_elem(2, 1.0);

        let card = evaluator
            .evaluate_with_default_power(&predictions.view(), &actuals.view(), &weights.view(), "gamma")
            .unwrap();
        assert_eq!(card.tweedie_power, 2.0);
        assert_abs_diff_eq!(
            card.deviance,
            (0.613_705_638_880_109_2 + 0.386_294_361_119_890_8) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_evaluate_by_sample() {
        let predictions = Array1::from_vec(vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
        let actuals = Array1::from_vec(vec![1.0, 2.0, 3.0, 2.0, 2.0, 2.0]);
        let weights = Array1::from_elem(6, 1.0);
        let samples = [
            SampleLabel::Train,
            SampleLabel::Test,
            SampleLabel::Train,
            SampleLabel::Test,
            SampleLabel::Train,
            SampleLabel::Test,
        ];

        let cards = MetricsEvaluator::default()
            .evaluate_by_sample(
                &predictions.view(),
                &actuals.view(),
                &weights.view(),
                &samples,
                1.5,
                "glm",
            )
            .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].model_label, "glm (train)");
        assert_eq!(cards[1].model_label, "glm (test)");
        assert_eq!(cards[0].sample_size, 3);
        assert_abs_diff_eq!(cards[0].weighted_mae, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cards[1].weighted_mae, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_by_sample_skips_empty() {
        let values = Array1::from_vec(vec![1.0, 2.0]);
        let weights = Array1::from_elem(2, 1.0);
        let samples = [SampleLabel::Test, SampleLabel::Test];
        let cards = MetricsEvaluator::default()
            .evaluate_by_sample(&values.view(), &values.view(), &weights.view(), &samples, 1.0, "m")
            .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].model_label, "m (test)");
    }

    #[test]
    fn test_evaluate_by_sample_length_mismatch() {
        let values = Array1::from_vec(vec![1.0, 2.0]);
        let weights = Array1::from_elem(2, 1.0);
        let samples = [SampleLabel::Train];
        assert!(MetricsEvaluator::default()
            .evaluate_by_sample(&values.view(), &values.view(), &weights.view(), &samples, 1.0, "m")
            .is_err());
    }
}
