//! The scorecard value object and its presentation.

use crate::core::constants::DEFAULT_DISPLAY_PRECISION;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fit metrics of one model on one set of observations.
///
/// Fields hold full precision; rounding happens only when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Free-text model label used in captions
    pub model_label: String,
    /// Tweedie power used for the deviance
    pub tweedie_power: f64,
    /// Number of observations scored
    pub sample_size: usize,
    /// Weighted mean prediction minus weighted mean actual
    pub bias: f64,
    /// Weighted mean squared error
    pub weighted_mse: f64,
    /// Weighted mean absolute error
    pub weighted_mae: f64,
    /// Weighted mean Tweedie deviance
    pub deviance: f64,
    /// Gini coefficient of the prediction ranking
    pub gini: f64,
}

impl Scorecard {
    /// Caption shown above the rendered table.
    pub fn caption(&self) -> String {
        format!("Model Evaluation Metrics {}", self.model_label)
    }

    /// Metric names and values in display order.
    pub fn rows(&self) -> [(String, f64); 5] {
        [
            ("Bias".to_string(), self.bias),
            ("Weighted Mean Squared Error".to_string(), self.weighted_mse),
            ("Weighted Mean Absolute Error".to_string(), self.weighted_mae),
            (format!("Deviance (Tweedie p={:?})", self.tweedie_power), self.deviance),
            ("Gini coefficient".to_string(), self.gini),
        ]
    }

    /// Gini rounded to `digits` decimals, as reported in tables.
    pub fn gini_rounded(&self, digits: u32) -> f64 {
        let scale = 10f64.powi(digits as i32);
        (self.gini * scale).round() / scale
    }

    /// Render the captioned table with `precision` decimals.
    pub fn render(&self, precision: usize) -> String {
        let rows = self.rows();
        let name_width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        let mut out = String::new();
        out.push_str(&self.caption());
        out.push('\n');
        for (name, value) in rows.iter() {
            out.push_str(&format!(
                "  {:<width$}  {:.prec$}\n",
                name,
                value,
                width = name_width,
                prec = precision
            ));
        }
        out
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_DISPLAY_PRECISION))
    }
}

/// Write scorecards as CSV, one row per scorecard with a header line.
#[cfg(feature = "csv")]
pub fn write_csv<W: std::io::Write>(scorecards: &[Scorecard], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for scorecard in scorecards {
        csv_writer.serialize(scorecard)?;
    }
    csv_writer.flush()?;
    Ok(())
}
