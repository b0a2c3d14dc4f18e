//! Evaluation metrics for claims models.
//!
//! A [`Scorecard`] combines complementary views of model fit:
//!
//! - calibration: weighted bias, weighted MSE and MAE ([`weighted`]),
//! - distributional fit: weighted mean Tweedie deviance ([`deviance`]),
//! - discrimination: the Gini coefficient of the prediction ranking ([`gini`]).
//!
//! # Examples
//!
//! ```rust
//! use claims_metrics::metrics::evaluate_predictions;
//! use ndarray::Array1;
//!
//! # fn main() -> claims_metrics::Result<()> {
//! let predictions = Array1::from_vec(vec![0.1, 0.4, 0.35, 0.8]);
//! let actuals = Array1::from_vec(vec![0.0, 1.0, 0.0, 3.0]);
//! let exposure = Array1::from_vec(vec![1.0, 2.0, 1.0, 1.0]);
//!
//! let scorecard = evaluate_predictions(
//!     &predictions.view(),
//!     &actuals.view(),
//!     &exposure.view(),
//!     1.5,
//!     "GLM",
//! )?;
//! println!("{}", scorecard);
//! assert!((scorecard.gini - 0.4).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

pub mod deviance;
pub mod evaluator;
pub mod gini;
pub mod scorecard;
pub mod weighted;

pub use deviance::{mean_tweedie_deviance, validate_power, TweedieDistribution};
pub use evaluator::{evaluate_predictions, MetricsEvaluator};
pub use gini::{gini_coefficient, lorenz_curve, ranking_order, LorenzCurve};
#[cfg(feature = "csv")]
pub use scorecard::write_csv;
pub use scorecard::Scorecard;
pub use weighted::{
    validate_observations, weighted_average, weighted_bias, weighted_mean_absolute_error,
    weighted_mean_squared_error,
};
