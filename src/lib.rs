//! # claims-metrics
//!
//! Model-evaluation tooling for regression models trained on
//! insurance-claims-style data: non-negative, right-skewed targets (claim
//! frequency and severity) observed under per-row exposure weights.
//!
//! ## Features
//!
//! - **Scorecards**: weighted bias, weighted MSE and MAE, weighted mean
//!   Tweedie deviance and the Gini coefficient of the prediction ranking,
//!   collected into one [`Scorecard`].
//! - **Exact Tweedie branches**: normal, Poisson and gamma deviances are
//!   computed in closed form rather than as limits of the general formula.
//! - **Sample splits**: a deterministic MD5 hash split that matches Python's
//!   `hashlib`, and a seeded group-aware shuffle split.
//! - **Winsorizing**: per-column quantile clipping with an explicit
//!   fit/transform lifecycle.
//! - **Parallel Processing**: per-sample scorecards and per-column quantiles
//!   are computed with Rayon.
//!
//! ## Quick Start
//!
//! ```rust
//! use claims_metrics::{HashSplitter, MetricsEvaluator, SampleSplit};
//! use ndarray::Array1;
//!
//! # fn main() -> claims_metrics::Result<()> {
//! let ids: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
//! let predictions = Array1::from_vec(vec![0.2, 0.4, 0.1, 0.9, 0.5, 0.3, 0.7, 0.6, 0.2, 0.8]);
//! let actuals = Array1::from_vec(vec![0.0, 1.0, 0.0, 2.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
//! let exposure = Array1::from_elem(10, 1.0);
//!
//! let samples = HashSplitter::new(0.8)?.split(&ids)?;
//! let scorecards = MetricsEvaluator::default().evaluate_by_sample(
//!     &predictions.view(),
//!     &actuals.view(),
//!     &exposure.view(),
//!     &samples,
//!     1.5,
//!     "GLM",
//! )?;
//!
//! for scorecard in &scorecards {
//!     println!("{}", scorecard);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error type, type aliases, constants, the [`Transformer`] trait
//!   and logging setup
//! - [`config`]: library defaults loaded from JSON/TOML files and
//!   `CLAIMS_METRICS_*` environment variables
//! - [`metrics`]: weighted statistics, Tweedie deviance, Gini coefficient and
//!   the scorecard evaluator
//! - [`dataset`]: sample splitters and the winsorizer

#![doc(html_root_url = "https://docs.rs/claims-metrics/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Metrics evaluation module
pub mod metrics;

// Splitting and preprocessing module
pub mod dataset;

// Re-export core functionality for convenience
pub use self::core::{
    constants::*,
    error::{MetricsError, Result},
    traits::*,
    types::*,
};

// Re-export configuration functionality
pub use self::config::{Config, ConfigBuilder};

// Re-export metrics functionality
#[cfg(feature = "csv")]
pub use self::metrics::write_csv;
pub use self::metrics::{
    evaluate_predictions, gini_coefficient, lorenz_curve, mean_tweedie_deviance, LorenzCurve,
    MetricsEvaluator, Scorecard, TweedieDistribution,
};

// Re-export dataset functionality
pub use self::dataset::{
    combine_id_columns, combine_id_columns_with_config, hash_bucket, GroupShuffleSplitter, HashSplitter, SampleSplit, Winsorizer,
};

// Version information
pub use self::core::constants::CLAIMS_METRICS_VERSION as VERSION;

/// Initialize the library.
///
/// Installs the `env_logger` backend for the `log` facade, honouring
/// `RUST_LOG` and defaulting to `info`. Calling it more than once, or after
/// the application installed its own logger, is harmless.
///
/// # Examples
///
/// ```rust
/// claims_metrics::init();
/// assert!(claims_metrics::is_initialized());
/// ```
pub fn init() {
    self::core::initialize_logging()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    self::core::is_logging_initialized()
}
