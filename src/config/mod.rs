//! Configuration management for claims-metrics.
//!
//! A single [`Config`] carries the default Tweedie power, display precision,
//! split parameters and winsorization quantiles. It can be built in code,
//! loaded from JSON or TOML, and overridden from `CLAIMS_METRICS_*`
//! environment variables.

pub mod core;

pub use self::core::{Config, ConfigBuilder};
