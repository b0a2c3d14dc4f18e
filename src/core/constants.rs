//! Constants and configuration defaults for claims-metrics.

/// Default Tweedie power, a compound Poisson-Gamma between frequency and severity.
pub const DEFAULT_TWEEDIE_POWER: f64 = 1.5;

/// Number of decimals used when rendering scorecards.
pub const DEFAULT_DISPLAY_PRECISION: usize = 3;

/// Default fraction of rows assigned to the training sample.
pub const DEFAULT_TRAINING_FRAC: f64 = 0.8;

/// Default seed for the group-aware random split.
pub const DEFAULT_SPLIT_SEED: u64 = 99;

/// Separator used when joining several identifier columns into one id.
pub const DEFAULT_ID_SEPARATOR: &str = "_";

/// Number of hash buckets for the deterministic split.
/// Bucket `b` goes to training when `b < trunc(training_frac * HASH_BUCKETS)`.
pub const HASH_BUCKETS: u128 = 100;

/// Default lower quantile for winsorization.
pub const DEFAULT_WINSOR_LOWER_QUANTILE: f64 = 0.05;

/// Default upper quantile for winsorization.
pub const DEFAULT_WINSOR_UPPER_QUANTILE: f64 = 0.95;

/// Prefix of environment variables read by [`crate::config::Config::load_from_environment`].
pub const ENV_PREFIX: &str = "CLAIMS_METRICS_";

/// Library version.
pub const CLAIMS_METRICS_VERSION: &str = env!("CARGO_PKG_VERSION");
