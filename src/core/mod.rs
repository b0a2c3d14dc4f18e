//! Core infrastructure module for claims-metrics.
//!
//! - [`types`]: numeric aliases and the [`SampleLabel`] enum
//! - [`constants`]: configuration defaults
//! - [`error`]: the [`MetricsError`] type
//! - [`traits`]: the [`Transformer`] fit/transform abstraction

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{MetricsError, Result};
pub use traits::*;
pub use types::*;

use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Initialize the logging subsystem.
///
/// Defaults `RUST_LOG` to `info` when unset and ignores an already
/// installed logger, so it is safe to call more than once.
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        let _ = env_logger::Builder::from_env(env).try_init();
        log::debug!("claims-metrics {} logging initialized", CLAIMS_METRICS_VERSION);
    });
}

/// Check if [`initialize_logging`] has run.
pub fn is_logging_initialized() -> bool {
    LOGGING_INIT.is_completed()
}
