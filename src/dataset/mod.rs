//! Dataset utilities: train/test sample splits and feature preprocessing.
//!
//! Splitters label rows by identifier so that
//! [`MetricsEvaluator::evaluate_by_sample`](crate::metrics::MetricsEvaluator::evaluate_by_sample)
//! can score each sample separately.

pub mod preprocessing;
pub mod split;

// Re-export commonly used types
pub use preprocessing::Winsorizer;
pub use split::{
    combine_id_columns, combine_id_columns_with_config, hash_bucket, GroupShuffleSplitter, HashSplitter, SampleSplit,
};
