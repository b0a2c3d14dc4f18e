//! Train/test sample splits keyed on row identifiers.
//!
//! Two strategies are provided:
//!
//! - [`HashSplitter`] buckets each identifier by its MD5 digest. The same
//!   identifier always lands in the same sample, across runs, machines and
//!   languages (the bucket equals Python's `int(hashlib.md5(id).hexdigest(), 16) % 100`).
//! - [`GroupShuffleSplitter`] shuffles the distinct identifiers with a seeded
//!   RNG and assigns whole groups. It is reproducible only for the same seed
//!   and RNG implementation.

use crate::config::Config;
use crate::core::constants::*;
use crate::core::error::{MetricsError, Result};
use crate::core::types::SampleLabel;
use md5::{Digest, Md5};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// Assigns every row a [`SampleLabel`] from its identifier.
pub trait SampleSplit {
    /// Fraction of rows (or groups) targeted for the training sample.
    fn training_frac(&self) -> f64;

    /// Label each identifier; the output has the same length as `ids`.
    fn split<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<SampleLabel>>;
}

fn validate_training_frac(training_frac: f64) -> Result<()> {
    if training_frac > 0.0 && training_frac < 1.0 {
        Ok(())
    } else {
        Err(MetricsError::invalid_input(format!(
            "training_frac = {} must be in range (0.0, 1.0)",
            training_frac
        )))
    }
}

/// Join several identifier columns row-wise into one identifier per row.
pub fn combine_id_columns<S: AsRef<str>>(columns: &[&[S]], separator: &str) -> Result<Vec<String>> {
    let first = columns
        .first()
        .ok_or_else(|| MetricsError::invalid_input("at least one identifier column is required"))?;

    for (index, column) in columns.iter().enumerate().skip(1) {
        if column.len() != first.len() {
            return Err(MetricsError::invalid_input(format!(
                "identifier column {} has {} rows, expected {}",
                index,
                column.len(),
                first.len()
            )));
        }
    }

    Ok((0..first.len())
        .map(|row| {
            columns
                .iter()
                .map(|column| column[row].as_ref())
                .collect::<Vec<_>>()
                .join(separator)
        })
        .collect())
}

/// [`combine_id_columns`] with the configured separator.
pub fn combine_id_columns_with_config<S: AsRef<str>>(
    columns: &[&[S]],
    config: &Config,
) -> Result<Vec<String>> {
    combine_id_columns(columns, &config.id_separator)
}

/// Hash bucket in `0..100` of an identifier.
pub fn hash_bucket(id: &str) -> u8 {
    let digest = Md5::digest(id.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(digest.as_slice());
    (u128::from_be_bytes(bytes) % HASH_BUCKETS) as u8
}

/// Deterministic split by MD5 hash bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashSplitter {
    training_frac: f64,
}

impl HashSplitter {
    /// Create a splitter; `training_frac` must be in (0, 1).
    pub fn new(training_frac: f64) -> Result<Self> {
        validate_training_frac(training_frac)?;
        let splitter = Self { training_frac };
        if splitter.threshold() == 0 {
            log::warn!(
                "training_frac {} rounds to zero hash buckets; every row will be test",
                training_frac
            );
        }
        Ok(splitter)
    }

    /// Create a splitter with the configured training fraction.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.training_frac)
    }

    /// Buckets strictly below this value are assigned to training.
    pub fn threshold(&self) -> u8 {
        (self.training_frac * HASH_BUCKETS as f64) as u8
    }

    /// Label of a single identifier.
    pub fn label(&self, id: &str) -> SampleLabel {
        if hash_bucket(id) < self.threshold() {
            SampleLabel::Train
        } else {
            SampleLabel::Test
        }
    }
}

impl Default for HashSplitter {
    fn default() -> Self {
        Self {
            training_frac: DEFAULT_TRAINING_FRAC,
        }
    }
}

impl SampleSplit for HashSplitter {
    fn training_frac(&self) -> f64 {
        self.training_frac
    }

    fn split<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<SampleLabel>> {
        if ids.is_empty() {
            return Err(MetricsError::invalid_input("no identifiers to split"));
        }
        let labels: Vec<SampleLabel> = ids.iter().map(|id| self.label(id.as_ref())).collect();
        log_split_summary("hash", &labels);
        Ok(labels)
    }
}

/// Randomized split that keeps every row of an identifier in one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupShuffleSplitter {
    training_frac: f64,
    seed: u64,
}

impl GroupShuffleSplitter {
    /// Create a splitter; `training_frac` must be in (0, 1).
    pub fn new(training_frac: f64, seed: u64) -> Result<Self> {
        validate_training_frac(training_frac)?;
        Ok(Self {
            training_frac,
            seed,
        })
    }

    /// Create a splitter with the configured training fraction and seed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.training_frac, config.split_seed)
    }

    /// RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of groups assigned to the test sample out of `num_groups`.
    pub fn num_test_groups(&self, num_groups: usize) -> usize {
        ((1.0 - self.training_frac) * num_groups as f64).ceil() as usize
    }
}

impl Default for GroupShuffleSplitter {
    fn default() -> Self {
        Self {
            training_frac: DEFAULT_TRAINING_FRAC,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl SampleSplit for GroupShuffleSplitter {
    fn training_frac(&self) -> f64 {
        self.training_frac
    }

    fn split<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<SampleLabel>> {
        if ids.is_empty() {
            return Err(MetricsError::invalid_input("no identifiers to split"));
        }

        // Group index per row, groups numbered in order of first appearance.
        let mut group_of: HashMap<&str, usize> = HashMap::new();
        let row_groups: Vec<usize> = ids
            .iter()
            .map(|id| {
                let next = group_of.len();
                *group_of.entry(id.as_ref()).or_insert(next)
            })
            .collect();
        let num_groups = group_of.len();

        let num_test = self.num_test_groups(num_groups);
        crate::ensure!(
            num_test < num_groups,
            crate::invalid_input!(
                "training_frac = {} leaves no training groups out of {}",
                self.training_frac,
                num_groups
            )
        );

        let mut order: Vec<usize> = (0..num_groups).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        order.shuffle(&mut rng);

        let mut group_labels = vec![SampleLabel::Train; num_groups];
        for &group in order.iter().take(num_test) {
            group_labels[group] = SampleLabel::Test;
        }

        let labels: Vec<SampleLabel> = row_groups.iter().map(|&g| group_labels[g]).collect();
        log_split_summary("group shuffle", &labels);
        Ok(labels)
    }
}

fn log_split_summary(strategy: &str, labels: &[SampleLabel]) {
    let train = labels.iter().filter(|l| l.is_train()).count();
    log::info!(
        "{} split: {} train rows, {} test rows",
        strategy,
        train,
        labels.len() - train
    );
}
