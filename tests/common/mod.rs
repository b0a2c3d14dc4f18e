//! Common test utilities for claims-metrics integration tests.

#![allow(dead_code)]

use claims_metrics::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Create positive expected claim frequencies
pub fn create_test_predictions(num_samples: usize) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    Array1::from_iter((0..num_samples).map(|_| rng.gen_range(0.05..2.0)))
}

/// Create exposure weights in policy-years
pub fn create_test_exposure(num_samples: usize) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(789);
    Array1::from_iter((0..num_samples).map(|_| rng.gen_range(0.1..1.0)))
}

/// Draw a Poisson count by inverting the CDF
fn poisson_draw(rng: &mut StdRng, mean: f64) -> f64 {
    let u: f64 = rng.gen();
    let mut k = 0u32;
    let mut probability = (-mean).exp();
    let mut cumulative = probability;
    while u > cumulative && k < 1_000 {
        k += 1;
        probability *= mean / k as f64;
        cumulative += probability;
    }
    k as f64
}

/// Create observed claim counts around the given frequencies
pub fn create_test_claim_counts(predictions: &Array1<f64>, exposure: &Array1<f64>) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(123);
    predictions
        .iter()
        .zip(exposure.iter())
        .map(|(&mu, &e)| poisson_draw(&mut rng, mu * e))
        .collect()
}

/// Create observed claim frequencies, claim counts divided by exposure
pub fn create_test_claim_frequencies(
    predictions: &Array1<f64>,
    exposure: &Array1<f64>,
) -> Array1<f64> {
    create_test_claim_counts(predictions, exposure) / exposure
}

/// Create policy identifiers, `rows_per_policy` consecutive rows each
pub fn create_test_policy_ids(num_samples: usize, rows_per_policy: usize) -> Vec<String> {
    (0..num_samples)
        .map(|i| format!("policy{}", i / rows_per_policy.max(1)))
        .collect()
}

/// Create test features with outliers
pub fn create_test_features_with_outliers(
    num_samples: usize,
    num_features: usize,
    outlier_rate: f64,
) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(333);
    let mut features = Array2::zeros((num_samples, num_features));

    for i in 0..num_samples {
        for j in 0..num_features {
            if rng.gen::<f64>() < outlier_rate {
                features[[i, j]] = if rng.gen::<bool>() { 100.0 } else { -100.0 };
            } else {
                features[[i, j]] = rng.gen_range(-5.0..5.0);
            }
        }
    }

    features
}

/// Write a configuration file into `dir`
pub fn create_test_config_file<P: AsRef<Path>>(dir: P, name: &str, contents: &str) -> PathBuf {
    let path = dir.as_ref().join(name);
    fs::write(&path, contents).expect("failed to write test config");
    path
}

/// Assert every metric of a scorecard is finite
pub fn assert_scorecard_finite(scorecard: &Scorecard) {
    for (name, value) in scorecard.rows().iter() {
        assert!(value.is_finite(), "{} is not finite: {}", name, value);
    }
}

/// Macro for creating claims data more easily
#[macro_export]
macro_rules! create_claims_data {
    ($samples:expr) => {{
        let predictions = common::create_test_predictions($samples);
        let exposure = common::create_test_exposure($samples);
        let actuals = common::create_test_claim_frequencies(&predictions, &exposure);
        (predictions, actuals, exposure)
    }};
}
