//! Core trait definitions for claims-metrics.

use crate::core::error::Result;
use ndarray::{Array2, ArrayView2};

/// A fit/transform component over numeric feature matrices.
///
/// Implementors carry an explicit fitted state: [`Transformer::transform`]
/// must fail with [`crate::MetricsError::NotFitted`] until
/// [`Transformer::fit`] has succeeded.
pub trait Transformer {
    /// Learn the transformation parameters from `x` (rows are observations).
    fn fit(&mut self, x: &ArrayView2<'_, f64>) -> Result<&mut Self>
    where
        Self: Sized;

    /// Apply the fitted transformation, returning a new matrix.
    fn transform(&self, x: &ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// Whether `fit` has been called successfully.
    fn is_fitted(&self) -> bool;

    /// Fit on `x` and transform it in one step.
    fn fit_transform(&mut self, x: &ArrayView2<'_, f64>) -> Result<Array2<f64>>
    where
        Self: Sized,
    {
        self.fit(x)?;
        self.transform(x)
    }
}
