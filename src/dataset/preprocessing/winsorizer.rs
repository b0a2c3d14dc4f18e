//! Quantile clipping of feature columns.

use crate::config::Config;
use crate::core::constants::*;
use crate::core::error::{MetricsError, Result};
use crate::core::traits::Transformer;
use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Per-column bounds learned by [`Winsorizer::fit`].
#[derive(Debug, Clone, PartialEq)]
struct FittedBounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

/// Clips each column into its `[lower_quantile, upper_quantile]` range.
///
/// Bounds are computed on the data passed to `fit` and reused unchanged by
/// every later `transform`, so the same clipping learned on training data
/// can be applied to a test sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Winsorizer {
    lower_quantile: f64,
    upper_quantile: f64,
    bounds: Option<FittedBounds>,
}

impl Winsorizer {
    /// Create an unfitted winsorizer.
    pub fn new(lower_quantile: f64, upper_quantile: f64) -> Result<Self> {
        for (name, q) in [
            ("lower_quantile", lower_quantile),
            ("upper_quantile", upper_quantile),
        ] {
            if !(0.0..=1.0).contains(&q) {
                return Err(MetricsError::invalid_input(format!(
                    "{} = {} must be in range [0.0, 1.0]",
                    name, q
                )));
            }
        }
        crate::ensure!(
            lower_quantile <= upper_quantile,
            crate::invalid_input!(
                "lower_quantile {} exceeds upper_quantile {}",
                lower_quantile,
                upper_quantile
            )
        );
        Ok(Self {
            lower_quantile,
            upper_quantile,
            bounds: None,
        })
    }

    /// Create an unfitted winsorizer with the configured quantiles.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.winsor_lower_quantile, config.winsor_upper_quantile)
    }

    /// Configured `(lower, upper)` quantile levels.
    pub fn quantile_levels(&self) -> (f64, f64) {
        (self.lower_quantile, self.upper_quantile)
    }

    /// Fitted lower bound per column.
    pub fn lower_quantiles(&self) -> Option<&Array1<f64>> {
        self.bounds.as_ref().map(|b| &b.lower)
    }

    /// Fitted upper bound per column.
    pub fn upper_quantiles(&self) -> Option<&Array1<f64>> {
        self.bounds.as_ref().map(|b| &b.upper)
    }

    /// Fit on a single column.
    pub fn fit_1d(&mut self, x: &ArrayView1<'_, f64>) -> Result<&mut Self> {
        self.fit(&x.view().insert_axis(Axis(1)))
    }

    /// Transform a single column with bounds fitted by [`Winsorizer::fit_1d`].
    pub fn transform_1d(&self, x: &ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        Ok(self
            .transform(&x.view().insert_axis(Axis(1)))?
            .remove_axis(Axis(1)))
    }
}

impl Default for Winsorizer {
    fn default() -> Self {
        Self {
            lower_quantile: DEFAULT_WINSOR_LOWER_QUANTILE,
            upper_quantile: DEFAULT_WINSOR_UPPER_QUANTILE,
            bounds: None,
        }
    }
}

/// Quantile of sorted values with linear interpolation between order
/// statistics at position `q * (n - 1)`.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * fraction
}

fn column_bounds(column: ArrayView1<'_, f64>, lower: f64, upper: f64) -> Result<(f64, f64)> {
    if let Some(bad) = column.iter().find(|v| !v.is_finite()) {
        return Err(MetricsError::invalid_input(format!(
            "cannot fit quantiles on non-finite value {}",
            bad
        )));
    }
    let mut sorted = column.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok((quantile_sorted(&sorted, lower), quantile_sorted(&sorted, upper)))
}

impl Transformer for Winsorizer {
    fn fit(&mut self, x: &ArrayView2<'_, f64>) -> Result<&mut Self> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(MetricsError::invalid_input(format!(
                "cannot fit quantiles on an empty {}x{} matrix",
                x.nrows(),
                x.ncols()
            )));
        }

        let (lower_q, upper_q) = (self.lower_quantile, self.upper_quantile);
        let bounds: Vec<(f64, f64)> = x
            .axis_iter(Axis(1))
            .into_par_iter()
            .map(|column| column_bounds(column, lower_q, upper_q))
            .collect::<Result<Vec<_>>>()?;

        let (lower, upper): (Vec<f64>, Vec<f64>) = bounds.into_iter().unzip();
        log::info!(
            "Fitted winsorizer on {} rows x {} columns (quantiles {}..{})",
            x.nrows(),
            x.ncols(),
            lower_q,
            upper_q
        );
        self.bounds = Some(FittedBounds {
            lower: Array1::from_vec(lower),
            upper: Array1::from_vec(upper),
        });
        Ok(self)
    }

    fn transform(&self, x: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let bounds = self
            .bounds
            .as_ref()
            .ok_or_else(|| MetricsError::not_fitted("Winsorizer"))?;
        if x.ncols() != bounds.lower.len() {
            return Err(MetricsError::invalid_input(format!(
                "expected {} columns, got {}",
                bounds.lower.len(),
                x.ncols()
            )));
        }

        let mut clipped = x.to_owned();
        for ((mut column, &lo), &hi) in clipped
            .axis_iter_mut(Axis(1))
            .zip(bounds.lower.iter())
            .zip(bounds.upper.iter())
        {
            // NaN passes through unchanged.
            column.mapv_inplace(|v| if v.is_nan() { v } else { v.max(lo).min(hi) });
        }
        Ok(clipped)
    }

    fn is_fitted(&self) -> bool {
        self.bounds.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_default_quantiles_on_range() {
        let x = Array1::range(1.0, 11.0, 1.0);
        let mut winsorizer = Winsorizer::default();
        winsorizer.fit_1d(&x.view()).unwrap();

        assert_abs_diff_eq!(winsorizer.lower_quantiles().unwrap()[0], 1.45, epsilon = 1e-12);
        assert_abs_diff_eq!(winsorizer.upper_quantiles().unwrap()[0], 9.55, epsilon = 1e-12);

        let clipped = winsorizer.transform_1d(&x.view()).unwrap();
        assert_abs_diff_eq!(clipped[0], 1.45, epsilon = 1e-12);
        assert_eq!(clipped[4], 5.0);
        assert_abs_diff_eq!(clipped[9], 9.55, epsilon = 1e-12);
    }

    #[test]
    fn test_per_column_bounds() {
        let x = array![
            [1.0, 10.0],
            [2.0, 20.0],
            [3.0, 30.0],
            [4.0, 40.0],
            [100.0, -50.0]
        ];
        let mut winsorizer = Winsorizer::new(0.25, 0.75).unwrap();
        let clipped = winsorizer.fit_transform(&x.view()).unwrap();

        assert_eq!(winsorizer.lower_quantiles().unwrap().to_vec(), vec![2.0, 10.0]);
        assert_eq!(winsorizer.upper_quantiles().unwrap().to_vec(), vec![4.0, 30.0]);
        assert_eq!(clipped.column(0).to_vec(), vec![2.0, 2.0, 3.0, 4.0, 4.0]);
        assert_eq!(clipped.column(1).to_vec(), vec![10.0, 20.0, 30.0, 30.0, 10.0]);
    }

    #[test]
    fn test_median_interpolates() {
        let x = Array1::range(1.0, 11.0, 1.0);
        let mut winsorizer = Winsorizer::new(0.5, 0.5).unwrap();
        winsorizer.fit_1d(&x.view()).unwrap();
        assert_abs_diff_eq!(winsorizer.lower_quantiles().unwrap()[0], 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_before_fit() {
        let winsorizer = Winsorizer::default();
        assert!(!winsorizer.is_fitted());
        assert!(winsorizer.lower_quantiles().is_none());
        let err = winsorizer.transform(&array![[1.0]].view()).unwrap_err();
        assert!(matches!(err, MetricsError::NotFitted { .. }));
    }

    #[test]
    fn test_column_count_mismatch() {
        let mut winsorizer = Winsorizer::default();
        winsorizer.fit(&array![[1.0, 2.0], [3.0, 4.0]].view()).unwrap();
        assert!(winsorizer.transform(&array![[1.0], [2.0]].view()).is_err());
    }

    #[test]
    fn test_fitted_bounds_apply_to_new_data() {
        let mut winsorizer = Winsorizer::new(0.0, 1.0).unwrap();
        winsorizer.fit_1d(&array![0.0, 5.0, 10.0].view()).unwrap();
        let clipped = winsorizer.transform_1d(&array![-3.0, 7.0, 42.0].view()).unwrap();
        assert_eq!(clipped.to_vec(), vec![0.0, 7.0, 10.0]);
    }

    #[test]
    fn test_invalid_quantiles() {
        assert!(Winsorizer::new(-0.1, 0.9).is_err());
        assert!(Winsorizer::new(0.1, 1.1).is_err());
        assert!(Winsorizer::new(0.9, 0.1).is_err());
        assert!(Winsorizer::new(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_fit_rejects_bad_data() {
        let mut winsorizer = Winsorizer::default();
        assert!(winsorizer.fit(&Array2::<f64>::zeros((0, 2)).view()).is_err());
        assert!(winsorizer.fit(&array![[1.0], [f64::NAN]].view()).is_err());
        assert!(!winsorizer.is_fitted());
    }
}
