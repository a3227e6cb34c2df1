use thiserror::Error;

use super::model::{AssayDataset, SmoothedCurve};

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Minimum number of data points for a cubic fit.
pub const MIN_POINTS: usize = 4;

/// Number of evaluation points on the smoothed curve.
pub const CURVE_POINTS: usize = 300;

/// Failures when fitting the smoothing spline. Unsorted or duplicated
/// independent values are rejected rather than silently reordered.
#[derive(Debug, Error, PartialEq)]
pub enum SmoothError {
    #[error("x has {x_len} values but y has {y_len}")]
    MismatchedLengths { x_len: usize, y_len: usize },

    #[error("need at least {min} data points for a cubic fit, got {got}")]
    TooFewPoints { got: usize, min: usize },

    #[error("independent values must be strictly increasing (row {index})")]
    NotStrictlyIncreasing { index: usize },

    #[error("non-finite value in row {index}")]
    NonFinite { index: usize },
}

// ---------------------------------------------------------------------------
// Natural cubic spline
// ---------------------------------------------------------------------------

/// A natural cubic spline interpolator.
///
/// Given n knots (x_i, y_i) with strictly increasing x, builds piecewise
/// cubic polynomials with continuous first and second derivatives (second
/// derivative zero at both ends).
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot, from the tridiagonal solve.
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through the given knots.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<CubicSpline, SmoothError> {
        let n = xs.len();
        if n != ys.len() {
            return Err(SmoothError::MismatchedLengths {
                x_len: n,
                y_len: ys.len(),
            });
        }
        if n < MIN_POINTS {
            return Err(SmoothError::TooFewPoints {
                got: n,
                min: MIN_POINTS,
            });
        }
        for i in 0..n {
            if !xs[i].is_finite() || !ys[i].is_finite() {
                return Err(SmoothError::NonFinite { index: i });
            }
            if i > 0 && xs[i] <= xs[i - 1] {
                return Err(SmoothError::NotStrictlyIncreasing { index: i });
            }
        }

        let mut y2s = vec![0.0; n];
        let mut u = vec![0.0; n - 1];

        // Forward sweep of the tridiagonal system.
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // Back substitution.
        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        Ok(CubicSpline {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            y2s,
        })
    }

    /// Evaluate the spline at `x`. Values outside the knot range use the
    /// boundary polynomial.
    pub fn value_at(&self, x: f64) -> f64 {
        let n = self.xs.len();

        // Binary search for the enclosing interval.
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }
}

// ---------------------------------------------------------------------------
// Dense evaluation
// ---------------------------------------------------------------------------

/// Fit a spline over the dataset and evaluate it at [`CURVE_POINTS`]
/// uniformly spaced x values spanning the observed range inclusive.
pub fn smooth_curve(dataset: &AssayDataset) -> Result<SmoothedCurve, SmoothError> {
    let spline = CubicSpline::fit(&dataset.x, &dataset.y)?;

    // fit() guarantees strictly increasing x, so min/max are the endpoints.
    let lo = dataset.x[0];
    let hi = dataset.x[dataset.x.len() - 1];
    let step = (hi - lo) / (CURVE_POINTS - 1) as f64;

    let x: Vec<f64> = (0..CURVE_POINTS)
        .map(|i| {
            if i == CURVE_POINTS - 1 {
                hi // inclusive endpoint
            } else {
                lo + step * i as f64
            }
        })
        .collect();
    let y: Vec<f64> = x.iter().map(|&xi| spline.value_at(xi)).collect();

    Ok(SmoothedCurve { x, y })
}
