use super::DamageError;
use serde::{Deserialize, Serialize};

/// Defines a (temperature-dependent) material constant
///
/// All damage-law coefficients and elastic moduli are given as an `Interpolate`
/// so that they may vary with temperature. A bare number becomes [Interpolate::Constant].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Interpolate {
    /// Returns the same value for any temperature
    Constant(f64),

    /// Linear interpolation of a table; the end values are kept outside the table
    PiecewiseLinear { points: Vec<f64>, values: Vec<f64> },

    /// Polynomial with coefficients sorted from the highest degree to the constant term
    Polynomial { coefficients: Vec<f64> },
}

impl Interpolate {
    /// Validates the interpolation data
    pub fn validate(&self) -> Result<(), DamageError> {
        match self {
            Interpolate::Constant(v) => {
                if !v.is_finite() {
                    return Err(DamageError::config("constant value must be finite"));
                }
            }
            Interpolate::PiecewiseLinear { points, values } => {
                if points.len() < 2 {
                    return Err(DamageError::config("piecewise-linear table requires at least two points"));
                }
                if points.len() != values.len() {
                    return Err(DamageError::config("piecewise-linear points and values must have the same length"));
                }
                if points.windows(2).any(|w| w[1] <= w[0]) {
                    return Err(DamageError::config("piecewise-linear points must be strictly increasing"));
                }
            }
            Interpolate::Polynomial { coefficients } => {
                if coefficients.is_empty() {
                    return Err(DamageError::config("polynomial requires at least one coefficient"));
                }
            }
        }
        Ok(())
    }

    /// Calculates the value at x (e.g., temperature)
    ///
    /// A NaN x gives NaN for tables and polynomials.
    pub fn value(&self, x: f64) -> f64 {
        match self {
            Interpolate::Constant(v) => *v,
            Interpolate::PiecewiseLinear { points, values } => {
                let n = points.len();
                if x.is_nan() {
                    return f64::NAN;
                }
                if x <= points[0] {
                    return values[0];
                }
                if x >= points[n - 1] {
                    return values[n - 1];
                }
                let k = points.partition_point(|p| *p <= x); // points[k-1] ≤ x < points[k]
                let (x0, x1) = (points[k - 1], points[k]);
                let (y0, y1) = (values[k - 1], values[k]);
                y0 + (y1 - y0) * (x - x0) / (x1 - x0)
            }
            Interpolate::Polynomial { coefficients } => coefficients.iter().fold(0.0, |acc, c| acc * x + c),
        }
    }
}

impl From<f64> for Interpolate {
    fn from(value: f64) -> Self {
        Interpolate::Constant(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
