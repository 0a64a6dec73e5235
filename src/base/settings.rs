use super::DamageError;
use serde::{Deserialize, Serialize};

/// Holds the parameters of the Newton solver driving the implicit damage update
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Absolute tolerance on the residual 2-norm
    pub tol: f64,

    /// Maximum number of Newton iterations
    pub miter: usize,

    /// Prints the residual norm and the Jacobian check at each iteration
    pub verbose: bool,

    /// Also accepts a residual norm reduced by `tol` relative to the first one
    pub relative: bool,
}

impl SolverSettings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        SolverSettings {
            tol: 1e-8,
            miter: 50,
            verbose: false,
            relative: false,
        }
    }

    /// Sets the tolerance
    pub fn set_tol(&mut self, value: f64) -> Result<&mut Self, DamageError> {
        if value <= 0.0 {
            return Err(DamageError::config("tol must be > 0.0"));
        }
        self.tol = value;
        Ok(self)
    }

    /// Sets the maximum number of iterations
    pub fn set_miter(&mut self, value: usize) -> Result<&mut Self, DamageError> {
        if value < 1 {
            return Err(DamageError::config("miter must be ≥ 1"));
        }
        self.miter = value;
        Ok(self)
    }

    /// Enables or disables the per-iteration messages
    pub fn set_verbose(&mut self, flag: bool) -> &mut Self {
        self.verbose = flag;
        self
    }

    /// Validates all values
    pub fn validate(&self) -> Result<(), DamageError> {
        if !(self.tol > 0.0) {
            return Err(DamageError::config("tol must be > 0.0"));
        }
        if self.miter < 1 {
            return Err(DamageError::config("miter must be ≥ 1"));
        }
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
