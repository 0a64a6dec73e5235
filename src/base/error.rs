use crate::StrError;
use thiserror::Error;

/// Defines the errors reported by damage models and their collaborators
///
/// Only [DamageError::Convergence] is expected to be handled routinely (e.g., by
/// sub-stepping); the other kinds indicate a defect in the input or configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DamageError {
    /// A damage law was evaluated outside its valid domain
    #[error("{quantity} = {value:?} is outside the valid domain")]
    Domain { quantity: &'static str, value: f64 },

    /// The implicit update did not converge within the maximum number of iterations
    #[error("Newton solver did not converge after {iterations} iterations (|R| = {residual:e})")]
    Convergence { iterations: usize, residual: f64 },

    /// The parameters are inconsistent or incomplete
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A tensor or vector has the wrong number of components
    #[error("expected {expected} components but found {found}")]
    Dimension { expected: usize, found: usize },

    /// A collaborator (base model, elastic model, linear algebra) failed
    #[error("{0}")]
    Model(StrError),
}

impl From<StrError> for DamageError {
    fn from(message: StrError) -> Self {
        DamageError::Model(message)
    }
}

impl DamageError {
    /// Returns a domain error for the given quantity and offending value
    pub fn domain(quantity: &'static str, value: f64) -> Self {
        DamageError::Domain { quantity, value }
    }

    /// Returns a configuration error with the given message
    pub fn config(message: &str) -> Self {
        DamageError::Configuration(message.to_string())
    }

    /// Checks that a length matches the expected one
    pub fn check_dim(expected: usize, found: usize) -> Result<(), DamageError> {
        if expected != found {
            return Err(DamageError::Dimension { expected, found });
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
