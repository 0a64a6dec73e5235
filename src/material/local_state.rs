use crate::base::new_sym;
use russell_lab::Vector;
use russell_tensor::Tensor2;
use serde::{Deserialize, Serialize};

/// Holds the state of a base (damage-free) stress-strain model at a material point
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the elastoplastic (vs elastic) flag of the last update
    pub loading: bool,

    /// Holds the algorithmic Λ of the last update
    pub algo_lambda: f64,

    /// Holds the internal values Z
    pub internal_values: Vector,

    /// Holds the (undamaged) stress tensor σ
    pub stress: Tensor2,
}

impl LocalState {
    /// Allocates a new instance with zero stress
    pub fn new(n_internal_values: usize) -> Self {
        LocalState {
            loading: false,
            algo_lambda: 0.0,
            internal_values: Vector::new(n_internal_values),
            stress: new_sym(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
