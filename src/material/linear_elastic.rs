use super::{BaseModelTrait, ElasticModel, LocalState};
use crate::base::DamageError;
use russell_tensor::{t4_ddot_t2_update, Mandel, Tensor2, Tensor4};
use std::sync::Arc;

/// Implements a linear elastic model (no internal values)
pub struct LinearElastic {
    elastic: Arc<ElasticModel>,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(elastic: Arc<ElasticModel>) -> Self {
        LinearElastic { elastic }
    }
}

impl BaseModelTrait for LinearElastic {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        0
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, _state: &mut LocalState) -> Result<(), DamageError> {
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&self, state: &mut LocalState, delta_strain: &Tensor2, tt: f64) -> Result<(), DamageError> {
        let mut dd = Tensor4::new(Mandel::Symmetric);
        self.elastic.calc_modulus(&mut dd, tt)?;
        t4_ddot_t2_update(&mut state.stress, 1.0, &dd, delta_strain, 1.0); // σ += D : Δε
        state.loading = false;
        state.algo_lambda = 0.0;
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&self, dd: &mut Tensor4, _state: &LocalState, tt: f64) -> Result<(), DamageError> {
        self.elastic.calc_modulus(dd, tt)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
