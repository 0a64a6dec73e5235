use super::{ElasticModel, LinearElastic, LocalState, VonMises};
use crate::base::{DamageError, ParamBase};
use russell_tensor::{Tensor2, Tensor4};
use std::sync::Arc;

/// Specifies the essential functions of the damage-free (base) stress-strain models
///
/// The base model is shared by reference among damage models; hence, it must not
/// keep mutable data. All work variables live in the [LocalState].
pub trait BaseModelTrait: Send + Sync {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), DamageError>;

    /// Updates the stress tensor given the strain increment tensor (at the new temperature)
    fn update_stress(&self, state: &mut LocalState, delta_strain: &Tensor2, tt: f64) -> Result<(), DamageError>;

    /// Computes the consistent tangent stiffness corresponding to the last update
    fn stiffness(&self, dd: &mut Tensor4, state: &LocalState, tt: f64) -> Result<(), DamageError>;
}

/// Allocates a base model from parameters
pub fn new_base_model(param: &ParamBase, elastic: Arc<ElasticModel>) -> Result<Arc<dyn BaseModelTrait>, DamageError> {
    let model: Arc<dyn BaseModelTrait> = match *param {
        ParamBase::LinearElastic => Arc::new(LinearElastic::new(elastic)),
        ParamBase::VonMises { z0, hh } => Arc::new(VonMises::new(elastic, z0, hh)?),
    };
    Ok(model)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
