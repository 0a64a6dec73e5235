//! Makes available common structures needed to run a damaged stress update
//!
//! You may write `use cdamage::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Coefficient, DamageError, Interpolate, SampleParams, SolverSettings};
pub use crate::base::{ParamBase, ParamDamage, ParamDamagedModel, ParamElastic};
pub use crate::damage::{new_damage_law, CombinedDamage, DamagedModel, DamagedUpdate, ScalarDamageTrait, TrialState};
pub use crate::material::{new_base_model, BaseModelTrait, ElasticModel};
