//! Implements the elastic model and the damage-free (base) stress-strain models

mod base_model;
mod elastic;
mod linear_elastic;
mod local_state;
mod von_mises;
pub use crate::material::base_model::*;
pub use crate::material::elastic::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::local_state::*;
pub use crate::material::von_mises::*;
