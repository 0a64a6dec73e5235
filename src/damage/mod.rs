//! Implements scalar damage laws and the damage-coupled stress update

mod combined;
mod creep_rupture;
mod damaged_model;
mod exponential_work;
mod mark_fatigue;
mod power_law;
mod scalar_damage;
mod solvable;
mod standard_damage;
mod trial_state;
pub use crate::damage::combined::*;
pub use crate::damage::creep_rupture::*;
pub use crate::damage::damaged_model::*;
pub use crate::damage::exponential_work::*;
pub use crate::damage::mark_fatigue::*;
pub use crate::damage::power_law::*;
pub use crate::damage::scalar_damage::*;
pub use crate::damage::solvable::*;
pub use crate::damage::standard_damage::*;
pub use crate::damage::trial_state::*;

#[cfg(test)]
pub(crate) mod testing;
