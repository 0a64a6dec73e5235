//! Continuum damage mechanics: scalar damage laws coupled to stress-strain models
//!
//! The damage laws (creep-rupture, fatigue, power-law, exponential-work, and their
//! combinations) supply the end-of-step damage value and its derivatives. The
//! [damage::DamagedModel] embeds one law into the implicit stress update of a base
//! (damage-free) model and solves for the damaged stress and the damage together.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod damage;
pub mod material;
pub mod prelude;
