//! Implements the base structures: errors, parameters, settings, and tensor primitives

mod error;
mod interpolate;
mod parameters;
mod sample_params;
mod settings;
mod symmetric;
pub use crate::base::error::*;
pub use crate::base::interpolate::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::settings::*;
pub use crate::base::symmetric::*;
