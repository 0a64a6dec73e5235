use super::{deriv_pow_equivalent_stress, pow_equivalent_stress, DamageFunction, StandardDamage};
use crate::base::{equivalent_stress, DamageError, Interpolate};
use crate::material::ElasticModel;
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Implements the power-law damage function f = A σe^a
#[derive(Clone, Debug)]
pub struct PowerLaw {
    aa: Interpolate,
    a: Interpolate,
}

/// Defines the power-law scalar damage model
pub type PowerLawDamage = StandardDamage<PowerLaw>;

impl PowerLaw {
    /// Allocates a new instance
    pub fn new(aa: Interpolate, a: Interpolate) -> Result<Self, DamageError> {
        aa.validate()?;
        a.validate()?;
        Ok(PowerLaw { aa, a })
    }

    /// Allocates a new instance with constant coefficients
    pub fn from_constants(aa: f64, a: f64) -> Result<Self, DamageError> {
        PowerLaw::new(aa.into(), a.into())
    }

    /// Allocates the scalar damage model
    pub fn into_damage(self, elastic: Arc<ElasticModel>) -> PowerLawDamage {
        StandardDamage::new(elastic, self)
    }
}

impl DamageFunction for PowerLaw {
    fn f(&self, sigma: &Tensor2, _d: f64, tt: f64) -> Result<f64, DamageError> {
        let sigma_e = equivalent_stress(sigma);
        Ok(self.aa.value(tt) * pow_equivalent_stress(sigma_e, self.a.value(tt))?)
    }

    fn df_ds(&self, df_ds: &mut Tensor2, sigma: &Tensor2, _d: f64, tt: f64) -> Result<(), DamageError> {
        deriv_pow_equivalent_stress(df_ds, sigma, self.a.value(tt))?;
        let aa = self.aa.value(tt);
        df_ds.vector_mut().as_mut_data().iter_mut().for_each(|v| *v *= aa);
        Ok(())
    }

    fn df_dd(&self, _sigma: &Tensor2, _d: f64, _tt: f64) -> Result<f64, DamageError> {
        Ok(0.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
