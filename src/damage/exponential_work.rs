use super::{DamageFunction, StandardDamage};
use crate::base::{deriv_equivalent_stress, equivalent_stress, DamageError, Interpolate};
use crate::material::ElasticModel;
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Implements the exponential-work damage function
///
/// ```text
/// f = (d + k0)^af σe / W0
/// ```
///
/// Since the damage is driven by the equivalent inelastic strain, `f dp` is the
/// increment of inelastic work (σe dp) scaled by the damage.
#[derive(Clone, Debug)]
pub struct ExponentialWork {
    /// Critical work W0(T)
    ww0: Interpolate,

    /// Damage offset k0(T)
    k0: Interpolate,

    /// Damage exponent af(T)
    af: Interpolate,
}

/// Defines the exponential-work scalar damage model
pub type ExponentialWorkDamage = StandardDamage<ExponentialWork>;

impl ExponentialWork {
    /// Allocates a new instance
    pub fn new(ww0: Interpolate, k0: Interpolate, af: Interpolate) -> Result<Self, DamageError> {
        ww0.validate()?;
        k0.validate()?;
        af.validate()?;
        Ok(ExponentialWork { ww0, k0, af })
    }

    /// Allocates a new instance with constant coefficients
    pub fn from_constants(ww0: f64, k0: f64, af: f64) -> Result<Self, DamageError> {
        ExponentialWork::new(ww0.into(), k0.into(), af.into())
    }

    /// Allocates the scalar damage model
    pub fn into_damage(self, elastic: Arc<ElasticModel>) -> ExponentialWorkDamage {
        StandardDamage::new(elastic, self)
    }

    /// Returns (W0, d + k0, af)
    fn coefficients(&self, d: f64, tt: f64) -> Result<(f64, f64, f64), DamageError> {
        let ww0 = self.ww0.value(tt);
        if ww0 <= 0.0 {
            return Err(DamageError::domain("W0", ww0));
        }
        let dk = d + self.k0.value(tt);
        if dk <= 0.0 {
            return Err(DamageError::domain("d + k0", dk));
        }
        Ok((ww0, dk, self.af.value(tt)))
    }
}

impl DamageFunction for ExponentialWork {
    fn f(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError> {
        let (ww0, dk, af) = self.coefficients(d, tt)?;
        Ok(f64::powf(dk, af) * equivalent_stress(sigma) / ww0)
    }

    fn df_ds(&self, df_ds: &mut Tensor2, sigma: &Tensor2, d: f64, tt: f64) -> Result<(), DamageError> {
        let (ww0, dk, af) = self.coefficients(d, tt)?;
        deriv_equivalent_stress(df_ds, sigma);
        let coef = f64::powf(dk, af) / ww0;
        df_ds.vector_mut().as_mut_data().iter_mut().for_each(|v| *v *= coef);
        Ok(())
    }

    fn df_dd(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError> {
        let (ww0, dk, af) = self.coefficients(d, tt)?;
        Ok(af * f64::powf(dk, af - 1.0) * equivalent_stress(sigma) / ww0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
