use super::{pow_equivalent_stress, DamageDriver, DamageFunction, StandardDamage};
use crate::base::{deriv_equivalent_stress, equivalent_stress, DamageError, Interpolate};
use crate::material::ElasticModel;
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Implements the classical creep-rupture damage function
///
/// ```text
/// f = A σe^(-ξ) (1 - d)^(-φ)
/// ```
///
/// The damage is driven by time, i.e., `d_np1 = d_n + f Δt`.
#[derive(Clone, Debug)]
pub struct CreepRupture {
    /// Prefactor A(T)
    aa: Interpolate,

    /// Stress exponent ξ(T)
    xi: Interpolate,

    /// Damage exponent φ(T)
    phi: Interpolate,
}

/// Defines the creep-rupture scalar damage model
pub type CreepRuptureDamage = StandardDamage<CreepRupture>;

impl CreepRupture {
    /// Allocates a new instance
    pub fn new(aa: Interpolate, xi: Interpolate, phi: Interpolate) -> Result<Self, DamageError> {
        aa.validate()?;
        xi.validate()?;
        phi.validate()?;
        Ok(CreepRupture { aa, xi, phi })
    }

    /// Allocates a new instance with constant coefficients
    pub fn from_constants(aa: f64, xi: f64, phi: f64) -> Result<Self, DamageError> {
        CreepRupture::new(aa.into(), xi.into(), phi.into())
    }

    /// Allocates the scalar damage model
    pub fn into_damage(self, elastic: Arc<ElasticModel>) -> CreepRuptureDamage {
        StandardDamage::new(elastic, self)
    }

    /// Returns (A, ξ, φ, 1 - d) at temperature T
    fn coefficients(&self, d: f64, tt: f64) -> Result<(f64, f64, f64, f64), DamageError> {
        let one_minus_d = 1.0 - d;
        if one_minus_d <= 0.0 {
            return Err(DamageError::domain("1 - d", one_minus_d));
        }
        Ok((self.aa.value(tt), self.xi.value(tt), self.phi.value(tt), one_minus_d))
    }
}

impl DamageFunction for CreepRupture {
    fn driver(&self) -> DamageDriver {
        DamageDriver::Time
    }

    fn f(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError> {
        let (aa, xi, phi, one_minus_d) = self.coefficients(d, tt)?;
        let sigma_e = equivalent_stress(sigma);
        Ok(aa * pow_equivalent_stress(sigma_e, -xi)? * f64::powf(one_minus_d, -phi))
    }

    fn df_ds(&self, df_ds: &mut Tensor2, sigma: &Tensor2, d: f64, tt: f64) -> Result<(), DamageError> {
        let (aa, xi, phi, one_minus_d) = self.coefficients(d, tt)?;
        let sigma_e = equivalent_stress(sigma);
        if sigma_e == 0.0 {
            // d(σe^-ξ)/dσ is unbounded unless ξ = 0 or -ξ ≥ 1
            if xi != 0.0 && -xi < 1.0 {
                return Err(DamageError::domain("equivalent stress", sigma_e));
            }
            df_ds.vector_mut().fill(0.0);
            return Ok(());
        }
        deriv_equivalent_stress(df_ds, sigma);
        let coef = -aa * xi * f64::powf(sigma_e, -xi - 1.0) * f64::powf(one_minus_d, -phi);
        df_ds.vector_mut().as_mut_data().iter_mut().for_each(|v| *v *= coef);
        Ok(())
    }

    fn df_dd(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError> {
        let (aa, xi, phi, one_minus_d) = self.coefficients(d, tt)?;
        let sigma_e = equivalent_stress(sigma);
        Ok(aa * pow_equivalent_stress(sigma_e, -xi)? * phi * f64::powf(one_minus_d, -phi - 1.0))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
