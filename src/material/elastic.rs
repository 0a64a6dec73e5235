use crate::base::{DamageError, Interpolate, ParamElastic};
use russell_tensor::{LinElasticity, Mandel, Tensor4};

/// Implements an isotropic linear elastic model with temperature-dependent moduli
///
/// The moduli are shared (read-only) by the base model and the damage laws.
#[derive(Clone, Debug)]
pub struct ElasticModel {
    /// Young's modulus E(T)
    young: Interpolate,

    /// Poisson's coefficient ν(T)
    poisson: Interpolate,
}

impl ElasticModel {
    /// Allocates a new instance
    pub fn new(young: Interpolate, poisson: Interpolate) -> Result<Self, DamageError> {
        young.validate()?;
        poisson.validate()?;
        Ok(ElasticModel { young, poisson })
    }

    /// Allocates a new instance with constant moduli
    pub fn from_constants(young: f64, poisson: f64) -> Result<Self, DamageError> {
        ElasticModel::new(Interpolate::Constant(young), Interpolate::Constant(poisson))
    }

    /// Allocates a new instance from parameters
    pub fn from_param(param: &ParamElastic) -> Result<Self, DamageError> {
        ElasticModel::new(param.young.to_interpolate(), param.poisson.to_interpolate())
    }

    /// Returns the Young's modulus and Poisson's coefficient at temperature T
    pub fn moduli(&self, tt: f64) -> Result<(f64, f64), DamageError> {
        let young = self.young.value(tt);
        let poisson = self.poisson.value(tt);
        if young <= 0.0 {
            return Err(DamageError::domain("Young's modulus", young));
        }
        if poisson <= -1.0 || poisson >= 0.5 {
            return Err(DamageError::domain("Poisson's coefficient", poisson));
        }
        Ok((young, poisson))
    }

    /// Returns the linear elasticity (3D) structure at temperature T
    pub fn lin_elasticity(&self, tt: f64) -> Result<LinElasticity, DamageError> {
        let (young, poisson) = self.moduli(tt)?;
        Ok(LinElasticity::new(young, poisson, false, false))
    }

    /// Returns the bulk and shear moduli at temperature T
    pub fn bulk_shear(&self, tt: f64) -> Result<(f64, f64), DamageError> {
        Ok(self.lin_elasticity(tt)?.get_bulk_shear())
    }

    /// Calculates the elastic rigidity modulus D(T)
    pub fn calc_modulus(&self, dd: &mut Tensor4, tt: f64) -> Result<(), DamageError> {
        let lin = self.lin_elasticity(tt)?;
        dd.set_tensor(1.0, lin.get_modulus());
        Ok(())
    }

    /// Calculates the elastic compliance modulus S(T) = D(T)⁻¹
    pub fn calc_compliance(&self, cc: &mut Tensor4, tt: f64) -> Result<(), DamageError> {
        let lin = self.lin_elasticity(tt)?;
        lin.calc_compliance(cc)?;
        Ok(())
    }

    /// Allocates and returns the compliance modulus S(T)
    pub fn compliance(&self, tt: f64) -> Result<Tensor4, DamageError> {
        let mut cc = Tensor4::new(Mandel::Symmetric);
        self.calc_compliance(&mut cc, tt)?;
        Ok(cc)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
