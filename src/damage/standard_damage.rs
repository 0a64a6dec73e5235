use super::{DamageStep, ScalarDamageTrait};
use crate::base::{deriv_equivalent_stress, equivalent_stress, equivalent_strain, new_sym, DamageError, NSYM};
use crate::material::ElasticModel;
use russell_tensor::{t4_ddot_t2, t4_ddot_t2_update, Tensor2};
use std::sync::Arc;

/// Defines the measure driving the evolution of a standard damage law
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageDriver {
    /// Δg = t_np1 - t_n
    Time,

    /// Δg = dp = √(2/3 Δεin:Δεin) with Δεin = Δε - S:Δσ
    InelasticStrain,
}

/// Specifies the scalar function of a standard damage law
///
/// The damage evolves according to
///
/// ```text
/// d_np1 = d_n + f(σ_np1, d_np1, T_np1) Δg
/// ```
///
/// where Δg is given by the [DamageDriver].
pub trait DamageFunction: Send + Sync {
    /// Returns the driving measure
    fn driver(&self) -> DamageDriver {
        DamageDriver::InelasticStrain
    }

    /// Calculates f(σ, d, T)
    fn f(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError>;

    /// Calculates df/dσ
    fn df_ds(&self, df_ds: &mut Tensor2, sigma: &Tensor2, d: f64, tt: f64) -> Result<(), DamageError>;

    /// Calculates df/dd
    fn df_dd(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError>;
}

/// Implements the standard scalar damage model d_np1 = d_n + f Δg
pub struct StandardDamage<F: DamageFunction> {
    /// Elastic model (gives the compliance to split the inelastic strain)
    elastic: Arc<ElasticModel>,

    /// Damage function
    law: F,
}

impl<F: DamageFunction> StandardDamage<F> {
    /// Allocates a new instance
    pub fn new(elastic: Arc<ElasticModel>, law: F) -> Self {
        StandardDamage { elastic, law }
    }

    /// Returns access to the damage function
    pub fn law(&self) -> &F {
        &self.law
    }

    /// Calculates the inelastic strain increment Δεin = Δε - S(T_np1):Δσ and returns dp
    pub fn inelastic_increment(&self, de_in: &mut Tensor2, step: &DamageStep) -> Result<f64, DamageError> {
        let cc = self.elastic.compliance(step.tt_np1)?;
        let mut ds = new_sym();
        step.delta_stress(&mut ds);
        step.delta_strain(de_in);
        t4_ddot_t2_update(de_in, -1.0, &cc, &ds, 1.0); // Δεin = Δε - S:Δσ
        Ok(equivalent_strain(de_in))
    }

    /// Returns the increment of the driving measure Δg
    pub fn driving_increment(&self, step: &DamageStep) -> Result<f64, DamageError> {
        match self.law.driver() {
            DamageDriver::Time => {
                let dt = step.dt();
                if dt < 0.0 {
                    return Err(DamageError::domain("time increment", dt));
                }
                Ok(dt)
            }
            DamageDriver::InelasticStrain => {
                let mut de_in = new_sym();
                self.inelastic_increment(&mut de_in, step)
            }
        }
    }

    /// Returns the damage rate f Δg / Δt
    pub fn rate(&self, d_np1: f64, step: &DamageStep) -> Result<f64, DamageError> {
        let dt = step.dt();
        if dt <= 0.0 {
            return Err(DamageError::domain("time increment", dt));
        }
        let f = self.law.f(step.s_np1, d_np1, step.tt_np1)?;
        Ok(f * self.driving_increment(step)? / dt)
    }
}

impl<F: DamageFunction> ScalarDamageTrait for StandardDamage<F> {
    fn damage(&self, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<f64, DamageError> {
        let f = self.law.f(step.s_np1, d_np1, step.tt_np1)?;
        Ok(d_n + f * self.driving_increment(step)?)
    }

    fn ddamage_dd(&self, d_np1: f64, _d_n: f64, step: &DamageStep) -> Result<f64, DamageError> {
        let df_dd = self.law.df_dd(step.s_np1, d_np1, step.tt_np1)?;
        Ok(df_dd * self.driving_increment(step)?)
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, d_np1: f64, _d_n: f64, step: &DamageStep) -> Result<(), DamageError> {
        dd_de.vector_mut().fill(0.0);
        if self.law.driver() == DamageDriver::Time {
            return Ok(());
        }
        let mut de_in = new_sym();
        let dp = self.inelastic_increment(&mut de_in, step)?;
        if dp == 0.0 {
            return Ok(());
        }
        // dD/dε = f d(dp)/dε = f (2/3) Δεin / dp
        let f = self.law.f(step.s_np1, d_np1, step.tt_np1)?;
        let out = dd_de.vector_mut();
        for i in 0..NSYM {
            out[i] = f * 2.0 / 3.0 * de_in.vector()[i] / dp;
        }
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, d_np1: f64, _d_n: f64, step: &DamageStep) -> Result<(), DamageError> {
        self.law.df_ds(dd_ds, step.s_np1, d_np1, step.tt_np1)?;
        match self.law.driver() {
            DamageDriver::Time => {
                let dt = self.driving_increment(step)?;
                dd_ds.vector_mut().as_mut_data().iter_mut().for_each(|v| *v *= dt);
            }
            DamageDriver::InelasticStrain => {
                let mut de_in = new_sym();
                let dp = self.inelastic_increment(&mut de_in, step)?;
                dd_ds.vector_mut().as_mut_data().iter_mut().for_each(|v| *v *= dp);
                if dp == 0.0 {
                    return Ok(());
                }
                // dD/dσ = df/dσ dp - f (2/3) S:Δεin / dp
                let f = self.law.f(step.s_np1, d_np1, step.tt_np1)?;
                let cc = self.elastic.compliance(step.tt_np1)?;
                let mut s_de_in = new_sym();
                t4_ddot_t2(&mut s_de_in, 1.0, &cc, &de_in);
                let out = dd_ds.vector_mut();
                for i in 0..NSYM {
                    out[i] -= f * 2.0 / 3.0 * s_de_in.vector()[i] / dp;
                }
            }
        }
        Ok(())
    }
}

/// Returns σe^a, failing if σe = 0 and a < 0
pub fn pow_equivalent_stress(sigma_e: f64, a: f64) -> Result<f64, DamageError> {
    if sigma_e == 0.0 && a < 0.0 {
        return Err(DamageError::domain("equivalent stress", sigma_e));
    }
    Ok(f64::powf(sigma_e, a))
}

/// Calculates d(σe^a)/dσ = a σe^(a-1) dσe/dσ
///
/// At σe = 0 the result is zero if a = 0 or a ≥ 1; otherwise the derivative is unbounded
/// and a domain error is returned.
pub fn deriv_pow_equivalent_stress(d1: &mut Tensor2, sigma: &Tensor2, a: f64) -> Result<(), DamageError> {
    let sigma_e = equivalent_stress(sigma);
    if sigma_e == 0.0 {
        if a != 0.0 && a < 1.0 {
            return Err(DamageError::domain("equivalent stress", sigma_e));
        }
        d1.vector_mut().fill(0.0);
        return Ok(());
    }
    deriv_equivalent_stress(d1, sigma);
    let coef = a * f64::powf(sigma_e, a - 1.0);
    d1.vector_mut().as_mut_data().iter_mut().for_each(|v| *v *= coef);
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
