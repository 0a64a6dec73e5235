use super::{DamageFunction, StandardDamage};
use crate::base::{deriv_equivalent_stress, deriv_mean_stress, equivalent_stress, new_sym, DamageError, Interpolate};
use crate::material::ElasticModel;
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Implements Mark's fatigue damage function
///
/// ```text
/// f = (C / rate0) ⟨σe + fα σm⟩^m (1 - fβ d)^(-n)
/// ```
///
/// where ⟨x⟩ = max(x, 0); thus, there is no damage under net compression.
/// The damage is driven by the equivalent inelastic strain increment.
#[derive(Clone, Debug)]
pub struct MarkFatigue {
    cc: Interpolate,
    m: Interpolate,
    n: Interpolate,
    falpha: Interpolate,
    fbeta: Interpolate,
    rate0: Interpolate,
}

/// Defines Mark's fatigue scalar damage model
pub type MarkFatigueDamage = StandardDamage<MarkFatigue>;

/// Holds the coefficients at a temperature and the auxiliary quantities
struct Coefficients {
    c: f64,     // C / rate0
    m: f64,     // stress exponent
    n: f64,     // damage exponent
    falpha: f64,
    fbeta: f64,
    q: f64,     // σe + fα σm
    omega: f64, // 1 - fβ d
}

impl MarkFatigue {
    /// Allocates a new instance
    pub fn new(
        cc: Interpolate,
        m: Interpolate,
        n: Interpolate,
        falpha: Interpolate,
        fbeta: Interpolate,
        rate0: Interpolate,
    ) -> Result<Self, DamageError> {
        for coefficient in [&cc, &m, &n, &falpha, &fbeta, &rate0] {
            coefficient.validate()?;
        }
        Ok(MarkFatigue {
            cc,
            m,
            n,
            falpha,
            fbeta,
            rate0,
        })
    }

    /// Allocates a new instance with constant coefficients
    pub fn from_constants(cc: f64, m: f64, n: f64, falpha: f64, fbeta: f64, rate0: f64) -> Result<Self, DamageError> {
        MarkFatigue::new(cc.into(), m.into(), n.into(), falpha.into(), fbeta.into(), rate0.into())
    }

    /// Allocates the scalar damage model
    pub fn into_damage(self, elastic: Arc<ElasticModel>) -> MarkFatigueDamage {
        StandardDamage::new(elastic, self)
    }

    fn coefficients(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<Coefficients, DamageError> {
        let rate0 = self.rate0.value(tt);
        if rate0 <= 0.0 {
            return Err(DamageError::domain("rate0", rate0));
        }
        let fbeta = self.fbeta.value(tt);
        let omega = 1.0 - fbeta * d;
        if omega <= 0.0 {
            return Err(DamageError::domain("1 - fbeta d", omega));
        }
        let falpha = self.falpha.value(tt);
        Ok(Coefficients {
            c: self.cc.value(tt) / rate0,
            m: self.m.value(tt),
            n: self.n.value(tt),
            falpha,
            fbeta,
            q: equivalent_stress(sigma) + falpha * sigma.invariant_sigma_m(),
            omega,
        })
    }
}

impl DamageFunction for MarkFatigue {
    fn f(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError> {
        let k = self.coefficients(sigma, d, tt)?;
        if k.q <= 0.0 {
            return Ok(0.0);
        }
        Ok(k.c * f64::powf(k.q, k.m) * f64::powf(k.omega, -k.n))
    }

    fn df_ds(&self, df_ds: &mut Tensor2, sigma: &Tensor2, d: f64, tt: f64) -> Result<(), DamageError> {
        let k = self.coefficients(sigma, d, tt)?;
        df_ds.vector_mut().fill(0.0);
        if k.q <= 0.0 {
            return Ok(());
        }
        // dq/dσ = dσe/dσ + fα I/3
        let mut dm = new_sym();
        deriv_equivalent_stress(df_ds, sigma);
        deriv_mean_stress(&mut dm);
        let coef = k.c * k.m * f64::powf(k.q, k.m - 1.0) * f64::powf(k.omega, -k.n);
        let out = df_ds.vector_mut();
        for (v, m) in out.as_mut_data().iter_mut().zip(dm.vector().as_data().iter()) {
            *v = coef * (*v + k.falpha * m);
        }
        Ok(())
    }

    fn df_dd(&self, sigma: &Tensor2, d: f64, tt: f64) -> Result<f64, DamageError> {
        let k = self.coefficients(sigma, d, tt)?;
        if k.q <= 0.0 {
            return Ok(0.0);
        }
        Ok(k.c * f64::powf(k.q, k.m) * k.n * k.fbeta * f64::powf(k.omega, -k.n - 1.0))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
