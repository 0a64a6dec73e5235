use super::{BaseModelTrait, ElasticModel, LocalState};
use crate::base::{deviator, new_sym, DamageError, NSYM};
use russell_tensor::{t4_ddot_t2_update, Mandel, Tensor2, Tensor4};
use russell_tensor::{IDENTITY2, SQRT_2_BY_3};
use std::sync::Arc;

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Holds the index of z internal variable (size of yield surface)
const Z0: usize = 0;

/// Implements the von Mises plasticity model with linear isotropic hardening
///
/// The stress update is the classical radial return:
///
/// ```text
/// f = σd - z
/// ```
pub struct VonMises {
    /// Elastic moduli
    elastic: Arc<ElasticModel>,

    /// Hardening coefficient
    hh: f64,

    /// Initial size of the yield surface (von Mises stress)
    z0: f64,
}

impl VonMises {
    /// Allocates a new instance
    pub fn new(elastic: Arc<ElasticModel>, z0: f64, hh: f64) -> Result<Self, DamageError> {
        if z0 <= 0.0 {
            return Err(DamageError::config("von Mises z0 must be > 0.0"));
        }
        if hh < 0.0 {
            return Err(DamageError::config("von Mises hh must be ≥ 0.0"));
        }
        Ok(VonMises { elastic, hh, z0 })
    }

    /// Calculates the yield function f
    pub fn yield_function(&self, state: &LocalState) -> f64 {
        state.stress.invariant_sigma_d() - state.internal_values[Z0]
    }
}

impl BaseModelTrait for VonMises {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        1 // [z]
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), DamageError> {
        state.internal_values[Z0] = self.z0;
        let f = self.yield_function(state);
        if f > 0.0 {
            return Err(DamageError::Model("stress is outside the yield surface"));
        }
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&self, state: &mut LocalState, delta_strain: &Tensor2, tt: f64) -> Result<(), DamageError> {
        // reset flags
        state.loading = false; // not elastoplastic by default
        state.algo_lambda = 0.0;

        // trial stress: σ ← σ_trial
        let mut dd = Tensor4::new(Mandel::Symmetric);
        self.elastic.calc_modulus(&mut dd, tt)?;
        t4_ddot_t2_update(&mut state.stress, 1.0, &dd, delta_strain, 1.0); // σ += D : Δε

        // elastic update
        let f_trial = self.yield_function(state);
        if f_trial <= 0.0 {
            return Ok(());
        }

        // coefficients
        let (_, gg) = self.elastic.bulk_shear(tt)?;
        let hh = self.hh;
        let sigma_m_trial = state.stress.invariant_sigma_m();
        let sigma_d_trial = state.stress.invariant_sigma_d();
        let lambda = f_trial / (3.0 * gg + hh);
        let m = 1.0 - lambda * 3.0 * gg / sigma_d_trial;

        // s_trial = dev(σ_trial)
        let mut s_trial = new_sym();
        deviator(&mut s_trial, &state.stress);

        // σ_new = m s_trial + σm_trial I
        let vec = state.stress.vector_mut();
        for i in 0..NSYM {
            vec[i] = m * s_trial.vector()[i] + sigma_m_trial * I[i];
        }

        // elastoplastic update
        state.loading = true;
        state.algo_lambda = lambda;
        state.internal_values[Z0] = state.stress.invariant_sigma_d();
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&self, dd: &mut Tensor4, state: &LocalState, tt: f64) -> Result<(), DamageError> {
        // handle elastic case
        if !state.loading {
            return self.elastic.calc_modulus(dd, tt); // D ← Dₑ
        }

        // extract current state variables
        let sigma = &state.stress;
        let lambda = state.algo_lambda;
        let mut s = new_sym();
        deviator(&mut s, sigma); // s = dev(σ)

        // coefficients
        let (kk, gg) = self.elastic.bulk_shear(tt)?;
        let hh = self.hh;
        let sigma_d = sigma.invariant_sigma_d();
        let sigma_d_trial = sigma_d + lambda * 3.0 * gg;
        let norm_s = sigma_d * SQRT_2_BY_3;
        let d = 3.0 * gg + hh;
        let a = 2.0 * gg * (1.0 - lambda * 3.0 * gg / sigma_d_trial);
        let b = 6.0 * gg * gg * (lambda / sigma_d_trial - 1.0 / d) / (norm_s * norm_s);

        // consistent tangent modulus (Psd = 𝕀sym - I ⊗ I / 3)
        let mat = dd.matrix_mut();
        let s = s.vector();
        for i in 0..NSYM {
            for j in 0..NSYM {
                let delta = if i == j { 1.0 } else { 0.0 };
                let psd = delta - I[i] * I[j] / 3.0;
                mat.set(i, j, a * psd + b * s[i] * s[j] + kk * I[i] * I[j]);
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
