use crate::base::{check_sym, new_sym, DamageError, NSYM};
use crate::material::LocalState;
use russell_tensor::{Mandel, Tensor2, Tensor4};

/// Holds the two-endpoint data of one step as seen by a damage law
///
/// The stresses are effective (undamaged) stresses.
#[derive(Clone, Copy, Debug)]
pub struct DamageStep<'a> {
    /// Strain at the end of the step
    pub e_np1: &'a Tensor2,

    /// Strain at the beginning of the step
    pub e_n: &'a Tensor2,

    /// Effective stress at the end of the step
    pub s_np1: &'a Tensor2,

    /// Effective stress at the beginning of the step
    pub s_n: &'a Tensor2,

    /// Temperature at the end of the step
    pub tt_np1: f64,

    /// Temperature at the beginning of the step
    pub tt_n: f64,

    /// Time at the end of the step
    pub t_np1: f64,

    /// Time at the beginning of the step
    pub t_n: f64,
}

impl<'a> DamageStep<'a> {
    /// Allocates a new instance after checking the tensor dimensions
    pub fn new(
        e_np1: &'a Tensor2,
        e_n: &'a Tensor2,
        s_np1: &'a Tensor2,
        s_n: &'a Tensor2,
        tt_np1: f64,
        tt_n: f64,
        t_np1: f64,
        t_n: f64,
    ) -> Result<Self, DamageError> {
        check_sym(e_np1)?;
        check_sym(e_n)?;
        check_sym(s_np1)?;
        check_sym(s_n)?;
        Ok(DamageStep {
            e_np1,
            e_n,
            s_np1,
            s_n,
            tt_np1,
            tt_n,
            t_np1,
            t_n,
        })
    }

    /// Returns a copy of this step with another end-of-step stress
    pub fn with_stress(&self, s_np1: &'a Tensor2) -> Self {
        DamageStep { s_np1, ..*self }
    }

    /// Returns a copy of this step with another end-of-step strain
    pub fn with_strain(&self, e_np1: &'a Tensor2) -> Self {
        DamageStep { e_np1, ..*self }
    }

    /// Returns the time increment Δt = t_np1 - t_n
    pub fn dt(&self) -> f64 {
        self.t_np1 - self.t_n
    }

    /// Calculates the strain increment Δε = ε_np1 - ε_n
    pub fn delta_strain(&self, de: &mut Tensor2) {
        let out = de.vector_mut();
        for i in 0..NSYM {
            out[i] = self.e_np1.vector()[i] - self.e_n.vector()[i];
        }
    }

    /// Calculates the stress increment Δσ = σ_np1 - σ_n
    pub fn delta_stress(&self, ds: &mut Tensor2) {
        let out = ds.vector_mut();
        for i in 0..NSYM {
            out[i] = self.s_np1.vector()[i] - self.s_n.vector()[i];
        }
    }
}

/// Holds the immutable data of one damage-coupled stress update
///
/// Built once by [crate::damage::DamagedModel::make_trial_state] and then
/// consumed by the Newton iterations.
#[derive(Clone, Debug)]
pub struct TrialState {
    /// Strain at the end of the step
    pub e_np1: Tensor2,

    /// Strain at the beginning of the step
    pub e_n: Tensor2,

    /// Damaged stress at the beginning of the step
    pub s_n: Tensor2,

    /// Effective (undamaged) stress at the beginning of the step, s_n / (1 - w_n)
    pub s_eff_n: Tensor2,

    /// Base-model stress predictor σ' from the effective start stress
    pub s_base: Tensor2,

    /// Base-model consistent tangent A' = dσ'/dε
    pub tangent_base: Tensor4,

    /// Base-model state after the update (internal values at the end of the step)
    pub base_state: LocalState,

    /// Damage block at the beginning of the step
    pub damage_n: Vec<f64>,

    /// Total damage at the beginning of the step
    pub w_n: f64,

    /// Temperature at the end of the step
    pub tt_np1: f64,

    /// Temperature at the beginning of the step
    pub tt_n: f64,

    /// Time at the end of the step
    pub t_np1: f64,

    /// Time at the beginning of the step
    pub t_n: f64,

    /// Strain energy at the beginning of the step
    pub u_n: f64,

    /// Dissipated work at the beginning of the step
    pub p_n: f64,
}

impl TrialState {
    /// Allocates an empty trial state
    pub fn new(ndamage: usize, n_internal_values: usize) -> Self {
        TrialState {
            e_np1: new_sym(),
            e_n: new_sym(),
            s_n: new_sym(),
            s_eff_n: new_sym(),
            s_base: new_sym(),
            tangent_base: Tensor4::new(Mandel::Symmetric),
            base_state: LocalState::new(n_internal_values),
            damage_n: vec![0.0; ndamage],
            w_n: 0.0,
            tt_np1: 0.0,
            tt_n: 0.0,
            t_np1: 0.0,
            t_n: 0.0,
            u_n: 0.0,
            p_n: 0.0,
        }
    }

    /// Returns the damage-law view of this state for a given effective end-of-step stress
    pub fn damage_step<'a>(&'a self, s_eff_np1: &'a Tensor2) -> DamageStep<'a> {
        DamageStep {
            e_np1: &self.e_np1,
            e_n: &self.e_n,
            s_np1: s_eff_np1,
            s_n: &self.s_eff_n,
            tt_np1: self.tt_np1,
            tt_n: self.tt_n,
            t_np1: self.t_np1,
            t_n: self.t_n,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
