use super::{new_damage_law, newton, ScalarDamageTrait, SolveStats, Solvable, TrialState};
use crate::base::{check_sym, ddot, new_sym, DamageError, ParamDamagedModel, SolverSettings, NSYM};
use crate::material::{new_base_model, BaseModelTrait, ElasticModel, LocalState};
use russell_lab::{mat_inverse, mat_vec_mul, Matrix, Vector};
use russell_tensor::{t4_ddot_t2_update, Mandel, Tensor2, Tensor4};
use std::sync::Arc;

/// Holds the index of the damage unknown in x = [σ, w]
const W: usize = NSYM;

/// Holds the number of unknowns of the damage-coupled update
const NPARAMS: usize = NSYM + 1;

/// Couples a scalar damage law to a base stress-strain model
///
/// The damaged stress is `σ = (1 - w) σ'`, where σ' is the base-model stress obtained
/// from the undamaged (effective) stress at the beginning of the step. The end-of-step
/// stress and damage are found simultaneously by solving
///
/// ```text
/// R_σ = σ - (1 - w) σ' = 0
/// R_w = w - D(w, w_n, ε, σ/(1 - w), ...) = 0
/// ```
///
/// The history vector holds the damage block followed by the base-model internal values.
pub struct DamagedModel {
    /// Elastic model (compliance to split the inelastic strain)
    elastic: Arc<ElasticModel>,

    /// Damage-free stress-strain model
    base: Arc<dyn BaseModelTrait>,

    /// Scalar damage law (possibly combined)
    damage: Arc<dyn ScalarDamageTrait>,

    /// Newton settings
    settings: SolverSettings,
}

/// Holds the results of a damaged stress update
#[derive(Clone, Debug)]
pub struct DamagedUpdate {
    /// Damaged stress at the end of the step
    pub stress: Tensor2,

    /// History at the end of the step: [damage block, base internal values]
    pub history: Vec<f64>,

    /// Algorithmic tangent dσ/dε
    pub tangent: Tensor4,

    /// Strain energy at the end of the step
    pub energy: f64,

    /// Dissipated work at the end of the step
    pub work: f64,

    /// Newton statistics
    pub stats: SolveStats,
}

impl DamagedModel {
    /// Allocates a new instance
    pub fn new(
        elastic: Arc<ElasticModel>,
        base: Arc<dyn BaseModelTrait>,
        damage: Arc<dyn ScalarDamageTrait>,
        settings: SolverSettings,
    ) -> Result<Self, DamageError> {
        settings.validate()?;
        Ok(DamagedModel {
            elastic,
            base,
            damage,
            settings,
        })
    }

    /// Allocates a new instance from parameters
    pub fn from_param(param: &ParamDamagedModel) -> Result<Self, DamageError> {
        let elastic = Arc::new(ElasticModel::from_param(&param.elastic)?);
        let base = new_base_model(&param.base, elastic.clone())?;
        let damage = new_damage_law(&param.damage, elastic.clone())?;
        DamagedModel::new(elastic, base, damage, param.settings)
    }

    /// Returns the Newton settings
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Returns the size of the damage block
    pub fn ndamage(&self) -> usize {
        self.damage.ndamage()
    }

    /// Returns the size of the history vector
    pub fn n_internal_values(&self) -> usize {
        self.damage.ndamage() + self.base.n_internal_values()
    }

    /// Returns the damage block at time zero
    pub fn init_damage(&self) -> Vec<f64> {
        self.damage.init_damage()
    }

    /// Returns the total damage stored in a history vector
    pub fn total_damage(&self, history: &[f64]) -> Result<f64, DamageError> {
        DamageError::check_dim(self.n_internal_values(), history.len())?;
        Ok(self.damage.total_damage(&history[..self.damage.ndamage()]))
    }

    /// Returns the history at time zero for an initial (undamaged) stress state
    pub fn initialize_history(&self, stress: &Tensor2) -> Result<Vec<f64>, DamageError> {
        check_sym(stress)?;
        let mut state = LocalState::new(self.base.n_internal_values());
        state.stress.set_tensor(1.0, stress);
        self.base.initialize_internal_values(&mut state)?;
        let mut history = self.damage.init_damage();
        history.extend_from_slice(state.internal_values.as_data());
        Ok(history)
    }

    /// Builds the trial state of one step
    ///
    /// The base model is updated here, once, from the effective start stress `s_n/(1 - w_n)`.
    pub fn make_trial_state(
        &self,
        e_np1: &Tensor2,
        e_n: &Tensor2,
        s_n: &Tensor2,
        h_n: &[f64],
        tt_np1: f64,
        tt_n: f64,
        t_np1: f64,
        t_n: f64,
        u_n: f64,
        p_n: f64,
    ) -> Result<TrialState, DamageError> {
        check_sym(e_np1)?;
        check_sym(e_n)?;
        check_sym(s_n)?;
        DamageError::check_dim(self.n_internal_values(), h_n.len())?;

        // damage at the beginning of the step
        let nd = self.damage.ndamage();
        let mut trial = TrialState::new(nd, self.base.n_internal_values());
        trial.damage_n.copy_from_slice(&h_n[..nd]);
        trial.w_n = self.damage.total_damage(&trial.damage_n);
        let omega_n = 1.0 - trial.w_n;
        if omega_n <= 0.0 {
            return Err(DamageError::domain("1 - w", omega_n));
        }

        // step data
        trial.e_np1.set_tensor(1.0, e_np1);
        trial.e_n.set_tensor(1.0, e_n);
        trial.s_n.set_tensor(1.0, s_n);
        trial.s_eff_n.set_tensor(1.0 / omega_n, s_n);
        trial.tt_np1 = tt_np1;
        trial.tt_n = tt_n;
        trial.t_np1 = t_np1;
        trial.t_n = t_n;
        trial.u_n = u_n;
        trial.p_n = p_n;

        // base predictor σ' and tangent A'
        let mut de = new_sym();
        for i in 0..NSYM {
            de.vector_mut()[i] = e_np1.vector()[i] - e_n.vector()[i];
        }
        trial.base_state.stress.set_tensor(1.0, &trial.s_eff_n);
        for (i, value) in h_n[nd..].iter().enumerate() {
            trial.base_state.internal_values[i] = *value;
        }
        self.base.update_stress(&mut trial.base_state, &de, tt_np1)?;
        trial.s_base.set_tensor(1.0, &trial.base_state.stress);
        self.base.stiffness(&mut trial.tangent_base, &trial.base_state, tt_np1)?;
        Ok(trial)
    }

    /// Performs the damage-coupled stress update of a trial state
    pub fn update(&self, trial: &TrialState) -> Result<DamagedUpdate, DamageError> {
        // solve for x = [σ, w]
        let mut x = Vector::new(NPARAMS);
        let stats = newton(self, &mut x, trial, &self.settings)?;
        let w = x[W];
        let omega = 1.0 - w;
        let mut stress = new_sym();
        for i in 0..NSYM {
            stress.vector_mut()[i] = x[i];
        }
        let mut s_eff = new_sym();
        s_eff.set_tensor(1.0 / omega, &stress);
        let step = trial.damage_step(&s_eff);

        // history
        let nd = self.damage.ndamage();
        let mut history = vec![0.0; self.n_internal_values()];
        self.damage
            .split_damage(&mut history[..nd], &trial.damage_n, w, trial.w_n, &step)?;
        history[nd..].copy_from_slice(trial.base_state.internal_values.as_data());

        // tangent: dx/dε = J⁻¹ [(1 - w) A'; D_e]
        let mut rr = Vector::new(NPARAMS);
        let mut jj = Matrix::new(NPARAMS, NPARAMS);
        self.residual_jacobian(&mut rr, &mut jj, &x, trial)?;
        let mut jj_inv = Matrix::new(NPARAMS, NPARAMS);
        mat_inverse(&mut jj_inv, &jj)?;
        let mut dd_de = new_sym();
        self.damage.ddamage_de(&mut dd_de, w, trial.w_n, &step)?;
        let aa = trial.tangent_base.matrix();
        let mut rhs = Vector::new(NPARAMS);
        let mut column = Vector::new(NPARAMS);
        let mut tangent = Tensor4::new(Mandel::Symmetric);
        for k in 0..NSYM {
            for i in 0..NSYM {
                rhs[i] = omega * aa.get(i, k);
            }
            rhs[W] = dd_de.vector()[k];
            mat_vec_mul(&mut column, 1.0, &jj_inv, &rhs)?;
            for i in 0..NSYM {
                tangent.matrix_mut().set(i, k, column[i]);
            }
        }

        // energy and work
        let mut de = new_sym();
        let mut ds_eff = new_sym();
        step.delta_strain(&mut de);
        step.delta_stress(&mut ds_eff);
        let mut de_in = de.clone();
        let cc = self.elastic.compliance(trial.tt_np1)?;
        t4_ddot_t2_update(&mut de_in, -1.0, &cc, &ds_eff, 1.0); // Δεin = Δε - S:Δσeff
        let mut s_avg = new_sym();
        for i in 0..NSYM {
            s_avg.vector_mut()[i] = 0.5 * (stress.vector()[i] + trial.s_n.vector()[i]);
        }
        let energy = trial.u_n + ddot(&s_avg, &de);
        let work = trial.p_n + ddot(&s_avg, &de_in);

        Ok(DamagedUpdate {
            stress,
            history,
            tangent,
            energy,
            work,
            stats,
        })
    }
}

impl Solvable for DamagedModel {
    type Trial = TrialState;

    fn nparams(&self) -> usize {
        NPARAMS
    }

    fn init_x(&self, x: &mut Vector, trial: &TrialState) -> Result<(), DamageError> {
        for i in 0..NSYM {
            x[i] = trial.s_n.vector()[i];
        }
        x[W] = trial.w_n;
        Ok(())
    }

    fn residual_jacobian(
        &self,
        rr: &mut Vector,
        jj: &mut Matrix,
        x: &Vector,
        trial: &TrialState,
    ) -> Result<(), DamageError> {
        let w = x[W];
        let omega = 1.0 - w;
        if omega <= 0.0 {
            return Err(DamageError::domain("1 - w", omega));
        }

        // effective stress
        let mut sigma = new_sym();
        for i in 0..NSYM {
            sigma.vector_mut()[i] = x[i];
        }
        let mut s_eff = new_sym();
        s_eff.set_tensor(1.0 / omega, &sigma);
        let step = trial.damage_step(&s_eff);

        // damage and derivatives
        let dd = self.damage.damage(w, trial.w_n, &step)?;
        let dd_dd = self.damage.ddamage_dd(w, trial.w_n, &step)?;
        let mut dd_ds = new_sym();
        self.damage.ddamage_ds(&mut dd_ds, w, trial.w_n, &step)?;

        // R_σ and its derivatives
        let s_base = trial.s_base.vector();
        for i in 0..NSYM {
            rr[i] = x[i] - omega * s_base[i];
            for j in 0..NSYM {
                jj.set(i, j, if i == j { 1.0 } else { 0.0 });
            }
            jj.set(i, W, s_base[i]);
        }

        // R_w and its derivatives
        rr[W] = w - dd;
        for j in 0..NSYM {
            jj.set(W, j, -dd_ds.vector()[j] / omega);
        }
        jj.set(W, W, 1.0 - dd_dd - ddot(&dd_ds, &sigma) / (omega * omega));
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
