use super::{DamageStep, ScalarDamageTrait};
use crate::base::{new_sym, DamageError, Interpolate, NSYM};
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Specifies how the damage increments of several mechanisms are combined
///
/// Given the member increments δᵢ over a step, the combined increment is Ψ(δ; T).
pub trait CombinationRule: Send + Sync {
    /// Returns the combined increment Ψ
    fn combine(&self, deltas: &[f64], tt: f64) -> f64;

    /// Calculates the gradient ∂Ψ/∂δᵢ
    fn gradient(&self, dpsi: &mut [f64], deltas: &[f64], tt: f64);

    /// Calculates the contribution of each mechanism such that Σ sharesᵢ = Ψ
    fn shares(&self, shares: &mut [f64], deltas: &[f64], tt: f64);
}

/// Implements Ψ = Σ δᵢ
pub struct LinearSum;

impl CombinationRule for LinearSum {
    fn combine(&self, deltas: &[f64], _tt: f64) -> f64 {
        deltas.iter().sum()
    }

    fn gradient(&self, dpsi: &mut [f64], _deltas: &[f64], _tt: f64) {
        dpsi.fill(1.0);
    }

    fn shares(&self, shares: &mut [f64], deltas: &[f64], _tt: f64) {
        shares.copy_from_slice(deltas);
    }
}

/// Implements Ψ = Σ δᵢ + α(T) Σ_{i<j} δᵢ δⱼ
///
/// α = 0 gives the plain sum; a single mechanism is returned unchanged for any α.
pub struct PairwiseInteraction {
    alpha: Interpolate,
}

impl PairwiseInteraction {
    /// Allocates a new instance
    pub fn new(alpha: Interpolate) -> Result<Self, DamageError> {
        alpha.validate()?;
        Ok(PairwiseInteraction { alpha })
    }
}

impl CombinationRule for PairwiseInteraction {
    fn combine(&self, deltas: &[f64], tt: f64) -> f64 {
        let sum: f64 = deltas.iter().sum();
        let sum_sq: f64 = deltas.iter().map(|d| d * d).sum();
        sum + self.alpha.value(tt) * (sum * sum - sum_sq) / 2.0
    }

    fn gradient(&self, dpsi: &mut [f64], deltas: &[f64], tt: f64) {
        let alpha = self.alpha.value(tt);
        let sum: f64 = deltas.iter().sum();
        for (g, d) in dpsi.iter_mut().zip(deltas) {
            *g = 1.0 + alpha * (sum - d);
        }
    }

    fn shares(&self, shares: &mut [f64], deltas: &[f64], tt: f64) {
        let alpha = self.alpha.value(tt);
        let sum: f64 = deltas.iter().sum();
        for (s, d) in shares.iter_mut().zip(deltas) {
            *s = d * (1.0 + alpha * (sum - d) / 2.0);
        }
    }
}

/// Implements a damage model combining several scalar damage mechanisms
///
/// All members are evaluated at the same (total) damage and trial point:
///
/// ```text
/// δᵢ = Dᵢ(D, D_n, ...) - D_n
/// D  = D_n + Ψ(δ; T_np1)
/// ```
///
/// The damage block holds one contribution per mechanism; the total damage is their sum.
pub struct CombinedDamage {
    members: Vec<Arc<dyn ScalarDamageTrait>>,
    rule: Box<dyn CombinationRule>,
}

impl CombinedDamage {
    /// Allocates a new instance with the pairwise interaction rule
    ///
    /// A `None` alpha means no interaction (plain sum).
    pub fn new(members: Vec<Arc<dyn ScalarDamageTrait>>, alpha: Option<Interpolate>) -> Result<Self, DamageError> {
        match alpha {
            Some(alpha) => CombinedDamage::with_rule(members, Box::new(PairwiseInteraction::new(alpha)?)),
            None => CombinedDamage::with_rule(members, Box::new(LinearSum)),
        }
    }

    /// Allocates a new instance with a constant interaction weight
    pub fn with_constant_alpha(members: Vec<Arc<dyn ScalarDamageTrait>>, alpha: f64) -> Result<Self, DamageError> {
        CombinedDamage::new(members, Some(Interpolate::Constant(alpha)))
    }

    /// Allocates a new instance with a custom combination rule
    pub fn with_rule(
        members: Vec<Arc<dyn ScalarDamageTrait>>,
        rule: Box<dyn CombinationRule>,
    ) -> Result<Self, DamageError> {
        if members.is_empty() {
            return Err(DamageError::config("combined damage requires at least one member"));
        }
        if members.iter().any(|m| m.ndamage() != 1) {
            return Err(DamageError::config("combined damage members must be scalar (ndamage = 1)"));
        }
        Ok(CombinedDamage { members, rule })
    }

    /// Returns the number of mechanisms
    pub fn n_members(&self) -> usize {
        self.members.len()
    }

    /// Calculates the member increments δᵢ
    pub fn increments(&self, deltas: &mut [f64], d_np1: f64, d_n: f64, step: &DamageStep) -> Result<(), DamageError> {
        DamageError::check_dim(self.members.len(), deltas.len())?;
        for (delta, member) in deltas.iter_mut().zip(&self.members) {
            *delta = member.damage(d_np1, d_n, step)? - d_n;
        }
        Ok(())
    }

    /// Returns the gradient ∂Ψ/∂δᵢ at the trial point
    fn weights(&self, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<Vec<f64>, DamageError> {
        let mut deltas = vec![0.0; self.members.len()];
        self.increments(&mut deltas, d_np1, d_n, step)?;
        let mut dpsi = vec![0.0; self.members.len()];
        self.rule.gradient(&mut dpsi, &deltas, step.tt_np1);
        Ok(dpsi)
    }

    /// Accumulates Σ (∂Ψ/∂δᵢ) (∂Dᵢ/∂x) for a tensor derivative
    fn chain_tensor<F>(
        &self,
        out: &mut Tensor2,
        d_np1: f64,
        d_n: f64,
        step: &DamageStep,
        deriv: F,
    ) -> Result<(), DamageError>
    where
        F: Fn(&dyn ScalarDamageTrait, &mut Tensor2) -> Result<(), DamageError>,
    {
        let weights = self.weights(d_np1, d_n, step)?;
        let mut member_deriv = new_sym();
        out.vector_mut().fill(0.0);
        for (weight, member) in weights.iter().zip(&self.members) {
            deriv(member.as_ref(), &mut member_deriv)?;
            let res = out.vector_mut();
            for i in 0..NSYM {
                res[i] += weight * member_deriv.vector()[i];
            }
        }
        Ok(())
    }
}

impl ScalarDamageTrait for CombinedDamage {
    fn ndamage(&self) -> usize {
        self.members.len()
    }

    fn damage(&self, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<f64, DamageError> {
        let mut deltas = vec![0.0; self.members.len()];
        self.increments(&mut deltas, d_np1, d_n, step)?;
        Ok(d_n + self.rule.combine(&deltas, step.tt_np1))
    }

    fn ddamage_dd(&self, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<f64, DamageError> {
        let weights = self.weights(d_np1, d_n, step)?;
        let mut res = 0.0;
        for (weight, member) in weights.iter().zip(&self.members) {
            res += weight * member.ddamage_dd(d_np1, d_n, step)?;
        }
        Ok(res)
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<(), DamageError> {
        self.chain_tensor(dd_de, d_np1, d_n, step, |member, out| {
            member.ddamage_de(out, d_np1, d_n, step)
        })
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<(), DamageError> {
        self.chain_tensor(dd_ds, d_np1, d_n, step, |member, out| {
            member.ddamage_ds(out, d_np1, d_n, step)
        })
    }

    fn split_damage(
        &self,
        block_np1: &mut [f64],
        block_n: &[f64],
        d_np1: f64,
        d_n: f64,
        step: &DamageStep,
    ) -> Result<(), DamageError> {
        let n = self.members.len();
        DamageError::check_dim(n, block_np1.len())?;
        DamageError::check_dim(n, block_n.len())?;
        let mut deltas = vec![0.0; n];
        self.increments(&mut deltas, d_np1, d_n, step)?;
        let mut shares = vec![0.0; n];
        self.rule.shares(&mut shares, &deltas, step.tt_np1);
        for i in 0..n {
            block_np1[i] = block_n[i] + shares[i];
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{CombinationRule, CombinedDamage, LinearSum, PairwiseInteraction};
    use crate::base::{new_sym, DamageError, Interpolate};
    use crate::damage::testing::{
        assert_rel_eq, assert_same_damage, check_scalar_damage_derivatives, sample_step_data, sample_step_states,
    };
    use crate::damage::{CreepRupture, ExponentialWork, PowerLaw, ScalarDamageTrait};
    use crate::material::ElasticModel;
    use russell_lab::approx_eq;
    use std::sync::Arc;

    fn members() -> Vec<Arc<dyn ScalarDamageTrait>> {
        let elastic = Arc::new(ElasticModel::from_constants(92_000.0, 0.3).unwrap());
        vec![
            Arc::new(PowerLaw::from_constants(8e-6, 2.2).unwrap().into_damage(elastic.clone())),
            Arc::new(ExponentialWork::from_constants(10.0, 1e-4, 2.0).unwrap().into_damage(elastic.clone())),
            Arc::new(CreepRupture::from_constants(1e-9, -3.0, 1.0).unwrap().into_damage(elastic)),
        ]
    }

    #[test]
    fn pairwise_interaction_works() {
        let rule = PairwiseInteraction::new(Interpolate::Constant(0.5)).unwrap();
        let deltas = [0.1, 0.2, 0.3];
        // Ψ = 0.6 + 0.5 (0.02 + 0.03 + 0.06)
        approx_eq(rule.combine(&deltas, 0.0), 0.655, 1e-15);
        let mut dpsi = [0.0; 3];
        rule.gradient(&mut dpsi, &deltas, 0.0);
        approx_eq(dpsi[0], 1.25, 1e-15);
        approx_eq(dpsi[1], 1.2, 1e-15);
        approx_eq(dpsi[2], 1.15, 1e-15);
        let mut shares = [0.0; 3];
        rule.shares(&mut shares, &deltas, 0.0);
        approx_eq(shares.iter().sum::<f64>(), 0.655, 1e-15);

        // single mechanism
        approx_eq(rule.combine(&[0.25], 0.0), 0.25, 1e-15);

        let rule = LinearSum;
        approx_eq(rule.combine(&deltas, 0.0), 0.6, 1e-15);
        rule.gradient(&mut dpsi, &deltas, 0.0);
        assert_eq!(dpsi, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            CombinedDamage::new(Vec::new(), None).err(),
            Some(DamageError::config("combined damage requires at least one member"))
        );
        let nested: Arc<dyn ScalarDamageTrait> = Arc::new(CombinedDamage::new(members(), None).unwrap());
        assert_eq!(
            CombinedDamage::new(vec![nested], None).err(),
            Some(DamageError::config("combined damage members must be scalar (ndamage = 1)"))
        );
        assert_eq!(
            CombinedDamage::new(
                members(),
                Some(Interpolate::PiecewiseLinear {
                    points: vec![0.0],
                    values: vec![1.0]
                })
            )
            .err(),
            Some(DamageError::config("piecewise-linear table requires at least two points"))
        );
    }

    #[test]
    fn init_damage_works() {
        let model = CombinedDamage::with_constant_alpha(members(), 0.5).unwrap();
        assert_eq!(model.ndamage(), 3);
        assert_eq!(model.n_members(), 3);
        assert_eq!(model.init_damage(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn single_member_reproduces_the_member() {
        let member = members().swap_remove(1);
        let model = CombinedDamage::with_constant_alpha(vec![member.clone()], 0.0).unwrap();
        for data in sample_step_states() {
            let step = data.step();
            assert_rel_eq(
                model.damage(0.1, 0.05, &step).unwrap(),
                member.damage(0.1, 0.05, &step).unwrap(),
                1e-14,
            );
            assert_eq!(
                model.ddamage_dd(0.1, 0.05, &step).unwrap(),
                member.ddamage_dd(0.1, 0.05, &step).unwrap()
            );
            let mut a = new_sym();
            let mut b = new_sym();
            model.ddamage_ds(&mut a, 0.1, 0.05, &step).unwrap();
            member.ddamage_ds(&mut b, 0.1, 0.05, &step).unwrap();
            assert_eq!(a.vector().as_data(), b.vector().as_data());
            model.ddamage_de(&mut a, 0.1, 0.05, &step).unwrap();
            member.ddamage_de(&mut b, 0.1, 0.05, &step).unwrap();
            assert_eq!(a.vector().as_data(), b.vector().as_data());
        }
    }

    #[test]
    fn damage_derivatives_are_consistent() {
        let data = sample_step_data();
        let alpha = Interpolate::PiecewiseLinear {
            points: vec![0.0, 1000.0],
            values: vec![0.0, 20.0],
        };
        let model = CombinedDamage::new(members(), Some(alpha)).unwrap();
        check_scalar_damage_derivatives(&model, 0.1, 0.0, &data.step(), 1e-6);
        let model = CombinedDamage::new(members(), None).unwrap();
        check_scalar_damage_derivatives(&model, 0.1, 0.0, &data.step(), 1e-6);
    }

    #[test]
    fn constant_and_interpolated_alpha_match() {
        let by_number = CombinedDamage::with_constant_alpha(members(), 2.5).unwrap();
        let by_function = CombinedDamage::new(
            members(),
            Some(Interpolate::PiecewiseLinear {
                points: vec![0.0, 1000.0],
                values: vec![2.5, 2.5],
            }),
        )
        .unwrap();
        for data in sample_step_states() {
            assert_same_damage(&by_number, &by_function, 0.1, 0.05, &data.step());
        }
    }

    #[test]
    fn split_damage_adds_up_to_the_total() {
        let model = CombinedDamage::with_constant_alpha(members(), 5.0).unwrap();
        let data = sample_step_data();
        let step = data.step();
        let block_n = [0.01, 0.02, 0.03];
        let d_n = 0.06;
        let d_np1 = 0.1;
        let total = model.damage(d_np1, d_n, &step).unwrap();
        let mut block_np1 = [0.0; 3];
        model.split_damage(&mut block_np1, &block_n, d_np1, d_n, &step).unwrap();
        approx_eq(model.total_damage(&block_np1), total, 1e-15);
        for i in 0..3 {
            assert!(block_np1[i] >= block_n[i]);
        }
        assert_eq!(
            model.split_damage(&mut [0.0; 2], &block_n, d_np1, d_n, &step).err(),
            Some(DamageError::Dimension { expected: 3, found: 2 })
        );
    }
}
