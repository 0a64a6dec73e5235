use super::{CombinedDamage, CreepRupture, DamageStep, ExponentialWork, MarkFatigue, PowerLaw};
use crate::base::{DamageError, ParamDamage};
use crate::material::ElasticModel;
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Specifies the essential functions of scalar damage models
///
/// The damage value returned by [ScalarDamageTrait::damage] is the implicit end-of-step
/// value `D(d_np1, d_n, ...)`; a damage-coupled update solves `w = D(w, w_n, ...)`.
///
/// All stress arguments (held by [DamageStep]) are effective (undamaged) stresses.
/// Implementations hold only immutable parameters; thus, they can be shared among threads.
pub trait ScalarDamageTrait: Send + Sync {
    /// Returns the number of damage variables stored in the history
    fn ndamage(&self) -> usize {
        1
    }

    /// Returns the damage block at time zero
    fn init_damage(&self) -> Vec<f64> {
        vec![0.0; self.ndamage()]
    }

    /// Computes the end-of-step damage value
    fn damage(&self, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<f64, DamageError>;

    /// Computes the derivative of the damage value w.r.t d_np1
    fn ddamage_dd(&self, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<f64, DamageError>;

    /// Computes the derivative of the damage value w.r.t the end-of-step strain
    fn ddamage_de(&self, dd_de: &mut Tensor2, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<(), DamageError>;

    /// Computes the derivative of the damage value w.r.t the end-of-step (effective) stress
    fn ddamage_ds(&self, dd_ds: &mut Tensor2, d_np1: f64, d_n: f64, step: &DamageStep) -> Result<(), DamageError>;

    /// Distributes a converged total damage value into the damage block
    ///
    /// `d_np1` is the converged total damage and `d_n` is the total damage at the beginning
    /// of the step, i.e., the sum of `block_n`.
    fn split_damage(
        &self,
        block_np1: &mut [f64],
        block_n: &[f64],
        d_np1: f64,
        _d_n: f64,
        _step: &DamageStep,
    ) -> Result<(), DamageError> {
        DamageError::check_dim(self.ndamage(), block_np1.len())?;
        DamageError::check_dim(self.ndamage(), block_n.len())?;
        block_np1[0] = d_np1;
        Ok(())
    }

    /// Returns the total damage corresponding to a damage block
    fn total_damage(&self, block: &[f64]) -> f64 {
        block.iter().sum()
    }
}

/// Allocates a scalar damage model from parameters
pub fn new_damage_law(
    param: &ParamDamage,
    elastic: Arc<ElasticModel>,
) -> Result<Arc<dyn ScalarDamageTrait>, DamageError> {
    let model: Arc<dyn ScalarDamageTrait> = match param {
        ParamDamage::CreepRupture { aa, xi, phi } => Arc::new(
            CreepRupture::new(aa.to_interpolate(), xi.to_interpolate(), phi.to_interpolate())?.into_damage(elastic),
        ),
        ParamDamage::MarkFatigue {
            cc,
            m,
            n,
            falpha,
            fbeta,
            rate0,
        } => Arc::new(
            MarkFatigue::new(
                cc.to_interpolate(),
                m.to_interpolate(),
                n.to_interpolate(),
                falpha.to_interpolate(),
                fbeta.to_interpolate(),
                rate0.to_interpolate(),
            )?
            .into_damage(elastic),
        ),
        ParamDamage::PowerLaw { aa, a } => {
            Arc::new(PowerLaw::new(aa.to_interpolate(), a.to_interpolate())?.into_damage(elastic))
        }
        ParamDamage::ExponentialWork { ww0, k0, af } => Arc::new(
            ExponentialWork::new(ww0.to_interpolate(), k0.to_interpolate(), af.to_interpolate())?
                .into_damage(elastic),
        ),
        ParamDamage::Combined { members, alpha } => {
            let members = members
                .iter()
                .map(|member| new_damage_law(member, elastic.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(CombinedDamage::new(members, alpha.as_ref().map(|a| a.to_interpolate()))?)
        }
    };
    Ok(model)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{new_damage_law, ScalarDamageTrait};
    use crate::base::{new_sym, Coefficient, DamageError, ParamDamage, SampleParams};
    use crate::damage::DamageStep;
    use crate::material::ElasticModel;
    use russell_tensor::Tensor2;
    use std::sync::Arc;

    // d = d_n + c dt
    struct Linear {
        c: f64,
    }

    impl ScalarDamageTrait for Linear {
        fn damage(&self, _d_np1: f64, d_n: f64, step: &DamageStep) -> Result<f64, DamageError> {
            Ok(d_n + self.c * step.dt())
        }
        fn ddamage_dd(&self, _d_np1: f64, _d_n: f64, _step: &DamageStep) -> Result<f64, DamageError> {
            Ok(0.0)
        }
        fn ddamage_de(&self, dd_de: &mut Tensor2, _: f64, _: f64, _: &DamageStep) -> Result<(), DamageError> {
            dd_de.vector_mut().fill(0.0);
            Ok(())
        }
        fn ddamage_ds(&self, dd_ds: &mut Tensor2, _: f64, _: f64, _: &DamageStep) -> Result<(), DamageError> {
            dd_ds.vector_mut().fill(0.0);
            Ok(())
        }
    }

    #[test]
    fn default_methods_work() {
        let model = Linear { c: 0.5 };
        assert_eq!(model.ndamage(), 1);
        assert_eq!(model.init_damage(), vec![0.0]);
        let zero = new_sym();
        let step = DamageStep::new(&zero, &zero, &zero, &zero, 0.0, 0.0, 2.0, 0.0).unwrap();
        let d = model.damage(0.0, 0.1, &step).unwrap();
        assert_eq!(d, 1.1);
        let mut block = vec![0.0];
        model.split_damage(&mut block, &[0.1], d, 0.1, &step).unwrap();
        assert_eq!(block, vec![1.1]);
        assert_eq!(model.total_damage(&block), 1.1);
        assert_eq!(
            model.split_damage(&mut [0.0, 0.0], &[0.1], d, 0.1, &step).err(),
            Some(DamageError::Dimension { expected: 1, found: 2 })
        );
    }

    #[test]
    fn new_damage_law_works() {
        let elastic = Arc::new(ElasticModel::from_constants(92_000.0, 0.3).unwrap());
        for param in [
            SampleParams::param_creep_rupture(),
            SampleParams::param_mark_fatigue(),
            SampleParams::param_power_law(),
            SampleParams::param_exponential_work(),
        ] {
            let model = new_damage_law(&param, elastic.clone()).unwrap();
            assert_eq!(model.ndamage(), 1);
            assert_eq!(model.init_damage(), vec![0.0]);
        }
        let model = new_damage_law(&SampleParams::param_combined(), elastic.clone()).unwrap();
        assert_eq!(model.ndamage(), 2);
        assert_eq!(model.init_damage(), vec![0.0, 0.0]);

        let param = ParamDamage::Combined {
            members: Vec::new(),
            alpha: Some(Coefficient::Number(1.0)),
        };
        assert_eq!(
            new_damage_law(&param, elastic).err(),
            Some(DamageError::config("combined damage requires at least one member"))
        );
    }
}
