use super::{Coefficient, ParamBase, ParamDamage, ParamDamagedModel, ParamElastic, SolverSettings};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for an elastic steel-like material (MPa)
    pub fn param_elastic() -> ParamElastic {
        ParamElastic {
            young: Coefficient::Number(92_000.0), // MPa
            poisson: Coefficient::Number(0.3),    // [-]
        }
    }

    /// Returns sample parameters for the von Mises base model (MPa)
    pub fn param_von_mises() -> ParamBase {
        ParamBase::VonMises {
            z0: 180.0, // MPa
            hh: 1000.0, // MPa
        }
    }

    /// Returns sample parameters for the creep-rupture law
    pub fn param_creep_rupture() -> ParamDamage {
        ParamDamage::CreepRupture {
            aa: Coefficient::Number(1e-4),
            xi: Coefficient::Number(2.0),
            phi: Coefficient::Number(1.0),
        }
    }

    /// Returns sample parameters for the fatigue law
    pub fn param_mark_fatigue() -> ParamDamage {
        ParamDamage::MarkFatigue {
            cc: Coefficient::Number(1e-7),
            m: Coefficient::Number(2.0),
            n: Coefficient::Number(1.5),
            falpha: Coefficient::Number(0.4),
            fbeta: Coefficient::Number(0.9),
            rate0: Coefficient::Number(0.01),
        }
    }

    /// Returns sample parameters for the power-law damage
    pub fn param_power_law() -> ParamDamage {
        ParamDamage::PowerLaw {
            aa: Coefficient::Number(8e-6),
            a: Coefficient::Number(2.2),
        }
    }

    /// Returns sample parameters for the exponential-work damage
    pub fn param_exponential_work() -> ParamDamage {
        ParamDamage::ExponentialWork {
            ww0: Coefficient::Number(10.0),
            k0: Coefficient::Number(0.0001),
            af: Coefficient::Number(2.0),
        }
    }

    /// Returns sample parameters for a combination of two exponential-work laws
    pub fn param_combined() -> ParamDamage {
        ParamDamage::Combined {
            members: vec![
                SampleParams::param_exponential_work(),
                ParamDamage::ExponentialWork {
                    ww0: Coefficient::Number(10.0),
                    k0: Coefficient::Number(0.001),
                    af: Coefficient::Number(1.5),
                },
            ],
            alpha: None,
        }
    }

    /// Returns sample parameters for a damaged von Mises model
    pub fn param_damaged_model(damage: ParamDamage) -> ParamDamagedModel {
        ParamDamagedModel {
            elastic: SampleParams::param_elastic(),
            base: SampleParams::param_von_mises(),
            damage,
            settings: SolverSettings::new(),
        }
    }
}
