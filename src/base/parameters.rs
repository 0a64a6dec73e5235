use super::{Interpolate, SolverSettings};
use serde::{Deserialize, Serialize};

/// Holds a coefficient given either as a plain number or as an interpolation function
///
/// The JSON form is either `3.0` or, e.g., `{"PiecewiseLinear": {"points": [...], "values": [...]}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    Number(f64),
    Function(Interpolate),
}

impl Coefficient {
    /// Converts the coefficient into an interpolation function
    pub fn to_interpolate(&self) -> Interpolate {
        match self {
            Coefficient::Number(v) => Interpolate::Constant(*v),
            Coefficient::Function(f) => f.clone(),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient::Number(value)
    }
}

/// Parameters for the (isotropic) elastic model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamElastic {
    pub young: Coefficient,   // Young's modulus E(T)
    pub poisson: Coefficient, // Poisson's coefficient ν(T)
}

/// Parameters for the damage-free (base) stress-strain model
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamBase {
    LinearElastic,
    VonMises {
        z0: f64, // initial size of the yield surface (von Mises stress)
        hh: f64, // linear isotropic hardening coefficient
    },
}

/// Parameters for scalar damage laws
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamDamage {
    /// f = A σe^(-ξ) (1 - d)^(-φ) (time-driven)
    CreepRupture {
        aa: Coefficient,  // A
        xi: Coefficient,  // ξ
        phi: Coefficient, // φ
    },

    /// f = (C / rate0) ⟨σe + fα σm⟩^m (1 - fβ d)^(-n)
    MarkFatigue {
        cc: Coefficient,     // C
        m: Coefficient,      // stress exponent
        n: Coefficient,      // damage exponent
        falpha: Coefficient, // mean-stress sensitivity
        fbeta: Coefficient,  // damage acceleration
        rate0: Coefficient,  // reference inelastic strain
    },

    /// f = A σe^a
    PowerLaw {
        aa: Coefficient, // A
        a: Coefficient,  // exponent
    },

    /// f = (d + k0)^af σe / W0
    ExponentialWork {
        ww0: Coefficient, // W0
        k0: Coefficient,  // damage offset
        af: Coefficient,  // exponent
    },

    /// Combination of scalar damage laws
    Combined {
        members: Vec<ParamDamage>,
        #[serde(default)]
        alpha: Option<Coefficient>, // pairwise interaction weight (absent = no interaction)
    },
}

/// Parameters for a damage-coupled stress-strain model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamDamagedModel {
    pub elastic: ParamElastic,
    pub base: ParamBase,
    pub damage: ParamDamage,
    #[serde(default)]
    pub settings: SolverSettings,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
