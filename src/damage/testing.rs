use super::{DamageStep, ScalarDamageTrait};
use crate::base::{new_sym, sym_from_slice, NSYM};
use russell_tensor::Tensor2;

/// Holds the data of one step to build a [DamageStep] in tests
pub(crate) struct StepData {
    pub e_np1: Tensor2,
    pub e_n: Tensor2,
    pub s_np1: Tensor2,
    pub s_n: Tensor2,
    pub tt_np1: f64,
    pub tt_n: f64,
    pub t_np1: f64,
    pub t_n: f64,
}

impl StepData {
    /// Returns the damage-law view of the data
    pub fn step(&self) -> DamageStep {
        DamageStep::new(
            &self.e_np1,
            &self.e_n,
            &self.s_np1,
            &self.s_n,
            self.tt_np1,
            self.tt_n,
            self.t_np1,
            self.t_n,
        )
        .unwrap()
    }
}

/// Returns a step with a significant inelastic strain increment
pub(crate) fn sample_step_data() -> StepData {
    StepData {
        e_np1: sym_from_slice(&[0.012, -0.004, -0.003, 0.002, 0.0, 0.001]).unwrap(),
        e_n: sym_from_slice(&[0.002, -0.001, -0.0005, 0.0005, 0.0, 0.0]).unwrap(),
        s_np1: sym_from_slice(&[150.0, 20.0, -10.0, 30.0, 5.0, 12.0]).unwrap(),
        s_n: sym_from_slice(&[100.0, 0.0, 0.0, 10.0, 0.0, 0.0]).unwrap(),
        tt_np1: 300.0,
        tt_n: 290.0,
        t_np1: 2.5,
        t_n: 1.0,
    }
}

/// Returns five different steps (distinct stresses, strains, temperatures, and times)
pub(crate) fn sample_step_states() -> Vec<StepData> {
    (0..5)
        .map(|k| {
            let c = k as f64;
            StepData {
                e_np1: sym_from_slice(&[
                    0.01 + 0.002 * c,
                    -0.004,
                    -0.003 + 0.0005 * c,
                    0.002,
                    0.0001 * c,
                    0.001,
                ])
                .unwrap(),
                e_n: sym_from_slice(&[0.002, -0.001, -0.0005, 0.0005, 0.0, 0.0]).unwrap(),
                s_np1: sym_from_slice(&[120.0 + 15.0 * c, 20.0 - 5.0 * c, -10.0, 30.0, 5.0 * c, 12.0]).unwrap(),
                s_n: sym_from_slice(&[100.0, 0.0, 0.0, 10.0, 0.0, 0.0]).unwrap(),
                tt_np1: 300.0 + 50.0 * c,
                tt_n: 290.0 + 50.0 * c,
                t_np1: 2.0 + c,
                t_n: 1.0,
            }
        })
        .collect()
}

/// Computes a central-difference derivative with a step scaled by x
pub(crate) fn central_diff<F>(x: f64, mut f: F) -> f64
where
    F: FnMut(f64) -> f64,
{
    let h = 1e-6 * f64::max(1.0, f64::abs(x));
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Asserts that two numbers agree within a relative tolerance
pub(crate) fn assert_rel_eq(a: f64, b: f64, rtol: f64) {
    let diff = f64::abs(a - b);
    let scale = f64::max(f64::abs(a), f64::abs(b));
    assert!(diff <= rtol * scale || diff < 1e-20, "{:?} != {:?} (rtol = {:?})", a, b, rtol);
}

/// Asserts that two vectors agree within a tolerance relative to their largest component
pub(crate) fn assert_vec_rel_eq(a: &[f64], b: &[f64], rtol: f64) {
    assert_eq!(a.len(), b.len());
    let scale = b.iter().fold(0.0, |acc: f64, v| acc.max(f64::abs(*v)));
    for i in 0..a.len() {
        let diff = f64::abs(a[i] - b[i]);
        assert!(
            diff <= rtol * scale || diff < 1e-20,
            "component {}: {:?} != {:?} (rtol = {:?})",
            i,
            a[i],
            b[i],
            rtol
        );
    }
}

/// Checks the analytical derivatives of a scalar damage model against central differences
pub(crate) fn check_scalar_damage_derivatives(
    model: &dyn ScalarDamageTrait,
    d_np1: f64,
    d_n: f64,
    step: &DamageStep,
    rtol: f64,
) {
    // w.r.t damage
    let ana = model.ddamage_dd(d_np1, d_n, step).unwrap();
    let num = central_diff(d_np1, |d| model.damage(d, d_n, step).unwrap());
    assert_rel_eq(ana, num, rtol);

    // w.r.t strain
    let mut ana = new_sym();
    model.ddamage_de(&mut ana, d_np1, d_n, step).unwrap();
    let mut num = [0.0; NSYM];
    for i in 0..NSYM {
        num[i] = central_diff(step.e_np1.vector()[i], |x| {
            let mut e = step.e_np1.clone();
            e.vector_mut()[i] = x;
            model.damage(d_np1, d_n, &step.with_strain(&e)).unwrap()
        });
    }
    assert_vec_rel_eq(ana.vector().as_data(), &num, rtol);

    // w.r.t stress
    let mut ana = new_sym();
    model.ddamage_ds(&mut ana, d_np1, d_n, step).unwrap();
    for i in 0..NSYM {
        num[i] = central_diff(step.s_np1.vector()[i], |x| {
            let mut s = step.s_np1.clone();
            s.vector_mut()[i] = x;
            model.damage(d_np1, d_n, &step.with_stress(&s)).unwrap()
        });
    }
    assert_vec_rel_eq(ana.vector().as_data(), &num, rtol);
}

/// Asserts that two models give identical damage values and derivatives
pub(crate) fn assert_same_damage(
    a: &dyn ScalarDamageTrait,
    b: &dyn ScalarDamageTrait,
    d_np1: f64,
    d_n: f64,
    step: &DamageStep,
) {
    assert_eq!(a.damage(d_np1, d_n, step).unwrap(), b.damage(d_np1, d_n, step).unwrap());
    assert_eq!(a.ddamage_dd(d_np1, d_n, step).unwrap(), b.ddamage_dd(d_np1, d_n, step).unwrap());
    let mut va = new_sym();
    let mut vb = new_sym();
    a.ddamage_de(&mut va, d_np1, d_n, step).unwrap();
    b.ddamage_de(&mut vb, d_np1, d_n, step).unwrap();
    assert_eq!(va.vector().as_data(), vb.vector().as_data());
    a.ddamage_ds(&mut va, d_np1, d_n, step).unwrap();
    b.ddamage_ds(&mut vb, d_np1, d_n, step).unwrap();
    assert_eq!(va.vector().as_data(), vb.vector().as_data());
}
