//! Primitives for 6-component symmetric tensors in Mandel representation
//!
//! All stress and strain arguments are [Tensor2] with [Mandel::Symmetric], i.e.,
//!
//! ```text
//! {T} = (T₀₀, T₁₁, T₂₂, √2 T₀₁, √2 T₁₂, √2 T₀₂)
//! ```
//!
//! Thus, the double-dot product of two tensors is the plain inner product of their components.

use super::DamageError;
use russell_lab::vec_inner;
use russell_tensor::{Mandel, Tensor2, IDENTITY2};

/// Holds the number of components of a symmetric tensor
pub const NSYM: usize = 6;

/// Allocates a new zero symmetric tensor
pub fn new_sym() -> Tensor2 {
    Tensor2::new(Mandel::Symmetric)
}

/// Allocates a symmetric tensor from its Mandel components
pub fn sym_from_slice(components: &[f64]) -> Result<Tensor2, DamageError> {
    DamageError::check_dim(NSYM, components.len())?;
    let mut tt = new_sym();
    let vec = tt.vector_mut();
    for i in 0..NSYM {
        vec[i] = components[i];
    }
    Ok(tt)
}

/// Returns the Mandel components of a symmetric tensor
pub fn sym_to_array(tt: &Tensor2) -> [f64; NSYM] {
    let mut res = [0.0; NSYM];
    let vec = tt.vector();
    for i in 0..NSYM {
        res[i] = vec[i];
    }
    res
}

/// Checks that a tensor has 6 (symmetric Mandel) components
pub fn check_sym(tt: &Tensor2) -> Result<(), DamageError> {
    DamageError::check_dim(NSYM, tt.vector().dim())
}

/// Returns the double-dot product a : b
pub fn ddot(a: &Tensor2, b: &Tensor2) -> f64 {
    vec_inner(a.vector(), b.vector())
}

/// Calculates the deviator s = σ - σm I
pub fn deviator(s: &mut Tensor2, sigma: &Tensor2) {
    let sigma_m = sigma.invariant_sigma_m();
    let out = s.vector_mut();
    let inp = sigma.vector();
    for i in 0..NSYM {
        out[i] = inp[i] - sigma_m * IDENTITY2[i];
    }
}

/// Returns the von Mises equivalent stress σe = √(3/2 s:s)
pub fn equivalent_stress(sigma: &Tensor2) -> f64 {
    sigma.invariant_sigma_d()
}

/// Calculates the derivative of the von Mises equivalent stress
///
/// ```text
/// dσe/dσ = 3/2 s / σe
/// ```
///
/// Returns false if σe = 0, in which case the derivative is undefined and set to zero.
pub fn deriv_equivalent_stress(d1: &mut Tensor2, sigma: &Tensor2) -> bool {
    let sigma_e = equivalent_stress(sigma);
    if sigma_e == 0.0 {
        d1.vector_mut().fill(0.0);
        return false;
    }
    deviator(d1, sigma);
    let out = d1.vector_mut();
    for i in 0..NSYM {
        out[i] *= 1.5 / sigma_e;
    }
    true
}

/// Calculates the derivative of the mean stress: dσm/dσ = I/3
pub fn deriv_mean_stress(d1: &mut Tensor2) {
    let out = d1.vector_mut();
    for i in 0..NSYM {
        out[i] = IDENTITY2[i] / 3.0;
    }
}

/// Returns the equivalent (inelastic) strain measure √(2/3 ε:ε)
pub fn equivalent_strain(epsilon: &Tensor2) -> f64 {
    f64::sqrt(2.0 / 3.0 * ddot(epsilon, epsilon))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
