use crate::base::{DamageError, SolverSettings};
use russell_lab::{solve_lin_sys, vec_norm, Matrix, Norm, Vector};

/// Specifies a nonlinear system R(x) = 0 solved at each stress update
pub trait Solvable {
    /// Defines the immutable data of one solve
    type Trial;

    /// Returns the number of unknowns
    fn nparams(&self) -> usize;

    /// Sets the initial guess
    fn init_x(&self, x: &mut Vector, trial: &Self::Trial) -> Result<(), DamageError>;

    /// Calculates the residual vector R(x) and the Jacobian matrix J = dR/dx
    fn residual_jacobian(
        &self,
        rr: &mut Vector,
        jj: &mut Matrix,
        x: &Vector,
        trial: &Self::Trial,
    ) -> Result<(), DamageError>;
}

/// Holds the convergence statistics of a successful solve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveStats {
    /// Number of Newton corrections applied
    pub iterations: usize,

    /// Final residual 2-norm
    pub residual: f64,
}

/// Solves a nonlinear system with the Newton-Raphson method
///
/// The unknowns are initialized by [Solvable::init_x]. The solve succeeds when
/// `‖R‖₂ ≤ tol` (or `‖R‖₂/‖R₀‖₂ < tol` if `relative` is set) and fails with
/// [DamageError::Convergence] once `miter` corrections did not reach the tolerance.
pub fn newton<S: Solvable>(
    system: &S,
    x: &mut Vector,
    trial: &S::Trial,
    settings: &SolverSettings,
) -> Result<SolveStats, DamageError> {
    settings.validate()?;
    let n = system.nparams();
    DamageError::check_dim(n, x.dim())?;
    let mut rr = Vector::new(n);
    let mut jj = Matrix::new(n, n);

    // initial residual
    system.init_x(x, trial)?;
    system.residual_jacobian(&mut rr, &mut jj, x, trial)?;
    let mut norm_rr = residual_norm(&rr);
    let norm_rr0 = norm_rr;
    if !norm_rr.is_finite() {
        return Err(DamageError::Convergence {
            iterations: 0,
            residual: norm_rr,
        });
    }
    if settings.verbose {
        println!("{:>5} {:>13} {:>13}", "iter", "‖R‖₂", "rel(J-Jnum)");
        print_iteration(system, x, trial, &jj, 0, norm_rr);
    }

    // iterations
    let mut iteration = 0;
    while norm_rr > settings.tol {
        if settings.relative && norm_rr / norm_rr0 < settings.tol {
            break;
        }
        if iteration == settings.miter {
            return Err(DamageError::Convergence {
                iterations: iteration,
                residual: norm_rr,
            });
        }

        // x ← x - J⁻¹ R
        solve_lin_sys(&mut rr, &mut jj)?;
        for i in 0..n {
            x[i] -= rr[i];
        }

        // update residual
        system.residual_jacobian(&mut rr, &mut jj, x, trial)?;
        norm_rr = residual_norm(&rr);
        iteration += 1;
        if !norm_rr.is_finite() {
            return Err(DamageError::Convergence {
                iterations: iteration,
                residual: norm_rr,
            });
        }
        if settings.verbose {
            print_iteration(system, x, trial, &jj, iteration, norm_rr);
        }
    }
    if settings.verbose {
        println!();
    }
    Ok(SolveStats {
        iterations: iteration,
        residual: norm_rr,
    })
}

/// Returns ‖R‖₂ or NaN if any component is not finite
fn residual_norm(rr: &Vector) -> f64 {
    if rr.as_data().iter().any(|v| !v.is_finite()) {
        return f64::NAN;
    }
    vec_norm(rr, Norm::Euc)
}

/// Calculates the Jacobian matrix using forward differences
///
/// The perturbation of each unknown is `max(eps |xᵢ|, eps)`.
pub fn numerical_jacobian<S: Solvable>(
    system: &S,
    jj_num: &mut Matrix,
    x: &Vector,
    trial: &S::Trial,
    eps: f64,
) -> Result<(), DamageError> {
    let n = system.nparams();
    let mut rr0 = Vector::new(n);
    let mut rr = Vector::new(n);
    let mut work = Matrix::new(n, n);
    system.residual_jacobian(&mut rr0, &mut work, x, trial)?;
    let mut x_pert = x.clone();
    for j in 0..n {
        let dx = f64::max(eps * f64::abs(x[j]), eps);
        x_pert[j] = x[j] + dx;
        system.residual_jacobian(&mut rr, &mut work, &x_pert, trial)?;
        x_pert[j] = x[j];
        for i in 0..n {
            jj_num.set(i, j, (rr[i] - rr0[i]) / dx);
        }
    }
    Ok(())
}

/// Returns Σ(J - Jnum)² / ΣJ² comparing the analytical with the numerical Jacobian
pub fn jacobian_difference<S: Solvable>(
    system: &S,
    x: &Vector,
    trial: &S::Trial,
    jj: &Matrix,
) -> Result<f64, DamageError> {
    let n = system.nparams();
    let mut jj_num = Matrix::new(n, n);
    numerical_jacobian(system, &mut jj_num, x, trial, 1e-6)?;
    let mut diff = 0.0;
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            diff += f64::powi(jj.get(i, j) - jj_num.get(i, j), 2);
            sum += f64::powi(jj.get(i, j), 2);
        }
    }
    Ok(diff / sum)
}

/// Prints iteration information
///
/// The Jacobian difference is shown as n/a if the perturbed residual cannot be evaluated.
fn print_iteration<S: Solvable>(system: &S, x: &Vector, trial: &S::Trial, jj: &Matrix, iteration: usize, norm_rr: f64) {
    match jacobian_difference(system, x, trial, jj) {
        Ok(rel) => println!("{:>5} {:>13.6e} {:>13.6e}", iteration, norm_rr, rel),
        Err(_) => println!("{:>5} {:>13.6e} {:>13}", iteration, norm_rr, "n/a"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{jacobian_difference, newton, numerical_jacobian, Solvable};
    use crate::base::{DamageError, SolverSettings};
    use russell_lab::{approx_eq, Matrix, Vector};

    // R₀ = x₀² + x₁² - c, R₁ = x₀ - x₁
    struct Circle {
        c: f64,
    }

    impl Solvable for Circle {
        type Trial = [f64; 2];
        fn nparams(&self) -> usize {
            2
        }
        fn init_x(&self, x: &mut Vector, trial: &Self::Trial) -> Result<(), DamageError> {
            x[0] = trial[0];
            x[1] = trial[1];
            Ok(())
        }
        fn residual_jacobian(
            &self,
            rr: &mut Vector,
            jj: &mut Matrix,
            x: &Vector,
            _trial: &Self::Trial,
        ) -> Result<(), DamageError> {
            rr[0] = x[0] * x[0] + x[1] * x[1] - self.c;
            rr[1] = x[0] - x[1];
            jj.set(0, 0, 2.0 * x[0]);
            jj.set(0, 1, 2.0 * x[1]);
            jj.set(1, 0, 1.0);
            jj.set(1, 1, -1.0);
            Ok(())
        }
    }

    // R = √x (NaN for x < 0)
    struct Sqrt;

    impl Solvable for Sqrt {
        type Trial = f64;
        fn nparams(&self) -> usize {
            1
        }
        fn init_x(&self, x: &mut Vector, trial: &f64) -> Result<(), DamageError> {
            x[0] = *trial;
            Ok(())
        }
        fn residual_jacobian(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, _: &f64) -> Result<(), DamageError> {
            rr[0] = f64::sqrt(x[0]);
            jj.set(0, 0, 0.5 / f64::sqrt(x[0]));
            Ok(())
        }
    }

    // R = x - r, defined for x < 1 only
    struct Bounded {
        r: f64,
    }

    impl Solvable for Bounded {
        type Trial = f64;
        fn nparams(&self) -> usize {
            1
        }
        fn init_x(&self, x: &mut Vector, trial: &f64) -> Result<(), DamageError> {
            x[0] = *trial;
            Ok(())
        }
        fn residual_jacobian(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, _: &f64) -> Result<(), DamageError> {
            if x[0] >= 1.0 {
                return Err(DamageError::domain("1 - w", 1.0 - x[0]));
            }
            rr[0] = x[0] - self.r;
            jj.set(0, 0, 1.0);
            Ok(())
        }
    }

    #[test]
    fn newton_works() {
        let system = Circle { c: 8.0 };
        let mut x = Vector::new(2);
        let stats = newton(&system, &mut x, &[1.0, 3.0], &SolverSettings::new()).unwrap();
        approx_eq(x[0], 2.0, 1e-9);
        approx_eq(x[1], 2.0, 1e-9);
        assert!(stats.residual <= 1e-8);
        assert_eq!(stats.iterations, 4);
    }

    #[test]
    fn newton_reports_convergence_failures() {
        let system = Circle { c: 8.0 };
        let mut x = Vector::new(2);
        let mut settings = SolverSettings::new();
        settings.set_miter(1).unwrap();
        // after one correction: x = (2.25, 2.25) and R = (2.125, 0)
        match newton(&system, &mut x, &[1.0, 3.0], &settings).err() {
            Some(DamageError::Convergence { iterations, residual }) => {
                assert_eq!(iterations, 1);
                approx_eq(residual, 2.125, 1e-12);
            }
            _ => panic!("convergence failure should be reported"),
        }
        approx_eq(x[0], 2.25, 1e-15);

        settings.set_miter(3).unwrap();
        match newton(&system, &mut x, &[1.0, 3.0], &settings).err() {
            Some(DamageError::Convergence { iterations, .. }) => assert_eq!(iterations, 3),
            _ => panic!("convergence failure should be reported"),
        }
    }

    #[test]
    fn newton_accepts_relative_tolerance() {
        let system = Circle { c: 8.0 };
        let mut x = Vector::new(2);
        let mut settings = SolverSettings::new();
        settings.set_tol(0.05).unwrap();
        // ‖R‖ = 2.83, 2.125, 0.111, 3.8e-4
        let stats = newton(&system, &mut x, &[1.0, 3.0], &settings).unwrap();
        assert_eq!(stats.iterations, 3);
        settings.relative = true;
        let stats = newton(&system, &mut x, &[1.0, 3.0], &settings).unwrap();
        assert_eq!(stats.iterations, 2);
        approx_eq(stats.residual, 0.111496913580, 1e-10);
    }

    #[test]
    fn newton_captures_errors() {
        let mut x = Vector::new(1);
        match newton(&Sqrt, &mut x, &-1.0, &SolverSettings::new()).err() {
            Some(DamageError::Convergence { iterations, residual }) => {
                assert_eq!(iterations, 0);
                assert!(residual.is_nan());
            }
            _ => panic!("non-finite residual should be reported"),
        }
        let mut x = Vector::new(3);
        assert_eq!(
            newton(&Circle { c: 8.0 }, &mut x, &[1.0, 3.0], &SolverSettings::new()).err(),
            Some(DamageError::Dimension { expected: 2, found: 3 })
        );
        let mut settings = SolverSettings::new();
        settings.tol = 0.0;
        let mut x = Vector::new(2);
        assert_eq!(
            newton(&Circle { c: 8.0 }, &mut x, &[1.0, 3.0], &settings).err(),
            Some(DamageError::config("tol must be > 0.0"))
        );
    }

    #[test]
    fn numerical_jacobian_works() {
        let system = Circle { c: 8.0 };
        let x = Vector::from(&[1.5, -0.5]);
        let mut rr = Vector::new(2);
        let mut jj = Matrix::new(2, 2);
        system.residual_jacobian(&mut rr, &mut jj, &x, &[0.0, 0.0]).unwrap();
        let mut jj_num = Matrix::new(2, 2);
        numerical_jacobian(&system, &mut jj_num, &x, &[0.0, 0.0], 1e-7).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                approx_eq(jj_num.get(i, j), jj.get(i, j), 1e-6);
            }
        }
        let rel = jacobian_difference(&system, &x, &[0.0, 0.0], &jj).unwrap();
        assert!(rel < 1e-10);
    }

    #[test]
    fn verbose_mode_does_not_change_the_result() {
        let system = Circle { c: 8.0 };
        let mut x_quiet = Vector::new(2);
        let mut x_verbose = Vector::new(2);
        let quiet = newton(&system, &mut x_quiet, &[1.0, 3.0], &SolverSettings::new()).unwrap();
        let mut settings = SolverSettings::new();
        settings.set_verbose(true);
        let verbose = newton(&system, &mut x_verbose, &[1.0, 3.0], &settings).unwrap();
        assert_eq!(quiet, verbose);
        assert_eq!(x_quiet.as_data(), x_verbose.as_data());
    }

    #[test]
    fn verbose_mode_tolerates_residual_domain_limits() {
        // the forward-difference perturbation of x = 1 - 1e-7 leaves the domain
        let system = Bounded { r: 1.0 - 1e-7 };
        let mut settings = SolverSettings::new();
        let mut x_quiet = Vector::new(1);
        let quiet = newton(&system, &mut x_quiet, &(1.0 - 1e-7), &settings).unwrap();
        settings.set_verbose(true);
        let mut x_verbose = Vector::new(1);
        let verbose = newton(&system, &mut x_verbose, &(1.0 - 1e-7), &settings).unwrap();
        assert_eq!(quiet, verbose);
        assert_eq!(verbose.iterations, 0);
        assert_eq!(x_quiet[0], x_verbose[0]);

        // starting away from the root, the verbose solve still converges
        let mut x = Vector::new(1);
        let stats = newton(&system, &mut x, &0.5, &settings).unwrap();
        assert_eq!(stats.iterations, 1);
        assert!(stats.residual <= 1e-8);
    }
}
