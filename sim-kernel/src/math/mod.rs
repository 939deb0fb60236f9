//! Mathematical utilities for the dynamics solvers

use nalgebra::{Complex, DMatrix, DVector};

use crate::error::{KernelError, KernelResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
/// Complex matrix used by the frequency-domain solver
pub type CMat = DMatrix<Complex<f64>>;

/// Eigenvalues within this many `n · ε · max|λ|` units of zero are rigid-body modes
const RIGID_MODE_ROUNDOFF_FACTOR: f64 = 100.0;

/// Solve a linear system using Cholesky decomposition (for symmetric positive definite)
pub fn solve_cholesky(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().cholesky().map(|chol| chol.solve(b))
}

/// Build the complex dynamic stiffness matrix `K - ω²M + jωC`
pub fn dynamic_stiffness(m: &Mat, k: &Mat, c: &Mat, omega: f64) -> CMat {
    let w2 = omega * omega;
    CMat::from_fn(k.nrows(), k.ncols(), |i, j| {
        Complex::new(k[(i, j)] - w2 * m[(i, j)], omega * c[(i, j)])
    })
}

/// Promote a real matrix to a complex one
pub fn to_complex(a: &Mat) -> CMat {
    a.map(|v| Complex::new(v, 0.0))
}

/// Quadratic form `xᵀ A x`
pub fn quadratic_form(a: &Mat, x: &Vec) -> f64 {
    x.dot(&(a * x))
}

/// Solution of the generalized eigenproblem `K φ = λ M φ`
///
/// Only strictly positive eigenvalues are kept, sorted ascending. Column `i`
/// of `eigenvectors` belongs to `eigenvalues[i]` and is normalised so that
/// `φᵀ M φ = 1`.
#[derive(Debug, Clone)]
pub struct GeneralizedEigen {
    pub eigenvalues: std::vec::Vec<f64>,
    pub eigenvectors: Mat,
}

/// Solve `K φ = λ M φ` for symmetric K and symmetric positive definite M
///
/// The problem is reduced to standard form with the Cholesky factor of M:
/// `M = L Lᵀ`, `K* = L⁻¹ K L⁻ᵀ`, `K* ψ = λ ψ`, `φ = L⁻ᵀ ψ`.
pub fn generalized_symmetric_eigen(k: &Mat, m: &Mat) -> KernelResult<GeneralizedEigen> {
    let n = m.nrows();
    if n == 0 {
        return Err(KernelError::Validation(
            "Cannot solve an eigenproblem with zero degrees of freedom".to_string(),
        ));
    }

    let chol = m.clone().cholesky().ok_or_else(|| {
        KernelError::SingularSystem(
            "Mass matrix is not positive definite (massless node?)".to_string(),
        )
    })?;

    let l_inv = chol
        .l()
        .try_inverse()
        .ok_or_else(|| KernelError::SingularSystem("Failed to invert Cholesky factor".to_string()))?;

    let k_star = &l_inv * k * l_inv.transpose();
    // Restore exact symmetry lost to round-off before the symmetric solver
    let k_star = (&k_star + k_star.transpose()) * 0.5;

    let eigen = k_star.symmetric_eigen();
    let l_inv_t = l_inv.transpose();

    let max_abs = eigen
        .eigenvalues
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    // Round-off floor of the reduced eigenproblem; anything above it is a real mode
    let threshold = RIGID_MODE_ROUNDOFF_FACTOR * n as f64 * f64::EPSILON * max_abs;

    let mut pairs: std::vec::Vec<(f64, Vec)> = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .filter(|&(_, &lambda)| lambda > threshold && lambda > 0.0)
        .map(|(i, &lambda)| {
            let psi: Vec = eigen.eigenvectors.column(i).into_owned();
            (lambda, &l_inv_t * psi)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut eigenvectors = Mat::zeros(n, pairs.len());
    for (col, (_, phi)) in pairs.iter().enumerate() {
        let scale = quadratic_form(m, phi).sqrt();
        let mut phi = phi / scale;

        // Sign convention: largest component positive
        let pivot = phi.iamax();
        if phi[pivot] < 0.0 {
            phi.neg_mut();
        }
        eigenvectors.set_column(col, &phi);
    }

    Ok(GeneralizedEigen {
        eigenvalues: pairs.into_iter().map(|(lambda, _)| lambda).collect(),
        eigenvectors,
    })
}
