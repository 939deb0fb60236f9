//! Modal (eigenvalue) analysis

use std::f64::consts::PI;

use log::{debug, warn};

use crate::error::{KernelError, KernelResult};
use crate::math::{self, Vec as KVec};
use crate::model::MckSystem;
use crate::results::ModeResult;

/// Natural frequencies and mode shapes of the undamped system
///
/// Solves `(K - ω² M) φ = 0`, keeps the `num_modes` lowest modes with positive
/// eigenvalues (rigid-body modes are skipped), mass-normalises each shape and
/// estimates a damping ratio by modal projection of C,
/// `ζ = φᵀCφ / (2 ω φᵀMφ)`. The projection ignores modal coupling terms, so it
/// is only an estimate for non-proportional damping.
///
/// # Errors
/// * [`KernelError::Validation`] for `num_modes == 0` or a system with no masses
/// * [`KernelError::Reference`] from assembly
/// * [`KernelError::SingularSystem`] when M is not positive definite
pub fn modal_analysis(system: &MckSystem, num_modes: usize) -> KernelResult<ModeResult> {
    if num_modes == 0 {
        return Err(KernelError::Validation(
            "Number of modes must be at least 1".to_string(),
        ));
    }
    if system.num_dofs() == 0 {
        return Err(KernelError::Validation(
            "System has no masses to analyze".to_string(),
        ));
    }

    let mats = system.assemble()?;
    debug!("modal analysis: {} dofs, {} modes requested", mats.num_dofs(), num_modes);

    let eig = math::generalized_symmetric_eigen(&mats.stiffness, &mats.mass)?;
    let available = eig.eigenvalues.len();
    if available < num_modes {
        warn!(
            "modal analysis: requested {} modes but only {} non-rigid modes exist",
            num_modes, available
        );
    }
    let count = available.min(num_modes);

    let mut result = ModeResult {
        nodes: mats.dofs.clone(),
        ..ModeResult::default()
    };

    for (i, &lambda) in eig.eigenvalues.iter().take(count).enumerate() {
        let omega = lambda.sqrt();
        let phi: KVec = eig.eigenvectors.column(i).into_owned();

        let modal_mass = math::quadratic_form(&mats.mass, &phi);
        let modal_damping = math::quadratic_form(&mats.damping, &phi);

        result.frequencies.push(omega / (2.0 * PI));
        result.damping_ratios.push(modal_damping / (2.0 * omega * modal_mass));
        result.mode_shapes.push(phi.iter().copied().collect());
    }

    Ok(result)
}
