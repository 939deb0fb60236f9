//! Harmonic (steady-state frequency response) analysis

use log::{debug, trace};

use super::FrequencySweep;
use crate::error::{KernelError, KernelResult};
use crate::math;
use crate::model::MckSystem;
use crate::results::{HarmonicResult, ResponseChannel};

/// Frequency response over `num_points` angular frequencies spanning `range`
///
/// See [`harmonic_response_with`].
pub fn harmonic_response(
    system: &MckSystem,
    range: [f64; 2],
    num_points: usize,
) -> KernelResult<HarmonicResult> {
    harmonic_response_with(system, &FrequencySweep::new(range[0], range[1], num_points))
}

/// Frequency response for every force of `system` over `sweep`
///
/// Each sample solves `(K - ω²M + jωC) X = F` for all force columns at once
/// and records `20 log10 |X|` and the phase in degrees for every
/// (force, node) pair. Samples are independent of each other. Magnitudes near
/// an undamped resonance can be very large; a response that is exactly zero
/// yields `-inf` dB.
///
/// # Errors
/// * [`KernelError::Validation`] for an invalid sweep or a system with no
///   masses or no forces
/// * [`KernelError::Reference`] from assembly
/// * [`KernelError::SingularSystem`] if the dynamic stiffness is exactly
///   singular at a sample
pub fn harmonic_response_with(
    system: &MckSystem,
    sweep: &FrequencySweep,
) -> KernelResult<HarmonicResult> {
    let omegas = sweep.samples()?;
    if system.num_dofs() == 0 {
        return Err(KernelError::Validation(
            "System has no masses to analyze".to_string(),
        ));
    }
    if system.forces.is_empty() {
        return Err(KernelError::Validation(
            "Harmonic analysis needs at least one force".to_string(),
        ));
    }

    let mats = system.assemble()?;
    let forces = math::to_complex(&system.force_matrix()?);
    let n = mats.num_dofs();

    debug!(
        "harmonic analysis: {} dofs, {} forces, {} samples in [{}, {}] rad/s",
        n,
        system.forces.len(),
        omegas.len(),
        sweep.omega_min,
        sweep.omega_max
    );

    let channels: Vec<ResponseChannel> = system
        .forces
        .iter()
        .flat_map(|force| {
            mats.dofs.iter().map(move |node| ResponseChannel {
                force: force.id.clone(),
                node: node.clone(),
            })
        })
        .collect();

    let mut magnitude_db = vec![Vec::with_capacity(omegas.len()); channels.len()];
    let mut phase_deg = vec![Vec::with_capacity(omegas.len()); channels.len()];

    for &omega in &omegas {
        let dynamic = math::dynamic_stiffness(&mats.mass, &mats.stiffness, &mats.damping, omega);
        let x = dynamic.lu().solve(&forces).ok_or_else(|| {
            KernelError::SingularSystem(format!(
                "Dynamic stiffness is singular at omega = {} rad/s",
                omega
            ))
        })?;
        trace!("harmonic sample omega = {}", omega);

        for col in 0..x.ncols() {
            for row in 0..n {
                let value = x[(row, col)];
                let channel = col * n + row;
                magnitude_db[channel].push(20.0 * value.norm().log10());
                phase_deg[channel].push(value.im.atan2(value.re).to_degrees());
            }
        }
    }

    Ok(HarmonicResult {
        frequency: omegas,
        magnitude_db,
        phase_deg,
        channels,
    })
}
