//! Transient (time-domain) analysis using Newmark-β integration
//!
//! Integrates `M ẍ + C ẋ + K x = F(t)` from rest. With the default average
//! acceleration parameters (β = 1/4, γ = 1/2) the scheme is unconditionally
//! stable for linear systems. The step size is taken from consecutive entries
//! of the time vector, so non-uniform steps are allowed.

use std::collections::HashMap;

use log::{debug, trace};
use nalgebra::linalg::LU;
use nalgebra::Dyn;

use super::NewmarkParams;
use crate::error::{KernelError, KernelResult};
use crate::loads::TransientForce;
use crate::math::{self, Mat, Vec as KVec};
use crate::model::MckSystem;
use crate::results::TransientResult;

/// Integration coefficients for one step size
struct StepCoefficients {
    dt: f64,
    a0: f64,
    a1: f64,
    a2: f64,
    a3: f64,
    a4: f64,
    a5: f64,
}

impl StepCoefficients {
    fn new(params: &NewmarkParams, dt: f64) -> Self {
        let (beta, gamma) = (params.beta, params.gamma);
        Self {
            dt,
            a0: 1.0 / (beta * dt * dt),
            a1: gamma / (beta * dt),
            a2: 1.0 / (beta * dt),
            a3: 1.0 / (2.0 * beta) - 1.0,
            a4: gamma / beta - 1.0,
            a5: dt / 2.0 * (gamma / beta - 2.0),
        }
    }
}

/// Transient response to sampled forces on a shared time vector
///
/// `forces_per_node` maps a mass id to its force at each entry of `time`;
/// masses without an entry are unforced. Uses the average acceleration
/// Newmark parameters.
pub fn transient_response(
    system: &MckSystem,
    time: &[f64],
    forces_per_node: &HashMap<String, Vec<f64>>,
) -> KernelResult<TransientResult> {
    transient_response_with(system, time, forces_per_node, &NewmarkParams::default())
}

/// Transient response with explicit Newmark parameters
///
/// # Errors
/// * [`KernelError::Validation`] for an empty or non-increasing time vector,
///   a force series whose length differs from `time`, or invalid parameters
/// * [`KernelError::Reference`] for a force on an unknown mass
/// * [`KernelError::SingularSystem`] if M or the effective stiffness is singular
pub fn transient_response_with(
    system: &MckSystem,
    time: &[f64],
    forces_per_node: &HashMap<String, Vec<f64>>,
    params: &NewmarkParams,
) -> KernelResult<TransientResult> {
    params.validate()?;
    if time.is_empty() {
        return Err(KernelError::Validation("Time vector is empty".to_string()));
    }
    if time.iter().any(|t| !t.is_finite()) || time.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(KernelError::Validation(
            "Time vector must be finite and strictly increasing".to_string(),
        ));
    }
    if system.num_dofs() == 0 {
        return Err(KernelError::Validation(
            "System has no masses to analyze".to_string(),
        ));
    }

    let mats = system.assemble()?;
    let n = mats.num_dofs();
    let loads = load_history(system, time, forces_per_node)?;

    debug!(
        "transient analysis: {} dofs, {} samples over [{}, {}]",
        n,
        time.len(),
        time[0],
        time[time.len() - 1]
    );

    let (m, k, c) = (&mats.mass, &mats.stiffness, &mats.damping);

    // Start from rest: a₀ = M⁻¹ (F₀ - C v₀ - K u₀) = M⁻¹ F₀
    let mut u = KVec::zeros(n);
    let mut v = KVec::zeros(n);
    let mut a = math::solve_cholesky(m, &loads.column(0).into_owned()).ok_or_else(|| {
        KernelError::SingularSystem(
            "Mass matrix is not positive definite (massless node?)".to_string(),
        )
    })?;

    let mut displacement = Mat::zeros(n, time.len());
    let mut velocity = Mat::zeros(n, time.len());
    let mut acceleration = Mat::zeros(n, time.len());
    acceleration.set_column(0, &a);

    let mut cached: Option<(StepCoefficients, LU<f64, Dyn, Dyn>)> = None;

    for step in 1..time.len() {
        let dt = time[step] - time[step - 1];

        // Refactor K_eff only when the step size changes
        let (coef, lu) = match cached.take() {
            Some((coef, lu)) if coef.dt == dt => (coef, lu),
            _ => {
                let coef = StepCoefficients::new(params, dt);
                let k_eff = k + c * coef.a1 + m * coef.a0;
                (coef, k_eff.lu())
            }
        };

        let f_eff = loads.column(step).into_owned()
            + m * (&u * coef.a0 + &v * coef.a2 + &a * coef.a3)
            + c * (&u * coef.a1 + &v * coef.a4 + &a * coef.a5);

        let u_next = lu.solve(&f_eff).ok_or_else(|| {
            KernelError::SingularSystem(format!(
                "Effective stiffness is singular at t = {}",
                time[step]
            ))
        })?;
        let a_next = (&u_next - &u) * coef.a0 - &v * coef.a2 - &a * coef.a3;
        let v_next = &v + (&a * (1.0 - params.gamma) + &a_next * params.gamma) * coef.dt;

        trace!("transient step {} (t = {}, dt = {})", step, time[step], dt);

        u = u_next;
        v = v_next;
        a = a_next;

        displacement.set_column(step, &u);
        velocity.set_column(step, &v);
        acceleration.set_column(step, &a);

        cached = Some((coef, lu));
    }

    Ok(TransientResult {
        time: time.to_vec(),
        displacement: rows(&displacement),
        velocity: rows(&velocity),
        acceleration: rows(&acceleration),
        nodes: mats.dofs,
    })
}

/// Transient response to a set of sampled force histories
///
/// The analysis time vector is the sorted union of every history's sample
/// times. Each history is interpolated onto it (zero outside its own span)
/// and histories on the same node are summed.
///
/// # Errors
/// * [`KernelError::Validation`] if `forces` is empty or a history is malformed
/// * everything [`transient_response`] can return
pub fn run_transient_analysis(
    system: &MckSystem,
    forces: &[TransientForce],
) -> KernelResult<TransientResult> {
    if forces.is_empty() {
        return Err(KernelError::Validation(
            "Transient analysis needs at least one force history".to_string(),
        ));
    }
    for force in forces {
        force.validate()?;
    }

    let mut time: Vec<f64> = forces.iter().flat_map(|f| f.time.iter().copied()).collect();
    time.sort_by(|a, b| a.total_cmp(b));
    time.dedup();

    let mut per_node: HashMap<String, Vec<f64>> = HashMap::new();
    for force in forces {
        let series = per_node
            .entry(force.node_id.clone())
            .or_insert_with(|| vec![0.0; time.len()]);
        for (value, &t) in series.iter_mut().zip(&time) {
            *value += force.value_at(t);
        }
    }

    transient_response(system, &time, &per_node)
}

/// Force matrix with one row per dof and one column per time sample
fn load_history(
    system: &MckSystem,
    time: &[f64],
    forces_per_node: &HashMap<String, Vec<f64>>,
) -> KernelResult<Mat> {
    let mut loads = Mat::zeros(system.num_dofs(), time.len());
    for (node, series) in forces_per_node {
        let row = system
            .dof_index(node)
            .ok_or_else(|| KernelError::reference("force history", node, node))?;
        if series.len() != time.len() {
            return Err(KernelError::Validation(format!(
                "Force history on '{}' has {} samples, expected {}",
                node,
                series.len(),
                time.len()
            )));
        }
        for (col, &value) in series.iter().enumerate() {
            loads[(row, col)] = value;
        }
    }
    Ok(loads)
}

fn rows(m: &Mat) -> Vec<Vec<f64>> {
    m.row_iter().map(|row| row.iter().copied().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{DamperEdge, MassNode, SpringEdge};
    use approx::assert_relative_eq;

    fn oscillator(c: f64) -> MckSystem {
        MckSystem::new()
            .add_mass(MassNode::new("m", 1.0))
            .unwrap()
            .add_spring(SpringEdge::new("k", "m", "ground", 100.0))
            .unwrap()
            .add_damper(DamperEdge::new("c", "m", "ground", c))
            .unwrap()
    }

    fn uniform_time(dt: f64, steps: usize) -> Vec<f64> {
        (0..=steps).map(|i| i as f64 * dt).collect()
    }

    #[test]
    fn test_step_load_undamped_matches_analytic() {
        let time = uniform_time(0.001, 2000);
        let forces = HashMap::from([("m".to_string(), vec![10.0; time.len()])]);

        let result = transient_response(&oscillator(0.0), &time, &forces).unwrap();
        let x = result.node_history("m").unwrap();

        assert_eq!(x[0], 0.0);
        for (i, &t) in time.iter().enumerate() {
            let exact = 0.1 * (1.0 - (10.0 * t).cos());
            assert!((x[i] - exact).abs() < 1e-3, "t = {}: {} vs {}", t, x[i], exact);
        }
        let (_, peak) = result.peak_displacement("m").unwrap();
        assert_relative_eq!(peak, 0.2, max_relative = 1e-3);
    }

    #[test]
    fn test_linear_acceleration_step_matches_analytic() {
        let time = uniform_time(0.001, 2000);
        let forces = HashMap::from([("m".to_string(), vec![10.0; time.len()])]);
        let params = NewmarkParams::linear_acceleration();

        let result = transient_response_with(&oscillator(0.0), &time, &forces, &params).unwrap();
        let x = result.node_history("m").unwrap();
        for (i, &t) in time.iter().enumerate() {
            let exact = 0.1 * (1.0 - (10.0 * t).cos());
            assert!((x[i] - exact).abs() < 1e-4, "t = {}: {} vs {}", t, x[i], exact);
        }
    }

    #[test]
    fn test_sine_forcing_below_resonance() {
        // F = sin(5t) on ωn = 10: x = (F/k) / (1 - r²) (sin ωt - r sin ωn t), r = 0.5
        let forcing = TransientForce::sine("m", 1.0, 5.0, 0.0, 2.0, 0.001);
        let result = run_transient_analysis(&oscillator(0.0), &[forcing]).unwrap();
        let x = result.node_history("m").unwrap();

        for (i, &t) in result.time.iter().enumerate() {
            let exact = 0.01 / 0.75 * ((5.0 * t).sin() - 0.5 * (10.0 * t).sin());
            assert!((x[i] - exact).abs() < 1e-5, "t = {}: {} vs {}", t, x[i], exact);
        }
    }

    #[test]
    fn test_damped_step_settles_to_static_deflection() {
        let time = uniform_time(0.005, 1000);
        let forces = HashMap::from([("m".to_string(), vec![10.0; time.len()])]);

        let result = transient_response(&oscillator(4.0), &time, &forces).unwrap();
        let last = *result.node_history("m").unwrap().last().unwrap();
        assert_relative_eq!(last, 0.1, max_relative = 1e-3);
    }

    #[test]
    fn test_non_uniform_steps() {
        let mut time: Vec<f64> = (0..1000).map(|i| i as f64 * 0.0005).collect();
        time.extend((1..=750).map(|i| 0.5 + i as f64 * 0.002));
        let forces = HashMap::from([("m".to_string(), vec![10.0; time.len()])]);

        let result = transient_response(&oscillator(0.0), &time, &forces).unwrap();
        let x = result.node_history("m").unwrap();
        for (i, &t) in time.iter().enumerate() {
            let exact = 0.1 * (1.0 - (10.0 * t).cos());
            assert!((x[i] - exact).abs() < 1e-3);
        }
    }

    #[test]
    fn test_unforced_system_stays_at_rest() {
        let time = uniform_time(0.01, 50);
        let result = transient_response(&oscillator(1.0), &time, &HashMap::new()).unwrap();
        assert!(result.displacement[0].iter().all(|&x| x == 0.0));
        assert_eq!(result.velocity[0].len(), time.len());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let sys = oscillator(0.0);
        let empty = HashMap::new();

        assert!(matches!(
            transient_response(&sys, &[], &empty),
            Err(KernelError::Validation(_))
        ));
        assert!(matches!(
            transient_response(&sys, &[0.0, 0.1, 0.1], &empty),
            Err(KernelError::Validation(_))
        ));

        let short = HashMap::from([("m".to_string(), vec![1.0])]);
        assert!(matches!(
            transient_response(&sys, &[0.0, 0.1], &short),
            Err(KernelError::Validation(_))
        ));

        let unknown = HashMap::from([("x".to_string(), vec![1.0, 1.0])]);
        assert!(matches!(
            transient_response(&sys, &[0.0, 0.1], &unknown),
            Err(KernelError::Reference { .. })
        ));
    }

    #[test]
    fn test_run_transient_analysis_merges_histories() {
        let forces = vec![
            TransientForce::step("m", 6.0, 0.0, 2.0, 0.001),
            TransientForce::step("m", 4.0, 0.0, 2.0, 0.001),
        ];
        let result = run_transient_analysis(&oscillator(0.0), &forces).unwrap();

        assert_eq!(result.time.len(), 2001);
        let (_, peak) = result.peak_displacement("m").unwrap();
        assert_relative_eq!(peak, 0.2, max_relative = 1e-3);
    }

    #[test]
    fn test_run_transient_analysis_requires_forces() {
        assert!(matches!(
            run_transient_analysis(&oscillator(0.0), &[]),
            Err(KernelError::Validation(_))
        ));
    }

    #[test]
    fn test_massless_node_is_singular() {
        let sys = oscillator(0.0)
            .add_mass(MassNode::new("ghost", 0.0))
            .unwrap();
        let time = uniform_time(0.01, 10);
        assert!(matches!(
            transient_response(&sys, &time, &HashMap::new()),
            Err(KernelError::SingularSystem(_))
        ));
    }
}
