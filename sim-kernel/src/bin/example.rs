//! Sim Kernel Example - Two-storey shear frame and a beam section

use std::collections::HashMap;

use sim_kernel::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Sim Kernel Example: Two-Storey Shear Frame ===\n");

    // Lumped shear frame
    //
    //     [m2]  floor 2
    //      |  k2, c2
    //     [m1]  floor 1
    //      |  k1, c1
    //   ///////  ground
    //
    let floor_mass = 5_000.0; // kg
    let storey_stiffness = 2.0e6; // N/m
    let storey_damping = 4.0e3; // N·s/m

    // Each edit goes through the history, the way the setup page records them
    let mut history = SystemHistory::new(create_empty_system());
    history = history.apply_change(history.present.add_mass(MassNode::new("m1", floor_mass))?);
    history = history.apply_change(history.present.add_mass(MassNode::new("m2", floor_mass))?);
    history = history.apply_change(
        history
            .present
            .add_spring(SpringEdge::new("k1", GROUND, "m1", storey_stiffness))?
            .add_spring(SpringEdge::new("k2", "m1", "m2", storey_stiffness))?,
    );
    history = history.apply_change(
        history
            .present
            .add_damper(DamperEdge::new("c1", GROUND, "m1", storey_damping))?
            .add_damper(DamperEdge::new("c2", "m1", "m2", storey_damping))?
            .add_force(Force::positive("wind", "m2", 1.0e4))?,
    );

    // A stray edit, undone
    let stray = history.apply_change(history.present.add_mass(MassNode::new("m3", 1.0))?);
    history = stray.undo();
    println!("Undo available: {}, redo available: {}\n", history.can_undo(), history.can_redo());

    let system = &history.present;

    // Modal analysis
    let modes = modal_analysis(system, 2)?;
    println!("--- Modal Analysis ---");
    for (i, (f, zeta)) in modes.frequencies.iter().zip(&modes.damping_ratios).enumerate() {
        println!(
            "Mode {}: f = {:8.4} Hz, zeta = {:6.4}, shape = {:?}",
            i + 1,
            f,
            zeta,
            modes.mode_shapes[i]
        );
    }

    // Harmonic response
    let omega_max = 2.0 * std::f64::consts::PI * modes.frequencies[1] * 1.5;
    let response = harmonic_response(system, [0.0, omega_max], 200)?;
    println!("\n--- Harmonic Response (wind -> m2) ---");
    if let Some(mag) = response.magnitude("wind", "m2") {
        let (peak_idx, peak_db) = mag
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, db)| if db > best.1 { (i, db) } else { best });
        println!(
            "Peak {:.2} dB at omega = {:.3} rad/s",
            peak_db, response.frequency[peak_idx]
        );
    }

    // Transient response to a gust
    let dt = 0.002;
    let time: Vec<f64> = (0..=2500).map(|i| i as f64 * dt).collect();
    let gust: Vec<f64> = time
        .iter()
        .map(|&t| if t < 0.5 { 1.0e4 * t / 0.5 } else { 1.0e4 })
        .collect();
    let forces = HashMap::from([("m2".to_string(), gust)]);
    let transient = transient_response(system, &time, &forces)?;
    println!("\n--- Transient Response (ramped gust) ---");
    for node in &transient.nodes {
        if let Some((t, x)) = transient.peak_displacement(node) {
            println!("{}: peak {:.6} m at t = {:.3} s", node, x, t);
        }
    }

    // Moment–curvature of a steel section
    println!("\n=== Beam Section: Moment-Curvature ===\n");
    let curvatures: Vec<f64> = (0..=10).map(|i| i as f64 * 1.0e-4).collect();
    let elastic = Material::linear_elastic(200_000.0);
    let ramberg = Material::ramberg_osgood(200_000.0, 300.0, 0.002, 10.0);

    let small = moment_curvature_curve(&curvatures, 100.0, 50.0, &elastic, DeformationModel::Small, 0)?;
    let large = moment_curvature_curve(&curvatures, 100.0, 50.0, &ramberg, DeformationModel::Large, 200)?;

    println!("{:>10} {:>16} {:>16}", "kappa", "M elastic", "M Ramberg-Osgood");
    for ((kappa, m_el), (_, m_ro)) in small.iter().zip(&large) {
        println!("{:>10.5} {:>16.1} {:>16.1}", kappa, m_el, m_ro);
    }

    println!("\nSystem JSON: {}", system.to_json()?);

    Ok(())
}
