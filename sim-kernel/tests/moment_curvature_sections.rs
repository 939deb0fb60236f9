use sim_kernel::prelude::*;

fn env_usize(name: &str, default_val: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default_val)
}

// Section: 10 x 5 (height x width), steel in MPa
const HEIGHT: f64 = 10.0;
const WIDTH: f64 = 5.0;
const E: f64 = 200_000.0;

#[test]
fn linear_elastic_models_agree() {
    let steps = env_usize("SECTION_STEPS", 2000);
    let material = Material::linear_elastic(E);

    for &kappa in &[-0.02, -0.005, 0.0, 0.001, 0.01, 0.03] {
        let small =
            moment_curvature(kappa, HEIGHT, WIDTH, &material, DeformationModel::Small, steps).unwrap();
        let large =
            moment_curvature(kappa, HEIGHT, WIDTH, &material, DeformationModel::Large, steps).unwrap();

        let scale = small.abs().max(1.0);
        assert!(
            (small - large).abs() / scale < 1e-5,
            "kappa = {kappa}: small = {small}, large = {large}"
        );
    }
}

#[test]
fn large_model_converges_with_step_count() {
    let material = Material::linear_elastic(E);
    let exact = 0.01 * E * WIDTH * HEIGHT.powi(3) / 12.0;

    let mut last_error = f64::INFINITY;
    for &steps in &[10, 100, 1000] {
        let m = moment_curvature(0.01, HEIGHT, WIDTH, &material, DeformationModel::Large, steps).unwrap();
        let error = (m - exact).abs();
        assert!(error < last_error, "error did not shrink at {steps} steps");
        last_error = error;
    }
}

#[test]
fn closed_form_reference_value() {
    // κ E b h³ / 12 = 0.01 * 200000 * 416.67
    let m = moment_curvature(
        0.01,
        HEIGHT,
        WIDTH,
        &Material::linear_elastic(E),
        DeformationModel::Small,
        1,
    )
    .unwrap();
    assert!((m - 833_333.333_333).abs() < 1e-3);
}

#[test]
fn nonlinear_curves_are_odd_and_monotonic() {
    let steps = env_usize("SECTION_STEPS", 400);
    let materials = [
        Material::power_law(E, 250.0, 500.0, 0.3),
        Material::ramberg_osgood(E, 300.0, 0.002, 5.0),
    ];
    let curvatures: Vec<f64> = (0..=20).map(|i| i as f64 * 2.0e-4).collect();

    for material in &materials {
        let curve =
            moment_curvature_curve(&curvatures, HEIGHT, WIDTH, material, DeformationModel::Large, steps)
                .unwrap();
        assert_eq!(curve.len(), curvatures.len());
        assert!(curve.windows(2).all(|w| w[1].1 > w[0].1), "{material:?} not monotonic");

        for &(kappa, m) in &curve {
            let mirrored =
                moment_curvature(-kappa, HEIGHT, WIDTH, material, DeformationModel::Large, steps).unwrap();
            assert!((m + mirrored).abs() <= 1e-9 * m.abs().max(1.0));
        }
    }
}

#[test]
fn small_model_rejects_every_nonlinear_material() {
    for material in [
        Material::power_law(E, 250.0, 500.0, 0.3),
        Material::ramberg_osgood(E, 300.0, 0.002, 5.0),
    ] {
        let err = moment_curvature(0.01, HEIGHT, WIDTH, &material, DeformationModel::Small, 10)
            .unwrap_err();
        assert!(matches!(err, KernelError::Validation(_)));
    }
}

#[test]
fn beam_parameters_from_json() {
    let json = r#"{
        "curvature": 0.01,
        "height": 10.0,
        "width": 5.0,
        "material": {"model": "ramberg_osgood", "e": 200000.0, "sigma0": 300.0, "k": 0.002, "n": 5.0},
        "deformation_model": "Large",
        "integration_steps": 200
    }"#;
    let params: BeamParameters = serde_json::from_str(json).unwrap();
    let m = params.moment().unwrap();
    assert!(m > 0.0);
    assert!(m < 0.01 * E * WIDTH * HEIGHT.powi(3) / 12.0);
}

#[test]
#[ignore]
fn moment_curvature_report_csv() {
    // Run with:
    //   cargo test -p sim-kernel moment_curvature_report_csv -- --ignored --nocapture
    let steps = env_usize("SECTION_STEPS", 1000);
    let curvatures: Vec<f64> = (0..=50).map(|i| i as f64 * 1.0e-4).collect();
    let elastic = Material::linear_elastic(E);
    let power = Material::power_law(E, 250.0, 500.0, 0.3);
    let ramberg = Material::ramberg_osgood(E, 300.0, 0.002, 5.0);

    println!("kappa,m_elastic,m_power_law,m_ramberg_osgood");
    for &kappa in &curvatures {
        let m_el = moment_curvature(kappa, HEIGHT, WIDTH, &elastic, DeformationModel::Small, steps).unwrap();
        let m_pl = moment_curvature(kappa, HEIGHT, WIDTH, &power, DeformationModel::Large, steps).unwrap();
        let m_ro = moment_curvature(kappa, HEIGHT, WIDTH, &ramberg, DeformationModel::Large, steps).unwrap();
        println!("{kappa:.6},{m_el:.3},{m_pl:.3},{m_ro:.3}");
    }
}
