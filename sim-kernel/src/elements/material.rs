//! Uniaxial material laws for section analysis

use log::trace;
use serde::{Deserialize, Serialize};

use crate::analysis::NewtonOptions;
use crate::error::{KernelError, KernelResult};

/// Constitutive model relating uniaxial strain to stress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Material {
    /// Hookean material, `σ = E ε`
    LinearElastic {
        /// Modulus of elasticity
        e: f64,
    },
    /// Elastic up to yield, then power-law hardening
    PowerLaw {
        /// Modulus of elasticity
        e: f64,
        /// Yield stress
        sigma_y: f64,
        /// Hardening coefficient
        k: f64,
        /// Hardening exponent
        n: f64,
    },
    /// Ramberg–Osgood law `ε = σ/E + K (σ/σ0)^n`, solved for σ
    RambergOsgood {
        /// Modulus of elasticity
        e: f64,
        /// Reference stress
        sigma0: f64,
        /// Plastic strain coefficient
        k: f64,
        /// Hardening exponent
        n: f64,
    },
}

impl Material {
    /// Create a linear elastic material
    pub fn linear_elastic(e: f64) -> Self {
        Self::LinearElastic { e }
    }

    /// Create a power-law hardening material
    pub fn power_law(e: f64, sigma_y: f64, k: f64, n: f64) -> Self {
        Self::PowerLaw { e, sigma_y, k, n }
    }

    /// Create a Ramberg–Osgood material
    pub fn ramberg_osgood(e: f64, sigma0: f64, k: f64, n: f64) -> Self {
        Self::RambergOsgood { e, sigma0, k, n }
    }

    /// Modulus of elasticity shared by every variant
    pub fn elastic_modulus(&self) -> f64 {
        match *self {
            Self::LinearElastic { e } => e,
            Self::PowerLaw { e, .. } => e,
            Self::RambergOsgood { e, .. } => e,
        }
    }

    /// Whether the law departs from Hooke's law anywhere
    pub fn is_nonlinear(&self) -> bool {
        !matches!(self, Self::LinearElastic { .. })
    }

    /// Stress for the given strain
    pub fn stress(&self, strain: f64) -> KernelResult<f64> {
        stress(strain, self)
    }
}

impl Default for Material {
    fn default() -> Self {
        // Structural steel in MPa
        Self::LinearElastic { e: 200_000.0 }
    }
}

/// Evaluate the stress produced by `strain` under `material`
///
/// Only the Ramberg–Osgood law can fail, with [`KernelError::Convergence`].
pub fn stress(strain: f64, material: &Material) -> KernelResult<f64> {
    match *material {
        Material::LinearElastic { e } => Ok(e * strain),
        Material::PowerLaw { e, sigma_y, k, n } => Ok(power_law_stress(strain, e, sigma_y, k, n)),
        Material::RambergOsgood { e, sigma0, k, n } => {
            strain_to_stress_ramberg_osgood(strain, e, sigma0, k, n)
        }
    }
}

fn power_law_stress(strain: f64, e: f64, sigma_y: f64, k: f64, n: f64) -> f64 {
    let yield_strain = sigma_y / e;
    if strain.abs() <= yield_strain {
        e * strain
    } else {
        strain.signum() * (sigma_y + k * (strain.abs() - yield_strain).powf(n))
    }
}

/// Solve the Ramberg–Osgood relation for stress with the default Newton budget
/// (50 iterations, `|Δσ| < 1e-8`)
///
/// The tolerance is absolute, so stresses are expected in MPa-scale units
/// (E around 2e5 for steel). Inputs in Pa put `1e-8` below the float
/// resolution of σ and the solve reports [`KernelError::Convergence`]; use
/// [`ramberg_osgood_stress_with`] with a looser tolerance in that case.
pub fn strain_to_stress_ramberg_osgood(
    strain: f64,
    e: f64,
    sigma0: f64,
    k: f64,
    n: f64,
) -> KernelResult<f64> {
    ramberg_osgood_stress_with(strain, e, sigma0, k, n, &NewtonOptions::default())
}

/// Solve `strain = σ/E + K (σ/σ0)^n` for σ by Newton–Raphson
///
/// Starts from the elastic guess `σ = strain * E`. The power term is taken as
/// `sign(σ) |σ/σ0|^n` so compression mirrors tension.
///
/// # Errors
/// [`KernelError::Convergence`] when `|Δσ|` does not drop below
/// `options.tolerance` within `options.max_iterations` steps.
pub fn ramberg_osgood_stress_with(
    strain: f64,
    e: f64,
    sigma0: f64,
    k: f64,
    n: f64,
    options: &NewtonOptions,
) -> KernelResult<f64> {
    let mut sigma = strain * e;
    let mut last_step = f64::INFINITY;

    for iteration in 0..options.max_iterations {
        let ratio = (sigma / sigma0).abs();
        let f = sigma / e + k * sigma.signum() * ratio.powf(n) - strain;
        let df = 1.0 / e + k * n / sigma0 * ratio.powf(n - 1.0);

        let step = f / df;
        sigma -= step;
        last_step = step;

        trace!("ramberg-osgood iter {}: sigma = {:e}, step = {:e}", iteration, sigma, step);

        if step.abs() < options.tolerance {
            return Ok(sigma);
        }
    }

    Err(KernelError::Convergence {
        iterations: options.max_iterations,
        last_step,
    })
}
