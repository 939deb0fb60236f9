//! Analysis types, options and the dynamics solvers

mod harmonic;
mod modal;
mod transient;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

pub use harmonic::{harmonic_response, harmonic_response_with};
pub use modal::modal_analysis;
pub use transient::{run_transient_analysis, transient_response, transient_response_with};

/// Kind of analysis a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    /// Natural frequencies and mode shapes
    Modal,
    /// Steady-state response to sinusoidal forcing
    Harmonic,
    /// Time-domain response to arbitrary forcing
    Transient,
    /// Moment–curvature evaluation of a beam section
    Section,
}

/// Iteration controls for the implicit material solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonOptions {
    /// Maximum number of Newton steps
    pub max_iterations: usize,
    /// Converged once the stress update drops below this value
    pub tolerance: f64,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-8,
        }
    }
}

impl NewtonOptions {
    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }
}

/// Newmark-β time integration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewmarkParams {
    pub beta: f64,
    pub gamma: f64,
}

impl NewmarkParams {
    /// Average acceleration (trapezoidal) rule, unconditionally stable: β = 1/4, γ = 1/2
    pub fn average_acceleration() -> Self {
        Self {
            beta: 0.25,
            gamma: 0.5,
        }
    }

    /// Linear acceleration rule, conditionally stable: β = 1/6, γ = 1/2
    pub fn linear_acceleration() -> Self {
        Self {
            beta: 1.0 / 6.0,
            gamma: 0.5,
        }
    }

    pub(crate) fn validate(&self) -> KernelResult<()> {
        if !(self.beta > 0.0 && self.beta.is_finite()) || !self.gamma.is_finite() {
            return Err(KernelError::Validation(format!(
                "Newmark parameters must be finite with beta > 0 (beta = {}, gamma = {})",
                self.beta, self.gamma
            )));
        }
        Ok(())
    }
}

impl Default for NewmarkParams {
    fn default() -> Self {
        Self::average_acceleration()
    }
}

/// Linearly spaced angular-frequency sweep for harmonic analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySweep {
    /// Lower bound in rad/s
    pub omega_min: f64,
    /// Upper bound in rad/s
    pub omega_max: f64,
    /// Number of samples, bounds included
    pub num_points: usize,
}

impl FrequencySweep {
    pub fn new(omega_min: f64, omega_max: f64, num_points: usize) -> Self {
        Self {
            omega_min,
            omega_max,
            num_points,
        }
    }

    /// Sample points of the sweep. A single point samples `omega_min`.
    pub fn samples(&self) -> KernelResult<Vec<f64>> {
        if self.num_points == 0 {
            return Err(KernelError::Validation(
                "Frequency sweep needs at least one point".to_string(),
            ));
        }
        if !self.omega_min.is_finite() || !self.omega_max.is_finite() {
            return Err(KernelError::Validation(
                "Frequency bounds must be finite".to_string(),
            ));
        }
        if self.omega_min < 0.0 || self.omega_min > self.omega_max {
            return Err(KernelError::Validation(format!(
                "Invalid frequency range [{}, {}]",
                self.omega_min, self.omega_max
            )));
        }

        if self.num_points == 1 {
            return Ok(vec![self.omega_min]);
        }

        let step = (self.omega_max - self.omega_min) / (self.num_points - 1) as f64;
        Ok((0..self.num_points)
            .map(|i| self.omega_min + i as f64 * step)
            .collect())
    }
}
