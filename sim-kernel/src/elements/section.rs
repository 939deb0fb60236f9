//! Rectangular beam cross-sections and moment–curvature integration

use log::debug;
use serde::{Deserialize, Serialize};

use super::material::{self, Material};
use crate::error::{KernelError, KernelResult};

/// Kinematic assumption used to relate curvature to moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeformationModel {
    /// Closed-form `M = κ E I`, linear elastic materials only
    Small,
    /// Strip integration of the material law over the section height
    Large,
}

/// Solid rectangular cross-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularSection {
    /// Depth of section, measured in the bending plane
    pub height: f64,
    /// Width of section
    pub width: f64,
}

impl RectangularSection {
    /// Create a new section, rejecting non-positive dimensions
    pub fn new(height: f64, width: f64) -> KernelResult<Self> {
        if !(height > 0.0 && height.is_finite()) || !(width > 0.0 && width.is_finite()) {
            return Err(KernelError::Validation(format!(
                "Section dimensions must be positive (height = {}, width = {})",
                height, width
            )));
        }
        Ok(Self { height, width })
    }

    /// Cross-sectional area
    pub fn area(&self) -> f64 {
        self.height * self.width
    }

    /// Second moment of area about the bending axis, `b h³ / 12`
    pub fn second_moment_of_area(&self) -> f64 {
        self.width * self.height.powi(3) / 12.0
    }

    /// Bending moment carried at `curvature`
    pub fn moment(
        &self,
        curvature: f64,
        material: &Material,
        model: DeformationModel,
        integration_steps: usize,
    ) -> KernelResult<f64> {
        match model {
            DeformationModel::Small => {
                if material.is_nonlinear() {
                    return Err(KernelError::Validation(
                        "plasticity not allowed in Small Deformation".to_string(),
                    ));
                }
                Ok(curvature * material.elastic_modulus() * self.second_moment_of_area())
            }
            DeformationModel::Large => self.integrate(curvature, material, integration_steps),
        }
    }

    /// Rectangle-rule integration of `σ(κ y) y b dy` over `N` strips
    ///
    /// Strips are sampled at their lower edge, `y_i = -h/2 + i dy`.
    fn integrate(&self, curvature: f64, material: &Material, steps: usize) -> KernelResult<f64> {
        if steps == 0 {
            return Err(KernelError::Validation(
                "Large deformation integration needs at least one step".to_string(),
            ));
        }

        let dy = self.height / steps as f64;
        let mut moment = 0.0;
        for i in 0..steps {
            let y = -self.height / 2.0 + i as f64 * dy;
            let strain = curvature * y;
            let stress = material::stress(strain, material)?;
            moment += stress * y * self.width * dy;
        }
        Ok(moment)
    }
}

/// Bending moment of a `height × width` rectangle at the given curvature
///
/// # Errors
/// * [`KernelError::Validation`] for non-positive dimensions, zero steps under
///   [`DeformationModel::Large`], or a nonlinear material under
///   [`DeformationModel::Small`]
/// * [`KernelError::Convergence`] if the material law cannot be evaluated
pub fn moment_curvature(
    curvature: f64,
    height: f64,
    width: f64,
    material: &Material,
    model: DeformationModel,
    integration_steps: usize,
) -> KernelResult<f64> {
    RectangularSection::new(height, width)?.moment(curvature, material, model, integration_steps)
}

/// Moment–curvature curve sampled at each of `curvatures`
pub fn moment_curvature_curve(
    curvatures: &[f64],
    height: f64,
    width: f64,
    material: &Material,
    model: DeformationModel,
    integration_steps: usize,
) -> KernelResult<Vec<(f64, f64)>> {
    let section = RectangularSection::new(height, width)?;
    debug!(
        "moment-curvature sweep: {} points, {:?} model, {} steps",
        curvatures.len(),
        model,
        integration_steps
    );

    curvatures
        .iter()
        .map(|&kappa| {
            section
                .moment(kappa, material, model, integration_steps)
                .map(|m| (kappa, m))
        })
        .collect()
}

/// Beam-bending form inputs, as supplied by a setup page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParameters {
    pub curvature: f64,
    pub height: f64,
    pub width: f64,
    pub material: Material,
    pub deformation_model: DeformationModel,
    pub integration_steps: usize,
}

impl BeamParameters {
    /// Evaluate the moment for these parameters
    pub fn moment(&self) -> KernelResult<f64> {
        moment_curvature(
            self.curvature,
            self.height,
            self.width,
            &self.material,
            self.deformation_model,
            self.integration_steps,
        )
    }
}
