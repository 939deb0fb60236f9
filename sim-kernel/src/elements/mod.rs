//! Model entities and the section/material evaluators

mod coupling;
mod fixed_point;
mod mass;
pub mod material;
pub mod section;

pub use coupling::{Coupling, DamperEdge, SpringEdge};
pub use fixed_point::{FixedPoint, GROUND};
pub use mass::MassNode;
pub use material::{
    ramberg_osgood_stress_with, stress, strain_to_stress_ramberg_osgood, Material,
};
pub use section::{
    moment_curvature, moment_curvature_curve, BeamParameters, DeformationModel,
    RectangularSection,
};
