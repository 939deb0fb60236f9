//! Sim Kernel - lumped structural dynamics and beam section analysis
//!
//! Pure, synchronous computations used by simulation-setup pages:
//! - Mass/spring/damper systems built as immutable values, with undo/redo
//! - Matrix assembly (M, K, C and force columns)
//! - Modal analysis (natural frequencies, mode shapes, modal damping)
//! - Harmonic response over a frequency sweep
//! - Transient response by Newmark-β time integration
//! - Moment–curvature of rectangular sections under linear, power-law and
//!   Ramberg–Osgood material laws
//!
//! ## Example
//! ```rust
//! use sim_kernel::prelude::*;
//!
//! let system = MckSystem::new()
//!     .add_mass(MassNode::new("m1", 2.0)).unwrap()
//!     .add_spring(SpringEdge::new("k1", "m1", "ground", 800.0)).unwrap()
//!     .add_damper(DamperEdge::new("c1", "m1", "ground", 4.0)).unwrap()
//!     .add_force(Force::positive("f1", "m1", 10.0)).unwrap();
//!
//! let modes = modal_analysis(&system, 1).unwrap();
//! assert!((modes.frequencies[0] - 20.0 / (2.0 * std::f64::consts::PI)).abs() < 1e-9);
//!
//! let response = harmonic_response(&system, [0.0, 40.0], 81).unwrap();
//! assert_eq!(response.frequency.len(), 81);
//!
//! let moment = moment_curvature(
//!     0.01, 10.0, 5.0,
//!     &Material::linear_elastic(200_000.0),
//!     DeformationModel::Small,
//!     100,
//! ).unwrap();
//! assert!((moment - 0.01 * 200_000.0 * 5.0 * 1000.0 / 12.0).abs() < 1e-6);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod history;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        harmonic_response, harmonic_response_with, modal_analysis, run_transient_analysis,
        transient_response, transient_response_with, AnalysisType, FrequencySweep,
        NewmarkParams, NewtonOptions,
    };
    pub use crate::elements::{
        moment_curvature, moment_curvature_curve, stress, strain_to_stress_ramberg_osgood,
        BeamParameters, DamperEdge, DeformationModel, FixedPoint, MassNode, Material,
        RectangularSection, SpringEdge, GROUND,
    };
    pub use crate::error::{KernelError, KernelResult};
    pub use crate::history::SystemHistory;
    pub use crate::loads::{Force, ForceDirection, TransientForce};
    pub use crate::model::{create_empty_system, MckSystem, SystemMatrices};
    pub use crate::results::{
        AnalysisOutput, HarmonicResult, ModeResult, ResponseChannel, TransientResult,
    };
}
