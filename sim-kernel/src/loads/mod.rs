//! Forcing inputs

mod force;
mod transient_force;

pub use force::{Force, ForceDirection};
pub use transient_force::TransientForce;
