//! Lumped mass node - one translational degree of freedom

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// A point mass carrying a single degree of freedom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassNode {
    pub id: String,
    /// Mass in kg
    pub mass: f64,
}

impl MassNode {
    /// Create a new mass node
    pub fn new(id: &str, mass: f64) -> Self {
        Self {
            id: id.to_string(),
            mass,
        }
    }

    pub(crate) fn validate(&self) -> KernelResult<()> {
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(KernelError::Validation(format!(
                "Mass '{}' must be finite and non-negative (got {})",
                self.id, self.mass
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_creation() {
        let node = MassNode::new("m1", 2.5);
        assert_eq!(node.id, "m1");
        assert_eq!(node.mass, 2.5);
    }

    #[test]
    fn test_mass_validation() {
        assert!(MassNode::new("m1", 0.0).validate().is_ok());
        assert!(MassNode::new("m1", -1.0).validate().is_err());
        assert!(MassNode::new("m1", f64::INFINITY).validate().is_err());
    }
}
