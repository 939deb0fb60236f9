//! Two-node couplings: springs and dampers

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Shared shape of a two-node element stamped into a global matrix
pub trait Coupling {
    /// Element kind, used in diagnostics
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn endpoints(&self) -> (&str, &str);
    /// Stiffness or damping coefficient
    fn coefficient(&self) -> f64;

    fn validate(&self) -> KernelResult<()> {
        if !self.coefficient().is_finite() {
            return Err(KernelError::Validation(format!(
                "{} '{}' has a non-finite coefficient",
                Self::KIND,
                self.id()
            )));
        }
        Ok(())
    }
}

/// Linear spring between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringEdge {
    pub id: String,
    pub node_a: String,
    pub node_b: String,
    /// Stiffness in N/m
    pub k: f64,
}

impl SpringEdge {
    /// Create a new spring between `node_a` and `node_b`
    pub fn new(id: &str, node_a: &str, node_b: &str, k: f64) -> Self {
        Self {
            id: id.to_string(),
            node_a: node_a.to_string(),
            node_b: node_b.to_string(),
            k,
        }
    }
}

impl Coupling for SpringEdge {
    const KIND: &'static str = "spring";

    fn id(&self) -> &str {
        &self.id
    }

    fn endpoints(&self) -> (&str, &str) {
        (&self.node_a, &self.node_b)
    }

    fn coefficient(&self) -> f64 {
        self.k
    }
}

/// Viscous damper between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamperEdge {
    pub id: String,
    pub node_a: String,
    pub node_b: String,
    /// Damping coefficient in N·s/m
    pub c: f64,
}

impl DamperEdge {
    /// Create a new damper between `node_a` and `node_b`
    pub fn new(id: &str, node_a: &str, node_b: &str, c: f64) -> Self {
        Self {
            id: id.to_string(),
            node_a: node_a.to_string(),
            node_b: node_b.to_string(),
            c,
        }
    }
}

impl Coupling for DamperEdge {
    const KIND: &'static str = "damper";

    fn id(&self) -> &str {
        &self.id
    }

    fn endpoints(&self) -> (&str, &str) {
        (&self.node_a, &self.node_b)
    }

    fn coefficient(&self) -> f64 {
        self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_endpoints() {
        let s = SpringEdge::new("s1", "m1", "ground", 100.0);
        assert_eq!(s.endpoints(), ("m1", "ground"));
        assert_eq!(s.coefficient(), 100.0);
        assert_eq!(SpringEdge::KIND, "spring");
    }

    #[test]
    fn test_damper_rejects_nan() {
        let d = DamperEdge::new("d1", "m1", "m2", f64::NAN);
        assert!(d.validate().is_err());
    }
}
