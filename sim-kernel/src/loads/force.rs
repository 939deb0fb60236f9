//! Harmonic/static forcing inputs applied to mass nodes

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Sense of a force along the node's degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceDirection {
    #[default]
    Positive,
    Negative,
}

impl ForceDirection {
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// A labelled forcing input; each force becomes one excitation column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub id: String,
    /// Target mass node
    pub node_id: String,
    /// Force magnitude (N)
    pub magnitude: f64,
    #[serde(default)]
    pub direction: ForceDirection,
}

impl Force {
    /// Create a new force on `node_id`
    pub fn new(id: &str, node_id: &str, magnitude: f64, direction: ForceDirection) -> Self {
        Self {
            id: id.to_string(),
            node_id: node_id.to_string(),
            magnitude,
            direction,
        }
    }

    /// Create a force acting in the positive direction
    pub fn positive(id: &str, node_id: &str, magnitude: f64) -> Self {
        Self::new(id, node_id, magnitude, ForceDirection::Positive)
    }

    /// Signed amplitude placed in the force vector
    pub fn signed_magnitude(&self) -> f64 {
        self.direction.sign() * self.magnitude
    }

    pub(crate) fn validate(&self) -> KernelResult<()> {
        if !self.magnitude.is_finite() {
            return Err(KernelError::Validation(format!(
                "Force '{}' has a non-finite magnitude",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_magnitude() {
        assert_eq!(Force::positive("f1", "m1", 10.0).signed_magnitude(), 10.0);
        assert_eq!(
            Force::new("f2", "m1", 10.0, ForceDirection::Negative).signed_magnitude(),
            -10.0
        );
    }

    #[test]
    fn test_direction_defaults_when_missing() {
        let f: Force =
            serde_json::from_str(r#"{"id":"f1","node_id":"m1","magnitude":5.0}"#).unwrap();
        assert_eq!(f.direction, ForceDirection::Positive);
    }
}
