//! Fixed anchor points

use serde::{Deserialize, Serialize};

/// Reserved endpoint id meaning "attached to ground"
pub const GROUND: &str = "ground";

/// An anchor with zero displacement; contributes no degree of freedom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPoint {
    pub id: String,
}

impl FixedPoint {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}
