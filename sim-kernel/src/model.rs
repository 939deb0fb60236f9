//! MCK model - lumped mass/spring/damper system and its matrix assembly

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::{Coupling, DamperEdge, FixedPoint, MassNode, SpringEdge, GROUND};
use crate::error::{KernelError, KernelResult};
use crate::loads::Force;
use crate::math::Mat;

/// A lumped mass-spring-damper system
///
/// The system is a value: every builder method returns a new system and
/// leaves `self` untouched. Mass insertion order defines the degree-of-freedom
/// order of the assembled matrices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MckSystem {
    #[serde(default)]
    pub masses: Vec<MassNode>,
    #[serde(default)]
    pub springs: Vec<SpringEdge>,
    #[serde(default)]
    pub dampers: Vec<DamperEdge>,
    #[serde(default)]
    pub forces: Vec<Force>,
    #[serde(default)]
    pub fixed_points: Vec<FixedPoint>,
}

/// Assembled global matrices, indexed by mass insertion order
#[derive(Debug, Clone)]
pub struct SystemMatrices {
    /// Mass matrix (diagonal)
    pub mass: Mat,
    pub stiffness: Mat,
    pub damping: Mat,
    /// Mass id of each degree of freedom
    pub dofs: Vec<String>,
}

impl SystemMatrices {
    pub fn num_dofs(&self) -> usize {
        self.dofs.len()
    }
}

/// An empty system
pub fn create_empty_system() -> MckSystem {
    MckSystem::new()
}

impl MckSystem {
    /// Create a new empty system
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Builders
    // ========================

    /// Return a copy of this system with `mass` appended
    pub fn add_mass(&self, mass: MassNode) -> KernelResult<Self> {
        mass.validate()?;
        self.check_node_id_free(&mass.id)?;
        let mut next = self.clone();
        next.masses.push(mass);
        Ok(next)
    }

    /// Return a copy of this system with `spring` appended
    pub fn add_spring(&self, spring: SpringEdge) -> KernelResult<Self> {
        spring.validate()?;
        if self.springs.iter().any(|s| s.id == spring.id) {
            return Err(KernelError::DuplicateId(spring.id));
        }
        let mut next = self.clone();
        next.springs.push(spring);
        Ok(next)
    }

    /// Return a copy of this system with `damper` appended
    pub fn add_damper(&self, damper: DamperEdge) -> KernelResult<Self> {
        damper.validate()?;
        if self.dampers.iter().any(|d| d.id == damper.id) {
            return Err(KernelError::DuplicateId(damper.id));
        }
        let mut next = self.clone();
        next.dampers.push(damper);
        Ok(next)
    }

    /// Return a copy of this system with `force` appended
    pub fn add_force(&self, force: Force) -> KernelResult<Self> {
        force.validate()?;
        if self.forces.iter().any(|f| f.id == force.id) {
            return Err(KernelError::DuplicateId(force.id));
        }
        let mut next = self.clone();
        next.forces.push(force);
        Ok(next)
    }

    /// Return a copy of this system with the anchor `point` appended
    pub fn add_fixed_point(&self, point: FixedPoint) -> KernelResult<Self> {
        self.check_node_id_free(&point.id)?;
        let mut next = self.clone();
        next.fixed_points.push(point);
        Ok(next)
    }

    fn check_node_id_free(&self, id: &str) -> KernelResult<()> {
        let taken = id == GROUND
            || self.masses.iter().any(|m| m.id == id)
            || self.fixed_points.iter().any(|p| p.id == id);
        if taken {
            return Err(KernelError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    /// Number of degrees of freedom (one per mass)
    pub fn num_dofs(&self) -> usize {
        self.masses.len()
    }

    /// Degree-of-freedom index of a mass id
    pub fn dof_index(&self, id: &str) -> Option<usize> {
        self.masses.iter().position(|m| m.id == id)
    }

    /// Whether `id` names ground or a fixed point
    pub fn is_grounded(&self, id: &str) -> bool {
        id == GROUND || self.fixed_points.iter().any(|p| p.id == id)
    }

    /// Check every structural invariant of the system
    ///
    /// Builders already enforce id uniqueness and value ranges; this re-checks
    /// them for systems built by other means (deserialization) and resolves
    /// every edge and force reference.
    pub fn validate(&self) -> KernelResult<()> {
        let mut node_ids = HashSet::new();
        node_ids.insert(GROUND);
        for id in self
            .masses
            .iter()
            .map(|m| m.id.as_str())
            .chain(self.fixed_points.iter().map(|p| p.id.as_str()))
        {
            if !node_ids.insert(id) {
                return Err(KernelError::DuplicateId(id.to_string()));
            }
        }
        for mass in &self.masses {
            mass.validate()?;
        }

        check_unique(self.springs.iter().map(|s| s.id.as_str()))?;
        check_unique(self.dampers.iter().map(|d| d.id.as_str()))?;
        check_unique(self.forces.iter().map(|f| f.id.as_str()))?;

        for spring in &self.springs {
            spring.validate()?;
        }
        for damper in &self.dampers {
            damper.validate()?;
        }
        for force in &self.forces {
            force.validate()?;
        }

        let dof_map = self.dof_map();
        self.couplings_resolve(&self.springs, &dof_map)?;
        self.couplings_resolve(&self.dampers, &dof_map)?;
        for force in &self.forces {
            force_dof(force, &dof_map)?;
        }
        Ok(())
    }

    // ========================
    // Assembly
    // ========================

    fn dof_map(&self) -> HashMap<&str, usize> {
        self.masses
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.as_str(), i))
            .collect()
    }

    /// Resolve an endpoint: `Some(dof)` for a mass, `None` for ground
    fn endpoint_dof(
        &self,
        entity: &'static str,
        edge_id: &str,
        node: &str,
        dof_map: &HashMap<&str, usize>,
    ) -> KernelResult<Option<usize>> {
        if let Some(&dof) = dof_map.get(node) {
            return Ok(Some(dof));
        }
        if self.is_grounded(node) {
            return Ok(None);
        }
        Err(KernelError::reference(entity, edge_id, node))
    }

    fn couplings_resolve<C: Coupling>(
        &self,
        edges: &[C],
        dof_map: &HashMap<&str, usize>,
    ) -> KernelResult<()> {
        for edge in edges {
            let (a, b) = edge.endpoints();
            self.endpoint_dof(C::KIND, edge.id(), a, dof_map)?;
            self.endpoint_dof(C::KIND, edge.id(), b, dof_map)?;
        }
        Ok(())
    }

    /// Stamp two-node couplings into a global matrix
    fn stamp<C: Coupling>(
        &self,
        target: &mut Mat,
        edges: &[C],
        dof_map: &HashMap<&str, usize>,
    ) -> KernelResult<()> {
        for edge in edges {
            let (a, b) = edge.endpoints();
            let value = edge.coefficient();
            let a = self.endpoint_dof(C::KIND, edge.id(), a, dof_map)?;
            let b = self.endpoint_dof(C::KIND, edge.id(), b, dof_map)?;

            if let Some(i) = a {
                target[(i, i)] += value;
            }
            if let Some(j) = b {
                target[(j, j)] += value;
            }
            if let (Some(i), Some(j)) = (a, b) {
                target[(i, j)] -= value;
                target[(j, i)] -= value;
            }
        }
        Ok(())
    }

    /// Build the global mass, stiffness and damping matrices
    ///
    /// # Errors
    /// [`KernelError::Reference`] if a spring or damper endpoint is neither a
    /// mass, a fixed point nor ground.
    pub fn assemble(&self) -> KernelResult<SystemMatrices> {
        let n = self.num_dofs();
        let dof_map = self.dof_map();

        let mass = Mat::from_diagonal(&crate::math::Vec::from_iterator(
            n,
            self.masses.iter().map(|m| m.mass),
        ));

        let mut stiffness = Mat::zeros(n, n);
        self.stamp(&mut stiffness, &self.springs, &dof_map)?;

        let mut damping = Mat::zeros(n, n);
        self.stamp(&mut damping, &self.dampers, &dof_map)?;

        debug!(
            "assembled MCK system: {} dofs, {} springs, {} dampers",
            n,
            self.springs.len(),
            self.dampers.len()
        );

        Ok(SystemMatrices {
            mass,
            stiffness,
            damping,
            dofs: self.masses.iter().map(|m| m.id.clone()).collect(),
        })
    }

    /// Build the force matrix: one column per force, signed magnitude at the
    /// row of its target mass
    ///
    /// # Errors
    /// [`KernelError::Reference`] if a force targets anything but a mass.
    pub fn force_matrix(&self) -> KernelResult<Mat> {
        let dof_map = self.dof_map();
        let mut f = Mat::zeros(self.num_dofs(), self.forces.len());
        for (col, force) in self.forces.iter().enumerate() {
            let row = force_dof(force, &dof_map)?;
            f[(row, col)] += force.signed_magnitude();
        }
        Ok(f)
    }

    // ========================
    // Serialization
    // ========================

    /// Serialize the system as a plain JSON record
    pub fn to_json(&self) -> KernelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a system from JSON, checking every invariant
    pub fn from_json(json: &str) -> KernelResult<Self> {
        let system: Self = serde_json::from_str(json)?;
        system.validate()?;
        Ok(system)
    }
}

fn force_dof(force: &Force, dof_map: &HashMap<&str, usize>) -> KernelResult<usize> {
    dof_map
        .get(force.node_id.as_str())
        .copied()
        .ok_or_else(|| KernelError::reference("force", &force.id, &force.node_id))
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a str>) -> KernelResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(KernelError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}
