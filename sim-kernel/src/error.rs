//! Error types for the analysis kernel

use thiserror::Error;

/// Main error type for kernel operations
#[derive(Error, Debug)]
pub enum KernelError {
    /// A precondition on the inputs was violated
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate id '{0}' already exists")]
    DuplicateId(String),

    /// An edge or force points at a node the system does not contain
    #[error("{entity} '{id}' references unknown node '{node}'")]
    Reference {
        /// Kind of the referencing entity ("spring", "damper", "force", ...)
        entity: &'static str,
        /// Id of the referencing entity
        id: String,
        /// The node id that could not be resolved
        node: String,
    },

    /// The implicit material solve ran out of iterations
    #[error("Newton iteration did not converge after {iterations} iterations (last step {last_step:e})")]
    Convergence { iterations: usize, last_step: f64 },

    #[error("Singular system: {0}")]
    SingularSystem(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KernelError {
    pub(crate) fn reference(entity: &'static str, id: &str, node: &str) -> Self {
        Self::Reference {
            entity,
            id: id.to_string(),
            node: node.to_string(),
        }
    }
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;
