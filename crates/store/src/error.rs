//! Repository error types.

use thiserror::Error;
use weft_core::WorkflowId;

/// Errors surfaced by a [`DefinitionRepository`](crate::DefinitionRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No definition is stored under the given id.
    #[error("workflow not found: {0}")]
    NotFound(WorkflowId),

    /// A definition with the given id already exists.
    #[error("workflow already exists: {0}")]
    AlreadyExists(WorkflowId),

    /// The backing store failed for a reason outside the domain.
    #[error("repository backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_workflow() {
        let err = RepositoryError::NotFound(WorkflowId::new("demo-1"));
        assert_eq!(err.to_string(), "workflow not found: demo-1");

        let err = RepositoryError::AlreadyExists(WorkflowId::new("demo-1"));
        assert_eq!(err.to_string(), "workflow already exists: demo-1");
    }
}
