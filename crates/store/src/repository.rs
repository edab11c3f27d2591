//! The persistence boundary for workflow definitions.

use async_trait::async_trait;

use weft_core::WorkflowId;
use weft_workflow::WorkflowDefinition;

use crate::error::RepositoryError;

/// Async CRUD over persisted workflow definitions.
///
/// The store orchestrates this trait; implementations range from the
/// bundled in-memory repository to real HTTP or database backends. Every
/// operation returns the authoritative post-operation definition so the
/// caller can adopt server-side normalization (assigned ids, bumped
/// timestamps) instead of trusting its own copy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefinitionRepository: Send + Sync {
    /// List every stored definition.
    async fn list(&self) -> Result<Vec<WorkflowDefinition>, RepositoryError>;

    /// Fetch one definition by id.
    async fn get(&self, id: &WorkflowId) -> Result<WorkflowDefinition, RepositoryError>;

    /// Store a new definition.
    async fn create(
        &self,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, RepositoryError>;

    /// Replace an existing definition.
    async fn update(
        &self,
        id: &WorkflowId,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, RepositoryError>;

    /// Delete a definition by id.
    async fn delete(&self, id: &WorkflowId) -> Result<(), RepositoryError>;
}
