//! In-memory repository, for tests and demos.

use async_trait::async_trait;
use parking_lot::RwLock;

use weft_core::WorkflowId;
use weft_workflow::{WorkflowDefinition, templates};

use crate::error::RepositoryError;
use crate::repository::DefinitionRepository;

/// A [`DefinitionRepository`] backed by a mutex-guarded `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    definitions: RwLock<Vec<WorkflowDefinition>>,
}

impl InMemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with the bundled templates.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            definitions: RwLock::new(templates::all()),
        }
    }

    /// Number of stored definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// Returns `true` if the repository holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

#[async_trait]
impl DefinitionRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<WorkflowDefinition>, RepositoryError> {
        Ok(self.definitions.read().clone())
    }

    async fn get(&self, id: &WorkflowId) -> Result<WorkflowDefinition, RepositoryError> {
        self.definitions
            .read()
            .iter()
            .find(|d| d.id == *id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn create(
        &self,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, RepositoryError> {
        let mut definitions = self.definitions.write();
        if definitions.iter().any(|d| d.id == definition.id) {
            return Err(RepositoryError::AlreadyExists(definition.id));
        }
        definitions.push(definition.clone());
        Ok(definition)
    }

    async fn update(
        &self,
        id: &WorkflowId,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, RepositoryError> {
        let mut definitions = self.definitions.write();
        let slot = definitions
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        *slot = definition.clone();
        Ok(definition)
    }

    async fn delete(&self, id: &WorkflowId) -> Result<(), RepositoryError> {
        let mut definitions = self.definitions.write();
        let before = definitions.len();
        definitions.retain(|d| d.id != *id);
        if definitions.len() == before {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }
}
