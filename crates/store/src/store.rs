//! The workflow collection store.
//!
//! Holds the cached list of definitions and the current selection, and
//! orchestrates repository CRUD. Every mutation commits to the repository
//! first and touches the cache only after success, so a failed call leaves
//! the store exactly as it was apart from the recorded error.

use std::sync::Arc;

use weft_core::WorkflowId;
use weft_workflow::WorkflowDefinition;

use crate::error::RepositoryError;
use crate::repository::DefinitionRepository;

/// Notification emitted synchronously after each committed store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The definition cache was replaced from the repository.
    Loaded,
    /// A definition was saved (created or updated).
    Saved(WorkflowId),
    /// A definition was deleted.
    Removed(WorkflowId),
    /// The current selection changed.
    CurrentChanged(Option<WorkflowId>),
}

/// Collection-level state for the workflow builder.
pub struct WorkflowStore {
    repository: Arc<dyn DefinitionRepository>,
    definitions: Vec<WorkflowDefinition>,
    current: Option<WorkflowId>,
    is_loading: bool,
    error: Option<String>,
    subscribers: Vec<Box<dyn Fn(&StoreEvent) + Send>>,
}

impl WorkflowStore {
    /// Create a store over the given repository, with an empty cache.
    #[must_use]
    pub fn new(repository: Arc<dyn DefinitionRepository>) -> Self {
        Self {
            repository,
            definitions: Vec::new(),
            current: None,
            is_loading: false,
            error: None,
            subscribers: Vec::new(),
        }
    }

    /// The cached definitions, in repository order.
    #[must_use]
    pub fn definitions(&self) -> &[WorkflowDefinition] {
        &self.definitions
    }

    /// Look up a cached definition by id.
    #[must_use]
    pub fn definition(&self, id: &WorkflowId) -> Option<&WorkflowDefinition> {
        self.definitions.iter().find(|d| d.id == *id)
    }

    /// Id of the current selection, if any.
    #[must_use]
    pub fn current(&self) -> Option<&WorkflowId> {
        self.current.as_ref()
    }

    /// The currently selected definition, if its id is in the cache.
    #[must_use]
    pub fn current_definition(&self) -> Option<&WorkflowDefinition> {
        self.current.as_ref().and_then(|id| self.definition(id))
    }

    /// Returns `true` while a load is in flight. Saves and deletes do not
    /// toggle this flag.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The last repository failure, cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Register an observer called synchronously after each committed
    /// mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&StoreEvent) + Send + 'static) {
        self.subscribers.push(Box::new(observer));
    }

    fn notify(&self, event: &StoreEvent) {
        for observer in &self.subscribers {
            observer(event);
        }
    }

    /// Replace the cache with the full repository listing.
    ///
    /// On failure the previous cache is kept and the error recorded.
    pub async fn load_all(&mut self) -> Result<(), RepositoryError> {
        self.is_loading = true;
        let result = self.repository.list().await;
        self.is_loading = false;

        match result {
            Ok(definitions) => {
                tracing::info!(count = definitions.len(), "loaded workflow definitions");
                self.definitions = definitions;
                self.error = None;
                self.notify(&StoreEvent::Loaded);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load workflow definitions");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch one definition, upsert it into the cache, and select it.
    pub async fn load_one(
        &mut self,
        id: &WorkflowId,
    ) -> Result<WorkflowDefinition, RepositoryError> {
        self.is_loading = true;
        let result = self.repository.get(id).await;
        self.is_loading = false;

        match result {
            Ok(definition) => {
                self.upsert(definition.clone());
                self.current = Some(definition.id.clone());
                self.error = None;
                self.notify(&StoreEvent::CurrentChanged(self.current.clone()));
                Ok(definition)
            }
            Err(err) => {
                tracing::error!(workflow = %id, error = %err, "failed to load workflow");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Persist a definition, creating it when its id is not yet cached and
    /// updating it otherwise.
    ///
    /// The repository's returned definition is authoritative: it is what
    /// lands in the cache and what the caller should commit into its
    /// session. On failure the cache and selection are untouched.
    pub async fn save(
        &mut self,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, RepositoryError> {
        let id = definition.id.clone();
        let exists = self.definitions.iter().any(|d| d.id == id);

        let result = if exists {
            self.repository.update(&id, definition).await
        } else {
            self.repository.create(definition).await
        };

        match result {
            Ok(saved) => {
                tracing::info!(workflow = %saved.id, created = !exists, "saved workflow");
                self.upsert(saved.clone());
                if self.current.is_none() || self.current.as_ref() == Some(&saved.id) {
                    self.current = Some(saved.id.clone());
                }
                self.error = None;
                self.notify(&StoreEvent::Saved(saved.id.clone()));
                Ok(saved)
            }
            Err(err) => {
                tracing::error!(workflow = %id, error = %err, "failed to save workflow");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a definition. On success it leaves the cache, and the
    /// selection is cleared if it pointed at the deleted id.
    pub async fn remove(&mut self, id: &WorkflowId) -> Result<(), RepositoryError> {
        match self.repository.delete(id).await {
            Ok(()) => {
                tracing::info!(workflow = %id, "deleted workflow");
                self.definitions.retain(|d| d.id != *id);
                if self.current.as_ref() == Some(id) {
                    self.current = None;
                }
                self.error = None;
                self.notify(&StoreEvent::Removed(id.clone()));
                Ok(())
            }
            Err(err) => {
                tracing::error!(workflow = %id, error = %err, "failed to delete workflow");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Change the current selection without touching the repository.
    pub fn set_current(&mut self, id: Option<WorkflowId>) {
        if self.current == id {
            return;
        }
        self.current = id;
        self.notify(&StoreEvent::CurrentChanged(self.current.clone()));
    }

    /// Discard the recorded error, if any.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn upsert(&mut self, definition: WorkflowDefinition) {
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(slot) => *slot = definition,
            None => self.definitions.push(definition),
        }
    }
}
