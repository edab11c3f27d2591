#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Weft Store
//!
//! Collection-level state and persistence orchestration for the Weft
//! workflow builder.
//!
//! - [`DefinitionRepository`] — the async CRUD boundary to persistence
//! - [`InMemoryRepository`] — the bundled repository for tests and demos
//! - [`WorkflowStore`] — cached definitions, current selection, and
//!   commit-after-success mutation over a repository

pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

pub use error::RepositoryError;
pub use memory::InMemoryRepository;
pub use repository::DefinitionRepository;
pub use store::{StoreEvent, WorkflowStore};
