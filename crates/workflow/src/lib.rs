#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Weft Workflow
//!
//! Graph model, step-kind registry, and builder session for the Weft
//! workflow builder.
//!
//! This crate provides the domain core behind a visual workflow editor:
//!
//! - [`WorkflowDefinition`], [`WorkflowStep`], and [`WorkflowEdge`] — the
//!   canonical persisted form (camelCase JSON wire format)
//! - [`Node`] and [`Edge`] — the live editable graph, with [`NodeChange`] /
//!   [`EdgeChange`] for incremental canvas edits
//! - [`StepRegistry`] — step kinds as capability records, resolved by tag
//! - [`BuilderSession`] — one open workflow: load, edit, connect, serialize
//! - [`templates`] — bundled demo definitions for seeding a repository

pub mod definition;
pub mod error;
pub mod graph;
pub mod registry;
pub mod session;
pub mod state;
pub mod step;
pub mod templates;

pub use definition::{WorkflowDefinition, WorkflowEdge, WorkflowStep};
pub use error::WorkflowError;
pub use graph::{Edge, EdgeChange, Node, NodeChange};
pub use registry::{PARTICIPANT_STEP, PROCESS_STEP, StepCapabilities, StepRegistry, TERMINAL_STEP};
pub use session::{BuilderSession, SessionEvent};
pub use state::SessionState;
pub use step::{PortDataType, PortDirection, Position, StepData, WorkflowPort};
