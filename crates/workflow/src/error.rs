//! Workflow-specific error types.

use thiserror::Error;
use weft_core::{EdgeId, StepId};

/// Errors raised while loading, editing, or validating a workflow graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// An edge references a step id absent from the definition. Recovered
    /// at load time by dropping the edge.
    #[error("edge {edge} references missing step: {step}")]
    DanglingEdge {
        /// The offending edge.
        edge: EdgeId,
        /// The missing endpoint.
        step: StepId,
    },

    /// A step payload carries an empty label.
    #[error("step label must not be empty")]
    EmptyLabel,

    /// A terminal step payload does not declare which boundary it marks.
    #[error("terminal step must declare whether it is the start or end boundary")]
    MissingTerminalFlag,
}
