//! The live editable graph: nodes, edges, and the change events the canvas
//! emits while the operator edits.

use serde::{Deserialize, Serialize};

use weft_core::{EdgeId, StepId};

use crate::definition::{WorkflowEdge, WorkflowStep};
use crate::registry::TERMINAL_STEP;
use crate::step::{Position, StepData};

/// One node of the live graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier within this graph.
    pub id: StepId,
    /// Step-kind tag, resolved through the registry.
    pub kind: String,
    /// Canvas position.
    pub position: Position,
    /// Category-specific payload.
    pub data: StepData,
}

impl Node {
    /// Create a node.
    #[must_use]
    pub fn new(
        id: impl Into<StepId>,
        kind: impl Into<String>,
        position: Position,
        data: StepData,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position,
            data,
        }
    }

    /// The permanent start node a blank workflow opens with.
    #[must_use]
    pub fn start() -> Self {
        Self::new(
            "start",
            TERMINAL_STEP,
            Position::new(250.0, 25.0),
            StepData::new("Start").with_is_start(true),
        )
    }

    /// The permanent end node a blank workflow opens with.
    #[must_use]
    pub fn end() -> Self {
        Self::new(
            "end",
            TERMINAL_STEP,
            Position::new(250.0, 500.0),
            StepData::new("End").with_is_start(false),
        )
    }
}

impl From<WorkflowStep> for Node {
    fn from(step: WorkflowStep) -> Self {
        Self {
            id: step.id,
            kind: step.kind,
            position: step.position,
            data: step.data,
        }
    }
}

impl From<Node> for WorkflowStep {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            kind: node.kind,
            position: node.position,
            data: node.data,
        }
    }
}

/// One directed edge of the live graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique edge identifier within this graph.
    pub id: EdgeId,
    /// Source node.
    pub source: StepId,
    /// Target node.
    pub target: StepId,
    /// Source output port. `None` means the unique default port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    /// Target input port. `None` means the unique default port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    /// Visual/semantic edge kind.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Opaque edge payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Edge {
    /// Create an edge between two nodes using their default ports.
    #[must_use]
    pub fn new(id: impl Into<EdgeId>, source: impl Into<StepId>, target: impl Into<StepId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            kind: None,
            data: None,
        }
    }

    /// Set the source handle.
    #[must_use]
    pub fn with_source_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    /// Set the target handle.
    #[must_use]
    pub fn with_target_handle(mut self, handle: impl Into<String>) -> Self {
        self.target_handle = Some(handle.into());
        self
    }

    /// Set the edge kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl From<WorkflowEdge> for Edge {
    fn from(edge: WorkflowEdge) -> Self {
        Self {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            source_handle: edge.source_handle,
            target_handle: edge.target_handle,
            kind: edge.kind,
            data: edge.data,
        }
    }
}

impl From<Edge> for WorkflowEdge {
    fn from(edge: Edge) -> Self {
        Self {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            source_handle: edge.source_handle,
            target_handle: edge.target_handle,
            kind: edge.kind,
            data: edge.data,
        }
    }
}

/// An incremental node edit reported by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeChange {
    /// A node was added.
    Add {
        /// The new node.
        node: Node,
    },
    /// A node was dragged to a new position.
    Move {
        /// The moved node.
        id: StepId,
        /// Its new position.
        position: Position,
    },
    /// A node was removed.
    Remove {
        /// The removed node.
        id: StepId,
    },
}

/// An incremental edge edit reported by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeChange {
    /// An edge was added.
    Add {
        /// The new edge.
        edge: Edge,
    },
    /// An edge was removed.
    Remove {
        /// The removed edge.
        id: EdgeId,
    },
}
