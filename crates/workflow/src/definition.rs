//! The canonical, persistence-ready workflow definition.
//!
//! This is the wire/storage format: camelCase JSON, round-tripped exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use weft_core::{EdgeId, StepId, UserId, WorkflowId};

use crate::step::{Position, StepData};

/// A complete persisted workflow: steps, edges, and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Stable identifier, assigned on first create.
    pub id: WorkflowId,
    /// Human-readable name.
    pub name: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The steps (graph nodes) in this workflow.
    pub steps: Vec<WorkflowStep>,
    /// Directed edges connecting the steps.
    pub edges: Vec<WorkflowEdge>,
    /// Workflow-level variables, opaque to the builder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
    /// When this definition was first created.
    pub created_at: DateTime<Utc>,
    /// When this definition was last modified. Monotonically non-decreasing
    /// across saves of the same id.
    pub updated_at: DateTime<Utc>,
    /// Identity that created the definition.
    pub created_by: UserId,
}

impl WorkflowDefinition {
    /// Look up a step by id.
    #[must_use]
    pub fn step(&self, id: &StepId) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == *id)
    }

    /// Returns `true` if a step with the given id exists.
    #[must_use]
    pub fn contains_step(&self, id: &StepId) -> bool {
        self.step(id).is_some()
    }

    /// Look up an edge by id.
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|e| e.id == *id)
    }
}

/// One graph node of a persisted workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Unique step identifier within the definition.
    pub id: StepId,
    /// Category tag, polymorphic over the registered step kinds.
    #[serde(rename = "type")]
    pub kind: String,
    /// Canvas position. A layout hint only.
    pub position: Position,
    /// Category-specific payload.
    pub data: StepData,
}

/// One directed connection of a persisted workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    /// Unique edge identifier within the definition.
    pub id: EdgeId,
    /// Source step id.
    pub source: StepId,
    /// Target step id.
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::registry::{PARTICIPANT_STEP, TERMINAL_STEP};

    use super::*;

    fn sample() -> WorkflowDefinition {
        let now = Utc::now();
        WorkflowDefinition {
            id: WorkflowId::new("workflow-1"),
            name: "Content Approval".into(),
            description: Some("Review then publish".into()),
            steps: vec![
                WorkflowStep {
                    id: StepId::new("start"),
                    kind: TERMINAL_STEP.into(),
                    position: Position::new(250.0, 25.0),
                    data: StepData::new("Start").with_is_start(true),
                },
                WorkflowStep {
                    id: StepId::new("review"),
                    kind: PARTICIPANT_STEP.into(),
                    position: Position::new(250.0, 150.0),
                    data: StepData::new("Content Review"),
                },
            ],
            edges: vec![WorkflowEdge {
                id: EdgeId::new("edge-1"),
                source: StepId::new("start"),
                target: StepId::new("review"),
                source_handle: None,
                target_handle: None,
                kind: None,
                data: None,
            }],
            variables: None,
            created_at: now,
            updated_at: now,
            created_by: UserId::new("admin"),
        }
    }

    #[test]
    fn step_and_edge_lookup() {
        let def = sample();
        assert!(def.contains_step(&StepId::new("start")));
        assert!(!def.contains_step(&StepId::new("ghost")));
        assert_eq!(
            def.step(&StepId::new("review")).map(|s| s.data.label.as_str()),
            Some("Content Review")
        );
        assert!(def.edge(&EdgeId::new("edge-1")).is_some());
        assert!(def.edge(&EdgeId::new("edge-9")).is_none());
    }

    #[test]
    fn serde_roundtrip_is_structural_identity() {
        let def = sample();
        let json = serde_json::to_string(&def).unwrap();
        let back: WorkflowDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn serde_wire_field_names_are_camel_case() {
        let def = sample();
        let json = serde_json::to_value(&def).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["createdBy"], "admin");
        assert_eq!(json["steps"][0]["type"], TERMINAL_STEP);
        assert_eq!(json["steps"][0]["data"]["isStart"], true);
    }

    #[test]
    fn deserializes_definition_with_absent_optionals() {
        // A sparse definition as an external producer persists it.
        let raw = json!({
            "id": "demo-1",
            "name": "Content Approval Workflow",
            "description": "Simple content approval process",
            "steps": [
                {
                    "id": "start",
                    "type": "terminal-step",
                    "position": {"x": 250, "y": 25},
                    "data": {"label": "Start", "isStart": true}
                }
            ],
            "edges": [
                {"id": "edge-1", "source": "start", "target": "review"}
            ],
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-02T08:30:00Z",
            "createdBy": "demo-user"
        });
        let def: WorkflowDefinition = serde_json::from_value(raw).unwrap();
        assert_eq!(def.id, "demo-1");
        assert_eq!(def.steps.len(), 1);
        assert_eq!(def.edges[0].source, "start");
        assert_eq!(def.edges[0].source_handle, None);
        assert!(def.variables.is_none());
    }

    #[test]
    fn timestamps_serialize_as_iso8601() {
        let def = sample();
        let json = serde_json::to_value(&def).unwrap();
        let created = json["createdAt"].as_str().unwrap();
        assert!(created.parse::<DateTime<Utc>>().is_ok(), "not ISO-8601: {created}");
    }
}
