//! Bundled template workflows, used to seed an empty repository.

use chrono::Utc;

use weft_core::{EdgeId, StepId, UserId, WorkflowId};

use crate::definition::{WorkflowDefinition, WorkflowEdge, WorkflowStep};
use crate::registry::{PARTICIPANT_STEP, PROCESS_STEP, TERMINAL_STEP};
use crate::step::{Position, StepData};

fn step(id: &str, kind: &str, x: f64, y: f64, data: StepData) -> WorkflowStep {
    WorkflowStep {
        id: StepId::new(id),
        kind: kind.into(),
        position: Position::new(x, y),
        data,
    }
}

fn edge(id: &str, source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: EdgeId::new(id),
        source: StepId::new(source),
        target: StepId::new(target),
        source_handle: None,
        target_handle: None,
        kind: None,
        data: None,
    }
}

/// A linear review-and-approve workflow.
#[must_use]
pub fn content_approval() -> WorkflowDefinition {
    let now = Utc::now();
    WorkflowDefinition {
        id: WorkflowId::new("demo-1"),
        name: "Content Approval Workflow".into(),
        description: Some("Simple content approval process with review and publishing".into()),
        steps: vec![
            step(
                "start",
                TERMINAL_STEP,
                250.0,
                25.0,
                StepData::new("Start").with_is_start(true),
            ),
            step(
                "review",
                PARTICIPANT_STEP,
                250.0,
                150.0,
                StepData::new("Content Review")
                    .with_description("Review content for quality and compliance"),
            ),
            step(
                "approve",
                PROCESS_STEP,
                250.0,
                300.0,
                StepData::new("Approval Decision").with_description("Approve or reject content"),
            ),
            step(
                "end",
                TERMINAL_STEP,
                250.0,
                500.0,
                StepData::new("End").with_is_start(false),
            ),
        ],
        edges: vec![
            edge("edge-1", "start", "review"),
            edge("edge-2", "review", "approve"),
            edge("edge-3", "approve", "end"),
        ],
        variables: None,
        created_at: now,
        updated_at: now,
        created_by: UserId::new("demo-user"),
    }
}

/// An automated asset pipeline with quality checks.
#[must_use]
pub fn asset_processing() -> WorkflowDefinition {
    let now = Utc::now();
    WorkflowDefinition {
        id: WorkflowId::new("demo-2"),
        name: "Asset Processing Pipeline".into(),
        description: Some("Automated asset processing with quality checks".into()),
        steps: vec![
            step(
                "start",
                TERMINAL_STEP,
                100.0,
                25.0,
                StepData::new("Start").with_is_start(true),
            ),
            step(
                "upload",
                PARTICIPANT_STEP,
                100.0,
                150.0,
                StepData::new("Asset Upload").with_description("Upload assets to DAM"),
            ),
            step(
                "resize",
                PROCESS_STEP,
                300.0,
                150.0,
                StepData::new("Image Processing").with_description("Resize and optimize images"),
            ),
            step(
                "quality",
                PROCESS_STEP,
                300.0,
                300.0,
                StepData::new("Quality Check").with_description("Validate asset quality"),
            ),
            step(
                "publish",
                PARTICIPANT_STEP,
                100.0,
                450.0,
                StepData::new("Publish Assets").with_description("Publish to CDN"),
            ),
            step(
                "end",
                TERMINAL_STEP,
                200.0,
                500.0,
                StepData::new("End").with_is_start(false),
            ),
        ],
        edges: vec![
            edge("edge-1", "start", "upload"),
            edge("edge-2", "upload", "resize"),
            edge("edge-3", "resize", "quality"),
            edge("edge-4", "quality", "publish"),
            edge("edge-5", "publish", "end"),
        ],
        variables: None,
        created_at: now,
        updated_at: now,
        created_by: UserId::new("demo-user"),
    }
}

/// All bundled templates.
#[must_use]
pub fn all() -> Vec<WorkflowDefinition> {
    vec![content_approval(), asset_processing()]
}
