//! Step-kind registry: maps a step's `type` tag to its capability record.
//!
//! Kinds are records, not subclasses: registering a new step kind means
//! inserting a [`StepCapabilities`] under a tag. Resolution never fails —
//! unrecognized tags degrade to a generic record so a graph still
//! round-trips when a node kind becomes unavailable.

use std::collections::HashMap;

use crate::error::WorkflowError;
use crate::step::StepData;

/// Tag for human tasks (assignment, review, approval).
pub const PARTICIPANT_STEP: &str = "participant-step";
/// Tag for automated processing steps.
pub const PROCESS_STEP: &str = "process-step";
/// Tag for the start/end boundary steps.
pub const TERMINAL_STEP: &str = "terminal-step";

/// Capability record for one step kind.
#[derive(Debug, Clone)]
pub struct StepCapabilities {
    /// Payload given to a freshly instantiated step of this kind.
    pub default_data: StepData,
    /// Terminal steps may lack an incoming edge (`isStart = true`) or an
    /// outgoing edge (`isStart = false`); every other kind needs both.
    pub terminal: bool,
    /// Presentation hint for the canvas.
    pub render_hint: String,
    /// Payload check for this kind.
    pub validate: fn(&StepData) -> Result<(), WorkflowError>,
}

fn validate_labeled(data: &StepData) -> Result<(), WorkflowError> {
    if data.label.trim().is_empty() {
        return Err(WorkflowError::EmptyLabel);
    }
    Ok(())
}

fn validate_terminal(data: &StepData) -> Result<(), WorkflowError> {
    validate_labeled(data)?;
    if data.is_start.is_none() {
        return Err(WorkflowError::MissingTerminalFlag);
    }
    Ok(())
}

/// Registry of step kinds keyed by their `type` tag.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    kinds: HashMap<String, StepCapabilities>,
    fallback: StepCapabilities,
}

impl StepRegistry {
    /// Create an empty registry. [`resolve`](Self::resolve) degrades every
    /// tag to the generic fallback record until kinds are registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            fallback: StepCapabilities {
                default_data: StepData::new("Step"),
                terminal: false,
                render_hint: "#6b7280".into(),
                validate: validate_labeled,
            },
        }
    }

    /// Create a registry with the built-in kinds registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            PARTICIPANT_STEP,
            StepCapabilities {
                default_data: StepData::new("Participant Step"),
                terminal: false,
                render_hint: "#3b82f6".into(),
                validate: validate_labeled,
            },
        );
        registry.register(
            PROCESS_STEP,
            StepCapabilities {
                default_data: StepData::new("Process Step"),
                terminal: false,
                render_hint: "#f59e0b".into(),
                validate: validate_labeled,
            },
        );
        registry.register(
            TERMINAL_STEP,
            StepCapabilities {
                default_data: StepData::new("End").with_is_start(false),
                terminal: true,
                render_hint: "#10b981".into(),
                validate: validate_terminal,
            },
        );
        registry
    }

    /// Register (or replace) a step kind under the given tag.
    pub fn register(&mut self, tag: impl Into<String>, capabilities: StepCapabilities) {
        self.kinds.insert(tag.into(), capabilities);
    }

    /// Resolve a tag to its capability record, degrading to the generic
    /// fallback when the tag is unrecognized.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> &StepCapabilities {
        self.kinds.get(tag).unwrap_or(&self.fallback)
    }

    /// Returns `true` if the tag is explicitly registered.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.kinds.contains_key(tag)
    }

    /// Returns `true` if steps of this kind mark a workflow boundary.
    #[must_use]
    pub fn is_terminal(&self, tag: &str) -> bool {
        self.resolve(tag).terminal
    }

    /// Run the kind-specific payload check for a step.
    pub fn validate(&self, tag: &str, data: &StepData) -> Result<(), WorkflowError> {
        (self.resolve(tag).validate)(data)
    }

    /// All explicitly registered tags.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.kinds.keys().map(String::as_str).collect()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
