//! Step payload types: position, data, and typed ports.

use serde::{Deserialize, Serialize};

/// Canvas position of a step. A layout hint only, with no semantic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Category-specific payload of a step.
///
/// Keys the builder does not itself understand are captured in `extra` and
/// preserved verbatim through load → edit → serialize, so a definition
/// written by a newer producer round-trips without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepData {
    /// Human-readable label shown on the node.
    pub label: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category-specific configuration map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Map<String, serde_json::Value>>,
    /// Typed input ports, when the step exposes more than the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<WorkflowPort>>,
    /// Typed output ports, when the step exposes more than the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<WorkflowPort>>,
    /// Set on terminal steps: `true` marks the start boundary, `false` the end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_start: Option<bool>,
    /// Unknown keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StepData {
    /// Create a payload with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.config
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }

    /// Mark this payload as belonging to a terminal step.
    #[must_use]
    pub fn with_is_start(mut self, is_start: bool) -> Self {
        self.is_start = Some(is_start);
        self
    }

    /// Add a typed input port.
    #[must_use]
    pub fn with_input(mut self, port: WorkflowPort) -> Self {
        self.inputs.get_or_insert_with(Vec::new).push(port);
        self
    }

    /// Add a typed output port.
    #[must_use]
    pub fn with_output(mut self, port: WorkflowPort) -> Self {
        self.outputs.get_or_insert_with(Vec::new).push(port);
        self
    }
}

/// A named, typed port on a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowPort {
    /// Port identifier, unique within the step.
    pub id: String,
    /// Human-readable port name.
    pub name: String,
    /// Whether the port accepts or produces data.
    #[serde(rename = "type")]
    pub direction: PortDirection,
    /// The kind of value flowing through the port.
    #[serde(rename = "dataType")]
    pub data_type: PortDataType,
    /// Whether the port must be connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl WorkflowPort {
    /// Create a port.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        direction: PortDirection,
        data_type: PortDataType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            direction,
            data_type,
            required: None,
        }
    }

    /// Mark the port as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }
}

/// Direction of a [`WorkflowPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// The port accepts data.
    Input,
    /// The port produces data.
    Output,
}

/// Value kind flowing through a [`WorkflowPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDataType {
    /// A string value.
    String,
    /// A numeric value.
    Number,
    /// A boolean value.
    Boolean,
    /// An arbitrary JSON object.
    Object,
    /// A JSON array.
    Array,
}
