//! The builder session: one editable graph and its mapping to/from the
//! canonical workflow definition.

use std::collections::HashSet;

use chrono::Utc;

use weft_core::{EdgeId, StepId, UserId, WorkflowId};

use crate::definition::{WorkflowDefinition, WorkflowEdge, WorkflowStep};
use crate::error::WorkflowError;
use crate::graph::{Edge, EdgeChange, Node, NodeChange};
use crate::state::SessionState;

/// Notification emitted synchronously after each committed session mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A definition (or the blank template) was loaded.
    Loaded,
    /// A node change was applied.
    NodeChanged(NodeChange),
    /// An edge change was applied.
    EdgeChanged(EdgeChange),
    /// A new connection was made.
    Connected(EdgeId),
    /// A save was committed and the baseline replaced.
    Saved(WorkflowId),
}

/// Owns the live editable graph for one open workflow.
///
/// The session is the only component that mutates the graph. It converts
/// the graph to and from [`WorkflowDefinition`] at explicit save/load
/// boundaries; in between, the canvas reports edits as [`NodeChange`] /
/// [`EdgeChange`] events.
///
/// Opened read-only, every mutating operation is a silent no-op — this is
/// how a viewer is derived from the same component.
pub struct BuilderSession {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    baseline: Option<WorkflowDefinition>,
    state: SessionState,
    read_only: bool,
    acting_user: UserId,
    subscribers: Vec<Box<dyn Fn(&SessionEvent) + Send>>,
}

impl BuilderSession {
    /// Create an editable session for the given acting identity.
    #[must_use]
    pub fn new(acting_user: impl Into<UserId>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            baseline: None,
            state: SessionState::Empty,
            read_only: false,
            acting_user: acting_user.into(),
            subscribers: Vec::new(),
        }
    }

    /// Create a read-only (viewer) session.
    #[must_use]
    pub fn read_only(acting_user: impl Into<UserId>) -> Self {
        Self {
            read_only: true,
            ..Self::new(acting_user)
        }
    }

    /// Returns `true` if mutating operations are rejected.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The live nodes, in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The live edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Register an observer called synchronously after each committed
    /// mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&SessionEvent) + Send + 'static) {
        self.subscribers.push(Box::new(observer));
    }

    fn notify(&self, event: &SessionEvent) {
        for observer in &self.subscribers {
            observer(event);
        }
    }

    fn contains_node(&self, id: &StepId) -> bool {
        self.nodes.iter().any(|n| n.id == *id)
    }

    /// Populate the graph from a definition, or initialize the canonical
    /// blank workflow (the two terminal nodes, no edges) when `None`.
    ///
    /// Edges whose endpoints are missing from the definition's step set are
    /// dropped and reported as recoverable warnings; everything else loads
    /// verbatim.
    pub fn load(&mut self, definition: Option<&WorkflowDefinition>) -> Vec<WorkflowError> {
        let mut warnings = Vec::new();

        match definition {
            Some(def) => {
                self.nodes = def.steps.iter().cloned().map(Node::from).collect();
                let live: HashSet<StepId> = self.nodes.iter().map(|n| n.id.clone()).collect();

                self.edges = Vec::with_capacity(def.edges.len());
                for edge in &def.edges {
                    let missing = [&edge.source, &edge.target]
                        .into_iter()
                        .find(|id| !live.contains(*id));
                    if let Some(step) = missing {
                        tracing::warn!(
                            edge = %edge.id,
                            step = %step,
                            "dropping edge with missing endpoint"
                        );
                        warnings.push(WorkflowError::DanglingEdge {
                            edge: edge.id.clone(),
                            step: step.clone(),
                        });
                    } else {
                        self.edges.push(edge.clone().into());
                    }
                }
                self.baseline = Some(def.clone());
            }
            None => {
                self.nodes = vec![Node::start(), Node::end()];
                self.edges = Vec::new();
                self.baseline = None;
            }
        }

        self.state = SessionState::Loaded;
        self.notify(&SessionEvent::Loaded);
        warnings
    }

    /// Apply an incremental node edit from the canvas. Silent no-op in
    /// read-only mode or when the change targets an unknown node.
    pub fn apply_node_change(&mut self, change: NodeChange) {
        if self.read_only {
            return;
        }

        let applied = match &change {
            NodeChange::Add { node } => {
                if self.contains_node(&node.id) {
                    false
                } else {
                    self.nodes.push(node.clone());
                    true
                }
            }
            NodeChange::Move { id, position } => {
                if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                    node.position = *position;
                    true
                } else {
                    false
                }
            }
            NodeChange::Remove { id } => {
                let before = self.nodes.len();
                self.nodes.retain(|n| n.id != *id);
                if self.nodes.len() == before {
                    false
                } else {
                    // Edges touching a removed node go with it.
                    self.edges.retain(|e| e.source != *id && e.target != *id);
                    true
                }
            }
        };

        if applied {
            self.state = SessionState::Dirty;
            self.notify(&SessionEvent::NodeChanged(change));
        }
    }

    /// Apply an incremental edge edit from the canvas. Silent no-op in
    /// read-only mode; an added edge is accepted only when both endpoints
    /// are live nodes and its id is unused.
    pub fn apply_edge_change(&mut self, change: EdgeChange) {
        if self.read_only {
            return;
        }

        let applied = match &change {
            EdgeChange::Add { edge } => {
                let id_taken = self.edges.iter().any(|e| e.id == edge.id);
                if id_taken || !self.contains_node(&edge.source) || !self.contains_node(&edge.target)
                {
                    false
                } else {
                    self.edges.push(edge.clone());
                    true
                }
            }
            EdgeChange::Remove { id } => {
                let before = self.edges.len();
                self.edges.retain(|e| e.id != *id);
                self.edges.len() != before
            }
        };

        if applied {
            self.state = SessionState::Dirty;
            self.notify(&SessionEvent::EdgeChanged(change));
        }
    }

    /// Create a new edge with a freshly minted unique id.
    ///
    /// Returns `None` in read-only mode or when either endpoint is not a
    /// live node. Deliberately does not validate acyclicity: workflows may
    /// loop back for retries.
    pub fn connect(
        &mut self,
        source: impl Into<StepId>,
        target: impl Into<StepId>,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Option<EdgeId> {
        if self.read_only {
            return None;
        }
        let source = source.into();
        let target = target.into();
        if !self.contains_node(&source) || !self.contains_node(&target) {
            return None;
        }

        let id = EdgeId::generate();
        let mut edge = Edge::new(id.clone(), source, target);
        edge.source_handle = source_handle;
        edge.target_handle = target_handle;
        self.edges.push(edge);

        self.state = SessionState::Dirty;
        self.notify(&SessionEvent::Connected(id.clone()));
        Some(id)
    }

    /// Build the canonical definition from the current graph.
    ///
    /// Metadata (`id`, `name`, `description`, `variables`, `createdAt`,
    /// `createdBy`) is preserved from the loaded baseline; without one, a
    /// time-based id is minted and `createdBy` is the acting identity.
    /// `updatedAt` is always stamped with the current time. Edges are
    /// emitted only between live node ids, so a dangling reference cannot
    /// be produced here.
    #[must_use]
    pub fn serialize(&self) -> WorkflowDefinition {
        let now = Utc::now();
        let live: HashSet<StepId> = self.nodes.iter().map(|n| n.id.clone()).collect();

        let steps: Vec<WorkflowStep> =
            self.nodes.iter().cloned().map(WorkflowStep::from).collect();
        let edges: Vec<WorkflowEdge> = self
            .edges
            .iter()
            .filter(|e| live.contains(&e.source) && live.contains(&e.target))
            .cloned()
            .map(WorkflowEdge::from)
            .collect();

        match &self.baseline {
            Some(base) => WorkflowDefinition {
                id: base.id.clone(),
                name: base.name.clone(),
                description: base.description.clone(),
                steps,
                edges,
                variables: base.variables.clone(),
                created_at: base.created_at,
                updated_at: now,
                created_by: base.created_by.clone(),
            },
            None => WorkflowDefinition {
                id: WorkflowId::generate(),
                name: "Untitled Workflow".into(),
                description: None,
                steps,
                edges,
                variables: None,
                created_at: now,
                updated_at: now,
                created_by: self.acting_user.clone(),
            },
        }
    }

    /// Install a saved definition as the new baseline and return to
    /// [`SessionState::Loaded`]. Called after the store commits a save.
    pub fn commit_saved(&mut self, definition: WorkflowDefinition) {
        let id = definition.id.clone();
        self.baseline = Some(definition);
        self.state = SessionState::Loaded;
        self.notify(&SessionEvent::Saved(id));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::registry::{PARTICIPANT_STEP, PROCESS_STEP, TERMINAL_STEP};
    use crate::step::{Position, StepData};

    use super::*;

    fn definition() -> WorkflowDefinition {
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
                    data: StepData::new("Content Review")
                        .with_description("Review content for quality"),
                },
                WorkflowStep {
                    id: StepId::new("end"),
                    kind: TERMINAL_STEP.into(),
                    position: Position::new(250.0, 500.0),
                    data: StepData::new("End").with_is_start(false),
                },
            ],
            edges: vec![
                WorkflowEdge {
                    id: EdgeId::new("edge-1"),
                    source: StepId::new("start"),
                    target: StepId::new("review"),
                    source_handle: None,
                    target_handle: None,
                    kind: None,
                    data: None,
                },
                WorkflowEdge {
                    id: EdgeId::new("edge-2"),
                    source: StepId::new("review"),
                    target: StepId::new("end"),
                    source_handle: Some("approved".into()),
                    target_handle: None,
                    kind: Some("default".into()),
                    data: None,
                },
            ],
            variables: Some(
                json!({"reviewerGroup": "editors"})
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            created_at: now,
            updated_at: now,
            created_by: UserId::new("admin"),
        }
    }

    #[test]
    fn blank_load_yields_exactly_start_and_end() {
        let mut session = BuilderSession::new("admin");
        let warnings = session.load(None);

        assert!(warnings.is_empty());
        assert_eq!(session.nodes().len(), 2);
        assert_eq!(session.nodes()[0].id, "start");
        assert_eq!(session.nodes()[1].id, "end");
        assert!(session.edges().is_empty());
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn roundtrip_is_identity_modulo_updated_at() {
        let def = definition();
        let mut session = BuilderSession::new("admin");
        let warnings = session.load(Some(&def));
        assert!(warnings.is_empty());

        let mut out = session.serialize();
        assert!(out.updated_at >= def.updated_at);
        out.updated_at = def.updated_at;
        assert_eq!(out, def);
    }

    #[test]
    fn load_drops_dangling_edges_with_warning() {
        let mut def = definition();
        def.edges.push(WorkflowEdge {
            id: EdgeId::new("edge-3"),
            source: StepId::new("review"),
            target: StepId::new("ghost"),
            source_handle: None,
            target_handle: None,
            kind: None,
            data: None,
        });

        let mut session = BuilderSession::new("admin");
        let warnings = session.load(Some(&def));

        assert_eq!(
            warnings,
            vec![WorkflowError::DanglingEdge {
                edge: EdgeId::new("edge-3"),
                step: StepId::new("ghost"),
            }]
        );
        assert_eq!(session.edges().len(), 2);
        assert!(session.edges().iter().all(|e| e.id != "edge-3"));
    }

    #[test]
    fn connect_between_terminals_mints_fresh_edge() {
        let mut session = BuilderSession::new("admin");
        session.load(None);

        let id = session.connect("start", "end", None, None).unwrap();
        let def = session.serialize();

        assert_eq!(def.edges.len(), 1);
        assert_eq!(def.edges[0].id, id);
        assert_eq!(def.edges[0].source, "start");
        assert_eq!(def.edges[0].target, "end");

        // A second connection gets a distinct id.
        let second = session.connect("start", "end", None, None).unwrap();
        assert_ne!(second, id);
    }

    #[test]
    fn connect_unknown_endpoint_is_rejected() {
        let mut session = BuilderSession::new("admin");
        session.load(None);

        assert_eq!(session.connect("start", "ghost", None, None), None);
        assert!(session.edges().is_empty());
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn connect_does_not_validate_acyclicity() {
        let def = definition();
        let mut session = BuilderSession::new("admin");
        session.load(Some(&def));

        // A loop back from review to start is allowed.
        assert!(session.connect("review", "start", None, None).is_some());
    }

    #[test]
    fn read_only_session_ignores_every_mutation() {
        let def = definition();
        let mut session = BuilderSession::read_only("viewer");
        session.load(Some(&def));

        let nodes_before = session.nodes().to_vec();
        let edges_before = session.edges().to_vec();

        session.apply_node_change(NodeChange::Remove { id: "review".into() });
        session.apply_node_change(NodeChange::Move {
            id: "start".into(),
            position: Position::new(0.0, 0.0),
        });
        session.apply_edge_change(EdgeChange::Remove { id: "edge-1".into() });
        assert_eq!(session.connect("start", "end", None, None), None);

        assert_eq!(session.nodes(), nodes_before.as_slice());
        assert_eq!(session.edges(), edges_before.as_slice());
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn edits_move_session_to_dirty() {
        let mut session = BuilderSession::new("admin");
        session.load(None);
        assert_eq!(session.state(), SessionState::Loaded);

        session.apply_node_change(NodeChange::Move {
            id: "start".into(),
            position: Position::new(100.0, 50.0),
        });
        assert_eq!(session.state(), SessionState::Dirty);
        assert_eq!(session.nodes()[0].position, Position::new(100.0, 50.0));
    }

    #[test]
    fn serialize_does_not_change_state() {
        let mut session = BuilderSession::new("admin");
        session.load(None);
        session.connect("start", "end", None, None);
        assert_eq!(session.state(), SessionState::Dirty);

        let _ = session.serialize();
        assert_eq!(session.state(), SessionState::Dirty);
    }

    #[test]
    fn commit_saved_installs_new_baseline() {
        let mut session = BuilderSession::new("admin");
        session.load(None);
        session.connect("start", "end", None, None);

        let saved = session.serialize();
        session.commit_saved(saved.clone());
        assert_eq!(session.state(), SessionState::Loaded);

        // The next serialize preserves the committed metadata.
        let next = session.serialize();
        assert_eq!(next.id, saved.id);
        assert_eq!(next.created_at, saved.created_at);
        assert_eq!(next.created_by, saved.created_by);
    }

    #[test]
    fn serialize_without_baseline_mints_metadata() {
        let mut session = BuilderSession::new("composer");
        session.load(None);

        let def = session.serialize();
        assert!(def.id.as_str().starts_with("workflow-"));
        assert_eq!(def.name, "Untitled Workflow");
        assert_eq!(def.created_by, "composer");
        assert_eq!(def.created_at, def.updated_at);
    }

    #[test]
    fn removing_a_node_drops_its_edges() {
        let def = definition();
        let mut session = BuilderSession::new("admin");
        session.load(Some(&def));

        session.apply_node_change(NodeChange::Remove { id: "review".into() });

        assert_eq!(session.nodes().len(), 2);
        assert!(session.edges().is_empty());
        let out = session.serialize();
        assert!(out.edges.is_empty());
    }

    #[test]
    fn added_edge_requires_live_endpoints_and_fresh_id() {
        let mut session = BuilderSession::new("admin");
        session.load(None);

        session.apply_edge_change(EdgeChange::Add {
            edge: Edge::new("edge-x", "start", "ghost"),
        });
        assert!(session.edges().is_empty());

        session.apply_edge_change(EdgeChange::Add {
            edge: Edge::new("edge-x", "start", "end"),
        });
        assert_eq!(session.edges().len(), 1);

        // Same id again is ignored.
        session.apply_edge_change(EdgeChange::Add {
            edge: Edge::new("edge-x", "end", "start"),
        });
        assert_eq!(session.edges().len(), 1);
    }

    #[test]
    fn adding_a_node_with_known_id_is_ignored() {
        let mut session = BuilderSession::new("admin");
        session.load(None);

        session.apply_node_change(NodeChange::Add { node: Node::start() });
        assert_eq!(session.nodes().len(), 2);
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn subscribers_are_notified_synchronously() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        let mut session = BuilderSession::new("admin");
        session.subscribe(move |event| {
            if matches!(event, SessionEvent::Connected(_) | SessionEvent::Loaded) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        session.load(None);
        session.connect("start", "end", None, None);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_step_kinds_round_trip_untouched() {
        let mut def = definition();
        def.steps.push(WorkflowStep {
            id: StepId::new("transcode"),
            kind: "asset-transcode".into(),
            position: Position::new(400.0, 300.0),
            data: StepData::new("Transcode").with_config("preset", json!("web-hd")),
        });
        // kind deliberately absent from the default registry
        assert_ne!(def.steps[3].kind, PROCESS_STEP);

        let mut session = BuilderSession::new("admin");
        session.load(Some(&def));
        let mut out = session.serialize();
        out.updated_at = def.updated_at;
        assert_eq!(out, def);
    }
}
