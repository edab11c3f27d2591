//! Builder session lifecycle state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`BuilderSession`](crate::BuilderSession).
///
/// `Empty → Loaded → Dirty`; a committed save returns the session to
/// `Loaded` with the saved definition as the new baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No graph loaded yet.
    Empty,
    /// A graph is loaded and matches its baseline definition.
    Loaded,
    /// The graph has local edits not yet committed to a save.
    Dirty,
}

impl SessionState {
    /// Returns `true` if no graph has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if the graph matches its baseline.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Returns `true` if the graph has uncommitted edits.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        matches!(self, Self::Dirty)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Loaded => write!(f, "loaded"),
            Self::Dirty => write!(f, "dirty"),
        }
    }
}
