//! Strongly-typed string identifiers for Weft entities.
//!
//! Workflow, step, and edge ids are caller-visible strings: the canvas
//! addresses the permanent terminal nodes as `"start"` / `"end"`, and ids
//! minted client-side are time-based (`workflow-{millis}`,
//! `edge-{millis}-{seq}`). Each id type wraps a `String` behind its own
//! newtype so the different kinds cannot be mixed up at compile time.
//!
//! All id types support:
//! - `new(...)` from any string-like value
//! - Transparent serde (serializes as a bare JSON string)
//! - `Display`, `FromStr`, `Eq`, `Ord`, `Hash`
//! - Direct comparison against `&str` / `String`

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

macro_rules! define_string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string-like value.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Return the inner string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }
    };
}

define_string_id!(
    /// Identifier of a persisted workflow definition.
    WorkflowId
);
define_string_id!(
    /// Identifier of a step (graph node), unique within one definition.
    StepId
);
define_string_id!(
    /// Identifier of an edge, unique within one definition.
    EdgeId
);
define_string_id!(
    /// Identity of the acting user (e.g. the `createdBy` field).
    UserId
);

// Tiebreak for ids minted within the same millisecond.
static MINT_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    MINT_SEQ.fetch_add(1, Ordering::Relaxed)
}

impl WorkflowId {
    /// Mint a fresh time-based workflow id (`workflow-{millis}-{seq}`).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "workflow-{}-{}",
            Utc::now().timestamp_millis(),
            next_seq()
        ))
    }
}

impl EdgeId {
    /// Mint a fresh time-based edge id (`edge-{millis}-{seq}`).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "edge-{}-{}",
            Utc::now().timestamp_millis(),
            next_seq()
        ))
    }
}
