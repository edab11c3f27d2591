#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Weft Core
//!
//! Core identifier types shared by the Weft workflow-builder crates.
//!
//! Weft entities are addressed by caller-visible string ids (the canvas
//! names the permanent terminal nodes `"start"` and `"end"`; client-minted
//! ids are time-based). This crate provides one newtype per entity kind so
//! the different id spaces cannot be mixed up at compile time.

pub mod id;

pub use id::{EdgeId, StepId, UserId, WorkflowId};
