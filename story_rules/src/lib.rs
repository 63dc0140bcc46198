//! # Story Rules
//!
//! The "Story Bible" crate - contains the story graph, attribute definitions,
//! ending rules and configuration. This crate is the single source of truth for
//! story content and holds no per-player state.

pub mod attributes;
pub mod config;
pub mod endings;
pub mod error;
pub mod graph;
pub mod scene;

pub use attributes::*;
pub use config::*;
pub use endings::*;
pub use error::*;
pub use graph::*;
pub use scene::*;
