//! # Narrative Core
//!
//! The stateful half of the story system. This crate reads the immutable story
//! graph from `story_rules`, keeps one session per user, and turns each text
//! message into exactly one story transition.
//!
//! ## Core Components
//!
//! - **session**: Per-user progress and the pluggable session store
//! - **engine**: Input resolution, attribute updates, ending selection and the
//!   `advance` orchestration that ties them together
//!
//! ## Design Philosophy
//!
//! - **Never fails at runtime**: Unknown input, missing sessions and dangling
//!   scene ids are ordinary outcomes, not errors
//! - **Per-user atomicity**: One `advance` holds its session for the whole
//!   transition; different users never wait on each other
//! - **Transport agnostic**: Results are plain values that a chat shell renders

pub mod engine;
pub mod session;

pub use engine::*;
pub use session::*;
