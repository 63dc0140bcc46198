//! Session module - per-user progress through the story.
//!
//! A session consists of:
//! - **Position**: The id of the scene currently shown
//! - **Attributes**: Hidden scores accumulated along the way
//! - **History**: An append-only audit trail of transitions

mod store;

pub use store::*;

use serde::{Deserialize, Serialize};
use story_rules::{Attributes, Ending, SceneId};
use uuid::Uuid;

/// Opaque, stable identifier of a chat user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a user ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifies one playthrough. Regenerated on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a transition was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionTrigger {
    /// The advance token followed the scene's `next` edge.
    Advance,
    /// A choice was matched by its value.
    Choice { value: String },
}

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: SceneId,
    pub to: SceneId,
    pub trigger: TransitionTrigger,
    /// Set when `from` was the ending decision point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
}

impl TransitionRecord {
    /// The matched choice value, if the transition came from a choice.
    pub fn choice_matched(&self) -> Option<&str> {
        match &self.trigger {
            TransitionTrigger::Advance => None,
            TransitionTrigger::Choice { value } => Some(value),
        }
    }
}

/// Mutable story progress for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub current_scene_id: SceneId,
    pub attributes: Attributes,

    /// Reserved for chaptered content; no rule changes it yet.
    pub chapter: u32,

    /// Diagnostics only. Engine logic never reads it.
    pub history: Vec<TransitionRecord>,
}

impl Session {
    /// Create a fresh session positioned at the entry scene.
    pub fn new(user_id: UserId, entry_scene: SceneId) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            current_scene_id: entry_scene,
            attributes: Attributes::new(),
            chapter: 0,
            history: Vec::new(),
        }
    }

    /// Append a transition to the history.
    pub fn record(&mut self, record: TransitionRecord) {
        self.history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new(UserId::new("U123"), SceneId::new("prologue_start"));
        assert_eq!(session.user_id, UserId::new("U123"));
        assert_eq!(session.current_scene_id, SceneId::new("prologue_start"));
        assert_eq!(session.attributes, Attributes::new());
        assert_eq!(session.chapter, 0);
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new(UserId::new("U1"), SceneId::new("start"));
        let b = Session::new(UserId::new("U1"), SceneId::new("start"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_choice_matched() {
        let advance = TransitionRecord {
            from: SceneId::new("a"),
            to: SceneId::new("b"),
            trigger: TransitionTrigger::Advance,
            ending: None,
        };
        let choice = TransitionRecord {
            trigger: TransitionTrigger::Choice {
                value: "stay".to_string(),
            },
            ..advance.clone()
        };

        assert_eq!(advance.choice_matched(), None);
        assert_eq!(choice.choice_matched(), Some("stay"));
    }

    #[test]
    fn test_session_serializes_history() {
        let mut session = Session::new(UserId::new("U1"), SceneId::new("finale"));
        session.record(TransitionRecord {
            from: SceneId::new("finale"),
            to: SceneId::new("ending_bond"),
            trigger: TransitionTrigger::Advance,
            ending: Some(Ending::Bond),
        });

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["user_id"], "U1");
        assert_eq!(json["history"][0]["trigger"]["kind"], "advance");
        assert_eq!(json["history"][0]["ending"], "bond");

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
