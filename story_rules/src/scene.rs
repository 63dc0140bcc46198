//! Scene and choice definitions - the nodes and edges of the story graph.

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeDelta;

/// Unique identifier for scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    /// Create a scene ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A user-selectable edge out of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown to the user.
    pub label: String,

    /// The exact input that selects this choice. This is the only matcher;
    /// the label is never compared against input.
    pub value: String,

    /// Destination scene.
    pub next: SceneId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<AttributeDelta>,
}

impl Choice {
    /// Create a choice whose label doubles as its matcher value.
    pub fn new(label: impl Into<String>, next: impl Into<SceneId>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
            next: next.into(),
            params: None,
        }
    }

    /// Set the matcher value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Attach attribute deltas applied when this choice is taken.
    pub fn with_params(mut self, params: AttributeDelta) -> Self {
        self.params = Some(params);
        self
    }

    /// Byte-for-byte comparison against user input.
    pub fn matches(&self, input: &str) -> bool {
        self.value == input
    }
}

/// One unit of displayed narrative plus its outgoing edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Filled from the map key when omitted in content.
    #[serde(default)]
    pub id: SceneId,

    pub text: String,

    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Automatic continuation, followed when the user sends the advance token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<SceneId>,

    /// Deltas applied when the scene is departed via `next`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<AttributeDelta>,

    /// The following scene is chosen by the ending rules, not by `next`.
    #[serde(default, rename = "ending_decision")]
    pub is_ending_decision_point: bool,
}

impl Scene {
    /// Create a scene with no outgoing edges.
    pub fn new(id: impl Into<SceneId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
            next: None,
            params: None,
            is_ending_decision_point: false,
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Set the automatic continuation.
    pub fn with_next(mut self, next: impl Into<SceneId>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Attach deltas applied when leaving via `next`.
    pub fn with_params(mut self, params: AttributeDelta) -> Self {
        self.params = Some(params);
        self
    }

    /// Mark this scene as the ending decision point.
    pub fn as_ending_decision_point(mut self) -> Self {
        self.is_ending_decision_point = true;
        self
    }

    /// Check if the scene offers choices.
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    pub(crate) fn has_explicit_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attribute;

    #[test]
    fn test_scene_builder() {
        let scene = Scene::new("gate", "A rusted gate.")
            .with_choice(Choice::new("Open it", "courtyard").with_value("open"))
            .with_choice(Choice::new("Leave", "road"));

        assert_eq!(scene.id, SceneId::new("gate"));
        assert!(scene.has_choices());
        assert!(scene.next.is_none());
        assert_eq!(scene.choices[0].value, "open");
        assert_eq!(scene.choices[1].value, "Leave");
    }

    #[test]
    fn test_choice_matching_is_exact() {
        let choice = Choice::new("Remember", "memory_1").with_value("remember");
        assert!(choice.matches("remember"));
        assert!(!choice.matches("Remember"));
        assert!(!choice.matches(" remember"));
        assert!(!choice.matches("remember\n"));
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "text": "The lighthouse hums.",
            "choices": [
                {"label": "Climb", "value": "climb", "next": "top", "params": {"resolve": 1}}
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();

        assert!(!scene.has_explicit_id());
        assert!(scene.next.is_none());
        assert!(!scene.is_ending_decision_point);
        assert_eq!(scene.choices[0].next, SceneId::new("top"));
        let params = scene.choices[0].params.unwrap();
        assert_eq!(params.get(Attribute::Resolve), 1);
    }

    #[test]
    fn test_decision_flag_from_json() {
        let json = r#"{"id": "finale", "text": "...", "next": "ending_bond", "ending_decision": true}"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert!(scene.is_ending_decision_point);
        assert_eq!(scene.next, Some(SceneId::new("ending_bond")));
    }
}
