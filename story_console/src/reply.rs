//! Rendering engine results into chat replies.

use serde::Serialize;

use narrative_core::SceneResult;
use story_rules::{MessageSettings, Scene};

/// A tappable suggestion: `label` is shown, `text` is sent back as input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub label: String,
    pub text: String,
}

/// One outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

impl Reply {
    /// A plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_replies: Vec::new(),
        }
    }
}

/// Builds replies using the configured fixed messages.
pub struct Renderer<'a> {
    messages: &'a MessageSettings,
    advance_token: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(messages: &'a MessageSettings, advance_token: &'a str) -> Self {
        Self {
            messages,
            advance_token,
        }
    }

    /// Map an engine result to a reply. `None` means send nothing.
    pub fn render(&self, result: &SceneResult<'_>) -> Option<Reply> {
        match result {
            SceneResult::Scene { scene, .. } => Some(self.render_scene(scene)),
            SceneResult::InvalidInput => Some(Reply::text(&self.messages.invalid_input)),
            SceneResult::StoryEnded => Some(Reply::text(&self.messages.story_ended)),
            SceneResult::SessionAbsent => self.messages.session_absent.as_ref().map(Reply::text),
        }
    }

    /// Scene text plus one button per choice, or a single advance button.
    pub fn render_scene(&self, scene: &Scene) -> Reply {
        let quick_replies = if scene.has_choices() {
            scene
                .choices
                .iter()
                .map(|choice| QuickReply {
                    label: choice.label.clone(),
                    text: choice.value.clone(),
                })
                .collect()
        } else if scene.next.is_some() {
            vec![QuickReply {
                label: self.messages.advance_label.clone(),
                text: self.advance_token.to_string(),
            }]
        } else {
            Vec::new()
        };

        Reply {
            text: scene.text.clone(),
            quick_replies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_rules::Choice;

    fn renderer(messages: &MessageSettings) -> Renderer<'_> {
        Renderer::new(messages, "__next__")
    }

    #[test]
    fn test_choices_become_quick_replies() {
        let messages = MessageSettings::default();
        let scene = Scene::new("crossroads", "Two paths.")
            .with_next("ignored")
            .with_choice(Choice::new("Stay with her", "a").with_value("stay"))
            .with_choice(Choice::new("Press on", "b").with_value("press"));

        let reply = renderer(&messages).render_scene(&scene);
        assert_eq!(reply.text, "Two paths.");
        assert_eq!(
            reply.quick_replies,
            vec![
                QuickReply {
                    label: "Stay with her".to_string(),
                    text: "stay".to_string()
                },
                QuickReply {
                    label: "Press on".to_string(),
                    text: "press".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_next_becomes_advance_button() {
        let messages = MessageSettings::default();
        let scene = Scene::new("intro", "Waves.").with_next("shore");

        let reply = renderer(&messages).render_scene(&scene);
        assert_eq!(reply.quick_replies.len(), 1);
        assert_eq!(reply.quick_replies[0].label, "Next");
        assert_eq!(reply.quick_replies[0].text, "__next__");
    }

    #[test]
    fn test_terminal_scene_has_no_buttons() {
        let messages = MessageSettings::default();
        let reply = renderer(&messages).render_scene(&Scene::new("end", "Fin."));
        assert!(reply.quick_replies.is_empty());
    }

    #[test]
    fn test_fixed_messages() {
        let messages = MessageSettings::default();
        let renderer = renderer(&messages);

        assert_eq!(
            renderer.render(&SceneResult::InvalidInput),
            Some(Reply::text(&messages.invalid_input))
        );
        assert_eq!(
            renderer.render(&SceneResult::StoryEnded),
            Some(Reply::text(&messages.story_ended))
        );
        assert_eq!(renderer.render(&SceneResult::SessionAbsent), None);
    }

    #[test]
    fn test_session_absent_prompt() {
        let messages = MessageSettings {
            session_absent: Some("Send \"Begin the story?\" to start.".to_string()),
            ..MessageSettings::default()
        };
        let reply = renderer(&messages).render(&SceneResult::SessionAbsent).unwrap();
        assert!(reply.text.contains("Begin the story?"));
    }

    #[test]
    fn test_reply_json_shape() {
        let json = serde_json::to_value(Reply::text("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello"}));
    }
}
