//! Input resolution: which edge of the current scene a message selects.

use story_rules::{AttributeDelta, Choice, Scene, SceneId};

use crate::session::TransitionTrigger;

/// A successfully matched edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTransition<'a> {
    /// `None` when the scene's `next` edge was followed.
    pub choice: Option<&'a Choice>,
    pub destination: &'a SceneId,
    /// Deltas to apply: the choice's params, or the scene's when advancing.
    pub params: Option<&'a AttributeDelta>,
}

impl ResolvedTransition<'_> {
    /// How this transition should be recorded in history.
    pub fn trigger(&self) -> TransitionTrigger {
        match self.choice {
            Some(choice) => TransitionTrigger::Choice {
                value: choice.value.clone(),
            },
            None => TransitionTrigger::Advance,
        }
    }
}

/// Matches raw input against the edges of a scene.
#[derive(Debug, Clone)]
pub struct InputResolver {
    advance_token: String,
}

impl InputResolver {
    /// Create a resolver with the given advance token.
    pub fn new(advance_token: impl Into<String>) -> Self {
        Self {
            advance_token: advance_token.into(),
        }
    }

    /// The input that follows a scene's `next` edge.
    pub fn advance_token(&self) -> &str {
        &self.advance_token
    }

    /// Resolve input against a scene. `None` means nothing on offer matched,
    /// which is an ordinary outcome.
    ///
    /// # Order
    ///
    /// 1. The advance token, if the scene has a `next` edge
    /// 2. Choices in declaration order, by exact value
    pub fn resolve<'a>(&self, scene: &'a Scene, input: &str) -> Option<ResolvedTransition<'a>> {
        if input == self.advance_token {
            if let Some(next) = &scene.next {
                return Some(ResolvedTransition {
                    choice: None,
                    destination: next,
                    params: scene.params.as_ref(),
                });
            }
        }

        scene
            .choices
            .iter()
            .find(|choice| choice.matches(input))
            .map(|choice| ResolvedTransition {
                choice: Some(choice),
                destination: &choice.next,
                params: choice.params.as_ref(),
            })
    }
}
