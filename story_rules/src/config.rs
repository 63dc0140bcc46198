//! Engine configuration loaded from TOML.
//!
//! Every section is optional; an empty file yields the defaults below.
//!
//! ```toml
//! [story]
//! entry_scene = "prologue_start"
//! advance_token = "__next__"
//!
//! [commands]
//! start = ["Begin the story?"]
//! reset = ["Start over"]
//!
//! [endings]
//! bad = "ending_bad"
//! true_end = "ending_true"
//!
//! [messages]
//! invalid_input = "Please pick one of the options shown."
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::endings::Ending;
use crate::error::{ConfigError, ConfigResult};
use crate::scene::SceneId;

/// Complete configuration for one story deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoryConfig {
    pub story: StorySettings,
    pub commands: CommandSettings,
    pub endings: EndingScenes,
    pub messages: MessageSettings,
}

impl StoryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: StoryConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Reject settings the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let token = &self.story.advance_token;
        if token.is_empty() {
            return Err(ConfigError::Invalid("advance_token must not be empty".into()));
        }
        if self.story.entry_scene.as_str().is_empty() {
            return Err(ConfigError::Invalid("entry_scene must not be empty".into()));
        }
        if self.commands.all().any(|c| c.is_empty()) {
            return Err(ConfigError::Invalid("start and reset commands must not be empty".into()));
        }
        if let Some(clash) = self.commands.all().find(|c| *c == token) {
            return Err(ConfigError::Invalid(format!(
                "command '{clash}' collides with the advance token"
            )));
        }
        Ok(())
    }
}

/// Where the story starts and how "advance" is spelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorySettings {
    pub entry_scene: SceneId,
    /// Input that follows a scene's `next` edge.
    pub advance_token: String,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            entry_scene: SceneId::new("prologue_start"),
            advance_token: "__next__".to_string(),
        }
    }
}

/// Inputs that (re)initialize a session. Matched exactly, like choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSettings {
    pub start: Vec<String>,
    pub reset: Vec<String>,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            start: vec![
                "Begin the story?\n> Yes".to_string(),
                "Begin the story?".to_string(),
            ],
            reset: vec!["Start over".to_string()],
        }
    }
}

impl CommandSettings {
    /// Check if the input is a start command.
    pub fn is_start(&self, input: &str) -> bool {
        self.start.iter().any(|c| c == input)
    }

    /// Check if the input is a reset command.
    pub fn is_reset(&self, input: &str) -> bool {
        self.reset.iter().any(|c| c == input)
    }

    /// All start and reset commands.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.start.iter().chain(self.reset.iter())
    }
}

/// Scene ids of the ending scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndingScenes {
    pub bad: SceneId,
    pub true_end: SceneId,
    pub bond: SceneId,
    pub resolve: SceneId,
    pub curiosity: SceneId,
}

impl Default for EndingScenes {
    fn default() -> Self {
        Self {
            bad: SceneId::new("ending_bad"),
            true_end: SceneId::new("ending_true"),
            bond: SceneId::new("ending_bond"),
            resolve: SceneId::new("ending_resolve"),
            curiosity: SceneId::new("ending_curiosity"),
        }
    }
}

impl EndingScenes {
    /// The scene an ending leads to.
    pub fn scene_for(&self, ending: Ending) -> &SceneId {
        match ending {
            Ending::Bad => &self.bad,
            Ending::True => &self.true_end,
            Ending::Bond => &self.bond,
            Ending::Resolve => &self.resolve,
            Ending::Curiosity => &self.curiosity,
        }
    }
}

/// Fixed replies used by the transport shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    pub invalid_input: String,
    pub story_ended: String,
    /// `None` means stay silent until the user starts a story.
    pub session_absent: Option<String>,
    /// Button label for the advance token.
    pub advance_label: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            invalid_input: "Please choose one of the options shown.".to_string(),
            story_ended: "The story ends here. Thank you for playing!\n\n\
                          Send \"Start over\" to begin again."
                .to_string(),
            session_absent: None,
            advance_label: "Next".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StoryConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoryConfig::default());
        assert_eq!(config.story.entry_scene, SceneId::new("prologue_start"));
        assert_eq!(config.story.advance_token, "__next__");
        assert!(config.messages.session_absent.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = StoryConfig::from_toml_str(
            r#"
            [story]
            entry_scene = "intro"

            [commands]
            start = ["go"]

            [endings]
            true_end = "finale_true"
            "#,
        )
        .unwrap();

        assert_eq!(config.story.entry_scene, SceneId::new("intro"));
        assert_eq!(config.story.advance_token, "__next__");
        assert!(config.commands.is_start("go"));
        assert!(!config.commands.is_start("Begin the story?"));
        assert!(config.commands.is_reset("Start over"));
        assert_eq!(config.endings.scene_for(Ending::True), &SceneId::new("finale_true"));
        assert_eq!(config.endings.scene_for(Ending::Bad), &SceneId::new("ending_bad"));
    }

    #[test]
    fn test_multiline_start_command() {
        let config = StoryConfig::default();
        assert!(config.commands.is_start("Begin the story?\n> Yes"));
        assert!(config.commands.is_start("Begin the story?"));
        assert!(!config.commands.is_start("begin the story?"));
    }

    #[test]
    fn test_every_ending_has_a_scene() {
        let scenes = EndingScenes::default();
        for ending in Ending::ALL {
            assert!(scenes.scene_for(ending).as_str().starts_with("ending_"));
        }
    }

    #[test]
    fn test_empty_advance_token_is_invalid() {
        let result = StoryConfig::from_toml_str("[story]\nadvance_token = \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_command_colliding_with_advance_token_is_invalid() {
        let result = StoryConfig::from_toml_str("[commands]\nreset = [\"__next__\"]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_command_is_invalid() {
        let result = StoryConfig::from_toml_str("[commands]\nstart = [\"\"]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = StoryConfig::from_toml_str("[commands]\nreset = [\"Start over\", \"\"]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = StoryConfig::from_toml_str("[story\nentry_scene = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
