//! Story Graph - the immutable lookup table of scenes.
//!
//! The graph is built once at startup and only read afterwards, so it can be
//! shared between threads without synchronization.

use std::collections::HashMap;
use std::path::Path;

use crate::config::EndingScenes;
use crate::endings::Ending;
use crate::error::{ContentError, ContentResult};
use crate::scene::{Scene, SceneId};

/// All scenes of a story, keyed by id.
///
/// Only constructible through the checked loaders below.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    scenes: HashMap<SceneId, Scene>,
}

impl StoryGraph {
    /// Build a graph from already constructed scenes.
    ///
    /// Later scenes replace earlier ones with the same id.
    pub fn from_scenes(scenes: impl IntoIterator<Item = Scene>) -> ContentResult<Self> {
        let scenes: HashMap<_, _> = scenes
            .into_iter()
            .map(|scene| (scene.id.clone(), scene))
            .collect();

        if scenes.is_empty() {
            return Err(ContentError::Empty);
        }

        Ok(Self { scenes })
    }

    /// Parse a JSON object mapping scene ids to scenes.
    ///
    /// A scene without an `id` takes its map key; a scene whose `id`
    /// disagrees with its key is rejected.
    pub fn from_json_str(json: &str) -> ContentResult<Self> {
        let raw: HashMap<String, Scene> = serde_json::from_str(json)?;

        let mut scenes = HashMap::with_capacity(raw.len());
        for (key, mut scene) in raw {
            if !scene.has_explicit_id() {
                scene.id = SceneId::new(key.clone());
            } else if scene.id.as_str() != key {
                return Err(ContentError::IdMismatch {
                    key,
                    id: scene.id.0,
                });
            }
            scenes.insert(scene.id.clone(), scene);
        }

        if scenes.is_empty() {
            return Err(ContentError::Empty);
        }

        tracing::info!(scenes = scenes.len(), "story graph loaded");
        Ok(Self { scenes })
    }

    /// Read and parse a JSON story file.
    pub fn load(path: impl AsRef<Path>) -> ContentResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Get a scene by id.
    pub fn get_scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Check if a scene exists.
    pub fn contains(&self, id: &SceneId) -> bool {
        self.scenes.contains_key(id)
    }

    /// Get the total number of scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Destinations referenced by some edge but missing from the graph.
    ///
    /// Reaching one of these during play ends the story; this is only reported,
    /// never rejected. The `next` of an ending decision point is never followed
    /// and is skipped; see [`StoryGraph::missing_endings`] for what replaces it.
    pub fn dangling_targets(&self) -> Vec<&SceneId> {
        let mut missing: Vec<_> = self
            .scenes
            .values()
            .flat_map(|scene| {
                let next = scene
                    .next
                    .as_ref()
                    .filter(|_| !scene.is_ending_decision_point);
                scene.choices.iter().map(|c| &c.next).chain(next)
            })
            .filter(|id| !self.scenes.contains_key(*id))
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// Configured ending scenes that are not in the graph.
    pub fn missing_endings<'a>(&self, endings: &'a EndingScenes) -> Vec<(Ending, &'a SceneId)> {
        Ending::ALL
            .into_iter()
            .map(|ending| (ending, endings.scene_for(ending)))
            .filter(|(_, id)| !self.scenes.contains_key(*id))
            .collect()
    }
}
