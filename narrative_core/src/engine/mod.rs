//! Narrative Engine - turns one user message into one story transition.
//!
//! Each call to [`NarrativeEngine::advance`] works as follows:
//! 1. **Commands**: A start or reset command re-initializes the session
//! 2. **Lookup**: Find the user's session and its current scene
//! 3. **Resolution**: Match the input against the scene's edges
//! 4. **Attributes**: Apply the deltas of the chosen edge
//! 5. **Endings**: At the decision point, the ending rules pick the destination
//! 6. **Commit**: Record history and move the session to the destination

mod attributes;
mod ending;
mod resolver;

pub use attributes::apply_delta;
pub use ending::EndingResolver;
pub use resolver::*;

use story_rules::{CommandSettings, Scene, SceneId, StoryConfig, StoryGraph};

use crate::session::{
    lock_session, InMemorySessionStore, Session, SessionStore, TransitionRecord, UserId,
};

/// Which command (re)initialized a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    Start,
    Reset,
}

/// Outcome of one `advance` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneResult<'a> {
    /// Show this scene. `started` is set when the input was a start or reset command.
    Scene {
        scene: &'a Scene,
        started: Option<SessionStart>,
    },

    /// Nothing on offer matched; the session is unchanged.
    InvalidInput,

    /// The destination does not exist. Only a reset gets the user going again.
    StoryEnded,

    /// The user has not started a story yet.
    SessionAbsent,
}

impl<'a> SceneResult<'a> {
    /// The scene to display, if any.
    pub fn scene(&self) -> Option<&'a Scene> {
        match self {
            SceneResult::Scene { scene, .. } => Some(*scene),
            _ => None,
        }
    }
}

/// The narrative state machine.
pub struct NarrativeEngine<S = InMemorySessionStore> {
    graph: StoryGraph,
    store: S,
    entry_scene: SceneId,
    commands: CommandSettings,
    resolver: InputResolver,
    endings: EndingResolver,
}

impl NarrativeEngine<InMemorySessionStore> {
    /// Create an engine backed by an in-memory session store.
    pub fn in_memory(graph: StoryGraph, config: &StoryConfig) -> Self {
        Self::new(graph, config, InMemorySessionStore::new())
    }
}

impl<S: SessionStore> NarrativeEngine<S> {
    /// Create an engine over a loaded graph with an injected session store.
    pub fn new(graph: StoryGraph, config: &StoryConfig, store: S) -> Self {
        let entry_scene = config.story.entry_scene.clone();
        if !graph.contains(&entry_scene) {
            tracing::warn!(entry_scene = %entry_scene, "entry scene is not in the story graph");
        }

        Self {
            graph,
            store,
            entry_scene,
            commands: config.commands.clone(),
            resolver: InputResolver::new(config.story.advance_token.clone()),
            endings: EndingResolver::new(config.endings.clone()),
        }
    }

    /// The story graph.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// The session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The input that follows a scene's `next` edge.
    pub fn advance_token(&self) -> &str {
        self.resolver.advance_token()
    }

    /// Copy of a user's session, for diagnostics.
    pub fn session_snapshot(&self, user_id: &UserId) -> Option<Session> {
        self.store
            .get(user_id)
            .map(|handle| lock_session(&handle).clone())
    }

    /// Process one message from a user.
    pub fn advance(&self, user_id: &UserId, input: &str) -> SceneResult<'_> {
        if let Some(start) = self.classify_command(input) {
            return self.start_session(user_id, start);
        }

        let Some(handle) = self.store.get(user_id) else {
            tracing::debug!(user_id = %user_id, "input before start, ignoring");
            return SceneResult::SessionAbsent;
        };
        let mut session = lock_session(&handle);

        let Some(current) = self.graph.get_scene(&session.current_scene_id) else {
            tracing::warn!(
                session_id = %session.id,
                scene = %session.current_scene_id,
                "current scene not found"
            );
            return SceneResult::StoryEnded;
        };

        let Some(transition) = self.resolver.resolve(current, input) else {
            tracing::debug!(session_id = %session.id, scene = %current.id, input, "invalid input");
            return SceneResult::InvalidInput;
        };

        apply_delta(&mut session, transition.params);

        let (destination, ending) = if current.is_ending_decision_point {
            let (ending, scene_id) = self.endings.determine_ending(&session.attributes);
            (scene_id.clone(), Some(ending))
        } else {
            (transition.destination.clone(), None)
        };

        tracing::debug!(
            session_id = %session.id,
            from = %current.id,
            to = %destination,
            "transition"
        );

        session.record(TransitionRecord {
            from: current.id.clone(),
            to: destination.clone(),
            trigger: transition.trigger(),
            ending,
        });
        session.current_scene_id = destination;

        match self.graph.get_scene(&session.current_scene_id) {
            Some(scene) => SceneResult::Scene {
                scene,
                started: None,
            },
            None => {
                tracing::warn!(
                    session_id = %session.id,
                    scene = %session.current_scene_id,
                    "destination scene not found, story ended"
                );
                SceneResult::StoryEnded
            }
        }
    }

    fn classify_command(&self, input: &str) -> Option<SessionStart> {
        if self.commands.is_start(input) {
            Some(SessionStart::Start)
        } else if self.commands.is_reset(input) {
            Some(SessionStart::Reset)
        } else {
            None
        }
    }

    fn start_session(&self, user_id: &UserId, start: SessionStart) -> SceneResult<'_> {
        let handle = self.store.reset(user_id, &self.entry_scene);
        let session_id = lock_session(&handle).id;
        tracing::info!(user_id = %user_id, session_id = %session_id, ?start, "session initialized");

        match self.graph.get_scene(&self.entry_scene) {
            Some(scene) => SceneResult::Scene {
                scene,
                started: Some(start),
            },
            None => {
                tracing::warn!(scene = %self.entry_scene, "entry scene not found");
                SceneResult::StoryEnded
            }
        }
    }
}
