//! Ending selection at the decision point.

use story_rules::{matching_rule, Attributes, Ending, EndingScenes, SceneId, FALLBACK_ENDING};

/// Maps accumulated attributes to an ending scene.
#[derive(Debug, Clone, Default)]
pub struct EndingResolver {
    scenes: EndingScenes,
}

impl EndingResolver {
    /// Create a resolver that routes to the given ending scenes.
    pub fn new(scenes: EndingScenes) -> Self {
        Self { scenes }
    }

    /// Pick the ending and its scene. Pure apart from a diagnostic log line.
    pub fn determine_ending(&self, attributes: &Attributes) -> (Ending, &SceneId) {
        let (ending, rule) = match matching_rule(attributes) {
            Some(rule) => (rule.ending, rule.name),
            None => (FALLBACK_ENDING, "fallback"),
        };

        tracing::debug!(
            memory = attributes.memory,
            bond = attributes.bond,
            resolve = attributes.resolve,
            curiosity = attributes.curiosity,
            rule,
            ending = %ending,
            "ending determined"
        );

        (ending, self.scenes.scene_for(ending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_to_configured_scene() {
        let scenes = EndingScenes {
            bond: SceneId::new("bond_finale"),
            ..EndingScenes::default()
        };
        let resolver = EndingResolver::new(scenes);

        let (ending, scene) = resolver.determine_ending(&Attributes::from_values(0, 6, 1, 0));
        assert_eq!(ending, Ending::Bond);
        assert_eq!(scene, &SceneId::new("bond_finale"));
    }

    #[test]
    fn test_documented_cases() {
        let resolver = EndingResolver::default();
        let cases = [
            ((6, 2, 5, 5), Ending::Bad, "ending_bad"),
            ((4, 4, 4, 4), Ending::True, "ending_true"),
            ((0, 6, 1, 0), Ending::Bond, "ending_bond"),
            ((3, 3, 3, 3), Ending::Bond, "ending_bond"),
            ((0, 0, 5, 1), Ending::Resolve, "ending_resolve"),
            ((0, 0, 0, 4), Ending::Curiosity, "ending_curiosity"),
        ];

        for ((m, b, r, c), expected, scene) in cases {
            let (ending, scene_id) = resolver.determine_ending(&Attributes::from_values(m, b, r, c));
            assert_eq!(ending, expected, "attributes ({m}, {b}, {r}, {c})");
            assert_eq!(scene_id.as_str(), scene);
        }
    }

    #[test]
    fn test_fallback_when_memory_leads() {
        let resolver = EndingResolver::default();
        let (ending, scene) = resolver.determine_ending(&Attributes::from_values(5, 2, 2, 2));
        assert_eq!(ending, Ending::Bond);
        assert_eq!(scene.as_str(), "ending_bond");
    }
}
