//! Ending rules: which terminal ending a set of attributes earns.
//!
//! The rules form an ordered table evaluated first-match-wins. `memory` only
//! gates the bad and true endings; it has no ending of its own, so a session
//! where memory is the sole maximum falls through to the bond ending.

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Attributes};

/// The terminal endings a story can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Bad,
    /// The complete ending.
    True,
    Bond,
    Resolve,
    Curiosity,
}

impl Ending {
    /// Every ending, in rule order.
    pub const ALL: [Ending; 5] = [
        Ending::Bad,
        Ending::True,
        Ending::Bond,
        Ending::Resolve,
        Ending::Curiosity,
    ];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Ending::Bad => "bad",
            Ending::True => "true",
            Ending::Bond => "bond",
            Ending::Resolve => "resolve",
            Ending::Curiosity => "curiosity",
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One row of the ending table.
#[derive(Debug, Clone, Copy)]
pub struct EndingRule {
    /// Name used in diagnostics.
    pub name: &'static str,
    pub ending: Ending,
    pub predicate: fn(&Attributes) -> bool,
}

impl EndingRule {
    /// Check whether this rule fires for the given attributes.
    pub fn matches(&self, attrs: &Attributes) -> bool {
        (self.predicate)(attrs)
    }
}

/// Used when no rule in [`ENDING_RULES`] fires.
pub const FALLBACK_ENDING: Ending = Ending::Bond;

/// The ending table, in evaluation order.
pub const ENDING_RULES: &[EndingRule] = &[
    EndingRule {
        name: "bad",
        ending: Ending::Bad,
        predicate: |a| a.memory >= 6 && (a.bond <= 2 || a.resolve <= 2),
    },
    EndingRule {
        name: "true",
        ending: Ending::True,
        predicate: |a| a.memory >= 4 && a.bond >= 4 && a.resolve >= 4 && a.curiosity >= 4,
    },
    EndingRule {
        name: "bond_dominant",
        ending: Ending::Bond,
        predicate: |a| a.bond >= 5 && a.strictly_dominates(Attribute::Bond),
    },
    EndingRule {
        name: "resolve_dominant",
        ending: Ending::Resolve,
        predicate: |a| a.resolve >= 5 && a.strictly_dominates(Attribute::Resolve),
    },
    EndingRule {
        name: "curiosity_dominant",
        ending: Ending::Curiosity,
        predicate: |a| a.curiosity >= 4 && a.strictly_dominates(Attribute::Curiosity),
    },
    // Highest value wins; ties go to bond, then resolve, then curiosity.
    EndingRule {
        name: "bond_max",
        ending: Ending::Bond,
        predicate: |a| a.bond == a.max_value(),
    },
    EndingRule {
        name: "resolve_max",
        ending: Ending::Resolve,
        predicate: |a| a.resolve == a.max_value(),
    },
    EndingRule {
        name: "curiosity_max",
        ending: Ending::Curiosity,
        predicate: |a| a.curiosity == a.max_value(),
    },
];

/// Find the first rule that fires, if any.
pub fn matching_rule(attrs: &Attributes) -> Option<&'static EndingRule> {
    ENDING_RULES.iter().find(|rule| rule.matches(attrs))
}

/// Pick the ending for a set of attributes.
pub fn determine_ending(attrs: &Attributes) -> Ending {
    matching_rule(attrs)
        .map(|rule| rule.ending)
        .unwrap_or(FALLBACK_ENDING)
}
