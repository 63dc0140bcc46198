//! Hidden attributes accumulated over a playthrough.

use serde::{Deserialize, Serialize};

/// The four tracked attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Memory,
    Bond,
    Resolve,
    Curiosity,
}

impl Attribute {
    /// All attributes in declaration order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Memory,
        Attribute::Bond,
        Attribute::Resolve,
        Attribute::Curiosity,
    ];

    /// Lowercase name used in content files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Memory => "memory",
            Attribute::Bond => "bond",
            Attribute::Resolve => "resolve",
            Attribute::Curiosity => "curiosity",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accumulated attribute totals for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Attributes {
    pub memory: i32,
    pub bond: i32,
    pub resolve: i32,
    pub curiosity: i32,
}

impl Attributes {
    /// All attributes at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tuple directly, mostly useful for rule tables and tests.
    pub fn from_values(memory: i32, bond: i32, resolve: i32, curiosity: i32) -> Self {
        Self {
            memory,
            bond,
            resolve,
            curiosity,
        }
    }

    /// Get the value of a single attribute.
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Memory => self.memory,
            Attribute::Bond => self.bond,
            Attribute::Resolve => self.resolve,
            Attribute::Curiosity => self.curiosity,
        }
    }

    fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Memory => &mut self.memory,
            Attribute::Bond => &mut self.bond,
            Attribute::Resolve => &mut self.resolve,
            Attribute::Curiosity => &mut self.curiosity,
        }
    }

    /// Add `amount` to one attribute and return the new value.
    pub fn add(&mut self, attribute: Attribute, amount: i32) -> i32 {
        let value = self.get_mut(attribute);
        *value = value.saturating_add(amount);
        *value
    }

    /// Highest value among all four attributes.
    pub fn max_value(&self) -> i32 {
        Attribute::ALL
            .iter()
            .map(|a| self.get(*a))
            .max()
            .unwrap_or_default()
    }

    /// True when `attribute` is strictly greater than each of the other three.
    pub fn strictly_dominates(&self, attribute: Attribute) -> bool {
        let value = self.get(attribute);
        Attribute::ALL
            .iter()
            .filter(|other| **other != attribute)
            .all(|other| value > self.get(*other))
    }
}

/// Attribute deltas attached to a scene or a choice.
///
/// Missing keys in content deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AttributeDelta {
    pub memory: i32,
    pub bond: i32,
    pub resolve: i32,
    pub curiosity: i32,
}

impl AttributeDelta {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delta for one attribute.
    pub fn with(mut self, attribute: Attribute, amount: i32) -> Self {
        match attribute {
            Attribute::Memory => self.memory = amount,
            Attribute::Bond => self.bond = amount,
            Attribute::Resolve => self.resolve = amount,
            Attribute::Curiosity => self.curiosity = amount,
        }
        self
    }

    /// Get the delta for one attribute.
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Memory => self.memory,
            Attribute::Bond => self.bond,
            Attribute::Resolve => self.resolve,
            Attribute::Curiosity => self.curiosity,
        }
    }

    /// Non-zero entries in attribute order.
    pub fn entries(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL
            .into_iter()
            .map(|a| (a, self.get(a)))
            .filter(|(_, amount)| *amount != 0)
    }

    /// Check if the delta changes nothing.
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}
