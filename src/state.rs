//! # World state for goal-oriented action planning
//!
//! This module provides the [`WorldState`] structure, the common currency of
//! the whole planning system: a snapshot of named facts describing an agent
//! and its environment at a point in time.
//!
//! The same structure fills several roles:
//!
//! - **World state**: the facts currently believed true ("player_visible",
//!   "in_cover", "ammo", ...)
//! - **Goal**: the partial set of facts the agent wants to make true
//! - **Preconditions**: the partial set of facts an action requires
//! - **Effects**: the facts an action overwrites on success
//!
//! Facts are typed: a value is a boolean, an integer, a float, or a string
//! (see [`FactValue`]). Comparing values of different types is simply
//! unequal — a goal asking for `health_low = true` against a state holding
//! `health_low = 37` degrades to "not satisfied" rather than panicking.
//!
//! ## Basic usage
//!
//! ```
//! use tactician::WorldState;
//!
//! let mut state = WorldState::new();
//! state.set("player_visible", true);
//! state.set("ammo", 12);
//! state.set("stance", "crouched");
//!
//! let mut goal = WorldState::new();
//! goal.set("player_visible", true);
//!
//! assert!(state.satisfies(&goal));
//! assert_eq!(state.get("ammo"), Some(&12.into()));
//! ```

use std::collections::HashMap;
use std::fmt;

/// A single fact value: boolean, integer, float, or string.
///
/// Values of different variants never compare equal, so a state and a goal
/// that disagree about a fact's *type* behave exactly like a state and a
/// goal that disagree about its value.
#[derive(Debug, Clone, PartialEq)]
pub enum FactValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Text(String),
}

impl From<bool> for FactValue {
    fn from(v: bool) -> Self {
        FactValue::Bool(v)
    }
}

impl From<i64> for FactValue {
    fn from(v: i64) -> Self {
        FactValue::Int(v)
    }
}

impl From<i32> for FactValue {
    fn from(v: i32) -> Self {
        FactValue::Int(v as i64)
    }
}

impl From<f32> for FactValue {
    fn from(v: f32) -> Self {
        FactValue::Float(v)
    }
}

impl From<&str> for FactValue {
    fn from(v: &str) -> Self {
        FactValue::Text(v.to_string())
    }
}

impl From<String> for FactValue {
    fn from(v: String) -> Self {
        FactValue::Text(v)
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bool(v) => write!(f, "{}", v),
            FactValue::Int(v) => write!(f, "{}", v),
            FactValue::Float(v) => write!(f, "{}", v),
            FactValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A snapshot of named facts, used for world states, goals, preconditions
/// and effects alike.
///
/// Keys are unique; insertion order is irrelevant. Two states are equal iff
/// they contain the same key-value pairs, regardless of order.
///
/// # Examples
///
/// ```
/// use tactician::WorldState;
///
/// let mut state = WorldState::new();
/// state.set("has_cover", false);
/// state.set("health", 62.5f32);
///
/// assert_eq!(state.get("has_cover"), Some(&false.into()));
/// assert_eq!(state.get("unknown_fact"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldState {
    facts: HashMap<String, FactValue>,
}

impl WorldState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            facts: HashMap::new(),
        }
    }

    /// Sets a fact, inserting or overwriting.
    ///
    /// Any type convertible into a [`FactValue`] is accepted directly:
    ///
    /// ```
    /// use tactician::WorldState;
    ///
    /// let mut state = WorldState::new();
    /// state.set("under_fire", true);
    /// state.set("ammo", 30);
    /// state.set("threat_level", 0.8f32);
    /// state.set("squad", "alpha");
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FactValue>) {
        self.facts.insert(key.into(), value.into());
    }

    /// Gets the value for a fact, or `None` if it is unknown.
    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.facts.get(key)
    }

    /// Checks if this state satisfies another (partial) state.
    ///
    /// Every key in `other` must be present here with an equal value; keys
    /// absent from `other` are unconstrained. An empty `other` is satisfied
    /// by any state.
    ///
    /// This single check covers both goal satisfaction and precondition
    /// validity.
    ///
    /// # Examples
    ///
    /// ```
    /// use tactician::WorldState;
    ///
    /// let mut state = WorldState::new();
    /// state.set("has_cover", true);
    /// state.set("in_cover", false);
    ///
    /// let mut needed = WorldState::new();
    /// needed.set("has_cover", true);
    /// assert!(state.satisfies(&needed));
    ///
    /// needed.set("in_cover", true);
    /// assert!(!state.satisfies(&needed));
    ///
    /// // The empty requirement is vacuously satisfied.
    /// assert!(state.satisfies(&WorldState::new()));
    /// ```
    pub fn satisfies(&self, other: &WorldState) -> bool {
        other
            .facts
            .iter()
            .all(|(key, value)| self.facts.get(key) == Some(value))
    }

    /// Applies the facts of `effects` to this state, overwriting existing
    /// values and inserting new ones. Facts not named in `effects` keep
    /// their current value.
    pub fn apply_effects(&mut self, effects: &WorldState) {
        for (key, value) in effects.facts.iter() {
            self.facts.insert(key.clone(), value.clone());
        }
    }

    /// Builds a canonical deduplication key for this state.
    ///
    /// Fact pairs are sorted by key name and serialized with length-prefixed
    /// fields and a per-variant type tag, so no two distinct states share an
    /// encoding (bare concatenation would let adjacent fields run together).
    /// The empty state canonicalizes to the empty string.
    ///
    /// ```
    /// use tactician::WorldState;
    ///
    /// let mut a = WorldState::new();
    /// a.set("x", 1);
    /// a.set("y", 2);
    ///
    /// let mut b = WorldState::new();
    /// b.set("y", 2);
    /// b.set("x", 1);
    ///
    /// assert_eq!(a.canonical_key(), b.canonical_key());
    /// ```
    pub fn canonical_key(&self) -> String {
        let mut pairs: Vec<_> = self.facts.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut key = String::new();
        for (name, value) in pairs {
            key.push_str(&name.len().to_string());
            key.push(':');
            key.push_str(name);
            match value {
                FactValue::Bool(b) => {
                    key.push('b');
                    key.push(if *b { '1' } else { '0' });
                }
                FactValue::Int(i) => {
                    key.push('i');
                    key.push_str(&i.to_string());
                }
                // Bit pattern keeps distinct floats distinct.
                FactValue::Float(f) => {
                    key.push('f');
                    key.push_str(&format!("{:08x}", f.to_bits()));
                }
                FactValue::Text(s) => {
                    key.push('s');
                    key.push_str(&s.len().to_string());
                    key.push(':');
                    key.push_str(s);
                }
            }
            key.push(';');
        }
        key
    }

    /// Read-only access to the underlying fact map.
    pub fn facts(&self) -> &HashMap<String, FactValue> {
        &self.facts
    }

    /// Number of facts in the state.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the state holds no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.facts.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        let rendered: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = WorldState::new();
        assert!(state.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut state = WorldState::new();
        state.set("foo", true);
        assert_eq!(state.get("foo"), Some(&FactValue::Bool(true)));
        state.set("foo", false);
        assert_eq!(state.get("foo"), Some(&FactValue::Bool(false)));
        assert_eq!(state.get("bar"), None);
    }

    #[test]
    fn test_satisfies() {
        let mut state = WorldState::new();
        state.set("a", true);
        state.set("b", false);

        let mut required = WorldState::new();
        required.set("a", true);
        assert!(state.satisfies(&required));
        required.set("b", false);
        assert!(state.satisfies(&required));
        required.set("b", true);
        assert!(!state.satisfies(&required));
        required.set("c", true);
        assert!(!state.satisfies(&required));
    }

    #[test]
    fn test_satisfies_empty_is_vacuous() {
        assert!(WorldState::new().satisfies(&WorldState::new()));

        let mut state = WorldState::new();
        state.set("anything", 7);
        assert!(state.satisfies(&WorldState::new()));
    }

    #[test]
    fn test_mismatched_types_are_unequal() {
        let mut state = WorldState::new();
        state.set("health_low", 1);

        let mut goal = WorldState::new();
        goal.set("health_low", true);

        assert!(!state.satisfies(&goal));
    }

    #[test]
    fn test_apply_effects() {
        let mut state = WorldState::new();
        state.set("x", false);
        state.set("y", false);

        let mut effects = WorldState::new();
        effects.set("x", true);
        effects.set("z", true);

        state.apply_effects(&effects);
        assert_eq!(state.get("x"), Some(&FactValue::Bool(true)));
        assert_eq!(state.get("y"), Some(&FactValue::Bool(false)));
        assert_eq!(state.get("z"), Some(&FactValue::Bool(true)));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = WorldState::new();
        a.set("first", 1);
        a.set("second", 2);

        let mut b = WorldState::new();
        b.set("second", 2);
        b.set("first", 1);

        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_key_order_independent() {
        let mut a = WorldState::new();
        a.set("a", 1);
        a.set("b", 2);

        let mut b = WorldState::new();
        b.set("b", 2);
        b.set("a", 1);

        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_canonical_key_discriminates() {
        let mut a = WorldState::new();
        a.set("a", 1);

        let mut b = WorldState::new();
        b.set("a", 2);
        assert_ne!(a.canonical_key(), b.canonical_key());

        let mut c = WorldState::new();
        c.set("c", 1);
        assert_ne!(a.canonical_key(), c.canonical_key());

        // Same rendered digits, different types.
        let mut d = WorldState::new();
        d.set("a", "1");
        assert_ne!(a.canonical_key(), d.canonical_key());
    }

    #[test]
    fn test_canonical_key_no_adjacent_field_collision() {
        // "ab"="c" vs "a"="bc" must not concatenate indistinguishably.
        let mut a = WorldState::new();
        a.set("ab", "c");

        let mut b = WorldState::new();
        b.set("a", "bc");

        assert_ne!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_empty_states_share_empty_key() {
        assert_eq!(WorldState::new().canonical_key(), "");
        assert_eq!(
            WorldState::new().canonical_key(),
            WorldState::default().canonical_key()
        );
    }

    #[test]
    fn test_display_is_sorted() {
        let mut state = WorldState::new();
        state.set("b", 2);
        state.set("a", true);
        assert_eq!(format!("{}", state), "{a=true, b=2}");
    }
}
