//! Execution context for the braidworks workflow system.
//!
//! A [`Context`] is the unit of data that flows through a chain of components
//! during path execution. Each component receives the context accumulated so
//! far, may read and write entries, and hands the (possibly modified) context
//! to the next component in the chain.
//!
//! # Isolation
//!
//! Contexts are cheap to clone and every execution path receives its own
//! clone of the seed context. Two paths never observe each other's writes,
//! which is what makes parallel path execution safe without locking.
//!
//! # Examples
//!
//! ```rust
//! use braidworks::context::Context;
//! use serde_json::json;
//!
//! let ctx = Context::new()
//!     .with_entry("input", json!([1, 2, 3]))
//!     .with_entry("scale", json!(2.5));
//!
//! assert_eq!(ctx.get("scale"), Some(&json!(2.5)));
//! assert_eq!(ctx.len(), 2);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mutable key-value store threaded through component chains.
///
/// Keys are free-form strings and values are arbitrary JSON, so components
/// with no compile-time knowledge of each other can still exchange data.
/// Later writes to the same key overwrite earlier ones, which is the
/// mechanism by which a downstream component consumes and replaces an
/// upstream result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Accumulated entries, keyed by free-form name.
    pub contents: FxHashMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context seeded from an existing map.
    #[must_use]
    pub fn from_map(contents: FxHashMap<String, Value>) -> Self {
        Self { contents }
    }

    /// Builder-style insertion, for seeding a context before a run.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.contents.insert(key.into(), value);
        self
    }

    /// Inserts or overwrites an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.contents.insert(key.into(), value)
    }

    /// Looks up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.contents.get(key)
    }

    /// Removes an entry, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.contents.remove(key)
    }

    /// Returns true if the context holds an entry under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.contents.contains_key(key)
    }

    /// Merges another context into this one.
    ///
    /// Entries from `other` win on key collision, matching the rule that
    /// later stages of a chain overwrite earlier ones.
    pub fn merge(&mut self, other: Context) {
        self.contents.extend(other.contents);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true if the context holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_seeds_entries() {
        let ctx = Context::new()
            .with_entry("a", json!(1))
            .with_entry("b", json!("two"));
        assert_eq!(ctx.get("a"), Some(&json!(1)));
        assert_eq!(ctx.get("b"), Some(&json!("two")));
        assert!(!ctx.is_empty());
    }

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let mut ctx = Context::new();
        assert_eq!(ctx.insert("k", json!(1)), None);
        assert_eq!(ctx.insert("k", json!(2)), Some(json!(1)));
        assert_eq!(ctx.get("k"), Some(&json!(2)));
    }

    #[test]
    fn merge_prefers_incoming_entries() {
        let mut base = Context::new()
            .with_entry("shared", json!("old"))
            .with_entry("kept", json!(true));
        let incoming = Context::new().with_entry("shared", json!("new"));
        base.merge(incoming);
        assert_eq!(base.get("shared"), Some(&json!("new")));
        assert_eq!(base.get("kept"), Some(&json!(true)));
    }

    #[test]
    fn clones_are_independent() {
        let mut original = Context::new().with_entry("k", json!(1));
        let copy = original.clone();
        original.insert("k", json!(2));
        assert_eq!(copy.get("k"), Some(&json!(1)));
    }
}
