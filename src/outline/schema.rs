//! Key-classification schema derived from the registry.
//!
//! Configuration keys are classified against this table instead of
//! re-deriving semantics from key-string shape on every section: the
//! schema is built once from the registry's declared capabilities and then
//! consulted as a plain lookup during compilation.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::registry::ComponentRegistry;

/// Lookup table for configuration-key classification.
#[derive(Clone, Debug, Default)]
pub struct KeySchema {
    /// Plural edge suffix to the design tag it implies for targets.
    edges: IndexMap<String, String>,
    /// Design tag to its legal construction parameter names.
    parameters: FxHashMap<String, FxHashSet<String>>,
}

impl KeySchema {
    /// Builds the schema from every registered design.
    #[must_use]
    pub fn from_registry(registry: &ComponentRegistry) -> Self {
        let mut edges = IndexMap::new();
        let mut parameters: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for design in registry.designs() {
            edges.insert(design.suffix.clone(), design.tag.clone());
            parameters.insert(
                design.tag.clone(),
                design.legal_parameters().map(str::to_string).collect(),
            );
        }
        Self { edges, parameters }
    }

    /// Design tag implied by an edge vocabulary suffix, if it is one.
    #[must_use]
    pub fn edge_design(&self, suffix: &str) -> Option<&str> {
        self.edges.get(suffix).map(String::as_str)
    }

    /// Returns true if `suffix` is a recognized edge vocabulary word.
    #[must_use]
    pub fn is_edge_suffix(&self, suffix: &str) -> bool {
        self.edges.contains_key(suffix)
    }

    /// Returns true if `key` is a legal construction parameter of `design`.
    #[must_use]
    pub fn is_parameter(&self, design: &str, key: &str) -> bool {
        self.parameters
            .get(design)
            .is_some_and(|legal| legal.contains(key))
    }

    /// Returns true if `tag` names a registered design.
    #[must_use]
    pub fn knows_design(&self, tag: &str) -> bool {
        self.parameters.contains_key(tag)
    }
}
