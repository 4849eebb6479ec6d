//! Compiled per-section metadata and the project-wide collection of it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Compiled metadata for one configuration section.
///
/// A directive is a value object: built once by the outline compiler and
/// only ever read afterwards. The assembler consumes it without mutation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    /// Section name; also the name of the node the section describes.
    pub name: String,
    /// Source node to ordered edge-target lists.
    pub edges: IndexMap<String, Vec<String>>,
    /// Node name to resolved design tag, the section itself included.
    pub designs: IndexMap<String, String>,
    /// Node name to construction-time parameters.
    pub initialization: IndexMap<String, IndexMap<String, Value>>,
    /// Node name to execution-time parameter bundle.
    pub implementation: IndexMap<String, IndexMap<String, Value>>,
    /// Free-form attributes to stamp onto the built instance.
    pub attributes: IndexMap<String, Value>,
}

impl Directive {
    /// Creates a directive for `name` built as `design`.
    #[must_use]
    pub fn new(name: impl Into<String>, design: impl Into<String>) -> Self {
        let name = name.into();
        let mut designs = IndexMap::new();
        designs.insert(name.clone(), design.into());
        Self {
            name,
            designs,
            ..Self::default()
        }
    }

    /// Resolved design tag for this directive's own section.
    #[must_use]
    pub fn design(&self) -> Option<&str> {
        self.designs.get(&self.name).map(String::as_str)
    }

    /// Ordered edge targets of `source`, empty if it has none.
    #[must_use]
    pub fn targets(&self, source: &str) -> &[String] {
        self.edges.get(source).map_or(&[], Vec::as_slice)
    }

    /// Construction parameters recorded for `node`, empty if none.
    #[must_use]
    pub fn initialization_for(&self, node: &str) -> IndexMap<String, Value> {
        self.initialization.get(node).cloned().unwrap_or_default()
    }

    /// Execution-time parameters recorded for `node`, empty if none.
    #[must_use]
    pub fn implementation_for(&self, node: &str) -> IndexMap<String, Value> {
        self.implementation.get(node).cloned().unwrap_or_default()
    }
}

/// The full set of directives for one project, keyed by section name.
///
/// Built transitively from a root section; reserved project-level sections
/// ride alongside rather than becoming directives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Directives in discovery order, root section first.
    pub contents: IndexMap<String, Directive>,
    /// The `general` section of the source settings.
    pub general: IndexMap<String, Value>,
    /// The `files` section of the source settings.
    pub files: IndexMap<String, Value>,
    /// The package namespace section of the source settings.
    pub package: IndexMap<String, Value>,
}

impl Outline {
    /// Looks up a directive by section name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Directive> {
        self.contents.get(name)
    }

    /// Directives in discovery order.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.contents.values()
    }

    /// Number of compiled directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true if no directives were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
