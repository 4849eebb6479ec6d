//! Two-level configuration mapping consumed by the outline compiler.
//!
//! A [`Settings`] value is `section name -> {key -> value}` where values are
//! arbitrary JSON (scalars, lists, nested mappings). How the mapping got
//! here is the host's business; ini/toml/yaml loading lives with the caller
//! and arrives through [`Settings::from_value`] once parsed.
//!
//! Reserved section names (`general`, `files`, and the package namespace
//! section) carry project-level configuration and are excluded from the
//! node-discovery walk.
//!
//! # Examples
//!
//! ```rust
//! use braidworks::settings::Settings;
//! use serde_json::json;
//!
//! let settings = Settings::from_value(json!({
//!     "general": {"default_design": "step"},
//!     "pipeline": {"step_steps": ["a", "b"]},
//!     "a": {},
//!     "b": {},
//! }))
//! .unwrap();
//!
//! assert!(settings.contains("pipeline"));
//! assert_eq!(settings.default_design(), Some("step"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Project-level section for cross-cutting options such as the default
/// design tag.
pub const GENERAL_SECTION: &str = "general";
/// Section describing input/output file locations; host concern only.
pub const FILES_SECTION: &str = "files";
/// Package namespace section reserved for library-level options.
pub const PACKAGE_SECTION: &str = "braidworks";

/// One configuration section: ordered keys to arbitrary JSON values.
pub type Section = IndexMap<String, Value>;

/// The externally supplied two-level configuration mapping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    sections: IndexMap<String, Section>,
}

impl Settings {
    /// Creates an empty settings mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds settings from any parsed JSON document.
    ///
    /// The document must be an object of objects; anything else is a
    /// deserialization error.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Builder-style section insertion, mostly for tests and hosts that
    /// construct settings programmatically.
    #[must_use]
    pub fn with_section(mut self, name: impl Into<String>, section: Section) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns true if a section with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Section names in document order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.sections.keys()
    }

    /// Returns true if `name` is one of the reserved project-level
    /// sections rather than a workflow node section.
    #[must_use]
    pub fn is_reserved(name: &str) -> bool {
        matches!(name, GENERAL_SECTION | FILES_SECTION | PACKAGE_SECTION)
    }

    /// The `general` section, empty if absent.
    #[must_use]
    pub fn general(&self) -> Section {
        self.reserved(GENERAL_SECTION)
    }

    /// The `files` section, empty if absent.
    #[must_use]
    pub fn files(&self) -> Section {
        self.reserved(FILES_SECTION)
    }

    /// The package namespace section, empty if absent.
    #[must_use]
    pub fn package(&self) -> Section {
        self.reserved(PACKAGE_SECTION)
    }

    /// The project-wide default design tag, if configured under
    /// `general.default_design`.
    #[must_use]
    pub fn default_design(&self) -> Option<&str> {
        self.sections
            .get(GENERAL_SECTION)
            .and_then(|general| general.get("default_design"))
            .and_then(Value::as_str)
    }

    fn reserved(&self, name: &str) -> Section {
        self.sections.get(name).cloned().unwrap_or_default()
    }
}
