//! Settings-to-outline compilation.
//!
//! The compiler walks configuration sections reachable from a root section
//! and produces one [`Directive`] per section, accumulated into an
//! [`Outline`]. Key semantics come from a [`KeySchema`] built once from the
//! registry's declared capabilities, so classification is a table lookup
//! rather than string guessing repeated per section.
//!
//! # Key Classification
//!
//! Every section key is split on its trailing `_` suffix and classified,
//! in order:
//!
//! 1. suffix is an edge vocabulary word (a registered design's plural
//!    suffix) → the value is an edge-target list; the prefix names the
//!    source node, collapsing to the section itself when the prefix is
//!    the section name, the suffix, or the suffix's design tag
//! 2. the whole key, or the suffix, is a legal construction parameter →
//!    recorded under `initialization` for the owning node
//! 3. prefix equals the section name → recorded under `attributes` with
//!    the bare suffix
//! 4. anything else → recorded under `attributes` verbatim
//!
//! The `design` and `{name}_design` keys are consumed by design
//! resolution and never classified.
//!
//! # Examples
//!
//! ```rust
//! use braidworks::outline::OutlineCompiler;
//! use braidworks::registry::{ComponentRegistry, Design};
//! use braidworks::settings::Settings;
//! use serde_json::json;
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register(Design::new("pipeline", "pipelines"));
//! registry.register(Design::new("step", "steps"));
//!
//! let settings = Settings::from_value(json!({
//!     "general": {"default_design": "pipeline"},
//!     "pipeline": {"step_steps": ["a", "b"]},
//!     "a": {},
//!     "b": {},
//! }))
//! .unwrap();
//!
//! let outline = OutlineCompiler::new(&registry)
//!     .compile(&settings, "pipeline")
//!     .unwrap();
//! let directive = outline.get("pipeline").unwrap();
//! assert_eq!(directive.targets("pipeline").len(), 2);
//! assert_eq!(directive.designs["a"], "step");
//! assert_eq!(outline.len(), 3);
//! ```

// Internal module declarations
mod directive;
mod schema;

// Public re-exports
pub use directive::{Directive, Outline};
pub use schema::KeySchema;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::registry::ComponentRegistry;
use crate::settings::{Section, Settings};

/// Errors raised while compiling settings into an outline.
///
/// All of these are fatal configuration errors surfaced immediately; there
/// is no partial outline on failure.
#[derive(Debug, Error, Diagnostic)]
pub enum OutlineError {
    /// The requested root section does not exist in the settings.
    #[error("section {section} is not present in the settings")]
    #[diagnostic(code(braidworks::outline::missing_section))]
    MissingSection { section: String },

    /// No design tag could be resolved for a section.
    #[error("cannot resolve a design for section {section}: tried {attempted}")]
    #[diagnostic(
        code(braidworks::outline::unresolved_design),
        help("Add a `design` key to the section or set `general.default_design`.")
    )]
    UnresolvedDesign { section: String, attempted: String },

    /// A section resolved to a design tag the registry does not know.
    #[error("section {section} requests design {design}, which is not registered")]
    #[diagnostic(
        code(braidworks::outline::unknown_design),
        help("Register the design before compiling, or fix the tag in the settings.")
    )]
    UnknownDesign { section: String, design: String },

    /// An edge key held something other than a name or list of names.
    #[error("edge key {key} in section {section} must hold a name or a list of names")]
    #[diagnostic(code(braidworks::outline::invalid_edge_list))]
    InvalidEdgeList { section: String, key: String },
}

/// Compiles a [`Settings`] mapping into an [`Outline`].
///
/// Holds the key schema derived from the registry plus an optional
/// host-supplied fallback design used when neither the section nor
/// `general.default_design` provides one.
#[derive(Clone, Debug)]
pub struct OutlineCompiler {
    schema: KeySchema,
    default_design: Option<String>,
}

impl OutlineCompiler {
    /// Creates a compiler with the key schema derived from `registry`.
    #[must_use]
    pub fn new(registry: &ComponentRegistry) -> Self {
        Self {
            schema: KeySchema::from_registry(registry),
            default_design: None,
        }
    }

    /// Sets a fallback design for sections that carry none, tried after
    /// `general.default_design`.
    #[must_use]
    pub fn with_default_design(mut self, tag: impl Into<String>) -> Self {
        self.default_design = Some(tag.into());
        self
    }

    /// Compiles every section reachable from `root` into an outline.
    #[instrument(skip_all, fields(root = %root))]
    pub fn compile(&self, settings: &Settings, root: &str) -> Result<Outline, OutlineError> {
        if !settings.contains(root) {
            return Err(OutlineError::MissingSection {
                section: root.to_string(),
            });
        }
        let mut outline = Outline {
            general: settings.general(),
            files: settings.files(),
            package: settings.package(),
            ..Outline::default()
        };
        self.compile_section(settings, root, None, &mut outline)?;
        debug!(directives = outline.len(), "outline compiled");
        Ok(outline)
    }

    fn compile_section(
        &self,
        settings: &Settings,
        name: &str,
        inherited: Option<&str>,
        outline: &mut Outline,
    ) -> Result<(), OutlineError> {
        if outline.contents.contains_key(name) {
            return Ok(());
        }
        let section = settings
            .section(name)
            .ok_or_else(|| OutlineError::MissingSection {
                section: name.to_string(),
            })?;
        let design = self.resolve_design(settings, name, section, inherited)?;
        if !self.schema.knows_design(&design) {
            return Err(OutlineError::UnknownDesign {
                section: name.to_string(),
                design,
            });
        }

        // Claim the slot up front: keeps discovery order stable and stops
        // mutually referencing sections from recursing forever.
        outline
            .contents
            .insert(name.to_string(), Directive::new(name, &design));

        let directive = self.build_directive(settings, name, section, &design)?;
        let discovered: Vec<(String, String)> = directive
            .designs
            .iter()
            .filter(|(node, _)| node.as_str() != name)
            .map(|(node, tag)| (node.clone(), tag.clone()))
            .collect();
        outline.contents.insert(name.to_string(), directive);

        for (target, implied) in discovered {
            if settings.contains(&target) && !Settings::is_reserved(&target) {
                self.compile_section(settings, &target, Some(&implied), outline)?;
            }
        }
        Ok(())
    }

    fn build_directive(
        &self,
        settings: &Settings,
        name: &str,
        section: &Section,
        design: &str,
    ) -> Result<Directive, OutlineError> {
        let own_design_key = format!("{name}_design");
        let mut directive = Directive::new(name, design);

        // First pass: edge keys, which also discover this section's
        // sub-nodes.
        for (key, value) in section {
            if key == "design" || *key == own_design_key {
                continue;
            }
            let (prefix, suffix) = split_key(key);
            let Some(edge_tag) = self.schema.edge_design(suffix) else {
                continue;
            };
            let targets =
                edge_targets(value).ok_or_else(|| OutlineError::InvalidEdgeList {
                    section: name.to_string(),
                    key: key.clone(),
                })?;
            let source = if prefix.is_empty() || prefix == name || prefix == suffix || prefix == edge_tag
            {
                name.to_string()
            } else {
                prefix.to_string()
            };
            let listed = directive.edges.entry(source).or_default();
            for target in &targets {
                if !listed.contains(target) {
                    listed.push(target.clone());
                }
            }
            for target in targets {
                if !directive.designs.contains_key(&target) {
                    let resolved = settings
                        .section(&target)
                        .and_then(|candidate| explicit_design(&target, candidate))
                        .unwrap_or_else(|| edge_tag.to_string());
                    directive.designs.insert(target, resolved);
                }
            }
        }

        // Second pass: remaining keys are parameters or attributes.
        for (key, value) in section {
            if key == "design" || *key == own_design_key {
                continue;
            }
            let (prefix, suffix) = split_key(key);
            if self.schema.is_edge_suffix(suffix) {
                continue;
            }
            let owner_design = directive.designs.get(prefix).map(String::as_str);
            if self.schema.is_parameter(design, key) {
                directive
                    .initialization
                    .entry(name.to_string())
                    .or_default()
                    .insert(key.clone(), value.clone());
            } else if owner_design.is_some_and(|tag| self.schema.is_parameter(tag, suffix)) {
                directive
                    .initialization
                    .entry(prefix.to_string())
                    .or_default()
                    .insert(suffix.to_string(), value.clone());
            } else if self.schema.is_parameter(design, suffix) {
                directive
                    .initialization
                    .entry(name.to_string())
                    .or_default()
                    .insert(suffix.to_string(), value.clone());
            } else if prefix == name {
                directive.attributes.insert(suffix.to_string(), value.clone());
            } else {
                directive.attributes.insert(key.clone(), value.clone());
            }
        }

        // Third pass: optional `{node}_parameters` sections feed the
        // execution-time bundle of every discovered node.
        let mut nodes: Vec<String> = directive.designs.keys().cloned().collect();
        for source in directive.edges.keys() {
            if !nodes.contains(source) {
                nodes.push(source.clone());
            }
        }
        for node in nodes {
            let parameters_section = format!("{node}_parameters");
            if let Some(parameters) = settings.section(&parameters_section) {
                directive.implementation.insert(node, parameters.clone());
            }
        }

        Ok(directive)
    }

    /// Resolution order: the section's own `design` or `{name}_design`
    /// key, the design implied by the suffix the section was referenced
    /// under, `general.default_design`, then the compiler-level fallback.
    fn resolve_design(
        &self,
        settings: &Settings,
        name: &str,
        section: &Section,
        inherited: Option<&str>,
    ) -> Result<String, OutlineError> {
        if let Some(explicit) = explicit_design(name, section) {
            return Ok(explicit);
        }
        if let Some(tag) = inherited {
            return Ok(tag.to_string());
        }
        if let Some(tag) = settings.default_design() {
            return Ok(tag.to_string());
        }
        if let Some(tag) = &self.default_design {
            return Ok(tag.clone());
        }
        Err(OutlineError::UnresolvedDesign {
            section: name.to_string(),
            attempted: format!("`design`, `{name}_design`, `general.default_design`"),
        })
    }
}

fn explicit_design(name: &str, section: &Section) -> Option<String> {
    section
        .get("design")
        .and_then(Value::as_str)
        .or_else(|| {
            section
                .get(&format!("{name}_design"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}

fn split_key(key: &str) -> (&str, &str) {
    key.rsplit_once('_').unwrap_or(("", key))
}

fn edge_targets(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(single) => Some(vec![single.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}
