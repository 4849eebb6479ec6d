//! Explicit component registry: designs, factories, and built instances.
//!
//! The registry is a process-scoped object the host application constructs
//! at startup and populates with explicit [`ComponentRegistry::register`]
//! calls. Configuration strings are validated against it at compile time;
//! nothing is resolved lazily and nothing registers itself as a side
//! effect of being defined.
//!
//! Two catalogs live here:
//!
//! - **Designs**: a tag (such as `step`) mapped to its plural edge suffix,
//!   declared parameter names, parameter defaults, and a factory closure
//! - **Instances**: already-built components registered under a name;
//!   these take priority over designs when resolving that name, so a
//!   project-specific singleton can override a stock implementation
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use braidworks::component::{Component, ComponentError};
//! use braidworks::context::Context;
//! use braidworks::registry::{ComponentRegistry, Design};
//!
//! struct Step(String);
//!
//! #[async_trait]
//! impl Component for Step {
//!     fn name(&self) -> &str {
//!         &self.0
//!     }
//!     async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
//!         Ok(ctx)
//!     }
//! }
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register(Design::new("step", "steps").with_factory(Arc::new(|spec| {
//!     Ok(Arc::new(Step(spec.name)) as Arc<dyn Component>)
//! })));
//!
//! assert!(registry.select(&["step"]).is_ok());
//! assert_eq!(registry.design_for_suffix("steps").map(|d| d.tag.as_str()), Some("step"));
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;

use crate::component::Component;

/// Parameter slots reserved on every design; never legal as configured
/// construction parameters.
pub const RESERVED_PARAMETERS: [&str; 2] = ["name", "payload"];

/// Factory closure turning a merged [`ComponentSpec`] into a live component.
pub type ComponentFactory =
    Arc<dyn Fn(ComponentSpec) -> Result<Arc<dyn Component>, RegistryError> + Send + Sync>;

/// Errors raised by registry lookups and construction.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    /// None of the requested names matched an instance or a design.
    #[error("no design or instance registered for any of: {requested}")]
    #[diagnostic(
        code(braidworks::registry::unknown_design),
        help("Register the design with ComponentRegistry::register before compiling.")
    )]
    UnknownDesign { requested: String },

    /// A factory failed to build its component.
    #[error("construction of {design} component {name} failed: {message}")]
    #[diagnostic(code(braidworks::registry::construction))]
    Construction {
        design: String,
        name: String,
        message: String,
    },
}

/// Everything a factory needs to build one component instance.
///
/// Parameters arrive fully merged (see [`Design::spec`]); `runtime` is the
/// execution-time parameter bundle riding alongside, untouched by the
/// merge.
#[derive(Clone, Debug)]
pub struct ComponentSpec {
    /// Node name the instance will carry.
    pub name: String,
    /// Design tag the instance is built as.
    pub design: String,
    /// Merged construction parameters.
    pub parameters: IndexMap<String, Value>,
    /// Execution-time parameter bundle.
    pub runtime: IndexMap<String, Value>,
    /// Free-form attributes stamped onto the instance.
    pub attributes: IndexMap<String, Value>,
}

/// A registered component design: the constructible type behind a tag.
#[derive(Clone)]
pub struct Design {
    /// Tag configuration sections use to request this design.
    pub tag: String,
    /// Plural suffix recognized as this design's edge vocabulary word.
    pub suffix: String,
    /// Declared construction parameter names.
    pub parameters: Vec<String>,
    /// Default values for declared parameters.
    pub defaults: IndexMap<String, Value>,
    factory: ComponentFactory,
}

impl Design {
    /// Creates a design with no parameters and a factory that refuses to
    /// build; supply one with [`Design::with_factory`].
    #[must_use]
    pub fn new(tag: impl Into<String>, suffix: impl Into<String>) -> Self {
        let tag = tag.into();
        let placeholder = tag.clone();
        Self {
            tag,
            suffix: suffix.into(),
            parameters: Vec::new(),
            defaults: IndexMap::new(),
            factory: Arc::new(move |spec| {
                Err(RegistryError::Construction {
                    design: placeholder.clone(),
                    name: spec.name,
                    message: "design has no factory".into(),
                })
            }),
        }
    }

    /// Declares the legal construction parameter names.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Declares default values for construction parameters.
    #[must_use]
    pub fn with_defaults(mut self, defaults: IndexMap<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets the factory closure.
    #[must_use]
    pub fn with_factory(mut self, factory: ComponentFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Declared parameters minus the universally reserved slots.
    pub fn legal_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .map(String::as_str)
            .filter(|name| !RESERVED_PARAMETERS.contains(name))
    }

    /// Merges construction parameters and packages a build spec.
    ///
    /// Increasing priority: declared defaults, directive initialization,
    /// caller-supplied overrides. The directive's implementation mapping is
    /// not merged; it rides separately as the runtime bundle.
    #[must_use]
    pub fn spec(
        &self,
        name: impl Into<String>,
        initialization: &IndexMap<String, Value>,
        runtime: &IndexMap<String, Value>,
        attributes: &IndexMap<String, Value>,
        overrides: &IndexMap<String, Value>,
    ) -> ComponentSpec {
        let mut parameters = self.defaults.clone();
        for (key, value) in initialization {
            parameters.insert(key.clone(), value.clone());
        }
        for (key, value) in overrides {
            parameters.insert(key.clone(), value.clone());
        }
        ComponentSpec {
            name: name.into(),
            design: self.tag.clone(),
            parameters,
            runtime: runtime.clone(),
            attributes: attributes.clone(),
        }
    }

    fn build(&self, spec: ComponentSpec) -> Result<Arc<dyn Component>, RegistryError> {
        (self.factory)(spec)
    }
}

impl std::fmt::Debug for Design {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Design")
            .field("tag", &self.tag)
            .field("suffix", &self.suffix)
            .field("parameters", &self.parameters)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Process-scoped catalog of designs and built instances.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    designs: IndexMap<String, Design>,
    instances: FxHashMap<String, Arc<dyn Component>>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("designs", &self.designs.keys().collect::<Vec<_>>())
            .field("instances", &self.instances.len())
            .finish()
    }
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a design under its tag, replacing any previous one.
    pub fn register(&mut self, design: Design) {
        self.designs.insert(design.tag.clone(), design);
    }

    /// Registers an already-built instance under a name.
    ///
    /// Instances win over designs when a name resolves to both.
    pub fn register_instance(&mut self, name: impl Into<String>, component: Arc<dyn Component>) {
        self.instances.insert(name.into(), component);
    }

    /// First design matching any of the given names, in name order.
    pub fn select(&self, names: &[&str]) -> Result<&Design, RegistryError> {
        names
            .iter()
            .find_map(|name| self.designs.get(*name))
            .ok_or_else(|| RegistryError::UnknownDesign {
                requested: names.join(", "),
            })
    }

    /// Resolves a live component: an already-built instance if any of the
    /// names has one, otherwise the first matching design constructs one
    /// from `spec`.
    pub fn instance(
        &self,
        names: &[&str],
        spec: ComponentSpec,
    ) -> Result<Arc<dyn Component>, RegistryError> {
        if let Some(existing) = names.iter().find_map(|name| self.instances.get(*name)) {
            return Ok(Arc::clone(existing));
        }
        self.select(names)?.build(spec)
    }

    /// Already-built instance registered under `name`, if any.
    #[must_use]
    pub fn built(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.instances.get(name).map(Arc::clone)
    }

    /// Design registered under `tag`, if any.
    #[must_use]
    pub fn design(&self, tag: &str) -> Option<&Design> {
        self.designs.get(tag)
    }

    /// Design whose plural suffix is `suffix`, if any.
    #[must_use]
    pub fn design_for_suffix(&self, suffix: &str) -> Option<&Design> {
        self.designs.values().find(|design| design.suffix == suffix)
    }

    /// All registered designs, in registration order.
    pub fn designs(&self) -> impl Iterator<Item = &Design> {
        self.designs.values()
    }

    /// The recognized edge vocabulary: every design's plural suffix.
    pub fn edge_suffixes(&self) -> impl Iterator<Item = &str> {
        self.designs.values().map(|design| design.suffix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use async_trait::async_trait;

    struct Named(String);

    #[async_trait]
    impl Component for Named {
        fn name(&self) -> &str {
            &self.0
        }

        async fn execute(
            &self,
            ctx: Context,
        ) -> Result<Context, crate::component::ComponentError> {
            Ok(ctx)
        }
    }

    fn step_design() -> Design {
        Design::new("step", "steps")
            .with_parameters(["alpha", "name"])
            .with_defaults(IndexMap::from([(
                "alpha".to_string(),
                serde_json::json!(1),
            )]))
            .with_factory(Arc::new(|spec| {
                Ok(Arc::new(Named(spec.name)) as Arc<dyn Component>)
            }))
    }

    #[test]
    fn select_takes_the_first_matching_name() {
        let mut registry = ComponentRegistry::new();
        registry.register(step_design());
        let design = registry.select(&["missing", "step"]).unwrap();
        assert_eq!(design.tag, "step");
        assert!(matches!(
            registry.select(&["nope"]),
            Err(RegistryError::UnknownDesign { .. })
        ));
    }

    #[test]
    fn instances_take_priority_over_designs() {
        let mut registry = ComponentRegistry::new();
        registry.register(step_design());
        registry.register_instance("step", Arc::new(Named("singleton".into())));

        let design = registry.design("step").unwrap().clone();
        let spec = design.spec(
            "fresh",
            &IndexMap::new(),
            &IndexMap::new(),
            &IndexMap::new(),
            &IndexMap::new(),
        );
        let component = registry.instance(&["step"], spec).unwrap();
        assert_eq!(component.name(), "singleton");
    }

    #[test]
    fn spec_merges_parameters_in_increasing_priority() {
        let design = step_design();
        let initialization = IndexMap::from([
            ("alpha".to_string(), serde_json::json!(2)),
            ("beta".to_string(), serde_json::json!("init")),
        ]);
        let overrides = IndexMap::from([("beta".to_string(), serde_json::json!("override"))]);
        let spec = design.spec(
            "node",
            &initialization,
            &IndexMap::new(),
            &IndexMap::new(),
            &overrides,
        );
        assert_eq!(spec.parameters["alpha"], serde_json::json!(2));
        assert_eq!(spec.parameters["beta"], serde_json::json!("override"));
    }

    #[test]
    fn legal_parameters_exclude_reserved_slots() {
        let design = step_design();
        let legal: Vec<&str> = design.legal_parameters().collect();
        assert_eq!(legal, vec!["alpha"]);
    }

    #[test]
    fn suffix_vocabulary_derives_from_designs() {
        let mut registry = ComponentRegistry::new();
        registry.register(step_design());
        registry.register(Design::new("technique", "techniques"));
        let suffixes: Vec<&str> = registry.edge_suffixes().collect();
        assert_eq!(suffixes, vec!["steps", "techniques"]);
        assert!(registry.design_for_suffix("techniques").is_some());
        assert!(registry.design_for_suffix("nope").is_none());
    }
}
