//! Outline-to-graph assembly.
//!
//! The assembler turns a compiled [`Outline`] plus a populated
//! [`ComponentRegistry`] into one live [`Graph`] of node handles, building
//! component instances along the way. Every built instance is registered
//! back into the registry so the path executor can resolve it by node
//! name.
//!
//! Each directive contributes topology according to its component's
//! [`Composition`] tag:
//!
//! - **Leaf**: registration only; no topology of its own
//! - **Serial**: the directive's edge mapping is flattened depth-first
//!   into one linear chain and spliced in via [`Graph::extend`]
//! - **Parallel**: per-step alternative lists are gathered and expanded
//!   via [`Graph::branchify`], one wrapped leaf per (step, alternative)
//!   pair; this is where Cartesian-product explosion happens

use std::sync::Arc;

use indexmap::IndexMap;
use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::component::{Component, Composition, StepComponent};
use crate::graphs::{Graph, GraphError};
use crate::outline::{Directive, Outline};
use crate::registry::{ComponentRegistry, RegistryError};
use crate::types::NodeHandle;

/// Errors raised while assembling an outline into a graph.
#[derive(Debug, Error, Diagnostic)]
pub enum AssemblyError {
    /// The registry could not resolve or construct a component.
    #[error(transparent)]
    #[diagnostic(code(braidworks::assembler::registry))]
    Registry(#[from] RegistryError),

    /// Splicing produced an illegal graph mutation.
    #[error(transparent)]
    #[diagnostic(code(braidworks::assembler::graph))]
    Graph(#[from] GraphError),

    /// A directive references a node it recorded no design for.
    #[error("section {section} references node {node} with no resolved design")]
    #[diagnostic(
        code(braidworks::assembler::missing_design),
        help("This indicates an outline compiled against a different registry.")
    )]
    MissingDesign { section: String, node: String },
}

/// Assembles outlines into executable graphs.
///
/// Caller-supplied parameter overrides apply to every component the
/// assembler builds, at the highest merge priority.
#[derive(Clone, Debug, Default)]
pub struct Assembler {
    overrides: IndexMap<String, Value>,
}

impl Assembler {
    /// Creates an assembler with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a construction parameter override applied to every built
    /// component.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    /// Builds the graph for `outline`, registering every constructed
    /// instance into `registry`.
    #[instrument(skip_all, fields(directives = outline.len()))]
    pub fn assemble(
        &self,
        outline: &Outline,
        registry: &mut ComponentRegistry,
    ) -> Result<Graph<NodeHandle>, AssemblyError> {
        let mut graph = Graph::new();
        for directive in outline.directives() {
            self.assemble_directive(directive, outline, registry, &mut graph)?;
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "assembly finished"
        );
        Ok(graph)
    }

    fn assemble_directive(
        &self,
        directive: &Directive,
        outline: &Outline,
        registry: &mut ComponentRegistry,
        graph: &mut Graph<NodeHandle>,
    ) -> Result<(), AssemblyError> {
        let name = &directive.name;
        let component = self.build_node(directive, name, registry)?;
        registry.register_instance(name.clone(), Arc::clone(&component));

        match component.composition() {
            Composition::Leaf => {
                debug!(section = %name, "leaf directive registered");
            }
            Composition::Serial => {
                if directive.edges.is_empty() {
                    debug!(section = %name, "serial directive without edges, registration only");
                    return Ok(());
                }
                let chain = flatten_serial(directive);
                let mut handles = vec![NodeHandle::wrapping(component)];
                for node in chain.iter().skip(1) {
                    handles.push(self.child_handle(directive, node, outline, registry)?);
                }
                debug!(section = %name, length = handles.len(), "splicing serial chain");
                graph.extend(&handles, None)?;
            }
            Composition::Parallel => {
                let steps = directive.targets(name).to_vec();
                let mut per_step: Vec<Vec<NodeHandle>> = Vec::with_capacity(steps.len());
                for step in &steps {
                    let listed = directive.targets(step);
                    let alternatives: Vec<String> = if listed.is_empty() {
                        vec![step.clone()]
                    } else {
                        listed.to_vec()
                    };
                    let mut handles = Vec::with_capacity(alternatives.len());
                    for alternative in alternatives {
                        let leaf = self.build_node(directive, &alternative, registry)?;
                        let wrapped: Arc<dyn Component> =
                            Arc::new(StepComponent::new(step.clone(), leaf));
                        registry.register_instance(alternative, Arc::clone(&wrapped));
                        handles.push(NodeHandle::wrapping(wrapped));
                    }
                    per_step.push(handles);
                }
                debug!(
                    section = %name,
                    steps = per_step.len(),
                    "branching per-step alternatives"
                );
                graph.branchify(&per_step, None)?;
            }
        }
        Ok(())
    }

    /// Resolves or constructs the component for one node of a directive.
    ///
    /// An instance already registered under the node's name wins over its
    /// design; otherwise the design's factory builds a fresh instance from
    /// the merged parameters.
    fn build_node(
        &self,
        directive: &Directive,
        node: &str,
        registry: &ComponentRegistry,
    ) -> Result<Arc<dyn Component>, AssemblyError> {
        let tag = directive
            .designs
            .get(node)
            .ok_or_else(|| AssemblyError::MissingDesign {
                section: directive.name.clone(),
                node: node.to_string(),
            })?;
        let design = registry.select(&[node, tag.as_str()])?;
        let attributes = if node == directive.name {
            directive.attributes.clone()
        } else {
            IndexMap::new()
        };
        let spec = design.spec(
            node,
            &directive.initialization_for(node),
            &directive.implementation_for(node),
            &attributes,
            &self.overrides,
        );
        Ok(registry.instance(&[node, tag.as_str()], spec)?)
    }

    /// Handle for a serial-chain child: wraps the live instance when one
    /// exists, builds a leaf for nodes without their own directive, and
    /// leaves a bare named handle for sections assembled later (name-keyed
    /// equality makes the two interchangeable).
    fn child_handle(
        &self,
        directive: &Directive,
        node: &str,
        outline: &Outline,
        registry: &mut ComponentRegistry,
    ) -> Result<NodeHandle, AssemblyError> {
        if let Some(existing) = registry.built(node) {
            return Ok(NodeHandle::wrapping(existing));
        }
        if outline.get(node).is_some() {
            return Ok(NodeHandle::named(node));
        }
        let component = self.build_node(directive, node, registry)?;
        registry.register_instance(node.to_string(), Arc::clone(&component));
        Ok(NodeHandle::wrapping(component))
    }
}

/// Depth-first flattening of a directive's edge mapping into one chain.
///
/// For each referenced child: append it, and when the child is itself an
/// edge source, expand its own children in place before continuing. This
/// is where nested reference chains become a single linear sequence.
fn flatten_serial(directive: &Directive) -> Vec<String> {
    let mut chain = vec![directive.name.clone()];
    expand(directive, &directive.name, &mut chain);
    chain
}

fn expand(directive: &Directive, node: &str, chain: &mut Vec<String>) {
    for child in directive.targets(node) {
        chain.push(child.clone());
        if directive.edges.contains_key(child) {
            expand(directive, child, chain);
        }
    }
}
