//! Component execution framework for the braidworks workflow system.
//!
//! This module provides the core abstractions for executable workflow
//! components: the [`Component`] trait, the [`Composition`] capability tag
//! the assembler branches on, the built-in composite components, and error
//! handling.
//!
//! # Design Principles
//!
//! - **Opaque to the graph**: the graph layer never inspects a component
//!   beyond its name; execution capability lives entirely behind this trait
//! - **Focused**: each component does one transformation of the context
//! - **Composable**: composites carry a nested graph of further components,
//!   so composition is recursion over the same type, not a separate concept
//!
//! # Examples
//!
//! ```rust
//! use async_trait::async_trait;
//! use braidworks::component::{Component, ComponentError};
//! use braidworks::context::Context;
//! use serde_json::json;
//!
//! struct Stamp;
//!
//! #[async_trait]
//! impl Component for Stamp {
//!     fn name(&self) -> &str {
//!         "stamp"
//!     }
//!
//!     async fn execute(&self, mut ctx: Context) -> Result<Context, ComponentError> {
//!         ctx.insert("stamped", json!(true));
//!         Ok(ctx)
//!     }
//! }
//! ```

// Standard library and external crates
use std::sync::Arc;

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

// Internal crate modules
use crate::context::Context;
use crate::graphs::Graph;
use crate::types::NodeHandle;

// ============================================================================
// Core Trait
// ============================================================================

/// Core trait defining executable workflow components.
///
/// A component is a single unit of computation within a workflow path. It
/// receives the context accumulated so far, performs its work, and returns
/// the context the next component in the chain should see.
///
/// # Error Handling
///
/// Returning `Err(ComponentError)` marks the executing path as failed; the
/// error is recorded on that path's result and sibling paths continue
/// unaffected.
#[async_trait]
pub trait Component: Send + Sync {
    /// Stable display name; doubles as the graph key for this component.
    fn name(&self) -> &str;

    /// Declares how the assembler should expand this component.
    ///
    /// Leaf components (the default) become single graph nodes. Serial and
    /// parallel composites are expanded into sub-topologies instead.
    fn composition(&self) -> Composition {
        Composition::Leaf
    }

    /// Execute this component against the given context.
    async fn execute(&self, ctx: Context) -> Result<Context, ComponentError>;
}

/// Capability tag describing how a component participates in assembly.
///
/// This is an explicit declaration rather than a structural probe: a
/// component states up front whether it is a plain step, a serial chain of
/// sub-steps, or a parallel fan-out of alternatives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Composition {
    /// A plain executable step; becomes a single graph node.
    #[default]
    Leaf,
    /// A linear chain of sub-steps, flattened into the surrounding graph.
    Serial,
    /// A Cartesian fan-out of per-step alternatives, spliced as branches.
    Parallel,
}

// ============================================================================
// Built-in Composites
// ============================================================================

/// A composite component holding a linear chain of sub-components.
///
/// Carries its own [`Graph`] of handles. Executing the composite threads the
/// context through every enumerated path of the inner graph in order, which
/// for the expected linear topology means one pass over the chain. Handles
/// without a payload are structural and are skipped.
pub struct SerialComposite {
    name: String,
    inner: Graph<NodeHandle>,
}

impl SerialComposite {
    #[must_use]
    pub fn new(name: impl Into<String>, inner: Graph<NodeHandle>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// The nested graph of sub-components.
    #[must_use]
    pub fn graph(&self) -> &Graph<NodeHandle> {
        &self.inner
    }
}

#[async_trait]
impl Component for SerialComposite {
    fn name(&self) -> &str {
        &self.name
    }

    fn composition(&self) -> Composition {
        Composition::Serial
    }

    async fn execute(&self, mut ctx: Context) -> Result<Context, ComponentError> {
        for path in self.inner.paths() {
            for handle in &path {
                if let Some(component) = handle.component() {
                    ctx = component.execute(ctx).await?;
                }
            }
        }
        Ok(ctx)
    }
}

/// A composite component holding alternative branches.
///
/// Executing the composite runs every enumerated path of the inner graph
/// against an isolated clone of the incoming context, then merges the
/// resulting contexts back in path order (later paths win on key collision).
pub struct ParallelComposite {
    name: String,
    inner: Graph<NodeHandle>,
}

impl ParallelComposite {
    #[must_use]
    pub fn new(name: impl Into<String>, inner: Graph<NodeHandle>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// The nested graph of alternative branches.
    #[must_use]
    pub fn graph(&self) -> &Graph<NodeHandle> {
        &self.inner
    }
}

#[async_trait]
impl Component for ParallelComposite {
    fn name(&self) -> &str {
        &self.name
    }

    fn composition(&self) -> Composition {
        Composition::Parallel
    }

    async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
        let mut merged = ctx.clone();
        for path in self.inner.paths() {
            let mut branch_ctx = ctx.clone();
            for handle in &path {
                if let Some(component) = handle.component() {
                    branch_ctx = component.execute(branch_ctx).await?;
                }
            }
            merged.merge(branch_ctx);
        }
        Ok(merged)
    }
}

/// Wrapper associating one alternative with its owning step.
///
/// Parallel assembly builds one of these per (step, alternative) pair. The
/// wrapper keeps the alternative's name as the graph key, so distinct
/// alternatives stay distinct nodes, while remembering which step the
/// alternative belongs to for attribution.
pub struct StepComponent {
    step: String,
    inner: Arc<dyn Component>,
}

impl StepComponent {
    #[must_use]
    pub fn new(step: impl Into<String>, inner: Arc<dyn Component>) -> Self {
        Self {
            step: step.into(),
            inner,
        }
    }

    /// Name of the step this alternative belongs to.
    #[must_use]
    pub fn step(&self) -> &str {
        &self.step
    }
}

#[async_trait]
impl Component for StepComponent {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
        self.inner.execute(ctx).await
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during component execution.
///
/// A `ComponentError` fails the path it occurred on. The executor records
/// the rendered error on that path's result; it does not abort the run.
#[derive(Debug, Error, Diagnostic)]
pub enum ComponentError {
    /// Expected input data is missing from the context.
    #[error("missing expected input: {what}")]
    #[diagnostic(
        code(braidworks::component::missing_input),
        help("Check that an upstream component produced the required entry.")
    )]
    MissingInput { what: String },

    /// Input data was present but not usable.
    #[error("validation failed: {0}")]
    #[diagnostic(
        code(braidworks::component::validation),
        help("Check the shape and type of the context entries this component reads.")
    )]
    ValidationFailed(String),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    #[diagnostic(code(braidworks::component::serde_json))]
    Serde(#[from] serde_json::Error),

    /// Component-specific execution failure.
    #[error("component {component} failed: {message}")]
    #[diagnostic(code(braidworks::component::execution))]
    Execution { component: String, message: String },
}
