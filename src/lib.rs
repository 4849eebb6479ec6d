//! # Braidworks: Configuration-driven Workflow Assembly
//!
//! Braidworks compiles layered configuration mappings into executable
//! directed acyclic graphs and runs every root-to-endpoint path,
//! producing one result record per path.
//!
//! ## Core Concepts
//!
//! - **Settings**: The two-level `section -> {key -> value}` mapping a
//!   host hands over after parsing whatever file format it favors
//! - **Registry**: Explicitly registered component designs (tag, edge
//!   suffix, parameters, factory) and already-built instances
//! - **Outline**: The compiled form of settings; one directive per
//!   section with classified edges, designs, and parameters
//! - **Graph**: A generic adjacency-list DAG with splice, branch, and
//!   join composition operators and deterministic path enumeration
//! - **Assembler**: Turns an outline into one live graph, building and
//!   registering component instances along the way
//! - **Executor**: Walks every path of the assembled graph and collects
//!   per-path results into a summary
//!
//! ## Quick Start
//!
//! ### Composing Graphs Directly
//!
//! The graph container works over any cloneable, hashable key and can be
//! used without the configuration layer:
//!
//! ```
//! use braidworks::graphs::Graph;
//!
//! let mut graph = Graph::new();
//! graph.extend(&["fetch", "parse"], None).unwrap();
//! graph.branchify(&[vec!["fast", "slow"], vec!["emit"]], None).unwrap();
//!
//! assert_eq!(graph.roots(), vec!["fetch"]);
//! assert_eq!(graph.paths().len(), 2);
//! ```
//!
//! ### From Settings to Results
//!
//! The full pipeline: register designs, compile settings into an
//! outline, assemble the graph, execute every path:
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use serde_json::json;
//!
//! use braidworks::assembler::Assembler;
//! use braidworks::component::{Component, ComponentError, Composition};
//! use braidworks::context::Context;
//! use braidworks::executor::PathExecutor;
//! use braidworks::outline::OutlineCompiler;
//! use braidworks::registry::{ComponentRegistry, Design};
//! use braidworks::settings::Settings;
//!
//! /// A section component that chains its referenced steps.
//! struct Chain(String);
//!
//! #[async_trait]
//! impl Component for Chain {
//!     fn name(&self) -> &str {
//!         &self.0
//!     }
//!     fn composition(&self) -> Composition {
//!         Composition::Serial
//!     }
//!     async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
//!         Ok(ctx)
//!     }
//! }
//!
//! /// A leaf step that stamps its name into the context.
//! struct Stamp(String);
//!
//! #[async_trait]
//! impl Component for Stamp {
//!     fn name(&self) -> &str {
//!         &self.0
//!     }
//!     async fn execute(&self, mut ctx: Context) -> Result<Context, ComponentError> {
//!         ctx.insert(self.0.clone(), json!("done"));
//!         Ok(ctx)
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = ComponentRegistry::new();
//!     registry.register(Design::new("pipeline", "pipelines").with_factory(Arc::new(
//!         |spec| Ok(Arc::new(Chain(spec.name)) as Arc<dyn Component>),
//!     )));
//!     registry.register(Design::new("step", "steps").with_factory(Arc::new(|spec| {
//!         Ok(Arc::new(Stamp(spec.name)) as Arc<dyn Component>)
//!     })));
//!
//!     let settings = Settings::from_value(json!({
//!         "ingest": {"design": "pipeline", "step_steps": ["extract", "load"]},
//!         "extract": {},
//!         "load": {},
//!     }))?;
//!
//!     let outline = OutlineCompiler::new(&registry).compile(&settings, "ingest")?;
//!     let graph = Assembler::new().assemble(&outline, &mut registry)?;
//!
//!     let summary = tokio::runtime::Runtime::new()?
//!         .block_on(PathExecutor::new(&registry).run(&graph, Context::new()));
//!
//!     assert_eq!(summary.len(), 1);
//!     let result = summary.get("path_1").ok_or("missing result")?;
//!     assert!(result.succeeded());
//!     assert_eq!(result.path, vec!["ingest", "extract", "load"]);
//!     assert_eq!(result.contents.get("extract"), Some(&json!("done")));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible stage has its own diagnostic error type (`OutlineError`,
//! `RegistryError`, `GraphError`, `AssemblyError`, `ComponentError`), all
//! carrying [`miette`] diagnostic codes. Configuration mistakes fail at
//! compile or assembly time with the offending section and key named;
//! execution-time component failures are recorded per path rather than
//! aborting the run.
//!
//! ## Module Guide
//!
//! - [`settings`] - The externally supplied configuration mapping
//! - [`registry`] - Component designs, factories, and built instances
//! - [`outline`] - Settings-to-directive compilation and key classification
//! - [`graphs`] - Generic DAG container, composition operators, traversal
//! - [`types`] - Node handles and the graph key trait
//! - [`component`] - The component trait, composition tags, composites
//! - [`context`] - The mutable value bag threaded through executions
//! - [`assembler`] - Outline-to-graph assembly
//! - [`executor`] - Path enumeration, execution, and result summaries

pub mod assembler;
pub mod component;
pub mod context;
pub mod executor;
pub mod graphs;
pub mod outline;
pub mod registry;
pub mod settings;
pub mod types;
