//! End-to-end sweep demo: settings document to executed paths.
//!
//! This demo shows the full assembly pipeline:
//! - Register designs with factories and parameter defaults
//! - Compile a JSON settings document into an outline
//! - Assemble the outline into an executable graph
//! - Run every root-to-endpoint path and inspect the summary
//!
//! Run with: `cargo run --example sweep`

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use miette::{IntoDiagnostic, Result};
use serde_json::json;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use braidworks::assembler::Assembler;
use braidworks::component::{Component, ComponentError, Composition};
use braidworks::context::Context;
use braidworks::executor::PathExecutor;
use braidworks::outline::OutlineCompiler;
use braidworks::registry::{ComponentRegistry, Design};
use braidworks::settings::Settings;

/// A leaf step that records its own application in the context.
///
/// Appends its name to the `applied` list and stamps a per-step entry with
/// its construction parameter and a completion timestamp, so the demo output
/// makes the parameter merge visible.
struct Stage {
    name: String,
    max_depth: u64,
}

#[async_trait]
impl Component for Stage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, mut ctx: Context) -> Result<Context, ComponentError> {
        let mut applied = ctx.remove("applied").unwrap_or_else(|| json!([]));
        if let Some(list) = applied.as_array_mut() {
            list.push(json!(self.name));
        }
        ctx.insert("applied", applied);
        ctx.insert(
            &self.name,
            json!({
                "max_depth": self.max_depth,
                "at": chrono::Utc::now().to_rfc3339(),
            }),
        );
        Ok(ctx)
    }
}

/// A parallel section: contributes branch topology, never executes itself.
struct FanSection(String);

#[async_trait]
impl Component for FanSection {
    fn name(&self) -> &str {
        &self.0
    }

    fn composition(&self) -> Composition {
        Composition::Parallel
    }

    async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
        Ok(ctx)
    }
}

fn demo_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register(Design::new("fan", "fans").with_factory(Arc::new(|spec| {
        Ok(Arc::new(FanSection(spec.name)) as Arc<dyn Component>)
    })));
    registry.register(
        Design::new("step", "steps")
            .with_parameters(["max_depth"])
            .with_defaults(IndexMap::from([("max_depth".to_string(), json!(3))]))
            .with_factory(Arc::new(|spec| {
                let max_depth = spec.parameters["max_depth"].as_u64().unwrap_or(3);
                Ok(Arc::new(Stage {
                    name: spec.name,
                    max_depth,
                }) as Arc<dyn Component>)
            })),
    );
    registry
}

fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        // Span open/close events expose the instrumented async boundaries
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,braidworks=debug"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}

fn init_miette() {
    // Pretty panic reports
    miette::set_panic_hook();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    init_miette();

    info!("Sweep demo: one fan section, two steps, two alternatives each");

    let mut registry = demo_registry();

    let settings = Settings::from_value(json!({
        "sweep": {
            "design": "fan",
            "step_steps": ["scale", "model"],
            "scale_steps": ["minmax", "zscore"],
            "model_steps": ["svm", "tree"],
        },
        "minmax": {},
        "zscore": {},
        "svm": {"max_depth": 8},
        "tree": {},
    }))
    .into_diagnostic()?;

    let outline = OutlineCompiler::new(&registry).compile(&settings, "sweep")?;
    info!(sections = outline.len(), "outline compiled");

    let graph = Assembler::new().assemble(&outline, &mut registry)?;
    info!(
        nodes = graph.node_count(),
        paths = graph.paths().len(),
        "graph assembled"
    );

    let summary = PathExecutor::new(&registry)
        .parallel(true)
        .run(&graph, Context::new())
        .await;

    info!(run_id = %summary.run_id, "run finished");
    for (key, result) in &summary.contents {
        let route = result.path.join(" -> ");
        match &result.error {
            None => {
                let applied = result
                    .contents
                    .get("applied")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                info!("{key}: {route} applied={applied}");
            }
            Some(error) => info!("{key}: {route} FAILED: {error}"),
        }
    }

    Ok(())
}
