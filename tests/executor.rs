mod common;

use std::sync::Arc;

use braidworks::assembler::Assembler;
use braidworks::context::Context;
use braidworks::executor::{ExecutorOptions, PathExecutor, Summary};
use braidworks::graphs::Graph;
use braidworks::outline::OutlineCompiler;
use braidworks::registry::ComponentRegistry;
use braidworks::settings::Settings;
use braidworks::types::NodeHandle;
use common::*;
use serde_json::{Value, json};

fn assemble(
    document: Value,
    root: &str,
) -> (ComponentRegistry, Graph<NodeHandle>) {
    let mut registry = standard_registry();
    let settings = Settings::from_value(document).unwrap();
    let outline = OutlineCompiler::new(&registry)
        .compile(&settings, root)
        .unwrap();
    let graph = Assembler::new().assemble(&outline, &mut registry).unwrap();
    (registry, graph)
}

#[tokio::test]
async fn a_serial_pipeline_yields_one_result_per_path() {
    let (registry, graph) = assemble(
        json!({
            "ingest": {"design": "pipeline", "step_steps": ["extract", "load"]},
            "extract": {},
            "load": {},
        }),
        "ingest",
    );

    let summary = PathExecutor::new(&registry).run(&graph, Context::new()).await;
    assert_eq!(summary.len(), 1);

    let result = summary.get("path_1").unwrap();
    assert!(result.succeeded());
    assert_eq!(result.path, vec!["ingest", "extract", "load"]);
    assert_eq!(trail(result), vec!["extract", "load"]);
}

#[tokio::test]
async fn a_parallel_sweep_yields_the_cartesian_product_of_paths() {
    let (registry, graph) = assemble(
        json!({
            "sweep": {
                "design": "fan",
                "step_steps": ["scale", "model"],
                "scale_steps": ["minmax", "zscore"],
                "model_steps": ["svm", "tree"],
            },
            "minmax": {},
            "zscore": {},
            "svm": {},
            "tree": {},
        }),
        "sweep",
    );

    let summary = PathExecutor::new(&registry).run(&graph, Context::new()).await;
    let keys: Vec<&str> = summary.contents.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["path_1", "path_2", "path_3", "path_4"]);

    let trails: Vec<Vec<String>> = summary.results().map(trail).collect();
    assert_eq!(
        trails,
        vec![
            vec!["minmax", "svm"],
            vec!["minmax", "tree"],
            vec!["zscore", "svm"],
            vec!["zscore", "tree"],
        ]
    );
}

#[tokio::test]
async fn a_failing_component_only_takes_down_its_own_path() {
    let (registry, graph) = assemble(
        json!({
            "sweep": {
                "design": "fan",
                "step_steps": ["scale"],
                "scale_steps": ["boom", "fine"],
            },
            "boom": {"design": "fault"},
            "fine": {},
        }),
        "sweep",
    );

    let summary = PathExecutor::new(&registry).run(&graph, Context::new()).await;
    assert_eq!(summary.len(), 2);

    let failed = summary.get("path_1").unwrap();
    assert!(!failed.succeeded());
    let rendered = failed.error.as_deref().unwrap();
    assert!(rendered.starts_with("boom:"), "unexpected error: {rendered}");
    assert!(trail(failed).is_empty());

    let survived = summary.get("path_2").unwrap();
    assert!(survived.succeeded());
    assert_eq!(trail(survived), vec!["fine"]);
}

#[tokio::test]
async fn parallel_dispatch_produces_the_same_summary_shape() {
    let document = json!({
        "sweep": {
            "design": "fan",
            "step_steps": ["scale", "model"],
            "scale_steps": ["minmax", "zscore"],
            "model_steps": ["svm", "tree"],
        },
        "minmax": {},
        "zscore": {},
        "svm": {},
        "tree": {},
    });
    let (registry, graph) = assemble(document.clone(), "sweep");
    let sequential = PathExecutor::new(&registry).run(&graph, Context::new()).await;

    let (registry, graph) = assemble(document, "sweep");
    let concurrent = PathExecutor::new(&registry)
        .parallel(true)
        .run(&graph, Context::new())
        .await;

    let sequential_keys: Vec<&String> = sequential.contents.keys().collect();
    let concurrent_keys: Vec<&String> = concurrent.contents.keys().collect();
    assert_eq!(sequential_keys, concurrent_keys);
    for (left, right) in sequential.results().zip(concurrent.results()) {
        assert_eq!(left.path, right.path);
        assert_eq!(trail(left), trail(right));
    }
}

#[tokio::test]
async fn nodes_without_a_live_instance_are_skipped() {
    let mut registry = ComponentRegistry::new();
    let stamp: Arc<dyn braidworks::component::Component> = Arc::new(Stamp::new("real"));
    registry.register_instance("real", Arc::clone(&stamp));

    let mut graph = Graph::new();
    graph
        .extend(
            &[NodeHandle::named("ghost"), NodeHandle::wrapping(stamp)],
            None,
        )
        .unwrap();

    let summary = PathExecutor::new(&registry).run(&graph, Context::new()).await;
    let result = summary.get("path_1").unwrap();
    assert!(result.succeeded());
    assert_eq!(result.path, vec!["ghost", "real"]);
    assert_eq!(trail(result), vec!["real"]);
}

#[tokio::test]
async fn the_result_prefix_is_configurable() {
    let (registry, graph) = assemble(
        json!({
            "ingest": {"design": "pipeline", "step_steps": ["extract"]},
            "extract": {},
        }),
        "ingest",
    );

    let summary = PathExecutor::new(&registry)
        .with_options(ExecutorOptions {
            parallel: false,
            result_prefix: "run".to_string(),
        })
        .run(&graph, Context::new())
        .await;
    assert!(summary.get("run_1").is_some());
    assert!(summary.get("path_1").is_none());
}

#[tokio::test]
async fn each_path_starts_from_its_own_copy_of_the_seed() {
    let (registry, graph) = assemble(
        json!({
            "sweep": {
                "design": "fan",
                "step_steps": ["scale"],
                "scale_steps": ["minmax", "zscore"],
            },
            "minmax": {},
            "zscore": {},
        }),
        "sweep",
    );

    let seed = Context::new().with_entry("origin", json!("seed"));
    let summary = PathExecutor::new(&registry).run(&graph, seed).await;
    for result in summary.results() {
        assert_eq!(result.contents.get("origin"), Some(&json!("seed")));
        assert_eq!(trail(result).len(), 1);
    }
}

#[tokio::test]
async fn summaries_survive_a_serde_round_trip() {
    let (registry, graph) = assemble(
        json!({
            "ingest": {"design": "pipeline", "step_steps": ["extract"]},
            "extract": {},
        }),
        "ingest",
    );

    let summary = PathExecutor::new(&registry).run(&graph, Context::new()).await;
    let encoded = serde_json::to_value(&summary).unwrap();
    let decoded: Summary = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded.run_id, summary.run_id);
    assert_eq!(decoded.len(), summary.len());
    assert_eq!(
        decoded.get("path_1").unwrap().path,
        summary.get("path_1").unwrap().path
    );
}
