//! Path enumeration and execution over an assembled graph.
//!
//! The executor enumerates every root-to-endpoint path of a compiled
//! [`Graph`] and runs the corresponding component chain, producing one
//! [`RunResult`] per path collected into a [`Summary`].
//!
//! # Failure Scope
//!
//! Paths are isolated: a failing component records its error on that
//! path's result and execution of the remaining paths continues. Paths
//! share no mutable state (each receives its own clone of the seed
//! context), which is also what makes the parallel mode safe.
//!
//! # Structural Nodes
//!
//! A node name with no live instance in the registry is skipped silently.
//! This asymmetry with the fatal configuration-time errors is deliberate:
//! some node names exist only to shape the topology and were never meant
//! to execute.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::component::Component;
use crate::context::Context;
use crate::graphs::Graph;
use crate::registry::ComponentRegistry;
use crate::types::NodeHandle;

/// One path's execution record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunResult {
    /// Generated key, `{prefix}_{index}` with a 1-based index.
    pub name: String,
    /// Node names of the executed path, in order.
    pub path: Vec<String>,
    /// Final context contents after the last successful component.
    pub contents: FxHashMap<String, Value>,
    /// Rendered error of the failing component, if the path failed.
    pub error: Option<String>,
    /// Completion timestamp.
    pub finished_at: DateTime<Utc>,
}

impl RunResult {
    /// Returns true if the path ran to completion.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate of one execution run: every path's result, keyed by its
/// generated name, in path-enumeration order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Summary {
    /// Identifier for this run.
    pub run_id: Uuid,
    /// Result records in path order.
    pub contents: IndexMap<String, RunResult>,
}

impl Summary {
    /// Looks up one path's result by its generated key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RunResult> {
        self.contents.get(name)
    }

    /// Results in path order.
    pub fn results(&self) -> impl Iterator<Item = &RunResult> {
        self.contents.values()
    }

    /// Number of executed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true if the graph had no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Knobs for one execution run.
#[derive(Clone, Debug)]
pub struct ExecutorOptions {
    /// Dispatch one task per path instead of running paths sequentially.
    pub parallel: bool,
    /// Prefix of generated result keys.
    pub result_prefix: String,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            result_prefix: "path".to_string(),
        }
    }
}

/// Executes every path of an assembled graph.
///
/// Holds a shared reference to the registry of built instances; the
/// registry is read-only during execution and safe to share across
/// concurrent path tasks.
#[derive(Debug)]
pub struct PathExecutor<'r> {
    registry: &'r ComponentRegistry,
    options: ExecutorOptions,
}

impl<'r> PathExecutor<'r> {
    /// Creates an executor with default options.
    #[must_use]
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self {
            registry,
            options: ExecutorOptions::default(),
        }
    }

    /// Replaces the whole option set.
    #[must_use]
    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    /// Toggles per-path task dispatch.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    /// Changes the result key prefix.
    #[must_use]
    pub fn result_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.result_prefix = prefix.into();
        self
    }

    /// Runs every root-to-endpoint path against its own clone of `seed`.
    ///
    /// Results are keyed `{prefix}_{index}` (1-based) and appear in path
    /// order regardless of the parallel toggle, so summaries are
    /// deterministic either way.
    #[instrument(skip_all, fields(parallel = self.options.parallel))]
    pub async fn run(&self, graph: &Graph<NodeHandle>, seed: Context) -> Summary {
        let run_id = Uuid::new_v4();
        let plans: Vec<PathPlan> = graph
            .paths()
            .into_iter()
            .enumerate()
            .map(|(index, path)| self.plan(index, &path))
            .collect();
        debug!(run = %run_id, paths = plans.len(), "starting execution");

        let results = if self.options.parallel {
            run_concurrently(plans, seed).await
        } else {
            let mut results = Vec::with_capacity(plans.len());
            for plan in plans {
                results.push(plan.execute(seed.clone()).await);
            }
            results
        };

        let mut contents = IndexMap::with_capacity(results.len());
        for result in results {
            contents.insert(result.name.clone(), result);
        }
        Summary { run_id, contents }
    }

    fn plan(&self, index: usize, path: &[NodeHandle]) -> PathPlan {
        let names: Vec<String> = path.iter().map(|handle| handle.name.clone()).collect();
        let components = names.iter().map(|name| self.registry.built(name)).collect();
        PathPlan {
            index,
            name: format!("{}_{}", self.options.result_prefix, index + 1),
            names,
            components,
        }
    }
}

/// Everything one path needs to run detached from the executor: node
/// names plus the live instances resolved up front, so tasks never borrow
/// the registry.
struct PathPlan {
    index: usize,
    name: String,
    names: Vec<String>,
    components: Vec<Option<Arc<dyn Component>>>,
}

impl PathPlan {
    async fn execute(self, mut ctx: Context) -> RunResult {
        let mut error = None;
        for (node, component) in self.names.iter().zip(self.components.iter()) {
            let Some(component) = component else {
                debug!(node = %node, "no live instance, skipping structural node");
                continue;
            };
            match component.execute(ctx.clone()).await {
                Ok(next) => ctx = next,
                Err(failure) => {
                    warn!(node = %node, error = %failure, "component failed, recording on result");
                    error = Some(format!("{node}: {failure}"));
                    break;
                }
            }
        }
        RunResult {
            name: self.name,
            path: self.names,
            contents: ctx.contents,
            error,
            finished_at: Utc::now(),
        }
    }
}

async fn run_concurrently(plans: Vec<PathPlan>, seed: Context) -> Vec<RunResult> {
    let mut set = JoinSet::new();
    let expected = plans.len();
    for plan in plans {
        let ctx = seed.clone();
        set.spawn(async move {
            let index = plan.index;
            (index, plan.execute(ctx).await)
        });
    }
    let mut indexed = Vec::with_capacity(expected);
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(pair) => indexed.push(pair),
            Err(join_error) => warn!(error = %join_error, "path task aborted"),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
