use std::sync::Arc;

use braidworks::component::Component;
use braidworks::executor::RunResult;
use braidworks::registry::{ComponentRegistry, Design};
use serde_json::{Value, json};

use super::components::{ChainSection, Exploder, FanSection, Probe, Stamp};

/// Registry with the designs shared by the integration suites:
///
/// - `pipeline`: serial section components
/// - `fan`: parallel section components
/// - `step`: trail-stamping leaves
/// - `fault`: always-failing leaves
/// - `probe`: leaves that surface their merged `alpha` parameter
pub fn standard_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register(
        Design::new("pipeline", "pipelines").with_factory(Arc::new(|spec| {
            Ok(Arc::new(ChainSection::new(spec.name)) as Arc<dyn Component>)
        })),
    );
    registry.register(Design::new("fan", "fans").with_factory(Arc::new(|spec| {
        Ok(Arc::new(FanSection::new(spec.name)) as Arc<dyn Component>)
    })));
    registry.register(
        Design::new("step", "steps")
            .with_parameters(["alpha", "max_depth"])
            .with_factory(Arc::new(|spec| {
                Ok(Arc::new(Stamp::new(spec.name)) as Arc<dyn Component>)
            })),
    );
    registry.register(Design::new("fault", "faults").with_factory(Arc::new(|spec| {
        Ok(Arc::new(Exploder::new(spec.name)) as Arc<dyn Component>)
    })));
    registry.register(
        Design::new("probe", "probes")
            .with_parameters(["alpha"])
            .with_defaults(indexmap::IndexMap::from([(
                "alpha".to_string(),
                json!(1),
            )]))
            .with_factory(Arc::new(|spec| {
                let alpha = spec.parameters.get("alpha").cloned().unwrap_or(Value::Null);
                Ok(Arc::new(Probe::new(spec.name, alpha)) as Arc<dyn Component>)
            })),
    );
    registry
}

/// The `trail` array a path's components stamped, as plain strings.
pub fn trail(result: &RunResult) -> Vec<String> {
    result
        .contents
        .get("trail")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
