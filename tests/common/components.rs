use async_trait::async_trait;
use braidworks::component::{Component, ComponentError, Composition};
use braidworks::context::Context;
use serde_json::{Value, json};

/// Leaf that appends its own name to the `trail` array in the context,
/// making execution order observable from the outside.
pub struct Stamp {
    name: String,
}

impl Stamp {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Component for Stamp {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, mut ctx: Context) -> Result<Context, ComponentError> {
        let mut trail = match ctx.remove("trail") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        trail.push(json!(self.name));
        ctx.insert("trail", Value::Array(trail));
        Ok(ctx)
    }
}

/// Section component declaring a serial chain; execution is a pass-through
/// because the chain members run as their own graph nodes.
pub struct ChainSection {
    name: String,
}

impl ChainSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Component for ChainSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn composition(&self) -> Composition {
        Composition::Serial
    }

    async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
        Ok(ctx)
    }
}

/// Section component declaring a parallel fan-out of per-step alternatives.
pub struct FanSection {
    name: String,
}

impl FanSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Component for FanSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn composition(&self) -> Composition {
        Composition::Parallel
    }

    async fn execute(&self, ctx: Context) -> Result<Context, ComponentError> {
        Ok(ctx)
    }
}

/// Leaf that always fails with a synthetic execution error.
pub struct Exploder {
    name: String,
}

impl Exploder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Component for Exploder {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, _ctx: Context) -> Result<Context, ComponentError> {
        Err(ComponentError::Execution {
            component: self.name.clone(),
            message: "synthetic failure".into(),
        })
    }
}

/// Leaf that copies its construction parameters into the context, so tests
/// can observe what the factory merge produced.
pub struct Probe {
    name: String,
    alpha: Value,
}

impl Probe {
    pub fn new(name: impl Into<String>, alpha: Value) -> Self {
        Self {
            name: name.into(),
            alpha,
        }
    }
}

#[async_trait]
impl Component for Probe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, mut ctx: Context) -> Result<Context, ComponentError> {
        ctx.insert("alpha", self.alpha.clone());
        Ok(ctx)
    }
}
