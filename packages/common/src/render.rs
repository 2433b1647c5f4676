use std::path::Path;

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// A template failed to load or render.
#[derive(Debug, Error)]
#[error("template error: {0}")]
pub struct RenderError(#[from] minijinja::Error);

/// Thin wrapper over a minijinja environment loading templates from disk.
///
/// Rendering a named view with a serializable context is the whole contract.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir));
        Self { env }
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}
