//! Turning a view name and a model into HTML.
//!
//! Views are Handlebars templates under the template root. Every `*.html`
//! file is registered once at startup under its path relative to the root,
//! without the extension, so `user/list.html` is the view `user/list`.
//! Templates also get an `inc` helper, used to number rows from 1 with
//! `{{inc @index}}`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use handlebars::{Handlebars, handlebars_helper};
use serde_json::Value;
use tracing::debug;

pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, model: &Value) -> anyhow::Result<Vec<u8>>;
}

handlebars_helper!(inc: |x: u64| x + 1);

/// Handlebars registry loaded from a template root. Rendering never touches
/// the filesystem.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let mut registry = Handlebars::new();
        registry.register_helper("inc", Box::new(inc));

        for path in html_files(root)? {
            let name = view_name(root, &path)?;
            registry
                .register_template_file(&name, &path)
                .with_context(|| format!("registering view {name} from {}", path.display()))?;
            debug!(view = %name, "template registered");
        }

        Ok(Self { registry })
    }

    pub fn has_view(&self, view: &str) -> bool {
        self.registry.has_template(view.trim_start_matches('/'))
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, view: &str, model: &Value) -> anyhow::Result<Vec<u8>> {
        let html = self
            .registry
            .render(view.trim_start_matches('/'), model)
            .with_context(|| format!("rendering view {view}"))?;
        Ok(html.into_bytes())
    }
}

fn html_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading template dir {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(html_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "html") {
            files.push(path);
        }
    }

    Ok(files)
}

fn view_name(root: &Path, path: &Path) -> anyhow::Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?
        .with_extension("");

    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}
