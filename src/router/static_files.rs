use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::StaticConfig;
use crate::error::{HttpError, Result};
use crate::http::mime::content_type_for;
use crate::http::response::{Rendered, Response};

/// Serves files byte-for-byte from one of two roots.
///
/// Paths under an asset prefix (`/css`, `/js`, ...) come from the static
/// root; every other path comes from the template root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    static_root: PathBuf,
    template_root: PathBuf,
    asset_prefixes: Vec<String>,
}

impl StaticFiles {
    pub fn new(
        static_root: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
        asset_prefixes: Vec<String>,
    ) -> Self {
        Self {
            static_root: static_root.into(),
            template_root: template_root.into(),
            asset_prefixes,
        }
    }

    pub fn from_config(cfg: &StaticConfig) -> Self {
        Self::new(
            &cfg.static_root,
            &cfg.template_root,
            cfg.asset_prefixes.clone(),
        )
    }

    /// The directory `path` is served from.
    pub fn root_for(&self, path: &str) -> &Path {
        if self
            .asset_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            self.static_root.as_path()
        } else {
            self.template_root.as_path()
        }
    }

    /// Maps a request path to a file under its root. A path that would
    /// climb out of the root is refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let root = self.root_for(path);
        let relative = Path::new(path.trim_start_matches('/'));

        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(HttpError::StaticAssetNotFound {
                path: root.join(relative),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "path escapes its root"),
            });
        }

        Ok(root.join(relative))
    }

    /// Loads the file addressed by `path` and wraps it in a 200 response.
    pub async fn serve(&self, path: &str) -> Result<Response> {
        let file = self.resolve(path)?;
        debug!(path, file = %file.display(), "static asset");

        let body = tokio::fs::read(&file)
            .await
            .map_err(|source| HttpError::StaticAssetNotFound { path: file, source })?;

        Ok(Rendered::new(content_type_for(path), body).into())
    }
}
