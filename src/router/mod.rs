//! Maps `(method, path)` to a handler, falling back to static files.
//!
//! Dynamic routes are a registration table of handler values. Everything
//! the table does not match is served from disk by [`StaticFiles`].

pub mod static_files;

pub use static_files::StaticFiles;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// A dynamic route's business logic.
pub type Handler = Arc<dyn Fn(&Request) -> Result<Response> + Send + Sync>;

pub struct Router {
    routes: HashMap<(Method, String), Handler>,
    static_files: StaticFiles,
}

impl Router {
    pub fn new(static_files: StaticFiles) -> Self {
        Self {
            routes: HashMap::new(),
            static_files,
        }
    }

    /// Registers `handler` for an exact method and path. Registering the same
    /// pair again replaces the earlier handler.
    pub fn register<F>(&mut self, method: Method, path: impl Into<String>, handler: F)
    where
        F: Fn(&Request) -> Result<Response> + Send + Sync + 'static,
    {
        self.routes.insert((method, path.into()), Arc::new(handler));
    }

    pub fn handler_for(&self, method: &Method, path: &str) -> Option<&Handler> {
        self.routes.get(&(method.clone(), path.to_string()))
    }

    pub fn static_files(&self) -> &StaticFiles {
        &self.static_files
    }

    /// Produces the response for `request`.
    pub async fn dispatch(&self, request: &Request) -> Result<Response> {
        match self.handler_for(request.method(), request.path()) {
            Some(handler) => {
                debug!(method = %request.method(), path = request.path(), "dynamic route");
                handler(request)
            }
            None => self.static_files.serve(request.path()).await,
        }
    }
}
