//! Errors raised while serving a single connection.
//!
//! Every variant is caught at the connection boundary, logged, and resolved
//! by closing the connection. Nothing is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    /// The peer closed the stream early, or sent bytes that are not UTF-8
    /// where a text line was expected.
    #[error("malformed stream: {0}")]
    MalformedStream(String),

    /// The first line did not carry method, URI and version.
    #[error("bad request line: {0:?}")]
    BadRequestLine(String),

    #[error("static asset not found: {}", path.display())]
    StaticAssetNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write response")]
    WriteFailure(#[source] io::Error),

    /// A business handler (user store, renderer) gave up on the request.
    #[error("handler failed: {0}")]
    Handler(#[from] anyhow::Error),
}
