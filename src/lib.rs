//! Webserver - HTTP/1.1 over raw sockets
//!
//! Core library: request parsing, response serialization, routing and the
//! per-connection worker, plus the user-facing routes built on top.

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod server;

pub use error::{HttpError, Result};
