//! HTTP protocol implementation.
//!
//! This module implements the server side of a small HTTP/1.1 subset over
//! raw byte streams: one request per connection, no keep-alive.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`reader`**: Line-oriented decoding of the readable half of a stream
//! - **`parser`**: Builds a `Request` from request line, headers and body
//! - **`form`**: `application/x-www-form-urlencoded` decoding
//! - **`request`**: HTTP request representation and accessors
//! - **`response`**: The redirect / rendered response variants
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`connection`**: The per-connection worker tying the above together
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse request line, headers, body
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch to a route or static file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent (or any error)
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Write half shut down
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webserver::http::connection::Connection;
//! use webserver::router::{Router, StaticFiles};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let router = Arc::new(Router::new(StaticFiles::new("./static", "./templates", vec![])));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod form;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
