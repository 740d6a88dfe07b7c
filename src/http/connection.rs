use std::mem;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tracing::{debug, info};

use crate::error::Result;
use crate::http::parser::parse_request;
use crate::http::reader::LineReader;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Serves exactly one request on a stream, then closes it.
pub struct Connection<S> {
    reader: LineReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    router: Arc<Router>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: LineReader::new(read_half),
            writer: write_half,
            router,
            state: ConnectionState::Reading,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Runs the connection to completion. The write half is shut down on
    /// every path out, whether the request was served or not.
    pub async fn run(&mut self) -> Result<()> {
        let result = self.drive().await;
        self.state = ConnectionState::Closed;

        if let Err(e) = self.writer.shutdown().await {
            debug!("shutdown after response failed: {}", e);
        }

        result
    }

    async fn drive(&mut self) -> Result<()> {
        loop {
            match mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request = parse_request(&mut self.reader).await?;
                    self.state = ConnectionState::Processing(request);
                }

                ConnectionState::Processing(request) => {
                    let response = self.router.dispatch(&request).await?;
                    info!(
                        method = %request.method(),
                        path = request.path(),
                        status = response.status().as_u16(),
                        "request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.writer).await?;
                    // One request per connection.
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    return Ok(());
                }
            }
        }
    }
}
