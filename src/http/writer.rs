use std::io;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{HttpError, Result};
use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

fn put_line(buf: &mut BytesMut, line: &str) {
    buf.put_slice(line.as_bytes());
    buf.put_slice(CRLF);
}

fn status_line(status: StatusCode) -> String {
    format!(
        "{} {} {}",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    )
}

/// Lays out the exact bytes sent for `resp`.
///
/// A redirect carries `Location` and its extra header lines and no body. A
/// rendered response carries `Content-Type`, a `Content-Length` equal to the
/// body size, and the body unchanged.
pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = BytesMut::new();

    match resp {
        Response::Redirect(redirect) => {
            put_line(&mut buf, &status_line(StatusCode::Found));
            put_line(&mut buf, &format!("Location: {}", redirect.location));
            for header in &redirect.extra_headers {
                put_line(&mut buf, header);
            }
            buf.put_slice(CRLF);
        }

        Response::Rendered(rendered) => {
            buf.reserve(rendered.body.len() + 128);
            put_line(&mut buf, &status_line(StatusCode::Ok));
            put_line(&mut buf, &format!("Content-Type: {}", rendered.content_type));
            put_line(&mut buf, &format!("Content-Length: {}", rendered.body.len()));
            buf.put_slice(CRLF);
            buf.put_slice(&rendered.body);
        }
    }

    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    /// Bytes handed to the sink so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Writes the whole response, then flushes. A failure leaves whatever
    /// was already written in place; it is never retried.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await
                .map_err(HttpError::WriteFailure)?;

            if n == 0 {
                return Err(HttpError::WriteFailure(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "connection closed while writing",
                )));
            }

            self.written += n;
        }

        stream.flush().await.map_err(HttpError::WriteFailure)
    }
}
