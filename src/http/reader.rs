//! Line-oriented view over the readable half of a connection.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{HttpError, Result};

const READ_CHUNK: usize = 1024;

/// Decodes CRLF (or bare LF) terminated lines and fixed-size bodies from a
/// byte source.
///
/// Bytes pulled from the source while looking for a line ending stay in the
/// internal buffer and are handed out by the next call, so a body read right
/// after the headers never loses data. Body reads only ask the source for the
/// bytes still missing.
pub struct LineReader<R> {
    inner: R,
    buf: BytesMut,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK),
        }
    }

    /// Reads one line with its terminator stripped.
    ///
    /// Returns `Ok(None)` when the source is exhausted exactly on a line
    /// boundary. A source that closes in the middle of a line is a
    /// `MalformedStream`.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
                let mut line = self.buf.split_to(pos + 1);
                line.truncate(pos);
                if line.last() == Some(&b'\r') {
                    line.truncate(pos - 1);
                }

                return String::from_utf8(line.to_vec())
                    .map(Some)
                    .map_err(|_| HttpError::MalformedStream("line is not valid UTF-8".into()));
            }

            if self.fill().await? == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(HttpError::MalformedStream(format!(
                    "stream closed mid-line after {} bytes",
                    self.buf.len()
                )));
            }
        }
    }

    /// Reads exactly `len` raw bytes.
    pub async fn read_exact(&mut self, len: usize) -> Result<Bytes> {
        while self.buf.len() < len {
            // Grow with the data actually received, not the declared length.
            let missing = len - self.buf.len();
            self.buf.reserve(missing.min(READ_CHUNK));

            let n = (&mut self.inner)
                .take(missing as u64)
                .read_buf(&mut self.buf)
                .await
                .map_err(|e| HttpError::MalformedStream(format!("read failed: {e}")))?;

            if n == 0 {
                return Err(HttpError::MalformedStream(format!(
                    "stream closed after {} of {} body bytes",
                    self.buf.len(),
                    len
                )));
            }
        }

        Ok(self.buf.split_to(len).freeze())
    }

    /// Bytes already pulled from the source but not yet handed out.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    async fn fill(&mut self) -> Result<usize> {
        self.buf.reserve(READ_CHUNK);
        self.inner
            .read_buf(&mut self.buf)
            .await
            .map_err(|e| HttpError::MalformedStream(format!("read failed: {e}")))
    }
}
