use std::collections::HashMap;

use tokio::io::AsyncRead;
use tracing::debug;

use crate::error::{HttpError, Result};
use crate::http::form::{is_form_content_type, parse_form};
use crate::http::reader::LineReader;
use crate::http::request::{Method, Request};

/// Reads one request from `reader`: request line, headers up to the blank
/// line, then the body when the method is POST and a Content-Length is given.
///
/// Nothing past the declared body is consumed.
pub async fn parse_request<R>(reader: &mut LineReader<R>) -> Result<Request>
where
    R: AsyncRead + Unpin,
{
    let request_line = reader
        .read_line()
        .await?
        .ok_or_else(|| HttpError::MalformedStream("stream closed before request line".into()))?;

    let (method, uri, version) = parse_request_line(&request_line)?;
    let (path, query) = split_uri(uri);
    debug!(%method, path, "request line");

    let mut builder = Request::builder(method.clone(), path).version(version);
    if let Some(query) = query {
        builder = builder.query_params(parse_form(query.as_bytes()));
    }

    let headers = read_headers(reader).await?;

    if method == Method::POST {
        let content_length = headers
            .get("content-length")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if content_length > 0 {
            let body = reader.read_exact(content_length).await?;

            let is_form = headers
                .get("content-type")
                .map(|v| is_form_content_type(v))
                .unwrap_or(true);
            if is_form {
                builder = builder.body_params(parse_form(&body));
            }
            builder = builder.body(body);
        }
    }

    for (key, value) in headers {
        builder = builder.header(key, value);
    }

    Ok(builder.build())
}

/// Splits `METHOD URI VERSION` on single spaces.
pub fn parse_request_line(line: &str) -> Result<(Method, &str, &str)> {
    let mut parts = line.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(uri), Some(version)) => Ok((Method::from(method), uri, version)),
        _ => Err(HttpError::BadRequestLine(line.to_string())),
    }
}

/// Splits a URI into its path and the query string after the first `?`.
pub fn split_uri(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    }
}

/// Splits a header line on its first `:`. The name is lowercased but
/// otherwise kept as sent; leading whitespace is dropped from the value. A
/// line without a colon is kept whole as the name, with an empty value.
pub fn parse_header_line(line: &str) -> (String, String) {
    match line.split_once(':') {
        Some((key, value)) => (key.to_ascii_lowercase(), value.trim_start().to_string()),
        None => (line.to_ascii_lowercase(), String::new()),
    }
}

async fn read_headers<R>(reader: &mut LineReader<R>) -> Result<HashMap<String, String>>
where
    R: AsyncRead + Unpin,
{
    let mut headers = HashMap::new();

    loop {
        let line = reader
            .read_line()
            .await?
            .ok_or_else(|| HttpError::MalformedStream("stream closed inside headers".into()))?;

        if line.is_empty() {
            return Ok(headers);
        }

        let (key, value) = parse_header_line(&line);
        headers.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parse_simple_get() {
        let raw: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let mut reader = LineReader::new(raw);

        let parsed = parse_request(&mut reader).await.unwrap();

        assert_eq!(parsed.path(), "/");
        assert_eq!(parsed.header("host"), Some("example.com"));
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn request_line_needs_three_tokens() {
        assert!(matches!(
            parse_request_line("GET /"),
            Err(HttpError::BadRequestLine(_))
        ));
        assert!(parse_request_line("GET / HTTP/1.1").is_ok());
    }

    #[test]
    fn header_value_keeps_inner_colons() {
        let (key, value) = parse_header_line("Host: localhost:8080");

        assert_eq!(key, "host");
        assert_eq!(value, "localhost:8080");
    }
}
