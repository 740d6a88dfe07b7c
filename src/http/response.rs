use bytes::Bytes;

use crate::http::mime::DEFAULT_CONTENT_TYPE;

/// HTTP status codes the server emits.
///
/// - `Ok` (200): a rendered page or static asset follows
/// - `Found` (302): redirect, no body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 Found
    Found,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Found.as_u16(), 302);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
        }
    }
}

/// What a handler decided to send back.
///
/// A response is either a redirect or a rendered body, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Redirect(Redirect),
    Rendered(Rendered),
}

/// The 302 shape: a `Location` plus raw header lines such as `Set-Cookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    /// Complete header lines without the trailing CRLF, written in order.
    pub extra_headers: Vec<String>,
}

/// The 200 shape: a body and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content_type: String,
    pub body: Bytes,
}

impl Redirect {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            extra_headers: Vec::new(),
        }
    }

    /// Appends a raw header line.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::response::Redirect;
    /// let redirect = Redirect::new("/index.html").header("Set-Cookie: logined=true; Path=/");
    /// assert_eq!(redirect.extra_headers.len(), 1);
    /// ```
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.extra_headers.push(line.into());
        self
    }
}

impl Rendered {
    pub fn new(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// A body served with the default `text/html;charset=utf-8` type.
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::new(DEFAULT_CONTENT_TYPE, body)
    }
}

impl Response {
    pub fn redirect(location: impl Into<String>) -> Self {
        Response::Redirect(Redirect::new(location))
    }

    pub fn html(body: impl Into<Bytes>) -> Self {
        Response::Rendered(Rendered::html(body))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Response::Redirect(_) => StatusCode::Found,
            Response::Rendered(_) => StatusCode::Ok,
        }
    }
}

impl From<Redirect> for Response {
    fn from(redirect: Redirect) -> Self {
        Response::Redirect(redirect)
    }
}

impl From<Rendered> for Response {
    fn from(rendered: Rendered) -> Self {
        Response::Rendered(rendered)
    }
}
