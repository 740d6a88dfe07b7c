use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use bytes::Bytes;

/// Cookie whose value identifies the client session.
pub const SESSION_COOKIE: &str = "sid";

/// HTTP request methods.
///
/// Dynamic routes only ever match GET and POST. Any other token is still
/// accepted so that static assets can be served regardless of the method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token, kept verbatim
    Other(String),
}

impl Method {
    /// Returns the token as it appears on the request line.
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(token) => token.as_str(),
        }
    }
}

impl From<&str> for Method {
    /// Maps a request-line token to a method. Matching is case-sensitive.
    ///
    /// ```
    /// # use webserver::http::request::Method;
    /// assert_eq!(Method::from("GET"), Method::GET);
    /// assert_eq!(Method::from("get"), Method::Other("get".into()));
    /// ```
    fn from(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed HTTP request.
///
/// Built once per connection and read-only afterwards. The one exception is
/// the login flag, a write-once cell the login handler fills in.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    query_params: HashMap<String, String>,
    body_params: HashMap<String, String>,
    /// Keys are lowercase.
    headers: HashMap<String, String>,
    cookies: HashSet<String>,
    session_id: Option<String>,
    body: Bytes,
    login: OnceLock<bool>,
}

/// Builder for constructing Request objects.
///
/// `build` derives the cookie set and session id from the `Cookie` header.
pub struct RequestBuilder {
    method: Method,
    path: String,
    version: String,
    query_params: HashMap<String, String>,
    body_params: HashMap<String, String>,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl RequestBuilder {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: "HTTP/1.1".to_string(),
            query_params: HashMap::new(),
            body_params: HashMap::new(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a header; the name is lowercased and a repeated name replaces the
    /// earlier value.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn query_params(mut self, params: HashMap<String, String>) -> Self {
        self.query_params.extend(params);
        self
    }

    pub fn body_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body_params.insert(key.into(), value.into());
        self
    }

    pub fn body_params(mut self, params: HashMap<String, String>) -> Self {
        self.body_params.extend(params);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        let cookies: HashSet<String> = self
            .headers
            .get("cookie")
            .map(|raw| {
                raw.split("; ")
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let session_id = cookies.iter().find_map(|token| {
            token
                .split_once('=')
                .filter(|(name, _)| *name == SESSION_COOKIE)
                .map(|(_, value)| value.to_string())
        });

        Request {
            method: self.method,
            path: self.path,
            version: self.version,
            query_params: self.query_params,
            body_params: self.body_params,
            headers: self.headers,
            cookies,
            session_id,
            body: self.body,
            login: OnceLock::new(),
        }
    }
}

impl Request {
    pub fn builder(method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URI path with any query string removed.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Retrieves a header value by name, ignoring case.
    ///
    /// # Arguments
    ///
    /// * `key` - Header name to look up
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn body_param(&self, key: &str) -> Option<&str> {
        self.body_params.get(key).map(String::as_str)
    }

    pub fn body_params(&self) -> &HashMap<String, String> {
        &self.body_params
    }

    /// Looks a parameter up in the body first, then in the query string.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.body_param(key).or_else(|| self.query_param(key))
    }

    /// Raw `name=value` tokens from the `Cookie` header.
    pub fn cookies(&self) -> &HashSet<String> {
        &self.cookies
    }

    pub fn has_cookie(&self, token: &str) -> bool {
        self.cookies.contains(token)
    }

    /// Value of the `sid` cookie, if the client sent one.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns `None` if the header is missing or not a non-negative number.
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Records the outcome of a login attempt. Only the first call has an
    /// effect; returns `false` if the flag was already set.
    pub fn set_login(&self, logged_in: bool) -> bool {
        self.login.set(logged_in).is_ok()
    }

    /// Outcome of the login attempt made while handling this request, if any.
    pub fn login(&self) -> Option<bool> {
        self.login.get().copied()
    }
}
