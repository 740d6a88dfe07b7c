//! Content-Type lookup for static assets, keyed on file extension.

pub const DEFAULT_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Returns the content type served for `path`.
///
/// Only JavaScript and CSS get their own type; every other file, including
/// one without an extension, is served as UTF-8 HTML.
///
/// ```
/// # use webserver::http::mime::content_type_for;
/// assert_eq!(content_type_for("/css/styles.css"), "text/css");
/// assert_eq!(content_type_for("/index.html"), "text/html;charset=utf-8");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
