//! `application/x-www-form-urlencoded` decoding, shared by query strings and
//! POST bodies.

use std::collections::HashMap;

use url::form_urlencoded;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decodes `k1=v1&k2=v2` into a map. Keys and values are percent-decoded, a
/// pair without `=` maps to the empty string and the last duplicate wins.
pub fn parse_form(input: &[u8]) -> HashMap<String, String> {
    form_urlencoded::parse(input).into_owned().collect()
}

/// Whether a `Content-Type` value denotes form-encoded data. Parameters such
/// as `; charset=utf-8` are ignored.
pub fn is_form_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}
