/// Path utilities for splitting, validation and normalization
///
/// All functions are pure: same input, same output, no side effects.
use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use netdash_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/servers"));
/// assert!(is_valid_path("/profile/42"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("servers"));
/// assert!(!is_valid_path("/servers/"));
/// assert!(!is_valid_path("/server//7"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalizes a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// ```
/// use netdash_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/devices"), Cow::Borrowed("/devices")));
/// assert_eq!(normalize_path("/devices/"), "/devices");
/// assert_eq!(normalize_path("server//7"), "/server/7");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits an in-app URL into `(path, query, hash)` without the `?` and `#` markers
///
/// ```
/// use netdash_router::path::split_url;
///
/// assert_eq!(split_url("/servers?sort=name#top"), ("/servers", "sort=name", "top"));
/// assert_eq!(split_url("/servers#a?b"), ("/servers", "", "a?b"));
/// assert_eq!(split_url("/login"), ("/login", "", ""));
/// ```
pub fn split_url(url: &str) -> (&str, &str, &str) {
    let (rest, hash) = url.split_once('#').unwrap_or((url, ""));
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    (path, query, hash)
}

/// Splits a path into percent-decoded, non-empty segments
///
/// Segments that are not valid UTF-8 once decoded are kept verbatim.
///
/// ```
/// use netdash_router::path::decode_segments;
///
/// let segments = decode_segments("/server//rack%201/");
/// assert_eq!(segments, vec!["server", "rack 1"]);
/// ```
pub fn decode_segments(path: &str) -> Vec<Cow<'_, str>> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).unwrap_or(Cow::Borrowed(s)))
        .collect()
}

/// Percent-encodes a value for use inside a single path segment
pub fn encode_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Parses a query string into ordered, decoded key/value pairs
///
/// `+` is read as a space; keys without `=` get an empty value.
///
/// ```
/// use netdash_router::path::parse_query;
///
/// let pairs = parse_query("q=core+switch&page=2&flag");
/// assert_eq!(pairs, vec![
///     ("q".to_string(), "core switch".to_string()),
///     ("page".to_string(), "2".to_string()),
///     ("flag".to_string(), String::new()),
/// ]);
/// ```
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Renders query pairs back into an encoded query string (no leading `?`)
pub fn format_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                urlencoding::encode(key).into_owned()
            } else {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/management"));
        assert!(is_valid_path("/server/7"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("management"));
        assert!(!is_valid_path("/management/"));
        assert!(!is_valid_path("/server//7"));
    }

    #[test]
    fn test_normalize_path_valid_is_borrowed() {
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
        assert!(matches!(normalize_path("/login"), Cow::Borrowed("/login")));
    }

    #[test]
    fn test_normalize_path_cleans_slashes() {
        assert_eq!(normalize_path("/profile/42/"), "/profile/42");
        assert_eq!(normalize_path("//profile///42"), "/profile/42");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_decode_segments_keeps_invalid_utf8_raw() {
        let segments = decode_segments("/a/%FF");
        assert_eq!(segments, vec!["a", "%FF"]);
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("rack 1/a"), "rack%201%2Fa");
        assert_eq!(encode_segment("plain"), "plain");
    }

    #[test]
    fn test_format_query() {
        let pairs = vec![
            ("q".to_string(), "a b".to_string()),
            ("flag".to_string(), String::new()),
        ];
        assert_eq!(format_query(&pairs), "q=a%20b&flag");
        assert_eq!(parse_query(&format_query(&pairs)), pairs);
    }
}
