/// Pattern compilation, URL generation and path matching
///
/// A `RoutePattern` is the compiled form of a route's `path` string. It is
/// built once when the table loads and never changes afterwards.
use std::borrow::Cow;
use std::collections::HashSet;

use super::pattern::{classify_segment, PatternSegment};
use crate::error::{RouteError, RouteResult};
use crate::path::encode_segment;
use crate::ParamMap;

/// Compiled route pattern
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<PatternSegment>,
}

/// Fold accumulator for pattern parsing
#[derive(Default)]
struct ParseState {
    segments: Vec<PatternSegment>,
    names: HashSet<String>,
    closed: bool,
}

impl ParseState {
    fn push(mut self, segment: PatternSegment) -> Result<Self, String> {
        if self.closed {
            return Err("catch-all must be the last segment".to_string());
        }

        if let Some(name) = segment.param_name() {
            if !self.names.insert(name.to_string()) {
                return Err(format!("parameter '{}' appears twice", name));
            }
        }

        self.closed = matches!(segment, PatternSegment::CatchAll(_));
        self.segments.push(segment);
        Ok(self)
    }
}

/// Parses a route path pattern
///
/// # Examples
///
/// ```
/// use netdash_router::route::parser::parse_pattern;
///
/// let pattern = parse_pattern("/profile/:id").unwrap();
/// assert_eq!(pattern.param_names(), vec!["id"]);
///
/// let root = parse_pattern("/").unwrap();
/// assert!(root.segments().is_empty());
///
/// assert!(parse_pattern("profile").is_err());
/// assert!(parse_pattern("/a/*rest/b").is_err());
/// ```
pub fn parse_pattern(source: &str) -> RouteResult<RoutePattern> {
    let invalid = |reason: String| RouteError::InvalidPattern {
        pattern: source.to_string(),
        reason,
    };

    if !source.starts_with('/') {
        return Err(invalid("pattern must start with '/'".to_string()));
    }

    let state = source
        .split('/')
        .filter(|s| !s.is_empty())
        .try_fold(ParseState::default(), |state, raw| {
            state.push(classify_segment(raw)?)
        })
        .map_err(invalid)?;

    Ok(RoutePattern {
        source: source.to_string(),
        segments: state.segments,
    })
}

impl RoutePattern {
    /// The pattern as written
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// All parameter names in positional order
    pub fn param_names(&self) -> Vec<&str> {
        self.segments.iter().filter_map(|s| s.param_name()).collect()
    }

    /// Names of parameters that must be present to build a URL
    pub fn required_params(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                PatternSegment::Param {
                    name,
                    optional: false,
                    ..
                }
                | PatternSegment::CatchAll(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Canonical form with parameter names erased, used for duplicate detection
    pub fn shape(&self, case_insensitive: bool) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|s| s.shape(case_insensitive))
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Matches decoded path segments against this pattern
    ///
    /// Optional parameters are tried consumed first, then skipped.
    pub fn match_segments(
        &self,
        path_segments: &[Cow<'_, str>],
        case_insensitive: bool,
    ) -> Option<ParamMap> {
        match_from(&self.segments, path_segments, ParamMap::new(), case_insensitive)
    }

    /// Generates a concrete path by substituting parameters
    ///
    /// Values are percent-encoded. Required parameters that are absent or
    /// empty fail with `MissingParam`; values that violate a constraint fail
    /// with `InvalidParam`.
    pub fn build(&self, route: &str, params: &ParamMap) -> RouteResult<String> {
        let missing = |param: &str| RouteError::MissingParam {
            route: route.to_string(),
            param: param.to_string(),
        };

        let mut parts: Vec<String> = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                PatternSegment::Static(text) => parts.push(text.clone()),
                PatternSegment::Param {
                    name,
                    constraint,
                    optional,
                } => match params.get(name).filter(|v| !v.is_empty()) {
                    Some(value) => {
                        if let Some(c) = constraint {
                            if !c.validate(value) {
                                return Err(RouteError::InvalidParam {
                                    route: route.to_string(),
                                    param: name.clone(),
                                    value: value.clone(),
                                });
                            }
                        }
                        parts.push(encode_segment(value).into_owned());
                    }
                    None if *optional => {}
                    None => return Err(missing(name)),
                },
                PatternSegment::CatchAll(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| v.split('/').any(|s| !s.is_empty()))
                        .ok_or_else(|| missing(name))?;
                    parts.extend(
                        value
                            .split('/')
                            .filter(|s| !s.is_empty())
                            .map(|s| encode_segment(s).into_owned()),
                    );
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }
}

fn segment_eq(pattern: &str, actual: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        pattern.eq_ignore_ascii_case(actual)
    } else {
        pattern == actual
    }
}

fn match_from(
    pattern: &[PatternSegment],
    path: &[Cow<'_, str>],
    mut params: ParamMap,
    case_insensitive: bool,
) -> Option<ParamMap> {
    let Some((head, rest)) = pattern.split_first() else {
        // Consumed the whole pattern: success only if the path is consumed too
        return path.is_empty().then_some(params);
    };

    match head {
        PatternSegment::CatchAll(name) => {
            if path.is_empty() {
                return None;
            }
            let joined = path.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join("/");
            params.insert(name.clone(), joined);
            Some(params)
        }
        PatternSegment::Param {
            name,
            constraint,
            optional,
        } => {
            let consumed = path.split_first().and_then(|(value, remaining)| {
                let valid = constraint.as_ref().map_or(true, |c| c.validate(value));
                if !valid {
                    return None;
                }
                let mut with_value = params.clone();
                with_value.insert(name.clone(), value.to_string());
                match_from(rest, remaining, with_value, case_insensitive)
            });

            match consumed {
                Some(found) => Some(found),
                None if *optional => match_from(rest, path, params, case_insensitive),
                None => None,
            }
        }
        PatternSegment::Static(text) => {
            let (value, remaining) = path.split_first()?;
            if !segment_eq(text, value, case_insensitive) {
                return None;
            }
            match_from(rest, remaining, params, case_insensitive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::decode_segments;

    fn params(pairs: &[(&str, &str)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn matches(pattern: &str, path: &str) -> Option<ParamMap> {
        parse_pattern(pattern)
            .unwrap()
            .match_segments(&decode_segments(path), false)
    }

    #[test]
    fn test_parse_rejects_duplicate_params() {
        let err = parse_pattern("/a/:id/b/:id").unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_required_params() {
        let pattern = parse_pattern("/logs/:device/:page(int)?/*rest").unwrap();
        assert_eq!(pattern.param_names(), vec!["device", "page", "rest"]);
        assert_eq!(pattern.required_params(), vec!["device", "rest"]);
    }

    #[test]
    fn test_shape() {
        assert_eq!(parse_pattern("/").unwrap().shape(false), "/");
        assert_eq!(
            parse_pattern("/server/:id").unwrap().shape(false),
            parse_pattern("/server/:name").unwrap().shape(false)
        );
    }

    #[test]
    fn test_match_static_and_root() {
        assert_eq!(matches("/", "/"), Some(ParamMap::new()));
        assert_eq!(matches("/servers", "/servers"), Some(ParamMap::new()));
        assert_eq!(matches("/servers", "/devices"), None);
        assert_eq!(matches("/servers", "/servers/1"), None);
        assert_eq!(matches("/", "/servers"), None);
    }

    #[test]
    fn test_match_param() {
        assert_eq!(matches("/profile/:id", "/profile/42"), Some(params(&[("id", "42")])));
        assert_eq!(matches("/profile/:id", "/profile"), None);
    }

    #[test]
    fn test_match_decodes_values() {
        assert_eq!(
            matches("/server/:id", "/server/rack%201"),
            Some(params(&[("id", "rack 1")]))
        );
    }

    #[test]
    fn test_match_constraint() {
        assert!(matches("/server/:id(int)", "/server/7").is_some());
        assert!(matches("/server/:id(int)", "/server/seven").is_none());
    }

    #[test]
    fn test_match_optional_backtracks() {
        assert_eq!(
            matches("/logs/:page?/raw", "/logs/raw"),
            Some(ParamMap::new())
        );
        assert_eq!(
            matches("/logs/:page?/raw", "/logs/3/raw"),
            Some(params(&[("page", "3")]))
        );
        assert_eq!(matches("/logs/:page?", "/logs"), Some(ParamMap::new()));
    }

    #[test]
    fn test_match_catch_all() {
        assert_eq!(
            matches("/files/*rest", "/files/etc/hosts"),
            Some(params(&[("rest", "etc/hosts")]))
        );
        assert_eq!(matches("/files/*rest", "/files"), None);
    }

    #[test]
    fn test_match_case_insensitive() {
        let pattern = parse_pattern("/Servers").unwrap();
        assert!(pattern.match_segments(&decode_segments("/servers"), true).is_some());
        assert!(pattern.match_segments(&decode_segments("/servers"), false).is_none());
    }

    #[test]
    fn test_build() {
        let pattern = parse_pattern("/server/:id").unwrap();
        assert_eq!(pattern.build("ServerInfo", &params(&[("id", "7")])).unwrap(), "/server/7");
        assert_eq!(
            pattern.build("ServerInfo", &params(&[("id", "rack 1")])).unwrap(),
            "/server/rack%201"
        );
        assert_eq!(parse_pattern("/").unwrap().build("Summary", &ParamMap::new()).unwrap(), "/");
    }

    #[test]
    fn test_build_missing_and_empty() {
        let pattern = parse_pattern("/server/:id").unwrap();
        let expected = RouteError::MissingParam {
            route: "ServerInfo".to_string(),
            param: "id".to_string(),
        };
        assert_eq!(pattern.build("ServerInfo", &ParamMap::new()), Err(expected.clone()));
        assert_eq!(pattern.build("ServerInfo", &params(&[("id", "")])), Err(expected));
    }

    #[test]
    fn test_build_optional_and_catch_all() {
        let pattern = parse_pattern("/logs/:page?/*rest").unwrap();
        assert_eq!(
            pattern.build("Logs", &params(&[("rest", "a/b")])).unwrap(),
            "/logs/a/b"
        );
        assert_eq!(
            pattern
                .build("Logs", &params(&[("page", "2"), ("rest", "a")]))
                .unwrap(),
            "/logs/2/a"
        );
    }

    #[test]
    fn test_build_rejects_constraint_violation() {
        let pattern = parse_pattern("/server/:id(int)").unwrap();
        let err = pattern.build("ServerInfo", &params(&[("id", "x")])).unwrap_err();
        assert!(matches!(err, RouteError::InvalidParam { .. }));
    }
}
