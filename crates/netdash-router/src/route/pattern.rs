/// Segment classification for route patterns
///
/// Pure parsing of a single `/`-delimited pattern segment into a typed
/// segment. Same input, same output, no side effects.
use crate::ParameterConstraint;

/// One segment of a compiled route pattern
///
/// # Examples
///
/// ```
/// use netdash_router::route::pattern::{classify_segment, PatternSegment};
///
/// assert!(matches!(classify_segment("servers"), Ok(PatternSegment::Static(_))));
/// assert!(matches!(
///     classify_segment(":id"),
///     Ok(PatternSegment::Param { optional: false, .. })
/// ));
/// assert!(matches!(
///     classify_segment(":tab?"),
///     Ok(PatternSegment::Param { optional: true, .. })
/// ));
/// assert!(matches!(classify_segment("*rest"), Ok(PatternSegment::CatchAll(_))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegment {
    /// Literal text that must match exactly
    Static(String),
    /// Named parameter: `:id`, `:id?`, `:id(int)` or `:id(int)?`
    Param {
        name: String,
        constraint: Option<ParameterConstraint>,
        optional: bool,
    },
    /// Catch-all over the remaining segments: `*rest`
    CatchAll(String),
}

impl PatternSegment {
    /// Parameter name bound by this segment, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegment::Static(_) => None,
            PatternSegment::Param { name, .. } | PatternSegment::CatchAll(name) => Some(name.as_str()),
        }
    }

    /// Shape of the segment with the parameter name erased
    ///
    /// Two patterns with the same shape match exactly the same paths.
    pub fn shape(&self, case_insensitive: bool) -> String {
        match self {
            PatternSegment::Static(text) if case_insensitive => text.to_ascii_lowercase(),
            PatternSegment::Static(text) => text.clone(),
            PatternSegment::Param {
                constraint,
                optional,
                ..
            } => {
                let constraint = constraint
                    .as_ref()
                    .map(|c| format!("({})", c.as_str()))
                    .unwrap_or_default();
                let marker = if *optional { "?" } else { "" };
                format!(":{}{}", constraint, marker)
            }
            PatternSegment::CatchAll(_) => "*".to_string(),
        }
    }
}

/// Classifies a pattern segment
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Catch-all**: `*name`
/// 2. **Parameter**: `:name`, optionally followed by `(constraint)` and/or `?`
/// 3. **Static**: any other text
///
/// Returns the reason as text when the segment is malformed; the caller
/// attaches the full pattern.
pub fn classify_segment(segment: &str) -> Result<PatternSegment, String> {
    if let Some(name) = segment.strip_prefix('*') {
        validate_param_name(name)?;
        return Ok(PatternSegment::CatchAll(name.to_string()));
    }

    let Some(param) = segment.strip_prefix(':') else {
        return Ok(PatternSegment::Static(segment.to_string()));
    };

    let (param, optional) = match param.strip_suffix('?') {
        Some(rest) => (rest, true),
        None => (param, false),
    };

    let (name, constraint) = match param.split_once('(') {
        Some((name, rest)) => {
            let spec = rest
                .strip_suffix(')')
                .ok_or_else(|| format!("unclosed constraint in '{}'", segment))?;
            let constraint = ParameterConstraint::parse(spec)
                .map_err(|e| format!("bad constraint '{}': {}", spec, e))?;
            (name, Some(constraint))
        }
        None => (param, None),
    };

    validate_param_name(name)?;

    Ok(PatternSegment::Param {
        name: name.to_string(),
        constraint,
        optional,
    })
}

fn validate_param_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("parameter name is empty".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("parameter name '{}' has invalid characters", name));
    }
    Ok(())
}
