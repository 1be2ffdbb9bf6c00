/// Parameter constraints for `:name(constraint)` segments
///
/// Named constraints cover the common shapes; any other text is compiled as a
/// regular expression anchored to the whole segment.
use once_cell::sync::Lazy;
use regex::Regex;

static SLUG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid")
});

/// Validation rule attached to a route parameter
///
/// # Examples
///
/// ```
/// use netdash_router::ParameterConstraint;
///
/// let int = ParameterConstraint::parse("int").unwrap();
/// assert!(int.validate("42"));
/// assert!(!int.validate("abc"));
///
/// let custom = ParameterConstraint::parse(r"\d{3}").unwrap();
/// assert!(custom.validate("123"));
/// assert!(!custom.validate("1234"));
/// ```
#[derive(Debug, Clone)]
pub enum ParameterConstraint {
    /// Optional sign followed by ASCII digits
    Int,
    /// ASCII letters only
    Alpha,
    /// ASCII letters and digits
    AlphaNum,
    /// Lowercase words joined by single dashes
    Slug,
    /// Hyphenated or simple UUID
    Uuid,
    /// Anchored custom expression
    Pattern(Regex),
}

impl ParameterConstraint {
    /// Parses the text between the parentheses of `:name(...)`
    pub fn parse(spec: &str) -> Result<Self, regex::Error> {
        let constraint = match spec {
            "int" => ParameterConstraint::Int,
            "alpha" => ParameterConstraint::Alpha,
            "alphanum" => ParameterConstraint::AlphaNum,
            "slug" => ParameterConstraint::Slug,
            "uuid" => ParameterConstraint::Uuid,
            custom => ParameterConstraint::Pattern(Regex::new(&format!("^(?:{})$", custom))?),
        };
        Ok(constraint)
    }

    /// Checks a decoded segment value against this constraint
    pub fn validate(&self, value: &str) -> bool {
        match self {
            ParameterConstraint::Int => {
                let digits = value.strip_prefix('-').unwrap_or(value);
                !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
            }
            ParameterConstraint::Alpha => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
            }
            ParameterConstraint::AlphaNum => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
            }
            ParameterConstraint::Slug => SLUG.is_match(value),
            ParameterConstraint::Uuid => uuid::Uuid::parse_str(value).is_ok(),
            ParameterConstraint::Pattern(re) => re.is_match(value),
        }
    }

    /// Textual form as written in a pattern
    pub fn as_str(&self) -> &str {
        match self {
            ParameterConstraint::Int => "int",
            ParameterConstraint::Alpha => "alpha",
            ParameterConstraint::AlphaNum => "alphanum",
            ParameterConstraint::Slug => "slug",
            ParameterConstraint::Uuid => "uuid",
            // Strip the "^(?:" prefix and ")$" suffix added by `parse`
            ParameterConstraint::Pattern(re) => {
                let s = re.as_str();
                &s[4..s.len() - 2]
            }
        }
    }
}

impl PartialEq for ParameterConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
