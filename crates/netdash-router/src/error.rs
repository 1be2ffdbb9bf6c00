/// Errors produced while loading or resolving routes
///
/// Resolution is deterministic, so none of these are retried: the caller of
/// the navigation API decides whether to fall back or propagate.
use thiserror::Error;

/// Structured error type for router operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No registered pattern matches the requested path
    #[error("no route matches path '{0}'")]
    NotFound(String),

    /// Programmatic navigation referenced a name that is not registered
    #[error("route '{0}' is not registered")]
    UnknownRoute(String),

    /// A named navigation omitted a required path parameter
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    /// A parameter value violates its constraint or its view contract
    #[error("parameter '{param}' of route '{route}' has invalid value '{value}'")]
    InvalidParam {
        route: String,
        param: String,
        value: String,
    },

    /// A route pattern could not be parsed
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Two routes share a name
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    /// Two routes share a path pattern
    #[error("duplicate route path '{path}' (routes '{first}' and '{second}')")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    /// A props-mode route binds a parameter its view does not accept
    #[error("view '{view}' of route '{route}' does not accept parameter '{param}'")]
    ContractMismatch {
        route: String,
        view: String,
        param: String,
    },

    /// A navigation guard cancelled the navigation
    #[error("navigation to '{target}' aborted: {reason}")]
    Aborted { target: String, reason: String },

    /// Redirects or guard redirections did not settle
    #[error("navigation to '{0}' exceeded the redirect limit")]
    RedirectLimit(String),
}

/// Type alias for router operation results
pub type RouteResult<T> = Result<T, RouteError>;

impl RouteError {
    /// Whether the error points at a broken internal link rather than user input
    ///
    /// ```
    /// use netdash_router::RouteError;
    ///
    /// assert!(RouteError::UnknownRoute("Nope".into()).is_programming_error());
    /// assert!(!RouteError::NotFound("/nope".into()).is_programming_error());
    /// ```
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            RouteError::UnknownRoute(_)
                | RouteError::MissingParam { .. }
                | RouteError::InvalidPattern { .. }
                | RouteError::DuplicateName(_)
                | RouteError::DuplicatePath { .. }
                | RouteError::ContractMismatch { .. }
        )
    }
}
