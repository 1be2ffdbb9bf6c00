/// Pre-navigation guard hook
///
/// Guards see the resolved destination before anything is mounted and can
/// let it through, send the navigation elsewhere, or cancel it.
use crate::navigation::NavigationTarget;
use crate::{Location, ParamMap, Route};

/// What a guard decided about a pending navigation
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Proceed,
    Redirect(NavigationTarget),
    Abort(String),
}

/// A resolved destination as presented to guards
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    pub route: &'a Route,
    pub params: &'a ParamMap,
    pub location: &'a Location,
}

/// Hook run before every navigation, in registration order
///
/// `from` is `None` for the first navigation of a session.
///
/// # Examples
///
/// ```
/// use netdash_router::guard::{GuardContext, GuardDecision, NavigationGuard};
/// use netdash_router::NavigationTarget;
///
/// struct RequireSession {
///     signed_in: bool,
/// }
///
/// impl NavigationGuard for RequireSession {
///     fn check(&self, to: &GuardContext<'_>, _from: Option<&GuardContext<'_>>) -> GuardDecision {
///         let public = matches!(to.route.name.as_str(), "Login" | "Register");
///         if public || self.signed_in {
///             GuardDecision::Proceed
///         } else {
///             GuardDecision::Redirect(NavigationTarget::path("/login"))
///         }
///     }
/// }
/// ```
pub trait NavigationGuard {
    fn check(&self, to: &GuardContext<'_>, from: Option<&GuardContext<'_>>) -> GuardDecision;
}

/// Guard backed by a closure, see [`guard_fn`]
pub struct FnGuard<F>(F);

/// Wraps a closure as a guard
///
/// ```
/// use netdash_router::guard::{guard_fn, GuardDecision};
///
/// let no_management = guard_fn(|to, _from| {
///     if to.route.name == "Management" {
///         GuardDecision::Abort("read-only session".to_string())
///     } else {
///         GuardDecision::Proceed
///     }
/// });
/// # let _ = no_management;
/// ```
pub fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&GuardContext<'_>, Option<&GuardContext<'_>>) -> GuardDecision,
{
    FnGuard(f)
}

impl<F> NavigationGuard for FnGuard<F>
where
    F: Fn(&GuardContext<'_>, Option<&GuardContext<'_>>) -> GuardDecision,
{
    fn check(&self, to: &GuardContext<'_>, from: Option<&GuardContext<'_>>) -> GuardDecision {
        (self.0)(to, from)
    }
}
