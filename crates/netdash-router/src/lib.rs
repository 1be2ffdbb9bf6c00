//! # Netdash Router
//!
//! Client-side route table for the netdash console with support for:
//! - Static routes (`/servers`)
//! - Dynamic parameters (`/profile/:id`)
//! - Constrained and optional parameters (`/server/:id(int)`, `/logs/:page?`)
//! - Catch-all routes (`/*rest`) for "not found" fallbacks
//! - Named routes and URL generation
//! - History navigation (web, hash, memory) with back/forward
//! - Typed view binding for props-mode routes
//!
//! The table is immutable once built. Resolution scans routes in
//! registration order and the first match wins.
//!
//! ## Example
//!
//! ```
//! use netdash_router::{ParamMap, Route, RouteTable};
//!
//! let table = RouteTable::new(vec![
//!     Route::new("Servers", "/servers"),
//!     Route::new("ServerInfo", "/server/:id").with_props(),
//! ])
//! .unwrap();
//!
//! let route_match = table.resolve_by_path("/server/7").unwrap();
//! assert_eq!(route_match.route.name, "ServerInfo");
//! assert_eq!(route_match.params.get("id"), Some(&"7".to_string()));
//!
//! let params = ParamMap::from([("id".to_string(), "7".to_string())]);
//! let (_, path) = table.resolve_by_name("ServerInfo", &params).unwrap();
//! assert_eq!(path, "/server/7");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod app;
pub mod config;
mod constraint;
mod error;
pub mod guard;
pub mod history;
pub mod navigation;
pub mod path;
pub mod route;
pub mod table;
pub mod view;

pub use constraint::ParameterConstraint;
pub use error::{RouteError, RouteResult};
pub use guard::{GuardDecision, NavigationGuard};
pub use history::{History, HistoryEntry, HistoryMode, Location};
pub use navigation::{
    NavigationId, NavigationOutcome, NavigationPhase, NavigationTarget, Navigator,
    NavigatorOptions,
};
pub use route::{parse_pattern, PatternSegment, RoutePattern};
pub use table::{RouteTable, RouteTableBuilder, TableOptions};
pub use view::{ParamKind, PropValue, Props, RenderHost, ViewContract, ViewRef, ViewRegistry};

/// Extracted path parameters, keyed by parameter name
pub type ParamMap = BTreeMap<String, String>;

// ============================================================================
// Core Types
// ============================================================================

/// A registered mapping from a path pattern to a view
///
/// `Route` is plain data. The compiled pattern lives in the `RouteTable`
/// that owns the route, and the view itself is built by the presentation
/// layer from `ViewRef`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Unique symbolic identifier used for programmatic navigation
    pub name: String,
    /// Pattern like "/profile/:id"
    pub path: String,
    /// What the route does once matched
    pub kind: RouteKind,
    /// Forward extracted params to the view as input properties
    pub props: bool,
    /// Free-form metadata (titles, breadcrumbs, ...)
    pub meta: BTreeMap<String, String>,
}

/// Behavior of a matched route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Render a view
    View(ViewRef),
    /// Send the navigation somewhere else
    Redirect(Redirect),
}

/// Redirect destination
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Redirect {
    /// Literal path; `:name` placeholders are filled from the matched params
    Path(String),
    /// Another named route, receiving the matched params
    Named(String),
}

impl Redirect {
    /// Builds the follow-up navigation target for a redirect
    ///
    /// ```
    /// use netdash_router::{NavigationTarget, ParamMap, Redirect};
    ///
    /// let params = ParamMap::from([("id".to_string(), "7".to_string())]);
    /// let target = Redirect::Path("/server/:id".into()).target(&params);
    /// assert_eq!(target, NavigationTarget::path("/server/7"));
    /// ```
    pub fn target(&self, params: &ParamMap) -> NavigationTarget {
        match self {
            Redirect::Path(to) => {
                let path = to
                    .split('/')
                    .flat_map(|segment| fill_segment(segment, params))
                    .collect::<Vec<_>>()
                    .join("/");
                NavigationTarget::path(path)
            }
            Redirect::Named(name) => NavigationTarget::named(name.clone(), params.clone()),
        }
    }
}

/// Substitutes one redirect segment; absent optional params drop the segment
fn fill_segment(segment: &str, params: &ParamMap) -> Vec<String> {
    let present = |name: &str| params.get(name).filter(|v| !v.is_empty());

    match route::classify_segment(segment) {
        Ok(PatternSegment::Param { name, optional, .. }) => match present(name.as_str()) {
            Some(value) => vec![path::encode_segment(value).into_owned()],
            None if optional => Vec::new(),
            None => vec![segment.to_string()],
        },
        Ok(PatternSegment::CatchAll(name)) => match present(name.as_str()) {
            Some(value) => value
                .split('/')
                .filter(|s| !s.is_empty())
                .map(|s| path::encode_segment(s).into_owned())
                .collect(),
            None => vec![segment.to_string()],
        },
        _ => vec![segment.to_string()],
    }
}

/// Result of matching a path against the table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    /// The matched route
    pub route: &'a Route,
    /// Extracted parameters from the path
    pub params: ParamMap,
}

// ============================================================================
// Route Builder Methods
// ============================================================================

impl Route {
    /// Creates a view route; the view defaults to one named after the route
    ///
    /// # Examples
    ///
    /// ```
    /// use netdash_router::{Route, ViewRef};
    ///
    /// let route = Route::new("Profile", "/profile/:id").with_props();
    /// assert_eq!(route.view(), Some(&ViewRef::new("Profile")));
    /// assert!(route.props);
    /// ```
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        Route {
            kind: RouteKind::View(ViewRef::new(name.clone())),
            name,
            path: path.into(),
            props: false,
            meta: BTreeMap::new(),
        }
    }

    /// Creates a redirect route
    ///
    /// ```
    /// use netdash_router::{Redirect, Route};
    ///
    /// let route = Route::redirect("Home", "/home", Redirect::Named("Summary".into()));
    /// assert!(route.is_redirect());
    /// assert_eq!(route.view(), None);
    /// ```
    pub fn redirect(name: impl Into<String>, path: impl Into<String>, to: Redirect) -> Self {
        Route {
            name: name.into(),
            path: path.into(),
            kind: RouteKind::Redirect(to),
            props: false,
            meta: BTreeMap::new(),
        }
    }

    /// Renders a different view than the one named after the route
    pub fn with_view(mut self, view: impl Into<ViewRef>) -> Self {
        self.kind = RouteKind::View(view.into());
        self
    }

    /// Forwards extracted params to the view as input properties
    pub fn with_props(self) -> Self {
        self.with_props_mode(true)
    }

    pub fn with_props_mode(mut self, props: bool) -> Self {
        self.props = props;
        self
    }

    /// Sets a metadata key-value pair
    ///
    /// ```
    /// use netdash_router::Route;
    ///
    /// let route = Route::new("Devices", "/devices").with_meta("title", "Devices");
    /// assert_eq!(route.meta.get("title").map(String::as_str), Some("Devices"));
    /// ```
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// The view rendered by this route, `None` for redirects
    pub fn view(&self) -> Option<&ViewRef> {
        match &self.kind {
            RouteKind::View(view) => Some(view),
            RouteKind::Redirect(_) => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.kind, RouteKind::Redirect(_))
    }
}
