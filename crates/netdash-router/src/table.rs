/// Immutable route table and the path/name resolver
///
/// The table keeps routes in registration order. Resolution is a linear scan
/// with first-match-wins, so earlier routes shadow later ones that could
/// match the same path.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RouteError, RouteResult};
use crate::path::{decode_segments, is_valid_path, split_url};
use crate::route::{parse_pattern, RoutePattern};
use crate::{ParamMap, Route, RouteMatch};

/// Matching options fixed at table construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Compare literal segments ignoring ASCII case
    #[serde(default)]
    pub case_insensitive: bool,
    /// Reject paths with trailing or doubled slashes instead of ignoring them
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    route: Route,
    pattern: RoutePattern,
}

/// Validated, immutable list of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
    options: TableOptions,
}

impl RouteTable {
    /// Builds a table with default options, validating every route
    ///
    /// Fails with `InvalidPattern`, `DuplicateName` or `DuplicatePath`.
    ///
    /// ```
    /// use netdash_router::{Route, RouteError, RouteTable};
    ///
    /// let err = RouteTable::new(vec![
    ///     Route::new("Servers", "/servers"),
    ///     Route::new("Servers", "/devices"),
    /// ])
    /// .unwrap_err();
    /// assert_eq!(err, RouteError::DuplicateName("Servers".into()));
    /// ```
    pub fn new(routes: impl IntoIterator<Item = Route>) -> RouteResult<Self> {
        Self::with_options(routes, TableOptions::default())
    }

    pub fn with_options(
        routes: impl IntoIterator<Item = Route>,
        options: TableOptions,
    ) -> RouteResult<Self> {
        let mut entries = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_shape: HashMap<String, String> = HashMap::new();

        for route in routes {
            let pattern = parse_pattern(&route.path)?;

            if by_name.contains_key(&route.name) {
                return Err(RouteError::DuplicateName(route.name));
            }

            let shape = pattern.shape(options.case_insensitive);
            if let Some(first) = by_shape.get(&shape) {
                return Err(RouteError::DuplicatePath {
                    path: route.path.clone(),
                    first: first.clone(),
                    second: route.name,
                });
            }

            by_shape.insert(shape, route.name.clone());
            by_name.insert(route.name.clone(), entries.len());
            entries.push(Entry { route, pattern });
        }

        tracing::debug!(routes = entries.len(), ?options, "route table loaded");

        Ok(Self {
            entries,
            by_name,
            options,
        })
    }

    /// Starts a builder for a table
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Resolves a requested path to the first matching route
    ///
    /// Any `?query` or `#hash` suffix is ignored. Parameter values are
    /// percent-decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use netdash_router::{Route, RouteError, RouteTable};
    ///
    /// let table = RouteTable::new(vec![Route::new("Profile", "/profile/:id").with_props()]).unwrap();
    ///
    /// let m = table.resolve_by_path("/profile/42?tab=keys").unwrap();
    /// assert_eq!(m.route.name, "Profile");
    /// assert_eq!(m.params["id"], "42");
    ///
    /// assert_eq!(
    ///     table.resolve_by_path("/nonexistent").unwrap_err(),
    ///     RouteError::NotFound("/nonexistent".into())
    /// );
    /// ```
    pub fn resolve_by_path(&self, path: &str) -> RouteResult<RouteMatch<'_>> {
        let (path_only, _, _) = split_url(path);

        if self.options.strict && !is_valid_path(path_only) {
            tracing::debug!(path, "strict table rejects non-canonical path");
            return Err(RouteError::NotFound(path.to_string()));
        }

        let segments = decode_segments(path_only);

        let found = self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .match_segments(&segments, self.options.case_insensitive)
                .map(|params| RouteMatch {
                    route: &entry.route,
                    params,
                })
        });

        match found {
            Some(route_match) => {
                tracing::debug!(path, route = %route_match.route.name, "path resolved");
                Ok(route_match)
            }
            None => Err(RouteError::NotFound(path.to_string())),
        }
    }

    /// Resolves a route name and parameters to the route and a concrete path
    ///
    /// ```
    /// use netdash_router::{ParamMap, Route, RouteError, RouteTable};
    ///
    /// let table = RouteTable::new(vec![Route::new("ServerInfo", "/server/:id").with_props()]).unwrap();
    ///
    /// let params = ParamMap::from([("id".to_string(), "7".to_string())]);
    /// let (route, path) = table.resolve_by_name("ServerInfo", &params).unwrap();
    /// assert_eq!((route.name.as_str(), path.as_str()), ("ServerInfo", "/server/7"));
    ///
    /// assert!(matches!(
    ///     table.resolve_by_name("ServerInfo", &ParamMap::new()),
    ///     Err(RouteError::MissingParam { .. })
    /// ));
    /// ```
    pub fn resolve_by_name(&self, name: &str, params: &ParamMap) -> RouteResult<(&Route, String)> {
        let entry = self
            .by_name
            .get(name)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let known = entry.pattern.param_names();
        for extra in params.keys().filter(|k| !known.contains(&k.as_str())) {
            tracing::debug!(route = name, param = %extra, "ignoring unused parameter");
        }

        let path = entry.pattern.build(name, params)?;
        Ok((&entry.route, path))
    }

    /// Looks up a route by name
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.entries[idx].route)
    }

    /// Compiled pattern of a named route
    pub fn pattern(&self, name: &str) -> Option<&RoutePattern> {
        self.by_name.get(name).map(|&idx| &self.entries[idx].pattern)
    }

    /// Routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|e| &e.route)
    }

    /// Routes with their compiled patterns, in registration order
    pub fn entries(&self) -> impl Iterator<Item = (&Route, &RoutePattern)> {
        self.entries.iter().map(|e| (&e.route, &e.pattern))
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Chainable builder for `RouteTable`
///
/// ```
/// use netdash_router::{Route, RouteTable};
///
/// let table = RouteTable::builder()
///     .with_route(Route::new("Login", "/login"))
///     .with_route(Route::new("Summary", "/"))
///     .with_case_insensitive(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.resolve_by_path("/LOGIN").unwrap().route.name, "Login");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    options: TableOptions,
}

impl RouteTableBuilder {
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        self.routes.extend(routes);
        self
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.options.case_insensitive = case_insensitive;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn build(self) -> RouteResult<RouteTable> {
        RouteTable::with_options(self.routes, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Redirect;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::new("Servers", "/servers"),
            Route::new("ServerNew", "/server/new"),
            Route::new("ServerInfo", "/server/:id").with_props(),
            Route::new("Profile", "/profile/:id").with_props(),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let table = table();
        assert_eq!(table.resolve_by_path("/server/new").unwrap().route.name, "ServerNew");
        assert_eq!(table.resolve_by_path("/server/9").unwrap().route.name, "ServerInfo");
    }

    #[test]
    fn test_registration_order_beats_specificity() {
        let table = RouteTable::new(vec![
            Route::new("ServerInfo", "/server/:id"),
            Route::new("ServerNew", "/server/new"),
        ])
        .unwrap();
        assert_eq!(table.resolve_by_path("/server/new").unwrap().route.name, "ServerInfo");
    }

    #[test]
    fn test_trailing_slash_tolerated_by_default() {
        assert_eq!(table().resolve_by_path("/servers/").unwrap().route.name, "Servers");
    }

    #[test]
    fn test_strict_rejects_trailing_slash() {
        let table = RouteTable::builder()
            .with_route(Route::new("Servers", "/servers"))
            .with_strict(true)
            .build()
            .unwrap();
        assert!(table.resolve_by_path("/servers").is_ok());
        assert_eq!(
            table.resolve_by_path("/servers/").unwrap_err(),
            RouteError::NotFound("/servers/".to_string())
        );
    }

    #[test]
    fn test_case_sensitive_by_default() {
        assert!(table().resolve_by_path("/SERVERS").is_err());
    }

    #[test]
    fn test_duplicate_path_detected_across_param_names() {
        let err = RouteTable::new(vec![
            Route::new("A", "/server/:id"),
            Route::new("B", "/server/:serial"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicatePath {
                path: "/server/:serial".to_string(),
                first: "A".to_string(),
                second: "B".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_path_respects_case_folding() {
        let routes = vec![Route::new("A", "/Servers"), Route::new("B", "/servers")];
        assert!(RouteTable::new(routes.clone()).is_ok());
        assert!(RouteTable::builder()
            .with_routes(routes)
            .with_case_insensitive(true)
            .build()
            .is_err());
    }

    #[test]
    fn test_case_folding_agrees_with_matching() {
        let table = RouteTable::builder()
            .with_route(Route::new("Upper", "/Émission"))
            .with_route(Route::new("Lower", "/émission"))
            .with_case_insensitive(true)
            .build()
            .unwrap();
        assert_eq!(table.resolve_by_path("/%C3%A9mission").unwrap().route.name, "Lower");
        assert_eq!(table.resolve_by_path("/%C3%89mission").unwrap().route.name, "Upper");
    }

    #[test]
    fn test_invalid_pattern_rejected_at_load() {
        let err = RouteTable::new(vec![Route::new("Bad", "servers")]).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(
            table().resolve_by_name("Nope", &ParamMap::new()).unwrap_err(),
            RouteError::UnknownRoute("Nope".to_string())
        );
    }

    #[test]
    fn test_resolve_by_name_ignores_extra_params() {
        let params = ParamMap::from([
            ("id".to_string(), "3".to_string()),
            ("tab".to_string(), "ports".to_string()),
        ]);
        let (_, path) = table().resolve_by_name("ServerInfo", &params).unwrap();
        assert_eq!(path, "/server/3");
    }

    #[test]
    fn test_lookup_helpers() {
        let table = RouteTable::new(vec![
            Route::new("Summary", "/"),
            Route::redirect("Home", "/home", Redirect::Named("Summary".to_string())),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(table.get("Home").unwrap().is_redirect());
        assert_eq!(table.pattern("Summary").unwrap().source(), "/");
        let names: Vec<&str> = table.routes().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Summary", "Home"]);
    }
}
