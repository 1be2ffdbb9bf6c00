/// Navigation: turning a target into a mounted view
///
/// A navigation runs `Idle → Resolving → (Rendered | Failed) → Idle`. It
/// resolves the target against the immutable table, follows redirects, runs
/// guards, binds props, records history and finally swaps the view on the
/// render host. Everything happens synchronously on the caller's thread.
use std::fmt;

use serde::Serialize;

use crate::error::{RouteError, RouteResult};
use crate::guard::{GuardContext, GuardDecision, NavigationGuard};
use crate::history::{History, HistoryEntry, HistoryMode, Location};
use crate::path::{format_query, normalize_path};
use crate::table::RouteTable;
use crate::view::{Props, RenderHost, ViewRef, ViewRegistry};
use crate::{ParamMap, Route, RouteKind};

/// Maximum redirect or guard-redirect hops for a single navigation
pub const MAX_REDIRECTS: usize = 10;

/// Sequence number of a navigation request
///
/// Views that load data asynchronously keep the id they were mounted with
/// and check `Navigator::is_current` before applying results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NavigationId(pub u64);

impl fmt::Display for NavigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a navigation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavigationPhase {
    Idle,
    Resolving,
    Rendered,
    Failed,
}

/// Destination of a navigation request
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationTarget {
    /// In-app URL, optionally with `?query` and `#hash`
    Path(String),
    /// Named route with parameters
    Named {
        name: String,
        params: ParamMap,
        query: Vec<(String, String)>,
    },
}

impl NavigationTarget {
    pub fn path(path: impl Into<String>) -> Self {
        NavigationTarget::Path(path.into())
    }

    pub fn named(name: impl Into<String>, params: ParamMap) -> Self {
        NavigationTarget::Named {
            name: name.into(),
            params,
            query: Vec::new(),
        }
    }

    /// A leading `/` means a path, anything else a route name
    ///
    /// ```
    /// use netdash_router::{NavigationTarget, ParamMap};
    ///
    /// assert_eq!(
    ///     NavigationTarget::parse("/servers", ParamMap::new()),
    ///     NavigationTarget::path("/servers")
    /// );
    /// assert_eq!(
    ///     NavigationTarget::parse("Servers", ParamMap::new()),
    ///     NavigationTarget::named("Servers", ParamMap::new())
    /// );
    /// ```
    pub fn parse(name_or_path: &str, params: ParamMap) -> Self {
        if name_or_path.starts_with('/') {
            NavigationTarget::path(name_or_path)
        } else {
            NavigationTarget::named(name_or_path, params)
        }
    }

    /// Adds a query pair to the target
    pub fn with_query(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (key.into(), value.into());
        match self {
            NavigationTarget::Path(url) => {
                let mut location = Location::parse(&url);
                location.query.push(pair);
                NavigationTarget::Path(location.full_path())
            }
            NavigationTarget::Named {
                name,
                params,
                mut query,
            } => {
                query.push(pair);
                NavigationTarget::Named {
                    name,
                    params,
                    query,
                }
            }
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(name_or_path: &str) -> Self {
        NavigationTarget::parse(name_or_path, ParamMap::new())
    }
}

impl From<String> for NavigationTarget {
    fn from(name_or_path: String) -> Self {
        NavigationTarget::parse(&name_or_path, ParamMap::new())
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Path(url) => f.write_str(url),
            NavigationTarget::Named { name, query, .. } if query.is_empty() => f.write_str(name),
            NavigationTarget::Named { name, query, .. } => {
                write!(f, "{}?{}", name, format_query(query))
            }
        }
    }
}

/// Navigator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorOptions {
    pub mode: HistoryMode,
    pub max_history: usize,
    /// Route rendered when a path matches nothing; the URL is kept
    pub fallback: Option<String>,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            mode: HistoryMode::default(),
            max_history: 50,
            fallback: None,
        }
    }
}

/// Result of a completed navigation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationOutcome {
    pub id: NavigationId,
    pub route: String,
    pub view: ViewRef,
    pub params: ParamMap,
    pub props: Props,
    pub location: Location,
    pub href: String,
    /// The target was already current; nothing was mounted or recorded
    pub duplicate: bool,
}

#[derive(Debug, Clone, Copy)]
enum HistoryAction {
    Push,
    Replace,
    Traverse(isize),
}

/// A target resolved against the table
struct Resolved<'a> {
    route: &'a Route,
    params: ParamMap,
    location: Location,
}

/// A resolved view route that passed every guard
struct Settled<'a> {
    route: &'a Route,
    view: &'a ViewRef,
    params: ParamMap,
    location: Location,
}

#[derive(Debug, Clone)]
struct Current {
    id: NavigationId,
    route: String,
    view: ViewRef,
    params: ParamMap,
    location: Location,
}

/// Owns the current-route pointer and history for one application session
///
/// # Examples
///
/// ```
/// use netdash_router::{Navigator, Props, RenderHost, Route, RouteTable, ViewRef};
///
/// #[derive(Default)]
/// struct Screen {
///     mounted: Option<String>,
/// }
///
/// impl RenderHost for Screen {
///     fn mount(&mut self, view: &ViewRef, _props: &Props) {
///         self.mounted = Some(view.to_string());
///     }
///     fn unmount(&mut self, _view: &ViewRef) {
///         self.mounted = None;
///     }
/// }
///
/// let table = RouteTable::new(vec![
///     Route::new("Summary", "/"),
///     Route::new("Devices", "/devices"),
/// ])
/// .unwrap();
///
/// let mut nav = Navigator::new(&table, Screen::default());
/// nav.navigate("/").unwrap();
/// nav.navigate("Devices").unwrap();
/// assert_eq!(nav.host().mounted.as_deref(), Some("Devices"));
///
/// nav.back().unwrap();
/// assert_eq!(nav.current_route().unwrap().name, "Summary");
/// ```
pub struct Navigator<'a, H: RenderHost> {
    table: &'a RouteTable,
    views: ViewRegistry,
    guards: Vec<Box<dyn NavigationGuard + 'a>>,
    host: H,
    options: NavigatorOptions,
    history: History,
    current: Option<Current>,
    phase: NavigationPhase,
    last_id: u64,
}

impl<'a, H: RenderHost> Navigator<'a, H> {
    /// Creates a navigator with default options and no current route
    pub fn new(table: &'a RouteTable, host: H) -> Self {
        let options = NavigatorOptions::default();
        Self {
            table,
            views: ViewRegistry::new(),
            guards: Vec::new(),
            host,
            history: History::new(options.max_history),
            options,
            current: None,
            phase: NavigationPhase::Idle,
            last_id: 0,
        }
    }

    /// Replaces the options; resets the history stack
    pub fn with_options(mut self, options: NavigatorOptions) -> Self {
        self.history = History::new(options.max_history);
        self.options = options;
        self
    }

    pub fn with_views(mut self, views: ViewRegistry) -> Self {
        self.views = views;
        self
    }

    pub fn with_guard(mut self, guard: impl NavigationGuard + 'a) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Navigates to a target and pushes a history entry
    pub fn navigate(&mut self, target: impl Into<NavigationTarget>) -> RouteResult<NavigationOutcome> {
        self.run(target.into(), HistoryAction::Push)
    }

    /// Navigation API: a route name with params, or a path
    pub fn navigate_to(
        &mut self,
        name_or_path: &str,
        params: ParamMap,
    ) -> RouteResult<NavigationOutcome> {
        self.navigate(NavigationTarget::parse(name_or_path, params))
    }

    /// Navigates without adding a history entry
    pub fn replace(&mut self, target: impl Into<NavigationTarget>) -> RouteResult<NavigationOutcome> {
        self.run(target.into(), HistoryAction::Replace)
    }

    /// Steps back one entry; `Ok(None)` when there is nothing behind
    pub fn back(&mut self) -> RouteResult<Option<NavigationOutcome>> {
        self.go(-1)
    }

    /// Steps forward one entry; `Ok(None)` when there is nothing ahead
    pub fn forward(&mut self) -> RouteResult<Option<NavigationOutcome>> {
        self.go(1)
    }

    /// Moves `delta` entries through history and re-renders that location
    pub fn go(&mut self, delta: isize) -> RouteResult<Option<NavigationOutcome>> {
        let Some(entry) = self.history.peek(delta) else {
            tracing::debug!(delta, "no history entry to traverse to");
            return Ok(None);
        };
        let target = NavigationTarget::Path(entry.location.full_path());
        self.run(target, HistoryAction::Traverse(delta)).map(Some)
    }

    /// Resolves a target to its URL without navigating
    pub fn href_for(&self, target: impl Into<NavigationTarget>) -> RouteResult<String> {
        let resolved = self.resolve(&target.into())?;
        Ok(self.options.mode.href(&resolved.location))
    }

    /// Query API: the route currently displayed
    pub fn current_route(&self) -> Option<&'a Route> {
        let table = self.table;
        self.current.as_ref().and_then(|c| table.get(&c.route))
    }

    /// Parameters of the current route, whatever its props mode
    pub fn current_params(&self) -> Option<&ParamMap> {
        self.current.as_ref().map(|c| &c.params)
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current.as_ref().map(|c| &c.location)
    }

    pub fn current_view(&self) -> Option<&ViewRef> {
        self.current.as_ref().map(|c| &c.view)
    }

    /// URL of the current location under the configured history mode
    pub fn current_href(&self) -> Option<String> {
        self.current_location().map(|loc| self.options.mode.href(loc))
    }

    pub fn current_id(&self) -> Option<NavigationId> {
        self.current.as_ref().map(|c| c.id)
    }

    /// Whether `id` still owns the displayed view
    pub fn is_current(&self, id: NavigationId) -> bool {
        self.current_id() == Some(id)
    }

    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn table(&self) -> &'a RouteTable {
        self.table
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn run(&mut self, target: NavigationTarget, action: HistoryAction) -> RouteResult<NavigationOutcome> {
        self.last_id += 1;
        let id = NavigationId(self.last_id);

        tracing::debug!(%id, %target, ?action, "navigation started");
        self.set_phase(NavigationPhase::Resolving);

        let result = self.transition(id, &target, action);

        match &result {
            Ok(outcome) => {
                if outcome.duplicate {
                    tracing::debug!(%id, route = %outcome.route, "already at target");
                } else {
                    tracing::info!(%id, route = %outcome.route, href = %outcome.href, "navigated");
                }
                self.set_phase(NavigationPhase::Rendered);
            }
            Err(err) => {
                tracing::warn!(%id, %target, error = %err, "navigation failed");
                self.set_phase(NavigationPhase::Failed);
            }
        }

        self.set_phase(NavigationPhase::Idle);
        result
    }

    fn transition(
        &mut self,
        id: NavigationId,
        target: &NavigationTarget,
        action: HistoryAction,
    ) -> RouteResult<NavigationOutcome> {
        let settled = self.settle(target)?;

        let is_duplicate = !matches!(action, HistoryAction::Traverse(_))
            && self.current.as_ref().is_some_and(|c| {
                c.route == settled.route.name && c.location == settled.location
            });

        if is_duplicate {
            let props = self.views.bind(settled.route, &settled.params)?;
            let current_id = self.current_id().unwrap_or(id);
            return Ok(self.outcome(current_id, &settled, props, true));
        }

        let props = self.views.bind(settled.route, &settled.params)?;

        let entry = HistoryEntry {
            id,
            route: settled.route.name.clone(),
            location: settled.location.clone(),
        };
        match action {
            HistoryAction::Push => self.history.push(entry),
            HistoryAction::Replace => self.history.replace(entry),
            HistoryAction::Traverse(delta) => {
                self.history.go(delta);
                self.history.replace(entry);
            }
        }

        if let Some(previous) = self.current.take() {
            self.host.unmount(&previous.view);
        }
        self.host.mount(settled.view, &props);

        let outcome = self.outcome(id, &settled, props, false);
        self.current = Some(Current {
            id,
            route: settled.route.name.clone(),
            view: settled.view.clone(),
            params: settled.params,
            location: settled.location,
        });

        Ok(outcome)
    }

    fn outcome(
        &self,
        id: NavigationId,
        settled: &Settled<'_>,
        props: Props,
        duplicate: bool,
    ) -> NavigationOutcome {
        NavigationOutcome {
            id,
            route: settled.route.name.clone(),
            view: settled.view.clone(),
            params: settled.params.clone(),
            props,
            href: self.options.mode.href(&settled.location),
            location: settled.location.clone(),
            duplicate,
        }
    }

    /// Resolves a target, following redirects and guards until a view route
    fn settle(&self, target: &NavigationTarget) -> RouteResult<Settled<'a>> {
        let requested = target.to_string();
        let mut target = target.clone();

        for _ in 0..=MAX_REDIRECTS {
            let resolved = self.resolve(&target)?;
            let route: &'a Route = resolved.route;

            let view = match &route.kind {
                RouteKind::View(view) => view,
                RouteKind::Redirect(redirect) => {
                    target = redirect.target(&resolved.params);
                    tracing::debug!(from = %route.name, to = %target, "following redirect");
                    continue;
                }
            };

            match self.check_guards(&resolved) {
                GuardDecision::Proceed => {
                    return Ok(Settled {
                        route,
                        view,
                        params: resolved.params,
                        location: resolved.location,
                    })
                }
                GuardDecision::Redirect(next) => {
                    tracing::debug!(route = %resolved.route.name, to = %next, "guard redirected");
                    target = next;
                }
                GuardDecision::Abort(reason) => {
                    return Err(RouteError::Aborted {
                        target: requested,
                        reason,
                    })
                }
            }
        }

        Err(RouteError::RedirectLimit(requested))
    }

    fn check_guards(&self, resolved: &Resolved<'_>) -> GuardDecision {
        let to = GuardContext {
            route: resolved.route,
            params: &resolved.params,
            location: &resolved.location,
        };

        let from_route = self.current_route();
        let from = match (&self.current, from_route) {
            (Some(current), Some(route)) => Some(GuardContext {
                route,
                params: &current.params,
                location: &current.location,
            }),
            _ => None,
        };

        self.guards
            .iter()
            .map(|guard| guard.check(&to, from.as_ref()))
            .find(|decision| *decision != GuardDecision::Proceed)
            .unwrap_or(GuardDecision::Proceed)
    }

    fn resolve(&self, target: &NavigationTarget) -> RouteResult<Resolved<'a>> {
        let table: &'a RouteTable = self.table;

        match target {
            NavigationTarget::Path(url) => {
                let mut location = Location::parse(url);
                if !table.options().strict {
                    // Aliases such as `/servers/` resolve as their canonical path
                    location.path = normalize_path(&location.path).into_owned();
                }
                match table.resolve_by_path(&location.path) {
                    Ok(found) => Ok(Resolved {
                        route: found.route,
                        params: found.params,
                        location,
                    }),
                    Err(RouteError::NotFound(path)) => {
                        let Some(fallback) = self.options.fallback.as_deref() else {
                            return Err(RouteError::NotFound(path));
                        };
                        let route = table
                            .get(fallback)
                            .ok_or_else(|| RouteError::UnknownRoute(fallback.to_string()))?;
                        tracing::debug!(%path, fallback, "rendering fallback route");
                        Ok(Resolved {
                            route,
                            params: ParamMap::new(),
                            location,
                        })
                    }
                    Err(err) => Err(err),
                }
            }
            NavigationTarget::Named {
                name,
                params,
                query,
            } => {
                let (route, path) = table.resolve_by_name(name, params)?;
                let bound = table
                    .pattern(name)
                    .map(|pattern| pattern.param_names())
                    .unwrap_or_default();
                let params = params
                    .iter()
                    .filter(|(k, v)| bound.contains(&k.as_str()) && !v.is_empty())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Ok(Resolved {
                    route,
                    params,
                    location: Location {
                        path,
                        query: query.clone(),
                        hash: String::new(),
                    },
                })
            }
        }
    }

    fn set_phase(&mut self, phase: NavigationPhase) {
        tracing::trace!(?phase, "navigation phase");
        self.phase = phase;
        self.host.on_phase(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::guard_fn;
    use crate::view::{ParamKind, PropValue, ViewContract};
    use crate::Redirect;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Mount(String, Props),
        Unmount(String),
        Phase(NavigationPhase),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl Recorder {
        fn mounts(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Mount(view, _) => Some(view.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl RenderHost for Recorder {
        fn mount(&mut self, view: &ViewRef, props: &Props) {
            self.events.push(Event::Mount(view.to_string(), props.clone()));
        }

        fn unmount(&mut self, view: &ViewRef) {
            self.events.push(Event::Unmount(view.to_string()));
        }

        fn on_phase(&mut self, phase: NavigationPhase) {
            self.events.push(Event::Phase(phase));
        }
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::new("Login", "/login"),
            Route::new("Summary", "/"),
            Route::new("Servers", "/servers"),
            Route::new("ServerInfo", "/server/:id").with_props(),
            Route::new("Logs", "/logs/:device"),
            Route::redirect("Home", "/home", Redirect::Named("Summary".to_string())),
            Route::redirect("OldServer", "/srv/:id", Redirect::Path("/server/:id".to_string())),
            Route::redirect("Loop", "/loop", Redirect::Path("/loop".to_string())),
            Route::new("NotFound", "/*path"),
        ])
        .unwrap()
    }

    fn id(value: &str) -> ParamMap {
        ParamMap::from([("id".to_string(), value.to_string())])
    }

    #[test]
    fn test_phase_sequence_on_success() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        nav.navigate("/servers").unwrap();

        let phases: Vec<NavigationPhase> = nav
            .host()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Phase(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                NavigationPhase::Resolving,
                NavigationPhase::Rendered,
                NavigationPhase::Idle
            ]
        );
        assert_eq!(nav.phase(), NavigationPhase::Idle);
    }

    #[test]
    fn test_phase_sequence_on_failure() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let err = nav.navigate("Nope").unwrap_err();
        assert_eq!(err, RouteError::UnknownRoute("Nope".to_string()));
        assert_eq!(
            nav.host().events,
            vec![
                Event::Phase(NavigationPhase::Resolving),
                Event::Phase(NavigationPhase::Failed),
                Event::Phase(NavigationPhase::Idle),
            ]
        );
        assert!(nav.current_route().is_none());
    }

    #[test]
    fn test_replaces_view_on_host() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        nav.navigate("/servers").unwrap();
        nav.navigate_to("ServerInfo", id("7")).unwrap();

        let events: Vec<&Event> = nav
            .host()
            .events
            .iter()
            .filter(|e| !matches!(e, Event::Phase(_)))
            .collect();
        assert_eq!(
            events,
            vec![
                &Event::Mount("Servers".to_string(), Props::new()),
                &Event::Unmount("Servers".to_string()),
                &Event::Mount(
                    "ServerInfo".to_string(),
                    Props::from([("id".to_string(), PropValue::Text("7".to_string()))])
                ),
            ]
        );
    }

    #[test]
    fn test_non_props_route_keeps_params_in_state() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let outcome = nav.navigate("/logs/edge-01").unwrap();

        assert!(outcome.props.is_empty());
        assert_eq!(
            nav.current_params().and_then(|p| p.get("device")).map(String::as_str),
            Some("edge-01")
        );
    }

    #[test]
    fn test_typed_props_from_contract() {
        let table = table();
        let views = ViewRegistry::new()
            .with_contract(ViewContract::new("ServerInfo").accepts("id", ParamKind::Integer));
        let mut nav = Navigator::new(&table, Recorder::default()).with_views(views);

        let outcome = nav.navigate("/server/7").unwrap();
        assert_eq!(outcome.props.get("id"), Some(&PropValue::Integer(7)));

        let err = nav.navigate("/server/seven").unwrap_err();
        assert!(matches!(err, RouteError::InvalidParam { .. }));
        assert_eq!(nav.current_route().unwrap().name, "ServerInfo");
        assert_eq!(nav.current_location().unwrap().path, "/server/7");
    }

    #[test]
    fn test_named_redirect_carries_params() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let outcome = nav.navigate("/srv/12").unwrap();
        assert_eq!(outcome.route, "ServerInfo");
        assert_eq!(outcome.location.path, "/server/12");

        let outcome = nav.navigate("/home").unwrap();
        assert_eq!(outcome.route, "Summary");
        assert_eq!(outcome.href, "/");
    }

    #[test]
    fn test_redirect_loop_is_capped() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        assert_eq!(
            nav.navigate("/loop").unwrap_err(),
            RouteError::RedirectLimit("/loop".to_string())
        );
    }

    #[test]
    fn test_duplicate_navigation_is_noop() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let first = nav.navigate("/servers").unwrap();
        let second = nav.navigate("Servers").unwrap();

        assert!(second.duplicate);
        assert_eq!(second.id, first.id);
        assert_eq!(nav.host().mounts(), vec!["Servers"]);
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_aliased_path_is_duplicate() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        nav.navigate("/servers").unwrap();

        let aliased = nav.navigate("/servers/").unwrap();
        assert!(aliased.duplicate);
        assert_eq!(aliased.href, "/servers");

        let named = nav.navigate("Servers").unwrap();
        assert!(named.duplicate);
        assert_eq!(nav.host().mounts(), vec!["Servers"]);
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_doubled_slash_records_canonical_location() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let outcome = nav.navigate("/server//7").unwrap();

        assert_eq!(outcome.location.path, "/server/7");
        assert_eq!(nav.history().current().unwrap().location.path, "/server/7");
    }

    #[test]
    fn test_query_is_part_of_location() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        nav.navigate("/servers").unwrap();
        let outcome = nav
            .navigate(NavigationTarget::named("Servers", ParamMap::new()).with_query("sort", "name"))
            .unwrap();

        assert!(!outcome.duplicate);
        assert_eq!(outcome.href, "/servers?sort=name");
        assert_eq!(nav.current_location().unwrap().query_value("sort"), Some("name"));
    }

    #[test]
    fn test_back_and_forward() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        nav.navigate("/").unwrap();
        nav.navigate("/servers").unwrap();
        nav.navigate("/server/3").unwrap();

        assert_eq!(nav.back().unwrap().unwrap().route, "Servers");
        assert_eq!(nav.back().unwrap().unwrap().route, "Summary");
        assert!(nav.back().unwrap().is_none());
        assert_eq!(nav.forward().unwrap().unwrap().route, "Servers");
        assert_eq!(nav.history().len(), 3);

        nav.navigate("/login").unwrap();
        assert!(nav.forward().unwrap().is_none());
        assert_eq!(nav.history().len(), 3);
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        nav.navigate("/login").unwrap();
        nav.replace("/").unwrap();

        assert_eq!(nav.history().len(), 1);
        assert!(!nav.history().can_go_back());
        assert_eq!(nav.current_route().unwrap().name, "Summary");
    }

    #[test]
    fn test_superseded_navigation_is_not_current() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let first = nav.navigate("/servers").unwrap().id;
        let second = nav.navigate("/server/1").unwrap().id;

        assert!(second > first);
        assert!(!nav.is_current(first));
        assert!(nav.is_current(second));
    }

    #[test]
    fn test_guard_abort_leaves_state_untouched() {
        let table = table();
        let guard = guard_fn(|to, _from| {
            if to.route.name == "Servers" {
                GuardDecision::Abort("maintenance".to_string())
            } else {
                GuardDecision::Proceed
            }
        });
        let mut nav = Navigator::new(&table, Recorder::default()).with_guard(guard);
        nav.navigate("/").unwrap();

        let err = nav.navigate("/servers").unwrap_err();
        assert_eq!(
            err,
            RouteError::Aborted {
                target: "/servers".to_string(),
                reason: "maintenance".to_string(),
            }
        );
        assert_eq!(nav.current_route().unwrap().name, "Summary");
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_guard_redirect_sees_from() {
        let table = table();
        let guard = guard_fn(|to, from| match (to.route.name.as_str(), from) {
            ("Login", _) => GuardDecision::Proceed,
            (_, None) => GuardDecision::Redirect(NavigationTarget::path("/login")),
            _ => GuardDecision::Proceed,
        });
        let mut nav = Navigator::new(&table, Recorder::default()).with_guard(guard);

        assert_eq!(nav.navigate("/servers").unwrap().route, "Login");
        assert_eq!(nav.navigate("/servers").unwrap().route, "Servers");
    }

    #[test]
    fn test_catch_all_route_renders_for_unknown_paths() {
        let table = table();
        let mut nav = Navigator::new(&table, Recorder::default());
        let outcome = nav.navigate("/does/not/exist").unwrap();
        assert_eq!(outcome.route, "NotFound");
        assert_eq!(outcome.params.get("path").map(String::as_str), Some("does/not/exist"));
    }

    #[test]
    fn test_fallback_keeps_requested_url() {
        let table = RouteTable::new(vec![
            Route::new("Summary", "/"),
            Route::new("Missing", "/404"),
        ])
        .unwrap();
        let options = NavigatorOptions {
            fallback: Some("Missing".to_string()),
            ..NavigatorOptions::default()
        };
        let mut nav = Navigator::new(&table, Recorder::default()).with_options(options);

        let outcome = nav.navigate("/nowhere").unwrap();
        assert_eq!(outcome.route, "Missing");
        assert_eq!(outcome.href, "/nowhere");
    }

    #[test]
    fn test_not_found_without_fallback() {
        let table = RouteTable::new(vec![Route::new("Summary", "/")]).unwrap();
        let mut nav = Navigator::new(&table, Recorder::default());
        assert_eq!(
            nav.navigate("/nowhere").unwrap_err(),
            RouteError::NotFound("/nowhere".to_string())
        );
    }

    #[test]
    fn test_hash_mode_hrefs() {
        let table = table();
        let options = NavigatorOptions {
            mode: HistoryMode::hash("/console"),
            ..NavigatorOptions::default()
        };
        let mut nav = Navigator::new(&table, Recorder::default()).with_options(options);
        nav.navigate_to("ServerInfo", id("4")).unwrap();

        assert_eq!(nav.current_href().as_deref(), Some("/console/#/server/4"));
        assert_eq!(
            nav.href_for(NavigationTarget::named("ServerInfo", id("5"))).unwrap(),
            "/console/#/server/5"
        );
    }
}
