/// Locations, URL history modes and the back/forward stack
use std::fmt;

use serde::Serialize;

use crate::navigation::NavigationId;
use crate::path::{format_query, parse_query, split_url};

/// In-app location: path plus query and hash
///
/// # Examples
///
/// ```
/// use netdash_router::Location;
///
/// let loc = Location::parse("/servers?sort=name&q=core+switch#rack-2");
/// assert_eq!(loc.path, "/servers");
/// assert_eq!(loc.query_value("q"), Some("core switch"));
/// assert_eq!(loc.hash, "rack-2");
/// assert_eq!(loc.full_path(), "/servers?sort=name&q=core%20switch#rack-2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub hash: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Parses `path?query#hash`; an empty path becomes `/`
    pub fn parse(url: &str) -> Self {
        let (path, query, hash) = split_url(url);
        Self {
            path: if path.is_empty() { "/" } else { path }.to_string(),
            query: parse_query(query),
            hash: hash.to_string(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// First value of a query key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path with encoded query and hash appended
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            full.push('?');
            full.push_str(&format_query(&self.query));
        }
        if !self.hash.is_empty() {
            full.push('#');
            full.push_str(&self.hash);
        }
        full
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// How locations map onto the URL bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    /// Real URL paths under `base` (no page reloads)
    Web { base: String },
    /// Location kept in the fragment: `base#/path`
    Hash { base: String },
    /// No URL at all; used for tests and non-browser hosts
    Memory,
}

impl Default for HistoryMode {
    fn default() -> Self {
        HistoryMode::web("/")
    }
}

impl HistoryMode {
    /// Web history under `base`, stored without its trailing slash
    pub fn web(base: &str) -> Self {
        let trimmed = base.trim_matches('/');
        let base = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        HistoryMode::Web { base }
    }

    /// Hash history under `base`, stored with its trailing slash
    pub fn hash(base: &str) -> Self {
        let trimmed = base.trim_matches('/');
        let base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        HistoryMode::Hash { base }
    }

    /// URL shown to the user for a location
    ///
    /// ```
    /// use netdash_router::{HistoryMode, Location};
    ///
    /// let loc = Location::new("/server/7");
    /// assert_eq!(HistoryMode::web("/").href(&loc), "/server/7");
    /// assert_eq!(HistoryMode::web("/console/").href(&loc), "/console/server/7");
    /// assert_eq!(HistoryMode::hash("/").href(&loc), "/#/server/7");
    /// assert_eq!(HistoryMode::Memory.href(&loc), "/server/7");
    /// ```
    pub fn href(&self, location: &Location) -> String {
        match self {
            HistoryMode::Web { base } => format!("{}{}", base, location.full_path()),
            HistoryMode::Hash { base } => format!("{}#{}", base, location.full_path()),
            HistoryMode::Memory => location.full_path(),
        }
    }

    /// Reads an app location back out of a URL; `None` when outside `base`
    ///
    /// ```
    /// use netdash_router::HistoryMode;
    ///
    /// let mode = HistoryMode::web("/console");
    /// assert_eq!(mode.parse_href("/console/devices").unwrap().path, "/devices");
    /// assert_eq!(mode.parse_href("/console").unwrap().path, "/");
    /// assert!(mode.parse_href("/consoles").is_none());
    ///
    /// let hash = HistoryMode::hash("/");
    /// assert_eq!(hash.parse_href("/#/profile/42?tab=keys").unwrap().path, "/profile/42");
    /// assert_eq!(hash.parse_href("/").unwrap().path, "/");
    /// ```
    pub fn parse_href(&self, href: &str) -> Option<Location> {
        match self {
            HistoryMode::Web { base } => {
                let rest = href.strip_prefix(base.as_str())?;
                let boundary = rest.is_empty() || rest.starts_with(['/', '?', '#']);
                boundary.then(|| Location::parse(rest))
            }
            HistoryMode::Hash { base } => {
                let (page, fragment) = href.split_once('#').unwrap_or((href, ""));
                let page = page.split_once('?').map_or(page, |(p, _)| p);
                if page.trim_end_matches('/') != base.trim_end_matches('/') {
                    return None;
                }
                Some(Location::parse(fragment))
            }
            HistoryMode::Memory => Some(Location::parse(href)),
        }
    }
}

/// One visited location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: NavigationId,
    pub route: String,
    pub location: Location,
}

/// Bounded back/forward stack with a cursor on the current entry
///
/// Pushing after going back drops the forward entries; pushing past
/// `max_entries` evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    max_entries: usize,
}

impl History {
    /// Creates an empty history; `max_entries` is at least 1
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);

        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrites the current entry (or pushes the first one)
    pub fn replace(&mut self, entry: HistoryEntry) {
        match self.entries.get_mut(self.cursor) {
            Some(current) => *current = entry,
            None => self.push(entry),
        }
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    /// Entry `delta` steps from the cursor, without moving
    pub fn peek(&self, delta: isize) -> Option<&HistoryEntry> {
        self.offset(delta).and_then(|idx| self.entries.get(idx))
    }

    /// Moves the cursor by `delta`; returns the new current entry
    pub fn go(&mut self, delta: isize) -> Option<&HistoryEntry> {
        let idx = self.offset(delta)?;
        self.cursor = idx;
        self.entries.get(idx)
    }

    pub fn can_go_back(&self) -> bool {
        self.peek(-1).is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.peek(1).is_some()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn offset(&self, delta: isize) -> Option<usize> {
        let idx = self.cursor.checked_add_signed(delta)?;
        (idx < self.entries.len()).then_some(idx)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}
