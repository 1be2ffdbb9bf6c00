// File: src/config.rs
// Purpose: Router configuration parsing from netdash.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::app;
use crate::history::HistoryMode;
use crate::navigation::NavigatorOptions;
use crate::table::{RouteTable, TableOptions};
use crate::view::{ParamKind, ViewContract, ViewRegistry};
use crate::{Redirect, Route};

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,

    /// Route list; the built-in console table is used when empty
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// How locations are reflected in the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    #[default]
    Web,
    Hash,
    Memory,
}

/// Matching and navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub history: HistoryKind,

    /// Base path the app is served under (e.g., "/console")
    #[serde(default = "default_base")]
    pub base: String,

    /// `case_insensitive` and `strict` matching flags
    #[serde(flatten)]
    pub table: TableOptions,

    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Route rendered for paths that match nothing
    #[serde(default)]
    pub fallback: Option<String>,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub name: String,
    pub path: String,

    /// View to render (default: the route name)
    #[serde(default)]
    pub view: Option<String>,

    #[serde(default = "default_false")]
    pub props: bool,

    /// Path (leading "/") or route name to redirect to
    #[serde(default)]
    pub redirect: Option<String>,

    /// Declared input kinds of the view, e.g. `id = "integer"`
    #[serde(default)]
    pub params: BTreeMap<String, ParamKind>,

    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

fn default_base() -> String {
    "/".to_string()
}

fn default_max_history() -> usize {
    50
}

fn default_false() -> bool {
    false
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryKind::Web,
            base: default_base(),
            table: TableOptions::default(),
            max_history: default_max_history(),
            fallback: None,
        }
    }
}

impl RouteConfig {
    /// Converts the entry into a plain route
    pub fn to_route(&self) -> Route {
        let route = match &self.redirect {
            Some(to) if to.starts_with('/') => {
                Route::redirect(&self.name, &self.path, Redirect::Path(to.clone()))
            }
            Some(to) => Route::redirect(&self.name, &self.path, Redirect::Named(to.clone())),
            None => {
                let view = self.view.clone().unwrap_or_else(|| self.name.clone());
                Route::new(&self.name, &self.path).with_view(view)
            }
        };

        self.meta
            .iter()
            .fold(route.with_props_mode(self.props), |route, (k, v)| {
                route.with_meta(k, v)
            })
    }
}

impl Config {
    /// Load configuration from a TOML file; a missing or empty file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(?path, "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from the default path (./netdash.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("netdash.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Whether the built-in console routes are in use
    pub fn uses_builtin_routes(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn table_options(&self) -> TableOptions {
        self.router.table
    }

    /// Configured routes, or the built-in ones
    pub fn routes(&self) -> Vec<Route> {
        if self.uses_builtin_routes() {
            app::app_routes()
        } else {
            self.routes.iter().map(RouteConfig::to_route).collect()
        }
    }

    /// Builds and validates the route table, fallback included
    pub fn route_table(&self) -> Result<RouteTable> {
        let table = RouteTable::with_options(self.routes(), self.table_options())
            .context("Invalid route table")?;

        if let Some(fallback) = &self.router.fallback {
            if table.get(fallback).is_none() {
                bail!("Fallback route '{}' is not registered", fallback);
            }
        }

        Ok(table)
    }

    /// View contracts from `params` declarations, or the built-in ones
    pub fn views(&self) -> ViewRegistry {
        if self.uses_builtin_routes() {
            return app::app_views();
        }

        self.routes
            .iter()
            .filter(|r| r.redirect.is_none() && !r.params.is_empty())
            .fold(ViewRegistry::new(), |registry, r| {
                let view = r.view.clone().unwrap_or_else(|| r.name.clone());
                let contract = r
                    .params
                    .iter()
                    .fold(ViewContract::new(view), |c, (name, kind)| c.accepts(name, *kind));
                registry.with_contract(contract)
            })
    }

    pub fn history_mode(&self) -> HistoryMode {
        match self.router.history {
            HistoryKind::Web => HistoryMode::web(&self.router.base),
            HistoryKind::Hash => HistoryMode::hash(&self.router.base),
            HistoryKind::Memory => HistoryMode::Memory,
        }
    }

    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            mode: self.history_mode(),
            max_history: self.router.max_history,
            fallback: self.router.fallback.clone(),
        }
    }
}
