/// The console's built-in route table
///
/// Routes are registered in the order below and resolution is first match
/// wins. `Profile` and `ServerInfo` run in props mode and receive their `id`
/// as an integer input property.
use once_cell::sync::Lazy;

use crate::history::HistoryMode;
use crate::navigation::NavigatorOptions;
use crate::table::RouteTable;
use crate::view::{ParamKind, ViewContract, ViewRegistry};
use crate::Route;

static APP_TABLE: Lazy<RouteTable> = Lazy::new(|| {
    RouteTable::new(app_routes()).expect("built-in route table must be valid")
});

/// Routes of the console in registration order
pub fn app_routes() -> Vec<Route> {
    vec![
        Route::new("Register", "/register").with_meta("title", "Create account"),
        Route::new("Login", "/login").with_meta("title", "Sign in"),
        Route::new("Summary", "/").with_meta("title", "Summary"),
        Route::new("Servers", "/servers").with_meta("title", "Servers"),
        Route::new("Devices", "/devices").with_meta("title", "Devices"),
        Route::new("Management", "/management").with_meta("title", "Management"),
        Route::new("Profile", "/profile/:id")
            .with_props()
            .with_meta("title", "Profile"),
        Route::new("ServerInfo", "/server/:id")
            .with_props()
            .with_meta("title", "Server details"),
    ]
}

/// Shared, immutable application table, built on first use
pub fn app_table() -> &'static RouteTable {
    &APP_TABLE
}

/// Input contracts of the console's props-mode views
pub fn app_views() -> ViewRegistry {
    ViewRegistry::new()
        .with_contract(ViewContract::new("Profile").accepts("id", ParamKind::Integer))
        .with_contract(ViewContract::new("ServerInfo").accepts("id", ParamKind::Integer))
}

/// Web history rooted at `/`
pub fn app_navigator_options() -> NavigatorOptions {
    NavigatorOptions {
        mode: HistoryMode::web("/"),
        ..NavigatorOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_table_builds() {
        assert_eq!(app_table().len(), 8);
        let names: Vec<&str> = app_table().routes().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Register",
                "Login",
                "Summary",
                "Servers",
                "Devices",
                "Management",
                "Profile",
                "ServerInfo"
            ]
        );
    }

    #[test]
    fn test_app_views_match_table() {
        assert_eq!(app_views().validate(app_table()), Ok(()));
    }

    #[test]
    fn test_only_parameterized_routes_use_props() {
        for route in app_table().routes() {
            let has_params = route.path.contains(':');
            assert_eq!(route.props, has_params, "route {}", route.name);
        }
    }
}
