use anyhow::Result;
use colored::Colorize;
use netdash_router::config::Config;
use netdash_router::{Location, ParamMap, Route};
use serde::Serialize;

#[derive(Serialize)]
struct Resolution<'a> {
    route: &'a Route,
    params: &'a ParamMap,
    location: Location,
}

pub fn execute(config: &Config, path: &str, json: bool) -> Result<()> {
    let table = config.route_table()?;
    let location = Location::parse(path);
    let found = table.resolve_by_path(path)?;

    if json {
        let resolution = Resolution {
            route: found.route,
            params: &found.params,
            location,
        };
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    println!("{} {}", "→".green(), found.route.name.bold());
    println!("  path:    {}", found.route.path);
    if let Some(view) = found.route.view() {
        println!("  view:    {}", view);
    }
    println!("  props:   {}", if found.route.props { "yes" } else { "no" });

    for (name, value) in &found.params {
        println!("  {} = {}", name.cyan(), value);
    }
    for (key, value) in &location.query {
        println!("  ?{} = {}", key.dimmed(), value);
    }

    Ok(())
}
