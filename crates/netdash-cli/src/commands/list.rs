use anyhow::Result;
use colored::Colorize;
use netdash_router::config::Config;
use netdash_router::RouteKind;

pub fn execute(config: &Config, json: bool) -> Result<()> {
    let table = config.route_table()?;

    if json {
        let routes: Vec<_> = table.routes().collect();
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    let source = if config.uses_builtin_routes() {
        "built-in"
    } else {
        "configured"
    };
    println!("{} ({} routes, {})", "Routes".green().bold(), table.len(), source);
    println!();

    for (idx, route) in table.routes().enumerate() {
        let target = match &route.kind {
            RouteKind::View(view) => format!("view {}", view).normal(),
            RouteKind::Redirect(redirect) => format!("redirect {:?}", redirect).yellow(),
        };
        let props = if route.props { " [props]".cyan() } else { "".normal() };

        println!(
            "{:>3}. {:<14} {:<24} {}{}",
            idx + 1,
            route.name.bold(),
            route.path,
            target,
            props
        );
    }

    Ok(())
}
