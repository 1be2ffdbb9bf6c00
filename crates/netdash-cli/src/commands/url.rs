use anyhow::Result;
use netdash_router::config::Config;
use netdash_router::Location;

use super::{parse_pairs, parse_params};

pub fn execute(
    config: &Config,
    name: &str,
    params: &[String],
    query: &[String],
    json: bool,
) -> Result<()> {
    let table = config.route_table()?;
    let params = parse_params(params)?;

    let (route, path) = table.resolve_by_name(name, &params)?;
    let location = Location {
        path,
        query: parse_pairs(query)?,
        hash: String::new(),
    };
    let href = config.history_mode().href(&location);

    if json {
        let value = serde_json::json!({
            "route": route.name,
            "path": location.path,
            "href": href,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", href);
    }

    Ok(())
}
