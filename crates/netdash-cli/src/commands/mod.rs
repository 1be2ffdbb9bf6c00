pub mod check;
pub mod list;
pub mod navigate;
pub mod resolve;
pub mod url;

use std::path::Path;

use anyhow::{anyhow, Result};
use netdash_router::config::Config;
use netdash_router::ParamMap;

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

/// Splits `key=value` arguments into pairs
pub fn parse_pairs(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| anyhow!("expected key=value, got '{}'", arg))
        })
        .collect()
}

pub fn parse_params(args: &[String]) -> Result<ParamMap> {
    Ok(parse_pairs(args)?.into_iter().collect())
}
