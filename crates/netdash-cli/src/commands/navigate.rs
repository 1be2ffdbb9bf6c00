use anyhow::{anyhow, Result};
use colored::Colorize;
use netdash_router::config::Config;
use netdash_router::{
    NavigationOutcome, NavigationTarget, Navigator, Props, PropValue, RenderHost, ViewRef,
};

use super::parse_params;

/// One step of a scripted navigation session
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Back,
    Forward,
    To(NavigationTarget),
}

/// Parses `back`, `forward`, `/path`, `Name` or `Name:key=value,key=value`
fn parse_step(step: &str) -> Result<Step> {
    match step {
        "back" => return Ok(Step::Back),
        "forward" => return Ok(Step::Forward),
        _ => {}
    }

    if step.starts_with('/') {
        return Ok(Step::To(NavigationTarget::path(step)));
    }

    let (name, params) = match step.split_once(':') {
        Some((name, rest)) => {
            let pairs: Vec<String> = rest.split(',').map(str::to_string).collect();
            (name, parse_params(&pairs)?)
        }
        None => (step, Default::default()),
    };
    if name.is_empty() {
        return Err(anyhow!("missing route name in step '{}'", step));
    }

    Ok(Step::To(NavigationTarget::named(name, params)))
}

/// Prints mounts and unmounts as they happen
#[derive(Default)]
struct ConsoleHost {
    quiet: bool,
}

impl RenderHost for ConsoleHost {
    fn mount(&mut self, view: &ViewRef, props: &Props) {
        if self.quiet {
            return;
        }
        let props = props
            .iter()
            .map(|(k, v)| match v {
                PropValue::Integer(n) => format!("{}={}", k, n),
                PropValue::Text(s) => format!("{}={:?}", k, s),
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {} {}({})", "mount".green(), view, props);
    }

    fn unmount(&mut self, view: &ViewRef) {
        if !self.quiet {
            println!("  {} {}", "unmount".dimmed(), view);
        }
    }
}

pub fn execute(config: &Config, steps: &[String], json: bool) -> Result<()> {
    let table = config.route_table()?;
    let views = config.views();
    views.validate(&table)?;

    let steps = steps
        .iter()
        .map(|s| parse_step(s))
        .collect::<Result<Vec<_>>>()?;

    let host = ConsoleHost { quiet: json };
    let mut nav = Navigator::new(&table, host)
        .with_views(views)
        .with_options(config.navigator_options());

    let mut outcomes: Vec<NavigationOutcome> = Vec::new();

    for step in steps {
        let label = match &step {
            Step::Back => "back".to_string(),
            Step::Forward => "forward".to_string(),
            Step::To(target) => target.to_string(),
        };
        if !json {
            println!("{} {}", "→".cyan(), label.bold());
        }

        let result = match step {
            Step::Back => nav.back(),
            Step::Forward => nav.forward(),
            Step::To(target) => nav.navigate(target).map(Some),
        };

        match result {
            Ok(Some(outcome)) => {
                if !json {
                    let note = if outcome.duplicate { " (already here)" } else { "" };
                    println!("  {} {}{}", outcome.id, outcome.href, note.dimmed());
                }
                outcomes.push(outcome);
            }
            Ok(None) => {
                if !json {
                    println!("  {}", "no history entry".yellow());
                }
            }
            Err(err) => {
                if !json {
                    println!("  {} {}", "error".red().bold(), err);
                }
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!();
    println!("{}", "History".green().bold());
    let history = nav.history();
    for (idx, entry) in history.entries().iter().enumerate() {
        let marker = if idx == history.cursor() { "*" } else { " " };
        println!("  {} {:<12} {}", marker, entry.route, entry.location);
    }

    Ok(())
}
