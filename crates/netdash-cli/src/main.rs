mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netdash")]
#[command(version, about = "Netdash CLI - inspect and exercise the console route table", long_about = None)]
struct Cli {
    /// Router config file (default: ./netdash.toml, built-in routes when absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log resolution steps (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered routes in resolution order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a path to its route and parameters
    Resolve {
        /// Path to resolve, e.g. /server/7
        path: String,

        #[arg(long)]
        json: bool,
    },

    /// Build the URL of a named route
    Url {
        /// Route name, e.g. ServerInfo
        name: String,

        /// Parameters as key=value
        params: Vec<String>,

        /// Query pairs as key=value
        #[arg(short, long)]
        query: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Run a sequence of navigations and print what gets mounted
    Navigate {
        /// Steps: /path, Name, Name:key=value,key=value, back or forward
        #[arg(required = true)]
        steps: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Validate the route table, view contracts and URL round-trips
    Check,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "netdash_router=debug",
        _ => "netdash_router=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List { json } => {
            commands::list::execute(&config, json)?;
        }
        Commands::Resolve { path, json } => {
            commands::resolve::execute(&config, &path, json)?;
        }
        Commands::Url {
            name,
            params,
            query,
            json,
        } => {
            commands::url::execute(&config, &name, &params, &query, json)?;
        }
        Commands::Navigate { steps, json } => {
            commands::navigate::execute(&config, &steps, json)?;
        }
        Commands::Check => {
            commands::check::execute(&config)?;
        }
    }

    Ok(())
}
