// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use kit_routing_cli::commands;
use kit_routing_cli::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kit-routing")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Compile, list, match and resolve SvelteKit-style routes", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = "kit-routing.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the pattern and parameters of route ids
    Compile {
        /// Route ids, e.g. /blog/[slug]
        #[arg(required = true)]
        ids: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List discovered routes in priority order
    Routes,
    /// Find the route serving a request path
    Match {
        /// Request path, e.g. /blog/hello-world
        path: String,
    },
    /// Build a path from a route id and parameters
    Resolve {
        /// Route id
        id: String,
        /// Parameters as name=value
        params: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Routes are found relative to the directory holding the config file
    let root = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    match cli.command {
        Commands::Compile { ids, json } => {
            commands::compile::run(&ids, json)
        }
        Commands::Routes => {
            let config = Config::load(&cli.config)?;
            commands::routes::run(&config, &root)
        }
        Commands::Match { path } => {
            let config = Config::load(&cli.config)?;
            commands::match_path::run(&config, &root, &path)
        }
        Commands::Resolve { id, params } => {
            commands::resolve::run(&id, &params)
        }
    }
}
