mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use markwiki::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "markwiki")]
#[command(version, about = "MarkWiki shell - route table, navigation host and wiki storage", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "markwiki.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table in declaration order
    Routes,

    /// Resolve a URL, fragment or path to the view it activates
    Resolve {
        /// e.g. "#/workspace/notes" or "http://localhost:1420/#/conflict-resolver"
        url: String,

        /// Print the activation as JSON
        #[arg(long)]
        json: bool,

        /// Also load what the view displays from wiki storage
        #[arg(long)]
        data: bool,
    },

    /// Build the href of a named route
    UrlFor {
        /// Route name, e.g. "editor"
        name: String,

        /// Parameters as key=value
        params: Vec<String>,
    },

    /// Mount the app and navigate interactively
    Run,

    /// Manage wikis in the storage directory
    Wiki {
        #[command(subcommand)]
        command: commands::wiki::WikiCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    init_tracing(&config.log.level);

    match cli.command {
        Commands::Routes => commands::routes::execute(config)?,
        Commands::Resolve { url, json, data } => {
            commands::resolve::execute(config, &url, json, data)?
        }
        Commands::UrlFor { name, params } => commands::url_for::execute(config, &name, &params)?,
        Commands::Run => commands::run::execute(config)?,
        Commands::Wiki { command } => commands::wiki::execute(config, command)?,
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
