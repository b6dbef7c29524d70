//! # OriginUI component server (`origin-ui-mcp`)
//!
//! Serves the OriginUI component registry to MCP clients and answers the
//! same queries from the command line.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `origin-ui-mcp serve` | MCP server on stdio (default) or HTTP |
//! | `origin-ui-mcp search "<query>"` | Search components |
//! | `origin-ui-mcp get <id>` | Show one component |
//! | `origin-ui-mcp list` | List components, optionally by category |
//! | `origin-ui-mcp install <id>` | Print the install command |
//! | `origin-ui-mcp stats` | Registry statistics |
//! | `origin-ui-mcp check` | Load the registry and report counts |
//! | `origin-ui-mcp tools` | List the tools exposed over MCP |
//!
//! ## Examples
//!
//! ```bash
//! # MCP over stdio, for editor integrations
//! origin-ui-mcp serve
//!
//! # MCP at http://127.0.0.1:7341/mcp plus the JSON API
//! origin-ui-mcp serve --transport http
//!
//! # Which tier matched each result
//! origin-ui-mcp search buttons --explain
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use origin_ui_mcp::server::Transport;
use origin_ui_mcp::{commands, config, logging, server};

#[derive(Parser)]
#[command(
    name = "origin-ui-mcp",
    about = "Search and install OriginUI components from MCP clients or the shell",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/origin-ui.toml`. Built-in defaults are used
    /// when the file does not exist.
    #[arg(long, global = true, default_value = "./config/origin-ui.toml")]
    config: PathBuf,

    /// Registry JSON file; overrides `[registry].path`.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server.
    Serve {
        #[arg(long, value_enum, default_value = "stdio")]
        transport: Transport,
    },

    /// Search components by tag, name, description or category.
    Search {
        query: String,

        /// Only return components in this category.
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of results (default from `[tools]`).
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Show which matching tier produced each result.
        #[arg(long)]
        explain: bool,
    },

    /// Show full details of one component.
    Get { id: String },

    /// List components.
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Print the install command for a component.
    Install { id: String },

    /// Registry statistics.
    Stats,

    /// Load the registry and report what was found.
    Check,

    /// List the tools exposed over MCP.
    Tools,
}

fn load_config(cli: &Cli) -> anyhow::Result<config::Config> {
    let mut cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::minimal()
    };
    if let Some(path) = &cli.registry {
        cfg.registry.path = path.clone();
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    logging::init(&cfg.logging.filter);

    match cli.command {
        Commands::Serve { transport } => {
            server::serve(cfg, transport).await?;
        }
        Commands::Search {
            query,
            category,
            limit,
            explain,
        } => {
            commands::run_search(&cfg, &query, category.as_deref(), limit, explain)?;
        }
        Commands::Get { id } => {
            commands::run_get(&cfg, &id)?;
        }
        Commands::List { category, limit } => {
            commands::run_list(&cfg, category.as_deref(), limit)?;
        }
        Commands::Install { id } => {
            commands::run_install(&cfg, &id)?;
        }
        Commands::Stats => {
            commands::run_stats(&cfg)?;
        }
        Commands::Check => {
            commands::run_check(&cfg)?;
        }
        Commands::Tools => {
            commands::run_tools(&cfg)?;
        }
    }

    Ok(())
}
