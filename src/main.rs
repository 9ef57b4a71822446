//! komoplane - a terminal dashboard for Crossplane resources
//!
//! Lists claims, composite and managed resources served by the komoplane
//! backend and shows the relationship graph around any one of them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use komoplane::api::HttpApiClient;
use komoplane::cli::{self, ConfigSubcommand, GraphTarget, ListKind};
use komoplane::config::{Config, ConfigLoader};
use komoplane::graph::{LayoutDirection, OutputFormat};
use std::time::Duration;

/// A terminal dashboard for Crossplane claims, composite resources and managed resources
#[derive(Parser, Debug)]
#[command(name = "komoplane")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Backend URL, overrides config and KOMOPLANE_URL
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
    /// Count resources of every kind and how many are unhealthy (default)
    Summary,
    /// Show backend status and whether an upgrade is available
    Status,
    /// List providers, or show one provider and its configs
    Providers { name: Option<String> },
    /// List claims
    Claims,
    /// List managed resources
    Managed,
    /// List composite resources
    Composite,
    /// List compositions
    Compositions,
    /// List composite resource definitions
    Xrds,
    /// Show the events of an object
    Events {
        name: String,
        /// Namespace of a namespaced object
        #[arg(long, short = 'n')]
        namespace: Option<String>,
    },
    /// Print the relationship graph around a resource
    Graph {
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
        /// Layout direction (TB, BT, LR, RL), overrides graph.direction
        #[arg(long)]
        direction: Option<LayoutDirection>,
        #[command(subcommand)]
        target: GraphTarget,
    },
    /// Browse relationship graphs interactively
    #[cfg(feature = "tui")]
    Browse {
        #[command(subcommand)]
        target: GraphTarget,
    },
}

fn load_config(url: Option<String>) -> Result<Config> {
    let mut config = ConfigLoader::load().context("Failed to load configuration")?;
    if let Some(url) = url {
        config.server.url = url;
    }
    ConfigLoader::check(&config)?;
    tracing::debug!(
        "Configuration loaded: server.url={}, timeout={}s",
        config.server.url,
        config.server.timeout_seconds
    );
    Ok(config)
}

fn create_client(config: &Config) -> Result<HttpApiClient> {
    HttpApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_seconds),
    )
    .context("Failed to create backend client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let command = args.command.unwrap_or(Command::Summary);

    // Config and version never talk to the backend
    match command {
        Command::Config { subcommand } => return cli::handle_config_command(subcommand),
        Command::Version => {
            cli::display_version();
            return Ok(());
        }
        _ => {}
    }

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = load_config(args.url)?;
    let client = create_client(&config)?;
    let icons = !config.ui.no_icons;

    match command {
        Command::Summary => cli::print_summary(&client).await,
        Command::Status => cli::print_status(&client).await,
        Command::Providers { name: Some(name) } => {
            cli::print_provider(&client, &name, icons).await
        }
        Command::Providers { name: None } => {
            cli::print_list(&client, ListKind::Providers, icons).await
        }
        Command::Claims => cli::print_list(&client, ListKind::Claims, icons).await,
        Command::Managed => cli::print_list(&client, ListKind::Managed, icons).await,
        Command::Composite => cli::print_list(&client, ListKind::Composite, icons).await,
        Command::Compositions => cli::print_list(&client, ListKind::Compositions, icons).await,
        Command::Xrds => cli::print_list(&client, ListKind::Xrds, icons).await,
        Command::Events { name, namespace } => {
            cli::print_events(&client, namespace.as_deref(), &name).await
        }
        Command::Graph {
            output,
            direction,
            target,
        } => {
            let route = target.to_route()?;
            let mut layout = config.graph.layout_config();
            if let Some(direction) = direction {
                layout = layout.with_direction(direction);
            }
            let rendered = cli::render_graph(&client, &route, &layout, output).await?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        #[cfg(feature = "tui")]
        Command::Browse { target } => {
            let route = target.to_route()?;
            let client: std::sync::Arc<dyn komoplane::api::ApiClient> = std::sync::Arc::new(client);
            komoplane::tui::run_tui(client, route, config, komoplane::tui::Theme::default()).await
        }
        Command::Config { .. } | Command::Version => Ok(()),
    }
}
