//! ads-dashboard - Google Ads analytics dashboard backend
//!
//! Serves the dashboard and its JSON API, falling back to mock data when
//! Google Ads credentials are missing.

use ads_dashboard::ads::yaml::DEFAULT_FILE_NAME;
use ads_dashboard::cli::{self, ConfigSubcommand};
use ads_dashboard::{AppState, ConfigLoader, DashboardServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Google Ads analytics dashboard backend
#[derive(Parser, Debug)]
#[command(name = "ads-dashboard")]
#[command(about = "Google Ads analytics dashboard with credential-gated mock data", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dashboard server (default)
    Serve {
        /// Port to listen on, overrides configuration and PORT
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Report which Google Ads credentials are configured
    CheckCredentials,
    /// Generate google-ads.yaml for the Google Ads client libraries
    WriteAdsYaml {
        /// Output path
        #[arg(long, short = 'o', default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    if let Some(Command::Version) = args.command {
        cli::display_version();
        return Ok(());
    }

    // Before any config loading, so env override warnings are visible
    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    if let Some(Command::Config { subcommand }) = args.command {
        return cli::handle_config_command(subcommand, config_path).await;
    }

    let mut config = ConfigLoader::load(config_path).context("Failed to load configuration")?;

    match args.command {
        Some(Command::CheckCredentials) => {
            print!("{}", cli::credential_report(&config.google_ads.credentials));
            Ok(())
        }
        Some(Command::WriteAdsYaml { output }) => {
            cli::write_ads_yaml(&config, &output)?;
            println!("Wrote {}", output.display());
            Ok(())
        }
        Some(Command::Serve { port }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        None => serve(config).await,
        // Handled above
        Some(Command::Version) | Some(Command::Config { .. }) => Ok(()),
    }
}

async fn serve(config: ads_dashboard::Config) -> Result<()> {
    ConfigLoader::validate(&config).context("Invalid configuration")?;

    tracing::info!(
        "Starting in {} environment (Google Ads API {})",
        config.environment,
        config.google_ads.api_version
    );

    let state = AppState::from_config(config)?;
    let server = DashboardServer::new(state)?;
    server.run().await
}
