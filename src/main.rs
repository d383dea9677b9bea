//! Ostriv - storefront catalog client
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use ostriv::cli::args::{ConfigAction, ConfigArgs};
use ostriv::cli::{Cli, Commands};
use ostriv::config::{Config, ConfigManager};
use ostriv::error::OstrivResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> OstrivResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = match config_manager.load().await {
        Ok(config) => config,
        // A broken file must not block regenerating it
        Err(_) if is_forced_init(&cli.command) => Config::default(),
        Err(e) => return Err(e),
    };

    init_logging(cli.verbose, &config);
    ostriv::ui::init_theme();
    debug!("Using config file {}", config_manager.path().display());

    apply_overrides(&mut config, &cli);

    // Dispatch to command
    match cli.command {
        Commands::Categories(args) => ostriv::cli::commands::categories(args, &config).await,
        Commands::Products(args) => ostriv::cli::commands::products(args, &config).await,
        Commands::Product(args) => ostriv::cli::commands::product(args, &config).await,
        Commands::Search(args) => ostriv::cli::commands::search(args, &config).await,
        Commands::Sitemap(args) => ostriv::cli::commands::sitemap(args, &config).await,
        Commands::Contact(args) => ostriv::cli::commands::contact(args, &config).await,
        Commands::Config(args) => {
            ostriv::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; logs go to stderr
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("ostriv=warn"),
        1 => EnvFilter::new("ostriv=info"),
        _ => EnvFilter::new("ostriv=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn is_forced_init(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Config(ConfigArgs {
            action: Some(ConfigAction::Init { force: true })
        })
    )
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.cms_url {
        debug!("CMS URL from command line: {}", url);
        config.cms.url = Some(url.clone());
    }
    if let Some(url) = &cli.site_url {
        config.site.url = url.clone();
    }
}
