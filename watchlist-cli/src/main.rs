//! watchlist CLI
//!
//! Keeps a local copy of a Letterboxd watchlist, enriched with TMDB metadata
//! and regional streaming availability.

mod commands;
mod error;
mod spinner;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use watchlist_core::ResolutionStatus;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Sync a Letterboxd watchlist with TMDB streaming availability", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, enrich and store the watchlist once
    Refresh,

    /// Refresh on the configured cron schedule until interrupted
    Run {
        /// Also refresh immediately on startup
        #[arg(long)]
        now: bool,
    },

    /// List stored films
    List {
        /// Only show films with this status (found, not_found, error, pending)
        #[arg(long)]
        status: Option<ResolutionStatus>,
    },

    /// Show when the watchlist was last refreshed and how it resolved
    Status,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Refresh => commands::refresh::run_refresh(),
        Commands::Run { now } => commands::run::run_scheduler(now),
        Commands::List { status } => commands::list::run_list(status),
        Commands::Status => commands::status::run_status(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".if_supports_color(Stderr, |t| t.red()), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
