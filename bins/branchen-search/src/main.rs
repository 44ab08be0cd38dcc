//! branchen-search - command-line front end for the directory search form
//!
//! Builds result URLs the way the form does, runs a device location lookup
//! against Nominatim with a given position, and renders the form markup.

use branchen_core::config::Config;
use branchen_core::error::exit_codes;
use branchen_telemetry::TelemetryConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{locate, render, url};
use output::Status;

/// Business directory search URLs and device location lookups
#[derive(Parser)]
#[command(name = "branchen-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (default: branchen.toml, .branchen.toml, .config/branchen.toml)
    #[arg(short, long, global = true, env = "BRANCHEN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the search URL for the given inputs
    Url(url::UrlArgs),

    /// Reverse-geocode a device position and build the "near me" URL
    Locate(locate::LocateArgs),

    /// Render the form markup for a given state
    Render(render::RenderArgs),
}

/// Settings every command sees.
pub struct Context {
    pub config: Config,
    pub json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return report(&err, cli.json),
    };

    let mut telemetry = TelemetryConfig::from(&config.schema.telemetry);
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    if let Err(err) = branchen_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {err}"));
    }
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let ctx = Context { config, json: cli.json };

    let result = match cli.command {
        Commands::Url(args) => url::run(&ctx, args),
        Commands::Locate(args) => locate::run(&ctx, args).await,
        Commands::Render(args) => render::run(&ctx, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, ctx.json),
    }
}

fn report(err: &branchen_core::Error, json: bool) -> ExitCode {
    tracing::debug!(code = %err.code, error = ?err, "Command failed");
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => eprintln!("{report}"),
            Err(_) => eprintln!("{err}"),
        }
    } else {
        Status::error(&err.message);
        if let Some(suggestion) = &err.suggestion {
            Status::hint(suggestion);
        }
    }

    let code = err.exit_code();
    ExitCode::from(u8::try_from(code).unwrap_or(exit_codes::FAILURE as u8))
}
