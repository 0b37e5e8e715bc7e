//! curia - terminal admin console for the platform.
//!
//! A thin wrapper over the curia library crates: sign in against the admin
//! REST API, then browse, search, page through, and mutate the platform's
//! collections from the terminal.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Login(args) => commands::login::run(args).await,
        Commands::Logout(args) => commands::logout::run(args).await,
        Commands::Whoami(args) => commands::whoami::run(args).await,
        Commands::List(args) => commands::list::run(args).await,
        Commands::Delete(args) => commands::delete::run(args).await,
        Commands::Update(args) => commands::update::run(args).await,
        Commands::Demo(args) => commands::demo::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
