//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{delete, demo, list, login, logout, update, whoami};

/// Terminal admin console for the platform.
#[derive(Parser, Debug)]
#[command(name = "curia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to an admin API and store the session
    Login(login::LoginArgs),

    /// Remove the stored session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// List a collection, with search and pagination
    List(list::ListArgs),

    /// Delete a record after confirmation
    Delete(delete::DeleteArgs),

    /// Update fields on a record
    Update(update::UpdateArgs),

    /// Explore a seeded, in-memory copy of the console (no network)
    Demo(demo::DemoArgs),
}
