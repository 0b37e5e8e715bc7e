//! Subcommand implementations.

pub mod delete;
pub mod demo;
pub mod list;
pub mod login;
pub mod logout;
pub mod update;
pub mod whoami;

use anyhow::{Result, bail};
use curia_core::{ResourceSpec, catalog};

/// Resolve a listing name from the command line.
pub(crate) fn resolve_resource(name: &str) -> Result<ResourceSpec> {
    match catalog::find(name) {
        Some(spec) => Ok(spec),
        None => bail!(
            "Unknown listing '{name}'. Available listings: {}",
            catalog::NAMES.join(", ")
        ),
    }
}
