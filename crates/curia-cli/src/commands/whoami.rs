//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use curia_core::traits::Session;

use crate::output;
use crate::session::{storage, token};

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = storage::require_session()?;

    output::field("Account", session.account().as_str());
    output::field("API", session.url().as_str());
    match token::expires_at(&session.token()) {
        Some(expires) => output::field("Session expires", &expires.to_rfc3339()),
        None => output::field("Session expires", "unknown"),
    }

    Ok(())
}
