//! Delete command implementation.
//!
//! Deletes go through the engine's confirm-then-call-then-reconcile flow:
//! the record is named, the operator confirms (or `--yes` skips the
//! prompt), and only a server-confirmed delete changes the local view.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::Args;

use curia_core::traits::Session;
use curia_core::{ListPage, Outcome, RecordKey};

use crate::output;
use crate::session::storage;

use super::resolve_resource;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Listing the record belongs to
    pub resource: String,

    /// Identifier of the record to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: DeleteArgs) -> Result<()> {
    let session = storage::require_session()?;
    execute(&args, &session).await
}

pub(crate) async fn execute<S: Session>(args: &DeleteArgs, session: &S) -> Result<()> {
    let spec = resolve_resource(&args.resource)?;
    let mut page = ListPage::new(spec);

    page.refresh(session)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let key = RecordKey::new(args.id.as_str());
    page.begin_delete(key.clone())
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if !args.yes && !confirm(&format!("Delete '{key}' from {}?", args.resource))? {
        page.cancel(&key)
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        output::error("Action cancelled");
        return Ok(());
    }

    match page.commit(&key, session).await {
        Ok(Outcome::Applied) => {
            output::success("Record deleted successfully");
        }
        Ok(Outcome::AlreadyRemoved) => {
            output::success("Record was already removed; list refreshed");
        }
        Ok(Outcome::Cancelled) => unreachable!("commit never cancels"),
        Err(err) => bail!("{}", err.user_message()),
    }

    println!();
    output::field("Remaining records", &page.records().len().to_string());
    Ok(())
}

/// Ask a y/N question on the terminal.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
