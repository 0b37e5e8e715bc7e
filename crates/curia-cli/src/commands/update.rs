//! Update command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use curia_core::traits::Session;
use curia_core::{ListPage, Outcome, Patch, RecordKey};

use crate::output;
use crate::session::storage;

use super::resolve_resource;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Listing the record belongs to
    pub resource: String,

    /// Identifier of the record to update
    pub id: String,

    /// Field changes, e.g. --set status=active --set zipcode=90210
    #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
    pub set: Vec<String>,
}

pub async fn run(args: UpdateArgs) -> Result<()> {
    let session = storage::require_session()?;
    execute(&args, &session).await
}

pub(crate) async fn execute<S: Session>(args: &UpdateArgs, session: &S) -> Result<()> {
    let spec = resolve_resource(&args.resource)?;
    let patch = parse_patch(&args.set)?;

    let mut page = ListPage::new(spec);
    page.refresh(session)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let key = RecordKey::new(args.id.as_str());
    page.begin_update(key.clone(), patch)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    match page.commit(&key, session).await {
        Ok(Outcome::Applied) => output::success("Record updated successfully"),
        Ok(other) => bail!("unexpected outcome: {other:?}"),
        Err(err) => bail!("{}", err.user_message()),
    }

    // Show the reconciled row.
    if let Some(record) = page
        .records()
        .iter()
        .find(|r| r.key(page.resource().id_field()).is_ok_and(|k| k == key))
    {
        println!();
        for field in page.resource().filter_fields() {
            output::field(&field.to_string(), &record.text(field));
        }
    }

    Ok(())
}

/// Parse `field=value` pairs into a patch.
///
/// Values that parse as JSON are kept typed (numbers, booleans, null);
/// anything else is a plain string.
fn parse_patch(pairs: &[String]) -> Result<Patch> {
    let mut patch = Patch::default();
    for pair in pairs {
        let (field, raw) = pair
            .split_once('=')
            .with_context(|| format!("'{pair}' is not of the form FIELD=VALUE"))?;
        if field.is_empty() {
            bail!("'{pair}' has an empty field name");
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or(Value::String(raw.to_string()));
        patch = patch.set(field, value);
    }
    Ok(patch)
}
