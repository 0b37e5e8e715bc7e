//! List command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use curia_core::traits::Session;
use curia_core::ListPage;

use crate::output;
use crate::session::storage;

use super::resolve_resource;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Listing to show (e.g. users, events, services)
    pub resource: String,

    /// Keep only rows whose searchable fields contain this text
    #[arg(long)]
    pub search: Option<String>,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let session = storage::require_session()?;
    execute(&args, &session).await
}

pub(crate) async fn execute<S: Session>(args: &ListArgs, session: &S) -> Result<()> {
    let spec = resolve_resource(&args.resource)?;
    let mut page = ListPage::new(spec);

    page.refresh(session)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Failed to fetch the collection")?;

    if let Some(search) = &args.search {
        page.set_query(search);
    }

    if args.page != 1 && page.set_page(args.page).is_err() {
        bail!(
            "Page {} does not exist; this listing has {} page(s).",
            args.page,
            page.total_pages()
        );
    }

    if page.visible().is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    render(&page);
    Ok(())
}

fn render(page: &ListPage) {
    let spec = page.resource();
    let mut headers = vec!["#".to_string(), spec.id_field().to_string()];
    headers.extend(spec.filter_fields().iter().map(|f| f.to_string()));

    let offset = (page.page() - 1) * spec.page_size().get();
    let rows: Vec<Vec<String>> = page
        .visible()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut row = vec![
                (offset + i + 1).to_string(),
                record
                    .key(spec.id_field())
                    .map(|k| k.to_string())
                    .unwrap_or_default(),
            ];
            row.extend(spec.filter_fields().iter().map(|f| record.text(f)));
            row
        })
        .collect();

    output::table(&headers, &rows);

    println!();
    let summary = format!(
        "Page {} of {} · {} matching of {} records",
        page.page(),
        page.total_pages(),
        page.filtered().len(),
        page.records().len()
    );
    println!("{}", summary.dimmed());
}
