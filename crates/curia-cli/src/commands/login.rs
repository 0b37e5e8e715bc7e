//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use curia_core::traits::{Backend, Session};
use curia_core::{ApiUrl, Credentials};
use curia_http::HttpBackend;

use crate::output;
use crate::session::{storage, token};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Administrator email
    #[arg(long)]
    pub email: String,

    /// Administrator password
    #[arg(long)]
    pub password: String,

    /// Admin API base URL
    #[arg(long)]
    pub api: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let api = ApiUrl::new(&args.api).context("Invalid API URL")?;
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let backend = HttpBackend::new(api);
    let session = backend
        .login(credentials)
        .await
        .context("Failed to login")?;

    // Save session
    storage::save_session(&session).context("Failed to save session")?;

    // Print success
    output::success("Logged in successfully");
    println!();
    output::field("Account", session.account().as_str());
    output::field("API", session.url().as_str());
    if let Some(expires) = token::expires_at(&session.token()) {
        output::field("Session expires", &expires.to_rfc3339());
    }

    Ok(())
}
