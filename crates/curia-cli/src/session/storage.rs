//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use curia_core::{AccessToken, ApiUrl, RecordKey};
use curia_http::HttpSession;

use super::token;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    api: String,
    account: String,
    access_token: String,
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "curia").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub fn save_session(session: &HttpSession) -> Result<()> {
    use curia_core::traits::Session;

    let stored = StoredSession {
        api: session.url().to_string(),
        account: session.account().to_string(),
        access_token: session.token().as_str().to_string(),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load a session from disk.
///
/// A stored token whose expiry claim has passed is treated as absent, so
/// every command funnels the operator back to `curia login` instead of
/// failing later with an authentication error.
pub fn load_session() -> Result<Option<HttpSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    let access_token = AccessToken::new(stored.access_token);
    if token::is_token_expired(&access_token) {
        tracing::warn!("stored session has expired");
        return Ok(None);
    }

    let api = ApiUrl::new(&stored.api).context("Invalid API URL in session")?;
    let account = RecordKey::new(stored.account);

    Ok(Some(HttpSession::from_persisted(api, account, access_token)))
}

/// Load a session or explain how to get one.
pub fn require_session() -> Result<HttpSession> {
    load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'curia login' first.")
}

/// Clear the stored session.
pub fn clear_session() -> Result<()> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}
