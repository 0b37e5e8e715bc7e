//! Request and response bodies of the admin REST API.

use serde::{Deserialize, Serialize};

use curia_core::Record;

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    /// The API distinguishes app and website sessions; admin logins are
    /// website-mode.
    pub mode: &'a str,
}

/// Response from the login endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<Record>,
}

/// Envelope for update responses: `{ "message": ..., "data": {record} }`.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateEnvelope {
    #[serde(default)]
    pub data: Option<Record>,
}

/// Error body the API attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
