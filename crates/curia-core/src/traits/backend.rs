//! Backend trait.

use async_trait::async_trait;

use crate::{Credentials, Result};

use super::Session;

/// An admin API backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Session type for this backend.
    type Session: Session;

    /// Authenticate and create a new session.
    ///
    /// Token issuance is entirely the backend's concern; the returned
    /// session carries the bearer token as an opaque value.
    async fn login(&self, credentials: Credentials) -> Result<Self::Session>;
}
