//! In-memory backend implementation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use curia_core::traits::Backend;
use curia_core::{AccessToken, Credentials, Error, Record, RecordKey, ResourceSpec, Result};

use crate::session::MemSession;
use crate::store::MemStore;

/// How long an issued token stays valid.
const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// Bearer token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// A process-local admin API for tests and offline exploration.
///
/// Cloning shares the underlying storage, so a backend handle can seed
/// collections while its sessions read them.
#[derive(Debug, Clone)]
pub struct MemBackend {
    store: MemStore,
    secret: String,
    token_ttl: Duration,
}

impl MemBackend {
    pub fn new() -> Self {
        Self {
            store: MemStore::new(),
            secret: Uuid::new_v4().to_string(),
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Override the token lifetime. Mainly useful for expiry tests.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Register an administrator account and return its identifier.
    pub fn create_account(&self, email: &str, password: &str) -> Result<RecordKey> {
        self.store.create_account(email, password)
    }

    /// Replace the records behind a listing.
    pub fn seed(&self, resource: &ResourceSpec, records: Vec<Record>) -> Result<()> {
        self.store.seed(resource.path(), resource.id_field(), records)
    }

    pub(crate) fn store(&self) -> &MemStore {
        &self.store
    }

    fn issue_token(&self, account: &RecordKey) -> Result<AccessToken> {
        let claims = Claims {
            sub: account.to_string(),
            exp: (Utc::now() + self.token_ttl).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| Error::precondition(format!("failed to encode token: {e}")))?;
        Ok(AccessToken::new(token))
    }

    /// Check a bearer token and return the account it belongs to.
    pub(crate) fn authorize(&self, token: &AccessToken) -> Result<RecordKey> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| Error::auth(format!("invalid or expired token: {e}")))?;
        Ok(RecordKey::new(data.claims.sub))
    }
}

impl Default for MemBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemBackend {
    type Session = MemSession;

    async fn login(&self, credentials: Credentials) -> Result<Self::Session> {
        let account = self
            .store
            .verify_login(credentials.email(), credentials.password())?;
        let key = RecordKey::new(account.id);
        let token = self.issue_token(&key)?;

        debug!(email = %account.email, "local login");
        Ok(MemSession::new(self.clone(), key, token))
    }
}
