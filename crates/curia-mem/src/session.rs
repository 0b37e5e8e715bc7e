//! In-memory session implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use curia_core::traits::Session as SessionTrait;
use curia_core::{AccessToken, Patch, Record, RecordKey, ResourceSpec, Result};

use crate::backend::MemBackend;

/// Session for the in-memory backend.
///
/// Every call re-checks the bearer token, so an expired session fails with
/// the same authentication error the network backend would surface.
#[derive(Debug, Clone)]
pub struct MemSession {
    backend: MemBackend,
    account: RecordKey,
    token: AccessToken,
}

impl MemSession {
    pub(crate) fn new(backend: MemBackend, account: RecordKey, token: AccessToken) -> Self {
        Self {
            backend,
            account,
            token,
        }
    }
}

#[async_trait]
impl SessionTrait for MemSession {
    fn account(&self) -> &RecordKey {
        &self.account
    }

    fn token(&self) -> AccessToken {
        self.token.clone()
    }

    #[instrument(skip(self), fields(account = %self.account, resource = resource.path()))]
    async fn fetch_collection(&self, resource: &ResourceSpec) -> Result<Vec<Record>> {
        debug!("Listing records");
        self.backend.authorize(&self.token)?;
        Ok(self.backend.store().list(resource.path()))
    }

    #[instrument(skip(self), fields(account = %self.account, resource = resource.path(), %key))]
    async fn delete_record(&self, resource: &ResourceSpec, key: &RecordKey) -> Result<()> {
        debug!("Deleting record");
        self.backend.authorize(&self.token)?;
        self.backend
            .store()
            .delete(resource.path(), resource.id_field(), key)
    }

    #[instrument(skip(self, patch), fields(account = %self.account, resource = resource.path(), %key))]
    async fn update_record(
        &self,
        resource: &ResourceSpec,
        key: &RecordKey,
        patch: &Patch,
    ) -> Result<Record> {
        debug!("Updating record");
        self.backend.authorize(&self.token)?;
        self.backend
            .store()
            .update(resource.path(), resource.id_field(), key, patch)
    }
}
