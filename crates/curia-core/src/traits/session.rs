//! Authenticated session trait.

use async_trait::async_trait;

use crate::record::{Patch, Record};
use crate::resource::ResourceSpec;
use crate::types::RecordKey;
use crate::{AccessToken, Result};

/// An authenticated session for collection operations.
///
/// The session owns the bearer token and attaches it to every call. It
/// never inspects or refreshes the token; an authentication failure from
/// any call is surfaced upward for the caller to handle.
#[async_trait]
pub trait Session: Send + Sync {
    /// The identifier of the signed-in administrator account.
    fn account(&self) -> &RecordKey;

    /// The bearer token for this session.
    fn token(&self) -> AccessToken;

    /// Fetch the full collection backing a listing.
    async fn fetch_collection(&self, resource: &ResourceSpec) -> Result<Vec<Record>>;

    /// Delete one record by identifier.
    async fn delete_record(&self, resource: &ResourceSpec, key: &RecordKey) -> Result<()>;

    /// Apply a patch to one record and return the updated record.
    async fn update_record(
        &self,
        resource: &ResourceSpec,
        key: &RecordKey,
        patch: &Patch,
    ) -> Result<Record>;
}
