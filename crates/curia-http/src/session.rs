//! REST-backed session implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use curia_core::traits::Session as SessionTrait;
use curia_core::{AccessToken, ApiUrl, Error, Patch, Record, RecordKey, ResourceSpec, Result};

use crate::client::RestClient;
use crate::wire::UpdateEnvelope;

/// Session for a REST-backed admin API.
#[derive(Clone)]
pub struct HttpSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    account: RecordKey,
    token: AccessToken,
    client: RestClient,
}

impl HttpSession {
    pub(crate) fn new(client: RestClient, account: RecordKey, token: AccessToken) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                account,
                token,
                client,
            }),
        }
    }

    /// Restore a session from a persisted account id and token.
    pub fn from_persisted(api: ApiUrl, account: RecordKey, token: AccessToken) -> Self {
        Self::new(RestClient::new(api), account, token)
    }

    /// Returns the API base URL for this session.
    pub fn url(&self) -> &ApiUrl {
        self.inner.client.api()
    }
}

#[async_trait]
impl SessionTrait for HttpSession {
    fn account(&self) -> &RecordKey {
        &self.inner.account
    }

    fn token(&self) -> AccessToken {
        self.inner.token.clone()
    }

    #[instrument(skip(self), fields(account = %self.inner.account, resource = resource.path()))]
    async fn fetch_collection(&self, resource: &ResourceSpec) -> Result<Vec<Record>> {
        debug!("Fetching collection");
        let path = format!("{}/all", resource.path());
        let body: Value = self
            .inner
            .client
            .get_authed(&path, self.inner.token.as_str())
            .await?;

        match body.get(resource.envelope()) {
            Some(records) => serde_json::from_value(records.clone())
                .map_err(|e| Error::network(format!("malformed collection response: {e}"))),
            None => {
                // Some endpoints omit the envelope key entirely when the
                // collection is empty.
                warn!(envelope = resource.envelope(), "response carried no envelope key");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self), fields(account = %self.inner.account, resource = resource.path(), %key))]
    async fn delete_record(&self, resource: &ResourceSpec, key: &RecordKey) -> Result<()> {
        debug!("Deleting record");
        let path = format!("{}/{}", resource.path(), key);
        self.inner
            .client
            .delete_authed(&path, self.inner.token.as_str())
            .await
    }

    #[instrument(skip(self, patch), fields(account = %self.inner.account, resource = resource.path(), %key))]
    async fn update_record(
        &self,
        resource: &ResourceSpec,
        key: &RecordKey,
        patch: &Patch,
    ) -> Result<Record> {
        debug!("Updating record");
        let path = format!("{}/{}", resource.path(), key);
        let body: Value = self
            .inner
            .client
            .put_authed(&path, patch, self.inner.token.as_str())
            .await?;

        // Updates usually come back as `{ "message": ..., "data": {record} }`;
        // fall back to the body itself being the record.
        if let Ok(UpdateEnvelope { data: Some(record) }) =
            serde_json::from_value::<UpdateEnvelope>(body.clone())
        {
            return Ok(record);
        }
        Record::new(body).map_err(|_| Error::network("malformed update response"))
    }
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("account", &self.inner.account)
            .field("api", &self.inner.client.api().as_str())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
