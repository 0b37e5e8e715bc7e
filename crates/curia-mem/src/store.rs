//! In-memory storage for the local backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};
use uuid::Uuid;

use curia_core::{Error, Patch, Record, RecordKey, Result};

/// Account metadata held by the local backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LocalAccount {
    /// Identifier of the account's user record.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Password hash (bcrypt).
    pub password_hash: String,
}

#[derive(Debug, Default)]
struct StoreInner {
    accounts: HashMap<String, LocalAccount>,
    collections: HashMap<String, Vec<Record>>,
}

/// Process-local storage shared by a backend and its sessions.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register an account, hashing its password, and return its id.
    #[instrument(skip(self, password))]
    pub(crate) fn create_account(&self, email: &str, password: &str) -> Result<RecordKey> {
        let mut inner = self.inner.write().unwrap();
        if inner.accounts.contains_key(email) {
            return Err(Error::validation(format!(
                "an account for '{email}' already exists"
            )));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| Error::precondition(format!("failed to hash password: {e}")))?;
        let id = Uuid::new_v4().to_string();

        debug!(email, "creating local account");
        inner.accounts.insert(email.to_string(), LocalAccount {
            id: id.clone(),
            email: email.to_string(),
            password_hash,
        });
        Ok(RecordKey::new(id))
    }

    /// Verify credentials and return the matching account.
    pub(crate) fn verify_login(&self, email: &str, password: &str) -> Result<LocalAccount> {
        let inner = self.inner.read().unwrap();
        let account = inner
            .accounts
            .get(email)
            .ok_or_else(|| Error::auth("invalid email or password"))?;

        let verified = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| Error::precondition(format!("failed to verify password: {e}")))?;
        if !verified {
            return Err(Error::auth("invalid email or password"));
        }
        Ok(account.clone())
    }

    /// Replace the records stored under a resource path.
    ///
    /// Records without an identifier get a generated one, stamped with a
    /// creation time the way the real API does.
    pub(crate) fn seed(&self, path: &str, id_field: &str, records: Vec<Record>) -> Result<()> {
        let stamped = records
            .into_iter()
            .map(|record| {
                let mut value = record.into_value();
                let fields = value.as_object_mut().expect("records are always objects");
                fields
                    .entry(id_field.to_string())
                    .or_insert_with(|| json!(Uuid::new_v4().to_string()));
                fields
                    .entry("createdAt".to_string())
                    .or_insert_with(|| json!(Utc::now().to_rfc3339()));
                Record::new(value)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut inner = self.inner.write().unwrap();
        inner.collections.insert(path.to_string(), stamped);
        Ok(())
    }

    pub(crate) fn list(&self, path: &str) -> Vec<Record> {
        let inner = self.inner.read().unwrap();
        inner.collections.get(path).cloned().unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub(crate) fn delete(&self, path: &str, id_field: &str, key: &RecordKey) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let records = inner
            .collections
            .get_mut(path)
            .ok_or_else(|| Error::not_found(format!("no record '{key}'")))?;

        let before = records.len();
        records.retain(|record| {
            record
                .key(id_field)
                .map(|candidate| candidate != *key)
                .unwrap_or(true)
        });
        if records.len() == before {
            return Err(Error::not_found(format!("no record '{key}'")));
        }
        debug!(%key, path, "deleted record");
        Ok(())
    }

    #[instrument(skip(self, patch))]
    pub(crate) fn update(
        &self,
        path: &str,
        id_field: &str,
        key: &RecordKey,
        patch: &Patch,
    ) -> Result<Record> {
        if patch.touches(id_field) {
            return Err(Error::validation(format!(
                "the '{id_field}' field cannot be changed"
            )));
        }

        let mut inner = self.inner.write().unwrap();
        let records = inner
            .collections
            .get_mut(path)
            .ok_or_else(|| Error::not_found(format!("no record '{key}'")))?;

        let record = records
            .iter_mut()
            .find(|record| record.key(id_field).is_ok_and(|c| c == *key))
            .ok_or_else(|| Error::not_found(format!("no record '{key}'")))?;

        record.merge(patch);
        debug!(%key, path, "updated record");
        Ok(record.clone())
    }
}
