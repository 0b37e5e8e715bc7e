//! The collection store: the full fetched collection and its filtered view.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Error;
use crate::record::{Patch, Record};
use crate::types::RecordKey;

/// Token identifying one issued fetch.
///
/// Loads apply in issuance order: completing a fetch whose ticket is no
/// longer the latest is discarded, so a slow response can never overwrite
/// fresher data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// In-memory state of one listing page.
///
/// `authoritative` is the full collection as last fetched; `derived` is the
/// subsequence matching the active query. Both are mutated only through the
/// operations below, which keep the identifier-uniqueness invariant intact.
#[derive(Debug, Default)]
pub(crate) struct CollectionState {
    pub(crate) authoritative: Vec<Record>,
    pub(crate) derived: Vec<Record>,
    pub(crate) query: String,
    pub(crate) page: usize,
    issued: u64,
}

impl CollectionState {
    pub(crate) fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Issue a ticket for a fetch about to be started.
    pub(crate) fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Replace the collection wholesale with a completed fetch.
    ///
    /// Returns `Ok(false)` without touching state when `ticket` is stale.
    /// Records with identifier collisions keep their first occurrence;
    /// a record without a usable identifier fails the whole load.
    pub(crate) fn load(
        &mut self,
        ticket: FetchTicket,
        records: Vec<Record>,
        id_field: &str,
    ) -> Result<bool, Error> {
        if ticket.0 != self.issued {
            debug!(
                applied = ticket.0,
                latest = self.issued,
                "discarding stale fetch response"
            );
            return Ok(false);
        }

        let mut seen: HashSet<RecordKey> = HashSet::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());
        for record in records {
            let key = record.key(id_field)?;
            if seen.insert(key.clone()) {
                unique.push(record);
            } else {
                warn!(%key, "dropping record with duplicate identifier");
            }
        }

        self.authoritative = unique;
        self.derived = self.authoritative.clone();
        self.query.clear();
        self.page = 1;
        Ok(true)
    }

    /// Remove the record with the given identifier from both sequences.
    ///
    /// A no-op (not an error) when absent.
    pub(crate) fn remove(&mut self, key: &RecordKey, id_field: &str) -> bool {
        let before = self.authoritative.len();
        let matches_key = |record: &Record| {
            record
                .key(id_field)
                .is_ok_and(|candidate| candidate == *key)
        };
        self.authoritative.retain(|record| !matches_key(record));
        self.derived.retain(|record| !matches_key(record));
        self.authoritative.len() != before
    }

    /// Merge a patch into the matching record in both sequences.
    ///
    /// A no-op (not an error) when absent.
    pub(crate) fn merge(&mut self, key: &RecordKey, patch: &Patch, id_field: &str) -> bool {
        let mut touched = false;
        for list in [&mut self.authoritative, &mut self.derived] {
            if let Some(record) = list
                .iter_mut()
                .find(|record| record.key(id_field).is_ok_and(|c| c == *key))
            {
                record.merge(patch);
                touched = true;
            }
        }
        touched
    }
}
