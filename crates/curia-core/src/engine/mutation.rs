//! Per-identifier mutation state machine.
//!
//! Every destructive or update operation moves through an explicit
//! confirm-then-call-then-reconcile lifecycle the view layer can observe:
//!
//! ```text
//! Idle -> Confirming -> InFlight -> settled (applied | failed)
//!           |
//!           +-> cancelled (no remote call)
//! ```
//!
//! The coordinator tracks the lifecycle only; applying a settled mutation to
//! the collection is the page's job, so the remote call itself can happen
//! anywhere in between.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::Error;
use crate::record::Patch;
use crate::types::RecordKey;

/// What a pending mutation will do once confirmed.
#[derive(Debug, Clone)]
pub enum MutationKind {
    Delete,
    Update(Patch),
}

/// How a mutation request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The remote call succeeded and local state reflects it.
    Applied,
    /// The server no longer had the record; local state was reconciled
    /// as if the delete had succeeded.
    AlreadyRemoved,
    /// The operator backed out before any remote call was made.
    Cancelled,
}

/// Observable lifecycle position of a mutation for one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Confirming,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Confirming,
    InFlight,
}

#[derive(Debug)]
struct Pending {
    kind: MutationKind,
    stage: Stage,
}

/// Tracks at most one pending mutation per identifier.
#[derive(Debug, Default)]
pub(crate) struct MutationCoordinator {
    pending: HashMap<RecordKey, Pending>,
}

impl MutationCoordinator {
    /// Start confirming a mutation. A second request for a key that is
    /// already pending, in either stage, is a conflict.
    pub(crate) fn begin(&mut self, key: RecordKey, kind: MutationKind) -> Result<(), Error> {
        if self.pending.contains_key(&key) {
            return Err(Error::conflict(format!(
                "a mutation for '{key}' is already pending"
            )));
        }
        self.pending.insert(key, Pending {
            kind,
            stage: Stage::Confirming,
        });
        Ok(())
    }

    /// Back out of a confirming mutation. No remote call was made; the
    /// result is the distinct cancelled outcome, not an error.
    pub(crate) fn cancel(&mut self, key: &RecordKey) -> Result<Outcome, Error> {
        match self.pending.get(key).map(|p| p.stage) {
            Some(Stage::Confirming) => {
                self.pending.remove(key);
                Ok(Outcome::Cancelled)
            }
            Some(Stage::InFlight) => Err(Error::conflict(format!(
                "the mutation for '{key}' is already in flight"
            ))),
            None => Err(Error::precondition(format!(
                "no pending mutation for '{key}'"
            ))),
        }
    }

    /// Move a confirmed mutation into flight, handing back what to send.
    pub(crate) fn launch(&mut self, key: &RecordKey) -> Result<MutationKind, Error> {
        let pending = self.pending.get_mut(key).ok_or_else(|| {
            Error::precondition(format!("no pending mutation for '{key}'"))
        })?;
        match pending.stage {
            Stage::InFlight => Err(Error::conflict(format!(
                "the mutation for '{key}' is already in flight"
            ))),
            Stage::Confirming => {
                pending.stage = Stage::InFlight;
                Ok(pending.kind.clone())
            }
        }
    }

    /// Conclude an in-flight mutation, returning what was sent.
    pub(crate) fn settle(&mut self, key: &RecordKey) -> Result<MutationKind, Error> {
        match self.pending.entry(key.clone()) {
            Entry::Occupied(entry) if entry.get().stage == Stage::InFlight => {
                Ok(entry.remove().kind)
            }
            _ => Err(Error::precondition(format!(
                "no in-flight mutation for '{key}'"
            ))),
        }
    }

    pub(crate) fn status(&self, key: &RecordKey) -> MutationStatus {
        match self.pending.get(key).map(|p| p.stage) {
            None => MutationStatus::Idle,
            Some(Stage::Confirming) => MutationStatus::Confirming,
            Some(Stage::InFlight) => MutationStatus::InFlight,
        }
    }
}
