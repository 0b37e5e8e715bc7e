//! The generic list-management engine.
//!
//! One [`ListPage`] value backs one listing screen for its whole lifetime:
//! created on mount, populated by a fetch, driven by search and pagination,
//! reconciled after server-confirmed deletes and updates, and dropped on
//! unmount. All operations run to completion on the caller's thread; the
//! remote calls inside [`ListPage::refresh`] and [`ListPage::commit`] are
//! the only suspension points, and both are also available as synchronous
//! begin/complete pairs so a view layer can drive them itself.

mod filter;
mod mutation;
mod pager;
mod store;

pub use mutation::{MutationKind, MutationStatus, Outcome};
pub use pager::{page_slice, total_pages};
pub use store::FetchTicket;

use tracing::debug;

use crate::error::Error;
use crate::record::{Patch, Record};
use crate::resource::ResourceSpec;
use crate::traits::Session;
use crate::types::RecordKey;
use crate::Result;

use mutation::MutationCoordinator;
use store::CollectionState;

/// State and behavior of one listing screen.
pub struct ListPage {
    spec: ResourceSpec,
    state: CollectionState,
    mutations: MutationCoordinator,
}

impl ListPage {
    pub fn new(spec: ResourceSpec) -> Self {
        Self {
            spec,
            state: CollectionState::new(),
            mutations: MutationCoordinator::default(),
        }
    }

    pub fn resource(&self) -> &ResourceSpec {
        &self.spec
    }

    // ---- fetching -------------------------------------------------------

    /// Issue a ticket before starting a fetch.
    ///
    /// Tickets order overlapping fetches: only the most recently issued one
    /// may apply its result.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state.begin_fetch()
    }

    /// Apply a completed fetch. Returns `Ok(false)` when the ticket was
    /// stale and the response was discarded.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, records: Vec<Record>) -> Result<bool> {
        self.state.load(ticket, records, self.spec.id_field())
    }

    /// Fetch the collection through a session and apply it.
    pub async fn refresh<S: Session>(&mut self, session: &S) -> Result<()> {
        let ticket = self.begin_fetch();
        let records = session.fetch_collection(&self.spec).await?;
        self.complete_fetch(ticket, records)?;
        Ok(())
    }

    // ---- search ---------------------------------------------------------

    /// Set the search query, recompute the filtered view, and return to
    /// page 1.
    pub fn set_query(&mut self, query: &str) {
        self.state.query = filter::normalize(query);
        self.state.derived = filter::derive(
            &self.state.authoritative,
            self.spec.filter_fields(),
            &self.state.query,
        );
        self.state.page = 1;
    }

    /// The active (normalized) query.
    pub fn query(&self) -> &str {
        &self.state.query
    }

    // ---- pagination -----------------------------------------------------

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.state.derived.len(), self.spec.page_size())
    }

    /// Jump to a page.
    ///
    /// # Errors
    ///
    /// Out-of-range pages are rejected and leave state unchanged; view
    /// layers are expected to disable navigation outside the valid range
    /// rather than rely on this error.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        let total = self.total_pages();
        if page < 1 || page > total {
            return Err(Error::OutOfRange { page, total });
        }
        self.state.page = page;
        Ok(())
    }

    /// Move one page back; a no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.state.page > 1 {
            self.state.page -= 1;
        }
    }

    /// Move one page forward; a no-op on the last page.
    pub fn next_page(&mut self) {
        if self.state.page < self.total_pages() {
            self.state.page += 1;
        }
    }

    // ---- views ----------------------------------------------------------

    /// The full collection as last fetched.
    pub fn records(&self) -> &[Record] {
        &self.state.authoritative
    }

    /// The subsequence matching the active query.
    pub fn filtered(&self) -> &[Record] {
        &self.state.derived
    }

    /// The records visible on the current page.
    pub fn visible(&self) -> &[Record] {
        pager::page_slice(&self.state.derived, self.state.page, self.spec.page_size())
    }

    // ---- mutations ------------------------------------------------------

    /// Start confirming a delete.
    pub fn begin_delete(&mut self, key: RecordKey) -> Result<()> {
        self.mutations.begin(key, MutationKind::Delete)
    }

    /// Start confirming an update.
    ///
    /// # Errors
    ///
    /// A patch that rewrites the identifier field is a precondition error.
    pub fn begin_update(&mut self, key: RecordKey, patch: Patch) -> Result<()> {
        if patch.touches(self.spec.id_field()) {
            return Err(Error::precondition(format!(
                "patch must not rewrite the identifier field '{}'",
                self.spec.id_field()
            )));
        }
        self.mutations.begin(key, MutationKind::Update(patch))
    }

    /// Back out of a confirming mutation without any remote call.
    pub fn cancel(&mut self, key: &RecordKey) -> Result<Outcome> {
        self.mutations.cancel(key)
    }

    /// Where the mutation for `key` currently stands; view layers disable
    /// the triggering control while this is not `Idle`.
    pub fn mutation_status(&self, key: &RecordKey) -> MutationStatus {
        self.mutations.status(key)
    }

    /// Move a confirmed mutation into flight, handing back what to send.
    pub fn launch(&mut self, key: &RecordKey) -> Result<MutationKind> {
        self.mutations.launch(key)
    }

    /// Conclude an in-flight delete with the remote result.
    ///
    /// A `NotFound` failure still reconciles local state: the record is
    /// gone server-side either way, so the stale row is dropped and the
    /// outcome reports it as already removed. Any other failure leaves the
    /// collection untouched.
    pub fn settle_delete(&mut self, key: &RecordKey, result: Result<()>) -> Result<Outcome> {
        match self.mutations.settle(key)? {
            MutationKind::Delete => {}
            MutationKind::Update(_) => {
                return Err(Error::precondition(format!(
                    "the in-flight mutation for '{key}' is an update"
                )));
            }
        }

        match result {
            Ok(()) => {
                self.state.remove(key, self.spec.id_field());
                self.reconcile();
                Ok(Outcome::Applied)
            }
            Err(Error::NotFound { .. }) => {
                debug!(%key, "record already gone server-side, reconciling");
                self.state.remove(key, self.spec.id_field());
                self.reconcile();
                Ok(Outcome::AlreadyRemoved)
            }
            Err(err) => Err(err),
        }
    }

    /// Conclude an in-flight update with the remote result.
    ///
    /// The server's returned record is authoritative: its fields are merged
    /// over the local row. Failures leave the collection untouched.
    pub fn settle_update(&mut self, key: &RecordKey, result: Result<Record>) -> Result<Outcome> {
        match self.mutations.settle(key)? {
            MutationKind::Update(_) => {}
            MutationKind::Delete => {
                return Err(Error::precondition(format!(
                    "the in-flight mutation for '{key}' is a delete"
                )));
            }
        }

        match result {
            Ok(updated) => {
                self.state
                    .merge(key, &Patch::from(updated), self.spec.id_field());
                self.reconcile();
                Ok(Outcome::Applied)
            }
            Err(err) => Err(err),
        }
    }

    /// Drive a confirmed mutation to completion through a session.
    pub async fn commit<S: Session>(&mut self, key: &RecordKey, session: &S) -> Result<Outcome> {
        match self.launch(key)? {
            MutationKind::Delete => {
                let result = session.delete_record(&self.spec, key).await;
                self.settle_delete(key, result)
            }
            MutationKind::Update(patch) => {
                let result = session.update_record(&self.spec, key, &patch).await;
                self.settle_update(key, result)
            }
        }
    }

    /// Recompute the filtered view from the full collection and re-clamp
    /// the page after a mutation shrank or reshaped it.
    fn reconcile(&mut self) {
        self.state.derived = filter::derive(
            &self.state.authoritative,
            self.spec.filter_fields(),
            &self.state.query,
        );
        self.state.page = pager::clamp(self.state.page, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceSpec;
    use serde_json::json;

    fn users_spec() -> ResourceSpec {
        ResourceSpec::new("user", "users", "_id")
            .unwrap()
            .with_filter_fields(["name", "phone"])
            .unwrap()
    }

    fn user(id: &str, name: &str, phone: &str) -> Record {
        Record::new(json!({ "_id": id, "name": name, "phone": phone })).unwrap()
    }

    fn loaded_page(records: Vec<Record>) -> ListPage {
        let mut page = ListPage::new(users_spec());
        let ticket = page.begin_fetch();
        page.complete_fetch(ticket, records).unwrap();
        page
    }

    fn twelve_users() -> Vec<Record> {
        (1..=12)
            .map(|i| {
                let phone = if i == 5 { "555-1234" } else { "410-0000" };
                let name = if i == 12 { "User5x" } else { "Person" };
                user(&format!("u{i}"), name, phone)
            })
            .collect()
    }

    #[test]
    fn load_then_empty_query_round_trips() {
        let records = twelve_users();
        let mut page = loaded_page(records.clone());
        page.set_query("");
        assert_eq!(page.filtered(), &records[..]);
    }

    #[test]
    fn query_matches_any_configured_field() {
        // "5" hits u5 via its phone number and u12 via its name.
        let mut page = loaded_page(twelve_users());
        page.set_query("5");

        assert_eq!(page.filtered().len(), 2);
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.visible().len(), 2);
        assert_eq!(page.visible()[0].key("_id").unwrap().as_str(), "u5");
        assert_eq!(page.visible()[1].key("_id").unwrap().as_str(), "u12");
    }

    #[test]
    fn query_resets_to_first_page() {
        let records: Vec<Record> = (0..25)
            .map(|i| user(&format!("u{i}"), "Person", "410"))
            .collect();
        let mut page = loaded_page(records);
        page.set_page(3).unwrap();
        page.set_query("person");
        assert_eq!(page.page(), 1);
    }

    #[test]
    fn out_of_range_page_is_rejected_and_state_kept() {
        let mut page = loaded_page(twelve_users());
        assert!(matches!(
            page.set_page(3),
            Err(Error::OutOfRange { page: 3, total: 2 })
        ));
        assert_eq!(page.page(), 1);
        assert!(matches!(page.set_page(0), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn prev_next_are_boundary_no_ops() {
        let mut page = loaded_page(twelve_users());
        page.prev_page();
        assert_eq!(page.page(), 1);
        page.next_page();
        assert_eq!(page.page(), 2);
        page.next_page();
        assert_eq!(page.page(), 2);
    }

    #[test]
    fn delete_reconciles_both_views_under_active_query() {
        let mut page = loaded_page(twelve_users());
        page.set_query("5");
        assert_eq!(page.filtered().len(), 2);

        let u5 = RecordKey::new("u5");
        page.begin_delete(u5.clone()).unwrap();
        page.launch(&u5).unwrap();
        page.settle_delete(&u5, Ok(())).unwrap();

        assert_eq!(page.records().len(), 11);
        assert!(page.records().iter().all(|r| r.key("_id").unwrap() != u5));
        assert!(page.filtered().iter().all(|r| r.key("_id").unwrap() != u5));
        assert_eq!(page.filtered().len(), 1);
    }

    #[test]
    fn delete_on_last_page_reclamps() {
        // 21 records at page size 10: page 3 holds exactly one row.
        let records: Vec<Record> = (0..21)
            .map(|i| user(&format!("u{i}"), "Person", "410"))
            .collect();
        let mut page = loaded_page(records);
        page.set_page(3).unwrap();
        assert_eq!(page.visible().len(), 1);

        let last = RecordKey::new("u20");
        page.begin_delete(last.clone()).unwrap();
        page.launch(&last).unwrap();
        page.settle_delete(&last, Ok(())).unwrap();

        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.page(), 2);
        assert_eq!(page.visible().len(), 10);
    }

    #[test]
    fn not_found_delete_still_reconciles() {
        let mut page = loaded_page(twelve_users());
        let u7 = RecordKey::new("u7");

        page.begin_delete(u7.clone()).unwrap();
        page.launch(&u7).unwrap();
        let outcome = page
            .settle_delete(&u7, Err(Error::not_found("no such user")))
            .unwrap();

        assert_eq!(outcome, Outcome::AlreadyRemoved);
        assert_eq!(page.records().len(), 11);
    }

    #[test]
    fn failed_delete_leaves_state_untouched() {
        let mut page = loaded_page(twelve_users());
        let u7 = RecordKey::new("u7");

        page.begin_delete(u7.clone()).unwrap();
        page.launch(&u7).unwrap();
        let err = page
            .settle_delete(&u7, Err(Error::network("connection reset")))
            .unwrap_err();

        assert!(matches!(err, Error::Network { .. }));
        assert_eq!(page.records().len(), 12);
        // The slot is free again for a retry.
        assert_eq!(page.mutation_status(&u7), MutationStatus::Idle);
    }

    #[test]
    fn second_delete_while_in_flight_conflicts_without_remote_call() {
        let mut page = loaded_page(twelve_users());
        let u7 = RecordKey::new("u7");

        page.begin_delete(u7.clone()).unwrap();
        page.launch(&u7).unwrap();

        // The remote call for the first delete has not settled yet.
        let second = page.begin_delete(u7.clone());
        assert!(matches!(second, Err(Error::Conflict { .. })));
        assert_eq!(page.mutation_status(&u7), MutationStatus::InFlight);

        // The original can still settle normally.
        page.settle_delete(&u7, Ok(())).unwrap();
        assert_eq!(page.records().len(), 11);
    }

    #[test]
    fn cancelled_delete_makes_no_change() {
        let mut page = loaded_page(twelve_users());
        let u7 = RecordKey::new("u7");

        page.begin_delete(u7.clone()).unwrap();
        let outcome = page.cancel(&u7).unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(page.records().len(), 12);
        assert_eq!(page.mutation_status(&u7), MutationStatus::Idle);
    }

    #[test]
    fn update_merges_server_record() {
        let mut page = loaded_page(twelve_users());
        let u3 = RecordKey::new("u3");

        let patch = Patch::default().set("status", json!("active"));
        page.begin_update(u3.clone(), patch).unwrap();
        page.launch(&u3).unwrap();

        let updated = Record::new(json!({
            "_id": "u3",
            "name": "Person",
            "phone": "410-0000",
            "status": "active"
        }))
        .unwrap();
        let outcome = page.settle_update(&u3, Ok(updated)).unwrap();

        assert_eq!(outcome, Outcome::Applied);
        let row = page
            .records()
            .iter()
            .find(|r| r.key("_id").unwrap() == u3)
            .unwrap();
        assert_eq!(row.get("status").unwrap(), "active");
    }

    #[test]
    fn update_must_not_rewrite_identifier() {
        let mut page = loaded_page(twelve_users());
        let patch = Patch::default().set("_id", json!("other"));
        let result = page.begin_update(RecordKey::new("u3"), patch);
        assert!(matches!(result, Err(Error::Precondition { .. })));
    }

    #[test]
    fn updated_record_leaving_the_filter_drops_from_view() {
        let mut page = loaded_page(twelve_users());
        page.set_query("555");
        assert_eq!(page.filtered().len(), 1);

        let u5 = RecordKey::new("u5");
        let patch = Patch::default().set("phone", json!("410-9999"));
        page.begin_update(u5.clone(), patch).unwrap();
        page.launch(&u5).unwrap();

        let updated = Record::new(json!({
            "_id": "u5",
            "name": "Person",
            "phone": "410-9999"
        }))
        .unwrap();
        page.settle_update(&u5, Ok(updated)).unwrap();

        // The row no longer matches the active query.
        assert!(page.filtered().is_empty());
        assert_eq!(page.page(), 1);
    }

    #[test]
    fn stale_fetch_is_ignored_by_the_page() {
        let mut page = ListPage::new(users_spec());
        let first = page.begin_fetch();
        let second = page.begin_fetch();

        assert!(page
            .complete_fetch(second, vec![user("fresh", "A", "1")])
            .unwrap());
        assert!(!page
            .complete_fetch(first, vec![user("stale", "B", "2")])
            .unwrap());

        assert_eq!(page.records().len(), 1);
        assert_eq!(page.records()[0].key("_id").unwrap().as_str(), "fresh");
    }
}
