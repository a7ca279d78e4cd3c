//! Search session: owns the current snapshot and sequences requests.
//!
//! Every dispatched search gets a ticket with a sequence number. When a
//! response comes back it is matched against the most recent ticket; under
//! the default policy anything older is dropped, so a slow response can
//! never overwrite a newer search.

use std::sync::Arc;

use crate::api::protocol::VariantsResponse;
use crate::config::StaleResponsePolicy;
use crate::search::state::SearchState;
use crate::Result;

/// Handle for one dispatched search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Monotonically increasing dispatch number, starting at 1
    pub seq: u64,
    /// Gene value to send, exactly as typed
    pub gene: String,
}

/// What happened to a response handed to [`SearchSession::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response updated the state.
    Applied,
    /// A newer search was dispatched since; the response was dropped.
    Stale,
}

/// Owner of the search state for one window.
#[derive(Debug)]
pub struct SearchSession {
    state: Arc<SearchState>,
    policy: StaleResponsePolicy,
    last_seq: u64,
    awaiting: Option<u64>,
}

impl SearchSession {
    /// Create an idle session.
    pub fn new(policy: StaleResponsePolicy) -> Self {
        Self {
            state: Arc::new(SearchState::default()),
            policy,
            last_seq: 0,
            awaiting: None,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<SearchState> {
        Arc::clone(&self.state)
    }

    /// Record an edit of the gene field.
    pub fn set_query(&mut self, gene_query: &str) {
        if self.state.gene_query != gene_query {
            self.replace(self.state.with_query(gene_query));
        }
    }

    /// Start a search for the current gene field.
    ///
    /// Returns `None` when the field is blank: the validation message is set
    /// and nothing should be sent. Otherwise the state switches to loading
    /// before this returns, and the caller must dispatch the ticket and feed
    /// its outcome back through [`resolve`](Self::resolve).
    pub fn run_search(&mut self) -> Option<SearchTicket> {
        if !self.state.has_searchable_query() {
            tracing::debug!("Search rejected: empty gene");
            self.replace(self.state.rejected());
            return None;
        }

        self.last_seq += 1;
        self.awaiting = Some(self.last_seq);
        self.replace(self.state.loading());

        let ticket = SearchTicket {
            seq: self.last_seq,
            gene: self.state.gene_query.clone(),
        };
        tracing::info!(seq = ticket.seq, gene = %ticket.gene, "Variant search dispatched");
        Some(ticket)
    }

    /// Apply the outcome of a dispatched search.
    pub fn resolve(&mut self, seq: u64, outcome: Result<VariantsResponse>) -> Resolution {
        if self.policy == StaleResponsePolicy::Discard && self.awaiting != Some(seq) {
            tracing::debug!(seq, awaiting = ?self.awaiting, "Dropping stale search response");
            return Resolution::Stale;
        }
        self.awaiting = None;

        let next = match outcome {
            Ok(response) => {
                tracing::info!(
                    seq,
                    results = response.results.len(),
                    request_id = response.request_id.as_deref().unwrap_or("-"),
                    "Variant search completed"
                );
                self.state.succeeded(response)
            }
            Err(e) => {
                tracing::warn!(seq, kind = e.kind(), "Variant search failed: {}", e);
                self.state.failed()
            }
        };
        self.replace(next);
        Resolution::Applied
    }

    /// Whether a dispatched search has not resolved yet.
    pub fn is_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    fn replace(&mut self, next: SearchState) {
        self.state = Arc::new(next);
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(StaleResponsePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::protocol::VariantRecord;
    use crate::search::state::{EMPTY_QUERY_MESSAGE, FETCH_FAILED_MESSAGE};
    use crate::MutationBrowserError;

    fn response(genes: &[&str], request_id: Option<&str>) -> VariantsResponse {
        VariantsResponse {
            results: genes
                .iter()
                .map(|g| VariantRecord {
                    gene: (*g).into(),
                    ..Default::default()
                })
                .collect(),
            request_id: request_id.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_query_is_rejected_without_ticket() {
        let mut session = SearchSession::default();
        assert_eq!(session.run_search(), None);

        let state = session.state();
        assert_eq!(state.error_message.as_deref(), Some(EMPTY_QUERY_MESSAGE));
        assert!(state.results.is_empty());
        assert_eq!(state.request_id, None);
        assert!(!state.is_loading);
        assert!(!session.is_awaiting());

        session.set_query("   ");
        assert_eq!(session.run_search(), None);
    }

    #[test]
    fn test_run_search_switches_to_loading_synchronously() {
        let mut session = SearchSession::default();
        session.set_query("TP53");
        let seq = session.run_search().unwrap().seq;
        session.resolve(seq, Ok(response(&["TP53"], Some("req-1"))));

        session.set_query("KRAS");
        let ticket = session.run_search().unwrap();
        assert_eq!(ticket.gene, "KRAS");
        assert_eq!(ticket.seq, 2);

        let state = session.state();
        assert!(state.is_loading);
        assert!(state.results.is_empty());
        assert_eq!(state.error_message, None);
        assert_eq!(state.request_id, None);
    }

    #[test]
    fn test_ticket_carries_gene_verbatim() {
        let mut session = SearchSession::default();
        session.set_query(" TP53 ");
        assert_eq!(session.run_search().unwrap().gene, " TP53 ");
    }

    #[test]
    fn test_success_then_failure() {
        let mut session = SearchSession::default();
        session.set_query("TP53");

        let ticket = session.run_search().unwrap();
        let resolution = session.resolve(ticket.seq, Ok(response(&["TP53", "TP53"], Some("r"))));
        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(session.state().results.len(), 2);
        assert!(!session.state().is_loading);

        let ticket = session.run_search().unwrap();
        session.resolve(ticket.seq, Err(MutationBrowserError::HttpStatus(500)));
        let state = session.state();
        assert_eq!(state.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_each_search_resolves_once() {
        let mut session = SearchSession::default();
        session.set_query("TP53");
        let ticket = session.run_search().unwrap();

        assert_eq!(
            session.resolve(ticket.seq, Ok(response(&["TP53"], None))),
            Resolution::Applied
        );
        assert_eq!(
            session.resolve(ticket.seq, Err(MutationBrowserError::Transport("late".into()))),
            Resolution::Stale
        );
        assert_eq!(session.state().error_message, None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = SearchSession::default();
        session.set_query("TP53");
        let first = session.run_search().unwrap();
        session.set_query("KRAS");
        let second = session.run_search().unwrap();

        // Second resolves first, then the slow first response arrives.
        session.resolve(second.seq, Ok(response(&["KRAS"], Some("req-kras"))));
        let resolution = session.resolve(first.seq, Ok(response(&["TP53"], Some("req-tp53"))));

        assert_eq!(resolution, Resolution::Stale);
        let state = session.state();
        assert_eq!(state.results[0].gene.to_string(), "KRAS");
        assert_eq!(state.request_id.as_deref(), Some("req-kras"));
    }

    #[test]
    fn test_loading_holds_until_latest_resolves() {
        let mut session = SearchSession::default();
        session.set_query("TP53");
        let first = session.run_search().unwrap();
        let second = session.run_search().unwrap();

        session.resolve(first.seq, Err(MutationBrowserError::HttpStatus(502)));
        let state = session.state();
        assert!(state.is_loading);
        assert_eq!(state.error_message, None);

        session.resolve(second.seq, Ok(response(&[], None)));
        assert!(!session.state().is_loading);
    }

    #[test]
    fn test_apply_policy_keeps_last_resolved() {
        let mut session = SearchSession::new(StaleResponsePolicy::Apply);
        session.set_query("TP53");
        let first = session.run_search().unwrap();
        session.set_query("KRAS");
        let second = session.run_search().unwrap();

        session.resolve(second.seq, Ok(response(&["KRAS"], None)));
        let resolution = session.resolve(first.seq, Ok(response(&["TP53"], None)));

        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(session.state().results[0].gene.to_string(), "TP53");
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut session = SearchSession::default();
        session.set_query("TP53");
        let before = session.state();
        session.run_search();

        assert!(!before.is_loading);
        assert!(session.state().is_loading);
    }
}
