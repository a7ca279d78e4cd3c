//! Search state snapshot.
//!
//! A `SearchState` is never mutated in place. Each transition returns a new
//! snapshot so a frame always renders one consistent state.

use std::sync::Arc;

use crate::api::protocol::{VariantRecord, VariantsResponse};

/// Shown when the search button is pressed with an empty gene field.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a gene name";

/// Shown for every failed request, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch variants";

/// Everything the search view renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text currently in the gene field
    pub gene_query: String,
    /// Records from the last successful search, in server order
    pub results: Arc<[VariantRecord]>,
    /// Validation or request failure message
    pub error_message: Option<String>,
    /// Trace token from the last successful search
    pub request_id: Option<String>,
    /// True between dispatch and resolution
    pub is_loading: bool,
}

impl SearchState {
    /// Whether the gene field holds something worth sending.
    pub fn has_searchable_query(&self) -> bool {
        !self.gene_query.trim().is_empty()
    }

    /// The gene field was edited.
    pub fn with_query(&self, gene_query: &str) -> Self {
        Self {
            gene_query: gene_query.to_string(),
            ..self.clone()
        }
    }

    /// The search was refused because the gene field is blank.
    ///
    /// Loading is left alone: a request already in flight still resolves.
    pub fn rejected(&self) -> Self {
        Self {
            results: Arc::default(),
            error_message: Some(EMPTY_QUERY_MESSAGE.to_string()),
            request_id: None,
            ..self.clone()
        }
    }

    /// A request was dispatched. Results, error and request id from the
    /// previous search are dropped in the same step.
    pub fn loading(&self) -> Self {
        Self {
            gene_query: self.gene_query.clone(),
            results: Arc::default(),
            error_message: None,
            request_id: None,
            is_loading: true,
        }
    }

    /// The request completed with a decoded body.
    pub fn succeeded(&self, response: VariantsResponse) -> Self {
        Self {
            gene_query: self.gene_query.clone(),
            results: response.results.into(),
            error_message: None,
            request_id: response.request_id,
            is_loading: false,
        }
    }

    /// The request failed for any reason.
    pub fn failed(&self) -> Self {
        Self {
            gene_query: self.gene_query.clone(),
            results: Arc::default(),
            error_message: Some(FETCH_FAILED_MESSAGE.to_string()),
            request_id: None,
            is_loading: false,
        }
    }
}
