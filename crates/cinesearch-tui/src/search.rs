//! Search state controller.
//!
//! Owns the result list, total count, error and loading status. Requests
//! are issued through [`SearchController::search`] and applied with
//! [`SearchController::resolve`] in the order their responses arrive.
//!
//! Responses are not sequenced: when two searches overlap, whichever
//! resolves last overwrites the state, even if it was issued first.

use anyhow::Result;
use cinesearch_api::omdb::{OmdbApi, SearchParams, SearchResponse, SummaryItem};

/// Message shown when OMDb reports no match without an error text.
pub const NO_MATCH_MESSAGE: &str = "No movies found";

/// Message shown when the request itself failed.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch movies. Please try again.";

/// Total count shown when nothing has been found.
const ZERO_TOTAL: &str = "0";

/// Search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Results are available.
    Success,
    /// The query was blank; no request was made.
    Empty,
    /// The API reported no match or the request failed.
    Error,
}

/// Read-only snapshot of the search state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    /// Current status.
    pub status: SearchStatus,
    /// Matching titles (first page only).
    pub items: Vec<SummaryItem>,
    /// Total match count as reported by OMDb.
    pub total_results: String,
    /// Human-readable error.
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            status: SearchStatus::Idle,
            items: Vec::new(),
            total_results: String::from(ZERO_TOTAL),
            error: None,
        }
    }
}

impl SearchState {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }
}

/// A search that has been started and still has to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PendingSearch {
    /// Issue order of this request (1-based).
    pub generation: u64,
    /// Parameters to send.
    pub params: SearchParams,
}

/// Result of executing a search, ready to be applied.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum SearchOutcome {
    /// Positive match flag.
    Found {
        /// Matching titles.
        items: Vec<SummaryItem>,
        /// Total count (absent when OMDb omitted it).
        total_results: Option<String>,
    },
    /// Negative match flag.
    NoMatch {
        /// Error text from OMDb, if any.
        message: Option<String>,
    },
    /// Transport, status or decoding failure.
    Failed(anyhow::Error),
}

impl SearchOutcome {
    /// Maps an API result to an outcome.
    #[must_use]
    pub fn from_result(result: Result<SearchResponse>) -> Self {
        match result {
            Ok(response) if response.response => Self::Found {
                items: response.search,
                total_results: response.total_results,
            },
            Ok(response) => Self::NoMatch {
                message: response.error,
            },
            Err(err) => Self::Failed(err),
        }
    }
}

/// Executes a pending search against the API.
pub async fn execute_search<A: OmdbApi>(api: &A, params: &SearchParams) -> SearchOutcome {
    SearchOutcome::from_result(api.search(params).await)
}

/// Owns the search state and issues requests.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController {
    state: SearchState,
    issued: u64,
}

impl SearchController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Starts a search.
    ///
    /// A blank query resets the state to empty and returns `None`; no request
    /// must be made. Otherwise the state becomes loading and the request to
    /// execute is returned.
    pub fn search(&mut self, params: SearchParams) -> Option<PendingSearch> {
        if params.is_blank() {
            tracing::debug!("blank query, resetting search state");
            self.state = SearchState {
                status: SearchStatus::Empty,
                ..SearchState::default()
            };
            return None;
        }

        self.issued = self.issued.saturating_add(1);
        self.state.status = SearchStatus::Loading;
        self.state.error = None;
        tracing::debug!(generation = self.issued, query = %params.query, "search issued");

        Some(PendingSearch {
            generation: self.issued,
            params,
        })
    }

    /// Applies the outcome of a previously issued search.
    ///
    /// Outcomes are applied unconditionally, so a response to an older
    /// request that arrives late replaces newer results.
    pub fn resolve(&mut self, generation: u64, outcome: SearchOutcome) {
        if generation < self.issued {
            tracing::debug!(
                generation,
                latest = self.issued,
                "applying response of a superseded search"
            );
        }

        match outcome {
            SearchOutcome::Found {
                items,
                total_results,
            } => {
                self.state = SearchState {
                    status: SearchStatus::Success,
                    items,
                    total_results: total_results.unwrap_or_else(|| String::from(ZERO_TOTAL)),
                    error: None,
                };
            }
            SearchOutcome::NoMatch { message } => {
                self.fail(message.unwrap_or_else(|| String::from(NO_MATCH_MESSAGE)));
            }
            SearchOutcome::Failed(err) => {
                tracing::debug!(error = ?err, "search request failed");
                self.fail(String::from(FETCH_FAILED_MESSAGE));
            }
        }
    }

    /// Issues a search and applies its outcome before returning.
    #[cfg(test)]
    pub(crate) async fn search_now<A: OmdbApi>(&mut self, api: &A, params: SearchParams) {
        if let Some(pending) = self.search(params) {
            let outcome = execute_search(api, &pending.params).await;
            self.resolve(pending.generation, outcome);
        }
    }

    fn fail(&mut self, message: String) {
        self.state = SearchState {
            status: SearchStatus::Error,
            items: Vec::new(),
            total_results: String::from(ZERO_TOTAL),
            error: Some(message),
        };
    }
}
