//! Details state controller.
//!
//! Holds at most one title's full details. Unlike search results, lookup
//! responses are matched against the id currently requested: a response for
//! an id that was superseded or cleared is dropped.

use anyhow::Result;
use cinesearch_api::omdb::{DetailItem, DetailResponse, OmdbApi};

/// Message shown when OMDb reports no match without an error text.
pub const LOOKUP_NO_MATCH_MESSAGE: &str = "Failed to fetch movie details";

/// Message shown when the lookup request itself failed.
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch movie details. Please try again.";

/// Details lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailsStatus {
    /// No title selected; overlay closed.
    #[default]
    Idle,
    /// Lookup in flight.
    Loading,
    /// Details available.
    Loaded,
    /// Lookup failed or matched nothing.
    Error,
}

/// Read-only snapshot of the details state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailsState {
    /// Current status.
    pub status: DetailsStatus,
    /// Id of the title being shown or fetched.
    pub requested: Option<String>,
    /// Loaded details.
    pub detail: Option<DetailItem>,
    /// Human-readable error.
    pub error: Option<String>,
}

impl DetailsState {
    /// Returns `true` while the overlay should be shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != DetailsStatus::Idle
    }

    /// Returns `true` while a lookup is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == DetailsStatus::Loading
    }
}

/// Result of a lookup, ready to be applied.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum DetailsOutcome {
    /// Positive match flag.
    Loaded(Box<DetailItem>),
    /// Negative match flag.
    NoMatch {
        /// Error text from OMDb, if any.
        message: Option<String>,
    },
    /// Transport, status or decoding failure.
    Failed(anyhow::Error),
}

impl DetailsOutcome {
    /// Maps an API result to an outcome.
    #[must_use]
    pub fn from_result(result: Result<DetailResponse>) -> Self {
        match result {
            Ok(response) if response.response => Self::Loaded(Box::new(response.detail)),
            Ok(response) => Self::NoMatch {
                message: response.error,
            },
            Err(err) => Self::Failed(err),
        }
    }
}

/// Executes a lookup against the API.
pub async fn execute_lookup<A: OmdbApi>(api: &A, id: &str) -> DetailsOutcome {
    DetailsOutcome::from_result(api.lookup(id).await)
}

/// Owns the details state.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailsController {
    state: DetailsState,
}

impl DetailsController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &DetailsState {
        &self.state
    }

    /// Starts fetching details for `id`. Any previously shown title is
    /// dropped immediately. Returns the id to look up.
    pub fn fetch_details(&mut self, id: impl Into<String>) -> String {
        let id = id.into();
        tracing::debug!(%id, "details requested");
        self.state = DetailsState {
            status: DetailsStatus::Loading,
            requested: Some(id.clone()),
            detail: None,
            error: None,
        };
        id
    }

    /// Applies a lookup outcome. Ignored unless `id` is the title currently
    /// requested.
    pub fn resolve(&mut self, id: &str, outcome: DetailsOutcome) {
        if self.state.requested.as_deref() != Some(id) {
            tracing::debug!(%id, "dropping details response for a title no longer shown");
            return;
        }

        match outcome {
            DetailsOutcome::Loaded(detail) => {
                self.state.status = DetailsStatus::Loaded;
                self.state.detail = Some(*detail);
                self.state.error = None;
            }
            DetailsOutcome::NoMatch { message } => {
                self.fail(message.unwrap_or_else(|| String::from(LOOKUP_NO_MATCH_MESSAGE)));
            }
            DetailsOutcome::Failed(err) => {
                tracing::debug!(error = ?err, "details request failed");
                self.fail(String::from(LOOKUP_FAILED_MESSAGE));
            }
        }
    }

    /// Closes the overlay, discarding any detail and error.
    pub fn clear(&mut self) {
        self.state = DetailsState::default();
    }

    /// Fetches details and applies the outcome before returning.
    #[cfg(test)]
    pub(crate) async fn fetch_now<A: OmdbApi>(&mut self, api: &A, id: &str) {
        let id = self.fetch_details(id);
        let outcome = execute_lookup(api, &id).await;
        self.resolve(&id, outcome);
    }

    fn fail(&mut self, message: String) {
        self.state.status = DetailsStatus::Error;
        self.state.detail = None;
        self.state.error = Some(message);
    }
}
