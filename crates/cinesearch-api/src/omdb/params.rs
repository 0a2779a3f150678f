//! OMDb request parameters.

use super::types::TitleType;

/// Parameters for a title search (`s=`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text search (required, must be non-blank to be sent).
    pub query: String,
    /// Year filter (`y=`).
    pub year: Option<String>,
    /// Type filter (`type=`).
    pub kind: Option<TitleType>,
}

impl SearchParams {
    /// Creates search parameters with no filters.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            year: None,
            kind: None,
        }
    }

    /// Sets the year filter.
    #[must_use]
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the type filter.
    #[must_use]
    pub const fn kind(mut self, kind: TitleType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns `true` when the query is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Builds the query-string pairs (without `apikey`).
    ///
    /// Blank filters are omitted.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("s", self.query.clone())];
        if let Some(year) = self.year.as_deref().map(str::trim)
            && !year.is_empty()
        {
            query.push(("y", String::from(year)));
        }
        if let Some(kind) = self.kind {
            query.push(("type", String::from(kind.as_str())));
        }
        query
    }
}

/// Builds the query-string pairs for a lookup by IMDb id (without `apikey`).
#[must_use]
pub fn lookup_query(id: &str) -> Vec<(&'static str, String)> {
    vec![("i", String::from(id)), ("plot", String::from("full"))]
}
