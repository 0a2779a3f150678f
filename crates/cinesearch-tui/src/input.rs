//! Search input state: query text, year filter, type filter.
//!
//! Every mutator returns `true` when the state changed, which is the signal
//! to restart the search debounce.

use chrono::Datelike;
use cinesearch_api::omdb::{SearchParams, TitleType};

/// Number of selectable years, counting back from the current one.
pub const YEAR_WINDOW: i32 = 50;

/// Current calendar year from the system clock.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Year filter options: `current_year` down through the 49 preceding years.
#[must_use]
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_WINDOW)
        .map(|offset| current_year.saturating_sub(offset))
        .collect()
}

/// Query text and filters typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchInput {
    query: String,
    year: Option<i32>,
    kind: Option<TitleType>,
    filters_open: bool,
}

impl SearchInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Selected year, `None` for any year.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// Selected type, `None` for any type.
    #[must_use]
    pub const fn kind(&self) -> Option<TitleType> {
        self.kind
    }

    /// Whether the filter panel is expanded.
    #[must_use]
    pub const fn filters_open(&self) -> bool {
        self.filters_open
    }

    /// Replaces the query text.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        true
    }

    /// Appends a character to the query.
    pub fn push_char(&mut self, ch: char) -> bool {
        self.query.push(ch);
        true
    }

    /// Removes the last character of the query.
    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    /// Clears the query text, keeping the filters.
    pub fn clear_query(&mut self) -> bool {
        self.set_query(String::new())
    }

    /// Sets the year filter. Years outside the selectable window are rejected.
    pub fn set_year(&mut self, year: Option<i32>, current_year: i32) -> bool {
        if let Some(y) = year
            && !year_options(current_year).contains(&y)
        {
            return false;
        }
        if year == self.year {
            return false;
        }
        self.year = year;
        true
    }

    /// Steps the year filter: any -> current year -> previous years -> any.
    pub fn next_year(&mut self, current_year: i32) -> bool {
        let options = year_options(current_year);
        let next = match self.year.and_then(|y| options.iter().position(|&o| o == y)) {
            None => options.first().copied(),
            Some(idx) => options.get(idx.saturating_add(1)).copied(),
        };
        self.set_year(next, current_year)
    }

    /// Steps the year filter in the other direction.
    pub fn prev_year(&mut self, current_year: i32) -> bool {
        let options = year_options(current_year);
        let prev = match self.year.and_then(|y| options.iter().position(|&o| o == y)) {
            None => options.last().copied(),
            Some(0) => None,
            Some(idx) => options.get(idx.saturating_sub(1)).copied(),
        };
        self.set_year(prev, current_year)
    }

    /// Sets the type filter.
    pub fn set_kind(&mut self, kind: Option<TitleType>) -> bool {
        if kind == self.kind {
            return false;
        }
        self.kind = kind;
        true
    }

    /// Steps the type filter: any -> movie -> series -> episode -> any.
    pub fn next_kind(&mut self) -> bool {
        let filters = TitleType::FILTERS;
        let next = match self.kind.and_then(|k| filters.iter().position(|&f| f == k)) {
            None => filters.first().copied(),
            Some(idx) => filters.get(idx.saturating_add(1)).copied(),
        };
        self.set_kind(next)
    }

    /// Expands or collapses the filter panel. Never triggers a search.
    pub const fn toggle_filters(&mut self) {
        self.filters_open = !self.filters_open;
    }

    /// Resets year and type to "any" and collapses the panel. The query is
    /// kept.
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.year.is_some() || self.kind.is_some();
        self.year = None;
        self.kind = None;
        self.filters_open = false;
        changed
    }

    /// Parameters for a search with the current values.
    #[must_use]
    pub fn params(&self) -> SearchParams {
        SearchParams {
            query: self.query.clone(),
            year: self.year.map(|y| y.to_string()),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const YEAR: i32 = 2026;

    #[test]
    fn test_year_options_cover_fifty_years() {
        // Arrange & Act
        let options = year_options(YEAR);

        // Assert
        assert_eq!(options.len(), 50);
        assert_eq!(options.first(), Some(&2026));
        assert_eq!(options.last(), Some(&1977));
    }

    #[test]
    fn test_year_options_start_at_clock_year() {
        // Arrange & Act
        let options = year_options(current_year());

        // Assert
        assert_eq!(options.first(), Some(&current_year()));
        assert_eq!(options.len(), 50);
    }

    #[test]
    fn test_typing_edits_query() {
        // Arrange
        let mut input = SearchInput::new();

        // Act
        for ch in "bat".chars() {
            assert!(input.push_char(ch));
        }
        assert!(input.pop_char());

        // Assert
        assert_eq!(input.query(), "ba");
    }

    #[test]
    fn test_pop_on_empty_query_is_no_change() {
        // Arrange
        let mut input = SearchInput::new();

        // Act & Assert
        assert!(!input.pop_char());
    }

    #[test]
    fn test_next_year_cycles_through_window() {
        // Arrange
        let mut input = SearchInput::new();

        // Act & Assert
        assert!(input.next_year(YEAR));
        assert_eq!(input.year(), Some(2026));
        assert!(input.next_year(YEAR));
        assert_eq!(input.year(), Some(2025));

        assert!(input.set_year(Some(1977), YEAR));
        assert!(input.next_year(YEAR));
        assert_eq!(input.year(), None);
    }

    #[test]
    fn test_prev_year_wraps_to_oldest() {
        // Arrange
        let mut input = SearchInput::new();

        // Act & Assert
        assert!(input.prev_year(YEAR));
        assert_eq!(input.year(), Some(1977));
        assert!(input.set_year(Some(2026), YEAR));
        assert!(input.prev_year(YEAR));
        assert_eq!(input.year(), None);
    }

    #[test]
    fn test_year_outside_window_is_rejected() {
        // Arrange
        let mut input = SearchInput::new();

        // Act & Assert
        assert!(!input.set_year(Some(1900), YEAR));
        assert_eq!(input.year(), None);
    }

    #[test]
    fn test_next_kind_cycles() {
        // Arrange
        let mut input = SearchInput::new();

        // Act & Assert
        input.next_kind();
        assert_eq!(input.kind(), Some(TitleType::Movie));
        input.next_kind();
        assert_eq!(input.kind(), Some(TitleType::Series));
        input.next_kind();
        assert_eq!(input.kind(), Some(TitleType::Episode));
        input.next_kind();
        assert_eq!(input.kind(), None);
    }

    #[test]
    fn test_clear_filters_keeps_query_and_collapses_panel() {
        // Arrange
        let mut input = SearchInput::new();
        input.set_query("batman");
        input.set_year(Some(2005), YEAR);
        input.set_kind(Some(TitleType::Movie));
        input.toggle_filters();

        // Act
        let changed = input.clear_filters();

        // Assert
        assert!(changed);
        assert_eq!(input.query(), "batman");
        assert_eq!(input.year(), None);
        assert_eq!(input.kind(), None);
        assert!(!input.filters_open());
    }

    #[test]
    fn test_clear_filters_without_filters_is_no_change() {
        // Arrange
        let mut input = SearchInput::new();
        input.toggle_filters();

        // Act & Assert
        assert!(!input.clear_filters());
        assert!(!input.filters_open());
    }

    #[test]
    fn test_params_reflect_current_values() {
        // Arrange
        let mut input = SearchInput::new();
        input.set_query("batman");
        input.set_year(Some(2005), YEAR);
        input.set_kind(Some(TitleType::Series));

        // Act
        let params = input.params();

        // Assert
        assert_eq!(params.query, "batman");
        assert_eq!(params.year.as_deref(), Some("2005"));
        assert_eq!(params.kind, Some(TitleType::Series));
    }
}
