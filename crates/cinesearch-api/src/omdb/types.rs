//! OMDb API response types.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Deserializer};

use super::rating::{RatingSource, RatingTier, classify_rating};

/// Placeholder OMDb uses for fields that have no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Content type of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    /// Feature film.
    Movie,
    /// TV series.
    Series,
    /// Single episode of a series.
    Episode,
    /// Anything else OMDb returns (e.g. "game").
    #[default]
    #[serde(other)]
    Other,
}

impl TitleType {
    /// Types accepted by the `type` search filter, in display order.
    pub const FILTERS: [Self; 3] = [Self::Movie, Self::Series, Self::Episode];

    /// Wire value sent in the `type` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Other => "other",
        }
    }

    /// Human-readable filter label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "TV Series",
            Self::Episode => "Episodes",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "episode" => Ok(Self::Episode),
            other => bail!("unknown title type: {other} (expected movie, series or episode)"),
        }
    }
}

// --- Search ---

/// Response from a search (`s=`) request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Matching titles (first page only).
    #[serde(rename = "Search")]
    pub search: Vec<SummaryItem>,
    /// Total number of matches, as the string OMDb sends.
    #[serde(rename = "totalResults", deserialize_with = "deserialize_total")]
    pub total_results: Option<String>,
    /// Match flag (`Response: "True"`).
    #[serde(rename = "Response", deserialize_with = "deserialize_match_flag")]
    pub response: bool,
    /// Error message when the match flag is negative.
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// Summary of a single title as shown in the result grid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SummaryItem {
    /// IMDb identifier (e.g. `tt0372784`).
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year, or a range such as `2005–2008` for series.
    #[serde(rename = "Year")]
    pub year: String,
    /// Content type.
    #[serde(rename = "Type")]
    pub kind: TitleType,
    /// Poster URL (`None` when OMDb reports `N/A`).
    #[serde(rename = "Poster", deserialize_with = "deserialize_available")]
    pub poster: Option<String>,
}

// --- Lookup ---

/// Response from a lookup (`i=`) request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailResponse {
    /// Title details (all fields empty when the match flag is negative).
    #[serde(flatten)]
    pub detail: DetailItem,
    /// Match flag (`Response: "True"`).
    #[serde(rename = "Response", deserialize_with = "deserialize_match_flag")]
    pub response: bool,
    /// Error message when the match flag is negative.
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// Full details of a single title.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DetailItem {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: SummaryItem,
    /// Runtime (e.g. "140 min").
    #[serde(rename = "Runtime")]
    pub runtime: String,
    /// Content rating (e.g. "PG-13").
    #[serde(rename = "Rated")]
    pub rated: String,
    /// Full plot text.
    #[serde(rename = "Plot")]
    pub plot: String,
    /// Director(s).
    #[serde(rename = "Director")]
    pub director: String,
    /// Writer(s).
    #[serde(rename = "Writer")]
    pub writer: String,
    /// Main cast.
    #[serde(rename = "Actors")]
    pub actors: String,
    /// Production countries.
    #[serde(rename = "Country")]
    pub country: String,
    /// Awards summary.
    #[serde(rename = "Awards")]
    pub awards: String,
    /// Comma-separated genre list.
    #[serde(rename = "Genre")]
    pub genre: String,
    /// Release date.
    #[serde(rename = "Released", deserialize_with = "deserialize_available")]
    pub released: Option<String>,
    /// Spoken languages.
    #[serde(rename = "Language", deserialize_with = "deserialize_available")]
    pub language: Option<String>,
    /// IMDb user rating out of 10 (e.g. "8.2").
    #[serde(rename = "imdbRating", deserialize_with = "deserialize_available")]
    pub imdb_rating: Option<String>,
    /// IMDb vote count.
    #[serde(rename = "imdbVotes", deserialize_with = "deserialize_available")]
    pub imdb_votes: Option<String>,
    /// Box office gross.
    #[serde(rename = "BoxOffice", deserialize_with = "deserialize_available")]
    pub box_office: Option<String>,
    /// Ratings from external sources.
    #[serde(rename = "Ratings")]
    pub ratings: Vec<Rating>,
}

impl DetailItem {
    /// Splits the comma-separated genre list.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty() && *g != NOT_AVAILABLE)
            .collect()
    }
}

/// A rating from one external source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Rating {
    /// Source name (e.g. "Internet Movie Database").
    #[serde(rename = "Source")]
    pub source: String,
    /// Value in the source's own format ("8.2/10", "85%", "70/100").
    #[serde(rename = "Value")]
    pub value: String,
}

impl Rating {
    /// Known source of this rating.
    #[must_use]
    pub fn source_kind(&self) -> RatingSource {
        RatingSource::from_name(&self.source)
    }

    /// Short label for display.
    #[must_use]
    pub fn label(&self) -> &str {
        self.source_kind().short_label().unwrap_or(&self.source)
    }

    /// Classifies the value on its source's scale.
    #[must_use]
    pub fn tier(&self) -> RatingTier {
        classify_rating(self.source_kind(), &self.value)
    }
}

/// Maps OMDb's `"True"`/`"False"` strings to a bool. Absent means `false`.
fn deserialize_match_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true")))
}

/// Maps `"N/A"` and empty strings to `None`.
fn deserialize_available<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != NOT_AVAILABLE
    }))
}

/// Accepts `totalResults` as a string or a bare number.
fn deserialize_total<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_search_fixture() {
        // Arrange
        let json = include_str!("../../fixtures/omdb/search_batman.json");

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.response);
        assert_eq!(response.total_results.as_deref(), Some("616"));
        assert_eq!(response.search.len(), 10);
        let first = &response.search[0];
        assert_eq!(first.id, "tt0372784");
        assert_eq!(first.title, "Batman Begins");
        assert_eq!(first.kind, TitleType::Movie);
        assert!(first.poster.is_some());
    }

    #[test]
    fn test_parse_search_series_year_range_and_unknown_type() {
        // Arrange
        let json = include_str!("../../fixtures/omdb/search_batman.json");

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        let series = &response.search[5];
        assert_eq!(series.kind, TitleType::Series);
        assert_eq!(series.year, "1992–1995");
        let game = &response.search[9];
        assert_eq!(game.kind, TitleType::Other);
        assert_eq!(game.poster, None);
    }

    #[test]
    fn test_parse_search_not_found() {
        // Arrange
        let json = include_str!("../../fixtures/omdb/search_not_found.json");

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!response.response);
        assert!(response.search.is_empty());
        assert_eq!(response.total_results, None);
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_parse_total_results_tolerates_numbers_and_garbage() {
        // Arrange
        let numeric = r#"{"Search":[],"totalResults":42,"Response":"True"}"#;
        let garbage = r#"{"Search":[],"totalResults":"lots","Response":"True"}"#;

        // Act
        let numeric: SearchResponse = serde_json::from_str(numeric).unwrap();
        let garbage: SearchResponse = serde_json::from_str(garbage).unwrap();

        // Assert
        assert_eq!(numeric.total_results.as_deref(), Some("42"));
        assert_eq!(garbage.total_results.as_deref(), Some("lots"));
    }

    #[test]
    fn test_parse_detail_fixture() {
        // Arrange
        let json = include_str!("../../fixtures/omdb/detail_tt0372784.json");

        // Act
        let response: DetailResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.response);
        let detail = &response.detail;
        assert_eq!(detail.summary.id, "tt0372784");
        assert_eq!(detail.summary.title, "Batman Begins");
        assert_eq!(detail.runtime, "140 min");
        assert_eq!(detail.director, "Christopher Nolan");
        assert!(!detail.plot.is_empty());
        assert_eq!(detail.ratings.len(), 3);
        assert_eq!(detail.box_office.as_deref(), Some("$206,863,479"));
        assert_eq!(detail.imdb_rating.as_deref(), Some("8.2"));
        assert_eq!(detail.imdb_votes.as_deref(), Some("1,661,554"));
        assert_eq!(detail.genres(), vec!["Action", "Crime", "Drama"]);
    }

    #[test]
    fn test_parse_detail_not_found() {
        // Arrange
        let json = include_str!("../../fixtures/omdb/detail_not_found.json");

        // Act
        let response: DetailResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!response.response);
        assert_eq!(response.error.as_deref(), Some("Incorrect IMDb ID."));
        assert_eq!(response.detail, DetailItem::default());
    }

    #[test]
    fn test_rating_label_and_tier() {
        // Arrange
        let imdb = Rating {
            source: String::from("Internet Movie Database"),
            value: String::from("8.2/10"),
        };
        let unknown = Rating {
            source: String::from("Letterboxd"),
            value: String::from("4.1/5"),
        };

        // Act & Assert
        assert_eq!(imdb.label(), "IMDb");
        assert_eq!(imdb.tier(), RatingTier::Favorable);
        assert_eq!(unknown.label(), "Letterboxd");
        assert_eq!(unknown.tier(), RatingTier::Unrated);
    }

    #[test]
    fn test_title_type_from_str() {
        // Arrange & Act & Assert
        assert_eq!("movie".parse::<TitleType>().unwrap(), TitleType::Movie);
        assert_eq!("Series".parse::<TitleType>().unwrap(), TitleType::Series);
        assert_eq!(" episode ".parse::<TitleType>().unwrap(), TitleType::Episode);
        assert!("game".parse::<TitleType>().is_err());
    }

    #[test]
    fn test_genres_skip_not_available() {
        // Arrange
        let detail = DetailItem {
            genre: String::from(NOT_AVAILABLE),
            ..DetailItem::default()
        };

        // Act & Assert
        assert!(detail.genres().is_empty());
    }
}
