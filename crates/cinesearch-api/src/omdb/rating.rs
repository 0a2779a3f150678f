//! Per-source rating classification.
//!
//! OMDb reports each rating in its source's own format: IMDb as a decimal
//! out of 10 (`"8.2/10"`), Rotten Tomatoes as a percentage (`"85%"`) and
//! Metacritic as a fraction of 100 (`"70/100"`). Values are never parsed
//! uniformly; each source has its own scale and thresholds.

/// Source name OMDb uses for IMDb ratings.
const IMDB_SOURCE: &str = "Internet Movie Database";
/// Source name OMDb uses for Rotten Tomatoes ratings.
const ROTTEN_TOMATOES_SOURCE: &str = "Rotten Tomatoes";
/// Source name OMDb uses for Metacritic ratings.
const METACRITIC_SOURCE: &str = "Metacritic";

/// Known rating sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSource {
    /// Internet Movie Database (0-10 scale).
    InternetMovieDatabase,
    /// Rotten Tomatoes (percentage).
    RottenTomatoes,
    /// Metacritic (fraction of 100).
    Metacritic,
    /// Any other source.
    Other,
}

impl RatingSource {
    /// Maps an OMDb source name to a known source.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            IMDB_SOURCE => Self::InternetMovieDatabase,
            ROTTEN_TOMATOES_SOURCE => Self::RottenTomatoes,
            METACRITIC_SOURCE => Self::Metacritic,
            _ => Self::Other,
        }
    }

    /// Short display label, `None` for unknown sources.
    #[must_use]
    pub const fn short_label(self) -> Option<&'static str> {
        match self {
            Self::InternetMovieDatabase => Some("IMDb"),
            Self::RottenTomatoes => Some(ROTTEN_TOMATOES_SOURCE),
            Self::Metacritic => Some(METACRITIC_SOURCE),
            Self::Other => None,
        }
    }

    /// `(favorable, neutral)` lower bounds on the source's own scale.
    const fn thresholds(self) -> Option<(f64, f64)> {
        match self {
            Self::InternetMovieDatabase => Some((8.0, 6.0)),
            Self::RottenTomatoes => Some((80.0, 60.0)),
            Self::Metacritic => Some((61.0, 40.0)),
            Self::Other => None,
        }
    }
}

/// Classification of a rating value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// At or above the favorable threshold.
    Favorable,
    /// At or above the neutral threshold.
    Neutral,
    /// Below the neutral threshold.
    Unfavorable,
    /// Unknown source or unparseable value.
    Unrated,
}

/// Classifies a raw rating value according to its source.
///
/// - IMDb `"8.5/10"`: >= 8 favorable, >= 6 neutral.
/// - Rotten Tomatoes `"85%"`: >= 80 favorable, >= 60 neutral.
/// - Metacritic `"70/100"`: >= 61 favorable, >= 40 neutral.
#[must_use]
pub fn classify_rating(source: RatingSource, value: &str) -> RatingTier {
    let Some((favorable, neutral)) = source.thresholds() else {
        return RatingTier::Unrated;
    };

    let score = match source {
        RatingSource::InternetMovieDatabase => parse_leading_number(value),
        RatingSource::RottenTomatoes => parse_leading_number(value.trim().trim_end_matches('%')),
        RatingSource::Metacritic => parse_fraction_percent(value),
        RatingSource::Other => None,
    };

    match score {
        Some(s) if s >= favorable => RatingTier::Favorable,
        Some(s) if s >= neutral => RatingTier::Neutral,
        Some(_) => RatingTier::Unfavorable,
        None => RatingTier::Unrated,
    }
}

/// Parses the number at the start of `value` (`"8.2/10"` -> 8.2).
fn parse_leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    trimmed.get(..end)?.parse::<f64>().ok()
}

/// Converts `"70/100"` to a percentage. A bare number is taken as-is.
fn parse_fraction_percent(value: &str) -> Option<f64> {
    let Some((numerator, denominator)) = value.split_once('/') else {
        return parse_leading_number(value);
    };
    let numerator = parse_leading_number(numerator)?;
    let denominator = parse_leading_number(denominator)?;
    if denominator <= 0.0 {
        return None;
    }
    Some(numerator / denominator * 100.0)
}

/// Public IMDb page for a title.
#[must_use]
pub fn imdb_url(id: &str) -> String {
    format!("https://www.imdb.com/title/{id}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imdb_thresholds() {
        // Arrange
        let source = RatingSource::InternetMovieDatabase;

        // Act & Assert
        assert_eq!(classify_rating(source, "8.5/10"), RatingTier::Favorable);
        assert_eq!(classify_rating(source, "8.0/10"), RatingTier::Favorable);
        assert_eq!(classify_rating(source, "6.2/10"), RatingTier::Neutral);
        assert_eq!(classify_rating(source, "4.0/10"), RatingTier::Unfavorable);
        assert_eq!(classify_rating(source, "8.5"), RatingTier::Favorable);
    }

    #[test]
    fn test_rotten_tomatoes_thresholds() {
        // Arrange
        let source = RatingSource::RottenTomatoes;

        // Act & Assert
        assert_eq!(classify_rating(source, "85%"), RatingTier::Favorable);
        assert_eq!(classify_rating(source, "65%"), RatingTier::Neutral);
        assert_eq!(classify_rating(source, "60%"), RatingTier::Neutral);
        assert_eq!(classify_rating(source, "40%"), RatingTier::Unfavorable);
    }

    #[test]
    fn test_metacritic_fraction() {
        // Arrange
        let source = RatingSource::Metacritic;

        // Act & Assert
        assert_eq!(classify_rating(source, "70/100"), RatingTier::Favorable);
        assert_eq!(classify_rating(source, "55/100"), RatingTier::Neutral);
        assert_eq!(classify_rating(source, "22/100"), RatingTier::Unfavorable);
        assert_eq!(classify_rating(source, "70/0"), RatingTier::Unrated);
    }

    #[test]
    fn test_unparseable_and_unknown() {
        // Arrange & Act & Assert
        assert_eq!(
            classify_rating(RatingSource::InternetMovieDatabase, "N/A"),
            RatingTier::Unrated
        );
        assert_eq!(
            classify_rating(RatingSource::RottenTomatoes, ""),
            RatingTier::Unrated
        );
        assert_eq!(
            classify_rating(RatingSource::Other, "9.9/10"),
            RatingTier::Unrated
        );
    }

    #[test]
    fn test_source_from_name() {
        // Arrange & Act & Assert
        assert_eq!(
            RatingSource::from_name("Internet Movie Database"),
            RatingSource::InternetMovieDatabase
        );
        assert_eq!(
            RatingSource::from_name("Rotten Tomatoes"),
            RatingSource::RottenTomatoes
        );
        assert_eq!(
            RatingSource::from_name("Metacritic"),
            RatingSource::Metacritic
        );
        assert_eq!(RatingSource::from_name("Letterboxd"), RatingSource::Other);
    }

    #[test]
    fn test_imdb_url() {
        // Arrange & Act
        let url = imdb_url("tt0372784");

        // Assert
        assert_eq!(url, "https://www.imdb.com/title/tt0372784/");
    }
}
