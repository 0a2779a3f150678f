//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb endpoint in search mode (`s=`) and
//! lookup mode (`i=`), and classifies per-source ratings.

mod api;
mod client;
mod params;
mod rating;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
pub use params::{SearchParams, lookup_query};
pub use rating::{RatingSource, RatingTier, classify_rating, imdb_url};
pub use types::{
    DetailItem, DetailResponse, NOT_AVAILABLE, Rating, SearchResponse, SummaryItem, TitleType,
};
