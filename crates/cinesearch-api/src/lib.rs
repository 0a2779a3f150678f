//! API client library for cinesearch.
//!
//! Provides a client for the OMDb (Open Movie Database) API together with
//! its wire types and the per-source rating classification used by the UI.

/// OMDb API client.
pub mod omdb;
