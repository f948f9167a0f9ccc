//! Sonarr API access
//!
//! This module provides the types and trait for talking to a Sonarr
//! server's missing-episode listing, episode detail, and command endpoints,
//! as well as the HTTP implementation.

mod client;
mod types;

pub use client::SonarrClient;

use thiserror::Error;

/// Errors that can occur while talking to the Sonarr server
///
/// There is no retry policy; every variant is terminal for the run.
#[derive(Debug, Error)]
pub enum SonarrError {
    /// Request to the Sonarr server failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the server's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The listing returned no record at the requested page
    #[error("No missing episode at page {page}")]
    EmptyPage { page: u32 },
}

/// A missing episode as the program presents it.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Sonarr's episode id
    pub id: u32,
    /// Title of the series the episode belongs to
    pub series_title: String,
    /// The season number this episode belongs to
    pub season_number: u32,
    /// The episode number within the season
    pub episode_number: u32,
    /// The episode title
    pub title: String,
    /// UTC air date, when the server knows it
    pub air_date_utc: Option<String>,
}

/// The full exchange with the search-command endpoint, kept for the run log.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDispatch {
    /// URL the command was posted to
    pub url: String,
    /// Serialized JSON request body
    pub request_body: String,
    /// Response status line, e.g. `201 Created`
    pub status: String,
    /// Raw response body as returned by the server
    pub response_body: String,
}

/// Source of missing episodes and search commands.
///
/// This is the seam between the control flow and the network: the HTTP
/// client implements it against a live server, tests implement it with
/// scripted responses and call recording.
pub trait EpisodeSource {
    /// Returns the total number of missing episodes known to the server.
    fn missing_total(&self) -> Result<u32, SonarrError>;

    /// Returns the id of the missing episode at the given 1-based page of
    /// the air-date-sorted listing (page size 1).
    fn missing_episode_at(&self, page: u32) -> Result<u32, SonarrError>;

    /// Fetches the full record for one episode.
    fn episode(&self, episode_id: u32) -> Result<Episode, SonarrError>;

    /// Submits a search command for one episode and returns the exchange.
    ///
    /// The response status is reported for logging, not interpreted;
    /// Sonarr reports command failures in the response body.
    fn dispatch_search(&self, episode_id: u32) -> Result<SearchDispatch, SonarrError>;
}
