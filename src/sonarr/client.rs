/// Blocking HTTP implementation of the episode source.
use super::types::{EpisodeRecord, SearchCommand, WantedMissingPage};
use super::{Episode, EpisodeSource, SearchDispatch, SonarrError};

/// Command name Sonarr expects for a single-episode search.
const SEARCH_COMMAND_NAME: &str = "episodeSearch";

/// Page size of every listing request. At size 1 the page index doubles as
/// an index into the air-date-sorted missing list.
const LISTING_PAGE_SIZE: u32 = 1;

/// Client for the Sonarr HTTP API.
///
/// GET endpoints authenticate via the `apikey` query parameter, the
/// command POST via the `X-Api-Key` header, matching what the server's
/// endpoints each accept.
pub struct SonarrClient {
    client: reqwest::blocking::Client,
    api_root: String,
    api_key: String,
}

impl SonarrClient {
    /// Creates a client for the given API root (`.../api`) and key.
    pub fn new(api_root: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_root: api_root.into(),
            api_key: api_key.into(),
        }
    }

    fn wanted_missing_url(&self, page: u32) -> String {
        format!(
            "{}/wanted/missing/?apikey={}&page={}&pageSize={}&sortKey=airDateUtc&sortDir=asc",
            self.api_root, self.api_key, page, LISTING_PAGE_SIZE
        )
    }

    fn episode_url(&self, episode_id: u32) -> String {
        format!(
            "{}/episode/{}?apikey={}",
            self.api_root, episode_id, self.api_key
        )
    }

    fn command_url(&self) -> String {
        format!("{}/command", self.api_root)
    }

    /// Fetches one page of the missing listing, sorted by air date
    /// ascending.
    fn fetch_missing_page(&self, page: u32) -> Result<WantedMissingPage, SonarrError> {
        let response = self
            .client
            .get(self.wanted_missing_url(page))
            .send()
            .map_err(|e| SonarrError::RequestError(e.to_string()))?;

        let body = response
            .text()
            .map_err(|e| SonarrError::RequestError(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| SonarrError::ParseError(e.to_string()))
    }

    /// Converts a wire episode record to the domain Episode structure.
    fn convert_episode(record: EpisodeRecord) -> Episode {
        Episode {
            id: record.id,
            series_title: record.series.title,
            season_number: record.season_number,
            episode_number: record.episode_number,
            title: record.title,
            air_date_utc: record.air_date_utc,
        }
    }
}

impl EpisodeSource for SonarrClient {
    fn missing_total(&self) -> Result<u32, SonarrError> {
        Ok(self.fetch_missing_page(1)?.total_records)
    }

    fn missing_episode_at(&self, page: u32) -> Result<u32, SonarrError> {
        let listing = self.fetch_missing_page(page)?;

        listing
            .records
            .first()
            .map(|record| record.id)
            .ok_or(SonarrError::EmptyPage { page })
    }

    fn episode(&self, episode_id: u32) -> Result<Episode, SonarrError> {
        let response = self
            .client
            .get(self.episode_url(episode_id))
            .send()
            .map_err(|e| SonarrError::RequestError(e.to_string()))?;

        let record: EpisodeRecord = response
            .json()
            .map_err(|e| SonarrError::ParseError(e.to_string()))?;

        Ok(Self::convert_episode(record))
    }

    fn dispatch_search(&self, episode_id: u32) -> Result<SearchDispatch, SonarrError> {
        let url = self.command_url();
        let command = SearchCommand {
            name: SEARCH_COMMAND_NAME,
            episode_ids: &[episode_id],
        };
        let request_body = serde_json::to_string(&command)
            .map_err(|e| SonarrError::ParseError(e.to_string()))?;

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .body(request_body.clone())
            .send()
            .map_err(|e| SonarrError::RequestError(e.to_string()))?;

        // The status is passed through for the log; whether the command was
        // accepted shows up in the response body.
        let status = format!(
            "{} {}",
            response.status().as_u16(),
            response.status().canonical_reason().unwrap_or("Unknown")
        );

        let response_body = response
            .text()
            .map_err(|e| SonarrError::RequestError(e.to_string()))?;

        Ok(SearchDispatch {
            url,
            request_body,
            status,
            response_body,
        })
    }
}
