//! episode_roulette - Pick a random missing episode and ask Sonarr to find it
//!
//! This library provides the core functionality for querying a Sonarr
//! server's missing-episode backlog, selecting one entry at random or at a
//! caller-supplied index, and dispatching a search command for it, while
//! keeping a plain-text run log of everything that happened.

mod config;
mod run_log;
mod selection;
mod sonarr;

pub use config::{CONFIG_FILE_NAME, ConfigError, Configuration};
pub use run_log::{LOG_FILE_NAME, RunLog, RunLogError};
pub use selection::{PageChooser, TimeSeededChooser};
pub use sonarr::{Episode, EpisodeSource, SearchDispatch, SonarrClient, SonarrError};

use thiserror::Error;

/// Separator line appended to the run log after each completed run.
const LOG_SEPARATOR: &str = "___________________________";

/// Top-level error type for a roulette run
#[derive(Debug, Error)]
pub enum EpisodeRouletteError {
    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while talking to the Sonarr server
    #[error("Sonarr API error: {0}")]
    Sonarr(#[from] SonarrError),

    /// Error while writing the run log
    #[error("Run log error: {0}")]
    RunLog(#[from] RunLogError),
}

/// Progress event emitted during a run
///
/// These events let library users surface progress on stdout or elsewhere
/// without the library printing anything itself.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A missing episode has been picked from the listing
    EpisodePicked { page: u32, episode_id: u32 },

    /// The picked episode's details were fetched; a search is about to be
    /// dispatched
    Searching { episode: Episode },

    /// The search command was submitted
    SearchDispatched { status: String },
}

/// Result of one completed run
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The episode the search was dispatched for
    pub episode: Episode,

    /// The exchange with the command endpoint
    pub dispatch: SearchDispatch,
}

/// Picks one missing episode and dispatches a search command for it.
///
/// The run is strictly sequential: total count, page selection, episode
/// lookup, detail fetch, command dispatch. Each step is appended to the run
/// log, and any failure aborts the sequence; later steps are never invoked.
/// An empty API key aborts before the first request.
///
/// # Arguments
///
/// * `config` - The loaded configuration (only the API key is consulted
///   here; the source already carries the connection parameters)
/// * `source` - Source of missing episodes and search commands
/// * `chooser` - Page chooser used when no explicit page is given
/// * `log` - Run log every step is appended to
/// * `explicit_page` - Optional 1-based page index overriding the chooser
/// * `progress_callback` - Closure called with progress events (can be
///   empty for silent operation)
///
/// # Returns
///
/// The selected episode and the full exchange with the command endpoint.
///
/// # Errors
///
/// Returns an error when the API key is empty, when any request or decode
/// fails, or when the run log cannot be written. There are no retries.
pub fn spin_for_episode<F>(
    config: &Configuration,
    source: &dyn EpisodeSource,
    chooser: &mut dyn PageChooser,
    log: &RunLog,
    explicit_page: Option<u32>,
    mut progress_callback: F,
) -> Result<SearchOutcome, EpisodeRouletteError>
where
    F: FnMut(ProgressEvent),
{
    if let Err(error) = config.require_api_key() {
        log.append(&format!("ERROR: {error}"))?;
        return Err(error.into());
    }

    let total = source.missing_total()?;
    log.append(&format!("Total records: {total}"))?;

    let page = match explicit_page {
        Some(page) => page,
        None => chooser.choose_page(total),
    };
    log.append(&format!("Selected page: {page}"))?;

    let episode_id = source.missing_episode_at(page)?;
    log.append(&format!("Selected episode id: {episode_id}"))?;
    progress_callback(ProgressEvent::EpisodePicked { page, episode_id });

    let episode = source.episode(episode_id)?;
    log.append(&format!(
        "Searching: {} - S{}E{} - {}",
        episode.series_title, episode.season_number, episode.episode_number, episode.title
    ))?;
    progress_callback(ProgressEvent::Searching {
        episode: episode.clone(),
    });

    let dispatch = source.dispatch_search(episode_id)?;
    log.append(&dispatch.url)?;
    log.append(&dispatch.request_body)?;
    log.append(&format!("Response status: {}", dispatch.status))?;
    log.append("Response:")?;
    log.append(&dispatch.response_body)?;
    log.append(LOG_SEPARATOR)?;
    progress_callback(ProgressEvent::SearchDispatched {
        status: dispatch.status.clone(),
    });

    Ok(SearchOutcome { episode, dispatch })
}
