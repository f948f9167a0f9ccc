use clap::Parser;
use episode_roulette::{
    ConfigError, Configuration, EpisodeRouletteError, ProgressEvent, RunLog, SonarrClient,
    TimeSeededChooser, spin_for_episode,
};
use std::process::ExitCode;

/// Pick a random missing episode from a Sonarr backlog and trigger a
/// search for it.
#[derive(Parser)]
#[command(name = "episode_roulette", version)]
struct Cli {
    /// 1-based page index into the missing-episode list; anything below 1
    /// picks one at random
    #[arg(
        short = 'i',
        long = "index",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    index: i64,
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::EpisodePicked { episode_id, .. } => {
            println!("Selected episode id: {episode_id}");
        }
        ProgressEvent::Searching { episode } => {
            println!(
                "Searching: {} - S{}E{} - {}",
                episode.series_title, episode.season_number, episode.episode_number, episode.title
            );
        }
        ProgressEvent::SearchDispatched { status } => {
            println!("Search command dispatched ({status})");
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let explicit_page = u32::try_from(cli.index).ok().filter(|&page| page >= 1);

    let (config, warning) = Configuration::load_beside_executable();
    let log = RunLog::new(config.log_directory());

    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
        if let Err(error) = log.append(&format!("WARNING: {warning}")) {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    }

    let client = SonarrClient::new(config.api_root(), config.api_key.clone());
    let mut chooser = TimeSeededChooser;

    match spin_for_episode(
        &config,
        &client,
        &mut chooser,
        &log,
        explicit_page,
        handle_progress_event,
    ) {
        Ok(_) => ExitCode::SUCCESS,
        // A missing key is logged and stops the run before any request;
        // nothing was sent, so this counts as a clean stop.
        Err(EpisodeRouletteError::Config(ConfigError::MissingApiKey)) => {
            eprintln!("error: API key is missing or empty");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = log.append(&format!("ERROR: {error}"));
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
