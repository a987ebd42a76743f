//! Attrition self-play driver.
//!
//! Plays a number of matches between two rule-based oracles through the
//! full service stack and prints each match summary and report.
//!
//! ```text
//! attrition demos/selfplay.json
//! RUST_LOG=debug attrition
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use attrition_engine::{RoundEngine, history_root, summarize};
use attrition_service::{
    GameService, GuardrailOracle, JsonFileStore, MatchStore, MemoryStore, ProfileReportGenerator,
};
use attrition_types::{
    AttritionError, MatchConfig, OracleConfig, Personality, Result, Side, constants,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Hard stop for a single match; the fee schedule ends every match long
/// before this.
const MAX_CALLS_PER_MATCH: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct SelfPlayConfig {
    matches: u32,
    #[serde(rename = "match")]
    match_config: MatchConfig,
    /// Oracle playing party A.
    player: OracleConfig,
    /// Oracle playing party B.
    opponent: OracleConfig,
    /// Persist to this JSON file instead of memory.
    store_path: Option<PathBuf>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            matches: 1,
            match_config: MatchConfig::default(),
            player: OracleConfig {
                personality: Personality::Aggressive,
                seed: 1,
                ..OracleConfig::default()
            },
            opponent: OracleConfig {
                seed: 2,
                ..OracleConfig::default()
            },
            store_path: None,
        }
    }
}

fn load_config() -> Result<SelfPlayConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SelfPlayConfig::default());
    };
    let text = std::fs::read_to_string(&path)?;
    let config: SelfPlayConfig = serde_json::from_str(&text)
        .map_err(|err| AttritionError::Configuration(format!("{path}: {err}")))?;
    config.match_config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Self-play aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = load_config()?;
    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        matches = config.matches,
        player = %config.player.personality,
        opponent = %config.opponent.personality,
        "Starting self-play"
    );

    match &config.store_path {
        Some(path) => {
            let store = JsonFileStore::new(config.match_config.clone(), path);
            play_all(&config, store).await
        }
        None => play_all(&config, MemoryStore::new(config.match_config.clone())).await,
    }
}

async fn play_all<S: MatchStore>(config: &SelfPlayConfig, store: S) -> Result<()> {
    let schedule = config.match_config.fees;
    let player = GuardrailOracle::new(config.player.clone(), schedule);
    let service = GameService::new(
        RoundEngine::new(schedule)?,
        store,
        GuardrailOracle::new(config.opponent.clone(), schedule),
        ProfileReportGenerator,
    );

    for n in 1..=config.matches {
        let report = play_one(&service, &player).await?;
        let state = service.state().await?;
        let summary = summarize(&state);

        println!("=== Match {n} of {} ===", config.matches);
        println!(
            "{}",
            state
                .end_reason()
                .map_or_else(|| "unfinished".to_string(), |r| state.describe_end(r))
        );
        println!("History root: {}", hex::encode(history_root(&state.history)));
        println!("{}", serde_json::to_string_pretty(&summary)?);
        println!();
        println!("{}", report.unwrap_or_else(|| "(no report)".to_string()));

        service.restart().await?;
    }
    Ok(())
}

/// Drive one match to its end and return the report.
async fn play_one<S: MatchStore>(
    service: &GameService<S, GuardrailOracle, ProfileReportGenerator>,
    player: &GuardrailOracle,
) -> Result<Option<String>> {
    let mut state = service.start().await?;
    for _ in 0..MAX_CALLS_PER_MATCH {
        let bid = service
            .engine()
            .preview(&state)
            .map_or(0, |view| player.plan(&view, Side::A).bid);
        let response = service.submit_bid(&bid.to_string()).await?;
        if response.outcome.is_ended() {
            return Ok(response.report);
        }
        state = response.state;
    }
    Err(AttritionError::Internal(format!(
        "match did not finish within {MAX_CALLS_PER_MATCH} calls"
    )))
}
