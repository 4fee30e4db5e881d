//! Engine binary for the moss creature.
//!
//! Loads configuration, starts one creature's actors, and runs until
//! interrupted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `moss-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Select the generation service from the environment
//! 4. Start the actors in dependency order
//! 5. Wait for Ctrl-C
//! 6. Shut down, letting each actor finish its in-flight event

use std::path::Path;
use std::sync::Arc;

use moss_engine::config::{LoggingConfig, MossConfig};
use moss_engine::{EngineError, Seed};
use moss_generator::Generator;
use moss_sim::{Clock, SystemClock};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "moss-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, startup or shutdown fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("moss-engine starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }
    info!(
        utc_offset_minutes = config.creature.utc_offset_minutes,
        default_track = config.creature.default_track.as_str(),
        housekeeping_secs = config.timing.housekeeping_secs,
        need_poll_secs = config.timing.need_poll_secs,
        "Creature settings"
    );

    // 3. Select the generation service.
    let generator = Arc::new(Generator::from_env());
    if !generator.is_online() {
        warn!("No generation backend configured, all lines come from static pools");
    }

    // 4. Start the actors.
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let vitals = config.vitals.clone();
    let creature = moss_engine::spawn(config, Arc::clone(&clock), generator, Seed::default())
        .await
        .map_err(EngineError::from)?;
    if let Ok(view) = creature.pet().view(clock.now(), &vitals) {
        info!(
            creature = %view.creature_id,
            stage = %view.stage,
            mood = %view.mood,
            personality = %view.personality,
            "Creature awake"
        );
    }

    // 5. Wait for Ctrl-C.
    tokio::signal::ctrl_c().await.map_err(EngineError::from)?;
    info!("Shutdown requested");

    // 6. Shut down.
    if let Ok(view) = creature.pet().view(clock.now(), &vitals) {
        info!(
            age_seconds = view.age_seconds,
            generation = view.generation,
            fullness = view.fullness,
            happiness = view.happiness,
            bond = view.bond,
            hp = view.hp,
            "Final state"
        );
    }
    creature.shutdown().await.map_err(EngineError::from)?;
    info!("moss-engine shutdown complete");
    Ok(())
}

/// Load `moss-config.yaml` from the working directory, or defaults.
///
/// The flag reports whether the file was found.
fn load_config() -> Result<(MossConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = MossConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((MossConfig::default(), false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
