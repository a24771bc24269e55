//! Configuration for a station simulation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::station::Station;
use crate::train::Train;

/// Errors loading or validating a [`SimulationConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config is not valid JSON for this schema
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The config parses but describes an impossible station or fleet
    #[error("invalid config: {0}")]
    Invalid(#[from] SimError),
}

/// One train in the initial fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub id: String,
    pub capacity: u32,
    #[serde(default)]
    pub passengers: u32,
}

impl TrainConfig {
    pub fn new(id: impl Into<String>, capacity: u32, passengers: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            passengers,
        }
    }
}

/// Parameters for building a [`Simulation`](super::Simulation).
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of tracks at the station.
    pub track_count: u32,

    /// Passengers waiting at the station at start.
    pub waiting_passengers: u32,

    /// Upper bound on passengers boarding a train in one turn.
    pub max_per_turn: u32,

    /// Random turns the binary runs before printing status.
    pub ticks: u32,

    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Initial fleet, all outside the station.
    pub trains: Vec<TrainConfig>,
}

impl SimulationConfig {
    /// Parse a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that the station and every train could be constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build()?;
        Ok(())
    }

    /// The station and fleet this config describes.
    pub(crate) fn build(&self) -> Result<(Station, Vec<Train>), SimError> {
        let station = Station::new(self.track_count, self.waiting_passengers)?;
        let trains = self
            .trains
            .iter()
            .map(|t| Train::named(&t.id, t.capacity, t.passengers))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(dup) = super::simulation::first_duplicate(&trains) {
            return Err(SimError::invalid(format!("duplicate train id: {dup}")));
        }
        Ok((station, trains))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            track_count: 4,
            waiting_passengers: 220,
            max_per_turn: 80,
            ticks: 0,
            seed: None,
            trains: vec![
                TrainConfig::new("T1", 180, 140),
                TrainConfig::new("T2", 120, 60),
                TrainConfig::new("T3", 220, 200),
                TrainConfig::new("T4", 220, 200),
                TrainConfig::new("T5", 120, 80),
                TrainConfig::new("T6", 120, 50),
            ],
        }
    }
}
