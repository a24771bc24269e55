//! Command-level driver for one station and its fleet.
//!
//! Wraps a [`Station`](crate::station::Station), a registry of
//! [`Train`](crate::train::Train)s and a random source, exposing the
//! commands a front end needs: arrive, drop off, board, leave, random
//! turns, and a status snapshot.

mod config;
mod simulation;
mod status;

pub use config::{ConfigError, SimulationConfig, TrainConfig};
pub use simulation::{Simulation, TickEvent};
pub use status::{StationStatus, TrackStatus, TrainStatus};
