//! Serializable snapshot of a simulation, for display.

use std::fmt;

use serde::Serialize;

use crate::station::Station;
use crate::train::Train;

/// State of the station and its fleet at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatus {
    /// Passengers waiting at the station
    pub waiting_passengers: u32,

    /// Every track in ascending order
    pub tracks: Vec<TrackStatus>,

    /// Every train in registry order
    pub trains: Vec<TrainStatus>,
}

/// One track and its occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackStatus {
    pub track: u32,
    pub occupied_by: Option<String>,
}

/// One train's passengers and whereabouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainStatus {
    pub id: String,
    pub passengers: u32,
    pub capacity: u32,

    /// Track held, or `None` when outside the station
    pub track: Option<u32>,
}

impl StationStatus {
    pub fn capture(station: &Station, trains: &[Train]) -> Self {
        Self {
            waiting_passengers: station.waiting_passengers(),
            tracks: station
                .tracks()
                .map(|(track, occupant)| TrackStatus {
                    track: track.get(),
                    occupied_by: occupant.map(|id| id.to_string()),
                })
                .collect(),
            trains: trains
                .iter()
                .map(|t| TrainStatus {
                    id: t.id().to_string(),
                    passengers: t.passengers(),
                    capacity: t.capacity(),
                    track: t.assigned_track().map(|track| track.get()),
                })
                .collect(),
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Station ---")?;
        writeln!(f, "Waiting passengers: {}", self.waiting_passengers)?;
        for track in &self.tracks {
            writeln!(f, "{track}")?;
        }
        writeln!(f)?;
        writeln!(f, "--- Trains ---")?;
        for train in &self.trains {
            writeln!(f, "{train}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.occupied_by {
            Some(id) => write!(f, "Track {}: occupied by {id}", self.track),
            None => write!(f, "Track {}: free", self.track),
        }
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | pax {}/{} | ", self.id, self.passengers, self.capacity)?;
        match self.track {
            Some(track) => write!(f, "in station (track {track})"),
            None => write!(f, "outside station"),
        }
    }
}
