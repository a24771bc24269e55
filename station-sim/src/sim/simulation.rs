//! A station, its fleet and a random source, driven by commands.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::domain::{TrackNumber, TrainId};
use crate::error::SimError;
use crate::random::RandomSource;
use crate::station::Station;
use crate::train::{DropOff, Train};

use super::config::SimulationConfig;
use super::status::StationStatus;

/// Something that happened during one [`Simulation::tick`] step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// An outside train got a track.
    Arrived { train: TrainId, track: TrackNumber },

    /// An outside train asked for a track but all were taken.
    NoTrackFree { train: TrainId },

    /// A train in the station dropped off, boarded, and left.
    Turnaround {
        train: TrainId,
        track: TrackNumber,
        dropped: u32,
        to_waiting: u32,
        boarded: u32,
    },
}

impl fmt::Display for TickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickEvent::Arrived { train, track } => {
                write!(f, "{train} arrives on track {track}")
            }
            TickEvent::NoTrackFree { train } => {
                write!(f, "{train} tries to arrive, but no track is free")
            }
            TickEvent::Turnaround {
                train,
                track,
                dropped,
                to_waiting,
                boarded,
            } => write!(
                f,
                "{train} drops off {dropped} (waiting +{to_waiting}), boards {boarded}, leaves track {track}"
            ),
        }
    }
}

/// One station plus a registry of trains.
///
/// The simulation owns everything it mutates; there is no shared state.
/// Trains are kept in registration order, which is also the order used
/// when a tick picks a train at random.
pub struct Simulation<R> {
    station: Station,
    trains: Vec<Train>,
    max_per_turn: u32,
    rng: R,
}

impl<R: RandomSource> Simulation<R> {
    /// Fails with `InvalidArgument` if two trains share an id.
    pub fn new(
        station: Station,
        trains: Vec<Train>,
        max_per_turn: u32,
        rng: R,
    ) -> Result<Self, SimError> {
        if let Some(dup) = first_duplicate(&trains) {
            return Err(SimError::invalid(format!("duplicate train id: {dup}")));
        }

        Ok(Self {
            station,
            trains,
            max_per_turn,
            rng,
        })
    }

    pub fn from_config(config: &SimulationConfig, rng: R) -> Result<Self, SimError> {
        let (station, trains) = config.build()?;
        Self::new(station, trains, config.max_per_turn, rng)
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn station_mut(&mut self) -> &mut Station {
        &mut self.station
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn train(&self, id: &str) -> Option<&Train> {
        self.trains.iter().find(|t| t.id().as_str() == id)
    }

    pub fn max_per_turn(&self) -> u32 {
        self.max_per_turn
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// The named train requests the first free track.
    pub fn arrive(&mut self, id: &str) -> Result<Option<TrackNumber>, SimError> {
        let train = find_mut(&mut self.trains, id)?;
        train.request_track(&mut self.station)
    }

    /// The named train drops off up to `count` passengers.
    pub fn drop_off(&mut self, id: &str, count: u32) -> Result<DropOff, SimError> {
        let train = find_mut(&mut self.trains, id)?;
        train.drop_off_passengers(&mut self.station, count, &mut self.rng)
    }

    /// Board a random number of waiting passengers onto the named train.
    ///
    /// Unlike [`Station::board_random_passengers`], this requires the train
    /// to be in the station.
    pub fn board(&mut self, id: &str) -> Result<u32, SimError> {
        let train = find_mut(&mut self.trains, id)?;
        if !train.is_in_station() {
            return Err(SimError::NotInStation(train.id().clone()));
        }
        self.station
            .board_random_passengers(train, self.max_per_turn, &mut self.rng)
    }

    /// The named train leaves, freeing its track.
    pub fn leave(&mut self, id: &str) -> Result<(), SimError> {
        let train = find_mut(&mut self.trains, id)?;
        train.leave_station(&mut self.station)
    }

    /// Run `steps` random turns, collecting what happened.
    ///
    /// Each turn picks a train uniformly. An outside train requests a
    /// track. A train in the station drops off a random number of its
    /// passengers, boards, then leaves. An empty fleet does nothing.
    pub fn tick(&mut self, steps: u32) -> Result<Vec<TickEvent>, SimError> {
        let mut events = Vec::new();
        self.tick_with(steps, |event| events.push(event.clone()))?;
        Ok(events)
    }

    /// Like [`Simulation::tick`], handing each event to `on_event` as soon
    /// as its turn completes.
    ///
    /// If a turn fails, the earlier turns stay applied and have already
    /// been reported.
    pub fn tick_with<F: FnMut(&TickEvent)>(
        &mut self,
        steps: u32,
        mut on_event: F,
    ) -> Result<(), SimError> {
        if self.trains.is_empty() {
            return Ok(());
        }

        let last = self.trains.len() as u32 - 1;
        for step in 1..=steps {
            let idx = self.rng.int_inclusive(0, last) as usize;
            let event = self.turn(idx)?;
            debug!(step, %event, "tick");
            on_event(&event);
        }

        Ok(())
    }

    fn turn(&mut self, idx: usize) -> Result<TickEvent, SimError> {
        let train = &mut self.trains[idx];
        let id = train.id().clone();

        let Some(track) = train.assigned_track() else {
            return Ok(match train.request_track(&mut self.station)? {
                Some(track) => TickEvent::Arrived { train: id, track },
                None => TickEvent::NoTrackFree { train: id },
            });
        };

        let to_drop = self.rng.int_inclusive(0, train.passengers());
        let DropOff {
            dropped,
            to_waiting,
        } = train.drop_off_passengers(&mut self.station, to_drop, &mut self.rng)?;
        let boarded = self
            .station
            .board_random_passengers(train, self.max_per_turn, &mut self.rng)?;
        train.leave_station(&mut self.station)?;

        Ok(TickEvent::Turnaround {
            train: id,
            track,
            dropped,
            to_waiting,
            boarded,
        })
    }

    /// Snapshot of the station and every train.
    pub fn status(&self) -> StationStatus {
        StationStatus::capture(&self.station, &self.trains)
    }
}

fn find_mut<'a>(trains: &'a mut [Train], id: &str) -> Result<&'a mut Train, SimError> {
    trains
        .iter_mut()
        .find(|t| t.id().as_str() == id)
        .ok_or_else(|| SimError::invalid(format!("unknown train: {id}")))
}

/// The first id that appears more than once, if any.
pub(crate) fn first_duplicate(trains: &[Train]) -> Option<&TrainId> {
    let mut seen = HashSet::new();
    trains.iter().map(Train::id).find(|id| !seen.insert(*id))
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
