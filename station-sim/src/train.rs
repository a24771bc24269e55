//! A single train: its passengers and its occupancy of a station track.
//!
//! A train is either outside (no track) or in a station on exactly one
//! track. It does not hold a reference to the station; operations that
//! touch the station take it as an argument, and the station's ledger is
//! checked to confirm the train really is there.

use tracing::trace;

use crate::domain::{TrackNumber, TrainId};
use crate::error::SimError;
use crate::random::RandomSource;
use crate::station::Station;

/// Outcome of [`Train::drop_off_passengers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOff {
    /// Passengers who left the train.
    pub dropped: u32,
    /// How many of those stayed in the station's waiting pool.
    pub to_waiting: u32,
}

/// A train with a fixed capacity.
#[derive(Debug, Clone)]
pub struct Train {
    id: TrainId,
    capacity: u32,
    passengers: u32,
    assigned_track: Option<TrackNumber>,
}

impl Train {
    /// Create a train outside any station.
    ///
    /// Fails with `InvalidArgument` if `capacity` is zero or `passengers`
    /// exceeds it.
    pub fn new(id: TrainId, capacity: u32, passengers: u32) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::invalid("capacity must be > 0"));
        }
        if passengers > capacity {
            return Err(SimError::invalid("passengers cannot exceed capacity"));
        }

        Ok(Self {
            id,
            capacity,
            passengers,
            assigned_track: None,
        })
    }

    /// Like [`Train::new`], parsing the identifier first.
    pub fn named(id: &str, capacity: u32, passengers: u32) -> Result<Self, SimError> {
        Self::new(TrainId::parse(id)?, capacity, passengers)
    }

    pub fn id(&self) -> &TrainId {
        &self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    /// Capacity minus passengers aboard.
    pub fn free_seats(&self) -> u32 {
        self.capacity - self.passengers
    }

    /// Whether the train believes it is in a station.
    pub fn is_in_station(&self) -> bool {
        self.assigned_track.is_some()
    }

    pub fn assigned_track(&self) -> Option<TrackNumber> {
        self.assigned_track
    }

    /// Ask `station` for its first free track.
    ///
    /// Returns the assigned track, or `None` if the station is full (the
    /// train stays outside). Fails with `AlreadyInStation` if the train
    /// already holds a track.
    pub fn request_track(
        &mut self,
        station: &mut Station,
    ) -> Result<Option<TrackNumber>, SimError> {
        if let Some(track) = self.assigned_track {
            return Err(SimError::AlreadyInStation {
                train: self.id.clone(),
                track,
            });
        }

        let track = station.assign_first_free_track(&self.id);
        self.assigned_track = track;
        Ok(track)
    }

    /// Let up to `count` passengers off.
    ///
    /// Never drops more than are aboard; asking for more silently caps.
    /// A random share in `[0, dropped]` stays in the station's waiting
    /// pool, the rest leave the station. Fails with `NotInStation` unless
    /// the train holds a track in `station`. On error nothing changes.
    pub fn drop_off_passengers<R: RandomSource + ?Sized>(
        &mut self,
        station: &mut Station,
        count: u32,
        rng: &mut R,
    ) -> Result<DropOff, SimError> {
        self.track_in(station)?;

        let dropped = count.min(self.passengers);
        let to_waiting = if dropped == 0 {
            0
        } else {
            rng.int_inclusive(0, dropped)
        };

        // Station side first: it is the only step that can fail.
        station.add_waiting_passengers(to_waiting)?;
        self.passengers -= dropped;

        trace!(train = %self.id, dropped, to_waiting, "passengers dropped off");
        Ok(DropOff {
            dropped,
            to_waiting,
        })
    }

    /// Add passengers, failing with `CapacityExceeded` rather than capping.
    ///
    /// Has no station precondition.
    pub fn add_passengers(&mut self, count: u32) -> Result<(), SimError> {
        match self.passengers.checked_add(count) {
            Some(total) if total <= self.capacity => {
                self.passengers = total;
                Ok(())
            }
            _ => Err(SimError::CapacityExceeded {
                train: self.id.clone(),
                requested: count,
                capacity: self.capacity,
            }),
        }
    }

    /// Leave the station, releasing the held track.
    ///
    /// Fails with `NotInStation` if the train holds no track or `station`
    /// has no such track, and propagates `TrackNotHeld` if `station`
    /// disagrees about the occupancy. The train keeps its track on error.
    pub fn leave_station(&mut self, station: &mut Station) -> Result<(), SimError> {
        let track = self
            .assigned_track
            .filter(|track| track.get() <= station.track_count())
            .ok_or_else(|| SimError::NotInStation(self.id.clone()))?;

        station.release_track(track, &self.id)?;
        self.assigned_track = None;

        trace!(train = %self.id, %track, "left station");
        Ok(())
    }

    /// The held track, confirmed against `station`'s ledger.
    fn track_in(&self, station: &Station) -> Result<TrackNumber, SimError> {
        self.assigned_track
            .filter(|&track| station.occupant(track) == Some(&self.id))
            .ok_or_else(|| SimError::NotInStation(self.id.clone()))
    }
}
