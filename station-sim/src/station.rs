//! The station: track ledger and waiting-passenger pool.
//!
//! The station is the authority on who occupies which track. Trains ask it
//! for a track, release it when they leave, and deposit alighting
//! passengers into its waiting pool.

use tracing::trace;

use crate::domain::{TrackNumber, TrainId};
use crate::error::SimError;
use crate::random::RandomSource;
use crate::train::Train;

/// A station with a fixed number of tracks and an unbounded waiting area.
#[derive(Debug, Clone)]
pub struct Station {
    /// Occupant of each track; index 0 is track 1.
    tracks: Vec<Option<TrainId>>,
    waiting_passengers: u32,
}

impl Station {
    /// Largest number of tracks a station may have.
    pub const MAX_TRACKS: u32 = 1_000;

    /// Create a station with all tracks free.
    ///
    /// Fails with `InvalidArgument` if `track_count` is zero or above
    /// [`Station::MAX_TRACKS`].
    pub fn new(track_count: u32, waiting_passengers: u32) -> Result<Self, SimError> {
        if track_count == 0 {
            return Err(SimError::invalid("track count must be > 0"));
        }
        if track_count > Self::MAX_TRACKS {
            return Err(SimError::invalid(format!(
                "track count must be <= {}",
                Self::MAX_TRACKS
            )));
        }

        Ok(Self {
            tracks: vec![None; track_count as usize],
            waiting_passengers,
        })
    }

    /// Number of tracks, fixed at construction.
    pub fn track_count(&self) -> u32 {
        self.tracks.len() as u32
    }

    /// Passengers at the station but not aboard any train.
    pub fn waiting_passengers(&self) -> u32 {
        self.waiting_passengers
    }

    /// Number of tracks nobody currently occupies.
    pub fn free_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_none()).count()
    }

    /// The train occupying `track`, or `None` if it is free or does not exist.
    pub fn occupant(&self, track: TrackNumber) -> Option<&TrainId> {
        self.tracks.get(track.index()).and_then(Option::as_ref)
    }

    /// The lowest-numbered track held by `train`, if any.
    pub fn track_of(&self, train: &TrainId) -> Option<TrackNumber> {
        self.tracks()
            .find(|(_, occupant)| *occupant == Some(train))
            .map(|(track, _)| track)
    }

    /// All tracks in ascending order with their occupants.
    pub fn tracks(&self) -> impl Iterator<Item = (TrackNumber, Option<&TrainId>)> + '_ {
        (1..).zip(&self.tracks).filter_map(|(n, occupant)| {
            TrackNumber::new(n).map(|track| (track, occupant.as_ref()))
        })
    }

    /// Add passengers to the waiting pool.
    ///
    /// The waiting area has no capacity limit; only integer overflow is
    /// rejected, with `InvalidArgument`.
    pub fn add_waiting_passengers(&mut self, count: u32) -> Result<(), SimError> {
        self.waiting_passengers = self
            .waiting_passengers
            .checked_add(count)
            .ok_or_else(|| SimError::invalid("waiting passenger count would overflow"))?;
        Ok(())
    }

    /// Give `train` the lowest-numbered free track.
    ///
    /// Returns `None` when every track is occupied. No check is made that
    /// `train` does not already hold a track; `Train::request_track` guards
    /// against that.
    pub fn assign_first_free_track(&mut self, train: &TrainId) -> Option<TrackNumber> {
        let idx = self.tracks.iter().position(Option::is_none)?;
        let track = TrackNumber::new(idx as u32 + 1)?;
        self.tracks[idx] = Some(train.clone());
        trace!(%train, %track, "track assigned");
        Some(track)
    }

    /// Free `track`, which must currently be held by `train`.
    ///
    /// Fails with `InvalidArgument` if the track does not exist and with
    /// `TrackNotHeld` (a conflict) if it is free or held by another train.
    pub fn release_track(&mut self, track: TrackNumber, train: &TrainId) -> Result<(), SimError> {
        let slot = self.tracks.get_mut(track.index()).ok_or_else(|| {
            SimError::invalid(format!("track {track} does not exist"))
        })?;

        if slot.as_ref() != Some(train) {
            return Err(SimError::TrackNotHeld {
                track,
                train: train.clone(),
                current: slot.clone(),
            });
        }

        *slot = None;
        trace!(%train, %track, "track released");
        Ok(())
    }

    /// Board a random number of waiting passengers onto `train`.
    ///
    /// The amount is drawn uniformly from `[0, max]` where `max` is the
    /// smallest of the waiting pool, the train's free seats and
    /// `max_per_turn`. Zero is always a possible outcome. When nobody is
    /// waiting or the train is full, returns 0 without drawing.
    ///
    /// Returns the number of passengers that actually boarded.
    pub fn board_random_passengers<R: RandomSource + ?Sized>(
        &mut self,
        train: &mut Train,
        max_per_turn: u32,
        rng: &mut R,
    ) -> Result<u32, SimError> {
        if self.waiting_passengers == 0 {
            return Ok(0);
        }

        let free_seats = train.free_seats();
        if free_seats == 0 {
            return Ok(0);
        }

        let max_boardable = self.waiting_passengers.min(free_seats).min(max_per_turn);
        if max_boardable == 0 {
            return Ok(0);
        }

        let to_board = rng.int_inclusive(0, max_boardable);

        train.add_passengers(to_board)?;
        self.waiting_passengers -= to_board;

        trace!(
            train = %train.id(),
            boarded = to_board,
            waiting = self.waiting_passengers,
            "passengers boarded"
        );
        Ok(to_board)
    }

    /// One line per track in ascending order, for display.
    pub fn tracks_status(&self) -> String {
        self.tracks()
            .map(|(track, occupant)| match occupant {
                Some(train) => format!("Track {track}: occupied by {train}"),
                None => format!("Track {track}: free"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::random::{FixedRandom, ScriptedRandom};

    fn id(s: &str) -> TrainId {
        TrainId::parse(s).unwrap()
    }

    fn track(n: u32) -> TrackNumber {
        TrackNumber::new(n).unwrap()
    }

    fn train(name: &str, capacity: u32, passengers: u32) -> Train {
        Train::new(id(name), capacity, passengers).unwrap()
    }

    #[test]
    fn new_validates_track_count() {
        let station = Station::new(3, 100).unwrap();
        assert_eq!(station.waiting_passengers(), 100);
        assert_eq!(station.track_count(), 3);
        assert_eq!(station.free_track_count(), 3);

        let err = Station::new(0, 100).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn new_rejects_track_count_above_limit() {
        let station = Station::new(Station::MAX_TRACKS, 0).unwrap();
        assert_eq!(station.track_count(), Station::MAX_TRACKS);

        let err = Station::new(u32::MAX, 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: track count must be <= 1000");
    }

    #[test]
    fn fresh_station_has_all_tracks_free() {
        let station = Station::new(4, 0).unwrap();
        let tracks: Vec<_> = station.tracks().collect();
        assert_eq!(tracks.len(), 4);
        for (i, (t, occupant)) in tracks.iter().enumerate() {
            assert_eq!(t.get(), i as u32 + 1);
            assert!(occupant.is_none());
        }
    }

    #[test]
    fn assign_returns_tracks_in_order_then_none() {
        let mut station = Station::new(2, 0).unwrap();
        assert_eq!(station.assign_first_free_track(&id("T1")), Some(track(1)));
        assert_eq!(station.assign_first_free_track(&id("T2")), Some(track(2)));
        assert_eq!(station.assign_first_free_track(&id("T3")), None);
        assert_eq!(station.occupant(track(1)), Some(&id("T1")));
        assert_eq!(station.occupant(track(2)), Some(&id("T2")));
        assert_eq!(station.free_track_count(), 0);
    }

    #[test]
    fn assign_fills_lowest_gap_first() {
        let mut station = Station::new(3, 0).unwrap();
        station.assign_first_free_track(&id("T1"));
        station.assign_first_free_track(&id("T2"));
        station.assign_first_free_track(&id("T3"));
        station.release_track(track(2), &id("T2")).unwrap();
        station.release_track(track(1), &id("T1")).unwrap();

        assert_eq!(station.assign_first_free_track(&id("T4")), Some(track(1)));
        assert_eq!(station.assign_first_free_track(&id("T5")), Some(track(2)));
    }

    #[test]
    fn assign_same_train_twice_takes_a_second_track() {
        let mut station = Station::new(3, 0).unwrap();
        assert_eq!(station.assign_first_free_track(&id("T1")), Some(track(1)));
        assert_eq!(station.assign_first_free_track(&id("T1")), Some(track(2)));
        assert_eq!(station.track_of(&id("T1")), Some(track(1)));
    }

    #[test]
    fn release_frees_track_for_new_train() {
        let mut station = Station::new(1, 0).unwrap();
        assert_eq!(station.assign_first_free_track(&id("T1")), Some(track(1)));
        station.release_track(track(1), &id("T1")).unwrap();
        assert_eq!(station.occupant(track(1)), None);
        assert_eq!(station.assign_first_free_track(&id("T2")), Some(track(1)));
    }

    #[test]
    fn release_unknown_track_is_invalid() {
        let mut station = Station::new(2, 0).unwrap();
        let err = station.release_track(track(3), &id("T1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "invalid argument: track 3 does not exist");
    }

    #[test]
    fn release_free_track_conflicts() {
        let mut station = Station::new(2, 0).unwrap();
        let err = station.release_track(track(1), &id("T1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err,
            SimError::TrackNotHeld {
                track: track(1),
                train: id("T1"),
                current: None,
            }
        );
    }

    #[test]
    fn release_track_held_by_other_train_conflicts() {
        let mut station = Station::new(2, 0).unwrap();
        station.assign_first_free_track(&id("T1"));
        let err = station.release_track(track(1), &id("T2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        // Still held by T1
        assert_eq!(station.occupant(track(1)), Some(&id("T1")));
    }

    #[test]
    fn add_waiting_passengers_accumulates() {
        let mut station = Station::new(1, 10).unwrap();
        station.add_waiting_passengers(5).unwrap();
        station.add_waiting_passengers(0).unwrap();
        assert_eq!(station.waiting_passengers(), 15);
    }

    #[test]
    fn add_waiting_passengers_rejects_overflow() {
        let mut station = Station::new(1, u32::MAX - 1).unwrap();
        let err = station.add_waiting_passengers(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(station.waiting_passengers(), u32::MAX - 1);
    }

    #[test]
    fn board_moves_drawn_amount() {
        let mut station = Station::new(1, 100).unwrap();
        let mut t = train("T1", 50, 0);
        let mut rng = ScriptedRandom::new([17]);

        let boarded = station.board_random_passengers(&mut t, 30, &mut rng).unwrap();

        assert_eq!(boarded, 17);
        assert_eq!(t.passengers(), 17);
        assert_eq!(station.waiting_passengers(), 83);
        assert_eq!(rng.requests(), &[(0, 30)]);
    }

    #[test]
    fn board_bound_is_min_of_waiting_seats_and_turn_limit() {
        // Waiting pool is the tightest bound
        let mut station = Station::new(1, 4).unwrap();
        let mut t = train("T1", 50, 0);
        let mut rng = ScriptedRandom::default();
        station.board_random_passengers(&mut t, 30, &mut rng).unwrap();
        assert_eq!(rng.requests(), &[(0, 4)]);

        // Free seats are the tightest bound
        let mut station = Station::new(1, 100).unwrap();
        let mut t = train("T1", 50, 45);
        let mut rng = ScriptedRandom::default();
        station.board_random_passengers(&mut t, 30, &mut rng).unwrap();
        assert_eq!(rng.requests(), &[(0, 5)]);
    }

    #[test]
    fn board_never_exceeds_capacity() {
        let mut station = Station::new(1, 100).unwrap();
        let mut t = train("T1", 10, 3);
        let boarded = station
            .board_random_passengers(&mut t, 100, &mut FixedRandom(u32::MAX))
            .unwrap();
        assert_eq!(boarded, 7);
        assert_eq!(t.passengers(), 10);
        assert_eq!(station.waiting_passengers(), 93);
    }

    #[test]
    fn board_returns_zero_without_drawing_when_nobody_waits() {
        let mut station = Station::new(1, 0).unwrap();
        let mut t = train("T1", 50, 0);
        let mut rng = ScriptedRandom::new([10]);
        assert_eq!(station.board_random_passengers(&mut t, 30, &mut rng).unwrap(), 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn board_returns_zero_without_drawing_when_train_full() {
        let mut station = Station::new(1, 100).unwrap();
        let mut t = train("T2", 50, 50);
        let mut rng = ScriptedRandom::new([10]);
        assert_eq!(station.board_random_passengers(&mut t, 30, &mut rng).unwrap(), 0);
        assert_eq!(rng.draws(), 0);
        assert_eq!(station.waiting_passengers(), 100);
    }

    #[test]
    fn board_with_zero_turn_limit_boards_nobody() {
        let mut station = Station::new(1, 100).unwrap();
        let mut t = train("T1", 50, 0);
        let mut rng = ScriptedRandom::new([10]);
        assert_eq!(station.board_random_passengers(&mut t, 0, &mut rng).unwrap(), 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn tracks_status_lists_every_track() {
        let mut station = Station::new(3, 0).unwrap();
        station.assign_first_free_track(&id("T1"));
        station.assign_first_free_track(&id("T2"));
        station.release_track(track(1), &id("T1")).unwrap();

        assert_eq!(
            station.tracks_status(),
            "Track 1: free\nTrack 2: occupied by T2\nTrack 3: free"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::SimRng;
    use proptest::prelude::*;

    proptest! {
        /// Successive assignments hand out 1, 2, ..., n and then nothing
        #[test]
        fn assignment_is_ascending_until_exhausted(n in 1u32..50) {
            let mut station = Station::new(n, 0).unwrap();
            for expected in 1..=n {
                let id = TrainId::parse(&format!("T{expected}")).unwrap();
                let got = station.assign_first_free_track(&id);
                prop_assert_eq!(got.map(TrackNumber::get), Some(expected));
            }
            let extra = TrainId::parse("extra").unwrap();
            prop_assert!(station.assign_first_free_track(&extra).is_none());
        }

        /// Boarding stays within bounds and conserves passengers
        #[test]
        fn boarding_conserves_passengers(
            seed in any::<u64>(),
            waiting in 0u32..500,
            capacity in 1u32..300,
            fill in 0u32..=100,
            max_per_turn in 0u32..200,
        ) {
            let passengers = capacity * fill / 100;
            let mut station = Station::new(1, waiting).unwrap();
            let mut train = Train::named("T1", capacity, passengers).unwrap();
            let mut rng = SimRng::from_seed_u64(seed);

            let bound = waiting.min(capacity - passengers).min(max_per_turn);
            let boarded = station
                .board_random_passengers(&mut train, max_per_turn, &mut rng)
                .unwrap();

            prop_assert!(boarded <= bound);
            prop_assert_eq!(station.waiting_passengers(), waiting - boarded);
            prop_assert_eq!(train.passengers(), passengers + boarded);
            prop_assert!(train.passengers() <= train.capacity());
        }
    }
}
