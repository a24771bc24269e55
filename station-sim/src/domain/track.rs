//! Track number type.

use std::fmt;
use std::num::NonZeroU32;

/// A 1-based station track number.
///
/// Tracks are numbered `1..=track_count`; zero is never a valid track.
///
/// # Examples
///
/// ```
/// use station_sim::domain::TrackNumber;
///
/// let track = TrackNumber::new(3).unwrap();
/// assert_eq!(track.get(), 3);
/// assert!(TrackNumber::new(0).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackNumber(NonZeroU32);

impl TrackNumber {
    /// Returns `None` for zero.
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(TrackNumber)
    }

    /// The track number as a plain integer.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Zero-based position of this track in the station's ledger.
    pub(crate) fn index(self) -> usize {
        (self.get() - 1) as usize
    }
}

impl fmt::Debug for TrackNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track({})", self.get())
    }
}

impl fmt::Display for TrackNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
