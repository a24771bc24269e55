//! Railway station simulator.
//!
//! A station with a fixed set of tracks, trains that request and release
//! them, and passengers moving between trains and the station's waiting
//! pool. Boarding and alighting amounts are random, drawn from an
//! injected [`random::RandomSource`] so runs can be seeded or scripted.

pub mod domain;
pub mod error;
pub mod random;
pub mod sim;
pub mod station;
pub mod train;

pub use error::{ErrorKind, SimError};
pub use station::Station;
pub use train::{DropOff, Train};
