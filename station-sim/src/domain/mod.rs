//! Identifier types shared by the station and its trains.
//!
//! Both types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod track;
mod train_id;

pub use track::TrackNumber;
pub use train_id::{InvalidTrainId, TrainId};
