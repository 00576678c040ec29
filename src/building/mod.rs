//! Building map: a bounded tree of corridors with rooms along them.
//!
//! Lengths are elapsed driving time in milliseconds, used as a distance
//! proxy; no correction is made for speed variance.

mod corridor;
mod map;

pub use corridor::{Corridor, CorridorIndex, Room, RoomIndex};
pub use map::{BuildingMap, MAX_CORRIDORS, MAX_ROOMS_PER_CORRIDOR, MapEntity, MapError};
