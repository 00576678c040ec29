//! Corridor and room records.

use std::fmt;

use crate::core::Direction;

/// Stable index of a corridor in the map pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorridorIndex(pub usize);

impl CorridorIndex {
    /// The first corridor created with the map.
    pub const ROOT: CorridorIndex = CorridorIndex(0);
}

impl fmt::Display for CorridorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Position of a room: owning corridor plus insertion slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomIndex {
    /// Corridor the room hangs off
    pub corridor: CorridorIndex,
    /// Slot in that corridor's room sequence
    pub slot: usize,
}

/// Branch point declared by the operator while traversing a corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    /// Driving time (ms) of the segment that ended at this room.
    pub time_down_corridor: f32,
    /// Side of the corridor the room is on.
    pub direction_from_corridor: Direction,
}

/// One straight traversal segment.
///
/// Fields are only written through [`BuildingMap`](super::BuildingMap).
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    id: usize,
    approx_length: f32,
    /// Segments that ended at a wall or a new-corridor decision (ms)
    closed_ms: f32,
    parent: Option<CorridorIndex>,
    direction_from_parent: Direction,
    rooms: Vec<Room>,
}

impl Corridor {
    pub(super) fn new(
        id: usize,
        parent: Option<CorridorIndex>,
        direction_from_parent: Direction,
        room_capacity: usize,
    ) -> Self {
        Self {
            id,
            approx_length: 0.0,
            closed_ms: 0.0,
            parent,
            direction_from_parent,
            rooms: Vec::with_capacity(room_capacity),
        }
    }

    /// Creation-order id, equal to the pool index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Index of this corridor in the pool
    pub fn index(&self) -> CorridorIndex {
        CorridorIndex(self.id)
    }

    /// Time-based length estimate (ms); 0 until closed.
    pub fn approx_length(&self) -> f32 {
        self.approx_length
    }

    /// Corridor this one branched from
    pub fn parent(&self) -> Option<CorridorIndex> {
        self.parent
    }

    /// Turn taken from the parent
    pub fn direction_from_parent(&self) -> Direction {
        self.direction_from_parent
    }

    /// True for the corridor with no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Rooms in declaration order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms declared
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Sum of the recorded room segment times (ms).
    pub fn rooms_time(&self) -> f32 {
        self.rooms.iter().map(|r| r.time_down_corridor).sum()
    }

    /// Driving time from corridor entry to each room (ms).
    ///
    /// Running sum of the room segment times; non-decreasing.
    pub fn room_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.rooms.iter().scan(0.0f32, |acc, room| {
            *acc += room.time_down_corridor;
            Some(*acc)
        })
    }

    /// Fold a closing segment in; length = closed segments + room segments.
    pub(super) fn close_segment(&mut self, segment_ms: f32) -> f32 {
        self.closed_ms += segment_ms;
        self.approx_length = self.closed_ms + self.rooms_time();
        self.approx_length
    }

    pub(super) fn push_room(&mut self, room: Room) -> usize {
        self.rooms.push(room);
        self.rooms.len() - 1
    }

    pub(super) fn clear(&mut self) {
        self.approx_length = 0.0;
        self.closed_ms = 0.0;
        self.rooms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(ms: f32) -> Room {
        Room {
            time_down_corridor: ms,
            direction_from_corridor: Direction::Invalid,
        }
    }

    #[test]
    fn test_room_offsets_accumulate() {
        let mut corridor = Corridor::new(0, None, Direction::Invalid, 4);
        corridor.push_room(room(3000.0));
        corridor.push_room(room(1000.0));
        corridor.push_room(room(2000.0));

        let offsets: Vec<f32> = corridor.room_offsets().collect();
        assert_eq!(offsets, vec![3000.0, 4000.0, 6000.0]);
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(corridor.rooms_time(), 6000.0);
    }

    #[test]
    fn test_clear_keeps_identity() {
        let mut corridor = Corridor::new(3, Some(CorridorIndex(1)), Direction::Left, 4);
        corridor.push_room(room(500.0));
        corridor.close_segment(1000.0);
        corridor.clear();

        assert_eq!(corridor.id(), 3);
        assert_eq!(corridor.parent(), Some(CorridorIndex(1)));
        assert_eq!(corridor.room_count(), 0);
        assert_eq!(corridor.approx_length(), 0.0);
        assert_eq!(corridor.close_segment(300.0), 300.0);
    }

    #[test]
    fn test_close_segment_keeps_earlier_segments() {
        let mut corridor = Corridor::new(0, None, Direction::Invalid, 4);
        corridor.push_room(room(1200.0));
        assert_eq!(corridor.close_segment(1800.0), 3000.0);

        // Driven again after the wall: earlier length is the base
        assert_eq!(corridor.close_segment(200.0), 3200.0);
        corridor.push_room(room(400.0));
        assert_eq!(corridor.close_segment(100.0), 3700.0);
        assert_eq!(corridor.closed_ms, 2100.0);
    }

    #[test]
    fn test_index_display() {
        assert_eq!(CorridorIndex(4).to_string(), "C4");
        assert_eq!(CorridorIndex::ROOT, CorridorIndex(0));
    }
}
