//! Bounded tree of corridors and rooms.

use std::fmt;

use crate::core::Direction;

use super::corridor::{Corridor, CorridorIndex, Room, RoomIndex};

/// Corridors the pool can hold, root included.
pub const MAX_CORRIDORS: usize = 10;

/// Rooms a single corridor can hold.
pub const MAX_ROOMS_PER_CORRIDOR: usize = 10;

/// Kind of map entity, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEntity {
    /// Corridor pool
    Corridor,
    /// Room sequence of one corridor
    Room,
}

impl fmt::Display for MapEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapEntity::Corridor => f.write_str("corridor"),
            MapEntity::Room => f.write_str("room"),
        }
    }
}

/// Building map bookkeeping errors.
///
/// A failed insert leaves the map exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Pool or room sequence already full
    #[error("{what} capacity exceeded (max {capacity})")]
    CapacityExceeded {
        /// Which collection was full
        what: MapEntity,
        /// Its fixed capacity
        capacity: usize,
    },

    /// Index does not address a created corridor
    #[error("unknown corridor {0}")]
    UnknownCorridor(CorridorIndex),
}

impl MapError {
    /// Short error code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            MapError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            MapError::UnknownCorridor(_) => "UNKNOWN_CORRIDOR",
        }
    }
}

/// Exploration memory: a rooted tree of corridors held in a fixed pool.
///
/// The root corridor exists from construction, so there is always a current
/// corridor. Corridors are only ever appended; [`reset`](Self::reset) is the
/// only way to discard them. Parents are created before their children, so
/// every parent index is smaller than its child's and the tree has no cycles.
#[derive(Debug, Clone)]
pub struct BuildingMap {
    corridors: Vec<Corridor>,
    current: CorridorIndex,
    corridor_capacity: usize,
    room_capacity: usize,
}

impl BuildingMap {
    /// Map with the default capacities and a root corridor.
    pub fn new() -> Self {
        Self::with_capacity(MAX_CORRIDORS, MAX_ROOMS_PER_CORRIDOR)
    }

    /// Map with custom capacities. A capacity of zero corridors is raised to
    /// one, since the root always exists.
    pub fn with_capacity(corridor_capacity: usize, room_capacity: usize) -> Self {
        let corridor_capacity = corridor_capacity.max(1);
        let mut corridors = Vec::with_capacity(corridor_capacity);
        corridors.push(Corridor::new(0, None, Direction::Invalid, room_capacity));

        Self {
            corridors,
            current: CorridorIndex::ROOT,
            corridor_capacity,
            room_capacity,
        }
    }

    /// Corridor currently being traversed
    pub fn current_corridor(&self) -> &Corridor {
        &self.corridors[self.current.0]
    }

    /// Index of the current corridor
    pub fn current_index(&self) -> CorridorIndex {
        self.current
    }

    /// Corridor at `index`
    pub fn corridor(&self, index: CorridorIndex) -> Option<&Corridor> {
        self.corridors.get(index.0)
    }

    /// All corridors in creation order
    pub fn corridors(&self) -> impl Iterator<Item = &Corridor> {
        self.corridors.iter()
    }

    /// Number of corridors created (root included)
    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    /// Fixed corridor capacity
    pub fn corridor_capacity(&self) -> usize {
        self.corridor_capacity
    }

    /// Whether the corridor pool is full
    pub fn is_full(&self) -> bool {
        self.corridors.len() >= self.corridor_capacity
    }

    /// Append a corridor branching off `parent` and make it current.
    ///
    /// # Errors
    /// `UnknownCorridor` if `parent` was never created, `CapacityExceeded`
    /// if the pool is full. The map is unchanged on error and the previous
    /// corridor stays current.
    pub fn create_corridor(
        &mut self,
        parent: CorridorIndex,
        direction: Direction,
    ) -> Result<CorridorIndex, MapError> {
        if self.corridor(parent).is_none() {
            return Err(MapError::UnknownCorridor(parent));
        }
        if self.is_full() {
            return Err(MapError::CapacityExceeded {
                what: MapEntity::Corridor,
                capacity: self.corridor_capacity,
            });
        }

        let index = CorridorIndex(self.corridors.len());
        self.corridors.push(Corridor::new(
            index.0,
            Some(parent),
            direction,
            self.room_capacity,
        ));
        self.current = index;

        log::debug!("Created corridor {} from {} ({})", index, parent, direction);
        Ok(index)
    }

    /// Append a room to `corridor`.
    ///
    /// # Errors
    /// `UnknownCorridor` or `CapacityExceeded`; the map is unchanged on error.
    pub fn add_room(
        &mut self,
        corridor: CorridorIndex,
        elapsed_ms: f32,
        direction: Direction,
    ) -> Result<RoomIndex, MapError> {
        let room_capacity = self.room_capacity;
        let target = self
            .corridors
            .get_mut(corridor.0)
            .ok_or(MapError::UnknownCorridor(corridor))?;

        if target.room_count() >= room_capacity {
            return Err(MapError::CapacityExceeded {
                what: MapEntity::Room,
                capacity: room_capacity,
            });
        }

        let slot = target.push_room(Room {
            time_down_corridor: elapsed_ms,
            direction_from_corridor: direction,
        });

        log::debug!(
            "Added room {} to {} after {:.0} ms",
            slot,
            corridor,
            elapsed_ms
        );
        Ok(RoomIndex { corridor, slot })
    }

    /// Close a driving segment of `corridor` and return its new length.
    ///
    /// Length is every closed segment plus every room segment, so driving a
    /// closed corridor again only ever extends it.
    pub fn close_corridor(
        &mut self,
        corridor: CorridorIndex,
        segment_ms: f32,
    ) -> Result<f32, MapError> {
        let target = self
            .corridors
            .get_mut(corridor.0)
            .ok_or(MapError::UnknownCorridor(corridor))?;
        Ok(target.close_segment(segment_ms))
    }

    /// Single hop up the parent relation; `None` for the root.
    pub fn parent_of(&self, child: CorridorIndex) -> Option<CorridorIndex> {
        self.corridor(child).and_then(Corridor::parent)
    }

    /// Parent corridor record of `child`
    pub fn parent_corridor(&self, child: CorridorIndex) -> Option<&Corridor> {
        self.parent_of(child).and_then(|p| self.corridor(p))
    }

    /// Direct children of `parent` in creation order
    pub fn children(&self, parent: CorridorIndex) -> impl Iterator<Item = &Corridor> {
        self.corridors
            .iter()
            .filter(move |c| c.parent() == Some(parent))
    }

    /// Corridors from `index` up to and including the root.
    ///
    /// Empty if `index` was never created.
    pub fn lineage(&self, index: CorridorIndex) -> Vec<CorridorIndex> {
        let mut path = Vec::new();
        let mut cursor = self.corridor(index).map(Corridor::index);
        while let Some(idx) = cursor {
            path.push(idx);
            cursor = self.parent_of(idx);
        }
        path
    }

    /// Make the parent of the current corridor current.
    ///
    /// Returns the new current index, or `None` when already at the root.
    pub fn retreat_to_parent(&mut self) -> Option<CorridorIndex> {
        let parent = self.parent_of(self.current)?;
        self.current = parent;
        Some(parent)
    }

    /// Sum of all closed corridor lengths (ms)
    pub fn total_length(&self) -> f32 {
        self.corridors.iter().map(Corridor::approx_length).sum()
    }

    /// Total rooms across all corridors
    pub fn room_count(&self) -> usize {
        self.corridors.iter().map(Corridor::room_count).sum()
    }

    /// Discard everything except a cleared root corridor.
    pub fn reset(&mut self) {
        self.corridors.truncate(1);
        self.corridors[0].clear();
        self.current = CorridorIndex::ROOT;
    }

    fn fmt_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        corridor: &Corridor,
        depth: usize,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let marker = if corridor.index() == self.current { "*" } else { " " };
        writeln!(
            f,
            "{}{}{} [{}] {:.2}s, {} room(s)",
            indent,
            marker,
            corridor.index(),
            corridor.direction_from_parent(),
            corridor.approx_length() / 1000.0,
            corridor.room_count()
        )?;
        for (slot, offset) in corridor.room_offsets().enumerate() {
            writeln!(
                f,
                "{}   R{} @ {:.2}s [{}]",
                indent,
                slot,
                offset / 1000.0,
                corridor.rooms()[slot].direction_from_corridor
            )?;
        }
        for child in self.children(corridor.index()) {
            self.fmt_subtree(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl Default for BuildingMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildingMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Building map: {}/{} corridors, {} room(s), {:.2}s total",
            self.corridors.len(),
            self.corridor_capacity,
            self.room_count(),
            self.total_length() / 1000.0
        )?;
        self.fmt_subtree(f, &self.corridors[0], 0)
    }
}
