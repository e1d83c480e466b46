use crate::math::Point3;

use super::direction::Direction;

slotmap::new_key_type! {
    /// Unique identifier for a tile in the grid store.
    pub struct TileId;
}

/// What a grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Corridor,
}

/// A tile's role in the currently running bend animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BendPhase {
    /// Not participating.
    #[default]
    None,
    /// The segment being bent or straightened.
    Bend,
    /// Reachable from the bending segment along its original facing;
    /// re-anchored each step while a bend runs.
    After,
    /// Reachable along the opposite facing; re-anchored while a
    /// straighten runs.
    Before,
}

/// Data associated with one grid cell.
#[derive(Debug, Clone)]
pub struct TileData {
    row: usize,
    column: usize,
    kind: TileKind,
    location: Point3,
    /// Current facing; updated when a bend completes.
    pub(crate) direction: Direction,
    starting_direction: Direction,
    is_bendable: bool,
    pub(crate) phase: BendPhase,
}

impl TileData {
    /// Creates a tile. The starting direction is fixed to the initial
    /// facing for the lifetime of the tile.
    #[must_use]
    pub fn new(
        row: usize,
        column: usize,
        kind: TileKind,
        location: Point3,
        direction: Direction,
        is_bendable: bool,
    ) -> Self {
        Self {
            row,
            column,
            kind,
            location,
            direction,
            starting_direction: direction,
            is_bendable,
            phase: BendPhase::None,
        }
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// World location of the tile center (z carries the height offset).
    #[must_use]
    pub fn location(&self) -> &Point3 {
        &self.location
    }

    /// Current facing.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Original facing at placement time; never changes.
    #[must_use]
    pub fn starting_direction(&self) -> Direction {
        self.starting_direction
    }

    #[must_use]
    pub fn is_bendable(&self) -> bool {
        self.is_bendable
    }

    /// Role in the running animation, if any.
    #[must_use]
    pub fn phase(&self) -> BendPhase {
        self.phase
    }
}
