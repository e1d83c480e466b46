pub mod direction;
pub mod tile;

pub use direction::Direction;
pub use tile::{BendPhase, TileData, TileId, TileKind};

use slotmap::SlotMap;

use crate::error::{GridError, Result};
use crate::math::Point3;

/// World-space edge length of one tile.
pub const TILE_SIZE: f64 = 200.0;

/// Fixed-size 2D tile grid.
///
/// Tiles live in a slotmap arena and are addressed by generational
/// [`TileId`]s; a dense row × column index provides adjacency lookup.
/// Rows run along the x axis, columns along the y axis, so North/South
/// step the column and East/West step the row.
#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<TileId>>,
    tiles: SlotMap<TileId, TileData>,
}

impl Grid {
    /// Creates an empty grid with `width` rows and `height` columns.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            tiles: SlotMap::with_key(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of columns.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn cell_index(&self, row: usize, column: usize) -> usize {
        row * self.height + column
    }

    /// Places a tile at `(row, column)`, computing its world location from
    /// the grid dimensions and the given height offset.
    ///
    /// # Errors
    ///
    /// Fails when the cell is outside the grid or already occupied.
    pub fn place_tile(
        &mut self,
        row: usize,
        column: usize,
        kind: TileKind,
        height_offset: f64,
        direction: Direction,
        is_bendable: bool,
    ) -> Result<TileId> {
        if row >= self.width || column >= self.height {
            return Err(GridError::OutOfBounds {
                row,
                column,
                width: self.width,
                height: self.height,
            }
            .into());
        }
        let index = self.cell_index(row, column);
        if self.cells[index].is_some() {
            return Err(GridError::CellOccupied { row, column }.into());
        }

        #[allow(clippy::cast_precision_loss)]
        let location = Point3::new(
            row as f64 * TILE_SIZE - self.width as f64 / 2.0 * TILE_SIZE,
            column as f64 * TILE_SIZE - self.height as f64 / 2.0 * TILE_SIZE,
            height_offset,
        );

        let id = self
            .tiles
            .insert(TileData::new(row, column, kind, location, direction, is_bendable));
        self.cells[index] = Some(id);
        Ok(id)
    }

    /// Returns the tile occupying `(row, column)`, if any. Out-of-bounds
    /// coordinates are not an error — there is simply no tile there.
    #[must_use]
    pub fn tile_at(&self, row: usize, column: usize) -> Option<TileId> {
        if row >= self.width || column >= self.height {
            return None;
        }
        self.cells[self.cell_index(row, column)]
    }

    /// Returns a reference to the tile data.
    ///
    /// # Errors
    ///
    /// Fails if the id is not in the store.
    pub fn tile(&self, id: TileId) -> Result<&TileData> {
        self.tiles.get(id).ok_or_else(|| GridError::TileNotFound.into())
    }

    /// Returns a mutable reference to the tile data.
    ///
    /// # Errors
    ///
    /// Fails if the id is not in the store.
    pub fn tile_mut(&mut self, id: TileId) -> Result<&mut TileData> {
        self.tiles
            .get_mut(id)
            .ok_or_else(|| GridError::TileNotFound.into())
    }

    /// Iterates over all placed tiles.
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &TileData)> {
        self.tiles.iter()
    }

    /// Returns the neighboring tile one step in `direction`, or `None` at
    /// the grid edge or an empty cell. No wrap-around.
    #[must_use]
    pub fn adjacent(&self, id: TileId, direction: Direction) -> Option<TileId> {
        let tile = self.tiles.get(id)?;
        let (row, column) = (tile.row(), tile.column());
        let (row, column) = match direction {
            Direction::North => (Some(row), column.checked_add(1)),
            Direction::East => (row.checked_add(1), Some(column)),
            Direction::South => (Some(row), column.checked_sub(1)),
            Direction::West => (row.checked_sub(1), Some(column)),
        };
        self.tile_at(row?, column?)
    }

    /// Directional visibility scan: walks adjacency in `direction`
    /// starting just past `from`, collecting every contiguous tile until
    /// the grid edge or a gap. Ordered nearest-first.
    #[must_use]
    pub fn visible_from(&self, from: TileId, direction: Direction) -> Vec<TileId> {
        let mut visible = Vec::new();
        let mut current = self.adjacent(from, direction);
        while let Some(id) = current {
            visible.push(id);
            current = self.adjacent(id, direction);
        }
        visible
    }
}
