use thiserror::Error;

/// Top-level error type for the corribend kernel.
#[derive(Debug, Error)]
pub enum CorribendError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Bend(#[from] BendError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parallel lines have no unique intersection")]
    ParallelLines,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the tile grid.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell [{row},{column}] is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        width: usize,
        height: usize,
    },

    #[error("cell [{row},{column}] is already occupied")]
    CellOccupied { row: usize, column: usize },

    #[error("tile not found in the grid store")]
    TileNotFound,
}

/// Errors related to the bend state machine.
#[derive(Debug, Error)]
pub enum BendError {
    #[error("another segment is already animating")]
    AnimationInProgress,

    #[error("tile [{row},{column}] is not bendable")]
    NotBendable { row: usize, column: usize },

    #[error("no active bend state to straighten")]
    NoActiveBend,

    #[error("a trigger to [{row},{column}] already exists")]
    TriggerExists { row: usize, column: usize },

    #[error("tile has no corridor segment")]
    NoSegment,
}

/// Convenience type alias for results using [`CorribendError`].
pub type Result<T> = std::result::Result<T, CorribendError>;
