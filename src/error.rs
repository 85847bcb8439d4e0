//! Error types for generation, rendering and persistence
//!
//! Search exhaustion is not an error: `MoveGenerator::generate_layout`
//! reports it as `Ok(None)`.

use crate::tile::Tile;

/// Hard failures reported by the generators and board utilities.
#[derive(thiserror::Error, Debug)]
pub enum GenError {
    #[error("no position fits a {rows}x{columns} goal")]
    NoGoalPlacement { rows: i32, columns: i32 },

    #[error("no goal cell has an empty neighbor to seed a push block")]
    NoSeedPosition,

    #[error("raycast direction must be a non-zero vector")]
    ZeroDirection,

    #[error("tile has no text glyph: {0:?}")]
    UnrenderableTile(Tile),

    #[error("unknown glyph {ch:?} at row {row}, column {column}")]
    UnknownGlyph { ch: char, row: usize, column: usize },

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{rows}x{columns} board stores {found} tiles")]
    TileCountMismatch {
        rows: usize,
        columns: usize,
        found: usize,
    },

    #[error("stored tile at row {row}, column {column} is marked out of bounds")]
    StoredOutOfBounds { row: usize, column: usize },

    #[error("board {index} is {found_rows}x{found_columns}, expected {rows}x{columns}")]
    MismatchedBoards {
        index: usize,
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("unsupported layout file version {0}")]
    UnsupportedVersion(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
