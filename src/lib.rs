//! Aycblok - reverse-generated block pushing puzzles
//!
//! Puzzles are built backward from the solution: push blocks start on their
//! goals and are pulled outward through legal reverse moves, so the recorded
//! moves solve the board by construction.
//!
//! Core modules:
//! - `tile`: Tile layer flags
//! - `board`: Grid, raycasting and text rendering
//! - `puzzle`: Moves and layouts
//! - `generators`: Goal, move and garbage generation
//! - `settings`: Data-driven generator configuration
//! - `persistence`: Versioned JSON save/load

pub mod board;
pub mod error;
pub mod events;
pub mod generators;
pub mod persistence;
pub mod puzzle;
pub mod rng;
pub mod settings;
pub mod tile;

pub use board::{Board, RaycastHit};
pub use error::{GenError, Result};
pub use events::{EventSink, GenerationEvent, LogSink, NullSink};
pub use generators::{GarbageGenerator, GoalGenerator, MoveGenerator, generate_puzzle};
pub use puzzle::{PuzzleLayout, PuzzleMove};
pub use rng::RandomSeed;
pub use settings::{GeneratorSettings, Preset};
pub use tile::Tile;

/// Generator configuration constants
pub mod consts {
    /// Attempts made by the move generator before giving up
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

    /// Default blank area size for the command line tool
    pub const DEFAULT_AREA_SIZE: usize = 9;

    /// Boards per band in tiled move reports
    pub const REPORT_COLUMNS: usize = 3;
}
