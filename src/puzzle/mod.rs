//! Puzzle layout data model
//!
//! A layout is the solved board walked backward: push blocks, the obstacles
//! left behind to stop them, and the moves that solve it in forward order.

pub mod layout;
pub mod moves;

pub use layout::PuzzleLayout;
pub use moves::PuzzleMove;
