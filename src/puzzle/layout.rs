//! Generated puzzle layout and its move reports

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::moves::PuzzleMove;
use crate::board::{Board, tiled_string};
use crate::error::Result;

/// A generated puzzle: the starting board, where each push block begins,
/// and the moves that solve it in forward order.
///
/// Field order is the persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleLayout {
    /// Seed the layout was generated from
    pub seed: u64,
    /// Initial push block positions, indexed by push block
    pub push_block_positions: Vec<IVec2>,
    /// Starting board
    pub tiles: Board,
    /// Moves in forward-play order
    pub moves: Vec<PuzzleMove>,
}

impl PuzzleLayout {
    /// Create an empty layout over a copy of `tiles`.
    pub fn new(tiles: &Board, seed: u64) -> Self {
        Self {
            seed,
            push_block_positions: Vec::new(),
            tiles: tiles.clone(),
            moves: Vec::new(),
        }
    }

    /// True if the position lies on the push path of any move.
    pub fn intersects(&self, position: IVec2) -> bool {
        self.moves.iter().any(|m| m.intersects(position))
    }

    /// The most recently recorded move of a push block.
    pub fn last_move(&self, push_block: usize) -> Option<&PuzzleMove> {
        self.moves.iter().rev().find(|m| m.push_block == push_block)
    }

    /// Board snapshots: the start board followed by the board after each
    /// forward move.
    pub fn boards(&self) -> Vec<Board> {
        let mut result = Vec::with_capacity(self.moves.len() + 1);
        let mut board = self.tiles.clone();
        result.push(board.clone());

        for m in &self.moves {
            m.apply(&mut board);
            result.push(board.clone());
        }

        result
    }

    /// Board after every move has been played.
    pub fn solved_board(&self) -> Board {
        let mut board = self.tiles.clone();
        for m in &self.moves {
            m.apply(&mut board);
        }
        board
    }

    /// Every board snapshot, one after another.
    pub fn move_report(&self) -> Result<String> {
        let mut board = self.tiles.clone();
        let mut out = String::from("Start board:\n");
        out.push_str(&board.to_text()?);

        for (i, m) in self.moves.iter().enumerate() {
            m.apply(&mut board);
            out.push_str(&format!("\nMove {}:\n", i + 1));
            out.push_str(&board.to_text()?);
        }

        Ok(out)
    }

    /// Board snapshots laid out `columns` per band.
    pub fn tiled_move_report(&self, columns: usize) -> Result<String> {
        tiled_string(&self.boards(), columns)
    }
}
