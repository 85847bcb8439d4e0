//! A single push-block move

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::tile::Tile;

/// One push of a block from `from_position` to `to_position`.
///
/// `stop_tile` is what halts the block: a stop or break block in the cell
/// past `to_position`, another push block there, or `GOAL` when the block
/// comes to rest on a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleMove {
    pub push_block: usize,
    pub stop_tile: Tile,
    pub from_position: IVec2,
    pub to_position: IVec2,
}

impl PuzzleMove {
    pub fn new(push_block: usize, stop_tile: Tile, from_position: IVec2, to_position: IVec2) -> Self {
        Self {
            push_block,
            stop_tile,
            from_position,
            to_position,
        }
    }

    /// Unit direction of travel in forward play
    #[inline]
    pub fn direction(&self) -> IVec2 {
        (self.to_position - self.from_position).signum()
    }

    /// Cell holding the obstacle that stops the block
    pub fn stop_position(&self) -> IVec2 {
        if self.stop_tile == Tile::GOAL {
            self.to_position
        } else {
            self.to_position + self.direction()
        }
    }

    /// Cell the pusher stands on to make the push
    pub fn push_position(&self) -> IVec2 {
        self.from_position - self.direction()
    }

    /// Play the move forward: break through a break block at the stop cell
    /// and slide the block.
    pub fn apply(&self, board: &mut Board) {
        board.remove(self.stop_position(), Tile::BREAK_BLOCK);
        board.insert(self.to_position, Tile::PUSH_BLOCK);
        board.remove(self.from_position, Tile::PUSH_BLOCK);
    }

    /// Undo the move: restore the stop obstacle and slide the block back.
    pub fn inverse_apply(&self, board: &mut Board) {
        board.insert(self.stop_position(), self.stop_tile);
        board.insert(self.from_position, Tile::PUSH_BLOCK);
        board.remove(self.to_position, Tile::PUSH_BLOCK);
    }

    /// True if the position lies on the push path, endpoints included.
    pub fn intersects(&self, position: IVec2) -> bool {
        let min = self.from_position.min(self.to_position);
        let max = self.from_position.max(self.to_position);
        position.cmpge(min).all() && position.cmple(max).all()
    }

    /// Every cell on the push path, endpoints included.
    pub fn path(&self) -> impl Iterator<Item = IVec2> + '_ {
        let min = self.from_position.min(self.to_position);
        let max = self.from_position.max(self.to_position);
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| IVec2::new(x, y)))
    }
}
