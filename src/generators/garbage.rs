//! Garbage block decoration
//!
//! Scatters obstacles into cells no move ever touches. Push paths, pusher
//! cells and stop cells stay clear, so the layout remains solvable.

use glam::IVec2;

use crate::board::Board;
use crate::events::{EventSink, GenerationEvent, LogSink};
use crate::puzzle::PuzzleLayout;
use crate::rng::RandomSeed;
use crate::tile::Tile;

/// Adds random stop and break blocks to the dead space of a layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarbageGenerator {
    /// Fraction of open cells to fill
    pub target_density: f32,
    /// Chance that a garbage block is a break block
    pub break_block_chance: f32,
}

impl GarbageGenerator {
    pub fn new(target_density: f32, break_block_chance: f32) -> Self {
        Self {
            target_density,
            break_block_chance,
        }
    }

    /// Add garbage to the layout in place.
    pub fn generate_garbage(&self, layout: &mut PuzzleLayout, rng: &mut RandomSeed) {
        self.generate_garbage_with(layout, rng, &mut LogSink);
    }

    pub fn generate_garbage_with(
        &self,
        layout: &mut PuzzleLayout,
        rng: &mut RandomSeed,
        sink: &mut dyn EventSink,
    ) {
        let mut positions = open_positions(layout);
        let open = positions.len();
        let count = self.target_blocks(open).min(open);
        rng.shuffle(&mut positions);

        for &position in &positions[..count] {
            let block = if rng.chance(self.break_block_chance) {
                Tile::BREAK_BLOCK | Tile::GARBAGE
            } else {
                Tile::STOP_BLOCK | Tile::GARBAGE
            };
            layout.tiles.insert(position, block);
        }

        sink.event(&GenerationEvent::GarbagePlaced { count, open });
    }

    /// Garbage blocks needed to meet or exceed the target density.
    pub fn target_blocks(&self, open: usize) -> usize {
        let target = (self.target_density as f64 * open as f64).ceil();
        target.max(0.0) as usize
    }
}

/// Copy of the layout's board with every cell a move relies on marked.
pub fn marked_tiles(layout: &PuzzleLayout) -> Board {
    let mut board = layout.tiles.clone();

    for m in &layout.moves {
        board.insert(m.push_position(), Tile::MARKED);
        board.insert(m.stop_position(), Tile::MARKED);
        for p in m.path() {
            board.insert(p, Tile::MARKED);
        }
    }

    board
}

/// Empty cells untouched by any move, in row-major order.
pub fn open_positions(layout: &PuzzleLayout) -> Vec<IVec2> {
    marked_tiles(layout).find_positions(|t| t.is_none())
}
