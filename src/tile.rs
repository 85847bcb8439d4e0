//! Tile layers for puzzle boards
//!
//! A tile is a stack of flags. Obstacles, voids, goals and markers may be
//! combined freely, with one exception: a cell never holds both a stop block
//! and a break block.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// The layers present on one board cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Tile: u16 {
        /// Cell contains a stop block.
        const STOP_BLOCK = 1 << 0;
        /// Cell contains a break block.
        const BREAK_BLOCK = 1 << 1;
        /// Cell contains a push block.
        const PUSH_BLOCK = 1 << 2;
        /// Cell contains a push block goal.
        const GOAL = 1 << 3;
        /// No block may traverse the cell.
        const BLOCK_VOID = 1 << 4;
        /// The pusher may not traverse the cell.
        const PUSHER_VOID = 1 << 5;
        /// Neither blocks nor the pusher may traverse the cell.
        const VOID = Self::BLOCK_VOID.bits() | Self::PUSHER_VOID.bits();
        /// Synthesized by board accessors for positions outside the grid.
        const OUT_OF_BOUNDS = 1 << 6;
        /// Decorative obstacle added after move generation.
        const GARBAGE = 1 << 7;
        /// Scratch marker used internally by generators.
        const MARKED = 1 << 8;
        const CUSTOM1 = 1 << 9;
        const CUSTOM2 = 1 << 10;
        const CUSTOM3 = 1 << 11;
        const CUSTOM4 = 1 << 12;
        const CUSTOM5 = 1 << 13;
    }
}

impl Tile {
    /// An empty cell.
    pub const NONE: Tile = Tile::empty();

    /// Layers that prevent the pusher from standing on a cell.
    pub const PUSHER_BLOCKING: Tile = Tile::PUSH_BLOCK
        .union(Tile::BREAK_BLOCK)
        .union(Tile::STOP_BLOCK)
        .union(Tile::OUT_OF_BOUNDS)
        .union(Tile::PUSHER_VOID);

    /// Layers that prevent a push block from resting on a cell.
    pub const BLOCK_BLOCKING: Tile = Tile::PUSH_BLOCK
        .union(Tile::BREAK_BLOCK)
        .union(Tile::STOP_BLOCK)
        .union(Tile::OUT_OF_BOUNDS)
        .union(Tile::BLOCK_VOID);

    /// Layers that end a push path. Goals capture a sliding block.
    pub const PATH_BLOCKING: Tile = Tile::BLOCK_BLOCKING.union(Tile::GOAL);

    /// True if any of the given layers are present.
    #[inline]
    pub fn has_any(self, layers: Tile) -> bool {
        self.intersects(layers)
    }

    /// True if every one of the given layers is present.
    #[inline]
    pub fn has_all(self, layers: Tile) -> bool {
        self.contains(layers)
    }

    /// True for an empty cell. Differs from `has_any` checks: any layer at
    /// all, markers included, makes the cell non-empty.
    #[inline]
    pub fn is_none(self) -> bool {
        self == Tile::NONE
    }

    /// True if the pusher can stand on this cell.
    #[inline]
    pub fn pusher_can_occupy(self) -> bool {
        !self.has_any(Tile::PUSHER_BLOCKING)
    }

    /// True if a push block can rest on this cell.
    #[inline]
    pub fn push_block_can_occupy(self) -> bool {
        !self.has_any(Tile::BLOCK_BLOCKING)
    }

    /// True if the cell can stop a sliding push block: either it is empty and
    /// a stop block may be added, or it already holds a block.
    #[inline]
    pub fn can_be_stop(self) -> bool {
        self.is_none() || self.has_any(Tile::PUSH_BLOCK | Tile::STOP_BLOCK)
    }

    /// Text glyph for this tile, if the composite has one.
    ///
    /// Garbage obstacles render as the obstacle they carry.
    pub fn glyph(self) -> Option<char> {
        let garbage_stop = Tile::STOP_BLOCK | Tile::GARBAGE;
        let garbage_break = Tile::BREAK_BLOCK | Tile::GARBAGE;
        let glyph = match self {
            t if t == Tile::NONE => '.',
            t if t == Tile::STOP_BLOCK || t == garbage_stop => '#',
            t if t == Tile::BREAK_BLOCK || t == garbage_break => '%',
            t if t == Tile::PUSH_BLOCK => 'o',
            t if t == Tile::GOAL => '$',
            t if t == Tile::GOAL | Tile::PUSH_BLOCK => '*',
            t if t == Tile::VOID => '!',
            t if t == Tile::BLOCK_VOID => '+',
            t if t == Tile::PUSHER_VOID => '@',
            _ => return None,
        };
        Some(glyph)
    }

    /// Tile for a text glyph.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Tile::NONE),
            '#' => Some(Tile::STOP_BLOCK),
            '%' => Some(Tile::BREAK_BLOCK),
            'o' => Some(Tile::PUSH_BLOCK),
            '$' => Some(Tile::GOAL),
            '*' => Some(Tile::GOAL | Tile::PUSH_BLOCK),
            '!' => Some(Tile::VOID),
            '+' => Some(Tile::BLOCK_VOID),
            '@' => Some(Tile::PUSHER_VOID),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_is_both_voids() {
        assert!(Tile::VOID.has_all(Tile::BLOCK_VOID | Tile::PUSHER_VOID));
        assert_eq!(Tile::VOID, Tile::BLOCK_VOID | Tile::PUSHER_VOID);
    }

    #[test]
    fn test_exact_none_vs_subset() {
        let marked = Tile::MARKED;
        assert!(!marked.is_none());
        assert!(!marked.has_any(Tile::GOAL));
        assert!(Tile::NONE.is_none());
        assert!((Tile::GOAL | Tile::PUSH_BLOCK).has_any(Tile::GOAL));
    }

    #[test]
    fn test_occupancy_rules() {
        assert!(Tile::NONE.pusher_can_occupy());
        assert!(Tile::GOAL.pusher_can_occupy());
        assert!(Tile::BLOCK_VOID.pusher_can_occupy());
        assert!(!Tile::PUSHER_VOID.pusher_can_occupy());
        assert!(!Tile::OUT_OF_BOUNDS.pusher_can_occupy());

        assert!(Tile::PUSHER_VOID.push_block_can_occupy());
        assert!(!Tile::BLOCK_VOID.push_block_can_occupy());
        assert!(!Tile::BREAK_BLOCK.push_block_can_occupy());
    }

    #[test]
    fn test_can_be_stop() {
        assert!(Tile::NONE.can_be_stop());
        assert!(Tile::STOP_BLOCK.can_be_stop());
        assert!((Tile::GOAL | Tile::PUSH_BLOCK).can_be_stop());
        assert!(!Tile::BREAK_BLOCK.can_be_stop());
        assert!(!Tile::GOAL.can_be_stop());
        assert!(!Tile::OUT_OF_BOUNDS.can_be_stop());
    }

    #[test]
    fn test_glyphs() {
        for ch in ".#%o$*!+@".chars() {
            let tile = Tile::from_glyph(ch).unwrap();
            assert_eq!(tile.glyph(), Some(ch));
        }
        assert_eq!((Tile::STOP_BLOCK | Tile::GARBAGE).glyph(), Some('#'));
        assert_eq!((Tile::BREAK_BLOCK | Tile::GARBAGE).glyph(), Some('%'));
        assert_eq!(Tile::MARKED.glyph(), None);
        assert_eq!(Tile::from_glyph('x'), None);
    }
}
