//! Reverse move generation
//!
//! Push blocks start on goal cells and are pulled outward one legal reverse
//! move at a time. Every reverse move restores the obstacle the block will
//! hit in forward play, so the recorded moves, reversed, solve the board.
//!
//! An attempt fails as soon as a required block has no legal move; the
//! generator then restarts from an untouched copy of the input area, up to
//! `max_iterations` times.

use glam::IVec2;

use crate::board::{Board, DIRECTIONS};
use crate::consts::DEFAULT_MAX_ITERATIONS;
use crate::error::{GenError, Result};
use crate::events::{EventSink, GenerationEvent, LogSink};
use crate::puzzle::{PuzzleLayout, PuzzleMove};
use crate::rng::RandomSeed;
use crate::tile::Tile;

/// Generates push-block moves backward from goal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGenerator {
    push_block_count: usize,
    target_push_count: usize,
    /// Reject moves antiparallel to the block's previous move
    pub prevent_reversals: bool,
    pub max_iterations: usize,
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl MoveGenerator {
    /// Counts are clamped to at least 1. Reversal prevention is on and the
    /// iteration budget is `DEFAULT_MAX_ITERATIONS`.
    pub fn new(push_block_count: usize, target_push_count: usize) -> Self {
        Self {
            push_block_count: push_block_count.max(1),
            target_push_count: target_push_count.max(1),
            prevent_reversals: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn allow_reversals(mut self, allow: bool) -> Self {
        self.prevent_reversals = !allow;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn push_block_count(&self) -> usize {
        self.push_block_count
    }

    pub fn target_push_count(&self) -> usize {
        self.target_push_count
    }

    /// Generate a layout over `area`, which must contain at least one goal
    /// cell with an empty neighbor.
    ///
    /// Returns `Ok(None)` when every attempt runs out of legal moves.
    pub fn generate_layout(&self, area: &Board, rng: &mut RandomSeed) -> Result<Option<PuzzleLayout>> {
        self.generate_layout_with(area, rng, &mut LogSink)
    }

    pub fn generate_layout_with(
        &self,
        area: &Board,
        rng: &mut RandomSeed,
        sink: &mut dyn EventSink,
    ) -> Result<Option<PuzzleLayout>> {
        let seeds = seed_positions(area);
        if seeds.is_empty() {
            return Err(GenError::NoSeedPosition);
        }

        sink.event(&GenerationEvent::MovesStarted {
            target_moves: self.target_push_count,
        });

        let mut search = Search::new(self, rng);

        for attempt in 1..=self.max_iterations {
            if sink.is_cancelled() {
                sink.event(&GenerationEvent::MovesCancelled { attempts: attempt - 1 });
                return Ok(None);
            }

            let mut layout = PuzzleLayout::new(area, search.rng.seed());
            search.place_push_blocks(&mut layout, &seeds);

            if search.add_moves(&mut layout)? {
                layout.moves.reverse();
                sink.event(&GenerationEvent::MovesSucceeded {
                    attempts: attempt,
                    moves: layout.moves.len(),
                });
                return Ok(Some(layout));
            }

            sink.event(&GenerationEvent::AttemptFailed { attempt });
        }

        sink.event(&GenerationEvent::MovesExhausted {
            attempts: self.max_iterations,
        });
        Ok(None)
    }
}

/// Goal cells with at least one empty cardinal neighbor.
fn seed_positions(area: &Board) -> Vec<IVec2> {
    area.find_positions(|t| t.has_any(Tile::GOAL))
        .into_iter()
        .filter(|&p| DIRECTIONS.iter().any(|&d| area.get(p + d).is_none()))
        .collect()
}

/// Search state shared by every attempt of one generation call. The
/// direction and block orders are shuffled in place and carry over between
/// draws.
struct Search<'a> {
    config: &'a MoveGenerator,
    rng: &'a mut RandomSeed,
    directions: [IVec2; 4],
    push_blocks: Vec<usize>,
}

impl<'a> Search<'a> {
    fn new(config: &'a MoveGenerator, rng: &'a mut RandomSeed) -> Self {
        Self {
            config,
            rng,
            directions: DIRECTIONS,
            push_blocks: (0..config.push_block_count).collect(),
        }
    }

    /// Drop each push block on a random seed position. Two blocks may draw
    /// the same cell; nothing guards `push_block_count` exceeding the number
    /// of distinct seed positions.
    fn place_push_blocks(&mut self, layout: &mut PuzzleLayout, seeds: &[IVec2]) {
        for _ in 0..self.config.push_block_count {
            let position = seeds[self.rng.index(seeds.len())];
            layout.tiles.insert(position, Tile::PUSH_BLOCK);
            layout.push_block_positions.push(position);
        }
    }

    /// One move per block, then moves for random blocks until the target
    /// count is met. Returns false if the attempt got stuck.
    fn add_moves(&mut self, layout: &mut PuzzleLayout) -> Result<bool> {
        for push_block in self.shuffled_push_blocks() {
            if !self.add_move(layout, push_block)? {
                return Ok(false);
            }
        }

        for _ in self.config.push_block_count..self.config.target_push_count {
            if !self.add_any_move(layout)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Add a move for the first block, in random order, that has one.
    fn add_any_move(&mut self, layout: &mut PuzzleLayout) -> Result<bool> {
        for push_block in self.shuffled_push_blocks() {
            if self.add_move(layout, push_block)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn shuffled_push_blocks(&mut self) -> Vec<usize> {
        self.rng.shuffle(&mut self.push_blocks);
        self.push_blocks.clone()
    }

    fn shuffled_directions(&mut self) -> [IVec2; 4] {
        self.rng.shuffle(&mut self.directions);
        self.directions
    }

    /// Pull the block back along a random direction to a random legal
    /// position and record the move.
    fn add_move(&mut self, layout: &mut PuzzleLayout, push_block: usize) -> Result<bool> {
        for offset in self.shuffled_directions() {
            let candidates = self.from_positions(layout, push_block, offset)?;
            let Some(&from_position) = candidates.first() else {
                continue;
            };

            let stop = stop_tile(layout, push_block, offset);
            let to_position = layout.push_block_positions[push_block];
            let m = PuzzleMove::new(push_block, stop, from_position, to_position);
            m.inverse_apply(&mut layout.tiles);
            layout.push_block_positions[push_block] = from_position;
            layout.moves.push(m);
            return Ok(true);
        }

        Ok(false)
    }

    /// Shuffled list of positions the block could have been pushed from,
    /// looking back along `offset` from where it rests now.
    fn from_positions(&mut self, layout: &PuzzleLayout, push_block: usize, offset: IVec2) -> Result<Vec<IVec2>> {
        let board = &layout.tiles;
        let to_position = layout.push_block_positions[push_block];
        let on_goal = board.get(to_position).has_any(Tile::GOAL);
        let mut result = Vec::new();

        // Off a goal the block must have been stopped by something.
        if !on_goal && !board.get(to_position - offset).can_be_stop() {
            return Ok(result);
        }

        if self.config.prevent_reversals && is_opposite_last_move(layout, push_block, offset) {
            return Ok(result);
        }

        let hit = board.raycast(to_position, offset, Tile::PATH_BLOCKING)?;
        let mut from_position = to_position + offset;

        while from_position != hit.position {
            if board.get(from_position + offset).pusher_can_occupy()
                && side_cells_permit_push_block(board, from_position, offset)
                && (on_goal || !goal_in_sight(board, from_position)?)
            {
                result.push(from_position);
            }
            from_position += offset;
        }

        self.rng.shuffle(&mut result);
        Ok(result)
    }
}

/// True if `offset` points the same way as the block's last recorded move,
/// i.e. the new forward move would travel straight back.
fn is_opposite_last_move(layout: &PuzzleLayout, push_block: usize, offset: IVec2) -> bool {
    layout
        .last_move(push_block)
        .is_some_and(|m| m.direction() == offset)
}

/// One side cell must admit a push block while the other can stop it, so
/// the block can later be moved off the push axis.
fn side_cells_permit_push_block(board: &Board, position: IVec2, offset: IVec2) -> bool {
    let side1 = board.get(position + IVec2::new(offset.y, offset.x));
    let side2 = board.get(position + IVec2::new(-offset.y, -offset.x));

    (side1.push_block_can_occupy() && side2.can_be_stop())
        || (side2.push_block_can_occupy() && side1.can_be_stop())
}

/// True if an unobstructed goal lies in line with the position.
fn goal_in_sight(board: &Board, position: IVec2) -> Result<bool> {
    for direction in DIRECTIONS {
        let hit = board.raycast(position, direction, Tile::PATH_BLOCKING)?;
        if hit.tile.has_any(Tile::GOAL) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Obstacle that stops the block where it rests now when pushed opposite
/// to `offset`.
fn stop_tile(layout: &PuzzleLayout, push_block: usize, offset: IVec2) -> Tile {
    let board = &layout.tiles;
    let position = layout.push_block_positions[push_block];

    if board.get(position).has_any(Tile::GOAL) {
        return Tile::GOAL;
    }

    let block_position = position - offset;
    let block_tile = board.get(block_position);

    if block_tile.has_any(Tile::PUSH_BLOCK) {
        Tile::PUSH_BLOCK
    } else if block_tile.has_any(Tile::STOP_BLOCK) {
        Tile::STOP_BLOCK
    } else if is_opposite_last_move(layout, push_block, offset) || layout.intersects(block_position) {
        // Forward play has to get through this cell again later
        Tile::BREAK_BLOCK
    } else {
        Tile::STOP_BLOCK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;

    fn centered_area(size: usize) -> Board {
        let mut area = Board::new(size, size);
        let c = (size / 2) as i32;
        area.set(IVec2::new(c, c), Tile::GOAL);
        area
    }

    #[test]
    fn test_generate_small_layout() {
        for seed in [12345, 56789, 31415, 61415, 71415, 81415] {
            let area = centered_area(9);
            let mut rng = RandomSeed::new(seed);
            let layout = MoveGenerator::new(1, 8)
                .generate_layout(&area, &mut rng)
                .unwrap()
                .expect("layout should be generated");

            assert_eq!(layout.seed, seed);
            assert_eq!(layout.moves.len(), 8);
            assert_eq!(layout.push_block_positions.len(), 1);

            let solved = layout.solved_board();
            assert_eq!(solved.get(IVec2::new(4, 4)), Tile::GOAL | Tile::PUSH_BLOCK);
            assert_eq!(solved.count(|t| t.has_any(Tile::PUSH_BLOCK)), 1);
        }
    }

    #[test]
    fn test_generate_simple_layout_with_reversals() {
        for seed in [12345, 56789, 31415] {
            let area = centered_area(21);
            let mut rng = RandomSeed::new(seed);
            let layout = MoveGenerator::new(1, 10)
                .allow_reversals(true)
                .generate_layout(&area, &mut rng)
                .unwrap();
            assert_eq!(layout.map(|l| l.moves.len()), Some(10));
        }
    }

    #[test]
    fn test_first_forward_position_matches_start() {
        let area = centered_area(21);
        let layout = MoveGenerator::new(1, 10)
            .generate_layout(&area, &mut RandomSeed::new(56789))
            .unwrap()
            .unwrap();
        assert_eq!(layout.moves[0].from_position, layout.push_block_positions[0]);
        assert_eq!(layout.moves.last().unwrap().to_position, IVec2::new(10, 10));
        assert_eq!(layout.moves.last().unwrap().stop_tile, Tile::GOAL);
        assert!(layout.tiles.get(layout.push_block_positions[0]).has_any(Tile::PUSH_BLOCK));
    }

    #[test]
    fn test_determinism() {
        let area = centered_area(21);
        let generator = MoveGenerator::new(2, 20);
        let a = generator.generate_layout(&area, &mut RandomSeed::new(777)).unwrap();
        let b = generator.generate_layout(&area, &mut RandomSeed::new(777)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_seed_position_is_error() {
        let area = Board::new(5, 5);
        let result = MoveGenerator::new(1, 4).generate_layout(&area, &mut RandomSeed::new(1));
        assert!(matches!(result, Err(GenError::NoSeedPosition)));

        // A goal walled in on every side cannot seed a block either
        let walled = Board::from_lines(&[".#.", "#$#", ".#."]).unwrap();
        let result = MoveGenerator::new(1, 4).generate_layout(&walled, &mut RandomSeed::new(1));
        assert!(matches!(result, Err(GenError::NoSeedPosition)));
    }

    #[test]
    fn test_exhaustion_returns_none() {
        // A 1x3 corridor leaves no room for side cells, so no move is legal.
        let area = Board::from_lines(&[".$."]).unwrap();
        let mut sink = RecordingSink::default();
        let result = MoveGenerator::new(1, 2)
            .with_max_iterations(5)
            .generate_layout_with(&area, &mut RandomSeed::new(3), &mut sink)
            .unwrap();
        assert!(result.is_none());

        let failures = sink
            .events
            .iter()
            .filter(|e| matches!(e, GenerationEvent::AttemptFailed { .. }))
            .count();
        assert_eq!(failures, 5);
        assert_eq!(
            sink.events.last(),
            Some(&GenerationEvent::MovesExhausted { attempts: 5 })
        );
    }

    #[test]
    fn test_cancellation_checked_per_attempt() {
        let area = Board::from_lines(&[".$."]).unwrap();
        let mut sink = RecordingSink {
            cancel_after_failures: Some(2),
            ..Default::default()
        };
        let result = MoveGenerator::new(1, 2)
            .generate_layout_with(&area, &mut RandomSeed::new(3), &mut sink)
            .unwrap();
        assert!(result.is_none());
        assert_eq!(
            sink.events.last(),
            Some(&GenerationEvent::MovesCancelled { attempts: 2 })
        );
    }

    #[test]
    fn test_blocks_may_share_a_seed_cell() {
        // One goal cell: both blocks are seeded on it
        let area = centered_area(11);
        let goal = IVec2::new(5, 5);
        let layout = MoveGenerator::new(2, 4)
            .generate_layout(&area, &mut RandomSeed::new(12345))
            .unwrap()
            .expect("layout should be generated");

        for block in 0..2 {
            assert_eq!(layout.last_move(block).map(|m| m.to_position), Some(goal));
        }

        // Forward play: whichever block arrives second finds the goal taken
        let mut board = layout.tiles.clone();
        let mut collisions = 0;
        for m in &layout.moves {
            if m.to_position == goal && board.get(goal).has_any(Tile::PUSH_BLOCK) {
                collisions += 1;
            }
            m.apply(&mut board);
        }
        assert_eq!(collisions, 1);
        assert_eq!(layout.solved_board().count(|t| t.has_any(Tile::PUSH_BLOCK)), 1);
    }

    #[test]
    fn test_stop_tile_classification() {
        let board = Board::from_lines(&[
            ".....",
            ".....",
            "..o..",
            ".....",
            ".....",
        ])
        .unwrap();
        let mut layout = PuzzleLayout::new(&board, 0);
        layout.push_block_positions.push(IVec2::new(2, 2));

        // Nothing behind and no history: a plain stop block
        assert_eq!(stop_tile(&layout, 0, IVec2::new(0, 1)), Tile::STOP_BLOCK);

        // Behind cell on an earlier push path must stay breakable
        layout
            .moves
            .push(PuzzleMove::new(0, Tile::GOAL, IVec2::new(1, 0), IVec2::new(1, 4)));
        assert_eq!(stop_tile(&layout, 0, IVec2::new(1, 0)), Tile::BREAK_BLOCK);

        // Reusing an existing obstacle
        layout.tiles.set(IVec2::new(2, 1), Tile::STOP_BLOCK);
        assert_eq!(stop_tile(&layout, 0, IVec2::new(0, 1)), Tile::STOP_BLOCK);
        layout.tiles.set(IVec2::new(3, 2), Tile::PUSH_BLOCK);
        assert_eq!(stop_tile(&layout, 0, IVec2::new(-1, 0)), Tile::PUSH_BLOCK);

        // Resting on a goal
        layout.tiles.insert(IVec2::new(2, 2), Tile::GOAL);
        assert_eq!(stop_tile(&layout, 0, IVec2::new(0, 1)), Tile::GOAL);
    }

    #[test]
    fn test_reversal_detection() {
        let board = Board::new(5, 5);
        let mut layout = PuzzleLayout::new(&board, 0);
        layout.push_block_positions.push(IVec2::new(2, 2));
        assert!(!is_opposite_last_move(&layout, 0, IVec2::new(0, 1)));

        // Last recorded move travelled right
        layout
            .moves
            .push(PuzzleMove::new(0, Tile::STOP_BLOCK, IVec2::new(2, 2), IVec2::new(2, 4)));
        assert!(is_opposite_last_move(&layout, 0, IVec2::new(0, 1)));
        assert!(!is_opposite_last_move(&layout, 0, IVec2::new(0, -1)));
        assert!(!is_opposite_last_move(&layout, 1, IVec2::new(0, 1)));
    }

    #[test]
    fn test_goal_in_sight() {
        let board = Board::from_lines(&[
            "$....",
            ".....",
            "..#..",
            ".....",
            "..$..",
        ])
        .unwrap();
        assert!(goal_in_sight(&board, IVec2::new(0, 3)).unwrap());
        assert!(goal_in_sight(&board, IVec2::new(3, 0)).unwrap());
        // Blocked by the stop block
        assert!(!goal_in_sight(&board, IVec2::new(1, 2)).unwrap());
        assert!(!goal_in_sight(&board, IVec2::new(1, 1)).unwrap());
    }

    #[test]
    fn test_side_cells() {
        let open = Board::new(3, 3);
        assert!(side_cells_permit_push_block(&open, IVec2::new(1, 1), IVec2::new(0, 1)));

        // Both sides walled by break blocks: neither can take the block
        let walled = Board::from_lines(&[".%.", "...", ".%."]).unwrap();
        assert!(!side_cells_permit_push_block(&walled, IVec2::new(1, 1), IVec2::new(0, 1)));

        // Stop block on one side, open on the other
        let stop = Board::from_lines(&[".#.", "...", "..."]).unwrap();
        assert!(side_cells_permit_push_block(&stop, IVec2::new(1, 1), IVec2::new(0, 1)));

        // Edge of the board on one side is not a usable stop
        let edge = Board::new(1, 3);
        assert!(!side_cells_permit_push_block(&edge, IVec2::new(0, 1), IVec2::new(0, 1)));
    }
}
