//! Random goal placement

use glam::IVec2;

use crate::board::Board;
use crate::error::{GenError, Result};
use crate::events::{EventSink, GenerationEvent, LogSink};
use crate::rng::RandomSeed;
use crate::tile::Tile;

/// Stamps one rectangular goal onto empty cells of an area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalGenerator {
    goal_size: IVec2,
}

impl Default for GoalGenerator {
    fn default() -> Self {
        Self { goal_size: IVec2::ONE }
    }
}

impl GoalGenerator {
    /// `goal_size` is (rows, columns); each component is clamped to at least 1.
    pub fn new(goal_size: IVec2) -> Self {
        Self {
            goal_size: goal_size.max(IVec2::ONE),
        }
    }

    pub fn goal_size(&self) -> IVec2 {
        self.goal_size
    }

    /// Copy of `area` with a goal stamped at a random position.
    pub fn generate_goal(&self, area: &Board, rng: &mut RandomSeed) -> Result<Board> {
        self.generate_goal_with(area, rng, &mut LogSink)
    }

    pub fn generate_goal_with(
        &self,
        area: &Board,
        rng: &mut RandomSeed,
        sink: &mut dyn EventSink,
    ) -> Result<Board> {
        let positions = self.candidate_positions(area);
        if positions.is_empty() {
            return Err(GenError::NoGoalPlacement {
                rows: self.goal_size.x,
                columns: self.goal_size.y,
            });
        }

        let position = positions[rng.index(positions.len())];
        let mut result = area.clone();
        self.stamp(&mut result, position);
        sink.event(&GenerationEvent::GoalPlaced { position });
        Ok(result)
    }

    /// Top-left anchors where the whole rectangle lies on empty cells.
    fn candidate_positions(&self, area: &Board) -> Vec<IVec2> {
        area.positions().filter(|&p| self.fits(area, p)).collect()
    }

    fn fits(&self, area: &Board, corner: IVec2) -> bool {
        self.cells(corner).all(|p| area.get(p).is_none())
    }

    fn stamp(&self, area: &mut Board, corner: IVec2) {
        for p in self.cells(corner) {
            area.set(p, Tile::GOAL);
        }
    }

    fn cells(&self, corner: IVec2) -> impl Iterator<Item = IVec2> {
        let size = self.goal_size;
        (0..size.x).flat_map(move |i| (0..size.y).map(move |j| corner + IVec2::new(i, j)))
    }
}
