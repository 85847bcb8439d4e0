//! Puzzle generators
//!
//! Three independent stages sharing one random stream:
//! - `goal`: stamp a goal rectangle onto a blank area
//! - `moves`: walk push blocks backward off the goal (the core search)
//! - `garbage`: fill untouched cells with decoy obstacles

pub mod garbage;
pub mod goal;
pub mod moves;

pub use garbage::GarbageGenerator;
pub use goal::GoalGenerator;
pub use moves::MoveGenerator;

use crate::board::Board;
use crate::error::Result;
use crate::events::EventSink;
use crate::puzzle::PuzzleLayout;
use crate::rng::RandomSeed;
use crate::settings::GeneratorSettings;

/// Run goal, move and garbage generation in order over `area`.
///
/// Returns `Ok(None)` if move generation exhausts its attempts.
pub fn generate_puzzle(
    area: &Board,
    settings: &GeneratorSettings,
    rng: &mut RandomSeed,
    sink: &mut dyn EventSink,
) -> Result<Option<PuzzleLayout>> {
    let area = settings.goal_generator().generate_goal_with(area, rng, sink)?;

    let Some(mut layout) = settings.move_generator().generate_layout_with(&area, rng, sink)? else {
        return Ok(None);
    };

    settings
        .garbage_generator()
        .generate_garbage_with(&mut layout, rng, sink);
    Ok(Some(layout))
}
