//! Generator settings and presets
//!
//! Every tunable of the three generation stages, loadable from JSON.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_ITERATIONS;
use crate::error::Result;
use crate::generators::{GarbageGenerator, GoalGenerator, MoveGenerator};

/// Typical generation workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// One block, eight pushes; suits a 9x9 area
    #[default]
    Small,
    /// One block, ten pushes
    Simple,
    /// Three blocks, fifty pushes onto a 2x2 goal
    BigGoal,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Small => "Small",
            Preset::Simple => "Simple",
            Preset::BigGoal => "BigGoal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(Preset::Small),
            "simple" => Some(Preset::Simple),
            "biggoal" | "big-goal" | "big" => Some(Preset::BigGoal),
            _ => None,
        }
    }
}

/// Settings for goal, move and garbage generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    // === Goal ===
    /// Goal rectangle as (rows, columns)
    pub goal_size: (i32, i32),

    // === Moves ===
    pub push_block_count: usize,
    /// Total moves across all push blocks
    pub target_push_count: usize,
    /// Forbid a block from being pushed straight back the way it came
    pub prevent_reversals: bool,
    /// Attempts before giving up
    pub max_iterations: usize,

    // === Garbage ===
    /// Fraction of open cells filled with garbage (0.0 - 1.0)
    pub garbage_density: f32,
    /// Chance a garbage block is a break block (0.0 - 1.0)
    pub break_block_chance: f32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            goal_size: (1, 1),

            push_block_count: 1,
            target_push_count: 8,
            prevent_reversals: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,

            garbage_density: 0.1,
            break_block_chance: 0.5,
        }
    }
}

impl GeneratorSettings {
    /// Settings for a preset workload
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Overwrite the goal and move counts with the preset's
    pub fn apply_preset(&mut self, preset: Preset) {
        let (goal_size, push_block_count, target_push_count) = match preset {
            Preset::Small => ((1, 1), 1, 8),
            Preset::Simple => ((1, 1), 1, 10),
            Preset::BigGoal => ((2, 2), 3, 50),
        };
        self.goal_size = goal_size;
        self.push_block_count = push_block_count;
        self.target_push_count = target_push_count;
    }

    pub fn goal_generator(&self) -> GoalGenerator {
        GoalGenerator::new(IVec2::new(self.goal_size.0, self.goal_size.1))
    }

    pub fn move_generator(&self) -> MoveGenerator {
        MoveGenerator::new(self.push_block_count, self.target_push_count)
            .allow_reversals(!self.prevent_reversals)
            .with_max_iterations(self.max_iterations)
    }

    pub fn garbage_generator(&self) -> GarbageGenerator {
        GarbageGenerator::new(self.garbage_density, self.break_block_chance)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults if the file
    /// is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
