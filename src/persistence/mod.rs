//! Layout save/load
//!
//! Layouts are stored as a versioned JSON envelope:
//! `{ "version": 1, "layout": { seed, push_block_positions, tiles, moves } }`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::puzzle::PuzzleLayout;

/// Current envelope version
pub const LAYOUT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope<L> {
    version: u32,
    layout: L,
}

pub fn to_json(layout: &PuzzleLayout) -> Result<String> {
    let envelope = Envelope {
        version: LAYOUT_VERSION,
        layout,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn from_json(json: &str) -> Result<PuzzleLayout> {
    let envelope: Envelope<PuzzleLayout> = serde_json::from_str(json)?;
    if envelope.version != LAYOUT_VERSION {
        return Err(GenError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.layout)
}

pub fn save(layout: &PuzzleLayout, path: &Path) -> Result<()> {
    std::fs::write(path, to_json(layout)?)?;
    log::info!("Layout saved to {}", path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<PuzzleLayout> {
    let json = std::fs::read_to_string(path)?;
    let layout = from_json(&json)?;
    log::info!("Loaded layout (seed {}) from {}", layout.seed, path.display());
    Ok(layout)
}
