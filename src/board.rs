//! Puzzle board grid and stateless board utilities
//!
//! Positions are `IVec2` with `x` as the row and `y` as the column.
//! Reads outside the stored rectangle return `Tile::OUT_OF_BOUNDS`; that
//! flag is never written into the grid.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::tile::Tile;

/// The four cardinal directions.
pub const DIRECTIONS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(0, -1),
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
];

/// Spaces between boards in a tiled report
const TILE_SPACING: usize = 3;

/// Fixed-size row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    rows: usize,
    columns: usize,
    tiles: Vec<Tile>,
}

/// Unchecked serialized form of `Board`
#[derive(Deserialize)]
struct RawBoard {
    rows: usize,
    columns: usize,
    tiles: Vec<Tile>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GenError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        Board::from_tiles(raw.rows, raw.columns, raw.tiles)
    }
}

/// Result of a raycast: the blocking tile and where it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    pub tile: Tile,
    pub position: IVec2,
}

impl Board {
    /// Create an empty board.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            tiles: vec![Tile::NONE; rows * columns],
        }
    }

    /// Build a board from row-major tiles. The tile count must match the
    /// dimensions and no tile may carry `OUT_OF_BOUNDS`.
    pub fn from_tiles(rows: usize, columns: usize, tiles: Vec<Tile>) -> Result<Self> {
        if rows.checked_mul(columns) != Some(tiles.len()) {
            return Err(GenError::TileCountMismatch {
                rows,
                columns,
                found: tiles.len(),
            });
        }
        if let Some(i) = tiles.iter().position(|t| t.has_any(Tile::OUT_OF_BOUNDS)) {
            return Err(GenError::StoredOutOfBounds {
                row: i / columns,
                column: i % columns,
            });
        }
        Ok(Self {
            rows,
            columns,
            tiles,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Row-major tile storage
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    fn index(&self, position: IVec2) -> Option<usize> {
        let (row, column) = (position.x, position.y);
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(row * self.columns + column)
    }

    /// True if the position lies inside the grid.
    pub fn contains(&self, position: IVec2) -> bool {
        self.index(position).is_some()
    }

    /// Tile at the position, or `OUT_OF_BOUNDS` outside the grid.
    #[inline]
    pub fn get(&self, position: IVec2) -> Tile {
        self.index(position)
            .map(|i| self.tiles[i])
            .unwrap_or(Tile::OUT_OF_BOUNDS)
    }

    /// Mutable tile at the position, `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, position: IVec2) -> Option<&mut Tile> {
        self.index(position).map(|i| &mut self.tiles[i])
    }

    /// Overwrite the tile at the position. Out-of-range writes are ignored.
    pub fn set(&mut self, position: IVec2, tile: Tile) {
        if let Some(t) = self.get_mut(position) {
            *t = tile;
        }
    }

    /// Add layers to the tile at the position.
    pub fn insert(&mut self, position: IVec2, layers: Tile) {
        if let Some(t) = self.get_mut(position) {
            t.insert(layers);
        }
    }

    /// Remove layers from the tile at the position.
    pub fn remove(&mut self, position: IVec2, layers: Tile) {
        if let Some(t) = self.get_mut(position) {
            t.remove(layers);
        }
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| IVec2::new(row as i32, column as i32))
        })
    }

    /// Positions whose tile satisfies the predicate, in row-major order.
    pub fn find_positions(&self, predicate: impl Fn(Tile) -> bool) -> Vec<IVec2> {
        self.positions()
            .filter(|&p| predicate(self.get(p)))
            .collect()
    }

    /// Number of tiles satisfying the predicate.
    pub fn count(&self, predicate: impl Fn(Tile) -> bool) -> usize {
        self.tiles.iter().filter(|&&t| predicate(t)).count()
    }

    /// Step from `position` (exclusive) along `direction` until a tile
    /// sharing any layer with `blocking | OUT_OF_BOUNDS` is reached.
    /// Steps saturate at the `i32` range, which always lies outside the grid.
    pub fn raycast(&self, position: IVec2, direction: IVec2, blocking: Tile) -> Result<RaycastHit> {
        if direction == IVec2::ZERO {
            return Err(GenError::ZeroDirection);
        }

        let blocking = blocking | Tile::OUT_OF_BOUNDS;
        let mut position = position;
        loop {
            position = position.saturating_add(direction);
            let tile = self.get(position);
            if tile.has_any(blocking) {
                return Ok(RaycastHit { tile, position });
            }
        }
    }

    /// Render as text: one glyph and a space per tile, one line per row.
    pub fn to_text(&self) -> Result<String> {
        let mut out = String::with_capacity(2 * self.tiles.len() + self.rows);
        self.write_text(&mut out)?;
        Ok(out)
    }

    fn write_text(&self, out: &mut String) -> Result<()> {
        for row in 0..self.rows {
            self.write_row(row, out)?;
            out.push('\n');
        }
        Ok(())
    }

    fn write_row(&self, row: usize, out: &mut String) -> Result<()> {
        for &tile in &self.tiles[row * self.columns..(row + 1) * self.columns] {
            let ch = tile.glyph().ok_or(GenError::UnrenderableTile(tile))?;
            out.push(ch);
            out.push(' ');
        }
        Ok(())
    }

    /// Parse a board from text lines. Spaces are ignored; empty lines are
    /// skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let rows: Vec<Vec<char>> = lines
            .iter()
            .map(|l| l.as_ref().chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();

        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut board = Board::new(rows.len(), columns);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(GenError::RaggedBoard {
                    row: i,
                    expected: columns,
                    found: row.len(),
                });
            }
            for (j, &ch) in row.iter().enumerate() {
                let tile = Tile::from_glyph(ch).ok_or(GenError::UnknownGlyph {
                    ch,
                    row: i,
                    column: j,
                })?;
                board.tiles[i * columns + j] = tile;
            }
        }

        Ok(board)
    }

    /// Parse a board from newline-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        Self::from_lines(&lines)
    }
}

/// Lay out several boards side by side, `columns` boards per band, headed
/// "Start board:" for the first and "Move k:" for the rest. Every board must
/// have the dimensions of the first.
pub fn tiled_string(boards: &[Board], columns: usize) -> Result<String> {
    let Some(first) = boards.first() else {
        return Ok(String::new());
    };

    if let Some((index, board)) = boards
        .iter()
        .enumerate()
        .find(|(_, b)| b.rows != first.rows || b.columns != first.columns)
    {
        return Err(GenError::MismatchedBoards {
            index,
            rows: first.rows,
            columns: first.columns,
            found_rows: board.rows,
            found_columns: board.columns,
        });
    }

    let columns = columns.max(1);
    let width = 2 * first.columns() + TILE_SPACING;
    let bands = boards.len().div_ceil(columns);
    let mut out = String::new();

    for band in 0..bands {
        let start = band * columns;
        let end = (start + columns).min(boards.len());

        for k in start..end {
            let header = if k == 0 {
                "Start board:".to_string()
            } else {
                format!("Move {k}:")
            };
            out.push_str(&header);
            if k - start < columns - 1 {
                let pad = width.saturating_sub(header.len());
                out.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push('\n');

        for row in 0..first.rows() {
            for k in start..end {
                boards[k].write_row(row, &mut out)?;
                if k - start < columns - 1 {
                    out.extend(std::iter::repeat_n(' ', TILE_SPACING));
                }
            }
            out.push('\n');
        }

        if band < bands - 1 {
            out.push('\n');
        }
    }

    Ok(out)
}
