//! Static maze templates.

use maze_chase_core::{Tile, TileView};
use thiserror::Error;

const CLASSIC_COLUMNS: usize = 27;
const CLASSIC_ROWS: usize = 18;

// 0 = air, 1 = block, 2 = dot
const CLASSIC: [[u8; CLASSIC_COLUMNS]; CLASSIC_ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 1, 2, 1, 2, 1, 2, 1, 1, 2, 1, 2, 1, 1, 2, 1, 2, 1, 2, 1, 1, 1, 2, 1],
    [1, 2, 1, 2, 2, 2, 1, 2, 2, 2, 1, 0, 2, 2, 2, 0, 1, 2, 2, 2, 1, 2, 2, 2, 1, 2, 1],
    [1, 2, 1, 2, 1, 2, 1, 2, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 2, 1, 2, 1, 2, 1, 2, 1],
    [1, 2, 2, 2, 1, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 1, 2, 2, 2, 1],
    [1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 2, 1, 2, 1, 2, 1, 1, 0, 1, 0, 0, 0, 1, 0, 1, 1, 2, 1, 2, 1, 2, 1, 2, 1],
    [1, 2, 1, 2, 1, 2, 1, 2, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 2, 1, 2, 1, 2, 1, 2, 1],
    [1, 2, 1, 2, 1, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 1, 2, 1, 2, 1],
    [1, 2, 1, 2, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 2, 1, 2, 1],
    [1, 2, 2, 2, 1, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 1, 2, 2, 2, 1],
    [1, 2, 1, 2, 1, 2, 1, 2, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 2, 1, 2, 1, 2, 1, 2, 1],
    [1, 2, 1, 2, 2, 2, 1, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 1, 2, 2, 2, 1, 2, 1],
    [1, 2, 1, 1, 1, 2, 1, 2, 1, 2, 1, 2, 1, 1, 1, 2, 1, 2, 1, 2, 1, 2, 1, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Rectangular tile template the maze is rebuilt from on every reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl Layout {
    /// The built-in 27×18 board.
    #[must_use]
    pub fn classic() -> Self {
        let tiles = CLASSIC
            .iter()
            .flat_map(|row| row.iter())
            .map(|code| match code {
                1 => Tile::Block,
                2 => Tile::Dot,
                _ => Tile::Air,
            })
            .collect();
        Self {
            columns: CLASSIC_COLUMNS as u32,
            rows: CLASSIC_ROWS as u32,
            tiles,
        }
    }

    /// Parses a text template.
    ///
    /// `#` is a block, `.` a dot, and a space or `_` is air. Blank lines are
    /// ignored; every remaining line must have the same width.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(LayoutError::Empty);
        };
        let expected = first.chars().count();

        let mut tiles = Vec::with_capacity(expected * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(LayoutError::Ragged {
                    row,
                    expected,
                    found,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                tiles.push(match glyph {
                    '#' => Tile::Block,
                    '.' => Tile::Dot,
                    ' ' | '_' => Tile::Air,
                    _ => return Err(LayoutError::UnknownGlyph { glyph, column, row }),
                });
            }
        }

        Ok(Self {
            columns: u32::try_from(expected).map_err(|_| LayoutError::TooLarge)?,
            rows: u32::try_from(lines.len()).map_err(|_| LayoutError::TooLarge)?,
            tiles,
        })
    }

    /// Number of columns in the template.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the template.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Read-only view over the template tiles.
    #[must_use]
    pub fn view(&self) -> TileView<'_> {
        TileView::new(&self.tiles, self.columns, self.rows)
    }
}

/// Reasons a text template can be rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The template contained no rows.
    #[error("layout contains no rows")]
    Empty,
    /// A row differs in width from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A glyph outside the template alphabet was found.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based column index.
        column: usize,
        /// Zero-based row index.
        row: usize,
    },
    /// The template does not fit the grid coordinate range.
    #[error("layout dimensions exceed the supported grid size")]
    TooLarge,
}
