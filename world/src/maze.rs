//! Mutable tile grid backed by an immutable template.

use maze_chase_core::{CellCoord, GridQuery, Tile, TileView};

use crate::layout::Layout;

/// Authoritative tile grid the creatures move through.
///
/// Dots are eaten by mutating the live tiles; [`Maze::reset`] copies the
/// template back over them.
#[derive(Clone, Debug)]
pub struct Maze {
    template: Layout,
    tiles: Vec<Tile>,
}

impl Maze {
    /// Creates a maze whose live tiles start as a copy of `template`.
    #[must_use]
    pub fn new(template: Layout) -> Self {
        let tiles = template.tiles().to_vec();
        Self { template, tiles }
    }

    /// Restores every tile from the template, returning eaten dots.
    pub fn reset(&mut self) {
        self.tiles.clear();
        self.tiles.extend_from_slice(self.template.tiles());
    }

    /// Tile stored at `cell`, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.view().tile(cell)
    }

    /// Replaces the tile at `cell`. Cells outside the grid are ignored.
    pub fn set_tile(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(slot) = self.index(cell).and_then(|index| self.tiles.get_mut(index)) {
            *slot = tile;
        }
    }

    /// Number of dots that have not been eaten yet.
    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.view().dot_count()
    }

    /// Read-only view over the live tiles.
    #[must_use]
    pub fn view(&self) -> TileView<'_> {
        TileView::new(&self.tiles, self.template.columns(), self.template.rows())
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.template.columns()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl GridQuery for Maze {
    fn columns(&self) -> u32 {
        self.template.columns()
    }

    fn rows(&self) -> u32 {
        self.template.rows()
    }

    fn is_free(&self, cell: CellCoord) -> bool {
        self.tile(cell).map_or(false, Tile::is_walkable)
    }
}
