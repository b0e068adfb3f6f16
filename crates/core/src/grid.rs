//! Grid module - the playfield
//!
//! Cells live in one flat row-major vector, row 0 at the floor. Above the
//! visible rows sits a buffer of `shape_size / 2 + 1` rows where a shape can
//! exist while spawning or rotating near the ceiling.
//!
//! Every cell's "upstairs neighbor" is the cell one row up in the same column;
//! the top buffer row has none. Clearing a row pulls each column down along
//! that chain, so a clear costs O(height) per column and never reallocates.
//!
//! Lookups outside the side walls or below the floor report [`Cell::Wall`],
//! lookups at or above the top of the buffer report [`Cell::Empty`], so
//! collision checks need no bounds special cases.

use crate::error::EngineError;
use crate::types::{Cell, Offset, ShapeKey, MAX_DIMENSION};

/// Outcome of [`Grid::clear_full_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    pub count: usize,
    pub lowest_row: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    visible_rows: usize,
    total_rows: usize,
    ceiling_exclusion: usize,
    cells: Vec<Option<ShapeKey>>,
}

impl Grid {
    /// Empty grid with `visible_rows + buffer_rows` rows.
    pub fn new(
        visible_rows: usize,
        columns: usize,
        buffer_rows: usize,
        ceiling_exclusion: usize,
    ) -> Result<Self, EngineError> {
        if visible_rows == 0 || columns == 0 {
            return Err(EngineError::ZeroDimension {
                rows: visible_rows,
                columns,
            });
        }
        if visible_rows > MAX_DIMENSION || columns > MAX_DIMENSION {
            return Err(EngineError::TooLarge {
                rows: visible_rows,
                columns,
            });
        }
        if ceiling_exclusion >= visible_rows {
            return Err(EngineError::CeilingTooLow {
                exclusion: ceiling_exclusion,
                rows: visible_rows,
            });
        }
        let total_rows = visible_rows + buffer_rows;
        Ok(Self {
            columns,
            visible_rows,
            total_rows,
            ceiling_exclusion,
            cells: vec![None; total_rows * columns],
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Visible rows plus the buffer.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn ceiling_exclusion(&self) -> usize {
        self.ceiling_exclusion
    }

    /// Rows that take part in line clears.
    pub fn clearable_rows(&self) -> usize {
        self.visible_rows - self.ceiling_exclusion
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }

    /// Cell at a playfield coordinate.
    pub fn cell_at(&self, pos: Offset) -> Cell {
        if pos.x < 0 || pos.x >= self.columns as i32 || pos.y < 0 {
            return Cell::Wall;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if y >= self.total_rows {
            return Cell::Empty;
        }
        self.cells[self.index(x, y)].into()
    }

    pub fn is_empty_at(&self, pos: Offset) -> bool {
        self.cell_at(pos).is_empty()
    }

    /// Whether every tile, placed relative to `pivot`, lands on an empty cell.
    pub fn fits(&self, tiles: &[Offset], pivot: Offset) -> bool {
        tiles.iter().all(|&t| self.is_empty_at(pivot.plus(t)))
    }

    /// Stored occupant, `None` when empty or out of storage.
    pub fn get(&self, x: usize, y: usize) -> Option<ShapeKey> {
        if x >= self.columns || y >= self.total_rows {
            return None;
        }
        self.cells[self.index(x, y)]
    }

    /// Set a stored cell. Returns false if out of storage.
    pub fn set(&mut self, x: usize, y: usize, occupant: Option<ShapeKey>) -> bool {
        if x >= self.columns || y >= self.total_rows {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = occupant;
        true
    }

    /// Write `key` into every tile position relative to `pivot`.
    ///
    /// Tiles outside storage are skipped; returns how many were written.
    pub fn stamp(&mut self, tiles: &[Offset], pivot: Offset, key: ShapeKey) -> usize {
        let mut written = 0;
        for &t in tiles {
            let p = pivot.plus(t);
            if p.x < 0 || p.y < 0 {
                continue;
            }
            if self.set(p.x as usize, p.y as usize, Some(key)) {
                written += 1;
            }
        }
        written
    }

    pub fn row(&self, y: usize) -> &[Option<ShapeKey>] {
        let start = self.index(0, y);
        &self.cells[start..start + self.columns]
    }

    /// A row is full when none of its cells is empty.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.total_rows && self.row(y).iter().all(Option::is_some)
    }

    /// Row index directly above `y`, if it exists.
    #[inline(always)]
    fn upstairs(&self, y: usize) -> Option<usize> {
        let up = y + 1;
        (up < self.total_rows).then_some(up)
    }

    /// Pull the column above `(x, y)` down one step, emptying the top cell.
    fn catch_falling(&mut self, x: usize, y: usize) {
        let mut y = y;
        while let Some(up) = self.upstairs(y) {
            let above = self.cells[self.index(x, up)];
            let idx = self.index(x, y);
            self.cells[idx] = above;
            y = up;
        }
        let top = self.index(x, y);
        self.cells[top] = None;
    }

    /// Clear every full row below the ceiling exclusion, bottom to top.
    pub fn clear_full_lines(&mut self) -> ClearReport {
        let mut report = ClearReport::default();
        let mut limit = self.clearable_rows();
        let mut y = 0;

        while y < limit {
            if !self.is_row_full(y) {
                y += 1;
                continue;
            }
            for x in 0..self.columns {
                self.catch_falling(x, y);
            }
            report.count += 1;
            report.lowest_row.get_or_insert(y);
            // Row y now holds what was above it; look at it again.
            limit -= 1;
        }

        report
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Occupied cells in the visible rows.
    pub fn occupied_count(&self) -> usize {
        self.cells[..self.visible_rows * self.columns]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }

    /// Visible rows, floor first.
    pub fn visible_cells(&self) -> &[Option<ShapeKey>] {
        &self.cells[..self.visible_rows * self.columns]
    }
}
