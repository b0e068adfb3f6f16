use crate::shape::{Shape, TileSet};
use crate::types::{Offset, Rotation, ShapeKey};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveSnapshot {
    pub key: ShapeKey,
    pub rotation: Rotation,
    pub position: Offset,
    /// Pivot-relative tiles at `rotation`.
    pub tiles: TileSet,
    /// Pivot row after a hard drop.
    pub ghost_y: i32,
}

impl ActiveSnapshot {
    /// Whether the active shape covers playfield cell `(x, y)`.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        self.tiles
            .iter()
            .any(|t| self.position.x + t.x == x && self.position.y + t.y == y)
    }

    /// Whether the drop preview covers `(x, y)`.
    pub fn ghost_covers(&self, x: i32, y: i32) -> bool {
        self.tiles
            .iter()
            .any(|t| self.position.x + t.x == x && self.ghost_y + t.y == y)
    }
}

/// Read-only copy of everything a display needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub columns: usize,
    /// Visible rows.
    pub rows: usize,
    pub ceiling_exclusion: usize,
    /// Locked cells of the visible rows, row 0 (floor) first.
    pub cells: Vec<Option<ShapeKey>>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<&'static Shape>,
    pub stockpile: Vec<Option<&'static Shape>>,
    pub score: u64,
    pub lines: u64,
    pub combo: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.columns = 0;
        self.rows = 0;
        self.ceiling_exclusion = 0;
        self.cells.clear();
        self.active = None;
        self.next = None;
        self.stockpile.clear();
        self.score = 0;
        self.lines = 0;
        self.combo = 0;
        self.game_over = false;
    }

    /// Locked occupant of a visible cell.
    pub fn cell(&self, x: usize, y: usize) -> Option<ShapeKey> {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        self.cells.get(y * self.columns + x).copied().flatten()
    }

    /// Occupant as drawn: the active shape over the locked cells.
    pub fn display_cell(&self, x: usize, y: usize) -> Option<ShapeKey> {
        match &self.active {
            Some(active) if active.covers(x as i32, y as i32) => Some(active.key),
            _ => self.cell(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_overlays_locked_cells() {
        let mut snap = GameSnapshot {
            columns: 3,
            rows: 2,
            cells: vec![Some(ShapeKey("O")), None, None, None, None, None],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.cell(0, 0), Some(ShapeKey("O")));
        assert_eq!(snap.display_cell(1, 1), None);

        snap.active = Some(ActiveSnapshot {
            key: ShapeKey("I"),
            rotation: Rotation::North,
            position: Offset::new(1, 1),
            tiles: [Offset::new(0, 0), Offset::new(1, 0)].into_iter().collect(),
            ghost_y: 0,
        });
        assert_eq!(snap.display_cell(1, 1), Some(ShapeKey("I")));
        assert_eq!(snap.display_cell(2, 1), Some(ShapeKey("I")));
        assert_eq!(snap.display_cell(0, 1), None);
        assert!(snap.active.as_ref().unwrap().ghost_covers(2, 0));

        snap.clear();
        assert_eq!(snap.cell(0, 0), None);
        assert!(!snap.game_over);
    }
}
