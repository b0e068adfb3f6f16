//! Contract violations.
//!
//! These are programming errors in the caller or in a shape table. Ordinary
//! refusals (blocked moves, blocked swaps) are `Outcome` values instead.

use thiserror::Error;

use crate::types::{MAX_DIMENSION, MAX_TILES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("shape {name} has no tiles")]
    EmptyShape { name: &'static str },

    #[error("shape {name} has {count} tiles, at most {max} are supported", max = MAX_TILES)]
    TooManyTiles { name: &'static str, count: usize },

    #[error("shape {name} lists tile ({x}, {y}) more than once")]
    DuplicateTile { name: &'static str, x: i32, y: i32 },

    #[error("no built-in shape table for size {0}")]
    UnsupportedShapeSize(usize),

    #[error("shape {name} has {actual} tiles but the game plays size {expected}")]
    ShapeSizeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("shape table is empty")]
    EmptyShapeTable,

    #[error("playfield needs positive dimensions, got {rows} rows x {columns} columns")]
    ZeroDimension { rows: usize, columns: usize },

    #[error("playfield of {rows} rows x {columns} columns exceeds the {max} limit", max = MAX_DIMENSION)]
    TooLarge { rows: usize, columns: usize },

    #[error("ceiling exclusion {exclusion} must be below the {rows} visible rows")]
    CeilingTooLow { exclusion: usize, rows: usize },

    #[error("stockpile slot {slot} out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },
}
