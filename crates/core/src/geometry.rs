//! Geometry module - tile offsets and their four rotation variants
//!
//! Rotating an offset a quarter turn about an integer pivot moves the center of
//! a bounding box with an even side by half a cell. The two correction flags
//! shift specific rotation indices by one cell so the rotated tiles stay on
//! the grid and a half turn keeps a centered shape inside its own footprint.
//!
//! | rotation | x | y |
//! |---|---|---|
//! | 0 | `x` | `y` |
//! | 1 | `y` | `-x + e` |
//! | 2 | `-x + e` | `-y + e - p` |
//! | 3 | `-y + e` | `x` |
//!
//! with `e = even_base`, `p = parity_flag`. Index 1 is one clockwise quarter
//! turn in y-up coordinates.

use crate::types::{Offset, Rotation};

/// Correction flags derived from a shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationCorrection {
    /// Bounding width is even.
    pub even_base: bool,
    /// Exactly one of width and height is even.
    pub parity_flag: bool,
}

impl RotationCorrection {
    pub fn from_extent(width: i32, height: i32) -> Self {
        let even_width = width % 2 == 0;
        let even_height = height % 2 == 0;
        Self {
            even_base: even_width,
            parity_flag: even_width ^ even_height,
        }
    }

    /// Correction for the bounding box of `offsets`.
    pub fn for_offsets(offsets: &[Offset]) -> Self {
        match Bounds::of(offsets) {
            Some(bounds) => Self::from_extent(bounds.width(), bounds.height()),
            None => Self::default(),
        }
    }
}

/// Inclusive bounding box of a set of offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Offset,
    pub max: Offset,
}

impl Bounds {
    /// `None` for an empty set.
    pub fn of(offsets: &[Offset]) -> Option<Self> {
        let first = *offsets.first()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for o in &offsets[1..] {
            bounds.min.x = bounds.min.x.min(o.x);
            bounds.min.y = bounds.min.y.min(o.y);
            bounds.max.x = bounds.max.x.max(o.x);
            bounds.max.y = bounds.max.y.max(o.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }
}

/// One tile of a shape with its position precomputed for every rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    variants: [Offset; 4],
}

impl Tile {
    pub fn new(offset: Offset, correction: RotationCorrection) -> Self {
        let Offset { x, y } = offset;
        let e = correction.even_base as i32;
        let p = correction.parity_flag as i32;
        Self {
            variants: [
                Offset::new(x, y),
                Offset::new(y, -x + e),
                Offset::new(-x + e, -y + e - p),
                Offset::new(-y + e, x),
            ],
        }
    }

    #[inline(always)]
    pub fn at(&self, rotation: Rotation) -> Offset {
        self.variants[rotation.index()]
    }

    /// Definition-time offset (rotation 0).
    pub fn base(&self) -> Offset {
        self.variants[0]
    }
}
