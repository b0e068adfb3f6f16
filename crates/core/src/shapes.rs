//! Built-in shape tables
//!
//! Tables are built once per process on first use and never change after.
//! Tetrominoes are written as pivot-relative offsets; trominoes and
//! pentominoes are drawn as cell pictures and centered by
//! [`Shape::normalized`].

use std::sync::OnceLock;

use crate::error::EngineError;
use crate::shape::Shape;

type ShapeSpec = (&'static str, &'static [(i32, i32)]);

/// Polyomino sizes with a built-in table.
pub const SUPPORTED_SIZES: [usize; 3] = [3, 4, 5];

const TROMINOES: &[ShapeSpec] = &[
    ("I", &[(0, 0), (1, 0), (2, 0)]),
    ("V", &[(0, 0), (1, 0), (0, 1)]),
];

// Flat side down, wider than tall.
const TETROMINOES: &[ShapeSpec] = &[
    ("I", &[(-1, 0), (0, 0), (1, 0), (2, 0)]),
    ("J", &[(-1, 0), (-1, -1), (0, -1), (1, -1)]),
    ("L", &[(1, 0), (-1, -1), (0, -1), (1, -1)]),
    ("O", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    ("S", &[(-1, -1), (0, -1), (0, 0), (1, 0)]),
    ("T", &[(-1, -1), (0, -1), (1, -1), (0, 0)]),
    ("Z", &[(-1, 0), (0, 0), (0, -1), (1, -1)]),
];

// One-sided pentominoes; primed names are the mirror images.
const PENTOMINOES: &[ShapeSpec] = &[
    ("F", &[(1, 2), (2, 2), (0, 1), (1, 1), (1, 0)]),
    ("F'", &[(0, 2), (1, 2), (1, 1), (2, 1), (1, 0)]),
    ("I", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    ("L", &[(0, 1), (0, 0), (1, 0), (2, 0), (3, 0)]),
    ("L'", &[(3, 1), (0, 0), (1, 0), (2, 0), (3, 0)]),
    ("N", &[(0, 1), (1, 1), (1, 0), (2, 0), (3, 0)]),
    ("N'", &[(2, 1), (3, 1), (0, 0), (1, 0), (2, 0)]),
    ("P", &[(0, 1), (1, 1), (2, 1), (0, 0), (1, 0)]),
    ("P'", &[(0, 1), (1, 1), (2, 1), (1, 0), (2, 0)]),
    ("T", &[(0, 2), (1, 2), (2, 2), (1, 1), (1, 0)]),
    ("U", &[(0, 1), (2, 1), (0, 0), (1, 0), (2, 0)]),
    ("V", &[(0, 2), (0, 1), (0, 0), (1, 0), (2, 0)]),
    ("W", &[(0, 2), (0, 1), (1, 1), (1, 0), (2, 0)]),
    ("X", &[(1, 2), (0, 1), (1, 1), (2, 1), (1, 0)]),
    ("Y", &[(1, 1), (0, 0), (1, 0), (2, 0), (3, 0)]),
    ("Y'", &[(2, 1), (0, 0), (1, 0), (2, 0), (3, 0)]),
    ("Z", &[(0, 2), (1, 2), (1, 1), (1, 0), (2, 0)]),
    ("Z'", &[(1, 2), (2, 2), (1, 1), (0, 0), (1, 0)]),
];

type Table = Result<Vec<Shape>, EngineError>;

static TROMINO_TABLE: OnceLock<Table> = OnceLock::new();
static TETROMINO_TABLE: OnceLock<Table> = OnceLock::new();
static PENTOMINO_TABLE: OnceLock<Table> = OnceLock::new();

/// The built-in table for `shape_size`.
pub fn table(shape_size: usize) -> Result<&'static [Shape], EngineError> {
    let table = match shape_size {
        3 => TROMINO_TABLE.get_or_init(|| build(TROMINOES, Shape::normalized)),
        4 => TETROMINO_TABLE.get_or_init(|| build(TETROMINOES, Shape::new)),
        5 => PENTOMINO_TABLE.get_or_init(|| build(PENTOMINOES, Shape::normalized)),
        other => return Err(EngineError::UnsupportedShapeSize(other)),
    };
    table.as_deref().map_err(Clone::clone)
}

/// Look a shape up by name in the built-in table for `shape_size`.
pub fn by_name(shape_size: usize, name: &str) -> Option<&'static Shape> {
    table(shape_size).ok()?.iter().find(|s| s.name() == name)
}

fn build(
    specs: &[ShapeSpec],
    make: fn(&'static str, &[(i32, i32)]) -> Result<Shape, EngineError>,
) -> Table {
    specs.iter().map(|&(name, cells)| make(name, cells)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Offset, Rotation};

    #[test]
    fn tables_have_expected_counts() {
        assert_eq!(table(3).unwrap().len(), 2);
        assert_eq!(table(4).unwrap().len(), 7);
        assert_eq!(table(5).unwrap().len(), 18);
    }

    #[test]
    fn unsupported_size_is_an_error() {
        assert_eq!(table(2).unwrap_err(), EngineError::UnsupportedShapeSize(2));
        assert_eq!(table(6).unwrap_err(), EngineError::UnsupportedShapeSize(6));
    }

    #[test]
    fn every_shape_matches_its_table_size() {
        for size in SUPPORTED_SIZES {
            for shape in table(size).unwrap() {
                assert_eq!(shape.size(), size, "{} in size {}", shape.name(), size);
            }
        }
    }

    #[test]
    fn names_are_unique_per_table() {
        for size in SUPPORTED_SIZES {
            let shapes = table(size).unwrap();
            for (i, a) in shapes.iter().enumerate() {
                assert!(
                    shapes[..i].iter().all(|b| b.name() != a.name()),
                    "duplicate {}",
                    a.name()
                );
            }
        }
    }

    #[test]
    fn tetrominoes_are_centered() {
        // Literal offsets already sit where normalization would put them.
        for shape in table(4).unwrap() {
            let cells: Vec<(i32, i32)> = shape
                .tiles(Rotation::North)
                .iter()
                .map(|o| (o.x + 7, o.y + 3))
                .collect();
            let again = Shape::normalized(shape.name(), &cells).unwrap();
            assert_eq!(&again, shape);
        }
    }

    #[test]
    fn lookup_by_name() {
        let i = by_name(4, "I").unwrap();
        assert_eq!(i.extreme(Rotation::North, crate::types::Direction::Up), Offset::new(-1, 0));
        assert!(by_name(4, "Q").is_none());
        assert!(by_name(9, "I").is_none());
    }
}
