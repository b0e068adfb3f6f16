//! Built-in shape tables and rotation geometry.

use polytris::core::shapes::{self, SUPPORTED_SIZES};
use polytris::core::{EngineError, Shape};
use polytris::types::{Direction, Rotation, Spin};

#[test]
fn test_table_sizes() {
    assert_eq!(shapes::table(3).unwrap().len(), 2);
    assert_eq!(shapes::table(4).unwrap().len(), 7);
    assert_eq!(shapes::table(5).unwrap().len(), 18);
    assert_eq!(
        shapes::table(6).unwrap_err(),
        EngineError::UnsupportedShapeSize(6)
    );
}

#[test]
fn test_every_shape_has_its_size_and_unique_name() {
    for size in SUPPORTED_SIZES {
        let table = shapes::table(size).unwrap();
        for (i, shape) in table.iter().enumerate() {
            assert_eq!(shape.size(), size, "{} in size {size}", shape.name());
            assert!(
                table[..i].iter().all(|s| s.name() != shape.name()),
                "duplicate {}",
                shape.name()
            );
        }
    }
}

#[test]
fn test_rotations_keep_tiles_distinct() {
    for size in SUPPORTED_SIZES {
        for shape in shapes::table(size).unwrap() {
            for rot in Rotation::ALL {
                let tiles = shape.tiles(rot);
                for (i, a) in tiles.iter().enumerate() {
                    assert!(
                        !tiles[..i].contains(a),
                        "{} overlaps itself at {:?}",
                        shape.name(),
                        rot
                    );
                }
            }
        }
    }
}

#[test]
fn test_half_turn_stays_in_footprint() {
    for size in SUPPORTED_SIZES {
        for shape in shapes::table(size).unwrap() {
            let north = shape.bounds(Rotation::North);
            let south = shape.bounds(Rotation::South);
            assert_eq!(north, south, "{} drifts on a half turn", shape.name());
        }
    }
}

#[test]
fn test_square_is_rotation_invariant() {
    let o = shapes::by_name(4, "O").unwrap();
    let mut north: Vec<_> = o.tiles(Rotation::North).to_vec();
    north.sort_by_key(|t| (t.x, t.y));
    for rot in Rotation::ALL {
        let mut tiles: Vec<_> = o.tiles(rot).to_vec();
        tiles.sort_by_key(|t| (t.x, t.y));
        assert_eq!(tiles, north);
    }
}

#[test]
fn test_four_quarter_turns_return_home() {
    let mut rot = Rotation::North;
    for _ in 0..4 {
        rot = rot.turned(Spin::Clockwise);
    }
    assert_eq!(rot, Rotation::North);
    assert_eq!(
        Rotation::East.turned(Spin::CounterClockwise),
        Rotation::North
    );
}

#[test]
fn test_clockwise_turn_of_horizontal_line_is_vertical() {
    let i = shapes::by_name(4, "I").unwrap();
    let east = i.tiles(Rotation::East);
    assert!(east.iter().all(|t| t.x == east[0].x));
    let bounds = i.bounds(Rotation::East);
    assert_eq!((bounds.width(), bounds.height()), (1, 4));
}

#[test]
fn test_down_face_touches_floor_line() {
    for shape in shapes::table(5).unwrap() {
        for rot in Rotation::ALL {
            let lowest = shape.extreme(rot, Direction::Down).y;
            let face = shape.face(rot, Direction::Down);
            assert!(face.iter().any(|t| t.y == lowest), "{}", shape.name());
            assert!(face.len() <= shape.size());
        }
    }
}

#[test]
fn test_custom_shape_from_picture() {
    let shape = Shape::normalized("domino", &[(4, 4), (5, 4)]).unwrap();
    assert_eq!(shape.size(), 2);
    assert_eq!(shape.bounds(Rotation::North), shape.bounds(Rotation::South));
    assert!(shapes::by_name(4, "domino").is_none());
}
