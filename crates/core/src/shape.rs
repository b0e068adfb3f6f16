//! Shape module - immutable named polyominoes
//!
//! A shape precomputes everything the game loop asks for, so moves never do
//! geometry at play time:
//!
//! - tile positions for each of the four rotations,
//! - per rotation and compass direction, the single most extreme tile,
//! - per rotation and compass direction, the face: every tile whose neighbor
//!   in that direction is not part of the shape. That is the furthest tile of
//!   each column (or row) plus any tile bordering a gap, such as the inside of
//!   a U. Only face tiles can collide when the shape moves one step that way.

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::geometry::{Bounds, RotationCorrection, Tile};
use crate::types::{Direction, Offset, Rotation, ShapeKey, MAX_TILES};

/// Tile positions of one shape in one orientation.
pub type TileSet = ArrayVec<Offset, MAX_TILES>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    key: ShapeKey,
    correction: RotationCorrection,
    tiles: ArrayVec<Tile, MAX_TILES>,
    /// `[rotation]`
    oriented: [TileSet; 4],
    /// `[rotation][direction]`
    extremes: [[Offset; 4]; 4],
    /// `[rotation][direction]`
    faces: [[TileSet; 4]; 4],
}

impl Shape {
    /// Build a shape from pivot-relative offsets.
    pub fn new(name: &'static str, offsets: &[(i32, i32)]) -> Result<Self, EngineError> {
        if offsets.is_empty() {
            return Err(EngineError::EmptyShape { name });
        }
        if offsets.len() > MAX_TILES {
            return Err(EngineError::TooManyTiles {
                name,
                count: offsets.len(),
            });
        }

        let base: TileSet = offsets.iter().copied().map(Offset::from).collect();
        for (i, a) in base.iter().enumerate() {
            if base[..i].contains(a) {
                return Err(EngineError::DuplicateTile {
                    name,
                    x: a.x,
                    y: a.y,
                });
            }
        }

        let correction = RotationCorrection::for_offsets(&base);
        let tiles: ArrayVec<Tile, MAX_TILES> =
            base.iter().map(|&o| Tile::new(o, correction)).collect();

        let oriented: [TileSet; 4] =
            Rotation::ALL.map(|rot| tiles.iter().map(|t| t.at(rot)).collect());
        let extremes = Rotation::ALL.map(|rot| {
            Direction::ALL.map(|dir| extreme_of(&oriented[rot.index()], dir))
        });
        let faces = Rotation::ALL
            .map(|rot| Direction::ALL.map(|dir| face_of(&oriented[rot.index()], dir)));

        Ok(Self {
            key: ShapeKey(name),
            correction,
            tiles,
            oriented,
            extremes,
            faces,
        })
    }

    /// Build a shape from cells drawn anywhere on the plane.
    ///
    /// The cells are translated so the pivot sits where a half turn keeps the
    /// shape inside its own rotation-0 bounding box.
    pub fn normalized(name: &'static str, cells: &[(i32, i32)]) -> Result<Self, EngineError> {
        let offsets: TileSet = cells.iter().copied().map(Offset::from).take(MAX_TILES).collect();
        let Some(bounds) = Bounds::of(&offsets) else {
            return Err(EngineError::EmptyShape { name });
        };
        let (w, h) = (bounds.width(), bounds.height());
        let target_x = -((w - 1) / 2);
        let target_y = match (w % 2 == 0, h % 2 == 0) {
            (_, false) => -((h - 1) / 2),
            (true, true) => -(h / 2) + 1,
            (false, true) => -(h / 2),
        };
        let dx = target_x - bounds.min.x;
        let dy = target_y - bounds.min.y;

        let shifted: Vec<(i32, i32)> = cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect();
        Self::new(name, &shifted)
    }

    pub fn key(&self) -> ShapeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.0
    }

    /// Number of tiles.
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn correction(&self) -> RotationCorrection {
        self.correction
    }

    /// Tile offsets in `rotation`, in definition order.
    pub fn tiles(&self, rotation: Rotation) -> &[Offset] {
        &self.oriented[rotation.index()]
    }

    /// Tile furthest in `direction` at `rotation`.
    pub fn extreme(&self, rotation: Rotation, direction: Direction) -> Offset {
        self.extremes[rotation.index()][direction.index()]
    }

    /// Leading tiles when moving in `direction` at `rotation`.
    pub fn face(&self, rotation: Rotation, direction: Direction) -> &[Offset] {
        &self.faces[rotation.index()][direction.index()]
    }

    pub fn bounds(&self, rotation: Rotation) -> Bounds {
        // Shapes are never empty.
        Bounds::of(self.tiles(rotation)).unwrap_or(Bounds {
            min: Offset::default(),
            max: Offset::default(),
        })
    }
}

fn extreme_of(tiles: &[Offset], direction: Direction) -> Offset {
    let mut best = tiles[0];
    for &t in &tiles[1..] {
        if t.reach(direction) > best.reach(direction) {
            best = t;
        }
    }
    best
}

fn face_of(tiles: &[Offset], direction: Direction) -> TileSet {
    tiles
        .iter()
        .filter(|&&t| !tiles.contains(&t.shifted(direction)))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_piece() -> Shape {
        Shape::new("T", &[(-1, -1), (0, -1), (1, -1), (0, 0)]).unwrap()
    }

    #[test]
    fn rejects_duplicate_tiles() {
        let err = Shape::new("bad", &[(0, 0), (1, 0), (0, 0)]).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateTile {
                name: "bad",
                x: 0,
                y: 0
            }
        );
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert_eq!(
            Shape::new("none", &[]).unwrap_err(),
            EngineError::EmptyShape { name: "none" }
        );
        let long: Vec<(i32, i32)> = (0..9).map(|x| (x, 0)).collect();
        assert_eq!(
            Shape::new("long", &long).unwrap_err(),
            EngineError::TooManyTiles {
                name: "long",
                count: 9
            }
        );
    }

    #[test]
    fn extremes_pick_outermost_tiles() {
        let t = t_piece();
        assert_eq!(t.extreme(Rotation::North, Direction::Up), Offset::new(0, 0));
        assert_eq!(t.extreme(Rotation::North, Direction::Left), Offset::new(-1, -1));
        assert_eq!(t.extreme(Rotation::North, Direction::Right), Offset::new(1, -1));
        // Ties resolve to the first tile in definition order.
        assert_eq!(t.extreme(Rotation::North, Direction::Down), Offset::new(-1, -1));
    }

    #[test]
    fn faces_hold_one_tile_per_line() {
        let t = t_piece();
        let down = t.face(Rotation::North, Direction::Down);
        assert_eq!(down.len(), 3);
        assert!(down.iter().all(|o| o.y == -1));

        let up = t.face(Rotation::North, Direction::Up);
        assert_eq!(
            up,
            &[Offset::new(-1, -1), Offset::new(1, -1), Offset::new(0, 0)]
        );

        let left = t.face(Rotation::North, Direction::Left);
        assert_eq!(left, &[Offset::new(-1, -1), Offset::new(0, 0)]);
    }

    #[test]
    fn faces_include_tiles_bordering_a_gap() {
        let u = Shape::new("U", &[(-1, 0), (1, 0), (-1, -1), (0, -1), (1, -1)]).unwrap();
        let left = u.face(Rotation::North, Direction::Left);
        assert!(left.contains(&Offset::new(1, 0)));
        assert!(left.contains(&Offset::new(-1, 0)));
        assert!(left.contains(&Offset::new(-1, -1)));
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn normalized_centers_pivot() {
        // Horizontal I drawn far from the origin.
        let i = Shape::normalized("I", &[(10, 5), (11, 5), (12, 5), (13, 5)]).unwrap();
        assert_eq!(
            i.tiles(Rotation::North),
            &[
                Offset::new(-1, 0),
                Offset::new(0, 0),
                Offset::new(1, 0),
                Offset::new(2, 0)
            ]
        );

        // Odd width, even height: pivot on the upper of the two rows.
        let t = Shape::normalized("T", &[(0, 0), (1, 0), (2, 0), (1, 1)]).unwrap();
        assert_eq!(t, t_piece());
    }

    #[test]
    fn size_and_name() {
        let t = t_piece();
        assert_eq!(t.size(), 4);
        assert_eq!(t.name(), "T");
        assert_eq!(t.key(), ShapeKey("T"));
    }
}
