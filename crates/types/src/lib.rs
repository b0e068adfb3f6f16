//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so the same types can be
//! used by the engine, the key-binding tables and the terminal renderer.
//!
//! # Coordinates
//!
//! The playfield is y-up: row 0 is the floor, larger `y` is higher. `x` grows
//! to the right. Offsets are relative to a shape's pivot.
//!
//! # Playfield dimensions
//!
//! Dimensions scale with the polyomino size `n`:
//!
//! | Setting | Default | Minimum |
//! |---------|---------|---------|
//! | rows | `5n` | `4n` |
//! | columns | `2n + 2` | `2n` |
//! | stockpile slots | `n` | `n` |
//!
//! Neither rows nor columns may exceed [`MAX_DIMENSION`].
//!
//! # Gravity timing
//!
//! The fall period shrinks as lines accumulate and as the speed multiplier
//! grows. See `fall_period_ms` in the core crate.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_PERIOD_MS` | 800 | Fall period at zero lines and 1.00x speed |
//! | `PERIOD_HALF_LINES` | 40 | Lines after which the period has halved |
//! | `MIN_PERIOD_MS` | 50 | Floor for the fall period |
//!
//! # Examples
//!
//! ```
//! use polytris_types::{Direction, GameConfig, Rotation, Spin};
//!
//! let rot = Rotation::North.turned(Spin::Clockwise);
//! assert_eq!(rot, Rotation::East);
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//!
//! let config = GameConfig { rows: 3, ..GameConfig::default() }.normalized();
//! assert_eq!(config.rows, 16);
//! ```

use std::fmt;

/// Largest polyomino the engine can hold (tiles per shape).
pub const MAX_TILES: usize = 8;

/// Default polyomino size.
pub const DEFAULT_SHAPE_SIZE: usize = 4;

/// Fall period at zero lines and 1.00x speed.
pub const BASE_PERIOD_MS: u64 = 800;

/// Number of cleared lines after which the fall period has halved.
pub const PERIOD_HALF_LINES: u64 = 40;

/// Fastest fall period the engine will report.
pub const MIN_PERIOD_MS: u64 = 50;

/// Largest accepted row or column count.
pub const MAX_DIMENSION: usize = 1024;

/// Speed multipliers offered by the front end, slowest first.
pub const SPEED_STEPS: [f64; 7] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0];

/// Index of 1.00x in [`SPEED_STEPS`].
pub const DEFAULT_SPEED_INDEX: usize = 2;

/// Recent-history length, in multiples of the shape table length.
pub const HISTORY_CYCLES: usize = 2;

/// Integer offset of a tile relative to its shape's pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by one cell in `direction`.
    pub fn shifted(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise sum, used to turn a pivot-relative offset into a
    /// playfield coordinate.
    pub fn plus(self, other: Offset) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Coordinate along `direction`: larger means further that way.
    pub fn reach(self, direction: Direction) -> i32 {
        match direction {
            Direction::Down => -self.y,
            Direction::Right => self.x,
            Direction::Up => self.y,
            Direction::Left => -self.x,
        }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Unit translation directions.
///
/// The discriminants double as compass indices: `Down` is south, `Right` is
/// east, `Up` is north, `Left` is west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down = 0,
    Right = 1,
    Up = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit offset for one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, -1),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Rotation direction requested by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    /// Quarter turns added to the rotation index (mod 4).
    pub fn delta(self) -> usize {
        match self {
            Spin::Clockwise => 1,
            Spin::CounterClockwise => 3,
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation for an index taken mod 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn turned(self, spin: Spin) -> Self {
        Self::from_index(self.index() + spin.delta())
    }
}

/// Identifier of a shape. Cells store this; the display side resolves it to a
/// color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ShapeKey(pub &'static str);

impl ShapeKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What a coordinate of the playfield holds.
///
/// `Wall` never exists in storage; it is what lookups outside the side walls
/// or below the floor report, so collision code treats them like blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(ShapeKey),
    Wall,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn key(&self) -> Option<ShapeKey> {
        match self {
            Cell::Block(key) => Some(*key),
            _ => None,
        }
    }
}

impl From<Option<ShapeKey>> for Cell {
    fn from(value: Option<ShapeKey>) -> Self {
        value.map_or(Cell::Empty, Cell::Block)
    }
}

/// Result of a single engine command.
///
/// Refusals are ordinary values, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The command changed the state.
    Moved,
    /// The command was not legal; nothing changed.
    Refused,
    /// A downward move was blocked; the driver must lock the shape.
    MustLock,
    /// Spawning was blocked. The game is over and ignores further commands.
    GameOver,
    /// The active shape went into the stockpile; the driver must spawn.
    SpawnNeeded,
}

/// Externally visible engine phase. Spawning and locking happen inside a
/// single call and are never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Falling,
    GameOver,
}

/// What the last lock did, kept for the display side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub shape: ShapeKey,
    pub lines_cleared: u32,
    /// Lowest cleared row; everything from here up needs redrawing.
    pub lowest_cleared_row: Option<usize>,
    pub awarded: u64,
    /// Combo streak after this lock.
    pub combo: u32,
}

/// Player commands, including the compound moves a front end offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Slide left until blocked.
    SlideLeft,
    /// Slide right until blocked.
    SlideRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    /// Swap with a stockpile slot (0-based).
    Hold(usize),
}


/// Engine configuration, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Tiles per polyomino. Also the stockpile capacity and the combo
    /// threshold.
    pub shape_size: usize,
    /// Visible rows.
    pub rows: usize,
    pub columns: usize,
    /// Visible rows at the top that never count for line clears.
    pub ceiling_exclusion: usize,
    pub seed: u32,
}

impl GameConfig {
    /// Default dimensions for a polyomino size.
    pub fn for_shape_size(shape_size: usize) -> Self {
        Self {
            shape_size,
            rows: 5 * shape_size,
            columns: 2 * shape_size + 2,
            ceiling_exclusion: 0,
            seed: 1,
        }
    }

    pub fn min_rows(&self) -> usize {
        4 * self.shape_size
    }

    pub fn min_columns(&self) -> usize {
        2 * self.shape_size
    }

    /// Raise rows and columns to their minimums. Zero dimensions are left
    /// alone so the engine can reject them.
    pub fn normalized(self) -> Self {
        let mut config = self;
        if config.rows != 0 && config.rows < config.min_rows() {
            config.rows = config.min_rows();
        }
        if config.columns != 0 && config.columns < config.min_columns() {
            config.columns = config.min_columns();
        }
        config
    }

    /// Rows reserved above the visible ceiling for spawning and rotation.
    pub fn buffer_rows(&self) -> usize {
        self.shape_size / 2 + 1
    }

    pub fn stockpile_capacity(&self) -> usize {
        self.shape_size
    }

    /// Bound of the recent-shape history for a table of `table_len` shapes.
    pub fn history_bound(table_len: usize) -> usize {
        HISTORY_CYCLES * table_len
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_shape_size(DEFAULT_SHAPE_SIZE)
    }
}
