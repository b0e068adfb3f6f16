//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of a falling-block puzzle played with
//! polyominoes of any size from 1 to [`MAX_TILES`](types::MAX_TILES) tiles.
//! It has **no dependencies** on terminals, timers, or I/O:
//!
//! - **Deterministic**: the same seed deals the same shapes
//! - **Synchronous**: every change happens inside one call; the caller owns
//!   the clock and re-invokes gravity at [`fall_period_ms`]
//! - **Allocation-free moves**: shape geometry is precomputed, so moving and
//!   rotating only read cells
//!
//! # Module Structure
//!
//! - [`geometry`]: tile offsets and their four integer rotation variants
//! - [`shape`]: immutable polyominoes with per-rotation extremes and faces
//! - [`shapes`]: built-in tables for trominoes, tetrominoes and pentominoes
//! - [`rng`]: seeded LCG and the repeat-avoiding randomizer
//! - [`grid`]: the playfield, line clears and the downward cascade
//! - [`scoring`]: line-clear awards, combo streak and the fall period
//! - [`game`]: the state machine tying it all together
//! - [`snapshot`]: read-only copies of the state for display
//!
//! # Example
//!
//! ```
//! use polytris_core::types::{Command, GameConfig, Outcome};
//! use polytris_core::Game;
//!
//! let mut game = Game::new(GameConfig::for_shape_size(5)).unwrap();
//!
//! game.apply(Command::MoveLeft).unwrap();
//! game.apply(Command::RotateCw).unwrap();
//! assert_eq!(game.apply(Command::HardDrop).unwrap(), Outcome::Moved);
//!
//! let report = game.take_last_lock().unwrap();
//! assert_eq!(report.lines_cleared, 0);
//! assert_eq!(game.grid().occupied_count(), 5);
//! ```

pub mod error;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod shapes;
pub mod snapshot;

pub use polytris_types as types;

// Re-export commonly used types for convenience
pub use error::EngineError;
pub use game::Game;
pub use grid::{ClearReport, Grid};
pub use rng::{Randomizer, SimpleRng};
pub use scoring::{base_score, fall_period_ms, score_lock, speed_multiplier, ScoreResult};
pub use shape::{Shape, TileSet};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
