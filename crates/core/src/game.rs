//! Game module - the playable state machine
//!
//! Ties the grid, the shape table and the randomizer together:
//!
//! ```text
//! Spawning -> Falling -> Locking -> Spawning
//!     \-> GameOver
//! ```
//!
//! Spawning and locking finish inside the call that triggers them, so a caller
//! only ever sees [`Phase::Falling`] or [`Phase::GameOver`]. Once the game is
//! over every command answers [`Outcome::GameOver`] and changes nothing.
//!
//! A stockpile swap into an empty slot leaves the game waiting for
//! [`Game::spawn`]; until then every other command answers
//! [`Outcome::SpawnNeeded`]. [`Game::apply`] performs that spawn itself.

use std::collections::VecDeque;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::rng::Randomizer;
use crate::scoring::{fall_period_ms, score_lock};
use crate::shape::Shape;
use crate::shapes;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    Command, Direction, GameConfig, LockReport, Offset, Outcome, Phase, Rotation, ShapeKey, Spin,
};

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    table: &'static [Shape],
    grid: Grid,
    randomizer: Randomizer,

    current: &'static Shape,
    next: &'static Shape,
    /// Playfield coordinate of the current shape's pivot.
    position: Offset,
    rotation: Rotation,
    spawn_pending: bool,

    stockpile: Vec<Option<&'static Shape>>,
    /// Shapes already played, oldest first.
    history: VecDeque<ShapeKey>,
    history_bound: usize,

    lines: u64,
    score: u64,
    combo: u32,
    phase: Phase,
    last_lock: Option<LockReport>,
}

impl Game {
    /// New game on the built-in table for `config.shape_size`.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        let table = shapes::table(config.shape_size)?;
        Self::with_shapes(config, table)
    }

    /// New game on a custom shape table. The first shape is already spawned.
    pub fn with_shapes(config: GameConfig, table: &'static [Shape]) -> Result<Self, EngineError> {
        let config = config.normalized();
        if table.is_empty() {
            return Err(EngineError::EmptyShapeTable);
        }
        if let Some(shape) = table.iter().find(|s| s.size() != config.shape_size) {
            return Err(EngineError::ShapeSizeMismatch {
                name: shape.name(),
                expected: config.shape_size,
                actual: shape.size(),
            });
        }
        let grid = Grid::new(
            config.rows,
            config.columns,
            config.buffer_rows(),
            config.ceiling_exclusion,
        )?;

        let history_bound = GameConfig::history_bound(table.len());
        let history = VecDeque::with_capacity(history_bound + 1);
        let mut randomizer = Randomizer::new(config.seed);
        let first = randomizer.draw(table, &history, history_bound);

        let mut game = Self {
            config,
            table,
            grid,
            randomizer,
            current: first,
            next: first,
            position: Offset::default(),
            rotation: Rotation::North,
            spawn_pending: false,
            stockpile: vec![None; config.stockpile_capacity()],
            history,
            history_bound,
            lines: 0,
            score: 0,
            combo: 0,
            phase: Phase::Falling,
            last_lock: None,
        };
        // Nothing has been played yet, so there is no outgoing shape to record.
        game.promote_next(false);
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// A stockpile swap emptied the active slot and [`Game::spawn`] is due.
    pub fn spawn_pending(&self) -> bool {
        self.spawn_pending
    }

    pub fn current_shape(&self) -> &'static Shape {
        self.current
    }

    pub fn next_shape(&self) -> &'static Shape {
        self.next
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Pivot-relative tiles of the current shape at the active rotation.
    pub fn current_tiles(&self) -> &[Offset] {
        self.current.tiles(self.rotation)
    }

    /// Playfield cells covered by the current shape.
    pub fn current_cells(&self) -> impl Iterator<Item = Offset> + '_ {
        let pivot = self.position;
        self.current_tiles().iter().map(move |&t| pivot.plus(t))
    }

    pub fn stockpile(&self) -> &[Option<&'static Shape>] {
        &self.stockpile
    }

    /// Recently played shapes, oldest first.
    pub fn recent_shapes(&self) -> &VecDeque<ShapeKey> {
        &self.history
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Gravity period for the driver at speed multiplier `speed`.
    pub fn fall_period_ms(&self, speed: f64) -> u64 {
        fall_period_ms(self.lines, speed)
    }

    /// Take and clear the report of the most recent lock.
    pub fn take_last_lock(&mut self) -> Option<LockReport> {
        self.last_lock.take()
    }

    /// Where the pivot would come to rest after a hard drop.
    pub fn ghost_position(&self) -> Offset {
        let face = self.current.face(self.rotation, Direction::Down);
        let mut pivot = self.position;
        loop {
            let below = pivot.shifted(Direction::Down);
            if !face.iter().all(|&t| self.grid.is_empty_at(below.plus(t))) {
                return pivot;
            }
            pivot = below;
        }
    }

    fn spawn_position(&self, shape: &Shape) -> Offset {
        let top = shape.extreme(Rotation::North, Direction::Up);
        Offset::new(
            (self.grid.columns() / 2) as i32 - 1,
            self.grid.visible_rows() as i32 - 1 - self.grid.ceiling_exclusion() as i32 - top.y,
        )
    }

    fn promote_next(&mut self, record_outgoing: bool) -> Outcome {
        let position = self.spawn_position(self.next);
        if !self.grid.fits(self.next.tiles(Rotation::North), position) {
            self.phase = Phase::GameOver;
            return Outcome::GameOver;
        }
        if record_outgoing {
            self.history.push_back(self.current.key());
            while self.history.len() > self.history_bound {
                self.history.pop_front();
            }
        }
        self.current = self.next;
        self.position = position;
        self.rotation = Rotation::North;
        self.spawn_pending = false;
        self.next = self
            .randomizer
            .draw(self.table, &self.history, self.history_bound);
        Outcome::Moved
    }

    /// Promote the next shape to current at the spawn point.
    ///
    /// Only answers a pending spawn; while a shape is falling this is
    /// `Refused`. Returns `GameOver` (without touching the shapes) if the
    /// next shape does not fit.
    pub fn spawn(&mut self) -> Outcome {
        if self.is_game_over() {
            return Outcome::GameOver;
        }
        if !self.spawn_pending {
            return Outcome::Refused;
        }
        self.promote_next(true)
    }

    fn blocked_outcome(&self) -> Option<Outcome> {
        if self.is_game_over() {
            Some(Outcome::GameOver)
        } else if self.spawn_pending {
            Some(Outcome::SpawnNeeded)
        } else {
            None
        }
    }

    /// Move the current shape one cell.
    ///
    /// A blocked downward move answers `MustLock`; any other blocked move is
    /// `Refused`. Shapes never move up.
    pub fn translate(&mut self, direction: Direction) -> Outcome {
        if let Some(outcome) = self.blocked_outcome() {
            return outcome;
        }
        if direction == Direction::Up {
            return Outcome::Refused;
        }
        let target = self.position.shifted(direction);
        let face = self.current.face(self.rotation, direction);
        if face.iter().all(|&t| self.grid.is_empty_at(target.plus(t))) {
            self.position = target;
            Outcome::Moved
        } else if direction == Direction::Down {
            Outcome::MustLock
        } else {
            Outcome::Refused
        }
    }

    /// Turn the current shape a quarter turn about its pivot. No wall kicks.
    pub fn rotate(&mut self, spin: Spin) -> Outcome {
        if let Some(outcome) = self.blocked_outcome() {
            return outcome;
        }
        let rotation = self.rotation.turned(spin);
        if self.grid.fits(self.current.tiles(rotation), self.position) {
            self.rotation = rotation;
            Outcome::Moved
        } else {
            Outcome::Refused
        }
    }

    /// Stamp the current shape, clear lines, score, and spawn the next shape.
    pub fn lock(&mut self) -> Outcome {
        if let Some(outcome) = self.blocked_outcome() {
            return outcome;
        }
        let shape = self.current;
        self.grid
            .stamp(shape.tiles(self.rotation), self.position, shape.key());

        let clear = self.grid.clear_full_lines();
        let cleared = clear.count as u32;
        let result = score_lock(cleared, self.config.shape_size, self.combo);
        self.combo = result.combo;
        self.score = self.score.saturating_add(result.awarded);
        self.lines += u64::from(cleared);
        self.last_lock = Some(LockReport {
            shape: shape.key(),
            lines_cleared: cleared,
            lowest_cleared_row: clear.lowest_row,
            awarded: result.awarded,
            combo: result.combo,
        });

        self.promote_next(true)
    }

    /// Exchange the current shape with stockpile slot `slot`.
    ///
    /// - empty slot: the current shape is stored, answer `SpawnNeeded`;
    /// - stored shape fits at the current pivot in rotation 0: swap, `Moved`;
    /// - otherwise `Refused` and nothing changes.
    pub fn hold_swap(&mut self, slot: usize) -> Result<Outcome, EngineError> {
        let capacity = self.stockpile.len();
        if slot >= capacity {
            return Err(EngineError::SlotOutOfRange { slot, capacity });
        }
        if let Some(outcome) = self.blocked_outcome() {
            return Ok(outcome);
        }

        match self.stockpile[slot] {
            None => {
                self.stockpile[slot] = Some(self.current);
                self.spawn_pending = true;
                Ok(Outcome::SpawnNeeded)
            }
            Some(stored) => {
                if !self.grid.fits(stored.tiles(Rotation::North), self.position) {
                    return Ok(Outcome::Refused);
                }
                self.stockpile[slot] = Some(self.current);
                self.current = stored;
                self.rotation = Rotation::North;
                Ok(Outcome::Moved)
            }
        }
    }

    /// Gravity step: move down, lock when blocked.
    pub fn tick(&mut self) -> Outcome {
        match self.translate(Direction::Down) {
            Outcome::MustLock => self.lock(),
            other => other,
        }
    }

    fn slide(&mut self, direction: Direction) -> Outcome {
        let first = self.translate(direction);
        if first != Outcome::Moved {
            return first;
        }
        while self.translate(direction) == Outcome::Moved {}
        Outcome::Moved
    }

    fn hard_drop(&mut self) -> Outcome {
        loop {
            match self.translate(Direction::Down) {
                Outcome::Moved => continue,
                Outcome::MustLock => return self.lock(),
                other => return other,
            }
        }
    }

    /// Apply a player command, including the follow-up a driver would
    /// otherwise perform (locking after a blocked drop, spawning after a
    /// stockpile store).
    pub fn apply(&mut self, command: Command) -> Result<Outcome, EngineError> {
        let outcome = match command {
            Command::MoveLeft => self.translate(Direction::Left),
            Command::MoveRight => self.translate(Direction::Right),
            Command::SlideLeft => self.slide(Direction::Left),
            Command::SlideRight => self.slide(Direction::Right),
            Command::SoftDrop => self.tick(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate(Spin::Clockwise),
            Command::RotateCcw => self.rotate(Spin::CounterClockwise),
            Command::Hold(slot) => match self.hold_swap(slot)? {
                Outcome::SpawnNeeded => self.spawn(),
                other => other,
            },
        };
        Ok(outcome)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.grid.columns();
        out.rows = self.grid.visible_rows();
        out.ceiling_exclusion = self.grid.ceiling_exclusion();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.visible_cells());

        out.active = if self.is_game_over() || self.spawn_pending {
            None
        } else {
            Some(ActiveSnapshot {
                key: self.current.key(),
                rotation: self.rotation,
                position: self.position,
                tiles: self.current_tiles().iter().copied().collect(),
                ghost_y: self.ghost_position().y,
            })
        };
        out.next = Some(self.next);
        out.stockpile.clear();
        out.stockpile.extend_from_slice(&self.stockpile);
        out.score = self.score;
        out.lines = self.lines;
        out.combo = self.combo;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
