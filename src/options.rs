//! Command-line options for the `polytris` binary.
//!
//! Flags take precedence over environment variables, which take precedence
//! over the defaults for the chosen polyomino size.
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | `--size N` | `POLYTRIS_SIZE` | 4 |
//! | `--rows N` | | `5 * size` |
//! | `--cols N` | | `2 * size + 2` |
//! | `--ceiling N` | | 0 |
//! | `--players N` | | 1 |
//! | `--seed N` | `POLYTRIS_SEED` | clock |
//! | `--speed X` | | 1.00 |
//! | `--colors NAME` | `POLYTRIS_COLORS` | `default` |

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use clap::Parser;

use crate::term::palette;
use crate::types::{GameConfig, DEFAULT_SPEED_INDEX, MAX_DIMENSION, SPEED_STEPS};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "polytris", version, about = "Falling polyominoes in the terminal")]
pub struct Options {
    /// Tiles per shape (3, 4 or 5).
    #[arg(
        long,
        env = "POLYTRIS_SIZE",
        default_value_t = 4,
        value_parser = clap::value_parser!(u8).range(3..=5)
    )]
    pub size: u8,

    /// Visible rows (raised to at least 4 x size).
    #[arg(long)]
    pub rows: Option<usize>,

    /// Columns (raised to at least 2 x size).
    #[arg(long)]
    pub cols: Option<usize>,

    /// Top rows that never clear.
    #[arg(long, default_value_t = 0)]
    pub ceiling: usize,

    /// Number of players sharing the keyboard.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=2)
    )]
    pub players: u8,

    /// Shape stream seed. If omitted, the clock is used.
    #[arg(long, env = "POLYTRIS_SEED")]
    pub seed: Option<u32>,

    /// Gravity multiplier, snapped to the nearest step between 0.5 and 3.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Color scheme.
    #[arg(
        long,
        env = "POLYTRIS_COLORS",
        default_value = "default",
        value_parser = ["default", "pastel", "mono"]
    )]
    pub colors: String,
}

impl Options {
    pub fn player_count(&self) -> usize {
        usize::from(self.players)
    }

    /// Game configuration for every player, before per-player seed offsets.
    ///
    /// Rows and columns below the size minimums are raised; see [`Self::notices`].
    pub fn config(&self) -> Result<GameConfig> {
        let base = GameConfig::for_shape_size(usize::from(self.size));
        let (rows, columns) = self.requested(&base);
        if rows == 0 || columns == 0 {
            bail!("polytris: rows and columns must be positive");
        }
        if rows > MAX_DIMENSION || columns > MAX_DIMENSION {
            bail!("polytris: rows and columns are limited to {MAX_DIMENSION}");
        }
        let config = GameConfig {
            rows,
            columns,
            ceiling_exclusion: self.ceiling,
            seed: self.seed.unwrap_or_else(clock_seed),
            ..base
        }
        .normalized();
        if config.ceiling_exclusion >= config.rows {
            bail!(
                "polytris: --ceiling {} leaves no playable rows",
                config.ceiling_exclusion
            );
        }
        Ok(config)
    }

    /// Index into `SPEED_STEPS` nearest to `--speed`.
    pub fn speed_index(&self) -> usize {
        SPEED_STEPS
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - self.speed).abs().total_cmp(&(*b - self.speed).abs()))
            .map_or(DEFAULT_SPEED_INDEX, |(i, _)| i)
    }

    pub fn scheme_index(&self) -> usize {
        palette::SCHEMES
            .iter()
            .position(|s| s.name == self.colors)
            .unwrap_or(0)
    }

    /// Human-readable notes about values that were adjusted.
    pub fn notices(&self) -> Vec<String> {
        let base = GameConfig::for_shape_size(usize::from(self.size));
        let (rows, columns) = self.requested(&base);
        let raised = GameConfig {
            rows,
            columns,
            ..base
        }
        .normalized();
        let mut out = Vec::new();
        if rows != raised.rows {
            out.push(format!(
                "rows raised from {rows} to {} for size {}",
                raised.rows, self.size
            ));
        }
        if columns != raised.columns {
            out.push(format!(
                "columns raised from {columns} to {} for size {}",
                raised.columns, self.size
            ));
        }
        out
    }

    fn requested(&self, base: &GameConfig) -> (usize, usize) {
        (
            self.rows.unwrap_or(base.rows),
            self.cols.unwrap_or(base.columns),
        )
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.subsec_nanos() ^ d.as_secs() as u32)
}
