//! RNG module - shape randomizer with repeat avoidance
//!
//! Draws come from the full shape table, biased against what was dealt
//! recently:
//!
//! - shapes seen in the last `(table_len - 1) / 2` draws are skipped outright,
//! - the rest are weighted by `bound + 1 - occurrences`, where `occurrences`
//!   counts appearances in the whole recent history (bounded at `bound`
//!   entries, two full cycles of the table),
//! - if nothing survives the skip, any shape may be drawn.
//!
//! Also provides a simple LCG so a seed replays the same game.

use std::collections::VecDeque;

use crate::shape::Shape;
use crate::types::ShapeKey;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Repeat-avoiding shape picker.
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: SimpleRng,
}

impl Randomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick the next shape from `table` given the recent history (oldest
    /// first) and its bound.
    ///
    /// `table` must not be empty. Does not allocate.
    pub fn draw(
        &mut self,
        table: &'static [Shape],
        history: &VecDeque<ShapeKey>,
        bound: usize,
    ) -> &'static Shape {
        let window = table.len().saturating_sub(1) / 2;
        let weight = |shape: &Shape| -> u32 {
            let key = shape.key();
            if history.iter().rev().take(window).any(|&k| k == key) {
                return 0;
            }
            let seen = history.iter().filter(|&&k| k == key).count();
            (bound.saturating_sub(seen) + 1) as u32
        };

        let total: u32 = table.iter().map(weight).sum();
        if total == 0 {
            let i = self.rng.next_range(table.len() as u32) as usize;
            return &table[i];
        }

        let mut pick = self.rng.next_range(total);
        for shape in table {
            let w = weight(shape);
            if pick < w {
                return shape;
            }
            pick -= w;
        }
        // Unreachable: pick < total.
        &table[table.len() - 1]
    }
}
