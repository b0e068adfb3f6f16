//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`Action`]s: player commands routed to one
//! of up to two games, plus the driver's own keys (pause, restart, speed,
//! color scheme, quit). Nothing here touches game state.

pub mod map;

pub use polytris_types as types;

pub use map::{decode, help_lines, should_quit, Action, Layout};
