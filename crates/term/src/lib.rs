//! Terminal rendering for polytris.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer which is then flushed to the terminal, diffing against the
//! previous frame. No widget toolkit is involved.
//!
//! - [`fb`]: framebuffer, glyphs and styles
//! - [`palette`]: color schemes keyed by shape name
//! - [`game_view`]: snapshot-to-framebuffer drawing (pure, testable)
//! - [`renderer`]: raw-mode terminal output

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use polytris_core as core;
pub use polytris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, HudStatus, Viewport};
pub use palette::{scheme, scheme_at, ColorScheme, SCHEMES};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
