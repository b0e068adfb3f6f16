//! GameView: maps game snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each player gets a bordered field and a side panel (score, lines, combo,
//! next shape, stockpile). Players are laid out left to right and the whole
//! group is centered in the viewport.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::palette::ColorScheme;
use crate::types::{Rotation, ShapeKey};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Driver state shown next to the games.
#[derive(Debug, Clone, Copy)]
pub struct HudStatus<'a> {
    pub paused: bool,
    pub speed: f64,
    pub scheme: &'static ColorScheme,
    pub help: &'a [&'a str],
}

const PANEL_MIN_W: u16 = 14;
const PLAYER_GAP: u16 = 3;
const BLOCK: char = '█';

/// A lightweight terminal renderer for one or more games.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.columns as u16 * self.cell_w + 2,
            snap.rows as u16 * self.cell_h + 2,
        )
    }

    fn panel_width(&self, snap: &GameSnapshot) -> u16 {
        let preview = snap.stockpile.len().max(1) as u16 * self.cell_w;
        preview.max(PANEL_MIN_W)
    }

    /// Columns taken by one player's field and panel.
    pub fn player_width(&self, snap: &GameSnapshot) -> u16 {
        self.frame_size(snap).0 + 2 + self.panel_width(snap)
    }

    /// Render every player into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        players: &[GameSnapshot],
        status: &HudStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let scheme = status.scheme;
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::new(' ', Style::new(scheme.text, scheme.background)));

        let total_w: u16 = players
            .iter()
            .map(|p| self.player_width(p))
            .fold(0u16, |acc, w| acc.saturating_add(w))
            .saturating_add(PLAYER_GAP * players.len().saturating_sub(1) as u16);
        let tallest = players
            .iter()
            .map(|p| self.frame_size(p).1)
            .max()
            .unwrap_or(0);

        let mut x = viewport.width.saturating_sub(total_w) / 2;
        let y = viewport.height.saturating_sub(tallest) / 2;
        for (index, snap) in players.iter().enumerate() {
            self.render_player(fb, snap, index, status, x, y);
            x = x
                .saturating_add(self.player_width(snap))
                .saturating_add(PLAYER_GAP);
        }

        let mut help_y = y.saturating_add(tallest);
        let help_style = Style::new(scheme.text, scheme.background).dim();
        for line in status.help {
            if help_y >= viewport.height {
                break;
            }
            let line_w = line.chars().count() as u16;
            fb.put_str(viewport.width.saturating_sub(line_w) / 2, help_y, line, help_style);
            help_y += 1;
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        players: &[GameSnapshot],
        status: &HudStatus<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(players, status, viewport, &mut fb);
        fb
    }

    fn render_player(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        index: usize,
        status: &HudStatus<'_>,
        start_x: u16,
        start_y: u16,
    ) {
        let scheme = status.scheme;
        let (frame_w, frame_h) = self.frame_size(snap);

        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            Style::new(scheme.border, scheme.background),
        );

        let dot = Style::new(scheme.grid_dot, scheme.field).dim();
        let ceiling = Style::new(scheme.border, scheme.field).dim();
        let ghost = Style::new(scheme.ghost, scheme.field).dim();
        let ceiling_from = snap.rows.saturating_sub(snap.ceiling_exclusion);

        for y in 0..snap.rows {
            for x in 0..snap.columns {
                let (ch, style) = match snap.display_cell(x, y) {
                    Some(key) => (BLOCK, self.block_style(scheme, key)),
                    None => {
                        let in_ghost = snap
                            .active
                            .as_ref()
                            .is_some_and(|a| a.ghost_covers(x as i32, y as i32));
                        if in_ghost {
                            ('░', ghost)
                        } else if y >= ceiling_from {
                            ('-', ceiling)
                        } else {
                            ('·', dot)
                        }
                    }
                };
                self.fill_field_cell(fb, start_x, start_y, snap.rows, x, y, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, index, status, start_x + frame_w + 2, start_y);

        if snap.game_over {
            self.draw_overlay_text(fb, scheme, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if status.paused {
            self.draw_overlay_text(fb, scheme, start_x, start_y, frame_w, frame_h, "PAUSED");
        }
    }

    fn block_style(&self, scheme: &ColorScheme, key: ShapeKey) -> Style {
        Style::new(scheme.shape_color(key), scheme.field).bold()
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Fill one field cell. Field row 0 is the floor, drawn at the bottom.
    #[allow(clippy::too_many_arguments)]
    fn fill_field_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        rows: usize,
        cell_x: usize,
        cell_y: usize,
        ch: char,
        style: Style,
    ) {
        let px = start_x + 1 + cell_x as u16 * self.cell_w;
        let py = start_y + 1 + (rows - 1 - cell_y) as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Draw `shape` at rotation 0 with its top-left corner at `(x, y)`.
    /// Returns the number of terminal rows used.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        scheme: &ColorScheme,
        shape: &Shape,
        x: u16,
        y: u16,
    ) -> u16 {
        let tiles = shape.tiles(Rotation::North);
        let bounds = shape.bounds(Rotation::North);
        let style = Style::new(scheme.shape_color(shape.key()), scheme.background).bold();
        for t in tiles {
            let col = (t.x - bounds.min.x) as u16;
            let row = (bounds.max.y - t.y) as u16;
            fb.fill_rect(
                x + col * self.cell_w,
                y + row * self.cell_h,
                self.cell_w,
                self.cell_h,
                BLOCK,
                style,
            );
        }
        bounds.height() as u16 * self.cell_h
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        index: usize,
        status: &HudStatus<'_>,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= fb.width() {
            return;
        }
        let scheme = status.scheme;
        let label = Style::new(scheme.text, scheme.background).bold();
        let value = Style::new(scheme.text, scheme.background);

        let mut y = start_y;
        let end = fb.put_str(panel_x, y, "PLAYER ", label);
        fb.put_u64(end, y, index as u64 + 1, label);
        y = y.saturating_add(2);

        for (name, v) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("COMBO", u64::from(snap.combo)),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u64(panel_x, y, v, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        let hundredths = (status.speed.max(0.0) * 100.0).round() as u64;
        let end = fb.put_u64(panel_x, y, hundredths / 100, value);
        let end = fb.put_str(end, y, ".", value);
        let frac = hundredths % 100;
        let end = fb.put_u64(end, y, frac / 10, value);
        let end = fb.put_u64(end, y, frac % 10, value);
        fb.put_str(end, y, "x", value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let used = self.draw_preview(fb, scheme, next, panel_x, y);
            y = y.saturating_add(used);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "STOCK", label);
        y = y.saturating_add(1);
        for (slot, stored) in snap.stockpile.iter().enumerate() {
            let end = fb.put_u64(panel_x, y, slot as u64 + 1, value.dim());
            match stored {
                Some(shape) => {
                    let style = Style::new(scheme.shape_color(shape.key()), scheme.background);
                    fb.put_str(end + 1, y, shape.name(), style.bold());
                }
                None => {
                    fb.put_str(end + 1, y, "-", value.dim());
                }
            }
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        scheme: &ColorScheme,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = Style::new(scheme.text, scheme.background).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Game;
    use crate::palette::scheme_at;
    use crate::types::{Command, GameConfig};

    fn status(paused: bool) -> HudStatus<'static> {
        HudStatus {
            paused,
            speed: 1.0,
            scheme: scheme_at(0),
            help: &["q quit"],
        }
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_field_and_panel() {
        let game = Game::new(GameConfig::default()).unwrap();
        let fb = GameView::default().render(&[game.snapshot()], &status(false), Viewport::new(80, 30));
        let text = screen_text(&fb);
        assert!(text.contains("PLAYER 1"));
        assert!(text.contains("SCORE"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("STOCK"));
        assert!(text.contains("1.00x"));
        assert!(text.contains('┌'));
        assert!(text.contains(BLOCK));
        assert!(text.contains("q quit"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_floor_is_drawn_at_the_bottom() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.apply(Command::HardDrop).unwrap();
        let snap = game.snapshot();
        let view = GameView::default();
        let fb = view.render(&[snap.clone()], &status(false), Viewport::new(80, 30));

        let (frame_w, frame_h) = view.frame_size(&snap);
        let start_x = (80 - view.player_width(&snap)) / 2;
        let start_y = (30 - frame_h) / 2;
        let bottom = start_y + frame_h - 2;
        let row = fb.row_text(bottom);
        let field: String = row
            .chars()
            .skip(start_x as usize + 1)
            .take(frame_w as usize - 2)
            .collect();
        assert!(field.contains(BLOCK), "bottom row was {field:?}");
    }

    #[test]
    fn test_overlays() {
        let game = Game::new(GameConfig::default()).unwrap();
        let fb = GameView::default().render(&[game.snapshot()], &status(true), Viewport::new(80, 30));
        assert!(screen_text(&fb).contains("PAUSED"));
    }

    #[test]
    fn test_two_players_side_by_side() {
        let a = Game::new(GameConfig::default()).unwrap().snapshot();
        let b = Game::new(GameConfig {
            seed: 9,
            ..GameConfig::default()
        })
        .unwrap()
        .snapshot();
        let fb = GameView::default().render(&[a, b], &status(false), Viewport::new(120, 30));
        let text = screen_text(&fb);
        assert!(text.contains("PLAYER 1"));
        assert!(text.contains("PLAYER 2"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let game = Game::new(GameConfig::for_shape_size(5)).unwrap();
        let fb = GameView::default().render(&[game.snapshot()], &status(true), Viewport::new(10, 5));
        assert_eq!((fb.width(), fb.height()), (10, 5));
    }
}
