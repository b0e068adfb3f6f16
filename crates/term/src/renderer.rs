//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame, and any frame after a resize, repaints every row. Later
//! frames compare row slices and rewrite only the runs of glyphs that changed.
//! A `Pen` remembers the last style sent so each escape sequence is emitted
//! only when its part of the style actually changes.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then hand the previous frame back through `fb`.
    ///
    /// The caller keeps drawing into whatever buffer comes back, so two
    /// framebuffers alternate and nothing is cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(0, 0)
            }
        };
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        prev.resize(fb.width(), fb.height());
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Tracks the style the terminal currently has.
#[derive(Debug, Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn paint(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        let next = glyph.style;
        match self.style {
            None => {
                out.queue(SetAttribute(Attribute::Reset))?;
                out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
                out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
                queue_intensity(out, next)?;
            }
            Some(cur) if cur != next => {
                if cur.fg != next.fg {
                    out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
                }
                if cur.bg != next.bg {
                    out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
                }
                if (cur.bold, cur.dim) != (next.bold, next.dim) {
                    out.queue(SetAttribute(Attribute::NormalIntensity))?;
                    queue_intensity(out, next)?;
                }
            }
            Some(_) => {}
        }
        self.style = Some(next);
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    /// Leave the terminal in its default style if anything was painted.
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn queue_intensity(out: &mut Vec<u8>, style: Style) -> Result<()> {
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode a repaint of every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &glyph in fb.row(y) {
            pen.paint(out, glyph)?;
        }
    }
    pen.finish(out)
}

/// Encode the runs of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes are repainted in full. Identical frames encode
/// nothing.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }
    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        for run in ChangedRuns::new(prev.row(y), row) {
            out.queue(cursor::MoveTo(run.start as u16, y))?;
            for &glyph in &row[run] {
                pen.paint(out, glyph)?;
            }
        }
    }
    pen.finish(out)
}

/// Maximal column ranges where two equally long rows disagree.
struct ChangedRuns<'a> {
    prev: &'a [Glyph],
    next: &'a [Glyph],
    x: usize,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a [Glyph], next: &'a [Glyph]) -> Self {
        Self { prev, next, x: 0 }
    }

    fn differs(&self, x: usize) -> bool {
        self.prev.get(x) != self.next.get(x)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let len = self.next.len();
        while self.x < len && !self.differs(self.x) {
            self.x += 1;
        }
        if self.x >= len {
            return None;
        }
        let start = self.x;
        while self.x < len && self.differs(self.x) {
            self.x += 1;
        }
        Some(start..self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<Range<usize>> {
        ChangedRuns::new(prev.row(y), next.row(y)).collect()
    }

    fn count(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        b.put_str(1, 0, "XYZ", Style::default());
        assert_eq!(runs(&a, &b, 0), vec![1..4]);
    }

    #[test]
    fn changed_runs_split_on_unchanged_cells() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        b.put_char(0, 0, 'a', Style::default());
        b.put_char(2, 0, 'b', Style::default());
        b.put_char(5, 1, 'c', Style::default());
        assert_eq!(runs(&a, &b, 0), vec![0..1, 2..3]);
        assert_eq!(runs(&a, &b, 1), vec![5..6]);
    }

    #[test]
    fn style_only_change_is_a_run() {
        let a = FrameBuffer::new(3, 1);
        let mut b = a.clone();
        b.put_char(2, 0, ' ', Style::default().bold());
        assert_eq!(runs(&a, &b, 0), vec![2..3]);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn full_redraw_addresses_each_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", Style::default());
        fb.put_str(0, 1, "def", Style::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\x1b[1;1H"));
        assert!(text.contains("abc"));
        assert!(text.contains("\x1b[2;1Hdef"));
        assert!(!text.contains("\r\n"));
        // One style for the whole frame.
        assert_eq!(count(&out, "\x1b[38;2;"), 1);
    }

    #[test]
    fn pen_emits_only_what_changed() {
        let base = Style::default();
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_char(0, 0, 'a', base);
        fb.put_char(1, 0, 'b', base.bold());
        fb.put_char(2, 0, 'c', base.bold());
        fb.put_char(3, 0, 'd', Style::new(Rgb::new(1, 2, 3), base.bg).bold());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();

        assert_eq!(count(&out, "\x1b[38;2;"), 2);
        assert_eq!(count(&out, "\x1b[48;2;"), 1);
        assert_eq!(count(&out, "\x1b[22m"), 1);
        assert_eq!(count(&out, "\x1b[1m"), 1);
        assert!(String::from_utf8_lossy(&out).contains("\x1b[38;2;1;2;3md"));
    }

    #[test]
    fn diff_moves_to_each_run() {
        let a = FrameBuffer::new(8, 2);
        let mut b = a.clone();
        b.put_str(2, 1, "hi", Style::default());
        b.put_char(7, 1, '!', Style::default());
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\x1b[2;3H"));
        assert!(text.contains("hi"));
        assert!(text.contains("\x1b[2;8H"));
        assert!(!text.contains("\x1b[2J"));
    }

    #[test]
    fn resized_frame_is_repainted() {
        let a = FrameBuffer::new(2, 2);
        let b = FrameBuffer::new(3, 2);
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("\x1b[2J"));
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
