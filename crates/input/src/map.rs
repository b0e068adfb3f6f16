//! Key mapping from terminal events to player commands and driver actions.
//!
//! Two layouts are provided. `Solo` puts every control within reach of one
//! player (arrows, WASD or vim keys). `Duo` splits the keyboard: player 1 on
//! the left half with stockpile slots on `1`-`5`, player 2 on the arrows with
//! slots on `6`-`0`.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keyboard layout, chosen by the number of players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Solo,
    Duo,
}

impl Layout {
    pub fn for_players(players: usize) -> Self {
        if players >= 2 {
            Layout::Duo
        } else {
            Layout::Solo
        }
    }

    pub fn players(self) -> usize {
        match self {
            Layout::Solo => 1,
            Layout::Duo => 2,
        }
    }
}

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A command for one player's game (0-based player index).
    Play { player: usize, command: Command },
    Pause,
    Restart,
    SpeedUp,
    SpeedDown,
    CycleColors,
    Quit,
}

fn play(player: usize, command: Command) -> Option<Action> {
    Some(Action::Play { player, command })
}

/// Stockpile slot for a digit key, `1` being slot 0 and `0` slot 9.
fn digit_slot(c: char) -> Option<usize> {
    let d = c.to_digit(10)? as usize;
    Some(if d == 0 { 9 } else { d - 1 })
}

fn decode_solo(code: KeyCode) -> Option<Action> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => play(0, Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => play(0, Command::MoveRight),
        KeyCode::Home | KeyCode::Char('A') | KeyCode::Char('H') => play(0, Command::SlideLeft),
        KeyCode::End | KeyCode::Char('D') | KeyCode::Char('L') => play(0, Command::SlideRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => play(0, Command::SoftDrop),
        KeyCode::Char(' ') => play(0, Command::HardDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') | KeyCode::Char('x') => {
            play(0, Command::RotateCw)
        }
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') => {
            play(0, Command::RotateCcw)
        }

        // Stockpile
        KeyCode::Char(c @ '1'..='9') => digit_slot(c).and_then(|slot| play(0, Command::Hold(slot))),
        _ => None,
    }
}

fn decode_duo(code: KeyCode) -> Option<Action> {
    match code {
        // Player 1
        KeyCode::Char('a') => play(0, Command::MoveLeft),
        KeyCode::Char('d') => play(0, Command::MoveRight),
        KeyCode::Char('A') => play(0, Command::SlideLeft),
        KeyCode::Char('D') => play(0, Command::SlideRight),
        KeyCode::Char('s') => play(0, Command::SoftDrop),
        KeyCode::Char('w') => play(0, Command::HardDrop),
        KeyCode::Char('e') => play(0, Command::RotateCw),
        KeyCode::Char('x') => play(0, Command::RotateCcw),
        KeyCode::Char(c @ '1'..='5') => digit_slot(c).and_then(|slot| play(0, Command::Hold(slot))),

        // Player 2
        KeyCode::Left => play(1, Command::MoveLeft),
        KeyCode::Right => play(1, Command::MoveRight),
        KeyCode::Home => play(1, Command::SlideLeft),
        KeyCode::End => play(1, Command::SlideRight),
        KeyCode::Down => play(1, Command::SoftDrop),
        KeyCode::Up => play(1, Command::HardDrop),
        KeyCode::Char('/') => play(1, Command::RotateCw),
        KeyCode::Char('.') => play(1, Command::RotateCcw),
        KeyCode::Char(c @ ('6'..='9' | '0')) => {
            let slot = (digit_slot(c)? + 5) % 10;
            play(1, Command::Hold(slot))
        }
        _ => None,
    }
}

fn decode_global(key: KeyEvent) -> Option<Action> {
    if should_quit(key) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::SpeedDown),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::CycleColors),
        _ => None,
    }
}

/// Map a key event to an action. Releases are ignored.
pub fn decode(key: KeyEvent, layout: Layout) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if let Some(action) = decode_global(key) {
        return Some(action);
    }
    match layout {
        Layout::Solo => decode_solo(key.code),
        Layout::Duo => decode_duo(key.code),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// One line per binding group, for the help panel.
pub fn help_lines(layout: Layout) -> &'static [&'static str] {
    match layout {
        Layout::Solo => &[
            "move     <- -> / a d",
            "slide    Home End / A D",
            "drop     down s / space",
            "rotate   up x / z",
            "stock    1-5",
            "p pause  r restart  +/- speed  c colors  q quit",
        ],
        Layout::Duo => &[
            "P1  a d  A D  s w  e x  1-5",
            "P2  <- ->  Home End  down up  / .  6-0",
            "p pause  r restart  +/- speed  c colors  q quit",
        ],
    }
}
