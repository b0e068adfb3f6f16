//! Terminal polytris runner (default binary).
//!
//! One or two games side by side, each on its own gravity clock. Input comes
//! from crossterm; output goes through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use polytris::core::{speed_multiplier, Game, GameSnapshot};
use polytris::input::{decode, help_lines, Action, Layout};
use polytris::options::Options;
use polytris::term::{scheme_at, FrameBuffer, GameView, HudStatus, TerminalRenderer, Viewport};
use polytris::types::{Command, GameConfig, Outcome, SPEED_STEPS};

/// Upper bound on how long the loop sleeps between frames.
const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let options = Options::parse();
    let config = options.config()?;
    let mut session = Session::new(options, config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    for notice in session.options.notices() {
        println!("[polytris] {notice}");
    }
    for (index, player) in session.players.iter().enumerate() {
        println!(
            "[polytris] player {}: score {}, lines {}, best combo {}",
            index + 1,
            player.game.score(),
            player.game.lines(),
            player.best_combo
        );
    }
    Ok(())
}

struct Player {
    game: Game,
    deadline: Instant,
    best_combo: u32,
}

struct Session {
    options: Options,
    config: GameConfig,
    players: Vec<Player>,
    layout: Layout,
    paused: bool,
    speed_index: usize,
    scheme_index: usize,
    restarts: u32,
}

impl Session {
    fn new(options: Options, config: GameConfig) -> Result<Self> {
        let mut session = Self {
            layout: Layout::for_players(options.player_count()),
            speed_index: options.speed_index(),
            scheme_index: options.scheme_index(),
            options,
            config,
            players: Vec::new(),
            paused: false,
            restarts: 0,
        };
        session.start()?;
        Ok(session)
    }

    /// Build fresh games. Each player and each restart draws its own stream.
    fn start(&mut self) -> Result<()> {
        let now = Instant::now();
        self.players.clear();
        for index in 0..self.options.player_count() {
            let mut config = self.config;
            config.seed = config
                .seed
                .wrapping_add(index as u32)
                .wrapping_add(self.restarts.wrapping_mul(7919));
            let game = Game::new(config)?;
            let deadline = now + period(&game, self.speed_index);
            self.players.push(Player {
                game,
                deadline,
                best_combo: 0,
            });
        }
        self.paused = false;
        Ok(())
    }

    fn reset_deadlines(&mut self, now: Instant) {
        for player in &mut self.players {
            player.deadline = now + period(&player.game, self.speed_index);
        }
    }

    /// Returns `false` when the driver should quit.
    fn handle(&mut self, action: Action, now: Instant) -> Result<bool> {
        match action {
            Action::Quit => return Ok(false),
            Action::Pause => {
                self.paused = !self.paused;
                if !self.paused {
                    self.reset_deadlines(now);
                }
            }
            Action::Restart => {
                self.restarts = self.restarts.wrapping_add(1);
                self.start()?;
            }
            Action::SpeedUp => {
                self.speed_index = (self.speed_index + 1).min(SPEED_STEPS.len() - 1);
                self.reset_deadlines(now);
            }
            Action::SpeedDown => {
                self.speed_index = self.speed_index.saturating_sub(1);
                self.reset_deadlines(now);
            }
            Action::CycleColors => self.scheme_index = self.scheme_index.wrapping_add(1),
            Action::Play { player, command } => {
                if self.paused {
                    return Ok(true);
                }
                let speed_index = self.speed_index;
                let Some(p) = self.players.get_mut(player) else {
                    return Ok(true);
                };
                if let Command::Hold(slot) = command {
                    if slot >= p.game.stockpile().len() {
                        return Ok(true);
                    }
                }
                let outcome = p.game.apply(command)?;
                p.note_lock();
                // Drops restart the gravity clock.
                if matches!(command, Command::SoftDrop | Command::HardDrop)
                    || outcome == Outcome::SpawnNeeded
                {
                    p.deadline = now + period(&p.game, speed_index);
                }
            }
        }
        Ok(true)
    }

    fn run_gravity(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        for player in &mut self.players {
            if player.game.is_game_over() || now < player.deadline {
                continue;
            }
            player.game.tick();
            player.note_lock();
            player.deadline = now + period(&player.game, self.speed_index);
        }
    }

    fn next_wake(&self, now: Instant) -> Duration {
        let frame = Duration::from_millis(FRAME_MS);
        if self.paused {
            return frame;
        }
        self.players
            .iter()
            .filter(|p| !p.game.is_game_over())
            .map(|p| p.deadline.saturating_duration_since(now))
            .min()
            .map_or(frame, |d| d.min(frame))
    }
}

impl Player {
    fn note_lock(&mut self) {
        if let Some(report) = self.game.take_last_lock() {
            self.best_combo = self.best_combo.max(report.combo);
        }
    }
}

fn period(game: &Game, speed_index: usize) -> Duration {
    Duration::from_millis(game.fall_period_ms(speed_multiplier(speed_index)))
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshots: Vec<GameSnapshot> = Vec::new();

    loop {
        // Render.
        snapshots.resize_with(session.players.len(), GameSnapshot::default);
        for (snap, player) in snapshots.iter_mut().zip(&session.players) {
            player.game.snapshot_into(snap);
        }
        let status = HudStatus {
            paused: session.paused,
            speed: speed_multiplier(session.speed_index),
            scheme: scheme_at(session.scheme_index),
            help: help_lines(session.layout),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshots, &status, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next gravity step.
        if event::poll(session.next_wake(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = decode(key, session.layout) {
                        if !session.handle(action, Instant::now())? {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        session.run_gravity(Instant::now());
    }
}
