//! Property tests over generated seeds and command sequences.
//!
//! Invariants covered:
//! - commands never fail for in-range stockpile slots,
//! - the active shape always sits on empty cells inside the walls,
//! - score and line count never decrease,
//! - game over is absorbing,
//! - the same seed and commands replay the same game.

use proptest::prelude::*;

use polytris::core::{base_score, fall_period_ms, score_lock, Game};
use polytris::types::{Command, GameConfig, Outcome, MIN_PERIOD_MS};

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::SlideLeft),
        Just(Command::SlideRight),
        Just(Command::SoftDrop),
        Just(Command::HardDrop),
        Just(Command::RotateCw),
        Just(Command::RotateCcw),
        // Every built-in size has at least three slots.
        (0usize..3).prop_map(Command::Hold),
    ]
}

fn assert_active_fits(game: &Game) {
    if game.is_game_over() || game.spawn_pending() {
        return;
    }
    for cell in game.current_cells() {
        assert!(cell.x >= 0 && (cell.x as usize) < game.grid().columns());
        assert!(cell.y >= 0);
        assert!(game.grid().is_empty_at(cell), "active overlaps {cell:?}");
    }
}

proptest! {
    #[test]
    fn generated_play_respects_core_invariants(
        seed in any::<u32>(),
        size in 3usize..=5,
        commands in prop::collection::vec(command(), 1..300),
    ) {
        let config = GameConfig { seed, ..GameConfig::for_shape_size(size) };
        let mut game = Game::new(config).unwrap();
        let mut score = 0;
        let mut lines = 0;

        for command in commands {
            let was_over = game.is_game_over();
            let outcome = game.apply(command).unwrap();
            if was_over {
                prop_assert_eq!(outcome, Outcome::GameOver);
            }
            prop_assert!(game.score() >= score);
            prop_assert!(game.lines() >= lines);
            score = game.score();
            lines = game.lines();
            assert_active_fits(&game);
            game.tick();
            assert_active_fits(&game);
        }
    }

    #[test]
    fn replay_is_deterministic(
        seed in any::<u32>(),
        commands in prop::collection::vec(command(), 1..120),
    ) {
        let config = GameConfig { seed, ..GameConfig::default() };
        let mut a = Game::new(config).unwrap();
        let mut b = Game::new(config).unwrap();
        for command in commands {
            prop_assert_eq!(a.apply(command).unwrap(), b.apply(command).unwrap());
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn fall_period_shrinks_with_lines_and_speed(
        lines in 0u64..100_000,
        speed in 0.1f64..10.0,
    ) {
        let now = fall_period_ms(lines, speed);
        prop_assert!(fall_period_ms(lines + 1, speed) <= now);
        prop_assert!(fall_period_ms(lines, speed * 1.5) <= now);
        prop_assert!(now >= MIN_PERIOD_MS);
    }

    #[test]
    fn combo_only_grows_on_full_size_clears(
        cleared in 0u32..6,
        size in 1usize..6,
        combo in 0u32..10,
    ) {
        let result = score_lock(cleared, size, combo);
        if cleared as usize == size {
            prop_assert_eq!(result.combo, combo + 1);
            prop_assert_eq!(result.awarded, base_score(cleared + combo + 1));
        } else {
            prop_assert_eq!(result.combo, 0);
            prop_assert_eq!(result.awarded, (1u64 << cleared) - 1);
        }
    }
}
