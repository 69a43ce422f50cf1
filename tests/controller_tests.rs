//! Controller tests: high-score hooks around a full game

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use blockfall::core::GameState;
use blockfall::engine::{Controller, EngineConfig, FileStore, HighScoreStore, StoreError};
use blockfall::types::{Command, StepEvent, BOARD_HEIGHT, BOARD_WIDTH};

/// Store that records every write and serves a fixed read value
#[derive(Clone, Default)]
struct RecordingStore {
    stored: Option<u32>,
    writes: Rc<RefCell<Vec<(String, u32)>>>,
}

impl HighScoreStore for RecordingStore {
    fn read_high_score(&self, _game_id: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.stored)
    }

    fn write_high_score(&mut self, game_id: &str, score: u32) -> Result<(), StoreError> {
        self.writes.borrow_mut().push((game_id.to_string(), score));
        Ok(())
    }
}

fn play_until_game_over(controller: &mut Controller) {
    let mut guard = 0;
    while !controller.state().game_over() && guard < 500 {
        controller.command(Command::MoveLeft);
        controller.command(Command::HardDrop);
        guard += 1;
    }
    assert!(controller.state().game_over());
}

/// Rotate `turns` times, shift by `shift` columns, then hard drop
fn apply_commands(
    mut command: impl FnMut(Command) -> StepEvent,
    turns: usize,
    shift: i8,
) -> StepEvent {
    for _ in 0..turns {
        command(Command::Rotate);
    }
    let step = if shift < 0 { Command::MoveLeft } else { Command::MoveRight };
    for _ in 0..shift.unsigned_abs() {
        command(step);
    }
    command(Command::HardDrop)
}

fn apply_placement(controller: &mut Controller, turns: usize, shift: i8) {
    apply_commands(|c| controller.command(c), turns, shift);
}

/// Cleared lines first, then few holes, a low stack and a flat surface
fn placement_value(state: &GameState, lines_cleared: u32) -> i32 {
    let board = state.board();
    let mut heights = [0i32; BOARD_WIDTH as usize];
    let mut holes = 0;
    for x in 0..BOARD_WIDTH as i8 {
        let mut seen = false;
        for y in 0..BOARD_HEIGHT as i8 {
            if board.is_occupied(x, y) {
                if !seen {
                    heights[x as usize] = BOARD_HEIGHT as i32 - y as i32;
                    seen = true;
                }
            } else if seen {
                holes += 1;
            }
        }
    }
    let bumpiness: i32 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();
    lines_cleared as i32 * 1000 - holes * 40 - heights.iter().sum::<i32>() * 4 - bumpiness * 2
}

fn best_placement(state: &GameState) -> (usize, i8) {
    let mut best: Option<(i32, (usize, i8))> = None;
    for turns in 0..4 {
        for shift in -5..=5 {
            let mut trial = state.clone();
            let event = apply_commands(|c| trial.apply_command(c), turns, shift);
            if trial.game_over() {
                continue;
            }
            let value = placement_value(&trial, event.lines_cleared);
            if best.map_or(true, |(v, _)| value > v) {
                best = Some((value, (turns, shift)));
            }
        }
    }
    best.map(|(_, plan)| plan).unwrap_or((0, 0))
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("blockfall-controller-{}-{}", std::process::id(), name))
        .join("scores.json")
}

#[test]
fn test_no_write_when_score_not_higher() {
    let store = RecordingStore {
        stored: Some(u32::MAX),
        ..RecordingStore::default()
    };
    let writes = store.writes.clone();

    let mut controller = Controller::new(&EngineConfig::default(), 11).with_store(Box::new(store));
    controller.start(0);
    play_until_game_over(&mut controller);

    assert!(writes.borrow().is_empty());
    assert_eq!(controller.snapshot().high_score, u32::MAX);
}

#[test]
fn test_better_score_written_once_at_game_over() {
    let store = RecordingStore::default();
    let writes = store.writes.clone();

    let config = EngineConfig {
        game_id: "neon".to_string(),
        ..EngineConfig::default()
    };
    let mut controller = Controller::new(&config, 11).with_store(Box::new(store));
    controller.start(0);

    // Place pieces sensibly until a line clears, then stack to the top
    let mut pieces = 0;
    while controller.state().score() == 0 && pieces < 200 {
        let (turns, shift) = best_placement(controller.state());
        apply_placement(&mut controller, turns, shift);
        pieces += 1;
    }
    assert!(controller.state().score() > 0, "no line cleared in {} pieces", pieces);
    assert!(writes.borrow().is_empty());

    play_until_game_over(&mut controller);
    let score = controller.state().score();
    assert!(score > 0);
    assert_eq!(writes.borrow().as_slice(), &[("neon".to_string(), score)]);
    assert_eq!(controller.stored_high_score(), score);

    // Further input after game over must not write again
    controller.command(Command::HardDrop);
    controller.command(Command::MoveLeft);
    controller.tick(10_000);
    controller.tick(20_000);
    assert_eq!(writes.borrow().len(), 1);
}

#[test]
fn test_file_store_persists_between_controllers() {
    let path = scratch_path("persist");
    let mut seeded = FileStore::new(&path);
    seeded.write_high_score("tetris", 1234).unwrap();

    let config = EngineConfig {
        high_score_path: Some(path.clone()),
        ..EngineConfig::default()
    };
    let mut controller = Controller::new(&config, 5).with_store(Box::new(FileStore::new(&path)));
    controller.start(0);
    assert_eq!(controller.snapshot().high_score, 1234);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_restart_keeps_high_score() {
    let store = RecordingStore {
        stored: Some(700),
        ..RecordingStore::default()
    };
    let mut controller = Controller::new(&EngineConfig::default(), 21).with_store(Box::new(store));
    controller.start(0);
    play_until_game_over(&mut controller);

    controller.command(Command::Restart);
    let snapshot = controller.snapshot();
    assert!(!snapshot.game_over);
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.high_score >= 700);
    assert_eq!(snapshot.episode_id, 1);
}
