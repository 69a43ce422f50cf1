//! Terminal Blockfall runner (default binary).
//!
//! Configuration comes from `BLOCKFALL_*` environment variables; logs go to
//! stderr through `RUST_LOG`, so redirect stderr when playing with logging on.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::engine::{Controller, Driver, EngineConfig, FileStore, HighScoreStore, MemoryStore};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::TerminalRenderer;

fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig::from_env();
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &EngineConfig) -> Result<()> {
    let store: Box<dyn HighScoreStore> = match &config.high_score_path {
        Some(path) => {
            let store = FileStore::new(path);
            info!("high scores stored in {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(MemoryStore::new()),
    };

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut controller = Controller::new(config, clock_seed()).with_store(store);
    let mut driver = Driver::new(config.tick_ms);
    controller.start(now_ms());

    loop {
        term.draw(&controller.snapshot())?;

        let timeout = Duration::from_millis(driver.wait_budget(now_ms()));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        controller.command(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        driver.pump(&mut controller, now_ms());
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
