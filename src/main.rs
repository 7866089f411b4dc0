//! Terminal blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `blockfall::term`. The engine is fed one frame per `TICK_MS` and every
//! mapped key press in between.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use blockfall::core::EngineConfig;
use blockfall::engine::Engine;
use blockfall::input::{map_key, should_quit};
use blockfall::logging;
use blockfall::term::{BellCues, SharedStats, TermSurface, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    if let Err(err) = logging::init_from_env() {
        eprintln!("blockfall: logging disabled: {err:#}");
    }

    let mut config = EngineConfig::from_env().unwrap_or_else(|err| {
        warn!("bad configuration, using defaults: {err}");
        EngineConfig::default()
    });
    if config.seed.is_none() {
        config.seed = Some(clock_seed());
    }
    info!("starting with {:?}", config);

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let stats = SharedStats::new();
    let surface = TermSurface::new(renderer, Viewport::new(w, h), stats.clone());
    let mut engine = Engine::new(config, Some(surface), stats, BellCues::default())?;

    let result = run(&mut engine);

    // Always try to restore terminal state.
    let _ = engine.surface_mut().renderer_mut().exit();
    result
}

fn run(engine: &mut Engine<TermSurface, SharedStats, BellCues>) -> Result<()> {
    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_millis() as u64;

    engine.start(now_ms())?;

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit");
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        engine.input(action, now_ms())?;
                    }
                }
                Event::Resize(w, h) => engine.surface_mut().resize(w, h),
                // Auto-repeat and releases are ignored; one press, one action.
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.frame(now_ms())?;
        }
    }
}

/// Seed from the wall clock when none is configured.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
