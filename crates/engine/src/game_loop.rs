//! Frame-driven game loop
//!
//! The host calls [`Engine::frame`] once per animation frame with a
//! monotonic timestamp. The engine turns consecutive timestamps into an
//! elapsed delta, advances the [`GameState`] by it, forwards queued events
//! to the sinks and draws the frame.
//!
//! Pausing stops the game clock. Resuming re-baselines the last-frame
//! timestamp to the resume time, so the time spent paused never reaches
//! the game as one huge delta.

use log::{debug, info};

use blockfall_core::{EngineConfig, GameEvent, GameSnapshot, GameState};
use blockfall_types::GameAction;

use crate::error::EngineError;
use crate::hooks::{CueSink, RenderSurface, StatsSink};

pub struct Engine<R, S, C> {
    state: GameState,
    surface: R,
    stats: S,
    cues: C,
    snapshot: GameSnapshot,
    /// Timestamp of the last frame that advanced the clock.
    last_frame_ms: Option<u64>,
}

impl<R, S, C> Engine<R, S, C>
where
    R: RenderSurface,
    S: StatsSink,
    C: CueSink,
{
    /// Build an engine. Fails without a surface; no game state is created then.
    pub fn new(
        config: EngineConfig,
        surface: Option<R>,
        stats: S,
        cues: C,
    ) -> Result<Self, EngineError> {
        let surface = surface.ok_or(EngineError::MissingSurface)?;
        Ok(Self {
            state: GameState::new(config),
            surface,
            stats,
            cues,
            snapshot: GameSnapshot::default(),
            last_frame_ms: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access, for hosts that set up positions before playing.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn stats_sink(&self) -> &S {
        &self.stats
    }

    pub fn cue_sink(&self) -> &C {
        &self.cues
    }

    /// Last snapshot handed to the surface.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Start a game (or throw the running one away and start over).
    pub fn start(&mut self, now_ms: u64) -> Result<(), EngineError> {
        if self.state.started() {
            self.state.restart();
        } else {
            self.state.start();
            info!("game started");
        }
        self.last_frame_ms = Some(now_ms);
        self.dispatch_events();
        self.render()
    }

    pub fn restart(&mut self, now_ms: u64) -> Result<(), EngineError> {
        self.start(now_ms)
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        if self.state.pause() {
            self.render()?;
        }
        Ok(())
    }

    pub fn resume(&mut self, now_ms: u64) -> Result<(), EngineError> {
        if self.state.resume() {
            self.last_frame_ms = Some(now_ms);
            self.render()?;
        }
        Ok(())
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> Result<(), EngineError> {
        if self.state.paused() {
            self.resume(now_ms)
        } else {
            self.pause()
        }
    }

    /// Apply one input action. Ignored inputs draw nothing.
    pub fn input(&mut self, action: GameAction, now_ms: u64) -> Result<(), EngineError> {
        match action {
            GameAction::Pause => return self.toggle_pause(now_ms),
            GameAction::Restart => return self.restart(now_ms),
            _ => {}
        }

        if !self.state.apply_action(action) {
            return Ok(());
        }
        debug!("action {}", action.as_str());
        self.dispatch_events();
        self.render()
    }

    /// Advance by the time since the previous frame and draw.
    pub fn frame(&mut self, now_ms: u64) -> Result<(), EngineError> {
        if self.state.is_running() {
            let last = self.last_frame_ms.unwrap_or(now_ms);
            let elapsed = now_ms.saturating_sub(last);
            self.last_frame_ms = Some(now_ms);
            self.state
                .tick(u32::try_from(elapsed).unwrap_or(u32::MAX));
            self.dispatch_events();
        }
        self.render()
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Cue(cue) => self.cues.play(cue),
                GameEvent::StatsChanged(stats) => self.stats.update(stats),
                GameEvent::PaletteShift { hue } => self.surface.shift_palette(hue),
                GameEvent::LevelUp { .. } => {}
            }
        }
    }

    fn render(&mut self) -> Result<(), EngineError> {
        self.state.snapshot_into(&mut self.snapshot);
        self.surface.draw_board(&self.snapshot);
        self.surface.draw_next_preview(&self.snapshot);
        self.surface.draw_hold_preview(&self.snapshot);
        self.surface.present()?;
        Ok(())
    }
}
