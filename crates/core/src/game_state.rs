//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, bag, line
//! clears, the stow slot and scoring. It owns the game clock, which only
//! moves when [`GameState::tick`] is called while the game is running, so
//! pausing freezes every deadline at once.
//!
//! Transitions that the host cares about (cues, stats, palette shifts) are
//! queued as [`GameEvent`]s and drained with [`GameState::drain_events`].

use log::{debug, info};

use crate::board::Board;
use crate::collision::{compute_ghost, is_colliding};
use crate::config::EngineConfig;
use crate::events::{GameEvent, Stats};
use crate::line_clear::{ClearAnimation, FlashStep, PendingScore};
use crate::piece::Piece;
use crate::rng::{PieceBag, SimpleRng};
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_points};
use crate::snapshot::{FlashSnapshot, GameSnapshot};
use crate::stow::{StowSlot, StowTransition};
use crate::types::{Cue, GameAction, PieceKind, BOARD_HEIGHT, START_LEVEL};

/// Seed used when the config does not name one.
const DEFAULT_SEED: u32 = 1;

/// Mixed into the seed so palette shifts do not mirror bag draws.
const PALETTE_SEED_SALT: u32 = 0x9E37_79B9;

/// Smallest and spread of a palette hue step, in degrees.
const HUE_STEP_MIN: u32 = 30;
const HUE_STEP_SPREAD: u32 = 90;
const HUE_MAX: u32 = 360;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    bag: PieceBag,
    current: Option<Piece>,
    next: Option<PieceKind>,
    /// Kind displaced from the next slot by an unstow; dealt before the bag.
    queued: Option<PieceKind>,
    stow: StowSlot,
    clear: Option<ClearAnimation>,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Game time in milliseconds; frozen while paused.
    clock_ms: u64,
    /// Game time of the next gravity step.
    drop_deadline: u64,
    started: bool,
    paused: bool,
    game_over: bool,
    hue: u16,
    lines_since_shift: u32,
    palette_rng: SimpleRng,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game from a config. Nothing spawns until [`GameState::start`].
    pub fn new(config: EngineConfig) -> Self {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Self {
            board: Board::new(),
            bag: PieceBag::new(seed),
            current: None,
            next: None,
            queued: None,
            stow: StowSlot::new(config.stow_lock_ms),
            clear: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            drop_interval_ms: drop_interval_ms(START_LEVEL),
            clock_ms: 0,
            drop_deadline: 0,
            started: false,
            paused: false,
            game_over: false,
            hue: 0,
            lines_since_shift: 0,
            palette_rng: SimpleRng::new(seed ^ PALETTE_SEED_SALT),
            events: Vec::new(),
            config,
        }
    }

    /// Default config with a fixed seed.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(EngineConfig::default().with_seed(seed))
    }

    /// Start the game and spawn the first piece. No-op once started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.reset_run();
        self.started = true;
        self.spawn_initial();
        true
    }

    /// Throw the current run away and start a fresh one.
    ///
    /// The bag keeps its RNG state, so a restart deals a new sequence. The
    /// palette hue is kept.
    pub fn restart(&mut self) {
        info!(
            "restart (score={}, level={}, lines={})",
            self.score, self.level, self.lines
        );
        self.reset_run();
        self.started = true;
        self.spawn_initial();
    }

    fn reset_run(&mut self) {
        self.board.clear();
        self.bag.reset();
        self.current = None;
        self.next = None;
        self.queued = None;
        self.stow.reset();
        self.clear = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.drop_interval_ms = drop_interval_ms(START_LEVEL);
        self.clock_ms = 0;
        self.drop_deadline = 0;
        self.paused = false;
        self.game_over = false;
        self.lines_since_shift = 0;
    }

    fn deal(&mut self) -> PieceKind {
        match self.queued.take() {
            Some(kind) => kind,
            None => self.bag.draw(),
        }
    }

    fn spawn_initial(&mut self) {
        self.current = Some(Piece::spawn(self.deal()));
        self.next = Some(self.deal());
        self.reset_drop_deadline();
        self.events.push(GameEvent::StatsChanged(self.stats()));
        self.check_spawn();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Started, not paused and not over.
    pub fn is_running(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Whether full rows are blinking before collapse.
    fn accepts_input(&self) -> bool {
        self.is_running() && !self.is_flashing()
    }

    pub fn is_flashing(&self) -> bool {
        self.clear.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn stats(&self) -> Stats {
        Stats {
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.stow.held()
    }

    pub fn stow_locked(&self) -> bool {
        self.stow.is_locked(self.clock_ms)
    }

    pub fn clear_animation(&self) -> Option<&ClearAnimation> {
        self.clear.as_ref()
    }

    pub fn bag(&self) -> &PieceBag {
        &self.bag
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for setting up puzzles and test positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece with a fresh `kind` at the spawn position.
    pub fn set_current(&mut self, kind: PieceKind) {
        self.current = Some(Piece::spawn(kind));
    }

    /// Replace the queued piece.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = Some(kind);
    }

    /// Freeze the game clock. Returns false if there was nothing to pause.
    pub fn pause(&mut self) -> bool {
        if !self.started || self.game_over || self.paused {
            return false;
        }
        self.paused = true;
        debug!("paused at {}ms", self.clock_ms);
        true
    }

    /// Unfreeze the clock; gravity restarts a full interval from now.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.reset_drop_deadline();
        debug!("resumed at {}ms", self.clock_ms);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Apply a game action
    ///
    /// Gameplay actions are ignored unless the game is running and no rows
    /// are flashing. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => return self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                return true;
            }
            _ => {}
        }

        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Stow => self.stow(),
            GameAction::Pause | GameAction::Restart => false,
        }
    }

    /// Shift the falling piece one column.
    pub fn move_piece(&mut self, dx: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let board = &self.board;
        match self.current.as_mut() {
            Some(piece) => piece.try_move(board, dx, 0),
            None => false,
        }
    }

    pub fn rotate(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let board = &self.board;
        let policy = self.config.rotation;
        let rotated = match self.current.as_mut() {
            Some(piece) => piece.try_rotate(board, policy),
            None => false,
        };
        if rotated {
            self.events.push(GameEvent::Cue(Cue::Rotate));
        }
        rotated
    }

    /// Move down one row. A blocked soft drop does nothing; only gravity locks.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let board = &self.board;
        let moved = match self.current.as_mut() {
            Some(piece) => piece.try_move(board, 0, 1),
            None => false,
        };
        if moved {
            self.events.push(GameEvent::Cue(Cue::Drop));
        }
        moved
    }

    /// Drop to the ghost position and lock.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        self.current = Some(compute_ghost(&piece, &self.board));
        self.events.push(GameEvent::Cue(Cue::Drop));
        self.lock_current();
        true
    }

    /// Stow the falling piece or bring the stowed one back as the next piece.
    pub fn stow(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let (Some(piece), Some(next)) = (self.current, self.next) else {
            return false;
        };

        match self.stow.request(piece.kind, self.clock_ms) {
            StowTransition::Stow => {
                debug!("stow {:?}, promote {:?}", piece.kind, next);
                self.current = Some(Piece::spawn(next));
                self.next = Some(self.deal());
                self.reset_drop_deadline();
                self.events.push(GameEvent::Cue(Cue::Stow));
                self.check_spawn();
                true
            }
            StowTransition::Unstow(held) => {
                debug!("unstow {:?}, queue {:?}", held, next);
                self.queued = Some(next);
                self.next = Some(held);
                self.events.push(GameEvent::Cue(Cue::Unstow));
                true
            }
            StowTransition::Rejected => false,
        }
    }

    /// Write the falling piece into the board and bring in the next one.
    ///
    /// Full rows start the flash animation. The spawn check waits for the
    /// clear to finish when one was started.
    pub fn lock_current(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };

        let written = self.board.lock_piece(&piece);
        debug!(
            "lock {:?} at ({}, {}), {} cells",
            piece.kind, piece.x, piece.y, written
        );
        self.events.push(GameEvent::Cue(Cue::PieceLand));

        self.detect_lines();

        if let Some(next) = self.next {
            self.current = Some(Piece::spawn(next));
        }
        self.next = Some(self.deal());
        self.reset_drop_deadline();

        if self.clear.is_none() {
            self.check_spawn();
        }
    }

    fn detect_lines(&mut self) {
        let rows = self.board.full_rows();
        if rows.is_empty() {
            return;
        }

        let count = rows.len();
        let pending = PendingScore {
            points: line_clear_points(count, self.level),
            lines: count as u32,
        };
        debug!(
            "clearing rows {:?} for {} points",
            rows.as_slice(),
            pending.points
        );
        self.clear = Some(ClearAnimation::start(rows, pending, self.clock_ms));
        self.events.push(GameEvent::Cue(Cue::LineClear));

        let threshold = self.config.palette_shift_lines;
        if threshold == 0 {
            return;
        }
        self.lines_since_shift += count as u32;
        while self.lines_since_shift >= threshold {
            self.lines_since_shift -= threshold;
            self.shift_hue();
        }
    }

    fn shift_hue(&mut self) {
        let step = HUE_STEP_MIN + self.palette_rng.next_range(HUE_STEP_SPREAD);
        self.hue = ((u32::from(self.hue) + step) % HUE_MAX) as u16;
        self.events.push(GameEvent::PaletteShift { hue: self.hue });
    }

    /// Enter game over if the falling piece overlaps the stack.
    ///
    /// Returns true when the game is (now) over.
    fn check_spawn(&mut self) -> bool {
        if self.game_over {
            return true;
        }
        let blocked = self
            .current
            .map_or(false, |piece| is_colliding(&piece, &self.board));
        if blocked {
            self.game_over = true;
            info!(
                "game over (score={}, level={}, lines={})",
                self.score, self.level, self.lines
            );
            self.events.push(GameEvent::Cue(Cue::GameOver));
        }
        blocked
    }

    /// Collapse flashed rows and commit the pending score.
    fn finalize_clear(&mut self) {
        let Some(anim) = self.clear.take() else {
            return;
        };

        self.board.remove_rows(anim.rows());
        let pending = anim.pending();
        self.score = self.score.saturating_add(pending.points);
        self.lines += pending.lines;

        let new_level = level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = drop_interval_ms(new_level);
            info!(
                "level {} reached, drop interval {}ms",
                new_level, self.drop_interval_ms
            );
            self.events.push(GameEvent::LevelUp { level: new_level });
        }
        self.events.push(GameEvent::StatsChanged(self.stats()));

        self.reset_drop_deadline();
        self.check_spawn();
    }

    /// Advance the game clock by `elapsed_ms`.
    ///
    /// While rows are flashing only the animation moves. Otherwise gravity
    /// moves the piece down one row once its deadline has passed, locking it
    /// when it cannot move. Returns true when something visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.clock_ms += u64::from(elapsed_ms);

        if let Some(anim) = self.clear.as_mut() {
            let before = anim.toggles();
            let step = anim.advance(self.clock_ms);
            let toggled = anim.toggles() != before;
            if step == FlashStep::Finished {
                self.finalize_clear();
                return true;
            }
            return toggled;
        }

        // The step is due on the deadline itself, not one tick after it.
        if self.clock_ms < self.drop_deadline {
            return false;
        }

        let board = &self.board;
        let moved = match self.current.as_mut() {
            Some(piece) => piece.try_move(board, 0, 1),
            None => false,
        };
        if moved {
            self.reset_drop_deadline();
        } else {
            self.lock_current();
        }
        true
    }

    fn reset_drop_deadline(&mut self) {
        self.drop_deadline = self.clock_ms + u64::from(self.drop_interval_ms);
    }

    /// Landing position of the falling piece.
    pub fn ghost(&self) -> Option<Piece> {
        self.current
            .map(|piece| compute_ghost(&piece, &self.board))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.current;
        out.ghost = if self.game_over { None } else { self.ghost() };
        out.next = self.next;
        out.held = self.stow.held();
        out.flash = self.clear.as_ref().map(|anim| {
            let mut rows = [false; BOARD_HEIGHT as usize];
            for &y in anim.rows() {
                rows[y] = true;
            }
            FlashSnapshot {
                rows,
                highlight: anim.highlight_on(),
            }
        });
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.stow_lock_remaining_ms = self.stow.lock_remaining_ms(self.clock_ms);
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.hue = self.hue;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Drain queued events in the order they happened.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
