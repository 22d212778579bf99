//! Game state module - the single aggregate driving a game
//!
//! Ties the grid, the piece queue, the hold slot, scoring and timers
//! together. Commands from the input source go through [`GameState::apply`];
//! the host calls [`GameState::tick`] once per frame with the elapsed time.
//!
//! Game over is not a terminal state: lockout or a blocked spawn resets the
//! game on the spot and play continues with a fresh grid.

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::PieceQueue;
use crate::scoring::ScoreBoard;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::srs;
use crate::timing::Timing;
use crate::types::{Direction, GameCommand, GameConfig, PieceKind, RotateDirection, PREVIEW_LEN};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverReason {
    /// A piece locked with part of it above the top row.
    Lockout,
    /// A new piece could not enter the grid.
    SpawnBlocked,
}

/// What the active piece is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Falling,
    /// Resting on the floor or the stack; lock delay is counting.
    Grounded,
    Paused,
}

/// Notable outcome of the most recent command or tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum GameEvent {
    Spawned {
        kind: PieceKind,
    },
    Locked {
        kind: PieceKind,
        lines_cleared: u32,
        points: u32,
    },
    GameOver {
        reason: GameOverReason,
        final_score: u32,
        final_lines: u32,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    active: ActivePiece,
    held: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue,
    scoring: ScoreBoard,
    timing: Timing,
    paused: bool,
    last_event: Option<GameEvent>,
    game_over_count: u32,
}

impl GameState {
    /// Start a game with default timings. The first piece is already falling.
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let mut queue = PieceQueue::new(seed);
        let active = ActivePiece::spawn(queue.draw());

        Self {
            config,
            grid: Grid::new(),
            active,
            held: None,
            can_hold: true,
            queue,
            scoring: ScoreBoard::new(),
            timing: Timing::new(&config),
            paused: false,
            last_event: Some(GameEvent::Spawned { kind: active.kind }),
            game_over_count: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for building scenarios (tests, replays).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// The active piece dropped as far as it can go.
    pub fn ghost(&self) -> ActivePiece {
        ActivePiece {
            y: self.active.landing_y(&self.grid),
            ..self.active
        }
    }

    pub fn ghost_y(&self) -> i8 {
        self.active.landing_y(&self.grid)
    }

    pub fn preview(&self) -> ArrayVec<PieceKind, PREVIEW_LEN> {
        self.queue.preview()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_grounded(&self) -> bool {
        self.active.is_grounded(&self.grid)
    }

    pub fn phase(&self) -> Phase {
        if self.paused {
            Phase::Paused
        } else if self.is_grounded() {
            Phase::Grounded
        } else {
            Phase::Falling
        }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Number of game overs since construction.
    pub fn game_over_count(&self) -> u32 {
        self.game_over_count
    }

    pub fn seed(&self) -> u64 {
        self.queue.seed()
    }

    /// Take and clear the last recorded event.
    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    /// Put a fresh `kind` piece at the spawn position.
    ///
    /// The spawn row is checked, then the row below it; if either collides
    /// the game is over (and reset) and this returns false.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind);
        if piece.collides(&self.grid) || piece.shifted(0, 1).collides(&self.grid) {
            self.game_over(GameOverReason::SpawnBlocked);
            return false;
        }

        self.active = piece;
        self.can_hold = true;
        self.timing.reset_piece_timers();
        self.last_event = Some(GameEvent::Spawned { kind });
        debug!(kind = kind.as_str(), "spawned");
        true
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.draw();
        self.spawn(kind)
    }

    /// Shift one column. A successful move resets lock delay.
    pub fn move_horizontal(&mut self, dir: Direction) -> bool {
        let moved = self.active.shifted(dir.dx(), 0);
        if moved.collides(&self.grid) {
            return false;
        }
        self.active = moved;
        self.timing.reset_lock();
        true
    }

    /// Rotate with wall kicks. On failure nothing changes.
    pub fn rotate(&mut self, dir: RotateDirection) -> bool {
        match srs::try_rotate(&self.active, dir, &self.grid) {
            Some(rotated) => {
                self.active = rotated;
                self.timing.reset_lock();
                true
            }
            None => false,
        }
    }

    /// Move down one row if possible, restarting the gravity timer.
    pub fn soft_drop(&mut self) -> bool {
        let dropped = self.active.shifted(0, 1);
        if dropped.collides(&self.grid) {
            return false;
        }
        self.active = dropped;
        self.timing.reset_drop();
        self.timing.reset_lock();
        true
    }

    /// Drop straight to the landing row and lock. Returns rows fallen.
    pub fn hard_drop(&mut self) -> u8 {
        let landing = self.active.landing_y(&self.grid);
        let distance = (landing - self.active.y) as u8;
        self.active.y = landing;
        self.lock();
        distance
    }

    /// Swap the active piece with the hold slot, once per piece.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let current = self.active.kind;
        match self.held.replace(current) {
            None => {
                if !self.spawn_next() {
                    return true;
                }
            }
            Some(kind) => {
                let piece = ActivePiece::centered(kind);
                if piece.collides(&self.grid) {
                    self.game_over(GameOverReason::SpawnBlocked);
                    return true;
                }
                self.active = piece;
            }
        }

        self.can_hold = false;
        self.timing.reset_lock();
        debug!(held = current.as_str(), active = self.active.kind.as_str(), "hold");
        true
    }

    /// Merge the active piece, clear rows, score and spawn the next piece.
    pub fn lock(&mut self) {
        let piece = self.active;
        if piece.is_above_top() {
            self.game_over(GameOverReason::Lockout);
            return;
        }

        self.grid.merge(&piece.shape, piece.x, piece.y, piece.kind);
        let rows = self.grid.sweep_full_rows();
        let points = self.scoring.award(rows);
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "locked");
        if rows > 0 {
            info!(rows, points, score = self.scoring.score(), "rows cleared");
        }

        if self.spawn_next() {
            self.last_event = Some(GameEvent::Locked {
                kind: piece.kind,
                lines_cleared: rows as u32,
                points,
            });
        }
    }

    fn game_over(&mut self, reason: GameOverReason) {
        let final_score = self.scoring.score();
        let final_lines = self.scoring.lines();
        info!(?reason, final_score, final_lines, "game over");

        self.reset();
        self.game_over_count = self.game_over_count.saturating_add(1);
        self.last_event = Some(GameEvent::GameOver {
            reason,
            final_score,
            final_lines,
        });
    }

    /// Clear grid, score, hold, queue and timers, then spawn on the empty grid.
    ///
    /// Keys that are physically held stay held.
    fn reset(&mut self) {
        self.grid.reset();
        self.scoring.reset();
        self.held = None;
        self.can_hold = true;
        self.queue.clear();
        self.timing.reset_all();

        let piece = ActivePiece::spawn(self.queue.draw());
        debug_assert!(!piece.collides(&self.grid));
        self.active = piece;
        self.last_event = Some(GameEvent::Spawned { kind: piece.kind });
    }

    /// Start over and unpause.
    pub fn restart(&mut self) {
        info!(score = self.scoring.score(), "restart");
        self.reset();
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    fn press_shift(&mut self, dir: Direction) -> bool {
        if !self.timing.shift.press(dir) {
            return false;
        }
        self.move_horizontal(dir);
        true
    }

    fn release_shift(&mut self, dir: Direction) -> bool {
        if let Some(other) = self.timing.shift.release(dir) {
            self.move_horizontal(other);
        }
        true
    }

    /// Apply one input command. Returns whether it was acted on.
    ///
    /// While paused only pause and restart take effect; releases still
    /// update which keys are held but never move the piece.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        if self.paused && !command.allowed_while_paused() {
            match command {
                GameCommand::MoveLeftRelease => {
                    self.timing.shift.release(Direction::Left);
                }
                GameCommand::MoveRightRelease => {
                    self.timing.shift.release(Direction::Right);
                }
                GameCommand::SoftDropStop => {
                    self.timing.stop_soft_drop();
                }
                _ => {}
            }
            return false;
        }

        match command {
            GameCommand::MoveLeftPress => self.press_shift(Direction::Left),
            GameCommand::MoveRightPress => self.press_shift(Direction::Right),
            GameCommand::MoveLeftRelease => self.release_shift(Direction::Left),
            GameCommand::MoveRightRelease => self.release_shift(Direction::Right),
            GameCommand::SoftDropStart => {
                if !self.timing.start_soft_drop() {
                    return false;
                }
                self.soft_drop();
                true
            }
            GameCommand::SoftDropStop => self.timing.stop_soft_drop(),
            GameCommand::RotateCw => self.rotate(RotateDirection::Cw),
            GameCommand::RotateCcw => self.rotate(RotateDirection::Ccw),
            GameCommand::Hold => self.hold(),
            GameCommand::HardDrop => {
                self.hard_drop();
                true
            }
            GameCommand::TogglePause => {
                self.toggle_pause();
                true
            }
            GameCommand::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Advance the game by `elapsed_ms`.
    ///
    /// Order: auto-repeat, gravity, held soft drop, lock delay.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.paused {
            return;
        }

        if let Some((dir, steps)) = self.timing.shift.advance(elapsed_ms) {
            for _ in 0..steps {
                if !self.move_horizontal(dir) {
                    break;
                }
            }
        }

        if self.timing.gravity_due(elapsed_ms) {
            self.soft_drop();
        }

        for _ in 0..self.timing.soft_drop_steps(elapsed_ms) {
            if !self.soft_drop() {
                break;
            }
        }

        let grounded = self.is_grounded();
        if self.timing.lock_due(elapsed_ms, grounded) {
            self.lock();
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_code_grid(&mut out.board);
        out.active = Some(ActiveSnapshot::from(&self.active));
        out.ghost_y = Some(self.ghost_y());
        out.next_queue = self.queue.preview();
        out.hold = self.held;
        out.can_hold = self.can_hold;
        out.paused = self.paused;
        out.phase = self.phase();
        out.score = self.scoring.score();
        out.lines = self.scoring.lines();
        out.game_over_count = self.game_over_count;
        out.timers = TimersSnapshot {
            drop_ms: self.timing.drop_ms(),
            lock_ms: self.timing.lock_ms(),
            das_ms: self.timing.shift.das_ms(),
            arr_ms: self.timing.shift.arr_ms(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
