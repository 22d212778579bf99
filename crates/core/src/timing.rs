//! Timing controller - delta-driven gravity, auto-repeat and lock delay
//!
//! Nothing here counts frames. Every timer accumulates the milliseconds the
//! host passes to `tick`, so behavior holds under any frame rate.

use crate::types::{Direction, GameConfig, BOARD_HEIGHT, BOARD_WIDTH};

/// Horizontal auto-repeat (DAS/ARR) state.
///
/// Tracks both direction keys because releasing one while the other is
/// still down hands movement over to the remaining key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoShift {
    left_held: bool,
    right_held: bool,
    active: Option<Direction>,
    das_ms: u32,
    arr_ms: u32,
    das_delay: u32,
    arr_rate: u32,
}

impl AutoShift {
    pub fn new(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            left_held: false,
            right_held: false,
            active: None,
            das_ms: 0,
            arr_ms: 0,
            das_delay,
            arr_rate,
        }
    }

    fn held_mut(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Left => &mut self.left_held,
            Direction::Right => &mut self.right_held,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left_held,
            Direction::Right => self.right_held,
        }
    }

    /// Direction currently auto-repeating, if any.
    pub fn direction(&self) -> Option<Direction> {
        self.active
    }

    pub fn das_ms(&self) -> u32 {
        self.das_ms
    }

    pub fn arr_ms(&self) -> u32 {
        self.arr_ms
    }

    fn restart(&mut self, dir: Option<Direction>) {
        self.active = dir;
        self.das_ms = 0;
        self.arr_ms = 0;
    }

    /// Key went down. Returns true if the piece should move once right now;
    /// a press for a key that is already held is ignored.
    pub fn press(&mut self, dir: Direction) -> bool {
        if self.is_held(dir) {
            return false;
        }
        *self.held_mut(dir) = true;
        self.restart(Some(dir));
        true
    }

    /// Key went up. Returns the direction to move once right now when the
    /// opposite key is still held and takes over.
    pub fn release(&mut self, dir: Direction) -> Option<Direction> {
        if !self.is_held(dir) {
            return None;
        }
        *self.held_mut(dir) = false;

        let other = dir.opposite();
        if self.is_held(other) {
            self.restart(Some(other));
            Some(other)
        } else {
            self.restart(None);
            None
        }
    }

    /// Advance by `elapsed_ms`. Returns how many auto-repeat steps are due.
    ///
    /// Only the time past the DAS threshold feeds the ARR accumulator.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<(Direction, u32)> {
        let dir = self.active?;

        let prev_das = self.das_ms;
        self.das_ms = self.das_ms.saturating_add(elapsed_ms);
        if self.das_ms < self.das_delay {
            self.arr_ms = 0;
            return None;
        }

        let excess = if prev_das < self.das_delay {
            self.das_ms - self.das_delay
        } else {
            elapsed_ms
        };
        self.arr_ms = self.arr_ms.saturating_add(excess);

        if self.arr_rate == 0 {
            self.arr_ms = 0;
            return Some((dir, BOARD_WIDTH as u32));
        }
        if self.arr_ms < self.arr_rate {
            return None;
        }
        let steps = self.arr_ms / self.arr_rate;
        self.arr_ms %= self.arr_rate;
        Some((dir, steps))
    }

    /// Zero the timers but keep which keys are held.
    pub fn reset_timers(&mut self) {
        self.das_ms = 0;
        self.arr_ms = 0;
    }
}

/// All per-piece timers plus the held-key repeaters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    drop_interval: u32,
    lock_delay: u32,
    soft_drop_interval: u32,
    drop_ms: u32,
    lock_ms: u32,
    soft_drop_held: bool,
    soft_drop_ms: u32,
    pub shift: AutoShift,
}

impl Timing {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            drop_interval: config.drop_interval_ms,
            lock_delay: config.lock_delay_ms,
            soft_drop_interval: config.soft_drop_interval_ms,
            drop_ms: 0,
            lock_ms: 0,
            soft_drop_held: false,
            soft_drop_ms: 0,
            shift: AutoShift::new(config.das_ms, config.arr_ms),
        }
    }

    pub fn drop_ms(&self) -> u32 {
        self.drop_ms
    }

    pub fn lock_ms(&self) -> u32 {
        self.lock_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn reset_drop(&mut self) {
        self.drop_ms = 0;
    }

    pub fn reset_lock(&mut self) {
        self.lock_ms = 0;
    }

    /// Accumulate gravity time. True when a gravity step is due; the
    /// accumulator restarts from zero in that case.
    pub fn gravity_due(&mut self, elapsed_ms: u32) -> bool {
        self.drop_ms = self.drop_ms.saturating_add(elapsed_ms);
        if self.drop_ms > self.drop_interval {
            self.drop_ms = 0;
            return true;
        }
        false
    }

    /// Accumulate (or clear) lock delay. True when the piece must lock.
    pub fn lock_due(&mut self, elapsed_ms: u32, grounded: bool) -> bool {
        if !grounded {
            self.lock_ms = 0;
            return false;
        }
        self.lock_ms = self.lock_ms.saturating_add(elapsed_ms);
        self.lock_ms >= self.lock_delay
    }

    /// Returns true if this press starts a soft drop (not a repeat).
    pub fn start_soft_drop(&mut self) -> bool {
        if self.soft_drop_held {
            return false;
        }
        self.soft_drop_held = true;
        self.soft_drop_ms = 0;
        true
    }

    pub fn stop_soft_drop(&mut self) -> bool {
        let was_held = self.soft_drop_held;
        self.soft_drop_held = false;
        self.soft_drop_ms = 0;
        was_held
    }

    /// Held soft-drop steps due after `elapsed_ms`, at most one grid height.
    pub fn soft_drop_steps(&mut self, elapsed_ms: u32) -> u32 {
        if !self.soft_drop_held {
            return 0;
        }
        if self.soft_drop_interval == 0 {
            return BOARD_HEIGHT as u32;
        }
        self.soft_drop_ms = self.soft_drop_ms.saturating_add(elapsed_ms);
        let steps = self.soft_drop_ms / self.soft_drop_interval;
        self.soft_drop_ms %= self.soft_drop_interval;
        steps.min(BOARD_HEIGHT as u32)
    }

    /// Timers restart for a fresh piece: gravity and lock delay.
    pub fn reset_piece_timers(&mut self) {
        self.drop_ms = 0;
        self.lock_ms = 0;
    }

    /// Everything back to zero, held keys included in the accounting but
    /// still considered held.
    pub fn reset_all(&mut self) {
        self.reset_piece_timers();
        self.soft_drop_ms = 0;
        self.shift.reset_timers();
    }
}
