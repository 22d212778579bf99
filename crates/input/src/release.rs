//! Release emulation for terminals that never report key releases.
//!
//! Without the keyboard enhancement protocol a held key shows up as a stream
//! of presses from the OS auto-repeat, and no release ever arrives. The
//! emulator remembers when each held key was last seen and synthesizes the
//! matching release once it has been quiet for longer than the timeout.
//!
//! One-shot actions (rotate, hold, hard drop, pause, restart) are latched the
//! same way: repeats of a latched action are swallowed until the key has been
//! quiet for the timeout, so holding a key fires its action once.

use arrayvec::ArrayVec;

use crate::types::GameCommand;

/// A single tap longer than this without a repeat counts as released.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

const SLOTS: usize = 3;

/// Index of the held-state slot a command touches, and whether it presses.
fn slot_of(command: GameCommand) -> Option<(usize, bool)> {
    match command {
        GameCommand::MoveLeftPress => Some((0, true)),
        GameCommand::MoveLeftRelease => Some((0, false)),
        GameCommand::MoveRightPress => Some((1, true)),
        GameCommand::MoveRightRelease => Some((1, false)),
        GameCommand::SoftDropStart => Some((2, true)),
        GameCommand::SoftDropStop => Some((2, false)),
        _ => None,
    }
}

const RELEASES: [GameCommand; SLOTS] = [
    GameCommand::MoveLeftRelease,
    GameCommand::MoveRightRelease,
    GameCommand::SoftDropStop,
];

const ONE_SHOTS: usize = 6;

fn latch_of(command: GameCommand) -> Option<usize> {
    match command {
        GameCommand::RotateCw => Some(0),
        GameCommand::RotateCcw => Some(1),
        GameCommand::Hold => Some(2),
        GameCommand::HardDrop => Some(3),
        GameCommand::TogglePause => Some(4),
        GameCommand::Restart => Some(5),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEmulator {
    timeout_ms: u32,
    /// Milliseconds since each held key was last pressed.
    quiet_ms: [Option<u32>; SLOTS],
    /// Same, for one-shot actions still considered held down.
    latched_ms: [Option<u32>; ONE_SHOTS],
}

impl ReleaseEmulator {
    pub fn new() -> Self {
        Self::with_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            quiet_ms: [None; SLOTS],
            latched_ms: [None; ONE_SHOTS],
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Feed every mapped command through here before it goes to the game.
    ///
    /// Returns false when the command is an auto-repeat of a one-shot action
    /// that is still latched and must be dropped.
    pub fn observe(&mut self, command: GameCommand) -> bool {
        if let Some((slot, pressed)) = slot_of(command) {
            self.quiet_ms[slot] = pressed.then_some(0);
            return true;
        }
        match latch_of(command) {
            Some(latch) => self.latched_ms[latch].replace(0).is_none(),
            None => true,
        }
    }

    pub fn is_held(&self, command: GameCommand) -> bool {
        if let Some((slot, _)) = slot_of(command) {
            return self.quiet_ms[slot].is_some();
        }
        latch_of(command).is_some_and(|latch| self.latched_ms[latch].is_some())
    }

    /// Advance the quiet timers and return releases that are now due.
    ///
    /// Latched one-shot actions unlatch silently; they have no release command.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameCommand, SLOTS> {
        let mut releases = ArrayVec::new();
        for (slot, quiet) in self.quiet_ms.iter_mut().enumerate() {
            if advance(quiet, elapsed_ms, self.timeout_ms) {
                releases.push(RELEASES[slot]);
            }
        }
        for latched in self.latched_ms.iter_mut() {
            advance(latched, elapsed_ms, self.timeout_ms);
        }
        releases
    }
}

/// Add `elapsed_ms` to a running quiet timer. True when it just expired.
fn advance(quiet: &mut Option<u32>, elapsed_ms: u32, timeout_ms: u32) -> bool {
    let Some(ms) = *quiet else {
        return false;
    };
    let ms = ms.saturating_add(elapsed_ms);
    if ms > timeout_ms {
        *quiet = None;
        true
    } else {
        *quiet = Some(ms);
        false
    }
}

impl Default for ReleaseEmulator {
    fn default() -> Self {
        Self::new()
    }
}
