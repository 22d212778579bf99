//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]s and
//! emulates key releases for terminals that cannot report them. Auto-repeat
//! timing itself lives in the core; this crate only reports what the keys
//! are doing.

pub mod map;
pub mod release;

pub use blockfall_types as types;

pub use map::{binding, map_key_event, should_quit, Binding};
pub use release::{ReleaseEmulator, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
