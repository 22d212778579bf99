//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to run a game of blockfall without a screen or a
//! keyboard. No I/O happens here; the host feeds commands and elapsed time,
//! and reads back a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`catalog`]: shape matrices and colors for the seven kinds
//! - [`grid`]: 10x20 playfield with collision, merge and row sweep
//! - [`rng`]: 7-bag randomizer feeding a lookahead queue
//! - [`piece`]: the active piece and its placement queries
//! - [`srs`]: wall kick tables and rotation resolution
//! - [`timing`]: gravity, DAS/ARR, held soft drop and lock delay
//! - [`scoring`]: line clear points and running totals
//! - [`game_state`]: the aggregate tying it all together
//! - [`snapshot`]: read model for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every 7 draws contain each kind exactly once
//! - **SRS Rotation**: five kick candidates per transition, O never rotates
//! - **Lock Delay**: 1000ms grounded before a piece locks; a successful
//!   move or rotation restarts the countdown
//! - **Hold**: one swap per piece
//! - **Scoring**: 100 / 300 / 500 / 800 for 1 to 4 rows, nothing else
//! - **Game Over**: lockout or a blocked spawn resets into a fresh game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameCommand;
//!
//! let mut game = GameState::new(12345);
//! game.apply(GameCommand::MoveRightPress);
//! game.apply(GameCommand::MoveRightRelease);
//! game.apply(GameCommand::HardDrop);
//! game.tick(16);
//!
//! assert_eq!(game.grid().filled_count(), 4);
//! ```

pub mod catalog;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod srs;
pub mod timing;

pub use blockfall_types as types;

pub use catalog::{get_shape, piece_def, Shape};
pub use game_state::{GameEvent, GameOverReason, GameState, Phase};
pub use grid::Grid;
pub use piece::ActivePiece;
pub use rng::PieceQueue;
pub use scoring::{line_clear_points, ScoreBoard};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
pub use srs::try_rotate;
pub use timing::{AutoShift, Timing};
