//! Shared types and constants for the blockfall workspace.
//!
//! Everything here is plain data: piece kinds, rotation states, the command
//! vocabulary raised by input sources, and the tunable [`GameConfig`].
//!
//! # Playfield
//!
//! - **Width**: 10 columns (x = 0..9, left to right)
//! - **Height**: 20 rows (y = 0..19, top to bottom)
//! - **Spawn position**: (3, -1), one row above the visible top
//!
//! # Timing defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 1000 | Gravity step interval |
//! | `LOCK_DELAY_MS` | 1000 | Grounded time before a piece locks |
//! | `DAS_MS` | 200 | Delay before horizontal auto-repeat starts |
//! | `ARR_MS` | 33 | Interval between auto-repeat steps |
//! | `SOFT_DROP_INTERVAL_MS` | 16 | Held soft-drop step interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameCommand, PieceKind, Rotation, RotateDirection};
//!
//! assert_eq!(PieceKind::T.as_str(), "T");
//! assert_eq!(Rotation::North.rotate(RotateDirection::Ccw), Rotation::West);
//! assert!(GameCommand::Restart.allowed_while_paused());
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column for every piece kind.
pub const SPAWN_X: i8 = 3;

/// Spawn row. Negative rows sit above the visible grid.
pub const SPAWN_Y: i8 = -1;

/// Gravity interval (1000ms = 1 second per row)
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Grounded time before the active piece is forced to lock.
pub const LOCK_DELAY_MS: u32 = 1000;

/// DAS (Delayed Auto Shift) in milliseconds.
pub const DAS_MS: u32 = 200;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const ARR_MS: u32 = 33;

/// Held soft-drop step interval, roughly one row per 60 Hz frame.
pub const SOFT_DROP_INTERVAL_MS: u32 = 16;

/// Number of kinds in one randomizer bag.
pub const BAG_SIZE: usize = 7;

/// The queue is topped up with a fresh bag while it holds this many or fewer.
pub const BAG_LOOKAHEAD: usize = 7;

/// Number of upcoming pieces exposed to renderers.
pub const PREVIEW_LEN: usize = 5;

/// Points for clearing 0..=4 rows with a single lock.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in the order a fresh bag is filled before shuffling.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::T => Rgb::new(0x80, 0x00, 0x80),
            PieceKind::I => Rgb::new(0x00, 0xff, 0xff),
            PieceKind::S => Rgb::new(0x00, 0xff, 0x00),
            PieceKind::Z => Rgb::new(0xff, 0x00, 0x00),
            PieceKind::L => Rgb::new(0xff, 0xa5, 0x00),
            PieceKind::J => Rgb::new(0x00, 0x00, 0xff),
            PieceKind::O => Rgb::new(0xff, 0xff, 0x00),
        }
    }

    /// Compact cell code used by snapshots: 1..=7, with 0 meaning empty.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]. Returns `None` for 0 and unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// A grid cell: `None` is empty, `Some(kind)` is occupied by a locked mino.
pub type Cell = Option<PieceKind>;

/// Rotation direction requested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    Cw,
    Ccw,
}

/// Horizontal shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Rotation states
///
/// - **North**: spawn orientation (state 0)
/// - **East**: 90° clockwise (state 1)
/// - **South**: 180° (state 2)
/// - **West**: 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Integer rotation state in 0..=3.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Returns `None` for states outside 0..=3.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    /// Rotate one step in `dir`, wrapping around.
    ///
    /// ```
    /// use blockfall_types::{Rotation, RotateDirection};
    ///
    /// assert_eq!(Rotation::West.rotate(RotateDirection::Cw), Rotation::North);
    /// assert_eq!(Rotation::North.rotate(RotateDirection::Ccw), Rotation::West);
    /// ```
    pub fn rotate(&self, dir: RotateDirection) -> Self {
        match dir {
            RotateDirection::Cw => self.rotate_cw(),
            RotateDirection::Ccw => self.rotate_ccw(),
        }
    }

    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Discrete commands raised by an input source.
///
/// Horizontal movement and soft drop come as press/release pairs because
/// releases drive auto-repeat. Everything else is a one-shot action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameCommand {
    MoveLeftPress,
    MoveLeftRelease,
    MoveRightPress,
    MoveRightRelease,
    SoftDropStart,
    SoftDropStop,
    RotateCw,
    RotateCcw,
    Hold,
    HardDrop,
    TogglePause,
    Restart,
}

impl GameCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeftPress => "moveLeftPress",
            GameCommand::MoveLeftRelease => "moveLeftRelease",
            GameCommand::MoveRightPress => "moveRightPress",
            GameCommand::MoveRightRelease => "moveRightRelease",
            GameCommand::SoftDropStart => "softDropStart",
            GameCommand::SoftDropStop => "softDropStop",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
            GameCommand::Hold => "hold",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Restart => "restart",
        }
    }

    /// True for commands that are still honored while the game is paused.
    pub fn allowed_while_paused(&self) -> bool {
        matches!(self, GameCommand::TogglePause | GameCommand::Restart)
    }
}

/// Tunable timings. Missing fields fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub drop_interval_ms: u32,
    pub lock_delay_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub soft_drop_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            drop_interval_ms: DROP_INTERVAL_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            das_ms: DAS_MS,
            arr_ms: ARR_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
        }
    }
}
