//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a physical key does, independent of press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Left,
    Right,
    SoftDrop,
    /// One-shot command fired on press only.
    Action(GameCommand),
}

/// Look up the binding for a key code.
pub fn binding(code: KeyCode) -> Option<Binding> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Binding::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Binding::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Binding::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Binding::Action(GameCommand::RotateCw)),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(Binding::Action(GameCommand::RotateCcw))
        }

        // Actions
        KeyCode::Char(' ') => Some(Binding::Action(GameCommand::HardDrop)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Binding::Action(GameCommand::Hold)),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => {
            Some(Binding::Action(GameCommand::TogglePause))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Binding::Action(GameCommand::Restart)),

        _ => None,
    }
}

/// Map a key event to a game command.
///
/// Repeat events are dropped: held movement and soft drop are driven by the
/// game's own timers, and one-shot actions must not re-trigger.
pub fn map_key_event(key: KeyEvent) -> Option<GameCommand> {
    let binding = binding(key.code)?;
    match key.kind {
        KeyEventKind::Repeat => None,
        KeyEventKind::Press => Some(match binding {
            Binding::Left => GameCommand::MoveLeftPress,
            Binding::Right => GameCommand::MoveRightPress,
            Binding::SoftDrop => GameCommand::SoftDropStart,
            Binding::Action(command) => command,
        }),
        KeyEventKind::Release => match binding {
            Binding::Left => Some(GameCommand::MoveLeftRelease),
            Binding::Right => Some(GameCommand::MoveRightRelease),
            Binding::SoftDrop => Some(GameCommand::SoftDropStop),
            Binding::Action(_) => None,
        },
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
