//! Input processing for the terminal client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events. The mapping is modal: overworld keys
//! move the player, battle keys drive whichever menu holds focus.

use battle_core::MenuCommand;
use crossterm::event::{KeyCode, KeyEvent};

use crate::world::Direction;

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Walk the overworld player.
    Walk(Direction),
    /// Drive the focused battle menu.
    Menu(MenuCommand),
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into app commands, per mode.
pub struct InputHandler;

impl InputHandler {
    /// Key handling while walking the overworld.
    pub fn handle_world_key(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'h' | 'a' => KeyAction::Walk(Direction::West),
                'j' | 's' => KeyAction::Walk(Direction::South),
                'k' | 'w' => KeyAction::Walk(Direction::North),
                'l' | 'd' => KeyAction::Walk(Direction::East),
                _ => KeyAction::None,
            },
            KeyCode::Left => KeyAction::Walk(Direction::West),
            KeyCode::Right => KeyAction::Walk(Direction::East),
            KeyCode::Up => KeyAction::Walk(Direction::North),
            KeyCode::Down => KeyAction::Walk(Direction::South),
            _ => KeyAction::None,
        }
    }

    /// Key handling while a battle screen is up. Only Up/Down and the
    /// confirm keys reach the menus; everything else is ignored.
    pub fn handle_battle_key(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'k' | 'w' => KeyAction::Menu(MenuCommand::Up),
                'j' | 's' => KeyAction::Menu(MenuCommand::Down),
                ' ' => KeyAction::Menu(MenuCommand::Confirm),
                _ => KeyAction::None,
            },
            KeyCode::Up => KeyAction::Menu(MenuCommand::Up),
            KeyCode::Down => KeyAction::Menu(MenuCommand::Down),
            KeyCode::Enter => KeyAction::Menu(MenuCommand::Confirm),
            _ => KeyAction::None,
        }
    }
}
