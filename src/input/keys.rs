//! Keyboard model and shortcut dispatch

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    channel::Command,
    commands::ADJUST_STEP_SECONDS,
    state::TimerStatus,
};

/// Backend-independent key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Char(char),
    Up,
    Down,
    Enter,
    Esc,
    Backspace,
    Interrupt,
    Other,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let chorded = event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            // Other chords are not shortcuts; Shift alone is
            _ if chorded => Key::Other,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Backspace => Key::Backspace,
            _ => Key::Other,
        }
    }
}

/// Where keystrokes currently go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Display,
    TextInput,
}

/// The timer shortcut table
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDispatcher;

impl KeyDispatcher {
    /// Command for a shortcut, or `None` if the key is not handled.
    ///
    /// A returned command means the key is consumed.
    pub fn dispatch(&self, key: Key, focus: Focus, status: TimerStatus) -> Option<Command> {
        if focus == Focus::TextInput {
            return None;
        }

        match key {
            Key::Space if status == TimerStatus::Running => Some(Command::Stop),
            Key::Space => Some(Command::Start),
            Key::Char('r') | Key::Char('R') => Some(Command::Reset),
            Key::Up => Some(Command::AddTime { seconds: ADJUST_STEP_SECONDS }),
            Key::Down => Some(Command::SubtractTime { seconds: ADJUST_STEP_SECONDS }),
            _ => None,
        }
    }
}
