//! Input handling
//!
//! Maps discrete key-press events to game actions through the configurable
//! bindings. Each poll delivers at most one action; there is no held-key or
//! auto-repeat tracking beyond what the terminal event queue provides.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translates key events into actions
pub struct InputHandler {
    bindings: KeyBindings,
}

/// Resolved key bindings
#[derive(Debug, Clone)]
struct KeyBindings {
    move_left: KeyCode,
    move_right: KeyCode,
    soft_drop: KeyCode,
    rotate: KeyCode,
    quit: KeyCode,
}

/// Parse a key string into a KeyCode
fn parse_key(s: &str) -> KeyCode {
    match s.to_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        s if s.chars().count() == 1 => KeyCode::Char(s.chars().next().unwrap_or(' ')),
        _ => KeyCode::Null,
    }
}

/// Normalize key codes for consistent matching
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl InputHandler {
    /// Create an input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings {
                move_left: parse_key(&settings.keys.move_left),
                move_right: parse_key(&settings.keys.move_right),
                soft_drop: parse_key(&settings.keys.soft_drop),
                rotate: parse_key(&settings.keys.rotate),
                quit: parse_key(&settings.keys.quit),
            },
        }
    }

    /// Map a key press to an action, if it is bound
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits regardless of bindings.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        if code == self.bindings.move_left {
            Some(Action::MoveLeft)
        } else if code == self.bindings.move_right {
            Some(Action::MoveRight)
        } else if code == self.bindings.soft_drop {
            Some(Action::SoftDrop)
        } else if code == self.bindings.rotate {
            Some(Action::Rotate)
        } else if code == self.bindings.quit {
            Some(Action::Quit)
        } else {
            None
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
