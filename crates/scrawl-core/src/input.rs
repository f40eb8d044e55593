//! Key/modifier tracking and the undo/redo shortcut table.
//!
//! All handlers run on one event thread, so the pressed-key set needs
//! no locking; key handlers write it, pointer handlers read it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys accompanying a key or pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// History action resolved from a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Key that, while held, turns a left-button drag into a pan.
pub const PAN_KEY: &str = "Space";

/// Resolve the undo/redo shortcuts.
///
/// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Shift+Z redoes, and Ctrl/Cmd+X *also*
/// redoes; the double binding is deliberate and kept as-is.
pub fn shortcut_for(key: &str, modifiers: Modifiers) -> Option<HistoryAction> {
    if !modifiers.primary() {
        return None;
    }
    match key {
        "x" | "X" => Some(HistoryAction::Redo),
        "z" | "Z" if modifiers.shift => Some(HistoryAction::Redo),
        "z" | "Z" => Some(HistoryAction::Undo),
        _ => None,
    }
}

/// Read-mostly keyboard state shared with the pointer handlers.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed_keys: HashSet<String>,
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: String, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.pressed_keys.insert(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed_keys.remove(key);
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// True while the pan modifier key is held.
    pub fn pan_active(&self) -> bool {
        self.is_key_pressed(PAN_KEY)
    }
}
