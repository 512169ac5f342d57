/// Key bindings.
///
/// A terminal key event is reduced to a `KeyInput` (which key, pressed or
/// released) and looked up in `BINDINGS` to find the `Command` it triggers.
/// Keys not in the table do nothing.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers, ModifierKeyCode};

use crate::entities::{Side, Steer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    pub state: KeyState,
}

impl KeyInput {
    pub fn down(code: KeyCode) -> Self {
        Self { code, state: KeyState::Down }
    }

    pub fn up(code: KeyCode) -> Self {
        Self { code, state: KeyState::Up }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Side, Steer),
    Fire(Side),
    Confirm,
    Quit,
}

use KeyState::{Down, Up};

const RIGHT_SHIFT: KeyCode = KeyCode::Modifier(ModifierKeyCode::RightShift);
const LEFT_SHIFT: KeyCode = KeyCode::Modifier(ModifierKeyCode::LeftShift);

/// Player 1 (Blue): arrows to move, right shift to fire.
/// Player 2 (Red): A / E to move, left shift to fire.
///
/// Up and Z also fire, for terminals that never report a bare shift key.
pub const BINDINGS: &[(KeyCode, KeyState, Command)] = &[
    (KeyCode::Left, Down, Command::Steer(Side::Blue, Steer::Left)),
    (KeyCode::Right, Down, Command::Steer(Side::Blue, Steer::Right)),
    (KeyCode::Left, Up, Command::Steer(Side::Blue, Steer::Stop)),
    (KeyCode::Right, Up, Command::Steer(Side::Blue, Steer::Stop)),
    (RIGHT_SHIFT, Down, Command::Fire(Side::Blue)),
    (KeyCode::Up, Down, Command::Fire(Side::Blue)),
    (KeyCode::Char('a'), Down, Command::Steer(Side::Red, Steer::Left)),
    (KeyCode::Char('e'), Down, Command::Steer(Side::Red, Steer::Right)),
    (KeyCode::Char('a'), Up, Command::Steer(Side::Red, Steer::Stop)),
    (KeyCode::Char('e'), Up, Command::Steer(Side::Red, Steer::Stop)),
    (LEFT_SHIFT, Down, Command::Fire(Side::Red)),
    (KeyCode::Char('z'), Down, Command::Fire(Side::Red)),
    (KeyCode::Enter, Down, Command::Confirm),
    (KeyCode::Esc, Down, Command::Quit),
    (KeyCode::Char('q'), Down, Command::Quit),
];

/// Fold letters to lowercase so a held shift does not change the binding.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

pub fn command_for(input: KeyInput) -> Option<Command> {
    let code = normalize(input.code);
    BINDINGS
        .iter()
        .find(|(key, state, _)| *key == code && *state == input.state)
        .map(|(_, _, command)| *command)
}

/// Ctrl-C, with or without shift.
pub fn is_interrupt(code: KeyCode, modifiers: KeyModifiers) -> bool {
    normalize(code) == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a freshly pressed key stays held before its first auto-repeat
/// arrives.  36 frames at 60 FPS ≈ 600 ms, longer than the usual OS
/// repeat delay.
pub const FIRST_HOLD_WINDOW: u64 = 36;

/// Frames a repeating key stays held between repeats.  8 frames at 60 FPS
/// ≈ 133 ms, longer than the usual OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug)]
struct Held {
    last_seen: u64,
    /// Set once the first auto-repeat (or repeated press) arrives.
    repeating: bool,
}

/// Turns the terminal's raw press/repeat/release stream into clean
/// Down/Up pairs: one Down when a key goes down, one Up when it comes back up
/// (reported, or inferred from silence on terminals without release events).
#[derive(Debug, Default)]
pub struct HeldKeys {
    keys: HashMap<KeyCode, Held>,
    reports_release: bool,
}

impl HeldKeys {
    pub fn new(reports_release: bool) -> Self {
        Self {
            keys: HashMap::new(),
            reports_release,
        }
    }

    /// A press event.  Classic terminals report auto-repeat as further
    /// presses, so only the first one of a hold yields a Down.
    pub fn press(&mut self, code: KeyCode, frame: u64) -> Option<KeyInput> {
        match self.keys.get_mut(&code) {
            Some(held) => {
                held.last_seen = frame;
                held.repeating = true;
                None
            }
            None => {
                self.keys.insert(
                    code,
                    Held {
                        last_seen: frame,
                        repeating: false,
                    },
                );
                Some(KeyInput::down(code))
            }
        }
    }

    /// A repeat event: keeps the key held without a new Down.
    pub fn refresh(&mut self, code: KeyCode, frame: u64) {
        if let Some(held) = self.keys.get_mut(&code) {
            held.last_seen = frame;
            held.repeating = true;
        }
    }

    pub fn release(&mut self, code: KeyCode) -> Option<KeyInput> {
        self.keys.remove(&code).map(|_| KeyInput::up(code))
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.keys.contains_key(&code)
    }

    /// Synthesize Ups for keys that went quiet.  Until the first repeat a
    /// key gets `FIRST_HOLD_WINDOW`, afterwards `HOLD_WINDOW`.
    pub fn expire(&mut self, frame: u64) -> Vec<KeyInput> {
        if self.reports_release {
            return Vec::new();
        }
        let stale: Vec<KeyCode> = self
            .keys
            .iter()
            .filter(|(_, held)| {
                let window = if held.repeating {
                    HOLD_WINDOW
                } else {
                    FIRST_HOLD_WINDOW
                };
                frame.saturating_sub(held.last_seen) > window
            })
            .map(|(code, _)| *code)
            .collect();
        stale.into_iter().filter_map(|code| self.release(code)).collect()
    }
}
