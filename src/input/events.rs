//! Input events and pressed-key sources.
//!
//! The session does not care where key states come from: a live input
//! thread and a replay playback both implement [`KeySource`] and get
//! polled exactly once per tick.

/// Per-key edge derived from the previous and current pressed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Idle,
    Hit,
    Release,
    Hold,
}

/// Derives the edge for one key from its last and current state.
pub fn key_action(last: bool, now: bool) -> KeyAction {
    match (last, now) {
        (false, false) => KeyAction::Idle,
        (false, true) => KeyAction::Hit,
        (true, false) => KeyAction::Release,
        (true, true) => KeyAction::Hold,
    }
}

/// Processed gameplay/UI actions routed to the active scene.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    // Gameplay
    Hit { column: usize },
    Release { column: usize },
    Restart,

    // System / UI
    Back,
    Confirm,
    UpdateVolume(f64),
}

/// Anything that can produce the pressed-key vector for the current
/// tick. Implementations must be polled exactly once per tick; replay
/// playback counts its own time by poll count.
pub trait KeySource {
    fn poll(&mut self) -> &[bool];
}

/// Key states accumulated from live input actions.
pub struct LiveKeys {
    pressed: Vec<bool>,
}

impl LiveKeys {
    pub fn new(key_count: usize) -> Self {
        Self {
            pressed: vec![false; key_count],
        }
    }

    /// Applies a gameplay action to the held-key state. Non-key actions
    /// are ignored.
    pub fn apply(&mut self, action: &GameAction) {
        match action {
            GameAction::Hit { column } => {
                if let Some(slot) = self.pressed.get_mut(*column) {
                    *slot = true;
                }
            }
            GameAction::Release { column } => {
                if let Some(slot) = self.pressed.get_mut(*column) {
                    *slot = false;
                }
            }
            _ => {}
        }
    }
}

impl KeySource for LiveKeys {
    fn poll(&mut self) -> &[bool] {
        &self.pressed
    }
}
