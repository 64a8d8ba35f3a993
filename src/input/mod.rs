//! Input event types and pressed-key sources.

pub mod events;

pub use events::{GameAction, KeyAction, KeySource, LiveKeys, key_action};
