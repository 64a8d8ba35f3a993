//! Data models shared across the session core.

pub mod chart;
pub mod replay;
pub mod settings;
pub mod stats;

pub use chart::{Chart, NoteData};
pub use replay::ReplayData;
pub use settings::SettingsState;
pub use stats::{HitStats, Judgement, JudgementColors};
