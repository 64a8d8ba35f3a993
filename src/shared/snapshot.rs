//! Render snapshots for inter-thread communication.
//!
//! Snapshots are immutable captures of simulation output sent from the
//! simulation thread to the render side after each update batch. The
//! renderer only ever sees completed ticks; it never observes a mark
//! list or score mid-mutation.

use crate::models::stats::HitStats;
use crate::render::Frame;

/// High-level render state.
#[derive(Clone, Debug)]
pub enum RenderState {
    /// Initial empty state.
    Empty,
    /// Output of the active scene (and crossfade, when one is running).
    Live(SceneSnapshot),
}

/// One rendered frame plus bookkeeping.
#[derive(Clone, Debug)]
pub struct SceneSnapshot {
    /// Name of the scene that produced this frame.
    pub scene: &'static str,
    /// Whether a scene crossfade was in progress.
    pub in_transition: bool,
    /// Composed draw commands for this frame.
    pub frame: Frame,
    /// Gameplay numbers, present while the play scene is active.
    pub play: Option<PlaySnapshot>,
}

/// Snapshot of gameplay state for rendering and logging.
#[derive(Clone, Debug)]
pub struct PlaySnapshot {
    /// Current session time in milliseconds.
    pub time_ms: i64,
    /// Scroll speed factor for the note renderer.
    pub speed_factor: f64,
    /// Applied music volume.
    pub volume: f64,
    /// Smoothed score as displayed.
    pub score_display: i64,
    /// Current combo.
    pub combo: u32,
    /// Maximum combo achieved.
    pub max_combo: u32,
    /// Current accuracy percentage.
    pub accuracy: f64,
    /// Hit statistics.
    pub hit_stats: HitStats,
    /// Number of notes not yet judged.
    pub remaining_notes: usize,
    /// Number of live timing-meter marks.
    pub mark_count: usize,
}
