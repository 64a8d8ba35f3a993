//! Snapshot production for the play scene.

use super::PlayScene;
use crate::shared::snapshot::PlaySnapshot;

impl PlayScene {
    /// Creates an immutable capture of the gameplay numbers for the
    /// render side. Called after the tick has fully completed.
    pub(crate) fn snapshot(&self) -> PlaySnapshot {
        PlaySnapshot {
            time_ms: self.clock.now_ms(),
            speed_factor: self.timeline.speed_factor(),
            volume: self.timeline.volume(),
            score_display: self.score_value.display(),
            combo: self.combo,
            max_combo: self.max_combo,
            accuracy: self.hit_stats.calculate_accuracy(),
            hit_stats: self.hit_stats.clone(),
            remaining_notes: self.judge.remaining(),
            mark_count: self.meter.marks().len(),
        }
    }
}
