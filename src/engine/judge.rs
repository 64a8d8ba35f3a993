//! Hit windows and per-press judgment.
//!
//! The judge owns the per-note hit flags and a head index so matching
//! stays cheap: notes before the head are all judged, everything after
//! is scanned only within the miss window around the press.

use crate::error::{Result, SessionError};
use crate::models::chart::NoteData;
use crate::models::stats::Judgement;

/// Timing thresholds in ms, best to worst. A press farther than
/// `miss_ms` from every note is a ghost tap and consumes nothing.
#[derive(Debug, Clone, Copy)]
pub struct HitWindow {
    pub kool_ms: f64,
    pub cool_ms: f64,
    pub good_ms: f64,
    pub bad_ms: f64,
    pub miss_ms: f64,
}

impl HitWindow {
    /// Standard windows.
    pub fn new() -> Self {
        Self {
            kool_ms: 20.0,
            cool_ms: 45.0,
            good_ms: 75.0,
            bad_ms: 110.0,
            miss_ms: 160.0,
        }
    }

    /// Utility constructor for fully custom values.
    pub fn from_custom(kool: f64, cool: f64, good: f64, bad: f64, miss: f64) -> Self {
        Self {
            kool_ms: kool,
            cool_ms: cool,
            good_ms: good,
            bad_ms: bad,
            miss_ms: miss,
        }
    }

    /// Classifies a signed timing offset. The bool is `false` only for
    /// ghost taps, which never consume a note.
    pub fn judge(&self, timing_diff_ms: f64) -> (Judgement, bool) {
        let abs_diff = timing_diff_ms.abs();

        if abs_diff > self.miss_ms {
            return (Judgement::GhostTap, false);
        }

        if abs_diff <= self.kool_ms {
            (Judgement::Kool, true)
        } else if abs_diff <= self.cool_ms {
            (Judgement::Cool, true)
        } else if abs_diff <= self.good_ms {
            (Judgement::Good, true)
        } else if abs_diff <= self.bad_ms {
            (Judgement::Bad, true)
        } else {
            // Between bad and miss thresholds.
            (Judgement::Miss, true)
        }
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session judgment state over one chart's notes.
pub struct Judge {
    window: HitWindow,
    hit: Vec<bool>,
    head: usize,
    judged: usize,
}

impl Judge {
    pub fn new(window: HitWindow, note_count: usize) -> Result<Self> {
        if !(window.miss_ms.is_finite() && window.miss_ms > 0.0) {
            return Err(SessionError::config("miss window must be positive"));
        }
        Ok(Self {
            window,
            hit: vec![false; note_count],
            head: 0,
            judged: 0,
        })
    }

    pub fn window(&self) -> &HitWindow {
        &self.window
    }

    fn advance_head(&mut self) {
        while self.head < self.hit.len() && self.hit[self.head] {
            self.head += 1;
        }
    }

    /// Judges one key press at `now_ms` on `column`.
    ///
    /// Picks the nearest unjudged note of that column within the miss
    /// window and returns its judgement and signed error (positive =
    /// early). Returns `None` for a ghost tap.
    pub fn on_press(
        &mut self,
        notes: &[NoteData],
        column: usize,
        now_ms: i64,
    ) -> Option<(Judgement, f64)> {
        self.advance_head();

        let mut best: Option<(usize, f64)> = None;
        for (i, note) in notes.iter().enumerate().skip(self.head) {
            let diff = (note.time_ms - now_ms) as f64;
            if diff > self.window.miss_ms {
                break;
            }
            if note.column == column && !self.hit[i] && diff.abs() <= self.window.miss_ms {
                match best {
                    Some((_, best_diff)) if diff.abs() >= best_diff.abs() => {}
                    _ => best = Some((i, diff)),
                }
            }
        }

        let (index, diff) = best?;
        self.hit[index] = true;
        self.judged += 1;
        let (judgement, _) = self.window.judge(diff);
        Some((judgement, diff))
    }

    /// Marks every note whose miss deadline passed. Returns how many
    /// notes became misses this tick.
    pub fn sweep_misses(&mut self, notes: &[NoteData], now_ms: i64) -> u32 {
        self.advance_head();

        let mut missed = 0;
        for (i, note) in notes.iter().enumerate().skip(self.head) {
            let late_by = (now_ms - note.time_ms) as f64;
            if late_by <= self.window.miss_ms {
                break;
            }
            if !self.hit[i] {
                self.hit[i] = true;
                self.judged += 1;
                missed += 1;
            }
        }
        self.advance_head();
        missed
    }

    /// Notes not yet judged.
    pub fn remaining(&self) -> usize {
        self.hit.len() - self.judged
    }

    pub fn is_complete(&self) -> bool {
        self.judged == self.hit.len()
    }
}
