//! Timing-point timeline.
//!
//! A chart carries an ordered list of timing points (BPM, volume scale,
//! scroll-speed scale). The timeline owns them in an arena and resolves
//! which one is active for the current time with a forward-only cursor;
//! time never rewinds within one session, so the cursor never does
//! either.

use crate::error::{Result, SessionError};

/// One chart-authored instant where BPM, volume or scroll speed changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPoint {
    /// Activation time in ms from chart start.
    pub time: i64,
    pub bpm: f64,
    /// Multiplier applied to the global volume while active.
    pub volume_scale: f64,
    /// Extra scroll-speed multiplier while active.
    pub speed_scale: f64,
}

/// Resolved timeline over an immutable chain of timing points.
///
/// Built once per session; `advance` only ever moves the cursor forward.
/// Restart the session to seek backwards.
pub struct Timeline {
    points: Vec<TimingPoint>,
    cursor: usize,
    main_bpm: f64,
    speed_base: f64,
    /// Applied volume: `global_volume * active.volume_scale`.
    volume: f64,
    /// Applied volume before the most recent change, kept one step for
    /// blending by the audio consumer.
    last_volume: f64,
}

impl Timeline {
    /// Builds the timeline, collapsing duplicate-time runs.
    ///
    /// The raw list must be sorted by time (non-decreasing); within a run
    /// of equal times only the last point survives, so the cursor never
    /// has to special-case duplicate timestamps later. Malformed input is
    /// rejected here, before the tick loop starts.
    pub fn new(
        raw: &[TimingPoint],
        main_bpm: f64,
        speed_base: f64,
        global_volume: f64,
    ) -> Result<Self> {
        if raw.is_empty() {
            return Err(SessionError::data("chart has no timing points"));
        }
        if !(main_bpm.is_finite() && main_bpm > 0.0) {
            return Err(SessionError::config(format!(
                "main BPM must be positive, got {}",
                main_bpm
            )));
        }

        let mut points: Vec<TimingPoint> = Vec::with_capacity(raw.len());
        for point in raw {
            if let Some(last) = points.last_mut() {
                if point.time < last.time {
                    return Err(SessionError::data(format!(
                        "timing points not sorted: {} after {}",
                        point.time, last.time
                    )));
                }
                if point.time == last.time {
                    // Same timestamp: the later definition wins.
                    *last = *point;
                    continue;
                }
            }
            points.push(*point);
        }

        let volume = global_volume * points[0].volume_scale;
        Ok(Self {
            points,
            cursor: 0,
            main_bpm,
            speed_base,
            volume,
            last_volume: volume,
        })
    }

    /// Moves the cursor forward to the last point with `time <= now_ms`.
    ///
    /// Idempotent for a fixed `now_ms` and never moves backward. Returns
    /// the newly applied volume when it changed since the previous call,
    /// so the caller can push it to the audio player exactly once.
    pub fn advance(&mut self, now_ms: i64, global_volume: f64) -> Option<f64> {
        while self.cursor + 1 < self.points.len() && self.points[self.cursor + 1].time <= now_ms {
            self.cursor += 1;
        }

        let new_volume = global_volume * self.points[self.cursor].volume_scale;
        if new_volume != self.volume {
            self.last_volume = self.volume;
            self.volume = new_volume;
            Some(new_volume)
        } else {
            None
        }
    }

    /// The timing point active at the current cursor position.
    pub fn active(&self) -> &TimingPoint {
        &self.points[self.cursor]
    }

    /// Ratio of the active BPM to the chart's main BPM.
    pub fn beat_ratio(&self) -> f64 {
        self.active().bpm / self.main_bpm
    }

    /// Scroll speed factor for the note renderer:
    /// `speed_base * (bpm / main_bpm) * speed_scale`.
    pub fn speed_factor(&self) -> f64 {
        self.speed_base * self.beat_ratio() * self.active().speed_scale
    }

    /// Currently applied volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Applied volume before the last change.
    pub fn last_volume(&self) -> f64 {
        self.last_volume
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: i64, bpm: f64, volume_scale: f64, speed_scale: f64) -> TimingPoint {
        TimingPoint {
            time,
            bpm,
            volume_scale,
            speed_scale,
        }
    }

    #[test]
    fn test_init_collapses_duplicate_times() {
        let raw = [
            point(0, 120.0, 1.0, 1.0),
            point(1000, 120.0, 1.0, 1.0),
            point(1000, 180.0, 0.5, 1.0),
        ];
        let timeline = Timeline::new(&raw, 120.0, 1.0, 1.0).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.active().bpm, 120.0);
    }

    #[test]
    fn test_advance_selects_active_point() {
        let raw = [
            point(0, 120.0, 1.0, 1.0),
            point(1000, 120.0, 1.0, 1.0),
            point(1000, 180.0, 0.5, 1.0),
        ];
        let mut timeline = Timeline::new(&raw, 120.0, 1.0, 1.0).unwrap();

        timeline.advance(500, 1.0);
        assert_eq!(timeline.active().time, 0);

        timeline.advance(1500, 1.0);
        assert_eq!(timeline.active().time, 1000);
        assert_eq!(timeline.active().bpm, 180.0);
    }

    #[test]
    fn test_advance_is_idempotent() {
        let raw = [point(0, 120.0, 1.0, 1.0), point(500, 150.0, 1.0, 1.0)];
        let mut timeline = Timeline::new(&raw, 120.0, 1.0, 1.0).unwrap();

        timeline.advance(700, 1.0);
        let first = *timeline.active();
        timeline.advance(700, 1.0);
        assert_eq!(*timeline.active(), first);
    }

    #[test]
    fn test_cursor_never_moves_backward() {
        let raw = [point(0, 120.0, 1.0, 1.0), point(500, 150.0, 1.0, 1.0)];
        let mut timeline = Timeline::new(&raw, 120.0, 1.0, 1.0).unwrap();

        timeline.advance(600, 1.0);
        timeline.advance(100, 1.0);
        assert_eq!(timeline.active().time, 500);
    }

    #[test]
    fn test_volume_change_reported_once() {
        let raw = [point(0, 120.0, 1.0, 1.0), point(500, 120.0, 0.5, 1.0)];
        let mut timeline = Timeline::new(&raw, 120.0, 1.0, 0.8).unwrap();

        assert_eq!(timeline.advance(100, 0.8), None);
        let changed = timeline.advance(500, 0.8);
        assert_eq!(changed, Some(0.4));
        assert_eq!(timeline.last_volume(), 0.8);
        assert_eq!(timeline.advance(600, 0.8), None);
    }

    #[test]
    fn test_speed_factor_combines_all_scales() {
        let raw = [point(0, 180.0, 1.0, 0.5)];
        let mut timeline = Timeline::new(&raw, 120.0, 2.0, 1.0).unwrap();
        timeline.advance(0, 1.0);
        // 2.0 * (180 / 120) * 0.5
        assert!((timeline.speed_factor() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_unsorted_input() {
        let raw = [point(1000, 120.0, 1.0, 1.0), point(0, 120.0, 1.0, 1.0)];
        assert!(Timeline::new(&raw, 120.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_zero_main_bpm() {
        let raw = [point(0, 120.0, 1.0, 1.0)];
        assert!(Timeline::new(&raw, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_empty_list() {
        assert!(Timeline::new(&[], 120.0, 1.0, 1.0).is_err());
    }
}
