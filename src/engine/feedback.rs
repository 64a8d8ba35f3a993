//! Bounded-lifetime visual feedback state.
//!
//! Three small pieces updated once per tick: the timing-meter mark
//! queue, the smoothed score value, and the combo counter. All of them
//! are pure state; the drawers in `views` read them after the tick.

use crate::models::stats::Judgement;

/// Display lifetime of a meter mark, in ms.
pub const MARK_LIFETIME_MS: i64 = 4000;

/// Meter mark palette class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkColor {
    White,
    Purple,
    Orange,
}

impl MarkColor {
    /// Palette class for a judgement tier.
    pub fn for_judgement(judgement: Judgement) -> Self {
        match judgement {
            Judgement::Kool | Judgement::Cool => MarkColor::White,
            Judgement::Good => MarkColor::Purple,
            Judgement::Bad | Judgement::Miss | Judgement::GhostTap => MarkColor::Orange,
        }
    }
}

/// One transient timing-error indicator on the meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterMark {
    /// Remaining display ticks; the mark is evicted when this hits 0.
    pub countdown: i32,
    /// Signed timing error in ms (positive = early).
    pub offset: i32,
    pub color: MarkColor,
}

/// Queue of meter marks with prefix-trim eviction.
///
/// Every mark starts from the same countdown and only ever decrements,
/// so countdowns are non-increasing from the queue's front to its back;
/// expired marks always form a prefix and a single forward scan evicts
/// them. Variable per-mark lifetimes would break that invariant and are
/// deliberately not supported.
pub struct TimingMeter {
    max_countdown: i32,
    marks: Vec<MeterMark>,
}

impl TimingMeter {
    pub fn new(max_countdown: i32) -> Self {
        Self {
            max_countdown: max_countdown.max(1),
            marks: Vec::new(),
        }
    }

    /// Appends a mark with the full countdown. The queue has no cap;
    /// bursts of input simply queue up and age out.
    pub fn add_mark(&mut self, offset: i32, color: MarkColor) {
        self.marks.push(MeterMark {
            countdown: self.max_countdown,
            offset,
            color,
        });
    }

    /// Ages every mark by one tick and drops the expired prefix.
    pub fn tick(&mut self) {
        let mut cursor = 0;
        for (i, mark) in self.marks.iter_mut().enumerate() {
            mark.countdown -= 1;
            if mark.countdown <= 0 {
                cursor = i + 1;
            }
        }
        self.marks.drain(..cursor);
    }

    /// Age in [0, 1]: 0 = fresh, 1 = about to be evicted. Drawers fade
    /// marks out past age 0.8.
    pub fn age(&self, mark: &MeterMark) -> f64 {
        1.0 - mark.countdown as f64 / self.max_countdown as f64
    }

    pub fn marks(&self) -> &[MeterMark] {
        &self.marks
    }

    pub fn max_countdown(&self) -> i32 {
        self.max_countdown
    }
}

/// Smoothing mode for [`DelayedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayedMode {
    /// Closes the gap in a fixed number of equal steps.
    Linear,
    /// Multiplies the residual by a fixed decay factor each tick; never
    /// overshoots, approaches the target asymptotically.
    Exponential,
}

/// Residual kept per tick in exponential mode.
const EXP_DECAY: f64 = 0.985;
/// Step count for linear mode, recomputed whenever the target moves.
const LINEAR_STEPS: u32 = 300;

/// A displayed value trailing its target, stepped once per tick.
#[derive(Debug, Clone, Copy)]
pub struct DelayedValue {
    mode: DelayedMode,
    target: f64,
    value: f64,
    steps_left: u32,
    step: f64,
}

impl DelayedValue {
    pub fn new(mode: DelayedMode) -> Self {
        Self {
            mode,
            target: 0.0,
            value: 0.0,
            steps_left: 0,
            step: 0.0,
        }
    }

    /// Moves the displayed value one tick toward `target`.
    pub fn update(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            if self.mode == DelayedMode::Linear {
                self.steps_left = LINEAR_STEPS;
                self.step = (target - self.value) / LINEAR_STEPS as f64;
            }
        }

        match self.mode {
            DelayedMode::Exponential => {
                self.value = self.target - (self.target - self.value) * EXP_DECAY;
            }
            DelayedMode::Linear => {
                if self.steps_left > 0 {
                    self.value += self.step;
                    self.steps_left -= 1;
                } else {
                    self.value = self.target;
                }
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Integer value for digit rendering.
    ///
    /// The +0.1 bias keeps a digit from reading one low while the
    /// smoothed value sits fractionally under it.
    pub fn display(&self) -> i64 {
        (self.value + 0.1).floor() as i64
    }
}

/// Combo readout with a change-triggered display countdown.
pub struct ComboCounter {
    combo: u32,
    countdown: i32,
    max_countdown: i32,
}

impl ComboCounter {
    pub fn new(max_countdown: i32) -> Self {
        Self {
            combo: 0,
            countdown: 0,
            max_countdown,
        }
    }

    /// Ticks the countdown and restarts it when the combo changed.
    pub fn update(&mut self, combo: u32) {
        if self.countdown > 0 {
            self.countdown -= 1;
        }
        if self.combo != combo {
            self.combo = combo;
            self.countdown = self.max_countdown;
        }
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Age in [0, 1] since the last combo change; drives the bounce.
    pub fn age(&self) -> f64 {
        if self.max_countdown == 0 {
            return 1.0;
        }
        1.0 - self.countdown as f64 / self.max_countdown as f64
    }

    /// Whether the drawer should show anything at all.
    pub fn visible(&self) -> bool {
        if self.max_countdown != 0 && self.countdown == 0 {
            return false;
        }
        self.combo != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_evicted_after_exact_lifetime() {
        let mut meter = TimingMeter::new(4000);
        meter.add_mark(12, MarkColor::White);

        for _ in 0..3999 {
            meter.tick();
        }
        assert_eq!(meter.marks().len(), 1);
        assert_eq!(meter.marks()[0].countdown, 1);

        meter.tick();
        assert!(meter.marks().is_empty());
    }

    #[test]
    fn test_expired_prefix_trimmed_in_one_pass() {
        let mut meter = TimingMeter::new(10);
        meter.add_mark(0, MarkColor::White);
        for _ in 0..5 {
            meter.tick();
        }
        meter.add_mark(1, MarkColor::Purple);
        meter.add_mark(2, MarkColor::Orange);

        // Countdowns must be non-increasing front to back.
        let countdowns: Vec<i32> = meter.marks().iter().map(|m| m.countdown).collect();
        assert!(countdowns.windows(2).all(|w| w[0] <= w[1]));

        for _ in 0..5 {
            meter.tick();
        }
        // First mark expired, the two newer ones survive.
        assert_eq!(meter.marks().len(), 2);
        assert_eq!(meter.marks()[0].offset, 1);
    }

    #[test]
    fn test_age_range() {
        let mut meter = TimingMeter::new(100);
        meter.add_mark(0, MarkColor::White);
        let fresh = meter.marks()[0];
        assert_eq!(meter.age(&fresh), 0.0);

        for _ in 0..80 {
            meter.tick();
        }
        let old = meter.marks()[0];
        assert!((meter.age(&old) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_exponential_smoother_monotone_and_bounded() {
        let mut score = DelayedValue::new(DelayedMode::Exponential);
        let mut last = score.value();
        for _ in 0..5000 {
            score.update(100.0);
            assert!(score.value() > last);
            assert!(score.value() <= 100.0);
            last = score.value();
        }
        assert!(score.value() > 99.0);
    }

    #[test]
    fn test_linear_smoother_reaches_target() {
        let mut score = DelayedValue::new(DelayedMode::Linear);
        for _ in 0..LINEAR_STEPS + 1 {
            score.update(60.0);
        }
        assert_eq!(score.value(), 60.0);
    }

    #[test]
    fn test_display_bias() {
        let mut score = DelayedValue::new(DelayedMode::Exponential);
        for _ in 0..2000 {
            score.update(100.0);
        }
        // Smoothing noise sits just under the target; display reads 100.
        assert!(score.value() < 100.0);
        assert_eq!(score.display(), 100);
    }

    #[test]
    fn test_combo_countdown_resets_on_change() {
        let mut combo = ComboCounter::new(50);
        combo.update(1);
        assert!(combo.visible());

        for _ in 0..49 {
            combo.update(1);
        }
        assert!(combo.visible());
        combo.update(1);
        assert!(!combo.visible());

        combo.update(2);
        assert!(combo.visible());
        assert_eq!(combo.age(), 0.0);
    }
}
