//! Virtual tick clock.
//!
//! The whole simulation runs on discrete ticks at a fixed virtual rate,
//! independent of rendering frame pacing. Every time quantity downstream
//! derives from the tick counter through the conversions here.

use crate::error::{Result, SessionError};

/// Virtual simulation ticks per second. One tick is one millisecond.
pub const TICKS_PER_SECOND: i32 = 1000;

/// Tick counter with ms conversions at a fixed rate.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    tps: i32,
    tick: i32,
}

impl TickClock {
    /// Creates a clock at the standard rate.
    pub fn new() -> Self {
        Self {
            tps: TICKS_PER_SECOND,
            tick: 0,
        }
    }

    /// Creates a clock at a custom rate. Non-positive rates are a
    /// configuration error.
    pub fn with_rate(tps: i32) -> Result<Self> {
        if tps <= 0 {
            return Err(SessionError::config(format!(
                "tick rate must be positive, got {}",
                tps
            )));
        }
        Ok(Self { tps, tick: 0 })
    }

    /// Converts a time in ms to a tick count, truncating toward zero.
    pub fn time_to_tick(&self, ms: i64) -> i32 {
        (ms as f64 / 1000.0 * self.tps as f64) as i32
    }

    /// Converts a tick count back to a time in ms, truncating toward zero.
    pub fn tick_to_time(&self, tick: i32) -> i64 {
        (tick as f64 / self.tps as f64 * 1000.0) as i64
    }

    /// Advances by exactly one tick. Called once per simulation step.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    /// Current session time in ms, always derived from the tick counter.
    pub fn now_ms(&self) -> i64 {
        self.tick_to_time(self.tick)
    }

    /// Seeds the counter so that the first `advance` lands exactly on
    /// `ms` (used for the negative lead-in before the chart starts).
    pub fn seek_to_time(&mut self, ms: i64) {
        self.tick = self.time_to_tick(ms) - 1;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_within_one_tick() {
        let clock = TickClock::with_rate(240).unwrap();
        let tick_ms = 1000 / 240 + 1;
        for ms in [-5000, -1, 0, 1, 3, 999, 1000, 123_456] {
            let back = clock.tick_to_time(clock.time_to_tick(ms));
            assert!(
                (back - ms).abs() < tick_ms as i64 + 1,
                "ms={} back={}",
                ms,
                back
            );
        }
    }

    #[test]
    fn test_time_to_tick_monotonic() {
        let clock = TickClock::new();
        let mut last = i32::MIN;
        for ms in -2000..2000 {
            let tick = clock.time_to_tick(ms);
            assert!(tick >= last);
            last = tick;
        }
    }

    #[test]
    fn test_advance_drives_now() {
        let mut clock = TickClock::new();
        clock.advance();
        clock.advance();
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.now_ms(), 2);
    }

    #[test]
    fn test_seek_lands_on_lead_in_after_first_advance() {
        let mut clock = TickClock::new();
        clock.seek_to_time(-1800);
        clock.advance();
        assert_eq!(clock.now_ms(), -1800);
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(TickClock::with_rate(0).is_err());
    }
}
