//! Deterministic replay playback.
//!
//! A replay is an ordered list of (wait, key-mask) records: bit `k` of
//! the mask means key `k` is held from that record until the mask
//! changes. Playback keeps its own virtual millisecond counter instead
//! of reading the session clock; its timing depends only on how many
//! times it has been polled.

use crate::error::{Result, SessionError};
use crate::input::events::KeySource;
use serde::{Deserialize, Serialize};

/// One encoded input record: wait in ms since the previous record, then
/// the full key mask that holds from there on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayAction {
    pub wait: i64,
    pub keys: u64,
}

/// Wait of the synthetic terminator appended after the real sequence.
/// Large enough that playback always finishes before reaching it, so an
/// over-long session simply decodes its all-released mask.
pub const SENTINEL_WAIT: i64 = 2_000_000_000;

/// Stateful decoder, polled exactly once per simulation tick.
pub struct ReplayPlayback {
    actions: Vec<ReplayAction>,
    /// Index of the record currently decoded.
    index: usize,
    /// Virtual elapsed ms, starts at the (negative) lead-in.
    elapsed: i64,
    /// Cumulative threshold at which `index` advances next.
    next: i64,
    pressed: Vec<bool>,
}

impl ReplayPlayback {
    /// Builds a playback over trimmed actions.
    ///
    /// `wait_before` is the session lead-in in ms, normally negative;
    /// the first poll corresponds to that instant. Empty action lists
    /// and key counts outside 1..=64 are configuration errors.
    pub fn new(actions: &[ReplayAction], key_count: usize, wait_before: i64) -> Result<Self> {
        if key_count == 0 || key_count > 64 {
            return Err(SessionError::config(format!(
                "replay key count {} out of range 1..=64",
                key_count
            )));
        }
        if actions.is_empty() {
            return Err(SessionError::config("replay has no actions"));
        }

        let mut actions = actions.to_vec();
        actions.push(ReplayAction {
            wait: SENTINEL_WAIT,
            keys: 0,
        });

        // One record of look-ahead: the first advance happens one ms
        // after the first two waits have elapsed.
        let next = 1 + actions[0].wait + actions[1].wait;

        Ok(Self {
            actions,
            index: 0,
            elapsed: wait_before,
            next,
            pressed: vec![false; key_count],
        })
    }

    /// Decodes the pressed-key vector for the current tick and advances
    /// the internal counter by one ms.
    pub fn poll(&mut self) -> &[bool] {
        if self.elapsed >= self.next {
            self.index += 1;
            self.next += self.actions[self.index + 1].wait;
        }

        let mask = self.actions[self.index].keys;
        for (k, slot) in self.pressed.iter_mut().enumerate() {
            *slot = (mask >> k) & 1 == 1;
        }

        self.elapsed += 1;
        &self.pressed
    }

    pub fn key_count(&self) -> usize {
        self.pressed.len()
    }
}

impl KeySource for ReplayPlayback {
    fn poll(&mut self) -> &[bool] {
        ReplayPlayback::poll(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(wait: i64, keys: u64) -> ReplayAction {
        ReplayAction { wait, keys }
    }

    #[test]
    fn test_bit_decode() {
        let mut playback = ReplayPlayback::new(&[action(0, 0b101)], 3, 0).unwrap();
        assert_eq!(playback.poll(), &[true, false, true]);
    }

    #[test]
    fn test_mask_bits_beyond_key_count_ignored() {
        let mut playback = ReplayPlayback::new(&[action(0, 0b1111)], 2, 0).unwrap();
        assert_eq!(playback.poll(), &[true, true]);
    }

    #[test]
    fn test_deterministic_across_instances() {
        let actions = vec![
            action(5, 0b01),
            action(40, 0b11),
            action(25, 0b00),
            action(100, 0b10),
            action(60, 0b00),
        ];
        let mut a = ReplayPlayback::new(&actions, 2, -50).unwrap();
        let mut b = ReplayPlayback::new(&actions, 2, -50).unwrap();

        for tick in 0..5000 {
            assert_eq!(a.poll(), b.poll(), "diverged at tick {}", tick);
        }
    }

    #[test]
    fn test_advances_through_sequence() {
        // First mask holds until 1 + w0 + w1 ms have been polled.
        let actions = vec![
            action(0, 0b1),
            action(10, 0b0),
            action(10, 0b1),
            action(15, 0b0),
        ];
        let mut playback = ReplayPlayback::new(&actions, 1, 0).unwrap();

        let mut history = Vec::new();
        for _ in 0..40 {
            history.push(playback.poll()[0]);
        }

        assert!(history[..11].iter().all(|&p| p));
        assert!(!history[11]);
        assert!(history.contains(&true), "second press must appear");
        // Past the last record the sentinel keeps everything released.
        assert!(!history[39]);
    }

    #[test]
    fn test_runs_out_to_all_released() {
        let mut playback = ReplayPlayback::new(&[action(0, 0b1), action(5, 0b0)], 1, 0).unwrap();
        for _ in 0..10_000 {
            playback.poll();
        }
        assert_eq!(playback.poll(), &[false]);
    }

    #[test]
    fn test_empty_actions_rejected() {
        assert!(ReplayPlayback::new(&[], 4, 0).is_err());
    }

    #[test]
    fn test_bad_key_count_rejected() {
        assert!(ReplayPlayback::new(&[action(0, 0)], 0, 0).is_err());
        assert!(ReplayPlayback::new(&[action(0, 0)], 65, 0).is_err());
    }
}
