//! Serializable replay records and their file storage.
//!
//! Replays are stored as zstd-compressed bincode under `data/r/{hash}.r`,
//! keyed by the chart fingerprint. The stored form is the same
//! wait/key-mask action list the playback decoder consumes; recording
//! and playback share one representation.

use crate::engine::replay::ReplayAction;
use crate::error::{Result, SessionError};
use crate::models::chart::Chart;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zstd::stream::{decode_all, encode_all};

/// Current replay format version for compatibility.
pub const REPLAY_FORMAT_VERSION: u8 = 1;

/// Base directory for replay files.
const REPLAY_DIR: &str = "data/r";

/// A recorded play, ready to be persisted or fed back into the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayData {
    /// Format version for future compatibility.
    pub version: u8,
    /// Playback rate used during the play.
    pub rate: f64,
    /// Number of columns the key masks cover.
    pub key_count: usize,
    /// Encoded input stream in chronological order.
    pub actions: Vec<ReplayAction>,
}

impl ReplayData {
    pub fn new(rate: f64, key_count: usize, actions: Vec<ReplayAction>) -> Self {
        Self {
            version: REPLAY_FORMAT_VERSION,
            rate,
            key_count,
            actions,
        }
    }

    /// Builds a replay that presses every note of the chart dead on
    /// time, holding each key for a short moment. Used by the demo
    /// binary and by session tests.
    pub fn autoplay(chart: &Chart) -> Self {
        const HOLD_MS: i64 = 40;

        // (time, column, down) edges, then folded into mask records.
        let mut edges: Vec<(i64, usize, bool)> = Vec::with_capacity(chart.notes.len() * 2);
        for note in &chart.notes {
            edges.push((note.time_ms, note.column, true));
            edges.push((note.time_ms + HOLD_MS, note.column, false));
        }
        edges.sort_by_key(|e| e.0);

        let first_time = edges.first().map_or(0, |e| e.0);
        // Keys stay released until the first press.
        let mut actions = vec![ReplayAction {
            wait: first_time,
            keys: 0,
        }];

        let mut mask: u64 = 0;
        let mut prev_time = first_time;
        let mut i = 0;
        while i < edges.len() {
            let time = edges[i].0;
            while i < edges.len() && edges[i].0 == time {
                let (_, column, down) = edges[i];
                if down {
                    mask |= 1 << column;
                } else {
                    mask &= !(1 << column);
                }
                i += 1;
            }
            actions.push(ReplayAction {
                wait: time - prev_time,
                keys: mask,
            });
            prev_time = time;
        }

        Self::new(1.0, chart.key_count, actions)
    }

    /// Returns the actions with no-op padding trimmed.
    ///
    /// Leading empty-mask records fold their waits into the following
    /// action so cumulative timing is preserved; trailing empty-mask
    /// records after the final release carry no information and are
    /// dropped (the first one is kept, it is the release itself).
    pub fn trimmed_actions(&self) -> Vec<ReplayAction> {
        let mut raw = self.actions.clone();

        let mut lead_wait: i64 = 0;
        let mut start = 0;
        while start < raw.len() && raw[start].keys == 0 {
            lead_wait += raw[start].wait;
            start += 1;
        }
        let mut actions: Vec<ReplayAction> = raw.drain(start..).collect();
        if let Some(first) = actions.first_mut() {
            first.wait += lead_wait;
        }

        let mut end = actions.len();
        while end >= 2 && actions[end - 1].keys == 0 && actions[end - 2].keys == 0 {
            end -= 1;
        }
        actions.truncate(end);
        actions
    }

    /// How early the recorded input stream begins, in ms (non-positive).
    ///
    /// A replay recorded with a long lead-in starts before the chart's
    /// nominal time zero; the session extends its wait-before to cover it.
    pub fn lead_in_ms(&self) -> i64 {
        self.actions.first().map_or(0, |a| a.wait.min(0))
    }
}

/// Accumulates (wait, mask) records from the live pressed-key stream.
///
/// One record is appended whenever the mask changes; polling it every
/// tick therefore reproduces the exact input timing on playback.
pub struct ReplayRecorder {
    actions: Vec<ReplayAction>,
    last_mask: u64,
    last_change_ms: i64,
}

impl ReplayRecorder {
    /// `start_ms` is the session lead-in the recording is measured from.
    pub fn new(start_ms: i64) -> Self {
        Self {
            actions: Vec::new(),
            last_mask: 0,
            last_change_ms: start_ms,
        }
    }

    /// Observes the current tick's key mask.
    pub fn observe(&mut self, now_ms: i64, mask: u64) {
        if mask != self.last_mask {
            self.actions.push(ReplayAction {
                wait: now_ms - self.last_change_ms,
                keys: mask,
            });
            self.last_mask = mask;
            self.last_change_ms = now_ms;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Finishes the recording.
    pub fn into_data(self, rate: f64, key_count: usize) -> ReplayData {
        ReplayData::new(rate, key_count, self.actions)
    }
}

/// Get the path for a replay file given its chart hash.
pub fn replay_path(hash: &str) -> PathBuf {
    PathBuf::from(REPLAY_DIR).join(format!("{}.r", hash))
}

fn ensure_replay_dir() -> std::io::Result<()> {
    fs::create_dir_all(REPLAY_DIR)
}

/// Save replay data to a compressed binary file.
/// Returns the relative path to the file.
pub fn save_replay(hash: &str, data: &ReplayData) -> Result<String> {
    ensure_replay_dir()?;

    let path = replay_path(hash);
    let mut file = File::create(&path)?;

    let binary_data = bincode::serde::encode_to_vec(data, bincode::config::standard())
        .map_err(|e| SessionError::data(format!("replay serialization: {}", e)))?;

    // Zstd compression (Level 21 - Maximum)
    let compressed_data = encode_all(&binary_data[..], 21)?;
    file.write_all(&compressed_data)?;

    Ok(format!("{}/{}.r", REPLAY_DIR, hash))
}

/// Load and decompress replay data from file.
pub fn load_replay(hash: &str) -> Result<ReplayData> {
    load_replay_from_path(&replay_path(hash))
}

/// Load replay data from a specific path.
pub fn load_replay_from_path(path: &Path) -> Result<ReplayData> {
    let file = File::open(path)?;
    let binary_data = decode_all(file)?;

    let (data, _len): (ReplayData, usize) =
        bincode::serde::decode_from_slice(&binary_data, bincode::config::standard())
            .map_err(|e| SessionError::data(format!("replay deserialization: {}", e)))?;

    Ok(data)
}

/// Delete a replay file.
pub fn delete_replay(hash: &str) -> Result<()> {
    let path = replay_path(hash);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Check if a replay file exists.
pub fn replay_exists(hash: &str) -> bool {
    replay_path(hash).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::NoteData;

    fn action(wait: i64, keys: u64) -> ReplayAction {
        ReplayAction { wait, keys }
    }

    #[test]
    fn test_compress_decompress() {
        let test_data = ReplayData::new(1.0, 4, vec![action(10, 0b1), action(50, 0)]);
        let hash = "test_replay_hash";

        // Save
        let path = save_replay(hash, &test_data).unwrap();
        assert!(Path::new(&path).exists());

        // Load
        let loaded = load_replay(hash).unwrap();
        assert_eq!(loaded, test_data);

        // Cleanup
        delete_replay(hash).unwrap();
        assert!(!replay_exists(hash));
    }

    #[test]
    fn test_trim_folds_leading_waits() {
        let data = ReplayData::new(
            1.0,
            4,
            vec![action(100, 0), action(200, 0), action(50, 0b10), action(30, 0)],
        );
        let trimmed = data.trimmed_actions();
        assert_eq!(trimmed, vec![action(350, 0b10), action(30, 0)]);
    }

    #[test]
    fn test_trim_drops_trailing_padding_after_release() {
        let data = ReplayData::new(
            1.0,
            4,
            vec![
                action(0, 0b1),
                action(40, 0),
                action(500, 0),
                action(500, 0),
            ],
        );
        let trimmed = data.trimmed_actions();
        assert_eq!(trimmed, vec![action(0, 0b1), action(40, 0)]);
    }

    #[test]
    fn test_recorder_emits_mask_changes_only() {
        let mut recorder = ReplayRecorder::new(-100);
        recorder.observe(-100, 0);
        recorder.observe(0, 0);
        recorder.observe(10, 0b1);
        recorder.observe(11, 0b1);
        recorder.observe(50, 0);

        let data = recorder.into_data(1.0, 4);
        assert_eq!(data.actions, vec![action(110, 0b1), action(40, 0)]);
    }

    #[test]
    fn test_autoplay_covers_all_notes() {
        let chart = Chart {
            music_name: "m".to_string(),
            chart_name: "c".to_string(),
            main_bpm: 120.0,
            key_count: 2,
            notes: vec![
                NoteData {
                    time_ms: 500,
                    column: 0,
                },
                NoteData {
                    time_ms: 700,
                    column: 1,
                },
            ],
            timing_points: vec![],
            music_path: None,
            hash: None,
        };
        let data = ReplayData::autoplay(&chart);

        // Lead record + press/release per note.
        assert_eq!(data.actions.len(), 5);
        assert_eq!(data.actions[0], action(500, 0));
        assert_eq!(data.actions[1], action(0, 0b01));
        assert_eq!(data.actions[2], action(40, 0b00));
        assert_eq!(data.actions[3], action(160, 0b10));
        // Ends with everything released.
        assert_eq!(data.actions.last().unwrap().keys, 0);
    }
}
