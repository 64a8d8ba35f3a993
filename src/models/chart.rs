//! Chart model consumed by the play session.
//!
//! Chart file parsing lives outside the core; callers hand over notes and
//! timing points already parsed and sorted. This module only validates,
//! fingerprints, and (for the demo binary) generates content.

use crate::engine::timeline::TimingPoint;
use crate::error::{Result, SessionError};
use md5::Context;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// One tappable note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteData {
    /// Nominal hit time in milliseconds from chart start.
    pub time_ms: i64,
    /// Column index, 0-based from the left.
    pub column: usize,
}

/// A parsed chart ready for a play session.
#[derive(Debug, Clone)]
pub struct Chart {
    pub music_name: String,
    pub chart_name: String,
    /// Representative BPM the scroll speed is normalized against.
    pub main_bpm: f64,
    pub key_count: usize,
    /// Notes sorted by time, ties broken by column.
    pub notes: Vec<NoteData>,
    /// Timing points sorted by time (duplicates allowed, the timeline
    /// collapses them).
    pub timing_points: Vec<TimingPoint>,
    /// Music file handed to the external audio player, when there is one.
    pub music_path: Option<PathBuf>,
    /// MD5 of the raw chart bytes, used to associate replays and scores.
    pub hash: Option<String>,
}

impl Chart {
    /// Checks the invariants the session relies on. Called once before
    /// the tick loop starts.
    pub fn validate(&self) -> Result<()> {
        if self.key_count == 0 || self.key_count > 64 {
            return Err(SessionError::config(format!(
                "key count {} out of range 1..=64",
                self.key_count
            )));
        }
        if !(self.main_bpm.is_finite() && self.main_bpm > 0.0) {
            return Err(SessionError::config(format!(
                "main BPM must be positive, got {}",
                self.main_bpm
            )));
        }
        for pair in self.notes.windows(2) {
            if pair[1].time_ms < pair[0].time_ms {
                return Err(SessionError::data("notes are not sorted by time"));
            }
        }
        for note in &self.notes {
            if note.column >= self.key_count {
                return Err(SessionError::data(format!(
                    "note column {} exceeds key count {}",
                    note.column, self.key_count
                )));
            }
        }
        Ok(())
    }

    /// Time of the last note, in ms. Zero for an empty chart.
    pub fn duration_ms(&self) -> i64 {
        self.notes.last().map_or(0, |n| n.time_ms)
    }

    /// Builds a demo chart with a BPM ramp and a quiet bridge, so every
    /// timeline feature is exercised without loading a file.
    pub fn demo(key_count: usize, note_count: usize) -> Self {
        let mut rng = rand::rng();
        let mut notes = Vec::with_capacity(note_count);
        let mut current_time: i64 = 1000;
        for _ in 0..note_count {
            notes.push(NoteData {
                time_ms: current_time,
                column: rng.random_range(0..key_count),
            });
            current_time += rng.random_range(50..500);
        }
        let duration = current_time;

        let timing_points = vec![
            TimingPoint {
                time: 0,
                bpm: 120.0,
                volume_scale: 1.0,
                speed_scale: 1.0,
            },
            TimingPoint {
                time: duration / 3,
                bpm: 180.0,
                volume_scale: 1.0,
                speed_scale: 1.0,
            },
            TimingPoint {
                time: duration * 2 / 3,
                bpm: 120.0,
                volume_scale: 0.6,
                speed_scale: 0.8,
            },
        ];

        Self {
            music_name: "Demo Track".to_string(),
            chart_name: "Autogen".to_string(),
            main_bpm: 120.0,
            key_count,
            notes,
            timing_points,
            music_path: None,
            hash: Some("demo_chart".to_string()),
        }
    }
}

/// MD5 fingerprint of raw chart bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut context = Context::new();
    context.consume(bytes);
    format!("{:x}", context.finalize())
}

/// MD5 fingerprint of a chart file on disk.
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(fingerprint(&bytes))
}
