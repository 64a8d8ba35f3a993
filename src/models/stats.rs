//! Hit statistics and judgement types.
//!
//! Judgements use the five-tier ladder of the session's scoring rules,
//! plus a ghost-tap bucket for presses that matched no note.

/// RGBA colors for each judgement type.
#[derive(Clone)]
pub struct JudgementColors {
    pub kool: [f32; 4],
    pub cool: [f32; 4],
    pub good: [f32; 4],
    pub bad: [f32; 4],
    pub miss: [f32; 4],
}

impl JudgementColors {
    /// Creates default judgement colors.
    pub fn new() -> Self {
        Self {
            kool: [0.0, 0.667, 0.949, 1.0],  // Blue
            cool: [0.333, 0.984, 1.0, 1.0],  // Skyblue
            good: [0.2, 1.0, 0.157, 1.0],    // Lime
            bad: [0.957, 0.694, 0.0, 1.0],   // Yellow
            miss: [0.427, 0.47, 0.525, 1.0], // Gray
        }
    }

    pub fn for_judgement(&self, judgement: Judgement) -> [f32; 4] {
        match judgement {
            Judgement::Kool => self.kool,
            Judgement::Cool => self.cool,
            Judgement::Good => self.good,
            Judgement::Bad => self.bad,
            Judgement::Miss | Judgement::GhostTap => self.miss,
        }
    }
}

impl Default for JudgementColors {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit judgement types from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Judgement {
    /// Perfect timing (best).
    Kool,
    /// Excellent timing.
    Cool,
    /// Acceptable timing.
    Good,
    /// Poor timing.
    Bad,
    /// Missed note.
    Miss,
    /// Key press without a note (not counted as miss).
    GhostTap,
}

/// Accumulated hit statistics for a play session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HitStats {
    pub kool: u32,
    pub cool: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
    pub ghost_tap: u32,
}

impl HitStats {
    /// Creates empty hit statistics.
    pub fn new() -> Self {
        Self {
            kool: 0,
            cool: 0,
            good: 0,
            bad: 0,
            miss: 0,
            ghost_tap: 0,
        }
    }

    /// Records one judgement.
    pub fn record(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Kool => self.kool += 1,
            Judgement::Cool => self.cool += 1,
            Judgement::Good => self.good += 1,
            Judgement::Bad => self.bad += 1,
            Judgement::Miss => self.miss += 1,
            Judgement::GhostTap => self.ghost_tap += 1,
        }
    }

    /// Total number of judged notes (ghost taps excluded).
    pub fn total_judged(&self) -> u32 {
        self.kool + self.cool + self.good + self.bad + self.miss
    }

    /// Calculates accuracy percentage (0-100).
    ///
    /// Uses a weighted formula:
    /// - Kool: 100% weight (6 points)
    /// - Cool: 66.7% weight (4 points)
    /// - Good: 33.3% weight (2 points)
    /// - Bad: 16.7% weight (1 point)
    /// - Miss: 0% weight (0 points)
    pub fn calculate_accuracy(&self) -> f64 {
        let total = self.total_judged() as f64;
        if total == 0.0 {
            return 0.0;
        }

        let score = self.kool as f64 * 6.0
            + self.cool as f64 * 4.0
            + self.good as f64 * 2.0
            + self.bad as f64;

        (score / (total * 6.0)) * 100.0
    }
}

impl Default for HitStats {
    fn default() -> Self {
        Self::new()
    }
}
