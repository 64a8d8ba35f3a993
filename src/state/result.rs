//! Post-game result scene.
//!
//! Rolls the final score up with the same smoother the HUD uses and
//! leaves on confirm, or on its own after a short hold.

use crate::engine::clock::TICKS_PER_SECOND;
use crate::engine::feedback::{DelayedMode, DelayedValue};
use crate::input::events::GameAction;
use crate::models::stats::HitStats;
use crate::render::Frame;
use crate::state::traits::{Scene, Transition};
use crate::views::{ScoreDrawer, SkinImages};

/// Final numbers of one finished play.
#[derive(Debug, Clone)]
pub struct GameResultData {
    pub music_name: String,
    pub chart_name: String,
    pub score: u32,
    pub max_combo: u32,
    pub accuracy: f64,
    pub hit_stats: HitStats,
}

/// How long the result stays up without input, in ticks.
const HOLD_TICKS: i32 = TICKS_PER_SECOND * 5;

pub struct ResultScene {
    data: GameResultData,
    score_value: DelayedValue,
    score_drawer: ScoreDrawer,
    hold: i32,
}

impl ResultScene {
    pub fn new(skin: &SkinImages, data: GameResultData) -> Self {
        Self {
            data,
            score_value: DelayedValue::new(DelayedMode::Exponential),
            score_drawer: ScoreDrawer::new(skin.score_digits),
            hold: HOLD_TICKS,
        }
    }

    pub fn data(&self) -> &GameResultData {
        &self.data
    }
}

impl Scene for ResultScene {
    fn name(&self) -> &'static str {
        "result"
    }

    fn init(&mut self) {
        let stats = &self.data.hit_stats;
        log::info!(
            "RESULT: {} - [{}]: score {}, acc {:.2}%, max combo {}",
            self.data.music_name,
            self.data.chart_name,
            self.data.score,
            self.data.accuracy,
            self.data.max_combo
        );
        log::info!(
            "RESULT: kool {} / cool {} / good {} / bad {} / miss {} (ghost {})",
            stats.kool,
            stats.cool,
            stats.good,
            stats.bad,
            stats.miss,
            stats.ghost_tap
        );
    }

    fn update(&mut self) -> Transition {
        self.score_value.update(self.data.score as f64);
        self.hold -= 1;
        if self.hold <= 0 {
            return Transition::Exit;
        }
        Transition::None
    }

    fn handle_action(&mut self, action: &GameAction) -> Transition {
        match action {
            GameAction::Confirm | GameAction::Back => Transition::Exit,
            _ => Transition::None,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.score_drawer.draw(frame, &self.score_value);
    }
}
