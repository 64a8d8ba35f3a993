//! The gameplay scene.
//!
//! Ties the session engine together and runs the fixed per-tick
//! pipeline: clock, then timeline resolution, then the key poll, then
//! judgment, then visual feedback. Rendering reads the result strictly
//! after the tick through the snapshot.

mod snapshot;

use crate::engine::clock::TickClock;
use crate::engine::feedback::{
    ComboCounter, DelayedMode, DelayedValue, MARK_LIFETIME_MS, MarkColor, TimingMeter,
};
use crate::engine::judge::{HitWindow, Judge};
use crate::engine::replay::ReplayPlayback;
use crate::engine::timeline::Timeline;
use crate::error::Result;
use crate::input::events::{GameAction, KeyAction, KeySource, LiveKeys, key_action};
use crate::logic::audio::AudioManager;
use crate::models::chart::Chart;
use crate::models::replay::{ReplayData, ReplayRecorder, save_replay};
use crate::models::settings::SettingsState;
use crate::models::stats::{HitStats, Judgement};
use crate::render::Frame;
use crate::state::result::{GameResultData, ResultScene};
use crate::state::traits::{Scene, Transition};
use crate::system::bus::SystemBus;
use crate::views::{BackgroundDrawer, ComboDrawer, MeterDrawer, ScoreDrawer, SkinImages};

/// Lead-in before the chart's time zero, in ms.
pub const DEFAULT_WAIT_BEFORE_MS: i64 = -1800;
/// Padding after the last note before the session ends, in ms.
pub const DEFAULT_WAIT_AFTER_MS: i64 = 3000;

/// Combo display countdown window, in ms.
const COMBO_DISPLAY_MS: i64 = 2000;

/// Where the pressed-key vector comes from.
pub enum PlayMode {
    /// Keyboard input routed through game actions; the run is recorded.
    Live,
    /// Deterministic playback of a recorded replay.
    Replay(ReplayData),
}

enum SessionInput {
    Live(LiveKeys),
    Replay(ReplayPlayback),
}

impl SessionInput {
    fn poll(&mut self) -> &[bool] {
        match self {
            SessionInput::Live(keys) => keys.poll(),
            SessionInput::Replay(playback) => playback.poll(),
        }
    }

    fn apply(&mut self, action: &GameAction) {
        if let SessionInput::Live(keys) = self {
            keys.apply(action);
        }
    }
}

pub struct PlayScene {
    chart: Chart,
    clock: TickClock,
    timeline: Timeline,
    input: SessionInput,
    judge: Judge,

    // Scoring
    score: u32,
    combo: u32,
    max_combo: u32,
    hit_stats: HitStats,
    last_pressed: Vec<bool>,

    // Visual feedback
    meter: TimingMeter,
    score_value: DelayedValue,
    combo_counter: ComboCounter,

    // Collaborators
    audio: AudioManager,
    settings: SettingsState,
    recorder: Option<ReplayRecorder>,
    skin: SkinImages,

    started_audio: bool,
    end_time_ms: i64,

    // Drawers
    background: BackgroundDrawer,
    meter_drawer: MeterDrawer,
    score_drawer: ScoreDrawer,
    combo_drawer: ComboDrawer,
}

impl PlayScene {
    /// Builds the scene. Every configuration and chart-data problem is
    /// rejected here, before the first tick; scene entry is aborted with
    /// the reported reason.
    pub fn new(
        bus: &SystemBus,
        chart: Chart,
        settings: SettingsState,
        skin: &SkinImages,
        mode: PlayMode,
    ) -> Result<Self> {
        chart.validate()?;

        // A replay that begins before the default lead-in extends it.
        let wait_before = match &mode {
            PlayMode::Replay(replay) => DEFAULT_WAIT_BEFORE_MS.min(replay.lead_in_ms()),
            PlayMode::Live => DEFAULT_WAIT_BEFORE_MS,
        };

        let mut clock = TickClock::new();
        clock.seek_to_time(wait_before);

        let timeline = Timeline::new(
            &chart.timing_points,
            chart.main_bpm,
            settings.speed_base,
            settings.master_volume,
        )?;

        let window = HitWindow::new();
        let judge = Judge::new(window, chart.notes.len())?;

        let (input, recorder) = match mode {
            PlayMode::Live => (
                SessionInput::Live(LiveKeys::new(chart.key_count)),
                Some(ReplayRecorder::new(wait_before)),
            ),
            PlayMode::Replay(replay) => (
                SessionInput::Replay(ReplayPlayback::new(
                    &replay.actions,
                    chart.key_count,
                    wait_before,
                )?),
                None,
            ),
        };

        let mut audio = AudioManager::new(bus);
        if let Some(path) = &chart.music_path {
            audio.load_music(path);
        }
        audio.set_volume(timeline.volume() as f32);

        let meter = TimingMeter::new(clock.time_to_tick(MARK_LIFETIME_MS));
        let combo_counter = ComboCounter::new(clock.time_to_tick(COMBO_DISPLAY_MS));
        let end_time_ms = chart.duration_ms() + DEFAULT_WAIT_AFTER_MS;

        let background = BackgroundDrawer::new(skin.background, 0.5);
        let meter_drawer = MeterDrawer::new(skin.meter_panel, skin.meter_unit, &window);
        let score_drawer = ScoreDrawer::new(skin.score_digits);
        let combo_drawer = ComboDrawer::new(skin.combo_digits);

        let key_count = chart.key_count;
        Ok(Self {
            chart,
            clock,
            timeline,
            input,
            judge,
            score: 0,
            combo: 0,
            max_combo: 0,
            hit_stats: HitStats::new(),
            last_pressed: vec![false; key_count],
            meter,
            score_value: DelayedValue::new(DelayedMode::Exponential),
            combo_counter,
            audio,
            settings,
            recorder,
            skin: *skin,
            started_audio: false,
            end_time_ms,
            background,
            meter_drawer,
            score_drawer,
            combo_drawer,
        })
    }

    fn score_points(judgement: Judgement) -> u32 {
        match judgement {
            Judgement::Kool => 300,
            Judgement::Cool => 200,
            Judgement::Good => 100,
            Judgement::Bad => 50,
            Judgement::Miss | Judgement::GhostTap => 0,
        }
    }

    fn handle_press(&mut self, column: usize, now_ms: i64) {
        match self.judge.on_press(&self.chart.notes, column, now_ms) {
            Some((judgement, error_ms)) => {
                self.hit_stats.record(judgement);
                if judgement == Judgement::Miss {
                    self.combo = 0;
                } else {
                    self.combo += 1;
                    self.max_combo = self.max_combo.max(self.combo);
                    self.score += Self::score_points(judgement);
                }
                self.meter
                    .add_mark(error_ms as i32, MarkColor::for_judgement(judgement));
            }
            None => self.hit_stats.record(Judgement::GhostTap),
        }
    }

    fn finish(&mut self) -> Transition {
        self.audio.stop();

        if let Some(recorder) = self.recorder.take()
            && !recorder.is_empty()
            && let Some(hash) = &self.chart.hash
        {
            let data = recorder.into_data(1.0, self.chart.key_count);
            match save_replay(hash, &data) {
                Ok(path) => log::info!("PLAY: Replay saved to {}", path),
                Err(e) => log::error!("PLAY: Failed to save replay: {}", e),
            }
        }

        let result = GameResultData {
            music_name: self.chart.music_name.clone(),
            chart_name: self.chart.chart_name.clone(),
            score: self.score,
            max_combo: self.max_combo,
            accuracy: self.hit_stats.calculate_accuracy(),
            hit_stats: self.hit_stats.clone(),
        };
        Transition::To(Box::new(ResultScene::new(&self.skin, result)))
    }
}

impl Scene for PlayScene {
    fn name(&self) -> &'static str {
        "play"
    }

    fn init(&mut self) {
        log::info!(
            "PLAY: {} - [{}], {} notes",
            self.chart.music_name,
            self.chart.chart_name,
            self.chart.notes.len()
        );
    }

    fn update(&mut self) -> Transition {
        self.clock.advance();
        let now_ms = self.clock.now_ms();

        // The music starts when the lead-in crosses time zero.
        if !self.started_audio && now_ms >= 0 {
            self.audio.play();
            self.started_audio = true;
        }

        if let Some(volume) = self.timeline.advance(now_ms, self.settings.master_volume) {
            self.audio.set_volume(volume as f32);
        }

        let pressed = self.input.poll().to_vec();
        for column in 0..pressed.len() {
            if key_action(self.last_pressed[column], pressed[column]) == KeyAction::Hit {
                self.handle_press(column, now_ms);
            }
        }

        if let Some(recorder) = &mut self.recorder {
            let mut mask = 0u64;
            for (k, &down) in pressed.iter().enumerate() {
                if down {
                    mask |= 1 << k;
                }
            }
            recorder.observe(now_ms, mask);
        }

        let missed = self.judge.sweep_misses(&self.chart.notes, now_ms);
        for _ in 0..missed {
            self.hit_stats.record(Judgement::Miss);
            self.combo = 0;
            let late = -(self.judge.window().miss_ms as i32);
            self.meter.add_mark(late, MarkColor::Orange);
        }

        self.last_pressed = pressed;

        self.score_value.update(self.score as f64);
        self.meter.tick();
        self.combo_counter.update(self.combo);

        if now_ms >= self.end_time_ms {
            return self.finish();
        }
        Transition::None
    }

    fn handle_action(&mut self, action: &GameAction) -> Transition {
        match action {
            GameAction::Hit { .. } | GameAction::Release { .. } => {
                self.input.apply(action);
                Transition::None
            }
            GameAction::Back => {
                log::info!("PLAY: Aborted by player");
                self.audio.stop();
                Transition::Exit
            }
            GameAction::UpdateVolume(volume) => {
                self.settings.master_volume = volume.clamp(0.0, 1.0);
                Transition::None
            }
            _ => Transition::None,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.background.draw(frame);
        self.meter_drawer.draw(frame, &self.meter);
        self.score_drawer.draw(frame, &self.score_value);
        self.combo_drawer.draw(frame, &self.combo_counter);
    }

    fn stats(&self) -> Option<crate::shared::snapshot::PlaySnapshot> {
        Some(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::timeline::TimingPoint;
    use crate::models::chart::NoteData;
    use crate::system::bus::AudioCommand;

    fn fixed_chart() -> Chart {
        let notes = (0..20)
            .map(|i| NoteData {
                time_ms: 1000 + i * 200,
                column: (i % 4) as usize,
            })
            .collect();
        Chart {
            music_name: "test".to_string(),
            chart_name: "fixed".to_string(),
            main_bpm: 120.0,
            key_count: 4,
            notes,
            timing_points: vec![
                TimingPoint {
                    time: 0,
                    bpm: 120.0,
                    volume_scale: 1.0,
                    speed_scale: 1.0,
                },
                TimingPoint {
                    time: 3000,
                    bpm: 180.0,
                    volume_scale: 0.5,
                    speed_scale: 1.0,
                },
            ],
            music_path: None,
            hash: None,
        }
    }

    fn play_scene(bus: &SystemBus, chart: Chart, mode: PlayMode) -> PlayScene {
        PlayScene::new(
            bus,
            chart,
            SettingsState::default(),
            &SkinImages::placeholder(),
            mode,
        )
        .unwrap()
    }

    #[test]
    fn test_autoplay_session_hits_every_note() {
        let bus = SystemBus::new();
        let chart = fixed_chart();
        let replay = ReplayData::autoplay(&chart);
        let mut scene = play_scene(&bus, chart, PlayMode::Replay(replay));

        let mut ticks = 0;
        loop {
            match scene.update() {
                Transition::None => {
                    ticks += 1;
                    assert!(ticks < 60_000, "session never finished");
                }
                Transition::To(next) => {
                    assert_eq!(next.name(), "result");
                    break;
                }
                Transition::Exit => panic!("unexpected exit"),
            }
        }

        assert_eq!(scene.hit_stats.kool, 20);
        assert_eq!(scene.hit_stats.miss, 0);
        assert_eq!(scene.max_combo, 20);
        assert_eq!(scene.score, 20 * 300);
        assert_eq!(scene.judge.remaining(), 0);
    }

    #[test]
    fn test_no_input_misses_every_note() {
        let bus = SystemBus::new();
        let chart = fixed_chart();
        let mut scene = play_scene(&bus, chart, PlayMode::Live);

        loop {
            match scene.update() {
                Transition::None => {}
                Transition::To(_) => break,
                Transition::Exit => panic!("unexpected exit"),
            }
        }

        assert_eq!(scene.hit_stats.miss, 20);
        assert_eq!(scene.combo, 0);
        assert_eq!(scene.score, 0);
    }

    #[test]
    fn test_volume_change_pushed_once() {
        let bus = SystemBus::new();
        let chart = fixed_chart();
        let replay = ReplayData::autoplay(&chart);
        let mut scene = play_scene(&bus, chart, PlayMode::Replay(replay));

        loop {
            match scene.update() {
                Transition::None => {}
                Transition::To(_) => break,
                Transition::Exit => panic!("unexpected exit"),
            }
        }

        let volumes: Vec<f32> = bus
            .audio_cmd_rx
            .try_iter()
            .filter_map(|cmd| match cmd {
                AudioCommand::SetVolume { volume } => Some(volume),
                _ => None,
            })
            .collect();
        // Initial volume plus exactly one change at the t=3000 point.
        assert_eq!(volumes.len(), 2);
        assert!((volumes[0] - 0.5).abs() < 1e-6);
        assert!((volumes[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_bad_key_count_rejected_at_entry() {
        let bus = SystemBus::new();
        let mut chart = fixed_chart();
        chart.key_count = 0;
        let result = PlayScene::new(
            &bus,
            chart,
            SettingsState::default(),
            &SkinImages::placeholder(),
            PlayMode::Live,
        );
        assert!(result.is_err());
    }
}
