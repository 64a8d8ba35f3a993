//! Timing meter drawer.
//!
//! A horizontal bar at the bottom center of the screen: a dark panel
//! spanning the miss window, judgement-window bands layered widest to
//! narrowest, a red anchor at dead center, and one mark per judged
//! input offset by its timing error, tinted by its palette class and
//! faded out near the end of its life.

use crate::engine::feedback::{MarkColor, TimingMeter};
use crate::engine::judge::HitWindow;
use crate::models::stats::JudgementColors;
use crate::render::{DrawOptions, Frame, ImageId, Origin, SCREEN_H, SCREEN_W, Sprite};

/// Horizontal pixels per millisecond of timing error.
const METER_WIDTH: f32 = 2.0;
/// Meter bar height in pixels.
const METER_HEIGHT: f32 = 24.0;

const PANEL_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
const ANCHOR_TINT: [f32; 4] = [1.0, 0.0, 0.0, 0.753];

const MARK_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 0.753];
const MARK_PURPLE: [f32; 4] = [0.835, 0.0, 0.949, 0.753];
const MARK_ORANGE: [f32; 4] = [0.988, 0.325, 0.024, 1.0];

pub struct MeterDrawer {
    /// Dark bar spanning the whole judgeable range.
    panel: Sprite,
    /// One centered band per judgement window, widest first.
    bands: Vec<(Sprite, [f32; 4])>,
    /// Center line drawn over the bands.
    anchor: Sprite,
    /// Unit sprite stamped once per mark.
    unit: Sprite,
}

impl MeterDrawer {
    /// Sizes the meter from the session's hit window so the bar spans
    /// exactly the judgeable range.
    pub fn new(panel_image: ImageId, unit_image: ImageId, window: &HitWindow) -> Self {
        let mut panel = Sprite::new(panel_image, Self::span(window.miss_ms), METER_HEIGHT);
        panel.set_position(SCREEN_W / 2.0, SCREEN_H, Origin::CenterBottom);

        // Colored range is 1/4 of the meter's height, centered.
        let colors = JudgementColors::new();
        let band_h = (METER_HEIGHT * 0.25).ceil();
        let band_y = SCREEN_H - METER_HEIGHT * 0.375;
        let bands = [
            (window.miss_ms, colors.miss),
            (window.bad_ms, colors.bad),
            (window.good_ms, colors.good),
            (window.cool_ms, colors.cool),
            (window.kool_ms, colors.kool),
        ]
        .into_iter()
        .map(|(window_ms, color)| {
            let mut band = Sprite::new(unit_image, Self::span(window_ms), band_h);
            band.set_position(SCREEN_W / 2.0, band_y, Origin::CenterBottom);
            (band, color)
        })
        .collect();

        let mut anchor = Sprite::new(unit_image, METER_WIDTH, METER_HEIGHT);
        anchor.set_position(SCREEN_W / 2.0, SCREEN_H, Origin::CenterBottom);

        Self {
            panel,
            bands,
            anchor,
            unit: anchor,
        }
    }

    /// Bar width covering +-`window_ms` around the anchor.
    fn span(window_ms: f64) -> f32 {
        1.0 + 2.0 * (METER_WIDTH * window_ms as f32).ceil()
    }

    fn tint(color: MarkColor) -> [f32; 4] {
        match color {
            MarkColor::White => MARK_WHITE,
            MarkColor::Purple => MARK_PURPLE,
            MarkColor::Orange => MARK_ORANGE,
        }
    }

    pub fn draw(&self, frame: &mut Frame, meter: &TimingMeter) {
        self.panel
            .draw(frame, DrawOptions::new().with_tint(PANEL_TINT));
        for (band, color) in &self.bands {
            band.draw(frame, DrawOptions::new().with_tint(*color));
        }
        self.anchor
            .draw(frame, DrawOptions::new().with_tint(ANCHOR_TINT));

        for mark in meter.marks() {
            let mut options = DrawOptions::new().with_tint(Self::tint(mark.color));
            let age = meter.age(mark);
            if age >= 0.8 {
                options.alpha = 1.0 - ((age - 0.8) / 0.2) as f32;
            }
            let sprite = self.unit.moved(-(mark.offset as f32) * METER_WIDTH, 0.0);
            sprite.draw(frame, options);
        }
    }
}
