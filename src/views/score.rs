//! Score drawer.
//!
//! Renders the smoothed score as right-aligned digit sprites. Digits sit
//! in constant-width cells so the readout does not wobble as values
//! change; the number 0's width is the cell standard.

use crate::engine::feedback::DelayedValue;
use crate::render::{DrawOptions, Frame, ImageId, Origin, SCREEN_W, Sprite};

const DIGIT_W: f32 = 32.0;
const DIGIT_H: f32 = 48.0;
const DIGIT_GAP: f32 = 2.0;

pub struct ScoreDrawer {
    digit_width: f32,
    digit_gap: f32,
    /// Minimum digit count; shorter values are padded with zeros.
    zero_fill: usize,
    sprites: [Sprite; 10],
}

impl ScoreDrawer {
    pub fn new(digits: [ImageId; 10]) -> Self {
        let sprites = digits.map(|image| {
            let mut sprite = Sprite::new(image, DIGIT_W, DIGIT_H);
            sprite.set_position(SCREEN_W - 16.0, 16.0, Origin::RightTop);
            sprite
        });
        Self {
            digit_width: DIGIT_W,
            digit_gap: DIGIT_GAP,
            zero_fill: 1,
            sprites,
        }
    }

    pub fn draw(&self, frame: &mut Frame, score: &DelayedValue) {
        let mut digits = Vec::new();
        let mut value = score.display();
        while value > 0 {
            digits.push((value % 10) as usize); // Little endian.
            value /= 10;
        }
        while digits.len() < self.zero_fill {
            digits.push(0);
        }

        let w = self.digit_width + self.digit_gap;
        let mut tx = 0.0;
        for &digit in &digits {
            let sprite = self.sprites[digit]
                .moved(tx, 0.0)
                // Center the glyph inside its constant-width cell.
                .moved(-w / 2.0 + self.sprites[digit].w / 2.0, 0.0);
            sprite.draw(frame, DrawOptions::new());
            tx -= w;
        }
    }
}
