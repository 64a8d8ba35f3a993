//! Combo drawer.
//!
//! Centered digit row with a short bounce every time the combo value
//! changes, hidden once the display countdown runs out or the combo is
//! broken back to zero.

use crate::engine::feedback::ComboCounter;
use crate::render::{DrawOptions, Frame, ImageId, Origin, SCREEN_H, SCREEN_W, Sprite};

const DIGIT_W: f32 = 40.0;
const DIGIT_H: f32 = 56.0;
const DIGIT_GAP: f32 = 2.0;
/// Bounce amplitude as a fraction of the digit height.
const BOUNCE: f32 = 0.85;

pub struct ComboDrawer {
    digit_width: f32,
    digit_gap: f32,
    sprites: [Sprite; 10],
}

impl ComboDrawer {
    pub fn new(digits: [ImageId; 10]) -> Self {
        let sprites = digits.map(|image| {
            let mut sprite = Sprite::new(image, DIGIT_W, DIGIT_H);
            sprite.set_position(SCREEN_W / 2.0, SCREEN_H * 0.4, Origin::Center);
            sprite
        });
        Self {
            digit_width: DIGIT_W,
            digit_gap: DIGIT_GAP,
            sprites,
        }
    }

    /// Vertical bounce offset for the current age: a quick rise that
    /// settles back within the first tenth of the countdown.
    fn bounce_offset(age: f64, height: f32) -> f32 {
        let age = age as f32;
        if age < 0.05 {
            BOUNCE * age * height
        } else if age < 0.1 {
            BOUNCE * (0.1 - age) * height
        } else {
            0.0
        }
    }

    pub fn draw(&self, frame: &mut Frame, combo: &ComboCounter) {
        if !combo.visible() {
            return;
        }

        let mut digits = Vec::new();
        let mut value = combo.combo();
        while value > 0 {
            digits.push((value % 10) as usize); // Little endian.
            value /= 10;
        }

        let w = self.digit_width + self.digit_gap;
        let mut tx = (digits.len() as f32 - 1.0) * w / 2.0;
        for &digit in &digits {
            let sprite = self.sprites[digit];
            let dy = Self::bounce_offset(combo.age(), sprite.h);
            sprite.moved(tx, dy).draw(frame, DrawOptions::new());
            tx -= w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawer() -> ComboDrawer {
        ComboDrawer::new(std::array::from_fn(|i| ImageId(i as u32)))
    }

    #[test]
    fn test_hidden_at_zero_combo() {
        let mut combo = ComboCounter::new(100);
        combo.update(0);
        let mut frame = Frame::new();
        drawer().draw(&mut frame, &combo);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_digit_row_is_centered() {
        let mut combo = ComboCounter::new(0);
        combo.update(25);

        let mut frame = Frame::new();
        drawer().draw(&mut frame, &combo);
        assert_eq!(frame.len(), 2);

        let left = frame.commands().iter().map(|c| c.x).fold(f32::MAX, f32::min);
        let right = frame
            .commands()
            .iter()
            .map(|c| c.x + c.w)
            .fold(f32::MIN, f32::max);
        let center = (left + right) / 2.0;
        assert!((center - SCREEN_W / 2.0).abs() < 2.0);
    }

    #[test]
    fn test_fresh_combo_bounces() {
        let mut combo = ComboCounter::new(1000);
        combo.update(3);
        combo.update(3); // age just past the change

        let mut frame = Frame::new();
        drawer().draw(&mut frame, &combo);
        // The bounce shifts the digit down from its resting position.
        let resting_y = SCREEN_H * 0.4 - DIGIT_H / 2.0;
        assert!(frame.commands()[0].y > resting_y);
    }
}
