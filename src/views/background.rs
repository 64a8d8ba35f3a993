//! Fullscreen background with a brightness transform.

use crate::render::{DrawOptions, Frame, ImageId, Origin, SCREEN_H, SCREEN_W, Sprite};

/// Draws the chart background darkened to the configured brightness.
pub struct BackgroundDrawer {
    pub brightness: f32,
    sprite: Sprite,
}

impl BackgroundDrawer {
    pub fn new(image: ImageId, brightness: f32) -> Self {
        let mut sprite = Sprite::new(image, SCREEN_W, SCREEN_H);
        sprite.set_position(SCREEN_W / 2.0, SCREEN_H / 2.0, Origin::Center);
        Self { brightness, sprite }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.sprite
            .draw(frame, DrawOptions::new().with_brightness(self.brightness));
    }
}
