//! Positioned-sprite helper over the draw-command sink.

use crate::render::frame::{DrawCommand, DrawOptions, Frame};

/// Handle to an externally-owned image (skin atlas entry). The core never
/// loads or decodes image data; it only references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Anchor point used when converting a sprite position to the command's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    TopLeft,
    Center,
    CenterBottom,
    RightTop,
}

/// An image with a logical size, position and origin.
///
/// Sprites are cheap value types: drawers keep a base sprite and shift
/// copies of it per draw (digit rows, meter marks).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub image: ImageId,
    pub w: f32,
    pub h: f32,
    pub x: f32,
    pub y: f32,
    pub origin: Origin,
}

impl Sprite {
    pub fn new(image: ImageId, w: f32, h: f32) -> Self {
        Self {
            image,
            w,
            h,
            x: 0.0,
            y: 0.0,
            origin: Origin::TopLeft,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, origin: Origin) {
        self.x = x;
        self.y = y;
        self.origin = origin;
    }

    /// Returns a copy shifted by (dx, dy).
    pub fn moved(&self, dx: f32, dy: f32) -> Self {
        let mut copy = *self;
        copy.x += dx;
        copy.y += dy;
        copy
    }

    fn top_left(&self) -> (f32, f32) {
        match self.origin {
            Origin::TopLeft => (self.x, self.y),
            Origin::Center => (self.x - self.w / 2.0, self.y - self.h / 2.0),
            Origin::CenterBottom => (self.x - self.w / 2.0, self.y - self.h),
            Origin::RightTop => (self.x - self.w, self.y),
        }
    }

    /// Emits this sprite into the frame.
    pub fn draw(&self, frame: &mut Frame, options: DrawOptions) {
        let (x, y) = self.top_left();
        frame.push(DrawCommand {
            image: self.image,
            x,
            y,
            w: self.w,
            h: self.h,
            options,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_center_bottom() {
        let mut sprite = Sprite::new(ImageId(0), 20.0, 10.0);
        sprite.set_position(100.0, 50.0, Origin::CenterBottom);

        let mut frame = Frame::new();
        sprite.draw(&mut frame, DrawOptions::new());

        let command = frame.commands()[0];
        assert_eq!(command.x, 90.0);
        assert_eq!(command.y, 40.0);
    }
}
