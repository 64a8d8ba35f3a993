//! Retained draw-command list.
//!
//! A [`Frame`] is the externally-owned drawable surface of the core: an
//! ordered list of "draw this image there, with this color transform"
//! commands. The scene changer also uses frames as its two scratch
//! buffers and composites them with a brightness weight, which is how the
//! crossfade darkens through the swap instead of alpha-blending.

use crate::render::sprite::ImageId;

/// Color transform applied to a single draw command.
///
/// `brightness` scales the HSV value channel (0 = black, 1 = untouched),
/// `alpha` scales opacity, `tint` replaces the source color wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    pub brightness: f32,
    pub alpha: f32,
    pub tint: Option<[f32; 4]>,
}

impl DrawOptions {
    pub fn new() -> Self {
        Self {
            brightness: 1.0,
            alpha: 1.0,
            tint: None,
        }
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = Some(tint);
        self
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// One positioned image with its transform. Coordinates are the top-left
/// corner in logical screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub image: ImageId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub options: DrawOptions,
}

/// Ordered list of draw commands for one rendered surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Drops all commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Appends every command of `other` with its brightness scaled by
    /// `brightness`. This is the crossfade compositing primitive.
    pub fn composite(&mut self, other: &Frame, brightness: f32) {
        for command in &other.commands {
            let mut scaled = *command;
            scaled.options.brightness *= brightness;
            self.commands.push(scaled);
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_scales_brightness() {
        let mut scratch = Frame::new();
        scratch.push(DrawCommand {
            image: ImageId(1),
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 10.0,
            options: DrawOptions::new().with_brightness(0.5),
        });

        let mut output = Frame::new();
        output.composite(&scratch, 0.5);

        assert_eq!(output.len(), 1);
        assert!((output.commands()[0].options.brightness - 0.25).abs() < 1e-6);
    }
}
