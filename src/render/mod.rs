//! Draw-command primitives shared with the render side.
//!
//! The simulation never touches pixels. Every visual component emits
//! positioned-image commands into a [`Frame`]; rasterizing those commands
//! belongs to the external renderer.

pub mod frame;
pub mod sprite;

pub use frame::{DrawCommand, DrawOptions, Frame};
pub use sprite::{ImageId, Origin, Sprite};

/// Logical screen width in pixels.
pub const SCREEN_W: f32 = 1280.0;
/// Logical screen height in pixels.
pub const SCREEN_H: f32 = 720.0;
