//! HUD drawers: read-only views over the feedback state that emit draw
//! commands into the current frame.

pub mod background;
pub mod combo;
pub mod meter;
pub mod score;

pub use background::BackgroundDrawer;
pub use combo::ComboDrawer;
pub use meter::MeterDrawer;
pub use score::ScoreDrawer;

use crate::render::ImageId;

/// Image handles for the HUD, resolved by the external skin loader.
#[derive(Debug, Clone, Copy)]
pub struct SkinImages {
    pub background: ImageId,
    pub meter_panel: ImageId,
    pub meter_unit: ImageId,
    pub score_digits: [ImageId; 10],
    pub combo_digits: [ImageId; 10],
}

impl SkinImages {
    /// Sequentially numbered handles for headless runs and tests.
    pub fn placeholder() -> Self {
        let mut next = 0u32;
        let mut take = || {
            next += 1;
            ImageId(next - 1)
        };
        Self {
            background: take(),
            meter_panel: take(),
            meter_unit: take(),
            score_digits: std::array::from_fn(|_| take()),
            combo_digits: std::array::from_fn(|_| take()),
        }
    }
}
