//! Scene state machine.
//!
//! Scenes (gameplay, result) implement a common trait and are swapped
//! through the crossfading [`SceneChanger`].

pub mod changer;
pub mod play;
pub mod result;
pub mod traits;

pub use changer::SceneChanger;
pub use play::{PlayMode, PlayScene};
pub use result::{GameResultData, ResultScene};
pub use traits::{Scene, Transition};
