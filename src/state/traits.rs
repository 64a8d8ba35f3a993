//! Traits for scene management.

use crate::input::events::GameAction;
use crate::render::Frame;
use crate::shared::snapshot::PlaySnapshot;

/// Transition result from handling an action or update.
pub enum Transition {
    /// Stay in the current scene.
    None,
    /// Crossfade into another scene.
    To(Box<dyn Scene>),
    /// Exit the application.
    Exit,
}

/// Common interface for all scenes.
///
/// Scenes run on the simulation thread; `update` is called once per tick
/// and `draw` once per render snapshot, strictly after the tick.
pub trait Scene: Send {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Called when the scene becomes current after a transition.
    fn init(&mut self) {}

    /// Advances the scene by one tick.
    fn update(&mut self) -> Transition;

    /// Handles a game action and returns any transition.
    fn handle_action(&mut self, action: &GameAction) -> Transition;

    /// Emits the scene's draw commands.
    fn draw(&mut self, frame: &mut Frame);

    /// Gameplay numbers for the snapshot, if this scene has them.
    fn stats(&self) -> Option<PlaySnapshot> {
        None
    }
}
