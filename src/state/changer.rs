//! Crossfading scene changer.
//!
//! Owns the current scene and, during a transition, the incoming one.
//! The swap runs on a fixed countdown; both sides are rendered into
//! scratch frames and composited with complementary brightness weights,
//! so the fade darkens through the swap instead of alpha-blending.

use crate::engine::clock::TICKS_PER_SECOND;
use crate::input::events::GameAction;
use crate::render::Frame;
use crate::shared::snapshot::PlaySnapshot;
use crate::state::traits::{Scene, Transition};

pub struct SceneChanger {
    scene: Box<dyn Scene>,
    next_scene: Option<Box<dyn Scene>>,
    countdown: i32,
    from_frame: Frame,
    to_frame: Frame,
}

impl SceneChanger {
    /// Transition length: 80% of one second of ticks.
    pub fn max_countdown() -> i32 {
        TICKS_PER_SECOND * 4 / 5
    }

    pub fn new(mut initial: Box<dyn Scene>) -> Self {
        initial.init();
        Self {
            scene: initial,
            next_scene: None,
            countdown: 0,
            from_frame: Frame::new(),
            to_frame: Frame::new(),
        }
    }

    pub fn in_transition(&self) -> bool {
        self.countdown > 0
    }

    pub fn scene_name(&self) -> &'static str {
        self.scene.name()
    }

    /// Starts a crossfade into `next`.
    ///
    /// Only one transition can be in flight: a request while busy is a
    /// no-op (the incoming request is dropped, not queued).
    pub fn change_to(&mut self, next: Box<dyn Scene>) {
        if self.in_transition() {
            log::debug!(
                "SCENE: Change to {} ignored, transition already in flight",
                next.name()
            );
            return;
        }
        log::info!("SCENE: {} -> {}", self.scene.name(), next.name());
        self.next_scene = Some(next);
        self.countdown = Self::max_countdown();
    }

    /// Ticks the changer. Scenes are frozen while a transition runs;
    /// when the countdown hits zero the incoming scene becomes current
    /// and its init hook runs. Returns `false` when the active scene
    /// requested an application exit.
    pub fn update(&mut self) -> bool {
        if self.in_transition() {
            self.countdown -= 1;
            if self.countdown == 0
                && let Some(next) = self.next_scene.take()
            {
                self.scene = next;
                self.scene.init();
            }
            return true;
        }

        match self.scene.update() {
            Transition::None => true,
            Transition::To(next) => {
                self.change_to(next);
                true
            }
            Transition::Exit => false,
        }
    }

    /// Routes an action to the active scene. Input is dropped while a
    /// transition runs. Returns `false` on an exit request.
    pub fn handle_action(&mut self, action: &GameAction) -> bool {
        if self.in_transition() {
            return true;
        }
        match self.scene.handle_action(action) {
            Transition::None => true,
            Transition::To(next) => {
                self.change_to(next);
                true
            }
            Transition::Exit => false,
        }
    }

    /// Draws the active scene, or both sides of the crossfade.
    pub fn draw(&mut self, output: &mut Frame) {
        if !self.in_transition() {
            self.scene.draw(output);
            return;
        }

        let value = self.countdown as f32 / Self::max_countdown() as f32;

        self.from_frame.clear();
        self.scene.draw(&mut self.from_frame);
        output.composite(&self.from_frame, value);

        if let Some(next) = self.next_scene.as_mut() {
            self.to_frame.clear();
            next.draw(&mut self.to_frame);
            output.composite(&self.to_frame, 1.0 - value);
        }
    }

    pub fn stats(&self) -> Option<PlaySnapshot> {
        self.scene.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawOptions, ImageId};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StubScene {
        name: &'static str,
        inits: Arc<AtomicU32>,
    }

    impl StubScene {
        fn boxed(name: &'static str, inits: &Arc<AtomicU32>) -> Box<dyn Scene> {
            Box::new(Self {
                name,
                inits: Arc::clone(inits),
            })
        }
    }

    impl Scene for StubScene {
        fn name(&self) -> &'static str {
            self.name
        }
        fn init(&mut self) {
            self.inits.fetch_add(1, Ordering::Relaxed);
        }
        fn update(&mut self) -> Transition {
            Transition::None
        }
        fn handle_action(&mut self, _action: &GameAction) -> Transition {
            Transition::None
        }
        fn draw(&mut self, frame: &mut Frame) {
            frame.push(DrawCommand {
                image: ImageId(0),
                x: 0.0,
                y: 0.0,
                w: 1.0,
                h: 1.0,
                options: DrawOptions::new(),
            });
        }
    }

    #[test]
    fn test_transition_swaps_after_exact_countdown() {
        let inits = Arc::new(AtomicU32::new(0));
        let mut changer = SceneChanger::new(StubScene::boxed("first", &inits));
        changer.change_to(StubScene::boxed("second", &inits));
        assert!(changer.in_transition());

        for _ in 0..SceneChanger::max_countdown() - 1 {
            changer.update();
            assert!(changer.in_transition());
            assert_eq!(changer.scene_name(), "first");
        }

        changer.update();
        assert!(!changer.in_transition());
        assert_eq!(changer.scene_name(), "second");
        // Initial scene + swapped-in scene.
        assert_eq!(inits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_request_while_busy_is_ignored() {
        let inits = Arc::new(AtomicU32::new(0));
        let mut changer = SceneChanger::new(StubScene::boxed("first", &inits));
        changer.change_to(StubScene::boxed("second", &inits));
        changer.update();

        let countdown_before = changer.countdown;
        changer.change_to(StubScene::boxed("third", &inits));
        assert_eq!(changer.countdown, countdown_before);

        for _ in 0..SceneChanger::max_countdown() {
            changer.update();
        }
        assert_eq!(changer.scene_name(), "second");
    }

    #[test]
    fn test_draw_composites_both_sides_during_fade() {
        let inits = Arc::new(AtomicU32::new(0));
        let mut changer = SceneChanger::new(StubScene::boxed("first", &inits));

        let mut frame = Frame::new();
        changer.draw(&mut frame);
        // Idle: the scene draws directly, untouched brightness.
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.commands()[0].options.brightness, 1.0);

        changer.change_to(StubScene::boxed("second", &inits));
        changer.update();

        let mut frame = Frame::new();
        changer.draw(&mut frame);
        assert_eq!(frame.len(), 2);
        let outgoing = frame.commands()[0].options.brightness;
        let incoming = frame.commands()[1].options.brightness;
        assert!(outgoing > incoming);
        assert!((outgoing + incoming - 1.0).abs() < 1e-4);
    }
}
