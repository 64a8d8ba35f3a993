//! Simulation thread: fixed-timestep tick loop over the scene machine.
//!
//! The loop runs at the virtual tick rate and coordinates input actions,
//! system events and render snapshots. Rendering consumes snapshots; it
//! never observes a tick in progress.

pub mod audio;

use crate::engine::clock::TICKS_PER_SECOND;
use crate::render::Frame;
use crate::shared::snapshot::{RenderState, SceneSnapshot};
use crate::state::SceneChanger;
use crate::state::traits::Scene;
use crate::system::bus::{SystemBus, SystemEvent};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on catch-up ticks per loop iteration, to keep a long
/// stall from spiraling instead of just slowing down.
const MAX_CATCH_UP: u32 = 40;

/// Spawns the simulation thread over the given initial scene.
///
/// The thread runs a fixed-timestep loop that:
/// 1. Routes input actions to the active scene
/// 2. Handles system events (focus, quit)
/// 3. Ticks the scene machine at the virtual tick rate
/// 4. Sends a render snapshot after each update batch
pub fn start_thread(bus: SystemBus, initial: Box<dyn Scene>) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");

            let mut changer = SceneChanger::new(initial);

            let mut accumulator = Duration::new(0, 0);
            let mut last_time = Instant::now();
            let target_dt = Duration::from_secs_f64(1.0 / TICKS_PER_SECOND as f64);

            loop {
                // 1. Process input actions
                while let Ok(action) = bus.action_rx.try_recv() {
                    if !changer.handle_action(&action) {
                        log::info!("LOGIC: Exit requested by scene");
                        return;
                    }
                }

                // 2. Handle system events
                while let Ok(sys_evt) = bus.sys_rx.try_recv() {
                    match sys_evt {
                        SystemEvent::Quit => {
                            log::info!("LOGIC: Quit received...");
                            return;
                        }
                        SystemEvent::FocusLost | SystemEvent::FocusGained => {}
                    }
                }

                // 3. Fixed-timestep update loop
                let current_time = Instant::now();
                accumulator += current_time - last_time;
                last_time = current_time;

                let mut updated = false;
                let mut loops = 0;
                while accumulator >= target_dt && loops < MAX_CATCH_UP {
                    if !changer.update() {
                        log::info!("LOGIC: Session finished");
                        return;
                    }
                    accumulator -= target_dt;
                    loops += 1;
                    updated = true;
                }

                // 4. Send render snapshot only if we updated.
                // This avoids duplicate snapshots with the same tick time.
                if updated {
                    let mut frame = Frame::new();
                    changer.draw(&mut frame);
                    let snapshot = RenderState::Live(SceneSnapshot {
                        scene: changer.scene_name(),
                        in_transition: changer.in_transition(),
                        frame,
                        play: changer.stats(),
                    });
                    let _ = bus.render_tx.try_send(snapshot);
                }

                // Adaptive sleep: skip it while catching up
                if loops == 0 {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
        .expect("Failed to spawn Logic thread")
}
