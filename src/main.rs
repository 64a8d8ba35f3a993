//! Application entry point and thread bootstrapper.

mod engine;
mod error;
mod input;
mod logic;
mod models;
mod render;
mod shared;
mod state;
mod system;
mod views;

use crate::models::chart::Chart;
use crate::models::replay::ReplayData;
use crate::models::settings::SettingsState;
use crate::shared::snapshot::RenderState;
use crate::state::{PlayMode, PlayScene};
use crate::system::bus::SystemBus;
use crate::views::SkinImages;
use crossbeam_channel::select;

fn main() {
    unsafe {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    log::info!("MAIN: Booting rplay...");

    let settings = SettingsState::load();
    let bus = SystemBus::new();

    // Headless demo session: an autogenerated chart played back by its
    // own autoplay replay, so the whole pipeline runs without a window.
    let chart = Chart::demo(settings.key_count, 400);
    let replay = ReplayData::autoplay(&chart);
    let skin = SkinImages::placeholder();

    let scene = match PlayScene::new(&bus, chart, settings, &skin, PlayMode::Replay(replay)) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("MAIN: Cannot enter play scene: {}", e);
            std::process::exit(1);
        }
    };

    let render_rx = bus.render_rx.clone();
    let audio_rx = bus.audio_cmd_rx.clone();
    let handle = logic::start_thread(bus, Box::new(scene));

    // Headless render/audio drain: the real renderer and audio player
    // live outside this crate and consume the same two channels.
    let mut last_logged_second = i64::MIN;
    loop {
        select! {
            recv(render_rx) -> msg => match msg {
                Ok(RenderState::Live(snapshot)) => {
                    if let Some(play) = &snapshot.play {
                        let second = play.time_ms / 1000;
                        if second != last_logged_second {
                            last_logged_second = second;
                            log::info!(
                                "RENDER: t={}ms score={} combo={} acc={:.2}% marks={} cmds={}",
                                play.time_ms,
                                play.score_display,
                                play.combo,
                                play.accuracy,
                                play.mark_count,
                                snapshot.frame.len()
                            );
                        }
                    }
                }
                Ok(RenderState::Empty) => {}
                Err(_) => break,
            },
            recv(audio_rx) -> msg => match msg {
                Ok(cmd) => log::debug!("AUDIO: {:?}", cmd),
                Err(_) => break,
            },
        }
    }

    let _ = handle.join();
    log::info!("MAIN: Shutdown complete");
}
