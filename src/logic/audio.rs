//! Audio handle that sends commands to the external audio player.
//!
//! The session core never opens, decodes or closes audio files. This
//! handle is its entire audio surface: load/play/stop plus volume and
//! speed, forwarded over a channel to whatever owns the device.

use crate::system::bus::{AudioCommand, SystemBus};
use crossbeam_channel::Sender;
use std::path::Path;

/// Wrapper for sending commands to the audio player.
///
/// The `AudioManager` does not perform audio operations directly.
/// Commands go through a channel so the simulation thread never blocks
/// on the device.
pub struct AudioManager {
    cmd_tx: Sender<AudioCommand>,
    current_volume: f32,
}

impl AudioManager {
    /// Creates a new audio manager connected to the system bus.
    pub fn new(bus: &SystemBus) -> Self {
        Self {
            cmd_tx: bus.audio_cmd_tx.clone(),
            current_volume: 1.0,
        }
    }

    /// Loads an audio file for playback.
    pub fn load_music(&mut self, path: &Path) {
        let _ = self.cmd_tx.send(AudioCommand::Load {
            path: path.to_path_buf(),
        });
    }

    /// Starts audio playback.
    pub fn play(&self) {
        let _ = self.cmd_tx.send(AudioCommand::Play);
    }

    /// Pauses audio playback.
    pub fn pause(&self) {
        let _ = self.cmd_tx.send(AudioCommand::Pause);
    }

    /// Stops playback and resets position.
    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(AudioCommand::Stop);
    }

    /// Sets the playback speed (rate).
    pub fn set_speed(&mut self, speed: f32) {
        let _ = self.cmd_tx.send(AudioCommand::SetSpeed { speed });
    }

    /// Sets the applied volume (0.0 to 1.0). Deduplicated at the
    /// timeline level; every call here is forwarded.
    pub fn set_volume(&mut self, volume: f32) {
        self.current_volume = volume;
        let _ = self.cmd_tx.send(AudioCommand::SetVolume { volume });
    }

    /// Last volume pushed to the player.
    pub fn current_volume(&self) -> f32 {
        self.current_volume
    }
}
