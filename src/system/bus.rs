//! Shared channel infrastructure between system threads.
//!
//! The `SystemBus` provides a centralized communication hub for the
//! simulation and render sides, using lock-free channels for message
//! passing. The audio command channel is the only interface the core has
//! to audio playback; the device side lives outside this crate.

use crate::input::events::GameAction;
use crate::shared::snapshot::RenderState;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::path::PathBuf;

/// System-level events broadcast to the simulation thread.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Window lost focus.
    FocusLost,
    /// Window gained focus.
    FocusGained,
    /// Application shutdown requested.
    Quit,
}

/// Commands sent to the external audio player.
#[derive(Debug, Clone)]
pub enum AudioCommand {
    /// Load an audio file for playback.
    Load { path: PathBuf },
    /// Start playback.
    Play,
    /// Pause playback.
    Pause,
    /// Stop and reset playback position.
    Stop,
    /// Change playback speed.
    SetSpeed { speed: f32 },
    /// Change volume level.
    SetVolume { volume: f32 },
}

/// Aggregates the cross-thread communication channels.
///
/// The `SystemBus` is the central hub for inter-thread communication,
/// providing channels for:
/// - Game actions from the input side
/// - Render snapshots to the render side
/// - System events (focus, quit)
/// - Audio commands to the audio player
#[derive(Clone)]
pub struct SystemBus {
    /// Input → Logic: processed gameplay actions.
    pub action_tx: Sender<GameAction>,
    pub action_rx: Receiver<GameAction>,

    /// Logic → Render: composed frame snapshots.
    pub render_tx: Sender<RenderState>,
    pub render_rx: Receiver<RenderState>,

    /// Main → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,

    /// Logic → Audio: audio commands.
    pub audio_cmd_tx: Sender<AudioCommand>,
    pub audio_cmd_rx: Receiver<AudioCommand>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (action_tx, action_rx) = unbounded();

        // Bounded render channel: max 2 frames queued to limit latency
        let (render_tx, render_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();
        let (audio_cmd_tx, audio_cmd_rx) = unbounded();

        Self {
            action_tx,
            action_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
            audio_cmd_tx,
            audio_cmd_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
