// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! MPV-backed audio playback engine.
//!
//! The playback controller talks to audio hardware through the
//! [`AudioBackend`] capability trait, so the state machine never depends on
//! `libmpv` directly. The production implementation, [`MpvBackend`], is a
//! command proxy: it forwards instructions to a background worker thread
//! that owns the MPV handle, and the worker reports position, duration and
//! end-of-media back over a [`BackendSignal`] channel drained by the main
//! loop.
//!
//! Audio callbacks therefore originate off the UI thread, which is why the
//! controller consumes them as channel messages rather than direct calls.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use log::{error, warn};
use mpv::Format;

/// Playback notifications flowing from the audio engine to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendSignal {
    /// Playback position, in milliseconds.
    PositionChanged(u64),
    /// Media duration, in milliseconds.
    DurationChanged(u64),
    /// The current medium played to its natural end.
    EndOfMedia,
}

/// Commands the audio engine understands.
pub(crate) trait AudioBackend: Send {
    fn set_source(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Absolute seek, in milliseconds.
    fn set_position(&mut self, position_ms: u64) -> Result<()>;
    /// Volume in percent, `0..=100`.
    fn set_volume(&mut self, level: u32) -> Result<()>;
    fn set_muted(&mut self, muted: bool) -> Result<()>;
}

#[derive(Debug)]
enum MpvCommand {
    SetSource(PathBuf),
    Play,
    Pause,
    SetPosition(u64),
    SetVolume(u32),
    SetMuted(bool),
}

/// Handle to the MPV worker thread.
///
/// This struct performs no audio processing itself; each trait method sends
/// one instruction to the worker.
pub(crate) struct MpvBackend {
    command_tx: Sender<MpvCommand>,
}

impl MpvBackend {
    /// Spawns the audio worker thread and returns the backend handle.
    ///
    /// # Arguments
    ///
    /// * `signal_tx` - Channel used by the worker to report playback
    ///   progress and end-of-media back to the main loop.
    pub(crate) fn new(signal_tx: Sender<BackendSignal>) -> Self {
        let (command_tx, command_rx) = mpsc::channel();

        thread::spawn(move || {
            if let Err(e) = mpv_worker(command_rx, signal_tx) {
                error!("audio worker failure: {e:?}");
            }
        });

        Self { command_tx }
    }

    fn send(&self, command: MpvCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .context("Audio worker is gone")
    }
}

impl AudioBackend for MpvBackend {
    fn set_source(&mut self, path: &Path) -> Result<()> {
        self.send(MpvCommand::SetSource(path.to_path_buf()))
    }

    fn play(&mut self) -> Result<()> {
        self.send(MpvCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(MpvCommand::Pause)
    }

    fn set_position(&mut self, position_ms: u64) -> Result<()> {
        self.send(MpvCommand::SetPosition(position_ms))
    }

    fn set_volume(&mut self, level: u32) -> Result<()> {
        self.send(MpvCommand::SetVolume(level))
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.send(MpvCommand::SetMuted(muted))
    }
}

/// The primary execution loop of the audio worker.
///
/// Initializes a local `libmpv` context, then alternates between draining
/// pending commands and polling MPV property changes.
fn mpv_worker(command_rx: Receiver<MpvCommand>, signal_tx: Sender<BackendSignal>) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;

    loop {
        process_commands(&mut handler, &command_rx)?;
        process_mpv_events(&mut handler, &signal_tx);
    }
}

/// Drains and executes all pending commands from the controller.
fn process_commands(handler: &mut mpv::MpvHandler, command_rx: &Receiver<MpvCommand>) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            MpvCommand::SetSource(path) => {
                let file = path.to_string_lossy().into_owned();
                if let Err(e) = handler.command(&["loadfile", &file, "replace"]) {
                    warn!("failed to load {file}: {e:?}");
                    continue;
                }
                // Loading leaves the engine paused until an explicit play.
                handler.set_property("pause", true)?;
            }
            MpvCommand::Play => {
                handler.set_property("pause", false)?;
            }
            MpvCommand::Pause => {
                handler.set_property("pause", true)?;
            }
            MpvCommand::SetPosition(ms) => {
                let seconds = format!("{:.3}", ms as f64 / 1000.0);
                if let Err(e) = handler.command(&["seek", &seconds, "absolute"]) {
                    warn!("seek to {seconds}s failed: {e:?}");
                }
            }
            MpvCommand::SetVolume(level) => {
                handler.set_property("volume", f64::from(level))?;
            }
            MpvCommand::SetMuted(muted) => {
                handler.set_property("mute", muted)?;
            }
        }
    }

    Ok(())
}

/// Polls MPV for up to 50ms and forwards interesting events as signals.
fn process_mpv_events(handler: &mut mpv::MpvHandler, signal_tx: &Sender<BackendSignal>) {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let signal = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(BackendSignal::DurationChanged((seconds * 1000.0) as u64))
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(BackendSignal::PositionChanged((seconds * 1000.0) as u64))
                }
                _ => None,
            },
            mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => {
                Some(BackendSignal::EndOfMedia)
            }
            _ => None,
        };

        if let Some(signal) = signal {
            let _ = signal_tx.send(signal);
        }
    }
}
