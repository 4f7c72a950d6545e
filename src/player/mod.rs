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

//! Playback control and state management.
//!
//! [`PlaybackController`] owns the current play queue and the play/pause
//! state machine. It is the only component that commands the audio backend;
//! everything else asks for playback by publishing events.
//!
//! # State machine
//!
//! * `Idle` - no queue.
//! * `Loaded` - a queue is set and a song is selected, nothing is audible
//!   (reached when the queue plays to its end).
//! * `Playing` / `Paused` - the obvious pair.
//!
//! A *one-shot* interrupts the queue: the controller remembers where it was,
//! plays the external song, and when that song ends resumes the queue at the
//! remembered position (replaying that entry). Mute and volume are
//! orthogonal to all of the above and never touch the playback position.
//!
//! Every successful song change publishes [`Event::SongPlayed`]; position
//! and duration reports from the backend are republished as
//! [`Event::SongProgress`] / [`Event::SongRange`] only when the value
//! actually changed.

mod backend;

pub(crate) use backend::{AudioBackend, BackendSignal, MpvBackend};

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::{
    bus::{Event, EventBus},
    model::{Selection, SongInfo},
};

/// Represents the current status of the playback engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Idle,
    Loaded,
    Playing,
    Paused,
}

pub(crate) struct PlaybackController {
    backend: Box<dyn AudioBackend>,
    bus: EventBus,
    selection: Selection,

    queue: Vec<PathBuf>,
    index: Option<usize>,
    state: PlayerState,

    /// Set while a song outside the queue is playing.
    one_shot: bool,
    /// Queue position to resume after a one-shot interruption.
    saved_index: Option<usize>,

    muted: bool,
    volume: u32,

    now_playing: Option<SongInfo>,
    current_path: Option<PathBuf>,

    last_position_ms: Option<u64>,
    last_duration_ms: Option<u64>,
}

impl PlaybackController {
    pub(crate) fn new(
        bus: EventBus,
        selection: Selection,
        mut backend: Box<dyn AudioBackend>,
        volume: u32,
    ) -> Self {
        let volume = volume.min(100);
        if let Err(e) = backend.set_volume(volume) {
            warn!("failed to set initial volume: {e}");
        }

        Self {
            backend,
            bus,
            selection,
            queue: Vec::new(),
            index: None,
            state: PlayerState::Idle,
            one_shot: false,
            saved_index: None,
            muted: false,
            volume,
            now_playing: None,
            current_path: None,
            last_position_ms: None,
            last_duration_ms: None,
        }
    }

    pub(crate) fn state(&self) -> PlayerState {
        self.state
    }

    pub(crate) fn now_playing(&self) -> Option<&SongInfo> {
        self.now_playing.as_ref()
    }

    pub(crate) fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub(crate) fn volume(&self) -> u32 {
        self.volume
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.muted
    }

    /// Begins playing the selection set as an ordered queue.
    ///
    /// An empty selection is a no-op; the controller stays as it was.
    pub(crate) fn start_selected(&mut self) {
        self.start_queue(self.selection.to_vec());
    }

    /// Begins playing the given songs from the first entry.
    pub(crate) fn start_queue(&mut self, songs: Vec<PathBuf>) {
        let Some(first) = songs.first().cloned() else {
            return;
        };
        if self.try_play(&first) {
            self.queue = songs;
            self.index = Some(0);
            self.one_shot = false;
            self.saved_index = None;
        }
    }

    /// Jumps playback to `path` within the current queue.
    ///
    /// A path not present in the queue is ignored.
    pub(crate) fn song_shot(&mut self, path: &Path) {
        let Some(position) = self.queue.iter().position(|p| p == path) else {
            debug!("shot target not in queue: {path:?}");
            return;
        };
        if self.try_play(path) {
            self.index = Some(position);
            self.one_shot = false;
            self.saved_index = None;
        }
    }

    /// Plays `path` immediately, preserving any active queue.
    ///
    /// A path inside the queue behaves like [`Self::song_shot`]. Anything
    /// else is a transient interruption: the queue position is remembered
    /// and restored when the one-shot finishes.
    pub(crate) fn song_one_shot(&mut self, path: &Path) {
        if self.queue.iter().any(|p| p == path) {
            self.song_shot(path);
            return;
        }
        if self.try_play(path) {
            if !self.one_shot {
                self.saved_index = self.index;
            }
            self.one_shot = true;
        }
    }

    /// Advances to the next song in the queue; a no-op at the end.
    pub(crate) fn play_next(&mut self) {
        let Some(index) = self.index else {
            return;
        };
        if index + 1 < self.queue.len() {
            let path = self.queue[index + 1].clone();
            if self.try_play(&path) {
                self.index = Some(index + 1);
                self.one_shot = false;
                self.saved_index = None;
            }
        }
    }

    /// Steps back to the previous song in the queue; a no-op at the start.
    pub(crate) fn play_previous(&mut self) {
        let Some(index) = self.index else {
            return;
        };
        if index > 0 {
            let path = self.queue[index - 1].clone();
            if self.try_play(&path) {
                self.index = Some(index - 1);
                self.one_shot = false;
                self.saved_index = None;
            }
        }
    }

    /// Flips between playing and paused.
    ///
    /// With nothing loaded this is a no-op; from `Loaded` it starts the
    /// engine again.
    pub(crate) fn toggle_play_pause(&mut self) {
        match self.state {
            PlayerState::Playing => {
                if self.backend.pause().is_ok() {
                    self.state = PlayerState::Paused;
                }
            }
            PlayerState::Paused | PlayerState::Loaded => {
                if self.backend.play().is_ok() {
                    self.state = PlayerState::Playing;
                }
            }
            PlayerState::Idle => {}
        }
    }

    /// Handles a user seek request, in milliseconds.
    pub(crate) fn seek(&mut self, position_ms: u64) {
        if matches!(self.state, PlayerState::Playing | PlayerState::Paused) {
            if let Err(e) = self.backend.set_position(position_ms) {
                warn!("seek failed: {e}");
            }
        }
    }

    pub(crate) fn set_volume(&mut self, level: u32) {
        let level = level.min(100);
        if self.backend.set_volume(level).is_ok() {
            self.volume = level;
        }
    }

    /// Mute suppresses output without altering the playback position.
    pub(crate) fn toggle_mute(&mut self) {
        let muted = !self.muted;
        if self.backend.set_muted(muted).is_ok() {
            self.muted = muted;
        }
    }

    /// Processes one notification from the audio engine.
    pub(crate) fn on_signal(&mut self, signal: BackendSignal) {
        match signal {
            BackendSignal::PositionChanged(ms) => {
                if self.last_position_ms != Some(ms) {
                    self.last_position_ms = Some(ms);
                    self.bus.publish(Event::SongProgress(ms));
                }
            }
            BackendSignal::DurationChanged(ms) => {
                if self.last_duration_ms != Some(ms) {
                    self.last_duration_ms = Some(ms);
                    self.bus.publish(Event::SongRange(ms));
                }
            }
            BackendSignal::EndOfMedia => self.end_of_media(),
        }
    }

    /// End-of-media advance.
    ///
    /// A finished one-shot resumes the queue at the saved position (the
    /// interrupted entry plays again); otherwise playback advances, or stops
    /// at the end of the queue without wrapping around.
    fn end_of_media(&mut self) {
        if self.one_shot {
            self.one_shot = false;
            if let Some(saved) = self.saved_index.take() {
                if let Some(path) = self.queue.get(saved).cloned() {
                    if self.try_play(&path) {
                        self.index = Some(saved);
                    }
                    return;
                }
            }
        }

        let Some(index) = self.index else {
            self.stop();
            return;
        };
        if index + 1 < self.queue.len() {
            let path = self.queue[index + 1].clone();
            if self.try_play(&path) {
                self.index = Some(index + 1);
            } else {
                self.stop();
            }
        } else {
            self.stop();
        }
    }

    fn stop(&mut self) {
        self.state = if self.queue.is_empty() {
            PlayerState::Idle
        } else {
            PlayerState::Loaded
        };
    }

    /// Loads and starts `path`, publishing [`Event::SongPlayed`].
    ///
    /// Nothing changes on failure: a path without the performer/album/title
    /// structure, or one the backend rejects, leaves queue, index and state
    /// exactly as they were.
    fn try_play(&mut self, path: &Path) -> bool {
        let Some(info) = SongInfo::from_path(path) else {
            warn!("rejecting path without performer/album/title structure: {path:?}");
            return false;
        };
        if let Err(e) = self.backend.set_source(path) {
            warn!("failed to load {path:?}: {e}");
            return false;
        }
        if let Err(e) = self.backend.play() {
            warn!("failed to start {path:?}: {e}");
            return false;
        }

        self.state = PlayerState::Playing;
        self.now_playing = Some(info);
        self.current_path = Some(path.to_path_buf());
        self.last_position_ms = None;
        self.last_duration_ms = None;
        self.bus.publish(Event::SongPlayed(path.to_path_buf()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventKind, Mailbox};
    use std::sync::{Arc, Mutex};

    /// Records every backend call for later inspection.
    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl AudioBackend for FakeBackend {
        fn set_source(&mut self, path: &Path) -> anyhow::Result<()> {
            self.record(format!("source {}", path.display()));
            Ok(())
        }

        fn play(&mut self) -> anyhow::Result<()> {
            self.record("play".into());
            Ok(())
        }

        fn pause(&mut self) -> anyhow::Result<()> {
            self.record("pause".into());
            Ok(())
        }

        fn set_position(&mut self, position_ms: u64) -> anyhow::Result<()> {
            self.record(format!("position {position_ms}"));
            Ok(())
        }

        fn set_volume(&mut self, level: u32) -> anyhow::Result<()> {
            self.record(format!("volume {level}"));
            Ok(())
        }

        fn set_muted(&mut self, muted: bool) -> anyhow::Result<()> {
            self.record(format!("muted {muted}"));
            Ok(())
        }
    }

    struct Fixture {
        bus: EventBus,
        selection: Selection,
        controller: PlaybackController,
        backend: FakeBackend,
        played: Mailbox,
    }

    fn fixture() -> Fixture {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let backend = FakeBackend::default();
        let played = bus.register();
        bus.subscribe(played.id(), &[EventKind::SongPlayed]);
        let controller = PlaybackController::new(
            bus.clone(),
            selection.clone(),
            Box::new(backend.clone()),
            50,
        );
        Fixture {
            bus,
            selection,
            controller,
            backend,
            played,
        }
    }

    fn song(name: &str) -> PathBuf {
        PathBuf::from(format!("/music/Performer/Album/{name}.mp3"))
    }

    fn played_paths(mailbox: &Mailbox) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        while let Some(event) = mailbox.try_recv() {
            if let Event::SongPlayed(path) = event {
                paths.push(path);
            }
        }
        paths
    }

    #[test]
    fn empty_selection_start_is_a_no_op() {
        let mut fx = fixture();
        fx.controller.start_selected();

        assert_eq!(fx.controller.state(), PlayerState::Idle);
        assert!(played_paths(&fx.played).is_empty());
    }

    #[test]
    fn start_plays_the_first_song() {
        let mut fx = fixture();
        fx.selection.insert(song("a"));
        fx.selection.insert(song("b"));
        fx.selection.insert(song("c"));

        fx.controller.start_selected();

        assert_eq!(fx.controller.state(), PlayerState::Playing);
        assert_eq!(played_paths(&fx.played), vec![song("a")]);
        assert_eq!(fx.controller.current_path(), Some(song("a").as_path()));
    }

    #[test]
    fn next_walks_the_queue_and_stops_at_the_end() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a"), song("b"), song("c")]);
        played_paths(&fx.played);

        fx.controller.play_next();
        fx.controller.play_next();
        assert_eq!(played_paths(&fx.played), vec![song("b"), song("c")]);

        // No wraparound: a third advance stays on the last song.
        fx.controller.play_next();
        assert!(played_paths(&fx.played).is_empty());
        assert_eq!(fx.controller.current_path(), Some(song("c").as_path()));
    }

    #[test]
    fn previous_at_the_start_is_a_no_op() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a"), song("b")]);
        played_paths(&fx.played);

        fx.controller.play_previous();

        assert!(played_paths(&fx.played).is_empty());
        assert_eq!(fx.controller.current_path(), Some(song("a").as_path()));
    }

    #[test]
    fn shot_jumps_within_the_queue() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a"), song("b"), song("c")]);
        played_paths(&fx.played);

        fx.controller.song_shot(&song("c"));
        assert_eq!(played_paths(&fx.played), vec![song("c")]);

        // Next from the jumped-to position: end of queue, no-op.
        fx.controller.play_next();
        assert!(played_paths(&fx.played).is_empty());
    }

    #[test]
    fn shot_outside_the_queue_is_ignored() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a")]);
        played_paths(&fx.played);

        fx.controller.song_shot(&song("elsewhere"));

        assert!(played_paths(&fx.played).is_empty());
        assert_eq!(fx.controller.current_path(), Some(song("a").as_path()));
    }

    #[test]
    fn one_shot_resumes_the_interrupted_entry() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a"), song("b")]);
        played_paths(&fx.played);

        let external = PathBuf::from("/elsewhere/Performer/Album/x.mp3");
        fx.controller.song_one_shot(&external);
        assert_eq!(played_paths(&fx.played), vec![external.clone()]);

        // End of the one-shot resumes at the saved position - song a again,
        // not an advance to b.
        fx.controller.on_signal(BackendSignal::EndOfMedia);
        assert_eq!(played_paths(&fx.played), vec![song("a")]);

        // And the queue continues normally afterwards.
        fx.controller.on_signal(BackendSignal::EndOfMedia);
        assert_eq!(played_paths(&fx.played), vec![song("b")]);
    }

    #[test]
    fn one_shot_of_a_queued_song_is_a_plain_jump() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a"), song("b")]);
        played_paths(&fx.played);

        fx.controller.song_one_shot(&song("b"));
        assert_eq!(played_paths(&fx.played), vec![song("b")]);

        // No saved position: finishing b ends the queue.
        fx.controller.on_signal(BackendSignal::EndOfMedia);
        assert!(played_paths(&fx.played).is_empty());
        assert_eq!(fx.controller.state(), PlayerState::Loaded);
    }

    #[test]
    fn one_shot_without_a_queue_returns_to_idle() {
        let mut fx = fixture();
        let external = PathBuf::from("/elsewhere/Performer/Album/x.mp3");

        fx.controller.song_one_shot(&external);
        assert_eq!(fx.controller.state(), PlayerState::Playing);

        fx.controller.on_signal(BackendSignal::EndOfMedia);
        assert_eq!(fx.controller.state(), PlayerState::Idle);
    }

    #[test]
    fn end_of_media_advances_and_finally_stops() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a"), song("b")]);
        played_paths(&fx.played);

        fx.controller.on_signal(BackendSignal::EndOfMedia);
        assert_eq!(played_paths(&fx.played), vec![song("b")]);
        assert_eq!(fx.controller.state(), PlayerState::Playing);

        fx.controller.on_signal(BackendSignal::EndOfMedia);
        assert!(played_paths(&fx.played).is_empty());
        assert_eq!(fx.controller.state(), PlayerState::Loaded);
    }

    #[test]
    fn malformed_path_is_rejected_without_state_change() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![PathBuf::from("short.mp3")]);

        assert_eq!(fx.controller.state(), PlayerState::Idle);
        assert!(played_paths(&fx.played).is_empty());
        assert!(!fx.backend.calls().iter().any(|c| c.starts_with("source")));
    }

    #[test]
    fn toggle_flips_between_playing_and_paused() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a")]);

        fx.controller.toggle_play_pause();
        assert_eq!(fx.controller.state(), PlayerState::Paused);

        fx.controller.toggle_play_pause();
        assert_eq!(fx.controller.state(), PlayerState::Playing);

        let calls = fx.backend.calls();
        assert!(calls.contains(&"pause".to_string()));
    }

    #[test]
    fn toggle_with_nothing_loaded_is_a_no_op() {
        let mut fx = fixture();
        fx.controller.toggle_play_pause();

        assert_eq!(fx.controller.state(), PlayerState::Idle);
        assert!(fx.backend.calls().iter().all(|c| c.starts_with("volume")));
    }

    #[test]
    fn progress_is_republished_only_on_change() {
        let fx = fixture();
        let progress = fx.bus.register();
        fx.bus.subscribe(
            progress.id(),
            &[EventKind::SongProgress, EventKind::SongRange],
        );
        let mut controller = fx.controller;

        controller.on_signal(BackendSignal::PositionChanged(1000));
        controller.on_signal(BackendSignal::PositionChanged(1000));
        controller.on_signal(BackendSignal::PositionChanged(2000));
        controller.on_signal(BackendSignal::DurationChanged(90_000));
        controller.on_signal(BackendSignal::DurationChanged(90_000));

        let mut events = Vec::new();
        while let Some(event) = progress.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                Event::SongProgress(1000),
                Event::SongProgress(2000),
                Event::SongRange(90_000),
            ]
        );
    }

    #[test]
    fn seek_commands_the_backend() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a")]);
        fx.controller.seek(42_000);

        assert!(fx.backend.calls().contains(&"position 42000".to_string()));
    }

    #[test]
    fn seek_with_nothing_loaded_is_ignored() {
        let mut fx = fixture();
        fx.controller.seek(42_000);

        assert!(!fx.backend.calls().iter().any(|c| c.starts_with("position")));
    }

    #[test]
    fn mute_never_touches_the_position() {
        let mut fx = fixture();
        fx.controller.start_queue(vec![song("a")]);
        let before = fx.backend.calls();

        fx.controller.toggle_mute();
        assert!(fx.controller.is_muted());
        fx.controller.toggle_mute();
        assert!(!fx.controller.is_muted());

        let after = fx.backend.calls();
        let new_calls = &after[before.len()..];
        assert_eq!(new_calls, ["muted true", "muted false"]);
    }

    #[test]
    fn volume_is_clamped_to_percent() {
        let mut fx = fixture();
        fx.controller.set_volume(250);

        assert_eq!(fx.controller.volume(), 100);
        assert!(fx.backend.calls().contains(&"volume 100".to_string()));
    }
}
