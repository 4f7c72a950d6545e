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

//! The playback control bar.
//!
//! Owns the [`PlaybackController`] and is the single consumer of the
//! playback-request events (`SongOneShot`, `SongShot`,
//! `StartSelectedPlayback`, `StartPlaylistPlayback`, `SongReprogress`).
//! Playlist ids are resolved to song paths here, so the controller itself
//! never touches the store. Playback keys (play/pause, skip, volume, mute)
//! are routed straight into controller operations.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use log::warn;

use crate::{
    bus::{Event, EventBus, EventKind, Mailbox},
    db::SqliteStore,
    model::{Selection, SongInfo},
    player::{AudioBackend, BackendSignal, PlaybackController, PlayerState},
};

const VOLUME_DELTA: u32 = 5;

pub(crate) struct ControlBar {
    mailbox: Mailbox,
    controller: PlaybackController,
}

impl ControlBar {
    pub(crate) fn new(
        bus: EventBus,
        selection: Selection,
        backend: Box<dyn AudioBackend>,
        volume: u32,
    ) -> Self {
        let mailbox = bus.register();
        bus.subscribe(
            mailbox.id(),
            &[
                EventKind::SongOneShot,
                EventKind::SongShot,
                EventKind::StartSelectedPlayback,
                EventKind::StartPlaylistPlayback,
                EventKind::SongReprogress,
            ],
        );

        Self {
            mailbox,
            controller: PlaybackController::new(bus, selection, backend, volume),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') => self.controller.toggle_play_pause(),
            KeyCode::Char('>') => self.controller.play_next(),
            KeyCode::Char('<') => self.controller.play_previous(),
            KeyCode::Char('m') => self.controller.toggle_mute(),
            KeyCode::Char('-') => {
                let level = self.controller.volume().saturating_sub(VOLUME_DELTA);
                self.controller.set_volume(level);
            }
            KeyCode::Char('=') | KeyCode::Char('+') => {
                let level = self.controller.volume() + VOLUME_DELTA;
                self.controller.set_volume(level);
            }
            _ => {}
        }
    }

    /// Drains the playback-request mailbox into controller operations.
    pub(crate) fn pump(&mut self, store: &SqliteStore) {
        while let Some(event) = self.mailbox.try_recv() {
            match event {
                Event::SongOneShot(path) => self.controller.song_one_shot(&path),
                Event::SongShot(path) => self.controller.song_shot(&path),
                Event::StartSelectedPlayback => self.controller.start_selected(),
                Event::StartPlaylistPlayback(id) => match store.songs_for_playlist(id) {
                    Ok(songs) => {
                        let paths: Vec<PathBuf> =
                            songs.into_iter().map(|s| PathBuf::from(s.path)).collect();
                        self.controller.start_queue(paths);
                    }
                    Err(e) => warn!("cannot start playlist {id}: {e}"),
                },
                Event::SongReprogress(ms) => self.controller.seek(ms),
                _ => {}
            }
        }
    }

    /// Forwards one audio-engine notification to the controller.
    pub(crate) fn on_signal(&mut self, signal: BackendSignal) {
        self.controller.on_signal(signal);
    }

    pub(crate) fn state(&self) -> PlayerState {
        self.controller.state()
    }

    pub(crate) fn now_playing(&self) -> Option<&SongInfo> {
        self.controller.now_playing()
    }

    pub(crate) fn volume(&self) -> u32 {
        self.controller.volume()
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.controller.is_muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct NullBackend {
        sources: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl AudioBackend for NullBackend {
        fn set_source(&mut self, path: &Path) -> anyhow::Result<()> {
            self.sources.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
        fn play(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn pause(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn set_position(&mut self, _: u64) -> anyhow::Result<()> {
            Ok(())
        }
        fn set_volume(&mut self, _: u32) -> anyhow::Result<()> {
            Ok(())
        }
        fn set_muted(&mut self, _: bool) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn start_playlist_playback_resolves_songs_through_the_store() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Walk").unwrap();
        store
            .insert_song(id, Path::new("/m/Performer/Album/one.mp3"))
            .unwrap();

        let backend = NullBackend::default();
        let mut bar = ControlBar::new(bus.clone(), selection, Box::new(backend.clone()), 50);

        bus.publish(Event::StartPlaylistPlayback(id));
        bar.pump(&store);

        assert_eq!(bar.state(), PlayerState::Playing);
        assert_eq!(
            backend.sources.lock().unwrap().as_slice(),
            [PathBuf::from("/m/Performer/Album/one.mp3")]
        );
    }

    #[test]
    fn one_shot_event_reaches_the_controller() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        let mut bar = ControlBar::new(
            bus.clone(),
            selection,
            Box::new(NullBackend::default()),
            50,
        );

        bus.publish(Event::SongOneShot(PathBuf::from(
            "/m/Performer/Album/x.mp3",
        )));
        bar.pump(&store);

        assert_eq!(bar.state(), PlayerState::Playing);
        assert_eq!(bar.now_playing().unwrap().title, "x");
    }

    #[test]
    fn volume_keys_step_by_five_percent() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let mut bar = ControlBar::new(bus, selection, Box::new(NullBackend::default()), 50);

        bar.handle_key(key(KeyCode::Char('+')));
        assert_eq!(bar.volume(), 55);

        bar.handle_key(key(KeyCode::Char('-')));
        bar.handle_key(key(KeyCode::Char('-')));
        assert_eq!(bar.volume(), 45);

        bar.handle_key(key(KeyCode::Char('m')));
        assert!(bar.is_muted());
    }
}
