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

//! The playlist song table.
//!
//! Shows either the current selection or the songs of a persisted playlist,
//! as chosen in the playlist tree. The now-playing song is tracked through
//! [`Event::SongPlayed`] and highlighted; activating a row jumps playback
//! there ([`Event::SongShot`]) or requests a one-shot outside the queue.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use log::warn;

use crate::{
    bus::{Event, EventBus, EventKind, Mailbox},
    db::SqliteStore,
    model::Selection,
};

/// What the table is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Selections,
    Playlist(i64),
}

pub(crate) struct SongRow {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
}

pub(crate) struct ListTable {
    bus: EventBus,
    mailbox: Mailbox,
    selection: Selection,
    source: Source,
    pub(crate) rows: Vec<SongRow>,
    pub(crate) cursor: usize,
    pub(crate) now_playing: Option<PathBuf>,
}

impl ListTable {
    pub(crate) fn new(bus: EventBus, selection: Selection) -> Self {
        let mailbox = bus.register();
        bus.subscribe(
            mailbox.id(),
            &[
                EventKind::ShowSelectedSongs,
                EventKind::ShowPlaylistSongs,
                EventKind::SelectionChanged,
                EventKind::SongPlayed,
            ],
        );

        let mut table = Self {
            bus,
            mailbox,
            selection,
            source: Source::Selections,
            rows: Vec::new(),
            cursor: 0,
            now_playing: None,
        };
        table.show_selections();
        table
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            // Jump playback to the row within the current queue.
            KeyCode::Enter => {
                if let Some(row) = self.rows.get(self.cursor) {
                    self.bus.publish(Event::SongShot(row.path.clone()));
                }
            }
            // Play the row once, outside the queue.
            KeyCode::Char('o') => {
                if let Some(row) = self.rows.get(self.cursor) {
                    self.bus.publish(Event::SongOneShot(row.path.clone()));
                }
            }
            _ => {}
        }
    }

    pub(crate) fn pump(&mut self, store: &SqliteStore) {
        while let Some(event) = self.mailbox.try_recv() {
            match event {
                Event::ShowSelectedSongs => self.show_selections(),
                Event::ShowPlaylistSongs(id) => self.show_playlist(store, id),
                Event::SelectionChanged => {
                    if self.source == Source::Selections {
                        self.show_selections();
                    }
                }
                Event::SongPlayed(path) => {
                    if let Some(position) = self.rows.iter().position(|row| row.path == path) {
                        self.cursor = position;
                    }
                    self.now_playing = Some(path);
                }
                _ => {}
            }
        }
    }

    fn show_selections(&mut self) {
        self.rows = self
            .selection
            .to_vec()
            .into_iter()
            .map(|path| SongRow {
                name: file_name(&path),
                path,
            })
            .collect();
        self.source = Source::Selections;
        self.cursor = 0;
    }

    fn show_playlist(&mut self, store: &SqliteStore, id: i64) {
        match store.songs_for_playlist(id) {
            Ok(songs) => {
                self.rows = songs
                    .into_iter()
                    .map(|song| {
                        let path = PathBuf::from(song.path);
                        SongRow {
                            name: file_name(&path),
                            path,
                        }
                    })
                    .collect();
                self.source = Source::Playlist(id);
                self.cursor = 0;
            }
            Err(e) => warn!("failed to load songs of playlist {id}: {e}"),
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::path::Path;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn drain(mailbox: &Mailbox) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = mailbox.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn selection_changes_refresh_the_selections_view() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        let mut table = ListTable::new(bus, selection.clone());

        selection.insert(PathBuf::from("/m/p/a/one.mp3"));
        table.pump(&store);

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "one.mp3");
    }

    #[test]
    fn show_playlist_songs_loads_rows_from_the_store() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Walk").unwrap();
        store.insert_song(id, Path::new("/m/p/a/one.mp3")).unwrap();
        store.insert_song(id, Path::new("/m/p/a/two.mp3")).unwrap();

        let mut table = ListTable::new(bus.clone(), selection);
        bus.publish(Event::ShowPlaylistSongs(id));
        table.pump(&store);

        let names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["one.mp3", "two.mp3"]);
    }

    #[test]
    fn playlist_view_ignores_selection_changes() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Walk").unwrap();
        store.insert_song(id, Path::new("/m/p/a/one.mp3")).unwrap();

        let mut table = ListTable::new(bus.clone(), selection.clone());
        bus.publish(Event::ShowPlaylistSongs(id));
        table.pump(&store);

        selection.insert(PathBuf::from("/m/p/a/other.mp3"));
        table.pump(&store);

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "one.mp3");
    }

    #[test]
    fn song_played_highlights_and_follows() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        selection.insert(PathBuf::from("/m/p/a/one.mp3"));
        selection.insert(PathBuf::from("/m/p/a/two.mp3"));

        let mut table = ListTable::new(bus.clone(), selection);
        table.pump(&store);

        bus.publish(Event::SongPlayed(PathBuf::from("/m/p/a/two.mp3")));
        table.pump(&store);

        assert_eq!(table.now_playing, Some(PathBuf::from("/m/p/a/two.mp3")));
        assert_eq!(table.cursor, 1);
    }

    #[test]
    fn enter_and_o_request_the_two_playback_flavours() {
        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());
        let store = SqliteStore::open_in_memory().unwrap();
        selection.insert(PathBuf::from("/m/p/a/one.mp3"));

        let observer = bus.register();
        bus.subscribe(
            observer.id(),
            &[EventKind::SongShot, EventKind::SongOneShot],
        );

        let mut table = ListTable::new(bus, selection);
        table.pump(&store);
        table.handle_key(key(KeyCode::Enter));
        table.handle_key(key(KeyCode::Char('o')));

        assert_eq!(
            drain(&observer),
            vec![
                Event::SongShot(PathBuf::from("/m/p/a/one.mp3")),
                Event::SongOneShot(PathBuf::from("/m/p/a/one.mp3")),
            ]
        );
    }
}
