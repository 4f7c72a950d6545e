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

//! The playlist tree.
//!
//! One fixed "Current selections" entry followed by every persisted
//! playlist. Moving the cursor announces the chosen entry to the playlist
//! song table through the same 500 ms debouncer the directory tree uses;
//! the play action starts playback of the entry, and
//! [`Event::NewPlaylistAdded`] refreshes the tree and focuses the new
//! playlist.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use log::warn;

use crate::{
    bus::{Debouncer, Event, EventBus, EventKind, Mailbox, TREE_DEBOUNCE},
    db::SqliteStore,
    model::Playlist,
};

/// One selectable entry of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListEntry {
    CurrentSelections,
    Playlist { id: i64, name: String },
}

impl ListEntry {
    pub(crate) fn label(&self) -> &str {
        match self {
            ListEntry::CurrentSelections => "Current selections",
            ListEntry::Playlist { name, .. } => name,
        }
    }
}

pub(crate) struct ListTree {
    bus: EventBus,
    mailbox: Mailbox,
    pub(crate) entries: Vec<ListEntry>,
    pub(crate) cursor: usize,
    debouncer: Debouncer,
}

impl ListTree {
    pub(crate) fn new(bus: EventBus, store: &SqliteStore) -> Self {
        let mailbox = bus.register();
        bus.subscribe(mailbox.id(), &[EventKind::NewPlaylistAdded]);

        let mut tree = Self {
            bus,
            mailbox,
            entries: Vec::new(),
            cursor: 0,
            debouncer: Debouncer::new(TREE_DEBOUNCE),
        };
        tree.refresh(store);
        tree.debouncer.touch();
        tree
    }

    fn refresh(&mut self, store: &SqliteStore) {
        self.entries = vec![ListEntry::CurrentSelections];
        match store.playlists() {
            Ok(playlists) => {
                self.entries.extend(
                    playlists
                        .into_iter()
                        .map(|Playlist { id, name }| ListEntry::Playlist { id, name }),
                );
            }
            Err(e) => warn!("failed to load playlists: {e}"),
        }
        if self.cursor >= self.entries.len() {
            self.cursor = 0;
        }
    }

    /// Whether the cursor rests on the "Current selections" entry.
    pub(crate) fn on_current_selections(&self) -> bool {
        matches!(
            self.entries.get(self.cursor),
            Some(ListEntry::CurrentSelections)
        )
    }

    /// Id of the playlist under the cursor, if any.
    pub(crate) fn selected_playlist_id(&self) -> Option<i64> {
        match self.entries.get(self.cursor) {
            Some(ListEntry::Playlist { id, .. }) => Some(*id),
            _ => None,
        }
    }

    /// Reloads the entries from the store and re-announces the selection.
    pub(crate) fn reload(&mut self, store: &SqliteStore) {
        self.refresh(store);
        self.debouncer.touch();
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                    self.debouncer.touch();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.debouncer.touch();
                }
            }
            // Start playback of the entry under the cursor.
            KeyCode::Enter => match self.entries.get(self.cursor) {
                Some(ListEntry::CurrentSelections) => {
                    self.bus.publish(Event::StartSelectedPlayback);
                }
                Some(ListEntry::Playlist { id, .. }) => {
                    self.bus.publish(Event::StartPlaylistPlayback(*id));
                }
                None => {}
            },
            _ => {}
        }
    }

    /// Polls the debouncer; a settled cursor announces its entry to the
    /// playlist song table.
    pub(crate) fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if !self.debouncer.fire_at(now) {
            return;
        }
        match self.entries.get(self.cursor) {
            Some(ListEntry::CurrentSelections) => self.bus.publish(Event::ShowSelectedSongs),
            Some(ListEntry::Playlist { id, .. }) => {
                self.bus.publish(Event::ShowPlaylistSongs(*id));
            }
            None => {}
        }
    }

    /// Reloads the tree when a playlist was created, focusing the new entry.
    pub(crate) fn pump(&mut self, store: &SqliteStore) {
        while let Some(event) = self.mailbox.try_recv() {
            if let Event::NewPlaylistAdded(name) = event {
                self.refresh(store);
                if let Some(position) = self.entries.iter().position(
                    |entry| matches!(entry, ListEntry::Playlist { name: n, .. } if *n == name),
                ) {
                    self.cursor = position;
                    self.debouncer.touch();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

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
    fn first_entry_is_the_current_selection() {
        let bus = EventBus::new();
        let store = SqliteStore::open_in_memory().unwrap();
        let tree = ListTree::new(bus, &store);

        assert_eq!(tree.entries, vec![ListEntry::CurrentSelections]);
    }

    #[test]
    fn settled_cursor_announces_the_entry() {
        let bus = EventBus::new();
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Walk").unwrap();

        let observer = bus.register();
        bus.subscribe(
            observer.id(),
            &[EventKind::ShowSelectedSongs, EventKind::ShowPlaylistSongs],
        );

        let mut tree = ListTree::new(bus, &store);
        let start = Instant::now();

        tree.handle_key(key(KeyCode::Down));
        tree.debouncer.touch_at(start);
        tree.tick_at(start + Duration::from_millis(600));

        assert_eq!(drain(&observer), vec![Event::ShowPlaylistSongs(id)]);
    }

    #[test]
    fn enter_starts_the_right_playback() {
        let bus = EventBus::new();
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Walk").unwrap();

        let observer = bus.register();
        bus.subscribe(
            observer.id(),
            &[
                EventKind::StartSelectedPlayback,
                EventKind::StartPlaylistPlayback,
            ],
        );

        let mut tree = ListTree::new(bus, &store);
        tree.handle_key(key(KeyCode::Enter));
        tree.handle_key(key(KeyCode::Down));
        tree.handle_key(key(KeyCode::Enter));

        assert_eq!(
            drain(&observer),
            vec![
                Event::StartSelectedPlayback,
                Event::StartPlaylistPlayback(id),
            ]
        );
    }

    #[test]
    fn new_playlist_refreshes_and_focuses_the_entry() {
        let bus = EventBus::new();
        let store = SqliteStore::open_in_memory().unwrap();

        let mut tree = ListTree::new(bus.clone(), &store);
        assert_eq!(tree.entries.len(), 1);

        store.insert_playlist("Evening").unwrap();
        bus.publish(Event::NewPlaylistAdded("Evening".to_string()));
        tree.pump(&store);

        assert_eq!(tree.entries.len(), 2);
        assert_eq!(
            tree.entries[tree.cursor],
            ListEntry::Playlist {
                id: 1,
                name: "Evening".to_string()
            }
        );
    }
}
