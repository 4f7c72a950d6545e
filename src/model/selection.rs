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

//! The process-wide set of checked songs.
//!
//! Every file the user ticks in a browser lands here, pending playback or
//! playlist creation. The set lives for the whole process; one instance is
//! created at startup and cloned into every component that needs it.
//!
//! All operations are serialized behind a single mutex — UI key handling and
//! bus processing may touch the set from different contexts. Every mutating
//! call publishes [`Event::SelectionChanged`] after the change is applied
//! and the lock has been released, so observers can re-read the set without
//! deadlocking.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use log::warn;
use thiserror::Error;

use crate::{
    bus::{Event, EventBus},
    db::SqliteStore,
};

/// Why a selection could not be persisted as a playlist.
#[derive(Debug, Error)]
pub(crate) enum SavePlaylistError {
    #[error("no songs are selected")]
    EmptySelection,
    #[error("a playlist named '{0}' already exists")]
    DuplicateName(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

/// Shared, ordered set of selected song paths.
#[derive(Clone)]
pub(crate) struct Selection {
    paths: Arc<Mutex<BTreeSet<PathBuf>>>,
    bus: EventBus,
}

impl Selection {
    pub(crate) fn new(bus: EventBus) -> Self {
        Self {
            paths: Arc::new(Mutex::new(BTreeSet::new())),
            bus,
        }
    }

    pub(crate) fn insert(&self, path: PathBuf) {
        self.paths.lock().unwrap().insert(path);
        self.bus.publish(Event::SelectionChanged);
    }

    pub(crate) fn erase(&self, path: &Path) {
        self.paths.lock().unwrap().remove(path);
        self.bus.publish(Event::SelectionChanged);
    }

    pub(crate) fn contains(&self, path: &Path) -> bool {
        self.paths.lock().unwrap().contains(path)
    }

    pub(crate) fn clear(&self) {
        self.paths.lock().unwrap().clear();
        self.bus.publish(Event::SelectionChanged);
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.lock().unwrap().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.paths.lock().unwrap().is_empty()
    }

    /// Snapshot of the set in its stable path order.
    pub(crate) fn to_vec(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().iter().cloned().collect()
    }

    /// Persists the current selection as a new named playlist.
    ///
    /// Fails when nothing is selected or when a playlist with exactly this
    /// name (case-sensitive) already exists. On success one song row is
    /// written per selected path, [`Event::NewPlaylistAdded`] is published
    /// and the selection is cleared.
    ///
    /// A song insert failing after the playlist row was created is *not*
    /// rolled back; the error propagates, no event is published, and the
    /// orphaned playlist row remains.
    pub(crate) fn save_as_playlist(
        &self,
        name: &str,
        store: &SqliteStore,
    ) -> Result<(), SavePlaylistError> {
        let songs = self.to_vec();
        if songs.is_empty() {
            return Err(SavePlaylistError::EmptySelection);
        }
        if store.playlist_exists(name)? {
            return Err(SavePlaylistError::DuplicateName(name.to_string()));
        }

        let playlist_id = store.insert_playlist(name)?;
        for path in &songs {
            if let Err(e) = store.insert_song(playlist_id, path) {
                warn!("saving playlist '{name}' failed at {path:?}: {e}");
                return Err(e.into());
            }
        }

        self.bus.publish(Event::NewPlaylistAdded(name.to_string()));
        self.clear();
        Ok(())
    }
}
