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

//! The application event catalog.
//!
//! Every notification that crosses a component boundary is one variant of
//! [`Event`], carrying its complete typed payload. [`EventKind`] is the
//! fieldless mirror of the catalog used to express *interest*: components
//! subscribe to kinds, producers publish events.
//!
//! Adding a new notification means adding a variant to both enums and a new
//! arm to [`Event::kind`]; every consumer match is then checked by the
//! compiler.

use std::path::PathBuf;

/// Identifies a category of cross-component notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    DirSelected,
    CheckingAllSongs,
    SelectionChanged,
    SongOneShot,
    SongShot,
    StartSelectedPlayback,
    StartPlaylistPlayback,
    SongPlayed,
    SongRange,
    SongProgress,
    SongReprogress,
    NewPlaylistAdded,
    AllSongsSelected,
    NoSongsSelected,
    PartlySongsSelected,
    ShowSelectedSongs,
    ShowPlaylistSongs,
}

/// A single notification with its payload.
///
/// Events are immutable values: created at publish time, cloned once per
/// subscriber, consumed and discarded. Payloads are owned data so an event
/// can outlive its producer.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    /// The active directory in the catalog tree changed (debounced).
    DirSelected(PathBuf),
    /// Bulk check (`true`) or uncheck (`false`) of every file in the active
    /// directory.
    CheckingAllSongs(bool),
    /// The selection set was mutated.
    SelectionChanged,
    /// Play this single song immediately, preserving any active queue.
    SongOneShot(PathBuf),
    /// Jump playback to this song within the current queue.
    SongShot(PathBuf),
    /// Begin playing the selection set as an ordered queue.
    StartSelectedPlayback,
    /// Begin playing the songs of a persisted playlist.
    StartPlaylistPlayback(i64),
    /// The now-playing path, for highlighting in lists.
    SongPlayed(PathBuf),
    /// Total duration of the current song, in milliseconds.
    SongRange(u64),
    /// Periodic playback position, in milliseconds.
    SongProgress(u64),
    /// A user seek request, in milliseconds.
    SongReprogress(u64),
    /// A new persisted playlist was created from the current selection.
    NewPlaylistAdded(String),
    /// Every file of the directory is selected.
    AllSongsSelected(PathBuf),
    /// No file of the directory is selected.
    NoSongsSelected(PathBuf),
    /// Some, but not all, files of the directory are selected.
    PartlySongsSelected(PathBuf),
    /// Show the current selection in the playlist song table.
    ShowSelectedSongs,
    /// Show the songs of a persisted playlist in the playlist song table.
    ShowPlaylistSongs(i64),
}

impl Event {
    /// The kind this event is published under.
    pub(crate) fn kind(&self) -> EventKind {
        match self {
            Event::DirSelected(_) => EventKind::DirSelected,
            Event::CheckingAllSongs(_) => EventKind::CheckingAllSongs,
            Event::SelectionChanged => EventKind::SelectionChanged,
            Event::SongOneShot(_) => EventKind::SongOneShot,
            Event::SongShot(_) => EventKind::SongShot,
            Event::StartSelectedPlayback => EventKind::StartSelectedPlayback,
            Event::StartPlaylistPlayback(_) => EventKind::StartPlaylistPlayback,
            Event::SongPlayed(_) => EventKind::SongPlayed,
            Event::SongRange(_) => EventKind::SongRange,
            Event::SongProgress(_) => EventKind::SongProgress,
            Event::SongReprogress(_) => EventKind::SongReprogress,
            Event::NewPlaylistAdded(_) => EventKind::NewPlaylistAdded,
            Event::AllSongsSelected(_) => EventKind::AllSongsSelected,
            Event::NoSongsSelected(_) => EventKind::NoSongsSelected,
            Event::PartlySongsSelected(_) => EventKind::PartlySongsSelected,
            Event::ShowSelectedSongs => EventKind::ShowSelectedSongs,
            Event::ShowPlaylistSongs(_) => EventKind::ShowPlaylistSongs,
        }
    }
}
