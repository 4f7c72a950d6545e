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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application — playlists,
//! their songs, and the song description derived from a media path — plus
//! the process-wide [`Selection`] store.

mod selection;

pub(crate) use selection::{SavePlaylistError, Selection};

use std::path::{Component, Path};

/// A persisted playlist row.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
}

/// A persisted song row, keyed by `(playlist_id, path)`.
#[derive(Debug, Clone)]
pub struct Song {
    pub id: i64,
    pub playlist_id: i64,
    pub path: String,
}

/// Song description derived from the media tree layout.
///
/// The library is organized as `.../performer/album/title.ext`, so the last
/// three path segments describe the song without reading any tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInfo {
    pub performer: String,
    pub album: String,
    pub title: String,
}

impl SongInfo {
    /// Splits `path` into performer, album and title.
    ///
    /// Returns `None` for paths with fewer than four segments — such a path
    /// cannot carry the performer/album/title structure and is rejected
    /// without further interpretation. The title has its extension removed.
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        if path.components().count() < 4 {
            return None;
        }

        let mut names = path.components().rev().filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        });

        let file_name = names.next()?;
        let album = names.next()?;
        let performer = names.next()?;

        let title = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => file_name,
        };

        Some(Self {
            performer,
            album,
            title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn song_info_from_full_path() {
        let path = PathBuf::from("/music/Vivaldi/Four Seasons/01 Spring.mp3");
        let info = SongInfo::from_path(&path).unwrap();

        assert_eq!(info.performer, "Vivaldi");
        assert_eq!(info.album, "Four Seasons");
        assert_eq!(info.title, "01 Spring");
    }

    #[test]
    fn minimal_absolute_path_is_accepted() {
        let info = SongInfo::from_path(Path::new("/a/b/c.mp3")).unwrap();
        assert_eq!(info.performer, "a");
        assert_eq!(info.album, "b");
        assert_eq!(info.title, "c");
    }

    #[test]
    fn short_paths_are_rejected() {
        assert!(SongInfo::from_path(Path::new("a/b/c.mp3")).is_none());
        assert!(SongInfo::from_path(Path::new("/b/c.mp3")).is_none());
        assert!(SongInfo::from_path(Path::new("song.mp3")).is_none());
    }

    #[test]
    fn title_without_extension_is_kept_whole() {
        let info = SongInfo::from_path(Path::new("/music/Who/Album/Track")).unwrap();
        assert_eq!(info.title, "Track");
    }
}
