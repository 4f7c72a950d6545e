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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database: schema
//! creation and the playlist/song row operations. It uses cached statements
//! to optimize frequently executed queries.
//!
//! # Tables
//!
//! * `playlist` - Named playlists.
//! * `song` - Song paths, each belonging to one playlist. The
//!   `(playlist_id, path)` pair is unique: a song appears in a playlist at
//!   most once.
//!
//! Failing to open or create the database is fatal at startup; every later
//! failure is returned to the caller and leaves prior state intact.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::model::{Playlist, Song};

/// Owns the SQLite connection and the playlist/song operations over it.
pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and configures it.
    ///
    /// Enables WAL journaling and foreign keys, then ensures the schema
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created, if the
    /// PRAGMA configuration fails, or if the schema cannot be created.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Self::init(conn)
    }

    /// In-memory database with the same configuration, for tests.
    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // journal_mode reports the resulting mode as a row, so it cannot go
        // through execute_batch. In-memory databases report "memory".
        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" && journal_mode != "memory" {
            anyhow::bail!("Failed to switch to WAL mode. Current mode: {journal_mode}");
        }

        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        conn.set_prepared_statement_cache_capacity(32);

        create_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Inserts a playlist row and returns its id.
    pub(crate) fn insert_playlist(&self, name: &str) -> Result<i64, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO playlist (name) VALUES (?1)")?;
        stmt.execute(params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Whether a playlist with exactly this name exists (case-sensitive).
    pub(crate) fn playlist_exists(&self, name: &str) -> Result<bool, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT COUNT(*) FROM playlist WHERE name = ?1")?;
        let count: i64 = stmt.query_row(params![name], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// All playlists, sorted by name.
    pub(crate) fn playlists(&self) -> Result<Vec<Playlist>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM playlist ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Playlist {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        rows.collect()
    }

    /// Renames a playlist. Returns `false` when no such row exists.
    pub(crate) fn rename_playlist(&self, id: i64, name: &str) -> Result<bool, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare_cached("UPDATE playlist SET name = ?2 WHERE id = ?1")?;
        Ok(stmt.execute(params![id, name])? > 0)
    }

    /// Removes a playlist and all of its songs.
    pub(crate) fn remove_playlist(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM playlist WHERE id = ?1")?;
        Ok(stmt.execute(params![id])? > 0)
    }

    /// Adds a song path to a playlist.
    ///
    /// Returns `false` when the `(playlist_id, path)` pair is already
    /// present — the duplicate is rejected without an error.
    pub(crate) fn insert_song(
        &self,
        playlist_id: i64,
        path: &Path,
    ) -> Result<bool, rusqlite::Error> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO song (playlist_id, path) VALUES (?1, ?2)",
        )?;
        Ok(stmt.execute(params![playlist_id, path.to_string_lossy()])? > 0)
    }

    /// Songs of one playlist, in insertion order.
    pub(crate) fn songs_for_playlist(
        &self,
        playlist_id: i64,
    ) -> Result<Vec<Song>, rusqlite::Error> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, playlist_id, path FROM song WHERE playlist_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![playlist_id], |row| {
            Ok(Song {
                id: row.get(0)?,
                playlist_id: row.get(1)?,
                path: row.get(2)?,
            })
        })?;

        rows.collect()
    }

    /// Looks a playlist up by id.
    pub(crate) fn playlist_with_id(&self, id: i64) -> Result<Option<Playlist>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM playlist WHERE id = ?1")?;
        stmt.query_row(params![id], |row| {
            Ok(Playlist {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .optional()
    }
}

/// Create the database schema.
///
/// Creates the `playlist` and `song` tables if they do not already exist,
/// with cascading cleanup of songs when their playlist is removed and the
/// uniqueness constraint on `(playlist_id, path)`. The whole batch runs in
/// one transaction.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS playlist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS song (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            playlist_id INTEGER NOT NULL,
            path TEXT NOT NULL,
            UNIQUE (playlist_id, path),
            FOREIGN KEY (playlist_id) REFERENCES playlist (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_song_playlist_id ON song (playlist_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn insert_and_list_playlists() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_playlist("Walking").unwrap();
        store.insert_playlist("Evening").unwrap();

        let playlists = store.playlists().unwrap();
        let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Evening", "Walking"]);
    }

    #[test]
    fn playlist_exists_is_exact_and_case_sensitive() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_playlist("Walking").unwrap();

        assert!(store.playlist_exists("Walking").unwrap());
        assert!(!store.playlist_exists("walking").unwrap());
        assert!(!store.playlist_exists("Walk").unwrap());
    }

    #[test]
    fn duplicate_song_insert_is_rejected_gracefully() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Walking").unwrap();
        let path = PathBuf::from("/m/a/b/song.mp3");

        assert!(store.insert_song(id, &path).unwrap());
        assert!(!store.insert_song(id, &path).unwrap());
        assert_eq!(store.songs_for_playlist(id).unwrap().len(), 1);
    }

    #[test]
    fn same_path_in_two_playlists_is_allowed() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = store.insert_playlist("One").unwrap();
        let second = store.insert_playlist("Two").unwrap();
        let path = PathBuf::from("/m/a/b/song.mp3");

        assert!(store.insert_song(first, &path).unwrap());
        assert!(store.insert_song(second, &path).unwrap());
    }

    #[test]
    fn songs_keep_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Ordered").unwrap();
        store.insert_song(id, Path::new("/m/a/b/zz.mp3")).unwrap();
        store.insert_song(id, Path::new("/m/a/b/aa.mp3")).unwrap();

        let songs = store.songs_for_playlist(id).unwrap();
        assert_eq!(songs[0].path, "/m/a/b/zz.mp3");
        assert_eq!(songs[1].path, "/m/a/b/aa.mp3");
    }

    #[test]
    fn removing_a_playlist_cascades_to_songs() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Short lived").unwrap();
        store.insert_song(id, Path::new("/m/a/b/song.mp3")).unwrap();

        assert!(store.remove_playlist(id).unwrap());
        assert!(store.songs_for_playlist(id).unwrap().is_empty());
        assert!(store.playlist_with_id(id).unwrap().is_none());
    }

    #[test]
    fn rename_updates_the_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_playlist("Old").unwrap();

        assert!(store.rename_playlist(id, "New").unwrap());
        assert_eq!(store.playlist_with_id(id).unwrap().unwrap().name, "New");
        assert!(!store.rename_playlist(9999, "Nobody").unwrap());
    }
}
