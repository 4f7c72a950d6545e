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

//! The catalog file table.
//!
//! Lists the playable files of the directory announced by
//! [`Event::DirSelected`], with one check mark per row backed by the shared
//! [`Selection`]. Toggling rows mutates the selection and feeds the
//! aggregate tri-state back to the directory tree; activating a row asks the
//! playback controller for a one-shot of that song.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    bus::{Event, EventBus, EventKind, Mailbox},
    media,
    model::Selection,
};

pub(crate) struct FileRow {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) checked: bool,
}

pub(crate) struct FilesTable {
    bus: EventBus,
    mailbox: Mailbox,
    selection: Selection,
    /// The directory currently on display.
    dir: Option<PathBuf>,
    pub(crate) rows: Vec<FileRow>,
    pub(crate) cursor: usize,
}

impl FilesTable {
    pub(crate) fn new(bus: EventBus, selection: Selection) -> Self {
        let mailbox = bus.register();
        bus.subscribe(
            mailbox.id(),
            &[EventKind::DirSelected, EventKind::CheckingAllSongs],
        );

        Self {
            bus,
            mailbox,
            selection,
            dir: None,
            rows: Vec::new(),
            cursor: 0,
        }
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
            // Toggle the check mark of the current row.
            KeyCode::Char(' ') => {
                if let Some(row) = self.rows.get_mut(self.cursor) {
                    row.checked = !row.checked;
                    if row.checked {
                        self.selection.insert(row.path.clone());
                    } else {
                        self.selection.erase(&row.path);
                    }
                    self.publish_aggregate();
                }
            }
            // Bulk operations, as in the table's context menu.
            KeyCode::Char('a') => self.set_all(true),
            KeyCode::Char('n') => self.set_all(false),
            KeyCode::Char('i') => self.invert_all(),
            KeyCode::Enter => {
                if let Some(row) = self.rows.get(self.cursor) {
                    self.bus.publish(Event::SongOneShot(row.path.clone()));
                }
            }
            _ => {}
        }
    }

    /// Drains the mailbox: directory changes rebuild the table, bulk check
    /// requests from the tree are applied without echoing feedback.
    pub(crate) fn pump(&mut self) {
        while let Some(event) = self.mailbox.try_recv() {
            match event {
                Event::DirSelected(dir) => self.show_dir(dir),
                Event::CheckingAllSongs(checked) => {
                    for row in &mut self.rows {
                        row.checked = checked;
                        if checked {
                            self.selection.insert(row.path.clone());
                        } else {
                            self.selection.erase(&row.path);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn show_dir(&mut self, dir: PathBuf) {
        self.rows = media::song_files(&dir)
            .into_iter()
            .map(|path| FileRow {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                checked: self.selection.contains(&path),
                path,
            })
            .collect();
        self.cursor = 0;
        self.dir = Some(dir);
    }

    fn set_all(&mut self, checked: bool) {
        for row in &mut self.rows {
            row.checked = checked;
            if checked {
                self.selection.insert(row.path.clone());
            } else {
                self.selection.erase(&row.path);
            }
        }
        self.publish_aggregate();
    }

    fn invert_all(&mut self) {
        for row in &mut self.rows {
            row.checked = !row.checked;
            if row.checked {
                self.selection.insert(row.path.clone());
            } else {
                self.selection.erase(&row.path);
            }
        }
        self.publish_aggregate();
    }

    /// Reports the directory's aggregate check state back to the tree.
    fn publish_aggregate(&self) {
        let Some(dir) = self.dir.clone() else {
            return;
        };
        if self.rows.is_empty() || self.rows.iter().all(|row| !row.checked) {
            self.bus.publish(Event::NoSongsSelected(dir));
        } else if self.rows.iter().all(|row| row.checked) {
            self.bus.publish(Event::AllSongsSelected(dir));
        } else {
            self.bus.publish(Event::PartlySongsSelected(dir));
        }
    }
}
