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

//! The catalog directory tree.
//!
//! Shows the media tree below the configured music root, one row per
//! directory, with a tri-state check mark mirroring how much of the
//! directory's content is selected. Navigation publishes
//! [`Event::DirSelected`] through a 500 ms debouncer so holding an arrow key
//! does not rebuild the file table on every step; toggling the check mark
//! additionally publishes [`Event::CheckingAllSongs`] once the debouncer
//! settles.
//!
//! The check marks are updated from the aggregate feedback the file table
//! publishes (`AllSongsSelected` / `NoSongsSelected` / `PartlySongsSelected`).

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    bus::{Debouncer, Event, EventBus, EventKind, Mailbox, TREE_DEBOUNCE},
    media::{self, DirNode},
};

/// Tri-state check mark of one directory row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CheckState {
    Unchecked,
    Partial,
    Checked,
}

pub(crate) struct DirRow {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) depth: usize,
    pub(crate) check: CheckState,
}

pub(crate) struct DirsTree {
    bus: EventBus,
    mailbox: Mailbox,
    pub(crate) rows: Vec<DirRow>,
    pub(crate) cursor: usize,
    debouncer: Debouncer,
    /// The user toggled the check mark since the debouncer last fired.
    check_dirty: bool,
}

impl DirsTree {
    pub(crate) fn new(bus: EventBus, music_root: &Path) -> Self {
        let mailbox = bus.register();
        bus.subscribe(
            mailbox.id(),
            &[
                EventKind::AllSongsSelected,
                EventKind::NoSongsSelected,
                EventKind::PartlySongsSelected,
            ],
        );

        let mut tree = Self {
            bus,
            mailbox,
            rows: Vec::new(),
            cursor: 0,
            debouncer: Debouncer::new(TREE_DEBOUNCE),
            check_dirty: false,
        };
        tree.rebuild(music_root);
        // The initial selection announces itself like any other change.
        tree.debouncer.touch();
        tree
    }

    fn rebuild(&mut self, music_root: &Path) {
        self.rows.clear();
        let root = media::dir_tree(music_root);
        self.flatten(&root, 0);
        self.cursor = 0;
    }

    fn flatten(&mut self, node: &DirNode, depth: usize) {
        self.rows.push(DirRow {
            name: node.name.clone(),
            path: node.path.clone(),
            depth,
            check: CheckState::Unchecked,
        });
        for child in &node.children {
            self.flatten(child, depth + 1);
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.rows.len() {
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
            KeyCode::Char(' ') => {
                if let Some(row) = self.rows.get_mut(self.cursor) {
                    row.check = match row.check {
                        CheckState::Checked => CheckState::Unchecked,
                        CheckState::Unchecked | CheckState::Partial => CheckState::Checked,
                    };
                    self.check_dirty = true;
                    self.debouncer.touch();
                }
            }
            _ => {}
        }
    }

    /// Polls the debouncer; when the navigation settles, announces the
    /// active directory and, after a check-mark toggle, the bulk selection
    /// request.
    pub(crate) fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if !self.debouncer.fire_at(now) {
            return;
        }
        let Some(row) = self.rows.get(self.cursor) else {
            return;
        };

        self.bus.publish(Event::DirSelected(row.path.clone()));
        if self.check_dirty && row.check != CheckState::Partial {
            self.bus
                .publish(Event::CheckingAllSongs(row.check == CheckState::Checked));
        }
        self.check_dirty = false;
    }

    /// Applies the aggregate check-state feedback from the file table.
    pub(crate) fn pump(&mut self) {
        while let Some(event) = self.mailbox.try_recv() {
            match event {
                Event::AllSongsSelected(dir) => self.set_check(&dir, CheckState::Checked),
                Event::NoSongsSelected(dir) => self.set_check(&dir, CheckState::Unchecked),
                Event::PartlySongsSelected(dir) => self.set_check(&dir, CheckState::Partial),
                _ => {}
            }
        }
    }

    fn set_check(&mut self, dir: &Path, check: CheckState) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.path == dir) {
            row.check = check;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn drain(mailbox: &Mailbox) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = mailbox.try_recv() {
            events.push(event);
        }
        events
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn rapid_navigation_publishes_one_dir_selected_for_the_last_row() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();

        let bus = EventBus::new();
        let observer = bus.register();
        bus.subscribe(observer.id(), &[EventKind::DirSelected]);

        let mut tree = DirsTree::new(bus, dir.path());
        let start = Instant::now();

        // Two cursor moves in quick succession, then the input settles.
        tree.handle_key(key(KeyCode::Down));
        tree.debouncer.touch_at(start);
        tree.handle_key(key(KeyCode::Down));
        tree.debouncer.touch_at(start + Duration::from_millis(200));

        tree.tick_at(start + Duration::from_millis(400));
        assert!(drain(&observer).is_empty());

        tree.tick_at(start + Duration::from_millis(800));
        assert_eq!(
            drain(&observer),
            vec![Event::DirSelected(dir.path().join("b"))]
        );

        // Settled: no further firing.
        tree.tick_at(start + Duration::from_millis(1600));
        assert!(drain(&observer).is_empty());
    }

    #[test]
    fn check_toggle_announces_bulk_selection_once_settled() {
        let dir = tempdir().unwrap();
        let bus = EventBus::new();
        let observer = bus.register();
        bus.subscribe(
            observer.id(),
            &[EventKind::DirSelected, EventKind::CheckingAllSongs],
        );

        let mut tree = DirsTree::new(bus, dir.path());
        let start = Instant::now();

        tree.handle_key(key(KeyCode::Char(' ')));
        tree.debouncer.touch_at(start);
        tree.tick_at(start + Duration::from_millis(600));

        assert_eq!(
            drain(&observer),
            vec![
                Event::DirSelected(dir.path().to_path_buf()),
                Event::CheckingAllSongs(true),
            ]
        );

        // Plain navigation afterwards never re-announces the check state.
        tree.debouncer.touch_at(start + Duration::from_secs(2));
        tree.tick_at(start + Duration::from_secs(3));
        assert_eq!(
            drain(&observer),
            vec![Event::DirSelected(dir.path().to_path_buf())]
        );
    }

    #[test]
    fn aggregate_feedback_updates_the_check_mark() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("album")).unwrap();

        let bus = EventBus::new();
        let mut tree = DirsTree::new(bus.clone(), dir.path());

        bus.publish(Event::PartlySongsSelected(dir.path().join("album")));
        tree.pump();

        let row = tree.rows.iter().find(|r| r.name == "album").unwrap();
        assert_eq!(row.check, CheckState::Partial);
    }
}
