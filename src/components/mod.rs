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

//! UI components.
//!
//! Each component here owns one pane of the interface plus a bus [`Mailbox`]
//! for the event kinds it consumes. Components never reference one another;
//! all coordination goes through published events. The main loop drives
//! them with the same rhythm: route the pressed key, drain the mailbox
//! (`pump`), poll debounce timers (`tick`), draw.
//!
//! [`Mailbox`]: crate::bus::Mailbox

mod control_bar;
mod dirs_tree;
mod files_table;
mod list_table;
mod list_tree;
mod name_box;
mod progress;

pub(crate) use control_bar::ControlBar;
pub(crate) use dirs_tree::{CheckState, DirsTree};
pub(crate) use files_table::FilesTable;
pub(crate) use list_table::ListTable;
pub(crate) use list_tree::ListTree;
pub(crate) use name_box::{NameBox, NameBoxOutcome};
pub(crate) use progress::ProgressBar;
