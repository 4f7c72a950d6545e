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

//! Application loop and input routing.
//!
//! The main thread blocks on one channel of [`AppEvent`]s fed by the input
//! thread (keys), the tick thread, and the audio worker (backend signals).
//! Every turn routes the event, gives each component one chance to drain
//! its bus mailbox, and redraws.
//!
//! Key routing order: an active name prompt swallows everything; then the
//! global keys (view switching, playback control, quit); the rest goes to
//! the pane that currently has focus.

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use log::info;

use crate::{
    App, Focus, MainView, Prompt,
    components::NameBoxOutcome,
    model::SavePlaylistError,
    player::BackendSignal,
    render::draw,
};

/// Raw inputs reaching the main loop.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Signal(BackendSignal),
    Tick,
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until the user quits or the event channel is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::Key(key) => {
                if process_key_event(app, key) {
                    break;
                }
            }
            AppEvent::Signal(signal) => app.control_bar.on_signal(signal),
            AppEvent::Tick => {
                app.dirs_tree.tick();
                app.list_tree.tick();
            }
        }

        pump_components(app);

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Gives every component one processing turn on its mailbox.
///
/// Events published during this pass are picked up on the next turn — the
/// tick thread guarantees one arrives shortly.
fn pump_components(app: &mut App) {
    app.dirs_tree.pump();
    app.files_table.pump();
    app.list_tree.pump(&app.store);
    app.list_table.pump(&app.store);
    app.control_bar.pump(&app.store);
    app.progress.pump();
}

/// Maps keyboard input to component actions. Returns `true` on quit.
fn process_key_event(app: &mut App, key: KeyEvent) -> bool {
    // A modal prompt owns the keyboard while it is open.
    if app.name_box.active() {
        if let NameBoxOutcome::Submitted(name) = app.name_box.handle_key(key) {
            submit_name(app, &name);
        }
        return false;
    }

    app.status = None;

    match key.code {
        KeyCode::Char('q') => return true,

        KeyCode::Char('1') => {
            app.main_view = MainView::Catalog;
            app.focus = Focus::Tree;
        }
        KeyCode::Char('2') => {
            app.main_view = MainView::Playlists;
            app.focus = Focus::Tree;
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Tree => Focus::Table,
                Focus::Table => Focus::Tree,
            };
        }

        // Create a play list from the current selection.
        KeyCode::Char('c') if app.main_view == MainView::Playlists => {
            if !app.list_tree.on_current_selections() {
                return false;
            }
            if app.selection.is_empty() {
                app.status = Some("No songs are selected".to_string());
            } else {
                app.prompt = Prompt::CreatePlaylist;
                app.name_box.open();
            }
        }

        // Rename the play list under the cursor.
        KeyCode::Char('r') if app.main_view == MainView::Playlists && app.focus == Focus::Tree => {
            if let Some(id) = app.list_tree.selected_playlist_id() {
                app.prompt = Prompt::RenamePlaylist(id);
                app.name_box.open();
            }
        }

        // Delete the play list under the cursor.
        KeyCode::Char('d') if app.main_view == MainView::Playlists && app.focus == Focus::Tree => {
            if let Some(id) = app.list_tree.selected_playlist_id() {
                if let Ok(Some(playlist)) = app.store.playlist_with_id(id) {
                    info!("removing play list '{}'", playlist.name);
                }
                match app.store.remove_playlist(id) {
                    Ok(true) => app.status = Some("Play list removed".to_string()),
                    Ok(false) => {}
                    Err(e) => app.status = Some(e.to_string()),
                }
                app.list_tree.reload(&app.store);
            }
        }

        // Playback control.
        KeyCode::Char('p' | '<' | '>' | 'm' | '-' | '=' | '+') => {
            app.control_bar.handle_key(key);
        }

        // Seeking.
        KeyCode::Left | KeyCode::Right => app.progress.handle_key(key),

        // Everything else belongs to the focused pane.
        _ => match (app.main_view, app.focus) {
            (MainView::Catalog, Focus::Tree) => app.dirs_tree.handle_key(key),
            (MainView::Catalog, Focus::Table) => app.files_table.handle_key(key),
            (MainView::Playlists, Focus::Tree) => app.list_tree.handle_key(key),
            (MainView::Playlists, Focus::Table) => app.list_table.handle_key(key),
        },
    }

    false
}

/// Applies a submitted prompt name to its pending purpose.
fn submit_name(app: &mut App, name: &str) {
    match app.prompt {
        Prompt::CreatePlaylist => match app.selection.save_as_playlist(name, &app.store) {
            Ok(()) => app.status = Some(format!("Created play list '{name}'")),
            Err(SavePlaylistError::EmptySelection) => {
                app.status = Some("No songs are selected".to_string());
            }
            Err(SavePlaylistError::DuplicateName(existing)) => {
                app.status = Some(format!("A play list named '{existing}' already exists"));
            }
            Err(SavePlaylistError::Storage(e)) => app.status = Some(e.to_string()),
        },
        Prompt::RenamePlaylist(id) => {
            let exists = app.store.playlist_exists(name).unwrap_or(false);
            if exists {
                app.status = Some(format!("A play list named '{name}' already exists"));
                return;
            }
            match app.store.rename_playlist(id, name) {
                Ok(true) => {
                    app.status = Some(format!("Renamed to '{name}'"));
                    app.list_tree.reload(&app.store);
                }
                Ok(false) => app.status = Some("No such play list".to_string()),
                Err(e) => app.status = Some(e.to_string()),
            }
        }
    }
}
