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

//! # Music Player TUI.
//!
//! A terminal music player: a catalog browser over the on-disk media tree,
//! play lists persisted in SQLite, and a playback bar, all glued together by
//! a typed publish/subscribe event bus.
//!
//! None of the UI components knows any other; each subscribes to the event
//! kinds it cares about and publishes what it produces. The bus delivers
//! asynchronously into per-component mailboxes drained by the main loop, so
//! handlers always run on the main thread even when the producer (such as
//! the audio worker) lives elsewhere.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Raw input keys,
//! periodic ticks and audio-engine signals all funnel into one
//! `std::sync::mpsc` channel consumed by the main loop.

mod bus;
mod components;
mod config;
mod db;
mod events;
mod logger;
mod media;
mod model;
mod player;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    bus::EventBus,
    components::{ControlBar, DirsTree, FilesTable, ListTable, ListTree, NameBox, ProgressBar},
    config::AppConfig,
    db::SqliteStore,
    events::{AppEvent, process_events},
    model::Selection,
    player::{BackendSignal, MpvBackend},
    theme::Theme,
};

/// How often the tick thread wakes the main loop; bounds debounce latency.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MainView {
    Catalog,
    Playlists,
}

/// Which pane of the active view receives navigation keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Tree,
    Table,
}

/// What the open name prompt will do with the submitted text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prompt {
    CreatePlaylist,
    RenamePlaylist(i64),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,
    pub focus: Focus,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub selection: Selection,
    pub store: SqliteStore,

    pub dirs_tree: DirsTree,
    pub files_table: FilesTable,
    pub list_tree: ListTree,
    pub list_table: ListTable,
    pub control_bar: ControlBar,
    pub progress: ProgressBar,
    pub name_box: NameBox,
    pub prompt: Prompt,

    /// One-line message shown instead of the key hints until the next key.
    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// Wires one [`EventBus`] and one [`Selection`] through every component
    /// and spawns the audio worker.
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.database_file)
            .context("Failed to open the playlist database")?;

        let bus = EventBus::new();
        let selection = Selection::new(bus.clone());

        let (event_tx, event_rx) = mpsc::channel();

        // Audio-engine signals arrive on their own channel and are bridged
        // into the main event stream.
        let (signal_tx, signal_rx) = mpsc::channel::<BackendSignal>();
        let backend = MpvBackend::new(signal_tx);
        let signal_event_tx = event_tx.clone();
        thread::spawn(move || {
            while let Ok(signal) = signal_rx.recv() {
                if signal_event_tx.send(AppEvent::Signal(signal)).is_err() {
                    break;
                }
            }
        });

        let dirs_tree = DirsTree::new(bus.clone(), &config.music_dir);
        let files_table = FilesTable::new(bus.clone(), selection.clone());
        let list_tree = ListTree::new(bus.clone(), &store);
        let list_table = ListTable::new(bus.clone(), selection.clone());
        let control_bar = ControlBar::new(
            bus.clone(),
            selection.clone(),
            Box::new(backend),
            config.volume,
        );
        let progress = ProgressBar::new(bus);

        Ok(Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Catalog,
            focus: Focus::Tree,
            event_tx,
            event_rx,
            selection,
            store,
            dirs_tree,
            files_table,
            list_tree,
            list_table,
            control_bar,
            progress,
            name_box: NameBox::new(),
            prompt: Prompt::CreatePlaylist,
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up logging, opens the database (fatal if that fails), manages the
/// terminal lifecycle, and returns an error if any part of the execution
/// fails.
fn main() -> Result<()> {
    let config = config::load_config();

    logger::init(&config.database_file.with_extension("log"));

    let mut app = App::new(config).context("Failed to initialise application")?;
    info!("started, music root {:?}", app.config.music_dir);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// Sets the terminal background color, enables raw mode and switches to the
/// alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it is typically called during cleanup or
/// panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Periodic tick: drives the debounce timers and the minimum "frame
    // rate" of the interface.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Application event loop, process events until the user quits.
    process_events(terminal, app)
}
