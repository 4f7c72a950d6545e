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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change to provide a reactive user interface.

mod catalog;
mod icons;
mod name_box;
mod player;
mod playlists;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{App, MainView, render::player::draw_player, theme::Theme};

/// Renders the user interface to the terminal frame.
///
/// Partitions the screen into the browser area, the player strip, and the
/// bottom line (key hints, status message, or the playlist name prompt).
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: browser, player strip, bottom line.
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    match app.main_view {
        MainView::Catalog => catalog::draw_catalog(f, outer[0], app),
        MainView::Playlists => playlists::draw_playlists(f, outer[0], app),
    }

    draw_player(f, outer[1], app);

    if app.name_box.active() {
        name_box::draw_name_box(f, outer[2], app);
    } else {
        draw_bottom_line(f, outer[2], app);
    }
}

fn draw_bottom_line(f: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status {
        Some(message) => message.clone(),
        None => String::from(
            " 1 catalog | 2 play lists | tab pane | space check | enter play | c new list | p pause | q quit",
        ),
    };

    let style = if app.status.is_some() {
        Style::default().fg(app.theme.accent_colour)
    } else {
        Style::default().fg(app.theme.dim_fg)
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

/// Renders one bordered list pane with the shared cursor styling.
pub(super) fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem>,
    selected: Option<usize>,
    is_active: bool,
    theme: &Theme,
) {
    let border_style = if is_active {
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_colour)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    state.select(selected);
    f.render_stateful_widget(list, area, &mut state);
}
