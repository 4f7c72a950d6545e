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

//! Render the play lists view.
//!
//! Playlist tree on the left ("Current selections" plus the persisted
//! playlists), songs of the chosen entry on the right with the now-playing
//! marker.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::{
    App, Focus,
    render::{icons::ICON_NOW_PLAYING, render_list},
};

pub(super) fn draw_playlists(f: &mut Frame, area: Rect, app: &App) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    let tree_items: Vec<ListItem> = app
        .list_tree
        .entries
        .iter()
        .map(|entry| {
            ListItem::new(Span::styled(
                entry.label().to_string(),
                Style::default().fg(app.theme.tree_fg),
            ))
        })
        .collect();

    render_list(
        f,
        panes[0],
        " Play lists ",
        tree_items,
        Some(app.list_tree.cursor),
        app.focus == Focus::Tree,
        &app.theme,
    );

    let song_items: Vec<ListItem> = app
        .list_table
        .rows
        .iter()
        .map(|row| {
            let playing = app.list_table.now_playing.as_deref() == Some(row.path.as_path());
            let (marker, style) = if playing {
                (
                    format!("{ICON_NOW_PLAYING} "),
                    Style::default()
                        .fg(app.theme.now_playing_fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ".to_string(), Style::default().fg(app.theme.table_fg))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(row.name.clone(), style),
            ]))
        })
        .collect();

    render_list(
        f,
        panes[1],
        " Songs ",
        song_items,
        Some(app.list_table.cursor),
        app.focus == Focus::Table,
        &app.theme,
    );
}
