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

//! Render the catalog view.
//!
//! Directory tree on the left, files of the active directory on the right,
//! both with their check marks.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::{
    App, Focus,
    components::CheckState,
    render::{
        icons::{CHECK_CHECKED, CHECK_EMPTY, CHECK_PARTIAL},
        render_list,
    },
};

pub(super) fn draw_catalog(f: &mut Frame, area: Rect, app: &App) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    let tree_items: Vec<ListItem> = app
        .dirs_tree
        .rows
        .iter()
        .map(|row| {
            let check = match row.check {
                CheckState::Checked => CHECK_CHECKED,
                CheckState::Partial => CHECK_PARTIAL,
                CheckState::Unchecked => CHECK_EMPTY,
            };
            ListItem::new(Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(check, Style::default().fg(app.theme.check_fg)),
                Span::raw(" "),
                Span::styled(row.name.clone(), Style::default().fg(app.theme.tree_fg)),
            ]))
        })
        .collect();

    render_list(
        f,
        panes[0],
        " Performers ",
        tree_items,
        Some(app.dirs_tree.cursor),
        app.focus == Focus::Tree,
        &app.theme,
    );

    let file_items: Vec<ListItem> = app
        .files_table
        .rows
        .iter()
        .map(|row| {
            let check = if row.checked { CHECK_CHECKED } else { CHECK_EMPTY };
            ListItem::new(Line::from(vec![
                Span::styled(check, Style::default().fg(app.theme.check_fg)),
                Span::raw(" "),
                Span::styled(row.name.clone(), Style::default().fg(app.theme.table_fg)),
            ]))
        })
        .collect();

    render_list(
        f,
        panes[1],
        " Titles ",
        file_items,
        Some(app.files_table.cursor),
        app.focus == Focus::Table,
        &app.theme,
    );
}
