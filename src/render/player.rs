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

//! Render the player strip.
//!
//! Shows the current song (performer, album, title), the playback state
//! icon, elapsed/remaining times, the volume gauge, and the progress gauge.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_MUTED, ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util,
};

pub(super) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[0]);

    if let Some(info) = app.control_bar.now_playing() {
        let icon = match app.control_bar.state() {
            PlayerState::Playing => ICON_PLAY,
            PlayerState::Paused => ICON_PAUSE,
            PlayerState::Idle | PlayerState::Loaded => ICON_STOP,
        };

        let song_line = Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().add_modifier(Modifier::BOLD))
                .fg(Color::White),
            Span::styled(&info.title, Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.title_fg),
            Span::raw(" from "),
            Span::styled(&info.album, Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.album_fg),
            Span::raw(" by "),
            Span::styled(&info.performer, Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.performer_fg),
        ]);
        f.render_widget(Paragraph::new(song_line), info_chunks[0]);

        let position = app.progress.position_ms;
        let duration = app.progress.duration_ms;
        let remaining = duration.saturating_sub(position);

        let time_line = Line::from(vec![
            Span::styled(util::format_clock(position), Style::default())
                .fg(app.theme.accent_colour),
            Span::raw(" / ").fg(Color::White),
            Span::styled(util::format_clock(duration), Style::default())
                .fg(app.theme.accent_colour),
            Span::raw(" (-").fg(Color::White),
            Span::styled(util::format_clock(remaining), Style::default())
                .fg(app.theme.accent_colour),
            Span::raw(")").fg(Color::White),
        ]);
        f.render_widget(
            Paragraph::new(time_line).alignment(Alignment::Right),
            info_chunks[1],
        );
    } else {
        f.render_widget(
            Paragraph::new(" nothing playing").fg(app.theme.dim_fg),
            info_chunks[0],
        );
    }

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[2]);

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(control_chunks[1]);

    let vol_ratio = (f64::from(app.control_bar.volume()) / 100.0).clamp(0.0, 1.0);
    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(vol_ratio)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[0]);

    let volume_label = if app.control_bar.is_muted() {
        format!(" {}", ICON_MUTED)
    } else {
        format!(" {}%", app.control_bar.volume())
    };
    f.render_widget(
        Paragraph::new(volume_label)
            .alignment(Alignment::Right)
            .fg(Color::White),
        volume_layout[1],
    );

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(app.progress.ratio().clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    f.render_widget(position_gauge, chunks[3]);
}
