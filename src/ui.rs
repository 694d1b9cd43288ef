/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

use std::ops::Range;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::controls::{Control, Preset};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

pub const TITLE: &str = "iLO Fan Controller";
pub const TOO_SMALL_MSG: &str = "Terminal too small. Resize to at least 60x20.";
pub const HELP_TEXT: &str =
    "↑/↓: Select  ←/→: Adjust  Enter/Space: Activate  U: Update  R: Reset  O: Unlock  Q: Quit";

const LEFT_PAD: u16 = 2;
const LABEL_WIDTH: usize = 12;
/// Rows taken by everything except the fan sliders
const FIXED_ROWS: u16 = 10;

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn indent(area: Rect, by: u16) -> Rect {
    let by = by.min(area.width);
    Rect {
        x: area.x + by,
        width: area.width - by,
        ..area
    }
}

/// `[=====-----]` with `width` cells between the brackets
pub fn slider_bar(value: u8, width: usize) -> String {
    let value = usize::from(value.min(100));
    let filled = ((value * width + 50) / 100).min(width);
    format!("[{}{}]", "=".repeat(filled), "-".repeat(width - filled))
}

/// Bar width for a given terminal width, never below 10
pub fn slider_width(term_width: u16) -> usize {
    usize::from(term_width).saturating_sub(30).max(10)
}

/// Fan blocks that fit in `rows` lines, scrolled so a selected fan block is
/// always among them. The action buttons pin the window to the end.
pub fn fan_window(selected: Control, num_fans: usize, rows: usize) -> Range<usize> {
    if num_fans <= rows {
        return 0..num_fans;
    }
    let rows = rows.max(1);
    let last_start = num_fans - rows;
    let start = match selected {
        Control::Fan(i) => (i + 1).saturating_sub(rows).min(last_start),
        Control::Update | Control::Reset | Control::Unlock => last_start,
        Control::EditAll | Control::Preset(_) => 0,
    };
    start..start + rows
}

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        f.render_widget(Paragraph::new(TOO_SMALL_MSG), size);
        return;
    }
    render_main_view(f, app, size);
}

/// Shown while the initial fetch is in flight, before any state exists.
pub fn render_loading(f: &mut Frame, base_url: &str) {
    let size = f.area();
    let text = vec![
        Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Loading fan data from {} ...", base_url)),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), size);
}

/// header | presets row | fan sliders | action buttons | help | status
fn render_main_view(f: &mut Frame, app: &App, size: Rect) {
    let fan_rows = u16::try_from(app.num_fans())
        .unwrap_or(u16::MAX)
        .min(size.height.saturating_sub(FIXED_ROWS))
        .max(1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(fan_rows),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, app, chunks[1]);
    render_top_row(f, app, indent(chunks[3], LEFT_PAD));
    let window = fan_window(
        app.selected_control(),
        app.num_fans(),
        usize::from(chunks[5].height),
    );
    render_fans(f, app, indent(chunks[5], LEFT_PAD), size.width, window.clone());
    if window.len() < app.num_fans() {
        render_scroll_hint(f, app, indent(chunks[6], LEFT_PAD), window);
    }
    render_buttons(f, app, chunks[7]);
    render_help(f, chunks[9]);
    render_status_bar(f, app, chunks[10]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut subtitle = app.base_url().to_string();
    if app.is_dirty() {
        subtitle.push_str("  (unsaved changes)");
    }
    let header = Paragraph::new(vec![
        Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(subtitle, Style::default().add_modifier(Modifier::DIM))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_top_row(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_control();
    let checkbox = if app.edit_all() { "[X]" } else { "[ ]" };

    let mut spans = vec![
        Span::raw("Edit All "),
        Span::styled(checkbox, selected_style(selected == Control::EditAll)),
        Span::raw("      "),
    ];
    for preset in Preset::ALL {
        spans.push(Span::styled(
            format!("[ {} ]", preset.label()),
            selected_style(selected == Control::Preset(preset)),
        ));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_fans(f: &mut Frame, app: &App, area: Rect, term_width: u16, window: Range<usize>) {
    let bar_width = slider_width(term_width);
    let selected = app.selected_control();

    let lines: Vec<Line> = app
        .fans()
        .iter()
        .enumerate()
        .skip(window.start)
        .take(window.len())
        .map(|(i, val)| {
            let style = selected_style(selected == Control::Fan(i));
            let label = format!("Fan Block {}", i + 1);
            let marker = if app.is_fan_dirty(i) {
                Span::styled(" *", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("  ")
            };
            Line::from(vec![
                Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), style),
                Span::raw("  "),
                Span::styled(slider_bar(*val, bar_width), style),
                Span::raw(" "),
                Span::styled(format!("{:>3}%", val), style),
                marker,
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn render_scroll_hint(f: &mut Frame, app: &App, area: Rect, window: Range<usize>) {
    let hint = format!(
        "Fan blocks {}-{} of {}",
        window.start + 1,
        window.end,
        app.num_fans()
    );
    let para = Paragraph::new(hint).style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(para, area);
}

fn render_buttons(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_control();
    let buttons = [
        ("Update", Control::Update),
        ("Reset", Control::Reset),
        ("Unlock", Control::Unlock),
    ];
    let mut spans = Vec::with_capacity(buttons.len() * 2);
    for (i, (label, control)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[ {} ]", label),
            selected_style(selected == *control),
        ));
    }
    let row = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(row, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(HELP_TEXT).style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status()).style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(status, area);
}
