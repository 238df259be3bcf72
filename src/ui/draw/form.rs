//! Entry form pane

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::border_style;
use crate::api::DiaryApi;
use crate::app::{App, Focus};
use crate::form::FormField;
use crate::settings::SettingsStore;
use crate::ui::theme::Theme;

pub(crate) fn draw_form<A: DiaryApi, S: SettingsStore>(
    f: &mut Frame,
    app: &App<A, S>,
    area: Rect,
    theme: &Theme,
) {
    let editing = app.form().is_editing();
    let title = if editing { " ✏️ Edit Diary Entry " } else { " 📝 Add New Diary Entry " };
    let pane_focused = matches!(app.focus(), Focus::Field(_));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(pane_focused, theme))
        .title(title)
        .title_style(Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Date
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    draw_field(f, app, FormField::Title, rows[0], theme);
    draw_field(f, app, FormField::Date, rows[1], theme);
    draw_field(f, app, FormField::Content, rows[2], theme);

    let hint = if editing {
        " Ctrl+S: Update Entry · Esc: Cancel"
    } else {
        " Ctrl+S: Add Entry"
    };
    let hint = Paragraph::new(hint).style(Style::default().fg(theme.accent).bg(theme.background));
    f.render_widget(hint, rows[3]);
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Title => "Entry Title",
        FormField::Date => "YYYY-MM-DD",
        FormField::Content => "Write your thoughts...",
    }
}

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Title => " Title ",
        FormField::Date => " Date ",
        FormField::Content => " Content ",
    }
}

fn draw_field<A: DiaryApi, S: SettingsStore>(
    f: &mut Frame,
    app: &App<A, S>,
    field: FormField,
    area: Rect,
    theme: &Theme,
) {
    let focused = app.focus() == Focus::Field(field);
    let value = app.form().field(field);

    let (text, style) = if value.is_empty() {
        (placeholder(field), Style::default().fg(theme.dimmed_alt))
    } else {
        (value, Style::default().fg(theme.foreground))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused, theme))
        .title(label(field))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);

    let mut paragraph = Paragraph::new(text).style(style.bg(theme.surface)).block(block);
    if field == FormField::Content {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, area);

    if focused && app.alert().is_none() {
        let (x, y) = cursor_offset(value, field == FormField::Content);
        let cursor_x = inner.x + x.min(inner.width.saturating_sub(1));
        let cursor_y = inner.y + y.min(inner.height.saturating_sub(1));
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Cursor position after the last character, as (column, row).
///
/// Only explicit newlines move to a new row; soft wrapping is not tracked,
/// so long content lines clamp the cursor to the field edge.
fn cursor_offset(value: &str, multiline: bool) -> (u16, u16) {
    if !multiline {
        return (value.width() as u16, 0);
    }
    let row = value.matches('\n').count();
    let last = value.rsplit('\n').next().unwrap_or("");
    (last.width() as u16, row as u16)
}
