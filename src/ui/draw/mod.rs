//! Drawing functions for the TUI
//!
//! - `form` - Entry form pane (title, date, content)
//! - `entries` - Entry list pane
//!
//! The header, status bar and alert popup live here.

mod entries;
mod form;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::DiaryApi;
use crate::app::{App, Focus};
use crate::settings::SettingsStore;
use crate::ui::theme::Theme;

use entries::draw_entries;
use form::draw_form;

/// Main draw function
pub fn draw<A: DiaryApi, S: SettingsStore>(f: &mut Frame, app: &App<A, S>) {
    let theme = app.theme();

    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    draw_header(f, app, rows[0], theme);
    draw_form(f, app, panes[0], theme);
    draw_entries(f, app, panes[1], theme);
    draw_status_bar(f, app, rows[2], theme);

    if let Some(message) = app.alert() {
        draw_alert(f, message, theme);
    }
}

/// App title on the left, theme toggle on the right
fn draw_header<A: DiaryApi, S: SettingsStore>(
    f: &mut Frame,
    app: &App<A, S>,
    area: Rect,
    theme: &Theme,
) {
    let base = Style::default().bg(theme.background);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" 📔 diary", base.fg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" · {}", app.config().server.base_url), base.fg(theme.dimmed)),
    ]))
    .style(base);
    f.render_widget(title, area);

    // Label names the mode the toggle switches to
    let toggle = if app.is_dark() { "🌞 Light Mode" } else { "🌙 Dark Mode" };
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Ctrl+T: ", base.fg(theme.dimmed)),
        Span::styled(format!("{} ", toggle), base.fg(theme.accent)),
    ]))
    .alignment(Alignment::Right)
    .style(base);
    f.render_widget(hint, area);
}

/// Draw the status bar
fn draw_status_bar<A: DiaryApi, S: SettingsStore>(
    f: &mut Frame,
    app: &App<A, S>,
    area: Rect,
    theme: &Theme,
) {
    let base = Style::default().bg(theme.background);
    let total = app.entries().len();

    let mut spans = vec![Span::styled(
        format!(" {} {} ", total, if total == 1 { "entry" } else { "entries" }),
        base.fg(theme.dimmed),
    )];

    let busy = app.in_flight();
    if busy > 0 {
        spans.push(Span::styled(
            format!("| ⟳ {} pending ", busy),
            base.fg(theme.alert),
        ));
    }

    let hints = match app.focus() {
        Focus::Entries => "| j/k: select | e: edit | d: delete | r: refresh | Tab: form | q: quit",
        Focus::Field(_) => "| Tab: next field | Ctrl+S: save | Esc: cancel edit | Ctrl+C: quit",
    };
    spans.push(Span::styled(hints, base.fg(theme.dimmed_alt)));

    let status_bar = Paragraph::new(Line::from(spans)).style(base);
    f.render_widget(status_bar, area);
}

/// Draw the blocking alert popup
fn draw_alert(f: &mut Frame, message: &str, theme: &Theme) {
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);

    let style = Style::default().fg(theme.foreground).bg(theme.surface);
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Enter: OK", style.fg(theme.accent))),
    ];

    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.alert))
                .title(" Alert ")
                .style(style),
        );
    f.render_widget(popup, area);
}

/// Rect of `percent_x` width and `height` rows centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let width = width.max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Border style for a pane or field depending on focus
fn border_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dimmed_alt)
    }
}
