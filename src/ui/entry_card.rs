//! Entry card widget
//!
//! Renders each diary entry as a multi-line card:
//! - Title (bold)
//! - Date (dimmed)
//! - First lines of the content

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;
use crate::entry::Entry;

/// Configuration for entry display
#[derive(Debug, Clone, Copy)]
pub struct EntryDisplayConfig {
    /// Content lines shown under the date
    pub content_lines: u16,
}

impl Default for EntryDisplayConfig {
    fn default() -> Self {
        Self { content_lines: 2 }
    }
}

impl EntryDisplayConfig {
    /// Card height in lines: title + date + content + blank separator
    pub fn card_height(&self) -> u16 {
        2 + self.content_lines + 1
    }
}

pub struct EntryCard<'a> {
    entry: &'a Entry,
    selected: bool,
    theme: &'a Theme,
    config: EntryDisplayConfig,
}

impl<'a> EntryCard<'a> {
    pub fn new(entry: &'a Entry, theme: &'a Theme) -> Self {
        Self {
            entry,
            selected: false,
            theme,
            config: EntryDisplayConfig::default(),
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn config(mut self, config: EntryDisplayConfig) -> Self {
        self.config = config;
        self
    }
}

impl<'a> Widget for EntryCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = if self.selected { self.theme.selection_bg } else { self.theme.surface };
        let fg = if self.selected { self.theme.selection_fg } else { self.theme.foreground };

        // Separator line stays on the pane background
        let card_height = area.height.min(self.config.card_height().saturating_sub(1)).max(1);
        for y in area.y..area.y + card_height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }
        }

        let padding_x = 1u16;
        let inner_width = area.width.saturating_sub(padding_x * 2) as usize;
        if inner_width == 0 {
            return;
        }

        let x = area.x + padding_x;
        let max_y = area.y + card_height;
        let mut y = area.y;

        let title_style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
        buf.set_string(x, y, truncate(&self.entry.title, inner_width), title_style);
        y += 1;

        if y < max_y {
            let date = format!("📅 {}", self.entry.date);
            let style = Style::default().fg(self.theme.dimmed).bg(bg);
            buf.set_string(x, y, truncate(&date, inner_width), style);
            y += 1;
        }

        let content_style = Style::default().fg(fg).bg(bg);
        for line in self.entry.content.lines().take(self.config.content_lines as usize) {
            if y >= max_y {
                break;
            }
            buf.set_string(x, y, truncate(line, inner_width), content_style);
            y += 1;
        }
    }
}

/// Truncate string to fit within max_width, adding ellipsis if needed
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width + 1 > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("hello", 1), "…");
        // Wide chars count double
        assert_eq!(truncate("日記日記", 5), "日記…");
    }

    #[test]
    fn test_card_height() {
        assert_eq!(EntryDisplayConfig::default().card_height(), 5);
        assert_eq!(EntryDisplayConfig { content_lines: 0 }.card_height(), 3);
    }

    #[test]
    fn test_render_card() {
        let entry = Entry {
            id: 1.into(),
            title: "Sunny".to_string(),
            content: "Went out.\nSaw birds.\nThird line".to_string(),
            date: "2024-06-01".to_string(),
        };
        let theme = Theme::diary_light();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);

        EntryCard::new(&entry, &theme).render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        };
        assert!(row(0).contains("Sunny"));
        assert!(row(1).contains("2024-06-01"));
        assert!(row(2).contains("Went out."));
        assert!(row(3).contains("Saw birds."));
        assert!(!row(4).contains("Third line"));
        assert_eq!(buf[(0, 0)].bg, theme.surface);
        assert_eq!(buf[(0, 4)].bg, ratatui::style::Color::Reset);
    }
}
