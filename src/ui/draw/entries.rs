//! Entry list pane

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

use super::border_style;
use crate::api::DiaryApi;
use crate::app::{App, Focus};
use crate::settings::SettingsStore;
use crate::ui::entry_card::{EntryCard, EntryDisplayConfig};
use crate::ui::theme::Theme;

pub(crate) fn draw_entries<A: DiaryApi, S: SettingsStore>(
    f: &mut Frame,
    app: &App<A, S>,
    area: Rect,
    theme: &Theme,
) {
    let entries = app.entries();
    let focused = app.focus() == Focus::Entries;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused, theme))
        .title(" 📔 Your Diary Entries ")
        .title_style(Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if entries.is_empty() {
        let empty = Paragraph::new(" No entries yet")
            .style(Style::default().fg(theme.dimmed_alt).bg(theme.background));
        f.render_widget(empty, inner);
        return;
    }

    let display = EntryDisplayConfig::default();
    let card_height = display.card_height();
    let range = visible_range(app.selected_index(), entries.len(), inner.height / card_height);

    for (row, index) in range.enumerate() {
        let card_area = Rect {
            x: inner.x,
            y: inner.y + row as u16 * card_height,
            width: inner.width,
            height: card_height,
        }
        .intersection(inner);
        if card_area.is_empty() {
            continue;
        }

        let card = EntryCard::new(&entries[index], theme)
            .selected(focused && index == app.selected_index())
            .config(display);
        f.render_widget(card, card_area);
    }
}

/// Indices of the cards that fit, scrolled so `selected` stays visible
fn visible_range(selected: usize, total: usize, per_page: u16) -> Range<usize> {
    let per_page = (per_page as usize).max(1);
    let start = (selected + 1).saturating_sub(per_page);
    start..(start + per_page).min(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_fits() {
        assert_eq!(visible_range(0, 3, 5), 0..3);
        assert_eq!(visible_range(2, 3, 5), 0..3);
    }

    #[test]
    fn test_visible_range_scrolls_to_selection() {
        assert_eq!(visible_range(0, 10, 4), 0..4);
        assert_eq!(visible_range(3, 10, 4), 0..4);
        assert_eq!(visible_range(4, 10, 4), 1..5);
        assert_eq!(visible_range(9, 10, 4), 6..10);
    }

    #[test]
    fn test_visible_range_tiny_pane() {
        assert_eq!(visible_range(2, 10, 0), 2..3);
    }
}
