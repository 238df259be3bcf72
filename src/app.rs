use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::DiaryApi;
use crate::config::Config;
use crate::entry::Entry;
use crate::form::{FormField, FormState};
use crate::manager::EntryManager;
use crate::preference::ThemePreference;
use crate::settings::SettingsStore;
use crate::ui::theme::Theme;

/// Which pane receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    Entries,
}

impl Focus {
    /// Tab order: Title → Date → Content → Entries → Title
    pub fn next(self) -> Self {
        match self {
            Focus::Field(FormField::Title) => Focus::Field(FormField::Date),
            Focus::Field(FormField::Date) => Focus::Field(FormField::Content),
            Focus::Field(FormField::Content) => Focus::Entries,
            Focus::Entries => Focus::Field(FormField::Title),
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Field(FormField::Title) => Focus::Entries,
            Focus::Field(FormField::Date) => Focus::Field(FormField::Title),
            Focus::Field(FormField::Content) => Focus::Field(FormField::Date),
            Focus::Entries => Focus::Field(FormField::Content),
        }
    }
}

/// Application state
pub struct App<A: DiaryApi, S: SettingsStore> {
    /// Entries and form, synced with the server
    manager: EntryManager<A>,
    /// Persisted dark mode flag
    theme_pref: ThemePreference<S>,
    /// Configuration
    config: Config,
    /// Theme resolved for the current dark mode flag
    theme: Theme,
    focus: Focus,
    /// Selected index into the entry list
    selected: usize,
    /// Blocking message; swallows input until dismissed
    alert: Option<String>,
    should_quit: bool,
}

impl<A: DiaryApi, S: SettingsStore> App<A, S> {
    pub fn new(manager: EntryManager<A>, theme_pref: ThemePreference<S>, config: Config) -> Self {
        let theme = config.resolve_theme(theme_pref.is_dark());
        Self {
            manager,
            theme_pref,
            config,
            theme,
            focus: Focus::Field(FormField::Title),
            selected: 0,
            alert: None,
            should_quit: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme_pref.is_dark()
    }

    pub fn entries(&self) -> &[Entry] {
        self.manager.entries()
    }

    pub fn form(&self) -> &FormState {
        self.manager.form()
    }

    /// Outstanding server calls, for the busy indicator
    pub fn in_flight(&self) -> usize {
        self.manager.in_flight()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.manager.entries().get(self.selected)
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Re-fetch the entry list
    pub fn refresh(&mut self) {
        self.manager.list();
    }

    /// Apply finished server calls. Called once per event-loop tick.
    pub fn tick(&mut self) {
        if self.manager.poll() > 0 {
            self.clamp_selection();
        }
    }

    pub fn toggle_theme(&mut self) {
        let dark = self.theme_pref.toggle();
        self.theme = self.config.resolve_theme(dark);
        tracing::debug!("Dark mode: {}", dark);
    }

    /// Submit the form; a validation failure becomes the alert
    pub fn submit(&mut self) {
        if let Err(e) = self.manager.submit() {
            self.alert = Some(e.to_string());
        }
    }

    /// Load the selected entry into the form
    pub fn edit_selected(&mut self) {
        if let Some(entry) = self.selected_entry().cloned() {
            self.manager.begin_edit(&entry);
            self.focus = Focus::Field(FormField::Title);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_entry().map(|e| e.id.clone()) {
            self.manager.remove(id);
        }
    }

    pub fn cancel_edit(&mut self) {
        if self.manager.form().is_editing() {
            self.manager.cancel_edit();
            self.focus = Focus::Field(FormField::Title);
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Move selection up
    pub fn previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn next(&mut self) {
        if self.selected < self.manager.entries().len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.manager.entries().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Alert is modal: only dismissal keys do anything
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_alert();
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => self.refresh(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            _ => match self.focus {
                Focus::Field(field) => self.handle_field_key(field, key, ctrl),
                Focus::Entries => self.handle_entries_key(key),
            },
        }
    }

    fn handle_field_key(&mut self, field: FormField, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char(c) if !ctrl => self.manager.form_mut().push_char(field, c),
            KeyCode::Backspace => self.manager.form_mut().pop_char(field),
            KeyCode::Enter if field == FormField::Content => {
                self.manager.form_mut().push_char(field, '\n');
            }
            KeyCode::Enter => self.focus = self.focus.next(),
            KeyCode::Esc => self.cancel_edit(),
            _ => {}
        }
    }

    fn handle_entries_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Enter | KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Delete | KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }
}
