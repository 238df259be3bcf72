//! Entry form state.
//!
//! The form is what the user is composing: either a new entry or an edit of
//! an existing one. It is reset to an empty "creating" form after a
//! successful save or an explicit cancel.

use thiserror::Error;

use crate::entry::{Entry, EntryId, EntryPayload};

/// Required-field check failure. Shown to the user as a blocking alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Title and content are required!")]
pub struct ValidationError;

/// Whether submit creates a new entry or updates an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(EntryId),
}

/// Form fields that accept text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Date,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub content: String,
    pub date: String,
    pub mode: FormMode,
}

impl Default for FormState {
    fn default() -> Self {
        Self::empty()
    }
}

impl FormState {
    /// Empty creating form dated today
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            date: today(),
            mode: FormMode::Creating,
        }
    }

    /// Form pre-filled from an existing entry
    pub fn editing(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            date: entry.date.clone(),
            mode: FormMode::Editing(entry.id.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Build the request body, or fail if title or content is empty
    pub fn validate(&self) -> Result<EntryPayload, ValidationError> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(ValidationError);
        }
        Ok(EntryPayload {
            title: self.title.clone(),
            content: self.content.clone(),
            date: self.date.clone(),
        })
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Date => &self.date,
            FormField::Content => &self.content,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Date => &mut self.date,
            FormField::Content => &mut self.content,
        }
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        self.field_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: FormField) {
        self.field_mut(field).pop();
    }
}

/// Today's date (UTC) as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
