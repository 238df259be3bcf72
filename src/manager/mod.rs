//! Entry list and form state, kept in sync with the diary server.
//!
//! # Request Pipeline
//!
//! Every server call runs on a spawned tokio task so the UI keeps drawing
//! while it is outstanding. The task sends a [`Completion`] back over a
//! channel and the manager applies completions on the UI task, in the order
//! they arrive:
//!
//! ```text
//! submit()  ──spawn──▶ POST /add | PUT /update/{id} ──▶ Completion::Saved
//!                                                         │ 2xx
//!                                                         ▼
//!                                     reset form + list() ──▶ Completion::Listed
//!
//! remove()  ──spawn──▶ DELETE /delete/{id} ──▶ Completion::Removed
//!                                               │ any HTTP response
//!                                               ▼
//!                                             list() ──▶ Completion::Listed
//! ```
//!
//! # Caveats
//!
//! - The write and the refresh are two separate round-trips. If the write
//!   lands but the refresh fails, the list still shows the pre-write state.
//! - There is no request sequencing. Whichever `GET /` answers last wins,
//!   even if it was issued first.
//! - Failures are logged and otherwise dropped; no retries.


use reqwest::StatusCode;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{self, DiaryApi};
use crate::entry::{Entry, EntryId};
use crate::form::{FormMode, FormState, ValidationError};

/// Result of a finished server call, applied on the UI task
#[derive(Debug)]
pub enum Completion {
    Listed(api::Result<Vec<Entry>>),
    Saved {
        mode: FormMode,
        result: api::Result<()>,
    },
    Removed {
        id: EntryId,
        result: api::Result<StatusCode>,
    },
}

pub struct EntryManager<A: DiaryApi> {
    api: Arc<A>,
    /// Last list the server returned
    entries: Vec<Entry>,
    form: FormState,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    /// Spawned calls whose completion has not been applied yet
    in_flight: usize,
}

impl<A: DiaryApi> EntryManager<A> {
    pub fn new(api: A) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api: Arc::new(api),
            entries: Vec::new(),
            form: FormState::empty(),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Number of server calls still outstanding
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fetch the entry list. Replaces the local list on success.
    pub fn list(&mut self) {
        let api = Arc::clone(&self.api);
        self.spawn(async move { Completion::Listed(api.list().await) });
    }

    /// Save the form: create in creating mode, update in editing mode.
    ///
    /// Empty title or content fails immediately without touching the server
    /// or the form.
    pub fn submit(&mut self) -> Result<(), ValidationError> {
        let payload = self.form.validate()?;
        let mode = self.form.mode.clone();
        let api = Arc::clone(&self.api);

        tracing::debug!("Submitting entry ({:?})", mode);
        self.spawn(async move {
            let result = match &mode {
                FormMode::Creating => api.create(&payload).await,
                FormMode::Editing(id) => api.update(id, &payload).await,
            };
            Completion::Saved { mode, result }
        });

        Ok(())
    }

    /// Delete an entry. Any server answer triggers a refresh.
    pub fn remove(&mut self, id: EntryId) {
        let api = Arc::clone(&self.api);
        tracing::debug!("Deleting entry {}", id);
        self.spawn(async move {
            let result = api.delete(&id).await;
            Completion::Removed { id, result }
        });
    }

    /// Load an entry into the form for editing. No server call.
    pub fn begin_edit(&mut self, entry: &Entry) {
        self.form = FormState::editing(entry);
    }

    /// Drop whatever is in the form and go back to creating
    pub fn cancel_edit(&mut self) {
        self.form = FormState::empty();
    }

    /// Apply every completion that has already arrived. Never blocks.
    ///
    /// Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait until no calls are outstanding, including refreshes that
    /// completions start along the way.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
    }

    fn spawn<F>(&mut self, call: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Receiver only goes away with the manager
            let _ = tx.send(call.await);
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match completion {
            Completion::Listed(Ok(entries)) => {
                tracing::debug!("Loaded {} entries", entries.len());
                self.entries = entries;
            }
            Completion::Listed(Err(e)) => {
                tracing::error!("Error fetching entries: {}", e);
            }
            Completion::Saved { mode, result: Ok(()) } => {
                tracing::info!("Saved entry ({:?})", mode);
                self.list();
                self.form = FormState::empty();
            }
            Completion::Saved { mode, result: Err(e) } => {
                tracing::error!("Error saving entry ({:?}): {}", mode, e);
            }
            Completion::Removed { id, result: Ok(status) } => {
                tracing::info!("Delete of entry {} answered {}", id, status);
                self.list();
            }
            Completion::Removed { id, result: Err(e) } => {
                tracing::error!("Error deleting entry {}: {}", id, e);
            }
        }
    }
}
