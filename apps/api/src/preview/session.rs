//! Preview session — one template's PDF preview and its blob URL.
//!
//! State machine: `Idle → Loading → {Ready | Error}`. The session owns at
//! most one live blob URL and revokes it on every exit path: template
//! switch, close, replacement by a newer fetch, failure, and drop.
//!
//! Fetches are split into `open` (hand out a ticket) and `complete` (apply
//! the outcome for that ticket) so a slow response for a superseded request
//! can be recognized and discarded instead of clobbering a newer preview.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::preview::blob::BlobStore;
use crate::preview::client::{FetchError, ResumeFetcher};
use crate::preview::download::{download_filename, DownloadError, FileSaver};
use crate::templates::TemplateKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Idle,
    Loading,
    Ready,
    Error { message: String },
}

/// Identifies one fetch started by `open`, `switch_template` or `retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    template: TemplateKey,
}

impl FetchTicket {
    pub fn template(&self) -> TemplateKey {
        self.template
    }
}

/// What `complete` did with a fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was superseded; the outcome was dropped without creating a blob.
    Discarded,
}

pub struct PreviewSession {
    store: Arc<dyn BlobStore>,
    person: String,
    template: TemplateKey,
    state: PreviewState,
    blob_url: Option<String>,
    /// Bumped whenever outstanding tickets must stop being honoured.
    generation: u64,
}

impl PreviewSession {
    pub fn new(store: Arc<dyn BlobStore>, person: impl Into<String>, template: TemplateKey) -> Self {
        Self {
            store,
            person: person.into(),
            template,
            state: PreviewState::Idle,
            blob_url: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn template(&self) -> TemplateKey {
        self.template
    }

    pub fn blob_url(&self) -> Option<&str> {
        self.blob_url.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            PreviewState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Starts a fetch for the current template.
    ///
    /// Returns `None` while a fetch is already in flight.
    pub fn open(&mut self) -> Option<FetchTicket> {
        if self.state == PreviewState::Loading {
            debug!(template = %self.template, "Fetch already in flight; ignoring open");
            return None;
        }
        Some(self.begin())
    }

    /// Revokes the current preview and starts a fetch for `template`.
    ///
    /// Any fetch still in flight for the previous template is superseded.
    pub fn switch_template(&mut self, template: TemplateKey) -> FetchTicket {
        self.release();
        self.template = template;
        self.begin()
    }

    /// Re-fetches after a failure. Does nothing outside the `Error` state.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        match self.state {
            PreviewState::Error { .. } => Some(self.begin()),
            _ => None,
        }
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Bytes, FetchError>,
    ) -> Completion {
        if ticket.generation != self.generation || self.state != PreviewState::Loading {
            debug!(template = %ticket.template, "Discarding stale preview response");
            return Completion::Discarded;
        }

        match outcome {
            Ok(bytes) => {
                let url = self.store.create(bytes);
                if let Some(previous) = self.blob_url.replace(url) {
                    self.store.revoke(&previous);
                }
                self.state = PreviewState::Ready;
                info!(template = %self.template, "Preview ready");
            }
            Err(e) => {
                self.release();
                warn!(template = %self.template, "Preview failed: {e}");
                self.state = PreviewState::Error {
                    message: e.to_string(),
                };
            }
        }
        Completion::Applied
    }

    /// `open` + fetch + `complete` in one call.
    pub async fn load(&mut self, fetcher: &dyn ResumeFetcher) -> Option<Completion> {
        let ticket = self.open()?;
        let outcome = fetcher.fetch(ticket.template()).await;
        Some(self.complete(ticket, outcome))
    }

    /// Revokes the preview and returns to `Idle`; in-flight fetches become stale.
    pub fn close(&mut self) {
        self.release();
        self.generation += 1;
        self.state = PreviewState::Idle;
    }

    /// Saves the live preview through `saver`. Neither creates nor revokes a blob.
    pub fn download(&self, saver: &dyn FileSaver) -> Result<PathBuf, DownloadError> {
        let bytes = self
            .blob_url
            .as_deref()
            .and_then(|url| self.store.get(url))
            .ok_or(DownloadError::NotReady)?;
        saver.save(&download_filename(&self.person, self.template), &bytes)
    }

    fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = PreviewState::Loading;
        FetchTicket {
            generation: self.generation,
            template: self.template,
        }
    }

    fn release(&mut self) {
        if let Some(url) = self.blob_url.take() {
            self.store.revoke(&url);
        }
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.release();
    }
}
