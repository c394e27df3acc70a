/// Co-writer session: draft editing, simulated suggestion generation,
/// and the saved-creations list of one open co-writer view.

use rand::Rng;
use std::time::Duration;
use thiserror::Error;

use crate::core::notice::Notice;
use crate::core::suggest::SuggestionBook;

/// How long a suggestion takes to "generate" unless configured otherwise.
pub const DEFAULT_GENERATION_LATENCY: Duration = Duration::from_millis(1500);

/// Characters of a saved creation shown in its preview.
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoWriterError {
    #[error("co-writer session is not open")]
    NotOpen,
    #[error("a suggestion is already being generated")]
    GenerationInProgress,
    #[error("generation ticket {0:?} is no longer current")]
    StaleGeneration(GenerationTicket),
    #[error("generation is not due for another {0:?}")]
    NotYetDue(Duration),
    #[error("session clock {0:?} is out of range")]
    ClockOutOfRange(Duration),
}

/// Identity of one generation cycle. Tickets from an earlier epoch (the
/// view was closed or reopened since) never match the session again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationTicket {
    pub epoch: u64,
    pub seq: u64,
}

/// The in-flight generation owned by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub ticket: GenerationTicket,
    /// Theme as it was when the request was made.
    pub theme: String,
    /// Session clock time at which the suggestion may be delivered.
    pub due: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Generating,
    Ready,
}

/// State of one co-writer view. Times are monotonic offsets supplied by the
/// caller, so the same session runs natively and under a browser clock.
#[derive(Debug, Clone)]
pub struct CoWriterSession {
    open: bool,
    epoch: u64,
    next_seq: u64,
    latency: Duration,
    theme: String,
    draft: String,
    suggestion: Option<String>,
    pending: Option<PendingGeneration>,
    saved: Vec<String>,
}

impl Default for CoWriterSession {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATION_LATENCY)
    }
}

impl CoWriterSession {
    /// A closed session with the given generation latency.
    pub fn new(latency: Duration) -> Self {
        Self {
            open: false,
            epoch: 0,
            next_seq: 0,
            latency,
            theme: String::new(),
            draft: String::new(),
            suggestion: None,
            pending: None,
            saved: Vec::new(),
        }
    }

    /// Start a fresh session. Tickets issued before this call become stale.
    pub fn open(&mut self) {
        self.clear();
        self.epoch += 1;
        self.open = true;
        tracing::debug!(epoch = self.epoch, "co-writer opened");
    }

    /// Cancel any pending generation and discard all session state.
    pub fn close(&mut self) {
        if let Some(pending) = &self.pending {
            tracing::debug!(ticket = ?pending.ticket, "pending generation cancelled");
        }
        self.clear();
        self.open = false;
    }

    fn clear(&mut self) {
        self.theme.clear();
        self.draft.clear();
        self.suggestion = None;
        self.pending = None;
        self.saved.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: &str) {
        self.draft = draft.to_string();
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn pending(&self) -> Option<&PendingGeneration> {
        self.pending.as_ref()
    }

    pub fn state(&self) -> GenerationState {
        if self.pending.is_some() {
            GenerationState::Generating
        } else if self.suggestion.is_some() {
            GenerationState::Ready
        } else {
            GenerationState::Idle
        }
    }

    /// Number of non-empty space-separated words in the draft.
    pub fn word_count(&self) -> usize {
        self.draft.split(' ').filter(|word| !word.is_empty()).count()
    }

    /// Begin a generation cycle at session time `now`.
    ///
    /// The trigger is disabled while a cycle is pending, so a second request
    /// fails with `GenerationInProgress`.
    pub fn request_generation(&mut self, now: Duration) -> Result<GenerationTicket, CoWriterError> {
        if !self.open {
            return Err(CoWriterError::NotOpen);
        }
        if self.pending.is_some() {
            tracing::warn!("generation requested while one is pending");
            return Err(CoWriterError::GenerationInProgress);
        }
        let due = now
            .checked_add(self.latency)
            .ok_or(CoWriterError::ClockOutOfRange(now))?;

        let ticket = GenerationTicket {
            epoch: self.epoch,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.suggestion = None;
        self.pending = Some(PendingGeneration {
            ticket,
            theme: self.theme.clone(),
            due,
        });
        tracing::debug!(?ticket, theme = %self.theme, "generation started");
        Ok(ticket)
    }

    /// Deliver the suggestion for `ticket`.
    ///
    /// Stale tickets (closed view, reopened view, or a cycle that already
    /// finished) are rejected without touching session state.
    pub fn complete_generation<R: Rng + ?Sized>(
        &mut self,
        ticket: GenerationTicket,
        now: Duration,
        book: &SuggestionBook,
        rng: &mut R,
    ) -> Result<Notice, CoWriterError> {
        let pending = match &self.pending {
            Some(pending) if self.open && pending.ticket == ticket => pending,
            _ => {
                tracing::warn!(?ticket, "discarding stale generation");
                return Err(CoWriterError::StaleGeneration(ticket));
            }
        };
        if now < pending.due {
            return Err(CoWriterError::NotYetDue(pending.due - now));
        }

        let suggestion = book.select(&pending.theme, rng).to_string();
        self.pending = None;
        self.suggestion = Some(suggestion);
        tracing::debug!(?ticket, "generation finished");

        Ok(Notice::info(
            "AI Suggestion Ready!",
            "Your AI companion has crafted a new suggestion.",
        ))
    }

    /// Complete the pending generation if it is due at `now`.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now: Duration,
        book: &SuggestionBook,
        rng: &mut R,
    ) -> Option<Notice> {
        let ticket = self.pending.as_ref().filter(|p| now >= p.due)?.ticket;
        self.complete_generation(ticket, now, book, rng).ok()
    }

    /// Append the current suggestion to the draft.
    pub fn accept_suggestion(&mut self) -> Option<Notice> {
        let suggestion = self.suggestion.take()?;
        self.draft = format!("{} {}", self.draft, suggestion);
        Some(Notice::info(
            "Suggestion Added!",
            "The AI suggestion has been added to your story.",
        ))
    }

    /// A draft of only whitespace cannot be saved.
    pub fn can_save(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Save the draft to the session's creations and start a blank page.
    pub fn save_creation(&mut self) -> Option<Notice> {
        if !self.can_save() {
            return None;
        }
        let draft = std::mem::take(&mut self.draft);
        self.saved.push(draft);
        self.suggestion = None;
        self.theme.clear();
        tracing::info!(saved = self.saved.len(), "creation saved");
        Some(Notice::info(
            "Story Saved!",
            "Your creation has been saved to your collection.",
        ))
    }

    /// Saved creations, oldest first.
    pub fn saved_creations(&self) -> &[String] {
        &self.saved
    }

    /// Short form of a saved creation for the collection list.
    pub fn creation_preview(&self, index: usize) -> Option<String> {
        let creation = self.saved.get(index)?;
        let head: String = creation.chars().take(PREVIEW_CHARS).collect();
        Some(format!("{head}..."))
    }
}
