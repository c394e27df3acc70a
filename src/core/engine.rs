/// The library engine: owns the catalog, suggestion book, narration
/// playlist and random source, and hands them to sessions.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::catalog::{Catalog, CatalogError, FilterCriteria};
use crate::core::cowriter::{
    CoWriterError, CoWriterSession, GenerationTicket, DEFAULT_GENERATION_LATENCY,
};
use crate::core::dashboard::Dashboard;
use crate::core::narration::{self, NarrationError, NarrationPlayer, SpeechSynthesizer};
use crate::core::notice::Notice;
use crate::core::suggest::{SuggestionBook, SuggestionError};
use crate::schema::narration::{builtin_narrations, Narration};
use crate::schema::story::StoryRecord;

#[derive(Debug, Error)]
pub enum LitrealmError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("suggestion error: {0}")]
    Suggestion(#[from] SuggestionError),
    #[error("narration error: {0}")]
    Narration(#[from] NarrationError),
    #[error("co-writer error: {0}")]
    CoWriter(#[from] CoWriterError),
}

/// File names looked up inside a library directory.
pub const CATALOG_FILE: &str = "catalog.ron";
pub const SUGGESTIONS_FILE: &str = "suggestions.ron";
pub const NARRATIONS_FILE: &str = "narrations.ron";

/// Built via `Litrealm::builder()`.
pub struct Litrealm {
    catalog: Catalog,
    suggestions: SuggestionBook,
    narrations: Vec<Narration>,
    latency: Duration,
    rng: StdRng,
}

pub struct LitrealmBuilder {
    library_dir: Option<PathBuf>,
    seed: u64,
    latency: Duration,
    /// Directly provided catalog (for testing without files).
    catalog: Option<Catalog>,
    /// Directly provided suggestions (for testing without files).
    suggestions: Option<SuggestionBook>,
    /// Directly provided playlist (for testing without files).
    narrations: Option<Vec<Narration>>,
}

impl Litrealm {
    pub fn builder() -> LitrealmBuilder {
        LitrealmBuilder {
            library_dir: None,
            seed: 0,
            latency: DEFAULT_GENERATION_LATENCY,
            catalog: None,
            suggestions: None,
            narrations: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn suggestions(&self) -> &SuggestionBook {
        &self.suggestions
    }

    pub fn narrations(&self) -> &[Narration] {
        &self.narrations
    }

    pub fn generation_latency(&self) -> Duration {
        self.latency
    }

    /// Filter the catalog.
    pub fn search(&self, criteria: &FilterCriteria) -> Vec<&StoryRecord> {
        self.catalog.filter(criteria)
    }

    /// Pick a suggestion for `theme` with the engine's random source.
    pub fn suggest(&mut self, theme: &str) -> &str {
        self.suggestions.select(theme, &mut self.rng)
    }

    /// A closed co-writer session using the configured latency.
    pub fn cowriter(&self) -> CoWriterSession {
        CoWriterSession::new(self.latency)
    }

    /// Deliver a pending suggestion to `session`.
    pub fn finish_generation(
        &mut self,
        session: &mut CoWriterSession,
        ticket: GenerationTicket,
        now: Duration,
    ) -> Result<Notice, LitrealmError> {
        Ok(session.complete_generation(ticket, now, &self.suggestions, &mut self.rng)?)
    }

    /// Deliver the session's pending suggestion if it is due.
    pub fn poll_generation(&mut self, session: &mut CoWriterSession, now: Duration) -> Option<Notice> {
        session.poll(now, &self.suggestions, &mut self.rng)
    }

    /// A narration player over the configured playlist.
    pub fn player<S: SpeechSynthesizer>(&self, synth: S) -> Result<NarrationPlayer<S>, LitrealmError> {
        Ok(NarrationPlayer::new(synth, self.narrations.clone())?)
    }

    /// A dashboard with fresh sessions.
    pub fn dashboard<S: SpeechSynthesizer>(&self, synth: S) -> Result<Dashboard<S>, LitrealmError> {
        Ok(Dashboard::new(self.cowriter(), self.player(synth)?))
    }
}

impl LitrealmBuilder {
    /// Directory holding `catalog.ron`, `suggestions.ron` and
    /// `narrations.ron`. Missing files fall back to the built-in data.
    pub fn library_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.library_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn generation_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Provide suggestions directly (for testing without files).
    pub fn with_suggestions(mut self, suggestions: SuggestionBook) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Provide a playlist directly (for testing without files).
    pub fn with_narrations(mut self, narrations: Vec<Narration>) -> Self {
        self.narrations = Some(narrations);
        self
    }

    pub fn build(self) -> Result<Litrealm, LitrealmError> {
        let dir = self.library_dir.as_deref();

        let catalog = match (self.catalog, existing(dir, CATALOG_FILE)) {
            (Some(catalog), _) => {
                catalog.validate()?;
                catalog
            }
            (None, Some(path)) => Catalog::load_from_ron(&path)?,
            (None, None) => Catalog::builtin(),
        };

        let suggestions = match (self.suggestions, existing(dir, SUGGESTIONS_FILE)) {
            (Some(book), _) => book,
            (None, Some(path)) => SuggestionBook::load_from_ron(&path)?,
            (None, None) => SuggestionBook::builtin(),
        };

        let narrations = match (self.narrations, existing(dir, NARRATIONS_FILE)) {
            (Some(list), _) => list,
            (None, Some(path)) => narration::load_playlist(&path)?,
            (None, None) => builtin_narrations(),
        };
        if narrations.is_empty() {
            return Err(NarrationError::EmptyPlaylist.into());
        }

        tracing::debug!(
            stories = catalog.stories.len(),
            seed = self.seed,
            latency_ms = self.latency.as_millis() as u64,
            "library ready"
        );

        Ok(Litrealm {
            catalog,
            suggestions,
            narrations,
            latency: self.latency,
            rng: StdRng::seed_from_u64(self.seed),
        })
    }
}

fn existing(dir: Option<&Path>, file: &str) -> Option<PathBuf> {
    let path = dir?.join(file);
    path.exists().then_some(path)
}
