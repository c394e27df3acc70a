/// Story catalog: fixture loading, validation, and search/filter.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::story::{builtin_stories, StoryId, StoryRecord, BUILTIN_GENRES, BUILTIN_MOODS};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate story id: {0:?}")]
    DuplicateId(StoryId),
    #[error("story {id:?} has genre '{genre}' which is not in the genre vocabulary")]
    UnknownGenre { id: StoryId, genre: String },
    #[error("story {id:?} has mood '{mood}' which is not in the mood vocabulary")]
    UnknownMood { id: StoryId, mood: String },
}

/// The label shown for an unrestricted selector.
pub const ALL: &str = "All";

/// A genre or mood selector value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Choice {
    #[default]
    All,
    /// Exact, case-sensitive match against the record's field.
    Only(String),
}

impl Choice {
    /// Parse a dropdown value. `"All"` and the empty string both widen to `All`.
    pub fn parse(value: &str) -> Choice {
        if value.is_empty() || value == ALL {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Choice::All => ALL,
            Choice::Only(value) => value,
        }
    }

    fn admits(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

/// The active search/genre/mood selection of one explore session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub genre: Choice,
    pub mood: Choice,
}

impl FilterCriteria {
    /// Build criteria from raw form values.
    pub fn new(search: &str, genre: &str, mood: &str) -> Self {
        Self {
            search: search.to_string(),
            genre: Choice::parse(genre),
            mood: Choice::parse(mood),
        }
    }

    /// True when nothing narrows the result.
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.genre == Choice::All && self.mood == Choice::All
    }

    /// Returns true if `record` passes all three predicates.
    pub fn matches(&self, record: &StoryRecord) -> bool {
        record.mentions(&self.search.to_lowercase())
            && self.genre.admits(&record.genre)
            && self.mood.admits(&record.mood)
    }
}

/// Return the records passing `criteria`, preserving input order.
pub fn filter<'a>(records: &'a [StoryRecord], criteria: &FilterCriteria) -> Vec<&'a StoryRecord> {
    records.iter().filter(|record| criteria.matches(record)).collect()
}

/// The story list plus the vocabularies offered by the genre/mood selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Catalog")]
pub struct Catalog {
    pub genres: Vec<String>,
    pub moods: Vec<String>,
    pub stories: Vec<StoryRecord>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in six-story library.
    pub fn builtin() -> Self {
        Self {
            genres: BUILTIN_GENRES.iter().map(|s| s.to_string()).collect(),
            moods: BUILTIN_MOODS.iter().map(|s| s.to_string()).collect(),
            stories: builtin_stories(),
        }
    }

    /// Load and validate a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::parse_ron(&contents)?;
        tracing::info!(path = %path.display(), stories = catalog.stories.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Parse and validate a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = ron::from_str(input)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check id uniqueness and that every record uses the vocabularies.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = FxHashSet::default();
        for story in &self.stories {
            if !seen.insert(story.id) {
                return Err(CatalogError::DuplicateId(story.id));
            }
            if !self.genres.contains(&story.genre) {
                return Err(CatalogError::UnknownGenre {
                    id: story.id,
                    genre: story.genre.clone(),
                });
            }
            if !self.moods.contains(&story.mood) {
                return Err(CatalogError::UnknownMood {
                    id: story.id,
                    mood: story.mood.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: StoryId) -> Option<&StoryRecord> {
        self.stories.iter().find(|story| story.id == id)
    }

    /// Filter this catalog's stories.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&StoryRecord> {
        filter(&self.stories, criteria)
    }

    /// Genre dropdown options: `All` followed by the vocabulary.
    pub fn genre_options(&self) -> Vec<&str> {
        std::iter::once(ALL)
            .chain(self.genres.iter().map(String::as_str))
            .collect()
    }

    /// Mood dropdown options: `All` followed by the vocabulary.
    pub fn mood_options(&self) -> Vec<&str> {
        std::iter::once(ALL)
            .chain(self.moods.iter().map(String::as_str))
            .collect()
    }
}
