/// Suggestion selector: theme classification and template picking.

use rand::Rng;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::theme::ThemeCategory;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("no suggestions defined for category '{}'", .0.name())]
    MissingCategory(ThemeCategory),
    #[error("suggestion pool for category '{}' is empty", .0.name())]
    EmptyPool(ThemeCategory),
}

const BUILTIN_SUGGESTIONS: [(ThemeCategory, [&str; 3]); 4] = [
    (
        ThemeCategory::Mysterious,
        [
            "In the shadows of the ancient library, whispers echoed through forgotten corridors...",
            "The old key turned with a satisfying click, revealing secrets that had been buried for centuries...",
            "As the fog rolled in from the moor, strange lights began to dance between the trees...",
        ],
    ),
    (
        ThemeCategory::Romantic,
        [
            "Under the starlit sky, their eyes met across the crowded ballroom...",
            "The letter arrived on a spring morning, sealed with lavender wax and promises...",
            "In the garden where roses bloomed eternal, love found its perfect moment...",
        ],
    ),
    (
        ThemeCategory::Adventure,
        [
            "The ship's sails billowed as storm clouds gathered on the horizon...",
            "Deep in the jungle, the map led to treasures beyond imagination...",
            "With courage in her heart, she stepped through the portal to unknown worlds...",
        ],
    ),
    (
        ThemeCategory::Peaceful,
        [
            "By the quiet lake, morning mist danced with the first rays of sunlight...",
            "The old oak tree provided shade for countless summer afternoons...",
            "In the meadow where time seemed to stand still, peace filled every breath...",
        ],
    ),
];

/// Candidate suggestions per theme category, plus the combined pool used
/// when a theme matches no category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionBook {
    pools: FxHashMap<ThemeCategory, Vec<String>>,
    /// All pools concatenated in `ThemeCategory::ALL` order.
    combined: Vec<String>,
}

impl Default for SuggestionBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SuggestionBook {
    /// The built-in twelve templates.
    pub fn builtin() -> Self {
        let pools = BUILTIN_SUGGESTIONS
            .iter()
            .map(|(category, lines)| (*category, lines.iter().map(|s| s.to_string()).collect()))
            .collect();
        Self::assemble(pools)
    }

    /// Build a book from explicit pools. Every category must be present and
    /// non-empty.
    pub fn from_pools(
        pools: FxHashMap<ThemeCategory, Vec<String>>,
    ) -> Result<SuggestionBook, SuggestionError> {
        for category in ThemeCategory::ALL {
            match pools.get(&category) {
                None => return Err(SuggestionError::MissingCategory(category)),
                Some(pool) if pool.is_empty() => return Err(SuggestionError::EmptyPool(category)),
                Some(_) => {}
            }
        }
        Ok(Self::assemble(pools))
    }

    fn assemble(pools: FxHashMap<ThemeCategory, Vec<String>>) -> Self {
        let combined = ThemeCategory::ALL
            .iter()
            .filter_map(|category| pools.get(category))
            .flatten()
            .cloned()
            .collect();
        Self { pools, combined }
    }

    /// Load a suggestion book from a RON file containing a map of
    /// category to template list.
    pub fn load_from_ron(path: &Path) -> Result<SuggestionBook, SuggestionError> {
        let contents = std::fs::read_to_string(path)?;
        let book = Self::parse_ron(&contents)?;
        tracing::info!(path = %path.display(), templates = book.combined.len(), "loaded suggestions");
        Ok(book)
    }

    /// Parse a suggestion book from a RON string.
    pub fn parse_ron(input: &str) -> Result<SuggestionBook, SuggestionError> {
        let pools: FxHashMap<ThemeCategory, Vec<String>> = ron::from_str(input)?;
        Self::from_pools(pools)
    }

    /// The templates of one category.
    pub fn category(&self, category: ThemeCategory) -> &[String] {
        self.pools.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every template, in category priority order.
    pub fn all(&self) -> &[String] {
        &self.combined
    }

    /// Resolve the candidate pool for a free-text theme.
    pub fn pool(&self, theme: &str) -> &[String] {
        match ThemeCategory::classify(theme) {
            Some(category) => self.category(category),
            None => self.all(),
        }
    }

    /// Pick the `index`-th candidate of the theme's pool.
    pub fn select_at(&self, theme: &str, index: usize) -> Option<&str> {
        self.pool(theme).get(index).map(String::as_str)
    }

    /// Pick one candidate uniformly at random from the theme's pool.
    pub fn select<R: Rng + ?Sized>(&self, theme: &str, rng: &mut R) -> &str {
        let pool = self.pool(theme);
        if pool.is_empty() {
            return "";
        }
        let index = rng.gen_range(0..pool.len());
        tracing::debug!(theme, index, pool_size = pool.len(), "selected suggestion");
        &pool[index]
    }
}
