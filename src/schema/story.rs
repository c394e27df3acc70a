use serde::{Deserialize, Serialize};

/// Newtype wrapper for story IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoryId(pub u32);

/// A fixed catalog entry. Records are never mutated once a catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: StoryId,
    pub title: String,
    pub author: String,
    /// One value from the catalog's genre vocabulary.
    pub genre: String,
    /// One value from the catalog's mood vocabulary.
    pub mood: String,
    pub description: String,
    /// Display glyph shown on the story card.
    pub thumbnail: String,
}

impl StoryRecord {
    /// Case-insensitive substring match against title or author.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// Genres offered by the built-in catalog, in selector order.
pub const BUILTIN_GENRES: [&str; 3] = ["Poetry", "Drama", "Fantasy"];

/// Moods offered by the built-in catalog, in selector order.
pub const BUILTIN_MOODS: [&str; 6] = [
    "Dark",
    "Whimsical",
    "Romantic",
    "Reflective",
    "Mysterious",
    "Peaceful",
];

// (id, title, author, genre, mood, description, thumbnail)
const BUILTIN_STORIES: [(u32, &str, &str, &str, &str, &str, &str); 6] = [
    (
        1,
        "The Raven",
        "Edgar Allan Poe",
        "Poetry",
        "Dark",
        "A haunting narrative poem about a man's encounter with a mysterious raven",
        "🐦‍⬛",
    ),
    (
        2,
        "Alice's Adventures in Wonderland",
        "Lewis Carroll",
        "Fantasy",
        "Whimsical",
        "Follow Alice down the rabbit hole into a magical world",
        "🐰",
    ),
    (
        3,
        "Romeo and Juliet",
        "William Shakespeare",
        "Drama",
        "Romantic",
        "The timeless tale of star-crossed lovers",
        "💕",
    ),
    (
        4,
        "The Road Not Taken",
        "Robert Frost",
        "Poetry",
        "Reflective",
        "A meditation on choices and their consequences",
        "🛤️",
    ),
    (
        5,
        "Hamlet",
        "William Shakespeare",
        "Drama",
        "Mysterious",
        "The tale of a prince's quest for revenge",
        "👑",
    ),
    (
        6,
        "I Wandered Lonely as a Cloud",
        "William Wordsworth",
        "Poetry",
        "Peaceful",
        "A celebration of nature's beauty and its effect on the soul",
        "🌼",
    ),
];

/// The six stories every library ships with.
pub fn builtin_stories() -> Vec<StoryRecord> {
    BUILTIN_STORIES
        .iter()
        .map(
            |&(id, title, author, genre, mood, description, thumbnail)| StoryRecord {
                id: StoryId(id),
                title: title.to_string(),
                author: author.to_string(),
                genre: genre.to_string(),
                mood: mood.to_string(),
                description: description.to_string(),
                thumbnail: thumbnail.to_string(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_sequential() {
        let ids: Vec<u32> = builtin_stories().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn builtin_vocabulary_covers_fixtures() {
        for story in builtin_stories() {
            assert!(BUILTIN_GENRES.contains(&story.genre.as_str()), "{}", story.genre);
            assert!(BUILTIN_MOODS.contains(&story.mood.as_str()), "{}", story.mood);
        }
    }

    #[test]
    fn mentions_title_or_author() {
        let stories = builtin_stories();
        let raven = &stories[0];
        assert!(raven.mentions("raven"));
        assert!(raven.mentions("poe"));
        assert!(!raven.mentions("frost"));
        assert!(raven.mentions(""));
    }
}
