use serde::{Deserialize, Serialize};

/// A narrated excerpt in the voice player's playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    pub title: String,
    pub author: String,
    /// The text handed to the speech synthesizer.
    pub text: String,
    /// Display length, e.g. "5:23".
    pub duration: String,
}

const BUILTIN_NARRATIONS: [(&str, &str, &str, &str); 3] = [
    (
        "The Raven",
        "Edgar Allan Poe",
        "Once upon a midnight dreary, while I pondered, weak and weary, Over many a quaint and curious volume of forgotten lore...",
        "5:23",
    ),
    (
        "Daffodils",
        "William Wordsworth",
        "I wandered lonely as a cloud That floats on high o'er vales and hills, When all at once I saw a crowd...",
        "3:45",
    ),
    (
        "Romeo and Juliet",
        "William Shakespeare",
        "But soft, what light through yonder window breaks? It is the east, and Juliet is the sun...",
        "4:12",
    ),
];

/// The default narration playlist.
pub fn builtin_narrations() -> Vec<Narration> {
    BUILTIN_NARRATIONS
        .iter()
        .map(|&(title, author, text, duration)| Narration {
            title: title.to_string(),
            author: author.to_string(),
            text: text.to_string(),
            duration: duration.to_string(),
        })
        .collect()
}
