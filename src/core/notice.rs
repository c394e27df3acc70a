/// User-visible status messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Info,
    /// Failure the user should notice.
    Destructive,
}

/// A dismissable, non-fatal notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub tone: Tone,
}

impl Notice {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            tone: Tone::Info,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            tone: Tone::Destructive,
        }
    }

    /// Catch-all for collaborator failures.
    pub fn generic_error() -> Self {
        Self::destructive("Error", "Something went wrong. Please try again.")
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Destructive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_error_is_destructive() {
        let notice = Notice::generic_error();
        assert_eq!(notice.title, "Error");
        assert!(notice.is_error());
        assert!(!Notice::info("Saved", "ok").is_error());
    }
}
