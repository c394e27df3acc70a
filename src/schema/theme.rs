use serde::{Deserialize, Serialize};

/// The four suggestion pools a free-text theme can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeCategory {
    Mysterious,
    Romantic,
    Adventure,
    Peaceful,
}

impl ThemeCategory {
    /// All categories in keyword-priority order. This is also the order in
    /// which pools are concatenated for an unrecognised theme.
    pub const ALL: [ThemeCategory; 4] = [
        Self::Mysterious,
        Self::Romantic,
        Self::Adventure,
        Self::Peaceful,
    ];

    /// The lower-case keywords that select this category.
    pub fn keywords(&self) -> [&'static str; 2] {
        match self {
            Self::Mysterious => ["mysterious", "mystery"],
            Self::Romantic => ["romantic", "love"],
            Self::Adventure => ["adventure", "quest"],
            Self::Peaceful => ["peaceful", "calm"],
        }
    }

    /// Lower-case name, as typed into the theme box.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mysterious => "mysterious",
            Self::Romantic => "romantic",
            Self::Adventure => "adventure",
            Self::Peaceful => "peaceful",
        }
    }

    /// Classify a free-text theme. The first category in priority order
    /// with a keyword contained in the lower-cased theme wins.
    pub fn classify(theme: &str) -> Option<ThemeCategory> {
        let theme = theme.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.keywords().iter().any(|kw| theme.contains(kw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_each_keyword() {
        assert_eq!(ThemeCategory::classify("a mystery"), Some(ThemeCategory::Mysterious));
        assert_eq!(ThemeCategory::classify("Mysterious"), Some(ThemeCategory::Mysterious));
        assert_eq!(ThemeCategory::classify("LOVE letters"), Some(ThemeCategory::Romantic));
        assert_eq!(ThemeCategory::classify("romantic"), Some(ThemeCategory::Romantic));
        assert_eq!(ThemeCategory::classify("quest"), Some(ThemeCategory::Adventure));
        assert_eq!(ThemeCategory::classify("adventure"), Some(ThemeCategory::Adventure));
        assert_eq!(ThemeCategory::classify("calm sea"), Some(ThemeCategory::Peaceful));
        assert_eq!(ThemeCategory::classify("peaceful"), Some(ThemeCategory::Peaceful));
    }

    #[test]
    fn classify_priority() {
        assert_eq!(
            ThemeCategory::classify("mysterious romantic"),
            Some(ThemeCategory::Mysterious)
        );
        assert_eq!(
            ThemeCategory::classify("a calm quest for love"),
            Some(ThemeCategory::Romantic)
        );
    }

    #[test]
    fn classify_substring_inside_words() {
        // "beloved" contains "love"
        assert_eq!(ThemeCategory::classify("beloved"), Some(ThemeCategory::Romantic));
    }

    #[test]
    fn classify_unrecognised() {
        assert_eq!(ThemeCategory::classify(""), None);
        assert_eq!(ThemeCategory::classify("space opera"), None);
    }
}
