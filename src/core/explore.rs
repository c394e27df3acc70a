/// Story explorer session: the search/filter state of one open library view.

use crate::core::catalog::{Catalog, Choice, FilterCriteria};
use crate::schema::story::{StoryId, StoryRecord};

/// What the explorer shows for the current criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreView<'a> {
    Results(Vec<&'a StoryRecord>),
    /// Nothing matched; the view offers a clear-filters action.
    NoResults,
}

impl<'a> ExploreView<'a> {
    pub fn records(&self) -> &[&'a StoryRecord] {
        match self {
            ExploreView::Results(records) => records,
            ExploreView::NoResults => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoryExplorer {
    open: bool,
    criteria: FilterCriteria,
}

impl StoryExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.criteria = FilterCriteria::default();
        self.open = true;
    }

    /// Close the view. Criteria do not survive a close.
    pub fn close(&mut self) {
        self.criteria = FilterCriteria::default();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, search: &str) {
        self.criteria.search = search.to_string();
    }

    pub fn set_genre(&mut self, genre: &str) {
        self.criteria.genre = Choice::parse(genre);
    }

    pub fn set_mood(&mut self, mood: &str) {
        self.criteria.mood = Choice::parse(mood);
    }

    /// Reset to empty search, all genres, all moods.
    pub fn clear_filters(&mut self) {
        tracing::debug!(criteria = ?self.criteria, "filters cleared");
        self.criteria = FilterCriteria::default();
    }

    pub fn view<'a>(&self, catalog: &'a Catalog) -> ExploreView<'a> {
        let records = catalog.filter(&self.criteria);
        if records.is_empty() {
            ExploreView::NoResults
        } else {
            ExploreView::Results(records)
        }
    }

    /// Pick a story to experience. The explorer closes once a story is chosen.
    pub fn start_experience<'a>(
        &mut self,
        catalog: &'a Catalog,
        id: StoryId,
    ) -> Option<&'a StoryRecord> {
        let story = catalog.get(id)?;
        tracing::info!(id = story.id.0, title = %story.title, "starting story experience");
        self.close();
        Some(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(view: &ExploreView<'_>) -> Vec<u32> {
        view.records().iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn fresh_explorer_lists_everything() {
        let catalog = Catalog::builtin();
        let mut explorer = StoryExplorer::new();
        explorer.open();
        assert_eq!(ids(&explorer.view(&catalog)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn no_results_then_clear() {
        let catalog = Catalog::builtin();
        let mut explorer = StoryExplorer::new();
        explorer.open();
        explorer.set_search("xyz-nomatch");
        assert_eq!(explorer.view(&catalog), ExploreView::NoResults);

        explorer.clear_filters();
        assert!(explorer.criteria().is_default());
        assert_eq!(explorer.view(&catalog).records().len(), 6);
    }

    #[test]
    fn selectors() {
        let catalog = Catalog::builtin();
        let mut explorer = StoryExplorer::new();
        explorer.open();
        explorer.set_genre("Drama");
        assert_eq!(ids(&explorer.view(&catalog)), vec![3, 5]);
        explorer.set_mood("Romantic");
        assert_eq!(ids(&explorer.view(&catalog)), vec![3]);
        explorer.set_genre("All");
        explorer.set_mood("All");
        assert_eq!(explorer.view(&catalog).records().len(), 6);
    }

    #[test]
    fn close_discards_criteria() {
        let mut explorer = StoryExplorer::new();
        explorer.open();
        explorer.set_search("poe");
        explorer.close();
        explorer.open();
        assert_eq!(explorer.criteria().search, "");
    }

    #[test]
    fn start_experience_closes() {
        let catalog = Catalog::builtin();
        let mut explorer = StoryExplorer::new();
        explorer.open();
        let story = explorer.start_experience(&catalog, StoryId(2)).unwrap();
        assert_eq!(story.author, "Lewis Carroll");
        assert!(!explorer.is_open());
    }

    #[test]
    fn start_unknown_story_keeps_view_open() {
        let catalog = Catalog::builtin();
        let mut explorer = StoryExplorer::new();
        explorer.open();
        assert!(explorer.start_experience(&catalog, StoryId(42)).is_none());
        assert!(explorer.is_open());
    }
}
