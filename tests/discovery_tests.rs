/// Discovery integration tests: catalog filtering and the explorer flow.

use litrealm::core::catalog::{filter, Catalog, FilterCriteria, ALL};
use litrealm::core::explore::ExploreView;
use litrealm::core::narration::{PlatformVoice, SpeechError, SpeechSynthesizer, Utterance};
use litrealm::core::dashboard::Modal;
use litrealm::schema::story::{StoryId, StoryRecord};
use litrealm::Litrealm;

struct NoSpeech;

impl SpeechSynthesizer for NoSpeech {
    fn voices(&self) -> Vec<PlatformVoice> {
        Vec::new()
    }

    fn speak(&mut self, _utterance: Utterance) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }

    fn cancel(&mut self) {}
}

fn ids(records: &[&StoryRecord]) -> Vec<u32> {
    records.iter().map(|r| r.id.0).collect()
}

#[test]
fn fixture_scenarios() {
    let engine = Litrealm::builder().build().unwrap();

    let raven = engine.search(&FilterCriteria::new("raven", ALL, ALL));
    assert_eq!(raven.len(), 1);
    assert_eq!(raven[0].id, StoryId(1));
    assert_eq!(raven[0].title, "The Raven");
    assert_eq!(raven[0].author, "Edgar Allan Poe");

    let poetry = engine.search(&FilterCriteria::new("", "Poetry", ALL));
    assert_eq!(ids(&poetry), vec![1, 4, 6]);

    assert!(engine
        .search(&FilterCriteria::new("xyz-nomatch", ALL, ALL))
        .is_empty());
}

#[test]
fn substring_of_title_or_author_is_always_found() {
    let catalog = Catalog::builtin();
    for record in &catalog.stories {
        for field in [&record.title, &record.author] {
            let chars: Vec<char> = field.chars().collect();
            for start in 0..chars.len() {
                let end = (start + 4).min(chars.len());
                let needle: String = chars[start..end].iter().collect::<String>().to_uppercase();
                let criteria = FilterCriteria::new(&needle, &record.genre, &record.mood);
                let hits = catalog.filter(&criteria);
                assert!(
                    hits.iter().any(|r| r.id == record.id),
                    "'{needle}' should find {}",
                    record.title
                );
            }
        }
    }
}

#[test]
fn filtering_twice_changes_nothing() {
    let catalog = Catalog::builtin();
    let searches = ["", "the", "william", "o", "zzz"];
    let genres = ["All", "Poetry", "Drama", "Fantasy", "Poe"];
    let moods = ["All", "Dark", "Romantic", "Peaceful"];
    for search in searches {
        for genre in genres {
            for mood in moods {
                let criteria = FilterCriteria::new(search, genre, mood);
                let once: Vec<StoryRecord> =
                    catalog.filter(&criteria).into_iter().cloned().collect();
                let twice: Vec<StoryRecord> =
                    filter(&once, &criteria).into_iter().cloned().collect();
                assert_eq!(once, twice);
            }
        }
    }
}

#[test]
fn explorer_no_results_and_clear() {
    let engine = Litrealm::builder().build().unwrap();
    let mut dash = engine.dashboard(NoSpeech).unwrap();
    dash.open(Modal::Explore);

    dash.explorer_mut().set_search("xyz-nomatch");
    dash.explorer_mut().set_genre("Drama");
    assert_eq!(dash.explorer().view(engine.catalog()), ExploreView::NoResults);

    dash.explorer_mut().clear_filters();
    let view = dash.explorer().view(engine.catalog());
    assert_eq!(ids(view.records()), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn speech_unavailable_is_not_fatal() {
    let engine = Litrealm::builder().build().unwrap();
    let mut dash = engine.dashboard(NoSpeech).unwrap();
    dash.open(Modal::Voice);
    let notice = dash.player_mut().toggle().unwrap();
    assert_eq!(notice.title, "Error");
    assert!(!dash.player().is_playing());
}
