/// Dashboard: routes between the modal sessions, one open at a time.

use crate::core::auth::{self, Authenticator};
use crate::core::catalog::Catalog;
use crate::core::cowriter::CoWriterSession;
use crate::core::explore::StoryExplorer;
use crate::core::narration::{NarrationPlayer, SpeechSynthesizer};
use crate::core::notice::Notice;
use crate::schema::story::{StoryId, StoryRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    Explore,
    CoWriter,
    Voice,
    /// The AR/VR story viewer.
    Immersive,
}

/// A "find your mood" tile. Every tile opens the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTile {
    pub mood: &'static str,
    pub icon: &'static str,
    pub books: u32,
}

pub const MOOD_TILES: [MoodTile; 4] = [
    MoodTile { mood: "Adventurous", icon: "🗡️", books: 3 },
    MoodTile { mood: "Romantic", icon: "💕", books: 5 },
    MoodTile { mood: "Mysterious", icon: "🔮", books: 4 },
    MoodTile { mood: "Peaceful", icon: "🌸", books: 6 },
];

pub struct Dashboard<S> {
    active: Option<Modal>,
    explorer: StoryExplorer,
    cowriter: CoWriterSession,
    player: NarrationPlayer<S>,
    immersive_story: Option<StoryId>,
}

impl<S: SpeechSynthesizer> Dashboard<S> {
    pub fn new(cowriter: CoWriterSession, player: NarrationPlayer<S>) -> Self {
        Self {
            active: None,
            explorer: StoryExplorer::new(),
            cowriter,
            player,
            immersive_story: None,
        }
    }

    pub fn active(&self) -> Option<Modal> {
        self.active
    }

    /// Open `modal`, closing whichever modal was open before.
    pub fn open(&mut self, modal: Modal) {
        if self.active == Some(modal) {
            return;
        }
        self.close();
        match modal {
            Modal::Explore => self.explorer.open(),
            Modal::CoWriter => self.cowriter.open(),
            Modal::Voice | Modal::Immersive => {}
        }
        tracing::debug!(?modal, "modal opened");
        self.active = Some(modal);
    }

    /// Close the active modal and its session.
    pub fn close(&mut self) {
        let Some(modal) = self.active.take() else {
            return;
        };
        match modal {
            Modal::Explore => self.explorer.close(),
            Modal::CoWriter => self.cowriter.close(),
            Modal::Voice => self.player.close(),
            Modal::Immersive => self.immersive_story = None,
        }
        tracing::debug!(?modal, "modal closed");
    }

    pub fn open_mood(&mut self, _tile: &MoodTile) {
        self.open(Modal::Explore);
    }

    /// Start a story chosen in the explorer in the immersive viewer.
    pub fn start_experience<'a>(
        &mut self,
        catalog: &'a Catalog,
        id: StoryId,
    ) -> Option<&'a StoryRecord> {
        if self.active != Some(Modal::Explore) {
            return None;
        }
        let story = self.explorer.start_experience(catalog, id)?;
        self.active = None;
        self.open(Modal::Immersive);
        self.immersive_story = Some(story.id);
        Some(story)
    }

    /// The story shown in the immersive viewer, if one was chosen.
    pub fn immersive_story(&self) -> Option<StoryId> {
        self.immersive_story
    }

    /// Close everything and sign out.
    pub fn logout<A: Authenticator + ?Sized>(&mut self, auth: &mut A) -> Notice {
        self.close();
        auth::logout(auth)
    }

    pub fn explorer(&self) -> &StoryExplorer {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut StoryExplorer {
        &mut self.explorer
    }

    pub fn cowriter(&self) -> &CoWriterSession {
        &self.cowriter
    }

    pub fn cowriter_mut(&mut self) -> &mut CoWriterSession {
        &mut self.cowriter
    }

    pub fn player(&self) -> &NarrationPlayer<S> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut NarrationPlayer<S> {
        &mut self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::narration::{PlatformVoice, SpeechError, Utterance};
    use crate::schema::narration::builtin_narrations;
    use std::time::Duration;

    #[derive(Default)]
    struct SilentSynth {
        cancels: usize,
    }

    impl SpeechSynthesizer for SilentSynth {
        fn voices(&self) -> Vec<PlatformVoice> {
            Vec::new()
        }

        fn speak(&mut self, _utterance: Utterance) -> Result<(), SpeechError> {
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    fn dashboard() -> Dashboard<SilentSynth> {
        let player = NarrationPlayer::new(SilentSynth::default(), builtin_narrations()).unwrap();
        Dashboard::new(CoWriterSession::default(), player)
    }

    #[test]
    fn one_modal_at_a_time() {
        let mut dash = dashboard();
        dash.open(Modal::CoWriter);
        assert!(dash.cowriter().is_open());

        dash.open(Modal::Explore);
        assert_eq!(dash.active(), Some(Modal::Explore));
        assert!(!dash.cowriter().is_open());
        assert!(dash.explorer().is_open());

        dash.close();
        assert_eq!(dash.active(), None);
        assert!(!dash.explorer().is_open());
    }

    #[test]
    fn reopening_same_modal_keeps_state() {
        let mut dash = dashboard();
        dash.open(Modal::Explore);
        dash.explorer_mut().set_search("poe");
        dash.open(Modal::Explore);
        assert_eq!(dash.explorer().criteria().search, "poe");
    }

    #[test]
    fn closing_cowriter_invalidates_pending_generation() {
        let mut dash = dashboard();
        dash.open(Modal::CoWriter);
        let ticket = dash
            .cowriter_mut()
            .request_generation(Duration::ZERO)
            .unwrap();
        dash.open(Modal::Voice);
        dash.open(Modal::CoWriter);
        assert!(dash.cowriter().pending().is_none());
        assert_ne!(dash.cowriter_mut().request_generation(Duration::ZERO).unwrap(), ticket);
    }

    #[test]
    fn closing_voice_stops_speech() {
        let mut dash = dashboard();
        dash.open(Modal::Voice);
        dash.player_mut().toggle();
        assert!(dash.player().is_playing());
        dash.close();
        assert!(!dash.player().is_playing());
    }

    #[test]
    fn mood_tiles_open_explorer() {
        let mut dash = dashboard();
        dash.open_mood(&MOOD_TILES[2]);
        assert_eq!(dash.active(), Some(Modal::Explore));
    }

    #[test]
    fn start_experience_moves_to_immersive() {
        let catalog = Catalog::builtin();
        let mut dash = dashboard();
        assert!(dash.start_experience(&catalog, StoryId(1)).is_none());

        dash.open(Modal::Explore);
        let story = dash.start_experience(&catalog, StoryId(5)).unwrap();
        assert_eq!(story.title, "Hamlet");
        assert_eq!(dash.active(), Some(Modal::Immersive));
        assert_eq!(dash.immersive_story(), Some(StoryId(5)));
        assert!(!dash.explorer().is_open());

        dash.close();
        assert_eq!(dash.immersive_story(), None);
    }
}
