//! WASM bindings for litrealm: the state layer behind the browser views.

use std::time::Duration;
use thiserror::Error;
use wasm_bindgen::prelude::*;

use litrealm::core::auth::{self, AuthError, AuthOutcome, LoginForm, SignupForm};
use litrealm::core::catalog::Catalog;
use litrealm::core::cowriter::{GenerationState, GenerationTicket};
use litrealm::core::dashboard::{Dashboard, Modal};
use litrealm::core::explore::ExploreView;
use litrealm::core::narration::{
    parse_playlist, PlatformVoice, PlaybackRate, SpeechError, SpeechSynthesizer, Utterance,
    VoiceStyle,
};
use litrealm::core::notice::{Notice, Tone};
use litrealm::core::suggest::SuggestionBook;
use litrealm::schema::story::{StoryId, StoryRecord};
use litrealm::{Litrealm, LitrealmError};

// ---------------------------------------------------------------------------
// Embedded library data, compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const CATALOG: &str = include_str!("../../library_data/catalog.ron");
    pub const SUGGESTIONS: &str = include_str!("../../library_data/suggestions.ron");
    pub const NARRATIONS: &str = include_str!("../../library_data/narrations.ron");
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Library(#[from] LitrealmError),
    #[error("clock reading {0} ms is out of range")]
    Clock(f64),
    #[error("unknown view '{0}'")]
    UnknownModal(String),
    #[error("unknown playback rate '{0}'")]
    UnknownRate(String),
    #[error("unknown voice style '{0}'")]
    UnknownStyle(String),
    #[error("unknown story: {0}")]
    UnknownStory(u32),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Speech host: the page hands in a wrapper around `window.speechSynthesis`
// ---------------------------------------------------------------------------
#[wasm_bindgen]
extern "C" {
    pub type SpeechHost;

    /// JSON array of the platform's voice names.
    #[wasm_bindgen(method, js_name = voiceNames)]
    fn voice_names(this: &SpeechHost) -> String;

    #[wasm_bindgen(method, catch)]
    fn speak(
        this: &SpeechHost,
        text: &str,
        voice: Option<String>,
        rate: f32,
        volume: f32,
        pitch: f32,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn cancel(this: &SpeechHost);
}

/// `None` when the browser has no speech synthesis.
struct BrowserSpeech(Option<SpeechHost>);

impl SpeechSynthesizer for BrowserSpeech {
    fn voices(&self) -> Vec<PlatformVoice> {
        let Some(host) = &self.0 else {
            return Vec::new();
        };
        serde_json::from_str::<Vec<String>>(&host.voice_names())
            .unwrap_or_default()
            .into_iter()
            .map(|name| PlatformVoice { name })
            .collect()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        let host = self.0.as_ref().ok_or(SpeechError::Unavailable)?;
        host.speak(
            &utterance.text,
            utterance.voice,
            utterance.rate,
            utterance.volume,
            utterance.pitch,
        )
        .map_err(|e| SpeechError::Failed(e.as_string().unwrap_or_else(|| "speech error".into())))
    }

    fn cancel(&mut self) {
        if let Some(host) = &self.0 {
            host.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct StoryCard<'a> {
    id: u32,
    title: &'a str,
    author: &'a str,
    genre: &'a str,
    mood: &'a str,
    description: &'a str,
    thumbnail: &'a str,
}

impl<'a> From<&'a StoryRecord> for StoryCard<'a> {
    fn from(story: &'a StoryRecord) -> Self {
        StoryCard {
            id: story.id.0,
            title: &story.title,
            author: &story.author,
            genre: &story.genre,
            mood: &story.mood,
            description: &story.description,
            thumbnail: &story.thumbnail,
        }
    }
}

#[derive(serde::Serialize)]
struct ExploreInfo<'a> {
    search: &'a str,
    genre: &'a str,
    mood: &'a str,
    stories: Vec<StoryCard<'a>>,
    no_results: bool,
}

#[derive(serde::Serialize)]
struct TicketInfo {
    epoch: u64,
    seq: u64,
    latency_ms: u64,
}

#[derive(serde::Serialize)]
struct NoticeInfo<'a> {
    title: &'a str,
    description: &'a str,
    destructive: bool,
}

impl<'a> From<&'a Notice> for NoticeInfo<'a> {
    fn from(notice: &'a Notice) -> Self {
        NoticeInfo {
            title: &notice.title,
            description: &notice.description,
            destructive: notice.tone == Tone::Destructive,
        }
    }
}

#[derive(serde::Serialize)]
struct PollInfo<'a> {
    notice: Option<NoticeInfo<'a>>,
    /// Set while a generation is pending but not yet due.
    retry_ms: Option<f64>,
}

#[derive(serde::Serialize)]
struct OutcomeInfo<'a> {
    status: &'static str,
    notice: Option<NoticeInfo<'a>>,
}

impl<'a> From<&'a AuthOutcome> for OutcomeInfo<'a> {
    fn from(outcome: &'a AuthOutcome) -> Self {
        let status = match outcome {
            AuthOutcome::SignedIn(_) => "signed_in",
            AuthOutcome::Rejected(_) => "rejected",
            AuthOutcome::Busy => "busy",
        };
        OutcomeInfo {
            status,
            notice: outcome.notice().map(NoticeInfo::from),
        }
    }
}

#[derive(serde::Serialize)]
struct CoWriterInfo<'a> {
    state: &'static str,
    theme: &'a str,
    draft: &'a str,
    suggestion: Option<&'a str>,
    word_count: usize,
    can_save: bool,
    saved: Vec<String>,
}

#[derive(serde::Serialize)]
struct PlayerInfo<'a> {
    index: usize,
    title: &'a str,
    author: &'a str,
    duration: &'a str,
    playing: bool,
    rate: &'static str,
    style: String,
    volume: f32,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    Ok(serde_json::to_string(value).map_err(AppError::from)?)
}

fn notice_json(notice: Option<Notice>) -> Result<String, JsError> {
    to_json(&notice.as_ref().map(NoticeInfo::from))
}

/// `performance.now()` milliseconds to a session clock offset.
fn clock(now_ms: f64) -> Result<Duration, AppError> {
    Duration::try_from_secs_f64(now_ms / 1000.0).map_err(|_| AppError::Clock(now_ms))
}

fn modal(name: &str) -> Result<Modal, AppError> {
    match name {
        "explore" => Ok(Modal::Explore),
        "cowriter" => Ok(Modal::CoWriter),
        "voice" => Ok(Modal::Voice),
        "immersive" => Ok(Modal::Immersive),
        _ => Err(AppError::UnknownModal(name.to_string())),
    }
}

fn modal_name(modal: Modal) -> &'static str {
    match modal {
        Modal::Explore => "explore",
        Modal::CoWriter => "cowriter",
        Modal::Voice => "voice",
        Modal::Immersive => "immersive",
    }
}

fn state_label(state: GenerationState) -> &'static str {
    match state {
        GenerationState::Idle => "idle",
        GenerationState::Generating => "generating",
        GenerationState::Ready => "ready",
    }
}

/// Failures reported by the host's own auth client become `AuthError::Failed`.
fn reported(ok: bool, error: Option<String>) -> Result<bool, AuthError> {
    match error {
        Some(message) => Err(AuthError::Failed(message)),
        None => Ok(ok),
    }
}

// ---------------------------------------------------------------------------
// App: the dashboard, forms and engine behind one page
// ---------------------------------------------------------------------------

/// What a generation timer callback found.
#[derive(Debug, PartialEq)]
enum Poll {
    Delivered(Notice),
    /// Still pending; call again after this long.
    Retry(Duration),
    Idle,
}

struct App<S> {
    engine: Litrealm,
    dashboard: Dashboard<S>,
    login: LoginForm,
    signup: SignupForm,
}

impl<S: SpeechSynthesizer> App<S> {
    fn new(seed: u64, synth: S) -> Result<Self, AppError> {
        let catalog = Catalog::parse_ron(data::CATALOG).map_err(LitrealmError::from)?;
        let suggestions = SuggestionBook::parse_ron(data::SUGGESTIONS).map_err(LitrealmError::from)?;
        let narrations = parse_playlist(data::NARRATIONS).map_err(LitrealmError::from)?;

        let engine = Litrealm::builder()
            .seed(seed)
            .with_catalog(catalog)
            .with_suggestions(suggestions)
            .with_narrations(narrations)
            .build()?;
        let dashboard = engine.dashboard(synth)?;

        Ok(App {
            engine,
            dashboard,
            login: LoginForm::default(),
            signup: SignupForm::default(),
        })
    }

    fn open(&mut self, name: &str) -> Result<(), AppError> {
        self.dashboard.open(modal(name)?);
        Ok(())
    }

    fn start_experience(&mut self, id: u32) -> Result<&StoryRecord, AppError> {
        self.dashboard
            .start_experience(self.engine.catalog(), StoryId(id))
            .ok_or(AppError::UnknownStory(id))
    }

    fn begin_generation(&mut self, now_ms: f64) -> Result<GenerationTicket, AppError> {
        let now = clock(now_ms)?;
        self.dashboard
            .cowriter_mut()
            .request_generation(now)
            .map_err(|e| AppError::Library(e.into()))
    }

    fn poll_generation(&mut self, now_ms: f64) -> Result<Poll, AppError> {
        let now = clock(now_ms)?;
        if let Some(notice) = self.engine.poll_generation(self.dashboard.cowriter_mut(), now) {
            return Ok(Poll::Delivered(notice));
        }
        Ok(match self.dashboard.cowriter().pending() {
            Some(pending) => Poll::Retry(pending.due.saturating_sub(now)),
            None => Poll::Idle,
        })
    }

    fn login_begin(&mut self, email: &str, password: &str) -> bool {
        if self.login.is_loading() {
            return false;
        }
        self.login.email = email.to_string();
        self.login.password = password.to_string();
        self.login.begin()
    }

    fn signup_begin(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthOutcome> {
        if self.signup.is_loading() {
            return Err(AuthOutcome::Busy);
        }
        let mut form = SignupForm::default();
        form.name = name.to_string();
        form.email = email.to_string();
        form.password = password.to_string();
        form.confirm_password = confirm_password.to_string();
        self.signup = form;
        self.signup.begin()
    }

    /// The host has already signed out with its auth client.
    fn logout(&mut self) -> Notice {
        self.dashboard.close();
        self.login = LoginForm::default();
        self.signup = SignupForm::default();
        auth::logged_out()
    }
}

// ---------------------------------------------------------------------------
// LibraryApp, the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct LibraryApp {
    app: App<BrowserSpeech>,
}

#[wasm_bindgen]
impl LibraryApp {
    /// Create an app over the embedded library. Pass `undefined` for
    /// `speech` when the browser has no speech synthesis.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, speech: Option<SpeechHost>) -> Result<LibraryApp, JsError> {
        Ok(LibraryApp {
            app: App::new(seed, BrowserSpeech(speech))?,
        })
    }

    /// Return JSON array of genre dropdown options.
    pub fn genres(&self) -> Result<String, JsError> {
        to_json(&self.app.engine.catalog().genre_options())
    }

    /// Return JSON array of mood dropdown options.
    pub fn moods(&self) -> Result<String, JsError> {
        to_json(&self.app.engine.catalog().mood_options())
    }

    /// Open a view ("explore", "cowriter", "voice", "immersive"), closing
    /// whichever view was open.
    pub fn open(&mut self, view: &str) -> Result<(), JsError> {
        Ok(self.app.open(view)?)
    }

    pub fn close(&mut self) {
        self.app.dashboard.close();
    }

    /// Name of the open view, or `undefined`.
    pub fn active_view(&self) -> Option<String> {
        self.app.dashboard.active().map(|m| modal_name(m).to_string())
    }

    pub fn set_search(&mut self, search: &str) {
        self.app.dashboard.explorer_mut().set_search(search);
    }

    pub fn set_genre(&mut self, genre: &str) {
        self.app.dashboard.explorer_mut().set_genre(genre);
    }

    pub fn set_mood(&mut self, mood: &str) {
        self.app.dashboard.explorer_mut().set_mood(mood);
    }

    pub fn clear_filters(&mut self) {
        self.app.dashboard.explorer_mut().clear_filters();
    }

    /// Return the explorer's criteria and matching stories as JSON.
    pub fn explore_view(&self) -> Result<String, JsError> {
        let criteria = self.app.dashboard.explorer().criteria();
        let view = self.app.dashboard.explorer().view(self.app.engine.catalog());
        let info = ExploreInfo {
            search: &criteria.search,
            genre: criteria.genre.as_str(),
            mood: criteria.mood.as_str(),
            stories: view.records().iter().map(|s| StoryCard::from(*s)).collect(),
            no_results: view == ExploreView::NoResults,
        };
        to_json(&info)
    }

    /// Choose a story from the explorer; moves to the immersive view and
    /// returns the story as JSON.
    pub fn start_experience(&mut self, id: u32) -> Result<String, JsError> {
        let story = self.app.start_experience(id)?;
        to_json(&StoryCard::from(story))
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.app.dashboard.cowriter_mut().set_theme(theme);
    }

    pub fn set_draft(&mut self, draft: &str) {
        self.app.dashboard.cowriter_mut().set_draft(draft);
    }

    /// Start a generation. Returns `{epoch, seq, latency_ms}`; the caller
    /// schedules `poll_generation` after `latency_ms`.
    pub fn begin_generation(&mut self, now_ms: f64) -> Result<String, JsError> {
        let ticket = self.app.begin_generation(now_ms)?;
        to_json(&TicketInfo {
            epoch: ticket.epoch,
            seq: ticket.seq,
            latency_ms: self.app.dashboard.cowriter().latency().as_millis() as u64,
        })
    }

    /// Timer callback. Returns `{notice, retry_ms}`: the notice once the
    /// suggestion is delivered, or the delay before polling again.
    pub fn poll_generation(&mut self, now_ms: f64) -> Result<String, JsError> {
        let poll = self.app.poll_generation(now_ms)?;
        let info = match &poll {
            Poll::Delivered(notice) => PollInfo {
                notice: Some(NoticeInfo::from(notice)),
                retry_ms: None,
            },
            Poll::Retry(wait) => PollInfo {
                notice: None,
                retry_ms: Some((wait.as_secs_f64() * 1000.0).ceil()),
            },
            Poll::Idle => PollInfo {
                notice: None,
                retry_ms: None,
            },
        };
        to_json(&info)
    }

    /// Returns the notice JSON, or `null` if there was nothing to accept.
    pub fn accept_suggestion(&mut self) -> Result<String, JsError> {
        notice_json(self.app.dashboard.cowriter_mut().accept_suggestion())
    }

    /// Returns the notice JSON, or `null` if the draft was blank.
    pub fn save_creation(&mut self) -> Result<String, JsError> {
        notice_json(self.app.dashboard.cowriter_mut().save_creation())
    }

    /// Return the co-writer's full state as JSON.
    pub fn cowriter_state(&self) -> Result<String, JsError> {
        let writer = self.app.dashboard.cowriter();
        let saved = (0..writer.saved_creations().len())
            .filter_map(|i| writer.creation_preview(i))
            .collect();
        let info = CoWriterInfo {
            state: state_label(writer.state()),
            theme: writer.theme(),
            draft: writer.draft(),
            suggestion: writer.suggestion(),
            word_count: writer.word_count(),
            can_save: writer.can_save(),
            saved,
        };
        to_json(&info)
    }

    /// Return JSON array of the voice player's playlist.
    pub fn narrations(&self) -> Result<String, JsError> {
        to_json(&self.app.engine.narrations())
    }

    /// Return the voice player's state as JSON.
    pub fn player_state(&self) -> Result<String, JsError> {
        let player = self.app.dashboard.player();
        let current = player.current();
        let info = PlayerInfo {
            index: player.current_index(),
            title: &current.title,
            author: &current.author,
            duration: &current.duration,
            playing: player.is_playing(),
            rate: player.rate().label(),
            style: format!("{:?}", player.style()),
            volume: player.volume(),
        };
        to_json(&info)
    }

    /// Play or pause. Returns a notice JSON if speech failed, else `null`.
    pub fn toggle_playback(&mut self) -> Result<String, JsError> {
        notice_json(self.app.dashboard.player_mut().toggle())
    }

    pub fn choose_narration(&mut self, index: usize) -> bool {
        self.app.dashboard.player_mut().choose(index)
    }

    pub fn previous_narration(&mut self) {
        self.app.dashboard.player_mut().previous();
    }

    pub fn next_narration(&mut self) {
        self.app.dashboard.player_mut().next();
    }

    /// `label` is one of "0.5x", "1x", "1.5x", "2x".
    pub fn set_rate(&mut self, label: &str) -> Result<String, JsError> {
        let rate = PlaybackRate::ALL
            .into_iter()
            .find(|r| r.label() == label)
            .ok_or_else(|| AppError::UnknownRate(label.to_string()))?;
        notice_json(self.app.dashboard.player_mut().set_rate(rate))
    }

    pub fn set_style(&mut self, name: &str) -> Result<String, JsError> {
        let style = VoiceStyle::ALL
            .into_iter()
            .find(|s| format!("{s:?}").eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::UnknownStyle(name.to_string()))?;
        notice_json(self.app.dashboard.player_mut().set_style(style))
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.app.dashboard.player_mut().set_volume(volume);
    }

    /// The speech host's `onend` fired.
    pub fn speech_ended(&mut self) {
        self.app.dashboard.player_mut().speech_ended();
    }

    /// Returns false if a login is already in flight; otherwise the host
    /// calls its auth client and reports back through `login_result`.
    pub fn login_begin(&mut self, email: &str, password: &str) -> bool {
        self.app.login_begin(email, password)
    }

    /// `error` carries the auth client's failure message, if it threw.
    pub fn login_result(&mut self, ok: bool, error: Option<String>) -> Result<String, JsError> {
        let outcome = self.app.login.finish(reported(ok, error));
        to_json(&OutcomeInfo::from(&outcome))
    }

    /// Returns `null` when the host should call its auth client, or the
    /// outcome JSON when the form was rejected up front.
    pub fn signup_begin(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<String, JsError> {
        match self.app.signup_begin(name, email, password, confirm_password) {
            Ok(()) => to_json(&None::<OutcomeInfo>),
            Err(outcome) => to_json(&OutcomeInfo::from(&outcome)),
        }
    }

    pub fn signup_result(&mut self, ok: bool, error: Option<String>) -> Result<String, JsError> {
        let outcome = self.app.signup.finish(reported(ok, error));
        to_json(&OutcomeInfo::from(&outcome))
    }

    /// Close every view after the host signed out. Returns the notice JSON.
    pub fn logout(&mut self) -> Result<String, JsError> {
        notice_json(Some(self.app.logout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A browser without speech synthesis.
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

    fn app() -> App<NoSpeech> {
        App::new(7, NoSpeech).unwrap()
    }

    #[test]
    fn embedded_library_loads() {
        let app = app();
        assert_eq!(app.engine.catalog(), &Catalog::builtin());
        assert_eq!(app.engine.narrations().len(), 3);
        assert_eq!(app.dashboard.active(), None);
    }

    #[test]
    fn early_timer_callback_retries_instead_of_failing() {
        let mut app = app();
        app.open("cowriter").unwrap();
        app.begin_generation(100.1).unwrap();

        // Coarsened clock: the 1500 ms timer measures slightly less.
        let poll = app.poll_generation(1600.0).unwrap();
        let Poll::Retry(wait) = poll else {
            panic!("expected a retry, got {poll:?}");
        };
        assert!(wait > Duration::ZERO && wait <= Duration::from_millis(1));
        assert_eq!(app.dashboard.cowriter().state(), GenerationState::Generating);

        assert!(matches!(app.poll_generation(1601.0).unwrap(), Poll::Delivered(_)));
        assert_eq!(app.dashboard.cowriter().state(), GenerationState::Ready);
        assert!(app.begin_generation(1700.0).is_ok());
    }

    #[test]
    fn poll_without_pending_generation_is_idle() {
        let mut app = app();
        app.open("cowriter").unwrap();
        assert_eq!(app.poll_generation(0.0).unwrap(), Poll::Idle);
    }

    #[test]
    fn opening_explorer_cancels_cowriter_generation() {
        let mut app = app();
        app.open("cowriter").unwrap();
        app.begin_generation(0.0).unwrap();

        app.open("explore").unwrap();
        assert_eq!(app.dashboard.active(), Some(Modal::Explore));
        assert!(!app.dashboard.cowriter().is_open());
        assert_eq!(app.poll_generation(5000.0).unwrap(), Poll::Idle);
        assert!(app.dashboard.cowriter().suggestion().is_none());
    }

    #[test]
    fn unknown_view_rejected() {
        let mut app = app();
        assert!(matches!(app.open("settings"), Err(AppError::UnknownModal(_))));
    }

    #[test]
    fn start_experience_needs_open_explorer() {
        let mut app = app();
        assert!(matches!(app.start_experience(1), Err(AppError::UnknownStory(1))));

        app.open("explore").unwrap();
        assert_eq!(app.start_experience(4).unwrap().title, "The Road Not Taken");
        assert_eq!(app.dashboard.active(), Some(Modal::Immersive));
    }

    #[test]
    fn unrepresentable_clock_is_an_error() {
        for now_ms in [f64::INFINITY, f64::NAN, -1.0, f64::MAX] {
            assert!(matches!(clock(now_ms), Err(AppError::Clock(_))));
        }
        let mut app = app();
        app.open("cowriter").unwrap();
        assert!(matches!(app.begin_generation(f64::INFINITY), Err(AppError::Clock(_))));
        assert_eq!(app.dashboard.cowriter().state(), GenerationState::Idle);
    }

    #[test]
    fn login_round_trip_through_host() {
        let mut app = app();
        assert!(app.login_begin("reader@litrealm.io", "secret"));
        assert!(!app.login_begin("reader@litrealm.io", "secret"));

        let outcome = app.login.finish(reported(false, Some("network down".into())));
        assert_eq!(outcome, AuthOutcome::Rejected(Notice::generic_error()));
        assert!(!app.login.is_loading());

        assert!(app.login_begin("reader@litrealm.io", "secret"));
        let outcome = app.login.finish(reported(true, None));
        assert!(matches!(outcome, AuthOutcome::SignedIn(_)));
    }

    #[test]
    fn signup_mismatch_rejected_before_host_call() {
        let mut app = app();
        let outcome = app
            .signup_begin("Ada", "ada@litrealm.io", "one", "two")
            .unwrap_err();
        assert_eq!(outcome.notice().unwrap().title, "Passwords don't match");
        assert!(!app.signup.is_loading());

        assert!(app.signup_begin("Ada", "ada@litrealm.io", "one", "one").is_ok());
        assert_eq!(
            app.signup_begin("Ada", "ada@litrealm.io", "one", "one"),
            Err(AuthOutcome::Busy)
        );
        let outcome = app.signup.finish(reported(false, None));
        assert_eq!(outcome.notice().unwrap().title, "Account exists");
    }

    #[test]
    fn logout_closes_views() {
        let mut app = app();
        app.open("voice").unwrap();
        let notice = app.logout();
        assert_eq!(notice.title, "Logged out");
        assert_eq!(app.dashboard.active(), None);
    }

    #[test]
    fn missing_speech_reports_notice() {
        let mut app = app();
        app.open("voice").unwrap();
        let notice = app.dashboard.player_mut().toggle().unwrap();
        assert!(notice.is_error());
        assert!(!app.dashboard.player().is_playing());
    }
}
