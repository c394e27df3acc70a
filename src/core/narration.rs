/// Narration player: playlist navigation and playback settings driving a
/// platform speech synthesizer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::notice::Notice;
use crate::schema::narration::Narration;

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("narration playlist is empty")]
    EmptyPlaylist,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech synthesis is not available on this platform")]
    Unavailable,
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// A voice offered by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformVoice {
    pub name: String,
}

/// One request to the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    /// `None` leaves the platform default voice in place.
    pub voice: Option<String>,
    pub rate: f32,
    /// In `[0, 1]`.
    pub volume: f32,
    pub pitch: f32,
}

/// The platform text-to-speech collaborator.
pub trait SpeechSynthesizer {
    /// Voices currently available. May be empty.
    fn voices(&self) -> Vec<PlatformVoice>;
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;
    /// Stop and discard anything queued or speaking.
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackRate {
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 4] = [Self::Half, Self::Normal, Self::OneAndHalf, Self::Double];

    pub fn multiplier(&self) -> f32 {
        match self {
            Self::Half => 0.5,
            Self::Normal => 1.0,
            Self::OneAndHalf => 1.5,
            Self::Double => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Half => "0.5x",
            Self::Normal => "1x",
            Self::OneAndHalf => "1.5x",
            Self::Double => "2x",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VoiceStyle {
    #[default]
    Dramatic,
    Gentle,
    Mysterious,
}

impl VoiceStyle {
    pub const ALL: [VoiceStyle; 3] = [Self::Dramatic, Self::Gentle, Self::Mysterious];

    pub fn pitch(&self) -> f32 {
        match self {
            Self::Dramatic => 0.8,
            Self::Gentle | Self::Mysterious => 1.0,
        }
    }
}

/// Volume a fresh player starts at.
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Load a narration playlist from a RON list.
pub fn load_playlist(path: &Path) -> Result<Vec<Narration>, NarrationError> {
    let contents = std::fs::read_to_string(path)?;
    let playlist = parse_playlist(&contents)?;
    tracing::info!(path = %path.display(), entries = playlist.len(), "loaded narrations");
    Ok(playlist)
}

pub fn parse_playlist(input: &str) -> Result<Vec<Narration>, NarrationError> {
    let playlist: Vec<Narration> = ron::from_str(input)?;
    if playlist.is_empty() {
        return Err(NarrationError::EmptyPlaylist);
    }
    Ok(playlist)
}

/// Best-effort voice pick: the first voice whose name mentions a gender.
pub fn pick_voice(voices: &[PlatformVoice]) -> Option<&PlatformVoice> {
    voices.iter().find(|voice| {
        let name = voice.name.to_lowercase();
        name.contains("female") || name.contains("male")
    })
}

pub struct NarrationPlayer<S> {
    synth: S,
    playlist: Vec<Narration>,
    current: usize,
    playing: bool,
    rate: PlaybackRate,
    style: VoiceStyle,
    volume: f32,
}

impl<S: SpeechSynthesizer> NarrationPlayer<S> {
    pub fn new(synth: S, playlist: Vec<Narration>) -> Result<Self, NarrationError> {
        if playlist.is_empty() {
            return Err(NarrationError::EmptyPlaylist);
        }
        Ok(Self {
            synth,
            playlist,
            current: 0,
            playing: false,
            rate: PlaybackRate::default(),
            style: VoiceStyle::default(),
            volume: DEFAULT_VOLUME,
        })
    }

    pub fn synth(&self) -> &S {
        &self.synth
    }

    pub fn playlist(&self) -> &[Narration] {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Narration {
        &self.playlist[self.current]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn style(&self) -> VoiceStyle {
        self.style
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play or pause. Returns a notice if speech could not start.
    pub fn toggle(&mut self) -> Option<Notice> {
        if self.playing {
            self.stop();
            None
        } else {
            self.playing = true;
            self.speak_current()
        }
    }

    /// Jump to a playlist entry and stop playback.
    pub fn choose(&mut self, index: usize) -> bool {
        if index >= self.playlist.len() {
            return false;
        }
        self.current = index;
        self.stop();
        true
    }

    /// Previous entry, wrapping to the last.
    pub fn previous(&mut self) {
        let index = if self.current == 0 {
            self.playlist.len() - 1
        } else {
            self.current - 1
        };
        self.choose(index);
    }

    /// Next entry, wrapping to the first.
    pub fn next(&mut self) {
        self.choose((self.current + 1) % self.playlist.len());
    }

    /// Changing speed restarts speech that is already playing.
    pub fn set_rate(&mut self, rate: PlaybackRate) -> Option<Notice> {
        self.rate = rate;
        self.restart_if_playing()
    }

    /// Changing style restarts speech that is already playing.
    pub fn set_style(&mut self, style: VoiceStyle) -> Option<Notice> {
        self.style = style;
        self.restart_if_playing()
    }

    /// Clamp to `[0, 1]`. Applies from the next utterance.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// The synthesizer reported the end of the utterance.
    pub fn speech_ended(&mut self) {
        self.playing = false;
    }

    /// Stop speech when the hosting view goes away.
    pub fn close(&mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.synth.cancel();
        self.playing = false;
    }

    fn restart_if_playing(&mut self) -> Option<Notice> {
        if self.playing {
            self.speak_current()
        } else {
            None
        }
    }

    fn speak_current(&mut self) -> Option<Notice> {
        self.synth.cancel();
        let voices = self.synth.voices();
        let utterance = Utterance {
            text: self.current().text.clone(),
            voice: pick_voice(&voices).map(|v| v.name.clone()),
            rate: self.rate.multiplier(),
            volume: self.volume,
            pitch: self.style.pitch(),
        };
        tracing::debug!(title = %self.current().title, voice = ?utterance.voice, "speaking");

        match self.synth.speak(utterance) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "speech failed");
                self.playing = false;
                Some(Notice::generic_error())
            }
        }
    }
}
