//! Speech sessions driven by typed events.
//!
//! Platform speech engines report progress through callbacks. Here each
//! engine session is a caller-owned value fed with [`SpeechEvent`]s (for
//! recognition) or [`PlaybackEvent`]s (for synthesis), so the caller can
//! drain a channel, poll, or replay a recorded event log through the same
//! state machine. Dropping or finishing a session releases it; there is no
//! shared engine state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AssistError, AssistResult};

/// Language tag used when a recognition session does not specify one.
pub const DEFAULT_RECOGNITION_LANGUAGE: &str = "en-US";

/// Why speech recognition failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionError {
    /// Nothing was heard before the engine gave up.
    NoSpeech,
    /// No microphone, or it could not be opened.
    AudioCapture,
    /// The user or platform denied microphone access.
    NotAllowed,
    /// Any other engine error code.
    Other(String),
}

impl RecognitionError {
    /// Message suitable for showing to the user.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoSpeech => "No speech detected. Please try again.",
            Self::AudioCapture => "Microphone not found or accessible",
            Self::NotAllowed => "Microphone permission denied",
            Self::Other(_) => "An error occurred during recording",
        }
    }
}

impl FromStr for RecognitionError {
    type Err = std::convert::Infallible;

    /// Parse a browser engine error code. Unknown codes become [`Self::Other`].
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Ok(match code {
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "not-allowed" => Self::NotAllowed,
            other => Self::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{} ({code})", self.message()),
            _ => f.write_str(self.message()),
        }
    }
}

/// Notification from a speech recognition engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SpeechEvent {
    /// The engine started listening.
    Started,
    /// Interim transcript that may still change.
    PartialResult(String),
    /// Settled transcript fragment.
    FinalResult(String),
    /// Recognition failed.
    Error(RecognitionError),
    /// The engine stopped listening.
    Ended,
}

/// Lifecycle state of a recognition session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionState {
    /// Created, not yet started.
    #[default]
    Idle,
    /// Listening.
    Recording,
    /// Ended, stopped, or failed.
    Stopped,
}

/// One speech-to-text session and the transcript it has produced.
#[derive(Debug, Clone)]
pub struct TranscriptSession {
    language: String,
    state: RecognitionState,
    transcript: String,
    interim: String,
    last_error: Option<RecognitionError>,
}

impl Default for TranscriptSession {
    fn default() -> Self {
        Self::new(DEFAULT_RECOGNITION_LANGUAGE)
    }
}

impl TranscriptSession {
    /// Create an idle session for a BCP-47 language tag.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            state: RecognitionState::Idle,
            transcript: String::new(),
            interim: String::new(),
            last_error: None,
        }
    }

    /// Language tag the session recognizes.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> RecognitionState {
        self.state
    }

    /// Whether the session is listening.
    pub fn is_recording(&self) -> bool {
        self.state == RecognitionState::Recording
    }

    /// Settled transcript so far. Each fragment is followed by a space.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Latest interim fragment, cleared whenever a fragment settles.
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Error that stopped the session, if any.
    pub const fn last_error(&self) -> Option<&RecognitionError> {
        self.last_error.as_ref()
    }

    /// Feed one engine event into the session.
    pub fn apply(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started => {
                self.state = RecognitionState::Recording;
                self.last_error = None;
            }
            SpeechEvent::PartialResult(text) => self.interim = text,
            SpeechEvent::FinalResult(text) => {
                if !text.is_empty() {
                    self.transcript.push_str(&text);
                    self.transcript.push(' ');
                }
                self.interim.clear();
            }
            SpeechEvent::Error(err) => {
                tracing::warn!(error = %err, "speech recognition failed");
                self.last_error = Some(err);
                self.state = RecognitionState::Stopped;
            }
            SpeechEvent::Ended => self.state = RecognitionState::Stopped,
        }
    }

    /// Stop listening at the caller's request.
    pub fn stop(&mut self) {
        self.state = RecognitionState::Stopped;
    }

    /// Release the session and return the settled transcript.
    pub fn finish(self) -> String {
        tracing::debug!(chars = self.transcript.len(), "transcript session finished");
        self.transcript
    }
}

impl Extend<SpeechEvent> for TranscriptSession {
    fn extend<I: IntoIterator<Item = SpeechEvent>>(&mut self, events: I) {
        for event in events {
            self.apply(event);
        }
    }
}

/// Text-to-speech playback rate multiplier.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SpeechRate(f64);

impl SpeechRate {
    /// Slowest supported rate.
    pub const MIN: f64 = 0.5;
    /// Fastest supported rate.
    pub const MAX: f64 = 2.0;

    /// Validate a rate.
    pub fn new(rate: f64) -> AssistResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(AssistError::RateOutOfRange { rate })
        }
    }

    /// The multiplier.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f64> for SpeechRate {
    type Error = AssistError;

    fn try_from(rate: f64) -> AssistResult<Self> {
        Self::new(rate)
    }
}

impl From<SpeechRate> for f64 {
    fn from(rate: SpeechRate) -> Self {
        rate.0
    }
}

/// Text queued for speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// Index into the platform voice list; `None` uses the default voice.
    pub voice: Option<usize>,
    /// Playback rate.
    pub rate: SpeechRate,
}

impl Utterance {
    /// Utterance with the default voice and rate, rejecting empty text.
    pub fn new(text: impl Into<String>) -> AssistResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AssistError::EmptyText);
        }
        Ok(Self {
            text,
            voice: None,
            rate: SpeechRate::default(),
        })
    }

    /// Choose a voice by index.
    #[must_use]
    pub const fn with_voice(mut self, voice: usize) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Set the playback rate.
    #[must_use]
    pub const fn with_rate(mut self, rate: SpeechRate) -> Self {
        self.rate = rate;
        self
    }
}

/// Lifecycle notification from a speech synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Audio started.
    Started,
    /// Audio finished or was cancelled.
    Ended,
}

/// Playback state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing queued.
    #[default]
    Idle,
    /// Speaking.
    Playing,
    /// Paused mid-utterance.
    Paused,
}

/// What the caller should ask the engine to do after a [`PlaybackSession::speak`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    /// Start speaking a new utterance.
    Speak(Utterance),
    /// Continue the paused utterance.
    Resume,
}

/// One text-to-speech session.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    state: PlaybackState,
    current: Option<Utterance>,
}

impl PlaybackSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Utterance being spoken or paused.
    pub const fn current(&self) -> Option<&Utterance> {
        self.current.as_ref()
    }

    /// Speak an utterance. A paused session resumes instead of restarting;
    /// a playing one is cancelled first.
    pub fn speak(&mut self, utterance: Utterance) -> PlaybackCommand {
        match self.state {
            PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                return PlaybackCommand::Resume;
            }
            PlaybackState::Playing => self.stop(),
            PlaybackState::Idle => {}
        }
        self.current = Some(utterance.clone());
        PlaybackCommand::Speak(utterance)
    }

    /// Pause playback. Returns `false` when nothing is playing.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    /// Resume a paused utterance. Returns `false` unless paused.
    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    /// Cancel playback and forget the current utterance.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
        self.current = None;
    }

    /// Feed one engine event into the session.
    pub fn apply(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Started => self.state = PlaybackState::Playing,
            PlaybackEvent::Ended => self.stop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn transcript_collects_final_fragments() {
        let mut session = TranscriptSession::default();
        assert_eq!(session.language(), "en-US");
        assert_eq!(session.state(), RecognitionState::Idle);

        session.extend([
            SpeechEvent::Started,
            SpeechEvent::PartialResult("hello wor".into()),
            SpeechEvent::FinalResult("hello world".into()),
            SpeechEvent::PartialResult("how are".into()),
        ]);
        assert!(session.is_recording());
        assert_eq!(session.transcript(), "hello world ");
        assert_eq!(session.interim(), "how are");

        session.apply(SpeechEvent::FinalResult("how are you".into()));
        session.apply(SpeechEvent::Ended);
        assert_eq!(session.state(), RecognitionState::Stopped);
        assert!(session.interim().is_empty());
        assert_eq!(session.finish(), "hello world how are you ");
    }

    #[test]
    fn error_stops_session_and_keeps_transcript() {
        let mut session = TranscriptSession::new("fr-FR");
        session.extend([
            SpeechEvent::Started,
            SpeechEvent::FinalResult("bonjour".into()),
            SpeechEvent::Error(RecognitionError::NoSpeech),
        ]);
        assert_eq!(session.state(), RecognitionState::Stopped);
        assert_eq!(session.last_error(), Some(&RecognitionError::NoSpeech));
        assert_eq!(session.transcript(), "bonjour ");

        session.apply(SpeechEvent::Started);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn events_drain_from_a_channel() {
        let (tx, rx) = mpsc::channel();
        let producer = std::thread::spawn(move || {
            for word in ["one", "two"] {
                tx.send(SpeechEvent::FinalResult(word.to_string())).unwrap();
            }
            tx.send(SpeechEvent::Ended).unwrap();
        });

        let mut session = TranscriptSession::default();
        session.apply(SpeechEvent::Started);
        session.extend(rx);
        producer.join().unwrap();

        assert_eq!(session.state(), RecognitionState::Stopped);
        assert_eq!(session.finish(), "one two ");
    }

    #[test]
    fn recognition_error_codes() {
        assert_eq!("no-speech".parse(), Ok(RecognitionError::NoSpeech));
        assert_eq!("audio-capture".parse(), Ok(RecognitionError::AudioCapture));
        assert_eq!("not-allowed".parse(), Ok(RecognitionError::NotAllowed));
        let other: RecognitionError = "network".parse().unwrap();
        assert_eq!(other, RecognitionError::Other("network".into()));
        assert_eq!(other.to_string(), "An error occurred during recording (network)");
        assert_eq!(RecognitionError::NotAllowed.to_string(), "Microphone permission denied");
    }

    #[test]
    fn speech_events_round_trip_as_json() {
        let event = SpeechEvent::Error(RecognitionError::AudioCapture);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"error","data":"audio-capture"}"#);
        let started = serde_json::to_string(&SpeechEvent::Started).unwrap();
        assert_eq!(started, r#"{"type":"started"}"#);
    }

    #[test]
    fn speech_rate_bounds() {
        assert!(SpeechRate::new(0.5).is_ok());
        assert!(SpeechRate::new(2.0).is_ok());
        assert_eq!(
            SpeechRate::new(2.5),
            Err(AssistError::RateOutOfRange { rate: 2.5 })
        );
        assert!(SpeechRate::new(f64::NAN).is_err());
        assert!((SpeechRate::default().get() - 1.0).abs() < f64::EPSILON);
        assert!(serde_json::from_str::<SpeechRate>("0.1").is_err());
    }

    #[test]
    fn utterance_builder() {
        assert_eq!(Utterance::new(" "), Err(AssistError::EmptyText));
        let rate = SpeechRate::new(1.5).unwrap();
        let utterance = Utterance::new("Read aloud.").unwrap().with_voice(2).with_rate(rate);
        assert_eq!(utterance.voice, Some(2));
        assert_eq!(utterance.rate, rate);
    }

    #[test]
    fn playback_pause_and_resume() {
        let mut session = PlaybackSession::new();
        assert!(!session.pause());

        let utterance = Utterance::new("Plants need light.").unwrap();
        let command = session.speak(utterance.clone());
        assert_eq!(command, PlaybackCommand::Speak(utterance.clone()));
        session.apply(PlaybackEvent::Started);
        assert_eq!(session.state(), PlaybackState::Playing);

        assert!(session.pause());
        assert_eq!(session.state(), PlaybackState::Paused);
        assert_eq!(session.speak(utterance), PlaybackCommand::Resume);
        assert_eq!(session.state(), PlaybackState::Playing);
        assert!(!session.resume());
        assert!(session.pause());
        assert!(session.resume());

        session.apply(PlaybackEvent::Ended);
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(session.current().is_none());
    }

    #[test]
    fn speak_while_playing_cancels_current() {
        let mut session = PlaybackSession::new();
        session.speak(Utterance::new("First lesson.").unwrap());
        session.apply(PlaybackEvent::Started);

        let second = Utterance::new("Second lesson.").unwrap();
        let command = session.speak(second.clone());
        assert_eq!(command, PlaybackCommand::Speak(second.clone()));
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.current(), Some(&second));

        session.apply(PlaybackEvent::Started);
        assert_eq!(session.state(), PlaybackState::Playing);
    }

    #[test]
    fn stop_clears_playback() {
        let mut session = PlaybackSession::new();
        session.speak(Utterance::new("Stop me.").unwrap());
        session.apply(PlaybackEvent::Started);
        session.stop();
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(session.current().is_none());
    }
}
