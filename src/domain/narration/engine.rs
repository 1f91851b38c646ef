use super::voice::Voice;
use std::fmt;

/// Identifies one speak request issued to a [`SpeechEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceHandle(pub u64);

impl fmt::Display for UtteranceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance-{}", self.0)
    }
}

/// One chunk of text plus the voice parameters to speak it with
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// `None` leaves voice selection to the engine
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechEvent {
    pub handle: UtteranceHandle,
    pub kind: SpeechEventKind,
}

impl SpeechEvent {
    pub fn started(handle: UtteranceHandle) -> Self {
        Self {
            handle,
            kind: SpeechEventKind::Started,
        }
    }

    pub fn ended(handle: UtteranceHandle) -> Self {
        Self {
            handle,
            kind: SpeechEventKind::Ended,
        }
    }

    pub fn failed(handle: UtteranceHandle, reason: FailureReason) -> Self {
        Self {
            handle,
            kind: SpeechEventKind::Failed(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEventKind {
    Started,
    Ended,
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The utterance was cancelled before it started
    Canceled,
    /// The utterance was cut off while speaking
    Interrupted,
    Engine(String),
}

impl FailureReason {
    /// Cancellations come from our own stop/cancel requests and are not errors
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FailureReason::Canceled | FailureReason::Interrupted)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Canceled => write!(f, "canceled"),
            FailureReason::Interrupted => write!(f, "interrupted"),
            FailureReason::Engine(reason) => write!(f, "{reason}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech synthesis is not available")]
    Unavailable,
    #[error("{0} is not supported by this speech engine")]
    Unsupported(&'static str),
    #[error("speech engine I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("speech engine error: {0}")]
    Engine(String),
}

/// Text-to-speech capability of the host platform.
///
/// The engine is process-wide: starting a new utterance or calling
/// [`SpeechEngine::cancel`] affects whatever it is currently speaking.
/// Progress is reported asynchronously as [`SpeechEvent`]s through a channel
/// owned by the implementation. Every call may fail and callers treat all
/// failures as recoverable.
pub trait SpeechEngine {
    /// Whether the platform offers speech synthesis at all
    fn is_available(&self) -> bool;

    /// Voices known right now. May be empty until the platform finishes loading them.
    fn list_voices(&self) -> Vec<Voice>;

    fn speak(&mut self, utterance: Utterance) -> Result<UtteranceHandle, SpeechError>;

    fn pause(&mut self, handle: UtteranceHandle) -> Result<(), SpeechError>;

    fn resume(&mut self, handle: UtteranceHandle) -> Result<(), SpeechError>;

    /// Drop the in-flight utterance, if any
    fn cancel(&mut self) -> Result<(), SpeechError>;
}
