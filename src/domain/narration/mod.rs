//! Chunked text-to-speech playback of a story.
//!
//! [`NarrationController`] is a synchronous state machine over an injected
//! [`SpeechEngine`]; [`spawn_narration`] hosts it on a tokio task.

pub mod chunker;
pub mod controller;
pub mod engine;
pub mod notification;
pub mod runtime;
pub mod voice;

pub use chunker::{chunk_text, excerpt, DEFAULT_MAX_CHUNK_LEN};
pub use controller::{
    ControllerOptions, NarrationController, PlaybackState, PlaybackStatus, RATE_RANGE,
};
pub use engine::{
    FailureReason, SpeechEngine, SpeechError, SpeechEvent, SpeechEventKind, Utterance,
    UtteranceHandle,
};
pub use notification::{Notice, NotificationSink, TracingNotifier};
pub use runtime::{spawn_narration, NarrationCommand, NarrationHandle};
pub use voice::{resolve_voice, Voice};
