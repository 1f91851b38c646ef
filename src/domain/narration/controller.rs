use super::chunker::{chunk_text, excerpt, DEFAULT_MAX_CHUNK_LEN};
use super::engine::{
    FailureReason, SpeechEngine, SpeechEvent, SpeechEventKind, Utterance, UtteranceHandle,
};
use super::notification::{Notice, NotificationSink};
use super::voice::{resolve_voice, Voice};
use crate::domain::narrator::{NarratorId, NarratorProfile, VoiceSettings};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Speeds the listener can pick from
pub const RATE_RANGE: RangeInclusive<f32> = 0.5..=2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub max_chunk_len: usize,
    /// Size of the shortened payload retried after a first-chunk failure
    pub fallback_excerpt_len: usize,
    pub rate_change_delay: Duration,
    pub fallback_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            fallback_excerpt_len: 200,
            rate_change_delay: Duration::from_millis(100),
            fallback_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
}

/// What a hosting view renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub rate: f32,
    pub current_index: usize,
    pub chunk_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    RateChange,
    Fallback,
}

/// Drives a [`SpeechEngine`] through a story one chunk at a time.
///
/// Every transition happens inside a call on this type: user actions
/// (`play`, `pause`, `stop`, `set_rate`, `hide`), engine callbacks
/// (`handle_event`, `voices_changed`) and expired timers (`fire_deferred`).
/// Nothing here blocks and nothing is returned as an error; engine failures
/// become state transitions plus, at most, one [`Notice`].
///
/// Invariants:
/// - `current_index <= chunk_count`
/// - at most one utterance is in flight, and chunk N+1 is only requested
///   after chunk N ended
pub struct NarrationController<E, N> {
    engine: E,
    notifier: N,
    narrator: NarratorId,
    voice: VoiceSettings,
    text: String,
    options: ControllerOptions,
    supported: bool,
    status: PlaybackStatus,
    rate: f32,
    chunks: Vec<String>,
    current_index: usize,
    active: Option<UtteranceHandle>,
    deferred: Option<Deferred>,
    schedule_request: Option<Duration>,
    fallback_used: bool,
    voices: Vec<Voice>,
}

impl<E: SpeechEngine, N: NotificationSink> NarrationController<E, N> {
    pub fn new(
        engine: E,
        notifier: N,
        profile: &NarratorProfile,
        text: impl Into<String>,
        options: ControllerOptions,
    ) -> Self {
        let supported = engine.is_available();
        if !supported {
            tracing::warn!(narrator = %profile.id, "Speech synthesis unavailable, narration disabled");
            notifier.notify(Notice::Unsupported);
        }

        let voices = if supported {
            engine.list_voices()
        } else {
            Vec::new()
        };

        Self {
            engine,
            notifier,
            narrator: profile.id,
            voice: profile.voice.clone(),
            text: text.into(),
            options,
            supported,
            status: PlaybackStatus::Idle,
            rate: clamp_rate(profile.voice.rate).unwrap_or(1.0),
            chunks: Vec::new(),
            current_index: 0,
            active: None,
            deferred: None,
            schedule_request: None,
            fallback_used: false,
            voices,
        }
    }

    /// Start from the beginning, or resume when paused.
    ///
    /// Calling it while already playing restarts the story.
    pub fn play(&mut self) {
        if !self.supported {
            return;
        }

        match self.status {
            PlaybackStatus::Paused => self.resume(),
            PlaybackStatus::Playing => {
                self.stop();
                self.start();
            }
            PlaybackStatus::Idle => self.start(),
        }
    }

    pub fn pause(&mut self) {
        if !self.supported || self.status != PlaybackStatus::Playing {
            return;
        }

        self.deferred = None;

        let Some(handle) = self.active else {
            self.status = PlaybackStatus::Paused;
            return;
        };

        match self.engine.pause(handle) {
            Ok(()) => {
                tracing::debug!(chunk_index = self.current_index, "Narration paused");
                self.status = PlaybackStatus::Paused;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Pause failed, stopping narration");
                self.stop();
            }
        }
    }

    /// Safe from any state and idempotent. Never notifies.
    pub fn stop(&mut self) {
        if self.status != PlaybackStatus::Idle {
            tracing::info!(
                narrator = %self.narrator,
                chunk_index = self.current_index,
                "Narration stopped"
            );
        }
        if self.supported {
            self.cancel_engine();
        }
        self.reset();
    }

    /// The hosting view went away; speech must not outlive it.
    pub fn hide(&mut self) {
        tracing::debug!(narrator = %self.narrator, "Narration view hidden");
        self.stop();
    }

    /// Change the speaking rate.
    ///
    /// The in-flight chunk is restarted at the new rate after a short delay,
    /// keeping the current position. Non-finite values are ignored and the
    /// rest are clamped to [`RATE_RANGE`].
    pub fn set_rate(&mut self, rate: f32) {
        let Some(rate) = clamp_rate(rate) else {
            tracing::warn!(rate, "Ignoring invalid narration rate");
            return;
        };
        if rate == self.rate {
            return;
        }
        self.rate = rate;

        if !self.supported {
            return;
        }

        match self.status {
            PlaybackStatus::Playing => {
                tracing::debug!(rate, chunk_index = self.current_index, "Restarting chunk at new rate");
                self.halt();
                self.schedule(Deferred::RateChange, self.options.rate_change_delay);
            }
            // the next play() speaks the current chunk afresh
            PlaybackStatus::Paused if self.active.is_some() => self.halt(),
            PlaybackStatus::Paused | PlaybackStatus::Idle => {}
        }
    }

    /// Feed an engine callback into the state machine
    pub fn handle_event(&mut self, event: SpeechEvent) {
        if self.active != Some(event.handle) {
            tracing::debug!(handle = %event.handle, kind = ?event.kind, "Ignoring event for inactive utterance");
            return;
        }

        match event.kind {
            SpeechEventKind::Started => {
                tracing::debug!(chunk_index = self.current_index, "Chunk started");
            }
            SpeechEventKind::Ended => self.on_chunk_end(),
            SpeechEventKind::Failed(reason) if reason.is_cancellation() => {
                tracing::debug!(reason = %reason, "Utterance cancelled");
                self.reset();
            }
            SpeechEventKind::Failed(reason) => self.on_failure(reason),
        }
    }

    /// The engine finished loading its voice list
    pub fn voices_changed(&mut self) {
        if !self.supported {
            return;
        }
        self.voices = self.engine.list_voices();
        tracing::debug!(voice_count = self.voices.len(), "Voice list refreshed");
    }

    /// Delay after which the host should call [`Self::fire_deferred`].
    ///
    /// Returns each request once; a newer request replaces an older one.
    pub fn take_schedule_request(&mut self) -> Option<Duration> {
        self.schedule_request.take()
    }

    /// Run the pending delayed re-speak, if it is still wanted
    pub fn fire_deferred(&mut self) {
        let Some(deferred) = self.deferred.take() else {
            return;
        };
        if self.status != PlaybackStatus::Playing || self.active.is_some() {
            return;
        }
        tracing::debug!(?deferred, chunk_index = self.current_index, "Resuming narration");
        self.speak_current();
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            status: self.status,
            rate: self.rate,
            current_index: self.current_index,
            chunk_count: self.chunks.len(),
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn has_active_utterance(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn start(&mut self) {
        self.cancel_engine();
        self.active = None;
        self.deferred = None;

        if self.chunks.is_empty() {
            self.chunks = chunk_text(&self.text, self.options.max_chunk_len);
            self.fallback_used = false;
        }
        if self.chunks.is_empty() {
            tracing::warn!(narrator = %self.narrator, "Nothing to narrate");
            return;
        }

        self.current_index = 0;
        self.status = PlaybackStatus::Playing;
        tracing::info!(
            narrator = %self.narrator,
            chunk_count = self.chunks.len(),
            rate = self.rate,
            "Narration started"
        );
        self.speak_current();
    }

    fn resume(&mut self) {
        self.status = PlaybackStatus::Playing;

        let Some(handle) = self.active else {
            self.speak_current();
            return;
        };

        match self.engine.resume(handle) {
            Ok(()) => tracing::debug!(chunk_index = self.current_index, "Narration resumed"),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    chunk_index = self.current_index,
                    "Resume failed, restarting current chunk"
                );
                self.halt();
                self.speak_current();
            }
        }
    }

    fn speak_current(&mut self) {
        let Some(text) = self.chunks.get(self.current_index).cloned() else {
            self.reset();
            return;
        };

        if self.voices.is_empty() {
            self.voices = self.engine.list_voices();
        }

        let utterance = Utterance {
            text,
            rate: self.rate,
            pitch: self.voice.pitch,
            volume: self.voice.volume,
            voice: resolve_voice(&self.voices, self.voice.preferred_voice_name.as_deref()),
        };

        match self.engine.speak(utterance) {
            Ok(handle) => {
                tracing::debug!(
                    handle = %handle,
                    chunk_index = self.current_index,
                    chunk_count = self.chunks.len(),
                    "Speaking chunk"
                );
                self.active = Some(handle);
            }
            Err(err) => self.on_failure(FailureReason::Engine(err.to_string())),
        }
    }

    fn on_chunk_end(&mut self) {
        self.active = None;
        self.current_index += 1;

        if self.current_index >= self.chunks.len() {
            tracing::info!(narrator = %self.narrator, "Narration finished");
            self.reset();
            return;
        }

        if self.status == PlaybackStatus::Playing {
            self.speak_current();
        }
    }

    fn on_failure(&mut self, reason: FailureReason) {
        tracing::error!(
            error = %reason,
            narrator = %self.narrator,
            chunk_index = self.current_index,
            chunk_count = self.chunks.len(),
            "Speech synthesis error"
        );
        self.active = None;

        // only a failure on the very first chunk is retried
        if self.current_index == 0 && self.chunks.len() > 1 && !self.fallback_used {
            tracing::warn!(
                excerpt_len = self.options.fallback_excerpt_len,
                "Retrying narration with a shortened excerpt"
            );
            self.fallback_used = true;
            self.chunks = vec![excerpt(&self.text, self.options.fallback_excerpt_len)];
            if self.status == PlaybackStatus::Playing {
                self.schedule(Deferred::Fallback, self.options.fallback_delay);
            }
            return;
        }

        let notice = if self.fallback_used {
            Notice::Unavailable
        } else {
            Notice::Interrupted
        };
        self.reset();
        self.notifier.notify(notice);
    }

    /// Cancel the in-flight utterance but keep the position
    fn halt(&mut self) {
        self.cancel_engine();
        self.active = None;
    }

    fn cancel_engine(&mut self) {
        if let Err(err) = self.engine.cancel() {
            tracing::warn!(error = %err, "Cancelling speech failed");
        }
    }

    fn schedule(&mut self, deferred: Deferred, delay: Duration) {
        self.deferred = Some(deferred);
        self.schedule_request = Some(delay);
    }

    fn reset(&mut self) {
        self.status = PlaybackStatus::Idle;
        self.current_index = 0;
        self.active = None;
        self.chunks.clear();
        self.deferred = None;
        self.schedule_request = None;
        self.fallback_used = false;
    }
}

fn clamp_rate(rate: f32) -> Option<f32> {
    rate.is_finite()
        .then(|| rate.clamp(*RATE_RANGE.start(), *RATE_RANGE.end()))
}
