use crate::domain::narration::{
    FailureReason, SpeechEngine, SpeechError, SpeechEvent, Utterance, UtteranceHandle, Voice,
};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Speech engine backed by the `espeak-ng` command line synthesizer.
///
/// Every utterance runs in its own `espeak-ng --stdin` process, so there is
/// no pause/resume: callers get [`SpeechError::Unsupported`] and fall back to
/// stopping. Must be used from within a tokio runtime.
pub struct EspeakEngine {
    binary: PathBuf,
    events: mpsc::UnboundedSender<SpeechEvent>,
    available: bool,
    voices: Vec<Voice>,
    next_handle: u64,
    in_flight: Option<InFlight>,
}

struct InFlight {
    handle: UtteranceHandle,
    cancel: oneshot::Sender<()>,
}

impl EspeakEngine {
    /// Probe `binary` for availability and voices.
    ///
    /// Never fails: a missing binary yields an engine that reports itself unavailable.
    pub async fn probe(
        binary: impl Into<PathBuf>,
        events: mpsc::UnboundedSender<SpeechEvent>,
    ) -> Self {
        let binary = binary.into();
        let available = probe_version(&binary).await;
        let voices = if available {
            load_voices(&binary).await
        } else {
            Vec::new()
        };

        tracing::info!(
            binary = %binary.display(),
            available,
            voices = voices.len(),
            "espeak-ng probed"
        );

        Self {
            binary,
            events,
            available,
            voices,
            next_handle: 0,
            in_flight: None,
        }
    }
}

impl SpeechEngine for EspeakEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn list_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<UtteranceHandle, SpeechError> {
        if !self.available {
            return Err(SpeechError::Unavailable);
        }
        self.cancel()?;

        let child = Command::new(&self.binary)
            .args(speech_args(&utterance))
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        self.next_handle += 1;
        let handle = UtteranceHandle(self.next_handle);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        tracing::debug!(%handle, chars = utterance.text.chars().count(), "espeak-ng speaking");
        tokio::spawn(drive_utterance(
            child,
            utterance.text,
            handle,
            cancel_rx,
            self.events.clone(),
        ));

        self.in_flight = Some(InFlight {
            handle,
            cancel: cancel_tx,
        });
        Ok(handle)
    }

    fn pause(&mut self, _handle: UtteranceHandle) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("pause"))
    }

    fn resume(&mut self, _handle: UtteranceHandle) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("resume"))
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        if let Some(in_flight) = self.in_flight.take() {
            // The receiver is gone once the process has exited on its own
            if in_flight.cancel.send(()).is_ok() {
                tracing::debug!(handle = %in_flight.handle, "espeak-ng canceled");
            }
        }
        Ok(())
    }
}

async fn drive_utterance(
    mut child: Child,
    text: String,
    handle: UtteranceHandle,
    cancel: oneshot::Receiver<()>,
    events: mpsc::UnboundedSender<SpeechEvent>,
) {
    let _ = events.send(SpeechEvent::started(handle));

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()).await {
            tracing::warn!(%handle, error = %e, "Failed to write text to espeak-ng");
        }
    }

    let exit = tokio::select! {
        status = child.wait() => Some(status),
        _ = cancel => None,
    };

    let event = match exit {
        Some(Ok(status)) if status.success() => SpeechEvent::ended(handle),
        Some(Ok(status)) => SpeechEvent::failed(
            handle,
            FailureReason::Engine(format!("espeak-ng exited with {status}")),
        ),
        Some(Err(e)) => SpeechEvent::failed(handle, FailureReason::Engine(e.to_string())),
        None => {
            if let Err(e) = child.kill().await {
                tracing::warn!(%handle, error = %e, "Failed to kill espeak-ng");
            }
            SpeechEvent::failed(handle, FailureReason::Canceled)
        }
    };

    let _ = events.send(event);
}

async fn probe_version(binary: &Path) -> bool {
    match Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
    {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::debug!(binary = %binary.display(), error = %e, "espeak-ng not found");
            false
        }
    }
}

async fn load_voices(binary: &Path) -> Vec<Voice> {
    match Command::new(binary).arg("--voices").output().await {
        Ok(output) if output.status.success() => {
            parse_voices(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => {
            tracing::warn!(status = %output.status, "espeak-ng --voices failed");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list espeak-ng voices");
            Vec::new()
        }
    }
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// Columns: priority, language, age/gender, voice name, file, other languages.
fn parse_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip_while(|line| line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_, language, _, name, ..] => Some(Voice::new(name.replace('_', " "), *language)),
                _ => None,
            }
        })
        .collect()
}

/// `-s` words per minute, `-p` pitch 0-99 (50 normal), `-a` amplitude 0-200 (100 normal)
fn speech_args(utterance: &Utterance) -> Vec<String> {
    let speed = (BASE_WORDS_PER_MINUTE * utterance.rate).round().clamp(80.0, 450.0) as u32;
    let pitch = (utterance.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
    let amplitude = (utterance.volume * 100.0).round().clamp(0.0, 200.0) as u32;

    let mut args = vec![
        "-s".to_string(),
        speed.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
    ];
    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.language.clone());
    }
    args
}
