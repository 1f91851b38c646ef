use super::controller::{NarrationController, PlaybackState};
use super::engine::{SpeechEngine, SpeechEvent};
use super::notification::NotificationSink;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NarrationCommand {
    Play,
    Pause,
    Stop,
    SetRate(f32),
    Hide,
    VoicesChanged,
    Shutdown,
}

/// Cheap, cloneable remote control for a narration task.
///
/// All methods return immediately; the task applies commands in order.
#[derive(Clone)]
pub struct NarrationHandle {
    commands: mpsc::UnboundedSender<NarrationCommand>,
    state: watch::Receiver<PlaybackState>,
}

impl NarrationHandle {
    pub fn play(&self) {
        self.send(NarrationCommand::Play);
    }

    pub fn pause(&self) {
        self.send(NarrationCommand::Pause);
    }

    pub fn stop(&self) {
        self.send(NarrationCommand::Stop);
    }

    pub fn set_rate(&self, rate: f32) {
        self.send(NarrationCommand::SetRate(rate));
    }

    pub fn hide(&self) {
        self.send(NarrationCommand::Hide);
    }

    pub fn voices_changed(&self) {
        self.send(NarrationCommand::VoicesChanged);
    }

    /// Stop speaking and end the task
    pub fn shutdown(&self) {
        self.send(NarrationCommand::Shutdown);
    }

    /// Latest published playback state
    pub fn state(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.clone()
    }

    fn send(&self, command: NarrationCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!(?command, "Narration task already finished");
        }
    }
}

/// Run a controller on its own task.
///
/// The task is the only owner of the controller: user commands, engine
/// events and the deferred re-speak timer are all applied from one
/// `select!` loop, so transitions never interleave. Dropping every handle or
/// sending [`NarrationCommand::Shutdown`] hides the narration and ends the task.
pub fn spawn_narration<E, N>(
    mut controller: NarrationController<E, N>,
    mut events: mpsc::UnboundedReceiver<SpeechEvent>,
) -> (NarrationHandle, JoinHandle<()>)
where
    E: SpeechEngine + Send + 'static,
    N: NotificationSink + Send + 'static,
{
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(controller.state());

    let task = tokio::spawn(async move {
        let mut deadline: Option<Instant> = None;
        let mut events_open = true;

        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(NarrationCommand::Shutdown) | None => {
                        controller.hide();
                        let _ = state_tx.send(controller.state());
                        break;
                    }
                    Some(command) => apply(&mut controller, command),
                },
                event = events.recv(), if events_open => match event {
                    Some(event) => controller.handle_event(event),
                    None => {
                        tracing::warn!("Speech event channel closed");
                        events_open = false;
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    controller.fire_deferred();
                }
            }

            if let Some(delay) = controller.take_schedule_request() {
                deadline = Some(Instant::now() + delay);
            }

            state_tx.send_if_modified(|state| {
                let next = controller.state();
                if *state == next {
                    false
                } else {
                    *state = next;
                    true
                }
            });
        }

        tracing::debug!("Narration task finished");
    });

    let handle = NarrationHandle {
        commands: command_tx,
        state: state_rx,
    };

    (handle, task)
}

fn apply<E: SpeechEngine, N: NotificationSink>(
    controller: &mut NarrationController<E, N>,
    command: NarrationCommand,
) {
    match command {
        NarrationCommand::Play => controller.play(),
        NarrationCommand::Pause => controller.pause(),
        NarrationCommand::Stop => controller.stop(),
        NarrationCommand::SetRate(rate) => controller.set_rate(rate),
        NarrationCommand::Hide => controller.hide(),
        NarrationCommand::VoicesChanged => controller.voices_changed(),
        NarrationCommand::Shutdown => controller.hide(),
    }
}
