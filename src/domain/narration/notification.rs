/// User-visible narration problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// No speech synthesis in this environment
    Unsupported,
    /// Narration failed even with the shortened fallback
    Unavailable,
    /// Narration stopped part way through the story
    Interrupted,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Unsupported | Notice::Unavailable => "Narration Unavailable",
            Notice::Interrupted => "Narration Issue",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notice::Unsupported => {
                "This environment doesn't support text-to-speech. You can still read the story yourself."
            }
            Notice::Unavailable => {
                "Sorry, audio narration may not work in this environment. Try reading the story yourself or a different device."
            }
            Notice::Interrupted => {
                "The audio narration couldn't continue. Try a shorter story or a different device, or read along instead."
            }
        }
    }
}

/// Surfaces notices to the listener
pub trait NotificationSink {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(
            notice = ?notice,
            title = notice.title(),
            "{}",
            notice.description()
        );
    }
}
