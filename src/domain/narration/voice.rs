use serde::{Deserialize, Serialize};

/// A voice offered by the speech engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 style language tag, e.g. `en-US`
    pub language: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }
}

/// Pick the voice for an utterance.
///
/// Exact name match first, then the first English voice. `None` means the
/// engine keeps its own default.
pub fn resolve_voice(voices: &[Voice], preferred: Option<&str>) -> Option<Voice> {
    preferred
        .and_then(|name| voices.iter().find(|voice| voice.name == name))
        .or_else(|| voices.iter().find(|voice| voice.language.starts_with("en")))
        .cloned()
}
