use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The storytellers a story is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarratorId {
    Gogi,
    Tara,
    Anaya,
}

impl NarratorId {
    pub const ALL: [NarratorId; 3] = [NarratorId::Gogi, NarratorId::Tara, NarratorId::Anaya];

    pub fn as_str(&self) -> &'static str {
        match self {
            NarratorId::Gogi => "gogi",
            NarratorId::Tara => "tara",
            NarratorId::Anaya => "anaya",
        }
    }
}

impl fmt::Display for NarratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown narrator: {0}")]
pub struct UnknownNarrator(pub String);

impl FromStr for NarratorId {
    type Err = UnknownNarrator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gogi" => Ok(NarratorId::Gogi),
            "tara" => Ok(NarratorId::Tara),
            "anaya" => Ok(NarratorId::Anaya),
            _ => Err(UnknownNarrator(s.to_string())),
        }
    }
}

/// How a narrator sounds when read aloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// 1.0 is the engine's normal speed
    pub rate: f32,
    pub pitch: f32,
    /// 0.0 to 1.0
    pub volume: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_voice_name: Option<String>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            preferred_voice_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarratorProfile {
    pub id: NarratorId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub voice: VoiceSettings,
}

impl NarratorProfile {
    pub fn for_id(id: NarratorId) -> Self {
        match id {
            NarratorId::Gogi => Self {
                id,
                name: "Gogi the Monkey".to_string(),
                description: "Fun and silly storyteller who adds jokes and playful twists!"
                    .to_string(),
                color: "saffron".to_string(),
                voice: VoiceSettings {
                    rate: 1.1,
                    pitch: 1.4,
                    volume: 1.0,
                    preferred_voice_name: None,
                },
            },
            NarratorId::Tara => Self {
                id,
                name: "Tara the Explorer".to_string(),
                description: "Bold and adventurous storyteller who focuses on exciting details!"
                    .to_string(),
                color: "deepblue".to_string(),
                voice: VoiceSettings {
                    rate: 1.0,
                    pitch: 1.1,
                    volume: 1.0,
                    preferred_voice_name: None,
                },
            },
            NarratorId::Anaya => Self {
                id,
                name: "Anaya the Wise".to_string(),
                description: "Calm and thoughtful storyteller who shares deeper meanings!"
                    .to_string(),
                color: "purple".to_string(),
                voice: VoiceSettings {
                    rate: 0.85,
                    pitch: 0.9,
                    volume: 0.9,
                    preferred_voice_name: None,
                },
            },
        }
    }

    /// The full narrator catalogue, in display order
    pub fn all() -> Vec<NarratorProfile> {
        NarratorId::ALL.into_iter().map(Self::for_id).collect()
    }
}
