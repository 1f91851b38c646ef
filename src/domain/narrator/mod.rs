pub mod model;

pub use model::{NarratorId, NarratorProfile, UnknownNarrator, VoiceSettings};
