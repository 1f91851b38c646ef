use crate::domain::narrator::NarratorId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One myth, written once per narrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Story {
    pub id: i32,
    pub story_title: String,
    pub gogi_version: String,
    pub tara_version: String,
    pub anaya_version: String,
}

impl Story {
    /// The text told by the given narrator
    pub fn version_for(&self, narrator: NarratorId) -> &str {
        match narrator {
            NarratorId::Gogi => &self.gogi_version,
            NarratorId::Tara => &self.tara_version,
            NarratorId::Anaya => &self.anaya_version,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStory {
    pub story_title: String,
    pub gogi_version: String,
    pub tara_version: String,
    pub anaya_version: String,
}

impl NewStory {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("story_title", &self.story_title),
            ("gogi_version", &self.gogi_version),
            ("tara_version", &self.tara_version),
            ("anaya_version", &self.anaya_version),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("{name} cannot be empty"));
            }
        }
        Ok(())
    }

    pub fn into_story(self, id: i32) -> Story {
        Story {
            id,
            story_title: self.story_title,
            gogi_version: self.gogi_version,
            tara_version: self.tara_version,
            anaya_version: self.anaya_version,
        }
    }
}
