pub mod error;
pub mod model;
pub mod service;

pub use error::StoryServiceError;
pub use model::{NewStory, Story};
pub use service::{StoryService, StoryServiceApi};

use crate::domain::narrator::NarratorProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request for PUT /api/schedule/:date
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleStoryRequest {
    pub story_id: i32,
}

/// Query for endpoints that resolve "the story of the day"
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoryDateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// One narrator's telling of the story for a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratedStory {
    pub narrator: NarratorProfile,
    pub story_id: i32,
    pub story_title: String,
    pub text: String,
}
