use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::domain::narrator::{NarratorId, NarratorProfile};
use crate::domain::story::{NarratedStory, StoryDateQuery, StoryService, StoryServiceApi};
use crate::error::{AppError, AppResult};

pub struct NarratorController {
    story_service: Arc<StoryService>,
}

impl NarratorController {
    pub fn new(story_service: Arc<StoryService>) -> Self {
        Self { story_service }
    }

    /// GET /api/narrators
    pub async fn list_narrators() -> Json<Vec<NarratorProfile>> {
        Json(NarratorProfile::all())
    }

    /// GET /api/narrators/{id}/story?date=YYYY-MM-DD - The day's story as told by one narrator
    pub async fn narrator_story(
        State(controller): State<Arc<NarratorController>>,
        Path(id): Path<String>,
        Query(query): Query<StoryDateQuery>,
    ) -> AppResult<Json<NarratedStory>> {
        let narrator: NarratorId = id
            .parse()
            .map_err(|_| AppError::NotFound("Narrator not found".to_string()))?;
        let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

        let story = controller
            .story_service
            .narrated_story(narrator, date)
            .await?;
        Ok(Json(story))
    }
}
