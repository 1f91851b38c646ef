use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::domain::story::{NewStory, ScheduleStoryRequest, Story};
use crate::{
    domain::story::{StoryService, StoryServiceApi},
    error::{AppError, AppResult},
};

pub struct StoryController {
    story_service: Arc<StoryService>,
}

impl StoryController {
    pub fn new(story_service: Arc<StoryService>) -> Self {
        Self { story_service }
    }

    /// GET /api/stories - All stories
    pub async fn list_stories(
        State(controller): State<Arc<StoryController>>,
    ) -> AppResult<Json<Vec<Story>>> {
        let stories = controller.story_service.all_stories().await?;
        Ok(Json(stories))
    }

    /// GET /api/stories/latest - Most recently added story
    pub async fn latest_story(
        State(controller): State<Arc<StoryController>>,
    ) -> AppResult<Json<Story>> {
        let story = controller.story_service.latest_story().await?;
        Ok(Json(story))
    }

    /// GET /api/stories/today - Story scheduled for today, else the latest
    pub async fn today_story(
        State(controller): State<Arc<StoryController>>,
    ) -> AppResult<Json<Story>> {
        let today = Utc::now().date_naive();
        let story = controller.story_service.story_for_date(today).await?;
        Ok(Json(story))
    }

    /// GET /api/stories/{id}
    pub async fn get_story(
        State(controller): State<Arc<StoryController>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<Story>> {
        let id: i32 = id
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid story ID".to_string()))?;

        let story = controller.story_service.story_by_id(id).await?;
        Ok(Json(story))
    }

    /// POST /api/stories
    pub async fn create_story(
        State(controller): State<Arc<StoryController>>,
        Json(request): Json<NewStory>,
    ) -> AppResult<(StatusCode, Json<Story>)> {
        let story = controller.story_service.create_story(request).await?;
        Ok((StatusCode::CREATED, Json(story)))
    }

    /// PUT /api/schedule/{date} - Pin a story to a day (YYYY-MM-DD)
    pub async fn schedule_story(
        State(controller): State<Arc<StoryController>>,
        Path(date): Path<String>,
        Json(request): Json<ScheduleStoryRequest>,
    ) -> AppResult<StatusCode> {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("Invalid date, expected YYYY-MM-DD".to_string()))?;

        controller
            .story_service
            .schedule_story(date, request.story_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
