use super::error::StoryServiceError;
use super::{NarratedStory, NewStory, Story};
use crate::domain::narrator::{NarratorId, NarratorProfile};
use crate::infrastructure::repositories::StoryRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 64;

pub struct StoryService {
    story_repo: Arc<dyn StoryRepository>,
    daily_cache: Option<Cache<NaiveDate, Story>>,
}

impl StoryService {
    pub fn new(story_repo: Arc<dyn StoryRepository>, cache_enabled: bool) -> Self {
        let daily_cache = cache_enabled.then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build()
        });

        Self {
            story_repo,
            daily_cache,
        }
    }

    async fn resolve_for_date(&self, date: NaiveDate) -> Result<Story, StoryServiceError> {
        if let Some(story) = self.story_repo.find_scheduled(date).await? {
            tracing::debug!(%date, story_id = story.id, "Using scheduled story");
            return Ok(story);
        }

        tracing::debug!(%date, "No story scheduled, falling back to latest");
        self.latest_story().await
    }

    async fn invalidate_cache(&self) {
        if let Some(cache) = &self.daily_cache {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }
}

/// Story Provider for the narration screens and the HTTP API
#[async_trait]
pub trait StoryServiceApi: Send + Sync {
    /// The story with the highest id
    async fn latest_story(&self) -> Result<Story, StoryServiceError>;

    async fn story_by_id(&self, id: i32) -> Result<Story, StoryServiceError>;

    async fn all_stories(&self) -> Result<Vec<Story>, StoryServiceError>;

    /// The story pinned to `date`, or the latest one when nothing is scheduled
    async fn story_for_date(&self, date: NaiveDate) -> Result<Story, StoryServiceError>;

    async fn create_story(&self, request: NewStory) -> Result<Story, StoryServiceError>;

    async fn schedule_story(&self, date: NaiveDate, story_id: i32)
        -> Result<(), StoryServiceError>;

    fn narrator_profile(&self, id: NarratorId) -> NarratorProfile {
        NarratorProfile::for_id(id)
    }

    async fn narrated_story(
        &self,
        narrator: NarratorId,
        date: NaiveDate,
    ) -> Result<NarratedStory, StoryServiceError> {
        let story = self.story_for_date(date).await?;
        Ok(NarratedStory {
            narrator: self.narrator_profile(narrator),
            story_id: story.id,
            text: story.version_for(narrator).to_string(),
            story_title: story.story_title,
        })
    }

    /// Full text a narrator tells on `date`
    async fn story_text(
        &self,
        narrator: NarratorId,
        date: NaiveDate,
    ) -> Result<String, StoryServiceError> {
        Ok(self.narrated_story(narrator, date).await?.text)
    }
}

#[async_trait]
impl StoryServiceApi for StoryService {
    async fn latest_story(&self) -> Result<Story, StoryServiceError> {
        self.story_repo
            .find_latest()
            .await?
            .ok_or_else(|| StoryServiceError::NotFound("No stories found".to_string()))
    }

    async fn story_by_id(&self, id: i32) -> Result<Story, StoryServiceError> {
        self.story_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoryServiceError::NotFound("Story not found".to_string()))
    }

    async fn all_stories(&self) -> Result<Vec<Story>, StoryServiceError> {
        Ok(self.story_repo.find_all().await?)
    }

    async fn story_for_date(&self, date: NaiveDate) -> Result<Story, StoryServiceError> {
        let Some(cache) = &self.daily_cache else {
            return self.resolve_for_date(date).await;
        };

        if let Some(story) = cache.get(&date).await {
            tracing::debug!(%date, story_id = story.id, "Story cache hit");
            return Ok(story);
        }

        let story = self.resolve_for_date(date).await?;
        cache.insert(date, story.clone()).await;
        Ok(story)
    }

    async fn create_story(&self, request: NewStory) -> Result<Story, StoryServiceError> {
        request.validate().map_err(StoryServiceError::Invalid)?;

        let story = self.story_repo.create(request).await?;
        self.invalidate_cache().await;

        tracing::info!(story_id = story.id, title = %story.story_title, "Story created");
        Ok(story)
    }

    async fn schedule_story(
        &self,
        date: NaiveDate,
        story_id: i32,
    ) -> Result<(), StoryServiceError> {
        self.story_by_id(story_id).await?;
        self.story_repo.schedule(date, story_id).await?;
        self.invalidate_cache().await;

        tracing::info!(%date, story_id, "Story scheduled");
        Ok(())
    }
}
