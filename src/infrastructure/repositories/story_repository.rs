use crate::domain::story::{NewStory, Story};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Storage for stories and the per-day schedule.
///
/// "Latest" means the story with the highest id.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Story>>;

    async fn find_latest(&self) -> AppResult<Option<Story>>;

    /// All stories ordered by id
    async fn find_all(&self) -> AppResult<Vec<Story>>;

    async fn create(&self, story: NewStory) -> AppResult<Story>;

    /// The story pinned to `date`, if any
    async fn find_scheduled(&self, date: NaiveDate) -> AppResult<Option<Story>>;

    /// Pin a story to a day, replacing any previous entry for that day
    async fn schedule(&self, date: NaiveDate, story_id: i32) -> AppResult<()>;
}
