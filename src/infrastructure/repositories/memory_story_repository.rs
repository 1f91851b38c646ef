use super::story_repository::StoryRepository;
use crate::domain::story::{NewStory, Story};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Story repository kept in process memory.
///
/// Used when no database is configured and by tests.
#[derive(Default)]
pub struct InMemoryStoryRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    stories: BTreeMap<i32, Story>,
    schedule: HashMap<NaiveDate, i32>,
    next_id: i32,
}

impl InMemoryStoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Story>> {
        Ok(self.state.read().await.stories.get(&id).cloned())
    }

    async fn find_latest(&self) -> AppResult<Option<Story>> {
        Ok(self.state.read().await.stories.values().next_back().cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Story>> {
        Ok(self.state.read().await.stories.values().cloned().collect())
    }

    async fn create(&self, story: NewStory) -> AppResult<Story> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let story = story.into_story(state.next_id);
        state.stories.insert(story.id, story.clone());
        Ok(story)
    }

    async fn find_scheduled(&self, date: NaiveDate) -> AppResult<Option<Story>> {
        let state = self.state.read().await;
        Ok(state
            .schedule
            .get(&date)
            .and_then(|id| state.stories.get(id))
            .cloned())
    }

    async fn schedule(&self, date: NaiveDate, story_id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.stories.contains_key(&story_id) {
            return Err(AppError::NotFound("Story not found".to_string()));
        }
        state.schedule.insert(date, story_id);
        Ok(())
    }
}
