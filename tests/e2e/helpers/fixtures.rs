use chrono::NaiveDate;
use mythika_backend::domain::story::{NewStory, Story};
use mythika_backend::infrastructure::repositories::{
    seed_if_empty, InMemoryStoryRepository, StoryRepository,
};
use std::sync::Arc;

pub struct TestFixtures {
    repo: Arc<InMemoryStoryRepository>,
}

#[allow(dead_code)]
impl TestFixtures {
    pub fn new(repo: Arc<InMemoryStoryRepository>) -> Self {
        Self { repo }
    }

    pub fn new_story(title: &str) -> NewStory {
        NewStory {
            story_title: title.to_string(),
            gogi_version: format!("Gogi here! {title} is AMAZING."),
            tara_version: format!("Hello adventurers! Today: {title}."),
            anaya_version: format!("Namaste, dear ones. Let us hear {title}."),
        }
    }

    pub async fn create_story(&self, title: &str) -> Story {
        self.repo
            .create(Self::new_story(title))
            .await
            .expect("Failed to create story")
    }

    /// Load the default catalogue, as a fresh server would
    pub async fn seed_defaults(&self) {
        seed_if_empty(self.repo.as_ref())
            .await
            .expect("Failed to seed stories");
    }

    pub async fn schedule(&self, date: NaiveDate, story_id: i32) {
        self.repo
            .schedule(date, story_id)
            .await
            .expect("Failed to schedule story");
    }
}
