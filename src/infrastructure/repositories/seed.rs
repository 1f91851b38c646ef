use super::story_repository::StoryRepository;
use crate::domain::story::NewStory;
use crate::error::{AppError, AppResult};

const DEFAULT_STORIES: &str = include_str!("../../../data/stories.json");

/// Stories every fresh installation starts with
pub fn default_stories() -> Result<Vec<NewStory>, serde_json::Error> {
    serde_json::from_str(DEFAULT_STORIES)
}

/// Insert the default stories when the store holds none.
///
/// Returns how many stories were inserted.
pub async fn seed_if_empty(repo: &dyn StoryRepository) -> AppResult<usize> {
    if repo.find_latest().await?.is_some() {
        tracing::debug!("Story store already populated, skipping seed");
        return Ok(0);
    }

    let stories = default_stories()
        .map_err(|e| AppError::Internal(format!("invalid seed stories: {e}")))?;
    let count = stories.len();
    for story in stories {
        let created = repo.create(story).await?;
        tracing::info!(story_id = created.id, title = %created.story_title, "Seeded story");
    }

    Ok(count)
}
