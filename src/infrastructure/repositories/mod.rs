pub mod memory_story_repository;
pub mod pg_story_repository;
pub mod seed;
pub mod story_repository;

pub use memory_story_repository::InMemoryStoryRepository;
pub use pg_story_repository::PgStoryRepository;
pub use seed::{default_stories, seed_if_empty};
pub use story_repository::StoryRepository;
