use super::story_repository::StoryRepository;
use crate::domain::story::{NewStory, Story};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Postgres implementation of the story repository
pub struct PgStoryRepository {
    pool: Arc<DbPool>,
}

impl PgStoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Story>> {
        let pool = self.pool.as_ref();
        let story = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, story_title, gogi_version, tara_version, anaya_version
            FROM "Story_Table"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    async fn find_latest(&self) -> AppResult<Option<Story>> {
        let pool = self.pool.as_ref();
        let story = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, story_title, gogi_version, tara_version, anaya_version
            FROM "Story_Table"
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    async fn find_all(&self) -> AppResult<Vec<Story>> {
        let pool = self.pool.as_ref();
        let stories = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, story_title, gogi_version, tara_version, anaya_version
            FROM "Story_Table"
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(stories)
    }

    async fn create(&self, story: NewStory) -> AppResult<Story> {
        let pool = self.pool.as_ref();
        let created = sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO "Story_Table" (story_title, gogi_version, tara_version, anaya_version)
            VALUES ($1, $2, $3, $4)
            RETURNING id, story_title, gogi_version, tara_version, anaya_version
            "#,
        )
        .bind(&story.story_title)
        .bind(&story.gogi_version)
        .bind(&story.tara_version)
        .bind(&story.anaya_version)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    async fn find_scheduled(&self, date: NaiveDate) -> AppResult<Option<Story>> {
        let pool = self.pool.as_ref();
        let story = sqlx::query_as::<_, Story>(
            r#"
            SELECT s.id, s.story_title, s.gogi_version, s.tara_version, s.anaya_version
            FROM story_schedule sc
            JOIN "Story_Table" s ON s.id = sc.story_id
            WHERE sc.scheduled_for = $1
            "#,
        )
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    async fn schedule(&self, date: NaiveDate, story_id: i32) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO story_schedule (scheduled_for, story_id)
            VALUES ($1, $2)
            ON CONFLICT (scheduled_for) DO UPDATE SET story_id = EXCLUDED.story_id
            "#,
        )
        .bind(date)
        .bind(story_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Story not found".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }
}
