use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use mythika_backend::controllers::{narrator::NarratorController, story::StoryController};
use mythika_backend::domain::story::StoryService;
use mythika_backend::infrastructure::config::{Config, LogFormat};
use mythika_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use mythika_backend::infrastructure::http::start_http_server;
use mythika_backend::infrastructure::repositories::{
    seed_if_empty, InMemoryStoryRepository, PgStoryRepository, StoryRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Mythika Backend on {}:{}",
        config.host,
        config.port
    );

    // Pick the story store: Postgres when configured, memory otherwise
    let (pool, story_repo) = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Database connection pool created");

            check_connection(&pool).await?;
            tracing::info!("Database connection verified");

            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            let pool = Arc::new(pool);
            let repo: Arc<dyn StoryRepository> = Arc::new(PgStoryRepository::new(pool.clone()));
            (Some(pool), repo)
        }
        None => {
            if !config.is_development() {
                tracing::warn!("DATABASE_URL not set, stories will not survive a restart");
            }
            tracing::info!("Using in-memory story store");
            let repo: Arc<dyn StoryRepository> = Arc::new(InMemoryStoryRepository::new());
            (None, repo)
        }
    };

    let seeded = seed_if_empty(story_repo.as_ref()).await?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Story store seeded with default stories");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    tracing::info!("Instantiating services...");
    let story_service = Arc::new(StoryService::new(
        story_repo,
        config.story_cache_enabled,
    ));

    tracing::info!("Instantiating controllers...");
    let story_controller = Arc::new(StoryController::new(story_service.clone()));
    let narrator_controller = Arc::new(NarratorController::new(story_service));

    // Start HTTP server with all routes
    start_http_server(config, pool, story_controller, narrator_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mythika_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
