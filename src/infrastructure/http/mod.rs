use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{health, narrator::NarratorController, story::StoryController};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Build the application router. `pool` is `None` when stories live in memory.
pub fn build_router(
    pool: Option<Arc<DbPool>>,
    story_controller: Arc<StoryController>,
    narrator_controller: Arc<NarratorController>,
) -> Router {
    let story_routes = Router::new()
        .route(
            "/api/stories",
            get(StoryController::list_stories).post(StoryController::create_story),
        )
        .route("/api/stories/latest", get(StoryController::latest_story))
        .route("/api/stories/today", get(StoryController::today_story))
        .route("/api/stories/:id", get(StoryController::get_story))
        .route("/api/schedule/:date", put(StoryController::schedule_story))
        .with_state(story_controller);

    let narrator_routes = Router::new()
        .route("/api/narrators", get(NarratorController::list_narrators))
        .route(
            "/api/narrators/:id/story",
            get(NarratorController::narrator_story),
        )
        .with_state(narrator_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(story_routes)
        .merge(narrator_routes)
        .layer(
            // outermost layer first
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    pool: Option<Arc<DbPool>>,
    story_controller: Arc<StoryController>,
    narrator_controller: Arc<NarratorController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, story_controller, narrator_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
