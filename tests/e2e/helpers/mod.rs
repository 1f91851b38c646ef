use mythika_backend::controllers::{narrator::NarratorController, story::StoryController};
use mythika_backend::domain::story::StoryService;
use mythika_backend::infrastructure::http::build_router;
use mythika_backend::infrastructure::repositories::InMemoryStoryRepository;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod fixtures;

use api_client::TestClient;
use fixtures::TestFixtures;

pub struct TestContext {
    pub client: TestClient,
    pub fixtures: TestFixtures,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let repo = Arc::new(InMemoryStoryRepository::new());

            // Cache disabled so fixtures written after a read are always visible
            let story_service = Arc::new(StoryService::new(repo.clone(), false));
            let story_controller = Arc::new(StoryController::new(story_service.clone()));
            let narrator_controller = Arc::new(NarratorController::new(story_service));

            let app = build_router(None, story_controller, narrator_controller);

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                fixtures: TestFixtures::new(repo),
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}
