use crate::e2e::helpers;

use helpers::fixtures::TestFixtures;
use helpers::TestContext;
use hyper::StatusCode;
use mythika_backend::domain::story::Story;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_all_stories_in_id_order(ctx: &TestContext) {
    ctx.fixtures.create_story("The Churning of the Ocean").await;
    ctx.fixtures.create_story("How Ganesha Got His Head").await;

    let response = ctx.client.get("/api/stories").await.unwrap();
    response.assert_status(StatusCode::OK);

    let stories: Vec<Story> = response.json().unwrap();
    let titles: Vec<&str> = stories.iter().map(|s| s.story_title.as_str()).collect();
    assert_eq!(titles, vec!["The Churning of the Ocean", "How Ganesha Got His Head"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_list_without_stories(ctx: &TestContext) {
    let response = ctx.client.get("/api/stories").await.unwrap();
    response.assert_status(StatusCode::OK);

    let stories: Vec<Story> = response.json().unwrap();
    assert!(stories.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_latest_story(ctx: &TestContext) {
    ctx.fixtures.create_story("The Churning of the Ocean").await;
    let newest = ctx.fixtures.create_story("How Ganesha Got His Head").await;

    let response = ctx.client.get("/api/stories/latest").await.unwrap();
    response.assert_status(StatusCode::OK);

    let story: Story = response.json().unwrap();
    assert_eq!(story, newest);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_no_stories(ctx: &TestContext) {
    let response = ctx.client.get("/api/stories/latest").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("No stories found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_get_story_by_id(ctx: &TestContext) {
    let created = ctx.fixtures.create_story("The Churning of the Ocean").await;

    let response = ctx
        .client
        .get(&format!("/api/stories/{}", created.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["id"], created.id);
    assert_eq!(body["story_title"], "The Churning of the Ocean");
    assert!(body["gogi_version"].as_str().unwrap().starts_with("Gogi here!"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_numeric_story_id(ctx: &TestContext) {
    let response = ctx.client.get("/api/stories/abc").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid story ID");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_story(ctx: &TestContext) {
    let response = ctx.client.get("/api/stories/999").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Story not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_story(ctx: &TestContext) {
    let request = TestFixtures::new_story("Hanuman Leaps to Lanka");

    let response = ctx.client.post("/api/stories", &request).await.unwrap();
    response.assert_status(StatusCode::CREATED);

    let created: Story = response.json().unwrap();
    assert_eq!(created.story_title, "Hanuman Leaps to Lanka");

    let response = ctx.client.get("/api/stories/latest").await.unwrap();
    let latest: Story = response.json().unwrap();
    assert_eq!(latest, created);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_story_with_blank_version(ctx: &TestContext) {
    let request = json!({
        "story_title": "Hanuman Leaps to Lanka",
        "gogi_version": "Whee!",
        "tara_version": "  ",
        "anaya_version": "Namaste."
    });

    let response = ctx.client.post("/api/stories", &request).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("tara_version cannot be empty");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_seeded_default_story(ctx: &TestContext) {
    ctx.fixtures.seed_defaults().await;

    let response = ctx.client.get("/api/stories/today").await.unwrap();
    response.assert_status(StatusCode::OK);

    let story: Story = response.json().unwrap();
    assert_eq!(story.story_title, "The Churning of the Ocean");
    assert!(story.anaya_version.starts_with("Namaste, dear ones."));
}
