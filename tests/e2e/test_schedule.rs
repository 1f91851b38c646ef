use crate::e2e::helpers;

use chrono::{NaiveDate, Utc};
use helpers::TestContext;
use hyper::StatusCode;
use mythika_backend::domain::story::Story;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_scheduled_story_today(ctx: &TestContext) {
    let scheduled = ctx.fixtures.create_story("The Churning of the Ocean").await;
    ctx.fixtures.create_story("How Ganesha Got His Head").await;

    let today = Utc::now().date_naive();
    let response = ctx
        .client
        .put(
            &format!("/api/schedule/{}", today.format("%Y-%m-%d")),
            &json!({ "story_id": scheduled.id }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get("/api/stories/today").await.unwrap();
    response.assert_status(StatusCode::OK);

    let story: Story = response.json().unwrap();
    assert_eq!(story, scheduled);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_latest_when_unscheduled(ctx: &TestContext) {
    let first = ctx.fixtures.create_story("The Churning of the Ocean").await;
    let latest = ctx.fixtures.create_story("How Ganesha Got His Head").await;

    // A schedule entry for another day does not affect today
    let other_day = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    ctx.fixtures.schedule(other_day, first.id).await;

    let response = ctx.client.get("/api/stories/today").await.unwrap();
    let story: Story = response.json().unwrap();
    assert_eq!(story, latest);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_replace_schedule_for_same_day(ctx: &TestContext) {
    let first = ctx.fixtures.create_story("The Churning of the Ocean").await;
    let second = ctx.fixtures.create_story("How Ganesha Got His Head").await;
    ctx.fixtures.create_story("Hanuman Leaps to Lanka").await;

    let path = "/api/schedule/2030-05-01";
    ctx.client
        .put(path, &json!({ "story_id": first.id }))
        .await
        .unwrap()
        .assert_status(StatusCode::NO_CONTENT);
    ctx.client
        .put(path, &json!({ "story_id": second.id }))
        .await
        .unwrap()
        .assert_status(StatusCode::NO_CONTENT);

    let response = ctx
        .client
        .get("/api/narrators/tara/story?date=2030-05-01")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["story_id"], second.id);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_schedule_date(ctx: &TestContext) {
    let story = ctx.fixtures.create_story("The Churning of the Ocean").await;

    let response = ctx
        .client
        .put("/api/schedule/next-tuesday", &json!({ "story_id": story.id }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_scheduling_unknown_story(ctx: &TestContext) {
    let response = ctx
        .client
        .put("/api/schedule/2030-05-01", &json!({ "story_id": 42 }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Story not found");
}
