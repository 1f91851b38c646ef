use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_the_three_narrators(ctx: &TestContext) {
    let response = ctx.client.get("/api/narrators").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["gogi", "tara", "anaya"]);

    for narrator in body.as_array().unwrap() {
        assert!(narrator["name"].is_string());
        assert!(narrator["voice"]["rate"].is_number());
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_tell_story_in_narrator_version(ctx: &TestContext) {
    let story = ctx.fixtures.create_story("The Churning of the Ocean").await;

    let response = ctx
        .client
        .get("/api/narrators/anaya/story")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["narrator"]["id"], "anaya");
    assert_eq!(body["story_id"], story.id);
    assert_eq!(body["story_title"], "The Churning of the Ocean");
    assert_eq!(body["text"], story.anaya_version.as_str());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_requested_date(ctx: &TestContext) {
    let scheduled = ctx.fixtures.create_story("The Churning of the Ocean").await;
    ctx.fixtures.create_story("How Ganesha Got His Head").await;
    ctx.fixtures
        .schedule(chrono::NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(), scheduled.id)
        .await;

    let response = ctx
        .client
        .get("/api/narrators/gogi/story?date=2030-05-01")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["text"], scheduled.gogi_version.as_str());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_narrator(ctx: &TestContext) {
    ctx.fixtures.create_story("The Churning of the Ocean").await;

    let response = ctx
        .client
        .get("/api/narrators/zeus/story")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Narrator not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_no_story_to_tell(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/narrators/tara/story")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("No stories found");
}
