use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{body_json as read_body, open_settings, register_bot, send, send_json, spawn_app};

#[tokio::test]
async fn intent_creation_reports_success_despite_failing_sub_calls() {
    let app = spawn_app(open_settings()).await;

    let bot = MockServer::start().await;
    // The action push fails outright.
    Mock::given(method("POST"))
        .and(path("/actions"))
        .and(body_json(json!({
            "name": "say-hello",
            "intent": "greet",
            "settings": {}
        })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&bot)
        .await;
    // The first example push fails, the second succeeds; both must be
    // attempted exactly once.
    Mock::given(method("POST"))
        .and(path("/example"))
        .and(body_json(json!({ "example": "hi", "intent": "greet" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&bot)
        .await;
    Mock::given(method("POST"))
        .and(path("/example"))
        .and(body_json(json!({ "example": "hello", "intent": "greet" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&bot)
        .await;

    register_bot(&app, "acme", &bot).await;

    let response = send_json(
        &app,
        "POST",
        "/intent",
        json!({
            "bot": "acme",
            "intent": "greet",
            "action": "say-hello",
            "examples": ["hi", "hello"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn intent_creation_without_examples_only_pushes_the_action() {
    let app = spawn_app(open_settings()).await;

    let bot = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/actions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&bot)
        .await;

    register_bot(&app, "acme", &bot).await;

    let response = send_json(
        &app,
        "POST",
        "/intent",
        json!({ "bot": "acme", "intent": "greet", "action": "say-hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let example_pushes = bot
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == "/example")
        .count();
    assert_eq!(example_pushes, 0);
}

#[tokio::test]
async fn example_creation_is_atomic_and_fails_loudly() {
    let app = spawn_app(open_settings()).await;

    let bot = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/example"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&bot)
        .await;

    register_bot(&app, "acme", &bot).await;

    let response = send_json(
        &app,
        "POST",
        "/example",
        json!({ "bot": "acme", "example": "hi", "intent": "greet" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn phrase_deletion_wraps_the_phrase_in_a_single_element_list() {
    let app = spawn_app(open_settings()).await;

    let bot = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/phrases"))
        .and(body_json(json!({
            "phrases": [{ "intent": "greet", "text": "hi" }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&bot)
        .await;

    register_bot(&app, "acme", &bot).await;

    let response = send_json(
        &app,
        "DELETE",
        "/phrase",
        json!({ "bot": "acme", "intent": "greet", "text": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn language_change_targets_the_addressed_bot() {
    let app = spawn_app(open_settings()).await;

    let bot = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/language"))
        .and(body_json(json!({ "country_code": "de" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&bot)
        .await;

    register_bot(&app, "acme", &bot).await;

    let response = send_json(
        &app,
        "POST",
        "/language",
        json!({ "bot": "acme", "country_code": "de" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_against_unknown_bots_never_reach_downstream() {
    let app = spawn_app(open_settings()).await;

    let response = send_json(
        &app,
        "POST",
        "/example",
        json!({ "bot": "ghost", "example": "hi", "intent": "greet" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/bot/ghost/phrases").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn intent_listing_reads_the_bots_example_endpoint() {
    let app = spawn_app(open_settings()).await;

    let bot = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["greet", "bye"])))
        .expect(1)
        .mount(&bot)
        .await;
    Mock::given(method("GET"))
        .and(path("/example/greet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["hi", "hello"])))
        .expect(1)
        .mount(&bot)
        .await;

    register_bot(&app, "acme", &bot).await;

    let body = read_body(send(&app, "GET", "/bot/acme/intents").await).await;
    assert_eq!(body, json!(["greet", "bye"]));

    let body = read_body(send(&app, "GET", "/intent/greet/bot/acme/examples").await).await;
    assert_eq!(body, json!(["hi", "hello"]));
}
