//! Integration tests for the coach chat endpoint

mod common;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_greeting() {
    let app = common::TestApp::new_logged_in().await;

    let (status, body) = app.get("/api/today/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().starts_with("Hi! I'm Ada."));
}

#[tokio::test]
async fn test_chat_requires_session() {
    let app = common::TestApp::new();

    let (status, body) = app.post("/api/today/", &json!({ "message": "hi" })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Please log in to access this feature.");
}

#[tokio::test]
async fn test_vegan_message_updates_profile() {
    let app = common::TestApp::new_logged_in().await;

    let (status, body) = app
        .post("/api/today/", &json!({ "message": "Switch to Vegan" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"]["kind"], "add_dietary_restriction");
    assert_eq!(body["profileUpdated"], true);
    assert_eq!(body["followUp"], "I've updated your profile settings.");

    let (_, profile) = app.get("/api/profile").await;
    assert_eq!(
        profile["nutritionPreferences"]["dietaryRestrictions"],
        json!(["Vegan"])
    );
}

#[tokio::test]
async fn test_confirm_changes_nothing() {
    let app = common::TestApp::new_logged_in().await;

    let (status, body) = app.post("/api/today/", &json!({ "message": "yes" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Great! Profile updated.");
    assert_eq!(body["profileUpdated"], false);
}

#[tokio::test]
async fn test_remote_agent_receives_profile_and_intent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/today/"))
        .and(body_partial_json(json!({
            "message": "my knee hurts",
            "context": { "intent": { "kind": "report_injury", "location": "Knee" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Let's go easy on the knee today.",
            "actions": ["modify_workout"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = common::test_config();
    config.agent.enabled = true;
    config.agent.base_url = format!("{}/api", server.uri());
    let app = common::TestApp::with_config(config);
    let user = app.login().await;

    let (status, body) = app
        .post("/api/today/", &json!({ "message": "my knee hurts" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Let's go easy on the knee today.");
    assert_eq!(body["actions"], json!(["modify_workout"]));
    assert!(body.get("workoutPlan").is_none());

    let received = &server.received_requests().await.unwrap()[0];
    let sent: serde_json::Value = serde_json::from_slice(&received.body).unwrap();
    assert_eq!(sent["user_id"], user.id.as_str());
}

#[tokio::test]
async fn test_remote_agent_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/today/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut config = common::test_config();
    config.agent.enabled = true;
    config.agent.base_url = format!("{}/api", server.uri());
    let app = common::TestApp::with_config(config);
    app.login().await;

    let (status, body) = app.post("/api/today/", &json!({ "message": "hello" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message"], "API Error: 404 Not Found");
}
