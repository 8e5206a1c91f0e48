use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{Value, json};

use postcast_infra::InMemoryStorage;

use super::configure_routes;
use crate::state::AppState;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

async fn state() -> AppState {
    AppState::with_storage(
        Arc::new(InMemoryStorage::new()),
        Duration::from_secs(3),
        1024 * 1024,
    )
    .await
    .unwrap()
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data($state.json_config())
                .app_data($state.payload_config())
                .configure(configure_routes),
        )
        .await
    };
}

fn tomorrow() -> (String, String) {
    let at = Utc::now() + ChronoDuration::days(1);
    (
        at.format("%Y-%m-%d").to_string(),
        at.format("%H:%M").to_string(),
    )
}

fn launch_request() -> Value {
    let (date, time) = tomorrow();
    json!({
        "title": "Launch",
        "content": "Hello world",
        "platforms": ["twitter"],
        "scheduledDate": date,
        "scheduledTime": time,
    })
}

#[actix_web::test]
async fn test_health() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["posts"], 0);
}

#[actix_web::test]
async fn test_create_and_list() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Post scheduled successfully!");
    assert_eq!(body["data"]["platforms"], json!(["twitter"]));

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Launch");
}

#[actix_web::test]
async fn test_invalid_form_is_rejected() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": " ", "content": "", "platforms": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 422);
    assert_eq!(body["errors"].as_array().unwrap().len(), 5);
    assert!(state.store.is_empty().await);
}

#[actix_web::test]
async fn test_unknown_platform_is_rejected() {
    let state = state().await;
    let app = app!(state);

    let mut request = launch_request();
    request["platforms"] = json!(["twitter", "myspace"]);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_long_content_is_saved_with_warning() {
    let state = state().await;
    let app = app!(state);

    let mut request = launch_request();
    request["content"] = json!("x".repeat(300));
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["overLimit"], true);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_edit_then_update_flow() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{id}/edit"))
        .to_request();
    let selection: Value = test::call_and_read_body_json(&app, req).await;
    let form = &selection["data"]["form"];
    assert_eq!(selection["data"]["state"], "editing");
    assert_eq!(form["editing"], id.as_str());
    assert_eq!(form["title"], "Launch");
    assert_eq!(form["content"], "Hello world");
    assert_eq!(form["scheduledDate"], launch_request()["scheduledDate"]);

    let mut request = launch_request();
    request["content"] = json!("Hello world!");
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .set_json(request)
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["data"]["content"], "Hello world!");
    assert_eq!(updated["data"]["created"], created["data"]["created"]);
    assert_eq!(updated["message"], "Post updated!");

    let req = test::TestRequest::get().uri("/api/selection").to_request();
    let selection: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(selection["data"]["state"], "idle");
    assert_eq!(state.store.len().await, 1);
}

#[actix_web::test]
async fn test_update_unknown_post_is_not_found() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/api/posts/missing")
        .set_json(launch_request())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_requires_confirmation() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(state.store.len().await, 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}?confirmed=true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(state.store.is_empty().await);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}?confirmed=true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_modal_flow() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/selection/confirm-delete")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{id}/delete-request"))
        .to_request();
    let pending: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pending["data"]["state"], "confirming_delete");
    assert_eq!(pending["data"]["postId"], id.as_str());

    let req = test::TestRequest::post()
        .uri("/api/selection/confirm-delete")
        .to_request();
    let removed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(removed["data"]["id"], id.as_str());
    assert_eq!(removed["message"], "Post deleted");
    assert!(state.store.is_empty().await);
}

#[actix_web::test]
async fn test_cancel_clears_selection() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{id}/edit"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/api/selection").to_request();
    let selection: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(selection["data"]["state"], "idle");
    assert!(selection["data"]["form"].is_null());
}

#[actix_web::test]
async fn test_reorder_and_filtered_listing() {
    let state = state().await;
    let app = app!(state);

    for (title, platform, days) in [("a", "twitter", 3), ("b", "facebook", 1), ("c", "twitter", 2)] {
        let at = Utc::now() + ChronoDuration::days(days);
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": title,
                "content": "content",
                "platforms": [platform],
                "scheduledDate": at.format("%Y-%m-%d").to_string(),
                "scheduledTime": at.format("%H:%M").to_string(),
            }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/posts/reorder")
        .set_json(json!({ "from": 2, "to": 0 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["moved"], true);

    let req = test::TestRequest::post()
        .uri("/api/posts/reorder")
        .set_json(json!({ "from": 0, "to": 9 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["moved"], false);

    let titles = |body: &Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect()
    };

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["c", "a", "b"]);

    let req = test::TestRequest::get()
        .uri("/api/posts?platform=twitter&order=chronological")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["c", "a"]);

    // Display order never touches stored order.
    let stored: Vec<String> = state.store.posts().await.into_iter().map(|p| p.title).collect();
    assert_eq!(stored, ["c", "a", "b"]);

    let req = test::TestRequest::get()
        .uri("/api/posts?platform=myspace")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_image_upload() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(("content-type", "image/png"))
        .set_payload(PNG)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["mimeType"], "image/png");
    assert_eq!(body["data"]["bytes"], PNG.len());
    let data_uri = body["data"]["dataUri"].as_str().unwrap().to_string();
    assert!(data_uri.starts_with("data:image/png;base64,"));

    let mut request = launch_request();
    request["image"] = json!(data_uri);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(request)
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["data"]["image"], data_uri.as_str());

    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(("content-type", "text/plain"))
        .set_payload("not an image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_web::test]
async fn test_concurrent_requests_keep_their_own_message() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let create = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let edit = test::TestRequest::post()
        .uri(&format!("/api/posts/{id}/edit"))
        .to_request();
    let (created, _) = tokio::join!(
        test::call_and_read_body_json::<_, _, Value>(&app, create),
        test::call_service(&app, edit),
    );

    assert_eq!(created["message"], "Post scheduled successfully!");
    assert_eq!(state.store.len().await, 2);
}

#[actix_web::test]
async fn test_notification_dismiss() {
    let state = state().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/notification").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["visible"], true);
    assert_eq!(body["data"]["severity"], "success");

    let req = test::TestRequest::delete().uri("/api/notification").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["visible"], false);
}

#[actix_web::test]
async fn test_storage_failure_is_reported() {
    let state = AppState::with_storage(
        Arc::new(InMemoryStorage::with_quota(16)),
        Duration::from_secs(3),
        1024 * 1024,
    )
    .await
    .unwrap();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(launch_request())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INSUFFICIENT_STORAGE);
    assert_eq!(state.store.len().await, 1);
    assert_eq!(state.store.notifier().current().severity.as_str(), "error");
}
