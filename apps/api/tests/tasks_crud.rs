mod common;
mod support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test;
use actix_web::Error;
use serde_json::json;
use support::{bearer_header, call_rejected, spawn_app, test_state};
use test_support::assert_error_body;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

async fn create_task(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
    auth: &str,
    title: &str,
    priority: i32,
) {
    let req = test::TestRequest::post()
        .uri("/api/v1/tasks")
        .insert_header((header::AUTHORIZATION, auth))
        .set_json(json!({
            "title": title,
            "description": format!("{title} description"),
            "priority": priority
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Task created successfully" }));
}

async fn list_tasks(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
    auth: &str,
    query: &str,
) -> Vec<serde_json::Value> {
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tasks{query}"))
        .insert_header((header::AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body.as_array().expect("list response is an array").clone()
}

async fn get_task(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
    auth: &str,
    id: &str,
) -> ServiceResponse<BoxBody> {
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header((header::AUTHORIZATION, auth))
        .to_request();
    test::call_service(app, req).await
}

fn timestamp(value: &serde_json::Value) -> OffsetDateTime {
    OffsetDateTime::parse(value.as_str().expect("timestamp string"), &Rfc3339)
        .expect("RFC 3339 timestamp")
}

#[actix_web::test]
async fn create_then_list_shows_camel_case_fields() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    create_task(&app, &auth, "write the report", 2).await;

    let tasks = list_tasks(&app, &auth, "").await;
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];

    for key in [
        "id",
        "userId",
        "title",
        "description",
        "priority",
        "status",
        "createdAt",
        "updatedAt",
    ] {
        assert!(task.get(key).is_some(), "{key} field should be present");
    }
    assert!(task.get("user_id").is_none(), "fields are camelCase");

    assert_eq!(task["userId"], "u1");
    assert_eq!(task["title"], "write the report");
    assert_eq!(task["priority"], 2);
    assert_eq!(task["status"], "TODO");
    // Timestamps are RFC 3339 strings.
    timestamp(&task["createdAt"]);
    timestamp(&task["updatedAt"]);
}

#[actix_web::test]
async fn get_update_and_status_round_trip() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    create_task(&app, &auth, "draft", 1).await;
    let id = list_tasks(&app, &auth, "").await[0]["id"]
        .as_str()
        .expect("task id")
        .to_string();

    let resp = get_task(&app, &auth, &id).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "draft");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header((header::AUTHORIZATION, auth.as_str()))
        .set_json(json!({
            "title": "final",
            "description": "ready for review",
            "priority": 3
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Task updated successfully" }));

    let resp = get_task(&app, &auth, &id).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "final");
    assert_eq!(body["description"], "ready for review");
    assert_eq!(body["priority"], 3);
    // Updating fields does not touch the status.
    assert_eq!(body["status"], "TODO");
    assert!(timestamp(&body["updatedAt"]) >= timestamp(&body["createdAt"]));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{id}/status"))
        .insert_header((header::AUTHORIZATION, auth.as_str()))
        .set_json(json!({ "status": "IN_PROGRESS" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Task status updated successfully" }));

    let resp = get_task(&app, &auth, &id).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "IN_PROGRESS");
}

#[actix_web::test]
async fn delete_removes_the_task() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    create_task(&app, &auth, "doomed", 2).await;
    let id = list_tasks(&app, &auth, "").await[0]["id"]
        .as_str()
        .expect("task id")
        .to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header((header::AUTHORIZATION, auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Task deleted successfully" }));

    let resp = get_task(&app, &auth, &id).await;
    assert_error_body(resp, StatusCode::NOT_FOUND, "NOT_FOUND", "Task not found").await;

    assert!(list_tasks(&app, &auth, "").await.is_empty());
}

#[actix_web::test]
async fn foreign_tasks_are_invisible() {
    let state = test_state();
    let owner = bearer_header("owner", "owner@example.com", &state.security);
    let intruder = bearer_header("intruder", "intruder@example.com", &state.security);
    let app = spawn_app(state).await;

    create_task(&app, &owner, "private", 2).await;
    let id = list_tasks(&app, &owner, "").await[0]["id"]
        .as_str()
        .expect("task id")
        .to_string();

    // Every access through another identity reads as absence, not as a
    // permission failure.
    let resp = get_task(&app, &intruder, &id).await;
    assert_error_body(resp, StatusCode::NOT_FOUND, "NOT_FOUND", "Task not found").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header((header::AUTHORIZATION, intruder.as_str()))
        .set_json(json!({ "title": "t", "description": "d", "priority": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(resp, StatusCode::NOT_FOUND, "NOT_FOUND", "Task not found").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{id}/status"))
        .insert_header((header::AUTHORIZATION, intruder.as_str()))
        .set_json(json!({ "status": "COMPLETED" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(resp, StatusCode::NOT_FOUND, "NOT_FOUND", "Task not found").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header((header::AUTHORIZATION, intruder.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(resp, StatusCode::NOT_FOUND, "NOT_FOUND", "Task not found").await;

    assert!(list_tasks(&app, &intruder, "").await.is_empty());

    // The owner still sees it, untouched.
    let resp = get_task(&app, &owner, &id).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "private");
    assert_eq!(body["status"], "TODO");
}

#[actix_web::test]
async fn list_is_newest_first() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    for title in ["first", "second", "third"] {
        create_task(&app, &auth, title, 2).await;
    }

    let tasks = list_tasks(&app, &auth, "").await;
    assert_eq!(tasks.len(), 3);

    let titles: Vec<&str> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    for title in ["first", "second", "third"] {
        assert!(titles.contains(&title));
    }

    let stamps: Vec<OffsetDateTime> = tasks.iter().map(|t| timestamp(&t["createdAt"])).collect();
    assert!(
        stamps.windows(2).all(|w| w[0] >= w[1]),
        "createdAt must be non-increasing: {stamps:?}"
    );
}

#[actix_web::test]
async fn status_filter_narrows_the_list() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    create_task(&app, &auth, "a", 2).await;
    create_task(&app, &auth, "b", 2).await;
    let id = list_tasks(&app, &auth, "").await[0]["id"]
        .as_str()
        .expect("task id")
        .to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{id}/status"))
        .insert_header((header::AUTHORIZATION, auth.as_str()))
        .set_json(json!({ "status": "IN_PROGRESS" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let in_progress = list_tasks(&app, &auth, "?status=IN_PROGRESS").await;
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0]["id"], id.as_str());

    assert!(list_tasks(&app, &auth, "?status=COMPLETED").await.is_empty());
    assert_eq!(list_tasks(&app, &auth, "?status=TODO").await.len(), 1);
}

#[actix_web::test]
async fn unknown_status_filter_is_a_bind_failure() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/tasks?status=BOGUS")
        .insert_header((header::AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        "invalid request format",
    )
    .await;
}

#[actix_web::test]
async fn bad_status_value_is_reported_by_name() {
    let state = test_state();
    let auth = bearer_header("u1", "u1@example.com", &state.security);
    let app = spawn_app(state).await;

    create_task(&app, &auth, "t", 2).await;
    let id = list_tasks(&app, &auth, "").await[0]["id"]
        .as_str()
        .expect("task id")
        .to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{id}/status"))
        .insert_header((header::AUTHORIZATION, auth.as_str()))
        .set_json(json!({ "status": "DONE" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        "Invalid status. Status must be TODO, IN_PROGRESS, or COMPLETED",
    )
    .await;
}

#[actix_web::test]
async fn mutations_require_a_token() {
    let app = spawn_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tasks")
        .set_json(json!({ "title": "t", "description": "d", "priority": 1 }))
        .to_request();
    let (status, wire) = call_rejected(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wire.message, "invalid token");
}
