mod common;

use axum::http::{Method, StatusCode};
use common::{app, create_subject, create_user, log_minutes, send, send_raw};
use serde_json::json;
use studytrack_core::memory::InMemoryStore;

#[tokio::test]
async fn user_lifecycle() {
    let app = app(InMemoryStore::new());

    let (status, body) = send(&app, Method::POST, "/v1/users", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let id = create_user(&app, "Alice").await;
    let (status, body) = send(&app, Method::GET, &format!("/v1/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");

    let (status, body) = send(&app, Method::GET, "/v1/users/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid path parameter"));
}

#[tokio::test]
async fn malformed_requests_get_json_error_bodies() {
    let app = app(InMemoryStore::new());
    let user = create_user(&app, "Alice").await;

    // Wrong field type in an otherwise valid body.
    let (status, body) = send(&app, Method::POST, "/v1/users", Some(json!({ "name": 42 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));

    // Body that is not JSON at all.
    let (status, body) = send_raw(&app, Method::POST, "/v1/users", "{\"name\":").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let uri = format!("/v1/users/{}/study-logs?subjectId=nope", user);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid query string"));

    let (status, body) = send(&app, Method::DELETE, "/v1/notes/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn duplicate_subject_names_conflict() {
    let app = app(InMemoryStore::new());
    let user = create_user(&app, "Alice").await;
    create_subject(&app, &user, "Math").await;

    let uri = format!("/v1/users/{}/subjects", user);
    let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "name": "Math" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Another user may reuse the name.
    let other = create_user(&app, "Bob").await;
    create_subject(&app, &other, "Math").await;
}

#[tokio::test]
async fn subjects_can_be_renamed_listed_and_deleted() {
    let app = app(InMemoryStore::new());
    let user = create_user(&app, "Alice").await;
    let subject = create_subject(&app, &user, "Maths").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/v1/subjects/{}", subject),
        Some(json!({ "name": "Mathematics" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mathematics");

    let (_, body) = send(&app, Method::GET, &format!("/v1/users/{}/subjects", user), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/v1/subjects/{}", subject), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, Method::DELETE, &format!("/v1/subjects/{}", subject), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn study_logs_validate_minutes_and_filter_by_date() {
    let app = app(InMemoryStore::new());
    let user = create_user(&app, "Alice").await;
    let subject = create_subject(&app, &user, "Math").await;
    let uri = format!("/v1/users/{}/study-logs", user);

    for minutes in [0, 1441] {
        let body = json!({ "subjectId": subject, "studiedAt": "2024-01-01T10:00:00Z", "minutes": minutes });
        let (status, _) = send(&app, Method::POST, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "minutes={}", minutes);
    }

    log_minutes(&app, &user, &subject, "2024-01-01T10:00:00Z", 30).await;
    log_minutes(&app, &user, &subject, "2024-01-02T23:59:00Z", 45).await;
    log_minutes(&app, &user, &subject, "2024-01-03T00:00:00Z", 60).await;

    // `to` is inclusive of the whole named day.
    let (status, body) = send(&app, Method::GET, &format!("{}?from=2024-01-01&to=2024-01-02", uri), None).await;
    assert_eq!(status, StatusCode::OK);
    let logs = body.as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["minutes"], 45);

    let (status, _) = send(&app, Method::GET, &format!("{}?from=Jan-1", uri), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = logs[0]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, Method::DELETE, &format!("/v1/study-logs/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn another_users_subject_is_not_found() {
    let app = app(InMemoryStore::new());
    let alice = create_user(&app, "Alice").await;
    let bob = create_user(&app, "Bob").await;
    let bobs_subject = create_subject(&app, &bob, "Chess").await;

    let body = json!({ "subjectId": bobs_subject, "studiedAt": "2024-01-01T10:00:00Z", "minutes": 30 });
    let (status, _) = send(&app, Method::POST, &format!("/v1/users/{}/study-logs", alice), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let goal = json!({ "targetMinutesPerWeek": 60, "startDate": "2024-01-01" });
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/v1/users/{}/goals/{}", alice, bobs_subject),
        Some(goal),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goals_are_upserted_per_subject() {
    let app = app(InMemoryStore::new());
    let user = create_user(&app, "Alice").await;
    let subject = create_subject(&app, &user, "Math").await;
    let uri = format!("/v1/users/{}/goals/{}", user, subject);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "targetMinutesPerWeek": 0, "startDate": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "targetMinutesPerWeek": 60, "startDate": "2024-02-01", "endDate": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, first) = send(&app, Method::PUT, &uri, Some(json!({ "targetMinutesPerWeek": 60, "startDate": "2024-01-01" }))).await;
    let (status, second) = send(&app, Method::PUT, &uri, Some(json!({ "targetMinutesPerWeek": 90, "startDate": "2024-01-01" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["targetMinutesPerWeek"], 90);

    let (_, goals) = send(&app, Method::GET, &format!("/v1/users/{}/goals", user), None).await;
    assert_eq!(goals.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn notes_round_trip_through_the_api() {
    let app = app(InMemoryStore::new());
    let user = create_user(&app, "Alice").await;
    let subject = create_subject(&app, &user, "Math").await;
    let uri = format!("/v1/users/{}/subjects/{}/notes", user, subject);

    let (status, note) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "title": "Derivatives", "content": "d/dx x^2 = 2x", "tags": ["calculus"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let note_uri = format!("/v1/notes/{}", note["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PUT, &note_uri, Some(json!({ "title": "Integrals" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Integrals");
    assert_eq!(updated["tags"], json!([]));

    let (_, listed) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &note_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &note_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
