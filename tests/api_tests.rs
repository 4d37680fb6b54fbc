use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use causelist::config::Config;
use causelist::state::SharedState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("causelist-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;

    let state = Arc::new(
        SharedState::new(config)
            .await
            .expect("failed to create app state"),
    );
    causelist::api::router(state).await
}

async fn post_json(app: &Router, uri: &str, cookie: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn put_json(app: &Router, uri: &str, cookie: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("Content-Type", "application/json")
                .header("Cookie", cookie)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get_json(app: &Router, uri: &str, cookie: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("Cookie", cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register a user and log in; returns the session cookie.
async fn login(app: &Router) -> String {
    let (status, _) = post_json(
        app,
        "/api/auth/register",
        None,
        json!({
            "name": "Test Advocate",
            "email": "advocate@example.com",
            "password": "hunter2hunter2"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "email": "advocate@example.com",
                        "password": "hunter2hunter2"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login did not set a session cookie")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = spawn_app().await;

    for uri in ["/api/clients", "/api/cases", "/api/dashboard"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let app = spawn_app().await;

    let payload = json!({
        "name": "First",
        "email": "same@example.com",
        "password": "password123"
    });

    let (status, _) = post_json(&app, "/api/auth/register", None, payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/api/auth/register", None, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_failure_is_generic() {
    let app = spawn_app().await;

    post_json(
        &app,
        "/api/auth/register",
        None,
        json!({
            "name": "A",
            "email": "known@example.com",
            "password": "password123"
        }),
    )
    .await;

    // Wrong password and unknown email must be indistinguishable.
    let (status_wrong_pw, body_wrong_pw) = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "known@example.com", "password": "bad-password"}),
    )
    .await;
    let (status_unknown, body_unknown) = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "nobody@example.com", "password": "bad-password"}),
    )
    .await;

    assert_eq!(status_wrong_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_wrong_pw["error"], body_unknown["error"]);
}

#[tokio::test]
async fn client_crud_and_search() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let (status, created) = post_json(
        &app,
        "/api/clients",
        Some(&cookie),
        json!({
            "name": "Meera Nair",
            "phone_number": "555-1000",
            "contact_details": "meera@example.com"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let client_id = created["data"]["id"].as_i64().unwrap();

    post_json(
        &app,
        "/api/clients",
        Some(&cookie),
        json!({"name": "Ravi Kumar"}),
    )
    .await;

    // Substring search across name and contact details.
    let (_, by_name) = get_json(&app, "/api/clients?search=Meera", &cookie).await;
    assert_eq!(by_name["data"].as_array().unwrap().len(), 1);

    let (_, by_contact) = get_json(&app, "/api/clients?search=example.com", &cookie).await;
    assert_eq!(by_contact["data"].as_array().unwrap().len(), 1);

    let (_, all) = get_json(&app, "/api/clients", &cookie).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    // Partial update leaves untouched fields alone.
    let (status, updated) = put_json(
        &app,
        &format!("/api/clients/{client_id}"),
        &cookie,
        json!({"notes": "prefers evening calls"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "Meera Nair");
    assert_eq!(updated["data"]["phone_number"], "555-1000");
    assert_eq!(updated["data"]["notes"], "prefers evening calls");

    // Empty name is rejected.
    let (status, _) = post_json(&app, "/api/clients", Some(&cookie), json!({"name": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown id is a 404.
    let (status, _) = put_json(&app, "/api/clients/9999", &cookie, json!({"name": "X"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn case_requires_existing_client() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/cases",
        Some(&cookie),
        json!({
            "case_number": "CS-1/2026",
            "client_id": 4242
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Nothing was persisted.
    let (_, all) = get_json(&app, "/api/cases", &cookie).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn case_search_is_substring_or_across_fields() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let (_, client) = post_json(
        &app,
        "/api/clients",
        Some(&cookie),
        json!({"name": "Activewear Traders"}),
    )
    .await;
    let client_id = client["data"]["id"].as_i64().unwrap();

    post_json(
        &app,
        "/api/cases",
        Some(&cookie),
        json!({
            "case_number": "CS-10/2026",
            "court_name": "District Court",
            "client_id": client_id,
            "status": "Closed"
        }),
    )
    .await;
    post_json(
        &app,
        "/api/cases",
        Some(&cookie),
        json!({
            "case_number": "CS-11/2026",
            "court_name": "High Court",
            "client_id": client_id,
            "status": "Active"
        }),
    )
    .await;

    // "Active" matches the Active-status case AND the Closed case whose
    // client is named "Activewear Traders" (substring OR, not a status
    // filter).
    let (_, results) = get_json(&app, "/api/cases?search=Active", &cookie).await;
    assert_eq!(results["data"].as_array().unwrap().len(), 2);

    let (_, by_court) = get_json(&app, "/api/cases?search=High", &cookie).await;
    assert_eq!(by_court["data"].as_array().unwrap().len(), 1);
    assert_eq!(by_court["data"][0]["case_number"], "CS-11/2026");

    let (_, by_number) = get_json(&app, "/api/cases?search=CS-10", &cookie).await;
    assert_eq!(by_number["data"].as_array().unwrap().len(), 1);

    let (_, none) = get_json(&app, "/api/cases?search=Tribunal", &cookie).await;
    assert_eq!(none["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn case_update_is_partial_and_preserves_id() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let (_, client) = post_json(
        &app,
        "/api/clients",
        Some(&cookie),
        json!({"name": "Meera Nair"}),
    )
    .await;
    let client_id = client["data"]["id"].as_i64().unwrap();

    let (_, created) = post_json(
        &app,
        "/api/cases",
        Some(&cookie),
        json!({
            "case_number": "CS-7/2026",
            "case_title": "Nair v. State",
            "court_name": "High Court",
            "client_id": client_id,
            "next_hearing_date": "2026-09-14"
        }),
    )
    .await;
    let case_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["status"], "Active");

    let (status, updated) = put_json(
        &app,
        &format!("/api/cases/{case_id}"),
        &cookie,
        json!({"status": "Closed", "current_stage": "Judgment"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], case_id);
    assert_eq!(updated["data"]["status"], "Closed");
    assert_eq!(updated["data"]["current_stage"], "Judgment");
    // Untouched fields survive.
    assert_eq!(updated["data"]["case_title"], "Nair v. State");
    assert_eq!(updated["data"]["court_name"], "High Court");
    assert_eq!(updated["data"]["next_hearing_date"], "2026-09-14");
    assert_eq!(updated["data"]["client_name"], "Meera Nair");

    // Status outside the enum is rejected.
    let (status, _) = put_json(
        &app,
        &format!("/api/cases/{case_id}"),
        &cookie,
        json!({"status": "Archived"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_json(&app, "/api/cases/9999", &cookie, json!({"status": "Active"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_counts_and_upcoming_window() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let (_, client) = post_json(
        &app,
        "/api/clients",
        Some(&cookie),
        json!({"name": "Meera Nair"}),
    )
    .await;
    let client_id = client["data"]["id"].as_i64().unwrap();

    let today = chrono::Local::now().date_naive();
    let dates = [
        (today, "Active"),
        (today + chrono::Days::new(3), "Active"),
        (today + chrono::Days::new(10), "Closed"),
    ];

    for (i, (date, status)) in dates.iter().enumerate() {
        post_json(
            &app,
            "/api/cases",
            Some(&cookie),
            json!({
                "case_number": format!("CS-{i}/2026"),
                "client_id": client_id,
                "next_hearing_date": date.to_string(),
                "status": status
            }),
        )
        .await;
    }

    let (status, body) = get_json(&app, "/api/dashboard", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    // today and today+3 fall in [today, today+7]; today+10 does not.
    let upcoming = body["data"]["upcoming_hearings"].as_array().unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0]["case_number"], "CS-0/2026");
    assert_eq!(upcoming[1]["case_number"], "CS-1/2026");

    assert_eq!(body["data"]["active_count"], 2);
    assert_eq!(body["data"]["closed_count"], 1);
    assert_eq!(body["data"]["today"], today.to_string());
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = spawn_app().await;
    let cookie = login(&app).await;

    let (status, _) = get_json(&app, "/api/auth/me", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header("Cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = get_json(&app, "/api/clients", &cookie).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
