use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use server::{ServerState, router};

fn app() -> Router {
    router(ServerState {
        engine: Arc::new(Engine::builder().build()),
    })
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn with_participants(app: &Router, names: &[&str]) {
    let (status, _) = call(
        app,
        Method::POST,
        "/api/participants",
        Some(json!({ "names": names })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn add_expense(app: &Router, body: Value) -> Value {
    let (status, body) = call(app, Method::POST, "/api/expense", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["expense"].clone()
}

#[tokio::test]
async fn participants_are_trimmed_and_deduplicated() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/participants",
        Some(json!({ "names": [" Ann ", "Ben", "", "Ann"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "participants": ["Ann", "Ben"] }));
}

#[tokio::test]
async fn report_for_two_people() {
    let app = app();
    with_participants(&app, &["A", "B"]).await;
    add_expense(&app, json!({ "payer": "A", "amount": 10 })).await;

    let (status, body) = call(&app, Method::GET, "/api/report", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["total_cents"], json!(1000));
    assert_eq!(body["per_head_cents"], json!("500"));
    assert_eq!(
        body["summary"]["A"],
        json!({ "paid_cents": 1000, "share_cents": 500, "balance_cents": 500 })
    );
    assert_eq!(
        body["summary"]["B"],
        json!({ "paid_cents": 0, "share_cents": 500, "balance_cents": -500 })
    );
    assert_eq!(
        body["payments"],
        json!([{ "from": "B", "to": "A", "amount_cents": 500 }])
    );
}

#[tokio::test]
async fn report_remainder_goes_to_first_names() {
    let app = app();
    with_participants(&app, &["A", "B", "C"]).await;
    add_expense(&app, json!({ "payer": "A", "amount": "10.00" })).await;

    let (_, body) = call(&app, Method::GET, "/api/report", None).await;

    assert_eq!(body["summary"]["A"]["share_cents"], json!(334));
    assert_eq!(body["summary"]["B"]["share_cents"], json!(333));
    assert_eq!(body["summary"]["C"]["share_cents"], json!(333));
    assert_eq!(
        body["payments"],
        json!([
            { "from": "B", "to": "A", "amount_cents": 333 },
            { "from": "C", "to": "A", "amount_cents": 333 }
        ])
    );
}

#[tokio::test]
async fn report_without_participants_is_bad_request() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/api/report", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn expense_with_unknown_payer_is_rejected() {
    let app = app();
    with_participants(&app, &["A"]).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/expense",
        Some(json!({ "payer": "Z", "amount": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn expense_with_bad_amount_is_rejected() {
    let app = app();
    with_participants(&app, &["A"]).await;

    for amount in [json!("abc"), json!(0), json!(-3)] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/expense",
            Some(json!({ "payer": "A", "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn expense_update_and_delete() {
    let app = app();
    with_participants(&app, &["A", "B"]).await;
    let expense = add_expense(
        &app,
        json!({ "payer": "A", "amount": 10, "description": "lunch", "split": ["B"] }),
    )
    .await;
    let id = expense["id"].as_str().unwrap().to_string();
    assert_eq!(expense["split"], json!(["B"]));

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/expense/{id}"),
        Some(json!({ "amount": "12,50" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expense"]["amount"], json!("12.50"));
    assert_eq!(body["expense"]["description"], json!("lunch"));

    let (status, body) = call(&app, Method::DELETE, &format!("/api/expense/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expense"]["id"], json!(id));

    let (status, _) = call(&app, Method::DELETE, &format!("/api/expense/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_expense_id_is_not_found() {
    let app = app();

    let (status, _) = call(&app, Method::DELETE, "/api/expense/not-an-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_expense_can_be_restored() {
    let app = app();
    with_participants(&app, &["A", "B"]).await;
    let expense = add_expense(&app, json!({ "payer": "B", "amount": 4 })).await;
    let id = expense["id"].as_str().unwrap().to_string();

    let (_, deleted) = call(&app, Method::DELETE, &format!("/api/expense/{id}"), None).await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/restore",
        Some(json!({ "type": "expense", "item": deleted["expense"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (_, data) = call(&app, Method::GET, "/api/data", None).await;
    assert_eq!(data["expenses"][0]["id"], json!(id));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/restore",
        Some(json!({ "type": "expense", "item": deleted["expense"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deleted_participant_can_be_restored() {
    let app = app();
    with_participants(&app, &["A", "B"]).await;
    add_expense(&app, json!({ "payer": "B", "amount": 6 })).await;

    let (status, body) = call(&app, Method::DELETE, "/api/participant/B", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["participants"], json!(["A"]));
    assert_eq!(body["removed"]["name"], json!("B"));
    assert_eq!(body["removed"]["expenses"].as_array().unwrap().len(), 1);

    let (_, data) = call(&app, Method::GET, "/api/data", None).await;
    assert_eq!(data["expenses"], json!([]));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/restore",
        Some(json!({ "type": "participant", "item": body["removed"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, data) = call(&app, Method::GET, "/api/data", None).await;
    assert_eq!(data["participants"], json!(["A", "B"]));
    assert_eq!(data["expenses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_participant_delete_is_not_found() {
    let app = app();
    with_participants(&app, &["A"]).await;

    let (status, _) = call(&app, Method::DELETE, "/api/participant/Q", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restore_with_unknown_type_is_bad_request() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/restore",
        Some(json!({ "type": "wallet", "item": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn rename_rewrites_expenses_and_rejects_duplicates() {
    let app = app();
    with_participants(&app, &["A", "B"]).await;
    add_expense(&app, json!({ "payer": "A", "amount": 2 })).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/participants/rename",
        Some(json!({ "old": "A", "new": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["participants"], json!(["Alice", "B"]));

    let (_, data) = call(&app, Method::GET, "/api/data", None).await;
    assert_eq!(data["expenses"][0]["payer"], json!("Alice"));
    assert_eq!(data["expenses"][0]["split"], json!(["Alice", "B"]));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/participants/rename",
        Some(json!({ "old": "B", "new": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn settings_default_and_update() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "event": "", "currency": "CAD" }));

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/settings",
        Some(json!({ "event": "Ski trip" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "settings": { "event": "Ski trip", "currency": "CAD" } })
    );

    let (_, data) = call(&app, Method::GET, "/api/data", None).await;
    assert_eq!(data["event"], json!("Ski trip"));
}
