use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use store::Store;

const MISSING_ID: &str = "3f9a2b54-7c1d-4e8a-9f26-5b8d1d1b2c3e";

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let store = Store::builder().database(db).build().await.unwrap();
    server::app(store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
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

#[tokio::test]
async fn create_and_list_users() {
    let app = app().await;

    let (status, created) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Ana");

    let (status, listed) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn unknown_user_is_404() {
    let app = app().await;

    let (status, body) = send(&app, "GET", &format!("/users/{MISSING_ID}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "\"user not exists\" not found!");
}

#[tokio::test]
async fn blank_user_name_is_422() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/users", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid name: user name must not be empty");
}

#[tokio::test]
async fn deleted_user_disappears_from_reads() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", "/users", None).await;
    assert!(listed.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_renames() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(json!({ "name": "Ana Maria" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ana Maria");
}

#[tokio::test]
async fn expense_round_trip_with_tags() {
    let app = app().await;

    let (_, group) = send(&app, "POST", "/groups", Some(json!({ "name": "Viagem" }))).await;
    let (_, ana) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let (_, pix) = send(
        &app,
        "POST",
        "/payment-methods",
        Some(json!({ "name": "Pix", "color": "#40C4FF" })),
    )
    .await;
    let (_, comida) = send(
        &app,
        "POST",
        "/tags",
        Some(json!({ "name": "Comida", "color": "#FFAB40" })),
    )
    .await;
    let (_, viagem) = send(
        &app,
        "POST",
        "/tags",
        Some(json!({ "name": "Viagem", "color": "#7C4DFF" })),
    )
    .await;

    let (status, expense) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "group_id": group["id"],
            "user_id": ana["id"],
            "payment_method_id": pix["id"],
            "name": "Jantar",
            "amount_cents": 5000,
            "tag_ids": [viagem["id"], comida["id"]],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["payer"]["name"], "Ana");
    assert_eq!(expense["payment_method"]["color"], "#40C4FF");
    assert_eq!(expense["tags"][0]["name"], "Comida");
    assert_eq!(expense["tags"][1]["name"], "Viagem");

    let gid = group["id"].as_str().unwrap();
    let (status, listed) = send(&app, "GET", &format!("/groups/{gid}/expenses"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], expense["id"]);

    let (_, overview) = send(&app, "GET", "/groups", None).await;
    assert_eq!(overview[0]["expenses"].as_array().unwrap().len(), 1);
    assert_eq!(overview[0]["expenses"][0]["name"], "Jantar");
}

#[tokio::test]
async fn expense_update_and_tag_replace() {
    let app = app().await;

    let (_, group) = send(&app, "POST", "/groups", Some(json!({ "name": "Viagem" }))).await;
    let (_, ana) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let (_, pix) = send(
        &app,
        "POST",
        "/payment-methods",
        Some(json!({ "name": "Pix", "color": "#40C4FF" })),
    )
    .await;
    let (_, comida) = send(
        &app,
        "POST",
        "/tags",
        Some(json!({ "name": "Comida", "color": "#FFAB40" })),
    )
    .await;

    let (_, expense) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "group_id": group["id"],
            "user_id": ana["id"],
            "payment_method_id": pix["id"],
            "name": "Jantar",
            "amount_cents": 5000,
            "tag_ids": [],
        })),
    )
    .await;
    let id = expense["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/expenses/{id}"),
        Some(json!({
            "user_id": ana["id"],
            "payment_method_id": pix["id"],
            "name": "Jantar fora",
            "amount_cents": 7500,
            "tag_ids": [comida["id"]],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Jantar fora");
    assert_eq!(updated["amount_cents"], 7500);
    assert_eq!(updated["tags"].as_array().unwrap().len(), 1);

    let (status, replaced) = send(
        &app,
        "PUT",
        &format!("/expenses/{id}/tags"),
        Some(json!({ "tag_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(replaced.as_array().unwrap().is_empty());

    let (_, fetched) = send(&app, "GET", &format!("/expenses/{id}"), None).await;
    assert!(fetched["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleted_expense_leaves_group_listing() {
    let app = app().await;

    let (_, group) = send(&app, "POST", "/groups", Some(json!({ "name": "Viagem" }))).await;
    let (_, ana) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let (_, pix) = send(
        &app,
        "POST",
        "/payment-methods",
        Some(json!({ "name": "Pix", "color": "#40C4FF" })),
    )
    .await;

    let (_, expense) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "group_id": group["id"],
            "user_id": ana["id"],
            "payment_method_id": pix["id"],
            "name": "Jantar",
            "amount_cents": 5000,
            "tag_ids": [],
        })),
    )
    .await;
    let id = expense["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/expenses/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/expenses/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let gid = group["id"].as_str().unwrap();
    let (_, listed) = send(&app, "GET", &format!("/groups/{gid}/expenses"), None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn expense_with_unknown_group_is_404() {
    let app = app().await;

    let (_, ana) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let (_, pix) = send(
        &app,
        "POST",
        "/payment-methods",
        Some(json!({ "name": "Pix", "color": "#40C4FF" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "group_id": MISSING_ID,
            "user_id": ana["id"],
            "payment_method_id": pix["id"],
            "name": "Jantar",
            "amount_cents": 5000,
            "tag_ids": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "\"group not exists\" not found!");
}

#[tokio::test]
async fn zero_amount_expense_is_422() {
    let app = app().await;

    let (_, group) = send(&app, "POST", "/groups", Some(json!({ "name": "Viagem" }))).await;
    let (_, ana) = send(&app, "POST", "/users", Some(json!({ "name": "Ana" }))).await;
    let (_, pix) = send(
        &app,
        "POST",
        "/payment-methods",
        Some(json!({ "name": "Pix", "color": "#40C4FF" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "group_id": group["id"],
            "user_id": ana["id"],
            "payment_method_id": pix["id"],
            "name": "Jantar",
            "amount_cents": 0,
            "tag_ids": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid amount: amount_cents must be > 0");
}
