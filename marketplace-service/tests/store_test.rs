mod common;

use axum::http::StatusCode;
use common::TestApp;
use marketplace_service::models::Role;
use mongodb::bson::doc;
use serde_json::json;

#[tokio::test]
async fn store_admin_can_create_a_store() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user(&[Role::StoreAdmin]).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/stores", app.address))
        .header("X-User-ID", &owner.id)
        .header("X-User-Roles", "store-admin")
        .json(&json!({
            "store_name": "Pine & Co",
            "store_description": "Handmade furniture"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::CREATED, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["user_id"], owner.id.as_str());

    let stored = app
        .db
        .find_store_by_owner(&owner.id)
        .await
        .unwrap()
        .expect("Store not found in DB");
    assert_eq!(stored.store_name, "Pine & Co");

    app.cleanup().await;
}

#[tokio::test]
async fn second_store_for_same_owner_is_rejected() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user(&[Role::StoreAdmin]).await;

    let client = reqwest::Client::new();
    let create = |name: &str| {
        client
            .post(format!("{}/stores", app.address))
            .header("X-User-ID", &owner.id)
            .header("X-User-Roles", "store-admin")
            .json(&json!({ "store_name": name }))
            .send()
    };

    let first = create("First Store").await.unwrap();
    assert_eq!(StatusCode::CREATED, first.status());

    let second = create("Second Store").await.unwrap();
    assert_eq!(StatusCode::CONFLICT, second.status());
    let body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(body["code"], "already_owns_resource");

    // Exactly one store record exists for the owner.
    let count = app
        .db
        .stores()
        .count_documents(doc! { "user_id": &owner.id }, None)
        .await
        .unwrap();
    assert_eq!(count, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn buyer_cannot_create_a_store() {
    let app = TestApp::spawn().await;
    let buyer = app.seed_user(&[Role::Buyer]).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/stores", app.address))
        .header("X-User-ID", &buyer.id)
        .header("X-User-Roles", "buyer")
        .json(&json!({ "store_name": "Sneaky Store" }))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::FORBIDDEN, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "insufficient_role");

    let count = app
        .db
        .stores()
        .count_documents(doc! {}, None)
        .await
        .unwrap();
    assert_eq!(count, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn missing_auth_headers_are_rejected_before_any_engine_logic() {
    let app = TestApp::spawn().await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/stores", app.address))
        .json(&json!({ "store_name": "No Auth Store" }))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    // Garbled role tags are an auth-context failure as well.
    let owner = app.seed_user(&[Role::StoreAdmin]).await;
    let response = client
        .post(format!("{}/stores", app.address))
        .header("X-User-ID", &owner.id)
        .header("X-User-Roles", "warehouse-gremlin")
        .json(&json!({ "store_name": "No Auth Store" }))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn update_only_touches_allow_listed_fields() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user(&[Role::StoreAdmin]).await;
    let store = app.seed_store(&owner).await;

    let client = reqwest::Client::new();
    let response = client
        .put(format!("{}/stores/me", app.address))
        .header("X-User-ID", &owner.id)
        .header("X-User-Roles", "store-admin")
        .json(&json!({
            "store_name": "Renamed Store",
            // Not on the allow-list; must never persist.
            "status": "verified",
            "user_id": "someone-else"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());

    let stored = app
        .db
        .find_store_by_id(&store.id)
        .await
        .unwrap()
        .expect("Store not found in DB");
    assert_eq!(stored.store_name, "Renamed Store");
    assert_eq!(stored.status.as_str(), "pending");
    assert_eq!(stored.user_id, owner.id);

    app.cleanup().await;
}

#[tokio::test]
async fn owner_can_fetch_and_delete_own_store() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user(&[Role::StoreAdmin]).await;
    let store = app.seed_store(&owner).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/stores/me", app.address))
        .header("X-User-ID", &owner.id)
        .header("X-User-Roles", "store-admin")
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], store.id.as_str());

    let response = client
        .delete(format!("{}/stores/me", app.address))
        .header("X-User-ID", &owner.id)
        .header("X-User-Roles", "store-admin")
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::NO_CONTENT, response.status());

    assert!(app.db.find_store_by_id(&store.id).await.unwrap().is_none());

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_registration_by_email_conflicts() {
    let app = TestApp::spawn().await;

    let client = reqwest::Client::new();
    let register = || {
        client
            .post(format!("{}/users", app.address))
            .json(&json!({
                "user_name": "Dana",
                "email": "dana@example.com"
            }))
            .send()
    };

    let first = register().await.unwrap();
    assert_eq!(StatusCode::CREATED, first.status());
    let body: serde_json::Value = first.json().await.unwrap();
    assert_eq!(body["roles"], json!(["buyer"]));

    let second = register().await.unwrap();
    assert_eq!(StatusCode::CONFLICT, second.status());

    app.cleanup().await;
}
