mod common;

use axum::http::StatusCode;
use common::TestApp;
use marketplace_service::models::Role;
use serde_json::json;

#[tokio::test]
async fn super_admin_cannot_be_self_assigned_at_registration() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(format!("{}/users", app.address))
        .json(&json!({
            "user_name": "Mallory",
            "email": "mallory@example.com",
            "roles": ["buyer", "super-admin"]
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert_eq!(app.db.list_users().await.unwrap().len(), 0);

    app.cleanup().await;
}

#[tokio::test]
async fn super_admin_can_replace_a_users_roles() {
    let app = TestApp::spawn().await;
    let admin = app.seed_user(&[Role::SuperAdmin]).await;
    let user = app.seed_user(&[Role::Buyer]).await;

    let response = reqwest::Client::new()
        .put(format!("{}/users/{}/roles", app.address, user.id))
        .header("X-User-ID", &admin.id)
        .header("X-User-Roles", "super-admin")
        .json(&json!({ "roles": ["buyer", "store-admin"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["roles"], json!(["buyer", "store-admin"]));

    let stored = app.db.find_user(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.roles, vec![Role::Buyer, Role::StoreAdmin]);

    app.cleanup().await;
}

#[tokio::test]
async fn role_mutation_is_denied_to_non_admins() {
    let app = TestApp::spawn().await;
    let user = app.seed_user(&[Role::Buyer]).await;

    // Even the account's own user cannot promote themselves.
    let response = reqwest::Client::new()
        .put(format!("{}/users/{}/roles", app.address, user.id))
        .header("X-User-ID", &user.id)
        .header("X-User-Roles", "buyer")
        .json(&json!({ "roles": ["super-admin"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::FORBIDDEN, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "insufficient_role");

    let stored = app.db.find_user(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.roles, vec![Role::Buyer]);

    app.cleanup().await;
}

#[tokio::test]
async fn updating_email_to_a_taken_one_conflicts() {
    let app = TestApp::spawn().await;
    let first = app.seed_user(&[Role::Buyer]).await;
    let second = app.seed_user(&[Role::Buyer]).await;

    let response = reqwest::Client::new()
        .put(format!("{}/users/{}", app.address, second.id))
        .header("X-User-ID", &second.id)
        .header("X-User-Roles", "buyer")
        .json(&json!({ "email": first.email }))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::CONFLICT, response.status());

    let stored = app.db.find_user(&second.id).await.unwrap().unwrap();
    assert_eq!(stored.email, second.email);

    app.cleanup().await;
}

#[tokio::test]
async fn empty_role_set_is_rejected() {
    let app = TestApp::spawn().await;
    let admin = app.seed_user(&[Role::SuperAdmin]).await;
    let user = app.seed_user(&[Role::Buyer]).await;

    let response = reqwest::Client::new()
        .put(format!("{}/users/{}/roles", app.address, user.id))
        .header("X-User-ID", &admin.id)
        .header("X-User-Roles", "super-admin")
        .json(&json!({ "roles": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    app.cleanup().await;
}
