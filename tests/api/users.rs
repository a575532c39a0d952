use cc_goodies::store::DocumentStore;
use cc_goodies::store::USERS;
use serde_json::json;

use crate::helpers::basic_auth;
use crate::helpers::spawn_app;

// the gate, unlike /login, names what went wrong; the three bodies below are
// load-bearing strings the storefront's admin page matches on

#[tokio::test]
async fn gate_denies_without_header() {
    let app = spawn_app().await;

    let resp = app.get_users(None).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Authorization header missing or invalid");
}

#[tokio::test]
async fn gate_denies_malformed_headers() {
    let app = spawn_app().await;

    for (auth, msg) in [
        ("Bearer abc", "wrong scheme"),
        ("Basic", "scheme without payload"),
        ("Basic not!!base64", "payload not base64"),
        ("Basic bm8tY29sb24taGVyZQ==", "payload without a colon"),
    ] {
        let resp = app.get_users(Some(auth)).await;
        assert_eq!(resp.status().as_u16(), 401, "{msg}");
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body["message"], "Authorization header missing or invalid",
            "{msg}"
        );
    }
}

#[tokio::test]
async fn gate_denies_unknown_email() {
    let app = spawn_app().await;

    let auth = basic_auth("nobody@example.com", &app.test_user.password);
    let resp = app.get_users(Some(&auth)).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn gate_denies_wrong_password() {
    let app = spawn_app().await;

    let auth = basic_auth(&app.test_user.email, "not-the-password");
    let resp = app.get_users(Some(&auth)).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn gate_allows_valid_credentials() {
    let app = spawn_app().await;

    let auth = basic_auth(&app.test_user.email, &app.test_user.password);
    let resp = app.get_users(Some(&auth)).await;

    assert_eq!(resp.status().as_u16(), 200);
    let users: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], json!(app.test_user.email));
}

#[tokio::test]
async fn update_and_delete_users() {
    let app = spawn_app().await;
    let auth = basic_auth(&app.test_user.email, &app.test_user.password);

    // one more user to operate on, so deleting it doesn't lock us out
    let mut victim = crate::helpers::TestUser::generate();
    victim.store(app.store.as_ref()).await;

    let resp = app
        .put_user(&victim.user_id, &json!({ "address": "9 New Road" }), Some(&auth))
        .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User updated");

    let stored = app
        .store
        .find_one(USERS, &json!({ "_id": victim.user_id }))
        .await
        .unwrap()
        .unwrap();
    // merged, not replaced
    assert_eq!(stored["address"], "9 New Road");
    assert_eq!(stored["email"], json!(victim.email));

    let resp = app.delete_user(&victim.user_id, Some(&auth)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User deleted");

    let gone = app
        .store
        .find_one(USERS, &json!({ "_id": victim.user_id }))
        .await
        .unwrap();
    assert!(gone.is_none());
}

/// The full journey: signup, then hit a gated route with the same
/// credentials, the wrong password, and no header at all.
#[tokio::test]
async fn signup_then_authenticate() {
    let app = spawn_app().await;

    let resp = app
        .post_signup(&json!({
            "name": "A",
            "email": "a@b.com",
            "address": "B",
            "password": "12345678",
            "confirmPassword": "12345678",
        }))
        .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["user_id"].is_string());

    let resp = app
        .get_users(Some(&basic_auth("a@b.com", "12345678")))
        .await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app.get_users(Some(&basic_auth("a@b.com", "WRONG"))).await;
    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid password");

    let resp = app.get_users(None).await;
    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Authorization header missing or invalid");
}
