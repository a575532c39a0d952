use serde_json::json;

use crate::helpers::basic_auth;
use crate::helpers::spawn_app;

#[tokio::test]
async fn login_ok() {
    let app = spawn_app().await;

    let auth = basic_auth(&app.test_user.email, &app.test_user.password);
    let resp = app.post_login(Some(&auth)).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], json!(app.test_user.email));
    assert_eq!(body["user"]["_id"], json!(app.test_user.user_id));
}

/// Public fields only: the response must not carry the stored password in
/// any form.
#[tokio::test]
async fn login_response_never_contains_the_stored_password() {
    let app = spawn_app().await;

    let auth = basic_auth(&app.test_user.email, &app.test_user.password);
    let resp = app.post_login(Some(&auth)).await;

    assert_eq!(resp.status().as_u16(), 200);
    let raw = resp.text().await.unwrap();
    assert!(!raw.contains("password"), "{raw}");
    let encoded = cc_goodies::authentication::codec::encode(&app.test_user.password);
    assert!(!raw.contains(&encoded), "{raw}");
}

/// Unknown email and wrong password must be indistinguishable from outside:
/// same status, same body, byte for byte. A different answer for each would
/// let anyone enumerate registered emails.
#[tokio::test]
async fn login_does_not_leak_which_credential_was_wrong() {
    let app = spawn_app().await;

    let unknown_email = basic_auth("nobody@example.com", &app.test_user.password);
    let wrong_password = basic_auth(&app.test_user.email, "wrong-password");

    let resp_unknown = app.post_login(Some(&unknown_email)).await;
    let resp_wrong = app.post_login(Some(&wrong_password)).await;

    assert_eq!(resp_unknown.status().as_u16(), 401);
    assert_eq!(resp_wrong.status().as_u16(), 401);

    let body_unknown = resp_unknown.text().await.unwrap();
    let body_wrong = resp_wrong.text().await.unwrap();
    assert_eq!(body_unknown, body_wrong);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body_unknown).unwrap(),
        json!({ "error": "Invalid email or password" })
    );
}

/// Header-shape failures get the same generic 401 as credential failures;
/// /login is intentionally blunter than the /users gate.
#[tokio::test]
async fn login_header_failures_are_also_generic() {
    let app = spawn_app().await;

    for (auth, msg) in [
        (None, "no header"),
        (Some("Bearer abc"), "wrong scheme"),
        (Some("Basic not!!base64"), "undecodable payload"),
    ] {
        let resp = app.post_login(auth).await;
        assert_eq!(resp.status().as_u16(), 401, "{msg}");
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Invalid email or password", "{msg}");
    }
}

/// A password containing colons authenticates: the payload is split at the
/// first colon only.
#[tokio::test]
async fn login_with_colon_in_password() {
    let app = spawn_app().await;

    let mut user = crate::helpers::TestUser::generate();
    user.password = "pa:ss:word".to_string();
    user.store(app.store.as_ref()).await;

    let resp = app
        .post_login(Some(&basic_auth(&user.email, "pa:ss:word")))
        .await;
    assert_eq!(resp.status().as_u16(), 200);
}
