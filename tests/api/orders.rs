use cc_goodies::store::DocumentStore;
use cc_goodies::store::BANKING_DETAILS;
use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn save_order_ok() {
    let app = spawn_app().await;

    let resp = app
        .post_order(&json!({
            "email": "a@b.com",
            "items": [{ "name": "sourdough", "qty": 2 }],
            "total": 9.0,
        }))
        .await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Order saved");
}

/// Order history is filtered on the order's own email field.
#[tokio::test]
async fn orders_are_listed_per_email() {
    let app = spawn_app().await;

    app.post_order(&json!({ "email": "a@b.com", "total": 1 }))
        .await;
    app.post_order(&json!({ "email": "a@b.com", "total": 2 }))
        .await;
    app.post_order(&json!({ "email": "c@d.com", "total": 3 }))
        .await;

    let resp = app.get_orders("a@b.com").await;
    assert_eq!(resp.status().as_u16(), 200);
    let orders: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(orders.len(), 2);

    let resp = app.get_orders("nobody@example.com").await;
    let orders: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn banking_details_are_saved_without_expiry_and_cvv() {
    let app = spawn_app().await;

    let resp = app
        .post_banking_details(&json!({
            "email": "a@b.com",
            "method": "card",
            "cardNumber": "4111111111111111",
            "expiry": "12/30",
            "cvv": "123",
            "accountNumber": null,
            "bankName": null,
        }))
        .await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Banking details saved");

    let stored = app
        .store
        .find_one(BANKING_DETAILS, &json!({ "email": "a@b.com" }))
        .await
        .unwrap()
        .expect("banking details were not persisted");

    assert_eq!(stored["cardNumber"], "4111111111111111");
    // the two fields that must never reach storage
    assert!(stored.get("expiry").is_none(), "{stored}");
    assert!(stored.get("cvv").is_none(), "{stored}");
    assert!(stored["createdAt"].is_string());
}
