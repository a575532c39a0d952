use actix_web::web;
use actix_web::HttpResponse;
use serde_json::json;
use serde_json::Value;

use crate::store::DocumentStore;
use crate::store::ORDERS;

/// `POST /api/orders`
///
/// The order document is persisted verbatim; its shape belongs to the
/// storefront's checkout, not to this API.
#[tracing::instrument(name = "Saving order", skip(body, store))]
pub async fn save_order(
    body: web::Json<Value>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    match store.insert_one(ORDERS, body.into_inner()).await {
        Ok(_) => HttpResponse::Created().json(json!({ "message": "Order saved" })),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not save order");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save order" }))
        }
    }
}

/// `GET /api/orders/{email}`
///
/// Order history, filtered on the order's own `email` field. Note there is
/// no auth here and no check that the email belongs to the caller.
#[tracing::instrument(name = "Fetching orders", skip(store))]
pub async fn list_orders(
    path: web::Path<String>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    let email = path.into_inner();
    match store.find_many(ORDERS, &json!({ "email": email })).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not fetch orders");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch orders" }))
        }
    }
}
