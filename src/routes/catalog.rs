use actix_web::web;
use actix_web::HttpResponse;
use serde_json::json;
use serde_json::Value;

use crate::store::by_id;
use crate::store::DocumentStore;

/// The product categories, one store collection each. The category name in
/// the URL IS the collection name; membership is enforced by the route
/// pattern (see `catalog_categories_pattern`), so anything else 404s before
/// reaching a handler.
pub const CATALOG_CATEGORIES: [&str; 9] = [
    "products",
    "bakery",
    "beverages",
    "cereals",
    "dairy",
    "pantries",
    "poultry",
    "snacks",
    "appliances",
];

/// actix path-segment regex matching exactly the nine categories, for use in
/// a `{collection:...}` dynamic segment. One parameterised resource instead
/// of nine copy-pasted route blocks.
pub fn catalog_categories_pattern() -> String { CATALOG_CATEGORIES.join("|") }

// Catalog handlers answer the fixed messages the storefront matches on, with
// the store error chain going to the logs only. Catalog documents are opaque
// JSON; no auth, no validation -- anyone can list or edit a shelf.

/// `GET /{category}`
#[tracing::instrument(name = "Listing catalog products", skip(store))]
pub async fn list_products(
    path: web::Path<String>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    let collection = path.into_inner();
    match store.find_many(&collection, &json!({})).await {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not list {collection}");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch products" }))
        }
    }
}

/// `POST /{category}`
#[tracing::instrument(name = "Adding catalog product", skip(body, store))]
pub async fn create_product(
    path: web::Path<String>,
    body: web::Json<Value>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    let collection = path.into_inner();
    match store.insert_one(&collection, body.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(json!({
            "message": "Product created",
            "id": id,
        })),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not insert into {collection}");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to add product" }))
        }
    }
}

/// `PUT /{category}/{id}` -- shallow merge of the body into the first
/// document matching `_id`.
#[tracing::instrument(name = "Updating catalog product", skip(body, store))]
pub async fn update_product(
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    match store
        .update_one(&collection, &by_id(&id), body.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Product updated" })),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not update {collection}/{id}");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to update product" }))
        }
    }
}

/// `DELETE /{category}/{id}`
#[tracing::instrument(name = "Deleting catalog product", skip(store))]
pub async fn delete_product(
    path: web::Path<(String, String)>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    match store.delete_one(&collection, &by_id(&id)).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Product deleted" })),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not delete {collection}/{id}");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to delete product" }))
        }
    }
}
