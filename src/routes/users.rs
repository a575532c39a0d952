use actix_web::web;
use actix_web::HttpResponse;
use serde_json::json;
use serde_json::Value;

use crate::store::by_id;
use crate::store::DocumentStore;
use crate::store::USERS;
use crate::utils::error_500;

// These handlers sit behind `require_authentication` (see `startup::run`);
// by the time one runs, the gate has already resolved a valid user. They are
// administrative pass-throughs over the users collection.

/// `GET /users`
///
/// Returns the stored user documents as-is. Only the login response is
/// contractually stripped to public fields; this listing requires
/// credentials to reach.
pub async fn list_users(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, actix_web::Error> {
    let users = store
        .find_many(USERS, &json!({}))
        .await
        .map_err(error_500)?;
    Ok(HttpResponse::Ok().json(users))
}

/// `PUT /users/{id}` -- shallow merge of the body into the matching user.
pub async fn update_user(
    path: web::Path<String>,
    body: web::Json<Value>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();
    store
        .update_one(USERS, &by_id(&id), body.into_inner())
        .await
        .map_err(error_500)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "User updated" })))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    path: web::Path<String>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();
    store
        .delete_one(USERS, &by_id(&id))
        .await
        .map_err(error_500)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted" })))
}
