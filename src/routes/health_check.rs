use actix_web::HttpResponse;

/// `GET /health_check`
///
/// Used by the deploy platform's liveness probe. Touches nothing, not even
/// the store (a lazy pool must stay lazy here).
///
/// Note: viewing http response requires `curl -v`
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
