use std::ops::Deref;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::error::InternalError;
use actix_web::web;
use actix_web::HttpMessage;
use actix_web::HttpResponse;
use actix_web_lab::middleware::Next;

use crate::authentication::basic_authentication;
use crate::authentication::validate_credentials;
use crate::authentication::AuthError;
use crate::store::DocumentStore;
use crate::utils::error_500;

/// The user document resolved by the gate, embedded in request extensions so
/// downstream handlers can pick it up with `web::ReqData<AuthenticatedUser>`.
// `Clone` grants `.into_inner`
#[derive(Clone)]
pub struct AuthenticatedUser(pub serde_json::Value);

// basically just for unpacking the inner document
impl Deref for AuthenticatedUser {
    type Target = serde_json::Value;
    fn deref(&self) -> &Self::Target { &self.0 }
}

/// Since authentication will be used very often, it makes sense to turn this
/// protocol into a middleware that wraps a whole route scope (`/users`).
/// However, since middlewares generally only "take" data (without expecting
/// to return it), the resolved user is embedded in the request.
///
/// Unlike `/login`, which collapses every failure into one message, the gate
/// answers with three distinct 401 bodies:
///
/// - header absent / wrong scheme / undecodable payload:
///   `{"message": "Authorization header missing or invalid"}`
/// - unknown email: `{"message": "User not found"}`
/// - wrong password: `{"message": "Invalid password"}`
///
/// The gate is stateless across requests; nothing is issued or remembered.
///
/// For more details, refer to the documentation for
/// `actix_web_lab::middleware::from_fn`
pub async fn require_authentication(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    // the store handle is app_data, reachable from a ServiceRequest just like
    // from an extractor
    let store = req
        .app_data::<web::Data<dyn DocumentStore>>()
        .ok_or_else(|| error_500("document store not configured"))?
        .clone();

    let creds = match basic_authentication(req.headers()) {
        Ok(creds) => creds,
        Err(e) => return Err(deny(e)),
    };

    match validate_credentials(creds, store.get_ref()).await {
        Ok(user) => {
            req.extensions_mut().insert(AuthenticatedUser(user));
            // downstream handler runs exactly once, and only from here
            next.call(req).await
        }
        Err(e @ AuthError::UnexpectedError(_)) => Err(error_500(e)),
        Err(e) => Err(deny(e)),
    }
}

/// Map an `AuthError` to its 401 response, keeping the error context
/// available to the middleware chain via `InternalError`.
fn deny(e: AuthError) -> actix_web::Error {
    let message = match e {
        AuthError::MissingHeader
        | AuthError::MalformedScheme
        | AuthError::MalformedCredential(_) => "Authorization header missing or invalid",
        AuthError::UserNotFound => "User not found",
        AuthError::InvalidPassword => "Invalid password",
        // handled by the caller; kept exhaustive rather than wildcarded so a
        // new variant has to be placed deliberately
        AuthError::UnexpectedError(_) => "Internal server error",
    };
    let resp = HttpResponse::Unauthorized().json(serde_json::json!({ "message": message }));
    InternalError::from_response(e, resp).into()
}
