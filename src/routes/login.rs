use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use serde_json::json;

use crate::authentication::basic_authentication;
use crate::authentication::validate_credentials;
use crate::authentication::AuthError;
use crate::routes::error_chain_fmt;
use crate::store::DocumentStore;

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    AuthError(#[source] AuthError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for LoginError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)?;
        Ok(())
    }
}

impl ResponseError for LoginError {
    fn error_response(&self) -> HttpResponse {
        match self {
            // ONE message for every credential failure. Distinguishing
            // "unknown email" from "wrong password" here would hand out a
            // user-enumeration oracle on an endpoint that anyone can hit;
            // the gate on /users can afford its distinct messages because
            // reaching it already requires credentials worth probing with.
            Self::AuthError(_) => HttpResponse::build(StatusCode::UNAUTHORIZED)
                .json(json!({ "error": "Invalid email or password" })),
            Self::UnexpectedError(_) => HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                .json(json!({ "error": "Internal server error" })),
        }
    }
}

impl From<AuthError> for LoginError {
    fn from(e: AuthError) -> Self {
        match e {
            // store trouble is not a credential problem
            AuthError::UnexpectedError(inner) => Self::UnexpectedError(inner),
            e => Self::AuthError(e),
        }
    }
}

/// `POST /login`
///
/// The credential arrives in the same `Authorization: Basic` header shape the
/// gate consumes, but is evaluated inline: an unauthenticated request here is
/// the expected case, not an error. On success the response carries the
/// user's public fields only -- the stored password field never leaves the
/// handler.
///
/// # Request example
///
/// ```sh
///     curl -v -X POST -u 'a@b.com:12345678' http://127.0.0.1:8000/login
/// ```
#[tracing::instrument(
    name = "Logging in",
    skip(request, store),
    fields(login_email = tracing::field::Empty)
)]
pub async fn login(
    request: HttpRequest,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, LoginError> {
    let creds = basic_authentication(request.headers()).map_err(LoginError::from)?;

    tracing::Span::current().record("login_email", tracing::field::display(&creds.email));

    let user = validate_credentials(creds, store.get_ref()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "user": {
            "email": user.get("email"),
            "_id": user.get("_id"),
        },
    })))
}
