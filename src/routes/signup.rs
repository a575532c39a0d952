use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use anyhow::Context;
use chrono::Utc;
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::codec;
use crate::domain::NewUser;
use crate::domain::UserEmail;
use crate::domain::UserPassword;
use crate::routes::error_chain_fmt;
use crate::store::DocumentStore;
use crate::store::USERS;

/// Signup request body. All five fields are required; serde answers 400 for
/// anything missing or mis-typed before the handler runs.
#[derive(Deserialize)]
pub struct SignupData {
    name: String,
    email: String,
    address: String,
    password: Secret<String>,
    #[serde(rename = "confirmPassword")]
    confirm_password: Secret<String>,
}

#[derive(thiserror::Error)]
pub enum SignupError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for SignupError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)?;
        Ok(())
    }
}

impl ResponseError for SignupError {
    fn error_response(&self) -> HttpResponse {
        let (status, error) = match self {
            // the one failure the storefront treats specially: a conflict,
            // not a generic error
            Self::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
            // validation failures keep the 500-with-`error`-body shape the
            // storefront already parses and displays
            Self::InvalidEmail | Self::PasswordTooShort | Self::PasswordMismatch => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            // internal detail goes to the logs (via Debug above), not to the
            // client
            Self::UnexpectedError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        HttpResponse::build(status).json(serde_json::json!({ "error": error }))
    }
}

// validation order is observable through which message a multi-fault request
// gets back, so it is pinned here: email shape, then password length, then
// confirmation match
impl TryFrom<SignupData> for NewUser {
    type Error = SignupError;
    fn try_from(value: SignupData) -> Result<Self, Self::Error> {
        use secrecy::ExposeSecret;

        let email = UserEmail::parse(value.email).map_err(|_| SignupError::InvalidEmail)?;
        let password =
            UserPassword::parse(value.password).map_err(|_| SignupError::PasswordTooShort)?;
        if password.expose_secret() != value.confirm_password.expose_secret().as_str() {
            return Err(SignupError::PasswordMismatch);
        }

        Ok(NewUser {
            name: value.name,
            email,
            address: value.address,
            password,
        })
    }
}

/// `POST /signup`
///
/// Parse the body into a `NewUser`, reject an already-registered email with
/// 409, then persist `{name, email, address, password, createdAt}` with the
/// password run through the credential codec. Answers
/// `201 {"message": "User created", "user_id": <id>}`.
///
/// The existence check and the insert are two separate store calls with
/// nothing held in between; two concurrent signups for the same email can
/// both pass the check. Known gap, accepted -- the store interface has no
/// uniqueness primitive to lean on.
#[tracing::instrument(
    name = "Signing up a new user",
    skip(body, store),
    fields(signup_email = %body.email)
)]
pub async fn signup(
    body: web::Json<SignupData>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, SignupError> {
    let new_user: NewUser = body.into_inner().try_into()?;

    let existing = store
        .find_one(
            USERS,
            &serde_json::json!({ "email": new_user.email.as_ref() }),
        )
        .await
        .context("Failed to check for an existing user")?;
    if existing.is_some() {
        return Err(SignupError::DuplicateEmail);
    }

    let user_id = store
        .insert_one(
            USERS,
            serde_json::json!({
                "name": new_user.name,
                "email": new_user.email.as_ref(),
                "address": new_user.address,
                "password": codec::encode(new_user.password.expose_secret()),
                "createdAt": Utc::now().to_rfc3339(),
            }),
        )
        .await
        .context("Failed to insert the new user")?;

    tracing::info!("new user persisted");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "User created",
        "user_id": user_id,
    })))
}
