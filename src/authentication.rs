// any API can expect to encounter 3 types of clients, each with different modes
// of authentication:
//
// 1. another API (machine) -- request signing, mutual TLS, OAuth2, JWT
// 2. another API (human) -- OAuth2 (scoped)
// 3. browser (human) -- session-based authentication, identity federation
//
// this API serves a storefront that re-sends credentials on every request, so
// we stay with plain RFC 7617 Basic Auth: no sessions, no tokens, nothing to
// expire. every request re-authenticates from its Authorization header.

pub mod codec;
pub mod middleware;

use actix_web::http::header::HeaderMap;
use anyhow::Context;
use secrecy::ExposeSecret;
use secrecy::Secret;

use crate::store::DocumentStore;
use crate::store::USERS;

/// An (email, password) pair as extracted from the wire. The password is
/// wrapped in `Secret` so it cannot end up in a log line by accident.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Authorization header missing or empty")]
    MissingHeader,
    #[error("Authorization scheme was not 'Basic'")]
    MalformedScheme,
    #[error("Authorization payload was not a valid credential")]
    MalformedCredential(#[source] anyhow::Error),
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

/// Extract `Credentials` from an `Authorization: Basic <payload>` header.
///
/// - absent or empty header -> `MissingHeader`
/// - anything not starting with the literal `"Basic "` (case-sensitive,
///   single space; this includes non-UTF-8 header bytes) -> `MalformedScheme`
/// - payload that doesn't decode, or decodes without a `:` ->
///   `MalformedCredential`
///
/// The decoded payload is split at the FIRST colon only: `a@b.com:pa:ss`
/// yields the password `pa:ss`. `splitn` (rather than `split`) is
/// load-bearing here.
pub fn basic_authentication(headers: &HeaderMap) -> Result<Credentials, AuthError> {
    // spec: RFCs 2617, 7617

    let header = headers
        .get("Authorization")
        .ok_or(AuthError::MissingHeader)?;
    if header.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let encoded = header
        .to_str()
        .map_err(|_| AuthError::MalformedScheme)?
        .strip_prefix("Basic ")
        .ok_or(AuthError::MalformedScheme)?;

    let decoded = codec::decode(encoded)
        .context("Failed to decode the Basic-Auth payload")
        .map_err(AuthError::MalformedCredential)?;

    let mut creds = decoded.splitn(2, ':');

    let email = creds
        .next()
        .ok_or_else(|| AuthError::MalformedCredential(anyhow::anyhow!("No email")))?
        .to_string();

    let password = creds
        .next()
        .ok_or_else(|| AuthError::MalformedCredential(anyhow::anyhow!("No password")))?
        .to_string();
    let password = Secret::new(password);

    Ok(Credentials { email, password })
}

/// Validate supplied credentials against the `users` collection, returning
/// the full user document on success.
///
/// Lookup is an exact, case-sensitive match on `email`. The stored password
/// is run back through the codec and compared with plain `==`; there is no
/// constant-time comparison and an unknown email returns early, so response
/// timing does distinguish the two 401 causes. The storefront's error
/// handling depends on the distinction anyway (see the middleware), so the
/// timing channel reveals nothing the body doesn't.
#[tracing::instrument(name = "Validating credentials", skip(creds, store))]
pub async fn validate_credentials(
    creds: Credentials,
    store: &dyn DocumentStore,
) -> Result<serde_json::Value, AuthError> {
    let user = store
        .find_one(USERS, &serde_json::json!({ "email": creds.email }))
        .await
        .context("Failed to query the users collection")?
        .ok_or(AuthError::UserNotFound)?;

    // a user document without a decodable password field is corrupt, not
    // unauthenticated; let it surface as a 500
    let stored = user
        .get("password")
        .and_then(|p| p.as_str())
        .context("Stored user document has no password field")?;
    let stored = codec::decode(stored).context("Stored password is not a valid encoding")?;

    if stored != *creds.password.expose_secret() {
        return Err(AuthError::InvalidPassword);
    }

    Ok(user)
}
