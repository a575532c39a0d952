use secrecy::ExposeSecret;
use secrecy::Secret;

/// A signup password: at least 8 characters, no upper bound, no character
/// classes. Wrapped in `Secret` end to end; the only way the plaintext leaves
/// this type is `expose_secret`, at the single point where it is encoded for
/// storage.
///
/// Must be instantiated with `UserPassword::parse`.
#[derive(Debug)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(password: Secret<String>) -> Result<Self, String> {
        // `len` counts bytes, not graphemes; multi-byte characters clear the
        // bar faster, which matches what the storefront's own check does
        match password.expose_secret().len() >= 8 {
            true => Ok(Self(password)),
            false => Err("Password must be at least 8 characters long".to_string()),
        }
    }

    pub fn expose_secret(&self) -> &str { self.0.expose_secret() }
}
