use base64::engine::general_purpose;
use base64::Engine;

// The codec is shared by the two places a credential exists: the Basic-Auth
// payload in transit, and the `password` field of a stored user document.
// Storage uses the same reversible encoding -- NOT a one-way hash -- because
// the verifier decodes the stored value and compares plaintexts. This is the
// deployed contract; existing user records are encoded this way, so swapping
// in a password hash here would lock every existing account out.
//
// spec: RFC 4648 (standard alphabet, with padding)

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("input is not valid base64")]
    NotBase64(#[from] base64::DecodeError),
    #[error("decoded bytes are not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Encode a plaintext credential. Infallible; `decode(encode(x)) == x` for
/// all `x`.
pub fn encode(plaintext: &str) -> String {
    general_purpose::STANDARD.encode(plaintext.as_bytes())
}

/// Decode a credential token produced by `encode`. Fails on anything that is
/// not a valid encoding; never panics.
pub fn decode(token: &str) -> Result<String, DecodeError> {
    let bytes = general_purpose::STANDARD.decode(token)?;
    Ok(String::from_utf8(bytes)?)
}
