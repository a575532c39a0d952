/// A signup email. The only rule is the one the storefront relies on: the
/// string must contain an `@`. Deliberately NOT full RFC 5321 validation --
/// the email is an opaque lookup key, and tightening the rule would strand
/// addresses that already exist in the users collection.
///
/// Must be instantiated with `UserEmail::parse`; the field is left private to
/// prevent bypassing of `parse`, and mutation of the value.
#[derive(Debug)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        match email.contains('@') {
            true => Ok(Self(email)),
            false => Err(format!("Invalid email: {email:?}")),
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
