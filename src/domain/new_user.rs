use super::UserEmail;
use super::UserPassword;

/// A fully parsed signup request, ready to persist. `name` and `address` are
/// opaque pass-through strings: presence is enforced by deserialization, and
/// nothing else is checked.
pub struct NewUser {
    pub name: String,
    pub email: UserEmail,
    pub address: String,
    pub password: UserPassword,
}
