mod new_user;
mod user_email;
mod user_password;
// allow external `use` statements to skip `new_user` etc
pub use new_user::NewUser;
pub use user_email::UserEmail;
pub use user_password::UserPassword;
