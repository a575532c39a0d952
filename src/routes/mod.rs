mod banking;
mod catalog;
mod health_check;
mod login;
mod orders;
mod signup;
mod users;

pub use banking::save_banking_details;
pub use catalog::catalog_categories_pattern;
pub use catalog::create_product;
pub use catalog::delete_product;
pub use catalog::list_products;
pub use catalog::update_product;
pub use health_check::health_check;
pub use login::login;
pub use orders::list_orders;
pub use orders::save_order;
pub use signup::signup;
pub use users::delete_user;
pub use users::list_users;
pub use users::update_user;

/// Chain of `source`s, from the error itself to the root cause. Used to
/// implement `Debug` on route error enums, so a 500 in the logs shows the
/// whole story and not just the outermost message.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}
