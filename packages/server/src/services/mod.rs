//! Business logic behind the HTTP handlers.
//!
//! Services borrow a connection (a pool, a transaction, or a mock) and take
//! the acting user explicitly, so they can be driven without any transport.

pub mod blog;
pub mod user;

use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;

pub use blog::BlogService;
pub use user::UserService;

pub fn blog_service(db: &DatabaseConnection) -> BlogService<'_, DatabaseConnection> {
    BlogService::new(db)
}

pub fn user_service<'a>(
    db: &'a DatabaseConnection,
    auth: &'a AuthConfig,
) -> UserService<'a, DatabaseConnection> {
    UserService::new(db, auth)
}
