use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared by every request: the connection pool and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self { db, config }
    }
}
