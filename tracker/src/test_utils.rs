//! Shared fixtures for unit and endpoint tests.

use crate::config::{Config, CorsOrigin, DatabaseConfig, PoolSettings};
use crate::db::{
    handlers::{Habits, Repository},
    models::habits::{HabitCreateDBRequest, HabitDBResponse},
};
use axum_test::TestServer;
use sqlx::SqlitePool;

pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();

    crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application")
        .into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                ..Default::default()
            },
        },
        database_url: None,
        cors: crate::config::CorsConfig {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: None,
        },
        enable_metrics: false,
        enable_otel_export: false,
    }
}

/// Insert a habit with no description or time window
pub async fn create_test_habit(pool: &SqlitePool, name: &str) -> HabitDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");

    Habits::new(&mut conn)
        .create(&HabitCreateDBRequest {
            name: name.to_string(),
            description: None,
            start_at: None,
            end_at: None,
        })
        .await
        .expect("Failed to create test habit")
}

/// A WAL-mode pool over a fresh database file in `dir`, migrated like production.
pub async fn create_file_backed_pool(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("tracker.db").display()),
        pool: PoolSettings {
            max_connections,
            ..Default::default()
        },
    };

    crate::db::connect(&config).await.expect("Failed to open file-backed pool")
}
