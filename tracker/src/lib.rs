//! # tracker: Habit Tracking Backend
//!
//! `tracker` is the REST backend for a habit-tracking client. Users define habits (a name, an
//! optional description and an optional start/end window) and then mark them done or not done
//! either per calendar date (the weekly view) or per year, month and day (the monthly view).
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses SQLite through [sqlx](https://github.com/launchbadge/sqlx) for persistence. A request
//! flows handler → service → repository:
//!
//! - [`api`]: route handlers and the camelCase wire models
//! - [`services`]: [`services::HabitService`], [`services::WeeklyService`] and
//!   [`services::MonthlyService`], each built from the connection pool
//! - [`db`]: repositories over a borrowed `SqliteConnection`, plus the database records
//!
//! Completion records are unique per (habit, date) or (habit, year, month, day) in the schema
//! and written with a single upsert, so repeated or concurrent toggles converge on one row.
//! Deleting a habit cascades to its records.
//!
//! ## Endpoints
//!
//! - `/api/tracker/habit`, `/api/tracker/weekly`, `/api/tracker/monthly`: the tracker API
//! - `/healthz`: liveness
//! - `/api-docs/openapi.json` and `/docs`: OpenAPI document and reference UI
//! - `/internal/metrics`: Prometheus metrics when `enable_metrics` is set
//!
//! ## Getting Started
//!
//! ```no_run
//! use tracker::{Application, Config};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let app = Application::new(config).await?;
//! app.serve(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//! # Ok(())
//! # }
//! ```
//!
//! See [`config`] for the configuration file format and environment overrides.

pub mod api;
pub mod config;
pub mod db;
mod errors;
mod openapi;
pub mod services;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use crate::services::{HabitService, MonthlyService, WeeklyService};
use axum::http::HeaderValue;
use axum::{Json, Router, http, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use errors::{Error, Result};
pub use types::{HabitKey, TrackKey};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let habits = HabitService::new(pool.clone());
/// let state = AppState::builder()
///     .db(pool.clone())
///     .config(config)
///     .weekly(WeeklyService::new(pool.clone(), habits.clone()))
///     .monthly(MonthlyService::new(pool, habits.clone()))
///     .habits(habits)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub habits: HabitService,
    pub weekly: WeeklyService,
    pub monthly: MonthlyService,
}

impl AppState {
    /// Wire every service onto the same pool.
    pub fn from_pool(db: SqlitePool, config: Config) -> Self {
        let habits = HabitService::new(db.clone());

        Self::builder()
            .weekly(WeeklyService::new(db.clone(), habits.clone()))
            .monthly(MonthlyService::new(db.clone(), habits.clone()))
            .habits(habits)
            .db(db)
            .config(config)
            .build()
    }
}

/// Get the tracker database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let allow_origin = if config.cors.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Browsers send the origin without a trailing slash
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(config.cors.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: the tracker API under `/api/tracker`, health and docs
/// routes, CORS, optional Prometheus metrics and request tracing.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use api::handlers::{habits, monthly, weekly};

    let api_routes = Router::new()
        .route("/habit", get(habits::list_habits).post(habits::create_habit))
        .route(
            "/habit/{habit_key}",
            get(habits::get_habit).put(habits::update_habit).delete(habits::delete_habit),
        )
        .route("/weekly", get(weekly::list_weekly_habits))
        .route("/weekly/{habit_key}", get(weekly::get_done_days).post(weekly::toggle_weekly))
        .route("/monthly", get(monthly::list_monthly_habits))
        .route("/monthly/{habit_key}", get(monthly::get_month_data).post(monthly::toggle_monthly));

    let cors_layer = create_cors_layer(&state.config)?;
    let enable_metrics = state.config.enable_metrics;

    let mut router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/tracker", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors_layer);

    if enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// A configured server: database open and migrated, router built.
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Open the configured database and build the router
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Like [`Application::new`], but reuse `pool` when given (it is still migrated).
    pub async fn new_with_pool(config: Config, pool: Option<SqlitePool>) -> anyhow::Result<Self> {
        debug!("Starting tracker with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => {
                migrator().run(&pool).await?;
                pool
            }
            None => db::connect(&config.database).await?,
        };

        let router = build_router(AppState::from_pool(pool.clone(), config.clone()))?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Tracker listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
