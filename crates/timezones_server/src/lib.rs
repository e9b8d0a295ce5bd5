//! HTTP transport for the time zone catalog.
//!
//! # Responsibility
//! - Expose list/get/create/update/delete under `/api/timezones`.
//! - Map service errors to status codes and plain-text messages.
//!
//! # Invariants
//! - One service operation runs per request while holding the connection
//!   lock, so existence checks and writes observe the same record.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use log::warn;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};
use timezones_core::db::{open_db_in_memory, DbResult};
use timezones_core::{ServiceResult, SqliteTimeZoneStore, TimeZoneService};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub use config::{Cli, ConfigError, ServerConfig, StorageConfig};
pub use error::ApiError;
pub use server::{run, ServerError};

/// State shared by every handler.
pub struct AppState {
    conn: Mutex<Connection>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wraps a connection already bootstrapped by `open_db`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// State over a fresh in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Runs one service operation against the shared connection.
    pub fn with_service<T>(
        &self,
        operation: impl FnOnce(&TimeZoneService<SqliteTimeZoneStore<'_>>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let service = TimeZoneService::new(SqliteTimeZoneStore::new(&conn));
        operation(&service)
    }
}

/// Builds the CORS layer; an empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins.iter().filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(
                        "event=cors_origin module=http status=skipped origin={}",
                        origin.escape_default()
                    );
                    None
                }
            }),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}

/// Builds the full application router.
pub fn create_router(state: SharedState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route(
            "/timezones",
            get(routes::list_time_zones).post(routes::create_time_zone),
        )
        .route(
            "/timezones/:id",
            get(routes::get_time_zone)
                .patch(routes::update_time_zone)
                .put(routes::update_time_zone)
                .delete(routes::delete_time_zone),
        );

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
