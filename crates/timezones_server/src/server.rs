//! Process bootstrap: logging, storage, listener and serve loop.

use crate::config::{ServerConfig, StorageConfig};
use crate::{create_router, AppState};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use timezones_core::db::{open_db, open_db_in_memory, DbError};
use timezones_core::init_logging;
use tokio::net::TcpListener;

/// Fatal startup or serve failure.
#[derive(Debug)]
pub enum ServerError {
    Logging(String),
    Db(DbError),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Db(err) => write!(f, "database setup failed: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Initializes logging, opens storage and serves until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(ServerError::Logging)?;

    let conn = match &config.storage {
        StorageConfig::File(path) => open_db(path)?,
        StorageConfig::Memory => open_db_in_memory()?,
    };
    let state = Arc::new(AppState::new(conn));
    let app = create_router(state, &config.cors_origins);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(
        "event=server_start module=server status=ok addr={} storage={} cors_origins={}",
        listener.local_addr()?,
        match config.storage {
            StorageConfig::File(_) => "file",
            StorageConfig::Memory => "memory",
        },
        config.cors_origins.len()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("event=shutdown_signal module=server status=error error={err}");
    }
}
