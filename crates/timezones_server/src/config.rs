//! Command-line and environment configuration.

use axum::http::HeaderValue;
use clap::Parser;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use timezones_core::default_log_level;

/// Serves the time zone catalog over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "timezones-server", version)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "TIMEZONES_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "TIMEZONES_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file, created when missing
    #[arg(long, env = "TIMEZONES_DB_PATH", default_value = "timezones.sqlite3")]
    pub db_path: PathBuf,

    /// Keep records in a private in-memory database instead of `--db-path`
    #[arg(long, env = "TIMEZONES_IN_MEMORY")]
    pub in_memory: bool,

    /// trace | debug | info | warn | error (defaults by build mode)
    #[arg(long, env = "TIMEZONES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset
    #[arg(long, env = "TIMEZONES_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Comma separated allowed CORS origins; any origin when empty
    #[arg(long, env = "TIMEZONES_CORS_ORIGINS", default_value = "")]
    pub cors_origins: String,
}

/// Where records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    File(PathBuf),
    Memory,
}

/// Flag values that parse but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidCorsOrigin(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCorsOrigin(origin) => {
                write!(f, "invalid CORS origin `{}`", origin.escape_default())
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let cors_origins = cli
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| match HeaderValue::from_str(origin) {
                Ok(_) => Ok(origin.to_string()),
                Err(_) => Err(ConfigError::InvalidCorsOrigin(origin.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let storage = if cli.in_memory {
            StorageConfig::Memory
        } else {
            StorageConfig::File(cli.db_path)
        };

        Ok(Self {
            host: cli.host,
            port: cli.port,
            storage,
            log_level: cli
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: cli.log_dir.filter(|dir| !dir.trim().is_empty()),
            cors_origins,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, ConfigError, ServerConfig, StorageConfig};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> ServerConfig {
        let argv = std::iter::once("timezones-server").chain(args.iter().copied());
        ServerConfig::from_cli(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn explicit_flags_are_applied() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--db-path",
            "/tmp/zones.sqlite3",
            "--log-level",
            "warn",
            "--cors-origins",
            "http://localhost:5173, http://127.0.0.1:5173,,",
        ]);

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(
            config.storage,
            StorageConfig::File(PathBuf::from("/tmp/zones.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.cors_origins,
            ["http://localhost:5173", "http://127.0.0.1:5173"]
        );
    }

    #[test]
    fn in_memory_flag_overrides_db_path() {
        let config = parse(&["--in-memory", "--db-path", "ignored.sqlite3"]);
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn blank_log_dir_means_stderr() {
        let config = parse(&["--log-dir", "  "]);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unusable_cors_origin_is_rejected() {
        let cli = Cli::try_parse_from([
            "timezones-server",
            "--cors-origins",
            "http://localhost:5173,http://bad\u{1}.example",
        ])
        .unwrap();

        assert_eq!(
            ServerConfig::from_cli(cli),
            Err(ConfigError::InvalidCorsOrigin(
                "http://bad\u{1}.example".to_string()
            ))
        );
    }
}
