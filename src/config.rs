use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ClinicError;

/// Application-level constants
pub const APP_NAME: &str = "Polyclinic";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Location recorded when a visit is submitted without one.
pub const DEFAULT_VISIT_LOCATION: &str = "Consultation";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DATABASE_FILE_NAME: &str = "medical.db";

pub const DB_PATH_ENV: &str = "POLYCLINIC_DB";
pub const BIND_ADDR_ENV: &str = "POLYCLINIC_ADDR";

/// Get the application data directory: ~/Polyclinic/ (cwd if no home is known)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default database location under the data directory
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE_NAME)
}

/// Filter used when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    "info,polyclinic_lib=debug"
}

/// Runtime configuration resolved once at startup and passed into the server.
#[derive(Debug, Clone)]
pub struct ClinicConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ClinicConfig {
    pub fn from_env() -> Result<Self, ClinicError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClinicError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_path = get(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(database_path);

        let raw_addr = get(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse::<SocketAddr>().map_err(|e| {
            ClinicError::InvalidInput(format!("{BIND_ADDR_ENV}={raw_addr}: {e}"))
        })?;

        Ok(Self {
            database_path,
            bind_addr,
        })
    }
}
