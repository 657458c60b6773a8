use std::{env, net::SocketAddr, path::PathBuf};

use crate::services::qr::{DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE};

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

const DEFAULT_DATA_DIR: &str = "./eventify-data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File,
            other => {
                tracing::warn!("Unknown EVENTIFY_STORAGE '{}', using file storage", other);
                StorageBackend::File
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub bind_addr: SocketAddr,
    pub qr_service_url: String,
    pub qr_size: String,
    pub allowed_origins: String,
    pub production: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage: StorageBackend::File,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            qr_service_url: DEFAULT_QR_SERVICE_URL.to_string(),
            qr_size: DEFAULT_QR_SIZE.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            production: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid BIND_ADDR '{}': {}, using {}", raw, e, DEFAULT_BIND_ADDR);
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        Self {
            data_dir: lookup("EVENTIFY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage: lookup("EVENTIFY_STORAGE")
                .map(|v| StorageBackend::parse(&v))
                .unwrap_or(defaults.storage),
            bind_addr,
            qr_service_url: lookup("QR_SERVICE_URL").unwrap_or(defaults.qr_service_url),
            qr_size: lookup("QR_SIZE").unwrap_or(defaults.qr_size),
            allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.allowed_origins),
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        }
    }
}
