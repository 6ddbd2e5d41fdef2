//! Configuration module for the Crime Connect backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Whether the database path was supplied through the environment
    pub db_path_from_env: bool,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path_env = env::var("CRIMECONNECT_DB_PATH").ok();
        let db_path_from_env = db_path_env.is_some();
        let db_path = db_path_env
            .unwrap_or_else(|| "./data/crimeconnect.sqlite".to_string())
            .into();

        let bind_addr = env::var("CRIMECONNECT_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CRIMECONNECT_BIND_ADDR format");

        let log_level = env::var("CRIMECONNECT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            db_path_from_env,
            bind_addr,
            log_level,
        }
    }
}
