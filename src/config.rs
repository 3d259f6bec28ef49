use std::env;
use anyhow::{Context, Result};

const DEFAULT_DATABASE_PATH: &str = "./data.db";
const DEFAULT_SERVICE_PORT: &str = "8080";
const DEFAULT_SERVICE_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    ///
    /// Every variable is optional; unset ones fall back to the built-in defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup("DATABASE_PATH")
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| DEFAULT_SERVICE_PORT.to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| DEFAULT_SERVICE_HOST.to_string());

        Ok(Config {
            database_path,
            service_port,
            service_host,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database path: {}", self.database_path);
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}
