//! Process configuration read from the environment.

use std::path::Path;

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub password_min_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            database_url: "sqlite:pokerledger.db".into(),
            password_min_length: 5,
        }
    }
}

impl AppConfig {
    /// Load `.env` overrides from the repo root, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv_from_repo_root();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(value) => parse_number("SERVER_PORT", value)?,
            None => defaults.server_port,
        };
        let password_min_length = match var("PASSWORD_MIN_LENGTH") {
            Some(value) => parse_number("PASSWORD_MIN_LENGTH", value)?,
            None => defaults.password_min_length,
        };

        Ok(Self {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            password_min_length,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
