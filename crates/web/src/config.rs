use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_PORT_FALLBACK_ATTEMPTS: u32 = 5;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/flux";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_APPLICATIONS_SOURCE: &str = "test.applications.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub port_fallback_attempts: u32,
    pub database_url: String,
    pub database_max_connections: u32,
    pub applications_source: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parse_or = |key: &str, default: u32| -> Result<u32> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a non-negative number, got '{}'", key, raw)),
                None => Ok(default),
            }
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            port_fallback_attempts: parse_or(
                "PORT_FALLBACK_ATTEMPTS",
                DEFAULT_PORT_FALLBACK_ATTEMPTS,
            )?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            applications_source: lookup("APPLICATIONS_SOURCE")
                .unwrap_or_else(|| DEFAULT_APPLICATIONS_SOURCE.to_string()),
        })
    }
}
