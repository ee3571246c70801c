use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Comma-separated CORS origin allow-list. Empty means any origin is
    /// accepted, which is only appropriate on a closed network.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: optional("DATABASE_URL", "sqlite://sensor_data.db?mode=rwc"),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "8000")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            cors_allowed_origins: parse_origins(&optional("CORS_ALLOWED_ORIGINS", "")),
        })
    }
}

/// Parse `"https://a.example,https://b.example"` into a list of origins,
/// dropping empty entries and surrounding whitespace.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
