//! Shell configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/api/v1";

const APP_DIR: &str = "marketdesk";
const TOKEN_FILE: &str = "token";

/// Configuration for one shell process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Root of the marketplace REST API, without a trailing slash.
    pub base_url: String,
    /// File the bearer token is persisted to.
    pub token_path: PathBuf,
}

impl ShellConfig {
    /// Build shell config from environment variables.
    ///
    /// Optional:
    /// - `MARKETDESK_BASE_URL`: API root, default `http://localhost:9090/api/v1`
    /// - `MARKETDESK_TOKEN_PATH`: token file, default `<config dir>/marketdesk/token`
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("MARKETDESK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let token_path = std::env::var("MARKETDESK_TOKEN_PATH").map_or_else(|_| default_token_path(), PathBuf::from);
        Self { base_url: normalize_base_url(&base_url), token_path }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_owned()
}

/// Per-user token location; falls back to the temp dir on platforms
/// without a config directory.
fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(TOKEN_FILE)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
