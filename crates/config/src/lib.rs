use dotenv::dotenv;
use dotenv::from_path;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SESSION_PATH: &str = ".listr-session.json";
pub const DEFAULT_LOG_FILTER: &str = "warn,listr=info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set (backend endpoint and public API key are required)")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("Failed to load .env file from path {path}: {reason}")]
    EnvFile { path: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: Url,
    pub supabase_anon_key: String,
    pub session_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            from_path(path).map_err(|e| ConfigError::EnvFile {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        } else {
            dotenv().ok();
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let raw_url = read("SUPABASE_URL")
            .or_else(|| read("VITE_SUPABASE_URL"))
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::InvalidUrl {
            name: "SUPABASE_URL",
            reason: e.to_string(),
        })?;

        let supabase_anon_key = read("SUPABASE_ANON_KEY")
            .or_else(|| read("VITE_SUPABASE_ANON_KEY"))
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?
            .trim()
            .to_string();

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            session_path: read("LISTR_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH)),
            log_filter: read("LISTR_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Endpoint without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> String {
        self.supabase_url.as_str().trim_end_matches('/').to_string()
    }
}
