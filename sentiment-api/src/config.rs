//! Configuration module

use std::env;
use std::path::PathBuf;

use sentiment_core::constants;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model artifact file
    pub model_path: PathBuf,

    /// Prediction log directory
    pub log_dir: PathBuf,

    /// CORS origins; `*` allows any
    pub allowed_origins: Vec<String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: PathBuf::from(constants::get_model_path()),

            log_dir: PathBuf::from(constants::get_log_dir()),

            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            allowed_origins: vec!["*".to_string()],
            environment: "development".to_string(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
