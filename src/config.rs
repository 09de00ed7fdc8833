//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::SecretString;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_JOBS_FILE: &str = "jobs.json";
    pub const SHEET_NAME: &str = "Jobs";
    pub const SERVICE_ACCOUNT_FILE: &str = "service_account.json";
    pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Google Sheets sync configuration.
#[derive(Debug, Clone)]
pub struct SheetSettings {
    /// Spreadsheet ID (sync is disabled when unset)
    pub sheet_id: Option<String>,
    /// Worksheet (tab) name holding the job rows
    pub sheet_name: String,
    /// Path to the service-account JSON key
    pub service_account_file: PathBuf,
    /// Pre-issued bearer token, takes precedence over the service account
    pub access_token: Option<SecretString>,
    /// Base URL of the Sheets REST API
    pub api_base_url: String,
}

impl SheetSettings {
    /// Settings with no spreadsheet configured; sync stays unavailable.
    pub fn disabled() -> Self {
        SheetSettings {
            sheet_id: None,
            sheet_name: defaults::SHEET_NAME.to_string(),
            service_account_file: PathBuf::from(defaults::SERVICE_ACCOUNT_FILE),
            access_token: None,
            api_base_url: defaults::SHEETS_API_URL.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Local JSON file holding every saved job
    pub jobs_file: PathBuf,
    /// Google Sheets sync configuration
    pub sheets: SheetSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) every variable has a
    /// default. In production mode the jobs file must be set explicitly.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `FT_HOST`: Server host (default: 127.0.0.1)
    /// - `FT_PORT`: Server port (default: 8080)
    /// - `FT_JOBS_FILE`: Local job file (default: jobs.json)
    /// - `FT_SHEET_ID`: Spreadsheet ID (sync disabled when unset)
    /// - `FT_SHEET_NAME`: Worksheet name (default: Jobs)
    /// - `FT_SERVICE_ACCOUNT_FILE`: Service-account key (default: service_account.json)
    /// - `FT_SHEETS_ACCESS_TOKEN`: Static bearer token (optional)
    /// - `FT_SHEETS_API_URL`: Sheets API base URL
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Like [`Config::from_env`], but an unset `RUST_ENV` falls back to
    /// `default` instead of failing. Used by the terminal form.
    pub fn from_env_or(default: Environment) -> Result<Self, ConfigError> {
        Self::load(Some(default))
    }

    fn load(default_environment: Option<Environment>) -> Result<Self, ConfigError> {
        let environment =
            resolve_environment(env::var("RUST_ENV").ok().as_deref(), default_environment)?;

        let host = env::var("FT_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("FT_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("FT_PORT must be a valid port number"))?;

        let jobs_file = PathBuf::from(
            env::var("FT_JOBS_FILE").unwrap_or_else(|_| defaults::DEV_JOBS_FILE.to_string()),
        );

        let sheets = SheetSettings {
            sheet_id: env::var("FT_SHEET_ID")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sheet_name: env::var("FT_SHEET_NAME")
                .unwrap_or_else(|_| defaults::SHEET_NAME.to_string()),
            service_account_file: PathBuf::from(
                env::var("FT_SERVICE_ACCOUNT_FILE")
                    .unwrap_or_else(|_| defaults::SERVICE_ACCOUNT_FILE.to_string()),
            ),
            access_token: env::var("FT_SHEETS_ACCESS_TOKEN")
                .ok()
                .filter(|s| !s.is_empty())
                .map(SecretString::from),
            api_base_url: env::var("FT_SHEETS_API_URL")
                .unwrap_or_else(|_| defaults::SHEETS_API_URL.to_string()),
        };

        let config = Config {
            environment,
            host,
            port,
            jobs_file,
            sheets,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.jobs_file == PathBuf::from(defaults::DEV_JOBS_FILE) {
            errors.push(format!(
                "FT_JOBS_FILE is using development default '{}'. Set an absolute path.",
                defaults::DEV_JOBS_FILE
            ));
        }

        if self.sheets.sheet_name.trim().is_empty() {
            errors.push("FT_SHEET_NAME must not be empty.".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Pick the environment from a `RUST_ENV` value, using `default` when unset.
fn resolve_environment(
    raw: Option<&str>,
    default: Option<Environment>,
) -> Result<Environment, ConfigError> {
    match (raw, default) {
        (Some(value), _) => Environment::parse(value).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        )),
        (None, Some(environment)) => Ok(environment),
        (None, None) => Err(ConfigError::MissingEnvVar("RUST_ENV")),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
