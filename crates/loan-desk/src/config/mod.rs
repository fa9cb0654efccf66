use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const CIBIL_FLOOR: u16 = 300;
const CIBIL_CEILING: u16 = 900;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the loan desk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_targets = env::var("APP_LOG_TARGETS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let scoring = ScoringConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_targets,
            },
            scoring,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_targets: bool,
}

/// Simulated credit bureau settings.
///
/// The demo has no bureau integration, so scores are drawn uniformly from
/// `min_score..=max_score`. A fixed `seed` makes the sequence reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub seed: Option<u64>,
    pub min_score: u16,
    pub max_score: u16,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_score: 600,
            max_score: 899,
        }
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = match env::var("LOAN_SCORE_SEED") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidScoreSeed)?,
            ),
            Err(_) => None,
        };
        let min_score = read_score("LOAN_SCORE_MIN", defaults.min_score)?;
        let max_score = read_score("LOAN_SCORE_MAX", defaults.max_score)?;

        let config = Self {
            seed,
            min_score,
            max_score,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_score < CIBIL_FLOOR
            || self.max_score > CIBIL_CEILING
            || self.min_score > self.max_score
        {
            return Err(ConfigError::InvalidScoreRange {
                min: self.min_score,
                max: self.max_score,
            });
        }
        Ok(())
    }
}

fn read_score(var: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidScore { var }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScoreSeed,
    InvalidScore { var: &'static str },
    InvalidScoreRange { min: u16, max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScoreSeed => write!(f, "LOAN_SCORE_SEED must be a valid u64"),
            ConfigError::InvalidScore { var } => write!(f, "{var} must be a valid u16"),
            ConfigError::InvalidScoreRange { min, max } => write!(
                f,
                "simulated score range {min}..={max} must sit within {CIBIL_FLOOR}..={CIBIL_CEILING}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidScoreSeed
            | ConfigError::InvalidScore { .. }
            | ConfigError::InvalidScoreRange { .. } => None,
        }
    }
}
