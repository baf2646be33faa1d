use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: EsploraConfig,
    pub pricing: PricingConfig,
    pub database: DatabaseConfig,
    pub scanner: ScannerConfig,
    pub notify: NotifyConfig,
}

/// Esplora (Blockstream-compatible) REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsploraConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
    pub concurrent_requests: usize,
    /// Capacity of the recently-seen txid window
    pub seen_capacity: usize,
    /// How long a txid stays in the recently-seen window
    pub seen_ttl_seconds: u64,
}

impl Default for EsploraConfig {
    fn default() -> Self {
        Self {
            base_url: "https://blockstream.info/api".to_string(),
            timeout_seconds: 10,
            max_retries: 3,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
            concurrent_requests: 4,
            seen_capacity: 10_000,
            seen_ttl_seconds: 3_600,
        }
    }
}

/// BTC→XMR rate lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub url: String,
    pub cache_seconds: u64,
    /// Decimal string used when the price source is unreachable
    pub fallback_rate: String,
    pub timeout_seconds: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            url: "https://api.coingecko.com/api/v3/simple/price?ids=monero&vs_currencies=btc"
                .to_string(),
            cache_seconds: 300,
            fallback_rate: "157.0".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub poll_interval_seconds: u64,
    pub batch_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub dry_run: bool,
    pub webhook_targets: Vec<String>,
    pub explorer_url: String,
    pub title: String,
    pub x: XConfig,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            dry_run: true,
            webhook_targets: Vec::new(),
            explorer_url: "https://mempool.space/tx/".to_string(),
            title: "Atomic Swap Detected".to_string(),
            x: XConfig::default(),
        }
    }
}

/// X (Twitter) API v2 user-context credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct XConfig {
    pub api_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Default for XConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.twitter.com".to_string(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            access_token: String::new(),
            access_token_secret: String::new(),
        }
    }
}

impl std::fmt::Debug for XConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XConfig")
            .field("api_url", &self.api_url)
            .field("missing", &self.missing_credentials())
            .finish_non_exhaustive()
    }
}

impl XConfig {
    /// Environment variable names of blank credentials
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("X_CONSUMER_KEY", &self.consumer_key),
            ("X_CONSUMER_SECRET", &self.consumer_secret),
            ("X_ACCESS_TOKEN", &self.access_token),
            ("X_ACCESS_TOKEN_SECRET", &self.access_token_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: EsploraConfig::default(),
            pricing: PricingConfig::default(),
            database: DatabaseConfig {
                path: PathBuf::from("bot.db"),
            },
            scanner: ScannerConfig {
                poll_interval_seconds: 30,
                batch_limit: 50,
            },
            notify: NotifyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            // Esplora defaults
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_seconds", defaults.api.timeout_seconds)?
            .set_default("api.max_retries", defaults.api.max_retries as i64)?
            .set_default("api.initial_backoff_ms", defaults.api.initial_backoff_ms)?
            .set_default("api.backoff_multiplier", defaults.api.backoff_multiplier)?
            .set_default("api.max_backoff_seconds", defaults.api.max_backoff_seconds)?
            .set_default(
                "api.concurrent_requests",
                defaults.api.concurrent_requests as i64,
            )?
            .set_default("api.seen_capacity", defaults.api.seen_capacity as i64)?
            .set_default("api.seen_ttl_seconds", defaults.api.seen_ttl_seconds)?
            // Pricing defaults
            .set_default("pricing.url", defaults.pricing.url)?
            .set_default("pricing.cache_seconds", defaults.pricing.cache_seconds)?
            .set_default("pricing.fallback_rate", defaults.pricing.fallback_rate)?
            .set_default("pricing.timeout_seconds", defaults.pricing.timeout_seconds)?
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().to_string(),
            )?
            .set_default(
                "scanner.poll_interval_seconds",
                defaults.scanner.poll_interval_seconds,
            )?
            .set_default("scanner.batch_limit", defaults.scanner.batch_limit as i64)?
            .set_default("notify.dry_run", defaults.notify.dry_run)?
            .set_default("notify.webhook_targets", Vec::<String>::new())?
            .set_default("notify.explorer_url", defaults.notify.explorer_url)?
            .set_default("notify.title", defaults.notify.title)?
            .set_default("notify.x.api_url", defaults.notify.x.api_url)?
            .set_default("notify.x.consumer_key", "")?
            .set_default("notify.x.consumer_secret", "")?
            .set_default("notify.x.access_token", "")?
            .set_default("notify.x.access_token_secret", "")?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // SWAPWATCH_API__BASE_URL, SWAPWATCH_NOTIFY__DRY_RUN, ...
            .add_source(
                config::Environment::with_prefix("SWAPWATCH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Bare DRY_RUN: anything other than "true" switches to live mode
        if let Ok(dry_run) = env::var("DRY_RUN") {
            app_config.notify.dry_run = dry_run.trim().eq_ignore_ascii_case("true");
        }

        if let Ok(targets) = env::var("WEBHOOK_TARGETS") {
            app_config.notify.webhook_targets = parse_targets(&targets);
        }
        validate_targets(&app_config.notify.webhook_targets)?;

        let x = &mut app_config.notify.x;
        for (name, slot) in [
            ("X_CONSUMER_KEY", &mut x.consumer_key),
            ("X_CONSUMER_SECRET", &mut x.consumer_secret),
            ("X_ACCESS_TOKEN", &mut x.access_token),
            ("X_ACCESS_TOKEN_SECRET", &mut x.access_token_secret),
        ] {
            if let Ok(value) = env::var(name) {
                *slot = value.trim().to_string();
            }
        }

        if app_config.scanner.batch_limit == 0 {
            return Err(ConfigError::Message(
                "scanner.batch_limit must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Try to load config for defaults, but don't fail if not found
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Split a comma-separated target list, dropping blanks
pub fn parse_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Webhook targets are POSTed to, so only http(s) URLs are usable
pub fn validate_targets(targets: &[String]) -> Result<(), ConfigError> {
    let unsupported: Vec<&str> = targets
        .iter()
        .map(String::as_str)
        .filter(|t| !(t.starts_with("https://") || t.starts_with("http://")))
        .collect();

    if unsupported.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Message(format!(
            "webhook targets must be http(s) URLs: {}",
            unsupported.join(", ")
        )))
    }
}
