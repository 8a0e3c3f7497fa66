use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::domain::{AssetSnapshot, Symbol};
use crate::signal::SignalConfig;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Dashboard port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which mock data source backs `/api/snapshot`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Gaussian random walk from the configured base prices
    #[default]
    Random,
    /// The same readings on every request
    Fixed,
}

impl FeedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedMode::Random => "random",
            FeedMode::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub mode: FeedMode,
    /// Seed for the random walk; unseeded walks draw from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-symbol quote timeout in milliseconds
    #[serde(default = "default_quote_timeout_ms")]
    pub quote_timeout_ms: u64,
    /// Mean volume used by the simulator
    #[serde(default = "default_base_volume")]
    pub base_volume: u64,
    /// Standard deviation of the volume multiplier
    #[serde(default = "default_volume_dispersion")]
    pub volume_dispersion: f64,
    #[serde(default = "default_walk_assets")]
    pub assets: Vec<WalkAssetConfig>,
    /// Readings served when `mode = "fixed"`
    #[serde(default = "default_fixed_readings")]
    pub fixed: Vec<AssetSnapshot>,
}

fn default_quote_timeout_ms() -> u64 {
    250
}

fn default_base_volume() -> u64 {
    1_000_000
}

fn default_volume_dispersion() -> f64 {
    0.6
}

/// Random-walk parameters for one symbol
#[derive(Debug, Clone, Deserialize)]
pub struct WalkAssetConfig {
    pub symbol: Symbol,
    pub base_price: f64,
    /// Per-tick standard deviation of returns (0.001 = 0.1%)
    pub volatility: f64,
}

fn default_walk_assets() -> Vec<WalkAssetConfig> {
    [
        (Symbol::Gld, 190.0, 0.0007),
        (Symbol::Spy, 500.0, 0.0009),
        (Symbol::BtcUsd, 50_000.0, 0.0025),
        (Symbol::Tlt, 95.0, 0.0010),
    ]
    .into_iter()
    .map(|(symbol, base_price, volatility)| WalkAssetConfig {
        symbol,
        base_price,
        volatility,
    })
    .collect()
}

fn default_fixed_readings() -> Vec<AssetSnapshot> {
    vec![
        AssetSnapshot::new(Symbol::Gld, 189.62, -0.2, 1_050_000),
        AssetSnapshot::new(Symbol::Spy, 510.00, 2.0, 1_320_000),
        AssetSnapshot::new(Symbol::BtcUsd, 51_750.00, 3.5, 1_800_000),
        AssetSnapshot::new(Symbol::Tlt, 94.62, -0.4, 980_000),
    ]
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: FeedMode::default(),
            seed: None,
            quote_timeout_ms: default_quote_timeout_ms(),
            base_volume: default_base_volume(),
            volume_dispersion: default_volume_dispersion(),
            assets: default_walk_assets(),
            fixed: default_fixed_readings(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for daily-rolling log files; console only when unset
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("MACROPULSE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (MACROPULSE__SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("MACROPULSE")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Built-in defaults, used when no config directory is present
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            feed: FeedConfig::default(),
            signal: SignalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // Validate detector params
        let detector = &self.signal.detector;
        if !(detector.move_threshold_pct.is_finite() && detector.move_threshold_pct > 0.0) {
            errors.push("signal.detector.move_threshold_pct must be positive".to_string());
        }
        if detector.volume_baseline == 0 {
            errors.push("signal.detector.volume_baseline must be positive".to_string());
        }
        if !(detector.volume_spike_multiplier.is_finite() && detector.volume_spike_multiplier > 0.0)
        {
            errors.push("signal.detector.volume_spike_multiplier must be positive".to_string());
        }
        if self.signal.regime.min_confirming_moves > 3 {
            errors.push(
                "signal.regime.min_confirming_moves cannot exceed the 3 legs of a regime pattern"
                    .to_string(),
            );
        }

        // Validate feed params
        for symbol in Symbol::TRACKED {
            match self.feed.assets.iter().find(|a| a.symbol == symbol) {
                None => errors.push(format!("feed.assets is missing {symbol}")),
                Some(a) => {
                    if !(a.base_price.is_finite() && a.base_price > 0.0) {
                        errors.push(format!("feed.assets {symbol} base_price must be positive"));
                    }
                    if !(a.volatility.is_finite() && a.volatility > 0.0) {
                        errors.push(format!("feed.assets {symbol} volatility must be positive"));
                    }
                }
            }
        }
        if self.feed.base_volume == 0 {
            errors.push("feed.base_volume must be positive".to_string());
        }
        if self.feed.quote_timeout_ms == 0 {
            errors.push("feed.quote_timeout_ms must be positive".to_string());
        }
        if self.feed.mode == FeedMode::Fixed {
            for symbol in Symbol::TRACKED {
                if !self.feed.fixed.iter().any(|a| a.symbol == symbol) {
                    errors.push(format!("feed.fixed is missing {symbol}"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
