//! # Terminal Configuration
//!
//! Configuration for the `checkout` binary and price table loading.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --prices ./prices.json                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CHECKOUT_PRICES=./prices.toml                                      │
//! │     CHECKOUT_LOG=debug                                                 │
//! │     CHECKOUT_TERMINAL_NAME="Lane 3"                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │     ~/Library/Application Support/com.checkout.terminal/... (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     demo price table, "warn,checkout=info" log filter                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [terminal]
//! name = "Lane 3"
//! log_filter = "info"
//!
//! [pricing]
//! # Either point at a file ...
//! path = "prices.json"
//! strict = true
//!
//! # ... or list items inline
//! [pricing.items.A]
//! unitPriceCents = 200
//! bulkQuantity = 4
//! bulkPriceCents = 700
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use checkout_core::validation::{validate_item_id, validate_price_entry};
use checkout_core::{CoreError, PriceTable};

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "checkout.toml";

/// Log filter used until (and unless) the config sets another.
pub const DEFAULT_LOG_FILTER: &str = "warn,checkout=info";

// =============================================================================
// Terminal Settings
// =============================================================================

/// Settings for the terminal itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    /// Name printed on receipts.
    #[serde(default = "default_terminal_name")]
    pub name: String,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_terminal_name() -> String {
    "Checkout".to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            name: default_terminal_name(),
            log_filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Where the price table comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Price table file (`.json`, anything else is read as TOML).
    /// Relative paths resolve against the working directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Reject tables with invalid entries instead of loading them as is.
    #[serde(default)]
    pub strict: bool,

    /// Inline price table, used when no `path` is set.
    #[serde(default)]
    pub items: PriceTable,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub terminal: TerminalSettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, or the platform default if present)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a
    /// missing default config file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        for notice in config.notices() {
            warn!("{}", notice);
        }

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading terminal config from file");
        let contents = read_file(path)?;
        Self::from_toml(&contents).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parses config from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.terminal.name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "terminal.name must not be empty".into(),
            ));
        }

        if self.terminal.log_filter.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "terminal.log_filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Settings that are valid but probably not what was meant.
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();

        if self.pricing.path.is_some() && !self.pricing.items.is_empty() {
            notices.push(format!(
                "Both pricing.path and pricing.items are set; inline items are ignored (count: {})",
                self.pricing.items.len()
            ));
        }

        notices
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CHECKOUT_PRICES") {
            debug!(path = %path, "Overriding price table path from environment");
            self.pricing.path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("CHECKOUT_LOG") {
            self.terminal.log_filter = filter;
        }

        if let Some(name) = lookup("CHECKOUT_TERMINAL_NAME") {
            self.terminal.name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "terminal")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the price table to use.
    ///
    /// ## Resolution Order
    /// 1. `prices_override` (the `--prices` flag)
    /// 2. `pricing.path`
    /// 3. `pricing.items` when non-empty
    ///
    /// Returns `None` when nothing is configured.
    pub fn price_table(&self, prices_override: Option<&Path>) -> AppResult<Option<PriceTable>> {
        let table = match prices_override.or(self.pricing.path.as_deref()) {
            Some(path) => load_price_table(path)?,
            None if !self.pricing.items.is_empty() => self.pricing.items.clone(),
            None => return Ok(None),
        };

        if self.pricing.strict {
            check_strict(&table)?;
        }

        Ok(Some(table))
    }
}

// =============================================================================
// Price Table Files
// =============================================================================

/// Loads a price table from a JSON (`.json`) or TOML file.
pub fn load_price_table(path: &Path) -> AppResult<PriceTable> {
    let contents = read_file(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str::<PriceTable>(&contents).map_err(|e| e.to_string())
    } else {
        toml::from_str::<PriceTable>(&contents).map_err(|e| e.to_string())
    };

    let table = parsed.map_err(|reason| AppError::PriceTableParse {
        path: path.to_path_buf(),
        reason,
    })?;

    info!(?path, entries = table.len(), "Price table loaded");
    Ok(table)
}

/// Fails on the first invalid entry.
fn check_strict(table: &PriceTable) -> AppResult<()> {
    for (item_id, entry) in table.iter() {
        validate_item_id(item_id)
            .and_then(|_| validate_price_entry(entry))
            .map_err(CoreError::from)?;
    }
    Ok(())
}

fn read_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::PriceEntry;
    use std::collections::HashMap;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("checkout-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = TerminalConfig::default();
        assert_eq!(config.terminal.name, "Checkout");
        assert_eq!(config.terminal.log_filter, "warn,checkout=info");
        assert!(config.pricing.path.is_none());
        assert!(config.pricing.items.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TerminalConfig::from_toml("[terminal]\nname = \"Lane 3\"\n").unwrap();
        assert_eq!(config.terminal.name, "Lane 3");
        assert_eq!(config.terminal.log_filter, "warn,checkout=info");
    }

    #[test]
    fn test_inline_items() {
        let toml = r#"
            [pricing.items.A]
            unitPriceCents = 200
            bulkQuantity = 4
            bulkPriceCents = 700

            [pricing.items.B]
            unitPriceCents = 1200
        "#;
        let config = TerminalConfig::from_toml(toml).unwrap();
        let table = config.price_table(None).unwrap().unwrap();
        assert_eq!(table.get("A"), Some(&PriceEntry::bulk(200, 4, 700)));
        assert_eq!(table.get("B"), Some(&PriceEntry::unit(1200)));
    }

    #[test]
    fn test_no_pricing_configured() {
        let config = TerminalConfig::default();
        assert_eq!(config.price_table(None).unwrap(), None);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CHECKOUT_PRICES", "/tmp/prices.json"),
            ("CHECKOUT_LOG", "debug"),
            ("CHECKOUT_TERMINAL_NAME", "Lane 7"),
        ]);

        let mut config = TerminalConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.pricing.path, Some(PathBuf::from("/tmp/prices.json")));
        assert_eq!(config.terminal.log_filter, "debug");
        assert_eq!(config.terminal.name, "Lane 7");
    }

    #[test]
    fn test_config_validation() {
        let mut config = TerminalConfig::default();
        config.terminal.name = "  ".to_string();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));

        config.terminal.name = "Lane 1".to_string();
        config.terminal.log_filter = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_json_price_table() {
        let path = write_temp(
            "prices.json",
            r#"{ "C": { "unitPriceCents": 125, "bulkQuantity": 6, "bulkPriceCents": 600 } }"#,
        );
        let table = load_price_table(&path).unwrap();
        assert_eq!(table.get("C"), Some(&PriceEntry::bulk(125, 6, 600)));
    }

    #[test]
    fn test_load_toml_price_table() {
        let path = write_temp("prices.toml", "[D]\nunitPriceCents = 15\n");
        let table = load_price_table(&path).unwrap();
        assert_eq!(table.get("D"), Some(&PriceEntry::unit(15)));
    }

    #[test]
    fn test_bad_price_table_reports_path() {
        let path = write_temp("broken.json", "{ not json");
        let err = load_price_table(&path).unwrap_err();
        assert!(matches!(err, AppError::PriceTableParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_price_table(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_prices_override_wins() {
        let path = write_temp("override.toml", "[Q]\nunitPriceCents = 99\n");
        let mut config = TerminalConfig::default();
        config.pricing.items = PriceTable::new().with_entry("A", PriceEntry::unit(200));

        let table = config.price_table(Some(&path)).unwrap().unwrap();
        assert!(table.contains("Q"));
        assert!(!table.contains("A"));
    }

    #[test]
    fn test_strict_rejects_invalid_entries() {
        let mut config = TerminalConfig::default();
        config.pricing.items = PriceTable::new()
            .with_entry("A", PriceEntry::unit(200))
            .with_entry("E", PriceEntry::default());

        assert!(config.price_table(None).is_ok());

        config.pricing.strict = true;
        let err = config.price_table(None).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_path_and_inline_items_conflict_is_noticed() {
        let toml = r#"
            [pricing]
            path = "p.json"

            [pricing.items.B]
            unitPriceCents = 1200
        "#;
        let config = TerminalConfig::from_toml(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.notices(),
            vec!["Both pricing.path and pricing.items are set; inline items are ignored (count: 1)"]
        );

        assert!(TerminalConfig::default().notices().is_empty());
    }

    #[test]
    fn test_load_reports_conflict_from_file() {
        let path = write_temp(
            "conflict.toml",
            "[pricing]\npath = \"p.json\"\n\n[pricing.items.B]\nunitPriceCents = 1200\n",
        );
        let config = TerminalConfig::load(Some(path)).unwrap();
        assert_eq!(config.notices().len(), 1);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let err = TerminalConfig::load(Some(PathBuf::from("/definitely/not/checkout.toml")));
        assert!(matches!(err, Err(AppError::Io { .. })));
    }
}
