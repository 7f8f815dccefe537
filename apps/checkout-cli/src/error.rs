//! # Application Error Types
//!
//! Everything that can stop the `checkout` binary. Recoverable checkout
//! conditions (unknown items, unpriceable entries) are NOT errors; they
//! arrive as `CheckoutWarning` values and are printed on the receipt.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                      Variant                                    │
//! │  ──────                      ───────                                    │
//! │  read config / price file ─► Io { path }                               │
//! │  bad TOML in config ───────► ConfigParse { path }                      │
//! │  bad JSON/TOML price file ─► PriceTableParse { path }                  │
//! │  config.validate() ────────► InvalidConfig                             │
//! │  writing stdout ───────────► Output                                    │
//! │  --json encoding ──────────► Serialize                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use checkout_core::CoreError;

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `TerminalConfig`.
    #[error("Failed to parse config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// The price table file could not be decoded.
    #[error("Failed to parse price table {path}: {reason}")]
    PriceTableParse { path: PathBuf, reason: String },

    /// The configuration is well-formed but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing to the output stream failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Encoding `--json` output failed.
    #[error("Failed to encode output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Domain error from checkout-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_include_path() {
        let err = AppError::PriceTableParse {
            path: PathBuf::from("prices.json"),
            reason: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse price table prices.json: expected value"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let core = CoreError::InvalidAmount {
            input: "x".to_string(),
            reason: "not a number".to_string(),
        };
        let err: AppError = core.into();
        assert_eq!(err.to_string(), "Invalid amount 'x': not a number");
    }
}
