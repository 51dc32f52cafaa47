//! # Quote Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! ## Environment Variables
//! - `LOCADORA_CURRENCY_SYMBOL`: prefix for amounts (default `R$`)
//! - `LOCADORA_CURRENCY_DECIMALS`: decimals shown (default `2`)
//! - `LOCADORA_DECIMAL_SEPARATOR`: single character (default `,`)
//! - `LOCADORA_OUTPUT`: `table` or `json` (default `table`)

use std::env;

use locadora_core::Money;
use serde::{Deserialize, Serialize};

/// How the invoice is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    pub currency_symbol: String,
    pub currency_decimals: u32,
    pub decimal_separator: char,
    pub output: OutputFormat,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            currency_symbol: "R$".to_string(),
            currency_decimals: 2,
            decimal_separator: ',',
            output: OutputFormat::Table,
        }
    }
}

impl QuoteConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, one call per variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QuoteConfig::default();

        if let Some(symbol) = lookup("LOCADORA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("LOCADORA_CURRENCY_DECIMALS") {
            config.currency_decimals = decimals
                .trim()
                .parse()
                .ok()
                .filter(|d| *d <= 8)
                .ok_or_else(|| ConfigError::InvalidValue("LOCADORA_CURRENCY_DECIMALS".to_string()))?;
        }

        if let Some(separator) = lookup("LOCADORA_DECIMAL_SEPARATOR") {
            let mut chars = separator.chars();
            config.decimal_separator = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "LOCADORA_DECIMAL_SEPARATOR".to_string(),
                    ))
                }
            };
        }

        if let Some(output) = lookup("LOCADORA_OUTPUT") {
            config.output = match output.trim().to_lowercase().as_str() {
                "table" => OutputFormat::Table,
                "json" => OutputFormat::Json,
                _ => return Err(ConfigError::InvalidValue("LOCADORA_OUTPUT".to_string())),
            };
        }

        Ok(config)
    }

    /// Formats an amount for the table view.
    ///
    /// ## Example
    /// ```rust
    /// use locadora_core::Money;
    /// use locadora_quote::config::QuoteConfig;
    ///
    /// let config = QuoteConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "R$ 1234,56");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let rounded = amount.round_dp(self.currency_decimals).amount();
        let digits = format!(
            "{:.prec$}",
            rounded.abs(),
            prec = self.currency_decimals as usize
        );
        let digits = digits.replace('.', &self.decimal_separator.to_string());
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{} {}", sign, self.currency_symbol, digits)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
