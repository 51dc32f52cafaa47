//! # CLI Error Type
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read file ──── io::Error ─────────┐                                    │
//! │  parse JSON ─── serde_json::Error ─┼──► QuoteError ──► stderr, exit 1   │
//! │  env config ─── ConfigError ───────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails; every variant here is about getting the
//! records in or the invoice out.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize invoice: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QuoteError::Io {
            path: PathBuf::from("lease.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Could not read lease.json: not found");

        let err: QuoteError = ConfigError::InvalidValue("LOCADORA_OUTPUT".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for LOCADORA_OUTPUT"
        );
    }
}
