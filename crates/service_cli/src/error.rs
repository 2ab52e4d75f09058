//! Error types for the note pricing CLI.

use std::path::PathBuf;

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::lattice::LatticeError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Instrument construction or pricing error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Report file could not be written
    #[error("Failed to write report {path:?}: {source}")]
    Report {
        /// Report path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<MarketDataError> for CliError {
    fn from(err: MarketDataError) -> Self {
        Self::Pricing(err.into())
    }
}

impl From<InstrumentError> for CliError {
    fn from(err: InstrumentError) -> Self {
        Self::Pricing(err.into())
    }
}

impl From<LatticeError> for CliError {
    fn from(err: LatticeError) -> Self {
        Self::Pricing(err.into())
    }
}

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
