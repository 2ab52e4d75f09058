//! Market data error types.
//!
//! This module provides structured error handling for the construction of
//! market factor records.

use crate::types::PricingError;
use thiserror::Error;

/// Market data construction errors.
///
/// # Variants
///
/// - `InvalidSpot`: Non-positive or non-finite spot level
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidDividendYield`: Non-finite dividend yield
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid spot level (non-positive or non-finite).
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid volatility (negative or non-finite).
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid dividend yield (non-finite).
    #[error("Invalid dividend yield: q = {dividend_yield}")]
    InvalidDividendYield {
        /// The invalid dividend yield value
        dividend_yield: f64,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
