//! Instrument error types.
//!
//! This module provides structured error handling for instrument
//! construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is non-positive
/// - `InvalidExpiry`: Term or expiry is non-positive
/// - `InvalidParameter`: General parameter validation failure
/// - `UnorderedBands`: Note band thresholds are not non-decreasing
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry time (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },

    /// Note band thresholds out of order.
    #[error(
        "Unordered note bands: barrier {barrier_level} <= boost {boost_level} <= participation {participation_level} required"
    )]
    UnorderedBands {
        /// Barrier level
        barrier_level: f64,
        /// Boost level
        boost_level: f64,
        /// Participation level
        participation_level: f64,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
