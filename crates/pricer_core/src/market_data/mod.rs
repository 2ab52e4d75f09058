//! Market factor records for lattice pricing.
//!
//! # Components
//!
//! - [`underlying`]: The immutable `Underlying` record (spot, volatility, dividend yield)
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::Underlying;
//!
//! let stock = Underlying::new(100.0_f64, 0.2, 0.0).unwrap();
//! assert_eq!(stock.spot(), 100.0);
//! assert!((stock.performance_in_percentage(125.0) - 0.25).abs() < 1e-12);
//! ```

pub mod error;
pub mod underlying;

pub use error::MarketDataError;
pub use underlying::Underlying;
