//! # pricer_core: Foundation for Lattice Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Traits for pricing (`traits`)
//! - Market factor records: `Underlying` (`market_data`)
//! - Error types: `PricingError` (`types::error`), `MarketDataError` (`market_data::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::Underlying;
//!
//! let index = Underlying::new(15_400.0_f64, 0.25, 0.012).unwrap();
//! let ret = index.performance_in_percentage(12_320.0);
//! assert!((ret + 0.2).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod traits;
pub mod types;
