//! # Pricer Pricing (Layer 3: Lattice Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns an instrument from Layer 2 into a price:
//! - Recombining binomial lattice geometry (`u`, `d`, `p`, per-step discount)
//! - Memoized backward valuation with an American early-exercise overlay
//! - Knockout barrier overlay observed over a window measured from the root
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `Float`, `Priceable`, `PricingError`, `Underlying`
//! - Layer 2 (pricer_models): `InstrumentTrait`, `Instrument` enum
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::Underlying;
//! use pricer_core::traits::Priceable;
//! use pricer_models::instruments::{
//!     Direction, ExerciseStyle, InstrumentParams, PayoffType, VanillaOption,
//! };
//! use pricer_pricing::lattice::{BinomialTreePricer, LatticeConfig};
//!
//! let stock = Underlying::new(50.0_f64, 0.3, 0.0).unwrap();
//! let put = VanillaOption::new(
//!     stock,
//!     InstrumentParams::new(52.0, 2.0).unwrap(),
//!     PayoffType::Put,
//!     ExerciseStyle::American,
//!     Direction::Long,
//! );
//!
//! let config = LatticeConfig::builder()
//!     .time_step(1.0)
//!     .term(2.0)
//!     .risk_free_rate(0.05)
//!     .build()
//!     .unwrap();
//!
//! let mut pricer = BinomialTreePricer::new(config, put).unwrap();
//! let price = pricer.price().unwrap();
//! assert!((price - 7.4284).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod lattice;
