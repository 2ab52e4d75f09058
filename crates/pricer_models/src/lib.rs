//! # Pricer Models (L2: Business Logic)
//!
//! Financial instruments and their payoff functions.
//!
//! This crate provides:
//! - Vanilla put/call options with long/short direction
//! - Barrier-booster structured notes with a piecewise percentage-return payoff
//! - The [`instruments::InstrumentTrait`] capability consumed by the lattice pricers
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Validated construction**: every instrument is checked once when built,
//!   payoff evaluation itself never fails
//! - **Builder pattern** for notes with sensible defaults

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
