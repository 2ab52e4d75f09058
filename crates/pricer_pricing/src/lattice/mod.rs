//! Recombining binomial lattice pricers.
//!
//! # Architecture
//!
//! ```text
//! BinomialTreePricer / KnockoutTreePricer
//! ├── LatticeConfig     (step length, step count, rate)
//! ├── KnockoutConfig    (threshold, observation window; knockout only)
//! ├── LatticeGeometry   (u, d, p, per-step discount)
//! ├── NodeCache         (memoized values keyed by NodeIndex)
//! └── value_lattice()   (explicit-stack backward induction)
//! ```
//!
//! A lattice of `n` steps has `(n + 1)(n + 2) / 2` distinct nodes; each is
//! valued at most once per [`price`](pricer_core::traits::Priceable::price)
//! call, and the cache is reset at the start of every call.
//!
//! # Drift conventions
//!
//! The two pricers default to different up-probability formulas, see
//! [`DriftConvention`]. Both agree when `dt = 1`.

mod cache;
mod config;
mod engine;
mod error;
mod geometry;
mod knockout;
mod pricer;

pub use cache::{node_count, NodeCache, NodeIndex};
pub use config::{
    KnockoutConfig, LatticeConfig, LatticeConfigBuilder, DEFAULT_OBSERVATION_END, MAX_STEPS,
};
pub use error::LatticeError;
pub use geometry::{DriftConvention, LatticeGeometry};
pub use knockout::KnockoutTreePricer;
pub use pricer::BinomialTreePricer;
