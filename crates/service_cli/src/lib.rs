//! # Note Pricer CLI
//!
//! Command line driver for the lattice pricers.
//!
//! ## Commands
//!
//! - `note-pricer run` - Price the barrier booster note scenarios and append
//!   the results to the report file
//! - `note-pricer option` - Price a single vanilla option
//!
//! ## Architecture
//!
//! As the service layer, this crate orchestrates the pricer layers:
//! scenarios are loaded into [`config::RunConfig`], priced through
//! `pricer_pricing::lattice`, and written out via [`report::Report`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use error::{CliError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::option::OptionArgs;
    pub use crate::config::{ConfigError, RunConfig, ScenarioSpec};
    pub use crate::error::CliError;
    pub use crate::report::{Report, ReportEntry};
}
