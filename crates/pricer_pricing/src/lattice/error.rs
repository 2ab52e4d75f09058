//! Error types for the lattice pricers.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Lattice configuration and valuation errors.
///
/// Everything except [`LatticeError::NonFiniteValue`] and
/// [`LatticeError::IncompleteValuation`] is raised at construction, before
/// any node is evaluated.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::LatticeError;
///
/// let err = LatticeError::InvalidStepCount { num_steps: 20_000 };
/// assert!(err.to_string().contains("20000"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Time step is non-positive or non-finite.
    #[error("Invalid time step: dt = {time_step}")]
    InvalidTimeStep {
        /// The invalid time step
        time_step: f64,
    },

    /// Step count exceeds the lattice limit.
    #[error("Invalid step count {num_steps}: must be at most 10_000")]
    InvalidStepCount {
        /// The requested number of steps
        num_steps: usize,
    },

    /// Term is not an integral multiple of the time step.
    #[error("Term {term} is not an integral multiple of time step {time_step}")]
    NonIntegralStepCount {
        /// Term in years
        term: f64,
        /// Time step in years
        time_step: f64,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },

    /// Risk-neutral up probability outside [0, 1] or not finite.
    #[error("Degenerate risk-neutral probability: p = {probability}")]
    DegenerateProbability {
        /// The computed probability
        probability: f64,
    },

    /// The pricer does not support the instrument's exercise style.
    #[error("{pricer} does not support {exercise} exercise")]
    UnsupportedExercise {
        /// Pricer name
        pricer: &'static str,
        /// Exercise style name
        exercise: &'static str,
    },

    /// Lattice horizon does not reach the instrument's expiry.
    #[error("Lattice horizon {horizon} does not match instrument expiry {expiry}")]
    HorizonMismatch {
        /// `num_steps · time_step` in years
        horizon: f64,
        /// Instrument expiry in years
        expiry: f64,
    },

    /// A node was combined before both of its children were valued.
    #[error("Incomplete valuation at node ({num_up_moves}, {step})")]
    IncompleteValuation {
        /// Up moves of the node
        num_up_moves: usize,
        /// Step of the node
        step: usize,
    },

    /// Valuation produced a non-finite value.
    #[error("Non-finite value at node ({num_up_moves}, {step})")]
    NonFiniteValue {
        /// Up moves of the offending node
        num_up_moves: usize,
        /// Step of the offending node
        step: usize,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::NonFiniteValue { .. } => PricingError::NumericalInstability(err.to_string()),
            LatticeError::UnsupportedExercise { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
            LatticeError::DegenerateProbability { .. } | LatticeError::IncompleteValuation { .. } => {
                PricingError::ModelFailure(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
