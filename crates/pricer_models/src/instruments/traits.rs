//! Instrument trait definitions.
//!
//! This module provides the core [`InstrumentTrait`] that every instrument
//! priced on the lattice implements.
//!
//! # Layer Boundaries
//!
//! This trait is in L2 (pricer_models) and provides:
//! - The payoff as a function of the underlying level
//! - Contract metadata (term, exercise style, underlying)
//!
//! Lattice construction and backward valuation live in L3 (pricer_pricing).

use num_traits::Float;
use pricer_core::market_data::Underlying;

use super::exercise::ExerciseStyle;

/// Core trait for all lattice-priceable instruments.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float`
///
/// # Required Methods
///
/// - [`payoff`](InstrumentTrait::payoff) - Payoff at a given underlying level
/// - [`expiry`](InstrumentTrait::expiry) - Term in years
/// - [`exercise_style`](InstrumentTrait::exercise_style) - European or American
/// - [`underlying`](InstrumentTrait::underlying) - Market factor record
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{ExerciseStyle, InstrumentTrait};
/// use pricer_core::market_data::Underlying;
/// use num_traits::Float;
///
/// struct Digital<T: Float> {
///     underlying: Underlying<T>,
///     strike: T,
/// }
///
/// impl<T: Float> InstrumentTrait<T> for Digital<T> {
///     fn payoff(&self, level: T) -> T {
///         if level > self.strike { T::one() } else { T::zero() }
///     }
///     fn expiry(&self) -> T {
///         T::one()
///     }
///     fn exercise_style(&self) -> ExerciseStyle {
///         ExerciseStyle::European
///     }
///     fn underlying(&self) -> &Underlying<T> {
///         &self.underlying
///     }
/// }
///
/// let digital = Digital {
///     underlying: Underlying::new(100.0_f64, 0.2, 0.0).unwrap(),
///     strike: 100.0,
/// };
/// assert_eq!(digital.payoff(101.0), 1.0);
/// ```
pub trait InstrumentTrait<T: Float> {
    /// Payoff at the given underlying level.
    ///
    /// Vanilla options return a monetary amount per unit; notes return a
    /// percentage return as a decimal. May be negative (short positions,
    /// downside pass-through).
    fn payoff(&self, level: T) -> T;

    /// Term of the contract in years.
    fn expiry(&self) -> T;

    /// Exercise style.
    fn exercise_style(&self) -> ExerciseStyle;

    /// Market factor record the payoff is written on.
    fn underlying(&self) -> &Underlying<T>;

    /// Human-readable instrument type name.
    ///
    /// Used for logging and error messages.
    fn type_name(&self) -> &'static str {
        "Unknown"
    }
}
