//! Instrument definitions.
//!
//! This module provides the instruments priced on the binomial lattice,
//! with enum dispatch over the concrete types.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects) for static dispatch:
//! - `Instrument<T>` enum wraps all instrument types
//! - All types generic over `T: Float`
//! - Payoffs are evaluated exactly at lattice node levels
//!
//! # Instrument Types
//!
//! - [`VanillaOption`]: European/American calls and puts, long or short
//! - [`BarrierBoosterNote`]: Structured note paying a banded percentage return
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::Underlying;
//! use pricer_models::instruments::{
//!     BarrierBoosterNote, Direction, ExerciseStyle, Instrument, InstrumentParams,
//!     InstrumentTrait, PayoffType, VanillaOption,
//! };
//!
//! let stock = Underlying::new(100.0_f64, 0.2, 0.0).unwrap();
//! let put = VanillaOption::new(
//!     stock,
//!     InstrumentParams::new(100.0, 1.0).unwrap(),
//!     PayoffType::Put,
//!     ExerciseStyle::European,
//!     Direction::Long,
//! );
//! let note = BarrierBoosterNote::builder(stock, -0.3, 0.6)
//!     .term(6.0)
//!     .build()
//!     .unwrap();
//!
//! let instruments = [Instrument::Vanilla(put), Instrument::BarrierBooster(note)];
//! assert_eq!(instruments[0].payoff(90.0), 10.0);
//! assert_eq!(instruments[1].payoff(110.0), 0.6);
//! ```

mod error;
mod exercise;
mod note;
mod params;
mod payoff;
mod traits;
mod vanilla;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use note::{BarrierBoosterNote, BarrierBoosterNoteBuilder};
pub use params::{InstrumentParams, PositionParams, DEFAULT_UNITS_PER_CONTRACT};
pub use payoff::{Direction, PayoffType};
pub use traits::InstrumentTrait;
pub use vanilla::VanillaOption;

use num_traits::Float;
use pricer_core::market_data::Underlying;

/// Unified instrument enum for static dispatch.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Variants
/// - `Vanilla`: Vanilla calls and puts
/// - `BarrierBooster`: Barrier booster structured notes
#[derive(Debug, Clone)]
pub enum Instrument<T: Float> {
    /// Vanilla option
    Vanilla(VanillaOption<T>),
    /// Barrier booster note
    BarrierBooster(BarrierBoosterNote<T>),
}

impl<T: Float> Instrument<T> {
    /// Returns whether this is a vanilla option.
    #[inline]
    pub fn is_vanilla(&self) -> bool {
        matches!(self, Instrument::Vanilla(_))
    }

    /// Returns whether this is a barrier booster note.
    #[inline]
    pub fn is_barrier_booster(&self) -> bool {
        matches!(self, Instrument::BarrierBooster(_))
    }

    /// Returns a reference to the vanilla option if this is a Vanilla variant.
    pub fn as_vanilla(&self) -> Option<&VanillaOption<T>> {
        match self {
            Instrument::Vanilla(option) => Some(option),
            _ => None,
        }
    }

    /// Returns a reference to the note if this is a BarrierBooster variant.
    pub fn as_barrier_booster(&self) -> Option<&BarrierBoosterNote<T>> {
        match self {
            Instrument::BarrierBooster(note) => Some(note),
            _ => None,
        }
    }
}

impl<T: Float> InstrumentTrait<T> for Instrument<T> {
    #[inline]
    fn payoff(&self, level: T) -> T {
        match self {
            Instrument::Vanilla(option) => option.payoff(level),
            Instrument::BarrierBooster(note) => note.payoff(level),
        }
    }

    #[inline]
    fn expiry(&self) -> T {
        match self {
            Instrument::Vanilla(option) => InstrumentTrait::expiry(option),
            Instrument::BarrierBooster(note) => note.term(),
        }
    }

    #[inline]
    fn exercise_style(&self) -> ExerciseStyle {
        match self {
            Instrument::Vanilla(option) => option.exercise_style(),
            Instrument::BarrierBooster(note) => note.exercise_style(),
        }
    }

    #[inline]
    fn underlying(&self) -> &Underlying<T> {
        match self {
            Instrument::Vanilla(option) => option.underlying(),
            Instrument::BarrierBooster(note) => note.underlying(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Instrument::Vanilla(option) => option.type_name(),
            Instrument::BarrierBooster(note) => note.type_name(),
        }
    }
}

impl<T: Float> From<VanillaOption<T>> for Instrument<T> {
    fn from(option: VanillaOption<T>) -> Self {
        Instrument::Vanilla(option)
    }
}

impl<T: Float> From<BarrierBoosterNote<T>> for Instrument<T> {
    fn from(note: BarrierBoosterNote<T>) -> Self {
        Instrument::BarrierBooster(note)
    }
}
