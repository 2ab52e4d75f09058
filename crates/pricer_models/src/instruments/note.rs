//! Barrier booster structured note.
//!
//! The note pays a percentage return on the notional that depends on the
//! underlying's return over the term, split into four right-open bands:
//!
//! | Underlying return `r`                        | Note return                                   |
//! |----------------------------------------------|-----------------------------------------------|
//! | `r < barrier_level`                          | `r` (downside pass-through)                   |
//! | `barrier_level <= r < boost_level`           | `barrier_return`                              |
//! | `boost_level <= r < participation_level`     | `boosted_return`                              |
//! | `r >= participation_level`                   | `boosted_return + (r - participation_level) * participation_rate` |

use std::fmt;

use num_traits::Float;
use pricer_core::market_data::Underlying;

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::traits::InstrumentTrait;

/// Barrier booster note.
///
/// All levels and returns are decimal percentages (35% = 0.35).
/// Use [`BarrierBoosterNote::builder`] to construct instances.
///
/// # Examples
/// ```
/// use pricer_core::market_data::Underlying;
/// use pricer_models::instruments::BarrierBoosterNote;
///
/// let index = Underlying::new(15400.0_f64, 0.25, 0.012).unwrap();
/// let note = BarrierBoosterNote::builder(index, -0.3, 0.6)
///     .term(6.0)
///     .build()
///     .unwrap();
///
/// // 10% up: inside the boost band
/// assert_eq!(note.payoff(15400.0 * 1.1), 0.6);
/// // 40% down: below the barrier, loss passed through
/// assert!((note.payoff(15400.0 * 0.6) + 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierBoosterNote<T: Float> {
    underlying: Underlying<T>,
    exercise_style: ExerciseStyle,
    term: T,
    barrier_level: T,
    barrier_return: T,
    boost_level: T,
    boosted_return: T,
    participation_level: T,
    participation_rate: T,
}

impl<T: Float> BarrierBoosterNote<T> {
    /// Creates a new note builder.
    ///
    /// # Arguments
    /// * `underlying` - Reference index or asset
    /// * `barrier_level` - Return below which losses are passed through
    /// * `boosted_return` - Return paid inside the boost band
    pub fn builder(
        underlying: Underlying<T>,
        barrier_level: T,
        boosted_return: T,
    ) -> BarrierBoosterNoteBuilder<T> {
        BarrierBoosterNoteBuilder {
            underlying,
            exercise_style: ExerciseStyle::European,
            term: None,
            barrier_level,
            barrier_return: T::zero(),
            boost_level: T::zero(),
            boosted_return,
            participation_level: None,
            participation_rate: T::one(),
        }
    }

    /// Percentage return of the note for a given underlying level.
    pub fn payoff(&self, level: T) -> T {
        let r = self.underlying.performance_in_percentage(level);
        if r < self.barrier_level {
            r
        } else if r < self.boost_level {
            self.barrier_return
        } else if r < self.participation_level {
            self.boosted_return
        } else {
            self.boosted_return + (r - self.participation_level) * self.participation_rate
        }
    }

    /// Returns the term in years.
    #[inline]
    pub fn term(&self) -> T {
        self.term
    }

    /// Returns the barrier level.
    #[inline]
    pub fn barrier_level(&self) -> T {
        self.barrier_level
    }

    /// Returns the return paid between barrier and boost levels.
    #[inline]
    pub fn barrier_return(&self) -> T {
        self.barrier_return
    }

    /// Returns the boost level.
    #[inline]
    pub fn boost_level(&self) -> T {
        self.boost_level
    }

    /// Returns the boosted return.
    #[inline]
    pub fn boosted_return(&self) -> T {
        self.boosted_return
    }

    /// Returns the participation level.
    #[inline]
    pub fn participation_level(&self) -> T {
        self.participation_level
    }

    /// Returns the participation rate above the participation level.
    #[inline]
    pub fn participation_rate(&self) -> T {
        self.participation_rate
    }
}

impl<T: Float> fmt::Display for BarrierBoosterNote<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |value: T| value.to_f64().unwrap_or(f64::NAN) * 100.0;
        write!(
            f,
            "Barrier={:?}%:Booster={:?}%:Participation={:?}%",
            pct(self.barrier_level),
            pct(self.boosted_return),
            pct(self.participation_rate)
        )
    }
}

impl<T: Float> InstrumentTrait<T> for BarrierBoosterNote<T> {
    #[inline]
    fn payoff(&self, level: T) -> T {
        BarrierBoosterNote::payoff(self, level)
    }

    #[inline]
    fn expiry(&self) -> T {
        self.term
    }

    #[inline]
    fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }

    #[inline]
    fn underlying(&self) -> &Underlying<T> {
        &self.underlying
    }

    fn type_name(&self) -> &'static str {
        "BarrierBoosterNote"
    }
}

/// Builder for [`BarrierBoosterNote`].
///
/// Defaults: European exercise, `barrier_return = 0`, `boost_level = 0`,
/// `participation_level = boosted_return`, `participation_rate = 1`.
/// The term has no default.
#[derive(Debug, Clone)]
pub struct BarrierBoosterNoteBuilder<T: Float> {
    underlying: Underlying<T>,
    exercise_style: ExerciseStyle,
    term: Option<T>,
    barrier_level: T,
    barrier_return: T,
    boost_level: T,
    boosted_return: T,
    participation_level: Option<T>,
    participation_rate: T,
}

impl<T: Float> BarrierBoosterNoteBuilder<T> {
    /// Sets the term in years.
    #[inline]
    pub fn term(mut self, term: T) -> Self {
        self.term = Some(term);
        self
    }

    /// Sets the exercise style.
    #[inline]
    pub fn exercise_style(mut self, exercise_style: ExerciseStyle) -> Self {
        self.exercise_style = exercise_style;
        self
    }

    /// Sets the return paid between the barrier and boost levels.
    #[inline]
    pub fn barrier_return(mut self, barrier_return: T) -> Self {
        self.barrier_return = barrier_return;
        self
    }

    /// Sets the level at which the boosted return begins.
    #[inline]
    pub fn boost_level(mut self, boost_level: T) -> Self {
        self.boost_level = boost_level;
        self
    }

    /// Sets the level above which upside participation begins.
    #[inline]
    pub fn participation_level(mut self, participation_level: T) -> Self {
        self.participation_level = Some(participation_level);
        self
    }

    /// Sets the participation rate above the participation level.
    #[inline]
    pub fn participation_rate(mut self, participation_rate: T) -> Self {
        self.participation_rate = participation_rate;
        self
    }

    /// Builds the note.
    ///
    /// # Errors
    ///
    /// Returns `InstrumentError` if:
    /// - the term is missing, non-positive or non-finite
    /// - any level, return or rate is non-finite
    /// - the bands are not ordered `barrier <= boost <= participation`
    pub fn build(self) -> Result<BarrierBoosterNote<T>, InstrumentError> {
        let term = self.term.ok_or_else(|| InstrumentError::InvalidParameter {
            message: "term must be specified".to_string(),
        })?;
        if !(term > T::zero()) || !term.is_finite() {
            return Err(InstrumentError::InvalidExpiry {
                expiry: term.to_f64().unwrap_or(f64::NAN),
            });
        }

        let participation_level = self.participation_level.unwrap_or(self.boosted_return);

        let fields = [
            ("barrier_level", self.barrier_level),
            ("barrier_return", self.barrier_return),
            ("boost_level", self.boost_level),
            ("boosted_return", self.boosted_return),
            ("participation_level", participation_level),
            ("participation_rate", self.participation_rate),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("{} must be finite", name),
            });
        }

        if self.barrier_level > self.boost_level || self.boost_level > participation_level {
            return Err(InstrumentError::UnorderedBands {
                barrier_level: self.barrier_level.to_f64().unwrap_or(f64::NAN),
                boost_level: self.boost_level.to_f64().unwrap_or(f64::NAN),
                participation_level: participation_level.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(BarrierBoosterNote {
            underlying: self.underlying,
            exercise_style: self.exercise_style,
            term,
            barrier_level: self.barrier_level,
            barrier_return: self.barrier_return,
            boost_level: self.boost_level,
            boosted_return: self.boosted_return,
            participation_level,
            participation_rate: self.participation_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SPOT: f64 = 15400.0;

    fn index() -> Underlying<f64> {
        Underlying::new(SPOT, 0.25, 0.012).unwrap()
    }

    fn s1() -> BarrierBoosterNote<f64> {
        BarrierBoosterNote::builder(index(), -0.3, 0.6)
            .term(6.0)
            .build()
            .unwrap()
    }

    fn level(ret: f64) -> f64 {
        SPOT * (1.0 + ret)
    }

    #[test]
    fn test_builder_defaults() {
        let note = s1();
        assert_eq!(note.term(), 6.0);
        assert_eq!(note.barrier_return(), 0.0);
        assert_eq!(note.boost_level(), 0.0);
        assert_eq!(note.participation_level(), 0.6);
        assert_eq!(note.participation_rate(), 1.0);
        assert!(note.exercise_style().is_european());
    }

    #[test]
    fn test_payoff_bands() {
        let note = s1();
        assert_relative_eq!(note.payoff(level(-0.5)), -0.5, epsilon = 1e-12);
        assert_eq!(note.payoff(level(-0.1)), 0.0);
        assert_eq!(note.payoff(level(0.3)), 0.6);
        assert_relative_eq!(note.payoff(level(0.8)), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_band_edges_are_right_open() {
        let note = BarrierBoosterNote::builder(index(), -0.25, 0.5)
            .term(6.0)
            .build()
            .unwrap();
        // exactly at the barrier: barrier band, not pass-through
        assert_eq!(note.payoff(SPOT * 0.75), 0.0);
        // exactly at the boost level (spot itself): boosted band
        assert_eq!(note.payoff(SPOT), 0.5);
    }

    #[test]
    fn test_participation_rate_above_level() {
        let note = BarrierBoosterNote::builder(index(), -0.3, 0.4)
            .participation_level(0.5)
            .participation_rate(0.5)
            .term(6.0)
            .build()
            .unwrap();
        assert_eq!(note.payoff(level(0.45)), 0.4);
        assert_relative_eq!(note.payoff(level(0.9)), 0.4 + 0.4 * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_display_format() {
        let note = BarrierBoosterNote::builder(index(), -0.5, 0.8)
            .term(6.0)
            .build()
            .unwrap();
        assert_eq!(
            note.to_string(),
            "Barrier=-50.0%:Booster=80.0%:Participation=100.0%"
        );
    }

    #[test]
    fn test_missing_term_rejected() {
        let result = BarrierBoosterNote::builder(index(), -0.3, 0.6).build();
        assert!(matches!(result, Err(InstrumentError::InvalidParameter { .. })));
    }

    #[test]
    fn test_non_positive_term_rejected() {
        let result = BarrierBoosterNote::builder(index(), -0.3, 0.6)
            .term(0.0)
            .build();
        assert!(matches!(result, Err(InstrumentError::InvalidExpiry { .. })));
    }

    #[test]
    fn test_unordered_bands_rejected() {
        let result = BarrierBoosterNote::builder(index(), 0.1, 0.6)
            .term(6.0)
            .build();
        assert!(matches!(result, Err(InstrumentError::UnorderedBands { .. })));

        let result = BarrierBoosterNote::builder(index(), -0.3, 0.6)
            .boost_level(0.2)
            .participation_level(0.1)
            .term(6.0)
            .build();
        assert!(matches!(result, Err(InstrumentError::UnorderedBands { .. })));
    }

    #[test]
    fn test_non_finite_parameter_rejected() {
        let result = BarrierBoosterNote::builder(index(), -0.3, f64::NAN)
            .term(6.0)
            .build();
        match result {
            Err(InstrumentError::InvalidParameter { message }) => {
                assert!(message.contains("boosted_return"));
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_instrument_trait() {
        let note = BarrierBoosterNote::builder(index(), -0.3, 0.6)
            .exercise_style(ExerciseStyle::American)
            .term(3.0)
            .build()
            .unwrap();
        assert_eq!(InstrumentTrait::expiry(&note), 3.0);
        assert!(note.exercise_style().is_american());
        assert_eq!(note.underlying().spot(), SPOT);
        assert_eq!(note.type_name(), "BarrierBoosterNote");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn payoff_is_non_decreasing_in_level(
                barrier in -0.9_f64..0.0,
                boosted in 0.0_f64..1.0,
                rate in 0.0_f64..2.0,
                a in -0.99_f64..3.0,
                b in -0.99_f64..3.0,
            ) {
                let note = BarrierBoosterNote::builder(index(), barrier, boosted)
                    .participation_rate(rate)
                    .term(6.0)
                    .build()
                    .unwrap();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(note.payoff(level(lo)) <= note.payoff(level(hi)) + 1e-12);
            }

            #[test]
            fn payoff_in_boost_band_is_constant(
                barrier in -0.9_f64..0.0,
                boosted in 0.01_f64..1.0,
                frac in 0.0_f64..1.0,
            ) {
                let note = BarrierBoosterNote::builder(index(), barrier, boosted)
                    .term(6.0)
                    .build()
                    .unwrap();
                let r = frac * boosted * 0.999;
                prop_assert_eq!(note.payoff(level(r)), boosted);
            }
        }
    }
}
