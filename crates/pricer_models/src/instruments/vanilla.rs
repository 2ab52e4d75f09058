//! Vanilla option definitions.
//!
//! This module provides the vanilla put/call structure combining the
//! underlying, common parameters, payoff type, exercise style and direction.

use num_traits::Float;
use pricer_core::market_data::Underlying;

use super::exercise::ExerciseStyle;
use super::params::{InstrumentParams, PositionParams};
use super::payoff::{Direction, PayoffType};
use super::traits::InstrumentTrait;

/// Vanilla option instrument.
///
/// Payoff per unit is `sign(direction) * max(±(level - strike), 0)`, a
/// monetary amount.
///
/// Early exercise maximises the signed payoff, so an American short is
/// not the negation of the American long: the short side is worth at least
/// its immediate (negative) payoff.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_core::market_data::Underlying;
/// use pricer_models::instruments::{
///     Direction, ExerciseStyle, InstrumentParams, PayoffType, VanillaOption,
/// };
///
/// let stock = Underlying::new(100.0_f64, 0.2, 0.0).unwrap();
/// let params = InstrumentParams::new(100.0, 1.0).unwrap();
/// let put = VanillaOption::new(
///     stock,
///     params,
///     PayoffType::Put,
///     ExerciseStyle::European,
///     Direction::Long,
/// );
///
/// assert!((put.payoff(81.87) - 18.13).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct VanillaOption<T: Float> {
    underlying: Underlying<T>,
    params: InstrumentParams<T>,
    payoff_type: PayoffType,
    exercise_style: ExerciseStyle,
    direction: Direction,
    position: PositionParams<T>,
}

impl<T: Float> VanillaOption<T> {
    /// Creates a new vanilla option with an empty position.
    ///
    /// # Arguments
    /// * `underlying` - Market factor record
    /// * `params` - Validated strike and expiry
    /// * `payoff_type` - Call or Put
    /// * `exercise_style` - European or American
    /// * `direction` - Long or Short
    pub fn new(
        underlying: Underlying<T>,
        params: InstrumentParams<T>,
        payoff_type: PayoffType,
        exercise_style: ExerciseStyle,
        direction: Direction,
    ) -> Self {
        Self {
            underlying,
            params,
            payoff_type,
            exercise_style,
            direction,
            position: PositionParams::default(),
        }
    }

    /// Attaches position sizing to the option.
    pub fn with_position(mut self, position: PositionParams<T>) -> Self {
        self.position = position;
        self
    }

    /// Calculates the per-unit payoff for a given underlying level.
    #[inline]
    pub fn payoff(&self, level: T) -> T {
        self.direction.sign::<T>() * self.payoff_type.evaluate(level, self.params.strike())
    }

    /// Value of the whole holding given a per-unit option price.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::market_data::Underlying;
    /// use pricer_models::instruments::{
    ///     Direction, ExerciseStyle, InstrumentParams, PayoffType, PositionParams, VanillaOption,
    /// };
    ///
    /// let stock = Underlying::new(20.0_f64, 0.2, 0.0).unwrap();
    /// let call = VanillaOption::new(
    ///     stock,
    ///     InstrumentParams::new(21.0, 0.5).unwrap(),
    ///     PayoffType::Call,
    ///     ExerciseStyle::European,
    ///     Direction::Long,
    /// )
    /// .with_position(PositionParams::new(2, 150.0));
    ///
    /// assert_eq!(call.position_value(1.0), 200.0);
    /// assert_eq!(call.position_pnl(1.0), -100.0);
    /// ```
    pub fn position_value(&self, unit_price: T) -> T {
        T::from(self.position.total_units()).unwrap_or_else(T::zero) * unit_price
    }

    /// P&L of the whole holding given a per-unit option price, net of premium.
    pub fn position_pnl(&self, unit_price: T) -> T {
        self.position_value(unit_price) - self.position.total_cost()
    }

    /// Returns a reference to the instrument parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams<T> {
        &self.params
    }

    /// Returns the position sizing.
    #[inline]
    pub fn position(&self) -> &PositionParams<T> {
        &self.position
    }

    /// Returns the payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }

    /// Returns the trade direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.params.strike()
    }
}

impl<T: Float> InstrumentTrait<T> for VanillaOption<T> {
    #[inline]
    fn payoff(&self, level: T) -> T {
        VanillaOption::payoff(self, level)
    }

    #[inline]
    fn expiry(&self) -> T {
        self.params.expiry()
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
        match self.payoff_type {
            PayoffType::Call => "VanillaCall",
            PayoffType::Put => "VanillaPut",
        }
    }
}
