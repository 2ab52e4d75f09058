//! Underlying market factor record.

use num_traits::Float;

use super::error::MarketDataError;

/// Immutable market factor record for a single underlying.
///
/// Holds the starting level of the underlying (an index level, a share
/// price, a commodity price per unit), its annualised volatility and its
/// continuously-compounded dividend yield. All values are decimals
/// (25% = 0.25).
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_core::market_data::Underlying;
///
/// let index = Underlying::new(15_400.0_f64, 0.25, 0.012).unwrap();
/// assert_eq!(index.volatility(), 0.25);
/// assert_eq!(index.dividend_yield(), 0.012);
///
/// // Negative spot is rejected
/// assert!(Underlying::new(-1.0_f64, 0.25, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Underlying<T: Float> {
    spot: T,
    volatility: T,
    dividend_yield: T,
}

impl<T: Float> Underlying<T> {
    /// Creates a new underlying with validation.
    ///
    /// # Arguments
    /// * `spot` - Starting level (must be positive and finite)
    /// * `volatility` - Annualised volatility (must be non-negative and finite)
    /// * `dividend_yield` - Continuously-compounded dividend yield (must be finite)
    ///
    /// # Errors
    /// Returns `MarketDataError` if any field is out of range.
    pub fn new(spot: T, volatility: T, dividend_yield: T) -> Result<Self, MarketDataError> {
        if !(spot > T::zero()) || !spot.is_finite() {
            return Err(MarketDataError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility >= T::zero()) || !volatility.is_finite() {
            return Err(MarketDataError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !dividend_yield.is_finite() {
            return Err(MarketDataError::InvalidDividendYield {
                dividend_yield: dividend_yield.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            volatility,
            dividend_yield,
        })
    }

    /// Returns the starting level.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the continuously-compounded dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Converts a level of the underlying into a return relative to spot.
    ///
    /// `(level - spot) / spot`, as a decimal.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::market_data::Underlying;
    ///
    /// let stock = Underlying::new(50.0_f64, 0.3, 0.0).unwrap();
    /// assert!((stock.performance_in_percentage(40.0) + 0.2).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn performance_in_percentage(&self, level: T) -> T {
        (level - self.spot) / self.spot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let u = Underlying::new(100.0_f64, 0.2, 0.01).unwrap();
        assert_eq!(u.spot(), 100.0);
        assert_eq!(u.volatility(), 0.2);
        assert_eq!(u.dividend_yield(), 0.01);
    }

    #[test]
    fn test_zero_volatility_allowed() {
        assert!(Underlying::new(20.0_f64, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_negative_dividend_yield_allowed() {
        assert!(Underlying::new(20.0_f64, 0.1, -0.01).is_ok());
    }

    #[test]
    fn test_invalid_spot_zero() {
        let result = Underlying::new(0.0_f64, 0.2, 0.0);
        assert!(matches!(result, Err(MarketDataError::InvalidSpot { .. })));
    }

    #[test]
    fn test_invalid_spot_nan() {
        let result = Underlying::new(f64::NAN, 0.2, 0.0);
        assert!(matches!(result, Err(MarketDataError::InvalidSpot { .. })));
    }

    #[test]
    fn test_invalid_volatility_negative() {
        match Underlying::new(100.0_f64, -0.2, 0.0) {
            Err(MarketDataError::InvalidVolatility { volatility }) => {
                assert_eq!(volatility, -0.2);
            }
            _ => panic!("Expected InvalidVolatility error"),
        }
    }

    #[test]
    fn test_invalid_dividend_yield_infinite() {
        let result = Underlying::new(100.0_f64, 0.2, f64::INFINITY);
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidDividendYield { .. })
        ));
    }

    #[test]
    fn test_performance_at_spot_is_zero() {
        let u = Underlying::new(15_400.0_f64, 0.25, 0.012).unwrap();
        assert_eq!(u.performance_in_percentage(15_400.0), 0.0);
    }

    #[test]
    fn test_performance_up_and_down() {
        let u = Underlying::new(100.0_f64, 0.2, 0.0).unwrap();
        assert_relative_eq!(u.performance_in_percentage(130.0), 0.3, epsilon = 1e-12);
        assert_relative_eq!(u.performance_in_percentage(75.0), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_f32_compatibility() {
        let u = Underlying::new(100.0_f32, 0.2, 0.0).unwrap();
        assert!((u.performance_in_percentage(110.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_copy_and_equality() {
        let u1 = Underlying::new(100.0_f64, 0.2, 0.0).unwrap();
        let u2 = u1;
        assert_eq!(u1, u2);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_performance_round_trips_level(
                spot in 1.0_f64..50_000.0,
                ret in -0.99_f64..3.0,
            ) {
                let u = Underlying::new(spot, 0.2, 0.0).unwrap();
                let level = spot * (1.0 + ret);
                assert_relative_eq!(
                    u.performance_in_percentage(level),
                    ret,
                    epsilon = 1e-9
                );
            }
        }
    }
}
