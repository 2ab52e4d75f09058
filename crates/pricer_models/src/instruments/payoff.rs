//! Vanilla payoff type and trade direction.

use num_traits::Float;

/// Type of vanilla option payoff.
///
/// Payoffs are evaluated exactly (no smoothing): the lattice only ever
/// evaluates them at discrete node levels.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Evaluate the per-unit payoff for given level and strike.
    #[inline]
    pub fn evaluate<T: Float>(&self, level: T, strike: T) -> T {
        match self {
            PayoffType::Call => (level - strike).max(T::zero()),
            PayoffType::Put => (strike - level).max(T::zero()),
        }
    }

    /// Returns whether this payoff is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this payoff is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }
}

/// Trade direction.
///
/// # Variants
/// - `Long`: Holder of the option (receives the payoff)
/// - `Short`: Writer of the option (pays the payoff)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Long position
    #[default]
    Long,
    /// Short position
    Short,
}

impl Direction {
    /// Returns whether this is a long position.
    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, Direction::Long)
    }

    /// Returns whether this is a short position.
    #[inline]
    pub fn is_short(&self) -> bool {
        matches!(self, Direction::Short)
    }

    /// Returns +1 for long, -1 for short.
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            Direction::Long => T::one(),
            Direction::Short => -T::one(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_payoff() {
        assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
        assert_eq!(PayoffType::Call.evaluate(90.0_f64, 100.0), 0.0);
        assert_eq!(PayoffType::Call.evaluate(100.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_put_payoff() {
        assert_eq!(PayoffType::Put.evaluate(90.0_f64, 100.0), 10.0);
        assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_is_call_is_put() {
        assert!(PayoffType::Call.is_call());
        assert!(!PayoffType::Call.is_put());
        assert!(PayoffType::Put.is_put());
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Long.sign::<f64>(), 1.0);
        assert_eq!(Direction::Short.sign::<f64>(), -1.0);
        assert!(Direction::Short.is_short());
        assert!(Direction::default().is_long());
    }

    #[test]
    fn test_f32_compatibility() {
        let payoff = PayoffType::Put.evaluate(81.87_f32, 100.0);
        assert!((payoff - 18.13).abs() < 1e-3);
    }
}
