//! Common instrument parameters.
//!
//! This module provides shared parameter structures for
//! vanilla instruments with validation.

use num_traits::Float;

use super::error::InstrumentError;

/// Default number of underlying units covered by one listed contract.
pub const DEFAULT_UNITS_PER_CONTRACT: u32 = 100;

/// Strike and expiry shared by vanilla contracts.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentParams;
///
/// let params = InstrumentParams::new(100.0_f64, 1.0).unwrap();
/// assert_eq!(params.strike(), 100.0);
/// assert_eq!(params.expiry(), 1.0);
///
/// assert!(InstrumentParams::new(-100.0_f64, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentParams<T: Float> {
    strike: T,
    expiry: T,
}

impl<T: Float> InstrumentParams<T> {
    /// Creates new instrument parameters with validation.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive)
    /// * `expiry` - Time to expiry in years (must be positive)
    pub fn new(strike: T, expiry: T) -> Result<Self, InstrumentError> {
        if !(strike > T::zero()) || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(expiry > T::zero()) || !expiry.is_finite() {
            return Err(InstrumentError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self { strike, expiry })
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }
}

/// Position sizing for a holding of listed option contracts.
///
/// Does not affect the per-unit payoff; it scales a per-unit price into the
/// value and P&L of the whole holding.
///
/// # Examples
/// ```
/// use pricer_models::instruments::PositionParams;
///
/// let position = PositionParams::new(5, 2.5_f64);
/// assert_eq!(position.units_per_contract(), 100);
/// assert_eq!(position.total_units(), 500);
/// assert_eq!(position.total_cost(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionParams<T: Float> {
    contracts: u32,
    cost_per_contract: T,
    units_per_contract: u32,
}

impl<T: Float> PositionParams<T> {
    /// Creates a position with the default contract multiplier.
    pub fn new(contracts: u32, cost_per_contract: T) -> Self {
        Self {
            contracts,
            cost_per_contract,
            units_per_contract: DEFAULT_UNITS_PER_CONTRACT,
        }
    }

    /// Overrides the number of underlying units per contract.
    pub fn with_units_per_contract(mut self, units_per_contract: u32) -> Self {
        self.units_per_contract = units_per_contract;
        self
    }

    /// Returns the number of contracts held.
    #[inline]
    pub fn contracts(&self) -> u32 {
        self.contracts
    }

    /// Returns the premium paid per contract.
    #[inline]
    pub fn cost_per_contract(&self) -> T {
        self.cost_per_contract
    }

    /// Returns the contract multiplier.
    #[inline]
    pub fn units_per_contract(&self) -> u32 {
        self.units_per_contract
    }

    /// Returns the number of underlying units covered.
    #[inline]
    pub fn total_units(&self) -> u64 {
        u64::from(self.contracts) * u64::from(self.units_per_contract)
    }

    /// Returns the total premium paid for the holding.
    #[inline]
    pub fn total_cost(&self) -> T {
        T::from(self.contracts).unwrap_or_else(T::zero) * self.cost_per_contract
    }
}

impl<T: Float> Default for PositionParams<T> {
    fn default() -> Self {
        Self::new(0, T::zero())
    }
}
