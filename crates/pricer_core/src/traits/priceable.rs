//! Trait for priceable entities.
//!
//! A pricer bound to one instrument and one set of model parameters
//! implements [`Priceable`] and returns a single root price per call.

use num_traits::Float;

use crate::types::PricingError;

/// Trait for entities that can be priced.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// # Design Philosophy
///
/// Implementors own any intermediate state (for example a node cache) and
/// take `&mut self` so that state can be rebuilt on every call. Each call
/// must be an independent pricing run: nothing computed by an earlier call
/// may leak into the next one.
///
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_core::types::PricingError;
///
/// struct FixedValue(f64);
///
/// impl Priceable<f64> for FixedValue {
///     fn price(&mut self) -> Result<f64, PricingError> {
///         Ok(self.0)
///     }
/// }
///
/// let mut fixed = FixedValue(7.29);
/// assert_eq!(fixed.price().unwrap(), 7.29);
/// ```
pub trait Priceable<T: Float> {
    /// Calculate the price of the bound instrument.
    ///
    /// # Errors
    /// Returns [`PricingError`] when the computation cannot produce a
    /// finite, well-defined value.
    fn price(&mut self) -> Result<T, PricingError>;
}
