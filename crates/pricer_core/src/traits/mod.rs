//! Core traits for priceable instruments.
//!
//! This module defines fundamental abstractions for:
//! - Generic floating-point operations (`Float` trait)
//! - Price calculation (`Priceable` trait)
//!
//! All traits are designed for static dispatch (enum-based or generic).
//! Do NOT use `Box<dyn Trait>` dynamic dispatch on the pricing hot path.

/// Generic floating-point trait for numeric computations.
///
/// All lattice quantities (levels, factors, probabilities, node values)
/// are generic over this trait, so the same engine runs on `f64` and `f32`.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::Priceable;
