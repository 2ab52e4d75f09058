//! Lattice geometry: move factors, risk-neutral probability and discounting.
//!
//! For volatility `σ` and time step `dt`:
//!
//! - `u = exp(σ·√dt)`, `d = 1/u`
//! - per-step discount `exp(-r·dt)`
//! - up probability `p = (g - d) / (u - d)` where the growth factor `g`
//!   depends on the [`DriftConvention`]
//!
//! The node with `j` up moves after `step` moves sits at `S₀·u^(2j - step)`.

use num_traits::Float;

use super::cache::NodeIndex;
use super::error::LatticeError;

/// How the risk-free minus dividend drift enters the up probability.
///
/// # Variants
/// - `Annual`: `g = exp(r - q)`, the drift is not scaled by the step length.
///   Matches the plain pricer's historical results; exact only when `dt = 1`.
/// - `PerStep`: `g = exp((r - q)·dt)`, the textbook Cox-Ross-Rubinstein drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriftConvention {
    /// `exp(r - q)` regardless of step length
    Annual,
    /// `exp((r - q)·dt)`
    PerStep,
}

impl DriftConvention {
    /// Growth factor over one step.
    #[inline]
    pub fn growth<T: Float>(&self, net_drift: T, time_step: T) -> T {
        match self {
            DriftConvention::Annual => net_drift.exp(),
            DriftConvention::PerStep => (net_drift * time_step).exp(),
        }
    }

    /// Human-readable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DriftConvention::Annual => "annual",
            DriftConvention::PerStep => "per-step",
        }
    }
}

/// Validated geometry of a recombining binomial lattice.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::{DriftConvention, LatticeGeometry, NodeIndex};
///
/// let geometry =
///     LatticeGeometry::new(0.2_f64, 1.0, 0.05, 0.0, DriftConvention::PerStep).unwrap();
///
/// assert!((geometry.up() - 0.2_f64.exp()).abs() < 1e-12);
/// assert!((geometry.up() * geometry.down() - 1.0).abs() < 1e-12);
/// assert!((geometry.probability() - 0.577493).abs() < 1e-6);
/// assert!((geometry.level_at(100.0, NodeIndex::new(0, 1)) - 81.873075).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeGeometry<T: Float> {
    up: T,
    down: T,
    probability: T,
    discount: T,
    time_step: T,
    convention: DriftConvention,
}

impl<T: Float> LatticeGeometry<T> {
    /// Derives the lattice geometry.
    ///
    /// # Arguments
    /// * `volatility` - Annualised volatility `σ`
    /// * `time_step` - Step length in years (must be positive)
    /// * `risk_free_rate` - Continuously compounded rate `r`
    /// * `dividend_yield` - Continuously compounded yield `q`
    /// * `convention` - Drift convention for the up probability
    ///
    /// # Errors
    ///
    /// - `InvalidTimeStep` if `time_step` is non-positive or non-finite
    /// - `InvalidParameter` if any rate or the volatility is non-finite
    /// - `DegenerateProbability` if `p` falls outside `[0, 1]` or is not
    ///   finite (e.g. zero volatility, where `u = d`)
    pub fn new(
        volatility: T,
        time_step: T,
        risk_free_rate: T,
        dividend_yield: T,
        convention: DriftConvention,
    ) -> Result<Self, LatticeError> {
        if !(time_step > T::zero()) || !time_step.is_finite() {
            return Err(LatticeError::InvalidTimeStep {
                time_step: to_f64(time_step),
            });
        }
        for (name, value) in [
            ("volatility", volatility),
            ("risk_free_rate", risk_free_rate),
            ("dividend_yield", dividend_yield),
        ] {
            if !value.is_finite() {
                return Err(LatticeError::InvalidParameter {
                    name,
                    value: "must be finite".to_string(),
                });
            }
        }

        let up = (volatility * time_step.sqrt()).exp();
        let down = up.recip();
        let growth = convention.growth(risk_free_rate - dividend_yield, time_step);
        let probability = (growth - down) / (up - down);

        if !probability.is_finite() || probability < T::zero() || probability > T::one() {
            return Err(LatticeError::DegenerateProbability {
                probability: to_f64(probability),
            });
        }

        Ok(Self {
            up,
            down,
            probability,
            discount: (-risk_free_rate * time_step).exp(),
            time_step,
            convention,
        })
    }

    /// Up factor `u`.
    #[inline]
    pub fn up(&self) -> T {
        self.up
    }

    /// Down factor `d = 1/u`.
    #[inline]
    pub fn down(&self) -> T {
        self.down
    }

    /// Risk-neutral up probability `p`.
    #[inline]
    pub fn probability(&self) -> T {
        self.probability
    }

    /// Per-step discount factor `exp(-r·dt)`.
    #[inline]
    pub fn discount(&self) -> T {
        self.discount
    }

    /// Step length in years.
    #[inline]
    pub fn time_step(&self) -> T {
        self.time_step
    }

    /// Drift convention used for `p`.
    #[inline]
    pub fn convention(&self) -> DriftConvention {
        self.convention
    }

    /// Underlying level at `node`: `spot·u^(2j - step)`.
    #[inline]
    pub fn level_at(&self, spot: T, node: NodeIndex) -> T {
        let exponent = 2 * node.num_up_moves as i64 - node.step as i64;
        spot * self.up.powi(exponent as i32)
    }

    /// Time in years from the root to `node`.
    #[inline]
    pub fn time_at(&self, node: NodeIndex) -> T {
        T::from(node.step).unwrap_or_else(T::infinity) * self.time_step
    }

    /// Discounted expectation of the two child values.
    #[inline]
    pub fn rollback(&self, up_value: T, down_value: T) -> T {
        self.discount * (self.probability * up_value + (T::one() - self.probability) * down_value)
    }
}

fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_move_factors() {
        let geometry =
            LatticeGeometry::new(0.25_f64, 0.25, 0.035, 0.012, DriftConvention::PerStep).unwrap();
        assert_relative_eq!(geometry.up(), (0.25_f64 * 0.5).exp(), epsilon = 1e-14);
        assert_relative_eq!(geometry.up() * geometry.down(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(geometry.discount(), (-0.035_f64 * 0.25).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_probability_conventions() {
        let annual =
            LatticeGeometry::new(0.3_f64, 0.5, 0.05, 0.01, DriftConvention::Annual).unwrap();
        let per_step =
            LatticeGeometry::new(0.3_f64, 0.5, 0.05, 0.01, DriftConvention::PerStep).unwrap();

        let u = (0.3_f64 * 0.5_f64.sqrt()).exp();
        let d = 1.0 / u;
        assert_relative_eq!(
            annual.probability(),
            (0.04_f64.exp() - d) / (u - d),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            per_step.probability(),
            (0.02_f64.exp() - d) / (u - d),
            epsilon = 1e-12
        );
        assert!(annual.probability() > per_step.probability());
    }

    #[test]
    fn test_conventions_agree_for_unit_step() {
        let annual = LatticeGeometry::new(0.2_f64, 1.0, 0.05, 0.0, DriftConvention::Annual).unwrap();
        let per_step =
            LatticeGeometry::new(0.2_f64, 1.0, 0.05, 0.0, DriftConvention::PerStep).unwrap();
        assert_relative_eq!(annual.probability(), per_step.probability(), epsilon = 1e-15);
    }

    #[test]
    fn test_level_at_recombines() {
        let geometry =
            LatticeGeometry::new(0.2_f64, 1.0, 0.05, 0.0, DriftConvention::PerStep).unwrap();
        let spot = 100.0;
        assert_eq!(geometry.level_at(spot, NodeIndex::ROOT), spot);
        assert_relative_eq!(geometry.level_at(spot, NodeIndex::new(1, 2)), spot, epsilon = 1e-12);
        assert_relative_eq!(
            geometry.level_at(spot, NodeIndex::new(2, 3)),
            spot * geometry.up(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            geometry.level_at(spot, NodeIndex::new(0, 2)),
            spot * geometry.down() * geometry.down(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_time_at() {
        let geometry =
            LatticeGeometry::new(0.2_f64, 0.25, 0.05, 0.0, DriftConvention::PerStep).unwrap();
        assert_eq!(geometry.time_at(NodeIndex::new(0, 12)), 3.0);
    }

    #[test]
    fn test_rollback() {
        let geometry =
            LatticeGeometry::new(0.2_f64, 1.0, 0.05, 0.0, DriftConvention::PerStep).unwrap();
        let p = geometry.probability();
        assert_relative_eq!(
            geometry.rollback(0.0, 18.0),
            (-0.05_f64).exp() * (1.0 - p) * 18.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let result = LatticeGeometry::new(0.0_f64, 1.0, 0.05, 0.0, DriftConvention::PerStep);
        assert!(matches!(
            result,
            Err(LatticeError::DegenerateProbability { .. })
        ));
    }

    #[test]
    fn test_probability_above_one_rejected() {
        // drift far exceeds the up move
        let result = LatticeGeometry::new(0.01_f64, 1.0, 0.5, 0.0, DriftConvention::PerStep);
        match result {
            Err(LatticeError::DegenerateProbability { probability }) => assert!(probability > 1.0),
            other => panic!("Expected DegenerateProbability, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_time_step() {
        for dt in [0.0_f64, -1.0, f64::NAN, f64::INFINITY] {
            let result = LatticeGeometry::new(0.2, dt, 0.05, 0.0, DriftConvention::PerStep);
            assert!(matches!(result, Err(LatticeError::InvalidTimeStep { .. })));
        }
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let result = LatticeGeometry::new(0.2_f64, 1.0, f64::NAN, 0.0, DriftConvention::PerStep);
        match result {
            Err(LatticeError::InvalidParameter { name, .. }) => assert_eq!(name, "risk_free_rate"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }
}
