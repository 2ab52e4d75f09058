//! Binomial tree pricer with a knockout barrier overlay.
//!
//! The barrier is checked per node rather than per path: a node observed
//! inside the window whose return from the root is below the threshold is
//! worth zero, whichever path reached it. Paths that breach the barrier and
//! recover before the next observed node are not knocked out.

use num_traits::Float;
use pricer_core::market_data::Underlying;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentTrait;

use super::cache::{NodeCache, NodeIndex};
use super::config::{KnockoutConfig, LatticeConfig};
use super::engine::{value_lattice, NodeFilter};
use super::error::LatticeError;
use super::geometry::{DriftConvention, LatticeGeometry};

/// Knockout filter measuring returns from the underlying's spot.
struct BarrierFilter<'a, T: Float> {
    geometry: &'a LatticeGeometry<T>,
    knockout: &'a KnockoutConfig<T>,
    underlying: &'a Underlying<T>,
}

impl<T: Float> NodeFilter<T> for BarrierFilter<'_, T> {
    #[inline]
    fn knocked_out(&self, node: NodeIndex, level: T) -> bool {
        self.geometry.time_at(node) <= self.knockout.observation_end()
            && self.underlying.performance_in_percentage(level) < self.knockout.threshold()
    }
}

/// Binomial tree pricer with a knockout barrier.
///
/// Same memoized backward induction as
/// [`BinomialTreePricer`](super::BinomialTreePricer); before each node is
/// looked up, a node at time `step·dt ≤ observation_end` whose underlying
/// return is strictly below the threshold is valued at zero and left
/// uncached.
///
/// Uses [`DriftConvention::PerStep`] unless the configuration overrides it.
/// Only European instruments are supported.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::Underlying;
/// use pricer_core::traits::Priceable;
/// use pricer_models::instruments::BarrierBoosterNote;
/// use pricer_pricing::lattice::{KnockoutConfig, KnockoutTreePricer, LatticeConfig};
///
/// let index = Underlying::new(15400.0_f64, 0.25, 0.012).unwrap();
/// let note = BarrierBoosterNote::builder(index, -0.3, 0.6)
///     .term(6.0)
///     .build()
///     .unwrap();
/// let config = LatticeConfig::builder()
///     .time_step(1.0)
///     .term(6.0)
///     .risk_free_rate(0.035)
///     .build()
///     .unwrap();
///
/// let mut pricer =
///     KnockoutTreePricer::new(config, KnockoutConfig::new(-0.2).unwrap(), note).unwrap();
/// let price = pricer.price().unwrap();
/// assert!((price - 0.243106).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct KnockoutTreePricer<T: Float, I: InstrumentTrait<T>> {
    config: LatticeConfig<T>,
    knockout: KnockoutConfig<T>,
    instrument: I,
    geometry: LatticeGeometry<T>,
    cache: NodeCache<T>,
}

impl<T: Float, I: InstrumentTrait<T>> KnockoutTreePricer<T, I> {
    /// Binds a configuration, knockout settings and an instrument.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError` if:
    /// - the instrument allows early exercise (`UnsupportedExercise`)
    /// - the configuration is invalid
    /// - the lattice horizon does not match the instrument's expiry
    /// - the risk-neutral probability is degenerate
    pub fn new(
        config: LatticeConfig<T>,
        knockout: KnockoutConfig<T>,
        instrument: I,
    ) -> Result<Self, LatticeError> {
        let exercise_style = instrument.exercise_style();
        if exercise_style.allows_early_exercise() {
            return Err(LatticeError::UnsupportedExercise {
                pricer: "KnockoutTreePricer",
                exercise: exercise_style.name(),
            });
        }
        config.validate()?;
        config.check_horizon(instrument.expiry())?;

        let underlying = instrument.underlying();
        let geometry = LatticeGeometry::new(
            underlying.volatility(),
            config.time_step(),
            config.risk_free_rate(),
            underlying.dividend_yield(),
            config.drift_convention().unwrap_or(DriftConvention::PerStep),
        )?;

        let cache = NodeCache::with_capacity_for(config.num_steps());
        Ok(Self {
            config,
            knockout,
            instrument,
            geometry,
            cache,
        })
    }

    /// Memoized value of `node` from the last [`price`](Priceable::price) call.
    ///
    /// Knocked-out nodes are never cached and return `None`.
    #[inline]
    pub fn value_at(&self, node: NodeIndex) -> Option<T> {
        self.cache.get(node)
    }

    /// Number of nodes valued by the last [`price`](Priceable::price) call.
    #[inline]
    pub fn nodes_cached(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether `node` is knocked out.
    pub fn is_knocked_out(&self, node: NodeIndex) -> bool {
        let filter = BarrierFilter {
            geometry: &self.geometry,
            knockout: &self.knockout,
            underlying: self.instrument.underlying(),
        };
        let level = self.geometry.level_at(filter.underlying.spot(), node);
        filter.knocked_out(node, level)
    }

    /// Returns the lattice geometry.
    #[inline]
    pub fn geometry(&self) -> &LatticeGeometry<T> {
        &self.geometry
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &LatticeConfig<T> {
        &self.config
    }

    /// Returns the knockout settings.
    #[inline]
    pub fn knockout(&self) -> &KnockoutConfig<T> {
        &self.knockout
    }

    /// Returns the instrument being priced.
    #[inline]
    pub fn instrument(&self) -> &I {
        &self.instrument
    }
}

impl<T: Float, I: InstrumentTrait<T>> Priceable<T> for KnockoutTreePricer<T, I> {
    fn price(&mut self) -> Result<T, PricingError> {
        self.cache.clear();
        let filter = BarrierFilter {
            geometry: &self.geometry,
            knockout: &self.knockout,
            underlying: self.instrument.underlying(),
        };
        let value = value_lattice(
            &self.geometry,
            &self.instrument,
            self.config.num_steps(),
            &filter,
            &mut self.cache,
        )?;
        Ok(value)
    }
}
