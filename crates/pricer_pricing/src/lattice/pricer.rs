//! Plain recombining binomial tree pricer.

use num_traits::Float;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentTrait;

use super::cache::{NodeCache, NodeIndex};
use super::config::LatticeConfig;
use super::engine::{value_lattice, NoKnockout};
use super::error::LatticeError;
use super::geometry::{DriftConvention, LatticeGeometry};

/// Binomial tree pricer with memoized node values.
///
/// Prices any [`InstrumentTrait`] instrument by backward induction from the
/// leaves at `num_steps`. American instruments take the larger of the
/// continuation value and the immediate payoff at every interior node.
///
/// Uses [`DriftConvention::Annual`] unless the configuration overrides it.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::Underlying;
/// use pricer_core::traits::Priceable;
/// use pricer_models::instruments::{
///     Direction, ExerciseStyle, InstrumentParams, PayoffType, VanillaOption,
/// };
/// use pricer_pricing::lattice::{BinomialTreePricer, LatticeConfig, NodeIndex};
///
/// let put = VanillaOption::new(
///     Underlying::new(100.0_f64, 0.2, 0.0).unwrap(),
///     InstrumentParams::new(100.0, 1.0).unwrap(),
///     PayoffType::Put,
///     ExerciseStyle::European,
///     Direction::Long,
/// );
/// let config = LatticeConfig::builder()
///     .time_step(1.0)
///     .num_steps(1)
///     .risk_free_rate(0.05)
///     .build()
///     .unwrap();
///
/// let mut pricer = BinomialTreePricer::new(config, put).unwrap();
/// let price = pricer.price().unwrap();
///
/// assert!((price - 7.2852).abs() < 1e-4);
/// assert_eq!(pricer.nodes_cached(), 3);
/// assert_eq!(pricer.value_at(NodeIndex::ROOT), Some(price));
/// ```
#[derive(Debug, Clone)]
pub struct BinomialTreePricer<T: Float, I: InstrumentTrait<T>> {
    config: LatticeConfig<T>,
    instrument: I,
    geometry: LatticeGeometry<T>,
    cache: NodeCache<T>,
}

impl<T: Float, I: InstrumentTrait<T>> BinomialTreePricer<T, I> {
    /// Binds a configuration and an instrument.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError` if the configuration is invalid, its horizon
    /// does not match the instrument's expiry, or the risk-neutral
    /// probability is degenerate.
    pub fn new(config: LatticeConfig<T>, instrument: I) -> Result<Self, LatticeError> {
        config.validate()?;
        config.check_horizon(instrument.expiry())?;

        let underlying = instrument.underlying();
        let geometry = LatticeGeometry::new(
            underlying.volatility(),
            config.time_step(),
            config.risk_free_rate(),
            underlying.dividend_yield(),
            config.drift_convention().unwrap_or(DriftConvention::Annual),
        )?;

        let cache = NodeCache::with_capacity_for(config.num_steps());
        Ok(Self {
            config,
            instrument,
            geometry,
            cache,
        })
    }

    /// Memoized value of `node` from the last [`price`](Priceable::price) call.
    #[inline]
    pub fn value_at(&self, node: NodeIndex) -> Option<T> {
        self.cache.get(node)
    }

    /// Number of nodes valued by the last [`price`](Priceable::price) call.
    #[inline]
    pub fn nodes_cached(&self) -> usize {
        self.cache.len()
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

    /// Returns the instrument being priced.
    #[inline]
    pub fn instrument(&self) -> &I {
        &self.instrument
    }
}

impl<T: Float, I: InstrumentTrait<T>> Priceable<T> for BinomialTreePricer<T, I> {
    fn price(&mut self) -> Result<T, PricingError> {
        self.cache.clear();
        let value = value_lattice(
            &self.geometry,
            &self.instrument,
            self.config.num_steps(),
            &NoKnockout,
            &mut self.cache,
        )?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::config::MAX_STEPS;
    use crate::lattice::node_count;
    use approx::assert_relative_eq;
    use pricer_core::market_data::Underlying;
    use pricer_models::instruments::{
        BarrierBoosterNote, Direction, ExerciseStyle, Instrument, InstrumentParams, PayoffType,
        VanillaOption,
    };

    fn vanilla(
        spot: f64,
        vol: f64,
        q: f64,
        strike: f64,
        term: f64,
        payoff_type: PayoffType,
        style: ExerciseStyle,
    ) -> VanillaOption<f64> {
        VanillaOption::new(
            Underlying::new(spot, vol, q).unwrap(),
            InstrumentParams::new(strike, term).unwrap(),
            payoff_type,
            style,
            Direction::Long,
        )
    }

    fn config(time_step: f64, num_steps: usize, rate: f64) -> LatticeConfig<f64> {
        LatticeConfig::builder()
            .time_step(time_step)
            .num_steps(num_steps)
            .risk_free_rate(rate)
            .build()
            .unwrap()
    }

    /// Unmemoized reference: visits every path, `2^n` leaves.
    fn naive_value<I: InstrumentTrait<f64>>(
        geometry: &LatticeGeometry<f64>,
        instrument: &I,
        num_steps: usize,
        node: NodeIndex,
    ) -> f64 {
        let level = geometry.level_at(instrument.underlying().spot(), node);
        if node.step >= num_steps {
            return instrument.payoff(level);
        }
        let value = geometry.rollback(
            naive_value(geometry, instrument, num_steps, node.up()),
            naive_value(geometry, instrument, num_steps, node.down()),
        );
        if instrument.exercise_style().allows_early_exercise() {
            value.max(instrument.payoff(level))
        } else {
            value
        }
    }

    #[test]
    fn test_single_step_put() {
        let put = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Put, ExerciseStyle::European);
        let mut pricer = BinomialTreePricer::new(config(1.0, 1, 0.05), put).unwrap();
        let price = pricer.price().unwrap();

        let u = 0.2_f64.exp();
        let d = 1.0 / u;
        let p = (0.05_f64.exp() - d) / (u - d);
        assert_relative_eq!(pricer.geometry().probability(), p, epsilon = 1e-12);
        assert_relative_eq!(p, 0.5774931963561243, epsilon = 1e-12);
        assert_relative_eq!(
            price,
            (-0.05_f64).exp() * (1.0 - p) * (100.0 - 100.0 * d),
            epsilon = 1e-10
        );
        assert_relative_eq!(price, 7.285227414695336, epsilon = 1e-10);
    }

    #[test]
    fn test_american_put_two_steps() {
        let put = vanilla(50.0, 0.3, 0.0, 52.0, 2.0, PayoffType::Put, ExerciseStyle::American);
        let mut pricer = BinomialTreePricer::new(config(1.0, 2, 0.05), put).unwrap();
        assert_relative_eq!(pricer.price().unwrap(), 7.428401902704835, epsilon = 1e-10);
    }

    #[test]
    fn test_memoized_matches_naive_recursion() {
        for num_steps in [1, 2, 5, 8, 12] {
            for payoff_type in [PayoffType::Call, PayoffType::Put] {
                for style in [ExerciseStyle::European, ExerciseStyle::American] {
                    let option = vanilla(100.0, 0.25, 0.01, 105.0, 1.0, payoff_type, style);
                    let config = config(1.0 / num_steps as f64, num_steps, 0.04);
                    let mut pricer = BinomialTreePricer::new(config, option).unwrap();
                    let memoized = pricer.price().unwrap();
                    let naive = naive_value(
                        pricer.geometry(),
                        pricer.instrument(),
                        num_steps,
                        NodeIndex::ROOT,
                    );
                    assert_relative_eq!(memoized, naive, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_node_count_is_quadratic() {
        for num_steps in [1, 6, 50, 200] {
            let call =
                vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Call, ExerciseStyle::European);
            let config = LatticeConfig::builder()
                .time_step(1.0 / num_steps as f64)
                .num_steps(num_steps)
                .risk_free_rate(0.05)
                .drift_convention(DriftConvention::PerStep)
                .build()
                .unwrap();
            let mut pricer = BinomialTreePricer::new(config, call).unwrap();
            pricer.price().unwrap();
            assert_eq!(pricer.nodes_cached(), node_count(num_steps));
        }
    }

    #[test]
    fn test_annual_drift_rejects_fine_steps() {
        // exp(r) outgrows u = exp(0.2 * sqrt(0.02)), so p > 1
        let call = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Call, ExerciseStyle::European);
        match BinomialTreePricer::new(config(0.02, 50, 0.05), call) {
            Err(LatticeError::DegenerateProbability { probability }) => {
                assert!(probability > 1.0)
            }
            other => panic!("Expected DegenerateProbability, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_horizon_mismatch_rejected() {
        let put = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Put, ExerciseStyle::European);
        let result = BinomialTreePricer::new(config(1.0, 6, 0.05), put);
        assert!(matches!(
            result,
            Err(LatticeError::HorizonMismatch { .. })
        ));
    }

    #[test]
    fn test_put_call_parity_per_step() {
        let (spot, strike, rate, q, term, n) = (100.0, 95.0, 0.05, 0.02, 1.0, 200);
        let config = LatticeConfig::builder()
            .time_step(term / n as f64)
            .num_steps(n)
            .risk_free_rate(rate)
            .drift_convention(DriftConvention::PerStep)
            .build()
            .unwrap();

        let call = vanilla(spot, 0.3, q, strike, term, PayoffType::Call, ExerciseStyle::European);
        let put = vanilla(spot, 0.3, q, strike, term, PayoffType::Put, ExerciseStyle::European);
        let call_price = BinomialTreePricer::new(config.clone(), call)
            .unwrap()
            .price()
            .unwrap();
        let put_price = BinomialTreePricer::new(config, put).unwrap().price().unwrap();

        let forward_value = spot * (-q * term).exp() - strike * (-rate * term).exp();
        assert_relative_eq!(call_price - put_price, forward_value, epsilon = 1e-8);
    }

    #[test]
    fn test_american_at_least_european() {
        for payoff_type in [PayoffType::Call, PayoffType::Put] {
            for strike in [80.0, 100.0, 120.0] {
                let european =
                    vanilla(100.0, 0.3, 0.03, strike, 2.0, payoff_type, ExerciseStyle::European);
                let american =
                    vanilla(100.0, 0.3, 0.03, strike, 2.0, payoff_type, ExerciseStyle::American);
                let config = config(0.1, 20, 0.05);
                let e = BinomialTreePricer::new(config.clone(), european)
                    .unwrap()
                    .price()
                    .unwrap();
                let a = BinomialTreePricer::new(config, american)
                    .unwrap()
                    .price()
                    .unwrap();
                assert!(a >= e - 1e-12, "American {} < European {}", a, e);
            }
        }
    }

    #[test]
    fn test_recombined_nodes_share_value() {
        let put = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Put, ExerciseStyle::American);
        let mut pricer = BinomialTreePricer::new(config(0.25, 4, 0.05), put).unwrap();
        pricer.price().unwrap();

        let up_down = NodeIndex::ROOT.up().down();
        let down_up = NodeIndex::ROOT.down().up();
        assert_eq!(pricer.value_at(up_down), pricer.value_at(down_up));
        assert!(pricer.value_at(up_down).is_some());
        assert_eq!(pricer.value_at(NodeIndex::new(0, 5)), None);
    }

    #[test]
    fn test_repeated_pricing_is_stable() {
        let call = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Call, ExerciseStyle::American);
        let mut pricer = BinomialTreePricer::new(config(0.1, 10, 0.05), call).unwrap();
        let first = pricer.price().unwrap();
        let second = pricer.price().unwrap();
        assert_eq!(first, second);
        assert_eq!(pricer.nodes_cached(), node_count(10));
    }

    #[test]
    fn test_short_position_negates_price() {
        let long = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Call, ExerciseStyle::European);
        let short = VanillaOption::new(
            Underlying::new(100.0, 0.2, 0.0).unwrap(),
            InstrumentParams::new(100.0, 1.0).unwrap(),
            PayoffType::Call,
            ExerciseStyle::European,
            Direction::Short,
        );
        let config = config(0.1, 10, 0.05);
        let long_price = BinomialTreePricer::new(config.clone(), long)
            .unwrap()
            .price()
            .unwrap();
        let short_price = BinomialTreePricer::new(config, short).unwrap().price().unwrap();
        assert_relative_eq!(long_price, -short_price, epsilon = 1e-12);
    }

    #[test]
    fn test_plain_note_scenario() {
        let index = Underlying::new(15400.0, 0.25, 0.012).unwrap();
        let note = BarrierBoosterNote::builder(index, -0.3, 0.6)
            .term(6.0)
            .build()
            .unwrap();
        let mut pricer =
            BinomialTreePricer::new(config(1.0, 6, 0.035), Instrument::from(note)).unwrap();
        assert_relative_eq!(pricer.price().unwrap(), 0.2714574904387224, epsilon = 1e-10);
        assert_eq!(pricer.nodes_cached(), 28);
    }

    #[test]
    fn test_deep_lattice_is_stack_safe() {
        let call = vanilla(100.0, 0.2, 0.0, 100.0, 1.0, PayoffType::Call, ExerciseStyle::European);
        let num_steps = MAX_STEPS / 4;
        let config = LatticeConfig::builder()
            .time_step(1.0 / num_steps as f64)
            .num_steps(num_steps)
            .risk_free_rate(0.05)
            .drift_convention(DriftConvention::PerStep)
            .build()
            .unwrap();
        let mut pricer = BinomialTreePricer::new(config, call).unwrap();
        let price = pricer.price().unwrap();
        assert_eq!(pricer.nodes_cached(), node_count(num_steps));
        // Black-Scholes value 10.4506
        assert_relative_eq!(price, 10.4506, epsilon = 1e-2);
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let call = vanilla(100.0, 0.0, 0.0, 100.0, 1.0, PayoffType::Call, ExerciseStyle::European);
        let result = BinomialTreePricer::new(config(1.0, 1, 0.05), call);
        assert!(matches!(
            result,
            Err(LatticeError::DegenerateProbability { .. })
        ));
    }

    #[test]
    fn test_non_finite_payoff_reported() {
        struct Exploding {
            underlying: Underlying<f64>,
        }

        impl InstrumentTrait<f64> for Exploding {
            fn payoff(&self, _level: f64) -> f64 {
                f64::INFINITY
            }
            fn expiry(&self) -> f64 {
                2.0
            }
            fn exercise_style(&self) -> ExerciseStyle {
                ExerciseStyle::European
            }
            fn underlying(&self) -> &Underlying<f64> {
                &self.underlying
            }
        }

        let instrument = Exploding {
            underlying: Underlying::new(100.0, 0.2, 0.0).unwrap(),
        };
        let mut pricer = BinomialTreePricer::new(config(1.0, 2, 0.05), instrument).unwrap();
        assert!(matches!(
            pricer.price(),
            Err(PricingError::NumericalInstability(_))
        ));
    }
}
