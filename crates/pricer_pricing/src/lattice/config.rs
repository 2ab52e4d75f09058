//! Lattice configuration.
//!
//! This module provides the validated step layout and rate shared by both
//! pricers, and the knockout observation settings used by
//! [`KnockoutTreePricer`](super::KnockoutTreePricer).

use num_traits::Float;

use super::error::LatticeError;
use super::geometry::DriftConvention;

/// Maximum number of time steps allowed in a lattice.
pub const MAX_STEPS: usize = 10_000;

/// Default end of the knockout observation window, in years from the root.
pub const DEFAULT_OBSERVATION_END: f64 = 3.0;

/// Relative tolerance when deriving the step count from a term.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Lattice configuration.
///
/// Immutable configuration specifying the step length, the number of steps
/// and the risk-free rate. Use [`LatticeConfigBuilder`] to construct
/// instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::LatticeConfig;
///
/// let config = LatticeConfig::builder()
///     .time_step(1.0 / 12.0)
///     .term(2.0)
///     .risk_free_rate(0.035)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.num_steps(), 24);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeConfig<T: Float> {
    /// Step length in years.
    time_step: T,
    /// Number of steps from root to leaves.
    num_steps: usize,
    /// Continuously compounded risk-free rate.
    risk_free_rate: T,
    /// Drift convention override; each pricer has its own default.
    drift_convention: Option<DriftConvention>,
}

impl<T: Float> LatticeConfig<T> {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder<T> {
        LatticeConfigBuilder::default()
    }

    /// Returns the step length in years.
    #[inline]
    pub fn time_step(&self) -> T {
        self.time_step
    }

    /// Returns the number of steps.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn risk_free_rate(&self) -> T {
        self.risk_free_rate
    }

    /// Returns the drift convention override, if any.
    #[inline]
    pub fn drift_convention(&self) -> Option<DriftConvention> {
        self.drift_convention
    }

    /// Returns the lattice horizon `num_steps · time_step` in years.
    pub fn horizon(&self) -> T {
        T::from(self.num_steps).unwrap_or_else(T::infinity) * self.time_step
    }

    /// Checks that the lattice horizon reaches `expiry`, within the same
    /// relative tolerance used when deriving steps from a term.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::HorizonMismatch` otherwise.
    pub fn check_horizon(&self, expiry: T) -> Result<(), LatticeError> {
        let horizon = self.horizon().to_f64().unwrap_or(f64::NAN);
        let expiry = expiry.to_f64().unwrap_or(f64::NAN);
        let tolerance = STEP_COUNT_TOLERANCE * expiry.abs().max(1.0);
        if (horizon - expiry).abs() <= tolerance {
            Ok(())
        } else {
            Err(LatticeError::HorizonMismatch { horizon, expiry })
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError` if:
    /// - `time_step` is non-positive or non-finite
    /// - `num_steps` is greater than 10,000
    /// - `risk_free_rate` is non-finite
    pub fn validate(&self) -> Result<(), LatticeError> {
        if !(self.time_step > T::zero()) || !self.time_step.is_finite() {
            return Err(LatticeError::InvalidTimeStep {
                time_step: self.time_step.to_f64().unwrap_or(f64::NAN),
            });
        }
        if self.num_steps > MAX_STEPS {
            return Err(LatticeError::InvalidStepCount {
                num_steps: self.num_steps,
            });
        }
        if !self.risk_free_rate.is_finite() {
            return Err(LatticeError::InvalidParameter {
                name: "risk_free_rate",
                value: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`LatticeConfig`].
///
/// The step count is given either directly with
/// [`num_steps`](LatticeConfigBuilder::num_steps) or derived from
/// [`term`](LatticeConfigBuilder::term), which must then be an integral
/// multiple of the time step.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{DriftConvention, LatticeConfig};
///
/// let config = LatticeConfig::builder()
///     .time_step(0.5)
///     .num_steps(12)
///     .risk_free_rate(0.05)
///     .drift_convention(DriftConvention::PerStep)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.horizon(), 6.0);
/// assert!(LatticeConfig::<f64>::builder()
///     .time_step(0.4)
///     .term(1.0)
///     .risk_free_rate(0.05)
///     .build()
///     .is_err());
/// ```
#[derive(Clone, Debug)]
pub struct LatticeConfigBuilder<T: Float> {
    time_step: Option<T>,
    num_steps: Option<usize>,
    term: Option<T>,
    risk_free_rate: Option<T>,
    drift_convention: Option<DriftConvention>,
}

impl<T: Float> Default for LatticeConfigBuilder<T> {
    fn default() -> Self {
        Self {
            time_step: None,
            num_steps: None,
            term: None,
            risk_free_rate: None,
            drift_convention: None,
        }
    }
}

impl<T: Float> LatticeConfigBuilder<T> {
    /// Sets the step length in years.
    #[inline]
    pub fn time_step(mut self, time_step: T) -> Self {
        self.time_step = Some(time_step);
        self
    }

    /// Sets the number of steps.
    ///
    /// # Arguments
    ///
    /// * `num_steps` - Number of steps in [0, 10_000]
    #[inline]
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = Some(num_steps);
        self
    }

    /// Sets the term in years; the step count becomes `term / time_step`.
    #[inline]
    pub fn term(mut self, term: T) -> Self {
        self.term = Some(term);
        self
    }

    /// Sets the continuously compounded risk-free rate.
    #[inline]
    pub fn risk_free_rate(mut self, risk_free_rate: T) -> Self {
        self.risk_free_rate = Some(risk_free_rate);
        self
    }

    /// Overrides the pricer's default drift convention.
    #[inline]
    pub fn drift_convention(mut self, drift_convention: DriftConvention) -> Self {
        self.drift_convention = Some(drift_convention);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError` if:
    /// - `time_step` or `risk_free_rate` not set or invalid
    /// - neither `num_steps` nor `term` is set, or both are set and disagree
    /// - `term` is negative, non-finite or not an integral multiple of `time_step`
    /// - the step count exceeds 10,000
    pub fn build(self) -> Result<LatticeConfig<T>, LatticeError> {
        let time_step = self.time_step.ok_or(LatticeError::InvalidParameter {
            name: "time_step",
            value: "must be specified".to_string(),
        })?;

        let risk_free_rate = self.risk_free_rate.ok_or(LatticeError::InvalidParameter {
            name: "risk_free_rate",
            value: "must be specified".to_string(),
        })?;

        let num_steps = match (self.num_steps, self.term) {
            (Some(num_steps), None) => num_steps,
            (None, Some(term)) => steps_for_term(term, time_step)?,
            (Some(num_steps), Some(term)) => {
                if steps_for_term(term, time_step)? != num_steps {
                    return Err(LatticeError::InvalidParameter {
                        name: "term",
                        value: format!("does not match num_steps = {}", num_steps),
                    });
                }
                num_steps
            }
            (None, None) => {
                return Err(LatticeError::InvalidParameter {
                    name: "num_steps",
                    value: "num_steps or term must be specified".to_string(),
                })
            }
        };

        let config = LatticeConfig {
            time_step,
            num_steps,
            risk_free_rate,
            drift_convention: self.drift_convention,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Derives `term / time_step`, rejecting non-integral ratios.
fn steps_for_term<T: Float>(term: T, time_step: T) -> Result<usize, LatticeError> {
    if !(time_step > T::zero()) || !time_step.is_finite() {
        return Err(LatticeError::InvalidTimeStep {
            time_step: time_step.to_f64().unwrap_or(f64::NAN),
        });
    }
    let term_f64 = term.to_f64().unwrap_or(f64::NAN);
    if !term_f64.is_finite() || term_f64 < 0.0 {
        return Err(LatticeError::InvalidParameter {
            name: "term",
            value: format!("must be finite and non-negative, got {}", term_f64),
        });
    }

    let ratio = (term / time_step).to_f64().unwrap_or(f64::NAN);
    let rounded = ratio.round();
    if (ratio - rounded).abs() > STEP_COUNT_TOLERANCE * rounded.max(1.0) {
        return Err(LatticeError::NonIntegralStepCount {
            term: term_f64,
            time_step: time_step.to_f64().unwrap_or(f64::NAN),
        });
    }
    if rounded > MAX_STEPS as f64 {
        return Err(LatticeError::InvalidStepCount {
            num_steps: rounded.min(usize::MAX as f64) as usize,
        });
    }
    Ok(rounded as usize)
}

/// Knockout barrier observation settings.
///
/// A node observed at time `t ≤ observation_end` whose underlying return
/// from the root is strictly below `threshold` is worth zero.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::KnockoutConfig;
///
/// let knockout = KnockoutConfig::new(-0.2_f64).unwrap();
/// assert_eq!(knockout.threshold(), -0.2);
/// assert_eq!(knockout.observation_end(), 3.0);
///
/// let knockout = knockout.with_observation_end(1.5).unwrap();
/// assert_eq!(knockout.observation_end(), 1.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnockoutConfig<T: Float> {
    threshold: T,
    observation_end: T,
}

impl<T: Float> KnockoutConfig<T> {
    /// Creates knockout settings observed over the default window.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Return from the root below which a node is knocked out
    pub fn new(threshold: T) -> Result<Self, LatticeError> {
        if !threshold.is_finite() {
            return Err(LatticeError::InvalidParameter {
                name: "threshold",
                value: "must be finite".to_string(),
            });
        }
        let observation_end =
            T::from(DEFAULT_OBSERVATION_END).ok_or(LatticeError::InvalidParameter {
                name: "observation_end",
                value: "not representable".to_string(),
            })?;
        Ok(Self {
            threshold,
            observation_end,
        })
    }

    /// Replaces the end of the observation window.
    ///
    /// # Arguments
    ///
    /// * `observation_end` - Years from the root (must be finite and non-negative)
    pub fn with_observation_end(mut self, observation_end: T) -> Result<Self, LatticeError> {
        if !observation_end.is_finite() || observation_end < T::zero() {
            return Err(LatticeError::InvalidParameter {
                name: "observation_end",
                value: format!(
                    "must be finite and non-negative, got {}",
                    observation_end.to_f64().unwrap_or(f64::NAN)
                ),
            });
        }
        self.observation_end = observation_end;
        Ok(self)
    }

    /// Returns the knockout return threshold.
    #[inline]
    pub fn threshold(&self) -> T {
        self.threshold
    }

    /// Returns the end of the observation window in years.
    #[inline]
    pub fn observation_end(&self) -> T {
        self.observation_end
    }
}
