//! Scenario configuration management.
//!
//! Handles loading of note scenarios from TOML files with environment
//! variable override support. Without a file, the built-in S1-S5 index note
//! set is used.
//!
//! ```toml
//! output = "note_results.txt"
//!
//! [market]
//! spot = 15400.0
//! volatility = 0.25
//! dividend_yield = 0.012
//!
//! [lattice]
//! time_step = 1.0
//! risk_free_rate = 0.035
//! knockout_threshold = -0.2
//! observation_end = 3.0
//!
//! [[scenarios]]
//! id = "S1"
//! term = 6.0
//! barrier_level = -0.3
//! boosted_return = 0.6
//! ```

use std::path::{Path, PathBuf};

use pricer_core::market_data::Underlying;
use pricer_models::instruments::{BarrierBoosterNote, InstrumentError};
use pricer_pricing::lattice::{KnockoutConfig, LatticeConfig, LatticeError, MAX_STEPS};
use serde::Deserialize;
use thiserror::Error;

/// Market factor settings shared by every scenario
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MarketSettings {
    /// Reference level of the underlying index
    pub spot: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Continuously compounded dividend yield
    #[serde(default)]
    pub dividend_yield: f64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            spot: 15400.0,
            volatility: 0.25,
            dividend_yield: 0.012,
        }
    }
}

impl MarketSettings {
    /// Build the validated underlying record
    pub fn underlying(&self) -> Result<Underlying<f64>, pricer_core::market_data::MarketDataError> {
        Underlying::new(self.spot, self.volatility, self.dividend_yield)
    }
}

/// Lattice settings shared by every scenario
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LatticeSettings {
    /// Step length in years
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// Continuously compounded risk-free rate
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Knockout return threshold
    #[serde(default = "default_knockout_threshold")]
    pub knockout_threshold: f64,
    /// End of the knockout observation window in years
    #[serde(default = "default_observation_end")]
    pub observation_end: f64,
}

fn default_time_step() -> f64 {
    1.0
}

fn default_risk_free_rate() -> f64 {
    0.035
}

fn default_knockout_threshold() -> f64 {
    -0.2
}

fn default_observation_end() -> f64 {
    pricer_pricing::lattice::DEFAULT_OBSERVATION_END
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            time_step: default_time_step(),
            risk_free_rate: default_risk_free_rate(),
            knockout_threshold: default_knockout_threshold(),
            observation_end: default_observation_end(),
        }
    }
}

impl LatticeSettings {
    /// Lattice configuration for a note of the given term
    pub fn lattice_config(&self, term: f64) -> Result<LatticeConfig<f64>, LatticeError> {
        LatticeConfig::builder()
            .time_step(self.time_step)
            .term(term)
            .risk_free_rate(self.risk_free_rate)
            .build()
    }

    /// Knockout observation settings
    pub fn knockout_config(&self) -> Result<KnockoutConfig<f64>, LatticeError> {
        KnockoutConfig::new(self.knockout_threshold)?.with_observation_end(self.observation_end)
    }
}

/// One barrier booster note to price
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioSpec {
    /// Scenario identifier used in the report
    pub id: String,
    /// Term in years
    pub term: f64,
    /// Return below which losses are passed through
    pub barrier_level: f64,
    /// Return paid inside the boost band
    pub boosted_return: f64,
    /// Return paid between barrier and boost levels
    #[serde(default)]
    pub barrier_return: f64,
    /// Level at which the boosted return begins
    #[serde(default)]
    pub boost_level: f64,
    /// Level above which upside participation begins (defaults to the boosted return)
    pub participation_level: Option<f64>,
    /// Participation rate above the participation level
    #[serde(default = "default_participation_rate")]
    pub participation_rate: f64,
}

fn default_participation_rate() -> f64 {
    1.0
}

impl ScenarioSpec {
    /// Scenario with the default bands
    pub fn new(id: impl Into<String>, term: f64, barrier_level: f64, boosted_return: f64) -> Self {
        Self {
            id: id.into(),
            term,
            barrier_level,
            boosted_return,
            barrier_return: 0.0,
            boost_level: 0.0,
            participation_level: None,
            participation_rate: default_participation_rate(),
        }
    }

    /// Build the note on the given underlying
    pub fn build_note(
        &self,
        underlying: Underlying<f64>,
    ) -> Result<BarrierBoosterNote<f64>, InstrumentError> {
        let mut builder = BarrierBoosterNote::builder(underlying, self.barrier_level, self.boosted_return)
            .term(self.term)
            .barrier_return(self.barrier_return)
            .boost_level(self.boost_level)
            .participation_rate(self.participation_rate);
        if let Some(level) = self.participation_level {
            builder = builder.participation_level(level);
        }
        builder.build()
    }
}

/// Scenario run configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Report file the results are appended to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Market factor settings
    #[serde(default)]
    pub market: MarketSettings,

    /// Lattice settings
    #[serde(default)]
    pub lattice: LatticeSettings,

    /// Notes to price, in report order
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioSpec>,
}

fn default_output() -> PathBuf {
    PathBuf::from("note_results.txt")
}

/// Built-in six-year index notes S1-S5
pub fn default_scenarios() -> Vec<ScenarioSpec> {
    [
        ("S1", -0.3, 0.6),
        ("S2", -0.2, 0.5),
        ("S3", -0.1, 0.4),
        ("S4", -0.4, 0.7),
        ("S5", -0.5, 0.8),
    ]
    .into_iter()
    .map(|(id, barrier, boosted)| ScenarioSpec::new(id, 6.0, barrier, boosted))
    .collect()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            market: MarketSettings::default(),
            lattice: LatticeSettings::default(),
            scenarios: default_scenarios(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a file when given, otherwise the built-in scenarios
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable numeric values are ignored.
    pub fn with_env_override(mut self) -> Self {
        fn parsed(name: &str) -> Option<f64> {
            std::env::var(name).ok().and_then(|value| value.trim().parse().ok())
        }

        if let Some(volatility) = parsed("NOTE_PRICER_VOLATILITY") {
            self.market.volatility = volatility;
        }

        if let Some(rate) = parsed("NOTE_PRICER_RISK_FREE_RATE") {
            self.lattice.risk_free_rate = rate;
        }

        if let Some(time_step) = parsed("NOTE_PRICER_TIME_STEP") {
            self.lattice.time_step = time_step;
        }

        if let Some(threshold) = parsed("NOTE_PRICER_KNOCKOUT") {
            self.lattice.knockout_threshold = threshold;
        }

        if let Ok(output) = std::env::var("NOTE_PRICER_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(self.market.spot > 0.0) || !self.market.spot.is_finite() {
            errors.push(format!("market.spot must be positive, got {}", self.market.spot));
        }
        if !(self.market.volatility > 0.0) || !self.market.volatility.is_finite() {
            errors.push(format!(
                "market.volatility must be positive, got {}",
                self.market.volatility
            ));
        }

        if !(self.lattice.time_step > 0.0) || !self.lattice.time_step.is_finite() {
            errors.push(format!(
                "lattice.time_step must be positive, got {}",
                self.lattice.time_step
            ));
        }
        if !self.lattice.knockout_threshold.is_finite() {
            errors.push("lattice.knockout_threshold must be finite".to_string());
        }
        if !(self.lattice.observation_end >= 0.0) || !self.lattice.observation_end.is_finite() {
            errors.push(format!(
                "lattice.observation_end must be non-negative, got {}",
                self.lattice.observation_end
            ));
        }

        if self.scenarios.is_empty() {
            errors.push("at least one scenario is required".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for scenario in &self.scenarios {
            if scenario.id.trim().is_empty() {
                errors.push("scenario id cannot be empty".to_string());
            } else if !seen.insert(scenario.id.as_str()) {
                errors.push(format!("duplicate scenario id '{}'", scenario.id));
            }

            if !(scenario.term > 0.0) || !scenario.term.is_finite() {
                errors.push(format!(
                    "scenario '{}': term must be positive, got {}",
                    scenario.id, scenario.term
                ));
            } else if self.lattice.time_step > 0.0 {
                let steps = scenario.term / self.lattice.time_step;
                if steps.round() > MAX_STEPS as f64 {
                    errors.push(format!(
                        "scenario '{}': {} steps exceeds maximum allowed ({})",
                        scenario.id,
                        steps.round(),
                        MAX_STEPS
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {path:?}: {message}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// IO error message
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
