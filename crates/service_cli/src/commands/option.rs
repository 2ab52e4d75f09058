//! Option command implementation
//!
//! Prices a single vanilla option on the plain binomial lattice.

use clap::Args;
use pricer_core::market_data::Underlying;
use pricer_core::traits::Priceable;
use pricer_models::instruments::{
    Direction, ExerciseStyle, InstrumentParams, PayoffType, VanillaOption,
};
use pricer_pricing::lattice::{BinomialTreePricer, DriftConvention, LatticeConfig};
use tracing::info;

use crate::{CliError, Result};

/// Vanilla option pricing arguments
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Spot level of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: f64,

    /// Continuously compounded risk-free rate
    #[arg(short, long)]
    pub rate: f64,

    /// Time to expiry in years
    #[arg(short, long)]
    pub term: f64,

    /// Step length in years
    #[arg(long, default_value = "1.0")]
    pub time_step: f64,

    /// Continuously compounded dividend yield
    #[arg(short, long, default_value = "0.0")]
    pub dividend_yield: f64,

    /// Price a put instead of a call
    #[arg(long)]
    pub put: bool,

    /// Allow early exercise
    #[arg(long)]
    pub american: bool,

    /// Price a short position
    ///
    /// With --american the holder of the short side exercises too, so the
    /// price is not the negated long price.
    #[arg(long)]
    pub short: bool,

    /// Use the per-step drift in the up probability
    #[arg(long)]
    pub per_step_drift: bool,
}

impl OptionArgs {
    fn payoff_type(&self) -> PayoffType {
        if self.put {
            PayoffType::Put
        } else {
            PayoffType::Call
        }
    }

    fn exercise_style(&self) -> ExerciseStyle {
        if self.american {
            ExerciseStyle::American
        } else {
            ExerciseStyle::European
        }
    }

    fn direction(&self) -> Direction {
        if self.short {
            Direction::Short
        } else {
            Direction::Long
        }
    }

    fn drift_convention(&self) -> DriftConvention {
        if self.per_step_drift {
            DriftConvention::PerStep
        } else {
            DriftConvention::Annual
        }
    }
}

/// Run the option command
pub fn run(args: &OptionArgs) -> Result<f64> {
    if !(args.time_step > 0.0) {
        return Err(CliError::invalid_argument(format!(
            "time step must be positive, got {}",
            args.time_step
        )));
    }

    let underlying = Underlying::new(args.spot, args.volatility, args.dividend_yield)?;
    let option = VanillaOption::new(
        underlying,
        InstrumentParams::new(args.strike, args.term)?,
        args.payoff_type(),
        args.exercise_style(),
        args.direction(),
    );
    let config = LatticeConfig::builder()
        .time_step(args.time_step)
        .term(args.term)
        .risk_free_rate(args.rate)
        .drift_convention(args.drift_convention())
        .build()?;

    info!(
        "Pricing {} {} on {} steps",
        args.exercise_style().name(),
        if args.put { "put" } else { "call" },
        config.num_steps()
    );

    let mut pricer = BinomialTreePricer::new(config, option)?;
    let price = pricer.price()?;
    println!("{:.6}", price);

    Ok(price)
}
