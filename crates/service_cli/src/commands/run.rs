//! Run command implementation
//!
//! Prices every configured barrier booster note on the knockout lattice and
//! appends the results to the report file.

use std::path::Path;

use pricer_core::traits::Priceable;
use pricer_pricing::lattice::KnockoutTreePricer;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::report::Report;
use crate::Result;

/// Run the scenario command
pub fn run(scenarios: Option<&Path>, output: Option<&Path>) -> Result<Report> {
    let mut config = RunConfig::load_with_env_and_validate(scenarios)?;
    if let Some(output) = output {
        config.output = output.to_path_buf();
    }

    info!("Starting scenario run...");
    info!("  Scenarios: {}", config.scenarios.len());
    info!("  Volatility: {}", config.market.volatility);
    info!("  Output: {}", config.output.display());

    let report = price_scenarios(&config)?;
    print!("{}", report.render());
    report.append_to(&config.output)?;

    info!("Scenario run complete");
    Ok(report)
}

/// Price every scenario of a validated configuration
pub fn price_scenarios(config: &RunConfig) -> Result<Report> {
    let underlying = config.market.underlying()?;
    let knockout = config.lattice.knockout_config()?;
    let mut report = Report::new(underlying.volatility());

    for scenario in &config.scenarios {
        let note = scenario.build_note(underlying)?;
        let lattice = config.lattice.lattice_config(note.term())?;
        let description = note.to_string();

        let mut pricer = KnockoutTreePricer::new(lattice, knockout, note)?;
        let price = pricer.price()?;
        debug!(
            scenario = %scenario.id,
            nodes = pricer.nodes_cached(),
            "Lattice valued"
        );
        info!(scenario = %scenario.id, price, "{}", description);

        report.push(scenario.id.clone(), description, price);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioSpec;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_scenarios_prices() {
        let report = price_scenarios(&RunConfig::default()).unwrap();
        let prices: Vec<f64> = report.entries().iter().map(|e| e.price).collect();
        let expected = [
            0.2431064698459903,
            0.23426833747779086,
            0.22543020510959155,
            0.2680054882712975,
            0.28749691440283137,
        ];

        assert_eq!(prices.len(), expected.len());
        for (price, expected) in prices.iter().zip(expected) {
            assert_relative_eq!(*price, expected, epsilon = 1e-10);
        }
        assert_eq!(report.entries()[0].id, "S1");
        assert_eq!(
            report.entries()[4].description,
            "Barrier=-50.0%:Booster=80.0%:Participation=100.0%"
        );
    }

    #[test]
    fn test_misaligned_term_is_rejected() {
        let mut config = RunConfig::default();
        config.scenarios = vec![ScenarioSpec::new("odd", 5.5, -0.3, 0.6)];
        assert!(price_scenarios(&config).is_err());
    }

    #[test]
    fn test_unordered_bands_are_rejected() {
        let mut config = RunConfig::default();
        let mut scenario = ScenarioSpec::new("bad", 6.0, -0.3, 0.6);
        scenario.boost_level = 0.8;
        config.scenarios = vec![scenario];
        assert!(price_scenarios(&config).is_err());
    }
}
