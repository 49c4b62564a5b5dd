//! Configuration validation.
//!
//! Validates the `[simulation]` section before any price data is touched.

use crate::domain::config::{
    SimulationConfig, DEFAULT_INITIAL_CAPITAL, DEFAULT_INVESTMENT_DAY,
    DEFAULT_MONTHLY_CONTRIBUTION,
};
use crate::domain::error::DcaSimError;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), DcaSimError> {
    validate_initial_capital(config)?;
    validate_monthly_contribution(config)?;
    validate_investment_day(config)?;
    Ok(())
}

/// Validates and builds the simulation parameters, applying defaults.
pub fn build_simulation_config(config: &dyn ConfigPort) -> Result<SimulationConfig, DcaSimError> {
    validate_simulation_config(config)?;
    Ok(SimulationConfig {
        initial_capital: config.get_double("simulation", "initial_capital", DEFAULT_INITIAL_CAPITAL),
        monthly_contribution: config.get_double(
            "simulation",
            "monthly_contribution",
            DEFAULT_MONTHLY_CONTRIBUTION,
        ),
        investment_day: config.get_int("simulation", "investment_day", DEFAULT_INVESTMENT_DAY as i64)
            as u32,
    })
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), DcaSimError> {
    validate_positive(config, "initial_capital", DEFAULT_INITIAL_CAPITAL)
}

fn validate_monthly_contribution(config: &dyn ConfigPort) -> Result<(), DcaSimError> {
    validate_positive(config, "monthly_contribution", DEFAULT_MONTHLY_CONTRIBUTION)
}

fn validate_positive(config: &dyn ConfigPort, key: &str, default: f64) -> Result<(), DcaSimError> {
    if let Some(raw) = config.get_string("simulation", key) {
        if raw.trim().parse::<f64>().is_err() {
            return Err(DcaSimError::ConfigInvalid {
                section: "simulation".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be a number"),
            });
        }
    }
    let value = config.get_double("simulation", key, default);
    if !value.is_finite() || value <= 0.0 {
        return Err(DcaSimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be positive"),
        });
    }
    Ok(())
}

fn validate_investment_day(config: &dyn ConfigPort) -> Result<(), DcaSimError> {
    if let Some(raw) = config.get_string("simulation", "investment_day") {
        if raw.trim().parse::<i64>().is_err() {
            return Err(DcaSimError::ConfigInvalid {
                section: "simulation".to_string(),
                key: "investment_day".to_string(),
                reason: "investment_day must be an integer".to_string(),
            });
        }
    }
    let value = config.get_int("simulation", "investment_day", DEFAULT_INVESTMENT_DAY as i64);
    if !(1..=31).contains(&value) {
        return Err(DcaSimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "investment_day".to_string(),
            reason: "investment_day must be between 1 and 31".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockConfig {
        values: HashMap<(String, String), String>,
    }

    impl MockConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            let values = entries
                .iter()
                .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                .collect();
            Self { values }
        }
    }

    impl ConfigPort for MockConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.values
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
    }

    fn invalid_key(err: DcaSimError) -> String {
        match err {
            DcaSimError::ConfigInvalid { key, .. } => key,
            other => panic!("expected ConfigInvalid, got: {other}"),
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = MockConfig::new(&[]);
        let built = build_simulation_config(&config).unwrap();
        assert_eq!(built, SimulationConfig::default());
    }

    #[test]
    fn explicit_values_are_used() {
        let config = MockConfig::new(&[
            ("simulation", "initial_capital", "5000"),
            ("simulation", "monthly_contribution", "250.5"),
            ("simulation", "investment_day", "15"),
        ]);
        let built = build_simulation_config(&config).unwrap();
        assert!((built.initial_capital - 5000.0).abs() < f64::EPSILON);
        assert!((built.monthly_contribution - 250.5).abs() < f64::EPSILON);
        assert_eq!(built.investment_day, 15);
    }

    #[test]
    fn rejects_zero_capital() {
        let config = MockConfig::new(&[("simulation", "initial_capital", "0")]);
        let err = validate_simulation_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "initial_capital");
    }

    #[test]
    fn rejects_negative_contribution() {
        let config = MockConfig::new(&[("simulation", "monthly_contribution", "-10")]);
        let err = validate_simulation_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "monthly_contribution");
    }

    #[test]
    fn rejects_non_numeric_capital() {
        let config = MockConfig::new(&[("simulation", "initial_capital", "lots")]);
        let err = validate_simulation_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "initial_capital");
    }

    #[test]
    fn rejects_day_out_of_range() {
        for day in ["0", "32", "-1"] {
            let config = MockConfig::new(&[("simulation", "investment_day", day)]);
            let err = validate_simulation_config(&config).unwrap_err();
            assert_eq!(invalid_key(err), "investment_day");
        }
    }

    #[test]
    fn rejects_fractional_day() {
        let config = MockConfig::new(&[("simulation", "investment_day", "5.5")]);
        let err = validate_simulation_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "investment_day");
    }

    #[test]
    fn accepts_day_bounds() {
        for day in ["1", "31"] {
            let config = MockConfig::new(&[("simulation", "investment_day", day)]);
            assert!(validate_simulation_config(&config).is_ok());
        }
    }
}
