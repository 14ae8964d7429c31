//! Configuration validation.
//!
//! Validates strategy and data settings before a run starts.

use crate::domain::aggregate::AggregationPeriod;
use crate::domain::config::{
    DEFAULT_OSC_LOWER_BAND, DEFAULT_OSC_UPPER_BAND, DEFAULT_TREND_THRESHOLD,
};
use crate::domain::error::WeektraderError;
use crate::domain::indicator::{DEFAULT_MOMENTUM_LOOKBACK, DEFAULT_TREND_PERIOD};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    validate_trend_threshold(config)?;
    validate_bands(config)?;
    validate_periods(config)?;
    validate_aggregation_period(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    validate_required(config, "data", "path")?;
    validate_required(config, "data", "symbol")?;
    validate_required(config, "data", "indicators")?;
    validate_dates(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> WeektraderError {
    WeektraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_trend_threshold(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    let value = config.get_double("strategy", "trend_threshold", DEFAULT_TREND_THRESHOLD);
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(
            "strategy",
            "trend_threshold",
            "trend_threshold must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_bands(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    let upper = config.get_double("strategy", "osc_upper_band", DEFAULT_OSC_UPPER_BAND);
    let lower = config.get_double("strategy", "osc_lower_band", DEFAULT_OSC_LOWER_BAND);
    for (key, value) in [("osc_upper_band", upper), ("osc_lower_band", lower)] {
        if !(-100.0..=0.0).contains(&value) {
            return Err(invalid(
                "strategy",
                key,
                &format!("{key} must be between -100 and 0"),
            ));
        }
    }
    if lower >= upper {
        return Err(invalid(
            "strategy",
            "osc_lower_band",
            "osc_lower_band must be below osc_upper_band",
        ));
    }
    Ok(())
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    let periods = [
        ("trend_period", DEFAULT_TREND_PERIOD),
        ("momentum_lookback", DEFAULT_MOMENTUM_LOOKBACK),
    ];
    for (key, default) in periods {
        if config.get_int("strategy", key, default as i64) <= 0 {
            return Err(invalid("strategy", key, &format!("{key} must be positive")));
        }
    }
    Ok(())
}

fn validate_aggregation_period(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    if let Some(value) = config.get_string("strategy", "aggregation_period") {
        value
            .parse::<AggregationPeriod>()
            .map_err(|reason| invalid("strategy", "aggregation_period", &reason))?;
    }
    Ok(())
}

fn validate_required(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), WeektraderError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(WeektraderError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), WeektraderError> {
    let start = parse_optional_date(
        config.get_string("data", "start_date").as_deref(),
        "start_date",
    )?;
    let end = parse_optional_date(
        config.get_string("data", "end_date").as_deref(),
        "end_date",
    )?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(invalid(
                "data",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

/// Parse an optional `YYYY-MM-DD` value from the `[data]` section.
pub fn parse_optional_date(
    value: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, WeektraderError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                invalid(
                    "data",
                    field,
                    &format!("invalid {} format, expected YYYY-MM-DD", field),
                )
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    const VALID: &str = r#"
[data]
path = ./data
symbol = SPY
indicators = ./indicators.csv
start_date = 2010-01-01
end_date = 2024-12-31

[strategy]
trend_threshold = 40
osc_upper_band = -25
osc_lower_band = -75
trend_period = 14
momentum_lookback = 140
aggregation_period = weekly:fri
"#;

    #[test]
    fn valid_config_passes() {
        let c = config(VALID);
        assert!(validate_strategy_config(&c).is_ok());
        assert!(validate_data_config(&c).is_ok());
    }

    #[test]
    fn empty_strategy_section_uses_valid_defaults() {
        assert!(validate_strategy_config(&config("[strategy]\n")).is_ok());
    }

    #[test]
    fn missing_lower_band_falls_back_to_default() {
        // Only the lower band's default keeps this upper band valid.
        let c = config(&format!(
            "[strategy]\nosc_upper_band = {}\n",
            DEFAULT_OSC_LOWER_BAND + 1.0
        ));
        assert!(validate_strategy_config(&c).is_ok());

        let c = config(&format!(
            "[strategy]\nosc_upper_band = {}\n",
            DEFAULT_OSC_LOWER_BAND
        ));
        assert!(validate_strategy_config(&c).is_err());
    }

    #[test]
    fn trend_threshold_out_of_range() {
        let err = validate_strategy_config(&config("[strategy]\ntrend_threshold = 101\n"))
            .unwrap_err();
        assert!(
            matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "trend_threshold")
        );
    }

    #[test]
    fn positive_band_rejected() {
        let err =
            validate_strategy_config(&config("[strategy]\nosc_upper_band = 5\n")).unwrap_err();
        assert!(
            matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "osc_upper_band")
        );
    }

    #[test]
    fn lower_band_above_upper_rejected() {
        let err = validate_strategy_config(&config(
            "[strategy]\nosc_upper_band = -50\nosc_lower_band = -20\n",
        ))
        .unwrap_err();
        assert!(
            matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "osc_lower_band")
        );
    }

    #[test]
    fn zero_period_rejected() {
        let err = validate_strategy_config(&config("[strategy]\nmomentum_lookback = 0\n"))
            .unwrap_err();
        assert!(
            matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "momentum_lookback")
        );
    }

    #[test]
    fn unknown_aggregation_period_rejected() {
        let err = validate_strategy_config(&config("[strategy]\naggregation_period = hourly\n"))
            .unwrap_err();
        assert!(
            matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "aggregation_period")
        );
    }

    #[test]
    fn missing_symbol_rejected() {
        let err = validate_data_config(&config("[data]\npath = ./data\nindicators = x.csv\n"))
            .unwrap_err();
        assert!(matches!(err, WeektraderError::ConfigMissing { key, .. } if key == "symbol"));
    }

    #[test]
    fn reversed_dates_rejected() {
        let err = validate_data_config(&config(
            "[data]\npath = d\nsymbol = S\nindicators = i\n\
             start_date = 2024-01-01\nend_date = 2023-01-01\n",
        ))
        .unwrap_err();
        assert!(matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn bad_date_format_rejected() {
        let err = parse_optional_date(Some("01/02/2024"), "end_date").unwrap_err();
        assert!(matches!(err, WeektraderError::ConfigInvalid { key, .. } if key == "end_date"));
    }

    #[test]
    fn blank_date_is_none() {
        assert_eq!(parse_optional_date(Some("  "), "start_date").unwrap(), None);
        assert_eq!(parse_optional_date(None, "start_date").unwrap(), None);
    }
}
