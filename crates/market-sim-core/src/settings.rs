use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Timeframe used by the indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneHour,
        Interval::FourHours,
        Interval::OneDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5min",
            Interval::FifteenMinutes => "15min",
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == lower)
            .ok_or_else(|| CoreError::UnknownInterval(s.to_string()))
    }
}

/// Trading parameters edited on the settings tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    pub interval: Interval,
    /// Maximum loss per trade, in percent.
    pub max_risk: f64,
    /// Capital available for automated trades.
    pub capital: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl Default for SettingsPayload {
    fn default() -> Self {
        Self {
            interval: Interval::FifteenMinutes,
            max_risk: 2.5,
            capital: 150_000.0,
            stop_loss: 1.8,
            take_profit: 4.5,
        }
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(CoreError::InvalidSetting {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl SettingsPayload {
    /// Check values against the bounds the settings form allows.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_range("capital", self.capital, 0.0, f64::MAX)?;
        check_range("maxRisk", self.max_risk, 0.5, 10.0)?;
        check_range("stopLoss", self.stop_loss, 0.5, 8.0)?;
        check_range("takeProfit", self.take_profit, 1.0, 15.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = SettingsPayload::default();
        assert_eq!(settings.interval, Interval::FifteenMinutes);
        assert_eq!(settings.max_risk, 2.5);
        assert_eq!(settings.capital, 150_000.0);
        assert_eq!(settings.stop_loss, 1.8);
        assert_eq!(settings.take_profit, 4.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parse_intervals() {
        assert_eq!("5min".parse::<Interval>().unwrap(), Interval::FiveMinutes);
        assert_eq!("1D".parse::<Interval>().unwrap(), Interval::OneDay);
        assert_eq!(
            "2h".parse::<Interval>().unwrap_err(),
            CoreError::UnknownInterval("2h".to_string())
        );
    }

    #[test]
    fn json_uses_dashboard_names() {
        let json = serde_json::to_value(SettingsPayload::default()).unwrap();
        assert_eq!(json["interval"], "15min");
        assert_eq!(json["maxRisk"], 2.5);
        assert_eq!(json["stopLoss"], 1.8);
        assert_eq!(json["takeProfit"], 4.5);

        let parsed: SettingsPayload = serde_json::from_str(
            r#"{"interval":"4h","maxRisk":3,"capital":1000,"stopLoss":2,"takeProfit":6}"#,
        )
        .unwrap();
        assert_eq!(parsed.interval, Interval::FourHours);
        assert_eq!(parsed.max_risk, 3.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let settings = SettingsPayload {
            max_risk: 12.0,
            ..SettingsPayload::default()
        };
        assert_eq!(
            settings.validate().unwrap_err(),
            CoreError::InvalidSetting {
                field: "maxRisk",
                value: 12.0,
                min: 0.5,
                max: 10.0,
            }
        );

        let settings = SettingsPayload {
            capital: -1.0,
            ..SettingsPayload::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CoreError::InvalidSetting { field: "capital", .. })
        ));

        let settings = SettingsPayload {
            take_profit: 0.5,
            ..SettingsPayload::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let settings = SettingsPayload {
            stop_loss: f64::NAN,
            ..SettingsPayload::default()
        };
        assert_eq!(
            settings.validate().unwrap_err(),
            CoreError::NonFinite { field: "stopLoss" }
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let settings = SettingsPayload {
            max_risk: 10.0,
            stop_loss: 0.5,
            take_profit: 15.0,
            capital: 0.0,
            ..SettingsPayload::default()
        };
        assert!(settings.validate().is_ok());
    }
}
