use serde::{Deserialize, Serialize};

use crate::asset::{AssetSymbol, Currency, VolumeUnit};
use crate::candle::Candle;
use crate::precision::to_fixed;

const RSI_MIDPOINT: f64 = 50.0;
const VOLUME_CHANGE_WEIGHT: f64 = 0.55;

/// A headline figure shown above the overview chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetric {
    pub label: String,
    pub value: String,
    pub helper: String,
    /// Signed change used for the up/down badge.
    pub change: f64,
}

impl OverviewMetric {
    fn new(label: &str, value: String, helper: &str, change: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
            helper: helper.to_string(),
            change,
        }
    }
}

/// Format a price the way the pt-BR locale renders currency,
/// e.g. `R$ 34,72` or `US$ 72.939,88` (with a non-breaking space).
pub fn format_currency(value: f64, currency: Currency) -> String {
    let fixed = to_fixed(value.abs(), 2);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}\u{a0}{grouped},{fraction}", currency.prefix())
}

pub fn format_volume(volume: u64, unit: VolumeUnit) -> String {
    match unit {
        VolumeUnit::Millions => format!("{}M", to_fixed(volume as f64 / 1_000_000.0, 2)),
        VolumeUnit::ThousandsOfBtc => format!("{} mil BTC", to_fixed(volume as f64 / 1000.0, 1)),
    }
}

/// Percentage change between two closes.
pub fn percent_change(previous: f64, latest: f64) -> f64 {
    (latest - previous) / previous * 100.0
}

/// Summary metrics over a finished series: price, change, volume and RSI.
/// Returns an empty list for an empty series.
pub fn build_metrics(symbol: AssetSymbol, series: &[Candle]) -> Vec<OverviewMetric> {
    let Some(last) = series.last() else {
        return Vec::new();
    };
    let previous = series.len().checked_sub(2).map_or(last, |i| &series[i]);
    let change = percent_change(previous.close, last.close);
    let profile = symbol.profile();

    vec![
        OverviewMetric::new(
            "Preço atual",
            format_currency(last.close, profile.currency),
            "Atualizado nos últimos 5 minutos",
            change,
        ),
        OverviewMetric::new(
            "Variação diária",
            format!("{}%", to_fixed(change, 2)),
            "Comparado ao candle anterior",
            change,
        ),
        OverviewMetric::new(
            "Volume diário",
            format_volume(last.volume, profile.volume_unit),
            "Volume consolidado da sessão",
            change * VOLUME_CHANGE_WEIGHT,
        ),
        OverviewMetric::new(
            "RSI (14)",
            to_fixed(last.rsi, 2),
            "Indicador de força relativa",
            last.rsi - RSI_MIDPOINT,
        ),
    ]
}
