use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::AssetSymbol;
use crate::precision::round2;

pub const TRADE_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Compra,
    Venda,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub symbol: AssetSymbol,
    pub side: Side,
    pub quantity: f64,
    pub price: f64,
    pub result_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub cumulative_return: f64,
}

/// RFC 3339 with exactly three fractional digits, e.g. `2025-01-15T18:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistory {
    /// Newest first.
    pub trades: Vec<TradeRecord>,
    /// Oldest first.
    pub performance: Vec<PerformancePoint>,
}

fn mock_trade(index: usize, now: DateTime<Utc>) -> TradeRecord {
    let symbol = AssetSymbol::ALL[index % AssetSymbol::ALL.len()];
    let is_buy = index % 2 == 0;
    let offset = index as f64 - 7.0;
    let step = if symbol == AssetSymbol::BTCUSDT { 500.0 } else { 2.5 };
    let direction = if is_buy { 1.0 } else { -1.0 };
    let quantity = if symbol == AssetSymbol::BTCUSDT {
        round2(0.2 + index as f64 * 0.05)
    } else {
        (100 + index * 10) as f64
    };

    TradeRecord {
        id: format!("{symbol}-{index}"),
        timestamp: now - Duration::hours(index as i64),
        symbol,
        side: if is_buy { Side::Compra } else { Side::Venda },
        quantity,
        price: round2(symbol.base_price() + offset * step),
        result_pct: round2(direction * ((index as f64 / 2.0).sin() * 2.8)),
    }
}

/// Running total of `result_pct`, walking `trades` from the last entry to the
/// first (oldest to newest for a newest-first list).
pub fn cumulative_performance(trades: &[TradeRecord]) -> Vec<PerformancePoint> {
    let mut cumulative = 0.0;
    trades
        .iter()
        .rev()
        .map(|trade| {
            cumulative += trade.result_pct;
            PerformancePoint {
                timestamp: trade.timestamp,
                cumulative_return: round2(cumulative),
            }
        })
        .collect()
}

/// Mock trade history: one trade per hour going back from `now`, truncated to
/// whole milliseconds.
pub fn trade_history(now: DateTime<Utc>) -> TradeHistory {
    let now = now.trunc_subsecs(3);
    let trades: Vec<TradeRecord> = (0..TRADE_COUNT).map(|i| mock_trade(i, now)).collect();
    let performance = cumulative_performance(&trades);
    TradeHistory {
        trades,
        performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 18, 0, 0).unwrap()
    }

    #[test]
    fn fourteen_trades_newest_first() {
        let history = trade_history(now());
        assert_eq!(history.trades.len(), TRADE_COUNT);
        assert_eq!(history.trades[0].timestamp, now());
        assert_eq!(history.trades[13].timestamp, now() - Duration::hours(13));
        for pair in history.trades.windows(2) {
            assert!(pair[0].timestamp > pair[1].timestamp);
        }
    }

    #[test]
    fn trades_match_reference() {
        let trades = trade_history(now()).trades;

        assert_eq!(trades[0].id, "PETR4-0");
        assert_eq!(trades[0].side, Side::Compra);
        assert_eq!(trades[0].quantity, 100.0);
        assert_eq!(trades[0].price, 17.22);
        assert_eq!(trades[0].result_pct, 0.0);

        assert_eq!(trades[3].id, "BTCUSDT-3");
        assert_eq!(trades[3].side, Side::Venda);
        assert_eq!(trades[3].quantity, 0.35);
        assert_eq!(trades[3].price, 65580.0);
        assert_eq!(trades[3].result_pct, -2.79);

        assert_eq!(trades[7].symbol, AssetSymbol::AAPL);
        assert_eq!(trades[7].price, 192.55);
        assert_eq!(trades[7].result_pct, 0.98);

        let results: Vec<f64> = trades.iter().map(|t| t.result_pct).collect();
        assert_eq!(
            results,
            vec![
                0.0, -1.34, 2.36, -2.79, 2.55, -1.68, 0.4, 0.98, -2.12, 2.74, -2.68, 1.98, -0.78,
                -0.6
            ]
        );
    }

    #[test]
    fn performance_is_running_sum_oldest_first() {
        let history = trade_history(now());
        let cumulative: Vec<f64> = history
            .performance
            .iter()
            .map(|p| p.cumulative_return)
            .collect();
        assert_eq!(
            cumulative,
            vec![
                -0.6, -1.38, 0.6, -2.08, 0.66, -1.46, -0.48, -0.08, -1.76, 0.79, -2.0, 0.36,
                -0.98, -0.98
            ]
        );

        // First point belongs to the oldest trade.
        assert_eq!(history.performance[0].timestamp, history.trades[13].timestamp);
        assert_eq!(history.performance[13].timestamp, history.trades[0].timestamp);

        let mut running = 0.0;
        for (point, trade) in history.performance.iter().zip(history.trades.iter().rev()) {
            running += trade.result_pct;
            assert!((point.cumulative_return - running).abs() < 0.005 + 1e-9);
        }
    }

    #[test]
    fn cumulative_performance_of_empty_list() {
        assert!(cumulative_performance(&[]).is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let history = trade_history(now());
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["trades"][1]["side"], "Venda");
        assert_eq!(json["trades"][1]["resultPct"], -1.34);
        assert_eq!(json["trades"][0]["timestamp"], "2025-01-15T18:00:00.000Z");
        assert_eq!(json["performance"][0]["timestamp"], "2025-01-15T05:00:00.000Z");
        assert!(json["performance"][0]["cumulativeReturn"].is_number());
    }

    #[test]
    fn timestamps_keep_millisecond_precision() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 16, 14, 28, 50)
            .unwrap()
            .with_nanosecond(711_955_355)
            .unwrap();
        let history = trade_history(now);
        assert_eq!(history.trades[0].timestamp.timestamp_subsec_nanos(), 711_000_000);

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["trades"][0]["timestamp"], "2026-10-16T14:28:50.711Z");
        assert_eq!(json["trades"][2]["timestamp"], "2026-10-16T12:28:50.711Z");

        let parsed: TradeHistory = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, history);
    }
}
