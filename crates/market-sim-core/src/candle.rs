use serde::{Deserialize, Serialize};

/// One simulated OHLCV step with its attached indicators.
///
/// Prices and moving averages carry 2 decimals, MACD fields 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Step label, `"1h"` for the first candle.
    pub time: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub ema20: f64,
    pub ema50: f64,
    /// Clamped to `[20, 80]`.
    pub rsi: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}
