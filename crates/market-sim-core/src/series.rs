use crate::asset::AssetSymbol;
use crate::candle::Candle;
use crate::precision::{round2, round4};
use crate::rng::Mulberry32;

pub const DEFAULT_POINTS: usize = 24;

const MIN_PRICE: f64 = 0.01;
const DRIFT_WEIGHT: f64 = 0.01;
const WICK_FACTOR: f64 = 0.4;

const RSI_NEUTRAL: f64 = 50.0;
const RSI_FLOOR: f64 = 20.0;
const RSI_CEILING: f64 = 80.0;

const MACD_FAST: u32 = 12;
const MACD_SLOW: u32 = 26;
const MACD_SIGNAL: u32 = 9;

/// Knobs for series generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Number of candles to produce.
    pub points: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
        }
    }
}

fn smoothing(window: u32) -> f64 {
    2.0 / (f64::from(window) + 1.0)
}

/// Exponential moving average seeded with its first observation.
#[derive(Debug, Clone, Copy)]
struct Ema {
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    fn new(window: u32) -> Self {
        Self {
            alpha: smoothing(window),
            value: None,
        }
    }

    fn update(&mut self, price: f64) -> f64 {
        let next = match self.value {
            Some(prev) => prev + self.alpha * (price - prev),
            None => price,
        };
        self.value = Some(next);
        next
    }
}

fn floored_close(open: f64, noise: f64, drift: f64) -> f64 {
    (open + noise + drift * DRIFT_WEIGHT).max(MIN_PRICE)
}

/// Dashboard RSI: the previous reading stands in for the average gain
/// (`rsi / 100`) and average loss (`(100 - rsi) / 100`), and the latest move
/// is added on top. Not Wilder's RSI.
fn blended_rsi(previous_rsi: f64, change: f64) -> f64 {
    let gain = if change > 0.0 { change } else { 0.0 };
    let loss = if change < 0.0 { -change } else { 0.0 };
    let avg_gain = previous_rsi / 100.0;
    let avg_loss = (100.0 - previous_rsi) / 100.0;
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + (avg_gain + gain) / (avg_loss + loss))
}

/// MACD analogue. The fast line is smoothed from the previous MACD value and
/// the slow line from the previous signal value.
fn macd_step(previous: Option<&Candle>, close: f64) -> (f64, f64) {
    match previous {
        Some(prev) => {
            let fast = prev.macd + smoothing(MACD_FAST) * (close - prev.macd);
            let slow = prev.signal + smoothing(MACD_SLOW) * (close - prev.signal);
            let macd = fast - slow;
            let signal = prev.signal + smoothing(MACD_SIGNAL) * (macd - prev.signal);
            (macd, signal)
        }
        // Both lines start at the first close, so they cancel out.
        None => (0.0, 0.0),
    }
}

/// Generate a deterministic synthetic series for `symbol`.
///
/// Every candle opens at the previous close (the base price for the first one),
/// and indicator recurrences are seeded from the previously emitted candle.
pub fn generate_series(symbol: AssetSymbol, config: &SeriesConfig) -> Vec<Candle> {
    let profile = symbol.profile();
    let mut rng = Mulberry32::for_symbol(symbol);
    let midpoint = config.points as f64 / 2.0;

    let mut previous_close = profile.base_price;
    let mut ema20 = Ema::new(20);
    let mut ema50 = Ema::new(50);
    let mut candles: Vec<Candle> = Vec::with_capacity(config.points);

    for index in 0..config.points {
        let noise = (rng.next_f64() - 0.5) * profile.noise_scale;
        let drift = (index as f64 - midpoint) * profile.drift_scale;

        let open = previous_close;
        let close = floored_close(open, noise, drift);
        let wick = noise.abs() * WICK_FACTOR;
        let high = open.max(close) + wick;
        let low = open.min(close) - wick;
        let volume = (profile.volume_base + rng.next_f64() * profile.volume_noise).round() as u64;

        let ema20_value = ema20.update(close);
        let ema50_value = ema50.update(close);

        let previous = candles.last();
        let previous_rsi = previous.map_or(RSI_NEUTRAL, |c| c.rsi);
        let rsi = round2(blended_rsi(previous_rsi, close - previous_close));
        let (macd, signal) = macd_step(previous, close);

        candles.push(Candle {
            time: format!("{}h", index + 1),
            open: round2(open),
            close: round2(close),
            high: round2(high),
            low: round2(low),
            volume,
            ema20: round2(ema20_value),
            ema50: round2(ema50_value),
            rsi: rsi.clamp(RSI_FLOOR, RSI_CEILING),
            macd: round4(macd),
            signal: round4(signal),
            histogram: round4(macd - signal),
        });

        previous_close = close;
    }

    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_series(symbol: AssetSymbol) -> Vec<Candle> {
        generate_series(symbol, &SeriesConfig::default())
    }

    #[allow(clippy::too_many_arguments)]
    fn candle(
        time: &str,
        open: f64,
        close: f64,
        high: f64,
        low: f64,
        volume: u64,
        ema20: f64,
        ema50: f64,
        rsi: f64,
        macd: f64,
        signal: f64,
        histogram: f64,
    ) -> Candle {
        Candle {
            time: time.to_string(),
            open,
            close,
            high,
            low,
            volume,
            ema20,
            ema50,
            rsi,
            macd,
            signal,
            histogram,
        }
    }

    #[test]
    fn default_length_is_24() {
        for symbol in AssetSymbol::ALL {
            let series = default_series(symbol);
            assert_eq!(series.len(), 24);
            assert_eq!(series[0].time, "1h");
            assert_eq!(series[23].time, "24h");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for symbol in AssetSymbol::ALL {
            let a = generate_series(symbol, &SeriesConfig { points: 96 });
            let b = generate_series(symbol, &SeriesConfig { points: 96 });
            assert_eq!(a, b, "{symbol} diverged");
        }
    }

    #[test]
    fn petr4_golden_candles() {
        let series = default_series(AssetSymbol::PETR4);
        assert_eq!(
            series[0],
            candle("1h", 34.72, 34.65, 34.74, 34.63, 472_569, 34.65, 34.65, 46.62, 0.0, 0.0, 0.0)
        );
        assert_eq!(
            series[1],
            candle("2h", 34.65, 34.75, 34.79, 34.6, 491_018, 34.66, 34.65, 51.37, 2.7717, 0.5543, 2.2174)
        );
        assert_eq!(
            series[23],
            candle("24h", 34.06, 33.03, 34.49, 32.61, 452_381, 33.99, 34.22, 20.0, 2.3743, 2.5445, -0.1701)
        );
    }

    #[test]
    fn btcusdt_golden_candles() {
        let series = default_series(AssetSymbol::BTCUSDT);
        assert_eq!(
            series[0],
            candle(
                "1h", 67580.0, 68658.53, 69090.33, 67148.2, 2163, 68658.53, 68658.53, 80.0, 0.0, 0.0, 0.0
            )
        );
        assert_eq!(
            series[23],
            candle(
                "24h", 74383.33, 72939.88, 74961.06, 72362.14, 1920, 72368.01, 70847.84, 20.0,
                5413.6233, 5605.0587, -191.4354
            )
        );
    }

    #[test]
    fn last_candles_match_reference() {
        let expected = [
            (AssetSymbol::VALE3, 67.46, 547_023, 69.54),
            (AssetSymbol::AAPL, 202.52, 765_442, 20.88),
            (AssetSymbol::TSLA, 241.74, 562_529, 40.05),
        ];
        for (symbol, close, volume, rsi) in expected {
            let last = default_series(symbol).pop().unwrap();
            assert_eq!(last.close, close, "{symbol}");
            assert_eq!(last.volume, volume, "{symbol}");
            assert_eq!(last.rsi, rsi, "{symbol}");
        }
    }

    #[test]
    fn first_candle_opens_at_base_price() {
        let series = default_series(AssetSymbol::PETR4);
        assert_eq!(series[0].open, 34.72);
        for symbol in AssetSymbol::ALL {
            assert_eq!(default_series(symbol)[0].open, symbol.base_price());
        }
    }

    #[test]
    fn ohlc_envelope_holds() {
        for symbol in AssetSymbol::ALL {
            for c in generate_series(symbol, &SeriesConfig { points: 240 }) {
                assert!(c.high >= c.open.max(c.close), "{symbol} {}: high {}", c.time, c.high);
                assert!(c.low <= c.open.min(c.close), "{symbol} {}: low {}", c.time, c.low);
            }
        }
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        for symbol in AssetSymbol::ALL {
            for c in generate_series(symbol, &SeriesConfig { points: 120 }) {
                let diff = (c.histogram - (c.macd - c.signal)).abs();
                assert!(diff <= 1.5e-4 + 1e-9, "{symbol} {}: off by {diff}", c.time);
            }
        }
    }

    #[test]
    fn rsi_stays_clamped() {
        for symbol in AssetSymbol::ALL {
            for c in generate_series(symbol, &SeriesConfig { points: 240 }) {
                assert!((20.0..=80.0).contains(&c.rsi), "{symbol} {}: rsi {}", c.time, c.rsi);
            }
        }
    }

    #[test]
    fn each_candle_opens_at_previous_close() {
        for symbol in AssetSymbol::ALL {
            let series = generate_series(symbol, &SeriesConfig { points: 240 });
            for pair in series.windows(2) {
                assert_eq!(pair[1].open, pair[0].close, "{symbol} {}", pair[1].time);
            }
        }
    }

    #[test]
    fn volume_scale_depends_on_asset() {
        for c in default_series(AssetSymbol::BTCUSDT) {
            assert!((1800..=2700).contains(&c.volume), "btc volume {}", c.volume);
        }
        for c in default_series(AssetSymbol::AAPL) {
            assert!((620_000..=780_000).contains(&c.volume), "aapl volume {}", c.volume);
        }
        for c in default_series(AssetSymbol::PETR4) {
            assert!((450_000..=610_000).contains(&c.volume), "petr4 volume {}", c.volume);
        }
    }

    #[test]
    fn zero_points_yields_empty_series() {
        assert!(generate_series(AssetSymbol::AAPL, &SeriesConfig { points: 0 }).is_empty());
    }

    #[test]
    fn single_point_is_seeded_neutrally() {
        let series = generate_series(AssetSymbol::VALE3, &SeriesConfig { points: 1 });
        assert_eq!(series.len(), 1);
        let only = &series[0];
        assert_eq!(only.ema20, only.close);
        assert_eq!(only.ema50, only.close);
        assert_eq!(only.macd, 0.0);
        assert_eq!(only.histogram, 0.0);
    }

    #[test]
    fn close_is_floored() {
        assert_eq!(floored_close(1.0, -5.0, 0.0), MIN_PRICE);
        assert_eq!(floored_close(10.0, 0.5, 100.0), 11.5);
    }

    #[test]
    fn blended_rsi_from_neutral() {
        // No move keeps the reading where it was.
        assert!((blended_rsi(50.0, 0.0) - 50.0).abs() < 1e-12);
        // (0.5 + 1) / (0.5 + 0) = 3 -> 100 - 100 / 4
        assert!((blended_rsi(50.0, 1.0) - 75.0).abs() < 1e-12);
        assert_eq!(blended_rsi(100.0, -1.0), 100.0);
    }

    #[test]
    fn ema_seeds_with_first_price() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.update(10.0), 10.0);
        assert!((ema.update(12.0) - 11.0).abs() < 1e-12);
    }
}
