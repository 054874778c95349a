//! Fixed-point rounding for prices and indicators.
//!
//! Values are rounded from the exact binary value of the `f64`, half away from
//! zero, so `1.005` rounds to `1.00` (it is stored slightly below the tie)
//! while `0.125` rounds to `0.13`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

fn to_decimal(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// Round `value` to `dp` decimal places.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    match to_decimal(value, dp).and_then(|d| d.to_f64()) {
        Some(rounded) => rounded,
        // Outside Decimal's range; plain scaling is as good as it gets there.
        None => {
            let factor = 10f64.powi(dp as i32);
            (value * factor).round() / factor
        }
    }
}

pub fn round2(value: f64) -> f64 {
    round_dp(value, 2)
}

pub fn round4(value: f64) -> f64 {
    round_dp(value, 4)
}

/// Format `value` with exactly `dp` decimals, e.g. `to_fixed(3.0, 2) == "3.00"`.
///
/// The sign comes from the unrounded value: `-0.001` gives `"-0.00"`, while
/// `-0.0` gives `"0.00"`.
pub fn to_fixed(value: f64, dp: u32) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    match to_decimal(magnitude, dp) {
        Some(d) => format!("{sign}{:.*}", dp as usize, d),
        None => format!("{sign}{:.*}", dp as usize, magnitude),
    }
}
