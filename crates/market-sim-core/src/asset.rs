use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Assets the dashboard knows how to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetSymbol {
    /// Petrobras PN (B3)
    PETR4,
    /// Vale ON (B3)
    VALE3,
    /// Apple (NASDAQ)
    AAPL,
    /// Bitcoin quoted in Tether
    BTCUSDT,
    /// Tesla (NASDAQ)
    TSLA,
}

/// Quote currency used when formatting prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    BRL,
    USD,
}

impl Currency {
    /// Symbol as rendered by the pt-BR locale.
    pub fn prefix(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "US$",
        }
    }
}

/// How traded volume is reported for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeUnit {
    /// Millions of shares, e.g. `0.45M`.
    Millions,
    /// Thousands of coins, e.g. `1.9 mil BTC`.
    ThousandsOfBtc,
}

/// Static per-asset configuration: naming, pricing and simulation scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetProfile {
    pub display_name: &'static str,
    pub base_price: f64,
    pub currency: Currency,
    /// Width of the uniform price noise applied to each candle.
    pub noise_scale: f64,
    /// Slope of the linear trend centered on the middle of the series.
    pub drift_scale: f64,
    pub volume_base: f64,
    pub volume_noise: f64,
    pub volume_unit: VolumeUnit,
}

const PETR4_PROFILE: AssetProfile = AssetProfile {
    display_name: "PETR4 • Petrobras",
    base_price: 34.72,
    currency: Currency::BRL,
    noise_scale: 2.5,
    drift_scale: 0.18,
    volume_base: 450_000.0,
    volume_noise: 160_000.0,
    volume_unit: VolumeUnit::Millions,
};

const VALE3_PROFILE: AssetProfile = AssetProfile {
    display_name: "VALE3 • Vale",
    base_price: 65.84,
    currency: Currency::BRL,
    noise_scale: 2.5,
    drift_scale: 0.18,
    volume_base: 450_000.0,
    volume_noise: 160_000.0,
    volume_unit: VolumeUnit::Millions,
};

const AAPL_PROFILE: AssetProfile = AssetProfile {
    display_name: "AAPL • Apple",
    base_price: 192.55,
    currency: Currency::USD,
    noise_scale: 6.0,
    drift_scale: 0.18,
    volume_base: 620_000.0,
    volume_noise: 160_000.0,
    volume_unit: VolumeUnit::Millions,
};

const BTCUSDT_PROFILE: AssetProfile = AssetProfile {
    display_name: "BTC/USDT • Bitcoin",
    base_price: 67_580.0,
    currency: Currency::USD,
    noise_scale: 3000.0,
    drift_scale: 8.0,
    volume_base: 1800.0,
    volume_noise: 900.0,
    volume_unit: VolumeUnit::ThousandsOfBtc,
};

const TSLA_PROFILE: AssetProfile = AssetProfile {
    display_name: "TSLA • Tesla",
    base_price: 238.87,
    currency: Currency::USD,
    noise_scale: 6.0,
    drift_scale: 0.35,
    volume_base: 450_000.0,
    volume_noise: 160_000.0,
    volume_unit: VolumeUnit::Millions,
};

impl AssetSymbol {
    /// Every supported asset, in dashboard order.
    pub const ALL: [AssetSymbol; 5] = [
        AssetSymbol::PETR4,
        AssetSymbol::VALE3,
        AssetSymbol::AAPL,
        AssetSymbol::BTCUSDT,
        AssetSymbol::TSLA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetSymbol::PETR4 => "PETR4",
            AssetSymbol::VALE3 => "VALE3",
            AssetSymbol::AAPL => "AAPL",
            AssetSymbol::BTCUSDT => "BTCUSDT",
            AssetSymbol::TSLA => "TSLA",
        }
    }

    pub fn profile(&self) -> &'static AssetProfile {
        match self {
            AssetSymbol::PETR4 => &PETR4_PROFILE,
            AssetSymbol::VALE3 => &VALE3_PROFILE,
            AssetSymbol::AAPL => &AAPL_PROFILE,
            AssetSymbol::BTCUSDT => &BTCUSDT_PROFILE,
            AssetSymbol::TSLA => &TSLA_PROFILE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.profile().display_name
    }

    pub fn base_price(&self) -> f64 {
        self.profile().base_price
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AssetSymbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        AssetSymbol::ALL
            .into_iter()
            .find(|symbol| symbol.as_str() == upper)
            .ok_or_else(|| CoreError::UnknownSymbol(s.to_string()))
    }
}

/// Label/value pair for asset pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetOption {
    pub label: &'static str,
    pub value: AssetSymbol,
}

pub fn asset_options() -> Vec<AssetOption> {
    AssetSymbol::ALL
        .into_iter()
        .map(|symbol| AssetOption {
            label: symbol.display_name(),
            value: symbol,
        })
        .collect()
}
