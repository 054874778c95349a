use serde::{Deserialize, Serialize};

use crate::asset::AssetSymbol;
use crate::precision::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Alta,
    Baixa,
    Neutra,
}

/// Suggestion shown in the "AI signal" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiSignal {
    Comprar,
    Vender,
    Aguardar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionStatus {
    Aberta,
    Encerrada,
}

const TRENDS: [Trend; 3] = [Trend::Alta, Trend::Baixa, Trend::Neutra];
const SIGNALS: [AiSignal; 3] = [AiSignal::Comprar, AiSignal::Vender, AiSignal::Aguardar];
const STATUSES: [PositionStatus; 2] = [PositionStatus::Aberta, PositionStatus::Encerrada];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredAsset {
    pub symbol: AssetSymbol,
    pub name: String,
    pub last_price: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub ai_signal: AiSignal,
    pub status: PositionStatus,
}

/// One row per asset. Labels are assigned cyclically by position, and prices
/// alternate above/below base by a step that widens down the list.
pub fn monitored_assets() -> Vec<MonitoredAsset> {
    AssetSymbol::ALL
        .into_iter()
        .enumerate()
        .map(|(index, symbol)| {
            let base = symbol.base_price();
            let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
            let delta = direction * (5.0 + index as f64 * 1.4);

            MonitoredAsset {
                symbol,
                name: symbol.display_name().to_string(),
                last_price: round2(base + delta),
                change_percent: round2(delta / base * 100.0),
                trend: TRENDS[index % TRENDS.len()],
                ai_signal: SIGNALS[(index + 1) % SIGNALS.len()],
                status: STATUSES[index % STATUSES.len()],
            }
        })
        .collect()
}
