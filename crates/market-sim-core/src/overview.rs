use serde::{Deserialize, Serialize};

use crate::asset::AssetSymbol;
use crate::candle::Candle;
use crate::metrics::{OverviewMetric, build_metrics};
use crate::series::{SeriesConfig, generate_series};

/// Everything the overview tab renders for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewPayload {
    pub asset: AssetSymbol,
    pub display_name: String,
    pub metrics: Vec<OverviewMetric>,
    pub candles: Vec<Candle>,
}

pub fn build_overview(asset: AssetSymbol, config: &SeriesConfig) -> OverviewPayload {
    let candles = generate_series(asset, config);
    OverviewPayload {
        asset,
        display_name: asset.display_name().to_string(),
        metrics: build_metrics(asset, &candles),
        candles,
    }
}
