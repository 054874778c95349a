use async_trait::async_trait;
use market_sim_core::asset::AssetSymbol;
use market_sim_core::monitored::MonitoredAsset;
use market_sim_core::overview::OverviewPayload;
use market_sim_core::settings::SettingsPayload;
use market_sim_core::trades::TradeHistory;

use crate::error::ProviderError;

/// Source of the data behind each dashboard tab.
#[async_trait]
pub trait DashboardProvider: Send + Sync {
    /// Provider name (for logging/display).
    fn name(&self) -> &str;

    /// Candles and headline metrics for one asset.
    async fn fetch_overview(&self, asset: AssetSymbol) -> Result<OverviewPayload, ProviderError>;

    async fn fetch_monitored_assets(&self) -> Result<Vec<MonitoredAsset>, ProviderError>;

    /// Recent trades, newest first, with cumulative performance oldest first.
    async fn fetch_trade_history(&self) -> Result<TradeHistory, ProviderError>;

    async fn fetch_settings(&self) -> Result<SettingsPayload, ProviderError>;

    /// Persist settings and return what was stored.
    async fn save_settings(
        &self,
        settings: SettingsPayload,
    ) -> Result<SettingsPayload, ProviderError>;
}
