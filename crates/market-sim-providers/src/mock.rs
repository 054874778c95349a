use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_sim_core::asset::AssetSymbol;
use market_sim_core::monitored::{MonitoredAsset, monitored_assets};
use market_sim_core::overview::{OverviewPayload, build_overview};
use market_sim_core::series::{DEFAULT_POINTS, SeriesConfig};
use market_sim_core::settings::SettingsPayload;
use market_sim_core::trades::{TradeHistory, trade_history};
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::provider::DashboardProvider;

const POINTS_VAR: &str = "MARKET_SIM_POINTS";
const LATENCY_VAR: &str = "MARKET_SIM_LATENCY";

/// Artificial response delays, one per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub overview: Duration,
    pub monitored: Duration,
    pub history: Duration,
    pub settings: Duration,
    pub save: Duration,
}

impl Latency {
    /// Delays that mimic a slow backend.
    pub fn simulated() -> Self {
        Self {
            overview: Duration::from_millis(420),
            monitored: Duration::from_millis(360),
            history: Duration::from_millis(500),
            settings: Duration::from_millis(280),
            save: Duration::from_millis(350),
        }
    }

    pub fn none() -> Self {
        Self {
            overview: Duration::ZERO,
            monitored: Duration::ZERO,
            history: Duration::ZERO,
            settings: Duration::ZERO,
            save: Duration::ZERO,
        }
    }

    /// Parse a profile name: `simulated` or `none`.
    pub fn from_name(name: &str) -> Result<Self, ProviderError> {
        match name.trim().to_lowercase().as_str() {
            "simulated" => Ok(Self::simulated()),
            "none" => Ok(Self::none()),
            other => Err(ProviderError::Config(format!(
                "unknown latency profile: '{other}'. Expected: simulated, none"
            ))),
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

/// Dashboard provider backed by the deterministic generators.
/// No network access; every response is computed locally after a fake delay.
#[derive(Debug, Clone)]
pub struct MockProvider {
    config: SeriesConfig,
    latency: Latency,
    fixed_now: Option<DateTime<Utc>>,
}

impl MockProvider {
    pub fn new(config: SeriesConfig, latency: Latency) -> Self {
        Self {
            config,
            latency,
            fixed_now: None,
        }
    }

    /// Create from `MARKET_SIM_POINTS` and `MARKET_SIM_LATENCY`, falling back
    /// to 24 points and simulated latency when unset.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let points = match get(POINTS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ProviderError::Config(format!(
                    "{POINTS_VAR} must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_POINTS,
        };
        let latency = match get(LATENCY_VAR) {
            Some(raw) => Latency::from_name(&raw)?,
            None => Latency::simulated(),
        };
        Ok(Self::new(SeriesConfig { points }, latency))
    }

    /// Pin the clock used for trade timestamps (for testing).
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.config.points = points;
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn latency(&self) -> &Latency {
        &self.latency
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    async fn delay(&self, what: &str, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        debug!("{what}: simulating {}ms of latency", duration.as_millis());
        tokio::time::sleep(duration).await;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(SeriesConfig::default(), Latency::simulated())
    }
}

#[async_trait]
impl DashboardProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_overview(&self, asset: AssetSymbol) -> Result<OverviewPayload, ProviderError> {
        self.delay("overview", self.latency.overview).await;
        let payload = build_overview(asset, &self.config);
        debug!("{asset}: generated {} candle(s)", payload.candles.len());
        Ok(payload)
    }

    async fn fetch_monitored_assets(&self) -> Result<Vec<MonitoredAsset>, ProviderError> {
        self.delay("monitored assets", self.latency.monitored).await;
        Ok(monitored_assets())
    }

    async fn fetch_trade_history(&self) -> Result<TradeHistory, ProviderError> {
        self.delay("trade history", self.latency.history).await;
        Ok(trade_history(self.now()))
    }

    async fn fetch_settings(&self) -> Result<SettingsPayload, ProviderError> {
        self.delay("settings", self.latency.settings).await;
        Ok(SettingsPayload::default())
    }

    async fn save_settings(
        &self,
        settings: SettingsPayload,
    ) -> Result<SettingsPayload, ProviderError> {
        self.delay("save settings", self.latency.save).await;
        info!(
            "settings saved: interval={} maxRisk={} capital={} stopLoss={} takeProfit={}",
            settings.interval,
            settings.max_risk,
            settings.capital,
            settings.stop_loss,
            settings.take_profit
        );
        Ok(settings)
    }
}
