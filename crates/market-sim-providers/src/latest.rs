use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use market_sim_core::asset::AssetSymbol;
use market_sim_core::overview::OverviewPayload;
use tracing::debug;

use crate::error::ProviderError;
use crate::provider::DashboardProvider;

/// Overview loader where only the most recently requested asset wins.
///
/// Each `load` takes a ticket when it is called. If another `load` is issued
/// before the response arrives, the older one resolves to `Ok(None)` so the
/// caller never renders a stale asset after a quick switch.
pub struct LatestOverview<P> {
    provider: Arc<P>,
    generation: Arc<AtomicU64>,
}

impl<P> Clone for LatestOverview<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<P: DashboardProvider + 'static> LatestOverview<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Request the overview for `asset`, superseding any load still in flight.
    ///
    /// The ticket is taken eagerly, so call order (not poll order) decides
    /// which request is the latest. The returned future is `'static` and can
    /// be spawned.
    pub fn load(
        &self,
        asset: AssetSymbol,
    ) -> impl Future<Output = Result<Option<OverviewPayload>, ProviderError>> + Send + use<P> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let provider = Arc::clone(&self.provider);
        let generation = Arc::clone(&self.generation);

        async move {
            let payload = provider.fetch_overview(asset).await?;
            let current = generation.load(Ordering::SeqCst);
            if current != ticket {
                debug!("{asset}: discarding overview #{ticket}, superseded by #{current}");
                return Ok(None);
            }
            Ok(Some(payload))
        }
    }
}
