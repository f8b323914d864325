use chrono_tz::Tz;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{CatalogProvider, StaticCatalog};
use crate::core::{Config, Result, ServerError};
use crate::orders::{OrderStorage, OrdersManager};
use crate::relay::{BranchDestinations, MessagingRelay, WebhookRelay, WhatsAppLinkRelay};
use crate::rewards::{MissionCatalog, RewardService};

/// Shared handles for every request
///
/// Cloning is cheap: everything behind `Arc` or already `Clone` over an `Arc`.
///
/// | Field | Type | Notes |
/// |-------|------|-------|
/// | config | Config | immutable |
/// | catalog | Arc<dyn CatalogProvider> | read-only products |
/// | missions | Arc<MissionCatalog> | mission definitions |
/// | orders | Arc<OrdersManager> | create / transition / list |
/// | rewards | RewardService | redeem / collectibles |
/// | relay | Arc<dyn MessagingRelay> | outbound order messages |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<dyn CatalogProvider>,
    pub missions: Arc<MissionCatalog>,
    pub orders: Arc<OrdersManager>,
    pub rewards: RewardService,
    pub relay: Arc<dyn MessagingRelay>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("missions", &self.missions.all().len())
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// Assemble state from already-built parts
    pub fn new(
        config: Config,
        catalog: Arc<dyn CatalogProvider>,
        missions: Arc<MissionCatalog>,
        storage: OrderStorage,
        relay: Arc<dyn MessagingRelay>,
    ) -> Self {
        let orders = Arc::new(OrdersManager::new(storage.clone(), Arc::clone(&missions)));
        let rewards = RewardService::new(storage, Arc::clone(&missions));
        Self {
            config,
            catalog,
            missions,
            orders,
            rewards,
            relay,
        }
    }

    /// Open the store under `work_dir` and wire up default collaborators
    pub fn initialize(config: &Config) -> Result<Self> {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir).map_err(|source| ServerError::WorkDir {
            path: config.work_dir.clone(),
            source,
        })?;

        let db_path = config.database_path();
        let storage = OrderStorage::open(&db_path)?;
        let stats = storage.get_stats()?;
        tracing::info!(
            path = %db_path.display(),
            orders = stats.order_count,
            reward_states = stats.reward_state_count,
            "Order store opened"
        );

        let relay: Arc<dyn MessagingRelay> = match &config.relay_webhook_url {
            Some(url) => {
                tracing::info!(url = %url, "Relaying orders through webhook");
                Arc::new(WebhookRelay::new(
                    url.clone(),
                    Duration::from_millis(config.request_timeout_ms),
                )?)
            }
            None => {
                tracing::info!("Relaying orders as WhatsApp links");
                Arc::new(WhatsAppLinkRelay::new())
            }
        };

        Ok(Self::new(
            config.clone(),
            Arc::new(StaticCatalog::standard()),
            Arc::new(MissionCatalog::standard()),
            storage,
            relay,
        ))
    }

    /// In-memory state for router tests
    #[cfg(test)]
    pub fn for_tests(relay: Arc<dyn MessagingRelay>) -> Self {
        let storage = OrderStorage::open_in_memory().expect("in-memory store");
        Self::new(
            Config::with_overrides("./target/test-data", 0),
            Arc::new(StaticCatalog::standard()),
            Arc::new(MissionCatalog::standard()),
            storage,
            relay,
        )
    }

    pub fn business_tz(&self) -> Tz {
        self.config.business_tz
    }

    pub fn destinations(&self) -> &BranchDestinations {
        &self.config.destinations
    }

    /// Log every order event until the channel closes
    pub fn start_background_tasks(&self) {
        let mut rx = self.orders.subscribe();
        tokio::spawn(async move {
            use crate::orders::OrderEvent;
            use tokio::sync::broadcast::error::RecvError;
            loop {
                match rx.recv().await {
                    Ok(OrderEvent::Created { order, lines }) => {
                        tracing::info!(
                            target: "order_events",
                            order_id = %order.id,
                            number = %order.number,
                            branch = ?order.branch,
                            lines = lines.len(),
                            total = order.total,
                            "Order created"
                        );
                    }
                    Ok(OrderEvent::StatusChanged {
                        order_id,
                        number,
                        from,
                        to,
                        ..
                    }) => {
                        tracing::info!(
                            target: "order_events",
                            order_id = %order_id,
                            number = %number,
                            from = ?from,
                            to = ?to,
                            "Order status changed"
                        );
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Order event logger lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}
