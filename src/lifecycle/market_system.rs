use crate::cart_actor::CartContext;
use crate::clock::SharedClock;
use crate::config::MarketConfig;
use crate::facade::Marketplace;
use crate::model::GroupDirectory;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Starts every actor, wires their contexts and hands out the facade.
///
/// Dependencies between actors form a chain, so dropping the facade closes
/// every channel in turn:
///
/// ```text
/// Cart ──► Product ──► Supplier
///   │                    ▲
///   └────► Order ────────┘
/// ```
///
/// # Example
///
/// ```no_run
/// # async fn demo() -> Result<(), String> {
/// use bazar_buddy::clock::SystemClock;
/// use bazar_buddy::config::MarketConfig;
/// use bazar_buddy::lifecycle::MarketSystem;
/// use std::sync::Arc;
///
/// let system = MarketSystem::start(MarketConfig::default(), Arc::new(SystemClock));
/// let _products = system.market.list_products(None).await.map_err(|e| e.to_string())?;
/// system.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct MarketSystem {
    pub market: Marketplace,
    handles: Vec<JoinHandle<()>>,
}

impl MarketSystem {
    /// Must be called inside a Tokio runtime.
    pub fn start(config: MarketConfig, clock: SharedClock) -> Self {
        let capacity = config.channel_capacity;
        let groups = GroupDirectory::new(config.groups);

        // 1. Create actors (no dependencies yet)
        let (supplier_actor, supplier_client) = crate::supplier_actor::new(capacity);
        let (product_actor, product_client) = crate::product_actor::new(capacity);
        let (order_actor, order_client) = crate::order_actor::new(capacity);
        let (cart_actor, cart_client) = crate::cart_actor::new(capacity);

        // 2. Start actors with injected context
        let supplier_handle = tokio::spawn(supplier_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(supplier_client.clone()));
        let order_handle = tokio::spawn(order_actor.run(supplier_client.clone()));
        let cart_handle = tokio::spawn(cart_actor.run(CartContext {
            products: product_client.clone(),
            orders: order_client.clone(),
            groups: groups.clone(),
            clock: clock.clone(),
            delivery_fee: config.delivery_fee,
        }));

        info!(
            capacity,
            delivery_fee = config.delivery_fee,
            active_groups = groups.active().len(),
            "Marketplace started"
        );

        Self {
            market: Marketplace::new(
                cart_client,
                order_client,
                product_client,
                supplier_client,
                groups,
                clock,
            ),
            // Joined in dependency order: dependents first.
            handles: vec![cart_handle, order_handle, product_handle, supplier_handle],
        }
    }

    /// Drops the facade and waits for every actor to drain and stop.
    ///
    /// Clones of the facade held elsewhere keep their actors alive, so drop
    /// those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down marketplace...");
        drop(self.market);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Marketplace shutdown complete.");
        Ok(())
    }
}
