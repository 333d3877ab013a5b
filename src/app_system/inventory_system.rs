use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::domain::Product;

use super::{AppError, ServerConfig};

/// Starts the product actor and hands out its client.
///
/// Shutting down drops the system's client; the actor stops once every other
/// clone (for example the one held by the GraphQL schema) is gone too.
pub struct InventorySystem {
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    #[instrument(name = "inventory_system", skip(config))]
    pub fn new(config: &ServerConfig) -> Self {
        info!("Starting inventory system");

        // Ids are decimal strings from a process-local counter starting at 1.
        let product_id_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || product_id_counter.fetch_add(1, Ordering::SeqCst).to_string();

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(config.actor_buffer, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        info!("Inventory system started");

        Self {
            product_client,
            handles: vec![product_handle],
        }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down inventory system");
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(AppError::Shutdown(e.to_string()));
            }
        }

        info!("Inventory system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductCreate;

    #[tokio::test]
    async fn test_shutdown_waits_for_actor() -> Result<(), Box<dyn std::error::Error>> {
        let system = InventorySystem::new(&ServerConfig::default());

        let product = system
            .product_client
            .add_product(ProductCreate { name: "Widget".into(), price: 9.99, stock: 5 })
            .await?;
        assert_eq!(product.id, "1");

        system.shutdown().await?;
        Ok(())
    }
}
