use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::clients::{AdminClient, OrderClient, ProductClient, UserClient};
use crate::config::AppConfig;
use crate::domain::{Order, Product, User};
use crate::storage::{InMemoryObjectStore, ObjectStore};

/// The storefront back end: one actor per collection plus the clients wired over them.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct StoreSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub admin_client: AdminClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Starts the system with an in-process object store.
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(InMemoryObjectStore::new(config.storage.public_base_url.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: &AppConfig, store: Arc<dyn ObjectStore>) -> Self {
        let buffer = config.actors.buffer_size;

        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer, sequential_ids("user"));
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(buffer, sequential_ids("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, sequential_ids("order"));
        let order_client = OrderClient::new(order_resource_client, user_client.clone(), product_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        let admin_client = AdminClient::new(
            user_client.clone(),
            product_client.clone(),
            order_client.clone(),
            store,
            config.pagination,
            config.dashboard,
            config.storage.max_upload_bytes,
        );

        info!(service = %config.service_name, buffer, "Store system started");

        Self {
            order_client,
            user_client,
            product_client,
            admin_client,
            handles: vec![user_handle, product_handle, order_handle],
        }
    }

    /// Drops every client so the actor mailboxes close, then waits for the actors to drain.
    ///
    /// Clones of the clients held elsewhere keep their actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.admin_client);
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
