use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::config::StoreConfig;
use crate::actor_framework::ResourceActor;
use crate::cart::{CartEngine, FileSessionStore, MemorySessionStore, SessionStore};
use crate::catalog::DEFAULT_CATEGORIES;
use crate::category_actor::CategoryError;
use crate::clients::{AdminClient, CategoryClient, OrderClient, ProductClient, StorageClient};
use crate::domain::{AdminAccount, AdminCreate, AdminSession, Category, CategoryCreate, Order, Product, StoredObject};
use crate::storefront::{StorefrontBackend, StorefrontClient, StorefrontService};

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct StoreSystem {
    pub admin_client: AdminClient,
    pub storage_client: StorageClient,
    pub product_client: ProductClient,
    pub category_client: CategoryClient,
    pub order_client: OrderClient,
    pub storefront_client: StorefrontClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    #[instrument(name = "store_system_start", skip(config))]
    pub async fn start(config: StoreConfig) -> Result<Self, String> {
        let buffer = config.channel_buffer;

        // 1. Admin accounts
        let (admin_actor, admin_resource_client) = ResourceActor::<AdminAccount>::new(buffer, sequential_ids("admin"));
        let admin_client = AdminClient::new(admin_resource_client);
        let admin_handle = tokio::spawn(admin_actor.run());

        // 2. Object storage
        let (storage_actor, storage_resource_client) =
            ResourceActor::<StoredObject>::new(buffer, sequential_ids("object"));
        let storage_client = StorageClient::new(storage_resource_client, config.upload_timeout);
        let storage_handle = tokio::spawn(storage_actor.run());

        // 3. Products
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(buffer, sequential_ids("product"));
        let product_client = ProductClient::new(product_resource_client, admin_client.clone(), storage_client.clone());
        let product_handle = tokio::spawn(product_actor.run());

        // 4. Categories
        let (category_actor, category_resource_client) =
            ResourceActor::<Category>::new(buffer, sequential_ids("category"));
        let category_client = CategoryClient::new(category_resource_client, admin_client.clone(), product_client.clone());
        let category_handle = tokio::spawn(category_actor.run());

        // 5. Orders
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, sequential_ids("order"));
        let order_client = OrderClient::new(order_resource_client, admin_client.clone(), storage_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        admin_client
            .register(AdminCreate {
                username: config.admin_username.clone(),
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
                session_ttl: config.admin_session_ttl,
            })
            .await
            .map_err(|e| format!("Failed to register admin account: {e}"))?;

        // 6. Storefront controller
        let session_store: Box<dyn SessionStore> = match &config.session_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file session store");
                Box::new(FileSessionStore::new(dir.clone()))
            }
            None => Box::new(MemorySessionStore::new()),
        };
        let cart = CartEngine::load(session_store, &config.session_key);
        let backend = StorefrontBackend {
            products: product_client.clone(),
            categories: category_client.clone(),
            orders: order_client.clone(),
        };
        let (storefront, storefront_client) = StorefrontService::new(buffer, backend, cart, config.checkout_timeout);
        let storefront_handle = tokio::spawn(storefront.run());

        info!("Store system started");
        Ok(Self {
            admin_client,
            storage_client,
            product_client,
            category_client,
            order_client,
            storefront_client,
            handles: vec![
                admin_handle,
                storage_handle,
                product_handle,
                category_handle,
                order_handle,
                storefront_handle,
            ],
        })
    }

    /// Creates the default categories. Existing ones are left untouched.
    #[instrument(skip(self, session))]
    pub async fn seed_categories(&self, session: &AdminSession) -> Result<usize, String> {
        let mut created = 0;
        for name in DEFAULT_CATEGORIES {
            match self.category_client.add_category(session, CategoryCreate::named(name)).await {
                Ok(_) => created += 1,
                Err(CategoryError::AlreadyExists(_)) => {}
                Err(e) => return Err(e.to_string()),
            }
        }
        info!(created, "Default categories seeded");
        Ok(created)
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Actors stop once every sender is gone, including the clones held by
        // the storefront and the other clients.
        drop(self.storefront_client);
        drop(self.order_client);
        drop(self.category_client);
        drop(self.product_client);
        drop(self.storage_client);
        drop(self.admin_client);

        let mut failed = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                if failed.is_none() {
                    failed = Some(format!("Actor task failed: {:?}", e));
                }
            }
        }
        if let Some(e) = failed {
            warn!("System shutdown finished with errors");
            return Err(e);
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
