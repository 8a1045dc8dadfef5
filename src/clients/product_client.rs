use tracing::{debug, info, instrument};

use super::admin_client::AdminClient;
use super::storage_client::{StorageClient, PRODUCTS_FOLDER};
use crate::actor_framework::ResourceClient;
use crate::domain::{AdminSession, Product, ProductCreate, ProductPatch, Upload};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
///
/// Reads are public. Every mutation requires a live [`AdminSession`].
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    admin: AdminClient,
    storage: StorageClient,
}

impl_client_get!(ProductClient, Product, ProductError, product);
impl_client_list!(ProductClient, Product, ProductError, products);

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, admin: AdminClient, storage: StorageClient) -> Self {
        Self { inner, admin, storage }
    }

    async fn store_image(&self, image: Upload) -> Result<String, ProductError> {
        self.storage
            .upload(PRODUCTS_FOLDER, image)
            .await
            .map_err(|e| ProductError::Upload(e.to_string()))
    }

    /// Creates a product, uploading `image` first when given.
    #[instrument(skip(self, session, payload, image), fields(name = %payload.name))]
    pub async fn create_product(
        &self,
        session: &AdminSession,
        mut payload: ProductCreate,
        image: Option<Upload>,
    ) -> Result<String, ProductError> {
        self.admin.authorize(session).await?;
        let uploaded = match image {
            Some(image) => {
                let path = self.store_image(image).await?;
                payload.image = path.clone();
                Some(path)
            }
            None => None,
        };
        match self.inner.create(payload).await {
            Ok(id) => {
                info!(product_id = %id, "Product created");
                Ok(id)
            }
            Err(e) => {
                if let Some(path) = uploaded {
                    self.storage.discard(&path).await;
                }
                Err(e.into())
            }
        }
    }

    /// Applies `patch`. A new `image` replaces and deletes the stored one.
    #[instrument(skip(self, session, patch, image))]
    pub async fn update_product(
        &self,
        session: &AdminSession,
        id: String,
        mut patch: ProductPatch,
        image: Option<Upload>,
    ) -> Result<Product, ProductError> {
        self.admin.authorize(session).await?;
        let previous = self
            .inner
            .get(id.clone())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.clone()))?;
        if let Some(image) = image {
            patch.image = Some(self.store_image(image).await?);
        }
        let new_image = patch.image.clone();
        let updated = self.inner.update(id, patch).await?;
        if new_image.is_some_and(|image| image != previous.image) {
            self.storage.discard(&previous.image).await;
        }
        info!("Product updated");
        Ok(updated)
    }

    #[instrument(skip(self, session))]
    pub async fn delete_product(&self, session: &AdminSession, id: String) -> Result<(), ProductError> {
        self.admin.authorize(session).await?;
        let removed = self.inner.delete(id).await?;
        self.storage.discard(&removed.image).await;
        info!("Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn check_availability(&self, id: String) -> Result<bool, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckAvailability).await? {
            ProductActionResult::CheckAvailability(in_stock) => Ok(in_stock),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn set_in_stock(&self, session: &AdminSession, id: String, in_stock: bool) -> Result<(), ProductError> {
        self.admin.authorize(session).await?;
        match self.inner.perform_action(id, ProductAction::SetInStock(in_stock)).await? {
            ProductActionResult::SetInStock(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn set_promotion(&self, session: &AdminSession, id: String, promotion: u8) -> Result<(), ProductError> {
        self.admin.authorize(session).await?;
        match self.inner.perform_action(id, ProductAction::SetPromotion(promotion)).await? {
            ProductActionResult::SetPromotion(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Moves every product in category `from` to `to`. Returns how many moved.
    #[instrument(skip(self, session))]
    pub async fn recategorize(&self, session: &AdminSession, from: &str, to: &str) -> Result<usize, ProductError> {
        self.admin.authorize(session).await?;
        let mut moved = 0;
        for product in self.inner.list().await? {
            if product.category != from {
                continue;
            }
            let patch = ProductPatch {
                category: Some(to.to_string()),
                ..ProductPatch::default()
            };
            self.inner.update(product.id, patch).await?;
            moved += 1;
        }
        info!(moved, "Products recategorized");
        Ok(moved)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}
