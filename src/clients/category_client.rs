use tracing::{debug, info, instrument};

use super::admin_client::AdminClient;
use super::product_client::ProductClient;
use crate::actor_framework::ResourceClient;
use crate::catalog::with_all_first;
use crate::category_actor::CategoryError;
use crate::domain::{AdminSession, Category, CategoryCreate, CategoryPatch, ALL_CATEGORIES};

/// Client for interacting with the Category actor.
///
/// Renaming a category also recategorizes its products, so this client
/// holds a [`ProductClient`].
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
    admin: AdminClient,
    products: ProductClient,
}

impl_client_get!(CategoryClient, Category, CategoryError, category);
impl_client_list!(CategoryClient, Category, CategoryError, category_records);

fn ensure_not_reserved(name: &str) -> Result<(), CategoryError> {
    if name.trim().eq_ignore_ascii_case(ALL_CATEGORIES) {
        return Err(CategoryError::Reserved(name.to_string()));
    }
    Ok(())
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>, admin: AdminClient, products: ProductClient) -> Self {
        Self { inner, admin, products }
    }

    /// Category names for the browsing bar, `All` first.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, CategoryError> {
        debug!("Sending request");
        let names = self.inner.list().await?.into_iter().map(|c| c.name).collect();
        Ok(with_all_first(names))
    }

    #[instrument(skip(self, session, payload), fields(name = %payload.name))]
    pub async fn add_category(&self, session: &AdminSession, payload: CategoryCreate) -> Result<String, CategoryError> {
        self.admin.authorize(session).await?;
        ensure_not_reserved(&payload.name)?;
        let name = self.inner.create(payload).await?;
        info!("Category added");
        Ok(name)
    }

    #[instrument(skip(self, session, patch))]
    pub async fn update_category(
        &self,
        session: &AdminSession,
        name: String,
        patch: CategoryPatch,
    ) -> Result<Category, CategoryError> {
        self.admin.authorize(session).await?;
        Ok(self.inner.update(name, patch).await?)
    }

    /// Renames `old` to `new`, keeping its metadata and moving its products.
    /// Returns the number of products moved.
    #[instrument(skip(self, session))]
    pub async fn rename_category(&self, session: &AdminSession, old: &str, new: &str) -> Result<usize, CategoryError> {
        self.admin.authorize(session).await?;
        ensure_not_reserved(old)?;
        ensure_not_reserved(new)?;
        let new = new.trim();
        if old == new {
            return Ok(0);
        }
        let existing = self
            .inner
            .get(old.to_string())
            .await?
            .ok_or_else(|| CategoryError::NotFound(old.to_string()))?;

        self.inner
            .create(CategoryCreate {
                name: new.to_string(),
                description: existing.description,
                color: existing.color,
            })
            .await?;
        let moved = self
            .products
            .recategorize(session, old, new)
            .await
            .map_err(|e| CategoryError::ActorCommunicationError(e.to_string()))?;
        self.inner.delete(old.to_string()).await?;
        info!(moved, "Category renamed");
        Ok(moved)
    }

    /// Removes the category record. Products keep their category label.
    #[instrument(skip(self, session))]
    pub async fn delete_category(&self, session: &AdminSession, name: &str) -> Result<(), CategoryError> {
        self.admin.authorize(session).await?;
        ensure_not_reserved(name)?;
        self.inner.delete(name.to_string()).await?;
        info!("Category deleted");
        Ok(())
    }
}
