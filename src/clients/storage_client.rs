use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{StoredObject, StoredObjectCreate, Upload};
use crate::storage_actor::StorageError;

pub const PAYMENTS_FOLDER: &str = "payments";
pub const PRODUCTS_FOLDER: &str = "products";

/// Client for the object storage actor. Uploads are bounded by a timeout.
#[derive(Clone)]
pub struct StorageClient {
    inner: ResourceClient<StoredObject>,
    upload_timeout: Duration,
}

impl_client_get!(StorageClient, StoredObject, StorageError, object);

impl StorageClient {
    pub fn new(inner: ResourceClient<StoredObject>, upload_timeout: Duration) -> Self {
        Self { inner, upload_timeout }
    }

    /// Stores `upload` under `folder` and returns its path.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
    pub async fn upload(&self, folder: &str, upload: Upload) -> Result<String, StorageError> {
        debug!("Sending request");
        let payload = StoredObjectCreate {
            folder: folder.to_string(),
            upload,
            uploaded_at: Utc::now(),
        };
        match tokio::time::timeout(self.upload_timeout, self.inner.create(payload)).await {
            Ok(Ok(path)) => {
                info!(%path, "Upload stored");
                Ok(path)
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => {
                warn!(timeout_secs = self.upload_timeout.as_secs(), "Upload timed out");
                Err(StorageError::Timeout(self.upload_timeout.as_secs()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, path: String) -> Result<(), StorageError> {
        debug!("Sending request");
        self.inner.delete(path).await?;
        Ok(())
    }

    /// Best-effort removal of a replaced or orphaned object. Empty references
    /// and external URLs are left alone.
    pub async fn discard(&self, reference: &str) {
        if reference.is_empty() || reference.contains("://") {
            return;
        }
        if let Err(e) = self.delete(reference.to_string()).await {
            warn!(error = %e, %reference, "Could not delete stored object");
        }
    }
}
