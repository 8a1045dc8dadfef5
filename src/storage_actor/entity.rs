use crate::actor_framework::Entity;
use crate::domain::{StoredObject, StoredObjectCreate};

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Entity for StoredObject {
    type Id = String;
    type CreatePayload = StoredObjectCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "objects";

    fn id(&self) -> &String {
        &self.path
    }

    fn requested_id(payload: &StoredObjectCreate) -> Option<String> {
        Some(payload.path())
    }

    fn from_create(path: String, payload: StoredObjectCreate) -> Result<Self, String> {
        let upload = payload.upload;
        if upload.file_name.trim().is_empty() || upload.file_name.contains('/') {
            return Err(format!("invalid file name: {:?}", upload.file_name));
        }
        if upload.bytes.is_empty() {
            return Err("empty upload".to_string());
        }
        if upload.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(format!("upload exceeds {MAX_UPLOAD_BYTES} bytes"));
        }
        Ok(Self {
            path,
            content_type: upload.content_type,
            bytes: upload.bytes,
            created_at: payload.uploaded_at,
        })
    }

    /// Stored objects are immutable.
    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err("stored objects cannot be modified".to_string())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
