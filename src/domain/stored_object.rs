use chrono::{DateTime, Utc};

/// A file held by object storage, addressed by its path.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// A file supplied by the caller: payment proof or product image.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Storage write request: the upload plus the folder it belongs in.
#[derive(Debug, Clone)]
pub struct StoredObjectCreate {
    pub folder: String,
    pub upload: Upload,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredObjectCreate {
    /// `<folder>/<unix millis>_<file name>`
    pub fn path(&self) -> String {
        format!(
            "{}/{}_{}",
            self.folder,
            self.uploaded_at.timestamp_millis(),
            self.upload.file_name
        )
    }
}
