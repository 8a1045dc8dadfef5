use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pseudo-category meaning "no category filter". Never stored.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl CategoryCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub description: Option<String>,
    pub color: Option<String>,
}
