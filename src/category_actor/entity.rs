use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Category, CategoryCreate, CategoryPatch, ALL_CATEGORIES};

impl Entity for Category {
    type Id = String;
    type CreatePayload = CategoryCreate;
    type Patch = CategoryPatch;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "categories";

    fn id(&self) -> &String {
        &self.name
    }

    /// Categories are keyed by their trimmed name.
    fn requested_id(payload: &CategoryCreate) -> Option<String> {
        Some(payload.name.trim().to_string())
    }

    fn from_create(id: String, payload: CategoryCreate) -> Result<Self, String> {
        if id.is_empty() {
            return Err("name is required".to_string());
        }
        if id.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Err(format!("'{ALL_CATEGORIES}' is reserved"));
        }
        let now = Utc::now();
        Ok(Self {
            name: id,
            description: payload.description,
            color: payload.color,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), String> {
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_name_is_rejected() {
        assert!(Category::from_create("all".into(), CategoryCreate::named("all")).is_err());
    }

    #[test]
    fn test_name_is_trimmed_into_id() {
        assert_eq!(
            Category::requested_id(&CategoryCreate::named("  Garden ")),
            Some("Garden".to_string())
        );
    }
}
