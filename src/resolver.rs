//! Resolves a proposed category name to a category id.

use crate::models::prompt::new_unique_id;
use crate::models::Category;
use tracing::debug;

/// Outcome of resolving a proposed category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub category_id: String,
    /// True when a category was appended to the collection.
    pub created: bool,
}

/// Reuses the category whose name matches `proposed_name` case-insensitively,
/// or appends a new one named with the trimmed proposal.
///
/// Only the category collection is touched; the caller applies the returned
/// id to the prompt.
pub fn resolve_category(categories: &mut Vec<Category>, proposed_name: &str) -> Resolution {
    let name = proposed_name.trim();

    if let Some(existing) = categories.iter().find(|c| c.matches_name(name)) {
        debug!(category_id = %existing.id, name, "Reusing existing category");
        return Resolution {
            category_id: existing.id.clone(),
            created: false,
        };
    }

    let category = Category {
        id: new_unique_id(|id| categories.iter().any(|c| c.id == id)),
        name: name.to_string(),
    };
    debug!(category_id = %category.id, name, "Created category");
    let category_id = category.id.clone();
    categories.push(category);
    Resolution {
        category_id,
        created: true,
    }
}
