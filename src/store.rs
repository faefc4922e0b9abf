//! The authoritative in-memory prompt library.

use crate::models::prompt::new_unique_id;
use crate::models::{Category, Prompt, PromptDraft};
use crate::persistence::{PersistenceAdapter, SnapshotSource};
use crate::query::PromptQuery;
use crate::resolver::resolve_category;
use tracing::{debug, info, warn};

/// Label shown for a prompt whose category id is unknown.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Owns the prompt and category collections for a session.
///
/// Every mutation re-serializes each collection it changed before
/// returning. Persistence failures are logged by the adapter and never
/// reach the caller.
pub struct PromptStore {
    prompts: Vec<Prompt>,
    categories: Vec<Category>,
    persistence: PersistenceAdapter,
}

impl PromptStore {
    /// Loads the library, persisting the seed dataset when storage had none.
    pub async fn open(persistence: PersistenceAdapter) -> Self {
        let snapshot = persistence.load().await;
        let store = Self {
            prompts: snapshot.prompts,
            categories: snapshot.categories,
            persistence,
        };
        if snapshot.source == SnapshotSource::Seed {
            store.persistence.save_categories(&store.categories).await;
            store.persistence.save_prompts(&store.prompts).await;
        }
        store
    }

    pub fn list_prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get_prompt(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name for a category id, or [`UNCATEGORIZED`].
    pub fn category_name(&self, id: &str) -> &str {
        self.get_category(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    pub fn filtered(&self, query: &PromptQuery) -> Vec<&Prompt> {
        query.apply(&self.prompts)
    }

    /// Saves a draft and returns the finalized prompt.
    ///
    /// With `new_category_name`, the category is resolved first and
    /// overrides `draft.category_id`. A draft without an id becomes a new
    /// prompt at the front of the list; a draft with an id replaces that
    /// prompt in place. A draft whose id matches nothing changes no prompt.
    pub async fn add_or_update(
        &mut self,
        draft: PromptDraft,
        new_category_name: Option<&str>,
    ) -> Prompt {
        let mut category_id = draft.category_id;
        if let Some(name) = new_category_name {
            let resolution = resolve_category(&mut self.categories, name);
            category_id = resolution.category_id;
            if resolution.created {
                self.persistence.save_categories(&self.categories).await;
            }
        }

        match draft.id {
            Some(id) => {
                let prompt = Prompt {
                    id,
                    heading: draft.heading,
                    description: draft.description,
                    category_id,
                };
                match self.prompts.iter().position(|p| p.id == prompt.id) {
                    Some(index) => {
                        self.prompts[index] = prompt.clone();
                        info!(prompt_id = %prompt.id, "Updated prompt");
                        self.persistence.save_prompts(&self.prompts).await;
                    }
                    None => {
                        warn!(prompt_id = %prompt.id, "Attempted to update non-existent prompt");
                    }
                }
                prompt
            }
            None => {
                let prompt = Prompt {
                    id: self.fresh_prompt_id(),
                    heading: draft.heading,
                    description: draft.description,
                    category_id,
                };
                self.prompts.insert(0, prompt.clone());
                info!(prompt_id = %prompt.id, "Created prompt");
                self.persistence.save_prompts(&self.prompts).await;
                prompt
            }
        }
    }

    /// Removes the prompt with `id`. Returns false, writing nothing, if absent.
    ///
    /// Its category is kept even when no prompt references it anymore.
    pub async fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.prompts.iter().position(|p| p.id == id) else {
            debug!(prompt_id = id, "Delete of unknown prompt ignored");
            return false;
        };
        self.prompts.remove(index);
        info!(prompt_id = id, "Deleted prompt");
        self.persistence.save_prompts(&self.prompts).await;
        true
    }

    fn fresh_prompt_id(&self) -> String {
        new_unique_id(|id| self.get_prompt(id).is_some())
    }
}
