use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable prompt, tagged with exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Prompt {
    pub id: String,
    pub heading: String,
    /// Full prompt text. This is what gets copied.
    pub description: String,
    pub category_id: String,
}

impl Prompt {
    /// Builds a prompt with a freshly minted id.
    pub fn new(heading: String, description: String, category_id: String) -> Self {
        Self {
            id: new_id(),
            heading,
            description,
            category_id,
        }
    }
}

/// A prompt as submitted for saving. `id == None` means "create".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDraft {
    pub id: Option<String>,
    pub heading: String,
    pub description: String,
    /// Ignored when the save also carries a new category name.
    pub category_id: String,
}

impl PromptDraft {
    pub fn new(
        heading: impl Into<String>,
        description: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            heading: heading.into(),
            description: description.into(),
            category_id: category_id.into(),
        }
    }

    /// Targets an existing prompt instead of creating one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<&Prompt> for PromptDraft {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id: Some(prompt.id.clone()),
            heading: prompt.heading.clone(),
            description: prompt.description.clone(),
            category_id: prompt.category_id.clone(),
        }
    }
}

/// Mints an opaque unique identifier for prompts and categories.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Mints ids until one is not `is_taken`.
pub(crate) fn new_unique_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = new_id();
        if !is_taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_category_id() {
        let prompt = Prompt {
            id: "p1".into(),
            heading: "Heading".into(),
            description: "Body".into(),
            category_id: "1".into(),
        };
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["categoryId"], "1");
        assert!(json.get("category_id").is_none());
    }

    #[test]
    fn rejects_records_with_unknown_fields() {
        let raw = r#"{"id":"p1","heading":"h","description":"d","categoryId":"1","extra":true}"#;
        assert!(serde_json::from_str::<Prompt>(raw).is_err());
    }

    #[test]
    fn unique_id_skips_taken_candidates() {
        let rejected = std::cell::RefCell::new(Vec::new());
        let id = new_unique_id(|candidate| {
            let mut rejected = rejected.borrow_mut();
            if rejected.len() < 2 {
                rejected.push(candidate.to_string());
                true
            } else {
                false
            }
        });
        let rejected = rejected.into_inner();
        assert_eq!(rejected.len(), 2);
        assert!(!rejected.contains(&id));
    }

    #[test]
    fn new_prompts_get_distinct_ids() {
        let a = Prompt::new("a".into(), "a".into(), "1".into());
        let b = Prompt::new("b".into(), "b".into(), "1".into());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }
}
