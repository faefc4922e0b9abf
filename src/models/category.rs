use serde::{Deserialize, Serialize};

/// A named grouping label for prompts.
///
/// Names are compared case-insensitively for deduplication; the stored
/// casing is the one the category was first created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_ignores_case() {
        let category = Category {
            id: "1".into(),
            name: "Study".into(),
        };
        assert!(category.matches_name("study"));
        assert!(category.matches_name("STUDY"));
        assert!(!category.matches_name("studies"));
    }
}
