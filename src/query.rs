//! Filtered, ordered views over the prompt collection.

use crate::models::Prompt;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Textual sentinel selecting every category.
pub const ALL_CATEGORIES: &str = "all";

/// Category selector for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, prompt: &Prompt) -> bool {
        match self {
            Self::All => true,
            Self::Only(category_id) => prompt.category_id == *category_id,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category_id) => f.write_str(category_id),
        }
    }
}

/// Search term plus category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl PromptQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn apply<'a>(&self, prompts: &'a [Prompt]) -> Vec<&'a Prompt> {
        filter_prompts(prompts, &self.search, &self.category)
    }
}

/// Keeps prompts in the selected category whose heading or description
/// contains `search` case-insensitively. Input order is preserved.
pub fn filter_prompts<'a>(
    prompts: &'a [Prompt],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Prompt> {
    let needle = search.to_lowercase();
    prompts
        .iter()
        .filter(|prompt| category.matches(prompt))
        .filter(|prompt| {
            prompt.heading.to_lowercase().contains(&needle)
                || prompt.description.to_lowercase().contains(&needle)
        })
        .collect()
}
