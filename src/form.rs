//! User input validation ahead of [`PromptStore::add_or_update`].
//!
//! [`PromptStore::add_or_update`]: crate::store::PromptStore::add_or_update

use crate::models::{Category, Prompt, PromptDraft};
use thiserror::Error;

/// Rejected user input. The message is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Heading and description cannot be empty.")]
    EmptyFields,

    #[error("Please provide a name for the new category.")]
    MissingCategoryName,

    #[error("Category '{0}' does not exist.")]
    UnknownCategory(String),
}

/// Which category the user picked in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    Existing(String),
    New(String),
}

/// The add/edit form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptForm {
    pub id: Option<String>,
    pub heading: String,
    pub description: String,
    pub category: CategorySelection,
}

impl PromptForm {
    /// Empty form for a new prompt, preselecting the first category.
    pub fn blank(categories: &[Category]) -> Self {
        let category = match categories.first() {
            Some(first) => CategorySelection::Existing(first.id.clone()),
            None => CategorySelection::New(String::new()),
        };
        Self {
            id: None,
            heading: String::new(),
            description: String::new(),
            category,
        }
    }

    /// Form prefilled from an existing prompt.
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            id: Some(prompt.id.clone()),
            heading: prompt.heading.clone(),
            description: prompt.description.clone(),
            category: CategorySelection::Existing(prompt.category_id.clone()),
        }
    }

    /// Produces the draft and optional new category name to save.
    ///
    /// Values are passed through untrimmed; only emptiness is checked. An
    /// existing category selection must name one of `categories`.
    pub fn validate(
        self,
        categories: &[Category],
    ) -> Result<(PromptDraft, Option<String>), ValidationError> {
        if self.heading.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ValidationError::EmptyFields);
        }

        let (category_id, new_category_name) = match self.category {
            CategorySelection::Existing(id) if !categories.iter().any(|c| c.id == id) => {
                return Err(ValidationError::UnknownCategory(id));
            }
            CategorySelection::Existing(id) => (id, None),
            CategorySelection::New(name) if name.trim().is_empty() => {
                return Err(ValidationError::MissingCategoryName);
            }
            CategorySelection::New(name) => (String::new(), Some(name)),
        };

        let draft = PromptDraft {
            id: self.id,
            heading: self.heading,
            description: self.description,
            category_id,
        };
        Ok((draft, new_category_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{seed_categories, seed_prompts};

    fn filled(category: CategorySelection) -> PromptForm {
        PromptForm {
            id: None,
            heading: "Heading".into(),
            description: "Description".into(),
            category,
        }
    }

    #[test]
    fn blank_form_preselects_first_category() {
        let form = PromptForm::blank(&seed_categories());
        assert_eq!(form.category, CategorySelection::Existing("1".into()));
        assert_eq!(
            PromptForm::blank(&[]).category,
            CategorySelection::New(String::new())
        );
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let mut form = filled(CategorySelection::Existing("1".into()));
        form.heading = "   ".into();
        assert_eq!(form.validate(&seed_categories()), Err(ValidationError::EmptyFields));

        let mut form = filled(CategorySelection::Existing("1".into()));
        form.description = String::new();
        assert_eq!(form.validate(&seed_categories()), Err(ValidationError::EmptyFields));
    }

    #[test]
    fn new_category_requires_a_name() {
        let form = filled(CategorySelection::New(" \t".into()));
        assert_eq!(form.validate(&seed_categories()), Err(ValidationError::MissingCategoryName));
        assert_eq!(
            ValidationError::MissingCategoryName.to_string(),
            "Please provide a name for the new category."
        );
    }

    #[test]
    fn new_category_clears_draft_category_id() {
        let (draft, name) = filled(CategorySelection::New("Travel".into()))
            .validate(&seed_categories())
            .unwrap();
        assert_eq!(draft.category_id, "");
        assert_eq!(name.as_deref(), Some("Travel"));
    }

    #[test]
    fn unknown_existing_category_is_rejected() {
        let form = filled(CategorySelection::Existing("bogus".into()));
        assert_eq!(
            form.validate(&seed_categories()),
            Err(ValidationError::UnknownCategory("bogus".into()))
        );

        let form = filled(CategorySelection::Existing("1".into()));
        assert_eq!(form.validate(&[]), Err(ValidationError::UnknownCategory("1".into())));
    }

    #[test]
    fn edit_form_keeps_the_prompt_id() {
        let prompt = &seed_prompts()[2];
        let (draft, name) = PromptForm::from_prompt(prompt)
            .validate(&seed_categories())
            .unwrap();
        assert_eq!(draft, PromptDraft::from(prompt));
        assert_eq!(name, None);
    }
}
