//! Text rendering of prompt cards with `tera` templates.

use crate::models::{Category, Prompt};
use crate::store::PromptStore;
use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera};

/// Description length shown on a list card before truncation.
pub const CARD_PREVIEW_CHARS: usize = 240;

const CARDS_TEMPLATE: &str = r#"{% if cards | length == 0 -%}
No Prompts Found
Try adjusting your search or filter, or add a new prompt!
{% else -%}
{% for card in cards -%}
+ {{ card.heading }}  [{{ card.category }}]
  id: {{ card.id }}
  {{ card.description | truncate(length=preview_chars) }}

{% endfor -%}
{{ cards | length }} of {{ total }} prompts
{% endif -%}
"#;

const DETAIL_TEMPLATE: &str = r#"{{ card.heading }}
Category: {{ card.category }}
Id: {{ card.id }}

{{ card.description }}
"#;

const CATEGORIES_TEMPLATE: &str = r#"{% for row in rows -%}
{{ row.id }}	{{ row.name }} ({{ row.prompts }})
{% endfor -%}
"#;

#[derive(Debug, Serialize)]
struct CardView<'a> {
    id: &'a str,
    heading: &'a str,
    category: &'a str,
    description: &'a str,
}

impl<'a> CardView<'a> {
    fn new(store: &'a PromptStore, prompt: &'a Prompt) -> Self {
        Self {
            id: &prompt.id,
            heading: &prompt.heading,
            category: store.category_name(&prompt.category_id),
            description: &prompt.description,
        }
    }
}

#[derive(Debug, Serialize)]
struct CategoryRow<'a> {
    id: &'a str,
    name: &'a str,
    prompts: usize,
}

pub struct CardRenderer {
    tera: Tera,
}

impl CardRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("cards.txt", CARDS_TEMPLATE),
            ("detail.txt", DETAIL_TEMPLATE),
            ("categories.txt", CATEGORIES_TEMPLATE),
        ])
        .context("Failed to compile card templates")?;
        Ok(Self { tera })
    }

    /// Renders a filtered view; `total` is the unfiltered prompt count.
    pub fn render_cards(&self, store: &PromptStore, view: &[&Prompt]) -> Result<String> {
        let cards: Vec<CardView> = view.iter().map(|p| CardView::new(store, p)).collect();
        let mut context = Context::new();
        context.insert("cards", &cards);
        context.insert("total", &store.list_prompts().len());
        context.insert("preview_chars", &CARD_PREVIEW_CHARS);
        self.render("cards.txt", &context)
    }

    pub fn render_detail(&self, store: &PromptStore, prompt: &Prompt) -> Result<String> {
        let mut context = Context::new();
        context.insert("card", &CardView::new(store, prompt));
        self.render("detail.txt", &context)
    }

    /// One line per category with the number of prompts referencing it.
    pub fn render_categories(&self, categories: &[Category], prompts: &[Prompt]) -> Result<String> {
        let rows: Vec<CategoryRow> = categories
            .iter()
            .map(|c| CategoryRow {
                id: &c.id,
                name: &c.name,
                prompts: prompts.iter().filter(|p| p.category_id == c.id).count(),
            })
            .collect();
        let mut context = Context::new();
        context.insert("rows", &rows);
        self.render("categories.txt", &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("Failed to render template '{}'", template))
    }
}
