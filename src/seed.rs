//! Built-in dataset used when no durable state exists yet.

use crate::models::{Category, Prompt};

const SEED_CATEGORIES: [(&str, &str); 4] = [
    ("1", "Study"),
    ("2", "Business"),
    ("3", "Creative"),
    ("4", "Coding"),
];

const SEED_PROMPTS: [(&str, &str, &str, &str); 6] = [
    (
        "p1",
        "Explain Quantum Computing",
        "Explain the concept of quantum computing in simple terms, as if you were teaching it to a high school student. Cover qubits, superposition, and entanglement.",
        "1",
    ),
    (
        "p2",
        "Draft a Marketing Email",
        "Draft a marketing email for a new product launch. The product is a smart coffee mug that keeps drinks at the perfect temperature. The target audience is tech-savvy professionals. Highlight key features and include a call-to-action with a limited-time discount.",
        "2",
    ),
    (
        "p3",
        "Brainstorm Short Story Ideas",
        "Generate five short story ideas based on the theme of \"a lost memory\". Each idea should include a protagonist, a setting, and a potential conflict.",
        "3",
    ),
    (
        "p4",
        "Write a Python Function",
        "Write a Python function that takes a list of URLs as input, asynchronously fetches the content from each URL, and returns a list of the website titles. Handle potential errors like network issues or invalid URLs.",
        "4",
    ),
    (
        "p5",
        "Summarize a Research Paper",
        "I will provide you with a research paper on [topic]. Please summarize the key findings, methodology, and conclusions in three concise paragraphs.",
        "1",
    ),
    (
        "p6",
        "Generate a Business Plan Outline",
        "Create a comprehensive business plan outline for a startup offering personalized subscription boxes for eco-friendly products. Include sections for Executive Summary, Market Analysis, Products & Services, Marketing & Sales Strategy, and Financial Projections.",
        "2",
    ),
];

pub fn seed_categories() -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .map(|(id, name)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

pub fn seed_prompts() -> Vec<Prompt> {
    SEED_PROMPTS
        .iter()
        .map(|(id, heading, description, category_id)| Prompt {
            id: (*id).to_string(),
            heading: (*heading).to_string(),
            description: (*description).to_string(),
            category_id: (*category_id).to_string(),
        })
        .collect()
}
