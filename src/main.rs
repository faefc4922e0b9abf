use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use prompt_library::clipboard::{Clipboard, WriterClipboard};
use prompt_library::render::CardRenderer;
use prompt_library::{
    open_store, CategoryFilter, CategorySelection, PromptForm, PromptQuery, PromptStore,
    StorageKind,
};
use std::io::{BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage backend type (filesystem, memory)
    #[arg(long, default_value = "filesystem")]
    storage: String,

    /// Directory holding prompts.json and categories.json (filesystem storage)
    #[arg(long, default_value = "./prompt-library")]
    data_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List prompts, newest first, optionally searched and filtered.
    List {
        /// Case-insensitive text to find in heading or description
        #[arg(long, short, default_value = "")]
        search: String,
        /// Category id, or "all"
        #[arg(long, short, default_value = "all")]
        category: String,
    },
    /// List categories with their prompt counts.
    Categories,
    /// Show one prompt in full.
    Show { id: String },
    /// Add a new prompt.
    Add {
        #[arg(long)]
        heading: String,
        #[arg(long)]
        description: String,
        #[command(flatten)]
        category: CategoryArgs,
    },
    /// Edit an existing prompt; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        heading: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        category: CategoryArgs,
    },
    /// Delete a prompt.
    Delete {
        id: String,
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
    /// Write a prompt's text to stdout for piping into a clipboard tool.
    Copy { id: String },
}

#[derive(Args, Debug)]
struct CategoryArgs {
    /// Existing category id
    #[arg(long, conflicts_with = "new_category")]
    category: Option<String>,
    /// Name of a category to reuse (case-insensitive) or create
    #[arg(long)]
    new_category: Option<String>,
}

impl Command {
    /// Whether the command changes the library.
    fn mutates(&self) -> bool {
        matches!(self, Self::Add { .. } | Self::Edit { .. } | Self::Delete { .. })
    }
}

impl CategoryArgs {
    fn apply(self, form: &mut PromptForm) {
        if let Some(name) = self.new_category {
            form.category = CategorySelection::New(name);
        } else if let Some(id) = self.category {
            form.category = CategorySelection::Existing(id);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `copy` output stays clean.
    // Use `RUST_LOG=info` (or debug, trace) for more detail.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    tracing::debug!(args = ?args, "Starting prompt library");

    let storage: StorageKind = args.storage.parse()?;
    if args.command.mutates() && !storage.is_durable() {
        tracing::warn!(
            storage = %args.storage,
            "This change is made in memory only and will be lost when the command exits"
        );
    }
    let mut store = open_store(storage, &args.data_dir).await;
    let renderer = CardRenderer::new()?;

    match args.command {
        Command::List { search, category } => {
            let filter: CategoryFilter = category.parse()?;
            let query = PromptQuery::new(search, filter);
            let view = store.filtered(&query);
            print!("{}", renderer.render_cards(&store, &view)?);
        }
        Command::Categories => {
            print!(
                "{}",
                renderer.render_categories(store.list_categories(), store.list_prompts())?
            );
        }
        Command::Show { id } => {
            let prompt = find_prompt(&store, &id)?;
            print!("{}", renderer.render_detail(&store, prompt)?);
        }
        Command::Add {
            heading,
            description,
            category,
        } => {
            let mut form = PromptForm::blank(store.list_categories());
            form.heading = heading;
            form.description = description;
            category.apply(&mut form);
            save(&mut store, form).await?;
        }
        Command::Edit {
            id,
            heading,
            description,
            category,
        } => {
            let mut form = PromptForm::from_prompt(find_prompt(&store, &id)?);
            if let Some(heading) = heading {
                form.heading = heading;
            }
            if let Some(description) = description {
                form.description = description;
            }
            category.apply(&mut form);
            save(&mut store, form).await?;
        }
        Command::Delete { id, yes } => {
            find_prompt(&store, &id)?;
            if !yes && !confirm("Are you sure you want to delete this prompt?")? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete(&id).await;
            println!("Deleted {}", id);
        }
        Command::Copy { id } => {
            let prompt = find_prompt(&store, &id)?;
            WriterClipboard::stdout().copy(&prompt.description)?;
            tracing::info!(prompt_id = %prompt.id, "Copied prompt text");
        }
    }

    Ok(())
}

fn find_prompt<'a>(store: &'a PromptStore, id: &str) -> Result<&'a prompt_library::Prompt> {
    match store.get_prompt(id) {
        Some(prompt) => Ok(prompt),
        None => bail!("Prompt '{}' not found", id),
    }
}

async fn save(store: &mut PromptStore, form: PromptForm) -> Result<()> {
    let (draft, new_category) = form.validate(store.list_categories())?;
    let prompt = store.add_or_update(draft, new_category.as_deref()).await;
    println!(
        "Saved {} [{}]",
        prompt.id,
        store.category_name(&prompt.category_id)
    );
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush().context("Failed to flush prompt")?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
