//! # userwiki CLI
//!
//! Command-line front end for the userwiki render engine. Pages come from a
//! YAML site fixture instead of the web application's datastore.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use userwiki_core::{
    render_markdown_with_wiki_links, strip_unresolved, MemoryRepository, PageRepository,
};

#[derive(Parser)]
#[command(name = "userwiki")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the site fixture file
    #[arg(long, default_value = "site.yml")]
    site: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a user's page to HTML
    Render {
        /// Page owner
        user: String,

        /// Page slug
        slug: String,
    },

    /// Render markdown from stdin
    Preview {
        /// Namespace to resolve templates and links against
        #[arg(long)]
        user: Option<String>,
    },

    /// Print a page's content with unresolved template syntax removed
    Summary {
        /// Page owner
        user: String,

        /// Page slug
        slug: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let repo = MemoryRepository::from_file(&cli.site)
        .with_context(|| format!("Failed to load site fixture {:?}", cli.site))?;

    match cli.command {
        Commands::Render { user, slug } => {
            let content = page_content(&repo, &user, &slug)?;
            println!(
                "{}",
                render_markdown_with_wiki_links(&repo, &content, Some(&user))
            );
        }
        Commands::Preview { user } => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            println!(
                "{}",
                render_markdown_with_wiki_links(&repo, &content, user.as_deref())
            );
        }
        Commands::Summary { user, slug } => {
            let content = page_content(&repo, &user, &slug)?;
            println!("{}", strip_unresolved(&content));
        }
    }

    Ok(())
}

fn page_content(repo: &MemoryRepository, user: &str, slug: &str) -> Result<String> {
    let Some(content) = repo.find(Some(user), slug) else {
        bail!("No page {slug:?} for user {user:?}");
    };
    Ok(content)
}
