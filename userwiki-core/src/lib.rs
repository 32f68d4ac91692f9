//! # userwiki-core
//!
//! Rendering engine for the userwiki personal wiki.
//!
//! This crate turns raw wikitext into HTML: it expands `{{template}}`
//! invocations against a page repository, then runs a markdown parser with a
//! custom inline rule for `[[wiki link]]` syntax. Pages live in per-user
//! namespaces; links and templates can reach across them.

pub mod markdown;
pub mod repository;
pub mod slug;
pub mod templates;
pub mod userbox;

pub use markdown::render_markdown_with_wiki_links;
pub use repository::{FixtureError, MemoryRepository, Page, PageRepository};
pub use slug::normalize_slug;
pub use templates::{parse_params, strip_unresolved, TemplateResolver};
pub use userbox::generate_userbox_html;
