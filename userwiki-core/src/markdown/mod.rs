//! Markdown rendering pipeline with wiki link support.

pub mod wikilinks;

use crate::repository::PageRepository;
use crate::templates::TemplateResolver;
use markdown_it::{MarkdownIt, Node};
use std::collections::HashMap;

pub use wikilinks::{WikiLink, WikiLinkScanner};

/// Render wikitext to HTML.
///
/// Templates are expanded first so that wiki links inside expanded template
/// content are parsed like any other. `username` is the namespace the
/// content is rendered in: it scopes template lookups and supplies the page
/// set used to validate same-namespace links. Without it, same-namespace
/// links are all marked invalid.
///
/// This call never fails. Broken links come back flagged
/// `wiki-link-invalid` and unresolvable templates stay as literal `{{...}}`
/// text in the output.
pub fn render_markdown_with_wiki_links(
    repo: &dyn PageRepository,
    content: &str,
    username: Option<&str>,
) -> String {
    let resolver = TemplateResolver::new(repo, username);
    let expanded = resolver.expand(content);

    // Validation source for same-namespace links. A username that doesn't
    // resolve to a user degrades to an empty set, not an error.
    let user_pages = match username {
        Some(name) if repo.user_exists(name) => repo.slugs_of(name),
        _ => HashMap::new(),
    };

    let md = build_parser();
    let mut ast = md.parse(&expanded);
    mark_link_validity(&mut ast, repo, &user_pages, username);
    ast.render()
}

fn build_parser() -> MarkdownIt {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    // Generated userbox markup must pass through to the output
    markdown_it::plugins::html::add(&mut md);
    wikilinks::add(&mut md);
    md
}

// Walk the AST and mark each wiki link valid or invalid. Cross-user targets
// query the repository live; same-namespace targets check the pre-collected
// page set of the rendering user.
fn mark_link_validity(
    node: &mut Node,
    repo: &dyn PageRepository,
    user_pages: &HashMap<String, String>,
    username: Option<&str>,
) {
    if let Some(link) = node.cast_mut::<WikiLink>() {
        link.is_valid = match link.target_username.as_deref() {
            Some(owner) => repo.user_exists(owner) && repo.find(Some(owner), &link.slug).is_some(),
            None => username.is_some() && user_pages.contains_key(&link.slug),
        };
    }

    for child in node.children.iter_mut() {
        mark_link_validity(child, repo, user_pages, username);
    }
}
