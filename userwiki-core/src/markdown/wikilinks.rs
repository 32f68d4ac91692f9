//! Inline parser rule for `[[wiki link]]` syntax.
//!
//! Two target forms:
//! - `[[page]]` — same-namespace link
//! - `[[User:username/page]]` — cross-user link
//!
//! Either may carry display text after the first `|`. The rule only parses;
//! validity is filled in afterwards by the render pipeline, which knows the
//! current user's pages.

use crate::slug::{normalize_slug, page_href};
use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// AST node for a parsed wiki link.
///
/// The emitted anchor carries `data-wiki-link` (and `data-wiki-username` for
/// cross-user links) for client-side URL rewriting, and a
/// `wiki-link-valid`/`wiki-link-invalid` class for styling. That attribute
/// shape is a contract with the front end.
#[derive(Debug, Clone)]
pub struct WikiLink {
    pub slug: String,
    pub display: String,
    pub target_username: Option<String>,
    pub is_valid: bool,
}

impl NodeValue for WikiLink {
    fn render(&self, _: &Node, fmt: &mut dyn Renderer) {
        let mut attrs = vec![
            ("href", page_href(&self.slug)),
            ("data-wiki-link", self.slug.clone()),
        ];
        if let Some(owner) = &self.target_username {
            attrs.push(("data-wiki-username", owner.clone()));
        }
        let class = if self.is_valid {
            "wiki-link-valid"
        } else {
            "wiki-link-invalid"
        };
        attrs.push(("class", class.to_string()));

        fmt.open("a", &attrs);
        fmt.text(&self.display);
        fmt.close("a");
    }
}

/// Scanner claiming `[[...]]` spans ahead of the native link rule.
pub struct WikiLinkScanner;

impl InlineRule for WikiLinkScanner {
    const MARKER: char = '[';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        if !input.starts_with("[[") {
            return None;
        }

        // No closing brackets, no link; the span stays literal text
        let end = input.find("]]")?;
        let span = &input[2..end];

        // Only the first `|` splits; further pipes belong to the display text
        let (target, display) = match span.split_once('|') {
            Some((target, display)) => (target, display),
            None => (span, span),
        };
        let target = target.trim();

        let (slug, target_username) = match target.strip_prefix("User:") {
            Some(rest) => match rest.split_once('/') {
                Some((owner, page)) => (normalize_slug(page), Some(owner.trim().to_string())),
                // `User:` with no page part is not an error, just an
                // ordinary same-namespace target
                None => (normalize_slug(rest), None),
            },
            None => (normalize_slug(target), None),
        };

        let node = Node::new(WikiLink {
            slug,
            display: display.trim().to_string(),
            target_username,
            is_valid: false,
        });

        Some((node, end + 2))
    }
}

/// Install the wiki link rule on a parser.
pub fn add(md: &mut MarkdownIt) {
    md.inline.add_rule::<WikiLinkScanner>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_parser() -> MarkdownIt {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add(&mut md);
        md
    }

    fn first_link(node: &Node) -> Option<WikiLink> {
        if let Some(link) = node.cast::<WikiLink>() {
            return Some(link.clone());
        }
        node.children.iter().find_map(first_link)
    }

    #[test]
    fn test_simple_link() {
        let md = setup_parser();
        let ast = md.parse("This is a [[Test Page]] link.");
        let link = first_link(&ast).expect("wiki link parsed");

        assert_eq!(link.slug, "Test_Page");
        assert_eq!(link.display, "Test Page");
        assert_eq!(link.target_username, None);
        assert!(!link.is_valid);
    }

    #[test]
    fn test_display_text() {
        let md = setup_parser();
        let ast = md.parse("See [[test_page|Display Text]].");
        let link = first_link(&ast).unwrap();

        assert_eq!(link.slug, "test_page");
        assert_eq!(link.display, "Display Text");
    }

    #[test]
    fn test_only_first_pipe_splits() {
        let md = setup_parser();
        let ast = md.parse("[[target|display|with|pipes]]");
        let link = first_link(&ast).unwrap();

        assert_eq!(link.slug, "target");
        assert_eq!(link.display, "display|with|pipes");
    }

    #[test]
    fn test_cross_user_target() {
        let md = setup_parser();
        let ast = md.parse("See [[User:bob/Test Page]].");
        let link = first_link(&ast).unwrap();

        assert_eq!(link.target_username.as_deref(), Some("bob"));
        assert_eq!(link.slug, "Test_Page");
        assert_eq!(link.display, "User:bob/Test Page");
    }

    #[test]
    fn test_user_prefix_without_slash_falls_back() {
        let md = setup_parser();
        let ast = md.parse("See [[User:bob]].");
        let link = first_link(&ast).unwrap();

        assert_eq!(link.target_username, None);
        assert_eq!(link.slug, "bob");
    }

    #[test]
    fn test_unterminated_is_not_a_link() {
        let md = setup_parser();
        let ast = md.parse("This has [[an unclosed link");

        assert!(first_link(&ast).is_none());
        assert!(ast.render().contains("[[an unclosed link"));
    }

    #[test]
    fn test_code_span_is_left_alone() {
        let md = setup_parser();
        let ast = md.parse("`[[not a link]]`");

        assert!(first_link(&ast).is_none());
    }

    #[test]
    fn test_render_attribute_shape() {
        let md = setup_parser();
        let html = md.parse("[[Test Page]]").render();

        assert!(html.contains(
            r#"<a href="/Test_Page.html" data-wiki-link="Test_Page" class="wiki-link-invalid">Test Page</a>"#
        ));
    }

    #[test]
    fn test_regular_markdown_links_still_work() {
        let md = setup_parser();
        let html = md.parse("Regular [link](http://example.com) here.").render();

        assert!(html.contains(r#"href="http://example.com""#));
    }
}
