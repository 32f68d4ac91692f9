//! Wikitext template expansion.
//!
//! Any page can be invoked as a template: `{{slug|key=value|...}}` splices
//! that page's content in place of the invocation, with `{{{key}}}`
//! placeholders in the spliced content replaced by the supplied parameters.
//! Resolution is recursive with path-scoped cycle detection and a fixed
//! depth budget; anything that cannot be resolved stays in the output as
//! literal wiki syntax rather than failing the render.

use crate::repository::PageRepository;
use crate::userbox::generate_userbox_html;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;

/// Depth budget for one top-level `{{...}}` expansion.
pub const MAX_TEMPLATE_DEPTH: u32 = 10;

// A template invocation: name up to the first `|` or `}}`, then an optional
// pipe-separated parameter string. Unterminated spans simply never match.
static INVOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^|}]+)(?:\|([^}]*))?\}\}").unwrap());

// A `{{{param}}}` placeholder inside template content.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\{([^}]+)\}\}\}").unwrap());

// Any leftover `{{...}}` span, resolved or not.
static UNRESOLVED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^}]*\}\}").unwrap());

/// Parse a pipe-separated parameter string like `name=Bob|age=25`.
///
/// Splits on `|`, then on the first `=` within each segment; keys and values
/// are trimmed. Segments without `=` are dropped. Insertion order is kept,
/// and a duplicate key overwrites the value in its original position.
///
/// The split is flat: a literal `|` inside a value belonging to an
/// unresolved nested `{{...}}` would be mis-split. Callers resolve nested
/// spans before parsing parameters, so this only shows up for malformed
/// input.
pub fn parse_params(raw: &str) -> IndexMap<String, String> {
    let mut params = IndexMap::new();
    if raw.is_empty() {
        return params;
    }

    for part in raw.split('|') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            params.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    params
}

/// Remove every `{{...}}` span from a text.
///
/// For plain-text surfaces like link previews, where leftover wiki syntax
/// such as `{{userbox}}` must not appear.
pub fn strip_unresolved(text: &str) -> String {
    UNRESOLVED_RE.replace_all(text, "").into_owned()
}

// State threaded through one top-level expansion. `visited` holds the
// template names on the active call path; `remaining_depth` is decremented
// on the way down and restored on the way back up, so each path gets the
// full budget.
struct ResolutionContext {
    visited: HashSet<String>,
    remaining_depth: u32,
}

impl ResolutionContext {
    fn new() -> Self {
        Self {
            visited: HashSet::new(),
            remaining_depth: MAX_TEMPLATE_DEPTH,
        }
    }
}

/// Recursive resolver for `{{...}}` invocations, backed by a [`PageRepository`].
pub struct TemplateResolver<'a> {
    repo: &'a dyn PageRepository,
    username: Option<&'a str>,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(repo: &'a dyn PageRepository, username: Option<&'a str>) -> Self {
        Self { repo, username }
    }

    /// Expand every `{{...}}` invocation in `content`.
    ///
    /// Each top-level invocation gets a fresh cycle-detection set and depth
    /// budget. Invocations that cannot be resolved are left as their
    /// original literal text.
    pub fn expand(&self, content: &str) -> String {
        INVOCATION_RE
            .replace_all(content, |caps: &Captures| {
                let name = caps[1].trim();
                let params = parse_params(caps.get(2).map_or("", |m| m.as_str()));
                let mut ctx = ResolutionContext::new();
                self.resolve(name, &params, &mut ctx)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn resolve(
        &self,
        name: &str,
        params: &IndexMap<String, String>,
        ctx: &mut ResolutionContext,
    ) -> Option<String> {
        if ctx.remaining_depth == 0 {
            tracing::debug!("Template depth budget exhausted at: {}", name);
            return None;
        }

        if !ctx.visited.insert(name.to_string()) {
            tracing::debug!("Template cycle detected: {}", name);
            return None;
        }

        // Userbox special form: only when invoked with parameters, and only
        // when no real userbox page shadows it. A user-authored page named
        // `userbox` always takes precedence.
        if name == "userbox" && !params.is_empty() && self.namespace_lookup(name).is_none() {
            return Some(generate_userbox_html(params));
        }

        let Some(content) = self.lookup(name) else {
            ctx.visited.remove(name);
            return None;
        };

        // Resolve nested invocations first, sharing `visited` so cycles are
        // caught along this path, then substitute the caller's parameters.
        let nested_resolved = INVOCATION_RE.replace_all(&content, |caps: &Captures| {
            let nested_name = caps[1].trim();
            let nested_params = parse_params(caps.get(2).map_or("", |m| m.as_str()));
            ctx.remaining_depth -= 1;
            let resolved = self.resolve(nested_name, &nested_params, ctx);
            ctx.remaining_depth += 1;
            resolved.unwrap_or_else(|| caps[0].to_string())
        });

        let substituted = PLACEHOLDER_RE.replace_all(&nested_resolved, |caps: &Captures| {
            let key = caps[1].trim();
            params
                .get(key)
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        });
        let result = substituted.into_owned();

        ctx.visited.remove(name);
        Some(result)
    }

    // Template lookup: the invoking user's namespace first, then any
    // namespace (cross-user template reuse).
    fn lookup(&self, slug: &str) -> Option<String> {
        match self.username {
            Some(owner) => self
                .repo
                .find(Some(owner), slug)
                .or_else(|| self.repo.find(None, slug)),
            None => self.repo.find(None, slug),
        }
    }

    // Lookup without the cross-namespace fallback, used only to decide
    // whether a real userbox page shadows the built-in special form.
    fn namespace_lookup(&self, slug: &str) -> Option<String> {
        match self.username {
            Some(owner) => self.repo.find(Some(owner), slug),
            None => self.repo.find(None, slug),
        }
    }
}
