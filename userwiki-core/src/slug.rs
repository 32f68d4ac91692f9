//! Wiki slug normalization.

/// Normalize a link or template target into a page slug.
///
/// Surrounding whitespace is trimmed and interior spaces become underscores.
/// Nothing else changes: slugs are case-sensitive, so `Home` and `home` are
/// different pages.
///
/// # Examples
///
/// ```
/// use userwiki_core::normalize_slug;
///
/// assert_eq!(normalize_slug("Test Page"), "Test_Page");
/// assert_eq!(normalize_slug("  sandbox  "), "sandbox");
/// ```
pub fn normalize_slug(target: &str) -> String {
    target.trim().replace(' ', "_")
}

/// The URL a wiki link points at before client-side rewriting.
pub fn page_href(slug: &str) -> String {
    format!("/{slug}.html")
}
