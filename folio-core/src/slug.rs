//! URL slugs derived from book titles.

/// Convert a title into a URL-friendly slug.
///
/// ASCII letters and digits are lower-cased and kept, as are underscores.
/// Runs of whitespace and hyphens collapse into a single `-`. Any other
/// character, including non-ASCII text, is dropped. Leading and trailing
/// hyphens or underscores are trimmed.
///
/// # Examples
/// ```
/// use folio_core::slugify;
///
/// assert_eq!(slugify("Dune: Messiah"), "dune-messiah");
/// assert_eq!(slugify("  Cooking   101 "), "cooking-101");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for ch in title.chars().filter(char::is_ascii) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch.is_ascii_whitespace() {
            pending_separator = true;
        }
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_owned()
}
