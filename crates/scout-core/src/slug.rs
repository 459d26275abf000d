//! File-name slugs for goals.

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 60;

/// Slug used when a goal has no alphanumeric content.
pub const DEFAULT_SLUG: &str = "plan";

/// Turn a goal into a file-name stem.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, trims hyphens from both ends, and caps the result at
/// [`MAX_SLUG_LEN`] characters without leaving a trailing hyphen.
pub fn slugify(goal: &str) -> String {
    let lowered = goal.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    // All ASCII at this point, so byte truncation is char truncation.
    slug.truncate(MAX_SLUG_LEN);
    let trimmed = slug.trim_end_matches('-');

    if trimmed.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}
