//! Path-segment sanitization for performer and genre names.
//!
//! A display name becomes a directory segment by stripping characters that are
//! illegal in path segments and turning whitespace into underscores. Names
//! that sanitize to nothing fall back to the literal `unknown`.
//!
//! The mapping is not collision-free: distinct names can sanitize to the same
//! segment, in which case the later emission overwrites the earlier one.
//! Known limitation, kept as-is until there is a product decision on
//! collision suffixing.

/// Characters that cannot appear in a path segment on any supported platform.
const ILLEGAL: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Sanitize `name` into a filesystem-safe directory segment.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if ILLEGAL.contains(&c) {
            continue;
        }
        slug.push(if c.is_whitespace() { '_' } else { c });
    }
    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug
    }
}
