//! Ordinal case-insensitive string comparison
//!
//! Comparisons fold case per character without locale rules, so matching is
//! stable across hosts. ASCII input takes an allocation-free path.

/// Case-insensitive ordinal equality
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive ordinal substring search
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle.is_ascii() {
        return contains_ascii_ignore_case(haystack, needle);
    }
    fold_case(haystack).contains(&fold_case(needle))
}

/// Case-folded copy used for hashing and non-ASCII substring search
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn contains_ascii_ignore_case(haystack: &str, needle: &str) -> bool {
    if haystack.len() < needle.len() {
        return false;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
