//! Text helpers shared by search and description rendering.

use std::collections::HashSet;

/// Case-insensitive substring test. `needle_lower` must already be lower-cased.
pub fn contains_lowered(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Drop repeated entries (case-insensitively), keeping first occurrence order.
pub fn dedup_case_insensitive<'a, I>(items: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

/// Truncate to at most `max_chars` characters, ending with "..." when cut.
///
/// Limits below 3 leave no room for the ellipsis and cut the text bare.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars < 3 {
        return text.chars().take(max_chars).collect();
    }
    let keep = max_chars.saturating_sub(3);
    format!("{}...", text.chars().take(keep).collect::<String>().trim_end())
}
