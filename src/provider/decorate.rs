//! Banner applied to mutated verses on read.
//!
//! The cache stores undecorated text, so the banner is rendered from the
//! current mutation counter every time and can never stack.

use super::cache::Entry;

/// Default warning word shown in the banner.
pub const DEFAULT_WARNING: &str = "warning";

/// Render `[<warning> <count>] <text>`.
pub fn banner(text: &str, warning: &str, mutation_count: u64) -> String {
    format!("[{warning} {mutation_count}] {text}")
}

/// Text a reader sees for an entry.
pub fn render(entry: &Entry, warning: &str, mutation_count: u64) -> String {
    if entry.mutated {
        banner(&entry.text, warning, mutation_count)
    } else {
        entry.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_entry_is_undecorated() {
        let entry = Entry::fetched("For God so loved".into());
        assert_eq!(render(&entry, DEFAULT_WARNING, 3), "For God so loved");
    }

    #[test]
    fn test_mutated_entry_uses_current_count() {
        let entry = Entry::mutated("Heretical text".into());
        assert_eq!(render(&entry, DEFAULT_WARNING, 1), "[warning 1] Heretical text");
        assert_eq!(render(&entry, "heresy", 7), "[heresy 7] Heretical text");
    }
}
