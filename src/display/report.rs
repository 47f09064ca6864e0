//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the tables and reports.

/// Format a header line centred in `width`
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Width of the widest string, never less than `min`
pub fn column_width<'a>(values: impl IntoIterator<Item = &'a str>, min: usize) -> usize {
    values
        .into_iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("abc", 2), "..");
        // Multi-byte characters are counted, not bytes
        assert_eq!(truncate("Pão de açúcar", 7), "Pão ...");
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_header("Cards", 11), "   Cards");
        assert_eq!(format_header("Too long", 4), "Too long");
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(["a", "Conta"], 4), 5);
        assert_eq!(column_width(Vec::<&str>::new(), 4), 4);
    }
}
