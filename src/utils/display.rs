//! Terminal display utilities for CLI output formatting.
//!
//! Width computations are unicode-aware so Cyrillic titles and author lists
//! line up in tables.

use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

static TERMINAL_WIDTH: OnceLock<usize> = OnceLock::new();

/// Get the current terminal width in characters, cached after the first call.
pub fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| {
        terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH)
    })
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Display width of `text` in terminal cells
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Truncate text to fit within the specified width.
///
/// Returns a string that fits within `max_width` cells, appending an ellipsis
/// if truncation occurred.
///
/// # Examples
///
/// ```
/// use publication_catalog::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let w = char_width(c);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Column widths `(title, authors, journal, year, category)` for the
/// publication table at the given terminal width.
pub fn publication_table_columns(terminal_width: usize) -> (usize, usize, usize, usize, usize) {
    const YEAR: usize = 6;
    const CATEGORY: usize = 12;
    // Borders and padding of a five-column comfy-table
    const CHROME: usize = 16;

    let flexible = terminal_width.saturating_sub(YEAR + CATEGORY + CHROME).max(45);
    let title = flexible * 45 / 100;
    let authors = flexible * 30 / 100;
    let journal = flexible - title - authors;

    (title, authors, journal, YEAR, CATEGORY)
}
