//! CLI UI utilities for terminal output.
//!
//! Colored category badges, status icons, the page-number strip and a boxed
//! view of a single publication.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::IsTerminal;

use crate::catalog::PageItem;
use crate::models::Publication;
use crate::utils::{classify, truncate_with_ellipsis, Palette};

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Terminal color standing in for a badge palette
pub fn palette_color(palette: Palette) -> AnsiColors {
    match palette {
        Palette::Blue => AnsiColors::Blue,
        Palette::Green => AnsiColors::Green,
        Palette::Yellow => AnsiColors::Yellow,
        Palette::Orange => AnsiColors::BrightRed,
        Palette::Indigo => AnsiColors::BrightBlue,
        Palette::Cyan => AnsiColors::Cyan,
        Palette::Purple => AnsiColors::Magenta,
        Palette::Pink => AnsiColors::BrightMagenta,
        Palette::Neutral => AnsiColors::White,
    }
}

/// A category rendered as a colored `[badge]`; empty input gives an empty string.
pub fn category_badge(category: &str, colored: bool) -> String {
    if category.is_empty() {
        return String::new();
    }
    let badge = format!("[{}]", category);
    if !colored {
        return badge;
    }
    let color = palette_color(classify(category).palette);
    badge.color(color).bold().to_string()
}

/// Page-number strip such as `1 … 5 [6] 7 … 12`; the current page is bracketed.
pub fn render_page_strip(current: u32, items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print search results header.
pub fn print_search_header(total: usize, page: u32, total_pages: u32) {
    println!();
    println!(
        "{} Found {} publications (page {} of {})",
        status_icon(Status::Search).yellow().bold(),
        format_number(total).green().bold(),
        page.to_string().cyan(),
        total_pages.max(1)
    );
    println!();
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(80).dimmed());
}

/// Print one publication with its metadata, one field per line.
pub fn print_publication_box(publication: &Publication) {
    println!();
    println!(
        "{} {}",
        format!("#{}", publication.id).dimmed(),
        publication.title.blue().bold()
    );
    print_divider();
    println!("  Authors:  {}", truncate_with_ellipsis(&publication.authors, 70));
    println!(
        "  Type:     {} ({})",
        publication.kind.green(),
        publication.year.yellow()
    );
    if let Some(journal) = publication.journal.as_deref().filter(|j| !j.is_empty()) {
        println!("  Journal:  {}", journal);
    }
    if let Some(doi) = publication.doi.as_deref().filter(|d| !d.is_empty()) {
        println!("  DOI:      {}", doi);
    }
    if let Some(number) = publication.patent_number() {
        println!("  Patent:   {}", number);
    }
    if let Some(category) = publication.category.as_deref().filter(|c| !c.is_empty()) {
        println!("  Category: {}", category_badge(category, is_terminal()));
    }
    let databases = publication.database_list();
    if !databases.is_empty() {
        println!("  Indexed:  {}", databases.join(", "));
    }
    if let Some(text) = publication.r#abstract.as_deref().filter(|a| !a.is_empty()) {
        println!();
        println!("  {}", text);
    }
}

/// Format a number with commas.
pub fn format_number(n: usize) -> String {
    n.to_string()
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Warning), "⚠");
        assert_eq!(status_icon(Status::Info), "ℹ");
        assert_eq!(status_icon(Status::Search), "🔍");
    }

    #[test]
    fn test_palette_color() {
        assert_eq!(palette_color(classify("Q1-Q2").palette), AnsiColors::Blue);
        assert_eq!(palette_color(classify("Патенты").palette), AnsiColors::Magenta);
        assert_eq!(palette_color(classify("").palette), AnsiColors::White);
    }

    #[test]
    fn test_category_badge() {
        assert_eq!(category_badge("ВАК", false), "[ВАК]");
        assert_eq!(category_badge("", true), "");

        let colored = category_badge("ВАК", true);
        assert!(colored.contains("[ВАК]"));
        assert!(colored.starts_with('\u{1b}'));
    }

    #[test]
    fn test_render_page_strip() {
        let items = [
            PageItem::Page(1),
            PageItem::Ellipsis,
            PageItem::Page(5),
            PageItem::Page(6),
            PageItem::Page(7),
            PageItem::Ellipsis,
            PageItem::Page(12),
        ];
        assert_eq!(render_page_strip(6, &items), "1 … 5 [6] 7 … 12");
        assert_eq!(render_page_strip(1, &[]), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1000000), "1,000,000");
        assert_eq!(format_number(123), "123");
    }
}
