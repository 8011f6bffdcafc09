//! Page counting and the page-number strip shown under search results.

use serde::Serialize;

/// Longest strip that is shown without ellipses
const COMPACT_LIMIT: u32 = 7;

/// Number of pages needed for `total` matches at `limit` per page
pub fn total_pages(total: usize, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(limit as usize)).unwrap_or(u32::MAX)
}

/// One entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page numbers to display around `current`.
///
/// Up to seven pages are listed in full. Longer ranges always show the first
/// and last page plus the neighbours of `current`, with an ellipsis standing
/// in for each skipped run. A single page needs no strip at all.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }

    if total_pages <= COMPACT_LIMIT {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        items.push(PageItem::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total_pages - 1);
    items.extend((start..=end).map(PageItem::Page));

    if current < total_pages.saturating_sub(2) {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}
