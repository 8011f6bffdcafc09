//! Category classification for display badges.

use serde::Serialize;

/// Badge palette chosen for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Blue,
    Green,
    Yellow,
    Orange,
    Indigo,
    Cyan,
    Purple,
    Pink,
    Neutral,
}

/// Background/foreground color pair of a category badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryColors {
    pub palette: Palette,
    /// Light tint, e.g. `blue-100`
    pub background: &'static str,
    /// Dark shade, e.g. `blue-800`
    pub foreground: &'static str,
}

impl CategoryColors {
    const fn of(palette: Palette, background: &'static str, foreground: &'static str) -> Self {
        Self {
            palette,
            background,
            foreground,
        }
    }
}

const NEUTRAL: CategoryColors = CategoryColors::of(Palette::Neutral, "neutral-100", "neutral-800");

// Order matters: "Q1-Q2" must hit the q1 rule before the q2 one.
const RULES: [(&str, CategoryColors); 8] = [
    ("q1", CategoryColors::of(Palette::Blue, "blue-100", "blue-800")),
    ("q2", CategoryColors::of(Palette::Green, "green-100", "green-800")),
    ("q3", CategoryColors::of(Palette::Yellow, "yellow-100", "yellow-800")),
    ("q4", CategoryColors::of(Palette::Orange, "orange-100", "orange-800")),
    ("вак", CategoryColors::of(Palette::Indigo, "indigo-100", "indigo-800")),
    ("ринц", CategoryColors::of(Palette::Cyan, "cyan-100", "cyan-800")),
    ("патент", CategoryColors::of(Palette::Purple, "purple-100", "purple-800")),
    ("диссертац", CategoryColors::of(Palette::Pink, "pink-100", "pink-800")),
];

/// Map a free-text category to its badge colors.
///
/// Case-insensitive substring match, first rule wins; empty or unmatched
/// input gets the neutral gray pair.
pub fn classify(category: &str) -> CategoryColors {
    if category.is_empty() {
        return NEUTRAL;
    }

    let lower = category.to_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, colors)| *colors)
        .unwrap_or(NEUTRAL)
}
