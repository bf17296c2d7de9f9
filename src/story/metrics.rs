//! Derived values shown on cards: stars, progress, dates

use chrono::{Datelike, NaiveDate};

pub const MAX_STARS: u32 = 5;

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A row of `max` stars with `filled` of them lit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRow {
    pub filled: u32,
    pub max: u32,
}

impl StarRow {
    /// `filled = clamp(floor(rating), 0, max)`; NaN counts as zero
    pub fn new(rating: f64, max: u32) -> Self {
        let filled = if rating.is_nan() {
            0
        } else {
            rating.floor().clamp(0.0, max as f64) as u32
        };
        Self { filled, max }
    }

    /// One glyph per star, filled first
    pub fn glyphs(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.max).map(move |i| i < self.filled)
    }

    pub fn to_text(&self) -> String {
        self.glyphs().map(|lit| if lit { '★' } else { '☆' }).collect()
    }
}

/// Percentage of `total` pages read, clamped to 0..=100
pub fn progress_percent(pages_read: i64, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let read = pages_read.clamp(0, total as i64) as f64;
    (read / total as f64 * 100.0).round() as u32
}

/// Page count with a manual override taking precedence
pub fn effective_page_count(book_pages: u32, page_override: Option<u32>) -> u32 {
    page_override.filter(|p| *p > 0).unwrap_or(book_pages)
}

/// Parse `YYYY-MM-DD` (optionally followed by a time) or `DD/MM/YYYY`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.contains('/') {
        return NaiveDate::parse_from_str(value, "%d/%m/%Y").ok();
    }

    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// "18 de outubro de 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    )
}

/// Format a user-entered date, passing unparseable input through unchanged
pub fn display_date(value: &str) -> String {
    parse_date(value)
        .map(format_long_date)
        .unwrap_or_else(|| value.trim().to_string())
}
