//! Reading story data: templates, moods, genres and derived card values

pub mod cover;
pub mod genre;
pub mod metrics;
pub mod mood;

use clap::ValueEnum;

use crate::board::BoardTemplate;
use crate::books::Book;

pub use cover::sanitize_thumbnail_url;
pub use genre::book_genres;
pub use metrics::{display_date, progress_percent, StarRow, MAX_STARS};
pub use mood::{mood_meta, Mood, MoodMeta};

/// Single-book story layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoryTemplate {
    Classic,
    ReadingProgress,
    QuoteFocus,
    MoodBoard,
}

impl StoryTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            StoryTemplate::Classic => "classic",
            StoryTemplate::ReadingProgress => "reading-progress",
            StoryTemplate::QuoteFocus => "quote-focus",
            StoryTemplate::MoodBoard => "mood-board",
        }
    }
}

/// Every exportable layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Story(StoryTemplate),
    Board(BoardTemplate),
}

impl TemplateKind {
    /// Identifier of the stage node the layout is mounted on
    pub fn node_id(self) -> &'static str {
        match self {
            TemplateKind::Story(_) => "story-template",
            TemplateKind::Board(BoardTemplate::Retrospective) => "retrospective-template",
            TemplateKind::Board(_) => "top-books-template",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Story(t) => t.as_str(),
            TemplateKind::Board(t) => t.as_str(),
        }
    }
}

/// One reader's evaluation of a book, alive for a single export
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingEntry {
    pub book: Book,
    /// 0..=5
    pub rating: u8,
    pub hours_read: String,
    pub favorite_quote: String,
    pub mood: String,
    /// Negative input is clamped when rendered
    pub pages_read: i64,
    pub finished_date: String,
}

impl ReadingEntry {
    pub fn new(book: Book) -> Self {
        Self {
            book,
            rating: 0,
            hours_read: String::new(),
            favorite_quote: String::new(),
            mood: String::new(),
            pages_read: 0,
            finished_date: String::new(),
        }
    }

    pub fn stars(&self) -> StarRow {
        StarRow::new(self.rating as f64, MAX_STARS)
    }

    pub fn mood_meta(&self) -> MoodMeta {
        mood_meta(Some(&self.mood))
    }

    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.pages_read, self.book.page_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids() {
        assert_eq!(
            TemplateKind::Story(StoryTemplate::QuoteFocus).node_id(),
            "story-template"
        );
        assert_eq!(
            TemplateKind::Board(BoardTemplate::Top5).node_id(),
            "top-books-template"
        );
        assert_eq!(
            TemplateKind::Board(BoardTemplate::Review2).node_id(),
            "top-books-template"
        );
        assert_eq!(
            TemplateKind::Board(BoardTemplate::Retrospective).node_id(),
            "retrospective-template"
        );
    }

    #[test]
    fn test_template_names_match_cli_values() {
        for template in StoryTemplate::value_variants() {
            let value = template.to_possible_value().unwrap();
            assert_eq!(value.get_name(), template.as_str());
        }
    }
}
