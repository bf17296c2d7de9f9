//! Ranking, review and retrospective boards
//!
//! A board is an ordered list of books bounded by its template's capacity.
//! It is persisted between runs so entries can be added one command at a time.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::books::Book;
use crate::story::metrics::effective_page_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum BoardTemplate {
    #[serde(rename = "top-3")]
    #[value(name = "top-3")]
    Top3,
    #[serde(rename = "top-5")]
    #[value(name = "top-5")]
    Top5,
    #[serde(rename = "review-2")]
    #[value(name = "review-2")]
    Review2,
    #[serde(rename = "review-3")]
    #[value(name = "review-3")]
    Review3,
    #[serde(rename = "retrospective")]
    #[value(name = "retrospective")]
    Retrospective,
}

impl BoardTemplate {
    pub fn capacity(self) -> usize {
        match self {
            BoardTemplate::Top3 => 3,
            BoardTemplate::Top5 => 5,
            BoardTemplate::Review2 => 2,
            BoardTemplate::Review3 => 3,
            BoardTemplate::Retrospective => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardTemplate::Top3 => "top-3",
            BoardTemplate::Top5 => "top-5",
            BoardTemplate::Review2 => "review-2",
            BoardTemplate::Review3 => "review-3",
            BoardTemplate::Retrospective => "retrospective",
        }
    }

    pub fn is_review(self) -> bool {
        matches!(self, BoardTemplate::Review2 | BoardTemplate::Review3)
    }

    /// Title used when the board's own title is blank
    pub fn default_title(self) -> &'static str {
        match self {
            BoardTemplate::Top3 | BoardTemplate::Top5 => "Top livros",
            BoardTemplate::Review2 | BoardTemplate::Review3 => "Avaliacoes do ano",
            BoardTemplate::Retrospective => "Retrospectiva",
        }
    }

    /// File stem used when the title sanitizes to nothing
    pub fn fallback_file_stem(self) -> &'static str {
        match self {
            BoardTemplate::Top3 | BoardTemplate::Top5 => "top-livros",
            BoardTemplate::Review2 | BoardTemplate::Review3 => "avaliacoes",
            BoardTemplate::Retrospective => "retrospectiva",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Choose a genre to continue.")]
    MissingGenre,

    #[error("Set a rating from 1 to 5.")]
    InvalidRating,

    #[error("Fill in the quote before continuing.")]
    BlankQuote,

    #[error("Fill in the synopsis before continuing.")]
    BlankSynopsis,

    #[error("Enter the book's page count.")]
    MissingPageCount,

    #[error("You already added the limit of {0} books.")]
    LimitReached(usize),

    #[error("No entry with id {0}")]
    UnknownEntry(String),

    #[error("Add at least one book before exporting.")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    pub id: String,
    pub book: Book,
    pub genre: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count_override: Option<u32>,
}

impl BoardEntry {
    pub fn page_count(&self) -> u32 {
        effective_page_count(self.book.page_count, self.page_count_override)
    }
}

/// Values for a new or edited entry, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub book: Book,
    pub genre: String,
    pub rating: u8,
    pub quote: Option<String>,
    pub synopsis: Option<String>,
    pub page_count_override: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub template: BoardTemplate,
    pub title: String,
    #[serde(default)]
    pub entries: Vec<BoardEntry>,
}

impl Board {
    pub fn new(template: BoardTemplate, title: &str) -> Self {
        Self {
            template,
            title: title.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.template.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity()
    }

    /// Title shown on the card
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            self.template.default_title()
        } else {
            trimmed
        }
    }

    /// Validate and append. At capacity the list is left untouched.
    pub fn add(&mut self, draft: EntryDraft) -> Result<&BoardEntry, BoardError> {
        let entry = self.validate(draft, self.next_id())?;
        if self.is_full() {
            return Err(BoardError::LimitReached(self.capacity()));
        }
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Replace an entry's values, keeping its id and position
    pub fn edit(&mut self, id: &str, draft: EntryDraft) -> Result<&BoardEntry, BoardError> {
        let index = self.position(id)?;
        let entry = self.validate(draft, id.to_string())?;
        self.entries[index] = entry;
        Ok(&self.entries[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<BoardEntry, BoardError> {
        let index = self.position(id)?;
        Ok(self.entries.remove(index))
    }

    /// Swap with the neighbour; returns false when already at that edge
    pub fn move_entry(&mut self, id: &str, direction: Direction) -> Result<bool, BoardError> {
        let index = self.position(id)?;
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.entries.len() => index + 1,
            _ => return Ok(false),
        };
        self.entries.swap(index, target);
        Ok(true)
    }

    /// Switch layout, dropping entries past the new capacity.
    /// Returns a warning when entries were dropped.
    pub fn set_template(&mut self, template: BoardTemplate) -> Option<String> {
        self.template = template;
        let capacity = template.capacity();
        if self.entries.len() <= capacity {
            return None;
        }
        self.entries.truncate(capacity);
        Some(format!(
            "Trimmed to {} books after switching template.",
            capacity
        ))
    }

    pub fn ensure_exportable(&self) -> Result<(), BoardError> {
        if self.entries.is_empty() {
            Err(BoardError::Empty)
        } else {
            Ok(())
        }
    }

    fn position(&self, id: &str) -> Result<usize, BoardError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BoardError::UnknownEntry(id.to_string()))
    }

    fn next_id(&self) -> String {
        let max = self
            .entries
            .iter()
            .filter_map(|e| e.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    fn validate(&self, draft: EntryDraft, id: String) -> Result<BoardEntry, BoardError> {
        let genre = draft.genre.trim();
        if genre.is_empty() {
            return Err(BoardError::MissingGenre);
        }

        if !(1..=5).contains(&draft.rating) {
            return Err(BoardError::InvalidRating);
        }

        // Quote and synopsis only appear on review cards
        let (quote, synopsis) = if self.template.is_review() {
            (
                non_blank(draft.quote, BoardError::BlankQuote)?,
                non_blank(draft.synopsis, BoardError::BlankSynopsis)?,
            )
        } else {
            (None, None)
        };

        let page_count_override = if draft.book.page_count == 0 {
            match draft.page_count_override {
                Some(pages) if pages > 0 => Some(pages),
                _ => return Err(BoardError::MissingPageCount),
            }
        } else {
            None
        };

        Ok(BoardEntry {
            id,
            book: draft.book,
            genre: genre.to_string(),
            rating: draft.rating,
            quote,
            synopsis,
            page_count_override,
        })
    }
}

/// A supplied field must carry text; an absent one stays absent
fn non_blank(value: Option<String>, err: BoardError) -> Result<Option<String>, BoardError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(err),
        Some(text) => Ok(Some(text.trim().to_string())),
        None => Ok(None),
    }
}
