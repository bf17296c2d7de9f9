//! Template renderers: pure functions from card data to a [`Scene`]

mod boards;
mod story;

use crate::board::Board;
use crate::palette::ColorPalette;
use crate::render::color::{Gradient, Rgb, Rgba};
use crate::render::scene::{Align, Rect, Scene, TextStyle};
use crate::story::{ReadingEntry, StarRow, StoryTemplate, TemplateKind};

pub use boards::render_board;
pub use story::render_story;

pub const FOOTER_TEXT: &str = "📖 Gerado pelo Coverly";
pub const EMPTY_SLOT_TEXT: &str = "Adicione um livro";

const MARGIN: i32 = 80;
const CONTENT_WIDTH: u32 = 920;

/// Everything a template needs to draw one card
#[derive(Debug, Clone, Copy)]
pub enum CardProps<'a> {
    Story {
        template: StoryTemplate,
        entry: &'a ReadingEntry,
    },
    Board {
        board: &'a Board,
        palette: &'a ColorPalette,
    },
}

impl CardProps<'_> {
    pub fn kind(&self) -> TemplateKind {
        match self {
            CardProps::Story { template, .. } => TemplateKind::Story(*template),
            CardProps::Board { board, .. } => TemplateKind::Board(board.template),
        }
    }

    /// Title the exported file is named after
    pub fn title(&self) -> &str {
        match self {
            CardProps::Story { entry, .. } => &entry.book.title,
            CardProps::Board { board, .. } => board.display_title(),
        }
    }

    /// File stem used when the title has no usable characters
    pub fn fallback_file_stem(&self) -> &'static str {
        match self {
            CardProps::Story { .. } => "story",
            CardProps::Board { board, .. } => board.template.fallback_file_stem(),
        }
    }

    pub fn render(&self) -> Scene {
        match self {
            CardProps::Story { template, entry } => render_story(*template, entry),
            CardProps::Board { board, palette } => render_board(board, palette.accent()),
        }
    }

    /// Reduced content for the degraded fallback card
    pub fn summary(&self) -> CardSummary {
        match self {
            CardProps::Story { entry, .. } => {
                let meta = entry.mood_meta();
                let hours = entry.hours_read.trim();
                CardSummary {
                    title: entry.book.title.clone(),
                    subtitle: by_line(entry),
                    stars: Some(entry.stars()),
                    hours: (!hours.is_empty()).then(|| format!("{} horas", hours)),
                    mood: (!entry.mood.trim().is_empty())
                        .then(|| format!("{} Me senti {}", meta.emoji, meta.label)),
                    background: meta.gradient,
                }
            }
            CardProps::Board { board, palette } => {
                let accent = palette.accent();
                CardSummary {
                    title: board.display_title().to_string(),
                    subtitle: board
                        .entries
                        .iter()
                        .map(|e| e.book.title.as_str())
                        .collect::<Vec<_>>()
                        .join(" · "),
                    stars: None,
                    hours: None,
                    mood: None,
                    background: Gradient::diagonal(accent, accent.mix(Rgb::WHITE, 0.5)),
                }
            }
        }
    }
}

/// Content kept by the sketch card: title, subtitle, stars, hours and mood
#[derive(Debug, Clone, PartialEq)]
pub struct CardSummary {
    pub title: String,
    pub subtitle: String,
    pub stars: Option<StarRow>,
    pub hours: Option<String>,
    pub mood: Option<String>,
    pub background: Gradient,
}

fn by_line(entry: &ReadingEntry) -> String {
    let authors = entry.book.author_line();
    if authors.is_empty() {
        String::new()
    } else {
        format!("por {}", authors)
    }
}

fn style(size: f32, color: impl Into<Rgba>, align: Align) -> TextStyle {
    TextStyle::new(size, color.into(), align)
}

fn centered(size: f32, color: impl Into<Rgba>) -> TextStyle {
    style(size, color, Align::Center)
}

/// Card-wide centered heading; returns the y below it
fn heading(scene: &mut Scene, y: i32, text: &str, size: f32, color: Rgb, max_chars: usize, max_lines: usize) -> i32 {
    scene.paragraph(MARGIN, y, CONTENT_WIDTH, text, centered(size, color), max_chars, max_lines)
}

fn footer(scene: &mut Scene, color: Rgba) {
    let y = scene.height as i32 - 90;
    scene.text(MARGIN, y, CONTENT_WIDTH, FOOTER_TEXT, centered(28.0, color));
}

/// Horizontally centered box of the given size
fn centered_rect(scene: &Scene, y: i32, width: u32, height: u32) -> Rect {
    let x = (scene.width as i32 - width as i32) / 2;
    Rect::new(x, y, width, height)
}
