//! Display list produced by the template renderers

use super::color::{Gradient, Rgba};
use crate::story::StarRow;

pub const CANVAS_WIDTH: u32 = 1080;
pub const CANVAS_HEIGHT: u32 = 1920;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Linear(Gradient),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Rgba,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32, color: Rgba, align: Align) -> Self {
        Self { size, color, align }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    /// Generated "Sem Capa" artwork
    Placeholder,
}

impl ImageSource {
    pub fn from_url(url: Option<String>) -> Self {
        url.map_or(ImageSource::Placeholder, ImageSource::Url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Rect {
        rect: Rect,
        fill: Fill,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Rgba,
    },
    /// One line of text laid out inside the horizontal band `[x, x + width)`
    Text {
        x: i32,
        y: i32,
        width: u32,
        text: String,
        style: TextStyle,
    },
    Image {
        rect: Rect,
        source: ImageSource,
    },
    Stars {
        x: i32,
        y: i32,
        width: u32,
        size: f32,
        row: StarRow,
        lit: Rgba,
        dim: Rgba,
        align: Align,
    },
}

/// A fixed-size card described as ordered paint commands
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<Paint>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn fill(&mut self, rect: Rect, fill: Fill) {
        self.commands.push(Paint::Rect { rect, fill });
    }

    /// Fill the whole card
    pub fn background(&mut self, fill: Fill) {
        self.fill(Rect::new(0, 0, self.width, self.height), fill);
    }

    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        self.commands.push(Paint::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    pub fn text(&mut self, x: i32, y: i32, width: u32, text: impl Into<String>, style: TextStyle) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.commands.push(Paint::Text {
            x,
            y,
            width,
            text,
            style,
        });
    }

    /// Word-wrapped paragraph; returns the y just below the last line
    #[allow(clippy::too_many_arguments)]
    pub fn paragraph(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        text: &str,
        style: TextStyle,
        max_chars: usize,
        max_lines: usize,
    ) -> i32 {
        let line_height = (style.size * 1.3).round() as i32;
        let lines = wrap_text(text, max_chars, max_lines);
        let mut cursor = y;
        for line in lines {
            self.text(x, cursor, width, line, style);
            cursor += line_height;
        }
        cursor
    }

    pub fn image(&mut self, rect: Rect, source: ImageSource) {
        self.commands.push(Paint::Image { rect, source });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stars(&mut self, x: i32, y: i32, width: u32, size: f32, row: StarRow, lit: Rgba, dim: Rgba, align: Align) {
        self.commands.push(Paint::Stars {
            x,
            y,
            width,
            size,
            row,
            lit,
            dim,
            align,
        });
    }

    /// Remote images referenced by the scene, de-duplicated, in paint order
    pub fn image_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for command in &self.commands {
            if let Paint::Image {
                source: ImageSource::Url(url),
                ..
            } = command
            {
                if !urls.contains(&url.as_str()) {
                    urls.push(url);
                }
            }
        }
        urls
    }
}

#[cfg(test)]
impl Scene {
    /// All text lines, in paint order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Paint::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn star_rows(&self) -> Vec<StarRow> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Paint::Stars { row, .. } => Some(*row),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

/// Greedy word wrap by character count.
///
/// Words longer than a line are split. When the text needs more than
/// `max_lines`, the last kept line ends with "...".
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let current_len = current.chars().count();
        if current.is_empty() {
            current = word;
        } else if current_len + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(3));
            *last = chars.into_iter().collect::<String>().trim_end().to_string() + "...";
        }
    }
    lines
}
