use super::{centered, heading, style, CONTENT_WIDTH, EMPTY_SLOT_TEXT, MARGIN};
use crate::board::{Board, BoardEntry, BoardTemplate};
use crate::render::color::{Gradient, Rgb, Rgba};
use crate::render::scene::{Align, Fill, ImageSource, Rect, Scene};
use crate::story::{sanitize_thumbnail_url, StarRow, MAX_STARS};

const REVIEW_QUOTE_PLACEHOLDER: &str = "Texto ou citacao aqui...";
const REVIEW_SYNOPSIS_PLACEHOLDER: &str = "Sinopse do livro...";
const REVIEW_TITLE_PLACEHOLDER: &str = "Titulo do livro";

/// Cover size per row of a ranking card
struct RankingRow {
    slots: &'static [usize],
    cover: (u32, u32),
}

const TOP_3_ROWS: &[RankingRow] = &[
    RankingRow {
        slots: &[0],
        cover: (420, 630),
    },
    RankingRow {
        slots: &[1, 2],
        cover: (340, 510),
    },
];

const TOP_5_ROWS: &[RankingRow] = &[
    RankingRow {
        slots: &[0],
        cover: (280, 420),
    },
    RankingRow {
        slots: &[1, 2],
        cover: (220, 330),
    },
    RankingRow {
        slots: &[3, 4],
        cover: (220, 330),
    },
];

/// Colors derived from the palette accent
#[derive(Clone, Copy)]
struct Theme {
    accent: Rgb,
    kicker: Rgb,
    empty_cover: Rgba,
    dim_star: Rgba,
}

impl Theme {
    fn new(accent: Rgb) -> Self {
        Self {
            accent,
            kicker: accent.mix(Rgb::INK, 0.35),
            empty_cover: accent.with_alpha(60),
            dim_star: Rgb::INK.with_alpha(60),
        }
    }
}

pub fn render_board(board: &Board, accent: Rgb) -> Scene {
    let theme = Theme::new(accent);
    let mut scene = Scene::default();
    scene.background(Fill::Linear(Gradient::diagonal(
        accent.mix(Rgb::WHITE, 0.7),
        Rgb::WHITE,
    )));

    let slots: Vec<Option<&BoardEntry>> = (0..board.capacity())
        .map(|i| board.entries.get(i))
        .collect();

    match board.template {
        BoardTemplate::Top3 => ranking(&mut scene, board, &slots, TOP_3_ROWS, theme),
        BoardTemplate::Top5 => ranking(&mut scene, board, &slots, TOP_5_ROWS, theme),
        BoardTemplate::Review2 | BoardTemplate::Review3 => review(&mut scene, board, &slots, theme),
        BoardTemplate::Retrospective => retrospective(&mut scene, board, &slots, theme),
    }
    scene
}

fn cover_or_empty(scene: &mut Scene, entry: Option<&BoardEntry>, rect: Rect, theme: Theme) {
    match entry {
        Some(entry) => {
            let url = sanitize_thumbnail_url(entry.book.thumbnail.as_deref());
            scene.image(rect, ImageSource::from_url(url));
        }
        None => scene.fill(rect, Fill::Solid(theme.empty_cover)),
    }
}

fn stars(scene: &mut Scene, x: i32, y: i32, width: u32, size: f32, rating: u8, theme: Theme, align: Align) {
    scene.stars(
        x,
        y,
        width,
        size,
        StarRow::new(rating as f64, MAX_STARS),
        theme.accent.into(),
        theme.dim_star,
        align,
    );
}

fn ranking(scene: &mut Scene, board: &Board, slots: &[Option<&BoardEntry>], rows: &[RankingRow], theme: Theme) {
    let mut y = heading(scene, 120, board.display_title(), 76.0, Rgb::INK, 22, 2) + 60;
    const GAP: i32 = 80;

    for row in rows {
        let (cover_w, cover_h) = row.cover;
        let count = row.slots.len() as i32;
        let total = count * cover_w as i32 + (count - 1) * GAP;
        let mut x = (scene.width as i32 - total) / 2;

        for &slot in row.slots {
            let rank = slot + 1;
            let entry = slots.get(slot).copied().flatten();
            let rect = Rect::new(x, y, cover_w, cover_h);
            cover_or_empty(scene, entry, rect, theme);

            let radius = 44;
            scene.circle(rect.x, rect.y, radius, theme.accent.into());
            scene.text(
                rect.x - radius,
                rect.y - 30,
                (radius * 2) as u32,
                rank.to_string(),
                centered(48.0, Rgb::WHITE),
            );

            let title = entry.map_or(EMPTY_SLOT_TEXT, |e| e.book.title.as_str());
            scene.paragraph(
                x - GAP / 2,
                rect.bottom() + 20,
                cover_w + GAP as u32,
                title,
                centered(34.0, Rgb::INK),
                20,
                2,
            );
            x += cover_w as i32 + GAP;
        }
        y += cover_h as i32 + 150;
    }
}

fn review(scene: &mut Scene, board: &Board, slots: &[Option<&BoardEntry>], theme: Theme) {
    scene.text(
        MARGIN,
        110,
        CONTENT_WIDTH,
        "Leituras em destaque",
        centered(34.0, theme.kicker),
    );
    heading(scene, 170, board.display_title(), 68.0, Rgb::INK, 24, 1);

    const TOP: i32 = 300;
    const BOTTOM: i32 = 1860;
    const GAP: i32 = 30;
    let count = slots.len().max(1) as i32;
    let panel_height = (BOTTOM - TOP - (count - 1) * GAP) / count;
    let roomy = count <= 2;
    let cover_h: u32 = if roomy { 330 } else { 240 };
    let (quote_lines, synopsis_lines) = if roomy { (4, 6) } else { (2, 3) };

    for (index, entry) in slots.iter().copied().enumerate() {
        let y = TOP + index as i32 * (panel_height + GAP);
        scene.fill(
            Rect::new(MARGIN, y, CONTENT_WIDTH, panel_height as u32),
            Fill::Solid(Rgb::WHITE.with_alpha(235)),
        );

        let cover = Rect::new(MARGIN + 30, y + 30, cover_h * 2 / 3, cover_h);
        cover_or_empty(scene, entry, cover, theme);

        let info_x = cover.right() + 30;
        let info_width = (MARGIN + CONTENT_WIDTH as i32 - 30 - info_x) as u32;
        let title = entry.map_or(REVIEW_TITLE_PLACEHOLDER, |e| e.book.title.as_str());
        let info_y = scene.paragraph(
            info_x,
            cover.y + 10,
            info_width,
            title,
            style(40.0, Rgb::INK, Align::Left),
            26,
            2,
        );
        let pages = entry.map_or(0, BoardEntry::page_count);
        scene.text(
            info_x,
            info_y + 10,
            info_width,
            format!("{} paginas", pages),
            style(28.0, theme.kicker, Align::Left),
        );
        stars(
            scene,
            info_x,
            info_y + 60,
            info_width,
            36.0,
            entry.map_or(0, |e| e.rating),
            theme,
            Align::Left,
        );

        let quote = entry
            .and_then(|e| e.quote.as_deref())
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(REVIEW_QUOTE_PLACEHOLDER);
        let text_x = MARGIN + 30;
        let text_width = CONTENT_WIDTH - 60;
        let quote_bottom = scene.paragraph(
            text_x,
            cover.bottom() + 30,
            text_width,
            &format!("\"{}\"", quote),
            style(30.0, Rgb::INK, Align::Left),
            52,
            quote_lines,
        );
        scene.paragraph(
            text_x,
            quote_bottom + 15,
            text_width,
            review_synopsis(entry),
            style(26.0, Rgb::INK.with_alpha(200), Align::Left),
            60,
            synopsis_lines,
        );
    }
}

/// Synopsis, then the book description, then placeholder copy
fn review_synopsis(entry: Option<&BoardEntry>) -> &str {
    fn non_blank(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    entry
        .and_then(|e| non_blank(e.synopsis.as_deref()).or_else(|| non_blank(e.book.description.as_deref())))
        .unwrap_or(REVIEW_SYNOPSIS_PLACEHOLDER)
}

fn retrospective(scene: &mut Scene, board: &Board, slots: &[Option<&BoardEntry>], theme: Theme) {
    scene.text(MARGIN, 110, CONTENT_WIDTH, "Retrospectiva", centered(34.0, theme.kicker));
    heading(scene, 170, board.display_title(), 68.0, Rgb::INK, 24, 1);

    const TOP: i32 = 300;
    const ROW_HEIGHT: i32 = 370;

    for (index, entry) in slots.iter().copied().enumerate() {
        let y = TOP + index as i32 * ROW_HEIGHT;
        let cover = Rect::new(MARGIN, y, 200, 300);
        cover_or_empty(scene, entry, cover, theme);

        let info_x = cover.right() + 40;
        let info_width = (MARGIN + CONTENT_WIDTH as i32 - info_x) as u32;
        let title = entry.map_or(EMPTY_SLOT_TEXT, |e| e.book.title.as_str());
        let info_y = scene.paragraph(
            info_x,
            y + 30,
            info_width,
            title,
            style(42.0, Rgb::INK, Align::Left),
            28,
            2,
        );
        let meta = match entry {
            Some(e) => format!("{} · {} paginas", e.genre, e.page_count()),
            None => "Genero · Nota".to_string(),
        };
        scene.text(info_x, info_y + 10, info_width, meta, style(30.0, theme.kicker, Align::Left));
        if let Some(e) = entry {
            stars(scene, info_x, info_y + 70, info_width, 38.0, e.rating, theme, Align::Left);
        }
    }
}
