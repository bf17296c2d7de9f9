use super::{by_line, centered, centered_rect, footer, heading, style, CONTENT_WIDTH, MARGIN};
use crate::render::color::{Rgb, Rgba};
use crate::render::scene::{wrap_text, Align, Fill, ImageSource, Rect, Scene};
use crate::story::{display_date, sanitize_thumbnail_url, ReadingEntry, StoryTemplate};

const QUOTE_PLACEHOLDER: &str = "Texto ou citacao aqui...";
const STAR_LIT: Rgb = Rgb(0xff, 0xd7, 0x00);

pub fn render_story(template: StoryTemplate, entry: &ReadingEntry) -> Scene {
    let mut scene = Scene::default();
    scene.background(Fill::Linear(entry.mood_meta().gradient));

    match template {
        StoryTemplate::Classic => classic(&mut scene, entry),
        StoryTemplate::ReadingProgress => reading_progress(&mut scene, entry),
        StoryTemplate::QuoteFocus => quote_focus(&mut scene, entry),
        StoryTemplate::MoodBoard => mood_board(&mut scene, entry),
    }

    footer(&mut scene, Rgb::WHITE.with_alpha(220));
    scene
}

fn cover(scene: &mut Scene, entry: &ReadingEntry, rect: Rect) {
    let source = ImageSource::from_url(sanitize_thumbnail_url(entry.book.thumbnail.as_deref()));
    scene.image(rect, source);
}

fn dim_star() -> Rgba {
    Rgb::WHITE.with_alpha(90)
}

fn title_block(scene: &mut Scene, entry: &ReadingEntry, y: i32, size: f32) -> i32 {
    let mut y = heading(scene, y, &entry.book.title, size, Rgb::WHITE, 22, 3);
    let authors = by_line(entry);
    if !authors.is_empty() {
        y = heading(scene, y + 10, &authors, size * 0.55, Rgb::WHITE, 40, 2);
    }
    y
}

fn mood_line(scene: &mut Scene, entry: &ReadingEntry, y: i32) -> i32 {
    if entry.mood.trim().is_empty() {
        return y;
    }
    let meta = entry.mood_meta();
    let line = format!("{} Me senti {}", meta.emoji, meta.label);
    scene.text(MARGIN, y, CONTENT_WIDTH, line, centered(40.0, Rgb::WHITE));
    y + 70
}

fn quote_panel(scene: &mut Scene, quote: &str, y: i32, max_lines: usize) -> i32 {
    let quote = quote.trim();
    if quote.is_empty() {
        return y;
    }
    let line_count = wrap_text(quote, 40, max_lines).len() as i32;
    let height = 120 + line_count * 47;
    scene.fill(
        Rect::new(MARGIN, y, CONTENT_WIDTH, height as u32),
        Fill::Solid(Rgb::WHITE.with_alpha(50)),
    );
    scene.text(MARGIN + 30, y + 10, 100, "\u{201c}", style(80.0, Rgb::WHITE, Align::Left));
    scene.paragraph(
        MARGIN + 40,
        y + 90,
        CONTENT_WIDTH - 80,
        quote,
        centered(36.0, Rgb::WHITE),
        40,
        max_lines,
    );
    y + height + 30
}

/// Number over label, centered in a stats column
fn stat(scene: &mut Scene, column: Rect, value: &str, label: &str) {
    scene.text(column.x, column.y, column.width, value, centered(64.0, Rgb::WHITE));
    scene.text(
        column.x,
        column.y + 80,
        column.width,
        label,
        centered(30.0, Rgb::WHITE.with_alpha(220)),
    );
}

fn classic(scene: &mut Scene, entry: &ReadingEntry) {
    let y = title_block(scene, entry, 120, 72.0);

    let cover_rect = centered_rect(scene, y + 40, 500, 750);
    cover(scene, entry, cover_rect);

    let stats_y = cover_rect.bottom() + 60;
    let column_width = CONTENT_WIDTH / 3;
    let column = |i: i32| Rect::new(MARGIN + i * column_width as i32, stats_y, column_width, 140);

    stat(scene, column(0), &entry.book.page_count.to_string(), "páginas");
    let hours = entry.hours_read.trim();
    if !hours.is_empty() {
        stat(scene, column(1), hours, "horas");
    }
    let rating = column(2);
    scene.stars(
        rating.x,
        rating.y + 20,
        rating.width,
        48.0,
        entry.stars(),
        STAR_LIT.into(),
        dim_star(),
        Align::Center,
    );

    let y = mood_line(scene, entry, stats_y + 160);
    quote_panel(scene, &entry.favorite_quote, y, 3);
}

fn reading_progress(scene: &mut Scene, entry: &ReadingEntry) {
    scene.text(
        MARGIN,
        110,
        CONTENT_WIDTH,
        "Progresso de leitura",
        centered(36.0, Rgb::WHITE.with_alpha(220)),
    );
    let y = title_block(scene, entry, 180, 64.0);

    let cover_rect = centered_rect(scene, y + 40, 400, 600);
    cover(scene, entry, cover_rect);

    let percent = entry.progress_percent();
    let bar_y = cover_rect.bottom() + 70;
    scene.text(
        MARGIN,
        bar_y,
        CONTENT_WIDTH,
        format!("{}%", percent),
        centered(96.0, Rgb::WHITE),
    );

    let track = Rect::new(MARGIN, bar_y + 130, CONTENT_WIDTH, 36);
    scene.fill(track, Fill::Solid(Rgb::WHITE.with_alpha(60)));
    let filled = CONTENT_WIDTH * percent / 100;
    if filled > 0 {
        scene.fill(
            Rect::new(track.x, track.y, filled, track.height),
            Fill::Solid(Rgb::WHITE.into()),
        );
    }

    let total = entry.book.page_count;
    let read = entry.pages_read.clamp(0, total as i64);
    scene.text(
        MARGIN,
        track.bottom() + 30,
        CONTENT_WIDTH,
        format!("{} de {} páginas", read, total),
        centered(36.0, Rgb::WHITE),
    );

    let mut y = track.bottom() + 100;
    let finished = entry.finished_date.trim();
    if !finished.is_empty() {
        scene.text(
            MARGIN,
            y,
            CONTENT_WIDTH,
            format!("Concluído em {}", display_date(finished)),
            centered(34.0, Rgb::WHITE),
        );
        y += 70;
    }

    scene.stars(
        MARGIN,
        y,
        CONTENT_WIDTH,
        52.0,
        entry.stars(),
        STAR_LIT.into(),
        dim_star(),
        Align::Center,
    );
    mood_line(scene, entry, y + 90);
}

fn quote_focus(scene: &mut Scene, entry: &ReadingEntry) {
    scene.text(
        MARGIN,
        120,
        CONTENT_WIDTH,
        "\u{201c}",
        centered(220.0, Rgb::WHITE.with_alpha(200)),
    );

    let quote = match entry.favorite_quote.trim() {
        "" => QUOTE_PLACEHOLDER,
        q => q,
    };
    let y = heading(scene, 380, quote, 58.0, Rgb::WHITE, 26, 10);

    let cover_rect = Rect::new(MARGIN, y.max(1100) + 60, 240, 360);
    cover(scene, entry, cover_rect);

    let info_x = cover_rect.right() + 40;
    let info_width = (MARGIN + CONTENT_WIDTH as i32 - info_x) as u32;
    let mut info_y = scene.paragraph(
        info_x,
        cover_rect.y + 20,
        info_width,
        &entry.book.title,
        style(46.0, Rgb::WHITE, Align::Left),
        22,
        3,
    );
    let authors = by_line(entry);
    if !authors.is_empty() {
        info_y = scene.paragraph(
            info_x,
            info_y + 10,
            info_width,
            &authors,
            style(30.0, Rgb::WHITE.with_alpha(220), Align::Left),
            34,
            2,
        );
    }
    scene.stars(
        info_x,
        info_y + 20,
        info_width,
        44.0,
        entry.stars(),
        STAR_LIT.into(),
        dim_star(),
        Align::Left,
    );
    mood_line(scene, entry, cover_rect.bottom() + 60);
}

fn mood_board(scene: &mut Scene, entry: &ReadingEntry) {
    let meta = entry.mood_meta();
    scene.text(MARGIN, 130, CONTENT_WIDTH, meta.emoji, centered(140.0, Rgb::WHITE));
    let (kicker, label) = if entry.mood.trim().is_empty() {
        ("Minha leitura", String::new())
    } else {
        ("Me senti", meta.label.to_uppercase())
    };
    scene.text(MARGIN, 310, CONTENT_WIDTH, kicker, centered(48.0, Rgb::WHITE));
    scene.text(MARGIN, 380, CONTENT_WIDTH, label, centered(110.0, Rgb::WHITE));

    let cover_rect = centered_rect(scene, 560, 440, 660);
    cover(scene, entry, cover_rect);

    let y = title_block(scene, entry, cover_rect.bottom() + 50, 56.0);
    scene.stars(
        MARGIN,
        y + 20,
        CONTENT_WIDTH,
        48.0,
        entry.stars(),
        STAR_LIT.into(),
        dim_star(),
        Align::Center,
    );

    let hours = entry.hours_read.trim();
    let details = if hours.is_empty() {
        format!("{} páginas", entry.book.page_count)
    } else {
        format!("{} páginas · {} horas", entry.book.page_count, hours)
    };
    scene.text(MARGIN, y + 100, CONTENT_WIDTH, details, centered(34.0, Rgb::WHITE));
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, FOOTER_TEXT};
    use super::*;
    use crate::render::scene::{Paint, CANVAS_HEIGHT, CANVAS_WIDTH};

    fn entry() -> ReadingEntry {
        let mut entry = ReadingEntry::new(fixtures::book("h1", "O Hobbit"));
        entry.rating = 4;
        entry.hours_read = "12".to_string();
        entry.mood = "Reflexivo".to_string();
        entry.favorite_quote = "Nem todos os que vagueiam estão perdidos.".to_string();
        entry.pages_read = 168;
        entry.finished_date = "18/10/2026".to_string();
        entry
    }

    fn all_templates() -> [StoryTemplate; 4] {
        [
            StoryTemplate::Classic,
            StoryTemplate::ReadingProgress,
            StoryTemplate::QuoteFocus,
            StoryTemplate::MoodBoard,
        ]
    }

    #[test]
    fn test_every_template_has_canvas_size_and_footer() {
        for template in all_templates() {
            let scene = render_story(template, &entry());
            assert_eq!((scene.width, scene.height), (CANVAS_WIDTH, CANVAS_HEIGHT));
            assert!(scene.contains_text(FOOTER_TEXT), "{:?}", template);
            assert_eq!(scene.star_rows().len(), 1, "{:?}", template);
        }
    }

    #[test]
    fn test_mood_gradient_background() {
        let scene = render_story(StoryTemplate::Classic, &entry());
        match &scene.commands[0] {
            Paint::Rect {
                fill: Fill::Linear(gradient),
                ..
            } => assert_eq!(
                gradient.css(),
                "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)"
            ),
            other => panic!("unexpected first command {:?}", other),
        }
    }

    #[test]
    fn test_classic_content() {
        let scene = render_story(StoryTemplate::Classic, &entry());
        assert!(scene.contains_text("O Hobbit"));
        assert!(scene.contains_text("por J.R.R. Tolkien"));
        assert!(scene.contains_text("336"));
        assert!(scene.contains_text("páginas"));
        assert!(scene.contains_text("horas"));
        assert!(scene.contains_text("Me senti reflexivo"));
        assert!(scene.contains_text("vagueiam"));
        assert_eq!(
            scene.image_urls(),
            vec!["https://books.google.com/books/content?id=h1&zoom=0"]
        );
    }

    #[test]
    fn test_classic_omits_empty_optional_sections() {
        let mut bare = entry();
        bare.hours_read = " ".to_string();
        bare.mood.clear();
        bare.favorite_quote.clear();
        let scene = render_story(StoryTemplate::Classic, &bare);
        assert!(!scene.contains_text("horas"));
        assert!(!scene.contains_text("Me senti"));
        assert!(!scene.contains_text("\u{201c}"));
    }

    #[test]
    fn test_reading_progress_values() {
        let scene = render_story(StoryTemplate::ReadingProgress, &entry());
        assert!(scene.contains_text("50%"));
        assert!(scene.contains_text("168 de 336 páginas"));
        assert!(scene.contains_text("Concluído em 18 de outubro de 2026"));
    }

    #[test]
    fn test_reading_progress_clamps_pages() {
        let mut over = entry();
        over.pages_read = 9000;
        let scene = render_story(StoryTemplate::ReadingProgress, &over);
        assert!(scene.contains_text("100%"));
        assert!(scene.contains_text("336 de 336 páginas"));

        over.pages_read = -4;
        let scene = render_story(StoryTemplate::ReadingProgress, &over);
        assert!(scene.contains_text("0%"));
        assert!(scene.contains_text("0 de 336 páginas"));
    }

    #[test]
    fn test_quote_focus_placeholder() {
        let mut quiet = entry();
        quiet.favorite_quote = "   ".to_string();
        let scene = render_story(StoryTemplate::QuoteFocus, &quiet);
        assert!(scene.contains_text(QUOTE_PLACEHOLDER));
    }

    #[test]
    fn test_missing_thumbnail_uses_placeholder() {
        let mut no_cover = entry();
        no_cover.book.thumbnail = Some("N/A".to_string());
        let scene = render_story(StoryTemplate::MoodBoard, &no_cover);
        assert!(scene.image_urls().is_empty());
        assert!(scene.commands.iter().any(|c| matches!(
            c,
            Paint::Image {
                source: ImageSource::Placeholder,
                ..
            }
        )));
        assert!(scene.contains_text("REFLEXIVO"));
        assert!(scene.contains_text("336 páginas · 12 horas"));
    }
}
