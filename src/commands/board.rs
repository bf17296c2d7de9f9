//! Board commands - build a multi-book board across runs and export it

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use super::story::{print_outcome, save_card};
use super::Session;
use crate::board::{Board, BoardEntry, BoardTemplate, Direction, EntryDraft};
use crate::export::Exporter;
use crate::palette;
use crate::render::CardProps;
use crate::storage::{TypedStore, BOARD};
use crate::story::{book_genres, StarRow, MAX_STARS};

/// Entry fields as given on the command line; `None` keeps the current value on edit
pub struct EntryArgs<'a> {
    pub genre: Option<&'a str>,
    pub rating: Option<u8>,
    pub quote: Option<&'a str>,
    pub synopsis: Option<&'a str>,
    pub pages: Option<u32>,
}

fn load(session: &Session) -> Result<Option<Board>> {
    session.store.get(&BOARD).context("Failed to read the saved board")
}

fn load_existing(session: &Session) -> Result<Board> {
    load(session)?.context("No board yet. Start one with 'coverly board new <template>'")
}

fn save(session: &Session, board: &Board) -> Result<()> {
    session.store.set(&BOARD, board).context("Failed to save the board")
}

pub fn new(session: &Session, template: BoardTemplate, title: &str, force: bool) -> Result<()> {
    if let Some(existing) = load(session)? {
        if !existing.entries.is_empty() && !force {
            eprintln!(
                "{}: The current board still has {} book(s)",
                "Error".red().bold(),
                existing.entries.len()
            );
            eprintln!();
            eprintln!("Use {} to replace it.", "--force".cyan());
            bail!("Board already has entries");
        }
    }

    let board = Board::new(template, title);
    save(session, &board)?;

    if !session.quiet {
        println!(
            "{} Started {} board \"{}\" ({} book(s) max)",
            "✓".green(),
            template.as_str().cyan(),
            board.display_title(),
            board.capacity()
        );
    }
    Ok(())
}

pub fn add(session: &Session, book_id: &str, args: &EntryArgs<'_>) -> Result<()> {
    let mut board = load_existing(session)?;
    let book = session.cached_book(book_id)?;

    let genre = match args.genre {
        Some(genre) => genre.to_string(),
        None => book_genres(&book.categories).into_iter().next().unwrap_or_default(),
    };

    let draft = EntryDraft {
        book,
        genre,
        rating: args.rating.unwrap_or(0),
        quote: args.quote.map(str::to_string),
        synopsis: args.synopsis.map(str::to_string),
        page_count_override: args.pages,
    };

    let entry = board.add(draft)?.clone();
    save(session, &board)?;

    if !session.quiet {
        println!(
            "{} Added {} as entry {} ({}/{})",
            "✓".green(),
            entry.book.title.bold(),
            entry.id.cyan(),
            board.entries.len(),
            board.capacity()
        );
    }
    Ok(())
}

pub fn edit(session: &Session, entry_id: &str, args: &EntryArgs<'_>) -> Result<()> {
    let mut board = load_existing(session)?;
    let Some(current) = board.entries.iter().find(|e| e.id == entry_id) else {
        bail!("No entry with id {}", entry_id);
    };

    let draft = EntryDraft {
        book: current.book.clone(),
        genre: args.genre.map_or_else(|| current.genre.clone(), str::to_string),
        rating: args.rating.unwrap_or(current.rating),
        quote: args.quote.map(str::to_string).or_else(|| current.quote.clone()),
        synopsis: args
            .synopsis
            .map(str::to_string)
            .or_else(|| current.synopsis.clone()),
        page_count_override: args.pages.or(current.page_count_override),
    };

    board.edit(entry_id, draft)?;
    save(session, &board)?;

    if !session.quiet {
        println!("{} Updated entry {}", "✓".green(), entry_id.cyan());
    }
    Ok(())
}

pub fn remove(session: &Session, entry_id: &str) -> Result<()> {
    let mut board = load_existing(session)?;
    let removed = board.remove(entry_id)?;
    save(session, &board)?;

    if !session.quiet {
        println!("{} Removed {}", "✓".green(), removed.book.title.bold());
    }
    Ok(())
}

pub fn move_entry(session: &Session, entry_id: &str, direction: Direction) -> Result<()> {
    let mut board = load_existing(session)?;
    let moved = board.move_entry(entry_id, direction)?;

    if !moved {
        if !session.quiet {
            println!("Entry {} is already at the {}.", entry_id, edge(direction));
        }
        return Ok(());
    }

    save(session, &board)?;
    if !session.quiet {
        print_entries(&board);
    }
    Ok(())
}

fn edge(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "top",
        Direction::Down => "bottom",
    }
}

pub fn set_template(session: &Session, template: BoardTemplate) -> Result<()> {
    let mut board = load_existing(session)?;
    let warning = board.set_template(template);
    save(session, &board)?;

    if let Some(warning) = warning {
        eprintln!("{}: {}", "Warning".yellow(), warning);
    }
    if !session.quiet {
        println!("{} Template set to {}", "✓".green(), template.as_str().cyan());
    }
    Ok(())
}

pub fn show(session: &Session, json: bool) -> Result<()> {
    let board = load_existing(session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    println!(
        "{} {}",
        board.display_title().bold(),
        format!(
            "[{}, {}/{}]",
            board.template.as_str(),
            board.entries.len(),
            board.capacity()
        )
        .dimmed()
    );
    if board.entries.is_empty() {
        println!("No books yet. Add one with {}", "coverly board add <id>".cyan());
    } else {
        print_entries(&board);
    }
    Ok(())
}

fn print_entries(board: &Board) {
    for (i, entry) in board.entries.iter().enumerate() {
        print_entry(i + 1, entry, board.template.is_review());
    }
}

fn print_entry(position: usize, entry: &BoardEntry, review: bool) {
    println!(
        "{:>2}. {} {}  {} · {} · {} pages",
        position,
        entry.book.title.bold(),
        format!("(#{})", entry.id).dimmed(),
        entry.genre,
        StarRow::new(entry.rating as f64, MAX_STARS).to_text().yellow(),
        entry.page_count()
    );
    if review {
        if let Some(quote) = &entry.quote {
            println!("    \"{}\"", quote);
        }
    }
}

pub fn export_board(session: &Session, out: Option<&Path>) -> Result<()> {
    let board = load_existing(session)?;
    board.ensure_exportable()?;

    let mut exporter = session.exporter(out)?;
    export_with(session, &board, &mut exporter)
}

fn export_with(session: &Session, board: &Board, exporter: &mut Exporter) -> Result<()> {
    let palette = palette::current(&session.store);
    let props = CardProps::Board { board, palette };
    let outcome = save_card(exporter, &props)?;
    print_outcome(&outcome, session.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_session;
    use crate::export::strategy::{ImageFormat, RasterError, RasterJob, RasterStrategy, RenderedImage};
    use crate::export::AssetLoader;
    use crate::render::templates::fixtures;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Accepts any scene and emits a PNG header, so no font is needed
    struct Blank;

    impl RasterStrategy for Blank {
        fn name(&self) -> &'static str {
            "png"
        }

        fn rasterize(&self, job: &RasterJob<'_>) -> Result<RenderedImage, RasterError> {
            assert_eq!(job.summary.title, "Favoritos");
            assert_eq!(job.summary.subtitle, "O Hobbit · Duna");
            Ok(RenderedImage {
                strategy: "png",
                format: ImageFormat::Png,
                width: job.scene.width,
                height: job.scene.height,
                bytes: b"\x89PNG\r\n\x1a\n".to_vec(),
            })
        }
    }

    fn draft(id: &str, title: &str, rating: u8) -> EntryDraft {
        let mut book = fixtures::book(id, title);
        book.thumbnail = None;
        EntryDraft {
            book,
            genre: "Fantasia".to_string(),
            rating,
            quote: None,
            synopsis: None,
            page_count_override: None,
        }
    }

    #[test]
    fn test_export_board_writes_titled_file() {
        let dir = TempDir::new().unwrap();
        let session = test_session(dir.path());
        let out = dir.path().join("out");

        let mut board = Board::new(BoardTemplate::Top3, "Favoritos");
        board.add(draft("h1", "O Hobbit", 5)).unwrap();
        board.add(draft("d1", "Duna", 4)).unwrap();
        save(&session, &board).unwrap();

        let board = load_existing(&session).unwrap();
        board.ensure_exportable().unwrap();
        let loader = AssetLoader::new(Duration::from_millis(200), None).unwrap();
        let mut exporter = Exporter::new(loader, None, &out, 90)
            .with_strategies(vec![Box::new(Blank) as Box<dyn RasterStrategy>]);

        export_with(&session, &board, &mut exporter).unwrap();

        let written = std::fs::read(out.join("favoritos.png")).unwrap();
        assert!(written.starts_with(b"\x89PNG"));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }

    #[test]
    fn test_export_board_without_entries_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let session = test_session(dir.path());
        save(&session, &Board::new(BoardTemplate::Top3, "Favoritos")).unwrap();

        let out = dir.path().join("out");
        let err = export_board(&session, Some(out.as_path())).unwrap_err();
        assert_eq!(err.to_string(), "Add at least one book before exporting.");
        assert!(!out.exists());
    }
}
