use anyhow::Result;
use colored::Colorize;

use super::Session;
use crate::books::Book;
use crate::story::{book_genres, display_date, sanitize_thumbnail_url};

pub fn run(session: &Session, book_id: &str, json: bool) -> Result<()> {
    let book = session.cached_book(book_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
    } else {
        print_pretty(&book, session.quiet);
    }

    Ok(())
}

fn print_pretty(book: &Book, quiet: bool) {
    println!("{}", book.title.bold());
    if !quiet {
        println!("{}", "=".repeat(book.title.chars().count().max(20)));
    }

    print_field("Authors", &book.author_line());
    print_field("Publisher", &book.publisher);
    print_field("Published", &display_date(&book.published_date));
    if book.page_count > 0 {
        print_field("Pages", &book.page_count.to_string());
    }
    print_field("Genres", &book_genres(&book.categories).join(", "));
    if let Some(cover) = sanitize_thumbnail_url(book.thumbnail.as_deref()) {
        print_field("Cover", &cover);
    }
    print_field("Id", &book.id);

    if let Some(description) = book.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!();
        println!("{}", description);
    }
}

fn print_field(name: &str, value: &str) {
    if !value.trim().is_empty() {
        println!("{:>10}: {}", name.cyan(), value);
    }
}
