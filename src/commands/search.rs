//! Search command - query the books proxy and cache the results

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use tracing::{debug, warn};

use super::{block_on, Session};
use crate::books::{Book, BooksClient, SearchResponse, SearchScope};
use crate::history;
use crate::storage::{TypedStore, SEARCH_RESULTS};

pub fn run(
    session: &Session,
    title: &str,
    author: Option<&str>,
    scope: SearchScope,
    json: bool,
    record_history: bool,
) -> Result<()> {
    // A blank query returns nothing and leaves the cached results alone
    if title.trim().is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let client = BooksClient::new(&session.base_url, session.config.request_timeout())?;
    let response = block_on(client.search(title, author, scope))??;
    debug!(
        "search '{}' returned {} of {} item(s)",
        title,
        response.items.len(),
        response.total_items
    );

    session
        .store
        .set(&SEARCH_RESULTS, &response.items)
        .context("Failed to cache search results")?;

    if record_history {
        let author = author.map(str::trim).unwrap_or("");
        if let Err(e) = history::record(&session.store, title.trim(), author, Utc::now()) {
            warn!("could not record search history: {}", e);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_results(&response, session.quiet);
    }

    Ok(())
}

fn print_results(response: &SearchResponse, quiet: bool) {
    if response.items.is_empty() {
        println!("No results found.");
        return;
    }

    for (i, book) in response.items.iter().enumerate() {
        print_book_line(i + 1, book);
    }

    if !quiet {
        println!();
        println!(
            "Showing {} of {} result(s). Use {} to build a story card.",
            response.items.len(),
            response.total_items,
            "coverly story <id>".cyan()
        );
    }
}

fn print_book_line(position: usize, book: &Book) {
    let mut details = Vec::new();
    let authors = book.author_line();
    if !authors.is_empty() {
        details.push(authors);
    }
    if let Some(year) = book.published_date.get(..4) {
        details.push(year.to_string());
    }
    if book.page_count > 0 {
        details.push(format!("{} pages", book.page_count));
    }

    println!(
        "{:>2}. {} {}",
        position,
        book.title.bold(),
        format!("[{}]", book.id).dimmed()
    );
    if !details.is_empty() {
        println!("    {}", details.join(" · "));
    }
}
