use anyhow::{bail, Context, Result};
use colored::Colorize;

use super::Session;
use crate::books::SearchScope;
use crate::history;

pub fn list(session: &Session) -> Result<()> {
    let items = history::load(&session.store).context("Failed to read search history")?;

    if items.is_empty() {
        println!("No recent searches.");
        return Ok(());
    }

    for (i, item) in items.iter().enumerate() {
        let author = if item.author.is_empty() {
            String::new()
        } else {
            format!(" {} {}", "by".dimmed(), item.author)
        };
        println!(
            "{:>2}. {}{}  {}",
            i + 1,
            item.query.bold(),
            author,
            item.display_time().dimmed()
        );
    }

    Ok(())
}

pub fn clear(session: &Session) -> Result<()> {
    history::clear(&session.store).context("Failed to clear search history")?;
    if !session.quiet {
        println!("{} Search history cleared", "✓".green());
    }
    Ok(())
}

/// Repeat the search at 1-based `index`; the history itself is left as is
pub fn rerun(session: &Session, index: usize, json: bool) -> Result<()> {
    let items = history::load(&session.store).context("Failed to read search history")?;

    let Some(item) = index.checked_sub(1).and_then(|i| items.get(i)) else {
        bail!(
            "No search at position {} (history has {} item(s))",
            index,
            items.len()
        );
    };

    let author = (!item.author.is_empty()).then_some(item.author.as_str());
    super::search::run(session, &item.query, author, SearchScope::Home, json, false)
}
