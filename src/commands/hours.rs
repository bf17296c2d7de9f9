use anyhow::{bail, Result};
use colored::Colorize;

use super::{block_on, Session};
use crate::books::{format_hours, TogglClient};

pub fn run(session: &Session, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Please provide a book title");
    }

    let client = TogglClient::new(&session.base_url, session.config.request_timeout())?;
    let hours = block_on(client.book_hours(title))??;

    if session.quiet {
        println!("{}", format_hours(hours));
    } else {
        println!(
            "{} {} hour(s) tracked for {}",
            "✓".green(),
            format_hours(hours).bold(),
            title.cyan()
        );
    }

    Ok(())
}
