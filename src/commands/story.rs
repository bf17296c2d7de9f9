//! Story command - render a single-book card and export it as an image

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::{debug, warn};

use super::{block_on, Session};
use crate::books::{format_hours, TogglClient};
use crate::export::{ExportOutcome, ExportRequest, Exporter, Stage};
use crate::render::CardProps;
use crate::story::{Mood, ReadingEntry, StoryTemplate};

/// Reader input for a story card, as given on the command line
pub struct StoryArgs<'a> {
    pub book_id: &'a str,
    pub template: StoryTemplate,
    pub rating: u8,
    pub hours: Option<&'a str>,
    pub toggl: bool,
    pub quote: Option<&'a str>,
    pub mood: Option<&'a str>,
    pub pages: Option<i64>,
    pub finished: Option<&'a str>,
    pub out: Option<&'a Path>,
}

pub fn run(session: &Session, args: &StoryArgs<'_>) -> Result<()> {
    let book = session.cached_book(args.book_id)?;

    let mut entry = ReadingEntry::new(book);
    entry.rating = args.rating;
    entry.favorite_quote = args.quote.unwrap_or_default().to_string();
    entry.pages_read = args.pages.unwrap_or(0);
    entry.finished_date = args.finished.unwrap_or_default().to_string();

    if let Some(mood) = args.mood {
        if !mood.trim().is_empty() && Mood::parse(mood).is_none() {
            warn!("unknown mood '{}', using the default look", mood);
        }
        entry.mood = mood.to_string();
    }

    entry.hours_read = match (args.hours, args.toggl) {
        (Some(hours), _) => hours.to_string(),
        (None, true) => toggl_hours(session, &entry.book.title)?,
        (None, false) => String::new(),
    };

    let props = CardProps::Story {
        template: args.template,
        entry: &entry,
    };
    debug!(
        "{} card, {}% read, background {}",
        args.template.as_str(),
        entry.progress_percent(),
        entry.mood_meta().gradient.css()
    );
    let outcome = export(session, &props, args.out)?;
    print_outcome(&outcome, session.quiet);
    Ok(())
}

/// Hours tracked in Toggl; a failed lookup leaves the field empty
fn toggl_hours(session: &Session, title: &str) -> Result<String> {
    let client = TogglClient::new(&session.base_url, session.config.request_timeout())?;
    match block_on(client.book_hours(title))? {
        Ok(hours) => Ok(format_hours(hours)),
        Err(e) => {
            eprintln!("{}: {}", "Warning".yellow(), e);
            Ok(String::new())
        }
    }
}

/// Export the card with the session's exporter
pub(crate) fn export(session: &Session, props: &CardProps<'_>, out: Option<&Path>) -> Result<ExportOutcome> {
    let mut exporter = session.exporter(out)?;
    save_card(&mut exporter, props)
}

/// Mount the card on a fresh stage and run the export pipeline
pub(crate) fn save_card(exporter: &mut Exporter, props: &CardProps<'_>) -> Result<ExportOutcome> {
    let mut stage = Stage::new();
    stage.mount(props.kind().node_id(), props.render());

    let request = ExportRequest::from_props(props);
    let result = block_on(exporter.export(&mut stage, &request))?;
    debug!("export finished: {:?}", exporter.state());

    result.map_err(|e| {
        for failure in e.failures() {
            eprintln!("  {} {}: {}", "✗".red(), failure.strategy, failure.error);
        }
        anyhow::Error::from(e)
    })
}

pub(crate) fn print_outcome(outcome: &ExportOutcome, quiet: bool) {
    if quiet {
        println!("{}", outcome.path.display());
        return;
    }

    println!(
        "{} Saved {} ({}x{}, {})",
        "✓".green(),
        outcome.path.display().to_string().cyan(),
        outcome.image.width,
        outcome.image.height,
        outcome.image.strategy
    );
    if outcome.image.strategy == "sketch" {
        println!(
            "{}: the full card could not be drawn; a simplified card was saved instead.",
            "Note".yellow()
        );
    }
}
