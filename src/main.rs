mod board;
mod books;
mod cli;
mod commands;
mod config;
mod export;
mod history;
mod palette;
mod render;
mod storage;
mod story;

use anyhow::Result;
use clap::Parser;
use cli::{BoardAction, Cli, Commands, HistoryAction, PaletteAction};
use commands::board::EntryArgs;
use commands::story::StoryArgs;
use commands::{GlobalArgs, Session};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "coverly=debug"
    } else if quiet {
        "coverly=error"
    } else {
        "coverly=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let globals = GlobalArgs {
        config: cli.config.as_deref(),
        store: cli.store.as_deref(),
        api_url: cli.api_url.as_deref(),
        quiet: cli.quiet,
    };

    // Init runs before any config exists
    if let Commands::Init { force } = cli.command {
        return commands::init::run(globals.config, force, cli.quiet);
    }

    let session = Session::open(&globals)?;

    match cli.command {
        Commands::Search {
            title,
            author,
            scope,
            json,
            no_history,
        } => {
            commands::search::run(&session, &title, author.as_deref(), scope, json, !no_history)?;
        }
        Commands::Show { book_id, json } => {
            commands::show::run(&session, &book_id, json)?;
        }
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list(&session)?,
            HistoryAction::Clear => commands::history::clear(&session)?,
            HistoryAction::Rerun { index, json } => {
                commands::history::rerun(&session, index, json)?;
            }
        },
        Commands::Hours { title } => {
            commands::hours::run(&session, &title)?;
        }
        Commands::Story {
            book_id,
            template,
            rating,
            hours,
            toggl,
            quote,
            mood,
            pages,
            finished,
            out,
        } => {
            commands::story::run(
                &session,
                &StoryArgs {
                    book_id: &book_id,
                    template,
                    rating,
                    hours: hours.as_deref(),
                    toggl,
                    quote: quote.as_deref(),
                    mood: mood.as_deref(),
                    pages,
                    finished: finished.as_deref(),
                    out: out.as_deref(),
                },
            )?;
        }
        Commands::Board { action } => match action {
            BoardAction::New {
                template,
                title,
                force,
            } => commands::board::new(&session, template, &title, force)?,
            BoardAction::Add {
                book_id,
                genre,
                rating,
                quote,
                synopsis,
                pages,
            } => commands::board::add(
                &session,
                &book_id,
                &EntryArgs {
                    genre: genre.as_deref(),
                    rating: Some(rating),
                    quote: quote.as_deref(),
                    synopsis: synopsis.as_deref(),
                    pages,
                },
            )?,
            BoardAction::Edit {
                entry_id,
                genre,
                rating,
                quote,
                synopsis,
                pages,
            } => commands::board::edit(
                &session,
                &entry_id,
                &EntryArgs {
                    genre: genre.as_deref(),
                    rating,
                    quote: quote.as_deref(),
                    synopsis: synopsis.as_deref(),
                    pages,
                },
            )?,
            BoardAction::Remove { entry_id } => commands::board::remove(&session, &entry_id)?,
            BoardAction::Move {
                entry_id,
                direction,
            } => commands::board::move_entry(&session, &entry_id, direction)?,
            BoardAction::Template { template } => {
                commands::board::set_template(&session, template)?;
            }
            BoardAction::Show { json } => commands::board::show(&session, json)?,
            BoardAction::Export { out } => {
                commands::board::export_board(&session, out.as_deref())?;
            }
        },
        Commands::Palette { action } => match action {
            PaletteAction::List => commands::palette::list(&session)?,
            PaletteAction::Show => commands::palette::show(&session)?,
            PaletteAction::Set { id } => commands::palette::set(&session, &id)?,
        },
        Commands::Init { .. } => {}
    }

    Ok(())
}
