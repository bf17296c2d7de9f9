use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::board::{BoardTemplate, Direction};
use crate::books::SearchScope;
use crate::story::StoryTemplate;

#[derive(Parser)]
#[command(name = "coverly")]
#[command(about = "Search books, track reading and export shareable story images")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/coverly/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite store holding history, cached results and preferences
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Base URL of the books / Toggl proxy
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the books API by title
    Search {
        /// Book title (or part of it)
        title: String,

        /// Keep only books by this author
        #[arg(long)]
        author: Option<String>,

        /// How many results to keep
        #[arg(long, value_enum, default_value_t = SearchScope::Home)]
        scope: SearchScope,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Do not record this search in the history
        #[arg(long)]
        no_history: bool,
    },

    /// Show a book from the last search results
    Show {
        /// Book id as listed by `search`
        book_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List, clear or repeat recent searches
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Look up hours tracked in Toggl Track for a book
    Hours {
        /// Book title as used in Toggl entries
        title: String,
    },

    /// Export a single-book reading story image
    Story {
        /// Book id from the last search results
        book_id: String,

        /// Story layout
        #[arg(long, short, value_enum, default_value_t = StoryTemplate::Classic)]
        template: StoryTemplate,

        /// Rating from 0 to 5 stars
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,

        /// Hours spent reading
        #[arg(long, conflicts_with = "toggl")]
        hours: Option<String>,

        /// Fill hours from Toggl Track
        #[arg(long)]
        toggl: bool,

        /// Favorite quote
        #[arg(long)]
        quote: Option<String>,

        /// Reading mood (inspirado, emocionado, reflexivo, entretido, surpreso, relaxado, ansioso, nostálgico)
        #[arg(long)]
        mood: Option<String>,

        /// Pages read so far
        #[arg(long, allow_negative_numbers = true)]
        pages: Option<i64>,

        /// Date finished (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        finished: Option<String>,

        /// Output directory (uses config default if not specified)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build a ranking, review or retrospective board
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// List or choose the accent color palette
    Palette {
        #[command(subcommand)]
        action: PaletteAction,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show recent searches, newest first
    List,

    /// Forget all recent searches
    Clear,

    /// Run a recent search again
    Rerun {
        /// Position in `history list` (1 = newest)
        index: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Start a new board, replacing the current one
    New {
        #[arg(value_enum)]
        template: BoardTemplate,

        /// Board title shown on the card
        #[arg(long, default_value = "")]
        title: String,

        /// Replace a board that still has entries
        #[arg(long)]
        force: bool,
    },

    /// Add a book from the last search results
    Add {
        book_id: String,

        /// Genre label (defaults to the book's first category)
        #[arg(long)]
        genre: Option<String>,

        /// Rating from 1 to 5
        #[arg(long, default_value_t = 0)]
        rating: u8,

        /// Quote shown on review cards
        #[arg(long)]
        quote: Option<String>,

        /// Synopsis shown on review cards
        #[arg(long)]
        synopsis: Option<String>,

        /// Page count, required when the book reports none
        #[arg(long)]
        pages: Option<u32>,
    },

    /// Change an entry's genre, rating, quote, synopsis or page count
    Edit {
        entry_id: String,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        rating: Option<u8>,

        #[arg(long)]
        quote: Option<String>,

        #[arg(long)]
        synopsis: Option<String>,

        #[arg(long)]
        pages: Option<u32>,
    },

    /// Remove an entry
    Remove { entry_id: String },

    /// Move an entry one position up or down
    Move {
        entry_id: String,

        #[arg(value_enum)]
        direction: Direction,
    },

    /// Switch layout, trimming entries past the new capacity
    Template {
        #[arg(value_enum)]
        template: BoardTemplate,
    },

    /// Show the current board
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the current board as an image
    Export {
        /// Output directory (uses config default if not specified)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PaletteAction {
    /// List available palettes
    List,

    /// Show the selected palette
    Show,

    /// Select a palette by id
    Set { id: String },
}
