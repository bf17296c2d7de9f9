pub mod api;
mod book;
mod error;
pub mod toggl;

pub use api::{BooksClient, SearchScope};
pub use book::{Book, SearchResponse};
pub use toggl::{format_hours, TogglClient};
